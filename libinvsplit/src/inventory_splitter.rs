use std::{
    fmt,
    fs::{self, OpenOptions},
    io::{BufRead, BufWriter, Write},
    path::{Path, PathBuf},
};

use serde::Serialize;
use tracing::{debug, info, warn};

use crate::{
    error::Result, util, FeatureMap, SplitError, Stopwords, COL_SEP, DEFAULT_MAX_FEATURES,
};

/// Counters collected over one inventory run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct SplitSummary {
    /// Non-blank lines read.
    pub total_lines: u64,
    /// Lines skipped because they did not have exactly four columns.
    pub wrong_lines: u64,
    pub written_files: u64,
}

impl SplitSummary {
    pub fn wrong_ratio(&self) -> f64 {
        if self.total_lines == 0 {
            return 0.0;
        }
        self.wrong_lines as f64 / self.total_lines as f64
    }
}

impl fmt::Display for SplitSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "# wrong lines: {:.3} ({} of {})",
            self.wrong_ratio(),
            self.wrong_lines,
            self.total_lines
        )
    }
}

/// Splits a sense inventory (`word<TAB>senseId<TAB>clusters<TAB>features`)
/// into one `word#n#senseId` file per sense.
#[derive(Debug, Clone)]
pub struct InventorySplitter {
    stopwords: Stopwords,
    max_features: usize,
    verbose: bool,
}

impl InventorySplitter {
    pub fn new(stopwords: Stopwords) -> Self {
        Self {
            stopwords,
            max_features: DEFAULT_MAX_FEATURES,
            verbose: false,
        }
    }

    pub fn with_max_features(mut self, max_features: usize) -> Self {
        self.max_features = max_features;
        self
    }

    /// Enables per-feature diagnostics (unparsable entries, name collisions).
    ///
    /// They are emitted at debug level, so they also need a subscriber that
    /// lets `debug` through; this flag lets library callers switch them off
    /// without touching the subscriber.
    pub fn with_verbose(mut self, verbose: bool) -> Self {
        self.verbose = verbose;
        self
    }

    pub fn split(&self, input: impl AsRef<Path>, output_dir: impl AsRef<Path>) -> Result<SplitSummary> {
        let input = input.as_ref();
        let output_dir = output_dir.as_ref();

        fs::create_dir_all(output_dir).map_err(|source| SplitError::CreateOutputDir {
            path: output_dir.to_path_buf(),
            source,
        })?;
        let read_error = |source: std::io::Error| SplitError::ReadInventory {
            path: input.to_path_buf(),
            source,
        };
        let reader = util::open_inventory(input).map_err(read_error)?;
        info!("splitting '{}' into '{}'", input.display(), output_dir.display());

        let mut summary = SplitSummary::default();
        for line in reader.split(b'\n') {
            let line = line.map_err(read_error)?;
            // Invalid UTF-8 is replaced rather than aborting the run
            let line = String::from_utf8_lossy(&line);
            let line = line.trim();
            if line.is_empty() {
                continue;
            }
            summary.total_lines += 1;

            let fields = line.split(COL_SEP).collect::<Vec<_>>();
            let [word, sense_id, clusters, features] = fields[..] else {
                warn!(
                    "cannot parse the line with {} fields: '{}'",
                    fields.len(),
                    line_preview(line)
                );
                summary.wrong_lines += 1;
                continue;
            };

            let clusters = util::parse_features(clusters, &self.stopwords, self.verbose);
            let features = util::parse_features(features, &self.stopwords, self.verbose);
            let cluster_and_features = util::merge_features(&clusters, &features, self.verbose);
            self.write_sense(output_dir, word.trim(), sense_id.trim(), &cluster_and_features)?;
            summary.written_files += 1;
        }

        debug!("{}", summary);
        Ok(summary)
    }
}

fn line_preview(line: &str) -> String {
    const PREVIEW_CHARS: usize = 100;
    line.chars().take(PREVIEW_CHARS).collect()
}

// Helper methods
impl InventorySplitter {
    /// Path of the sense file, always directly inside `output_dir`.
    ///
    /// Path separators in the word or sense id are replaced with `_`.
    pub fn sense_file_path(output_dir: &Path, word: &str, sense_id: &str) -> PathBuf {
        let file_name = format!("{}#n#{}", word, sense_id)
            .chars()
            .map(|c| if std::path::is_separator(c) { '_' } else { c })
            .collect::<String>();
        output_dir.join(file_name)
    }

    fn write_sense(
        &self,
        output_dir: &Path,
        word: &str,
        sense_id: &str,
        features: &FeatureMap,
    ) -> Result<()> {
        let path = Self::sense_file_path(output_dir, word, sense_id);
        let write = || -> std::io::Result<()> {
            let file = OpenOptions::new()
                .create(true)
                .truncate(true)
                .write(true)
                .open(&path)?;
            let mut writer = BufWriter::new(file);
            // The evaluation script expects a leading blank line
            writeln!(writer)?;
            for (name, score) in features.iter().take(self.max_features) {
                if name.is_empty() || name.chars().count() < crate::MIN_FEATURE_LEN {
                    if self.verbose {
                        debug!("cannot parse feature '{}'", name);
                    }
                    continue;
                }
                writeln!(writer, "{} {}", name, score)?;
            }
            writer.flush()
        };
        write().map_err(|source| SplitError::WriteSenseFile { path, source })
    }
}

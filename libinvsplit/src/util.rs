use std::{
    fs::{self, OpenOptions},
    io::{self, BufRead, BufReader},
    path::Path,
};

use bzip2::read::BzDecoder;
use tracing::{debug, warn};

use crate::{FeatureMap, Stopwords, LIST_SEP, MIN_FEATURE_LEN, SCORE_SEP};

/// Opens an inventory for line-wise reading, decompressing `.bz2` files on the fly.
pub fn open_inventory(filename: impl AsRef<Path>) -> io::Result<Box<dyn BufRead>> {
    let filename = filename.as_ref();
    let file = OpenOptions::new().read(true).open(filename)?;
    let is_bzip2 = filename
        .extension()
        .map(|s| s.to_string_lossy().as_ref() == "bz2")
        .unwrap_or_default();
    if is_bzip2 {
        Ok(Box::new(BufReader::new(BzDecoder::new(file))))
    } else {
        Ok(Box::new(BufReader::new(file)))
    }
}

/// Reads one stopword per line. A file that cannot be read yields an empty set.
pub fn load_stopwords(path: impl AsRef<Path>) -> Stopwords {
    let path = path.as_ref();
    match fs::read_to_string(path) {
        Ok(contents) => contents.lines().map(|line| line.trim().to_string()).collect(),
        Err(err) => {
            warn!("cannot load stopwords '{}': {}", path.display(), err);
            Stopwords::new()
        }
    }
}

/// Normalizes a raw feature name, or rejects it when it holds characters that
/// downstream tools would read as pattern syntax.
pub fn clean_feature(feature: &str) -> Option<String> {
    const PATTERN_SYMBOLS: &str = "+/\\$^.?()[]{}|*";
    if feature.contains(|c: char| PATTERN_SYMBOLS.contains(c)) {
        return None;
    }
    Some(feature.trim().replace(' ', "_"))
}

pub fn feature_qualifies(name: &str, stopwords: &Stopwords) -> bool {
    !name.is_empty() && name.chars().count() >= MIN_FEATURE_LEN && !stopwords.contains(name)
}

// Trailing empty segments are dropped, so "name:score:" still counts as a pair.
fn split_entry(entry: &str) -> Option<(&str, &str)> {
    let mut parts = entry.split(SCORE_SEP).collect::<Vec<_>>();
    while parts.last().map_or(false, |part| part.is_empty()) {
        parts.pop();
    }
    match parts[..] {
        [name, score] => Some((name, score)),
        _ => None,
    }
}

/// Parses a `name:score  name:score` list.
///
/// Every qualifying name is inserted as cleaned; a name with uppercase
/// characters additionally gets a lowercased entry carrying the same score.
pub fn parse_features(features: &str, stopwords: &Stopwords, verbose: bool) -> FeatureMap {
    let mut res = FeatureMap::new();
    for entry in features.trim().split(LIST_SEP) {
        let Some((name, score)) = split_entry(entry.trim()) else {
            if verbose {
                debug!("cannot parse feature '{}'", entry);
            }
            continue;
        };
        let Some(name) = clean_feature(name) else {
            continue;
        };
        let score = score.trim();
        if feature_qualifies(&name, stopwords) {
            res.insert(name.as_str(), score);
        }
        let lowercase = name.to_lowercase();
        if lowercase != name && feature_qualifies(&lowercase, stopwords) {
            res.insert(lowercase, score);
        }
    }
    res
}

/// Appends features unseen in `clusters`; on a name collision the cluster score is kept.
pub fn merge_features(clusters: &FeatureMap, features: &FeatureMap, verbose: bool) -> FeatureMap {
    let mut res = clusters.clone();
    for (name, score) in features.iter() {
        if let Some(current) = res.get(name) {
            if verbose {
                debug!(
                    "feature '{}' already in the collection: now '{}', proposed '{}'",
                    name, current, score
                );
            }
            continue;
        }
        res.insert(name, score);
    }
    res
}

use std::collections::HashSet;

pub use error::SplitError;
pub use feature_map::FeatureMap;
pub use inventory_splitter::{InventorySplitter, SplitSummary};
pub use util::{clean_feature, feature_qualifies, load_stopwords, merge_features, parse_features};

mod error;
mod feature_map;
mod inventory_splitter;
mod util;

pub type Stopwords = HashSet<String>;

/// Separator between `name:score` entries of a feature list.
pub const LIST_SEP: &str = "  ";
/// Separator between the four inventory columns.
pub const COL_SEP: char = '\t';
/// Separator between a feature name and its score.
pub const SCORE_SEP: char = ':';
pub const MIN_FEATURE_LEN: usize = 3;
pub const DEFAULT_MAX_FEATURES: usize = 1000;

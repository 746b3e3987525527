use std::{io, path::PathBuf};

use thiserror::Error;

#[derive(Debug, Error)]
pub enum SplitError {
    #[error("cannot create output directory '{}'", path.display())]
    CreateOutputDir {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("cannot read inventory '{}'", path.display())]
    ReadInventory {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("cannot write sense file '{}'", path.display())]
    WriteSenseFile {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

pub type Result<T> = std::result::Result<T, SplitError>;

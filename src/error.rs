use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    #[error("Failed to open word list: {}", path.display())]
    WordListRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Word list must contain at least {required} distinct words (found {available})")]
    InsufficientWords { required: usize, available: usize },

    #[error("Failed to read env file: {}", path.display())]
    EnvFileRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error(
        "--pepper was set but PASSGEN_PEPPER is not defined (env file: {}). \
         Set PASSGEN_PEPPER in your environment or in the env file",
        env_file.display()
    )]
    MissingPepper { env_file: PathBuf },

    #[error("Could not open log file '{}'", path.display())]
    LogOpen {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to write log entry")]
    LogWrite(#[source] std::io::Error),

    #[error("Failed to write passphrase")]
    Output(#[source] std::io::Error),

    #[error("Internal error: failed to select {requested} words (got {selected})")]
    SelectionShortfall { requested: usize, selected: usize },
}

pub type Result<T> = std::result::Result<T, Error>;

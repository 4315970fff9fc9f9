use thiserror::Error;

#[derive(Error, Debug)]
pub enum StyleKitError {
    #[error("Log file error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Grammar error: {0}")]
    Grammar(#[from] vds::VdsError),

    #[error("Unknown style property: {0}")]
    UnknownProperty(String),

    #[error("A logger is already installed")]
    LoggerInstalled(#[from] log::SetLoggerError),
}

// Create a type alias for convenience
pub type Result<T> = std::result::Result<T, StyleKitError>;

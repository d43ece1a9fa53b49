use thiserror::Error;

#[derive(Debug, Error)]
pub enum ExporterError {
    #[error("Metric error: {0}")]
    Metric(#[from] prometheus::Error),

    #[error("zfs command failed: {0}")]
    Command(String),

    #[error("Failed to parse zfs output: {0}")]
    Parse(String),

    #[error("Collector registry error: {0}")]
    Registry(String),

    #[error("Collector {name} failed: {reason}")]
    Collector { name: String, reason: String },

    #[error("Sample channel closed before the scrape finished")]
    ChannelClosed,

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Invalid UTF-8: {0}")]
    Utf8(#[from] std::string::FromUtf8Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, ExporterError>;

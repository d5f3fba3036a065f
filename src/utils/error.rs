use thiserror::Error;

#[derive(Error, Debug)]
pub enum EtlError {
    #[error("API request failed: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("Unexpected API response: {message}")]
    UnexpectedResponse { message: String },

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("Spreadsheet error: {0}")]
    Spreadsheet(#[from] rust_xlsxwriter::XlsxError),

    #[error("Configuration error: {message}")]
    ConfigError { message: String },

    #[error("Invalid value '{value}' for '{field}': {reason}")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Unexpected data shape in '{field}': {message}")]
    DataShape { field: String, message: String },
}

/// Coarse error taxonomy used to decide where an error is contained.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    Transport,
    Config,
    Io,
    DataShape,
}

impl EtlError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            EtlError::Transport(_) | EtlError::UnexpectedResponse { .. } => ErrorKind::Transport,
            EtlError::ConfigError { .. } | EtlError::InvalidConfigValueError { .. } => {
                ErrorKind::Config
            }
            EtlError::IoError(_) => ErrorKind::Io,
            EtlError::SerializationError(_)
            | EtlError::Spreadsheet(_)
            | EtlError::DataShape { .. } => ErrorKind::DataShape,
        }
    }

    /// Only configuration problems are allowed to stop the process.
    pub fn is_fatal(&self) -> bool {
        self.kind() == ErrorKind::Config
    }

    pub fn recovery_suggestion(&self) -> &'static str {
        match self.kind() {
            ErrorKind::Transport => "Check the network connection and `app.base_api_url`",
            ErrorKind::Config => "Make sure the config file exists and is valid TOML",
            ErrorKind::Io => "Check that the output directory exists and is writable",
            ErrorKind::DataShape => "The API returned data in an unexpected layout",
        }
    }
}

pub type Result<T> = std::result::Result<T, EtlError>;

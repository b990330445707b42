use thiserror::Error;

#[derive(Error, Debug)]
pub enum ListerError {
    #[error("Command '{command}' not found")]
    CommandNotFound { command: String },

    #[error("failed to start '{command}': {source}")]
    Spawn {
        command: String,
        source: std::io::Error,
    },

    #[error("handshake with '{command}' failed: {source}")]
    Handshake {
        command: String,
        source: rmcp::service::ClientInitializeError,
    },

    #[error("config error: {0}")]
    Config(String),
}

pub type Result<T> = std::result::Result<T, ListerError>;

use thiserror::Error;
use tokio_tungstenite::tungstenite;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("MAX_MESSAGE_SIZE_BYTES must be greater than 0")]
    InvalidMaxMessageSize,

    #[error("MAX_FRAME_SIZE_BYTES must be greater than 0")]
    InvalidMaxFrameSize,

    #[error("MAX_FRAME_SIZE_BYTES cannot exceed MAX_MESSAGE_SIZE_BYTES")]
    FrameLargerThanMessage,

    #[error("Failed to load environment variables: {0}")]
    EnvError(#[from] envy::Error),
}

#[derive(Error, Debug)]
pub enum ListenError {
    #[error("Invalid WebSocket URI: {0}")]
    InvalidUri(#[source] tungstenite::Error),

    #[error("Failed to connect: {0}")]
    Connect(#[source] tungstenite::Error),

    #[error("Read error: {0}")]
    Receive(#[source] tungstenite::Error),

    #[error("Closed by server (code {code}): {reason}")]
    ClosedByPeer { code: u16, reason: String },

    #[error("Connection ended without a close frame")]
    StreamEnded,

    #[error("Failed to write output: {0}")]
    Output(#[from] std::io::Error),
}

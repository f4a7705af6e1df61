use crate::error::ConfigError;
use serde::Deserialize;
use tokio_tungstenite::tungstenite::protocol::WebSocketConfig;

#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    // Limits
    #[serde(default = "default_max_message_size")]
    pub max_message_size_bytes: usize,

    #[serde(default = "default_max_frame_size")]
    pub max_frame_size_bytes: usize,

    // Logging
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();

        let config = envy::from_env::<Config>()?;
        config.validate()?;

        Ok(config)
    }

    pub fn max_message_size(&self) -> usize {
        self.max_message_size_bytes
    }

    pub fn max_frame_size(&self) -> usize {
        self.max_frame_size_bytes
    }

    /// Protocol settings handed to the WebSocket handshake.
    pub fn websocket_config(&self) -> WebSocketConfig {
        WebSocketConfig {
            max_message_size: Some(self.max_message_size()),
            max_frame_size: Some(self.max_frame_size()),
            ..Default::default()
        }
    }

    pub(crate) fn validate(&self) -> Result<(), ConfigError> {
        if self.max_message_size_bytes == 0 {
            return Err(ConfigError::InvalidMaxMessageSize);
        }

        if self.max_frame_size_bytes == 0 {
            return Err(ConfigError::InvalidMaxFrameSize);
        }

        if self.max_frame_size_bytes > self.max_message_size_bytes {
            return Err(ConfigError::FrameLargerThanMessage);
        }

        Ok(())
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            max_message_size_bytes: default_max_message_size(),
            max_frame_size_bytes: default_max_frame_size(),
            log_level: default_log_level(),
        }
    }
}

fn default_max_message_size() -> usize {
    64 << 20
}

fn default_max_frame_size() -> usize {
    16 << 20
}

fn default_log_level() -> String {
    "info,wslisten=debug".to_string()
}

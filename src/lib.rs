pub mod cli;
pub mod config;
pub mod error;
pub mod listener;
pub mod shutdown;

pub use config::Config;
pub use error::{ConfigError, ListenError};
pub use listener::{receive_loop, Listener, MARKER};

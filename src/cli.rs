use clap::Parser;

/// Print a line for every message received on a WebSocket connection
#[derive(Parser, Debug)]
#[command(name = "wslisten", version)]
pub struct Args {
    /// WebSocket URI to listen on (ws://host:port/path or wss://...)
    pub uri: String,
}

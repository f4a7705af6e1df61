use crate::config::Config;
use crate::error::ListenError;
use futures::{Stream, StreamExt};
use std::io::Write;
use tokio::net::TcpStream;
use tokio_tungstenite::tungstenite::client::IntoClientRequest;
use tokio_tungstenite::tungstenite::error::UrlError;
use tokio_tungstenite::tungstenite::protocol::Message;
use tokio_tungstenite::{connect_async_with_config, tungstenite, MaybeTlsStream, WebSocketStream};
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};

/// Line written to the output for every data message.
pub const MARKER: &str = "got message";

/// Close code reported when the server's close frame carries no status.
const NO_STATUS_RECEIVED: u16 = 1005;

/// A single open WebSocket connection that acknowledges incoming messages
pub struct Listener {
    uri: String,
    stream: WebSocketStream<MaybeTlsStream<TcpStream>>,
}

impl Listener {
    /// Open the connection and complete the WebSocket handshake.
    ///
    /// There is no timeout and no retry: whatever the handshake reports is
    /// returned as [`ListenError::Connect`].
    pub async fn connect(uri: &str, config: &Config) -> Result<Self, ListenError> {
        let request = uri
            .into_client_request()
            .map_err(ListenError::InvalidUri)?;

        match request.uri().scheme_str() {
            Some("ws") | Some("wss") => {}
            _ => {
                return Err(ListenError::InvalidUri(tungstenite::Error::Url(
                    UrlError::UnsupportedUrlScheme,
                )))
            }
        }
        if request.uri().host().is_none() {
            return Err(ListenError::InvalidUri(tungstenite::Error::Url(
                UrlError::NoHostName,
            )));
        }

        info!(uri=%uri, "Connecting");

        let (stream, resp) =
            connect_async_with_config(request, Some(config.websocket_config()), false)
                .await
                .map_err(ListenError::Connect)?;

        info!(uri=%uri, status=%resp.status(), "Connected");

        Ok(Self {
            uri: uri.to_string(),
            stream,
        })
    }

    pub fn uri(&self) -> &str {
        &self.uri
    }

    /// Acknowledge every message on `out` until the connection fails or
    /// `shutdown` is cancelled. Returns the number of markers written when
    /// stopped by `shutdown`.
    pub async fn run<W: Write>(
        mut self,
        out: &mut W,
        shutdown: CancellationToken,
    ) -> Result<u64, ListenError> {
        let result = receive_loop(&mut self.stream, out, &shutdown).await;

        // On shutdown this sends our close frame; after a server close it
        // flushes the reply tungstenite queued so the handshake completes.
        if matches!(result, Ok(_) | Err(ListenError::ClosedByPeer { .. })) {
            if let Err(e) = self.stream.close(None).await {
                debug!(uri=%self.uri, error=%e, "Close handshake failed");
            }
        }

        let received = result?;
        info!(uri=%self.uri, received, "Connection closed");

        Ok(received)
    }
}

/// Receive loop over any WebSocket message stream.
///
/// Text and Binary messages each produce one [`MARKER`] line regardless of
/// content. Control frames are left to the protocol layer. Everything that
/// ends the stream other than `shutdown` is an error.
pub async fn receive_loop<S, W>(
    stream: &mut S,
    out: &mut W,
    shutdown: &CancellationToken,
) -> Result<u64, ListenError>
where
    S: Stream<Item = Result<Message, tungstenite::Error>> + Unpin,
    W: Write,
{
    let mut received: u64 = 0;

    loop {
        let next = tokio::select! {
            biased;
            _ = shutdown.cancelled() => {
                info!(received, "Shutdown requested, leaving receive loop");
                return Ok(received);
            }
            next = stream.next() => next,
        };

        match next {
            Some(Ok(Message::Text(t))) => {
                debug!(kind = "text", size = t.len(), "Message received");
                acknowledge(out)?;
                received += 1;
            }
            Some(Ok(Message::Binary(b))) => {
                debug!(kind = "binary", size = b.len(), "Message received");
                acknowledge(out)?;
                received += 1;
            }
            Some(Ok(Message::Close(frame))) => {
                let (code, reason) = match frame {
                    Some(f) => (u16::from(f.code), f.reason.into_owned()),
                    None => (NO_STATUS_RECEIVED, String::new()),
                };
                warn!(code, reason=%reason, received, "Closed by server");
                return Err(ListenError::ClosedByPeer { code, reason });
            }
            Some(Ok(_)) => {} // Ping / Pong / raw frame
            Some(Err(e)) => {
                warn!(error=%e, received, "Read error");
                return Err(ListenError::Receive(e));
            }
            None => {
                warn!(received, "Stream ended");
                return Err(ListenError::StreamEnded);
            }
        }
    }
}

fn acknowledge<W: Write>(out: &mut W) -> Result<(), ListenError> {
    writeln!(out, "{MARKER}")?;
    out.flush()?;
    Ok(())
}

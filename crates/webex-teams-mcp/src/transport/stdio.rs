//! Stdio transport: reads JSON-RPC from stdin, writes to stdout.
//!
//! Requests are handled one at a time. While a request is in flight the
//! loop keeps reading input so a `notifications/cancelled` for it can drop
//! the pending call; every other line is queued until the call finishes.

use std::collections::VecDeque;

use serde_json::Value;
use tokio::io::{AsyncBufReadExt, AsyncRead, AsyncWrite, AsyncWriteExt, BufReader};
use tokio::sync::mpsc;
use tokio::task::JoinHandle;

use crate::protocol::ProtocolHandler;
use crate::types::{McpError, McpResult, RequestId};

use super::framing;

/// Lines buffered between the reader task and the dispatch loop.
const INBOX_CAPACITY: usize = 64;

/// One input line, or the reason it could not be decoded as text.
type InboundLine = McpResult<String>;

/// Stdio transport for desktop MCP clients.
pub struct StdioTransport {
    handler: ProtocolHandler,
}

impl StdioTransport {
    pub fn new(handler: ProtocolHandler) -> Self {
        Self { handler }
    }

    /// Serve stdin/stdout until stdin closes.
    pub async fn run(&self) -> McpResult<()> {
        tracing::info!("Stdio transport started");
        self.serve(tokio::io::stdin(), tokio::io::stdout()).await
    }

    /// Serve newline-delimited JSON-RPC from `input`, answering on `output`.
    pub async fn serve<R, W>(&self, input: R, mut output: W) -> McpResult<()>
    where
        R: AsyncRead + Unpin + Send + 'static,
        W: AsyncWrite + Unpin,
    {
        let (tx, mut inbox) = mpsc::channel(INBOX_CAPACITY);
        let reader = spawn_reader(input, tx);
        let mut queued: VecDeque<InboundLine> = VecDeque::new();

        loop {
            let line = match queued.pop_front() {
                Some(line) => line,
                None => match inbox.recv().await {
                    Some(line) => line,
                    None => break,
                },
            };

            let msg = match line.and_then(|line| framing::parse_message(&line)) {
                Ok(msg) => msg,
                Err(e) => {
                    tracing::warn!("Parse error: {e}");
                    let error = e.to_json_rpc_error(RequestId::Null);
                    write_value(&mut output, &serde_json::to_value(error)?).await?;
                    continue;
                }
            };

            let Some(id) = msg.request_id().cloned() else {
                if let Some(response) = self.handler.handle_message(msg).await {
                    write_value(&mut output, &response).await?;
                }
                continue;
            };

            while let Ok(next) = inbox.try_recv() {
                queued.push_back(next);
            }
            if queued.iter().any(|next| cancels(next, &id)) {
                tracing::info!("Request {id} cancelled before it started");
                continue;
            }

            let call = self.handler.handle_message(msg);
            tokio::pin!(call);
            let mut inbox_open = true;

            let response = loop {
                tokio::select! {
                    response = &mut call => break response,
                    next = inbox.recv(), if inbox_open => match next {
                        Some(next) if cancels(&next, &id) => {
                            tracing::info!("Request {id} cancelled by client");
                            break None;
                        }
                        Some(next) => queued.push_back(next),
                        None => inbox_open = false,
                    },
                }
            };

            if let Some(response) = response {
                write_value(&mut output, &response).await?;
            }
        }

        tracing::info!("EOF on input, shutting down");
        match reader.await {
            Ok(result) => result,
            Err(e) => Err(McpError::Transport(format!("Reader task failed: {e}"))),
        }
    }
}

/// Forward non-blank input lines to the dispatch loop. Lines that are not
/// UTF-8 are forwarded as parse errors so the loop can answer them.
fn spawn_reader<R>(input: R, tx: mpsc::Sender<InboundLine>) -> JoinHandle<McpResult<()>>
where
    R: AsyncRead + Unpin + Send + 'static,
{
    tokio::spawn(async move {
        let mut reader = BufReader::new(input);
        let mut buf = Vec::new();
        loop {
            buf.clear();
            if reader.read_until(b'\n', &mut buf).await? == 0 {
                break;
            }

            let line = match String::from_utf8(std::mem::take(&mut buf)) {
                Ok(line) if line.trim().is_empty() => continue,
                Ok(line) => Ok(line),
                Err(e) => Err(McpError::ParseError(format!("Invalid UTF-8 in message: {e}"))),
            };
            if tx.send(line).await.is_err() {
                break;
            }
        }
        Ok(())
    })
}

fn cancels(line: &InboundLine, in_flight: &RequestId) -> bool {
    let Ok(line) = line else {
        return false;
    };
    framing::parse_message(line)
        .ok()
        .and_then(|msg| msg.cancelled_request())
        .is_some_and(|id| &id == in_flight)
}

async fn write_value<W: AsyncWrite + Unpin>(output: &mut W, value: &Value) -> McpResult<()> {
    let framed = framing::frame_message(value)?;
    output.write_all(framed.as_bytes()).await?;
    output.flush().await?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn line(text: &str) -> InboundLine {
        Ok(text.to_string())
    }

    #[test]
    fn test_cancels_matches_only_in_flight_id() {
        let cancel = line(
            r#"{"jsonrpc":"2.0","method":"notifications/cancelled","params":{"requestId":7,"reason":"user"}}"#,
        );
        assert!(cancels(&cancel, &RequestId::Number(7)));
        assert!(!cancels(&cancel, &RequestId::Number(8)));
        assert!(!cancels(&cancel, &RequestId::String("7".to_string())));
    }

    #[test]
    fn test_cancels_ignores_other_messages() {
        let ping = line(r#"{"jsonrpc":"2.0","id":7,"method":"ping"}"#);
        assert!(!cancels(&ping, &RequestId::Number(7)));
        assert!(!cancels(&line("not json"), &RequestId::Number(7)));
        let undecodable = Err(McpError::ParseError("bad bytes".to_string()));
        assert!(!cancels(&undecodable, &RequestId::Number(7)));
    }
}

use std::path::PathBuf;
use std::time::Duration;

use anyhow::Context;
use tokio::io::AsyncReadExt;
use tokio::net::TcpStream;
use tokio::time::timeout;

use crate::http::parser::{self, ParseStage};
use crate::http::request::Request;
use crate::http::response::Response;
use crate::http::writer;

/// How long a single read may block waiting for request bytes.
pub const RECV_TIMEOUT: Duration = Duration::from_secs(10);

pub struct Connection {
    stream: TcpStream,
    root: PathBuf,
    request: Request,
    state: ConnectionState,
}

pub enum ConnectionState {
    Receiving,
    Building(ParseStage),
    SendingHeader(Response),
    SendingBody(Response),
    Closed,
}

impl Connection {
    pub fn new(stream: TcpStream, root: PathBuf) -> Self {
        Self {
            stream,
            root,
            request: Request::new(),
            state: ConnectionState::Receiving,
        }
    }

    /// Drives the connection through its state machine until it closes.
    ///
    /// An `Err` return means the transport failed or the peer never sent a
    /// complete request-line within the receive timeout; in both cases the
    /// connection is dropped without a response. Every other path sends a
    /// response before closing, a 400 when the request-line never became
    /// valid. The request buffer, response and socket are all released when
    /// the connection is dropped, whichever path exits first.
    pub async fn run(&mut self) -> anyhow::Result<()> {
        loop {
            match std::mem::replace(&mut self.state, ConnectionState::Closed) {
                ConnectionState::Receiving => {
                    let stage = self.receive_request().await?;
                    self.state = ConnectionState::Building(stage);
                }

                ConnectionState::Building(stage) => {
                    // A completed-but-invalid parse still gets a response.
                    let response = match stage {
                        ParseStage::Valid => Response::build(&self.root, self.request.filled()),
                        _ => Response::BadRequest,
                    };
                    self.state = ConnectionState::SendingHeader(response);
                }

                ConnectionState::SendingHeader(response) => {
                    writer::send_header(&mut self.stream, &response).await?;

                    // The body is only attempted once the header is fully out.
                    if response.body_size() > 0 {
                        self.state = ConnectionState::SendingBody(response);
                    }
                }

                ConnectionState::SendingBody(response) => {
                    writer::send_body(&self.stream, &response).await?;
                }

                ConnectionState::Closed => break,
            }
        }

        Ok(())
    }

    /// Reads request bytes until the parser reaches a terminal stage, the
    /// peer closes, or the buffer fills. The returned stage is `Valid` only
    /// for a complete well-formed request-line; a peer that stops short or
    /// overruns the buffer is reported as it stands, which the caller
    /// answers with a 400. Timeouts and read errors abort with `Err`.
    async fn receive_request(&mut self) -> anyhow::Result<ParseStage> {
        let mut stage = ParseStage::Receiving;

        loop {
            if self.request.is_full() {
                break;
            }

            let n = match timeout(RECV_TIMEOUT, self.stream.read(self.request.unfilled())).await {
                Ok(read) => read.context("read")?,
                Err(_) => anyhow::bail!("receive timed out"),
            };

            if n == 0 {
                // Peer closed its end.
                break;
            }

            self.request.commit(n);
            stage = parser::advance(&mut self.request);
            if stage != ParseStage::Receiving {
                break;
            }
        }

        Ok(stage)
    }
}

use bytes::{Buf, BytesMut};
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::io::{AsyncRead, AsyncReadExt, AsyncWrite};
use tokio::net::TcpStream;
use tracing::debug;

use crate::http::error::ServeError;
use crate::http::handler::Outcome;
use crate::http::parser::{MAX_HEAD_SIZE, ParseError, parse_http_request};
use crate::http::request::Request;
use crate::http::writer::ResponseWriter;
use crate::server::ServerContext;
use crate::server::access_log::AccessLogEntry;

const READ_CHUNK: usize = 4096;

pub struct Connection<S = TcpStream> {
    stream: S,
    peer: SocketAddr,
    ctx: Arc<ServerContext>,
    buffer: BytesMut,
    state: ConnectionState,
}

pub enum ConnectionState {
    Reading,
    Processing(Request),
    Rejecting(ServeError),
    Writing(ResponseWriter, bool), // bool = keep_alive?
    Closed,
}

/// What one read cycle produced.
enum Frame {
    Request(Request),
    Invalid(ServeError),
    Closed,
}

impl<S> Connection<S>
where
    S: AsyncRead + AsyncWrite + Unpin,
{
    pub fn new(stream: S, peer: SocketAddr, ctx: Arc<ServerContext>) -> Self {
        Self {
            stream,
            peer,
            ctx,
            buffer: BytesMut::with_capacity(READ_CHUNK),
            state: ConnectionState::Reading,
        }
    }

    /// Runs request/response cycles until the connection closes.
    ///
    /// Peer disconnects and write failures end the loop quietly; only
    /// unexpected filesystem errors come back as `Err`.
    pub async fn run(&mut self) -> anyhow::Result<()> {
        loop {
            match &mut self.state {
                ConnectionState::Reading => {
                    self.state = match self.read_request().await {
                        Frame::Request(req) => ConnectionState::Processing(req),
                        Frame::Invalid(e) => ConnectionState::Rejecting(e),
                        Frame::Closed => ConnectionState::Closed,
                    };
                }

                ConnectionState::Processing(req) => {
                    let outcome = self.ctx.handler.handle(req).await?;
                    self.state = self.respond(outcome).await;
                }

                ConnectionState::Rejecting(e) => {
                    let outcome = self.ctx.handler.reject(e);
                    self.state = self.respond(outcome).await;
                }

                ConnectionState::Writing(writer, keep_alive) => {
                    if let Err(e) = writer.write_to_stream(&mut self.stream).await {
                        debug!(peer = %self.peer, error = %e, "Write failed, closing");
                        self.state = ConnectionState::Closed;
                    } else if *keep_alive {
                        self.state = ConnectionState::Reading; // go back for next request
                    } else {
                        self.state = ConnectionState::Closed;
                    }
                }

                ConnectionState::Closed => {
                    break;
                }
            }
        }

        Ok(())
    }

    async fn respond(&self, outcome: Outcome) -> ConnectionState {
        self.ctx
            .access_log
            .record(&AccessLogEntry {
                client: self.peer.ip(),
                path: &outcome.log_path,
                status: outcome.response.status,
            })
            .await;

        let writer = ResponseWriter::new(&outcome.response);
        ConnectionState::Writing(writer, outcome.keep_alive)
    }

    /// Reads until a full request head is buffered.
    ///
    /// Bytes past the head stay in the buffer for the next cycle.
    async fn read_request(&mut self) -> Frame {
        loop {
            match parse_http_request(&self.buffer) {
                Ok((request, consumed)) => {
                    self.buffer.advance(consumed);
                    debug!(peer = %self.peer, method = request.method.as_str(), path = %request.path, "Request head received");
                    return Frame::Request(request);
                }

                Err(ParseError::Incomplete) => {
                    if self.buffer.len() > MAX_HEAD_SIZE {
                        return Frame::Invalid(ServeError::RequestTooLarge {
                            limit: MAX_HEAD_SIZE,
                        });
                    }
                }

                Err(e) => return Frame::Invalid(e.into()),
            }

            let mut temp = [0u8; READ_CHUNK];
            let read = self.stream.read(&mut temp);
            let result = match self.ctx.idle_timeout {
                Some(limit) => match tokio::time::timeout(limit, read).await {
                    Ok(result) => result,
                    Err(_) => {
                        debug!(peer = %self.peer, "Idle timeout, closing");
                        return Frame::Closed;
                    }
                },
                None => read.await,
            };

            match result {
                Ok(0) => {
                    // Client closed connection
                    return Frame::Closed;
                }
                Ok(n) => self.buffer.extend_from_slice(&temp[..n]),
                Err(e) => {
                    debug!(peer = %self.peer, error = %e, "Read failed, closing");
                    return Frame::Closed;
                }
            }
        }
    }
}

//! HTTP protocol implementation.
//!
//! This module implements a small HTTP/1.1 file server engine with support for
//! keep-alive connections and conditional GET.
//!
//! # Architecture
//!
//! The HTTP layer is organized into several submodules:
//!
//! - **`connection`**: The per-socket loop implementing the request-response state machine
//! - **`parser`**: Frames and parses request heads from byte buffers
//! - **`request`**: HTTP request representation
//! - **`handler`**: Maps a request to a file under the document root and decides the status
//! - **`path`**: Resolves URL paths and checks containment in the document root
//! - **`mime`**: MIME type detection based on file extensions
//! - **`response`**: HTTP response representation with fixed header order
//! - **`writer`**: Serializes and writes HTTP responses to the client
//! - **`date`**: HTTP-date formatting and parsing
//! - **`error`**: The protocol error taxonomy
//!
//! # Connection State Machine
//!
//! Each client connection goes through a state machine:
//!
//! ```text
//!        ┌─────────────┐
//!        │   Reading   │ ← Wait for a full request head
//!        └──────┬──────┘
//!               │ Request received
//!               ▼
//!        ┌──────────────────┐
//!        │   Processing     │ ← Resolve file, generate response
//!        └──────┬───────────┘
//!               │ Response ready
//!               ▼
//!        ┌──────────────────┐
//!        │    Writing       │ ← Send response to client
//!        └──────┬───────────┘
//!               │ Response sent
//!               ├─ Keep-Alive → Reading (same connection)
//!               └─ Close → Closed
//! ```
//!
//! # Example
//!
//! ```ignore
//! use lantern::http::connection::Connection;
//! use tokio::net::TcpListener;
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let listener = TcpListener::bind("127.0.0.1:8080").await?;
//!
//!     loop {
//!         let (socket, peer) = listener.accept().await?;
//!         let ctx = ctx.clone();
//!         tokio::spawn(async move {
//!             let mut conn = Connection::new(socket, peer, ctx);
//!             if let Err(e) = conn.run().await {
//!                 eprintln!("Connection error: {}", e);
//!             }
//!         });
//!     }
//! }
//! ```

pub mod connection;
pub mod date;
pub mod error;
pub mod handler;
pub mod mime;
pub mod parser;
pub mod path;
pub mod request;
pub mod response;
pub mod writer;

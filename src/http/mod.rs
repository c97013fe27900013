//! HTTP protocol implementation.
//!
//! This module implements a minimal HTTP/1.0 and HTTP/1.1 server for GET
//! requests over static files. Only the request-line is ever validated;
//! headers sent after it are ignored.
//!
//! # Architecture
//!
//! The HTTP layer is organized into several submodules:
//!
//! - **`connection`**: The main connection handler implementing the request-response state machine
//! - **`parser`**: Incrementally parses a request-line that may arrive fragmented across reads
//! - **`request`**: Fixed-capacity request buffer with the parser's resume cursors
//! - **`uri`**: Extracts the request URI and resolves it against the web root
//! - **`mime`**: Content type detection based on file extensions
//! - **`response`**: HTTP response representation, one variant per status
//! - **`writer`**: Sends the response header and streams the file body to the client
//!
//! # Connection State Machine
//!
//! Each client connection goes through a state machine:
//!
//! ```text
//!        ┌─────────────┐
//!        │  Receiving  │ ← Accumulate bytes until the request-line parses
//!        └──────┬──────┘
//!               │ Valid or Bad
//!               ▼
//!        ┌──────────────────┐
//!        │    Building      │ ← Resolve the file and build a response
//!        └──────┬───────────┘
//!               │ Response ready
//!               ▼
//!        ┌──────────────────┐
//!        │  SendingHeader   │ ← Send the formatted header
//!        └──────┬───────────┘
//!               │ Header fully sent, body present
//!               ▼
//!        ┌──────────────────┐
//!        │   SendingBody    │ ← Stream the file via sendfile
//!        └──────┬───────────┘
//!               │
//!               └─ Closed
//! ```
//!
//! Connections never persist: one request, one response, close.
//!
//! # Example
//!
//! ```ignore
//! use skiff::http::connection::Connection;
//! use tokio::net::TcpListener;
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let listener = TcpListener::bind("127.0.0.1:8080").await?;
//!     let root = std::path::PathBuf::from("./www");
//!
//!     loop {
//!         let (socket, _addr) = listener.accept().await?;
//!         let root = root.clone();
//!         tokio::spawn(async move {
//!             let mut conn = Connection::new(socket, root);
//!             if let Err(e) = conn.run().await {
//!                 eprintln!("Connection error: {}", e);
//!             }
//!         });
//!     }
//! }
//! ```

pub mod connection;
pub mod mime;
pub mod parser;
pub mod request;
pub mod response;
pub mod uri;
pub mod writer;

//! Arbor Visualization
//!
//! Serves an editable graph document and a paced algorithm run over HTTP
//! and WebSocket.
//!
//! # Architecture
//!
//! - **Graph document**: One shared [`arbor_graph::Graph`] behind the API
//! - **Engine**: An [`arbor_engine::RunController`] paces runs and records
//!   the timeline
//! - **REST API**: Edit the document, start runs, drive the transport
//! - **WebSocket**: Pushes every status change to connected frontends
//!
//! # Usage
//!
//! ```ignore
//! let server = VisServer::new(graph, EngineConfig::default());
//! server.serve(3000).await;
//! ```

mod server;

pub use server::{GraphDoc, VisServer};

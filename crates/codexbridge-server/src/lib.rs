//! Codexbridge Server — stdio JSON-RPC surface and logging bootstrap

pub mod logging;
pub mod router;
pub mod server;

pub use router::{route_rpc, ServerState};
pub use server::{process_line, serve_stdio};

//! Inbound webhook server
//!
//! A small axum app: `POST /webhook` receives transaction batches from the
//! webhook provider, `GET /health` answers liveness probes.

pub mod routes;
pub mod server;
pub mod state;

pub use server::{shutdown, start_server};
pub use state::AppState;

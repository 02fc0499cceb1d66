//! Web front end for retrace.
//!
//! A stateless HTTP host for the replay engine: an HTML form at `/` and a
//! JSON API under `/api`. All session state lives in the history store.

pub mod error;
pub mod handlers;
pub mod render;
pub mod routes;
pub mod server;
pub mod state;

pub use error::{PageError, WebError};
pub use server::{build_router, run_server, ServerConfig};
pub use state::WebAppState;

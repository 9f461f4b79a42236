//! Carwise API crate - axum HTTP surface for the car advisory chat.
//!
//! Exposes chat plus the session surface a browser UI needs: list, create,
//! switch, clear and read sessions.

pub mod error;
pub mod handlers;
pub mod routes;
pub mod state;

pub use error::ApiError;
pub use routes::{create_router, start_server};
pub use state::AppState;

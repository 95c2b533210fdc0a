//! Web layer for the metro route planner.
//!
//! JSON endpoints under `/api/subway` for route queries and line edits.

mod dto;
mod routes;
mod state;

pub use dto::*;
pub use routes::{AppError, create_router};
pub use state::AppState;

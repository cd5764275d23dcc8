//! Candidates Panel HTTP server: pro-forma extraction and document generation.

pub mod error;
pub mod routes;
pub mod state;

pub use routes::build_router;
pub use state::AppState;

//! Folio API Library
//!
//! HTTP API for the portfolio site: public content reads, admin content
//! saves, and image uploads.

mod handlers;
mod router;

pub mod error;
pub mod state;

pub use error::ErrorResponse;
pub use router::build_router;
pub use state::AppState;

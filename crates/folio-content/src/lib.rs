//! Folio Content Library
//!
//! Document store abstraction for the portfolio content sections. Each
//! section is one document; list sections are persisted wrapped as
//! `{ "data": [...] }` (see `folio_core::Section`). Persistence happens only
//! on an explicit save.

pub mod local;
pub mod traits;

pub use local::LocalContentStore;
pub use traits::{ContentError, ContentResult, ContentStore};

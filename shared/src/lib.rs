//! Cattery Shared Library
//!
//! Wire types, the role model, and request validation shared by the
//! backend and its clients.

pub mod errors;
pub mod models;
pub mod types;
pub mod validation;

// Re-export commonly used items
pub use errors::*;
pub use models::Role;
pub use types::*;
pub use validation::Normalize;

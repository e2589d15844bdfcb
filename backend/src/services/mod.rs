//! Business logic services
//!
//! Services are constructed once at startup with their stores passed in,
//! and cloned into handlers through `AppState`.

pub mod auth;
pub mod breeds;
pub mod cats;

pub use auth::AuthService;
pub use breeds::BreedService;
pub use cats::CatService;

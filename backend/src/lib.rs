//! Cattery Backend Library
//!
//! Authentication, role gates and record ownership for the cattery API,
//! exposed as a library for use in tests and the server binary.

pub mod auth;
pub mod config;
pub mod db;
pub mod error;
pub mod repositories;
pub mod routes;
pub mod services;
pub mod state;

//! Authentication and authorization
//!
//! Argon2id password hashing, HS256 bearer tokens, request gates for
//! authentication and roles, and the per-record ownership check.

mod error;
mod jwt;
mod middleware;
mod ownership;
mod password;
mod policy;
mod principal;

pub use error::{AuthError, TokenRejection};
pub use jwt::{Claims, JwtService};
pub use middleware::{authenticate, bearer_token, check_role, require_role, RoleGate};
pub use ownership::{allow, authorize_owner, Owned};
pub use password::PasswordService;
pub use policy::AuthPolicy;
pub use principal::Principal;

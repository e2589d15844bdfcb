//! Per-record access check
//!
//! Handlers that act on one owned record load it first (a missing record is
//! `NotFound`, never "no owner"), then call [`authorize_owner`].

use super::error::AuthError;
use super::principal::Principal;

/// A record bound to the account that created it
pub trait Owned {
    /// Resource name used in error messages
    const KIND: &'static str;

    fn owner_email(&self) -> &str;
}

/// Owner or admin. No side effects.
#[inline]
pub fn allow(principal: &Principal, owner_email: &str) -> bool {
    principal.is_admin() || principal.email == owner_email
}

pub fn authorize_owner<R: Owned>(
    principal: &Principal,
    resource: &R,
) -> Result<(), AuthError> {
    if allow(principal, resource.owner_email()) {
        Ok(())
    } else {
        Err(AuthError::NotOwner(R::KIND))
    }
}

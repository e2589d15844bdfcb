//! Input validation functions
//!
//! Requests are trimmed and checked here, at the HTTP boundary, before any
//! service sees them. Email format checks use the `validator` crate.

use crate::errors::ValidationError;
use crate::types::{CreateBreedRequest, CreateCatRequest, LoginRequest, RegisterRequest, UpdateCatRequest};
use validator::ValidateEmail;

pub const MIN_PASSWORD_LEN: usize = 6;
pub const MAX_PASSWORD_LEN: usize = 128;
pub const MAX_NAME_LEN: usize = 100;
pub const MAX_CAT_AGE: i32 = 50;

/// Validate email format
pub fn validate_email(email: &str) -> Result<(), ValidationError> {
    if email.is_empty() {
        return Err(ValidationError::new("email", "Email cannot be empty"));
    }
    if email.len() > 255 {
        return Err(ValidationError::new("email", "Email too long"));
    }
    if !email.validate_email() {
        return Err(ValidationError::new("email", "Invalid email format"));
    }
    Ok(())
}

/// Validate password length (counted in characters)
pub fn validate_password(password: &str) -> Result<(), ValidationError> {
    let len = password.chars().count();
    if len < MIN_PASSWORD_LEN {
        return Err(ValidationError::new(
            "password",
            format!("Password must be at least {} characters", MIN_PASSWORD_LEN),
        ));
    }
    if len > MAX_PASSWORD_LEN {
        return Err(ValidationError::new("password", "Password too long"));
    }
    Ok(())
}

/// Validate a display or record name
pub fn validate_name(field: &'static str, name: &str) -> Result<(), ValidationError> {
    if name.is_empty() {
        return Err(ValidationError::new(field, "Name cannot be empty"));
    }
    if name.chars().count() > MAX_NAME_LEN {
        return Err(ValidationError::new(field, "Name too long"));
    }
    Ok(())
}

/// Validate a cat's age in years
pub fn validate_age(age: i32) -> Result<(), ValidationError> {
    if !(0..=MAX_CAT_AGE).contains(&age) {
        return Err(ValidationError::new(
            "age",
            format!("Age must be between 0 and {}", MAX_CAT_AGE),
        ));
    }
    Ok(())
}

/// Trim and validate a request, consuming it
pub trait Normalize: Sized {
    fn normalize(self) -> Result<Self, ValidationError>;
}

impl Normalize for RegisterRequest {
    fn normalize(self) -> Result<Self, ValidationError> {
        let req = RegisterRequest {
            name: self.name.trim().to_string(),
            email: self.email.trim().to_string(),
            password: self.password.trim().to_string(),
        };
        validate_name("name", &req.name)?;
        validate_email(&req.email)?;
        validate_password(&req.password)?;
        Ok(req)
    }
}

impl Normalize for LoginRequest {
    fn normalize(self) -> Result<Self, ValidationError> {
        let req = LoginRequest {
            email: self.email.trim().to_string(),
            password: self.password.trim().to_string(),
        };
        validate_email(&req.email)?;
        if req.password.is_empty() {
            return Err(ValidationError::new("password", "Password cannot be empty"));
        }
        Ok(req)
    }
}

impl Normalize for CreateCatRequest {
    fn normalize(self) -> Result<Self, ValidationError> {
        let req = CreateCatRequest {
            name: self.name.trim().to_string(),
            age: self.age,
            breed: self.breed.trim().to_string(),
        };
        validate_name("name", &req.name)?;
        validate_age(req.age)?;
        validate_name("breed", &req.breed)?;
        Ok(req)
    }
}

impl Normalize for UpdateCatRequest {
    fn normalize(self) -> Result<Self, ValidationError> {
        let req = UpdateCatRequest {
            name: self.name.map(|n| n.trim().to_string()),
            age: self.age,
            breed: self.breed.map(|b| b.trim().to_string()),
        };
        if let Some(name) = &req.name {
            validate_name("name", name)?;
        }
        if let Some(age) = req.age {
            validate_age(age)?;
        }
        if let Some(breed) = &req.breed {
            validate_name("breed", breed)?;
        }
        Ok(req)
    }
}

impl Normalize for CreateBreedRequest {
    fn normalize(self) -> Result<Self, ValidationError> {
        let name = self.name.trim().to_string();
        validate_name("name", &name)?;
        Ok(CreateBreedRequest { name })
    }
}

//! User domain
//!
//! Registered authors: the user entity, its validation rules, and the
//! repository trait the stores implement.

mod entity;
mod repository;
mod validation;

pub use entity::{NewUser, User, UserId};
pub use repository::UserRepository;
pub use validation::{
    validate_email, validate_password, validate_password_confirmation, validate_username,
    UserValidationError,
};

//! Value Object Module

pub mod address;
pub mod email;
pub mod principal;
pub mod user_password;
pub mod user_role;

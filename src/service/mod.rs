//! Business logic services.
//!
//! Services coordinate repositories and external collaborators (mail, token
//! signing) for multi-step operations. Single-statement CRUD goes straight
//! from handlers to repositories.

pub mod agreement;
pub mod auth;
pub mod installed_equipment;
pub mod mail;
pub mod password;
pub mod token;

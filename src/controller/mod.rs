//! HTTP handlers, grouped by resource.

pub mod activation;
pub mod address;
pub mod agreement;
pub mod auth;
pub mod equipment;
pub mod installed_equipment;
pub mod organization;
pub mod subscriber;
pub mod util;

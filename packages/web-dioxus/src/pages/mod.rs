//! Screens

mod auth;
mod not_found;
mod sections;

pub use auth::*;
pub use not_found::*;
pub use sections::*;

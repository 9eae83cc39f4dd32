pub mod auth;
pub mod registration;

pub use auth::*;
pub use registration::*;

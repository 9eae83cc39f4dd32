pub mod auth;
pub mod invitation;

pub use auth::*;
pub use invitation::*;

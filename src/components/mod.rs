pub mod common;
pub mod register;

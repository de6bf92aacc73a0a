pub mod admin;
pub mod error;
pub mod session;
pub mod token;
pub mod utils;

pub mod resource;
pub mod session;
pub mod upload;
pub mod user;

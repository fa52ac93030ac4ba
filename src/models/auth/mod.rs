pub mod requests;
pub mod session;

pub use requests::{LoginRequest, RegisterRequest};

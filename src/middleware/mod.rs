pub mod auth;

pub use auth::{check_access, Access};

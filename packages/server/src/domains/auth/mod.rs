// Auth domain: roles, sessions, and the login-identifier resolver

pub mod errors;
pub mod models;
pub mod resolver;
pub mod session;

pub use errors::*;
pub use models::*;
pub use resolver::*;
pub use session::*;

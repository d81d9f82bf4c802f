// School Portal - API Core
//
// Backend for the multi-role (admin/teacher/parent/student) school portal.
// Three flows live here: the session gate over the role dashboards, the
// login-identifier resolver in front of the identity provider, and the
// single-turn FAQ assistant bridge.

pub mod config;
pub mod domains;
pub mod kernel;
pub mod server;

pub use config::*;

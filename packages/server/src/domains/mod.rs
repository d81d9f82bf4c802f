// Business logic, organized per domain

pub mod assistant;
pub mod auth;

// Infrastructure layer: DI traits, external-service clients, and the
// dependency container. No business logic lives here.

pub mod account_store;
pub mod ai;
pub mod auth_events;
pub mod deps;
pub mod identity;
pub mod traits;

#[cfg(test)]
pub mod test_dependencies;

pub use account_store::*;
pub use ai::*;
pub use auth_events::*;
pub use deps::*;
pub use identity::*;
pub use traits::*;

// reqs-core/src/lib.rs

pub mod catalog;
pub mod cycle;
pub mod evaluator;
pub mod expander;
pub mod resolver;
pub mod session;
pub mod store;
pub mod target;

// Re-export key types for easier use by the CLI crate
pub use catalog::Catalog;
pub use evaluator::{Ensure, Evaluator};
pub use resolver::Resolver;
pub use session::Session;
pub use store::TargetStore;
pub use target::{Action, Target, Thunk};

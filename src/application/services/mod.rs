//! Application services
//!
//! Each service encapsulates a specific domain operation.

pub mod engine;
pub mod store;

pub use engine::{DecisionEngine, Outcome};
pub use store::StoreService;

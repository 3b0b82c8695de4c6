//! Domain layer: the decision tree, its store codec and player responses
//!
//! This layer is independent of external concerns (no I/O, no CLI, no config loading).

pub mod codec;
pub mod display;
pub mod error;
pub mod response;
pub mod tree;

pub use codec::{decode, deserialize, encode, serialize, Tag};
pub use display::{ToTreeString, MAX_INDENT_LEVELS};
pub use error::{DomainError, DomainResult};
pub use response::Response;
pub use tree::{Branches, DecisionTree, Node, NodeId, DEFAULT_SEED};

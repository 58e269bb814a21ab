//! Domain layer: nodes, the concurrent tree and its algorithms
//!
//! This layer is independent of external concerns (no I/O, no CLI, no config loading).

pub mod display;
pub mod error;
pub mod mutate;
pub mod node;
pub mod traverse;
pub mod tree;

pub use display::{Rendering, TreeDisplay};
pub use error::{TreeError, TreeResult};
pub use node::{Node, NodeId, ABSENT_ID, NO_PARENT};
pub use traverse::{AcceptAll, Ancestors, Walk, WalkOrder};
pub use tree::{Tree, DEFAULT_MAX_LEVEL};

//! Concurrency-safe multi-branch tree addressed by integer ids.
//!
//! [`domain::Tree`] owns every node in a concurrent id-indexed store, answers
//! hierarchy queries (ancestors, descendants, siblings, paths, levels) without
//! locking, streams depth-first and breadth-first walks lazily, and serializes
//! structural changes (create, move, splice-delete) behind one re-entrant lock.
//!
//! ```
//! use idtree::domain::{Node, Tree};
//!
//! let tree = Tree::new(Node::new(0, "company"));
//! tree.create_node(1, 0, "engineering").unwrap();
//! tree.create_node(2, 1, "platform").unwrap();
//!
//! assert_eq!(tree.level(2), 2);
//! assert_eq!(tree.get_all_paths(), vec![vec![0, 1, 2]]);
//! ```

pub mod application;
pub mod cli;
pub mod config;
pub mod domain;
pub mod exitcode;
pub mod util;

pub use domain::{Node, NodeId, Tree, TreeError, TreeResult};

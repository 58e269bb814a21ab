//! CLI argument definitions using clap

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueHint};

use crate::domain::NodeId;

/// Inspect and edit id-addressed hierarchies: paths, levels, walks and splice-delete
#[derive(Parser, Debug)]
#[command(name = "idtree")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Increase log verbosity (-d info, -dd debug, -ddd trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub debug: u8,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Render the hierarchy as a tree
    Show {
        #[arg(value_hint = ValueHint::FilePath)]
        file: PathBuf,
        /// Render only the subtree below this node
        #[arg(long)]
        from: Option<NodeId>,
    },

    /// Print root-to-leaf paths
    Paths {
        #[arg(value_hint = ValueHint::FilePath)]
        file: PathBuf,
        /// Only leaves strictly below this node
        #[arg(long)]
        from: Option<NodeId>,
    },

    /// List leaf nodes
    Leaves {
        #[arg(value_hint = ValueHint::FilePath)]
        file: PathBuf,
        /// Only leaves within this node's subtree
        #[arg(long)]
        from: Option<NodeId>,
    },

    /// Print the level of a node (root = 0)
    Level {
        #[arg(value_hint = ValueHint::FilePath)]
        file: PathBuf,
        id: NodeId,
    },

    /// Print the tree height, or the level of a node
    Depth {
        #[arg(value_hint = ValueHint::FilePath)]
        file: PathBuf,
        id: Option<NodeId>,
    },

    /// List a node and its ancestors up to the root
    Ancestors {
        #[arg(value_hint = ValueHint::FilePath)]
        file: PathBuf,
        id: NodeId,
    },

    /// List a node and everything below it
    Descendants {
        #[arg(value_hint = ValueHint::FilePath)]
        file: PathBuf,
        id: NodeId,
    },

    /// List the other children of a node's parent
    Siblings {
        #[arg(value_hint = ValueHint::FilePath)]
        file: PathBuf,
        id: NodeId,
    },

    /// Walk a subtree depth-first (default) or breadth-first
    Walk {
        #[arg(value_hint = ValueHint::FilePath)]
        file: PathBuf,
        /// Start node (default: root)
        #[arg(long)]
        from: Option<NodeId>,
        /// Level-order instead of depth-first
        #[arg(long)]
        bfs: bool,
    },

    /// Add a node and write the hierarchy back
    Add {
        #[arg(value_hint = ValueHint::FilePath)]
        file: PathBuf,
        id: NodeId,
        parent: NodeId,
        name: String,
    },

    /// Move a node under a new parent and write the hierarchy back
    Mv {
        #[arg(value_hint = ValueHint::FilePath)]
        file: PathBuf,
        id: NodeId,
        parent: NodeId,
    },

    /// Delete a node, re-attaching its children to its parent
    Rm {
        #[arg(value_hint = ValueHint::FilePath)]
        file: PathBuf,
        id: NodeId,
    },

    /// Generate shell completions
    Completion {
        /// Shell type
        #[arg(value_enum)]
        shell: clap_complete::Shell,
    },
}

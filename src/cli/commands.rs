use std::io;
use std::path::Path;

use clap::CommandFactory;
use clap_complete::{generate, Shell};
use itertools::Itertools;
use tracing::{debug, instrument};

use crate::application::{load_tree, save_tree, ApplicationError};
use crate::cli::args::{Cli, Commands};
use crate::cli::error::{CliError, CliResult};
use crate::cli::output;
use crate::config::Settings;
use crate::domain::{Node, NodeId, Tree, TreeDisplay, WalkOrder};

pub fn execute_command(cli: &Cli) -> CliResult<()> {
    match &cli.command {
        Some(Commands::Show { file, from }) => show(file, *from),
        Some(Commands::Paths { file, from }) => paths(file, *from),
        Some(Commands::Leaves { file, from }) => leaves(file, *from),
        Some(Commands::Level { file, id }) => level(file, *id),
        Some(Commands::Depth { file, id }) => depth(file, *id),
        Some(Commands::Ancestors { file, id }) => ancestors(file, *id),
        Some(Commands::Descendants { file, id }) => descendants(file, *id),
        Some(Commands::Siblings { file, id }) => siblings(file, *id),
        Some(Commands::Walk { file, from, bfs }) => walk(file, *from, *bfs),
        Some(Commands::Add {
            file,
            id,
            parent,
            name,
        }) => add(file, *id, *parent, name),
        Some(Commands::Mv { file, id, parent }) => mv(file, *id, *parent),
        Some(Commands::Rm { file, id }) => rm(file, *id),
        Some(Commands::Completion { shell }) => {
            completion(*shell);
            Ok(())
        }
        None => Err(CliError::Usage("no command given, see --help".into())),
    }
}

fn open(file: &Path) -> CliResult<(Tree<String>, Settings)> {
    let settings = Settings::load_for(file)?;
    let tree = load_tree(file, &settings)?;
    debug!(size = tree.size(), root = tree.root_id(), "loaded hierarchy");
    Ok((tree, settings))
}

fn require(tree: &Tree<String>, id: NodeId) -> CliResult<()> {
    if tree.contains(id) {
        Ok(())
    } else {
        Err(CliError::UnknownNode(id))
    }
}

fn print_nodes(nodes: impl IntoIterator<Item = Node<String>>) {
    for node in nodes {
        output::info(&node);
    }
}

/// Text printed by `show`: the whole tree, or the subtree below `from`.
pub fn show_text(tree: &Tree<String>, from: Option<NodeId>, show_ids: bool) -> CliResult<String> {
    let rendered = match from {
        Some(id) => tree
            .subtree(id)
            .ok_or(CliError::UnknownNode(id))?
            .to_tree_string(show_ids),
        None => tree.to_tree_string(show_ids),
    };
    Ok(rendered.to_string())
}

/// Lines printed by `paths`, ids joined by `separator`.
pub fn path_lines(
    tree: &Tree<String>,
    from: Option<NodeId>,
    separator: &str,
) -> CliResult<Vec<String>> {
    let paths = match from {
        Some(id) => {
            require(tree, id)?;
            tree.get_paths(id)
        }
        None => tree.get_all_paths(),
    };
    Ok(paths.iter().map(|path| path.iter().join(separator)).collect())
}

/// Lines printed by `walk`, one node per line in visiting order.
pub fn walk_lines(tree: &Tree<String>, from: Option<NodeId>, bfs: bool) -> CliResult<Vec<String>> {
    let start = from.unwrap_or_else(|| tree.root_id());
    require(tree, start)?;
    let order = if bfs {
        WalkOrder::BreadthFirst
    } else {
        WalkOrder::DepthFirst
    };
    Ok(tree
        .walk(start, order)
        .filter_map(|id| tree.get_node(id))
        .map(|node| node.to_string())
        .collect())
}

#[instrument]
fn show(file: &Path, from: Option<NodeId>) -> CliResult<()> {
    let (tree, settings) = open(file)?;
    output::info(show_text(&tree, from, settings.show_ids)?.trim_end());
    Ok(())
}

#[instrument]
fn paths(file: &Path, from: Option<NodeId>) -> CliResult<()> {
    let (tree, settings) = open(file)?;
    for line in path_lines(&tree, from, &settings.path_separator)? {
        output::info(&line);
    }
    Ok(())
}

#[instrument]
fn leaves(file: &Path, from: Option<NodeId>) -> CliResult<()> {
    let (tree, _) = open(file)?;
    if let Some(id) = from {
        require(&tree, id)?;
    }
    print_nodes(tree.get_leaf_nodes(from));
    Ok(())
}

#[instrument]
fn level(file: &Path, id: NodeId) -> CliResult<()> {
    let (tree, _) = open(file)?;
    require(&tree, id)?;
    output::info(&tree.level(id));
    Ok(())
}

#[instrument]
fn depth(file: &Path, id: Option<NodeId>) -> CliResult<()> {
    let (tree, _) = open(file)?;
    if let Some(id) = id {
        require(&tree, id)?;
    }
    output::info(&tree.depth(id));
    Ok(())
}

#[instrument]
fn ancestors(file: &Path, id: NodeId) -> CliResult<()> {
    let (tree, _) = open(file)?;
    require(&tree, id)?;
    print_nodes(tree.rsearch(id).filter_map(|a| tree.get_node(a)));
    Ok(())
}

#[instrument]
fn descendants(file: &Path, id: NodeId) -> CliResult<()> {
    let (tree, _) = open(file)?;
    require(&tree, id)?;
    print_nodes(tree.get_descendant_nodes(id));
    Ok(())
}

#[instrument]
fn siblings(file: &Path, id: NodeId) -> CliResult<()> {
    let (tree, _) = open(file)?;
    require(&tree, id)?;
    print_nodes(tree.get_sibling_nodes(id));
    Ok(())
}

#[instrument]
fn walk(file: &Path, from: Option<NodeId>, bfs: bool) -> CliResult<()> {
    let (tree, _) = open(file)?;
    for line in walk_lines(&tree, from, bfs)? {
        output::info(&line);
    }
    Ok(())
}

#[instrument]
fn add(file: &Path, id: NodeId, parent: NodeId, name: &str) -> CliResult<()> {
    if name.trim().is_empty() {
        return Err(CliError::InvalidArgs("node name must not be empty".into()));
    }
    let (tree, _) = open(file)?;
    let node = tree
        .create_node(id, parent, name.to_string())
        .map_err(ApplicationError::from)?;
    save_tree(file, &tree)?;
    output::action("Added", &node);
    Ok(())
}

#[instrument]
fn mv(file: &Path, id: NodeId, parent: NodeId) -> CliResult<()> {
    let (tree, _) = open(file)?;
    tree.move_node(id, parent).map_err(ApplicationError::from)?;
    save_tree(file, &tree)?;
    output::success(&format!("moved {} under {}", id, parent));
    Ok(())
}

#[instrument]
fn rm(file: &Path, id: NodeId) -> CliResult<()> {
    let (tree, _) = open(file)?;
    let children = tree.get_child_ids(id);
    let parent = tree.get_parent_id(id);
    tree.delete_node(id).map_err(ApplicationError::from)?;
    save_tree(file, &tree)?;
    output::success(&format!("deleted {}", id));
    if !children.is_empty() {
        output::header(&format!(
            "re-attached under {}: {}",
            parent,
            children.iter().join(", ")
        ));
    }
    Ok(())
}

fn completion(shell: Shell) {
    let mut cmd = Cli::command();
    let name = cmd.get_name().to_string();
    generate(shell, &mut cmd, name, &mut io::stdout());
}

//! Create, move and splice-delete

mod common;

use idtree::domain::{Node, NodeId, Tree, TreeError};
use rstest::{fixture, rstest};

use common::{assert_consistent, name, scenario_tree};

#[fixture]
fn tree() -> Tree<String> {
    scenario_tree()
}

// ============================================================
// create_node
// ============================================================

#[rstest]
fn given_parent_when_creating_then_appended_after_existing_children(tree: Tree<String>) {
    let before = tree.size();
    let node = tree.create_node(20, 6, name(20)).unwrap();

    assert_eq!(node.id(), 20);
    assert_eq!(node.parent_id(), 6);
    assert!(node.is_leaf());
    assert_eq!(tree.size(), before + 1);
    assert_eq!(tree.get_child_ids(6), vec![12, 13, 14, 15, 20]);
    assert_eq!(tree.level(20), 3);
    assert_consistent(&tree);
}

#[rstest]
#[case(16, 0, TreeError::NodeAlreadyExists(16))]
#[case(0, 1, TreeError::InvalidNodeId(0))]
#[case(-3, 1, TreeError::InvalidNodeId(-3))]
#[case(20, 99, TreeError::NodeNotFound(99))]
fn given_invalid_request_when_creating_then_fails_without_change(
    tree: Tree<String>,
    #[case] id: NodeId,
    #[case] parent: NodeId,
    #[case] expected: TreeError,
) {
    let before = tree.size();
    assert_eq!(tree.create_node(id, parent, name(id)).unwrap_err(), expected);
    assert_eq!(tree.size(), before);
    assert_consistent(&tree);
}

#[test]
fn given_non_zero_root_when_creating_root_id_then_invalid_node_id() {
    let tree = Tree::new(Node::new(7, "root"));
    assert_eq!(
        tree.create_node(7, 7, "again").unwrap_err(),
        TreeError::InvalidNodeId(7)
    );
    tree.create_node(1, 7, "child").unwrap();
    assert_eq!(tree.get_parent_id(1), 7);
    assert!(tree.get_parent_node(7).is_none());
}

// ============================================================
// move_node
// ============================================================

#[rstest]
fn given_valid_destination_when_moving_then_links_move_together(tree: Tree<String>) {
    tree.move_node(13, 1).unwrap();

    assert_eq!(tree.get_parent_id(13), 1);
    assert_eq!(tree.get_child_ids(1), vec![13]);
    assert_eq!(tree.get_child_ids(6), vec![12, 14, 15]);
    assert_eq!(tree.level(16), 3);
    assert_eq!(tree.rsearch(16).collect::<Vec<_>>(), vec![16, 13, 1, 0]);
    assert_consistent(&tree);
}

#[rstest]
fn given_two_moves_when_applied_then_last_parent_wins(tree: Tree<String>) {
    tree.move_node(5, 3).unwrap();
    tree.move_node(5, 4).unwrap();

    assert_eq!(tree.get_parent_id(5), 4);
    assert!(!tree.get_child_ids(3).contains(&5));
    assert_eq!(tree.get_child_ids(4), vec![5]);
    assert_consistent(&tree);
}

#[rstest]
fn given_root_destination_when_moving_then_always_allowed(tree: Tree<String>) {
    tree.move_node(16, 0).unwrap();
    assert_eq!(tree.get_child_ids(0), vec![1, 2, 3, 4, 16]);
    assert!(tree.get_node(13).unwrap().is_leaf());
    assert_eq!(tree.level(16), 1);
    assert_consistent(&tree);
}

#[rstest]
fn given_current_parent_when_moving_then_order_is_kept(tree: Tree<String>) {
    tree.move_node(5, 2).unwrap();
    assert_eq!(tree.get_child_ids(2), vec![5, 6, 7]);
}

#[rstest]
#[case(2, 16, TreeError::InvalidSourceDest { id: 2, dest: 16 })]
#[case(6, 6, TreeError::InvalidSourceDest { id: 6, dest: 6 })]
#[case(0, 1, TreeError::InvalidSourceDest { id: 0, dest: 1 })]
#[case(0, 0, TreeError::InvalidSourceDest { id: 0, dest: 0 })]
#[case(99, 1, TreeError::NodeNotFound(99))]
#[case(6, 99, TreeError::NodeNotFound(99))]
fn given_invalid_move_when_moving_then_fails_without_change(
    tree: Tree<String>,
    #[case] id: NodeId,
    #[case] dest: NodeId,
    #[case] expected: TreeError,
) {
    let paths = tree.get_all_paths();
    assert_eq!(tree.move_node(id, dest).unwrap_err(), expected);
    assert_eq!(tree.get_all_paths(), paths);
    assert_consistent(&tree);
}

#[rstest]
fn given_many_moves_when_applied_then_no_node_becomes_its_own_ancestor(tree: Tree<String>) {
    let ids: Vec<NodeId> = tree.dfs(0).collect();
    for &a in &ids {
        for &b in &ids {
            // errors are expected for cyclic requests; the tree must stay valid either way
            let _ = tree.move_node(a, b);
            assert!(!tree.is_ancestor(a, a));
        }
    }
    assert_eq!(tree.size(), ids.len());
    assert_consistent(&tree);
}

// ============================================================
// delete_node
// ============================================================

#[rstest]
fn given_inner_node_when_deleting_then_children_are_spliced_into_parent(tree: Tree<String>) {
    let before = tree.size();
    tree.delete_node(6).unwrap();

    assert!(!tree.contains(6));
    assert_eq!(tree.size(), before - 1);
    assert_eq!(tree.get_child_ids(2), vec![5, 7, 12, 13, 14, 15]);
    assert_eq!(tree.get_parent_id(12), 2);
    assert_eq!(tree.get_parent_id(13), 2);
    assert_eq!(tree.level(16), 3);
    assert_eq!(tree.depth(None), 3);
    assert_consistent(&tree);
}

#[rstest]
fn given_leaf_when_deleting_then_only_it_disappears(tree: Tree<String>) {
    tree.delete_node(16).unwrap();
    assert!(tree.get_node(13).unwrap().is_leaf());
    assert_eq!(tree.size(), 12);
    assert_consistent(&tree);
}

#[rstest]
#[case(0, TreeError::DeleteRootForbidden(0))]
#[case(99, TreeError::NodeNotFound(99))]
fn given_invalid_delete_when_deleting_then_fails_without_change(
    tree: Tree<String>,
    #[case] id: NodeId,
    #[case] expected: TreeError,
) {
    let before = tree.size();
    assert_eq!(tree.delete_node(id).unwrap_err(), expected);
    assert_eq!(tree.size(), before);
}

#[rstest]
fn given_every_node_deleted_when_done_then_only_root_remains(tree: Tree<String>) {
    let ids: Vec<NodeId> = tree.bfs(0).skip(1).collect();
    for (n, id) in ids.iter().enumerate() {
        tree.delete_node(*id).unwrap();
        assert_eq!(tree.size(), ids.len() - n);
        assert_consistent(&tree);
    }
    assert_eq!(tree.size(), 1);
    assert!(tree.get_root_node().unwrap().is_leaf());
}

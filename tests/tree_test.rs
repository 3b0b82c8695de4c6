//! Tests for DecisionTree structure and mutation

use twentyq::domain::{DecisionTree, DomainError, NodeId};

/// Every node is a leaf or has exactly two children.
fn assert_shape(tree: &DecisionTree) {
    for (id, node) in tree.iter() {
        assert_ne!(tree.is_leaf(id), tree.is_internal(id));
        match tree.branches(id) {
            Ok(b) => {
                assert!(!node.is_leaf());
                assert!(tree.node(b.yes).is_ok());
                assert!(tree.node(b.no).is_ok());
            }
            Err(_) => assert!(node.is_leaf() && tree.no_child(id).is_err()),
        }
    }
}

// ============================================================
// Construction
// ============================================================

#[test]
fn given_new_tree_when_inspecting_root_then_it_is_a_seed_leaf() {
    let tree = DecisionTree::new("duck");

    assert!(tree.is_leaf(tree.root()));
    assert!(!tree.is_internal(tree.root()));
    assert_eq!(tree.content(tree.root()).unwrap(), "duck");
    assert_eq!(tree.len(), 1);
    assert_eq!(tree.depth(), 1);
}

#[test]
fn given_default_tree_when_inspecting_root_then_seed_is_duck() {
    let tree = DecisionTree::default();
    assert_eq!(tree.content(tree.root()).unwrap(), "duck");
}

// ============================================================
// expand_leaf
// ============================================================

#[test]
fn given_leaf_when_expanding_then_two_empty_leaves_are_attached() {
    let mut tree = DecisionTree::new("duck");
    let root = tree.root();

    let (yes, no) = tree.expand_leaf(root).unwrap();

    assert!(tree.is_internal(root));
    assert_eq!(tree.yes_child(root).unwrap(), yes);
    assert_eq!(tree.no_child(root).unwrap(), no);
    assert!(tree.is_leaf(yes) && tree.is_leaf(no));
    assert_eq!(tree.content(yes).unwrap(), "");
    assert_eq!(tree.content(no).unwrap(), "");
    assert_eq!(tree.content(root).unwrap(), "duck");
    assert_eq!(tree.len(), 3);
}

#[test]
fn given_internal_node_when_expanding_then_invalid_state() {
    let mut tree = DecisionTree::new("duck");
    let root = tree.root();
    tree.expand_leaf(root).unwrap();

    let result = tree.expand_leaf(root);

    assert!(matches!(result, Err(DomainError::InvalidState(_))));
    assert_eq!(tree.len(), 3, "failed expansion must not add nodes");
}

#[test]
fn given_many_expansions_when_checking_shape_then_no_node_has_one_child() {
    let mut tree = DecisionTree::new("root");
    let mut frontier = vec![tree.root()];
    for i in 0..40 {
        let id = frontier.remove(i % frontier.len());
        let (yes, no) = tree.expand_leaf(id).unwrap();
        tree.set_content(yes, format!("yes{}", i)).unwrap();
        tree.set_content(no, format!("no{}", i)).unwrap();
        frontier.push(yes);
        frontier.push(no);
        assert_shape(&tree);
    }
    assert_eq!(tree.len(), 81);
    assert_eq!(tree.question_count(), 40);
    assert_eq!(tree.answers().len(), 41);
}

// ============================================================
// Children of leaves
// ============================================================

#[test]
fn given_leaf_when_asking_for_children_then_invalid_state() {
    let tree = DecisionTree::new("duck");

    assert!(matches!(
        tree.yes_child(tree.root()),
        Err(DomainError::InvalidState(_))
    ));
    assert!(matches!(
        tree.no_child(tree.root()),
        Err(DomainError::InvalidState(_))
    ));
}

#[test]
fn given_handle_from_other_tree_when_used_then_invalid_state() {
    let mut other = DecisionTree::new("other");
    let (_, foreign): (NodeId, NodeId) = other.expand_leaf(other.root()).unwrap();
    let mut tree = DecisionTree::new("duck");

    assert!(!tree.is_leaf(foreign));
    assert!(!tree.is_internal(foreign));
    assert!(matches!(
        tree.set_content(foreign, "x"),
        Err(DomainError::InvalidState(_))
    ));
    assert!(matches!(
        tree.swap_contents(tree.root(), foreign),
        Err(DomainError::InvalidState(_))
    ));
}

#[test]
fn given_root_of_other_tree_when_used_then_rejected_although_slot_exists() {
    let duck = DecisionTree::new("duck");
    let mut cat = DecisionTree::new("cat");

    assert!(!cat.is_leaf(duck.root()));
    assert!(!cat.is_internal(duck.root()));
    assert!(cat.node(duck.root()).is_err());
    assert!(matches!(
        cat.set_content(duck.root(), "hijacked"),
        Err(DomainError::InvalidState(_))
    ));
    assert!(matches!(
        cat.expand_leaf(duck.root()),
        Err(DomainError::InvalidState(_))
    ));
    assert_eq!(cat.content(cat.root()).unwrap(), "cat");
    assert_eq!(cat.len(), 1);
}

#[test]
fn given_cloned_tree_when_using_original_handles_then_rejected() {
    let mut tree = DecisionTree::new("duck");
    let root = tree.root();
    tree.learn(root, "goose", "Does it honk?").unwrap();
    let yes = tree.yes_child(root).unwrap();
    let mut copy = tree.clone();

    assert!(matches!(
        copy.set_content(yes, "swan"),
        Err(DomainError::InvalidState(_))
    ));
    let copy_yes = copy.yes_child(copy.root()).unwrap();
    copy.set_content(copy_yes, "swan").unwrap();

    assert_eq!(tree.content(yes).unwrap(), "goose");
    assert_eq!(copy.content(copy_yes).unwrap(), "swan");
}

// ============================================================
// set_content / swap_contents
// ============================================================

#[test]
fn given_node_when_setting_content_then_structure_is_unchanged() {
    let mut tree = DecisionTree::new("duck");
    let root = tree.root();
    tree.expand_leaf(root).unwrap();

    tree.set_content(root, "Does it fly?").unwrap();

    assert_eq!(tree.content(root).unwrap(), "Does it fly?");
    assert!(tree.is_internal(root));
    assert_eq!(tree.len(), 3);
}

#[test]
fn given_two_nodes_when_swapping_then_only_contents_move() {
    let mut tree = DecisionTree::new("Does it fly?");
    let root = tree.root();
    let (yes, no) = tree.expand_leaf(root).unwrap();
    tree.set_content(yes, "bird").unwrap();
    tree.set_content(no, "dog").unwrap();

    tree.swap_contents(root, no).unwrap();

    assert_eq!(tree.content(root).unwrap(), "dog");
    assert_eq!(tree.content(no).unwrap(), "Does it fly?");
    assert!(tree.is_internal(root));
    assert!(tree.is_leaf(no));
    assert_eq!(tree.yes_child(root).unwrap(), yes);
}

#[test]
fn given_same_node_when_swapping_then_nothing_changes() {
    let mut tree = DecisionTree::new("duck");
    let root = tree.root();

    tree.swap_contents(root, root).unwrap();

    assert_eq!(tree.content(root).unwrap(), "duck");
}

// ============================================================
// learn
// ============================================================

#[test]
fn given_duck_leaf_when_learning_goose_then_question_splits_answers() {
    let mut tree = DecisionTree::new("duck");
    let leaf = tree.root();

    tree.learn(leaf, "goose", "Does it honk?").unwrap();

    assert!(tree.is_internal(leaf));
    assert_eq!(tree.content(leaf).unwrap(), "Does it honk?");
    let yes = tree.yes_child(leaf).unwrap();
    let no = tree.no_child(leaf).unwrap();
    assert!(tree.is_leaf(yes));
    assert!(tree.is_leaf(no));
    assert_eq!(tree.content(yes).unwrap(), "goose");
    assert_eq!(tree.content(no).unwrap(), "duck");
}

#[test]
fn given_deep_leaf_when_learning_then_rest_of_tree_is_untouched() {
    let mut tree = DecisionTree::new("duck");
    let root = tree.root();
    tree.learn(root, "goose", "Does it honk?").unwrap();
    let duck = tree.no_child(root).unwrap();

    tree.learn(duck, "swan", "Is it white?").unwrap();

    assert_eq!(tree.content(root).unwrap(), "Does it honk?");
    assert_eq!(
        tree.content(tree.yes_child(root).unwrap()).unwrap(),
        "goose"
    );
    assert_eq!(tree.content(duck).unwrap(), "Is it white?");
    assert_eq!(tree.answers(), vec!["goose", "swan", "duck"]);
    assert_eq!(tree.depth(), 3);
}

#[test]
fn given_internal_node_when_learning_then_invalid_state() {
    let mut tree = DecisionTree::new("duck");
    let root = tree.root();
    tree.learn(root, "goose", "Does it honk?").unwrap();

    let result = tree.learn(root, "swan", "Is it white?");

    assert!(matches!(result, Err(DomainError::InvalidState(_))));
    assert_eq!(tree.content(root).unwrap(), "Does it honk?");
}

// ============================================================
// Queries and equality
// ============================================================

#[test]
fn given_tree_when_iterating_then_order_is_node_yes_no() {
    let mut tree = DecisionTree::new("dog");
    let root = tree.root();
    tree.learn(root, "bird", "Does it fly?").unwrap();
    let bird = tree.yes_child(root).unwrap();
    tree.learn(bird, "bat", "Is it a mammal?").unwrap();

    let contents: Vec<&str> = tree.iter().map(|(_, n)| n.content()).collect();

    assert_eq!(
        contents,
        vec!["Does it fly?", "Is it a mammal?", "bat", "bird", "dog"]
    );
}

#[test]
fn given_trees_built_differently_when_same_shape_then_equal() {
    let mut a = DecisionTree::new("duck");
    let root = a.root();
    a.learn(root, "goose", "Does it honk?").unwrap();

    let mut b = DecisionTree::new("Does it honk?");
    let root = b.root();
    let (yes, no) = b.expand_leaf(root).unwrap();
    b.set_content(yes, "goose").unwrap();
    b.set_content(no, "duck").unwrap();

    assert_eq!(a, b);
}

#[test]
fn given_trees_with_different_content_when_comparing_then_not_equal() {
    let mut a = DecisionTree::new("duck");
    let root = a.root();
    a.learn(root, "goose", "Does it honk?").unwrap();
    let mut b = a.clone();
    let no = b.no_child(b.root()).unwrap();
    b.set_content(no, "swan").unwrap();

    assert_ne!(a, b);
    assert_ne!(DecisionTree::new("duck"), a);
}

#[test]
fn given_tree_when_displaying_then_summary_has_counts() {
    let mut tree = DecisionTree::new("duck");
    let root = tree.root();
    tree.learn(root, "goose", "Does it honk?").unwrap();

    assert_eq!(tree.to_string(), "1 questions, 2 answers, depth 2");
}

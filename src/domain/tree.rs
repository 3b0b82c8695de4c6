use generational_arena::{Arena, Index};
use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};
use tracing::{debug, instrument};

use crate::domain::error::{DomainError, DomainResult};

static NEXT_TREE_ID: AtomicU64 = AtomicU64::new(0);

fn next_tree_id() -> u64 {
    NEXT_TREE_ID.fetch_add(1, Ordering::Relaxed)
}

/// Handle to a node inside the [`DecisionTree`] that issued it.
///
/// Handles are bound to their tree: another tree, including a clone,
/// rejects them even when it has a node in the same arena slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NodeId {
    tree: u64,
    index: Index,
}

/// Seed answer of a fresh tree.
pub const DEFAULT_SEED: &str = "duck";

/// Both children of an internal node.
///
/// Children only ever exist as a pair, so a node with a single child
/// cannot be represented.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Branches {
    pub yes: NodeId,
    pub no: NodeId,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Links {
    yes: Index,
    no: Index,
}

/// Tree node: a question when internal, a guess when leaf.
#[derive(Debug, Clone)]
pub struct Node {
    content: String,
    links: Option<Links>,
}

impl Node {
    fn leaf(content: String) -> Self {
        Self {
            content,
            links: None,
        }
    }

    pub fn content(&self) -> &str {
        &self.content
    }

    pub fn is_leaf(&self) -> bool {
        self.links.is_none()
    }
}

/// Binary decision tree stored in a generational arena.
///
/// The root always exists. Nodes are only ever added in pairs by
/// [`DecisionTree::expand_leaf`] and are never removed individually.
#[derive(Debug)]
pub struct DecisionTree {
    id: u64,
    arena: Arena<Node>,
    root: Index,
}

impl Clone for DecisionTree {
    /// The clone is a tree of its own and issues its own handles.
    fn clone(&self) -> Self {
        Self {
            id: next_tree_id(),
            arena: self.arena.clone(),
            root: self.root,
        }
    }
}

impl Default for DecisionTree {
    fn default() -> Self {
        Self::new(DEFAULT_SEED)
    }
}

impl DecisionTree {
    /// Create a single-leaf tree holding `seed`.
    pub fn new(seed: impl Into<String>) -> Self {
        let mut arena = Arena::new();
        let root = arena.insert(Node::leaf(seed.into()));
        Self {
            id: next_tree_id(),
            arena,
            root,
        }
    }

    pub fn root(&self) -> NodeId {
        self.handle(self.root)
    }

    fn handle(&self, index: Index) -> NodeId {
        NodeId {
            tree: self.id,
            index,
        }
    }

    fn index(&self, id: NodeId) -> DomainResult<Index> {
        if id.tree == self.id {
            Ok(id.index)
        } else {
            Err(DomainError::InvalidState(format!(
                "node {:?} belongs to another tree",
                id
            )))
        }
    }

    fn get(&self, id: NodeId) -> Option<&Node> {
        self.index(id).ok().and_then(|index| self.arena.get(index))
    }

    #[instrument(level = "trace", skip(self))]
    pub fn node(&self, id: NodeId) -> DomainResult<&Node> {
        let index = self.index(id)?;
        self.arena
            .get(index)
            .ok_or_else(|| DomainError::InvalidState(format!("unknown node {:?}", id)))
    }

    fn node_mut(&mut self, id: NodeId) -> DomainResult<&mut Node> {
        let index = self.index(id)?;
        self.arena
            .get_mut(index)
            .ok_or_else(|| DomainError::InvalidState(format!("unknown node {:?}", id)))
    }

    pub fn is_leaf(&self, id: NodeId) -> bool {
        self.get(id).is_some_and(Node::is_leaf)
    }

    pub fn is_internal(&self, id: NodeId) -> bool {
        self.get(id).is_some_and(|n| !n.is_leaf())
    }

    pub fn content(&self, id: NodeId) -> DomainResult<&str> {
        self.node(id).map(Node::content)
    }

    #[instrument(level = "trace", skip(self))]
    pub fn branches(&self, id: NodeId) -> DomainResult<Branches> {
        let links = self.node(id)?.links.ok_or_else(|| {
            DomainError::InvalidState(format!("node {:?} is a leaf and has no children", id))
        })?;
        Ok(Branches {
            yes: self.handle(links.yes),
            no: self.handle(links.no),
        })
    }

    pub fn yes_child(&self, id: NodeId) -> DomainResult<NodeId> {
        self.branches(id).map(|b| b.yes)
    }

    pub fn no_child(&self, id: NodeId) -> DomainResult<NodeId> {
        self.branches(id).map(|b| b.no)
    }

    #[instrument(level = "trace", skip(self, value))]
    pub fn set_content(&mut self, id: NodeId, value: impl Into<String>) -> DomainResult<()> {
        self.node_mut(id)?.content = value.into();
        Ok(())
    }

    /// Turn a leaf into an internal node with two empty leaves.
    ///
    /// Returns `(yes, no)`. Both children are attached in one assignment.
    #[instrument(level = "trace", skip(self))]
    pub fn expand_leaf(&mut self, id: NodeId) -> DomainResult<(NodeId, NodeId)> {
        if !self.node(id)?.is_leaf() {
            return Err(DomainError::InvalidState(format!(
                "node {:?} is already internal",
                id
            )));
        }
        let yes = self.arena.insert(Node::leaf(String::new()));
        let no = self.arena.insert(Node::leaf(String::new()));
        self.node_mut(id)?.links = Some(Links { yes, no });
        Ok((self.handle(yes), self.handle(no)))
    }

    /// Exchange the contents of two nodes; structure is untouched.
    #[instrument(level = "trace", skip(self))]
    pub fn swap_contents(&mut self, a: NodeId, b: NodeId) -> DomainResult<()> {
        if a == b {
            return self.node(a).map(|_| ());
        }
        let (x, y) = (self.index(a)?, self.index(b)?);
        match self.arena.get2_mut(x, y) {
            (Some(x), Some(y)) => {
                std::mem::swap(&mut x.content, &mut y.content);
                Ok(())
            }
            (None, _) => Err(DomainError::InvalidState(format!("unknown node {:?}", a))),
            (_, None) => Err(DomainError::InvalidState(format!("unknown node {:?}", b))),
        }
    }

    /// Split a wrongly guessed leaf.
    ///
    /// Afterwards `leaf` holds `question`, its yes-child holds `answer` and
    /// its no-child holds the guess that was wrong.
    #[instrument(level = "debug", skip(self))]
    pub fn learn(&mut self, leaf: NodeId, answer: &str, question: &str) -> DomainResult<()> {
        let (yes, no) = self.expand_leaf(leaf)?;
        self.set_content(no, question)?;
        self.swap_contents(leaf, no)?;
        self.set_content(yes, answer)?;
        debug!(
            "learned {:?} vs {:?} via {:?}",
            answer,
            self.content(no)?,
            question
        );
        Ok(())
    }

    /// Number of nodes.
    pub fn len(&self) -> usize {
        self.arena.len()
    }

    /// A tree is never empty; present for API symmetry with `len`.
    pub fn is_empty(&self) -> bool {
        self.arena.is_empty()
    }

    pub fn question_count(&self) -> usize {
        self.iter().filter(|(_, n)| !n.is_leaf()).count()
    }

    /// Leaf contents in pre-order.
    pub fn answers(&self) -> Vec<&str> {
        self.iter()
            .filter(|(_, n)| n.is_leaf())
            .map(|(_, n)| n.content())
            .collect()
    }

    /// Number of nodes on the longest root-to-leaf path.
    #[instrument(level = "debug", skip(self))]
    pub fn depth(&self) -> usize {
        let mut max = 0;
        let mut stack = vec![(self.root, 1usize)];
        while let Some((id, level)) = stack.pop() {
            max = max.max(level);
            if let Some(b) = self.arena.get(id).and_then(|n| n.links) {
                stack.push((b.no, level + 1));
                stack.push((b.yes, level + 1));
            }
        }
        max
    }

    /// Pre-order iterator: node, yes subtree, no subtree.
    pub fn iter(&self) -> PreOrderIterator<'_> {
        PreOrderIterator {
            tree: self,
            stack: vec![self.root],
        }
    }
}

impl PartialEq for DecisionTree {
    /// Structural equality: same shape and same contents, arena layout ignored.
    fn eq(&self, other: &Self) -> bool {
        self.len() == other.len()
            && self
                .iter()
                .zip(other.iter())
                .all(|((_, a), (_, b))| a.is_leaf() == b.is_leaf() && a.content == b.content)
    }
}

impl Eq for DecisionTree {}

impl fmt::Display for DecisionTree {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} questions, {} answers, depth {}",
            self.question_count(),
            self.len() - self.question_count(),
            self.depth()
        )
    }
}

pub struct PreOrderIterator<'a> {
    tree: &'a DecisionTree,
    stack: Vec<Index>,
}

impl<'a> Iterator for PreOrderIterator<'a> {
    type Item = (NodeId, &'a Node);

    fn next(&mut self) -> Option<Self::Item> {
        let index = self.stack.pop()?;
        let node = self.tree.arena.get(index)?;
        // no first, so yes is visited first
        if let Some(links) = node.links {
            self.stack.push(links.no);
            self.stack.push(links.yes);
        }
        Some((self.tree.handle(index), node))
    }
}

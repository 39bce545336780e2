//! The move-variation tree: mutation, lookup, and cursor management.

use std::cell::RefCell;
use std::rc::Rc;

use tracing::debug;

use sightline_core::Position;

use crate::error::TreeError;
use crate::node::{MoveNode, NodeId, Nodes, ROOT_TOKEN};

/// A game's move history with branching, a cursor, and the live position.
///
/// All nodes live in an arena shared between handles; [`duplicate`] produces
/// a new handle over the same nodes with its own cursor caches, so UI layers
/// get a fresh object identity per action without deep-copying the tree.
/// Nodes are only ever mutated through this type's operation set.
///
/// [`duplicate`]: GameTree::duplicate
pub struct GameTree {
    nodes: Rc<RefCell<Nodes>>,
    root: NodeId,
    current: NodeId,
    /// Cached path of nodes from just after the root to `current`.
    line: Vec<NodeId>,
    /// Cached position after replaying `line`.
    position: Position,
}

/// Which way [`GameTree::go_to_next_alternative`] and its mirror cycle.
enum Direction {
    Next,
    Previous,
}

impl GameTree {
    /// Create a tree holding only the sentinel root, cursor on it, with the
    /// starting position live.
    pub fn new() -> GameTree {
        let mut nodes = Nodes::default();
        let root = nodes.alloc(MoveNode::new(ROOT_TOKEN));
        GameTree {
            nodes: Rc::new(RefCell::new(nodes)),
            root,
            current: root,
            line: Vec::new(),
            position: Position::starting(),
        }
    }

    /// Record a move at the cursor and move the cursor onto it.
    ///
    /// The token is validated against the live position first; on rejection
    /// the tree and cursor are untouched. On success the stored token is the
    /// canonical SAN spelling. If the cursor already has a continuation, the
    /// subtree below it is searched for an existing node with this token and
    /// the cursor lands there instead of creating a duplicate; otherwise the
    /// new node joins the continuation's alternatives, leaving the existing
    /// main line in place.
    pub fn add_move(&mut self, token: &str) -> Result<(), TreeError> {
        let san = self
            .position
            .canonical_san(token)
            .map_err(|source| TreeError::IllegalMove {
                token: token.to_string(),
                source,
            })?;

        let target = {
            let mut nodes = self.nodes.borrow_mut();
            match nodes[self.current].next {
                None => {
                    let id = nodes.alloc(MoveNode::new(san));
                    nodes[id].prev = Some(self.current);
                    nodes[self.current].next = Some(id);
                    id
                }
                Some(next) => match nodes.find_descendant_with_move(next, &san) {
                    Some(existing) => existing,
                    None => {
                        let id = nodes.alloc(MoveNode::new(san));
                        nodes[id].prev = Some(self.current);
                        nodes[next].alternatives.push(id);
                        id
                    }
                },
            }
        };
        self.update_current(target);
        Ok(())
    }

    /// Attach a pre-built node to the cursor's continuation set and move the
    /// cursor onto it.
    ///
    /// The node's token is validated like [`add_move`](GameTree::add_move)
    /// and stored in canonical SAN. If the cursor has no continuation yet,
    /// the node becomes the main continuation; otherwise it is appended to
    /// the continuation's alternatives, never replacing the main line.
    pub fn add_alternative(&mut self, node: MoveNode) -> Result<(), TreeError> {
        let san = self
            .position
            .canonical_san(node.san())
            .map_err(|source| TreeError::IllegalMove {
                token: node.san().to_string(),
                source,
            })?;

        let target = {
            let mut nodes = self.nodes.borrow_mut();
            let id = nodes.alloc(MoveNode::new(san));
            nodes[id].prev = Some(self.current);
            match nodes[self.current].next {
                Some(next) => nodes[next].alternatives.push(id),
                None => nodes[self.current].next = Some(id),
            }
            id
        };
        self.update_current(target);
        Ok(())
    }

    /// Step the cursor back one ply. Returns whether it moved.
    pub fn go_to_previous(&mut self) -> bool {
        let prev = self.nodes.borrow()[self.current].prev;
        match prev {
            Some(id) => {
                self.update_current(id);
                true
            }
            None => false,
        }
    }

    /// Step the cursor forward along the current continuation. Returns
    /// whether it moved.
    pub fn go_to_next(&mut self) -> bool {
        let next = self.nodes.borrow()[self.current].next;
        match next {
            Some(id) => {
                self.update_current(id);
                true
            }
            None => false,
        }
    }

    /// Cycle the cursor to the next move recorded at this branch point.
    /// Returns whether it moved.
    pub fn go_to_next_alternative(&mut self) -> bool {
        self.go_to_alternative(Direction::Next)
    }

    /// Cycle the cursor to the previous move recorded at this branch point.
    /// Returns whether it moved.
    pub fn go_to_previous_alternative(&mut self) -> bool {
        self.go_to_alternative(Direction::Previous)
    }

    fn go_to_alternative(&mut self, direction: Direction) -> bool {
        if self.current == self.root {
            return false;
        }
        let target = {
            let nodes = self.nodes.borrow();
            let siblings = nodes.siblings_at(self.current);
            if siblings.is_empty() {
                return false;
            }
            let index = siblings
                .iter()
                .position(|&id| id == self.current)
                .expect("the cursor is part of its own sibling set");
            let step = match direction {
                Direction::Next => index + 1,
                Direction::Previous => index + siblings.len() - 1,
            };
            siblings[step % siblings.len()]
        };
        self.update_current(target);
        true
    }

    /// Lazy iterator over the main-line tokens, restartable by calling again.
    pub fn main_line(&self) -> MainLine {
        let cursor = self.nodes.borrow()[self.root].next;
        MainLine {
            nodes: Rc::clone(&self.nodes),
            cursor,
        }
    }

    /// The path of nodes from just after the root to the cursor.
    pub fn current_line(&self) -> &[NodeId] {
        &self.line
    }

    /// The tokens along [`current_line`](GameTree::current_line).
    pub fn current_san_line(&self) -> Vec<String> {
        let nodes = self.nodes.borrow();
        self.line.iter().map(|&id| nodes[id].san.clone()).collect()
    }

    /// The live position after replaying the current line.
    pub fn position(&self) -> &Position {
        &self.position
    }

    /// The cursor node.
    pub fn current(&self) -> NodeId {
        self.current
    }

    /// The sentinel root node.
    pub fn root(&self) -> NodeId {
        self.root
    }

    /// Total number of nodes ever recorded, the sentinel root included.
    pub fn node_count(&self) -> usize {
        self.nodes.borrow().len()
    }

    /// A new handle over the same nodes, same root and cursor, with its own
    /// freshly recomputed line and position caches.
    pub fn duplicate(&self) -> GameTree {
        let mut copy = GameTree {
            nodes: Rc::clone(&self.nodes),
            root: self.root,
            current: self.current,
            line: Vec::new(),
            position: Position::starting(),
        };
        copy.update_current(copy.current);
        copy
    }

    /// The token recorded at `id`.
    pub fn san(&self, id: NodeId) -> String {
        self.nodes.borrow()[id].san.clone()
    }

    /// The main continuation following `id`, if any.
    pub fn next(&self, id: NodeId) -> Option<NodeId> {
        self.nodes.borrow()[id].next
    }

    /// The node whose link led to `id`, if any.
    pub fn prev(&self, id: NodeId) -> Option<NodeId> {
        self.nodes.borrow()[id].prev
    }

    /// The alternatives branching at the same point as `id`'s continuation.
    pub fn alternatives(&self, id: NodeId) -> Vec<NodeId> {
        self.nodes.borrow()[id].alternatives.clone()
    }

    /// Whether `id` is the main continuation at its branch point.
    pub fn is_main_continuation(&self, id: NodeId) -> bool {
        self.nodes.borrow().is_main_continuation(id)
    }

    /// Whether `id` is one of the alternatives at its branch point.
    pub fn is_alternative(&self, id: NodeId) -> bool {
        self.nodes.borrow().is_alternative(id)
    }

    /// Whether any alternatives are recorded at `id`'s branch point.
    pub fn has_sibling_alternatives(&self, id: NodeId) -> bool {
        self.nodes.borrow().has_sibling_alternatives(id)
    }

    /// First node in the subtree rooted at `from` recording `san`, if any.
    pub fn find_descendant_with_move(&self, from: NodeId, san: &str) -> Option<NodeId> {
        self.nodes.borrow().find_descendant_with_move(from, san)
    }

    /// Move the cursor and rebuild the derived caches.
    ///
    /// Reconstruction replays the whole line from the starting position on
    /// every cursor change; a recorded line that fails to replay means the
    /// tree structure was corrupted and is unrecoverable.
    fn update_current(&mut self, id: NodeId) {
        self.current = id;
        self.line = self.line_to(id);
        let tokens = self.current_san_line();
        self.position =
            Position::replay(&tokens).expect("every recorded line replays from the start");
        debug!(ply = self.line.len(), fen = %self.position.fen(), "cursor moved");
    }

    /// Walk `prev` links from `id` back to the root and reverse.
    fn line_to(&self, id: NodeId) -> Vec<NodeId> {
        let nodes = self.nodes.borrow();
        let mut line = Vec::new();
        let mut cursor = id;
        while cursor != self.root {
            line.push(cursor);
            cursor = nodes[cursor]
                .prev
                .expect("every non-root node links back to the root");
        }
        line.reverse();
        line
    }
}

impl Default for GameTree {
    fn default() -> Self {
        GameTree::new()
    }
}

/// Lazy iterator over main-line tokens, produced by
/// [`GameTree::main_line`].
pub struct MainLine {
    nodes: Rc<RefCell<Nodes>>,
    cursor: Option<NodeId>,
}

impl Iterator for MainLine {
    type Item = String;

    fn next(&mut self) -> Option<String> {
        let id = self.cursor?;
        let nodes = self.nodes.borrow();
        self.cursor = nodes[id].next;
        Some(nodes[id].san.clone())
    }
}

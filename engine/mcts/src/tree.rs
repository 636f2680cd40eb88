//! MCTS tree structure with arena allocation.
//!
//! Nodes are stored in a contiguous Vec and referenced by NodeId indices.
//! A child is owned by the arena and listed in its parent's `children`;
//! the child's `parent` field is a plain index, so there is no ownership
//! cycle between the two.

use crate::node::{MctsNode, NodeId};

/// MCTS tree with arena-based node storage.
#[derive(Debug)]
pub struct MctsTree<A> {
    /// Arena storing all nodes
    nodes: Vec<MctsNode<A>>,

    /// Root node index (always 0 after initialization)
    root: NodeId,
}

impl<A: Copy + PartialEq> MctsTree<A> {
    /// Create a new tree whose root has `legal_actions` untried.
    pub fn new(legal_actions: Vec<A>) -> Self {
        Self {
            nodes: vec![MctsNode::new_root(legal_actions)],
            root: NodeId(0),
        }
    }

    /// Get the root node ID.
    #[inline]
    pub fn root(&self) -> NodeId {
        self.root
    }

    /// Get a reference to a node by ID.
    #[inline]
    pub fn get(&self, id: NodeId) -> &MctsNode<A> {
        &self.nodes[id.0 as usize]
    }

    /// Get a mutable reference to a node by ID.
    #[inline]
    pub fn get_mut(&mut self, id: NodeId) -> &mut MctsNode<A> {
        &mut self.nodes[id.0 as usize]
    }

    /// Allocate a new node and return its ID.
    fn allocate(&mut self, node: MctsNode<A>) -> NodeId {
        let id = NodeId(self.nodes.len() as u32);
        self.nodes.push(node);
        id
    }

    /// Get the total number of nodes in the tree.
    #[inline]
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Check if tree is empty (should never be true after construction).
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Get the arena slice for read access.
    #[inline]
    pub fn arena(&self) -> &[MctsNode<A>] {
        &self.nodes
    }

    /// Select the child of a node with the highest UCT score.
    ///
    /// Ties go to the first child in expansion order. Returns None if the
    /// node has no children.
    pub fn select_child(&self, node_id: NodeId, exploration_constant: f64) -> Option<(A, NodeId)> {
        let node = self.get(node_id);
        // Pre-compute ln once instead of per-child
        let parent_visits_ln = (node.visits as f64).ln();

        let mut best: Option<(A, NodeId, f64)> = None;
        for &(action, child_id) in &node.children {
            let score = self
                .get(child_id)
                .uct_score(parent_visits_ln, exploration_constant);
            if best.map_or(true, |(_, _, best_score)| score > best_score) {
                best = Some((action, child_id, score));
            }
        }

        best.map(|(action, id, _)| (action, id))
    }

    /// Add a child to a parent node.
    /// Returns the new child's NodeId.
    pub fn add_child(&mut self, parent_id: NodeId, action: A, legal_actions: Vec<A>) -> NodeId {
        debug_assert!(
            self.get(parent_id).child(action).is_none(),
            "action expanded twice from the same node"
        );

        let child = MctsNode::new(parent_id, Some(action), legal_actions);
        let child_id = self.allocate(child);

        self.get_mut(parent_id).children.push((action, child_id));

        child_id
    }

    /// Backpropagate an outcome from a node to the root.
    ///
    /// `won` is from the searching player's perspective and is added
    /// unchanged at every level.
    pub fn backpropagate(&mut self, leaf_id: NodeId, won: f64) {
        let mut current_id = leaf_id;

        while current_id.is_some() {
            let node = self.get_mut(current_id);
            node.visits += 1;
            node.wins += won;
            current_id = node.parent;
        }
    }

    /// Root child with the best win rate among children visited at least once.
    ///
    /// Ties go to the first child in expansion order. Returns None if no
    /// child has been visited.
    pub fn best_action(&self) -> Option<(A, NodeId)> {
        let root = self.get(self.root);

        let mut best: Option<(A, NodeId, f64)> = None;
        for &(action, child_id) in &root.children {
            let child = self.get(child_id);
            if child.visits == 0 {
                continue;
            }
            let rate = child.win_rate();
            if best.map_or(true, |(_, _, best_rate)| rate > best_rate) {
                best = Some((action, child_id, rate));
            }
        }

        best.map(|(action, id, _)| (action, id))
    }

    /// Get statistics about the tree for debugging.
    pub fn stats(&self) -> TreeStats {
        let root = self.get(self.root);
        TreeStats {
            total_nodes: self.nodes.len(),
            root_visits: root.visits,
            root_win_rate: root.win_rate(),
            max_depth: self.compute_max_depth(),
        }
    }

    fn compute_max_depth(&self) -> u32 {
        let mut max_depth = 0;
        let mut stack = vec![(self.root, 0u32)];

        while let Some((node_id, depth)) = stack.pop() {
            max_depth = max_depth.max(depth);
            stack.extend(
                self.get(node_id)
                    .children
                    .iter()
                    .map(|(_, id)| (*id, depth + 1)),
            );
        }

        max_depth
    }
}

/// Statistics about an MCTS tree.
#[derive(Debug, Clone)]
pub struct TreeStats {
    pub total_nodes: usize,
    pub root_visits: u32,
    pub root_win_rate: f64,
    pub max_depth: u32,
}

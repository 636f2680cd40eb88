//! MCTS tree node representation.
//!
//! Each node represents a game state reached by taking an action from the
//! parent. Nodes store the visit statistics used by UCT selection and the
//! actions not yet expanded from their state.

/// Index into the node arena. Using a newtype for type safety.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NodeId(pub u32);

impl NodeId {
    pub const NONE: NodeId = NodeId(u32::MAX);

    pub fn is_none(self) -> bool {
        self == Self::NONE
    }

    pub fn is_some(self) -> bool {
        !self.is_none()
    }
}

/// A node in the MCTS tree.
#[derive(Debug, Clone)]
pub struct MctsNode<A> {
    /// Parent node index (NONE for root)
    pub parent: NodeId,

    /// Action that led to this node from parent (None for root)
    pub parent_action: Option<A>,

    /// Children in expansion order. Each action appears at most once.
    pub children: Vec<(A, NodeId)>,

    /// Legal actions at this state that have not been expanded yet
    pub untried_actions: Vec<A>,

    /// Number of simulations that passed through this node
    pub visits: u32,

    /// Sum of outcomes credited to this node, each in [0, 1]
    pub wins: f64,
}

impl<A: Copy + PartialEq> MctsNode<A> {
    /// Create a node whose untried actions are exactly `legal_actions`.
    pub fn new(parent: NodeId, parent_action: Option<A>, legal_actions: Vec<A>) -> Self {
        Self {
            parent,
            parent_action,
            children: Vec::new(),
            untried_actions: legal_actions,
            visits: 0,
            wins: 0.0,
        }
    }

    /// Create a new root node.
    pub fn new_root(legal_actions: Vec<A>) -> Self {
        Self::new(NodeId::NONE, None, legal_actions)
    }

    /// Empirical win rate wins / visits. Returns 0.0 if never visited.
    #[inline]
    pub fn win_rate(&self) -> f64 {
        if self.visits == 0 {
            0.0
        } else {
            self.wins / self.visits as f64
        }
    }

    /// UCT score for selecting this node from its parent.
    ///
    /// UCT = wins / visits + C * sqrt(ln(N_parent) / visits)
    ///
    /// Takes pre-computed ln(parent_visits) to avoid redundant log calls
    /// when comparing siblings. An unvisited node scores 0.0.
    #[inline]
    pub fn uct_score(&self, parent_visits_ln: f64, exploration_constant: f64) -> f64 {
        if self.visits == 0 {
            return 0.0;
        }
        let visits = self.visits as f64;
        self.win_rate() + exploration_constant * (parent_visits_ln / visits).sqrt()
    }

    /// Whether some legal action has not been expanded yet.
    #[inline]
    pub fn is_expandable(&self) -> bool {
        !self.untried_actions.is_empty()
    }

    /// No untried actions and no children: nothing below this node.
    #[inline]
    pub fn is_exhausted(&self) -> bool {
        self.untried_actions.is_empty() && self.children.is_empty()
    }

    /// Child reached by `action`, if it has been expanded.
    pub fn child(&self, action: A) -> Option<NodeId> {
        self.children
            .iter()
            .find(|(a, _)| *a == action)
            .map(|(_, id)| *id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_node_id_none() {
        assert!(NodeId::NONE.is_none());
        assert!(!NodeId::NONE.is_some());
        assert!(!NodeId(0).is_none());
        assert!(NodeId(0).is_some());
    }

    #[test]
    fn test_new_root() {
        let node = MctsNode::new_root(vec![1u8, 2, 3]);

        assert!(node.parent.is_none());
        assert!(node.parent_action.is_none());
        assert_eq!(node.untried_actions, vec![1, 2, 3]);
        assert!(node.children.is_empty());
        assert_eq!(node.visits, 0);
        assert_eq!(node.wins, 0.0);
    }

    #[test]
    fn test_win_rate() {
        let mut node = MctsNode::new_root(Vec::<u8>::new());

        // Unvisited
        assert_eq!(node.win_rate(), 0.0);

        node.visits = 4;
        node.wins = 2.5;
        assert!((node.win_rate() - 0.625).abs() < 1e-12);
    }

    #[test]
    fn test_uct_score() {
        let mut node = MctsNode::new(NodeId(0), Some(0u8), vec![]);
        node.visits = 25;
        node.wins = 10.0;

        // 10/25 + 2 * sqrt(ln(100) / 25) = 0.4 + 2 * 0.42919... = 1.25838...
        let expected = 0.4 + 2.0 * ((100f64).ln() / 25.0).sqrt();
        let score = node.uct_score((100f64).ln(), 2.0);
        assert!((score - expected).abs() < 1e-12);
        assert!((score - 1.2584).abs() < 1e-3);
    }

    #[test]
    fn test_uct_score_unvisited_is_zero() {
        let node = MctsNode::new(NodeId(0), Some(0u8), vec![]);
        assert_eq!(node.uct_score((10f64).ln(), 2.0), 0.0);
        // No division error even with a zero-visit parent
        assert_eq!(node.uct_score((0f64).ln(), 2.0), 0.0);
    }

    #[test]
    fn test_expandable_and_exhausted() {
        let mut node = MctsNode::new_root(vec![7u8]);
        assert!(node.is_expandable());
        assert!(!node.is_exhausted());

        node.untried_actions.pop();
        assert!(!node.is_expandable());
        assert!(node.is_exhausted());

        node.children.push((7, NodeId(1)));
        assert!(!node.is_exhausted());
        assert_eq!(node.child(7), Some(NodeId(1)));
        assert_eq!(node.child(8), None);
    }
}

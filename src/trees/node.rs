use crate::data::dataset::{Number, TargetValue};

/// Decision tree node
///
/// A node is either a leaf carrying a predicted value or an internal split,
/// never both. A split owns its two subtrees exclusively: `true_branch`
/// receives the samples satisfying the split predicate, `false_branch` the
/// rest. Dropping the root drops the whole tree.
#[derive(Clone, Debug, PartialEq)]
pub enum TreeNode<XT: Number, YT: TargetValue> {
    Leaf {
        value: YT,
    },
    Split {
        feature_index: usize,
        threshold: XT,
        true_branch: Box<TreeNode<XT, YT>>,
        false_branch: Box<TreeNode<XT, YT>>,
    },
}

impl<XT: Number, YT: TargetValue> TreeNode<XT, YT> {
    pub fn leaf(value: YT) -> Self {
        Self::Leaf { value }
    }

    pub fn split(
        feature_index: usize,
        threshold: XT,
        true_branch: TreeNode<XT, YT>,
        false_branch: TreeNode<XT, YT>,
    ) -> Self {
        Self::Split {
            feature_index,
            threshold,
            true_branch: Box::new(true_branch),
            false_branch: Box::new(false_branch),
        }
    }

    pub fn is_leaf(&self) -> bool {
        matches!(self, Self::Leaf { .. })
    }

    /// Number of edges on the longest path from this node to a leaf.
    pub fn depth(&self) -> usize {
        match self {
            Self::Leaf { .. } => 0,
            Self::Split {
                true_branch,
                false_branch,
                ..
            } => 1 + true_branch.depth().max(false_branch.depth()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_node_is_leaf() {
        let leaf = TreeNode::<f64, u8>::leaf(1);
        assert!(leaf.is_leaf());

        let split = TreeNode::split(0, 2.0, TreeNode::leaf(0), TreeNode::leaf(1));
        assert!(!split.is_leaf());
    }

    #[test]
    fn test_node_depth() {
        let leaf = TreeNode::<f64, u8>::leaf(1);
        assert_eq!(leaf.depth(), 0);

        let inner = TreeNode::split(0, 2.0, TreeNode::leaf(0), TreeNode::leaf(1));
        let root = TreeNode::split(1, 5.0, inner, TreeNode::leaf(2));
        assert_eq!(root.depth(), 2);
    }
}

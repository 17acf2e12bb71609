//! Decision Text Tree Classifier
use super::{
    node::{NodeKind, TextNode},
    params::TextTreeParams,
};
use crate::{
    data::dataset::{Document, TargetLabel, TextDataset},
    error::TreeError,
    metrics::confusion::ClassificationMetrics,
};
use nalgebra::DVector;
use std::collections::BTreeSet;

/// A fitted node together with the subtrees it routes documents to.
///
/// `branches` holds `(left, right)` for stumps and is `None` for bags.
#[derive(Clone, Debug)]
pub struct TreeNode<YT: TargetLabel> {
    pub node: TextNode<YT>,
    pub branches: Option<Box<(TreeNode<YT>, TreeNode<YT>)>>,
}

impl<YT: TargetLabel> TreeNode<YT> {
    fn depth(&self) -> usize {
        match &self.branches {
            Some(branches) => 1 + branches.0.depth().max(branches.1.depth()),
            None => 0,
        }
    }

    fn num_leaves(&self) -> usize {
        match &self.branches {
            Some(branches) => branches.0.num_leaves() + branches.1.num_leaves(),
            None => 1,
        }
    }
}

/// Decision tree whose splits test whether a keyword appears in a document.
#[derive(Clone, Debug)]
pub struct DecisionTextTree<YT: TargetLabel> {
    root: Option<Box<TreeNode<YT>>>,
    tree_params: TextTreeParams,
}

impl<YT: TargetLabel> ClassificationMetrics<YT> for DecisionTextTree<YT> {}

impl<YT: TargetLabel> DecisionTextTree<YT> {
    /// Creates an unfitted tree with unlimited depth and the default impurity epsilon.
    ///
    /// # Arguments
    ///
    /// * `keywords` - Candidate keywords the tree may split on.
    pub fn new<I, S>(keywords: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut tree_params = TextTreeParams::new();
        tree_params.set_keywords(keywords);
        Self {
            root: None,
            tree_params,
        }
    }

    /// Creates an unfitted tree with custom parameters.
    ///
    /// # Arguments
    ///
    /// * `keywords` - Candidate keywords the tree may split on.
    /// * `max_depth` - The maximum depth of the tree, `None` for unlimited.
    /// * `epsilon` - Impurity below which a node isn't split any further.
    ///
    /// # Errors
    ///
    /// This method will return an error if `epsilon` is negative or not finite.
    pub fn with_params<I, S>(
        keywords: I,
        max_depth: Option<u16>,
        epsilon: Option<f64>,
    ) -> Result<Self, TreeError>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut tree = Self::new(keywords);
        tree.set_max_depth(max_depth);
        if let Some(epsilon) = epsilon {
            tree.set_epsilon(epsilon)?;
        }
        Ok(tree)
    }

    pub fn set_keywords<I, S>(&mut self, keywords: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.tree_params.set_keywords(keywords)
    }

    pub fn set_max_depth(&mut self, max_depth: Option<u16>) {
        self.tree_params.set_max_depth(max_depth)
    }

    /// Sets the impurity threshold below which nodes become leaves.
    ///
    /// # Errors
    ///
    /// This method will return an error if `epsilon` is negative or not finite.
    pub fn set_epsilon(&mut self, epsilon: f64) -> Result<(), TreeError> {
        self.tree_params.set_epsilon(epsilon)
    }

    pub fn keywords(&self) -> &BTreeSet<String> {
        self.tree_params.keywords()
    }

    pub fn max_depth(&self) -> Option<u16> {
        self.tree_params.max_depth()
    }

    pub fn epsilon(&self) -> f64 {
        self.tree_params.epsilon()
    }

    pub fn root(&self) -> Option<&TreeNode<YT>> {
        self.root.as_deref()
    }

    pub fn is_fitted(&self) -> bool {
        self.root.is_some()
    }

    /// Number of stump levels on the longest path, 0 for a single bag.
    pub fn depth(&self) -> Result<usize, TreeError> {
        Ok(self.root.as_ref().ok_or(TreeError::NotFitted)?.depth())
    }

    pub fn num_leaves(&self) -> Result<usize, TreeError> {
        Ok(self.root.as_ref().ok_or(TreeError::NotFitted)?.num_leaves())
    }

    /// Builds the tree from a dataset, replacing any previous fit.
    ///
    /// # Arguments
    ///
    /// * `dataset` - The documents and their labels.
    ///
    /// # Returns
    ///
    /// A string indicating that the tree was built successfully.
    ///
    /// # Errors
    ///
    /// This method will return an error if the dataset is empty.
    pub fn fit<D>(&mut self, dataset: &TextDataset<D, YT>) -> Result<String, TreeError>
    where
        D: Document + Sync,
    {
        if !dataset.is_not_empty() {
            return Err(TreeError::InvalidInput(
                "Cannot fit a tree on an empty dataset.".into(),
            ));
        }
        if dataset.x.len() != dataset.y.len() {
            return Err(TreeError::InvalidInput(format!(
                "Got {} documents but {} labels.",
                dataset.x.len(),
                dataset.y.len()
            )));
        }

        let root = self.build_tree(dataset.view(), self.max_depth());
        tracing::info!(
            samples = dataset.nrows(),
            depth = root.depth(),
            leaves = root.num_leaves(),
            "Finished building the text tree."
        );
        self.root = Some(Box::new(root));
        Ok("Finished building the tree.".into())
    }

    /// Predicts a label for every document, in input order.
    ///
    /// # Errors
    ///
    /// This method will return an error if the tree wasn't built yet.
    pub fn predict<D: Document>(&self, documents: &[D]) -> Result<DVector<YT>, TreeError> {
        let root = self.root.as_ref().ok_or(TreeError::NotFitted)?;
        let documents: Vec<&D> = documents.iter().collect();
        Ok(DVector::from_vec(Self::make_predictions(&documents, root)))
    }

    /// Renders every node, children indented two spaces deeper than their parent.
    ///
    /// # Errors
    ///
    /// This method will return an error if the tree wasn't built yet.
    pub fn pretty_print(&self) -> Result<String, TreeError> {
        let root = self.root.as_ref().ok_or(TreeError::NotFitted)?;

        let mut lines = Vec::new();
        let mut stack = vec![(root.as_ref(), String::new())];
        while let Some((tree, indent)) = stack.pop() {
            lines.push(tree.node.pretty(&indent));
            if let Some(branches) = &tree.branches {
                let child_indent = format!("{indent}  ");
                stack.push((&branches.1, child_indent.clone()));
                stack.push((&branches.0, child_indent));
            }
        }
        Ok(lines.join("\n"))
    }

    fn build_tree<D>(&self, dataset: TextDataset<&D, YT>, depth: Option<u16>) -> TreeNode<YT>
    where
        D: Document + Sync,
    {
        let kind = match depth {
            Some(0) => NodeKind::Bag,
            _ => NodeKind::Stump,
        };
        let node = TextNode::fit(kind, self.keywords(), &dataset, self.epsilon());

        let branches = match &node {
            TextNode::Stump(stump) => {
                let mask = stump.route_mask(&dataset.x);
                let (left, right) = dataset.split_on_mask(&mask);
                let child_depth = depth.map(|depth| depth - 1);
                Some(Box::new((
                    self.build_tree(left, child_depth),
                    self.build_tree(right, child_depth),
                )))
            }
            TextNode::Bag(_) => None,
        };

        TreeNode { node, branches }
    }

    fn make_predictions<D: Document>(documents: &[&D], tree: &TreeNode<YT>) -> Vec<YT> {
        let (stump, branches) = match (&tree.node, &tree.branches) {
            (TextNode::Stump(stump), Some(branches)) => (stump, branches),
            (TextNode::Bag(bag), _) => return bag.predict(documents.len()),
            (TextNode::Stump(_), None) => unreachable!("stump nodes are always built with branches"),
        };

        let mask = stump.route_mask(documents);
        let (left_documents, right_documents): (Vec<(&D, bool)>, Vec<(&D, bool)>) = documents
            .iter()
            .zip(mask.iter())
            .map(|(&document, &routed_left)| (document, routed_left))
            .partition(|&(_, routed_left)| routed_left);
        let left_documents: Vec<&D> = left_documents.into_iter().map(|(d, _)| d).collect();
        let right_documents: Vec<&D> = right_documents.into_iter().map(|(d, _)| d).collect();

        let mut left_predictions = Self::make_predictions(&left_documents, &branches.0).into_iter();
        let mut right_predictions =
            Self::make_predictions(&right_documents, &branches.1).into_iter();

        mask.iter()
            .filter_map(|&routed_left| {
                if routed_left {
                    left_predictions.next()
                } else {
                    right_predictions.next()
                }
            })
            .collect()
    }
}

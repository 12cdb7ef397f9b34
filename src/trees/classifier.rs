//! Decision Tree Classifier
use super::impurity::{class_counts, Impurity};
use super::node::TreeNode;
use super::params::TreeClassifierParams;
use crate::data::dataset::{ColumnKind, Dataset, Number, WholeNumber};
use crate::error::TreeError;
use crate::metrics::confusion::ClassificationMetrics;
use nalgebra::{DMatrix, DVector};

/// The winning candidate of a split search, carrying the two sub-datasets
/// so the builder doesn't have to partition the rows again.
pub struct SplitData<XT: Number, YT: WholeNumber> {
    pub feature_index: usize,
    pub threshold: XT,
    pub true_branch: Dataset<XT, YT>,
    pub false_branch: Dataset<XT, YT>,
    gain: f64,
}

/// CART-style binary decision tree classifier.
///
/// Training exhaustively searches every (feature, threshold) candidate and
/// recursively grows the tree while splits keep reducing the weighted
/// impurity of the labels. Prediction walks a sample from the root to a
/// leaf and returns the leaf's majority label.
#[derive(Clone, Debug)]
pub struct DecisionTreeClassifier<XT: Number, YT: WholeNumber> {
    root: Option<TreeNode<XT, YT>>,
    params: TreeClassifierParams,
    feature_kinds: Vec<ColumnKind>,
}

impl<XT: Number, YT: WholeNumber> Default for DecisionTreeClassifier<XT, YT> {
    /// Creates a new instance of the decision tree classifier with default parameters.
    fn default() -> Self {
        Self::new()
    }
}

impl<XT: Number, YT: WholeNumber> ClassificationMetrics<YT> for DecisionTreeClassifier<XT, YT> {}

impl<XT: Number, YT: WholeNumber> DecisionTreeClassifier<XT, YT> {
    /// Creates a new instance of the decision tree classifier with default parameters.
    pub fn new() -> Self {
        Self {
            root: None,
            params: TreeClassifierParams::new(),
            feature_kinds: Vec::new(),
        }
    }

    /// Creates a new instance of the decision tree classifier with custom parameters.
    ///
    /// # Arguments
    ///
    /// * `criterion` - The impurity criterion, `"entropy"` or `"gini"`.
    /// * `min_samples_split` - The minimum number of samples required to attempt a split.
    /// * `min_impurity` - The impurity gain a split must strictly exceed.
    /// * `max_depth` - The maximum depth of the tree, `None` for unbounded.
    ///
    /// # Errors
    ///
    /// This method will return an error if the criterion name is unknown, the
    /// minimum number of samples to split is below 1, or the minimum impurity
    /// gain is negative or not finite.
    pub fn with_params(
        criterion: Option<&str>,
        min_samples_split: Option<u16>,
        min_impurity: Option<f64>,
        max_depth: Option<u16>,
    ) -> Result<Self, TreeError> {
        let mut tree = Self::new();

        if let Some(criterion) = criterion {
            tree.params.set_criterion(criterion)?;
        }
        if let Some(min_samples_split) = min_samples_split {
            tree.params.set_min_samples_split(min_samples_split)?;
        }
        if let Some(min_impurity) = min_impurity {
            tree.params.set_min_impurity(min_impurity)?;
        }
        tree.params.set_max_depth(max_depth);
        Ok(tree)
    }

    pub fn criterion(&self) -> Impurity {
        self.params.criterion()
    }

    pub fn min_samples_split(&self) -> u16 {
        self.params.min_samples_split()
    }

    pub fn min_impurity(&self) -> f64 {
        self.params.min_impurity()
    }

    pub fn max_depth(&self) -> Option<u16> {
        self.params.max_depth()
    }

    /// Returns the root of the built tree, `None` before the first `fit`.
    pub fn root(&self) -> Option<&TreeNode<XT, YT>> {
        self.root.as_ref()
    }

    /// Builds the decision tree from a dataset.
    ///
    /// Any previously built tree is replaced wholesale on success; a failed
    /// call leaves it untouched.
    ///
    /// # Arguments
    ///
    /// * `dataset` - The dataset containing features and labels.
    ///
    /// # Returns
    ///
    /// A string indicating that the tree was built successfully.
    ///
    /// # Errors
    ///
    /// This method will return an error if the dataset has no samples or if
    /// the number of feature rows differs from the number of labels.
    pub fn fit(&mut self, dataset: &Dataset<XT, YT>) -> Result<String, TreeError> {
        if dataset.x.nrows() == 0 {
            return Err(TreeError::EmptyDataset);
        }
        if dataset.x.nrows() != dataset.y.len() {
            return Err(TreeError::DimensionMismatch(format!(
                "{} feature rows paired with {} labels.",
                dataset.x.nrows(),
                dataset.y.len()
            )));
        }

        self.root = Some(self.build_tree(dataset, 0));
        self.feature_kinds = dataset.column_kinds().to_vec();
        Ok("Finished building the tree.".into())
    }

    /// Predicts the labels for new data.
    ///
    /// # Arguments
    ///
    /// * `prediction_features` - The matrix of features for the new data.
    ///
    /// # Returns
    ///
    /// A vector containing one predicted label per feature row, in row order.
    ///
    /// # Errors
    ///
    /// This method will return an error if the tree wasn't built yet or if
    /// the feature count differs from the training data.
    pub fn predict(&self, prediction_features: &DMatrix<XT>) -> Result<DVector<YT>, TreeError> {
        let root = self.root.as_ref().ok_or(TreeError::NotTrained)?;
        if prediction_features.ncols() != self.feature_kinds.len() {
            return Err(TreeError::DimensionMismatch(format!(
                "Expected {} features per sample, got {}.",
                self.feature_kinds.len(),
                prediction_features.ncols()
            )));
        }

        let predictions: Vec<_> = prediction_features
            .row_iter()
            .map(|row| self.make_prediction(&row.transpose(), root))
            .collect();

        Ok(DVector::from_vec(predictions))
    }

    fn make_prediction(&self, features: &DVector<XT>, node: &TreeNode<XT, YT>) -> YT {
        match node {
            TreeNode::Leaf { value } => *value,
            TreeNode::Split {
                feature_index,
                threshold,
                true_branch,
                false_branch,
            } => {
                let feature_value = features[*feature_index];
                let satisfied = match self.feature_kinds[*feature_index] {
                    ColumnKind::Numeric => feature_value >= *threshold,
                    ColumnKind::Categorical => feature_value == *threshold,
                };
                if satisfied {
                    self.make_prediction(features, true_branch)
                } else {
                    self.make_prediction(features, false_branch)
                }
            }
        }
    }

    fn build_tree(&self, dataset: &Dataset<XT, YT>, current_depth: usize) -> TreeNode<XT, YT> {
        let num_samples = dataset.nrows();
        let depth_allows_split = self
            .max_depth()
            .map_or(true, |max_depth| current_depth < max_depth as usize);

        if num_samples >= self.min_samples_split() as usize && depth_allows_split {
            if let Some(best_split) = self.get_best_split(dataset) {
                if best_split.gain > self.min_impurity() {
                    let true_node = self.build_tree(&best_split.true_branch, current_depth + 1);
                    let false_node = self.build_tree(&best_split.false_branch, current_depth + 1);
                    return TreeNode::split(
                        best_split.feature_index,
                        best_split.threshold,
                        true_node,
                        false_node,
                    );
                }
            }
        }

        TreeNode::leaf(Self::majority_vote(&dataset.y))
    }

    /// Exhaustively evaluates every feature index and every distinct value
    /// of its column as a threshold candidate.
    ///
    /// A candidate is scored only when both subsets are non-empty, and the
    /// best gain starts at 0, so a candidate with gain <= 0 is never
    /// accepted and ties keep the earliest candidate in iteration order
    /// (ascending feature index, ascending threshold).
    fn get_best_split(&self, dataset: &Dataset<XT, YT>) -> Option<SplitData<XT, YT>> {
        let mut best_split: Option<SplitData<XT, YT>> = None;
        let mut best_gain = 0.0;

        for feature_index in 0..dataset.ncols() {
            let mut unique_values: Vec<_> =
                dataset.x.column(feature_index).iter().cloned().collect();
            unique_values.sort_by(|a, b| a.partial_cmp(b).unwrap_or(std::cmp::Ordering::Equal));
            unique_values.dedup();

            for threshold in unique_values {
                let (true_branch, false_branch) = dataset.split_on_feature(feature_index, threshold);

                if true_branch.is_not_empty() && false_branch.is_not_empty() {
                    let gain =
                        self.calculate_impurity_gain(&dataset.y, &true_branch.y, &false_branch.y);

                    if gain > best_gain {
                        best_gain = gain;
                        best_split = Some(SplitData {
                            feature_index,
                            threshold,
                            true_branch,
                            false_branch,
                            gain,
                        });
                    }
                }
            }
        }
        best_split
    }

    /// Reduction in weighted impurity achieved by splitting the parent
    /// labels into the two given subsets.
    fn calculate_impurity_gain(
        &self,
        parent_y: &DVector<YT>,
        true_y: &DVector<YT>,
        false_y: &DVector<YT>,
    ) -> f64 {
        let criterion = self.criterion();
        let num_samples = (true_y.len() + false_y.len()) as f64;

        criterion.measure(parent_y)
            - (true_y.len() as f64 * criterion.measure(true_y)
                + false_y.len() as f64 * criterion.measure(false_y))
                / num_samples
    }

    /// The most frequent label; ties resolve to the smallest label value.
    fn majority_vote(y: &DVector<YT>) -> YT {
        let classes = class_counts(y);

        let mut best = classes[0];
        for &(label, count) in classes.iter().skip(1) {
            if count > best.1 {
                best = (label, count);
            }
        }
        best.0
    }
}

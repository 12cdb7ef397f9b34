use crate::data::dataset::WholeNumber;
use crate::error::TreeError;
use nalgebra::{DMatrix, DVector};
use std::collections::HashSet;

type ConfusionMatrix = DMatrix<usize>;

/// Evaluation metrics for classifiers.
///
/// All methods are provided as defaults, implementors only opt in:
///
/// ```rust
/// use rusty_trees::metrics::confusion::ClassificationMetrics;
/// use nalgebra::DVector;
///
/// struct Stub;
/// impl ClassificationMetrics<u8> for Stub {}
///
/// let y_true = DVector::from_vec(vec![0u8, 1, 1, 0]);
/// let y_pred = DVector::from_vec(vec![0u8, 1, 0, 0]);
/// assert_eq!(Stub.accuracy(&y_true, &y_pred).unwrap(), 0.75);
/// ```
pub trait ClassificationMetrics<T: WholeNumber> {
    /// Computes the confusion matrix of true labels (rows) against
    /// predicted labels (columns). The class axis is sorted ascending over
    /// every label seen in either vector.
    ///
    /// # Errors
    ///
    /// Returns a `DimensionMismatch` error if the vectors differ in length.
    fn confusion_matrix(
        &self,
        y_true: &DVector<T>,
        y_pred: &DVector<T>,
    ) -> Result<ConfusionMatrix, TreeError> {
        let classes = sorted_classes(y_true, y_pred)?;
        let mut matrix = DMatrix::zeros(classes.len(), classes.len());

        for (y_t, y_p) in y_true.iter().zip(y_pred.iter()) {
            let row = classes.iter().position(|c| c == y_t).unwrap();
            let col = classes.iter().position(|c| c == y_p).unwrap();
            matrix[(row, col)] += 1;
        }

        Ok(matrix)
    }

    /// Computes the fraction of predictions equal to their true label.
    ///
    /// # Errors
    ///
    /// Returns a `DimensionMismatch` error if the vectors differ in length.
    fn accuracy(&self, y_true: &DVector<T>, y_pred: &DVector<T>) -> Result<f64, TreeError> {
        check_lengths(y_true, y_pred)?;

        let correct = y_true
            .iter()
            .zip(y_pred.iter())
            .filter(|(y_t, y_p)| y_t == y_p)
            .count();

        Ok(correct as f64 / y_true.len() as f64)
    }

    /// Computes the precision, macro-averaged over the classes. For two
    /// classes this is the precision of the greater class.
    ///
    /// # Errors
    ///
    /// Returns a `DimensionMismatch` error if the vectors differ in length.
    fn precision(&self, y_true: &DVector<T>, y_pred: &DVector<T>) -> Result<f64, TreeError> {
        let matrix = self.confusion_matrix(y_true, y_pred)?;
        let num_classes = matrix.nrows();

        if num_classes == 2 {
            let tp = matrix[(1, 1)];
            let fp = matrix[(0, 1)];
            if tp + fp > 0 {
                return Ok(tp as f64 / (tp + fp) as f64);
            }
        }

        let mut total = 0.0;
        for class in 0..num_classes {
            let tp = matrix[(class, class)];
            let fp = matrix.column(class).sum() - tp;
            if tp + fp > 0 {
                total += tp as f64 / (tp + fp) as f64;
            }
        }
        Ok(total / num_classes as f64)
    }

    /// Computes the recall, macro-averaged over the classes. For two classes
    /// this is the recall of the greater class.
    ///
    /// # Errors
    ///
    /// Returns a `DimensionMismatch` error if the vectors differ in length.
    fn recall(&self, y_true: &DVector<T>, y_pred: &DVector<T>) -> Result<f64, TreeError> {
        let matrix = self.confusion_matrix(y_true, y_pred)?;
        let num_classes = matrix.nrows();

        if num_classes == 2 {
            let tp = matrix[(1, 1)];
            let fn_ = matrix[(1, 0)];
            if tp + fn_ > 0 {
                return Ok(tp as f64 / (tp + fn_) as f64);
            }
        }

        let mut total = 0.0;
        for class in 0..num_classes {
            let tp = matrix[(class, class)];
            let fn_ = matrix.row(class).sum() - tp;
            if tp + fn_ > 0 {
                total += tp as f64 / (tp + fn_) as f64;
            }
        }
        Ok(total / num_classes as f64)
    }

    /// Computes the F1 score, the harmonic mean of precision and recall.
    /// When both are 0 the score is defined as 0.
    ///
    /// # Errors
    ///
    /// Returns a `DimensionMismatch` error if the vectors differ in length.
    fn f1_score(&self, y_true: &DVector<T>, y_pred: &DVector<T>) -> Result<f64, TreeError> {
        let precision = self.precision(y_true, y_pred)?;
        let recall = self.recall(y_true, y_pred)?;

        if precision + recall == 0.0 {
            return Ok(0.0);
        }
        Ok(2.0 * (precision * recall) / (precision + recall))
    }
}

fn check_lengths<T: WholeNumber>(
    y_true: &DVector<T>,
    y_pred: &DVector<T>,
) -> Result<(), TreeError> {
    if y_true.len() != y_pred.len() {
        return Err(TreeError::DimensionMismatch(format!(
            "{} true labels paired with {} predictions.",
            y_true.len(),
            y_pred.len()
        )));
    }
    Ok(())
}

fn sorted_classes<T: WholeNumber>(
    y_true: &DVector<T>,
    y_pred: &DVector<T>,
) -> Result<Vec<T>, TreeError> {
    check_lengths(y_true, y_pred)?;

    let mut classes_set = HashSet::<T>::new();
    classes_set.extend(y_true);
    classes_set.extend(y_pred);

    let mut classes = Vec::from_iter(classes_set);
    classes.sort_by(|a, b| a.partial_cmp(b).unwrap());
    Ok(classes)
}

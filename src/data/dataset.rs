use crate::error::TreeError;
use nalgebra::{DMatrix, DVector};
use num_traits::{FromPrimitive, Num, ToPrimitive};
use rand::seq::SliceRandom;
use rand::{rngs::StdRng, SeedableRng};
use std::cmp::PartialOrd;
use std::fmt::{self, Display};
use std::fmt::{Debug, Formatter};
use std::hash::Hash;
use std::ops::{AddAssign, DivAssign, MulAssign, SubAssign};

pub trait DataValue:
    Debug
    + Clone
    + Copy
    + Num
    + FromPrimitive
    + ToPrimitive
    + AddAssign
    + SubAssign
    + MulAssign
    + DivAssign
    + Send
    + Sync
    + Display
    + 'static
{
}

impl<T> DataValue for T where
    T: Debug
        + Clone
        + Copy
        + Num
        + FromPrimitive
        + ToPrimitive
        + AddAssign
        + SubAssign
        + MulAssign
        + DivAssign
        + Send
        + Sync
        + Display
        + 'static
{
}

pub trait Number: DataValue + PartialOrd {}
impl<T> Number for T where T: DataValue + PartialOrd {}

pub trait WholeNumber: Number + Eq + Hash {}
impl<T> WholeNumber for T where T: Number + Eq + Hash {}

pub trait TargetValue: DataValue {}
impl<T> TargetValue for T where T: DataValue {}

/// How a feature column is compared against a split threshold.
///
/// The comparison mode is fixed once, when the dataset is constructed,
/// instead of being re-derived from the value at every comparison. Numeric
/// columns use an ordered `>=` test, categorical columns an equality test.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum ColumnKind {
    #[default]
    Numeric,
    Categorical,
}

pub struct Dataset<XT: Number, YT: TargetValue> {
    pub x: DMatrix<XT>,
    pub y: DVector<YT>,
    column_kinds: Vec<ColumnKind>,
}

impl<XT: Number, YT: TargetValue> Debug for Dataset<XT, YT> {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "Dataset {{\n    x: [\n")?;

        for i in 0..self.x.nrows() {
            write!(f, "        [")?;
            for j in 0..self.x.ncols() {
                write!(f, "{:?}, ", self.x[(i, j)])?;
            }
            writeln!(f, "],")?;
        }

        write!(f, "    ],\n    y: [")?;
        for i in 0..self.y.len() {
            write!(f, "{:?}, ", self.y[i])?;
        }
        write!(f, "]\n}}")
    }
}

impl<XT: Number, YT: TargetValue> Dataset<XT, YT> {
    /// Creates a dataset in which every feature column is numeric.
    pub fn new(x: DMatrix<XT>, y: DVector<YT>) -> Self {
        let column_kinds = vec![ColumnKind::Numeric; x.ncols()];
        Self { x, y, column_kinds }
    }

    /// Creates a dataset with an explicit comparison mode per feature column.
    ///
    /// # Errors
    ///
    /// Returns a `DimensionMismatch` error if the number of column kinds
    /// differs from the number of feature columns.
    pub fn with_column_kinds(
        x: DMatrix<XT>,
        y: DVector<YT>,
        column_kinds: Vec<ColumnKind>,
    ) -> Result<Self, TreeError> {
        if column_kinds.len() != x.ncols() {
            return Err(TreeError::DimensionMismatch(format!(
                "{} column kinds provided for {} feature columns.",
                column_kinds.len(),
                x.ncols()
            )));
        }
        Ok(Self { x, y, column_kinds })
    }

    pub fn into_parts(&self) -> (&DMatrix<XT>, &DVector<YT>) {
        (&self.x, &self.y)
    }

    pub fn column_kinds(&self) -> &[ColumnKind] {
        &self.column_kinds
    }

    pub fn is_not_empty(&self) -> bool {
        !(self.x.is_empty() || self.y.is_empty())
    }

    pub fn nrows(&self) -> usize {
        self.x.nrows()
    }

    pub fn ncols(&self) -> usize {
        self.x.ncols()
    }

    /// Splits the rows into the subset satisfying the split predicate and
    /// the subset that doesn't, preserving the relative row order.
    ///
    /// Numeric columns send a row into the first subset when its value at
    /// `feature_index` is `>=` the threshold, categorical columns when the
    /// value is `==` the threshold. Every row lands in exactly one subset.
    pub fn split_on_feature(&self, feature_index: usize, threshold: XT) -> (Self, Self) {
        let kind = self.column_kinds[feature_index];
        let (true_indices, false_indices): (Vec<_>, Vec<_>) =
            (0..self.x.nrows()).partition(|&index| match kind {
                ColumnKind::Numeric => self.x[(index, feature_index)] >= threshold,
                ColumnKind::Categorical => self.x[(index, feature_index)] == threshold,
            });

        let true_subset = self.subset_from_indices(&true_indices);
        let false_subset = self.subset_from_indices(&false_indices);

        (true_subset, false_subset)
    }

    fn subset_from_indices(&self, indices: &[usize]) -> Self {
        let rows = indices
            .iter()
            .map(|&index| self.x.row(index))
            .collect::<Vec<_>>();
        let labels = indices
            .iter()
            .map(|&index| self.y[index])
            .collect::<Vec<_>>();

        let x = if rows.is_empty() {
            DMatrix::zeros(0, self.x.ncols())
        } else {
            DMatrix::from_rows(&rows)
        };

        Self {
            x,
            y: DVector::from_vec(labels),
            column_kinds: self.column_kinds.clone(),
        }
    }

    /// Shuffles the rows and splits them into a train and a test dataset.
    ///
    /// # Errors
    ///
    /// Returns an `InvalidConfiguration` error if `train_size` is outside
    /// of `[0.0, 1.0]`.
    pub fn train_test_split(
        &self,
        train_size: f64,
        seed: Option<u64>,
    ) -> Result<(Self, Self), TreeError> {
        if !(0.0..=1.0).contains(&train_size) {
            return Err(TreeError::InvalidConfiguration(
                "Train size should be between 0.0 and 1.0.".to_string(),
            ));
        }
        let mut rng = match seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };

        let mut indices = (0..self.x.nrows()).collect::<Vec<_>>();
        indices.shuffle(&mut rng);
        let train_size = (self.x.nrows() as f64 * train_size).floor() as usize;

        let train_dataset = self.subset_from_indices(&indices[..train_size]);
        let test_dataset = self.subset_from_indices(&indices[train_size..]);

        Ok((train_dataset, test_dataset))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_dataset_new() {
        let x = DMatrix::from_row_slice(2, 2, &[1, 2, 3, 4]);
        let y = DVector::from_vec(vec![5, 6]);
        let dataset = Dataset::new(x.clone(), y.clone());
        assert_eq!(dataset.x, x);
        assert_eq!(dataset.y, y);
        assert_eq!(dataset.column_kinds(), &[ColumnKind::Numeric; 2]);
    }

    #[test]
    fn test_dataset_into_parts() {
        let x = DMatrix::from_row_slice(2, 2, &[1, 2, 3, 4]);
        let y = DVector::from_vec(vec![5, 6]);
        let dataset = Dataset::new(x.clone(), y.clone());
        let (x_parts, y_parts) = dataset.into_parts();
        assert_eq!(x_parts, &x);
        assert_eq!(y_parts, &y);
    }

    #[test]
    fn test_dataset_with_column_kinds_wrong_count() {
        let x = DMatrix::from_row_slice(2, 2, &[1, 2, 3, 4]);
        let y = DVector::from_vec(vec![5, 6]);
        let result = Dataset::with_column_kinds(x, y, vec![ColumnKind::Categorical]);
        assert!(matches!(result, Err(TreeError::DimensionMismatch(_))));
    }

    #[test]
    fn test_dataset_is_not_empty() {
        let x = DMatrix::from_row_slice(2, 2, &[1, 2, 3, 4]);
        let y = DVector::from_vec(vec![5, 6]);
        let dataset = Dataset::new(x, y);
        assert!(dataset.is_not_empty());

        let empty_x = DMatrix::<f64>::from_row_slice(0, 2, &[]);
        let empty_y = DVector::<f64>::from_vec(vec![]);
        let empty_dataset = Dataset::new(empty_x, empty_y);
        assert!(!empty_dataset.is_not_empty());
    }

    #[test]
    fn test_dataset_formatting() {
        let x = DMatrix::from_row_slice(2, 2, &[1, 2, 3, 4]);
        let y = DVector::from_vec(vec![5, 6]);
        let dataset = Dataset::new(x, y);

        let dataset_str = format!("{:?}", dataset);

        let expected_str = "\
Dataset {
    x: [
        [1, 2, ],
        [3, 4, ],
    ],
    y: [5, 6, ]
}";

        assert_eq!(dataset_str, expected_str);
    }

    #[test]
    fn test_dataset_split_on_numeric_feature() {
        let x = DMatrix::from_row_slice(4, 2, &[1, 2, 3, 4, 5, 6, 7, 8]);
        let y = DVector::from_vec(vec![9, 10, 11, 12]);
        let dataset = Dataset::new(x, y);

        let (true_subset, false_subset) = dataset.split_on_feature(0, 5);
        assert_eq!(true_subset.x.nrows(), 2);
        assert_eq!(false_subset.x.nrows(), 2);
        assert_eq!(true_subset.y, DVector::from_vec(vec![11, 12]));
        assert_eq!(false_subset.y, DVector::from_vec(vec![9, 10]));
    }

    #[test]
    fn test_dataset_split_true_side_empty() {
        let x = DMatrix::from_row_slice(4, 2, &[1, 2, 3, 4, 5, 6, 7, 8]);
        let y = DVector::from_vec(vec![9, 10, 11, 12]);
        let dataset = Dataset::new(x, y);

        let (true_subset, false_subset) = dataset.split_on_feature(0, 9);
        assert_eq!(true_subset.x.nrows(), 0);
        assert_eq!(false_subset.x.nrows(), 4);
    }

    #[test]
    fn test_dataset_split_false_side_empty() {
        let x = DMatrix::from_row_slice(4, 2, &[1, 2, 3, 4, 5, 6, 7, 8]);
        let y = DVector::from_vec(vec![9, 10, 11, 12]);
        let dataset = Dataset::new(x, y);

        let (true_subset, false_subset) = dataset.split_on_feature(0, 0);
        assert_eq!(true_subset.x.nrows(), 4);
        assert_eq!(false_subset.x.nrows(), 0);
    }

    #[test]
    fn test_dataset_split_on_categorical_feature() {
        // Column 0 holds category codes, only exact matches go to the true side.
        let x = DMatrix::from_row_slice(4, 2, &[0, 2, 1, 4, 0, 6, 2, 8]);
        let y = DVector::from_vec(vec![9, 10, 11, 12]);
        let dataset =
            Dataset::with_column_kinds(x, y, vec![ColumnKind::Categorical, ColumnKind::Numeric])
                .unwrap();

        let (true_subset, false_subset) = dataset.split_on_feature(0, 0);
        assert_eq!(true_subset.y, DVector::from_vec(vec![9, 11]));
        assert_eq!(false_subset.y, DVector::from_vec(vec![10, 12]));
        assert_eq!(true_subset.column_kinds(), dataset.column_kinds());
    }

    #[test]
    fn test_dataset_split_preserves_row_order() {
        let x = DMatrix::from_row_slice(5, 1, &[5, 1, 4, 2, 3]);
        let y = DVector::from_vec(vec![50, 10, 40, 20, 30]);
        let dataset = Dataset::new(x, y);

        let (true_subset, false_subset) = dataset.split_on_feature(0, 3);
        assert_eq!(true_subset.y, DVector::from_vec(vec![50, 40, 30]));
        assert_eq!(false_subset.y, DVector::from_vec(vec![10, 20]));
    }

    #[test]
    fn test_dataset_train_test_split() {
        let x = DMatrix::from_row_slice(4, 2, &[1, 2, 3, 4, 5, 6, 7, 8]);
        let y = DVector::from_vec(vec![9, 10, 11, 12]);
        let dataset = Dataset::new(x, y);

        let (train_dataset, test_dataset) = dataset.train_test_split(0.75, None).unwrap();
        assert_eq!(train_dataset.x.nrows(), 3);
        assert_eq!(test_dataset.x.nrows(), 1);
    }

    #[test]
    fn test_dataset_train_test_split_invalid_size() {
        let x = DMatrix::from_row_slice(2, 2, &[1, 2, 3, 4]);
        let y = DVector::from_vec(vec![5, 6]);
        let dataset = Dataset::new(x, y);

        let result = dataset.train_test_split(1.5, None);
        assert!(matches!(result, Err(TreeError::InvalidConfiguration(_))));
    }
}

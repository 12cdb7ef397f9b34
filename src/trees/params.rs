use crate::error::TreeError;
use crate::trees::impurity::Impurity;

/// Hyperparameters of the decision tree classifier.
///
/// Every setter validates eagerly, so a constructed parameter set is always
/// consistent and training never fails on configuration.
#[derive(Clone, Debug, PartialEq)]
pub struct TreeClassifierParams {
    pub criterion: Impurity,
    pub min_samples_split: u16,
    pub min_impurity: f64,
    pub max_depth: Option<u16>,
}

impl Default for TreeClassifierParams {
    fn default() -> Self {
        Self::new()
    }
}

impl TreeClassifierParams {
    pub fn new() -> Self {
        Self {
            criterion: Impurity::Entropy,
            min_samples_split: 2,
            min_impurity: 1e-7,
            max_depth: None,
        }
    }

    /// Selects the impurity criterion by name, either `"entropy"` or `"gini"`.
    ///
    /// # Errors
    ///
    /// Returns an `InvalidConfiguration` error for any other name.
    pub fn set_criterion(&mut self, criterion: &str) -> Result<(), TreeError> {
        self.criterion = criterion.parse()?;
        Ok(())
    }

    /// Sets the minimum number of samples required to attempt a split.
    ///
    /// # Errors
    ///
    /// Returns an `InvalidConfiguration` error if the minimum is below 1.
    pub fn set_min_samples_split(&mut self, min_samples_split: u16) -> Result<(), TreeError> {
        if min_samples_split < 1 {
            return Err(TreeError::InvalidConfiguration(
                "The minimum number of samples to split must be at least 1.".to_string(),
            ));
        }
        self.min_samples_split = min_samples_split;
        Ok(())
    }

    /// Sets the impurity gain a split must strictly exceed to be accepted.
    ///
    /// # Errors
    ///
    /// Returns an `InvalidConfiguration` error if the gain threshold is
    /// negative or not finite.
    pub fn set_min_impurity(&mut self, min_impurity: f64) -> Result<(), TreeError> {
        if !min_impurity.is_finite() || min_impurity < 0.0 {
            return Err(TreeError::InvalidConfiguration(
                "The minimum impurity gain must be a finite non-negative number.".to_string(),
            ));
        }
        self.min_impurity = min_impurity;
        Ok(())
    }

    /// Sets the maximum tree depth, `None` leaves the depth unbounded.
    ///
    /// A depth of 0 means the tree never splits and consists of a single
    /// leaf.
    pub fn set_max_depth(&mut self, max_depth: Option<u16>) {
        self.max_depth = max_depth;
    }

    pub fn criterion(&self) -> Impurity {
        self.criterion
    }

    pub fn min_samples_split(&self) -> u16 {
        self.min_samples_split
    }

    pub fn min_impurity(&self) -> f64 {
        self.min_impurity
    }

    pub fn max_depth(&self) -> Option<u16> {
        self.max_depth
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_params() {
        let params = TreeClassifierParams::new();
        assert_eq!(params.criterion(), Impurity::Entropy);
        assert_eq!(params.min_samples_split(), 2);
        assert_eq!(params.min_impurity(), 1e-7);
        assert_eq!(params.max_depth(), None);
    }

    #[test]
    fn test_set_criterion() {
        let mut params = TreeClassifierParams::new();
        params.set_criterion("gini").unwrap();
        assert_eq!(params.criterion(), Impurity::Gini);
    }

    #[test]
    fn test_set_unknown_criterion() {
        let mut params = TreeClassifierParams::new();
        let result = params.set_criterion("chi2");
        assert!(matches!(result, Err(TreeError::InvalidConfiguration(_))));
        assert_eq!(params.criterion(), Impurity::Entropy);
    }

    #[test]
    fn test_set_min_samples_split_out_of_range() {
        let mut params = TreeClassifierParams::new();
        let result = params.set_min_samples_split(0);
        assert!(matches!(result, Err(TreeError::InvalidConfiguration(_))));
    }

    #[test]
    fn test_set_min_impurity_out_of_range() {
        let mut params = TreeClassifierParams::new();
        assert!(params.set_min_impurity(-0.5).is_err());
        assert!(params.set_min_impurity(f64::NAN).is_err());
        assert!(params.set_min_impurity(0.0).is_ok());
    }

    #[test]
    fn test_set_max_depth_zero_is_allowed() {
        let mut params = TreeClassifierParams::new();
        params.set_max_depth(Some(0));
        assert_eq!(params.max_depth(), Some(0));
    }
}

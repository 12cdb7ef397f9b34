//! # Rusty-trees
//!
//! `rusty-trees` provides a from-scratch implementation of a CART-style binary
//! decision tree classifier using Rust. It also contains a dataset container
//! and metrics for evaluating classification performance.
//!
//! ## Getting Started
//!
//! To use `rusty-trees`, add the following to your `Cargo.toml` file:
//!
//! ```toml
//! [dependencies]
//! rusty-trees = "*"
//! ```
//!
//! ## Example Usage
//!
//! As a quick example, here's how you can use `rusty-trees` to train a decision
//! tree classifier on an example dataset:
//!
//! ```rust
//!
//! use rusty_trees::data::dataset::Dataset;
//! use rusty_trees::trees::classifier::DecisionTreeClassifier;
//! use nalgebra::{DMatrix, DVector};
//!
//! let x = DMatrix::from_row_slice(4, 1, &[0.0, 1.0, 2.0, 3.0]);
//! let y = DVector::from_vec(vec![0u8, 0, 1, 1]);
//!
//! let dataset = Dataset::new(x, y);
//!
//! let mut model = DecisionTreeClassifier::new();
//!
//! model.fit(&dataset).unwrap();
//!
//! let test_x = DMatrix::from_row_slice(2, 1, &[0.5, 2.5]);
//!
//! let predictions = model.predict(&test_x).unwrap();
//! assert_eq!(predictions, DVector::from_vec(vec![0u8, 1]));
//! ```

/// Dataset and data manipulation utilities
pub mod data;
/// Error types
pub mod error;
/// Functions for evaluating model performance
pub mod metrics;
/// Decision trees
pub mod trees;

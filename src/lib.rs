//! # Text-trees
//!
//! `text-trees` provides decision trees for text classification whose splits ask
//! "does keyword K appear in this document?" instead of comparing a numeric threshold.
//! Keywords are chosen greedily by minimizing the weighted Gini impurity of the split.
//!
//! ## Getting Started
//!
//! To use `text-trees`, add the following to your `Cargo.toml` file:
//!
//! ```toml
//! [dependencies]
//! text-trees = "*"
//! ```
//!
//! ## Example Usage
//!
//! Here's how you can train a tree that tells spam from regular messages:
//!
//! ```rust
//! use text_trees::data::dataset::TextDataset;
//! use text_trees::trees::classifier::DecisionTextTree;
//! use nalgebra::DVector;
//!
//! let x = vec!["buy now", "hello friend", "buy cheap", "hello world"];
//! let y = DVector::from_vec(vec!["spam", "ham", "spam", "ham"]);
//!
//! let dataset = TextDataset::new(x, y).unwrap();
//!
//! let mut tree = DecisionTextTree::new(["buy", "hello"]);
//!
//! tree.fit(&dataset).unwrap();
//!
//! let predictions = tree.predict(&["buy it", "hello you"]).unwrap();
//! assert_eq!(predictions, DVector::from_vec(vec!["spam", "ham"]));
//! ```

/// Text datasets and the document abstraction
pub mod data;
/// Error type shared across the crate
pub mod error;
/// Gini impurity of label distributions
pub mod impurity;
/// Functions for evaluating model performance
pub mod metrics;
/// Decision text trees
pub mod trees;

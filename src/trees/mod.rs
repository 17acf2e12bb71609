/// Keyword-split decision tree classifier
pub mod classifier;
/// Stump and bag nodes
pub mod node;
/// Tree hyperparameters
pub mod params;

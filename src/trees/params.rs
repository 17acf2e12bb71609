use crate::error::TreeError;
use std::collections::BTreeSet;

pub const DEFAULT_EPSILON: f64 = 1e-7;

#[derive(Clone, Debug)]
pub struct TextTreeParams {
    pub keywords: BTreeSet<String>,
    pub max_depth: Option<u16>,
    pub epsilon: f64,
}

impl Default for TextTreeParams {
    fn default() -> Self {
        Self::new()
    }
}

impl TextTreeParams {
    pub fn new() -> Self {
        Self {
            keywords: BTreeSet::new(),
            max_depth: None,
            epsilon: DEFAULT_EPSILON,
        }
    }

    pub fn set_keywords<I, S>(&mut self, keywords: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.keywords = keywords.into_iter().map(Into::into).collect();
        if self.keywords.is_empty() {
            tracing::warn!("No candidate keywords given, the tree will be a single bag.");
        }
    }

    /// `None` lets the tree grow until the other stopping rules apply.
    pub fn set_max_depth(&mut self, max_depth: Option<u16>) {
        self.max_depth = max_depth;
    }

    pub fn set_epsilon(&mut self, epsilon: f64) -> Result<(), TreeError> {
        if !epsilon.is_finite() || epsilon < 0.0 {
            return Err(TreeError::InvalidParameter(
                "The impurity epsilon must be a finite, non-negative number.".into(),
            ));
        }
        self.epsilon = epsilon;
        Ok(())
    }

    pub fn keywords(&self) -> &BTreeSet<String> {
        &self.keywords
    }

    pub fn max_depth(&self) -> Option<u16> {
        self.max_depth
    }

    pub fn epsilon(&self) -> f64 {
        self.epsilon
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let params = TextTreeParams::default();
        assert!(params.keywords().is_empty());
        assert_eq!(params.max_depth(), None);
        assert_eq!(params.epsilon(), DEFAULT_EPSILON);
    }

    #[test]
    fn test_set_keywords_deduplicates() {
        let mut params = TextTreeParams::new();
        params.set_keywords(["hello", "buy", "hello"]);
        let keywords: Vec<_> = params.keywords().iter().cloned().collect();
        assert_eq!(keywords, vec!["buy", "hello"]);
    }

    #[test]
    fn test_set_epsilon_rejects_invalid() {
        let mut params = TextTreeParams::new();
        assert!(params.set_epsilon(-0.1).is_err());
        assert!(params.set_epsilon(f64::NAN).is_err());
        assert!(params.set_epsilon(0.0).is_ok());
        assert_eq!(params.epsilon(), 0.0);
    }

    #[test]
    fn test_set_max_depth_zero_allowed() {
        let mut params = TextTreeParams::new();
        params.set_max_depth(Some(0));
        assert_eq!(params.max_depth(), Some(0));
    }
}

//! Gini impurity of label distributions.
use nalgebra::DVector;
use std::collections::BTreeMap;

/// Computes the Gini impurity `1 - Σ p_i²` of a label-count distribution.
///
/// # Arguments
///
/// * `counts` - Occurrence count of every distinct label.
///
/// # Panics
///
/// Panics if the counts sum to zero, the distribution is undefined in that case.
pub fn gini_impurity(counts: &[usize]) -> f64 {
    let total: usize = counts.iter().sum();
    assert!(total > 0, "Gini impurity of an empty distribution is undefined.");

    let probabilities = DVector::from_iterator(counts.len(), counts.iter().map(|&c| c as f64))
        .unscale(total as f64);
    1.0 - probabilities.dot(&probabilities)
}

/// Computes the size-weighted Gini impurity of a binary split.
///
/// # Arguments
///
/// * `counts_left` - Label counts of the samples routed left.
/// * `counts_right` - Label counts of the samples routed right.
///
/// # Panics
///
/// Panics if either side is empty.
pub fn gini_split(counts_left: &[usize], counts_right: &[usize]) -> f64 {
    let n_left: usize = counts_left.iter().sum();
    let n_right: usize = counts_right.iter().sum();
    let n = (n_left + n_right) as f64;

    n_left as f64 / n * gini_impurity(counts_left)
        + n_right as f64 / n * gini_impurity(counts_right)
}

/// Distinct labels in ascending order, together with their occurrence counts.
pub fn label_counts<'a, YT, I>(labels: I) -> (Vec<YT>, Vec<usize>)
where
    YT: Ord + Clone + 'a,
    I: IntoIterator<Item = &'a YT>,
{
    let counts = labels.into_iter().fold(BTreeMap::new(), |mut acc, label| {
        *acc.entry(label).or_insert(0) += 1;
        acc
    });
    counts
        .into_iter()
        .map(|(label, count)| (label.clone(), count))
        .unzip()
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_gini_impurity_pure() {
        assert_eq!(gini_impurity(&[5]), 0.0);
    }

    #[test]
    fn test_gini_impurity_balanced() {
        assert_relative_eq!(gini_impurity(&[5, 5]), 0.5, epsilon = 1e-12);
    }

    #[test]
    fn test_gini_impurity_three_classes() {
        assert_relative_eq!(gini_impurity(&[2, 2, 2]), 2.0 / 3.0, epsilon = 1e-12);
        assert_relative_eq!(gini_impurity(&[3, 1]), 0.375, epsilon = 1e-12);
    }

    #[test]
    fn test_gini_impurity_ignores_zero_counts() {
        assert_relative_eq!(gini_impurity(&[4, 0]), 0.0, epsilon = 1e-12);
    }

    #[test]
    #[should_panic]
    fn test_gini_impurity_all_zero() {
        gini_impurity(&[0, 0]);
    }

    #[test]
    fn test_gini_split_pure_sides() {
        assert_relative_eq!(gini_split(&[2], &[3]), 0.0, epsilon = 1e-12);
    }

    #[test]
    fn test_gini_split_weighted() {
        // 4/6 * 0.5 + 2/6 * 0.0
        assert_relative_eq!(gini_split(&[2, 2], &[2]), 1.0 / 3.0, epsilon = 1e-12);
    }

    #[test]
    fn test_gini_split_symmetric() {
        let left = [3, 1, 2];
        let right = [1, 4];
        assert_relative_eq!(
            gini_split(&left, &right),
            gini_split(&right, &left),
            epsilon = 1e-12
        );
    }

    #[test]
    fn test_label_counts_sorted() {
        let labels = vec!["spam", "ham", "spam", "eggs", "spam"];
        let (values, counts) = label_counts(&labels);
        assert_eq!(values, vec!["eggs", "ham", "spam"]);
        assert_eq!(counts, vec![1, 1, 3]);
    }
}

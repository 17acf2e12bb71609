use crate::error::TreeError;
use nalgebra::{DVector, Scalar};
use rand::seq::SliceRandom;
use rand::{rngs::StdRng, SeedableRng};
use std::collections::{BTreeSet, HashSet};
use std::fmt::{self, Debug, Formatter};
use std::hash::{BuildHasher, Hash};

/// A text-like value that can answer "does keyword K appear in it?".
///
/// Raw strings use substring containment, token collections use membership.
pub trait Document {
    fn contains_keyword(&self, keyword: &str) -> bool;
}

impl Document for str {
    fn contains_keyword(&self, keyword: &str) -> bool {
        self.contains(keyword)
    }
}

impl Document for String {
    fn contains_keyword(&self, keyword: &str) -> bool {
        self.as_str().contains(keyword)
    }
}

impl<T: Document + ?Sized> Document for &T {
    fn contains_keyword(&self, keyword: &str) -> bool {
        (**self).contains_keyword(keyword)
    }
}

impl Document for Vec<String> {
    fn contains_keyword(&self, keyword: &str) -> bool {
        self.iter().any(|token| token == keyword)
    }
}

impl<S: BuildHasher> Document for HashSet<String, S> {
    fn contains_keyword(&self, keyword: &str) -> bool {
        self.contains(keyword)
    }
}

impl Document for BTreeSet<String> {
    fn contains_keyword(&self, keyword: &str) -> bool {
        self.contains(keyword)
    }
}

pub trait TargetLabel: Scalar + Ord + Hash + Send + Sync {}
impl<T> TargetLabel for T where T: Scalar + Ord + Hash + Send + Sync {}

/// Documents paired with their labels.
pub struct TextDataset<D, YT: TargetLabel> {
    pub x: Vec<D>,
    pub y: DVector<YT>,
}

impl<D: Debug, YT: TargetLabel> Debug for TextDataset<D, YT> {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "TextDataset {{\n    x: [\n")?;

        for document in &self.x {
            writeln!(f, "        {:?},", document)?;
        }

        write!(f, "    ],\n    y: [")?;
        for label in self.y.iter() {
            write!(f, "{:?}, ", label)?;
        }
        write!(f, "]\n}}")
    }
}

impl<D, YT: TargetLabel> TextDataset<D, YT> {
    /// Creates a dataset, checking that every document has a label.
    pub fn new(x: Vec<D>, y: DVector<YT>) -> Result<Self, TreeError> {
        if x.len() != y.len() {
            return Err(TreeError::InvalidInput(format!(
                "Got {} documents but {} labels.",
                x.len(),
                y.len()
            )));
        }
        Ok(Self { x, y })
    }

    pub fn into_parts(&self) -> (&[D], &DVector<YT>) {
        (&self.x, &self.y)
    }

    pub fn is_not_empty(&self) -> bool {
        !(self.x.is_empty() || self.y.is_empty())
    }

    pub fn nrows(&self) -> usize {
        self.x.len()
    }

    /// Borrows the documents so the dataset can be split without cloning them.
    pub fn view(&self) -> TextDataset<&D, YT> {
        TextDataset {
            x: self.x.iter().collect(),
            y: self.y.clone(),
        }
    }

    pub fn keyword_mask(&self, keyword: &str) -> Vec<bool>
    where
        D: Document,
    {
        self.x
            .iter()
            .map(|document| document.contains_keyword(keyword))
            .collect()
    }

    /// Splits the dataset into the rows where `mask` is true and the rest.
    pub fn split_on_mask(&self, mask: &[bool]) -> (Self, Self)
    where
        D: Clone,
    {
        let (left_indices, right_indices): (Vec<usize>, Vec<usize>) =
            (0..self.nrows()).partition(|&index| mask[index]);

        (self.select(&left_indices), self.select(&right_indices))
    }

    pub fn split_on_keyword(&self, keyword: &str) -> (Self, Self)
    where
        D: Document + Clone,
    {
        self.split_on_mask(&self.keyword_mask(keyword))
    }

    pub fn train_test_split(
        &self,
        train_size: f64,
        seed: Option<u64>,
    ) -> Result<(Self, Self), TreeError>
    where
        D: Clone,
    {
        if !(0.0..=1.0).contains(&train_size) {
            return Err(TreeError::InvalidInput(
                "Train size should be between 0.0 and 1.0".into(),
            ));
        }
        let mut rng = match seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };

        let mut indices = (0..self.nrows()).collect::<Vec<_>>();
        indices.shuffle(&mut rng);
        let train_size = (self.nrows() as f64 * train_size).floor() as usize;

        Ok((
            self.select(&indices[..train_size]),
            self.select(&indices[train_size..]),
        ))
    }

    fn select(&self, indices: &[usize]) -> Self
    where
        D: Clone,
    {
        Self {
            x: indices.iter().map(|&index| self.x[index].clone()).collect(),
            y: DVector::from_iterator(
                indices.len(),
                indices.iter().map(|&index| self.y[index].clone()),
            ),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn spam_dataset() -> TextDataset<&'static str, &'static str> {
        TextDataset::new(
            vec!["buy now", "hello friend", "buy cheap", "hello world"],
            DVector::from_vec(vec!["spam", "ham", "spam", "ham"]),
        )
        .unwrap()
    }

    #[test]
    fn test_document_substring() {
        assert!("buy cheap pills".contains_keyword("cheap"));
        assert!(String::from("hello world").contains_keyword("lo wo"));
        assert!(!"hello".contains_keyword("buy"));
    }

    #[test]
    fn test_document_token_membership() {
        let tokens = vec!["buy".to_string(), "now".to_string()];
        assert!(tokens.contains_keyword("buy"));
        assert!(!tokens.contains_keyword("bu"));

        let set: HashSet<String> = tokens.iter().cloned().collect();
        assert!(set.contains_keyword("now"));

        let ordered: BTreeSet<String> = tokens.into_iter().collect();
        assert!(!ordered.contains_keyword("later"));
    }

    #[test]
    fn test_dataset_length_mismatch() {
        let result = TextDataset::new(vec!["a", "b"], DVector::from_vec(vec![1]));
        assert!(matches!(result, Err(TreeError::InvalidInput(_))));
    }

    #[test]
    fn test_dataset_into_parts() {
        let dataset = spam_dataset();
        let (x, y) = dataset.into_parts();
        assert_eq!(x.len(), 4);
        assert_eq!(y[1], "ham");
    }

    #[test]
    fn test_dataset_formatting() {
        let dataset = TextDataset::new(vec!["a b", "c"], DVector::from_vec(vec![1, 2])).unwrap();

        let expected_str = "\
TextDataset {
    x: [
        \"a b\",
        \"c\",
    ],
    y: [1, 2, ]
}";
        assert_eq!(format!("{:?}", dataset), expected_str);
    }

    #[test]
    fn test_dataset_is_not_empty() {
        assert!(spam_dataset().is_not_empty());

        let empty: TextDataset<String, u8> =
            TextDataset::new(vec![], DVector::from_vec(vec![])).unwrap();
        assert!(!empty.is_not_empty());
    }

    #[test]
    fn test_dataset_split_on_keyword() {
        let dataset = spam_dataset();
        let (left, right) = dataset.split_on_keyword("buy");
        assert_eq!(left.x, vec!["buy now", "buy cheap"]);
        assert_eq!(left.y, DVector::from_vec(vec!["spam", "spam"]));
        assert_eq!(right.x, vec!["hello friend", "hello world"]);
        assert_eq!(right.y, DVector::from_vec(vec!["ham", "ham"]));
    }

    #[test]
    fn test_dataset_split_on_keyword_one_side_empty() {
        let dataset = spam_dataset();
        let (left, right) = dataset.split_on_keyword("zebra");
        assert_eq!(left.nrows(), 0);
        assert_eq!(right.nrows(), 4);
    }

    #[test]
    fn test_dataset_view() {
        let dataset = spam_dataset();
        let view = dataset.view();
        assert_eq!(view.keyword_mask("hello"), vec![false, true, false, true]);
        assert_eq!(view.y, dataset.y);
    }

    #[test]
    fn test_dataset_train_test_split() {
        let dataset = spam_dataset();
        let (train, test) = dataset.train_test_split(0.75, Some(42)).unwrap();
        assert_eq!(train.nrows(), 3);
        assert_eq!(test.nrows(), 1);
        assert!(dataset.train_test_split(1.5, None).is_err());
    }
}

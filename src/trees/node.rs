use crate::data::dataset::{Document, TargetLabel, TextDataset};
use crate::impurity::{gini_impurity, gini_split, label_counts};
use rayon::prelude::*;
use std::cmp::Ordering;
use std::collections::BTreeSet;
use std::fmt::{self, Display, Formatter};

/// Kind of node the owning tree asks for before fitting.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum NodeKind {
    Stump,
    Bag,
}

/// Splits documents on the presence of a single keyword.
#[derive(Clone, Debug, PartialEq)]
pub struct Stump {
    keyword: String,
}

impl Stump {
    pub fn keyword(&self) -> &str {
        &self.keyword
    }

    /// `true` for every document containing the keyword (routed left).
    pub fn route_mask<D: Document>(&self, documents: &[D]) -> Vec<bool> {
        documents
            .iter()
            .map(|document| document.contains_keyword(&self.keyword))
            .collect()
    }
}

/// Empirical label distribution of the samples that reached a leaf.
#[derive(Clone, Debug, PartialEq)]
pub struct Bag<YT: TargetLabel> {
    label_values: Vec<YT>,
    label_probabilities: Vec<f64>,
}

impl<YT: TargetLabel> Bag<YT> {
    fn from_labels<'a, I>(labels: I) -> Self
    where
        I: IntoIterator<Item = &'a YT>,
    {
        let (label_values, counts) = label_counts(labels);
        let total: usize = counts.iter().sum();
        let label_probabilities = counts
            .into_iter()
            .map(|count| count as f64 / total as f64)
            .collect();

        Self {
            label_values,
            label_probabilities,
        }
    }

    pub fn label_values(&self) -> &[YT] {
        &self.label_values
    }

    pub fn label_probabilities(&self) -> &[f64] {
        &self.label_probabilities
    }

    /// Most frequent label, the first one in stored order on ties.
    pub fn majority(&self) -> &YT {
        let mut best = 0;
        for (index, &probability) in self.label_probabilities.iter().enumerate().skip(1) {
            if probability > self.label_probabilities[best] {
                best = index;
            }
        }
        &self.label_values[best]
    }

    pub fn predict(&self, num_documents: usize) -> Vec<YT> {
        vec![self.majority().clone(); num_documents]
    }
}

/// A fitted decision unit: either a keyword test or a leaf distribution.
#[derive(Clone, Debug, PartialEq)]
pub enum TextNode<YT: TargetLabel> {
    Stump(Stump),
    Bag(Bag<YT>),
}

impl<YT: TargetLabel> TextNode<YT> {
    /// Fits a node of the requested kind on a non-empty dataset.
    ///
    /// A requested stump falls back to a bag when the labels are already purer
    /// than `epsilon`, or when no keyword splits the documents into two
    /// non-empty groups.
    pub fn fit<D>(
        kind: NodeKind,
        keywords: &BTreeSet<String>,
        dataset: &TextDataset<D, YT>,
        epsilon: f64,
    ) -> Self
    where
        D: Document + Sync,
    {
        if kind == NodeKind::Stump {
            let (_, counts) = label_counts(dataset.y.iter());
            let impurity = gini_impurity(&counts);

            if impurity < epsilon {
                tracing::debug!(impurity, epsilon, "Node is pure enough, making a bag.");
            } else if let Some(keyword) = Self::best_keyword(keywords, dataset) {
                return TextNode::Stump(Stump { keyword });
            } else {
                tracing::debug!(
                    samples = dataset.nrows(),
                    "No keyword splits the samples, making a bag."
                );
            }
        }

        TextNode::Bag(Bag::from_labels(dataset.y.iter()))
    }

    /// Keyword with the lowest split impurity, the first in sorted order on ties.
    fn best_keyword<D>(keywords: &BTreeSet<String>, dataset: &TextDataset<D, YT>) -> Option<String>
    where
        D: Document + Sync,
    {
        let candidates: Vec<&String> = keywords.iter().collect();

        let best = candidates
            .par_iter()
            .enumerate()
            .filter_map(|(index, keyword)| {
                Self::keyword_split_impurity(keyword, dataset).map(|impurity| (index, impurity))
            })
            .filter(|&(_, impurity)| impurity < 1.0)
            .min_by(|a, b| {
                a.1.partial_cmp(&b.1)
                    .unwrap_or(Ordering::Equal)
                    .then(a.0.cmp(&b.0))
            });

        best.map(|(index, impurity)| {
            tracing::debug!(keyword = %candidates[index], impurity, "Selected split keyword.");
            candidates[index].clone()
        })
    }

    /// `None` when the keyword leaves one side of the split empty.
    fn keyword_split_impurity<D: Document>(
        keyword: &str,
        dataset: &TextDataset<D, YT>,
    ) -> Option<f64> {
        let mask = dataset.keyword_mask(keyword);
        if mask.iter().all(|&m| m) || mask.iter().all(|&m| !m) {
            return None;
        }

        let side_counts = |side: bool| {
            let labels = dataset
                .y
                .iter()
                .zip(&mask)
                .filter(move |&(_, &m)| m == side)
                .map(|(label, _)| label);
            label_counts(labels).1
        };

        Some(gini_split(&side_counts(true), &side_counts(false)))
    }

    pub fn kind(&self) -> NodeKind {
        match self {
            TextNode::Stump(_) => NodeKind::Stump,
            TextNode::Bag(_) => NodeKind::Bag,
        }
    }

    /// Renders the node with every line prefixed by `indent`.
    pub fn pretty(&self, indent: &str) -> String {
        match self {
            TextNode::Stump(stump) => {
                format!("{indent}Stump [\n{indent}  keyword={:?}\n{indent}]", stump.keyword)
            }
            TextNode::Bag(bag) => format!(
                "{indent}Bag [\n{indent}  {:?},\n{indent}  {:?}\n{indent}]",
                bag.label_values, bag.label_probabilities
            ),
        }
    }
}

impl<YT: TargetLabel> Display for TextNode<YT> {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.pretty(""))
    }
}

use std::collections::BTreeSet;

use nalgebra::{DMatrix, DVector};

use crate::{data::dataset::TargetLabel, error::TreeError};

type ConfusionMatrix = DMatrix<usize>;

/// Evaluation helpers for classifiers. Classes are ordered ascending, so for
/// two classes the greater label is the positive one.
pub trait ClassificationMetrics<T: TargetLabel> {
    /// Computes the confusion matrix, rows are true classes and columns predicted ones.
    ///
    /// # Errors
    ///
    /// Returns an error if the label vectors have different lengths.
    fn confusion_matrix(
        &self,
        y_true: &DVector<T>,
        y_pred: &DVector<T>,
    ) -> Result<ConfusionMatrix, TreeError> {
        if y_true.len() != y_pred.len() {
            return Err(TreeError::InvalidInput(
                "Predictions and labels are of different sizes.".into(),
            ));
        }

        let classes: Vec<&T> = y_true
            .iter()
            .chain(y_pred.iter())
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect();
        let class_index = |label: &T| classes.binary_search(&label).unwrap_or_default();

        let mut matrix = DMatrix::zeros(classes.len(), classes.len());
        for (y_t, y_p) in y_true.iter().zip(y_pred.iter()) {
            matrix[(class_index(y_t), class_index(y_p))] += 1;
        }

        Ok(matrix)
    }

    /// Fraction of labels predicted correctly.
    fn accuracy(&self, y_true: &DVector<T>, y_pred: &DVector<T>) -> Result<f64, TreeError> {
        let matrix = self.confusion_matrix(y_true, y_pred)?;
        let correct: usize = matrix.diagonal().iter().sum();

        Ok(correct as f64 / y_true.len() as f64)
    }

    /// Precision of the positive class for binary problems, macro-averaged otherwise.
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

        let precision_total: f64 = (0..num_classes)
            .filter_map(|class| {
                let tp = matrix[(class, class)];
                let predicted = matrix.column(class).sum();
                (predicted > 0).then(|| tp as f64 / predicted as f64)
            })
            .sum();

        Ok(precision_total / num_classes as f64)
    }

    /// Recall of the positive class for binary problems, macro-averaged otherwise.
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

        let recall_total: f64 = (0..num_classes)
            .filter_map(|class| {
                let tp = matrix[(class, class)];
                let actual = matrix.row(class).sum();
                (actual > 0).then(|| tp as f64 / actual as f64)
            })
            .sum();

        Ok(recall_total / num_classes as f64)
    }

    /// Harmonic mean of precision and recall.
    ///
    /// # Errors
    ///
    /// Returns an error if both precision and recall are 0.
    fn f1_score(&self, y_true: &DVector<T>, y_pred: &DVector<T>) -> Result<f64, TreeError> {
        let precision = self.precision(y_true, y_pred)?;
        let recall = self.recall(y_true, y_pred)?;

        match (precision + recall).abs() < f64::EPSILON {
            true => Err(TreeError::InvalidInput(
                "Precision and recall are both 0, F1 score undefined.".into(),
            )),
            false => Ok(2.0 * (precision * recall) / (precision + recall)),
        }
    }
}

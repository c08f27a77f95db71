//! Gaussian Naive Bayes over the four matchup features
//! (slot-A win/loss score, slot-B win/loss score).

use std::f64::consts::PI;

use ndarray::{Array1, Array2, Axis};

use crate::error::RankError;

pub const FEATURES: usize = 4;

// Variance floor, relative to the widest feature.
const VAR_SMOOTHING: f64 = 1e-9;

#[derive(Debug, Default)]
pub struct TrainingSet {
    features: Vec<[f64; FEATURES]>,
    labels: Vec<usize>,
}

impl TrainingSet {
    pub fn push(&mut self, features: [f64; FEATURES], label: usize) {
        debug_assert!(label <= 1);
        self.features.push(features);
        self.labels.push(label);
    }

    pub fn len(&self) -> usize {
        self.labels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }

    pub fn examples(&self) -> impl Iterator<Item = (&[f64; FEATURES], usize)> {
        self.features.iter().zip(self.labels.iter().copied())
    }

    fn to_matrix(&self) -> Array2<f64> {
        let mut matrix = Array2::zeros((self.len(), FEATURES));
        for (i, row) in self.features.iter().enumerate() {
            for (j, value) in row.iter().enumerate() {
                matrix[[i, j]] = *value;
            }
        }
        matrix
    }
}

/// Binary classifier with per-class feature means and variances. Fitting is
/// one pass of moment estimation, prediction a log-likelihood comparison.
#[derive(Debug)]
pub struct GaussianNb {
    priors: [f64; 2],
    means: Array2<f64>,
    variances: Array2<f64>,
}

impl GaussianNb {
    pub fn fit(set: &TrainingSet) -> Result<Self, RankError> {
        if set.is_empty() {
            return Err(RankError::DegenerateTraining("no examples".into()));
        }

        let matrix = set.to_matrix();
        let mut class_rows: [Vec<usize>; 2] = [Vec::new(), Vec::new()];
        for (i, &label) in set.labels.iter().enumerate() {
            class_rows[label].push(i);
        }
        if class_rows[0].is_empty() || class_rows[1].is_empty() {
            return Err(RankError::DegenerateTraining(
                "all examples carry the same label".into(),
            ));
        }

        let total_var = matrix.var_axis(Axis(0), 0.0);
        let epsilon = (VAR_SMOOTHING * total_var.iter().cloned().fold(0.0, f64::max)).max(1e-12);

        let mut priors = [0.0; 2];
        let mut means = Array2::zeros((2, FEATURES));
        let mut variances = Array2::zeros((2, FEATURES));

        for (class, rows) in class_rows.iter().enumerate() {
            let class_matrix = matrix.select(Axis(0), rows);
            let mean: Array1<f64> = class_matrix.mean_axis(Axis(0)).ok_or_else(|| {
                RankError::DegenerateTraining("empty class after split".into())
            })?;
            let variance = class_matrix.var_axis(Axis(0), 0.0) + epsilon;

            priors[class] = rows.len() as f64 / set.len() as f64;
            means.row_mut(class).assign(&mean);
            variances.row_mut(class).assign(&variance);
        }

        Ok(Self {
            priors,
            means,
            variances,
        })
    }

    /// Returns (P(label = 0), P(label = 1)) for one feature vector.
    pub fn predict_probability(&self, features: &[f64; FEATURES]) -> (f64, f64) {
        let mut log_joint = [0.0f64; 2];
        for class in 0..2 {
            let mut lp = self.priors[class].ln();
            for (j, &x) in features.iter().enumerate() {
                let mean = self.means[[class, j]];
                let variance = self.variances[[class, j]];
                lp += -0.5 * (2.0 * PI * variance).ln() - (x - mean).powi(2) / (2.0 * variance);
            }
            log_joint[class] = lp;
        }

        let peak = log_joint[0].max(log_joint[1]);
        let e0 = (log_joint[0] - peak).exp();
        let e1 = (log_joint[1] - peak).exp();
        (e0 / (e0 + e1), e1 / (e0 + e1))
    }
}

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::data_handling::split_fraction_problem;

/// Candidate classifier families, in selection order.
#[derive(Deserialize, Serialize, Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum CandidateKind {
    #[serde(alias = "logistic")]
    LogisticRegression,
    #[serde(alias = "tree")]
    DecisionTree,
    #[serde(alias = "knn")]
    KNearestNeighbors,
    #[serde(alias = "svm")]
    SupportVectorMachine,
    #[serde(alias = "gaussian_nb")]
    NaiveBayes,
    RandomForest,
    ExtraTrees,
}

impl CandidateKind {
    /// Every candidate in the order ties are broken.
    pub const ALL: [CandidateKind; 7] = [
        CandidateKind::LogisticRegression,
        CandidateKind::DecisionTree,
        CandidateKind::KNearestNeighbors,
        CandidateKind::SupportVectorMachine,
        CandidateKind::NaiveBayes,
        CandidateKind::RandomForest,
        CandidateKind::ExtraTrees,
    ];

    pub fn display_name(&self) -> &'static str {
        match self {
            CandidateKind::LogisticRegression => "Logistic Regression",
            CandidateKind::DecisionTree => "Decision Tree",
            CandidateKind::KNearestNeighbors => "K-Nearest Neighbors",
            CandidateKind::SupportVectorMachine => "Support Vector Machine",
            CandidateKind::NaiveBayes => "Naive Bayes",
            CandidateKind::RandomForest => "Random Forest",
            CandidateKind::ExtraTrees => "Extra Trees",
        }
    }
}

impl fmt::Display for CandidateKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.display_name())
    }
}

impl FromStr for CandidateKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().replace(['-', ' '], "_").as_str() {
            "logistic_regression" | "logistic" => Ok(CandidateKind::LogisticRegression),
            "decision_tree" | "tree" => Ok(CandidateKind::DecisionTree),
            "k_nearest_neighbors" | "knn" => Ok(CandidateKind::KNearestNeighbors),
            "support_vector_machine" | "svm" => Ok(CandidateKind::SupportVectorMachine),
            "naive_bayes" | "gaussian_nb" => Ok(CandidateKind::NaiveBayes),
            "random_forest" => Ok(CandidateKind::RandomForest),
            "extra_trees" => Ok(CandidateKind::ExtraTrees),
            _ => Err(format!(
                "Unknown candidate: {}. Valid options are: logistic_regression, decision_tree, \
                 knn, svm, naive_bayes, random_forest, extra_trees",
                s
            )),
        }
    }
}

/// Parameters of the outlier-removal / split / selection pipeline.
#[derive(Deserialize, Serialize, Debug, Clone, PartialEq)]
#[serde(default)]
pub struct TrainingConfig {
    /// Seed for the partition shuffle and the tree ensembles.
    pub seed: u64,
    /// Rows with any |z| above this are dropped before training.
    pub outlier_z_threshold: f64,
    pub validation_fraction: f64,
    pub test_fraction: f64,
    pub candidates: Vec<CandidateKind>,
}

impl Default for TrainingConfig {
    fn default() -> Self {
        Self {
            seed: 42,
            outlier_z_threshold: 3.0,
            validation_fraction: 0.15,
            test_fraction: 0.15,
            candidates: CandidateKind::ALL.to_vec(),
        }
    }
}

impl TrainingConfig {
    pub fn with_candidates(mut self, candidates: Vec<CandidateKind>) -> Self {
        self.candidates = candidates;
        self
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    /// Reject fractions that cannot leave a training partition.
    pub fn validate(&self) -> Result<(), String> {
        if let Some(problem) = split_fraction_problem(self.validation_fraction, self.test_fraction) {
            return Err(problem.to_string());
        }
        if !(self.outlier_z_threshold > 0.0) {
            return Err("outlier_z_threshold must be positive".to_string());
        }
        if self.candidates.is_empty() {
            return Err("at least one candidate is required".to_string());
        }
        Ok(())
    }
}

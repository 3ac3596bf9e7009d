pub mod classifier_trait;
pub mod decision_tree;
pub mod factory;
pub mod forest;
pub mod knn;
pub mod logistic;
pub mod naive_bayes;
mod randomized_tree;
pub mod svm;

use std::fmt;

use ndarray::{Array1, Array2};
use serde::{Deserialize, Serialize};

use crate::config::CandidateKind;
use crate::error::Result;
use classifier_trait::ClassifierModel;
use decision_tree::DecisionTreeClassifier;
use forest::{ExtraTreesClassifier, RandomForestClassifier};
use knn::KNNClassifier;
use logistic::LogisticClassifier;
use naive_bayes::GaussianNBClassifier;
use svm::SVMClassifier;

/// Any of the candidate models, in a form that can be written to disk.
///
/// Serialized as `{"kind": "<candidate>", "model": {...}}`.
#[derive(Serialize, Deserialize)]
#[serde(tag = "kind", content = "model", rename_all = "snake_case")]
pub enum Classifier {
    LogisticRegression(LogisticClassifier),
    DecisionTree(DecisionTreeClassifier),
    KNearestNeighbors(KNNClassifier),
    SupportVectorMachine(SVMClassifier),
    NaiveBayes(GaussianNBClassifier),
    RandomForest(RandomForestClassifier),
    ExtraTrees(ExtraTreesClassifier),
}

impl Classifier {
    pub fn kind(&self) -> CandidateKind {
        match self {
            Classifier::LogisticRegression(_) => CandidateKind::LogisticRegression,
            Classifier::DecisionTree(_) => CandidateKind::DecisionTree,
            Classifier::KNearestNeighbors(_) => CandidateKind::KNearestNeighbors,
            Classifier::SupportVectorMachine(_) => CandidateKind::SupportVectorMachine,
            Classifier::NaiveBayes(_) => CandidateKind::NaiveBayes,
            Classifier::RandomForest(_) => CandidateKind::RandomForest,
            Classifier::ExtraTrees(_) => CandidateKind::ExtraTrees,
        }
    }

    pub fn as_model(&self) -> &dyn ClassifierModel {
        match self {
            Classifier::LogisticRegression(m) => m,
            Classifier::DecisionTree(m) => m,
            Classifier::KNearestNeighbors(m) => m,
            Classifier::SupportVectorMachine(m) => m,
            Classifier::NaiveBayes(m) => m,
            Classifier::RandomForest(m) => m,
            Classifier::ExtraTrees(m) => m,
        }
    }

    pub fn as_model_mut(&mut self) -> &mut dyn ClassifierModel {
        match self {
            Classifier::LogisticRegression(m) => m,
            Classifier::DecisionTree(m) => m,
            Classifier::KNearestNeighbors(m) => m,
            Classifier::SupportVectorMachine(m) => m,
            Classifier::NaiveBayes(m) => m,
            Classifier::RandomForest(m) => m,
            Classifier::ExtraTrees(m) => m,
        }
    }
}

impl ClassifierModel for Classifier {
    fn fit(&mut self, x: &Array2<f64>, y: &Array1<bool>) -> Result<()> {
        self.as_model_mut().fit(x, y)
    }

    fn predict_proba(&self, x: &Array2<f64>) -> Result<Array1<f64>> {
        self.as_model().predict_proba(x)
    }

    fn name(&self) -> &str {
        self.kind().display_name()
    }
}

impl fmt::Debug for Classifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Classifier").field(&self.kind()).finish()
    }
}

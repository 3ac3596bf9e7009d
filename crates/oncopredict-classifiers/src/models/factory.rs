use crate::config::CandidateKind;
use crate::models::decision_tree::DecisionTreeClassifier;
use crate::models::forest::{ExtraTreesClassifier, RandomForestClassifier, DEFAULT_N_TREES};
use crate::models::knn::KNNClassifier;
use crate::models::logistic::LogisticClassifier;
use crate::models::naive_bayes::GaussianNBClassifier;
use crate::models::svm::SVMClassifier;
use crate::models::Classifier;

/// Build an unfitted candidate with its default hyperparameters.
/// `seed` only affects the randomized ensembles.
pub fn build_model(kind: CandidateKind, seed: u64) -> Classifier {
    match kind {
        CandidateKind::LogisticRegression => {
            Classifier::LogisticRegression(LogisticClassifier::default())
        }
        CandidateKind::DecisionTree => Classifier::DecisionTree(DecisionTreeClassifier::new()),
        CandidateKind::KNearestNeighbors => Classifier::KNearestNeighbors(KNNClassifier::default()),
        CandidateKind::SupportVectorMachine => {
            Classifier::SupportVectorMachine(SVMClassifier::default())
        }
        CandidateKind::NaiveBayes => Classifier::NaiveBayes(GaussianNBClassifier::default()),
        CandidateKind::RandomForest => {
            Classifier::RandomForest(RandomForestClassifier::new(DEFAULT_N_TREES, seed))
        }
        CandidateKind::ExtraTrees => {
            Classifier::ExtraTrees(ExtraTreesClassifier::new(DEFAULT_N_TREES, seed))
        }
    }
}

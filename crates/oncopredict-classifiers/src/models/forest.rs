use ndarray::{Array1, Array2, Axis};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use rayon::prelude::*;
use serde::{Deserialize, Serialize};

use crate::error::{ClassifierError, Result};
use crate::models::classifier_trait::ClassifierModel;
use crate::models::randomized_tree::{RandomizedTree, SplitStrategy};

pub const DEFAULT_N_TREES: usize = 100;

/// Bagged ensemble of randomized Gini trees.
///
/// Each tree gets its own `StdRng` seeded from a sequence drawn up front, so
/// the fitted forest does not depend on rayon's scheduling.
#[derive(Debug, Clone, Serialize, Deserialize)]
struct TreeEnsemble {
    n_trees: usize,
    seed: u64,
    bootstrap: bool,
    strategy: SplitStrategy,
    n_features: usize,
    trees: Vec<RandomizedTree>,
}

impl TreeEnsemble {
    fn new(n_trees: usize, seed: u64, bootstrap: bool, strategy: SplitStrategy) -> Self {
        TreeEnsemble {
            n_trees: n_trees.max(1),
            seed,
            bootstrap,
            strategy,
            n_features: 0,
            trees: Vec::new(),
        }
    }

    fn fit(&mut self, name: &str, x: &Array2<f64>, y: &Array1<bool>) -> Result<()> {
        let n = x.nrows();
        if n == 0 || x.ncols() == 0 {
            return Err(ClassifierError::training(name, "empty training partition"));
        }
        let y: Vec<bool> = y.to_vec();
        let max_features = ((x.ncols() as f64).sqrt().floor() as usize).max(1);

        let mut seeder = StdRng::seed_from_u64(self.seed);
        let tree_seeds: Vec<u64> = (0..self.n_trees).map(|_| seeder.gen()).collect();

        let bootstrap = self.bootstrap;
        let strategy = self.strategy;
        self.trees = tree_seeds
            .into_par_iter()
            .map(|tree_seed| {
                let mut rng = StdRng::seed_from_u64(tree_seed);
                let samples: Vec<usize> = if bootstrap {
                    (0..n).map(|_| rng.gen_range(0..n)).collect()
                } else {
                    (0..n).collect()
                };
                RandomizedTree::fit(x, &y, samples, max_features, strategy, rng)
            })
            .collect();
        self.n_features = x.ncols();
        log::debug!("{name}: grew {} trees", self.trees.len());
        Ok(())
    }

    fn predict_proba(&self, x: &Array2<f64>) -> Result<Array1<f64>> {
        if self.trees.is_empty() {
            return Err(ClassifierError::ModelNotReady);
        }
        if x.ncols() != self.n_features {
            return Err(ClassifierError::FeatureCountMismatch {
                expected: self.n_features,
                got: x.ncols(),
            });
        }
        let n_trees = self.trees.len() as f64;
        Ok(x
            .axis_iter(Axis(0))
            .map(|row| self.trees.iter().map(|t| t.predict_row(row)).sum::<f64>() / n_trees)
            .collect())
    }
}

/// Random forest: bootstrap samples, best split among `sqrt(n_features)`
/// random features.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RandomForestClassifier {
    ensemble: TreeEnsemble,
}

impl RandomForestClassifier {
    pub fn new(n_trees: usize, seed: u64) -> Self {
        RandomForestClassifier {
            ensemble: TreeEnsemble::new(n_trees, seed, true, SplitStrategy::Best),
        }
    }
}

impl ClassifierModel for RandomForestClassifier {
    fn fit(&mut self, x: &Array2<f64>, y: &Array1<bool>) -> Result<()> {
        self.ensemble.fit("Random Forest", x, y)
    }

    fn predict_proba(&self, x: &Array2<f64>) -> Result<Array1<f64>> {
        self.ensemble.predict_proba(x)
    }

    fn name(&self) -> &str {
        "Random Forest"
    }
}

/// Extremely randomized trees: whole training set per tree, random thresholds.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExtraTreesClassifier {
    ensemble: TreeEnsemble,
}

impl ExtraTreesClassifier {
    pub fn new(n_trees: usize, seed: u64) -> Self {
        ExtraTreesClassifier {
            ensemble: TreeEnsemble::new(n_trees, seed, false, SplitStrategy::Random),
        }
    }
}

impl ClassifierModel for ExtraTreesClassifier {
    fn fit(&mut self, x: &Array2<f64>, y: &Array1<bool>) -> Result<()> {
        self.ensemble.fit("Extra Trees", x, y)
    }

    fn predict_proba(&self, x: &Array2<f64>) -> Result<Array1<f64>> {
        self.ensemble.predict_proba(x)
    }

    fn name(&self) -> &str {
        "Extra Trees"
    }
}

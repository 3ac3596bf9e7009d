//! Gini CART tree used by the random forest and extra-trees ensembles.
//!
//! Each split inspects a random subset of `max_features` features. In
//! `SplitStrategy::Best` mode every midpoint between consecutive distinct
//! values is scored; in `SplitStrategy::Random` mode one uniform threshold is
//! drawn per inspected feature. Trees grow until leaves are pure or hold a
//! single sample.
use ndarray::{Array2, ArrayView1};
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::Rng;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SplitStrategy {
    Best,
    Random,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
enum Node {
    /// Fraction of malignant training samples that reached the leaf.
    Leaf { malignant_fraction: f64 },
    Split {
        feature: usize,
        threshold: f64,
        left: usize,
        right: usize,
    },
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RandomizedTree {
    nodes: Vec<Node>,
}

/// Candidate split of one node.
struct SplitCandidate {
    feature: usize,
    threshold: f64,
    impurity: f64,
}

/// Gini impurity of a node with `pos` malignant out of `n` samples.
fn gini(pos: usize, n: usize) -> f64 {
    if n == 0 {
        return 0.0;
    }
    let p = pos as f64 / n as f64;
    2.0 * p * (1.0 - p)
}

/// Sample-weighted impurity of a left/right partition.
fn weighted_gini(left_pos: usize, left_n: usize, right_pos: usize, right_n: usize) -> f64 {
    let n = (left_n + right_n) as f64;
    (left_n as f64 * gini(left_pos, left_n) + right_n as f64 * gini(right_pos, right_n)) / n
}

struct TreeBuilder<'a> {
    x: &'a Array2<f64>,
    y: &'a [bool],
    max_features: usize,
    strategy: SplitStrategy,
    rng: StdRng,
    nodes: Vec<Node>,
}

impl<'a> TreeBuilder<'a> {
    fn build(&mut self, samples: Vec<usize>) -> usize {
        let pos = samples.iter().filter(|&&i| self.y[i]).count();
        let n = samples.len();
        let id = self.nodes.len();
        self.nodes.push(Node::Leaf {
            malignant_fraction: pos as f64 / n.max(1) as f64,
        });

        if n < 2 || pos == 0 || pos == n {
            return id;
        }

        let Some(split) = self.find_split(&samples) else {
            return id;
        };

        let (left, right): (Vec<usize>, Vec<usize>) = samples
            .into_iter()
            .partition(|&i| self.x[(i, split.feature)] <= split.threshold);
        if left.is_empty() || right.is_empty() {
            return id;
        }

        let left_id = self.build(left);
        let right_id = self.build(right);
        self.nodes[id] = Node::Split {
            feature: split.feature,
            threshold: split.threshold,
            left: left_id,
            right: right_id,
        };
        id
    }

    /// Inspect shuffled features until `max_features` non-constant ones were
    /// scored and at least one split was found.
    fn find_split(&mut self, samples: &[usize]) -> Option<SplitCandidate> {
        let mut features: Vec<usize> = (0..self.x.ncols()).collect();
        features.shuffle(&mut self.rng);

        let mut best: Option<SplitCandidate> = None;
        let mut inspected = 0;
        for feature in features {
            if inspected >= self.max_features && best.is_some() {
                break;
            }
            let candidate = match self.strategy {
                SplitStrategy::Best => self.best_threshold(samples, feature),
                SplitStrategy::Random => self.random_threshold(samples, feature),
            };
            let Some(candidate) = candidate else {
                continue;
            };
            inspected += 1;
            if best.as_ref().map_or(true, |b| candidate.impurity < b.impurity) {
                best = Some(candidate);
            }
        }
        best
    }

    fn best_threshold(&self, samples: &[usize], feature: usize) -> Option<SplitCandidate> {
        let mut values: Vec<(f64, bool)> = samples
            .iter()
            .map(|&i| (self.x[(i, feature)], self.y[i]))
            .collect();
        values.sort_by(|a, b| a.0.total_cmp(&b.0));

        let n = values.len();
        let total_pos = values.iter().filter(|v| v.1).count();
        let mut left_pos = 0;
        let mut best: Option<SplitCandidate> = None;
        for i in 0..n - 1 {
            if values[i].1 {
                left_pos += 1;
            }
            if values[i].0 == values[i + 1].0 {
                continue;
            }
            let left_n = i + 1;
            let impurity = weighted_gini(left_pos, left_n, total_pos - left_pos, n - left_n);
            if best.as_ref().map_or(true, |b| impurity < b.impurity) {
                let mut threshold = 0.5 * (values[i].0 + values[i + 1].0);
                // Midpoint can round up to the right value.
                if threshold >= values[i + 1].0 {
                    threshold = values[i].0;
                }
                best = Some(SplitCandidate {
                    feature,
                    threshold,
                    impurity,
                });
            }
        }
        best
    }

    fn random_threshold(&mut self, samples: &[usize], feature: usize) -> Option<SplitCandidate> {
        let (min, max) = samples
            .iter()
            .map(|&i| self.x[(i, feature)])
            .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), v| (lo.min(v), hi.max(v)));
        if !(max > min) {
            return None;
        }
        let mut threshold = self.rng.gen_range(min..max);
        if threshold >= max {
            threshold = min;
        }

        let (mut left_pos, mut left_n, mut right_pos, mut right_n) = (0, 0, 0, 0);
        for &i in samples {
            if self.x[(i, feature)] <= threshold {
                left_n += 1;
                left_pos += self.y[i] as usize;
            } else {
                right_n += 1;
                right_pos += self.y[i] as usize;
            }
        }
        Some(SplitCandidate {
            feature,
            threshold,
            impurity: weighted_gini(left_pos, left_n, right_pos, right_n),
        })
    }
}

impl RandomizedTree {
    /// Grow a tree on the given (possibly repeated) sample indices.
    pub fn fit(
        x: &Array2<f64>,
        y: &[bool],
        samples: Vec<usize>,
        max_features: usize,
        strategy: SplitStrategy,
        rng: StdRng,
    ) -> Self {
        let mut builder = TreeBuilder {
            x,
            y,
            max_features: max_features.max(1),
            strategy,
            rng,
            nodes: Vec::new(),
        };
        builder.build(samples);
        RandomizedTree {
            nodes: builder.nodes,
        }
    }

    /// Malignant fraction of the leaf `row` falls into.
    pub fn predict_row(&self, row: ArrayView1<f64>) -> f64 {
        let mut id = 0;
        loop {
            match &self.nodes[id] {
                Node::Leaf { malignant_fraction } => return *malignant_fraction,
                Node::Split {
                    feature,
                    threshold,
                    left,
                    right,
                } => {
                    id = if row[*feature] <= *threshold { *left } else { *right };
                }
            }
        }
    }

    pub fn n_nodes(&self) -> usize {
        self.nodes.len()
    }
}

//! Estimators evaluated on a preprocessed row.
//!
//! Semantics follow the usual tree/linear conventions:
//! - a tree sample goes left when `x[feature] <= threshold`, and leaf values are
//!   normalised into class probabilities;
//! - a forest averages the probabilities of its trees;
//! - logistic regression uses softmax over one row per class, or a sigmoid for a
//!   single-row (binary) model.
//!
//! The predicted class is the first index with the highest probability.

use crate::artifact::{EstimatorSpec, NodeSpec, TreeSpec};
use crate::error::ArtifactError;

#[derive(Debug, Clone, PartialEq)]
enum Node {
    Split {
        feature: usize,
        threshold: f64,
        left: usize,
        right: usize,
    },
    Leaf {
        proba: Vec<f64>,
    },
}

/// A single validated decision tree.
#[derive(Debug, Clone, PartialEq)]
pub struct DecisionTree {
    nodes: Vec<Node>,
}

impl DecisionTree {
    fn from_nodes(nodes: Vec<NodeSpec>, n_classes: usize, width: usize) -> Result<Self, ArtifactError> {
        if nodes.is_empty() {
            return Err(ArtifactError::invalid("tree has no nodes"));
        }

        let len = nodes.len();
        let mut out = Vec::with_capacity(len);
        for (idx, node) in nodes.into_iter().enumerate() {
            let node = match node {
                NodeSpec::Split { feature, threshold, left, right } => {
                    if feature >= width {
                        return Err(ArtifactError::invalid(format!(
                            "node {idx}: split feature {feature} outside input width {width}"
                        )));
                    }
                    if !threshold.is_finite() {
                        return Err(ArtifactError::invalid(format!("node {idx}: non-finite threshold")));
                    }
                    // Children after parents keeps traversal acyclic.
                    for child in [left, right] {
                        if child <= idx || child >= len {
                            return Err(ArtifactError::invalid(format!(
                                "node {idx}: child {child} must be in {}..{len}",
                                idx + 1
                            )));
                        }
                    }
                    Node::Split { feature, threshold, left, right }
                }
                NodeSpec::Leaf { value } => {
                    if value.len() != n_classes {
                        return Err(ArtifactError::invalid(format!(
                            "node {idx}: leaf has {} values, expected {n_classes}",
                            value.len()
                        )));
                    }
                    if value.iter().any(|v| !v.is_finite() || *v < 0.0) {
                        return Err(ArtifactError::invalid(format!(
                            "node {idx}: leaf values must be finite and non-negative"
                        )));
                    }
                    Node::Leaf { proba: normalise(value) }
                }
            };
            out.push(node);
        }

        Ok(Self { nodes: out })
    }

    fn leaf(&self, x: &[f64]) -> &[f64] {
        let mut idx = 0;
        loop {
            match &self.nodes[idx] {
                Node::Leaf { proba } => return proba,
                Node::Split { feature, threshold, left, right } => {
                    idx = if x[*feature] <= *threshold { *left } else { *right };
                }
            }
        }
    }

    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct LogisticRegression {
    coefficients: Vec<Vec<f64>>,
    intercepts: Vec<f64>,
}

impl LogisticRegression {
    fn decision(&self, x: &[f64]) -> Vec<f64> {
        self.coefficients
            .iter()
            .zip(&self.intercepts)
            .map(|(row, b)| row.iter().zip(x).map(|(w, v)| w * v).sum::<f64>() + b)
            .collect()
    }
}

/// Validated estimator.
#[derive(Debug, Clone, PartialEq)]
pub enum Estimator {
    DecisionTree { n_classes: usize, tree: DecisionTree },
    RandomForest { n_classes: usize, trees: Vec<DecisionTree> },
    LogisticRegression(LogisticRegression),
}

impl Estimator {
    /// Validate `spec` against the preprocessed row width.
    pub fn from_spec(spec: EstimatorSpec, width: usize) -> Result<Self, ArtifactError> {
        match spec {
            EstimatorSpec::DecisionTree { n_classes, nodes } => {
                check_classes(n_classes)?;
                let tree = DecisionTree::from_nodes(nodes, n_classes, width)?;
                Ok(Estimator::DecisionTree { n_classes, tree })
            }
            EstimatorSpec::RandomForest { n_classes, trees } => {
                check_classes(n_classes)?;
                if trees.is_empty() {
                    return Err(ArtifactError::invalid("random forest has no trees"));
                }
                let trees = trees
                    .into_iter()
                    .enumerate()
                    .map(|(i, TreeSpec { nodes })| {
                        DecisionTree::from_nodes(nodes, n_classes, width)
                            .map_err(|e| ArtifactError::invalid(format!("tree {i}: {e}")))
                    })
                    .collect::<Result<Vec<_>, _>>()?;
                Ok(Estimator::RandomForest { n_classes, trees })
            }
            EstimatorSpec::LogisticRegression { coefficients, intercepts } => {
                if coefficients.is_empty() {
                    return Err(ArtifactError::invalid("logistic regression has no coefficient rows"));
                }
                if coefficients.len() != intercepts.len() {
                    return Err(ArtifactError::invalid(format!(
                        "logistic regression has {} coefficient rows but {} intercepts",
                        coefficients.len(),
                        intercepts.len()
                    )));
                }
                if let Some(row) = coefficients.iter().position(|r| r.len() != width) {
                    return Err(ArtifactError::invalid(format!(
                        "coefficient row {row} has {} weights, expected {width}",
                        coefficients[row].len()
                    )));
                }
                let finite = coefficients.iter().flatten().chain(&intercepts).all(|v| v.is_finite());
                if !finite {
                    return Err(ArtifactError::invalid("logistic regression weights must be finite"));
                }
                Ok(Estimator::LogisticRegression(LogisticRegression { coefficients, intercepts }))
            }
        }
    }

    pub fn n_classes(&self) -> usize {
        match self {
            Estimator::DecisionTree { n_classes, .. } | Estimator::RandomForest { n_classes, .. } => {
                *n_classes
            }
            Estimator::LogisticRegression(lr) if lr.coefficients.len() == 1 => 2,
            Estimator::LogisticRegression(lr) => lr.coefficients.len(),
        }
    }

    /// Class probabilities for one row of the validated width.
    pub fn predict_proba(&self, x: &[f64]) -> Vec<f64> {
        match self {
            Estimator::DecisionTree { tree, .. } => tree.leaf(x).to_vec(),
            Estimator::RandomForest { n_classes, trees } => {
                let mut acc = vec![0.0; *n_classes];
                for tree in trees {
                    for (a, p) in acc.iter_mut().zip(tree.leaf(x)) {
                        *a += p;
                    }
                }
                let n = trees.len() as f64;
                acc.iter_mut().for_each(|a| *a /= n);
                acc
            }
            Estimator::LogisticRegression(lr) => {
                let z = lr.decision(x);
                if z.len() == 1 {
                    let p = sigmoid(z[0]);
                    vec![1.0 - p, p]
                } else {
                    softmax(&z)
                }
            }
        }
    }

    pub fn predict(&self, x: &[f64]) -> usize {
        argmax(&self.predict_proba(x))
    }

    /// Short human-readable summary for logs.
    pub fn describe(&self) -> String {
        match self {
            Estimator::DecisionTree { n_classes, tree } => {
                format!("decision_tree(nodes={}, classes={n_classes})", tree.node_count())
            }
            Estimator::RandomForest { n_classes, trees } => {
                format!("random_forest(trees={}, classes={n_classes})", trees.len())
            }
            Estimator::LogisticRegression(_) => {
                format!("logistic_regression(classes={})", self.n_classes())
            }
        }
    }
}

fn check_classes(n_classes: usize) -> Result<(), ArtifactError> {
    if n_classes == 0 {
        return Err(ArtifactError::invalid("n_classes must be at least 1"));
    }
    Ok(())
}

fn normalise(mut value: Vec<f64>) -> Vec<f64> {
    let total: f64 = value.iter().sum();
    if total > 0.0 {
        value.iter_mut().for_each(|v| *v /= total);
    }
    value
}

fn sigmoid(z: f64) -> f64 {
    1.0 / (1.0 + (-z).exp())
}

fn softmax(z: &[f64]) -> Vec<f64> {
    let max = z.iter().copied().fold(f64::NEG_INFINITY, f64::max);
    let exp: Vec<f64> = z.iter().map(|v| (v - max).exp()).collect();
    let total: f64 = exp.iter().sum();
    exp.into_iter().map(|e| e / total).collect()
}

/// First index of the maximum (ties resolve to the lowest class).
fn argmax(xs: &[f64]) -> usize {
    let mut best = 0;
    for (i, v) in xs.iter().enumerate().skip(1) {
        if *v > xs[best] {
            best = i;
        }
    }
    best
}

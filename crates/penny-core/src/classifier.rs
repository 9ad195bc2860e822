//! Probabilistic expense classifier
//!
//! A multinomial naive Bayes model over stemmed description tokens, with
//! TF-IDF weighting so that ubiquitous tokens ("store", "service") count for
//! less than distinctive ones ("starbucks", "mortgage"). Training and
//! prediction are fully deterministic: no randomness anywhere, ties broken by
//! category name order.

use std::collections::{BTreeMap, HashMap, HashSet};

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::{Error, Result};
use crate::models::Prediction;
use crate::text::TextProcessor;

/// A labeled training example: `(description, category)`.
pub type Example = (String, String);

/// A fitted classifier, ready to predict and to serialize as an artifact.
///
/// Categories are stored sorted by name; every parallel vector below is
/// indexed by that order. Sorting is what makes tie-breaks reproducible
/// across training runs and process restarts.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TrainedModel {
    categories: Vec<String>,
    /// Log prior per category
    priors: Vec<f64>,
    /// Inverse document frequency per vocabulary token
    idf: BTreeMap<String, f64>,
    /// Log likelihood of each known token, per category
    token_log_probs: Vec<BTreeMap<String, f64>>,
    /// Log likelihood for a vocabulary token absent from a category
    unseen_log_probs: Vec<f64>,
    /// Index of the most common training category (fallback prediction)
    majority: usize,
}

impl TrainedModel {
    /// Fit a model on labeled examples
    ///
    /// Examples whose descriptions tokenize to nothing still count toward
    /// the class priors but contribute no token evidence.
    pub fn train(processor: &TextProcessor, examples: &[Example]) -> Result<Self> {
        if examples.is_empty() {
            return Err(Error::Training("no training examples".to_string()));
        }

        let mut categories: Vec<String> = examples
            .iter()
            .map(|(_, c)| c.clone())
            .collect::<HashSet<_>>()
            .into_iter()
            .collect();
        categories.sort();

        let index_of: HashMap<&str, usize> = categories
            .iter()
            .enumerate()
            .map(|(i, c)| (c.as_str(), i))
            .collect();

        let docs: Vec<(Vec<String>, usize)> = examples
            .iter()
            .map(|(description, category)| {
                (processor.tokenize(description), index_of[category.as_str()])
            })
            .collect();

        // Document frequency over the training set
        let mut df: HashMap<&str, usize> = HashMap::new();
        for (tokens, _) in &docs {
            let distinct: HashSet<&str> = tokens.iter().map(|t| t.as_str()).collect();
            for token in distinct {
                *df.entry(token).or_default() += 1;
            }
        }

        let n_docs = docs.len() as f64;
        let idf: BTreeMap<String, f64> = df
            .iter()
            .map(|(token, count)| {
                let weight = ((n_docs + 1.0) / (*count as f64 + 1.0)).ln() + 1.0;
                (token.to_string(), weight)
            })
            .collect();

        // TF-IDF-weighted token mass per category
        let mut class_counts = vec![0usize; categories.len()];
        let mut token_mass: Vec<HashMap<&str, f64>> = vec![HashMap::new(); categories.len()];
        for (tokens, class) in &docs {
            class_counts[*class] += 1;
            for token in tokens {
                let weight = idf[token.as_str()];
                *token_mass[*class].entry(token.as_str()).or_default() += weight;
            }
        }

        let vocab_size = idf.len() as f64;
        let mut priors = Vec::with_capacity(categories.len());
        let mut token_log_probs = Vec::with_capacity(categories.len());
        let mut unseen_log_probs = Vec::with_capacity(categories.len());

        for (class, mass) in token_mass.iter().enumerate() {
            priors.push((class_counts[class] as f64 / n_docs).ln());

            // Laplace smoothing keeps unseen tokens from zeroing a category
            let total: f64 = mass.values().sum();
            let denominator = total + vocab_size;
            token_log_probs.push(
                mass.iter()
                    .map(|(token, weight)| {
                        (token.to_string(), ((weight + 1.0) / denominator).ln())
                    })
                    .collect(),
            );
            unseen_log_probs.push((1.0 / denominator).ln());
        }

        // First class with the highest count; sorted order makes this stable
        let majority = class_counts
            .iter()
            .enumerate()
            .max_by(|&(ai, a), &(bi, b)| a.cmp(b).then(bi.cmp(&ai)))
            .map(|(i, _)| i)
            .unwrap_or(0);

        debug!(
            categories = categories.len(),
            examples = examples.len(),
            vocabulary = idf.len(),
            "Trained classifier"
        );

        Ok(Self {
            categories,
            priors,
            idf,
            token_log_probs,
            unseen_log_probs,
            majority,
        })
    }

    /// Fit a model and measure hold-out accuracy
    ///
    /// Holds out every fourth example of each category that has at least
    /// four, scores a model trained on the remainder against the hold-out,
    /// then refits on the full set. When nothing can be held out the
    /// accuracy is measured on the training set itself.
    pub fn train_and_evaluate(
        processor: &TextProcessor,
        examples: &[Example],
    ) -> Result<(Self, f64)> {
        let mut per_category: HashMap<&str, usize> = HashMap::new();
        for (_, category) in examples {
            *per_category.entry(category.as_str()).or_default() += 1;
        }

        let mut seen: HashMap<&str, usize> = HashMap::new();
        let mut train_set = Vec::new();
        let mut holdout = Vec::new();
        for example in examples {
            let category = example.1.as_str();
            let position = seen.entry(category).or_default();
            if per_category[category] >= 4 && *position % 4 == 3 {
                holdout.push(example.clone());
            } else {
                train_set.push(example.clone());
            }
            *position += 1;
        }

        let accuracy = if holdout.is_empty() {
            let model = Self::train(processor, examples)?;
            model.accuracy_on(processor, examples)
        } else {
            let model = Self::train(processor, &train_set)?;
            model.accuracy_on(processor, &holdout)
        };

        let model = Self::train(processor, examples)?;
        Ok((model, accuracy))
    }

    fn accuracy_on(&self, processor: &TextProcessor, examples: &[Example]) -> f64 {
        if examples.is_empty() {
            return 0.0;
        }
        let correct = examples
            .iter()
            .filter(|(description, category)| {
                self.predict(processor, description).category == *category
            })
            .count();
        correct as f64 / examples.len() as f64
    }

    /// Predict a category with a confidence in `[0.0, 1.0]`
    ///
    /// Descriptions with no recognizable tokens fall back to the majority
    /// training category at its prior probability.
    pub fn predict(&self, processor: &TextProcessor, description: &str) -> Prediction {
        let tokens = processor.tokenize(description);

        // Tokens outside the training vocabulary carry no evidence either way
        let known: Vec<&str> = tokens
            .iter()
            .map(|t| t.as_str())
            .filter(|t| self.idf.contains_key(*t))
            .collect();

        let scores: Vec<f64> = if known.is_empty() {
            self.priors.clone()
        } else {
            (0..self.categories.len())
                .map(|class| {
                    let mut score = self.priors[class];
                    for token in &known {
                        score += self.idf[*token]
                            * self.token_log_probs[class]
                                .get(*token)
                                .copied()
                                .unwrap_or(self.unseen_log_probs[class]);
                    }
                    score
                })
                .collect()
        };

        let probabilities = softmax(&scores);

        let winner = if known.is_empty() {
            self.majority
        } else {
            // Highest probability; earliest (alphabetical) category on ties
            probabilities
                .iter()
                .enumerate()
                .max_by(|&(ai, a), &(bi, b)| a.total_cmp(b).then(bi.cmp(&ai)))
                .map(|(i, _)| i)
                .unwrap_or(self.majority)
        };

        Prediction {
            category: self.categories[winner].clone(),
            confidence: probabilities[winner],
        }
    }

    /// Predict a batch of descriptions
    ///
    /// Equivalent to calling [`predict`](Self::predict) per element; exists
    /// so callers categorizing an import batch make one call.
    pub fn predict_batch(
        &self,
        processor: &TextProcessor,
        descriptions: &[String],
    ) -> Vec<Prediction> {
        descriptions
            .iter()
            .map(|d| self.predict(processor, d))
            .collect()
    }

    /// Categories this model can predict, sorted by name
    pub fn categories(&self) -> &[String] {
        &self.categories
    }
}

fn softmax(scores: &[f64]) -> Vec<f64> {
    let max = scores.iter().copied().fold(f64::NEG_INFINITY, f64::max);
    let exps: Vec<f64> = scores.iter().map(|s| (s - max).exp()).collect();
    let total: f64 = exps.iter().sum();
    exps.iter().map(|e| e / total).collect()
}

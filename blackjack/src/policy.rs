use rand::seq::SliceRandom;
use rand::Rng;
use tracing::warn;

use crate::{BlackjackError, ClassifierError, Decision};

/// Weight given to a classifier configured without an explicit blend.
pub const DEFAULT_CLASSIFIER_WEIGHT: f64 = 0.5;

/// External predictor consulted by skilled decisions.
///
/// Features are `[hand value, dealer up card value, true count]`.
pub trait Classifier: std::fmt::Debug {
    fn predict(&self, features: &[f64; 3]) -> Result<Decision, ClassifierError>;
}

/// Where a skilled decision comes from.
#[derive(Debug)]
pub enum DecisionSource {
    Strategy,
    Classifier(Box<dyn Classifier>),
    Blend {
        classifier: Box<dyn Classifier>,
        weight: f64,
    },
}

impl DecisionSource {
    fn classifier(&self) -> Option<(&dyn Classifier, f64)> {
        match self {
            DecisionSource::Strategy => None,
            DecisionSource::Classifier(classifier) => {
                Some((classifier.as_ref(), DEFAULT_CLASSIFIER_WEIGHT))
            }
            DecisionSource::Blend { classifier, weight } => Some((classifier.as_ref(), *weight)),
        }
    }
}

/// What a seat knows when it has to act on a hand.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DecisionPoint {
    pub hand_value: u32,
    pub up_card_value: u8,
    pub true_count: f64,
    pub can_double: bool,
    pub can_split: bool,
}

impl DecisionPoint {
    pub fn features(&self) -> [f64; 3] {
        [
            self.hand_value as f64,
            self.up_card_value as f64,
            self.true_count,
        ]
    }

    pub fn legal_decisions(&self) -> Vec<Decision> {
        let mut decisions = vec![Decision::Hit, Decision::Stand];
        if self.can_double {
            decisions.push(Decision::Double);
        }
        if self.can_split {
            decisions.push(Decision::Split);
        }
        decisions
    }
}

/// Turns a recommendation into the action a seat actually takes.
#[derive(Debug)]
pub struct DecisionPolicy {
    skill_level: f64,
    source: DecisionSource,
}

impl DecisionPolicy {
    pub fn new(skill_level: f64, source: DecisionSource) -> Result<DecisionPolicy, BlackjackError> {
        if !(0.0..=1.0).contains(&skill_level) {
            return Err(BlackjackError::InvalidConfig(format!(
                "skill_level must be within [0, 1], got {}",
                skill_level
            )));
        }
        if let DecisionSource::Blend { weight, .. } = &source {
            if !(0.0..=1.0).contains(weight) {
                return Err(BlackjackError::InvalidConfig(format!(
                    "classifier weight must be within [0, 1], got {}",
                    weight
                )));
            }
        }
        Ok(DecisionPolicy {
            skill_level,
            source,
        })
    }

    pub fn skill_level(&self) -> f64 {
        self.skill_level
    }

    pub fn source(&self) -> &DecisionSource {
        &self.source
    }

    /// A draw below the skill level makes a skilled decision: the classifier
    /// with probability equal to its weight, the recommendation otherwise.
    /// Any other draw picks uniformly among the legal actions.
    pub fn decide<R: Rng + ?Sized>(
        &self,
        recommendation: Decision,
        point: &DecisionPoint,
        rng: &mut R,
    ) -> Decision {
        let u: f64 = rng.gen();
        if u >= self.skill_level {
            return *point
                .legal_decisions()
                .choose(rng)
                .unwrap_or(&Decision::Hit);
        }

        let Some((classifier, weight)) = self.source.classifier() else {
            return recommendation;
        };
        if !rng.gen_bool(weight) {
            return recommendation;
        }
        match classifier.predict(&point.features()) {
            Ok(decision) => decision,
            Err(err) => {
                warn!(%err, %recommendation, "falling back to the recommendation");
                recommendation
            }
        }
    }
}

/// One row of a [`TableClassifier`].
#[derive(Debug, Clone, PartialEq)]
pub struct ClassifierEntry {
    pub hand_value: u32,
    pub up_card_value: u8,
    /// The entry only applies at or above this true count.
    pub min_true_count: Option<f64>,
    pub decision: Decision,
}

/// Lookup classifier. The first entry matching the hand and up card values,
/// and whose count threshold is met, decides.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TableClassifier {
    entries: Vec<ClassifierEntry>,
}

impl TableClassifier {
    pub fn new(entries: Vec<ClassifierEntry>) -> TableClassifier {
        TableClassifier { entries }
    }

    pub fn entries(&self) -> &[ClassifierEntry] {
        &self.entries
    }
}

impl Classifier for TableClassifier {
    fn predict(&self, features: &[f64; 3]) -> Result<Decision, ClassifierError> {
        let [hand_value, up_card_value, true_count] = *features;
        self.entries
            .iter()
            .find(|entry| {
                entry.hand_value as f64 == hand_value
                    && entry.up_card_value as f64 == up_card_value
                    && entry.min_true_count.map_or(true, |min| true_count >= min)
            })
            .map(|entry| entry.decision)
            .ok_or_else(|| {
                ClassifierError::Unavailable(format!(
                    "no entry for hand {} against {} at true count {:.2}",
                    hand_value, up_card_value, true_count
                ))
            })
    }
}

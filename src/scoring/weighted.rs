use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ScoringWeights {
    pub content: f64,
    pub co_occurrence: f64,
    pub pillar_balance: f64,
    pub popularity: f64,
    pub platform: f64,
}

impl Default for ScoringWeights {
    fn default() -> Self {
        Self {
            content: 0.30,
            co_occurrence: 0.25,
            pillar_balance: 0.20,
            popularity: 0.15,
            platform: 0.10,
        }
    }
}

/// Allowed drift of the weight sum away from 1.0.
const WEIGHT_SUM_TOLERANCE: f64 = 1e-6;

impl ScoringWeights {
    pub fn total(&self) -> f64 {
        self.content + self.co_occurrence + self.pillar_balance + self.popularity + self.platform
    }

    /// Weights must be finite, non-negative and sum to 1.0 so composite scores stay in `[0, 1]`.
    pub fn validate(&self) -> Result<(), String> {
        let named = [
            ("content", self.content),
            ("co_occurrence", self.co_occurrence),
            ("pillar_balance", self.pillar_balance),
            ("popularity", self.popularity),
            ("platform", self.platform),
        ];
        for (name, weight) in named {
            if !weight.is_finite() || weight < 0.0 {
                return Err(format!(
                    "weight `{name}` must be a finite non-negative number, got {weight}"
                ));
            }
        }

        let total = self.total();
        if (total - 1.0).abs() > WEIGHT_SUM_TOLERANCE {
            return Err(format!("weights must sum to 1.0, got {total}"));
        }
        Ok(())
    }
}

/// The five per-candidate signals, each in `[0, 1]`.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct SignalBreakdown {
    pub content: f64,
    pub co_occurrence: f64,
    pub pillar_balance: f64,
    pub popularity: f64,
    pub platform: f64,
}

#[derive(Debug, Clone, Default)]
pub struct WeightedScorer {
    weights: ScoringWeights,
}

impl WeightedScorer {
    pub fn new(weights: ScoringWeights) -> Self {
        Self { weights }
    }

    /// Weighted sum rounded to two decimals.
    pub fn score(&self, signals: &SignalBreakdown) -> f64 {
        let mut score = 0.0;

        score += signals.content * self.weights.content;
        score += signals.co_occurrence * self.weights.co_occurrence;
        score += signals.pillar_balance * self.weights.pillar_balance;
        score += signals.popularity * self.weights.popularity;
        score += signals.platform * self.weights.platform;

        round2(score.max(0.0))
    }
}

pub fn round2(value: f64) -> f64 {
    if value.is_nan() {
        return 0.0;
    }
    (value * 100.0).round() / 100.0
}

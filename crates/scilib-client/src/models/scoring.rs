//! Server-side ranking weights.

use serde::{Deserialize, Serialize};

/// The five tunable weights of the server's ranking function.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct ScoringParams {
    /// BM25 saturation parameter.
    #[serde(rename = "bm25parameter")]
    pub bm25_parameter: f64,
    pub lambda: f64,
    pub alpha: f64,
    pub beta: f64,
    pub gamma: f64,
}

/// Identifies one weight in a [`ScoringParamsDraft`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ScoringField {
    Bm25Parameter,
    Lambda,
    Alpha,
    Beta,
    Gamma,
}

/// Scoring weights as the user is typing them.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ScoringParamsDraft {
    pub bm25_parameter: String,
    pub lambda: String,
    pub alpha: String,
    pub beta: String,
    pub gamma: String,
}

impl ScoringParamsDraft {
    /// Replace the text of one field.
    pub fn set(&mut self, field: ScoringField, value: impl Into<String>) {
        let value = value.into();
        match field {
            ScoringField::Bm25Parameter => self.bm25_parameter = value,
            ScoringField::Lambda => self.lambda = value,
            ScoringField::Alpha => self.alpha = value,
            ScoringField::Beta => self.beta = value,
            ScoringField::Gamma => self.gamma = value,
        }
    }

    /// Build a full replacement, keeping `previous` for every field that does not parse.
    #[must_use]
    pub fn resolve(&self, previous: &ScoringParams) -> ScoringParams {
        ScoringParams {
            bm25_parameter: parse_or(&self.bm25_parameter, previous.bm25_parameter),
            lambda: parse_or(&self.lambda, previous.lambda),
            alpha: parse_or(&self.alpha, previous.alpha),
            beta: parse_or(&self.beta, previous.beta),
            gamma: parse_or(&self.gamma, previous.gamma),
        }
    }
}

impl From<&ScoringParams> for ScoringParamsDraft {
    fn from(params: &ScoringParams) -> Self {
        Self {
            bm25_parameter: params.bm25_parameter.to_string(),
            lambda: params.lambda.to_string(),
            alpha: params.alpha.to_string(),
            beta: params.beta.to_string(),
            gamma: params.gamma.to_string(),
        }
    }
}

fn parse_or(text: &str, fallback: f64) -> f64 {
    text.trim().parse::<f64>().ok().filter(|v| v.is_finite()).unwrap_or(fallback)
}

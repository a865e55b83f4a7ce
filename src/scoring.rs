//! Compliance scoring.
//!
//! The score is a placeholder posture metric, not a certified compliance
//! computation: a linear penalty on critical findings only, clamped to
//! 0..=100. High and medium findings do not move the score. The dashboard
//! reproduces this exact formula, so it is part of the observable contract
//! and stays the default scoring path.

use serde::{Deserialize, Serialize};

/// Score deducted per critical finding.
const CRITICAL_PENALTY: u32 = 10;
const MAX_SCORE: u32 = 100;

/// Derive the 0-100 compliance score from a critical-finding count.
pub fn compliance_score(critical_count: usize) -> u32 {
    let penalty = critical_count.saturating_mul(CRITICAL_PENALTY as usize);
    MAX_SCORE.saturating_sub(u32::try_from(penalty).unwrap_or(u32::MAX))
}

/// Posture classification over the compliance score.
///
/// The 80% boundary mirrors where the dashboard flips from green to red.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PostureLevel {
    Compliant,
    AtRisk,
    Failing,
}

impl PostureLevel {
    pub fn from_score(score: u32) -> Self {
        match score {
            80..=100 => PostureLevel::Compliant,
            50..=79 => PostureLevel::AtRisk,
            _ => PostureLevel::Failing,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            PostureLevel::Compliant => "COMPLIANT",
            PostureLevel::AtRisk => "AT RISK",
            PostureLevel::Failing => "FAILING",
        }
    }
}

impl std::fmt::Display for PostureLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

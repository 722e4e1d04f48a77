//! Project health scoring
//!
//! Reduces finance, schedule and risk signals to a 0-100 score. Every
//! deduction is explained by one reason string, in the order the signals are
//! checked: cost, schedule, then risks in list order.

use crate::config::HealthThresholds;
use govdash_model::{EnrichedProject, RiskSeverity};
use serde::{Deserialize, Serialize};

/// Score before deductions
pub const BASELINE_SCORE: u8 = 100;

const MAJOR_OVERRUN_PCT: f64 = 10.0;
const SEVERE_OVERRUN_PCT: f64 = 20.0;

/// Score with its explanations
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HealthReport {
    /// 0-100
    pub score: u8,
    /// One entry per deduction
    pub reasons: Vec<String>,
}

impl HealthReport {
    /// No deduction fired
    #[inline]
    #[must_use]
    pub fn is_clean(&self) -> bool {
        self.reasons.is_empty()
    }
}

/// Computes [`HealthReport`]s from a project's current fields
#[derive(Debug, Clone, Copy, Default)]
pub struct HealthScorer {
    thresholds: HealthThresholds,
}

impl HealthScorer {
    #[inline]
    #[must_use]
    pub fn new(thresholds: HealthThresholds) -> Self {
        Self { thresholds }
    }

    #[inline]
    #[must_use]
    pub fn thresholds(&self) -> &HealthThresholds {
        &self.thresholds
    }

    /// Score a project
    #[must_use]
    pub fn score(&self, project: &EnrichedProject) -> HealthReport {
        let mut score = i32::from(BASELINE_SCORE);
        let mut reasons = Vec::new();

        if let Some((deduction, reason)) = self.cost_overrun(project) {
            score -= i32::from(deduction);
            reasons.push(reason);
        }
        if let Some((deduction, reason)) = self.schedule_slip(project) {
            score -= i32::from(deduction);
            reasons.push(reason);
        }
        for risk in project.risks.iter().filter(|r| r.is_flagged()) {
            let (deduction, label) = match risk.severity {
                RiskSeverity::Critical => (self.thresholds.critical_risk_deduction, "crítico"),
                _ => (self.thresholds.high_risk_deduction, "alto"),
            };
            score -= i32::from(deduction);
            reasons.push(format!("Risco {label} ativo: {} (-{deduction})", risk.title));
        }

        HealthReport {
            score: u8::try_from(score.clamp(0, i32::from(BASELINE_SCORE))).unwrap_or(0),
            reasons,
        }
    }

    /// Recompute and store `health_score` / `health_reasons`
    pub fn refresh(&self, project: &mut EnrichedProject) {
        let report = self.score(project);
        project.health_score = report.score;
        project.health_reasons = report.reasons;
    }

    fn cost_overrun(&self, project: &EnrichedProject) -> Option<(u8, String)> {
        let finance = &project.finance;
        if finance.bac <= 0.0 {
            return None;
        }
        let overrun = (finance.eac - finance.bac) / finance.bac * 100.0;
        if overrun <= self.thresholds.cost_overrun_threshold_pct {
            return None;
        }
        let deduction = if overrun > SEVERE_OVERRUN_PCT {
            self.thresholds.cost_overrun_severe_deduction
        } else if overrun > MAJOR_OVERRUN_PCT {
            self.thresholds.cost_overrun_major_deduction
        } else {
            self.thresholds.cost_overrun_deduction
        };
        Some((
            deduction,
            format!("Custo estimado {overrun:.1}% acima do orçamento (-{deduction})"),
        ))
    }

    fn schedule_slip(&self, project: &EnrichedProject) -> Option<(u8, String)> {
        let finance = &project.finance;
        if finance.eac <= 0.0 {
            return None;
        }
        let consumed = ((finance.eac - finance.etc) / finance.eac * 100.0).clamp(0.0, 100.0);
        let progress = project.base.progress_pct.clamp(0.0, 100.0);
        let gap = consumed - progress;
        if gap <= self.thresholds.schedule_slip_threshold_pct {
            return None;
        }
        // gap is within (0, 100], so the rounded value fits in a u8
        let rounded = gap.round().clamp(0.0, 100.0) as u8;
        let deduction = rounded.min(self.thresholds.max_schedule_deduction);
        Some((
            deduction,
            format!(
                "Progresso físico de {progress:.0}% atrás do custo consumido de {consumed:.0}% ({gap:.1} p.p., -{deduction})"
            ),
        ))
    }
}

/// Score with the default thresholds
#[must_use]
pub fn compute_health_score(project: &EnrichedProject) -> HealthReport {
    HealthScorer::default().score(project)
}

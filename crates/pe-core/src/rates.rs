//! The rate card: every numeric table the estimation formula reads.
//!
//! Values are hand-tuned business parameters, shipped as compiled-in
//! defaults and optionally overridden wholesale through configuration.
//! Nothing here is derived or adjusted at runtime; the estimator treats the
//! card as immutable reference data.
//!
//! The closed tables (complexity multipliers, weekly throughput) are total
//! by construction, while the open ones are lenient: a missing base-hours
//! entry falls back to the `other` tier, an unknown feature contributes
//! zero hours, and an unknown technology contributes a neutral factor of 1.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::input::{Complexity, ProjectType};

/// Last-resort base hours when even the `other` entry is missing from an
/// overridden card.
const FALLBACK_BASE_HOURS: f64 = 80.0;

/// Complexity multipliers, one per tier.
///
/// Applied to base hours only: an enterprise-grade core architecture is
/// heavier than an MVP's, but per-feature cost does not scale with tier.
/// Defaults: mvp 1.0, standard 1.6, enterprise 2.5.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ComplexityMultipliers {
    pub mvp: f64,
    pub standard: f64,
    pub enterprise: f64,
}

impl ComplexityMultipliers {
    /// Returns the multiplier for a tier. Total; every tier has an entry.
    pub const fn multiplier(&self, complexity: Complexity) -> f64 {
        match complexity {
            Complexity::Mvp => self.mvp,
            Complexity::Standard => self.standard,
            Complexity::Enterprise => self.enterprise,
        }
    }
}

impl Default for ComplexityMultipliers {
    fn default() -> Self {
        Self {
            mvp: 1.0,
            standard: 1.6,
            enterprise: 2.5,
        }
    }
}

/// Weekly development throughput in hours.
///
/// `dual_platform` applies only to mobile projects targeting both iOS and
/// Android, where two native codebases proceed in parallel under separate
/// sub-teams. Defaults: single 40, dual 80.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct WeeklyHours {
    pub single_platform: f64,
    pub dual_platform: f64,
}

impl Default for WeeklyHours {
    fn default() -> Self {
        Self {
            single_platform: 40.0,
            dual_platform: 80.0,
        }
    }
}

/// The complete pricing table set read by the estimation formula.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RateCard {
    /// Base hours assumed for a project's core structure, per project type.
    pub base_hours: BTreeMap<ProjectType, f64>,

    /// Multiplier applied to base hours, per complexity tier.
    pub complexity_multipliers: ComplexityMultipliers,

    /// Hours per feature identifier.
    pub feature_hours: BTreeMap<String, f64>,

    /// Flat hours per distinct screen/page.
    pub hours_per_page: f64,

    /// Multiplicative adjustment factor per technology identifier.
    pub tech_factors: BTreeMap<String, f64>,

    /// Billing rate in currency units per hour.
    pub hourly_rate: u64,

    /// Weekly throughput for deadline calculation.
    pub weekly_hours: WeeklyHours,

    /// First-year support cost as a fraction of development cost.
    pub support_rate: f64,
}

impl RateCard {
    /// Base hours for a project type.
    ///
    /// Falls back to the `other` entry when the card has no entry for the
    /// given type (possible under partial config overrides), then to a
    /// compiled-in floor. Lenient-default policy, not an error path.
    pub fn base_hours(&self, project_type: ProjectType) -> f64 {
        self.base_hours
            .get(&project_type)
            .or_else(|| self.base_hours.get(&ProjectType::Other))
            .copied()
            .unwrap_or(FALLBACK_BASE_HOURS)
    }

    /// Hours for a feature identifier. Unknown identifiers cost zero.
    pub fn feature_hours(&self, feature: &str) -> f64 {
        self.feature_hours.get(feature).copied().unwrap_or(0.0)
    }

    /// Adjustment factor for a technology identifier. Unknown identifiers
    /// are neutral (1.0).
    pub fn tech_factor(&self, tech: &str) -> f64 {
        self.tech_factors.get(tech).copied().unwrap_or(1.0)
    }
}

impl Default for RateCard {
    fn default() -> Self {
        let base_hours = BTreeMap::from([
            (ProjectType::Mobile, 160.0),
            (ProjectType::Web, 120.0),
            (ProjectType::Telegram, 60.0),
            (ProjectType::Ai, 180.0),
            (ProjectType::Desktop, 140.0),
            (ProjectType::Other, 80.0),
        ]);

        let feature_hours = BTreeMap::from(
            [
                ("auth", 24.0),
                ("payments", 40.0),
                ("chat", 48.0),
                ("push-notifications", 16.0),
                ("admin-panel", 56.0),
                ("analytics", 24.0),
                ("search", 20.0),
                ("geolocation", 24.0),
                ("booking", 40.0),
                ("catalog", 32.0),
                ("cms", 40.0),
                ("api-integration", 32.0),
                ("file-upload", 16.0),
                ("multilanguage", 20.0),
                ("offline-mode", 32.0),
                ("realtime-sync", 40.0),
                ("rag", 80.0),
                ("voice-input", 40.0),
                ("image-generation", 48.0),
            ]
            .map(|(id, hours)| (id.to_string(), hours)),
        );

        let tech_factors = BTreeMap::from(
            [
                ("react", 1.0),
                ("nextjs", 1.0),
                ("vue", 0.95),
                ("angular", 1.1),
                ("flutter", 0.9),
                ("react-native", 0.95),
                ("swift", 1.1),
                ("kotlin", 1.1),
                ("nodejs", 1.0),
                ("python", 0.95),
                ("django", 1.0),
                ("golang", 1.05),
                ("rust", 1.15),
                ("laravel", 0.95),
                ("electron", 1.05),
                ("tauri", 1.0),
                ("aiogram", 0.9),
                ("postgres", 1.0),
                ("mongodb", 0.95),
                ("firebase", 0.85),
            ]
            .map(|(id, factor)| (id.to_string(), factor)),
        );

        Self {
            base_hours,
            complexity_multipliers: ComplexityMultipliers::default(),
            feature_hours,
            hours_per_page: 6.0,
            tech_factors,
            hourly_rate: 40,
            weekly_hours: WeeklyHours::default(),
            support_rate: 0.15,
        }
    }
}

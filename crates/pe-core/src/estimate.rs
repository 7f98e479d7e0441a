//! The estimation formula.
//!
//! # Algorithm Summary
//!
//! 1. Look up base hours for the project type and scale by the complexity
//!    multiplier; complexity inflates core architecture effort only
//! 2. Add per-feature hours over the union of subtype-implied and
//!    explicitly selected features (no double counting)
//! 3. Add flat per-page hours
//! 4. Multiply the whole total by the composed technology adjustment
//!    factors, so a technology choice scales the entire project's effort
//! 5. Price hours at the hourly rate; derive the deadline from weekly
//!    throughput (doubled for parallel iOS + Android delivery) and the
//!    support cost as a fixed fraction of the development cost
//!
//! The function is pure: no I/O, no clock, no randomness. Hour quantities
//! stay fractional throughout; currency and week values are rounded exactly
//! once, on output. Set-valued inputs are folded in canonical order, so the
//! result is independent of the caller's selection order.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use crate::catalog::{implied_features, implied_tech};
use crate::input::{Platform, ProjectSpec, ProjectType};
use crate::rates::RateCard;

/// A computed cost/timeline estimate. Never mutated after construction.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Estimate {
    /// Development cost in whole currency units.
    pub development_cost: u64,

    /// Delivery timeline in weeks, ceiling-rounded.
    pub deadline_weeks: u32,

    /// First-year support cost in whole currency units.
    pub support_cost: u64,

    /// Transparency record of how the totals came about.
    pub breakdown: CostBreakdown,
}

/// How an estimate decomposes. All fields are derived from the inputs and
/// the rate card; none is independently settable.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CostBreakdown {
    /// Base hours priced at the hourly rate, before the complexity
    /// multiplier.
    pub base_cost: u64,

    /// Multiplier applied to the base for the chosen complexity tier.
    pub complexity_multiplier: f64,

    /// Effective feature hours priced at the hourly rate.
    pub features_cost: u64,

    /// Page hours priced at the hourly rate.
    pub pages_cost: u64,

    /// Composed technology adjustment factor.
    pub tech_adjustment: f64,

    /// Exact total hours, fractional, before any rounding.
    pub total_hours: f64,

    /// The hourly billing rate the costs were priced at.
    pub hourly_rate: u64,
}

/// The union of subtype-implied and explicitly selected features.
///
/// Returned as an ordered set: duplicates collapse, and iteration order is
/// canonical regardless of how the caller listed the features.
pub fn effective_features(spec: &ProjectSpec) -> BTreeSet<String> {
    let mut features: BTreeSet<String> = spec.features.iter().cloned().collect();
    if let Some(subtype) = spec.subtype.as_deref() {
        for feature in implied_features(spec.project_type, subtype) {
            features.insert((*feature).to_string());
        }
    }
    features
}

/// The union of the subtype-implied technology and the explicit tech stack.
pub fn effective_tech(spec: &ProjectSpec) -> BTreeSet<String> {
    let mut tech: BTreeSet<String> = spec.tech_stack.iter().cloned().collect();
    if let Some(subtype) = spec.subtype.as_deref() {
        if let Some(implied) = implied_tech(spec.project_type, subtype) {
            tech.insert(implied.to_string());
        }
    }
    tech
}

/// True when delivery runs two native mobile codebases in parallel.
///
/// Only mobile projects targeting both iOS and Android qualify; platform
/// selections on any other project type are ignored.
pub fn is_parallel_delivery(spec: &ProjectSpec) -> bool {
    spec.project_type == ProjectType::Mobile
        && spec.platforms.contains(&Platform::Ios)
        && spec.platforms.contains(&Platform::Android)
}

/// Rounds a non-negative currency amount to whole units.
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
fn round_currency(amount: f64) -> u64 {
    amount.max(0.0).round() as u64
}

/// Computes a cost/timeline estimate for a project description.
///
/// Total over any well-formed input: unknown feature or technology
/// identifiers contribute zero hours or a neutral factor, and a rate card
/// missing the project type falls back to its `other` entry. Strict input
/// validation belongs to the boundary (see [`crate::validate`]); this
/// function never fails.
#[allow(clippy::cast_precision_loss, clippy::cast_possible_truncation, clippy::cast_sign_loss)]
pub fn calculate_estimate(spec: &ProjectSpec, rates: &RateCard) -> Estimate {
    let base_hours = rates.base_hours(spec.project_type);
    let complexity_multiplier = rates.complexity_multipliers.multiplier(spec.complexity);

    let features_hours: f64 = effective_features(spec)
        .iter()
        .map(|feature| rates.feature_hours(feature))
        .sum();

    let pages_hours = f64::from(spec.pages) * rates.hours_per_page;

    let tech_adjustment: f64 = effective_tech(spec)
        .iter()
        .map(|tech| rates.tech_factor(tech))
        .product();

    let total_hours =
        (base_hours * complexity_multiplier + features_hours + pages_hours) * tech_adjustment;

    let hourly_rate = rates.hourly_rate as f64;
    let development_cost = round_currency(total_hours * hourly_rate);

    let weekly_hours = if is_parallel_delivery(spec) {
        rates.weekly_hours.dual_platform
    } else {
        rates.weekly_hours.single_platform
    };
    let deadline_weeks = (total_hours / weekly_hours).ceil() as u32;

    let support_cost = round_currency(development_cost as f64 * rates.support_rate);

    tracing::debug!(total_hours, development_cost, deadline_weeks, "estimate computed");

    Estimate {
        development_cost,
        deadline_weeks,
        support_cost,
        breakdown: CostBreakdown {
            base_cost: round_currency(base_hours * hourly_rate),
            complexity_multiplier,
            features_cost: round_currency(features_hours * hourly_rate),
            pages_cost: round_currency(pages_hours * hourly_rate),
            tech_adjustment,
            total_hours,
            hourly_rate: rates.hourly_rate,
        },
    }
}

//! Core domain logic for the project estimator.
//!
//! This crate contains the fundamental types and logic for:
//! - Input: project descriptions and their strongly typed vocabulary
//! - Rates: the rate card of base hours, multipliers, and prices
//! - Catalog: features and technologies a project subtype implies
//! - Estimate: the pure cost/timeline formula and its breakdown
//! - Validate: strict admission checks for interactive surfaces

pub mod catalog;
mod estimate;
pub mod input;
pub mod rates;
pub mod validate;

pub use estimate::{
    CostBreakdown, Estimate, calculate_estimate, effective_features, effective_tech,
    is_parallel_delivery,
};
pub use input::{
    Complexity, Platform, ProjectSpec, ProjectType, UnknownComplexity, UnknownPlatform,
    UnknownProjectType,
};
pub use rates::{ComplexityMultipliers, RateCard, WeeklyHours};
pub use validate::{MAX_FEATURES, MAX_PAGES, MAX_TECH, ValidationError, validate};

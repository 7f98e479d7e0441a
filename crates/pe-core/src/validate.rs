//! Strict admission checks for project descriptions.
//!
//! The engine itself is total and shrugs off oddities like unknown feature
//! identifiers. Interactive surfaces should not: a wizard that lets a user
//! submit zero pages or a thousand selected features is broken upstream.
//! [`validate`] draws that line once so every caller rejects the same
//! inputs with the same messages.

use thiserror::Error;

use crate::input::ProjectSpec;

/// Upper bound on the page count a description may claim.
pub const MAX_PAGES: u32 = 500;

/// Upper bound on explicitly selected features.
pub const MAX_FEATURES: usize = 40;

/// Upper bound on explicitly selected technologies.
pub const MAX_TECH: usize = 20;

/// Why a project description was refused at the boundary.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("page count must be at least 1")]
    NoPages,

    #[error("page count {pages} exceeds the maximum of {max}")]
    TooManyPages { pages: u32, max: u32 },

    #[error("{count} features selected, maximum is {max}")]
    TooManyFeatures { count: usize, max: usize },

    #[error("{count} technologies selected, maximum is {max}")]
    TooManyTech { count: usize, max: usize },

    #[error("subtype must not be blank")]
    BlankSubtype,

    #[error("feature identifiers must not be blank")]
    BlankFeature,

    #[error("technology identifiers must not be blank")]
    BlankTech,
}

/// Checks a project description against the boundary rules.
///
/// Returns the first violation found, in field order. Passing validation
/// does not certify that every identifier is priced; unpriced identifiers
/// are legitimate and contribute nothing to the estimate.
pub fn validate(spec: &ProjectSpec) -> Result<(), ValidationError> {
    if spec.pages == 0 {
        return Err(ValidationError::NoPages);
    }
    if spec.pages > MAX_PAGES {
        return Err(ValidationError::TooManyPages {
            pages: spec.pages,
            max: MAX_PAGES,
        });
    }
    if spec.features.len() > MAX_FEATURES {
        return Err(ValidationError::TooManyFeatures {
            count: spec.features.len(),
            max: MAX_FEATURES,
        });
    }
    if spec.tech_stack.len() > MAX_TECH {
        return Err(ValidationError::TooManyTech {
            count: spec.tech_stack.len(),
            max: MAX_TECH,
        });
    }
    if let Some(subtype) = spec.subtype.as_deref() {
        if subtype.trim().is_empty() {
            return Err(ValidationError::BlankSubtype);
        }
    }
    if spec.features.iter().any(|f| f.trim().is_empty()) {
        return Err(ValidationError::BlankFeature);
    }
    if spec.tech_stack.iter().any(|t| t.trim().is_empty()) {
        return Err(ValidationError::BlankTech);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::input::{Complexity, ProjectType};

    fn valid_spec() -> ProjectSpec {
        ProjectSpec {
            project_type: ProjectType::Web,
            subtype: Some("saas".to_string()),
            complexity: Complexity::Standard,
            features: vec!["auth".to_string()],
            pages: 12,
            tech_stack: vec!["react".to_string()],
            platforms: vec![],
        }
    }

    #[test]
    fn accepts_a_typical_description() {
        assert_eq!(validate(&valid_spec()), Ok(()));
    }

    #[test]
    fn accepts_the_minimal_description() {
        let spec = ProjectSpec {
            project_type: ProjectType::Other,
            subtype: None,
            complexity: Complexity::Mvp,
            features: vec![],
            pages: 1,
            tech_stack: vec![],
            platforms: vec![],
        };
        assert_eq!(validate(&spec), Ok(()));
    }

    #[test]
    fn rejects_zero_pages() {
        let mut spec = valid_spec();
        spec.pages = 0;
        assert_eq!(validate(&spec), Err(ValidationError::NoPages));
    }

    #[test]
    fn rejects_pages_over_the_cap() {
        let mut spec = valid_spec();
        spec.pages = MAX_PAGES + 1;
        assert_eq!(
            validate(&spec),
            Err(ValidationError::TooManyPages {
                pages: 501,
                max: 500
            })
        );
    }

    #[test]
    fn accepts_pages_at_the_cap() {
        let mut spec = valid_spec();
        spec.pages = MAX_PAGES;
        assert_eq!(validate(&spec), Ok(()));
    }

    #[test]
    fn rejects_oversized_feature_lists() {
        let mut spec = valid_spec();
        spec.features = (0..=MAX_FEATURES).map(|i| format!("feature-{i}")).collect();
        assert_eq!(
            validate(&spec),
            Err(ValidationError::TooManyFeatures {
                count: MAX_FEATURES + 1,
                max: MAX_FEATURES
            })
        );
    }

    #[test]
    fn rejects_oversized_tech_lists() {
        let mut spec = valid_spec();
        spec.tech_stack = (0..=MAX_TECH).map(|i| format!("tech-{i}")).collect();
        assert_eq!(
            validate(&spec),
            Err(ValidationError::TooManyTech {
                count: MAX_TECH + 1,
                max: MAX_TECH
            })
        );
    }

    #[test]
    fn rejects_blank_subtype() {
        let mut spec = valid_spec();
        spec.subtype = Some("   ".to_string());
        assert_eq!(validate(&spec), Err(ValidationError::BlankSubtype));
    }

    #[test]
    fn rejects_blank_feature_identifier() {
        let mut spec = valid_spec();
        spec.features.push(String::new());
        assert_eq!(validate(&spec), Err(ValidationError::BlankFeature));
    }

    #[test]
    fn rejects_blank_tech_identifier() {
        let mut spec = valid_spec();
        spec.tech_stack.push(" ".to_string());
        assert_eq!(validate(&spec), Err(ValidationError::BlankTech));
    }

    #[test]
    fn unknown_identifiers_still_pass() {
        // Pricing is the rate card's concern, not admission's.
        let mut spec = valid_spec();
        spec.features.push("quantum-sync".to_string());
        spec.tech_stack.push("cobol".to_string());
        assert_eq!(validate(&spec), Ok(()));
    }

    #[test]
    fn errors_render_actionable_messages() {
        let error = ValidationError::TooManyPages {
            pages: 900,
            max: MAX_PAGES,
        };
        assert_eq!(
            error.to_string(),
            "page count 900 exceeds the maximum of 500"
        );
    }
}

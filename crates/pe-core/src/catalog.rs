//! Subtype catalog: what a finer-grained project classification bundles.
//!
//! Choosing a subtype spares the user from re-selecting capability the
//! choice already guarantees: a RAG chatbot includes retrieval, an
//! Electron app includes Electron. The estimator unions these implied sets
//! with the explicit selections, so nothing is ever counted twice.

use crate::input::ProjectType;

/// Features automatically included by a subtype choice.
///
/// Unknown `(project_type, subtype)` pairs imply nothing.
pub fn implied_features(project_type: ProjectType, subtype: &str) -> &'static [&'static str] {
    match (project_type, subtype) {
        (ProjectType::Ai, "rag") => &["rag"],
        (ProjectType::Ai, "chatbot") => &["chat"],
        (ProjectType::Ai, "voice-assistant") => &["voice-input"],
        (ProjectType::Ai, "image-generation") => &["image-generation"],
        (ProjectType::Web, "ecommerce") => &["catalog", "payments"],
        (ProjectType::Web, "saas") => &["auth", "admin-panel"],
        (ProjectType::Mobile, "marketplace") => &["catalog", "payments", "chat"],
        (ProjectType::Telegram, "shop-bot") => &["catalog", "payments"],
        _ => &[],
    }
}

/// Technology automatically implied by a subtype choice.
///
/// Unknown `(project_type, subtype)` pairs imply `None`.
pub fn implied_tech(project_type: ProjectType, subtype: &str) -> Option<&'static str> {
    match (project_type, subtype) {
        (ProjectType::Ai, "rag") => Some("python"),
        (ProjectType::Desktop, "electron") => Some("electron"),
        (ProjectType::Desktop, "tauri") => Some("tauri"),
        (ProjectType::Telegram, "bot" | "shop-bot") => Some("aiogram"),
        (ProjectType::Telegram, "miniapp") => Some("react"),
        (ProjectType::Mobile, "crossplatform") => Some("flutter"),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rates::RateCard;

    #[test]
    fn rag_subtype_bundles_retrieval() {
        assert_eq!(implied_features(ProjectType::Ai, "rag"), &["rag"]);
        assert_eq!(implied_tech(ProjectType::Ai, "rag"), Some("python"));
    }

    #[test]
    fn electron_subtype_implies_tech_only() {
        assert!(implied_features(ProjectType::Desktop, "electron").is_empty());
        assert_eq!(
            implied_tech(ProjectType::Desktop, "electron"),
            Some("electron")
        );
    }

    #[test]
    fn unknown_subtype_implies_nothing() {
        assert!(implied_features(ProjectType::Web, "brochure").is_empty());
        assert_eq!(implied_tech(ProjectType::Web, "brochure"), None);
    }

    #[test]
    fn subtype_is_scoped_to_its_project_type() {
        // "rag" means something under `ai`, nothing under `web`.
        assert!(implied_features(ProjectType::Web, "rag").is_empty());
        assert_eq!(implied_tech(ProjectType::Web, "rag"), None);
    }

    #[test]
    fn every_implied_identifier_is_priced() {
        // Implied features/tech must resolve against the default card, or a
        // subtype would silently bundle unpriced work.
        let card = RateCard::default();
        let pairs = [
            (ProjectType::Ai, "rag"),
            (ProjectType::Ai, "chatbot"),
            (ProjectType::Ai, "voice-assistant"),
            (ProjectType::Ai, "image-generation"),
            (ProjectType::Web, "ecommerce"),
            (ProjectType::Web, "saas"),
            (ProjectType::Mobile, "marketplace"),
            (ProjectType::Mobile, "crossplatform"),
            (ProjectType::Telegram, "bot"),
            (ProjectType::Telegram, "shop-bot"),
            (ProjectType::Telegram, "miniapp"),
            (ProjectType::Desktop, "electron"),
            (ProjectType::Desktop, "tauri"),
        ];

        for (project_type, subtype) in pairs {
            for feature in implied_features(project_type, subtype) {
                assert!(
                    card.feature_hours.contains_key(*feature),
                    "{project_type}/{subtype} implies unpriced feature {feature}"
                );
            }
            if let Some(tech) = implied_tech(project_type, subtype) {
                assert!(
                    card.tech_factors.contains_key(tech),
                    "{project_type}/{subtype} implies unpriced tech {tech}"
                );
            }
        }
    }
}

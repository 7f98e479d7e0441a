//! Claude API integration for the project estimator.
//!
//! Provides a second opinion on the formula-based estimate: the model sees
//! the same project description and returns its own cost, deadline, and
//! support figures with a short justification. Callers decide how to
//! present the two; [`is_plausible`] gives them a sanity gate so a
//! hallucinated number never reaches a client quote.

use std::fmt;
use std::time::Duration;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use pe_core::ProjectSpec;

/// Default request timeout for API calls.
const DEFAULT_TIMEOUT: Duration = Duration::from_secs(60);
const ANTHROPIC_API_URL: &str = "https://api.anthropic.com/v1/messages";
const ANTHROPIC_VERSION: &str = "2023-06-01";
const ESTIMATE_MAX_TOKENS: u32 = 600;
const ESTIMATE_TEMPERATURE: f32 = 0.2;

/// Costs above this are treated as hallucinated, not negotiated.
const MAX_PLAUSIBLE_COST: f64 = 5_000_000.0;
/// Five years of delivery is beyond anything this estimator quotes.
const MAX_PLAUSIBLE_WEEKS: f64 = 260.0;

/// LLM client errors.
#[derive(Debug, Error)]
pub enum LlmError {
    /// The provided API key was invalid.
    #[error("invalid API key: {reason}")]
    InvalidApiKey { reason: &'static str },
    /// Failed to build HTTP client.
    #[error("failed to build HTTP client: {0}")]
    ClientBuild(#[source] reqwest::Error),
    /// HTTP request failed.
    #[error("request failed: {0}")]
    Request(#[from] reqwest::Error),
    /// API returned an error response.
    #[error("API error: {message}")]
    Api { message: String },
    /// Failed to parse response.
    #[error("invalid response: {0}")]
    InvalidResponse(String),
}

/// Claude API client.
///
/// # Thread Safety
///
/// The client is safe to clone and share across threads. Each clone shares
/// the underlying HTTP connection pool.
pub struct Client {
    http: reqwest::Client,
    api_key: String,
}

impl fmt::Debug for Client {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Client")
            .field("api_key", &"[REDACTED]")
            .finish_non_exhaustive()
    }
}

impl Client {
    /// Creates a new client with the given API key.
    ///
    /// # Errors
    ///
    /// Returns an error if the API key is empty or whitespace-only, or if
    /// the HTTP client fails to build.
    pub fn new(api_key: impl Into<String>) -> Result<Self, LlmError> {
        let api_key = api_key.into();

        // Validate API key
        if api_key.is_empty() {
            return Err(LlmError::InvalidApiKey {
                reason: "API key cannot be empty",
            });
        }
        if api_key.trim().is_empty() {
            return Err(LlmError::InvalidApiKey {
                reason: "API key cannot be whitespace-only",
            });
        }

        // Build HTTP client with timeout
        let http = reqwest::Client::builder()
            .timeout(DEFAULT_TIMEOUT)
            .build()
            .map_err(LlmError::ClientBuild)?;

        Ok(Self { http, api_key })
    }

    /// Asks the model for an independent estimate of a project description.
    pub async fn estimate_project(
        &self,
        model: &str,
        spec: &ProjectSpec,
    ) -> Result<AiEstimate, LlmError> {
        let prompt = build_estimate_prompt(spec);
        let request = MessageRequest {
            model: model.to_string(),
            max_tokens: ESTIMATE_MAX_TOKENS,
            temperature: ESTIMATE_TEMPERATURE,
            messages: vec![Message {
                role: "user",
                content: prompt,
            }],
        };

        let response = self
            .http
            .post(ANTHROPIC_API_URL)
            .header("x-api-key", &self.api_key)
            .header("anthropic-version", ANTHROPIC_VERSION)
            .json(&request)
            .send()
            .await?;

        let status = response.status();
        let body = response.text().await?;
        if !status.is_success() {
            return Err(parse_api_error(&body).unwrap_or_else(|| LlmError::Api {
                message: format!("status {status}: {body}"),
            }));
        }

        let payload: MessageResponse = serde_json::from_str(&body)
            .map_err(|err| LlmError::InvalidResponse(err.to_string()))?;
        let text = extract_text(payload.content)?;
        let estimate = parse_ai_estimate(&text)?;
        Ok(normalize_estimate(estimate))
    }
}

/// An estimate produced by the model rather than the formula.
///
/// Figures are kept as the floats the model returned; nothing here is
/// rounded or trusted until it passes [`is_plausible`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AiEstimate {
    /// Development cost in whole currency units, as claimed by the model.
    pub development_cost: f64,
    /// Delivery timeline in weeks, as claimed by the model.
    pub deadline_weeks: f64,
    /// First-year support cost, as claimed by the model.
    pub support_cost: f64,
    /// Short justification of the figures.
    #[serde(default)]
    pub reasoning: Option<String>,
}

/// Whether an AI estimate is believable enough to show next to the
/// formula's result.
///
/// Rejects non-finite or non-positive figures, costs beyond anything the
/// company quotes, multi-year deadlines, and support priced above the
/// development itself.
pub fn is_plausible(estimate: &AiEstimate) -> bool {
    let AiEstimate {
        development_cost,
        deadline_weeks,
        support_cost,
        ..
    } = *estimate;

    development_cost.is_finite()
        && deadline_weeks.is_finite()
        && support_cost.is_finite()
        && development_cost > 0.0
        && deadline_weeks > 0.0
        && support_cost > 0.0
        && development_cost <= MAX_PLAUSIBLE_COST
        && support_cost <= MAX_PLAUSIBLE_COST
        && deadline_weeks <= MAX_PLAUSIBLE_WEEKS
        && support_cost <= development_cost
}

#[derive(Debug, Serialize)]
struct MessageRequest {
    model: String,
    max_tokens: u32,
    temperature: f32,
    messages: Vec<Message>,
}

#[derive(Debug, Serialize)]
struct Message {
    role: &'static str,
    content: String,
}

#[derive(Debug, Deserialize)]
struct MessageResponse {
    content: Vec<ContentBlock>,
}

#[derive(Debug, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
enum ContentBlock {
    Text { text: String },
}

fn extract_text(blocks: Vec<ContentBlock>) -> Result<String, LlmError> {
    let mut pieces = Vec::new();
    for block in blocks {
        let ContentBlock::Text { text } = block;
        pieces.push(text);
    }
    if pieces.is_empty() {
        return Err(LlmError::InvalidResponse(
            "missing text content".to_string(),
        ));
    }
    Ok(pieces.join("\n"))
}

fn parse_api_error(body: &str) -> Option<LlmError> {
    #[derive(Deserialize)]
    struct ErrorPayload {
        error: ErrorDetails,
    }

    #[derive(Deserialize)]
    struct ErrorDetails {
        message: String,
    }

    serde_json::from_str::<ErrorPayload>(body)
        .ok()
        .map(|payload| LlmError::Api {
            message: payload.error.message,
        })
}

fn build_estimate_prompt(spec: &ProjectSpec) -> String {
    let mut lines = Vec::new();
    lines.push(
        "You are a software project estimator at a development agency.".to_string(),
    );
    lines.push(
        "Estimate the project below: development cost in USD, delivery deadline in weeks, and first-year support cost in USD.".to_string(),
    );
    lines.push(
        "Return strict JSON: {\"developmentCost\":0,\"deadlineWeeks\":0,\"supportCost\":0,\"reasoning\":\"...\"}".to_string(),
    );
    lines.push("Rules:".to_string());
    lines.push("- All three figures are positive numbers, costs in whole USD.".to_string());
    lines.push("- Keep the reasoning to one or two sentences.".to_string());
    lines.push("- Do not wrap the JSON in markdown fences or commentary.".to_string());
    lines.push(String::new());
    lines.push(format!("project_type: {}", spec.project_type));
    if let Some(subtype) = &spec.subtype {
        lines.push(format!("subtype: {subtype}"));
    }
    lines.push(format!("complexity: {}", spec.complexity));
    lines.push(format!("pages: {}", spec.pages));
    if !spec.features.is_empty() {
        lines.push(format!("features: {}", spec.features.join(", ")));
    }
    if !spec.tech_stack.is_empty() {
        lines.push(format!("tech_stack: {}", spec.tech_stack.join(", ")));
    }
    if !spec.platforms.is_empty() {
        let rendered = spec
            .platforms
            .iter()
            .map(ToString::to_string)
            .collect::<Vec<_>>()
            .join(", ");
        lines.push(format!("platforms: {rendered}"));
    }
    lines.join("\n")
}

fn parse_ai_estimate(text: &str) -> Result<AiEstimate, LlmError> {
    serde_json::from_str(text).map_err(|err| LlmError::InvalidResponse(err.to_string()))
}

fn normalize_estimate(mut estimate: AiEstimate) -> AiEstimate {
    estimate.reasoning = estimate
        .reasoning
        .map(|reasoning| reasoning.trim().to_string())
        .filter(|reasoning| !reasoning.is_empty());
    estimate
}

#[cfg(test)]
mod tests {
    use super::*;
    use pe_core::{Complexity, Platform, ProjectType};

    fn sample_spec() -> ProjectSpec {
        ProjectSpec {
            project_type: ProjectType::Mobile,
            subtype: Some("marketplace".to_string()),
            complexity: Complexity::Standard,
            features: vec!["auth".to_string(), "payments".to_string()],
            pages: 14,
            tech_stack: vec!["flutter".to_string()],
            platforms: vec![Platform::Ios, Platform::Android],
        }
    }

    fn plausible() -> AiEstimate {
        AiEstimate {
            development_cost: 24_000.0,
            deadline_weeks: 8.0,
            support_cost: 3_600.0,
            reasoning: Some("Mid-sized dual-platform build.".to_string()),
        }
    }

    #[test]
    fn client_rejects_empty_api_key() {
        assert!(matches!(
            Client::new(""),
            Err(LlmError::InvalidApiKey { .. })
        ));
    }

    #[test]
    fn client_rejects_whitespace_api_key() {
        assert!(matches!(
            Client::new("   "),
            Err(LlmError::InvalidApiKey { .. })
        ));
    }

    #[test]
    fn client_accepts_valid_api_key() {
        assert!(Client::new("sk-ant-api03-valid-key").is_ok());
    }

    #[test]
    fn client_debug_redacts_api_key() {
        let client = Client::new("secret-key").unwrap();
        let debug = format!("{client:?}");
        assert!(!debug.contains("secret-key"));
        assert!(debug.contains("[REDACTED]"));
    }

    #[test]
    fn build_estimate_prompt_includes_description_fields() {
        let prompt = build_estimate_prompt(&sample_spec());
        assert!(prompt.contains("project_type: mobile"));
        assert!(prompt.contains("subtype: marketplace"));
        assert!(prompt.contains("complexity: standard"));
        assert!(prompt.contains("pages: 14"));
        assert!(prompt.contains("features: auth, payments"));
        assert!(prompt.contains("tech_stack: flutter"));
        assert!(prompt.contains("platforms: ios, android"));
    }

    #[test]
    fn build_estimate_prompt_omits_empty_sections() {
        let mut spec = sample_spec();
        spec.subtype = None;
        spec.features.clear();
        spec.tech_stack.clear();
        spec.platforms.clear();

        let prompt = build_estimate_prompt(&spec);
        assert!(!prompt.contains("subtype:"));
        assert!(!prompt.contains("features:"));
        assert!(!prompt.contains("tech_stack:"));
        assert!(!prompt.contains("platforms:"));
    }

    #[test]
    fn build_estimate_prompt_demands_strict_json() {
        let prompt = build_estimate_prompt(&sample_spec());
        assert!(prompt.contains("\"developmentCost\""));
        assert!(prompt.contains("\"deadlineWeeks\""));
        assert!(prompt.contains("\"supportCost\""));
    }

    #[test]
    fn parse_ai_estimate_accepts_json() {
        let input = r#"{"developmentCost":18000,"deadlineWeeks":6,"supportCost":2700,"reasoning":"Routine scope."}"#;
        let parsed = parse_ai_estimate(input).unwrap();
        assert!((parsed.development_cost - 18_000.0).abs() < f64::EPSILON);
        assert!((parsed.deadline_weeks - 6.0).abs() < f64::EPSILON);
        assert!((parsed.support_cost - 2_700.0).abs() < f64::EPSILON);
        assert_eq!(parsed.reasoning.as_deref(), Some("Routine scope."));
    }

    #[test]
    fn parse_ai_estimate_tolerates_missing_reasoning() {
        let input = r#"{"developmentCost":18000,"deadlineWeeks":6,"supportCost":2700}"#;
        let parsed = parse_ai_estimate(input).unwrap();
        assert_eq!(parsed.reasoning, None);
    }

    #[test]
    fn parse_ai_estimate_rejects_invalid_json() {
        let err = parse_ai_estimate("not-json").unwrap_err();
        assert!(matches!(err, LlmError::InvalidResponse(_)));
    }

    #[test]
    fn parse_ai_estimate_rejects_missing_figures() {
        let err = parse_ai_estimate(r#"{"developmentCost":18000}"#).unwrap_err();
        assert!(matches!(err, LlmError::InvalidResponse(_)));
    }

    #[test]
    fn normalize_estimate_trims_reasoning() {
        let mut estimate = plausible();
        estimate.reasoning = Some("  padded  ".to_string());
        assert_eq!(
            normalize_estimate(estimate).reasoning.as_deref(),
            Some("padded")
        );
    }

    #[test]
    fn normalize_estimate_drops_blank_reasoning() {
        let mut estimate = plausible();
        estimate.reasoning = Some("   ".to_string());
        assert_eq!(normalize_estimate(estimate).reasoning, None);
    }

    #[test]
    fn plausible_estimate_passes_the_gate() {
        assert!(is_plausible(&plausible()));
    }

    #[test]
    fn zero_cost_is_implausible() {
        let mut estimate = plausible();
        estimate.development_cost = 0.0;
        assert!(!is_plausible(&estimate));
    }

    #[test]
    fn negative_weeks_are_implausible() {
        let mut estimate = plausible();
        estimate.deadline_weeks = -2.0;
        assert!(!is_plausible(&estimate));
    }

    #[test]
    fn astronomic_cost_is_implausible() {
        let mut estimate = plausible();
        estimate.development_cost = 80_000_000.0;
        assert!(!is_plausible(&estimate));
    }

    #[test]
    fn marathon_deadline_is_implausible() {
        let mut estimate = plausible();
        estimate.deadline_weeks = 400.0;
        assert!(!is_plausible(&estimate));
    }

    #[test]
    fn support_above_development_is_implausible() {
        let mut estimate = plausible();
        estimate.support_cost = estimate.development_cost * 2.0;
        assert!(!is_plausible(&estimate));
    }

    #[test]
    fn nan_figures_are_implausible() {
        let mut estimate = plausible();
        estimate.support_cost = f64::NAN;
        assert!(!is_plausible(&estimate));
    }

    #[test]
    fn ai_estimate_round_trips_camel_case() {
        let json = serde_json::to_value(plausible()).unwrap();
        assert!(json.get("developmentCost").is_some());
        assert!(json.get("deadlineWeeks").is_some());
        assert!(json.get("supportCost").is_some());
    }
}

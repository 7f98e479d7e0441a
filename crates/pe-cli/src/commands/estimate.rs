//! Estimate command producing a client-ready project quote.
//!
//! The project description comes either from flags or, with `--input`,
//! from a JSON document (the shape interactive wizards submit). The quote
//! always carries the deterministic formula result; with `--ai`, Claude's
//! second opinion takes the headline when it survives the plausibility
//! gate, and the formula stays attached as the working.

use std::fmt::Write as _;
use std::fs;
use std::io::{Read, Write};
use std::path::PathBuf;

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use clap::Args;
use serde::Serialize;
use uuid::Uuid;

use pe_core::{
    Complexity, Estimate, Platform, ProjectSpec, ProjectType, calculate_estimate,
    effective_features, effective_tech, is_parallel_delivery, validate,
};
use pe_llm::{AiEstimate, Client, is_plausible};

use crate::Config;

#[derive(Debug, Args)]
pub struct EstimateArgs {
    /// Project type (mobile, web, telegram, ai, desktop, other).
    #[arg(
        long,
        value_name = "TYPE",
        required_unless_present = "input",
        conflicts_with = "input"
    )]
    pub project_type: Option<ProjectType>,

    /// Subtype preset, e.g. ecommerce, saas, rag, shop-bot.
    #[arg(long, value_name = "ID", conflicts_with = "input")]
    pub subtype: Option<String>,

    /// Complexity tier (mvp, standard, enterprise).
    #[arg(
        long,
        value_name = "TIER",
        default_value_t = Complexity::Standard,
        conflicts_with = "input"
    )]
    pub complexity: Complexity,

    /// Number of screens or pages.
    #[arg(
        long,
        value_name = "COUNT",
        required_unless_present = "input",
        conflicts_with = "input"
    )]
    pub pages: Option<u32>,

    /// Feature to include; repeat for several.
    #[arg(long = "feature", value_name = "ID", conflicts_with = "input")]
    pub features: Vec<String>,

    /// Technology in the stack; repeat for several.
    #[arg(long = "tech", value_name = "ID", conflicts_with = "input")]
    pub tech_stack: Vec<String>,

    /// Target platform for mobile projects (ios, android); repeat for both.
    #[arg(long = "platform", value_name = "PLATFORM", conflicts_with = "input")]
    pub platforms: Vec<Platform>,

    /// Read the project description as JSON from a file, or - for stdin.
    #[arg(long, value_name = "PATH")]
    pub input: Option<PathBuf>,

    /// Ask Claude for a second opinion and prefer it when plausible.
    #[arg(long)]
    pub ai: bool,

    /// Model for the AI estimate (defaults to the configured model).
    #[arg(long, value_name = "MODEL", requires = "ai")]
    pub model: Option<String>,

    /// Print the quote as JSON instead of the human-readable summary.
    #[arg(long)]
    pub json: bool,
}

/// Which engine produced the quote's headline figures.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum QuoteSource {
    Formula,
    Ai,
}

impl std::fmt::Display for QuoteSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Formula => f.write_str("formula"),
            Self::Ai => f.write_str("ai"),
        }
    }
}

/// A client-ready quote: headline figures, the description they answer,
/// and the full formula working behind them.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct QuoteDocument {
    pub id: Uuid,
    pub generated_at: DateTime<Utc>,
    pub source: QuoteSource,
    pub development_cost: u64,
    pub deadline_weeks: u32,
    pub support_cost: u64,
    pub spec: ProjectSpec,
    pub formula: Estimate,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ai: Option<AiEstimate>,
}

pub fn run<W: Write>(writer: &mut W, args: &EstimateArgs, config: &Config) -> Result<()> {
    let spec = build_spec(args)?;
    validate(&spec)?;

    let formula = calculate_estimate(&spec, &config.rates);

    let ai = if args.ai {
        request_ai_estimate(args, config, &spec)?
    } else {
        None
    };

    let quote = build_quote(Uuid::new_v4(), Utc::now(), spec, formula, ai);

    if args.json {
        writeln!(writer, "{}", serde_json::to_string_pretty(&quote)?)?;
    } else {
        write!(writer, "{}", format_quote(&quote))?;
    }
    Ok(())
}

// ========== Input Assembly ==========

/// Builds the project description from `--input` JSON or from flags.
fn build_spec(args: &EstimateArgs) -> Result<ProjectSpec> {
    if let Some(path) = &args.input {
        let raw = if path.as_os_str() == "-" {
            let mut buffer = String::new();
            std::io::stdin()
                .read_to_string(&mut buffer)
                .context("failed to read project description from stdin")?;
            buffer
        } else {
            fs::read_to_string(path)
                .with_context(|| format!("failed to read {}", path.display()))?
        };
        serde_json::from_str(&raw).context("invalid project description")
    } else {
        let project_type = args
            .project_type
            .context("--project-type is required without --input")?;
        let pages = args.pages.context("--pages is required without --input")?;
        Ok(ProjectSpec {
            project_type,
            subtype: args.subtype.clone(),
            complexity: args.complexity,
            features: args.features.clone(),
            pages,
            tech_stack: args.tech_stack.clone(),
            platforms: args.platforms.clone(),
        })
    }
}

// ========== AI Second Opinion ==========

fn request_ai_estimate(
    args: &EstimateArgs,
    config: &Config,
    spec: &ProjectSpec,
) -> Result<Option<AiEstimate>> {
    let api_key = config
        .api_key
        .as_deref()
        .map(str::trim)
        .filter(|value| !value.is_empty())
        .ok_or_else(|| anyhow::anyhow!("missing Claude API key (set PE_API_KEY or config.toml)"))?;

    let model = args.model.as_deref().unwrap_or(&config.model);
    let client = Client::new(api_key.to_string()).context("failed to create LLM client")?;
    let runtime = tokio::runtime::Runtime::new().context("failed to initialize tokio runtime")?;
    let estimate = runtime
        .block_on(client.estimate_project(model, spec))
        .context("failed to get AI estimate")?;

    if is_plausible(&estimate) {
        Ok(Some(estimate))
    } else {
        tracing::warn!(?estimate, "discarding implausible AI estimate");
        Ok(None)
    }
}

// ========== Quote Assembly ==========

/// Assembles the quote document.
///
/// `ai` must already have passed the plausibility gate; when present its
/// figures take the headline, rounded the same way the formula rounds its
/// own (currency to whole units, weeks ceiling-rounded).
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
pub fn build_quote(
    id: Uuid,
    generated_at: DateTime<Utc>,
    spec: ProjectSpec,
    formula: Estimate,
    ai: Option<AiEstimate>,
) -> QuoteDocument {
    let (source, development_cost, deadline_weeks, support_cost) = match &ai {
        Some(estimate) => (
            QuoteSource::Ai,
            estimate.development_cost.round() as u64,
            estimate.deadline_weeks.ceil() as u32,
            estimate.support_cost.round() as u64,
        ),
        None => (
            QuoteSource::Formula,
            formula.development_cost,
            formula.deadline_weeks,
            formula.support_cost,
        ),
    };

    QuoteDocument {
        id,
        generated_at,
        source,
        development_cost,
        deadline_weeks,
        support_cost,
        spec,
        formula,
        ai,
    }
}

// ========== Formatting ==========

/// Formats whole currency units with thousands separators, e.g. `$17,424`.
fn format_currency(amount: u64) -> String {
    let digits = amount.to_string();
    let mut formatted = String::with_capacity(digits.len() + digits.len() / 3 + 1);
    for (index, digit) in digits.chars().enumerate() {
        if index > 0 && (digits.len() - index) % 3 == 0 {
            formatted.push(',');
        }
        formatted.push(digit);
    }
    format!("${formatted}")
}

fn format_weeks(weeks: u32) -> String {
    if weeks == 1 {
        "1 week".to_string()
    } else {
        format!("{weeks} weeks")
    }
}

fn join_or_none(values: impl IntoIterator<Item = String>) -> String {
    let joined = values.into_iter().collect::<Vec<_>>().join(", ");
    if joined.is_empty() {
        "(none)".to_string()
    } else {
        joined
    }
}

/// Formats the human-readable quote output.
pub fn format_quote(quote: &QuoteDocument) -> String {
    let mut output = String::new();

    let title = match &quote.spec.subtype {
        Some(subtype) => format!("PROJECT ESTIMATE: {} / {subtype}", quote.spec.project_type),
        None => format!("PROJECT ESTIMATE: {}", quote.spec.project_type),
    };
    writeln!(output, "{title}").unwrap();
    writeln!(output, "{}", "─".repeat(title.chars().count())).unwrap();
    writeln!(output).unwrap();

    writeln!(output, "{:<11} {}", "Quote:", quote.id).unwrap();
    writeln!(
        output,
        "{:<11} {}",
        "Generated:",
        quote.generated_at.format("%Y-%m-%d %H:%M UTC")
    )
    .unwrap();
    writeln!(output, "{:<11} {}", "Source:", quote.source).unwrap();
    writeln!(output).unwrap();

    writeln!(output, "{:<11} {}", "Complexity:", quote.spec.complexity).unwrap();
    writeln!(output, "{:<11} {}", "Pages:", quote.spec.pages).unwrap();
    writeln!(
        output,
        "{:<11} {}",
        "Features:",
        join_or_none(effective_features(&quote.spec))
    )
    .unwrap();
    writeln!(
        output,
        "{:<11} {}",
        "Tech stack:",
        join_or_none(effective_tech(&quote.spec))
    )
    .unwrap();
    if !quote.spec.platforms.is_empty() {
        let mut line = quote
            .spec
            .platforms
            .iter()
            .map(ToString::to_string)
            .collect::<Vec<_>>()
            .join(", ");
        if is_parallel_delivery(&quote.spec) {
            line.push_str(" (parallel delivery)");
        }
        writeln!(output, "{:<11} {line}", "Platforms:").unwrap();
    }
    writeln!(output).unwrap();

    writeln!(output, "COST").unwrap();
    writeln!(output, "────").unwrap();
    writeln!(
        output,
        "{:<13} {}",
        "Development:",
        format_currency(quote.development_cost)
    )
    .unwrap();
    writeln!(
        output,
        "{:<13} {}",
        "Support/year:",
        format_currency(quote.support_cost)
    )
    .unwrap();
    writeln!(
        output,
        "{:<13} {}",
        "Deadline:",
        format_weeks(quote.deadline_weeks)
    )
    .unwrap();
    if let Some(reasoning) = quote.ai.as_ref().and_then(|ai| ai.reasoning.as_deref()) {
        writeln!(output, "{:<13} {reasoning}", "Reasoning:").unwrap();
    }
    writeln!(output).unwrap();

    let breakdown = &quote.formula.breakdown;
    writeln!(output, "BREAKDOWN").unwrap();
    writeln!(output, "─────────").unwrap();
    writeln!(
        output,
        "{:<16} {} × {:.2}",
        "Base:",
        format_currency(breakdown.base_cost),
        breakdown.complexity_multiplier
    )
    .unwrap();
    writeln!(
        output,
        "{:<16} {}",
        "Features:",
        format_currency(breakdown.features_cost)
    )
    .unwrap();
    writeln!(
        output,
        "{:<16} {}",
        "Pages:",
        format_currency(breakdown.pages_cost)
    )
    .unwrap();
    writeln!(
        output,
        "{:<16} ×{:.2}",
        "Tech adjustment:", breakdown.tech_adjustment
    )
    .unwrap();
    writeln!(
        output,
        "{:<16} {:.1} h @ {}/h",
        "Total hours:",
        breakdown.total_hours,
        format_currency(breakdown.hourly_rate)
    )
    .unwrap();
    if quote.source == QuoteSource::Ai {
        writeln!(
            output,
            "{:<16} {} / {}",
            "Formula total:",
            format_currency(quote.formula.development_cost),
            format_weeks(quote.formula.deadline_weeks)
        )
        .unwrap();
    }

    output
}

//! Rates command showing the active rate card.
//!
//! Prints the card the estimates are priced from, after config overrides
//! have been merged, so a surprising quote can be traced to its inputs.

use std::fmt::Write as _;
use std::io::Write;

use anyhow::Result;

use pe_core::{Complexity, RateCard};

use crate::Config;

pub fn run<W: Write>(writer: &mut W, json: bool, config: &Config) -> Result<()> {
    if json {
        writeln!(writer, "{}", serde_json::to_string_pretty(&config.rates)?)?;
    } else {
        write!(writer, "{}", format_rates(&config.rates))?;
    }
    Ok(())
}

/// Formats an hour quantity, dropping the fraction when it is whole.
fn format_hours(hours: f64) -> String {
    if hours.fract().abs() < f64::EPSILON {
        format!("{hours:.0}")
    } else {
        format!("{hours:.1}")
    }
}

/// Formats the human-readable rate card.
pub fn format_rates(rates: &RateCard) -> String {
    let mut output = String::new();

    writeln!(output, "RATE CARD").unwrap();
    writeln!(output, "─────────").unwrap();
    writeln!(output, "Hourly rate: ${}", rates.hourly_rate).unwrap();
    writeln!(
        output,
        "Support rate: {:.0}% of development cost per year",
        rates.support_rate * 100.0
    )
    .unwrap();
    writeln!(
        output,
        "Hours per page: {} h",
        format_hours(rates.hours_per_page)
    )
    .unwrap();
    writeln!(
        output,
        "Weekly output: {} h single platform, {} h dual platform",
        format_hours(rates.weekly_hours.single_platform),
        format_hours(rates.weekly_hours.dual_platform)
    )
    .unwrap();

    writeln!(output).unwrap();
    writeln!(output, "BASE HOURS").unwrap();
    writeln!(output, "──────────").unwrap();
    for (project_type, hours) in &rates.base_hours {
        writeln!(output, "  {project_type}: {} h", format_hours(*hours)).unwrap();
    }

    writeln!(output).unwrap();
    writeln!(output, "COMPLEXITY MULTIPLIERS").unwrap();
    writeln!(output, "──────────────────────").unwrap();
    for tier in Complexity::ALL {
        writeln!(
            output,
            "  {tier}: ×{:.2}",
            rates.complexity_multipliers.multiplier(tier)
        )
        .unwrap();
    }

    writeln!(output).unwrap();
    writeln!(output, "FEATURE HOURS").unwrap();
    writeln!(output, "─────────────").unwrap();
    for (feature, hours) in &rates.feature_hours {
        writeln!(output, "  {feature}: {} h", format_hours(*hours)).unwrap();
    }

    writeln!(output).unwrap();
    writeln!(output, "TECH FACTORS").unwrap();
    writeln!(output, "────────────").unwrap();
    for (tech, factor) in &rates.tech_factors {
        writeln!(output, "  {tech}: ×{factor:.2}").unwrap();
    }

    output
}

#[cfg(test)]
mod tests {
    use super::*;
    use insta::assert_snapshot;

    #[test]
    fn format_hours_drops_whole_fractions() {
        assert_eq!(format_hours(160.0), "160");
        assert_eq!(format_hours(6.0), "6");
        assert_eq!(format_hours(7.5), "7.5");
    }

    #[test]
    fn default_card_listing() {
        let output = format_rates(&RateCard::default());
        assert_snapshot!(output, @r"
RATE CARD
─────────
Hourly rate: $40
Support rate: 15% of development cost per year
Hours per page: 6 h
Weekly output: 40 h single platform, 80 h dual platform

BASE HOURS
──────────
  mobile: 160 h
  web: 120 h
  telegram: 60 h
  ai: 180 h
  desktop: 140 h
  other: 80 h

COMPLEXITY MULTIPLIERS
──────────────────────
  mvp: ×1.00
  standard: ×1.60
  enterprise: ×2.50

FEATURE HOURS
─────────────
  admin-panel: 56 h
  analytics: 24 h
  api-integration: 32 h
  auth: 24 h
  booking: 40 h
  catalog: 32 h
  chat: 48 h
  cms: 40 h
  file-upload: 16 h
  geolocation: 24 h
  image-generation: 48 h
  multilanguage: 20 h
  offline-mode: 32 h
  payments: 40 h
  push-notifications: 16 h
  rag: 80 h
  realtime-sync: 40 h
  search: 20 h
  voice-input: 40 h

TECH FACTORS
────────────
  aiogram: ×0.90
  angular: ×1.10
  django: ×1.00
  electron: ×1.05
  firebase: ×0.85
  flutter: ×0.90
  golang: ×1.05
  kotlin: ×1.10
  laravel: ×0.95
  mongodb: ×0.95
  nextjs: ×1.00
  nodejs: ×1.00
  postgres: ×1.00
  python: ×0.95
  react: ×1.00
  react-native: ×0.95
  rust: ×1.15
  swift: ×1.10
  tauri: ×1.00
  vue: ×0.95
");
    }

    #[test]
    fn run_writes_json_card() {
        let config = Config::default();
        let mut output = Vec::new();
        run(&mut output, true, &config).unwrap();

        let json: serde_json::Value = serde_json::from_slice(&output).unwrap();
        assert_eq!(json["hourly_rate"], 40);
        assert_eq!(json["base_hours"]["mobile"], 160.0);
        assert_eq!(json["tech_factors"]["rust"], 1.15);
    }

    #[test]
    fn overridden_rate_shows_up() {
        let rates = RateCard {
            hourly_rate: 100,
            ..RateCard::default()
        };
        let output = format_rates(&rates);
        assert!(output.contains("Hourly rate: $100"));
    }
}

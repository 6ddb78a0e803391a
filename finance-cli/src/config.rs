//! Loading `finance.toml`.

use std::path::Path;

use anyhow::{Context, Result};
use finance_core::config::FinanceConfig;
use tracing::debug;

/// Parses and validates settings from TOML text.
///
/// # Errors
///
/// Fails on malformed TOML or a setting out of range.
pub fn parse_config(text: &str) -> Result<FinanceConfig> {
    let config: FinanceConfig = toml::from_str(text).context("invalid settings file")?;
    config.validate().context("invalid settings")?;
    Ok(config)
}

/// Reads settings from `path`, or the defaults when no path is given.
///
/// # Errors
///
/// Fails when the file cannot be read or does not parse.
pub fn load_config(path: Option<&Path>) -> Result<FinanceConfig> {
    let Some(path) = path else {
        debug!("no settings file, using defaults");
        return Ok(FinanceConfig::default());
    };

    let text = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read settings: {}", path.display()))?;
    let config =
        parse_config(&text).with_context(|| format!("Failed to load: {}", path.display()))?;
    debug!(path = %path.display(), ?config, "loaded settings");
    Ok(config)
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use finance_core::validation::AgePolicy;
    use finance_core::wizard::VariantKind;
    use pretty_assertions::assert_eq;
    use rust_decimal_macros::dec;

    use super::*;

    #[test]
    fn empty_file_gives_defaults() {
        assert_eq!(parse_config("").unwrap(), FinanceConfig::default());
    }

    #[test]
    fn full_file_is_read() {
        let config = parse_config(
            r#"
            [wizard]
            variant = "quick-quote"
            apr = "6.9"
            age_policy = "exact-birthday"
            minimum_age = 21
            tab_navigation = true

            [carousel]
            autoplay_interval_ms = 3000
            small_breakpoint = 600
            medium_breakpoint = 1200
            "#,
        )
        .unwrap();

        assert_eq!(config.wizard.variant, VariantKind::QuickQuote);
        assert_eq!(config.wizard.apr, Some(dec!(6.9)));
        assert_eq!(config.wizard.age_policy, AgePolicy::ExactBirthday);
        assert_eq!(config.personal_rules().minimum_age, 21);
        assert!(config.wizard.tab_navigation);
        assert_eq!(config.autoplay_interval(), Duration::from_secs(3));
        assert_eq!(config.breakpoints().medium, 1200);
    }

    #[test]
    fn partial_section_keeps_other_defaults() {
        let config = parse_config("[carousel]\nautoplay_interval_ms = 2500\n").unwrap();

        assert_eq!(config.carousel.small_breakpoint, 640);
        assert_eq!(config.wizard.minimum_age, 18);
    }

    #[test]
    fn out_of_range_setting_is_rejected() {
        let err = parse_config("[carousel]\nautoplay_interval_ms = 0\n").unwrap_err();

        assert!(format!("{err:#}").contains("autoplay interval"));
    }

    #[test]
    fn unknown_variant_is_rejected() {
        assert!(parse_config("[wizard]\nvariant = \"lease\"\n").is_err());
    }

    #[test]
    fn missing_file_names_the_path() {
        let err = load_config(Some(Path::new("/nonexistent/finance.toml"))).unwrap_err();

        assert!(err.to_string().contains("/nonexistent/finance.toml"));
    }
}

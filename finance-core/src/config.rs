//! Product settings for the wizard and the carousels.
//!
//! Every field has a default, so an empty settings file describes the full
//! application form with the standard carousel timings.

use std::time::Duration;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::carousel::Breakpoints;
use crate::validation::{AgePolicy, PersonalRules};
use crate::wizard::{VariantKind, WizardVariant};

/// Errors from [`FinanceConfig::validate`].
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    /// The APR must be a percentage above 0 and below 100.
    #[error("APR must be above 0 and below 100, got {0}")]
    InvalidApr(Decimal),

    #[error("minimum age must not be negative, got {0}")]
    InvalidMinimumAge(i32),

    #[error("autoplay interval must be at least 1 ms")]
    InvalidInterval,

    /// The small breakpoint must sit below the medium one.
    #[error("small breakpoint ({small}) must be below medium breakpoint ({medium})")]
    InvalidBreakpoints { small: u32, medium: u32 },
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FinanceConfig {
    pub wizard: WizardSettings,
    pub carousel: CarouselSettings,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct WizardSettings {
    pub variant: VariantKind,
    /// Overrides the variant's representative APR.
    pub apr: Option<Decimal>,
    pub age_policy: AgePolicy,
    pub minimum_age: i32,
    /// Let applicants select any step directly.
    pub tab_navigation: bool,
}

impl Default for WizardSettings {
    fn default() -> Self {
        let rules = PersonalRules::default();
        Self {
            variant: VariantKind::default(),
            apr: None,
            age_policy: rules.age_policy,
            minimum_age: rules.minimum_age,
            tab_navigation: false,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CarouselSettings {
    pub autoplay_interval_ms: u64,
    pub small_breakpoint: u32,
    pub medium_breakpoint: u32,
}

impl Default for CarouselSettings {
    fn default() -> Self {
        let breakpoints = Breakpoints::default();
        Self {
            autoplay_interval_ms: 5_000,
            small_breakpoint: breakpoints.small,
            medium_breakpoint: breakpoints.medium,
        }
    }
}

impl FinanceConfig {
    /// Checks every setting against its valid range.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] for the first setting found out of range.
    ///
    /// # Example
    ///
    /// ```
    /// use rust_decimal_macros::dec;
    /// use finance_core::config::{ConfigError, FinanceConfig};
    ///
    /// let mut config = FinanceConfig::default();
    /// assert_eq!(config.validate(), Ok(()));
    ///
    /// config.wizard.apr = Some(dec!(0));
    /// assert_eq!(config.validate(), Err(ConfigError::InvalidApr(dec!(0))));
    /// ```
    pub fn validate(&self) -> Result<(), ConfigError> {
        if let Some(apr) = self.wizard.apr {
            if apr <= Decimal::ZERO || apr >= Decimal::ONE_HUNDRED {
                return Err(ConfigError::InvalidApr(apr));
            }
        }
        if self.wizard.minimum_age < 0 {
            return Err(ConfigError::InvalidMinimumAge(self.wizard.minimum_age));
        }
        if self.carousel.autoplay_interval_ms == 0 {
            return Err(ConfigError::InvalidInterval);
        }
        if self.carousel.small_breakpoint >= self.carousel.medium_breakpoint {
            return Err(ConfigError::InvalidBreakpoints {
                small: self.carousel.small_breakpoint,
                medium: self.carousel.medium_breakpoint,
            });
        }
        Ok(())
    }

    /// The configured form, optionally overriding its variant.
    pub fn wizard_variant(
        &self,
        kind: Option<VariantKind>,
    ) -> WizardVariant {
        let variant = WizardVariant::from_kind(kind.unwrap_or(self.wizard.variant))
            .with_jump(self.wizard.tab_navigation);
        match self.wizard.apr {
            Some(apr) => variant.with_apr(apr),
            None => variant,
        }
    }

    pub fn personal_rules(&self) -> PersonalRules {
        PersonalRules {
            age_policy: self.wizard.age_policy,
            minimum_age: self.wizard.minimum_age,
        }
    }

    pub fn breakpoints(&self) -> Breakpoints {
        Breakpoints {
            small: self.carousel.small_breakpoint,
            medium: self.carousel.medium_breakpoint,
        }
    }

    pub fn autoplay_interval(&self) -> Duration {
        Duration::from_millis(self.carousel.autoplay_interval_ms)
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use rust_decimal_macros::dec;

    use super::*;

    #[test]
    fn defaults_match_standard_form() {
        let config = FinanceConfig::default();

        assert_eq!(config.wizard_variant(None), WizardVariant::full_application());
        assert_eq!(config.personal_rules(), PersonalRules::default());
        assert_eq!(config.breakpoints(), Breakpoints::default());
        assert_eq!(config.autoplay_interval(), Duration::from_secs(5));
    }

    #[test]
    fn apr_override_applies_to_chosen_variant() {
        let config = FinanceConfig {
            wizard: WizardSettings {
                apr: Some(dec!(7.5)),
                ..WizardSettings::default()
            },
            ..FinanceConfig::default()
        };

        let variant = config.wizard_variant(Some(VariantKind::QuickQuote));

        assert_eq!(variant.kind, VariantKind::QuickQuote);
        assert_eq!(variant.amortization.apr, dec!(7.5));
    }

    #[test]
    fn tab_navigation_enables_jumping() {
        let config = FinanceConfig {
            wizard: WizardSettings {
                tab_navigation: true,
                ..WizardSettings::default()
            },
            ..FinanceConfig::default()
        };

        assert!(config.wizard_variant(None).allow_jump);
    }

    // =========================================================================
    // FinanceConfig::validate tests
    // =========================================================================

    #[test]
    fn validate_rejects_apr_of_one_hundred() {
        let mut config = FinanceConfig::default();
        config.wizard.apr = Some(dec!(100));

        assert_eq!(config.validate(), Err(ConfigError::InvalidApr(dec!(100))));
    }

    #[test]
    fn validate_rejects_negative_minimum_age() {
        let mut config = FinanceConfig::default();
        config.wizard.minimum_age = -1;

        assert_eq!(config.validate(), Err(ConfigError::InvalidMinimumAge(-1)));
    }

    #[test]
    fn validate_rejects_zero_interval() {
        let mut config = FinanceConfig::default();
        config.carousel.autoplay_interval_ms = 0;

        assert_eq!(config.validate(), Err(ConfigError::InvalidInterval));
    }

    #[test]
    fn validate_rejects_inverted_breakpoints() {
        let mut config = FinanceConfig::default();
        config.carousel.small_breakpoint = 1024;
        config.carousel.medium_breakpoint = 640;

        assert_eq!(
            config.validate(),
            Err(ConfigError::InvalidBreakpoints {
                small: 1024,
                medium: 640
            })
        );
    }
}

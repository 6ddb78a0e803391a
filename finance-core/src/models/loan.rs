use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::calculations::common::snap_to_step;

/// Body style picked on the quick quote's vehicle step.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum VehicleType {
    Sedan,
    Suv,
    Truck,
    Van,
    Sports,
}

impl VehicleType {
    pub fn all() -> &'static [VehicleType] {
        &[
            VehicleType::Sedan,
            VehicleType::Suv,
            VehicleType::Truck,
            VehicleType::Van,
            VehicleType::Sports,
        ]
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Sedan => "sedan",
            Self::Suv => "suv",
            Self::Truck => "truck",
            Self::Van => "van",
            Self::Sports => "sports",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::Sedan => "Sedan",
            Self::Suv => "SUV",
            Self::Truck => "Truck",
            Self::Van => "Van",
            Self::Sports => "Sports Car",
        }
    }

    /// Accepts the form value or the label, ignoring case.
    pub fn parse(s: &str) -> Option<Self> {
        let s = s.trim();
        Self::all()
            .iter()
            .copied()
            .find(|kind| {
                kind.as_str().eq_ignore_ascii_case(s) || kind.label().eq_ignore_ascii_case(s)
            })
    }
}

/// The loan section of an application.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LoanDetails {
    pub amount: Decimal,
    pub term_months: u32,
    pub deposit: Decimal,
    /// Only asked for on forms that have a vehicle step.
    #[serde(default)]
    pub vehicle_type: Option<VehicleType>,
}

impl LoanDetails {
    /// Amount minus deposit, or `None` when the difference is out of range.
    pub fn principal(&self) -> Option<Decimal> {
        self.amount.checked_sub(self.deposit)
    }
}

/// Loan terms a form variant offers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TermOptions {
    /// A slider from `min` to `max` months in increments of `step`.
    Stepped { min: u32, max: u32, step: u32 },
    /// A fixed set of choices, in display order.
    Fixed(Vec<u32>),
}

impl TermOptions {
    /// All selectable terms in ascending order.
    pub fn allowed(&self) -> Vec<u32> {
        match self {
            Self::Stepped { min, max, step } => {
                let step = (*step).max(1) as usize;
                (*min..=*max).step_by(step).collect()
            }
            Self::Fixed(terms) => {
                let mut terms = terms.clone();
                terms.sort_unstable();
                terms.dedup();
                terms
            }
        }
    }

    pub fn contains(&self, term_months: u32) -> bool {
        self.allowed().contains(&term_months)
    }

    /// Moves `term_months` to the nearest allowed term. Ties go to the
    /// longer term, like a slider rounding its midpoint up.
    pub fn snap(&self, term_months: u32) -> u32 {
        self.allowed()
            .into_iter()
            .min_by_key(|allowed| (allowed.abs_diff(term_months), u32::MAX - allowed))
            .unwrap_or(term_months)
    }
}

/// Input ranges for the loan step, as enforced by its sliders.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoanLimits {
    pub min_amount: Decimal,
    pub max_amount: Decimal,
    pub amount_step: Decimal,
    pub deposit_step: Decimal,
    /// Largest deposit as a fraction of the amount.
    pub max_deposit_ratio: Decimal,
    pub terms: TermOptions,
}

impl LoanLimits {
    /// £1,000 to £50,000 in £100 steps, 12 to 84 months in yearly steps.
    pub fn full_application() -> Self {
        Self {
            min_amount: Decimal::from(1_000),
            max_amount: Decimal::from(50_000),
            amount_step: Decimal::from(100),
            deposit_step: Decimal::from(100),
            max_deposit_ratio: Decimal::new(5, 1),
            terms: TermOptions::Stepped {
                min: 12,
                max: 84,
                step: 12,
            },
        }
    }

    /// £5,000 to £100,000 vehicle price in £1,000 steps, 36/60/72 months.
    pub fn quick_quote() -> Self {
        Self {
            min_amount: Decimal::from(5_000),
            max_amount: Decimal::from(100_000),
            amount_step: Decimal::from(1_000),
            deposit_step: Decimal::from(500),
            max_deposit_ratio: Decimal::new(5, 1),
            terms: TermOptions::Fixed(vec![36, 60, 72]),
        }
    }

    pub fn max_deposit(
        &self,
        amount: Decimal,
    ) -> Decimal {
        amount.saturating_mul(self.max_deposit_ratio)
    }

    pub fn clamp_amount(
        &self,
        amount: Decimal,
    ) -> Decimal {
        snap_to_step(amount, self.min_amount, self.max_amount, self.amount_step)
    }

    pub fn clamp_deposit(
        &self,
        deposit: Decimal,
        amount: Decimal,
    ) -> Decimal {
        snap_to_step(
            deposit,
            Decimal::ZERO,
            self.max_deposit(amount),
            self.deposit_step,
        )
    }

    /// Applies every limit; the deposit is capped against the clamped amount.
    pub fn clamp(
        &self,
        loan: LoanDetails,
    ) -> LoanDetails {
        let amount = self.clamp_amount(loan.amount);
        LoanDetails {
            amount,
            term_months: self.terms.snap(loan.term_months),
            deposit: self.clamp_deposit(loan.deposit, amount),
            vehicle_type: loan.vehicle_type,
        }
    }
}

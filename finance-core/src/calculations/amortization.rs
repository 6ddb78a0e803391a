//! Monthly payment calculation for a fixed-rate, fully amortizing loan.
//!
//! The financed principal is the loan amount less the deposit. With a
//! representative annual percentage rate `apr` the monthly rate is
//! `r = apr / 100 / 12`, and the level monthly payment over `n` months is
//!
//! ```text
//! payment = principal × r / (1 − (1 + r)^(−n))
//! ```
//!
//! which is evaluated here in the equivalent form
//! `principal × r × (1 + r)^n / ((1 + r)^n − 1)` so that only a positive
//! integer power is needed.
//!
//! The formula is undefined for `n = 0` and `r = 0`, and a non-positive
//! principal means there is nothing to finance. All three are rejected before
//! any arithmetic happens, so a quote is always finite.
//!
//! This is an illustrative quote, not a regulated credit calculation.
//!
//! # Example
//!
//! ```
//! use rust_decimal_macros::dec;
//! use finance_core::calculations::{Amortization, AmortizationConfig};
//!
//! let calculator = Amortization::new(AmortizationConfig { apr: dec!(9.9) });
//! let quote = calculator.quote(dec!(10000), dec!(1000), 48).unwrap();
//!
//! assert_eq!(quote.principal, dec!(9000));
//! assert_eq!(quote.monthly_rate, dec!(0.00825));
//! assert_eq!(quote.monthly_payment, dec!(227.83));
//! ```

use rust_decimal::{Decimal, MathematicalOps};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::debug;

use crate::calculations::common::round_half_up;

const MONTHS_PER_YEAR: u32 = 12;

/// Errors that can occur when computing a payment quote.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum AmortizationError {
    /// The loan term must be at least one month.
    #[error("loan term must be at least one month, got {0}")]
    NonPositiveTerm(u32),

    /// The annual percentage rate must be positive.
    #[error("annual percentage rate must be positive, got {0}")]
    NonPositiveRate(Decimal),

    /// The amount being financed must be positive.
    #[error("financed principal must be positive, got {0}")]
    NonPositivePrincipal(Decimal),

    /// A deposit cannot be negative.
    #[error("deposit cannot be negative, got {0}")]
    NegativeDeposit(Decimal),

    /// Intermediate values exceeded the decimal range.
    #[error("payment calculation overflowed for {term} months at {apr}% APR")]
    Overflow { apr: Decimal, term: u32 },
}

/// Configuration for the amortization calculator.
///
/// The APR is a product setting, not something the applicant edits. The
/// full application quotes at 9.9% and the quick quote form at 4.99%.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct AmortizationConfig {
    /// Representative annual percentage rate, as a percentage (`9.9` means 9.9%).
    pub apr: Decimal,
}

impl AmortizationConfig {
    /// Rate quoted on the full four-step application.
    pub fn full_application() -> Self {
        Self {
            apr: Decimal::new(99, 1),
        }
    }

    /// Rate quoted on the quick quote form.
    pub fn quick_quote() -> Self {
        Self {
            apr: Decimal::new(499, 2),
        }
    }

    /// Checks the rate is usable.
    ///
    /// # Errors
    ///
    /// Returns [`AmortizationError::NonPositiveRate`] when `apr <= 0`.
    pub fn validate(&self) -> Result<(), AmortizationError> {
        if self.apr <= Decimal::ZERO {
            return Err(AmortizationError::NonPositiveRate(self.apr));
        }
        Ok(())
    }

    /// Monthly interest rate as a fraction (`apr / 100 / 12`).
    pub fn monthly_rate(&self) -> Decimal {
        self.apr / Decimal::ONE_HUNDRED / Decimal::from(MONTHS_PER_YEAR)
    }
}

impl Default for AmortizationConfig {
    fn default() -> Self {
        Self::full_application()
    }
}

/// A payment quote with its intermediate values.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PaymentQuote {
    /// Loan amount minus deposit.
    pub principal: Decimal,

    /// Representative APR the quote was produced with.
    pub apr: Decimal,

    /// Monthly interest rate as a fraction, unrounded.
    pub monthly_rate: Decimal,

    /// Number of monthly payments.
    pub term_months: u32,

    /// Level monthly payment, rounded half-up to the penny.
    pub monthly_payment: Decimal,

    /// Rounded monthly payment times the number of payments.
    pub total_repayable: Decimal,

    /// Total repayable minus principal.
    pub total_interest: Decimal,
}

/// Computes the unrounded monthly payment for a principal.
///
/// This is the single pure implementation of the formula; [`Amortization`]
/// wraps it with rounding and the derived totals.
///
/// # Errors
///
/// Returns [`AmortizationError`] when `term_months` is zero, the rate is not
/// positive, the principal is not positive, or the power overflows.
pub fn monthly_payment(
    principal: Decimal,
    apr: Decimal,
    term_months: u32,
) -> Result<Decimal, AmortizationError> {
    if term_months == 0 {
        return Err(AmortizationError::NonPositiveTerm(term_months));
    }
    let config = AmortizationConfig { apr };
    config.validate()?;
    if principal <= Decimal::ZERO {
        return Err(AmortizationError::NonPositivePrincipal(principal));
    }

    let overflow = || AmortizationError::Overflow {
        apr,
        term: term_months,
    };
    let rate = config.monthly_rate();
    let growth = (Decimal::ONE + rate)
        .checked_powi(i64::from(term_months))
        .ok_or_else(overflow)?;
    let denominator = growth - Decimal::ONE;

    principal
        .checked_mul(rate)
        .and_then(|v| v.checked_mul(growth))
        .and_then(|v| v.checked_div(denominator))
        .ok_or_else(overflow)
}

/// Payment calculator bound to one APR.
#[derive(Debug, Clone)]
pub struct Amortization {
    config: AmortizationConfig,
}

impl Amortization {
    pub fn new(config: AmortizationConfig) -> Self {
        Self { config }
    }

    pub fn apr(&self) -> Decimal {
        self.config.apr
    }

    /// Produces a quote for financing `amount` with `deposit` paid up front.
    ///
    /// # Errors
    ///
    /// Returns [`AmortizationError::NegativeDeposit`] for a deposit below
    /// zero, otherwise see [`monthly_payment`].
    ///
    /// # Example
    ///
    /// ```
    /// use rust_decimal_macros::dec;
    /// use finance_core::calculations::{Amortization, AmortizationConfig, AmortizationError};
    ///
    /// let calculator = Amortization::new(AmortizationConfig::quick_quote());
    ///
    /// let quote = calculator.quote(dec!(25000), dec!(5000), 60).unwrap();
    /// assert_eq!(quote.monthly_payment, dec!(377.33));
    ///
    /// let rejected = calculator.quote(dec!(25000), dec!(5000), 0);
    /// assert_eq!(rejected, Err(AmortizationError::NonPositiveTerm(0)));
    /// ```
    pub fn quote(
        &self,
        amount: Decimal,
        deposit: Decimal,
        term_months: u32,
    ) -> Result<PaymentQuote, AmortizationError> {
        let overflow = AmortizationError::Overflow {
            apr: self.config.apr,
            term: term_months,
        };
        if deposit < Decimal::ZERO {
            return Err(AmortizationError::NegativeDeposit(deposit));
        }
        let principal = amount.checked_sub(deposit).ok_or(overflow.clone())?;
        let payment = monthly_payment(principal, self.config.apr, term_months)?;
        let monthly_payment = round_half_up(payment);
        let total_repayable = round_half_up(
            monthly_payment
                .checked_mul(Decimal::from(term_months))
                .ok_or(overflow.clone())?,
        );
        let total_interest = total_repayable.checked_sub(principal).ok_or(overflow)?;

        debug!(%principal, apr = %self.config.apr, term_months, %monthly_payment, "quoted payment");

        Ok(PaymentQuote {
            principal,
            apr: self.config.apr,
            monthly_rate: self.config.monthly_rate(),
            term_months,
            monthly_payment,
            total_repayable,
            total_interest,
        })
    }
}

//! Finance calculations.
//!
//! This module provides the amortization calculator used for the live
//! monthly payment preview, along with the rounding and slider-clamping
//! helpers it shares with the loan inputs.

pub mod amortization;
pub mod common;

pub use amortization::{
    Amortization, AmortizationConfig, AmortizationError, PaymentQuote, monthly_payment,
};

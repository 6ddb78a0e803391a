use std::io::Write;

use anyhow::{Context, Result};
use finance_core::calculations::{Amortization, AmortizationConfig, PaymentQuote};
use finance_core::format::{format_currency, format_term};
use rust_decimal::Decimal;

/// Quotes a loan straight from the calculator, without slider limits.
///
/// # Errors
///
/// Fails when the calculator rejects the inputs or output cannot be written.
pub fn run_quote(
    config: AmortizationConfig,
    amount: Decimal,
    deposit: Decimal,
    term_months: u32,
    out: &mut impl Write,
) -> Result<PaymentQuote> {
    config.validate().context("invalid APR")?;
    let quote = Amortization::new(config)
        .quote(amount, deposit, term_months)
        .context("Failed to quote loan")?;

    writeln!(out, "Loan amount:        {}", format_currency(amount, 2))?;
    writeln!(out, "Deposit:            {}", format_currency(deposit, 2))?;
    writeln!(out, "Amount financed:    {}", format_currency(quote.principal, 2))?;
    writeln!(
        out,
        "Term:               {} ({} months)",
        format_term(term_months),
        term_months
    )?;
    writeln!(out, "Representative APR: {}%", quote.apr.normalize())?;
    writeln!(out, "Monthly payment:    {}", format_currency(quote.monthly_payment, 2))?;
    writeln!(out, "Total repayable:    {}", format_currency(quote.total_repayable, 2))?;
    writeln!(out, "Total interest:     {}", format_currency(quote.total_interest, 2))?;

    Ok(quote)
}

//! Plain-text rendering of tax summaries and payment slips.
//!
//! Amounts are rounded to cents here and nowhere else.

use std::fmt::Write;

use rust_decimal::Decimal;
use tax_core::calculations::common::{round_half_up, rounded_summary};
use tax_core::calculations::AnnualTaxReport;
use tax_core::{PaymentSlip, ReportingMonth, SimulatedSale, TaxBucket, TaxSummary};

/// Formats an amount with two decimals and comma thousands separators.
pub fn format_amount(value: Decimal) -> String {
    let rounded = round_half_up(value);
    let negative = rounded.is_sign_negative() && !rounded.is_zero();
    let text = format!("{:.2}", rounded.abs());
    let (whole, cents) = text.split_once('.').unwrap_or((text.as_str(), "00"));

    let mut grouped = String::with_capacity(whole.len() + whole.len() / 3);
    for (i, digit) in whole.chars().enumerate() {
        if i > 0 && (whole.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(digit);
    }

    format!("{}{grouped}.{cents}", if negative { "-" } else { "" })
}

pub fn render_monthly(
    month: ReportingMonth,
    summary: &TaxSummary,
) -> String {
    let summary = rounded_summary(summary);
    let mut out = String::new();

    let _ = writeln!(out, "Capital gains for {month}");
    let _ = writeln!(
        out,
        "{:<18} {:>16} {:>16} {:>16}",
        "Bucket", "Total sales", "Profit", "Taxable profit"
    );
    for &bucket in TaxBucket::all() {
        let view = summary.bucket(bucket);
        let _ = writeln!(
            out,
            "{:<18} {:>16} {:>16} {:>16}",
            bucket.label(),
            format_amount(view.total_sales),
            format_amount(view.profit),
            format_amount(view.taxable_profit),
        );
    }
    let _ = writeln!(out, "Tax due: {}", format_amount(summary.tax_due));

    out
}

pub fn render_payment_slip(slip: &PaymentSlip) -> String {
    format!(
        "Payment slip\n  Period:  {}\n  Amount:  {}\n",
        slip.period,
        format_amount(slip.tax_due)
    )
}

pub fn render_annual(report: &AnnualTaxReport) -> String {
    let mut out = String::new();

    let _ = writeln!(out, "Capital gains for {}", report.year);
    let _ = writeln!(
        out,
        "{:<8} {:>6} {:>14} {:>14} {:>14} {:>12}",
        "Month", "Sales", "Equities", "REIT", "Crypto", "Tax due"
    );
    for month in &report.months {
        let summary = rounded_summary(&month.summary);
        let _ = writeln!(
            out,
            "{:<8} {:>6} {:>14} {:>14} {:>14} {:>12}",
            month.month.to_string(),
            month.sale_count,
            format_amount(summary.profit_equities),
            format_amount(summary.profit_reit),
            format_amount(summary.profit_crypto),
            format_amount(summary.tax_due),
        );
    }

    let _ = writeln!(out);
    for &bucket in TaxBucket::all() {
        let totals = report.bucket_totals(bucket);
        let _ = writeln!(
            out,
            "{:<18} sales {:>16}  profit {:>14}  taxable {:>14}",
            bucket.label(),
            format_amount(totals.total_sales),
            format_amount(totals.profit),
            format_amount(totals.taxable_profit),
        );
    }
    let _ = writeln!(out, "Total tax due: {}", format_amount(report.total_tax_due()));

    if report.skipped_sales > 0 {
        let _ = writeln!(
            out,
            "({} sale(s) outside {} not included)",
            report.skipped_sales, report.year
        );
    }

    out
}

pub fn render_sale(sale: &SimulatedSale) -> String {
    format!(
        "Simulated sale: {} x {} @ {} ({}) in {}, profit {}\n",
        format_amount(sale.quantity),
        sale.ticker.as_deref().unwrap_or("-"),
        format_amount(sale.sale_price),
        sale.asset_category,
        sale.date,
        format_amount(sale.profit),
    )
}

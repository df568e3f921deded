//! Command implementations. Each returns the text to print so that the
//! binary stays a thin shell around clap.

use std::path::Path;

use anyhow::{Context, Result};
use rust_decimal::Decimal;
use serde::Serialize;
use tax_core::calculations::{AnnualTaxAggregator, TaxEngine};
use tax_core::portfolio::simulate_sale;
use tax_core::{
    InMemoryPortfolio, PaymentSlip, PortfolioRepository, ReportingContext, ReportingMonth,
    SimulatedSale, TaxRules, TaxSummary,
};
use tax_data::{CategoryPolicy, load_holdings_from_file, load_sales_from_file};
use tracing::info;

use crate::report;

/// Output flavour for every command.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, clap::ValueEnum)]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

/// Options shared by every command.
#[derive(Debug, Clone, Default)]
pub struct RunOptions {
    pub rules: TaxRules,
    pub category_policy: CategoryPolicy,
    pub format: OutputFormat,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct MonthlyOutput<'a> {
    period: ReportingMonth,
    summary: &'a TaxSummary,
    payment_slip: Option<&'a PaymentSlip>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct SimulationOutput<'a> {
    sale: &'a SimulatedSale,
    summary: &'a TaxSummary,
    payment_slip: Option<&'a PaymentSlip>,
}

fn summarize(
    context: &ReportingContext,
    options: &RunOptions,
) -> Result<TaxSummary> {
    let engine = TaxEngine::new(&options.rules);
    match options.category_policy {
        CategoryPolicy::Lenient => Ok(engine.calculate(&context.sales)),
        CategoryPolicy::Strict => engine
            .calculate_strict(&context.sales)
            .with_context(|| format!("cannot compute tax for {}", context.month)),
    }
}

fn render_month(
    month: ReportingMonth,
    summary: &TaxSummary,
    format: OutputFormat,
) -> Result<String> {
    let slip = PaymentSlip::for_summary(month, summary);

    match format {
        OutputFormat::Json => Ok(serde_json::to_string_pretty(&MonthlyOutput {
            period: month,
            summary,
            payment_slip: slip.as_ref(),
        })?),
        OutputFormat::Text => {
            let mut out = report::render_monthly(month, summary);
            if let Some(slip) = &slip {
                out.push('\n');
                out.push_str(&report::render_payment_slip(slip));
            }
            Ok(out)
        }
    }
}

/// Summarizes one month of a sales file.
pub fn run_monthly(
    sales_path: &Path,
    month: ReportingMonth,
    options: &RunOptions,
) -> Result<String> {
    let sales = load_sales_from_file(sales_path, options.category_policy)
        .with_context(|| format!("failed to load sales from {}", sales_path.display()))?;

    let context = ReportingContext::for_month(month, &sales);
    info!(%month, sales = context.sales.len(), "computing monthly tax");

    let summary = summarize(&context, options)?;
    render_month(month, &summary, options.format)
}

/// Summarizes every month of `year` in a sales file.
pub fn run_annual(
    sales_path: &Path,
    year: i32,
    options: &RunOptions,
) -> Result<String> {
    let sales = load_sales_from_file(sales_path, options.category_policy)
        .with_context(|| format!("failed to load sales from {}", sales_path.display()))?;

    let report = AnnualTaxAggregator::new(&options.rules).aggregate(year, &sales);

    match options.format {
        OutputFormat::Json => Ok(serde_json::to_string_pretty(&report)?),
        OutputFormat::Text => {
            let mut out = report::render_annual(&report);
            for slip in report.payment_slips() {
                out.push('\n');
                out.push_str(&report::render_payment_slip(&slip));
            }
            Ok(out)
        }
    }
}

/// Simulates selling part of a holding and reports the month's tax on it.
pub async fn run_simulation<R>(
    repo: &R,
    ticker: &str,
    quantity: Decimal,
    sale_price: Decimal,
    month: ReportingMonth,
    options: &RunOptions,
) -> Result<String>
where
    R: PortfolioRepository + ?Sized,
{
    let sale = simulate_sale(repo, ticker, quantity, sale_price, month)
        .await
        .with_context(|| format!("cannot simulate sale of {ticker}"))?;

    let context = ReportingContext::new(month, vec![sale]);
    let summary = summarize(&context, options)?;
    let sale = &context.sales[0];

    match options.format {
        OutputFormat::Json => {
            let slip = PaymentSlip::for_summary(month, &summary);
            Ok(serde_json::to_string_pretty(&SimulationOutput {
                sale,
                summary: &summary,
                payment_slip: slip.as_ref(),
            })?)
        }
        OutputFormat::Text => {
            let mut out = report::render_sale(sale);
            out.push('\n');
            out.push_str(&render_month(month, &summary, OutputFormat::Text)?);
            Ok(out)
        }
    }
}

/// Loads a holdings file into an in-memory portfolio.
pub fn load_portfolio(path: &Path) -> Result<InMemoryPortfolio> {
    let holdings = load_holdings_from_file(path)
        .with_context(|| format!("failed to load holdings from {}", path.display()))?;
    info!(count = holdings.len(), "loaded holdings");
    Ok(InMemoryPortfolio::new(holdings))
}

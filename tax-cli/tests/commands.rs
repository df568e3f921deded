//! Runs the command implementations against fixture files.

use std::path::{Path, PathBuf};

use pretty_assertions::assert_eq;
use rust_decimal_macros::dec;
use tax_cli::app::{self, OutputFormat, RunOptions};
use tax_cli::config;
use tax_core::ReportingMonth;
use tax_data::CategoryPolicy;

fn fixture(name: &str) -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("fixtures")
        .join(name)
}

fn month(year: i32, month: u32) -> ReportingMonth {
    ReportingMonth::new(year, month).unwrap()
}

#[test]
fn monthly_text_report_includes_payment_slip() {
    let output = app::run_monthly(
        &fixture("sales_2025.csv"),
        month(2025, 3),
        &RunOptions::default(),
    )
    .unwrap();

    assert!(output.contains("Capital gains for 2025-03"));
    assert!(output.contains("Tax due: 870.00"));
    assert!(output.contains("Payment slip"));
}

#[test]
fn monthly_exempt_month_has_no_payment_slip() {
    let output = app::run_monthly(
        &fixture("sales_2025.csv"),
        month(2025, 7),
        &RunOptions::default(),
    )
    .unwrap();

    assert!(output.contains("Tax due: 0.00"));
    assert!(!output.contains("Payment slip"));
}

#[test]
fn monthly_json_uses_camel_case_summary() {
    let options = RunOptions {
        format: OutputFormat::Json,
        ..RunOptions::default()
    };

    let output = app::run_monthly(&fixture("sales_2025.csv"), month(2025, 5), &options).unwrap();
    let json: serde_json::Value = serde_json::from_str(&output).unwrap();

    assert_eq!(json["period"], "2025-05");
    assert_eq!(json["summary"]["totalSalesCrypto"].as_f64(), Some(36000.0));
    assert_eq!(json["summary"]["taxableProfitCrypto"].as_f64(), Some(6000.0));
    assert!(json["paymentSlip"]["taxDue"].is_number());
    assert_eq!(json["paymentSlip"]["taxDue"].as_f64(), Some(900.0));
    assert_eq!(json["paymentSlip"]["period"], "2025-05");
}

#[test]
fn annual_json_report_totals() {
    let options = RunOptions {
        format: OutputFormat::Json,
        ..RunOptions::default()
    };

    let output = app::run_annual(&fixture("sales_2025.csv"), 2025, &options).unwrap();
    let json: serde_json::Value = serde_json::from_str(&output).unwrap();

    assert_eq!(json["year"], 2025);
    assert_eq!(json["months"].as_array().unwrap().len(), 6);
    assert_eq!(json["skippedSales"], 1);
    assert_eq!(json["months"][0]["month"], "2025-01");
    assert_eq!(json["months"][0]["summary"]["taxDue"].as_f64(), Some(20.0));
    for report in json["months"].as_array().unwrap() {
        assert!(report["summary"]["taxDue"].is_number());
    }
}

#[test]
fn annual_text_report_lists_total() {
    let output =
        app::run_annual(&fixture("sales_2025.csv"), 2025, &RunOptions::default()).unwrap();

    assert!(output.contains("Total tax due: 1,790.00"));
    assert!(output.contains("(1 sale(s) outside 2025 not included)"));
}

#[test]
fn unknown_category_is_ignored_by_default() {
    let output = app::run_monthly(
        &fixture("sales_unknown_category.csv"),
        month(2025, 5),
        &RunOptions::default(),
    )
    .unwrap();

    assert!(output.contains("Tax due: 900.00"));
}

#[test]
fn unknown_category_fails_in_strict_mode() {
    let options = RunOptions {
        category_policy: CategoryPolicy::Strict,
        ..RunOptions::default()
    };

    let result = app::run_monthly(
        &fixture("sales_unknown_category.csv"),
        month(2025, 5),
        &options,
    );

    let err = result.unwrap_err();
    assert!(
        format!("{err:#}").contains("unrecognised asset category 'bdr'"),
        "got {err:#}"
    );
}

#[test]
fn rules_file_raises_equities_threshold() {
    let options = RunOptions {
        rules: config::load_rules(Some(&fixture("rules.toml"))).unwrap(),
        ..RunOptions::default()
    };

    // March equities sales total 35,000, still above 30,000.
    let march = app::run_monthly(&fixture("sales_2025.csv"), month(2025, 3), &options).unwrap();
    assert!(march.contains("Tax due: 870.00"));

    assert_eq!(options.rules.equities_exemption_threshold, dec!(30000));
}

#[tokio::test]
async fn simulate_sells_from_holdings() {
    let portfolio = app::load_portfolio(&fixture("holdings.csv")).unwrap();

    let output = app::run_simulation(
        &portfolio,
        "PETR4",
        dec!(1000),
        dec!(25),
        month(2025, 5),
        &RunOptions::default(),
    )
    .await
    .unwrap();

    assert!(output.contains("profit 6,000.00"));
    assert!(output.contains("Tax due: 900.00"));
}

#[tokio::test]
async fn simulate_rejects_overselling() {
    let portfolio = app::load_portfolio(&fixture("holdings.csv")).unwrap();

    let result = app::run_simulation(
        &portfolio,
        "HGLG11",
        dec!(41),
        dec!(170),
        month(2025, 5),
        &RunOptions::default(),
    )
    .await;

    let err = result.unwrap_err();
    assert!(format!("{err:#}").contains("only 40 held"), "got {err:#}");
}

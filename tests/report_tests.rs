mod common;

use chrono::NaiveDate;
use common::{seeded_store, setup_test_store};
use expense_tracker::ledger::{CategoryReport, DateWindow};

#[test]
fn aggregate_sums_per_category() {
    let (_temp, store) = seeded_store();
    let totals = store.aggregate_by_category().unwrap();
    assert_eq!(totals.len(), 2);
    assert_eq!(totals["Food"], 15.0);
    assert_eq!(totals["Rent"], 100.0);
}

#[test]
fn aggregate_of_empty_ledger_is_empty() {
    let (_temp, store) = setup_test_store();
    assert!(store.aggregate_by_category().unwrap().is_empty());
    let report = CategoryReport::from_totals(&store.aggregate_by_category().unwrap());
    assert!(report.is_empty());
}

#[test]
fn aggregate_between_respects_window() {
    let (_temp, mut store) = seeded_store();
    store.add_expense("sometime", "Food", "99", "undated").unwrap();

    let window = DateWindow::new(
        NaiveDate::from_ymd_opt(2024, 1, 2),
        NaiveDate::from_ymd_opt(2024, 1, 3),
    )
    .unwrap();
    let totals = store.aggregate_between(window).unwrap();
    assert_eq!(totals["Food"], 5.0);
    assert_eq!(totals["Rent"], 100.0);

    let everything = store.aggregate_by_category().unwrap();
    assert_eq!(everything["Food"], 114.0);
}

#[test]
fn report_shares_sum_to_one_hundred() {
    let (_temp, store) = seeded_store();
    let report = CategoryReport::from_totals(&store.aggregate_by_category().unwrap());
    let sum: f64 = report.shares.iter().map(|share| share.percent).sum();
    assert!((sum - 100.0).abs() < 1e-9);
    assert_eq!(report.shares[0].category, "Rent");
    assert_eq!(report.grand_total, 115.0);
}

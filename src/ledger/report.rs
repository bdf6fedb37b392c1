use std::{cmp::Ordering, collections::BTreeMap};

use chrono::NaiveDate;

use super::record::ExpenseRecord;
use crate::errors::{LedgerError, Result};

/// Summed amount per category.
pub type CategoryTotals = BTreeMap<String, f64>;

pub(crate) fn accumulate(totals: &mut CategoryTotals, record: &ExpenseRecord) {
    *totals.entry(record.category.clone()).or_insert(0.0) += record.amount.value();
}

/// Inclusive date range; a missing bound is open.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DateWindow {
    pub from: Option<NaiveDate>,
    pub to: Option<NaiveDate>,
}

impl DateWindow {
    pub fn new(from: Option<NaiveDate>, to: Option<NaiveDate>) -> Result<Self> {
        if let (Some(start), Some(end)) = (from, to) {
            if start > end {
                return Err(LedgerError::validation(format!(
                    "Start date {} is after end date {}",
                    start, end
                )));
            }
        }
        Ok(Self { from, to })
    }

    /// Records without a parseable date fall outside every bounded window.
    pub fn contains(&self, record: &ExpenseRecord) -> bool {
        if self.is_unbounded() {
            return true;
        }
        let Some(date) = record.parsed_date() else {
            return false;
        };
        self.from.map_or(true, |start| date >= start) && self.to.map_or(true, |end| date <= end)
    }

    pub fn is_unbounded(&self) -> bool {
        self.from.is_none() && self.to.is_none()
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct CategoryShare {
    pub category: String,
    pub total: f64,
    /// Share of the summed magnitudes, 0..=100.
    pub percent: f64,
}

/// Category totals ordered for display, largest first.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CategoryReport {
    pub shares: Vec<CategoryShare>,
    pub grand_total: f64,
}

impl CategoryReport {
    pub fn from_totals(totals: &CategoryTotals) -> Self {
        let magnitude: f64 = totals.values().map(|total| total.abs()).sum();
        let mut shares: Vec<CategoryShare> = totals
            .iter()
            .map(|(category, total)| CategoryShare {
                category: category.clone(),
                total: *total,
                percent: if magnitude > 0.0 {
                    total.abs() / magnitude * 100.0
                } else {
                    0.0
                },
            })
            .collect();
        shares.sort_by(|a, b| {
            b.total
                .partial_cmp(&a.total)
                .unwrap_or(Ordering::Equal)
                .then_with(|| a.category.cmp(&b.category))
        });
        Self {
            grand_total: totals.values().sum(),
            shares,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.shares.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(date: &str, category: &str, amount: &str) -> ExpenseRecord {
        ExpenseRecord::new(date, category, amount, "test").unwrap()
    }

    #[test]
    fn report_orders_by_total_and_computes_shares() {
        let mut totals = CategoryTotals::new();
        accumulate(&mut totals, &record("2024-01-01", "Food", "10"));
        accumulate(&mut totals, &record("2024-01-02", "Food", "15"));
        accumulate(&mut totals, &record("2024-01-03", "Rent", "75"));

        let report = CategoryReport::from_totals(&totals);
        assert_eq!(report.grand_total, 100.0);
        assert_eq!(report.shares[0].category, "Rent");
        assert_eq!(report.shares[0].percent, 75.0);
        assert_eq!(report.shares[1].category, "Food");
        assert_eq!(report.shares[1].total, 25.0);
    }

    #[test]
    fn empty_totals_produce_empty_report() {
        let report = CategoryReport::from_totals(&CategoryTotals::new());
        assert!(report.is_empty());
        assert_eq!(report.grand_total, 0.0);
    }

    #[test]
    fn window_filters_by_parsed_date() {
        let window = DateWindow::new(NaiveDate::from_ymd_opt(2024, 2, 1), None).unwrap();
        assert!(!window.contains(&record("2024-01-31", "Food", "1")));
        assert!(window.contains(&record("2024-02-01", "Food", "1")));
        assert!(!window.contains(&record("someday", "Food", "1")));
        assert!(DateWindow::default().contains(&record("someday", "Food", "1")));
    }

    #[test]
    fn window_rejects_reversed_bounds() {
        let err = DateWindow::new(
            NaiveDate::from_ymd_opt(2024, 3, 1),
            NaiveDate::from_ymd_opt(2024, 2, 1),
        )
        .unwrap_err();
        assert!(err.is_validation());
    }
}

//! Income/expense breakdown report
//!
//! Splits a category breakdown into an income side and an expense side,
//! each with every group's share of that side's total.

use serde::Serialize;

use crate::error::FinanceResult;
use crate::models::Money;
use crate::services::aggregation::by_magnitude;
use crate::services::{AggregationService, BreakdownMode, CategoryTotal, Session};

/// One slice of a breakdown side
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BreakdownSlice {
    pub label: String,
    /// Magnitude of the group's sum; never negative
    pub amount: Money,
    pub count: usize,
    /// Share of the side's total, 0-100
    pub percentage: f64,
}

/// Breakdown partitioned by sign
#[derive(Debug, Clone, Default, Serialize)]
pub struct SignedBreakdown {
    /// Groups whose sum is positive, largest first
    pub income: Vec<BreakdownSlice>,
    /// Groups whose sum is negative, largest magnitude first
    pub expense: Vec<BreakdownSlice>,
    pub total_income: Money,
    /// Magnitude of the expense side
    pub total_expense: Money,
}

impl SignedBreakdown {
    /// Check if neither side has any groups
    pub fn is_empty(&self) -> bool {
        self.income.is_empty() && self.expense.is_empty()
    }
}

/// Partition groups by the sign of their sum. Zero-sum groups are dropped.
pub fn split_by_sign(breakdown: &[CategoryTotal]) -> SignedBreakdown {
    let mut income: Vec<&CategoryTotal> =
        breakdown.iter().filter(|g| g.total.is_positive()).collect();
    let mut expense: Vec<&CategoryTotal> =
        breakdown.iter().filter(|g| g.total.is_negative()).collect();
    income.sort_by(|a, b| by_magnitude(a, b));
    expense.sort_by(|a, b| by_magnitude(a, b));

    let total_income: Money = income.iter().map(|g| g.total).sum();
    let total_expense: Money = expense.iter().map(|g| g.total.abs()).sum();

    SignedBreakdown {
        income: slices(&income, total_income),
        expense: slices(&expense, total_expense),
        total_income,
        total_expense,
    }
}

fn slices(groups: &[&CategoryTotal], side_total: Money) -> Vec<BreakdownSlice> {
    groups
        .iter()
        .map(|g| {
            let amount = g.total.abs();
            let percentage = if side_total.is_zero() {
                0.0
            } else {
                (amount.cents() as f64 / side_total.cents() as f64) * 100.0
            };
            BreakdownSlice {
                label: g.label.clone(),
                amount,
                count: g.count,
                percentage,
            }
        })
        .collect()
}

/// A breakdown report for one user
#[derive(Debug, Clone, Serialize)]
pub struct BreakdownReport {
    pub username: String,
    pub mode: BreakdownMode,
    pub balance: Money,
    #[serde(flatten)]
    pub sides: SignedBreakdown,
}

impl BreakdownReport {
    /// Generate a breakdown report for the session's user
    pub fn generate(
        aggregation: &AggregationService<'_>,
        session: &Session,
        mode: BreakdownMode,
    ) -> FinanceResult<Self> {
        let groups = aggregation.category_breakdown(session, mode)?;
        Ok(Self {
            username: session.username().to_string(),
            mode,
            balance: aggregation.total_balance(session)?,
            sides: split_by_sign(&groups),
        })
    }
}

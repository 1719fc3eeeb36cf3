//! Report formatting for terminal output

use crate::models::Money;
use crate::reports::{BreakdownReport, BreakdownSlice};

const TABLE_WIDTH: usize = 60;

/// Format a percentage with appropriate precision
pub fn format_percentage(pct: f64) -> String {
    if pct < 0.1 && pct > 0.0 {
        format!("{:.2}%", pct)
    } else if pct < 10.0 {
        format!("{:.1}%", pct)
    } else {
        format!("{:.0}%", pct)
    }
}

/// Create a simple bar chart representation
pub fn format_bar(value: f64, max_value: f64, width: usize) -> String {
    if max_value <= 0.0 || value <= 0.0 {
        return " ".repeat(width);
    }

    let filled = ((value / max_value) * width as f64).round() as usize;
    let filled = filled.min(width);

    format!("{}{}", "█".repeat(filled), "░".repeat(width - filled))
}

/// Format a separator line
pub fn separator(width: usize) -> String {
    "─".repeat(width)
}

/// Format a double separator line
pub fn double_separator(width: usize) -> String {
    "═".repeat(width)
}

/// Truncate a string to at most `max_len` characters, with ellipsis
pub fn truncate(s: &str, max_len: usize) -> String {
    if s.chars().count() <= max_len {
        s.to_string()
    } else if max_len <= 3 {
        "...".chars().take(max_len).collect()
    } else {
        let head: String = s.chars().take(max_len - 3).collect();
        format!("{}...", head)
    }
}

fn format_side(
    output: &mut String,
    title: &str,
    slices: &[BreakdownSlice],
    total: Money,
    symbol: &str,
) {
    output.push_str(&format!("\n{}\n", title));
    output.push_str(&separator(TABLE_WIDTH));
    output.push('\n');

    if slices.is_empty() {
        output.push_str("  (none)\n");
        return;
    }

    for slice in slices {
        output.push_str(&format!(
            "  {:<24} {:>13} {:>7} {}\n",
            truncate(&slice.label, 24),
            slice.amount.format_with_symbol(symbol),
            format_percentage(slice.percentage),
            format_bar(slice.percentage, 100.0, 10)
        ));
    }

    output.push_str(&format!(
        "  {:<24} {:>13}\n",
        "Total",
        total.format_with_symbol(symbol)
    ));
}

/// Format a breakdown report as income and expense tables
pub fn format_breakdown(report: &BreakdownReport, symbol: &str) -> String {
    let mut output = String::new();

    output.push_str(&format!(
        "Breakdown for {} (by {})\n",
        report.username, report.mode
    ));
    output.push_str(&double_separator(TABLE_WIDTH));
    output.push('\n');

    if report.sides.is_empty() {
        output.push_str("No transactions found.\n");
        return output;
    }

    format_side(
        &mut output,
        "INCOME",
        &report.sides.income,
        report.sides.total_income,
        symbol,
    );
    format_side(
        &mut output,
        "EXPENSES",
        &report.sides.expense,
        report.sides.total_expense,
        symbol,
    );

    output.push('\n');
    output.push_str(&double_separator(TABLE_WIDTH));
    output.push('\n');
    output.push_str(&format!(
        "Balance: {}\n",
        report.balance.format_with_symbol(symbol)
    ));

    output
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::reports::split_by_sign;
    use crate::services::{BreakdownMode, CategoryTotal};

    fn report(groups: &[(&str, i64)]) -> BreakdownReport {
        let totals: Vec<CategoryTotal> = groups
            .iter()
            .map(|(label, cents)| CategoryTotal {
                label: label.to_string(),
                total: Money::from_cents(*cents),
                count: 1,
            })
            .collect();
        BreakdownReport {
            username: "testuser".to_string(),
            mode: BreakdownMode::TagSet,
            balance: totals.iter().map(|g| g.total).sum(),
            sides: split_by_sign(&totals),
        }
    }

    #[test]
    fn test_format_percentage() {
        assert_eq!(format_percentage(0.05), "0.05%");
        assert_eq!(format_percentage(5.5), "5.5%");
        assert_eq!(format_percentage(50.0), "50%");
    }

    #[test]
    fn test_format_bar() {
        let bar = format_bar(50.0, 100.0, 10);
        assert_eq!(bar.chars().filter(|c| *c == '█').count(), 5);
    }

    #[test]
    fn test_truncate() {
        assert_eq!(truncate("Hello World", 5), "He...");
        assert_eq!(truncate("Hi", 5), "Hi");
        assert_eq!(truncate("Test", 4), "Test");
        assert_eq!(truncate("Café au lait", 6), "Caf...");
    }

    #[test]
    fn test_format_breakdown() {
        let formatted = format_breakdown(
            &report(&[("Pay", 100000), ("Bills", -7500), ("Groceries", -2500)]),
            "$",
        );
        assert!(formatted.contains("INCOME"));
        assert!(formatted.contains("EXPENSES"));
        assert!(formatted.contains("$1,000.00"));
        assert!(formatted.contains("75%"));
        assert!(formatted.contains("Balance: $900.00"));
    }

    #[test]
    fn test_format_empty_breakdown() {
        let formatted = format_breakdown(&report(&[]), "$");
        assert!(formatted.contains("No transactions found"));
    }
}

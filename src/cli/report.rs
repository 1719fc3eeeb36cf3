//! CLI commands for breakdowns and category detail

use clap::Subcommand;

use crate::config::Settings;
use crate::display::report::format_breakdown;
use crate::display::transaction::format_transaction_register;
use crate::error::{FinanceError, FinanceResult};
use crate::models::{CategorySet, EntryKind, Money};
use crate::reports::BreakdownReport;
use crate::services::{AggregationService, BreakdownMode, DetailSort, DetailSortKey, Session};
use crate::storage::Storage;

/// Report subcommands
#[derive(Subcommand, Debug)]
pub enum ReportCommands {
    /// Show income and expense totals by category
    Breakdown {
        /// Group by individual tag instead of by tag set
        #[arg(long)]
        per_tag: bool,

        /// Print the report as JSON
        #[arg(long)]
        json: bool,
    },

    /// List the entries in one category
    Detail {
        /// Tag set, comma separated (e.g., "Bills, Travel")
        tags: String,

        /// Match every entry carrying the one given tag, not only the exact set
        #[arg(long)]
        tag_only: bool,

        /// Sort column: amount, description or date
        #[arg(short, long, default_value = "date")]
        sort: String,

        /// Sort descending
        #[arg(long)]
        desc: bool,
    },
}

/// Print the suggested tags for each entry kind
pub fn print_default_tags() {
    for kind in EntryKind::all() {
        println!("{}: {}", kind, kind.default_tags().join(", "));
    }
}

/// Handle a report command for an authenticated session
pub fn handle_report_command(
    storage: &Storage,
    settings: &Settings,
    session: &Session,
    cmd: ReportCommands,
) -> FinanceResult<()> {
    let aggregation = AggregationService::new(storage);

    match cmd {
        ReportCommands::Breakdown { per_tag, json } => {
            let mode = if per_tag {
                BreakdownMode::PerTag
            } else {
                settings.default_breakdown
            };
            let report = BreakdownReport::generate(&aggregation, session, mode)?;

            if json {
                println!("{}", serde_json::to_string_pretty(&report)?);
            } else {
                print!("{}", format_breakdown(&report, &settings.currency_symbol));
            }
        }

        ReportCommands::Detail {
            tags,
            tag_only,
            sort,
            desc,
        } => {
            let key = DetailSortKey::parse(&sort).ok_or_else(|| {
                FinanceError::Validation(format!(
                    "Unknown sort column '{}'; use amount, description or date",
                    sort
                ))
            })?;
            let mut order = DetailSort::by(key);
            if desc {
                order = order.descending();
            }

            let categories = CategorySet::parse_label(&tags);
            if categories.is_empty() {
                return Err(FinanceError::Validation("At least one tag is required".into()));
            }

            let entries = if tag_only {
                let mut tags = categories.iter();
                let (Some(tag), None) = (tags.next(), tags.next()) else {
                    return Err(FinanceError::Validation(
                        "--tag-only takes exactly one tag".into(),
                    ));
                };
                aggregation.detail_by_tag(session, tag, order)?
            } else {
                aggregation.detail_by_category(session, &categories, order)?
            };

            let total: Money = entries.iter().map(|t| t.amount).sum();
            println!("Category: {}", categories);
            print!("{}", format_transaction_register(&entries, settings));
            println!(
                "\nTotal: {} ({} entries)",
                total.format_with_symbol(&settings.currency_symbol),
                entries.len()
            );
        }
    }

    Ok(())
}

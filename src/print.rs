use bigdecimal::RoundingMode;
use colored::Colorize;
use itertools::Itertools;

use crate::{ledger::Ledger, model::*, session::Outcome};

pub const HEADER: &str = "ID | Category     |  Balance    | Percentage   |";

fn fixed(value: &BigDecimal, places: i64) -> String {
    value
        .with_scale_round(places, RoundingMode::HalfEven)
        .to_plain_string()
}

fn row(category: &Category) -> String {
    format!(
        "{:<2} | {:<12} | {:<11} | {:<13}|",
        category.id(),
        category.name(),
        fixed(category.balance(), 2),
        fixed(&category.percentage(), 2)
    )
}

/// The stored table: header, then one row per slot with Total first. Lines
/// are joined without a trailing newline.
pub fn format(ledger: &Ledger) -> String {
    std::iter::once(HEADER.to_owned())
        .chain(ledger.slots().iter().map(row))
        .join("\n")
}

/// Same table for a terminal, with the header and Total highlighted.
pub fn table(ledger: &Ledger) -> String {
    std::iter::once(HEADER.bold().to_string())
        .chain(ledger.slots().iter().map(|c| {
            let text = row(c);
            if c.is_total() {
                text.cyan().to_string()
            } else if c.balance() < &BigDecimal::zero() {
                text.red().to_string()
            } else {
                text
            }
        }))
        .join("\n")
}

pub fn ids_and_names(ledger: &Ledger) -> String {
    std::iter::once(format!("{:>2} | {:<14}", "ID", "Category"))
        .chain(
            ledger
                .slots()
                .iter()
                .map(|c| format!("{:>2} | {:<14}", c.id(), c.name())),
        )
        .join("\n")
}

pub fn names_and_percentages(ledger: &Ledger) -> String {
    ledger
        .slots()
        .iter()
        .map(|c| format!("{:<14} | {}%", c.name(), fixed(&c.percentage(), 1)))
        .join("\n")
}

/// What to show the user after an action, if anything.
pub fn render(outcome: &Outcome) -> Option<String> {
    match outcome {
        Outcome::Table(text) => Some(text.clone()),
        Outcome::Saved(path) => Some(format!("Saved {}", path.display())),
        Outcome::Loaded(path) => Some(format!("Loaded {}", path.display())),
        Outcome::Changed | Outcome::Exit { .. } => None,
    }
}

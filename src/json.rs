use clap::Args;
use serde::Serialize;

use crate::{ledger::Ledger, model::*};

#[derive(Debug, Args)]
pub struct Command {
    #[arg(long)]
    pretty: bool,
}

#[derive(Debug, Serialize)]
struct Document<'a> {
    total: &'a Category,
    categories: &'a [Category],
    next_id: Option<CategoryId>,
}

impl<'a> From<&'a Ledger> for Document<'a> {
    fn from(ledger: &'a Ledger) -> Self {
        Self {
            total: ledger.total(),
            categories: ledger.categories(),
            next_id: ledger.next_id(),
        }
    }
}

pub fn execute_command(ledger: &Ledger, cmd: &Command) -> anyhow::Result<()> {
    let document = Document::from(ledger);
    if cmd.pretty {
        serde_json::to_writer_pretty(std::io::stdout(), &document)?;
    } else {
        serde_json::to_writer(std::io::stdout(), &document)?;
    }
    println!();

    Ok(())
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn test_document() -> anyhow::Result<()> {
        let mut ledger = Ledger::initialize_new();
        ledger.add_category("rent", BigDecimal::from(500))?;

        assert_eq!(
            serde_json::to_value(Document::from(&ledger))?,
            json!({
                "total": { "id": 1, "name": "Total", "balance": "500", "share": "1" },
                "categories": [
                    { "id": 2, "name": "rent", "balance": "500", "share": "1" }
                ],
                "next_id": 3
            })
        );

        Ok(())
    }
}

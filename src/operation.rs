use clap::Subcommand;

use crate::{model::*, session::Action, shares::percentages_to_shares};

/// Ledger operations shared by the command line and the shell.
#[derive(Debug, Subcommand)]
pub enum Operation {
    /// Print the ledger table
    Show,
    /// Spread income over every category by share, negative for an expense
    Income {
        #[arg(allow_negative_numbers = true)]
        amount: BigDecimal,
    },
    /// Add to or subtract from a single category
    Adjust {
        id: CategoryId,
        #[arg(allow_negative_numbers = true)]
        amount: BigDecimal,
    },
    /// Set every category's percentage in order, they must add up to 100
    Shares { percentages: Vec<BigDecimal> },
    /// Add a category, the first one receives 100%
    Add {
        name: String,
        #[arg(allow_negative_numbers = true, default_value = "0")]
        balance: BigDecimal,
    },
    /// Remove a category by id
    Remove { id: CategoryId },
}

impl Operation {
    pub fn into_action(self) -> Action {
        match self {
            Operation::Show => Action::Display,
            Operation::Income { amount } => Action::AdjustTotal(amount),
            Operation::Adjust { id, amount } => Action::AdjustCategory { id, amount },
            Operation::Shares { percentages } => {
                Action::SetShares(percentages_to_shares(&percentages))
            }
            Operation::Add { name, balance } => Action::AddCategory { name, balance },
            Operation::Remove { id } => Action::RemoveCategory(id),
        }
    }
}

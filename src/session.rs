use std::path::{Path, PathBuf};

use tracing::debug;

use crate::{
    error::{Error, Result},
    ledger::Ledger,
    model::*,
    print, storage,
};

/// Everything the menu or command line can ask of a ledger.
#[derive(Debug, Clone, PartialEq)]
pub enum Action {
    Display,
    AdjustTotal(BigDecimal),
    AdjustCategory { id: CategoryId, amount: BigDecimal },
    /// Shares already converted to fractions, one per category in order.
    SetShares(Vec<BigDecimal>),
    AddCategory { name: String, balance: BigDecimal },
    RemoveCategory(CategoryId),
    Save(Option<PathBuf>),
    Load(PathBuf),
    Exit,
}

impl Action {
    fn mutates(&self) -> bool {
        matches!(
            self,
            Action::AdjustTotal(_)
                | Action::AdjustCategory { .. }
                | Action::SetShares(_)
                | Action::AddCategory { .. }
                | Action::RemoveCategory(_)
        )
    }
}

#[derive(Debug, PartialEq)]
pub enum Outcome {
    Table(String),
    Changed,
    Saved(PathBuf),
    Loaded(PathBuf),
    Exit { unsaved: bool },
}

/// One ledger being worked on, where it lives and whether it has unsaved
/// changes.
#[derive(Debug)]
pub struct Session {
    ledger: Ledger,
    path: Option<PathBuf>,
    capacity: usize,
    dirty: bool,
}

impl Session {
    pub fn new(capacity: usize, path: Option<PathBuf>) -> Self {
        Self {
            ledger: Ledger::with_capacity(capacity),
            path,
            capacity,
            dirty: false,
        }
    }

    pub fn open(path: &Path, capacity: usize) -> Result<Self> {
        Ok(Self {
            ledger: storage::load(path, capacity)?,
            path: Some(path.to_owned()),
            capacity,
            dirty: false,
        })
    }

    pub fn ledger(&self) -> &Ledger {
        &self.ledger
    }

    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    pub fn execute(&mut self, action: Action) -> Result<Outcome> {
        debug!(?action, "executing");

        let mutates = action.mutates();

        let outcome = match action {
            Action::Display => Outcome::Table(print::table(&self.ledger)),
            Action::AdjustTotal(amount) => {
                self.ledger.distribute(&amount);
                Outcome::Changed
            }
            Action::AdjustCategory { id, amount } => {
                self.ledger.apply_to_category(id, &amount)?;
                Outcome::Changed
            }
            Action::SetShares(shares) => {
                self.ledger.set_shares(&shares)?;
                Outcome::Changed
            }
            Action::AddCategory { name, balance } => {
                self.ledger.add_category(&name, balance)?;
                Outcome::Changed
            }
            Action::RemoveCategory(id) => {
                self.ledger.remove_category(id)?;
                Outcome::Changed
            }
            Action::Save(path) => {
                let path = path
                    .or_else(|| self.path.clone())
                    .ok_or(Error::NoPath)?;
                storage::save(&path, &self.ledger)?;
                self.path = Some(path.clone());
                self.dirty = false;
                Outcome::Saved(path)
            }
            Action::Load(path) => {
                self.ledger = storage::load(&path, self.capacity)?;
                self.path = Some(path.clone());
                self.dirty = false;
                Outcome::Loaded(path)
            }
            Action::Exit => Outcome::Exit {
                unsaved: self.dirty,
            },
        };

        if mutates {
            self.dirty = true;
        }

        Ok(outcome)
    }
}

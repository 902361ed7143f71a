use tracing::debug;

use crate::{
    error::{Error, Result},
    ledger::Ledger,
    model::*,
};

impl Ledger {
    /// Spreads `delta` over every category by share. Total is summed from the
    /// categories afterwards rather than moved by `delta`, shares need not add
    /// up to one.
    pub fn distribute(&mut self, delta: &BigDecimal) {
        for category in self.categories_mut() {
            let portion = delta * category.share();
            category.add_to_balance(&portion);
        }

        self.recompute_total_balance();

        debug!(%delta, total = %self.total().balance(), "distributed");
    }

    /// Adjusts one category's balance directly, leaving the others alone.
    pub fn apply_to_category(&mut self, id: CategoryId, delta: &BigDecimal) -> Result<()> {
        if id == TOTAL_ID {
            return Err(Error::CannotModifyTotalDirectly);
        }

        self.get_mut(id)
            .ok_or(Error::NotFound(id))?
            .add_to_balance(delta);

        self.recompute_total_balance();

        debug!(id, %delta, "applied to category");

        Ok(())
    }
}

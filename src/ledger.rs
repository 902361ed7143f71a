use std::collections::HashSet;

use tracing::{debug, info};

use crate::{
    error::{Error, Result},
    model::*,
};

/// Slots in a ledger when nothing else is configured, Total included.
pub const DEFAULT_CAPACITY: usize = 10;

/// Ordered categories with the synthetic Total always in slot 0.
#[derive(Debug, Clone)]
pub struct Ledger {
    categories: Vec<Category>,
    last_id: CategoryId,
    capacity: usize,
}

impl Default for Ledger {
    fn default() -> Self {
        Self::initialize_new()
    }
}

impl Ledger {
    pub fn initialize_new() -> Self {
        Self::with_capacity(DEFAULT_CAPACITY)
    }

    /// A ledger holding only Total. The capacity counts Total, so it is at least 1.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            categories: vec![Category::total()],
            last_id: TOTAL_ID,
            capacity: capacity.max(1),
        }
    }

    pub fn load(records: Vec<Category>) -> Result<Self> {
        Self::load_with_capacity(records, DEFAULT_CAPACITY)
    }

    /// Rebuilds a ledger from stored categories, Total excluded. Total is
    /// recomputed from the records and their shares are trusted as given.
    pub fn load_with_capacity(records: Vec<Category>, capacity: usize) -> Result<Self> {
        let capacity = capacity.max(1);
        if records.len() + 1 > capacity {
            return Err(Error::CapacityExceeded { capacity });
        }

        let mut seen = HashSet::from([TOTAL_ID]);
        for record in records.iter() {
            if !seen.insert(record.id()) {
                return Err(Error::DuplicateId(record.id()));
            }
        }

        let last_id = records
            .iter()
            .map(|c| c.id())
            .max()
            .unwrap_or(TOTAL_ID)
            .max(TOTAL_ID);

        let mut categories = Vec::with_capacity(capacity);
        categories.push(Category::total());
        categories.extend(records);

        let mut ledger = Self {
            categories,
            last_id,
            capacity,
        };
        ledger.recompute_total_balance();
        ledger.recompute_total_share();

        info!(
            categories = ledger.count(),
            last_id = ledger.last_id,
            "loaded ledger"
        );

        Ok(ledger)
    }

    pub fn total(&self) -> &Category {
        &self.categories[0]
    }

    fn total_mut(&mut self) -> &mut Category {
        &mut self.categories[0]
    }

    /// Every category except Total, in order.
    pub fn categories(&self) -> &[Category] {
        &self.categories[1..]
    }

    pub(crate) fn categories_mut(&mut self) -> &mut [Category] {
        &mut self.categories[1..]
    }

    /// Every slot in order, Total first.
    pub fn slots(&self) -> &[Category] {
        &self.categories
    }

    /// Number of categories excluding Total.
    pub fn count(&self) -> usize {
        self.categories.len() - 1
    }

    pub fn is_full(&self) -> bool {
        self.categories.len() >= self.capacity
    }

    /// The id the next added category will receive, `None` once every id
    /// has been handed out.
    pub fn next_id(&self) -> Option<CategoryId> {
        self.last_id.checked_add(1)
    }

    /// Probes slot `id - 1` first, which holds as long as nothing has been
    /// removed, and falls back to scanning the non-total slots.
    pub fn find_index_by_id(&self, id: CategoryId) -> Option<usize> {
        if let Some(probe) = (id as usize).checked_sub(1) {
            if self.categories.get(probe).map(|c| c.id()) == Some(id) {
                return Some(probe);
            }
        }

        self.categories
            .iter()
            .skip(1)
            .position(|c| c.id() == id)
            .map(|i| i + 1)
    }

    pub fn get(&self, id: CategoryId) -> Option<&Category> {
        self.find_index_by_id(id).map(|i| &self.categories[i])
    }

    pub(crate) fn get_mut(&mut self, id: CategoryId) -> Option<&mut Category> {
        self.find_index_by_id(id).map(|i| &mut self.categories[i])
    }

    /// Appends a category and returns its id. The first category gets the
    /// whole share, later ones start at zero.
    pub fn add_category(
        &mut self,
        name: &str,
        starting_balance: BigDecimal,
    ) -> Result<CategoryId> {
        if self.is_full() {
            return Err(Error::CapacityExceeded {
                capacity: self.capacity,
            });
        }
        if !valid_name(name) {
            return Err(Error::InvalidName(name.to_owned()));
        }
        let id = self.next_id().ok_or(Error::IdsExhausted)?;

        let share = if self.count() == 0 {
            BigDecimal::one()
        } else {
            BigDecimal::zero()
        };

        self.total_mut().add_to_balance(&starting_balance);
        self.last_id = id;
        self.categories
            .push(Category::new(id, name, starting_balance, share));
        self.recompute_total_share();

        debug!(id, name, "added category");

        Ok(id)
    }

    /// Removes a category, shifting later ones down a slot. Ids are never
    /// handed out again.
    pub fn remove_category(&mut self, id: CategoryId) -> Result<Category> {
        if id == TOTAL_ID {
            return Err(Error::CannotModifyTotalDirectly);
        }

        let index = self.find_index_by_id(id).ok_or(Error::NotFound(id))?;
        let removed = self.categories.remove(index);

        let total = self.total_mut();
        let balance = total.balance() - removed.balance();
        let share = total.share() - removed.share();
        total.set_balance(balance);
        total.set_share(share);

        debug!(id, index, "removed category");

        Ok(removed)
    }

    pub(crate) fn recompute_total_balance(&mut self) {
        let sum = self.sum_of_balances();
        self.total_mut().set_balance(sum);
    }

    pub(crate) fn recompute_total_share(&mut self) {
        let sum: BigDecimal = self.categories().iter().map(|c| c.share()).sum();
        self.total_mut().set_share(sum);
    }

    pub(crate) fn sum_of_balances(&self) -> BigDecimal {
        self.categories().iter().map(|c| c.balance()).sum()
    }
}

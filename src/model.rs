use serde::{ser::SerializeStruct, Serialize};

pub use bigdecimal::{BigDecimal, One, Zero};

pub type CategoryId = u32;

pub const TOTAL_ID: CategoryId = 1;
pub const TOTAL_NAME: &str = "Total";

/// One budget bucket. The id is the stable key, equality only compares names.
#[derive(Debug, Clone)]
pub struct Category {
    id: CategoryId,
    name: String,
    balance: BigDecimal,
    share: BigDecimal,
}

impl Category {
    pub fn new(
        id: CategoryId,
        name: impl Into<String>,
        balance: BigDecimal,
        share: BigDecimal,
    ) -> Self {
        Self {
            id,
            name: name.into(),
            balance,
            share,
        }
    }

    pub(crate) fn total() -> Self {
        Self::new(TOTAL_ID, TOTAL_NAME, BigDecimal::zero(), BigDecimal::one())
    }

    pub fn id(&self) -> CategoryId {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn balance(&self) -> &BigDecimal {
        &self.balance
    }

    pub fn set_balance(&mut self, balance: BigDecimal) {
        self.balance = balance;
    }

    /// Adds `amount` to the balance in place, negative amounts subtract.
    pub fn add_to_balance(&mut self, amount: &BigDecimal) {
        self.balance += amount;
    }

    pub fn share(&self) -> &BigDecimal {
        &self.share
    }

    pub fn set_share(&mut self, share: BigDecimal) {
        self.share = share;
    }

    /// The share as displayed, `share * 100`.
    pub fn percentage(&self) -> BigDecimal {
        &self.share * BigDecimal::from(100)
    }

    pub fn is_total(&self) -> bool {
        self.id == TOTAL_ID
    }
}

impl PartialEq for Category {
    fn eq(&self, other: &Self) -> bool {
        self.name == other.name
    }
}

impl Serialize for Category {
    fn serialize<S>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        let mut state = serializer.serialize_struct("Category", 4)?;
        state.serialize_field("id", &self.id)?;
        state.serialize_field("name", &self.name)?;
        state.serialize_field("balance", &format!("{}", self.balance))?;
        state.serialize_field("share", &format!("{}", self.share))?;
        state.end()
    }
}

/// Rejects names the text format cannot carry.
pub fn valid_name(name: &str) -> bool {
    !name.is_empty() && !name.chars().any(char::is_whitespace) && !name.contains('|')
}

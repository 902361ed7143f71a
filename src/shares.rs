use tracing::{debug, warn};

use crate::{
    error::{Error, Result},
    ledger::Ledger,
    model::*,
};

/// Converts entered percentages (`45.2`) into shares (`0.452`).
pub fn percentages_to_shares(percentages: &[BigDecimal]) -> Vec<BigDecimal> {
    let hundred = BigDecimal::from(100);
    percentages.iter().map(|p| p / &hundred).collect()
}

impl Ledger {
    /// Replaces every category's share, in order. Nothing is written unless
    /// one value per category is given and they add up to exactly one,
    /// callers retry the whole set on failure.
    pub fn set_shares(&mut self, shares: &[BigDecimal]) -> Result<()> {
        if shares.len() != self.count() {
            return Err(Error::SharesNotFullySpecified {
                expected: self.count(),
                supplied: shares.len(),
            });
        }

        let sum: BigDecimal = shares.iter().sum();
        if !sum.is_one() {
            warn!(%sum, "shares do not add up to one");
            return Err(Error::SharesDoNotSumToOne {
                percent: (sum * BigDecimal::from(100)).normalized(),
            });
        }

        for (category, share) in self.categories_mut().iter_mut().zip(shares) {
            category.set_share(share.clone());
        }
        self.recompute_total_share();

        debug!(count = shares.len(), "shares set");

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use std::str::FromStr;

    use anyhow::Result;

    use super::*;

    fn dec(s: &str) -> BigDecimal {
        BigDecimal::from_str(s).unwrap()
    }

    fn decs(values: &[&str]) -> Vec<BigDecimal> {
        values.iter().map(|v| dec(v)).collect()
    }

    fn shares_of(ledger: &Ledger) -> Vec<BigDecimal> {
        ledger
            .categories()
            .iter()
            .map(|c| c.share().clone())
            .collect()
    }

    fn three() -> Ledger {
        let mut ledger = Ledger::initialize_new();
        for name in ["needs", "wants", "savings"] {
            ledger.add_category(name, BigDecimal::zero()).unwrap();
        }
        ledger
    }

    #[test]
    fn test_percentages_to_shares() {
        assert_eq!(
            percentages_to_shares(&decs(&["45.2", "100", "0"])),
            decs(&["0.452", "1", "0"])
        );
    }

    #[test]
    fn test_rent_and_fun_scenario() -> Result<()> {
        let mut ledger = Ledger::initialize_new();
        let rent = ledger.add_category("rent", dec("500"))?;
        assert_eq!(ledger.get(rent).unwrap().share(), &dec("1"));

        let fun = ledger.add_category("fun", dec("100"))?;
        assert_eq!(ledger.total().balance(), &dec("600"));
        assert_eq!(ledger.get(rent).unwrap().share(), &dec("1"));
        assert_eq!(ledger.get(fun).unwrap().share(), &dec("0"));

        ledger.set_shares(&decs(&["0.7", "0.3"]))?;
        assert_eq!(shares_of(&ledger), decs(&["0.7", "0.3"]));
        assert_eq!(ledger.total().share(), &dec("1"));

        Ok(())
    }

    #[test]
    fn test_set_shares_from_percentages() -> Result<()> {
        let mut ledger = three();
        ledger.set_shares(&percentages_to_shares(&decs(&["33.3", "33.3", "33.4"])))?;
        assert_eq!(shares_of(&ledger), decs(&["0.333", "0.333", "0.334"]));
        assert!(ledger.total().share().is_one());

        Ok(())
    }

    #[test]
    fn test_set_shares_must_sum_to_one() {
        let mut ledger = three();
        let before = shares_of(&ledger);

        match ledger.set_shares(&decs(&["0.333", "0.333", "0.333"])) {
            Err(Error::SharesDoNotSumToOne { percent }) => assert_eq!(percent, dec("99.9")),
            other => panic!("unexpected {:?}", other),
        }
        assert!(matches!(
            ledger.set_shares(&decs(&["0.5", "0.5", "0.5"])),
            Err(Error::SharesDoNotSumToOne { .. })
        ));
        assert_eq!(shares_of(&ledger), before);
    }

    #[test]
    fn test_set_shares_count_must_match() {
        let mut ledger = three();
        assert!(matches!(
            ledger.set_shares(&decs(&["0.5", "0.5"])),
            Err(Error::SharesNotFullySpecified {
                expected: 3,
                supplied: 2
            })
        ));
        assert!(matches!(
            ledger.set_shares(&decs(&["0.25", "0.25", "0.25", "0.25"])),
            Err(Error::SharesNotFullySpecified {
                expected: 3,
                supplied: 4
            })
        ));
    }

    #[test]
    fn test_set_shares_only_checks_the_sum() -> Result<()> {
        let mut ledger = three();
        ledger.set_shares(&decs(&["1.5", "-0.5", "0"]))?;

        assert_eq!(shares_of(&ledger), decs(&["1.5", "-0.5", "0"]));
        assert!(ledger.total().share().is_one());

        ledger.distribute(&dec("100"));
        assert_eq!(ledger.get(2).unwrap().balance(), &dec("150"));
        assert_eq!(ledger.get(3).unwrap().balance(), &dec("-50"));
        assert_eq!(ledger.total().balance(), &dec("100"));

        Ok(())
    }

    #[test]
    fn test_set_shares_without_categories() {
        let mut ledger = Ledger::initialize_new();
        assert!(matches!(
            ledger.set_shares(&[]),
            Err(Error::SharesDoNotSumToOne { .. })
        ));
        assert!(ledger.total().share().is_one());
    }
}

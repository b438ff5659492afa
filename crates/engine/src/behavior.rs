//! Movement classification and sign rules.
//!
//! The meaning of a movement depends on the category of *both* endpoints:
//! sending 100 from an asset to a liability pays down debt, sending the same
//! 100 between two assets just relocates it. The 2×2 matrix below is the
//! single source of truth for that classification, and the sign table in
//! [`MovementBehavior::signed_amounts`] is the single source of truth for
//! how each classification lands on the two ledger entries.

use serde::{Deserialize, Serialize};

use crate::{Category, EngineError, Money};

/// How a movement behaves, derived from its endpoints' categories.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MovementBehavior {
    /// Asset → Liability: paying down a debt from held funds.
    BillPayment,
    /// Asset → Asset: relocating held funds.
    Transfer,
    /// Liability → Asset: drawing on a debt to fund an asset.
    CashAdvance,
    /// Liability → Liability: charging one debt to pay down another.
    BalanceTransfer,
}

impl MovementBehavior {
    /// Classifies a movement from its endpoint categories.
    ///
    /// Total over the category product, with no default arm: adding a
    /// `Category` variant refuses to compile until this matrix covers it.
    #[must_use]
    pub const fn for_categories(source: Category, destination: Category) -> Self {
        match (source, destination) {
            (Category::Asset, Category::Asset) => Self::Transfer,
            (Category::Asset, Category::Liability) => Self::BillPayment,
            (Category::Liability, Category::Asset) => Self::CashAdvance,
            (Category::Liability, Category::Liability) => Self::BalanceTransfer,
        }
    }

    /// Returns the signed `(source, destination)` entry amounts for an
    /// absolute amount.
    ///
    /// | behavior          | source | destination |
    /// |-------------------|--------|-------------|
    /// | `BillPayment`     | −a     | −a          |
    /// | `Transfer`        | −a     | +a          |
    /// | `CashAdvance`     | +a     | +a          |
    /// | `BalanceTransfer` | +a     | −a          |
    ///
    /// An asset entry moves with the money (funds leave, balance falls); a
    /// liability entry moves with the debt (debt paid down, balance falls).
    ///
    /// `BalanceTransfer` reads liability-to-liability movements as
    /// "charge the source card to pay down the destination card". Product
    /// has not confirmed that reading yet; if it changes, it changes here
    /// and nowhere else.
    #[must_use]
    pub fn signed_amounts(self, amount: Money) -> (Money, Money) {
        match self {
            Self::BillPayment => (-amount, -amount),
            Self::Transfer => (-amount, amount),
            Self::CashAdvance => (amount, amount),
            Self::BalanceTransfer => (amount, -amount),
        }
    }

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::BillPayment => "bill_payment",
            Self::Transfer => "transfer",
            Self::CashAdvance => "cash_advance",
            Self::BalanceTransfer => "balance_transfer",
        }
    }
}

impl TryFrom<&str> for MovementBehavior {
    type Error = EngineError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        match value {
            "bill_payment" => Ok(Self::BillPayment),
            "transfer" => Ok(Self::Transfer),
            "cash_advance" => Ok(Self::CashAdvance),
            "balance_transfer" => Ok(Self::BalanceTransfer),
            other => Err(EngineError::data(format!(
                "invalid movement behavior: {other}"
            ))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const CATEGORIES: [Category; 2] = [Category::Asset, Category::Liability];

    const BEHAVIORS: [MovementBehavior; 4] = [
        MovementBehavior::BillPayment,
        MovementBehavior::Transfer,
        MovementBehavior::CashAdvance,
        MovementBehavior::BalanceTransfer,
    ];

    #[test]
    fn classification_matches_the_matrix() {
        assert_eq!(
            MovementBehavior::for_categories(Category::Asset, Category::Asset),
            MovementBehavior::Transfer
        );
        assert_eq!(
            MovementBehavior::for_categories(Category::Asset, Category::Liability),
            MovementBehavior::BillPayment
        );
        assert_eq!(
            MovementBehavior::for_categories(Category::Liability, Category::Asset),
            MovementBehavior::CashAdvance
        );
        assert_eq!(
            MovementBehavior::for_categories(Category::Liability, Category::Liability),
            MovementBehavior::BalanceTransfer
        );
    }

    #[test]
    fn every_category_pair_maps_to_a_distinct_behavior() {
        let mut seen = Vec::new();
        for source in CATEGORIES {
            for destination in CATEGORIES {
                let behavior = MovementBehavior::for_categories(source, destination);
                assert!(!seen.contains(&behavior), "{behavior:?} produced twice");
                seen.push(behavior);
            }
        }
        assert_eq!(seen.len(), 4);
    }

    #[test]
    fn sign_pairs_match_the_table() {
        let amount = Money::new(100_00);
        assert_eq!(
            MovementBehavior::BillPayment.signed_amounts(amount),
            (-amount, -amount)
        );
        assert_eq!(
            MovementBehavior::Transfer.signed_amounts(amount),
            (-amount, amount)
        );
        assert_eq!(
            MovementBehavior::CashAdvance.signed_amounts(amount),
            (amount, amount)
        );
        assert_eq!(
            MovementBehavior::BalanceTransfer.signed_amounts(amount),
            (amount, -amount)
        );
    }

    #[test]
    fn signed_amounts_preserve_magnitude() {
        for behavior in BEHAVIORS {
            for cents in [1, 100, 2_50, 99_999_99] {
                let amount = Money::new(cents);
                let (source, destination) = behavior.signed_amounts(amount);
                assert_eq!(source.abs(), amount);
                assert_eq!(destination.abs(), amount);
            }
        }
    }

    #[test]
    fn storage_round_trip() {
        for behavior in BEHAVIORS {
            assert_eq!(
                MovementBehavior::try_from(behavior.as_str()).unwrap(),
                behavior
            );
        }
    }
}

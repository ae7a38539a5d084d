//! Comparison operators for threshold tests
//!
//! Every operator is identified by its canonical symbol, both in plans and
//! in rendered messages. Parsing goes through a single symbol table, and
//! every consumer branches with an exhaustive `match`.

use crate::AutomationError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// A comparison between an observed value and a threshold
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum Operator {
    /// `<`
    Less,
    /// `>`
    Greater,
    /// `<=`
    LessOrEqual,
    /// `>=`
    GreaterOrEqual,
    /// `==`
    Equal,
    /// `!=`
    NotEqual,
}

impl Operator {
    /// All operators, in declaration order
    pub const ALL: [Operator; 6] = [
        Operator::Less,
        Operator::Greater,
        Operator::LessOrEqual,
        Operator::GreaterOrEqual,
        Operator::Equal,
        Operator::NotEqual,
    ];

    /// Canonical symbol, as written in plans and messages
    pub fn symbol(self) -> &'static str {
        match self {
            Operator::Less => "<",
            Operator::Greater => ">",
            Operator::LessOrEqual => "<=",
            Operator::GreaterOrEqual => ">=",
            Operator::Equal => "==",
            Operator::NotEqual => "!=",
        }
    }

    /// Look up an operator by its exact symbol.
    ///
    /// No trimming or aliasing: `" <"` and `"="` are not operators.
    pub fn from_symbol(symbol: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|op| op.symbol() == symbol)
    }

    /// The relation that holds exactly when this one does not.
    ///
    /// Used to phrase failures positively: a failed `observed < 10` is
    /// reported as `observed >= 10`.
    pub fn inverse(self) -> Self {
        match self {
            Operator::Less => Operator::GreaterOrEqual,
            Operator::Greater => Operator::LessOrEqual,
            Operator::LessOrEqual => Operator::Greater,
            Operator::GreaterOrEqual => Operator::Less,
            Operator::Equal => Operator::NotEqual,
            Operator::NotEqual => Operator::Equal,
        }
    }

    /// Apply the comparison `observed <op> threshold`
    pub fn compare(self, observed: i64, threshold: i64) -> bool {
        match self {
            Operator::Less => observed < threshold,
            Operator::Greater => observed > threshold,
            Operator::LessOrEqual => observed <= threshold,
            Operator::GreaterOrEqual => observed >= threshold,
            Operator::Equal => observed == threshold,
            Operator::NotEqual => observed != threshold,
        }
    }
}

impl fmt::Display for Operator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.symbol())
    }
}

impl FromStr for Operator {
    type Err = AutomationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_symbol(s).ok_or_else(|| AutomationError::InvalidOperator(s.to_string()))
    }
}

impl TryFrom<String> for Operator {
    type Error = AutomationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<Operator> for String {
    fn from(op: Operator) -> Self {
        op.symbol().to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use std::collections::HashSet;

    #[test]
    fn test_symbols_round_trip_through_lookup() {
        for op in Operator::ALL {
            assert_eq!(Operator::from_symbol(op.symbol()), Some(op));
        }
    }

    #[test]
    fn test_unknown_symbols_are_rejected() {
        for symbol in ["<>", "=", "", " <", "=>", "lt", "==="] {
            assert_eq!(Operator::from_symbol(symbol), None, "symbol {:?}", symbol);
        }
        assert!(matches!(
            "<>".parse::<Operator>(),
            Err(AutomationError::InvalidOperator(s)) if s == "<>"
        ));
    }

    #[test]
    fn test_inverse_table() {
        assert_eq!(Operator::Less.inverse(), Operator::GreaterOrEqual);
        assert_eq!(Operator::Greater.inverse(), Operator::LessOrEqual);
        assert_eq!(Operator::LessOrEqual.inverse(), Operator::Greater);
        assert_eq!(Operator::GreaterOrEqual.inverse(), Operator::Less);
        assert_eq!(Operator::Equal.inverse(), Operator::NotEqual);
        assert_eq!(Operator::NotEqual.inverse(), Operator::Equal);
    }

    #[test]
    fn test_inverse_is_an_involution_and_a_bijection() {
        let inverses: HashSet<Operator> = Operator::ALL.iter().map(|op| op.inverse()).collect();
        assert_eq!(inverses.len(), Operator::ALL.len());

        for op in Operator::ALL {
            assert_eq!(op.inverse().inverse(), op);
            assert_ne!(op.inverse(), op);
        }
    }

    #[test]
    fn test_serde_uses_symbols() {
        let json = serde_json::to_string(&Operator::LessOrEqual).unwrap();
        assert_eq!(json, "\"<=\"");

        let op: Operator = serde_json::from_str("\"!=\"").unwrap();
        assert_eq!(op, Operator::NotEqual);

        assert!(serde_json::from_str::<Operator>("\"<>\"").is_err());
    }

    fn any_operator() -> impl Strategy<Value = Operator> {
        prop::sample::select(Operator::ALL.to_vec())
    }

    proptest! {
        #[test]
        fn property_compare_matches_native_ordering(
            op in any_operator(),
            observed in any::<i64>(),
            threshold in any::<i64>(),
        ) {
            let expected = match op {
                Operator::Less => observed < threshold,
                Operator::Greater => observed > threshold,
                Operator::LessOrEqual => observed <= threshold,
                Operator::GreaterOrEqual => observed >= threshold,
                Operator::Equal => observed == threshold,
                Operator::NotEqual => observed != threshold,
            };
            prop_assert_eq!(op.compare(observed, threshold), expected);
        }

        #[test]
        fn property_inverse_holds_exactly_when_operator_does_not(
            op in any_operator(),
            observed in -1_000i64..1_000,
            threshold in -1_000i64..1_000,
        ) {
            prop_assert_ne!(
                op.compare(observed, threshold),
                op.inverse().compare(observed, threshold)
            );
        }
    }
}

//! The closed operator symbol set

use std::fmt;

use serde::{Deserialize, Serialize};

/// Basic arithmetic operators and their canonical symbols.
///
/// The set is closed: anything outside `+ - * /` (including `%`) is
/// rejected at parse time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Operator {
    Add,
    Subtract,
    Multiply,
    Divide,
}

impl Operator {
    /// All operators, in keypad order
    pub const ALL: [Operator; 4] = [
        Operator::Add,
        Operator::Subtract,
        Operator::Multiply,
        Operator::Divide,
    ];

    /// Canonical symbol, as stored and displayed
    pub fn symbol(&self) -> &'static str {
        match self {
            Operator::Add => "+",
            Operator::Subtract => "-",
            Operator::Multiply => "*",
            Operator::Divide => "/",
        }
    }

    /// Parse an operator symbol. `x` is accepted as an alias for
    /// multiplication; unknown symbols return `None`.
    pub fn parse(symbol: &str) -> Option<Operator> {
        match symbol.trim() {
            "+" => Some(Operator::Add),
            "-" => Some(Operator::Subtract),
            "*" | "x" => Some(Operator::Multiply),
            "/" => Some(Operator::Divide),
            _ => None,
        }
    }
}

impl fmt::Display for Operator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.symbol())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_accepts_the_four_symbols() {
        assert_eq!(Operator::parse("+"), Some(Operator::Add));
        assert_eq!(Operator::parse("-"), Some(Operator::Subtract));
        assert_eq!(Operator::parse("*"), Some(Operator::Multiply));
        assert_eq!(Operator::parse("/"), Some(Operator::Divide));
    }

    #[test]
    fn parse_trims_and_accepts_multiply_alias() {
        assert_eq!(Operator::parse(" * "), Some(Operator::Multiply));
        assert_eq!(Operator::parse("x"), Some(Operator::Multiply));
    }

    #[test]
    fn parse_rejects_unknown_symbols() {
        assert_eq!(Operator::parse("%"), None);
        assert_eq!(Operator::parse("**"), None);
        assert_eq!(Operator::parse(""), None);
        assert_eq!(Operator::parse("add"), None);
    }

    #[test]
    fn symbol_round_trips() {
        for op in Operator::ALL {
            assert_eq!(Operator::parse(op.symbol()), Some(op));
        }
    }
}

use std::fmt::{self, Display, Formatter};

use num::BigUint;
use scanner::Token;

/// The operator of a node is the token it was parsed from. The parser only
/// stores `Plus`/`Minus` in unary nodes and the four arithmetic kinds in
/// binary nodes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Expr {
    Literal(BigUint),
    Unary { operator: Token, right: Box<Expr> },
    Binary { left: Box<Expr>, operator: Token, right: Box<Expr> },
}

impl Expr {
    pub fn unary(operator: impl Into<Token>, right: Expr) -> Self {
        Expr::Unary { operator: operator.into(), right: Box::new(right) }
    }

    pub fn binary(left: Expr, operator: impl Into<Token>, right: Expr) -> Self {
        Expr::Binary { left: Box::new(left), operator: operator.into(), right: Box::new(right) }
    }
}

impl From<u64> for Expr {
    fn from(n: u64) -> Self {
        Expr::Literal(BigUint::from(n))
    }
}

struct Operator<'a>(&'a Token);

impl Display for Operator<'_> {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self.0.data.symbol() {
            Some(symbol) => write!(f, "{}", symbol),
            None => write!(f, "{}", self.0),
        }
    }
}

impl Display for Expr {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            Expr::Literal(value) => write!(f, "{}", value),
            Expr::Unary { operator, right } => write!(f, "({} {})", Operator(operator), right),
            Expr::Binary { left, operator, right } => {
                write!(f, "({} {} {})", Operator(operator), left, right)
            }
        }
    }
}

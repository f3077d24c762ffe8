use std::{
    fmt::{self, Display, Formatter},
    ops::Deref,
};

use cursor::Position;
use itertools::Itertools;
use num::BigUint;
use strum_macros::{AsRefStr, EnumString};

/// A token's kind together with its payload. Only numbers carry one.
///
/// Payload-less kinds can be built back from their rendered name:
/// `"Plus".parse::<TokenData>()` gives `TokenData::Plus`.
#[derive(Debug, Clone, PartialEq, Eq, EnumString, AsRefStr)]
pub enum TokenData {
    #[strum(disabled)]
    Number(BigUint),

    Plus,
    Minus,
    Multiply,
    Division,
    LParen,
    RParen,
}

impl TokenData {
    /// The character this token was scanned from, `None` for numbers.
    pub fn symbol(&self) -> Option<char> {
        match self {
            TokenData::Number(_) => None,
            TokenData::Plus => Some('+'),
            TokenData::Minus => Some('-'),
            TokenData::Multiply => Some('*'),
            TokenData::Division => Some('/'),
            TokenData::LParen => Some('('),
            TokenData::RParen => Some(')'),
        }
    }
}

impl Display for TokenData {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            TokenData::Number(n) => write!(f, "Number({})", n),
            data => write!(f, "{}", data.as_ref()),
        }
    }
}

/// Position is carried for diagnostics only and takes no part in equality.
#[derive(Debug, Clone)]
pub struct Token {
    pub data: TokenData,
    pub position: Position,
}

impl Token {
    pub fn new(data: TokenData, position: Position) -> Self {
        Self { data, position }
    }
}

impl PartialEq for Token {
    fn eq(&self, other: &Self) -> bool {
        self.data == other.data
    }
}

impl Eq for Token {}

impl From<TokenData> for Token {
    fn from(data: TokenData) -> Self {
        Self::new(data, Position::default())
    }
}

impl Display for Token {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.data)
    }
}

/// A scanned token sequence, rendered as `[Number(1), Plus, Number(2)]`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Tokens(pub Vec<Token>);

impl Deref for Tokens {
    type Target = [Token];

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl FromIterator<Token> for Tokens {
    fn from_iter<I: IntoIterator<Item = Token>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

impl IntoIterator for Tokens {
    type Item = Token;
    type IntoIter = std::vec::IntoIter<Token>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

impl Display for Tokens {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "[{}]", self.0.iter().join(", "))
    }
}

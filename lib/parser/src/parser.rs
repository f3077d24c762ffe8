mod expr;

use std::{
    fmt::{self, Display, Formatter},
    iter::Peekable,
    slice::Iter,
};

use cursor::Position;
pub use expr::Expr;
use scanner::{Token, TokenData};

use TokenData::*;

/// Where the parser was when it went looking for an operand.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Context {
    Expression,
    Group,
    UnaryOperand(TokenData),
    RightOperand(TokenData),
}

impl Display for Context {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            Context::Expression => write!(f, "expression"),
            Context::Group => write!(f, "parenthesized expression"),
            Context::UnaryOperand(operator) => write!(f, "operand of unary {}", operator),
            Context::RightOperand(operator) => write!(f, "right operand of {}", operator),
        }
    }
}

#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum ParseError {
    #[error("Unexpected end of input while parsing {context}")]
    UnexpectedEnd { context: Context },
    #[error("Unexpected token {token} at {} while parsing {context}", .token.position)]
    UnexpectedToken { token: Token, context: Context },
    #[error("Missing closing `)` for `(` at {open}, found {}", found_or_end(.found))]
    UnmatchedParen { open: Position, found: Option<Token> },
    #[error("Unexpected trailing token {0} at {}", .0.position)]
    TrailingToken(Token),
    #[error("Expression nested deeper than {0} levels")]
    NestingTooDeep(usize),
}

fn found_or_end(found: &Option<Token>) -> String {
    match found {
        Some(token) => format!("{} at {}", token, token.position),
        None => "end of input".to_string(),
    }
}

pub type Result<T> = std::result::Result<T, ParseError>;

/// A parsed subtree with its height: 0 for a literal, one more than the
/// tallest child for operator nodes.
type Parsed = (Expr, usize);

/// How the right operand of `+`/`-` is parsed.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Precedence {
    /// The right operand of `+`/`-` is a single unary operand, so
    /// `1 + 2 * 3` parses as `(+ 1 2)` and leaves `* 3` unconsumed.
    #[default]
    Compatible,
    /// The right operand of `+`/`-` is a full multiplicative chain.
    Conventional,
}

/// What happens to tokens left over after the top-level expression.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum TrailingTokens {
    #[default]
    Ignore,
    Reject,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ParserOptions {
    pub precedence: Precedence,
    pub trailing: TrailingTokens,
    /// Upper bound on both the nesting of groups and unary operators and
    /// the height of the resulting tree, so long operator chains count too.
    pub max_depth: Option<usize>,
}

#[derive(Debug)]
pub struct Parser<'a> {
    tokens: Peekable<Iter<'a, Token>>,
    options: ParserOptions,
    depth: usize,
}

impl<'a> Parser<'a> {
    pub fn new(tokens: &'a [Token]) -> Self {
        Self::with_options(tokens, ParserOptions::default())
    }

    pub fn with_options(tokens: &'a [Token], options: ParserOptions) -> Self {
        Self { tokens: tokens.iter().peekable(), options, depth: 0 }
    }

    pub fn parse(mut self) -> Result<Expr> {
        let (expr, _) = self.additive(Context::Expression)?;

        if self.options.trailing == TrailingTokens::Reject {
            if let Some(token) = self.advance() {
                return Err(ParseError::TrailingToken(token.clone()));
            }
        }

        Ok(expr)
    }

    fn additive(&mut self, context: Context) -> Result<Parsed> {
        let mut expr = self.multiplicative(context)?;

        while let Some(operator) = self.consume(&[Plus, Minus]) {
            let context = Context::RightOperand(operator.data.clone());
            let right = match self.options.precedence {
                Precedence::Compatible => self.unary(context)?,
                Precedence::Conventional => self.multiplicative(context)?,
            };
            expr = self.binary(expr, operator, right)?;
        }
        Ok(expr)
    }

    fn multiplicative(&mut self, context: Context) -> Result<Parsed> {
        let mut expr = self.unary(context)?;

        while let Some(operator) = self.consume(&[Multiply, Division]) {
            let right = self.unary(Context::RightOperand(operator.data.clone()))?;
            expr = self.binary(expr, operator, right)?;
        }
        Ok(expr)
    }

    fn unary(&mut self, context: Context) -> Result<Parsed> {
        if let Some(operator) = self.consume(&[Plus, Minus]) {
            let context = Context::UnaryOperand(operator.data.clone());
            let (right, height) = self.nested(|parser| parser.primary(context))?;
            return self.bounded(Expr::Unary { operator, right: Box::new(right) }, height + 1);
        }
        self.primary(context)
    }

    fn primary(&mut self, context: Context) -> Result<Parsed> {
        let Some(token) = self.advance() else {
            return Err(ParseError::UnexpectedEnd { context });
        };

        match &token.data {
            Number(n) => Ok((Expr::Literal(n.clone()), 0)),
            LParen => {
                let expr = self.nested(|parser| parser.additive(Context::Group))?;

                match self.advance() {
                    Some(Token { data: RParen, .. }) => Ok(expr),
                    found => {
                        Err(ParseError::UnmatchedParen { open: token.position, found: found.cloned() })
                    }
                }
            }
            _ => Err(ParseError::UnexpectedToken { token: token.clone(), context }),
        }
    }

    /// Bounds the recursion of the parser itself: groups and unary operands.
    fn nested(&mut self, parse: impl FnOnce(&mut Self) -> Result<Parsed>) -> Result<Parsed> {
        if let Some(limit) = self.options.max_depth {
            if self.depth >= limit {
                return Err(ParseError::NestingTooDeep(limit));
            }
        }

        self.depth += 1;
        let expr = parse(self);
        self.depth -= 1;
        expr
    }

    fn binary(&self, (left, lh): Parsed, operator: Token, (right, rh): Parsed) -> Result<Parsed> {
        let expr = Expr::Binary { left: Box::new(left), operator, right: Box::new(right) };
        self.bounded(expr, lh.max(rh) + 1)
    }

    /// Bounds the height of the tree handed to the evaluator, which
    /// recurses once per level. Flat chains like `1 + 1 + ...` only grow
    /// here, never in `nested`.
    fn bounded(&self, expr: Expr, height: usize) -> Result<Parsed> {
        match self.options.max_depth {
            Some(limit) if height > limit => Err(ParseError::NestingTooDeep(limit)),
            _ => Ok((expr, height)),
        }
    }
}

// Helpers
impl<'a> Parser<'a> {
    fn consume(&mut self, kinds: &[TokenData]) -> Option<Token> {
        self.tokens.next_if(|t| kinds.contains(&t.data)).cloned()
    }

    fn advance(&mut self) -> Option<&'a Token> {
        self.tokens.next()
    }
}

pub fn parse(tokens: &[Token]) -> Result<Expr> {
    Parser::new(tokens).parse()
}

pub fn parse_with(tokens: &[Token], options: ParserOptions) -> Result<Expr> {
    Parser::with_options(tokens, options).parse()
}

use cursor::{Cursor, Position};
use num::{BigUint, Zero};

mod token;
pub use token::{Token, TokenData, Tokens};
use TokenData::*;

#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum ScanError {
    #[error("Unexpected character `{character}` at {position}")]
    UnexpectedCharacter { character: char, position: Position },
    #[error("Unexpected non-printable character {} at {position}", .character.escape_unicode())]
    NonPrintable { character: char, position: Position },
}

impl ScanError {
    pub fn position(&self) -> Position {
        match self {
            ScanError::UnexpectedCharacter { position, .. }
            | ScanError::NonPrintable { position, .. } => *position,
        }
    }
}

/// What to do with a control character that is not whitespace.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ControlCharacters {
    #[default]
    Reject,
    /// End the token stream at the character without reporting an error.
    Truncate,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ScannerOptions {
    pub control_characters: ControlCharacters,
}

/// Lazily turns source text into tokens. Yields at most one error, after
/// which the stream is exhausted.
#[derive(Debug, Clone)]
pub struct Scanner<'a> {
    cursor: Cursor<'a>,
    options: ScannerOptions,
    done: bool,
}

impl<'a> Scanner<'a> {
    pub fn new(source: &'a str) -> Self {
        Self::with_options(source, ScannerOptions::default())
    }

    pub fn with_options(source: &'a str, options: ScannerOptions) -> Self {
        Self { cursor: Cursor::new(source), options, done: false }
    }

    fn scan_token(&mut self) -> Option<Result<Token, ScanError>> {
        while self.cursor.next_if(is_separator).is_some() {}

        let start = self.cursor.clone();
        let position = start.position();
        let data = match self.cursor.next()? {
            '+' => Plus,
            '-' => Minus,
            '*' => Multiply,
            '/' => Division,
            '(' => LParen,
            ')' => RParen,

            d if d.is_ascii_digit() => self.number(&start),

            c if c.is_control() => {
                return match self.options.control_characters {
                    ControlCharacters::Reject => {
                        Some(Err(ScanError::NonPrintable { character: c, position }))
                    }
                    ControlCharacters::Truncate => None,
                };
            }

            c => return Some(Err(ScanError::UnexpectedCharacter { character: c, position })),
        };

        Some(Ok(Token::new(data, position)))
    }

    fn number(&mut self, start: &Cursor<'a>) -> TokenData {
        while self.cursor.next_if(|c| c.is_ascii_digit()).is_some() {}

        let digits = start.slice_until(&self.cursor);
        Number(digits.bytes().fold(BigUint::zero(), |n, d| n * 10u32 + u32::from(d - b'0')))
    }
}

impl<'a> Iterator for Scanner<'a> {
    type Item = Result<Token, ScanError>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.done {
            return None;
        }

        let token = self.scan_token();
        if !matches!(token, Some(Ok(_))) {
            self.done = true;
        }
        token
    }
}

/// `char::is_whitespace` plus the information separators U+001C..=U+001F,
/// which it leaves out.
fn is_separator(c: char) -> bool {
    c.is_whitespace() || ('\u{1c}'..='\u{1f}').contains(&c)
}

pub fn scan(source: &str) -> Result<Tokens, ScanError> {
    Scanner::new(source).collect()
}

pub fn scan_with(source: &str, options: ScannerOptions) -> Result<Tokens, ScanError> {
    Scanner::with_options(source, options).collect()
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    fn number(n: u64) -> Token {
        Token::from(Number(BigUint::from(n)))
    }

    fn positions(tokens: &Tokens) -> Vec<Position> {
        tokens.iter().map(|t| t.position).collect()
    }

    #[test]
    fn numbers() {
        for n in [0u64, 7, 42, 1234567890, u64::MAX] {
            assert_eq!(scan(&n.to_string()).unwrap(), Tokens(vec![number(n)]));
        }

        let huge = "123456789012345678901234567890123456789012345678901234567890";
        assert_eq!(
            scan(huge).unwrap(),
            Tokens(vec![Token::from(Number(huge.parse::<BigUint>().unwrap()))])
        );
    }

    #[test]
    fn leading_zeros() {
        assert_eq!(scan("007").unwrap(), Tokens(vec![number(7)]));
        assert_eq!(scan("000").unwrap(), Tokens(vec![number(0)]));
    }

    #[test]
    fn empty_and_whitespace() {
        assert_eq!(scan("").unwrap(), Tokens::default());
        assert_eq!(scan(" \t\r\n  \n").unwrap(), Tokens::default());
        assert_eq!(scan("\u{a0}\u{2003}\u{3000}").unwrap(), Tokens::default());
    }

    #[test]
    fn information_separators_are_whitespace() {
        let tokens = scan("1\u{1c}+\u{1d}2\u{1e}\u{1f}").unwrap();
        assert_eq!(tokens.to_string(), "[Number(1), Plus, Number(2)]");
        assert_eq!(
            positions(&tokens),
            vec![Position::new(1, 0), Position::new(1, 2), Position::new(1, 4)]
        );

        let options = ScannerOptions { control_characters: ControlCharacters::Truncate };
        assert_eq!(scan_with("1\u{1c}+ 2", options).unwrap(), scan("1 + 2").unwrap());
    }

    #[test]
    fn single_char_tokens() {
        let tokens = scan("+-*/()").unwrap();
        assert_eq!(tokens.to_string(), "[Plus, Minus, Multiply, Division, LParen, RParen]");
        assert_eq!(
            positions(&tokens),
            (0..6).map(|col| Position::new(1, col)).collect::<Vec<_>>()
        );
    }

    #[test]
    fn expression() {
        let tokens = scan("(12 + 3) * -4").unwrap();
        assert_eq!(
            tokens.to_string(),
            "[LParen, Number(12), Plus, Number(3), RParen, Multiply, Minus, Number(4)]"
        );
        assert_eq!(
            positions(&tokens),
            vec![
                Position::new(1, 0),
                Position::new(1, 1),
                Position::new(1, 4),
                Position::new(1, 6),
                Position::new(1, 7),
                Position::new(1, 9),
                Position::new(1, 11),
                Position::new(1, 12),
            ]
        );
    }

    #[test]
    fn newlines_reset_column() {
        let tokens = scan("1\n  2\n\n +").unwrap();
        assert_eq!(tokens.to_string(), "[Number(1), Number(2), Plus]");
        assert_eq!(
            positions(&tokens),
            vec![Position::new(1, 0), Position::new(2, 2), Position::new(4, 1)]
        );
    }

    #[test]
    fn unexpected_character() {
        assert_eq!(
            scan("1 & 2").unwrap_err(),
            ScanError::UnexpectedCharacter { character: '&', position: Position::new(1, 2) }
        );
        assert_eq!(
            scan("1 +\n 2 x").unwrap_err(),
            ScanError::UnexpectedCharacter { character: 'x', position: Position::new(2, 3) }
        );
        assert_eq!(scan("1.5").unwrap_err().position(), Position::new(1, 1));
    }

    #[test]
    fn stops_after_first_error() {
        let mut scanner = Scanner::new("1 $ 2");
        assert_eq!(scanner.next(), Some(Ok(number(1))));
        assert!(matches!(scanner.next(), Some(Err(ScanError::UnexpectedCharacter { .. }))));
        assert_eq!(scanner.next(), None);
    }

    #[test]
    fn control_characters() {
        assert_eq!(
            scan("1\u{7} + 2").unwrap_err(),
            ScanError::NonPrintable { character: '\u{7}', position: Position::new(1, 1) }
        );

        let options = ScannerOptions { control_characters: ControlCharacters::Truncate };
        assert_eq!(scan_with("1\u{7} + 2", options).unwrap(), Tokens(vec![number(1)]));
        assert_eq!(scan_with("\u{0}", options).unwrap(), Tokens::default());
        // Format characters are not control characters.
        assert_eq!(
            scan_with("1\u{feff}", options).unwrap_err(),
            ScanError::UnexpectedCharacter {
                character: '\u{feff}',
                position: Position::new(1, 1)
            }
        );
    }

    #[test]
    fn error_messages() {
        assert_eq!(
            scan("2 # 3").unwrap_err().to_string(),
            "Unexpected character `#` at 1:2"
        );
        assert_eq!(
            scan("\u{1b}").unwrap_err().to_string(),
            "Unexpected non-printable character \\u{1b} at 1:0"
        );
    }
}

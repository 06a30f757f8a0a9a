use thiserror::Error;

/// Represents all errors that can occur while tokenizing or parsing.
///
/// Every variant except [`ParseError::EmptyExpression`] carries the 0-based
/// character offset of the offending character or token. Parsing stops at the
/// first error; no partial tree is produced.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseError {
    /// The source string was empty, or contained nothing but spaces.
    #[error("expression is empty")]
    EmptyExpression,
    /// A character that no token can start with or contain.
    #[error("invalid character '{character}' at position {position}")]
    InvalidCharacter {
        /// The character found.
        character: char,
        /// Offset of the character.
        position:  usize,
    },
    /// A number literal broken by a misplaced `.`, `e` or a missing exponent.
    #[error("invalid '{character}' in number at position {position}")]
    InvalidNumber {
        /// The character that ended the literal badly.
        character: char,
        /// Offset of the character.
        position:  usize,
    },
    /// A `(` without its `)`.
    #[error("unmatched '(' at position {position}")]
    UnmatchedOpenBracket {
        /// Offset of the opening bracket.
        position: usize,
    },
    /// A `)` without its `(`.
    #[error("unmatched ')' at position {position}")]
    UnmatchedCloseBracket {
        /// Offset of the closing bracket.
        position: usize,
    },
    /// A token that cannot appear where it was found.
    #[error("unexpected token '{token}' at position {position}")]
    UnexpectedToken {
        /// The token as written.
        token:    String,
        /// Offset of the token.
        position: usize,
    },
    /// The tokens ran out where an operand was expected.
    #[error("unexpected end of input after position {position}")]
    UnexpectedEndOfInput {
        /// Offset of the last token.
        position: usize,
    },
    /// A call whose argument list is never closed.
    #[error("unclosed function call '{name}' at position {position}")]
    UnclosedFunctionCall {
        /// The function name.
        name:     String,
        /// Offset of the function name.
        position: usize,
    },
    /// A postfix operator written where an operand should start.
    #[error("unary operator '{symbol}' at position {position} is not a prefix operator")]
    NotPrefixOperator {
        /// The operator symbol.
        symbol:   char,
        /// Offset of the operator.
        position: usize,
    },
}

impl ParseError {
    /// The 0-based character offset the error points at.
    ///
    /// # Example
    /// ```
    /// use calcore::tokenize;
    ///
    /// let err = tokenize("1 + 0a - 1").unwrap_err();
    /// assert_eq!(err.position(), Some(5));
    /// ```
    #[must_use]
    pub const fn position(&self) -> Option<usize> {
        match self {
            Self::EmptyExpression => None,
            Self::InvalidCharacter { position, .. }
            | Self::InvalidNumber { position, .. }
            | Self::UnmatchedOpenBracket { position }
            | Self::UnmatchedCloseBracket { position }
            | Self::UnexpectedToken { position, .. }
            | Self::UnexpectedEndOfInput { position }
            | Self::UnclosedFunctionCall { position, .. }
            | Self::NotPrefixOperator { position, .. } => Some(*position),
        }
    }
}

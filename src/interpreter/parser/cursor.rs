use crate::interpreter::lexer::SpannedToken;

/// Walks a token slice one token at a time.
///
/// Token references returned by the cursor borrow the slice, not the cursor,
/// so a caller may hold a token while advancing.
pub(super) struct Cursor<'a> {
    tokens: &'a [SpannedToken],
    pos:    usize,
}

impl<'a> Cursor<'a> {
    pub(super) const fn new(tokens: &'a [SpannedToken]) -> Self {
        Self { tokens, pos: 0 }
    }

    /// The token under the cursor, `None` past the end.
    pub(super) fn current(&self) -> Option<&'a SpannedToken> {
        self.tokens.get(self.pos)
    }

    /// The token after the current one.
    pub(super) fn peek(&self) -> Option<&'a SpannedToken> {
        self.tokens.get(self.pos + 1)
    }

    pub(super) fn advance(&mut self) {
        if self.pos < self.tokens.len() {
            self.pos += 1;
        }
    }

    pub(super) const fn is_at_end(&self) -> bool {
        self.pos >= self.tokens.len()
    }

    /// Offset reported when the input runs out: the last token's position.
    pub(super) fn end_position(&self) -> usize {
        self.tokens.last().map_or(0, |(_, position)| *position)
    }
}

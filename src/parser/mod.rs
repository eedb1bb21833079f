//! Token source - the boundary to the external content-stream parser.
//!
//! The engine never sees raw bytes. An upstream lexer turns the content
//! stream into a finite sequence of tokens, each either an operand value or
//! an operator mnemonic, and hands them over through the `TokenSource`
//! trait. `TokenBuffer` replays an already-materialised token list; it is
//! what Form XObjects and tests run through the engine.

use crate::error::Result;
use crate::model::PdfObject;

/// One element of a content stream.
#[derive(Debug, Clone, PartialEq)]
pub enum Token {
    /// An operand value preceding its operator
    Operand(PdfObject),
    /// An operator mnemonic (e.g. "Tj", "'", "T*")
    Operator(String),
}

/// A lazy, finite sequence of content-stream tokens.
///
/// `next_token` returns Ok(None) at end of stream and an error when the
/// underlying input fails. The engine calls `close` on every exit path of
/// its interpretation loop, normal or not.
pub trait TokenSource {
    /// Produce the next token, or None at end of stream.
    fn next_token(&mut self) -> Result<Option<Token>>;

    /// Release any input held by the source. Default does nothing.
    fn close(&mut self) {}
}

/// Replay source over a pre-tokenised stream.
#[derive(Debug, Clone, Default)]
pub struct TokenBuffer {
    tokens: Vec<Token>,
    pos: usize,
}

impl TokenBuffer {
    /// Create a replay source over `tokens`.
    pub fn new(tokens: Vec<Token>) -> Self {
        Self { tokens, pos: 0 }
    }
}

impl TokenSource for TokenBuffer {
    fn next_token(&mut self) -> Result<Option<Token>> {
        let token = self.tokens.get(self.pos).cloned();
        if token.is_some() {
            self.pos += 1;
        }
        Ok(token)
    }
}

/// Shorthand for an operand token.
pub fn operand(obj: PdfObject) -> Token {
    Token::Operand(obj)
}

/// Shorthand for an operator token.
pub fn operator(mnemonic: &str) -> Token {
    Token::Operator(mnemonic.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_token_buffer_replay() {
        let mut source = TokenBuffer::new(vec![
            operand(PdfObject::Int(1)),
            operator("Td"),
        ]);
        assert_eq!(
            source.next_token().unwrap(),
            Some(Token::Operand(PdfObject::Int(1)))
        );
        assert_eq!(
            source.next_token().unwrap(),
            Some(Token::Operator("Td".to_string()))
        );
        assert_eq!(source.next_token().unwrap(), None);
        assert_eq!(source.next_token().unwrap(), None);
    }
}

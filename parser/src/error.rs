//! Parser/lexer error type. These are host-facing ([`ecma_engine`]'s
//! `EngineError`/`JsError` split, see `SPEC_FULL.md` §B) — a malformed
//! script never reaches the evaluator, so it cannot surface as a thrown
//! `JsValue`.

use ecma_ast::Position;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ParseError {
    #[error("{position}: unexpected end of input")]
    UnexpectedEof { position: Position },

    #[error("{position}: unexpected character {found:?}")]
    UnexpectedChar { found: char, position: Position },

    #[error("{position}: unterminated string literal")]
    UnterminatedString { position: Position },

    #[error("{position}: expected {expected}, found {found}")]
    Expected {
        expected: String,
        found: String,
        position: Position,
    },

    #[error("{position}: invalid assignment target")]
    InvalidAssignmentTarget { position: Position },

    #[error("{position}: illegal break statement outside of a loop or switch")]
    IllegalBreak { position: Position },

    #[error("{position}: illegal continue statement outside of a loop")]
    IllegalContinue { position: Position },
}

pub type ParseResult<T> = Result<T, ParseError>;

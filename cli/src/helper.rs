//! The REPL's line editor helper: bracket-matching multi-line input,
//! nothing fancier — no syntax highlighting, since that would pull in
//! a couple of crates purely for REPL cosmetics.

use rustyline::completion::Completer;
use rustyline::error::ReadlineError;
use rustyline::highlight::Highlighter;
use rustyline::hint::Hinter;
use rustyline::validate::{MatchingBracketValidator, ValidationContext, ValidationResult, Validator};
use rustyline::Helper;

pub(crate) struct ReplHelper {
    validator: MatchingBracketValidator,
}

impl ReplHelper {
    pub(crate) fn new() -> Self {
        Self { validator: MatchingBracketValidator::new() }
    }
}

impl Validator for ReplHelper {
    fn validate(&self, ctx: &mut ValidationContext<'_>) -> Result<ValidationResult, ReadlineError> {
        self.validator.validate(ctx)
    }

    fn validate_while_typing(&self) -> bool {
        self.validator.validate_while_typing()
    }
}

impl Highlighter for ReplHelper {}
impl Hinter for ReplHelper {
    type Hint = String;
}
impl Completer for ReplHelper {
    type Candidate = String;
}
impl Helper for ReplHelper {}

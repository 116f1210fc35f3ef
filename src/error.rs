//! Error types for the LL(1) grammar pipeline and its CLI harness.

use crate::token::{NonTerminal, RuleId, Token};
use thiserror::Error;

/// Errors raised by the grammar-transformation and set-computation pipeline.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum GrammarError {
    #[error("token {token} used in a rule is neither a declared terminal, ε, nor a declared nonterminal")]
    UndeclaredToken { token: Token },

    #[error("token {token} was already declared")]
    DuplicateToken { token: Token },

    #[error("build() was called with no production for the start nonterminal {start}")]
    NoStartRule { start: Token },

    #[error(
        "ambiguous after transform: rules {rule1} and {rule2} both predict terminal {terminal} for nonterminal {nonterminal}"
    )]
    AmbiguousAfterTransform {
        nonterminal: Token,
        terminal: Token,
        rule1: RuleId,
        rule2: RuleId,
    },

    #[error("indirect left recursion detected through nonterminal {nonterminal}")]
    IndirectLeftRecursion { nonterminal: Token },
}

impl GrammarError {
    pub(crate) fn ambiguous(
        nonterminal: NonTerminal,
        terminal: Token,
        rule1: RuleId,
        rule2: RuleId,
    ) -> Self {
        GrammarError::AmbiguousAfterTransform {
            nonterminal: nonterminal.token(),
            terminal,
            rule1,
            rule2,
        }
    }
}

/// Type alias for `Result`s returned by the core pipeline.
pub type Result<T> = std::result::Result<T, GrammarError>;

/// Errors raised by the CLI harness while reading a grammar description.
/// These are harness-level, not core-pipeline, concerns.
#[derive(Error, Debug)]
pub enum CliError {
    #[error("invalid grammar description: {0}")]
    InvalidFormat(String),

    #[error("invalid declaration line: {0}")]
    InvalidDeclaration(String),

    #[error("empty grammar description")]
    EmptyInput,

    #[error("not enough declaration lines: expected {expected}, got {actual}")]
    NotEnoughDeclarations { expected: usize, actual: usize },

    #[error("grammar error: {0}")]
    Grammar(#[from] GrammarError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Type alias for `Result`s returned by the CLI harness.
pub type CliResult<T> = std::result::Result<T, CliError>;

//! Token model for context-free grammars.
//!
//! A [`Token`] is a signed integer partitioned by convention into three
//! disjoint ranges: strictly negative values are terminals, zero is ε (the
//! empty derivation), and strictly positive values are nonterminals. All
//! classification is a literal integer comparison and is load-bearing for
//! the rest of the pipeline.

use std::fmt;

/// A grammar symbol, represented as a signed integer.
///
/// Convention: `t < 0` is a terminal, `t == 0` is ε, `t > 0` is a
/// nonterminal.
pub type Token = i64;

/// The reserved ε token.
pub const EPSILON: Token = 0;

/// Default end-of-input terminal, used when the caller never calls
/// [`crate::builder::Builder::set_eof_token`]. Chosen far from the small
/// negative integers a grammar typically uses for its own terminals.
pub const DEFAULT_EOF: Token = Token::MIN;

/// Rule identifier assigned during parse-table emission, in grammar order.
/// `0` is reserved to mean "no rule / syntax error".
pub type RuleId = u32;

/// Sentinel rule-id meaning "no entry" in the emitted parse table.
pub const NO_RULE: RuleId = 0;

#[inline]
pub const fn is_terminal(t: Token) -> bool {
    t < 0
}

#[inline]
pub const fn is_epsilon(t: Token) -> bool {
    t == EPSILON
}

#[inline]
pub const fn is_nonterminal(t: Token) -> bool {
    t > 0
}

/// A terminal token. A type-level refinement of [`Token`], enforced at the
/// [`crate::builder::Builder`] boundary rather than here.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Terminal(pub Token);

/// A nonterminal token. A type-level refinement of [`Token`], enforced at
/// the [`crate::builder::Builder`] boundary rather than here.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct NonTerminal(pub Token);

impl Terminal {
    pub const fn token(self) -> Token {
        self.0
    }
}

impl NonTerminal {
    pub const fn token(self) -> Token {
        self.0
    }
}

impl fmt::Display for Terminal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl fmt::Display for NonTerminal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<Terminal> for Token {
    fn from(t: Terminal) -> Token {
        t.0
    }
}

impl From<NonTerminal> for Token {
    fn from(n: NonTerminal) -> Token {
        n.0
    }
}

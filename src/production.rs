//! Production rules: one nonterminal LHS, many alternative RHS sequences.

use crate::token::{is_epsilon, NonTerminal, Token};
use std::fmt;

/// A single alternative: a non-empty ordered sequence of tokens, or the
/// single-element sequence `[ε]`.
pub type Alternative = Vec<Token>;

/// A production: the set of alternatives for one nonterminal LHS.
///
/// Invariants (enforced by [`crate::builder::Builder`], not here): every
/// token appearing in an alternative has been pre-declared; an alternative
/// is non-empty; the only way to express ε is the single-element sequence
/// `[ε]`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Production {
    pub lhs: NonTerminal,
    pub alternatives: Vec<Alternative>,
}

impl Production {
    pub fn new(lhs: NonTerminal) -> Self {
        Self {
            lhs,
            alternatives: Vec::new(),
        }
    }

    pub fn push(&mut self, alt: Alternative) {
        self.alternatives.push(alt);
    }

    /// `true` if any alternative begins with the production's own LHS.
    pub fn is_left_recursive(&self) -> bool {
        self.alternatives
            .iter()
            .any(|alt| alt.first() == Some(&self.lhs.token()))
    }
}

pub fn format_alternative(alt: &[Token]) -> String {
    if alt.len() == 1 && is_epsilon(alt[0]) {
        "ε".to_string()
    } else {
        alt.iter()
            .map(|t| t.to_string())
            .collect::<Vec<_>>()
            .join(" ")
    }
}

impl fmt::Display for Production {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let alts = self
            .alternatives
            .iter()
            .map(|alt| format_alternative(alt))
            .collect::<Vec<_>>()
            .join(" | ");
        write!(f, "{} -> {}", self.lhs.token(), alts)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn left_recursive_detection() {
        let mut p = Production::new(NonTerminal(1));
        p.push(vec![1, -1]);
        p.push(vec![-2]);
        assert!(p.is_left_recursive());
    }

    #[test]
    fn epsilon_display() {
        let mut p = Production::new(NonTerminal(1));
        p.push(vec![0]);
        assert_eq!(p.to_string(), "1 -> ε");
    }
}

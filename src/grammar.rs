//! Grammar store: terminals, nonterminals, names, productions, and the
//! transformation map recording synthetic nonterminals minted while
//! eliminating left recursion and left-factoring.

use crate::ordered_set::OrderedSet;
use crate::production::Production;
use crate::token::{NonTerminal, Terminal, Token, DEFAULT_EOF};
use indexmap::IndexMap;

/// Mutable grammar state owned by a [`crate::builder::Builder`].
///
/// Rewritten in place by left-recursion elimination and left-factoring;
/// `first_sets`/`follow_sets`/`predict_sets` are filled in once the grammar
/// is in its final, LL(1)-suitable shape.
#[derive(Debug, Clone, Default)]
pub struct GrammarState {
    pub terminals: OrderedSet<Token>,
    pub nonterminals: OrderedSet<Token>,
    pub terminal_names: IndexMap<Token, String>,
    pub nonterminal_names: IndexMap<Token, String>,
    /// Keyed by LHS; `IndexMap` preserves first-insertion order, which is
    /// the canonical rule-id assignment order.
    pub productions: IndexMap<Token, Production>,
    /// Fresh nonterminal -> the original nonterminal it was derived from.
    pub transformations: IndexMap<Token, Token>,
    pub first_sets: IndexMap<Token, OrderedSet<Token>>,
    pub follow_sets: IndexMap<Token, OrderedSet<Token>>,
    pub predict_sets: IndexMap<crate::token::RuleId, OrderedSet<Token>>,
    pub eof: Token,
    pub start: Option<Token>,
}

impl GrammarState {
    pub fn new() -> Self {
        Self {
            eof: DEFAULT_EOF,
            ..Default::default()
        }
    }

    pub fn start_nonterminal(&self) -> Option<NonTerminal> {
        self.start.map(NonTerminal)
    }

    pub fn eof_terminal(&self) -> Terminal {
        Terminal(self.eof)
    }

    /// Numeric identity for a freshly minted nonterminal: one past the
    /// largest nonterminal currently declared.
    pub fn next_fresh_nonterminal(&self) -> Token {
        self.nonterminals.iter().copied().max().unwrap_or(0) + 1
    }

    /// Mints a fresh nonterminal derived from `original`, naming it
    /// `name(original) ++ "Prime"`, recording the transformation, and
    /// registering it in `nonterminals`/`nonterminal_names`.
    pub fn mint_fresh_nonterminal(&mut self, original: NonTerminal) -> NonTerminal {
        let fresh = self.next_fresh_nonterminal();
        self.nonterminals.insert(fresh);
        let base_name = self
            .nonterminal_names
            .get(&original.token())
            .cloned()
            .unwrap_or_else(|| original.token().to_string());
        self.nonterminal_names
            .insert(fresh, format!("{base_name}Prime"));
        self.transformations.insert(fresh, original.token());
        NonTerminal(fresh)
    }

    pub fn production(&self, lhs: NonTerminal) -> Option<&Production> {
        self.productions.get(&lhs.token())
    }

    pub fn production_mut(&mut self, lhs: NonTerminal) -> Option<&mut Production> {
        self.productions.get_mut(&lhs.token())
    }

    pub fn terminal_name(&self, t: Terminal) -> String {
        self.terminal_names
            .get(&t.token())
            .cloned()
            .unwrap_or_else(|| t.token().to_string())
    }

    pub fn nonterminal_name(&self, n: NonTerminal) -> String {
        self.nonterminal_names
            .get(&n.token())
            .cloned()
            .unwrap_or_else(|| n.token().to_string())
    }

    /// Assigns rule-ids to every alternative, in grammar order (the order
    /// productions were first inserted, then the order their alternatives
    /// were added) — the canonical order PREDICT computation and
    /// PREDICT and parse-table emission alike.
    pub fn assign_rule_ids(&self) -> Vec<(crate::token::RuleId, NonTerminal, crate::production::Alternative)> {
        let mut rules = Vec::new();
        let mut next_id: crate::token::RuleId = 1;
        for (&lhs, production) in self.productions.iter() {
            for alt in &production.alternatives {
                rules.push((next_id, NonTerminal(lhs), alt.clone()));
                next_id += 1;
            }
        }
        rules
    }
}

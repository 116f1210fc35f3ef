//! The `Builder` façade — incremental grammar registration, validation,
//! and pipeline orchestration.
//!
//! Registration is incremental (terminals/nonterminals/rules added one at a
//! time) and `build()` is invoked once to run the full pipeline.

use crate::error::{GrammarError, Result};
use crate::grammar::GrammarState;
use crate::left_factoring::eliminate_first_first_conflicts;
use crate::left_recursion::{detect_indirect_cycle, eliminate_direct_left_recursion};
use crate::ordered_set::OrderedSet;
use crate::production::Production;
use crate::sets::{compute_first_sets, compute_follow_sets, compute_predict_sets};
use crate::table::{build_table, ParseTable};
use crate::token::{is_epsilon, is_nonterminal, is_terminal, NonTerminal, RuleId, Terminal, Token};

/// Incremental builder for an LL(1) grammar. Construct empty, register
/// terminals/nonterminals/rules, then call [`Builder::build`] once.
///
/// `build()` rewrites the stored grammar in place (left-recursion-free,
/// left-factored) and is therefore destructive; clone the builder first if
/// you need a pristine copy of the original grammar afterward.
#[derive(Debug, Clone, Default)]
pub struct Builder {
    state: GrammarState,
    table: Option<ParseTable>,
}

impl Builder {
    pub fn new() -> Self {
        Self {
            state: GrammarState::new(),
            table: None,
        }
    }

    /// Sets the EOF terminal. Default is a fixed sentinel
    /// ([`crate::token::DEFAULT_EOF`]) chosen before any terminal is added.
    pub fn set_eof_token(&mut self, eof: Token) {
        self.state.eof = eof;
    }

    /// Sets the start nonterminal. Default is the first nonterminal added.
    pub fn set_start_rule(&mut self, start: NonTerminal) {
        self.state.start = Some(start.token());
    }

    fn is_declared(&self, token: Token) -> bool {
        self.state.terminals.contains(&token) || self.state.nonterminals.contains(&token)
    }

    pub fn add_terminal(&mut self, name: impl Into<String>, t: Token) -> Result<Terminal> {
        if is_epsilon(t) || self.is_declared(t) {
            return Err(GrammarError::DuplicateToken { token: t });
        }
        self.state.terminals.insert(t);
        self.state.terminal_names.insert(t, name.into());
        Ok(Terminal(t))
    }

    pub fn add_nonterminal(&mut self, name: impl Into<String>, n: Token) -> Result<NonTerminal> {
        if is_epsilon(n) || self.is_declared(n) {
            return Err(GrammarError::DuplicateToken { token: n });
        }
        self.state.nonterminals.insert(n);
        self.state.nonterminal_names.insert(n, name.into());
        if self.state.start.is_none() {
            self.state.start = Some(n);
        }
        Ok(NonTerminal(n))
    }

    fn validate_token(&self, token: Token) -> Result<()> {
        if is_epsilon(token) {
            return Ok(());
        }
        if is_terminal(token) && self.state.terminals.contains(&token) {
            return Ok(());
        }
        if is_nonterminal(token) && self.state.nonterminals.contains(&token) {
            return Ok(());
        }
        Err(GrammarError::UndeclaredToken { token })
    }

    /// Appends a new alternative to the Production whose LHS is `lhs`,
    /// creating the Production if absent.
    pub fn add_rule(&mut self, lhs: NonTerminal, rhs: Vec<Token>) -> Result<()> {
        self.validate_token(lhs.token())?;
        debug_assert!(
            !rhs.is_empty(),
            "an alternative must be non-empty; use [EPSILON] to express ε"
        );
        for &tok in &rhs {
            self.validate_token(tok)?;
        }

        self.state
            .productions
            .entry(lhs.token())
            .or_insert_with(|| Production::new(lhs))
            .push(rhs);

        Ok(())
    }

    /// Runs the full pipeline — left-recursion elimination, left-factoring,
    /// FIRST/FOLLOW/PREDICT computation, then table emission — and returns
    /// the parse table. Destructive to the stored grammar; see the struct
    /// docs.
    pub fn build(&mut self) -> Result<ParseTable> {
        let start = self.state.start.unwrap_or(0);

        if start == 0 || !self.state.productions.contains_key(&start) {
            return Err(GrammarError::NoStartRule { start });
        }

        log::info!("building LL(1) parse table, start nonterminal {start}");

        eliminate_direct_left_recursion(&mut self.state);
        eliminate_first_first_conflicts(&mut self.state);
        detect_indirect_cycle(&self.state)?;

        let first = compute_first_sets(&self.state);
        let follow = compute_follow_sets(&self.state, &first);
        let rules = self.state.assign_rule_ids();
        let predict = compute_predict_sets(&first, &follow, &rules);

        self.state.first_sets = first;
        self.state.follow_sets = follow;
        self.state.predict_sets = predict;

        let table = build_table(&self.state, &rules)?;
        self.table = Some(table.clone());
        Ok(table)
    }

    // -- Post-build introspection -------------------------------------

    pub fn first(&self, token: Token) -> OrderedSet<Token> {
        self.state.first_sets.get(&token).cloned().unwrap_or_default()
    }

    pub fn follow(&self, nonterminal: NonTerminal) -> OrderedSet<Token> {
        self.state
            .follow_sets
            .get(&nonterminal.token())
            .cloned()
            .unwrap_or_default()
    }

    pub fn predict(&self, rule: RuleId) -> OrderedSet<Token> {
        self.state.predict_sets.get(&rule).cloned().unwrap_or_default()
    }

    pub fn productions(&self) -> impl Iterator<Item = &Production> {
        self.state.productions.values()
    }

    pub fn transformations(&self) -> impl Iterator<Item = (Token, Token)> + '_ {
        self.state.transformations.iter().map(|(&k, &v)| (k, v))
    }

    pub fn terminal_name(&self, t: Terminal) -> String {
        self.state.terminal_name(t)
    }

    pub fn nonterminal_name(&self, n: NonTerminal) -> String {
        self.state.nonterminal_name(n)
    }

    pub fn table(&self) -> Option<&ParseTable> {
        self.table.as_ref()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_undeclared_token() {
        let mut b = Builder::new();
        let s = b.add_nonterminal("S", 1).unwrap();
        let err = b.add_rule(s, vec![-99]);
        assert!(matches!(err, Err(GrammarError::UndeclaredToken { token: -99 })));
    }

    #[test]
    fn rejects_duplicate_token() {
        let mut b = Builder::new();
        b.add_terminal("a", -1).unwrap();
        let err = b.add_terminal("a2", -1);
        assert!(matches!(err, Err(GrammarError::DuplicateToken { token: -1 })));
    }

    #[test]
    fn rejects_build_with_no_start_production() {
        let mut b = Builder::new();
        b.add_nonterminal("S", 1).unwrap();
        let err = b.build();
        assert!(matches!(err, Err(GrammarError::NoStartRule { .. })));
    }

    #[test]
    fn default_start_is_first_nonterminal_added() {
        let mut b = Builder::new();
        let s = b.add_nonterminal("S", 1).unwrap();
        b.add_nonterminal("A", 2).unwrap();
        b.add_terminal("a", -1).unwrap();
        b.add_rule(s, vec![-1]).unwrap();
        let table = b.build().unwrap();
        assert_eq!(table.get(s, Terminal(-1)), 1);
    }

    #[test]
    fn full_pipeline_s2() {
        // E -> E + E | P ; P -> 1
        let mut b = Builder::new();
        let e = b.add_nonterminal("E", 1).unwrap();
        let p = b.add_nonterminal("P", 2).unwrap();
        let plus = b.add_terminal("+", -1).unwrap();
        let one = b.add_terminal("1", -2).unwrap();
        b.add_rule(e, vec![e.token(), plus.token(), e.token()]).unwrap();
        b.add_rule(e, vec![p.token()]).unwrap();
        b.add_rule(p, vec![one.token()]).unwrap();

        let table = b.build().unwrap();
        // E -> P F (rule 1), P -> 1 (rule 2), F -> + G | eps handled by
        // alpha-expansion against P; exact rule ids are grounded in the
        // fixture order, but the table must route "1" to a P-first rule
        // and never be ambiguous.
        assert_ne!(table.get(e, one), crate::token::NO_RULE);
        assert_ne!(table.get(p, one), crate::token::NO_RULE);
    }
}

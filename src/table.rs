//! Parse-table emission.
//!
//! Pours each rule's PREDICT set into the `(NonTerminal, Terminal) ->
//! RuleId` table and records the right-hand side bound to each rule-id.
//! A double write to the same cell with a different rule-id raises a
//! conflict error.

use crate::error::{GrammarError, Result};
use crate::grammar::GrammarState;
use crate::ordered_set::OrderedSet;
use crate::production::Alternative;
use crate::token::{NonTerminal, RuleId, Terminal, Token, NO_RULE};
use indexmap::IndexMap;
use std::fmt;

/// The emitted LL(1) parse table: a self-contained value independent of the
/// `Builder` that produced it.
#[derive(Debug, Clone)]
pub struct ParseTable {
    action: IndexMap<(Token, Token), RuleId>,
    rhs: IndexMap<RuleId, Alternative>,
}

impl ParseTable {
    /// `table[A, t] -> RuleId`, returning [`NO_RULE`] (0) when there is no
    /// entry.
    pub fn get(&self, nonterminal: NonTerminal, terminal: Terminal) -> RuleId {
        self.action
            .get(&(nonterminal.token(), terminal.token()))
            .copied()
            .unwrap_or(NO_RULE)
    }

    /// `table[r] -> Token[]`, the right-hand side bound to rule-id `r`.
    /// Returns `None` for `r == 0` or any rule-id never emitted.
    pub fn rhs_of(&self, rule: RuleId) -> Option<&[Token]> {
        if rule == NO_RULE {
            return None;
        }
        self.rhs.get(&rule).map(|v| v.as_slice())
    }

    /// Ordered iteration over every occupied `(nonterminal, terminal) ->
    /// rule` cell, in the order cells were written.
    pub fn iter(&self) -> impl Iterator<Item = ((NonTerminal, Terminal), RuleId)> + '_ {
        self.action
            .iter()
            .map(|(&(nt, t), &rule)| ((NonTerminal(nt), Terminal(t)), rule))
    }

    pub fn rule_count(&self) -> usize {
        self.rhs.len()
    }
}

/// Assembles the parse table from a grammar whose FIRST/FOLLOW/PREDICT sets
/// have already been computed. Returns [`GrammarError::AmbiguousAfterTransform`]
/// on a double write to the same `(nonterminal, terminal)` cell.
pub fn build_table(
    state: &GrammarState,
    rules: &[(RuleId, NonTerminal, Alternative)],
) -> Result<ParseTable> {
    let mut action: IndexMap<(Token, Token), RuleId> = IndexMap::new();
    let mut rhs: IndexMap<RuleId, Alternative> = IndexMap::new();

    for (rule_id, lhs, alt) in rules {
        rhs.insert(*rule_id, alt.clone());

        let predict = state
            .predict_sets
            .get(rule_id)
            .cloned()
            .unwrap_or_else(OrderedSet::new);

        for &terminal in predict.iter() {
            let key = (lhs.token(), terminal);
            if let Some(&existing) = action.get(&key) {
                if existing != *rule_id {
                    return Err(GrammarError::ambiguous(*lhs, terminal, existing, *rule_id));
                }
            }
            action.insert(key, *rule_id);
        }
    }

    Ok(ParseTable { action, rhs })
}

impl fmt::Display for ParseTable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (&(nt, t), &rule) in &self.action {
            writeln!(f, "M[{nt}, {t}] = {rule}")?;
        }
        Ok(())
    }
}

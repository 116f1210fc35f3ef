//! Fixed-point computation of FIRST, FOLLOW, and PREDICT over the
//! post-rewrite grammar, following the standard recurrences (Aho et al.,
//! "Compilers: Principles, Techniques, and Tools", §4.4).

use crate::grammar::GrammarState;
use crate::ordered_set::OrderedSet;
use crate::token::{is_epsilon, is_nonterminal, NonTerminal, RuleId, Token, EPSILON};
use indexmap::IndexMap;

pub type SymbolSets = IndexMap<Token, OrderedSet<Token>>;

/// Computes FIRST for every terminal, ε, and nonterminal in the grammar.
pub fn compute_first_sets(state: &GrammarState) -> SymbolSets {
    let mut first: SymbolSets = IndexMap::new();

    for &t in state.terminals.iter() {
        first.insert(t, OrderedSet::singleton(t));
    }
    first.insert(EPSILON, OrderedSet::singleton(EPSILON));
    for &n in state.nonterminals.iter() {
        first.entry(n).or_default();
    }

    let mut pass = 0usize;
    loop {
        pass += 1;
        let mut changed = false;

        for (&lhs, production) in state.productions.iter() {
            for alt in &production.alternatives {
                let rhs_first = first_of_string(&first, alt);
                let current = first.get(&lhs).cloned().unwrap_or_default();
                let mut updated = current.clone();
                updated.extend_with(&rhs_first);
                if updated != current {
                    first.insert(lhs, updated);
                    changed = true;
                }
            }
        }

        log::debug!("FIRST fixed point pass {pass}: changed = {changed}");
        if !changed {
            break;
        }
    }

    first
}

/// FIRST of a token sequence `α`, against already-computed FIRST sets.
/// FIRST of the empty sequence is `{ε}`.
pub fn first_of_string(first: &SymbolSets, symbols: &[Token]) -> OrderedSet<Token> {
    let mut result = OrderedSet::new();
    let mut nullable_prefix = true;

    for &sym in symbols {
        if !nullable_prefix {
            break;
        }

        let sym_first = first.get(&sym).cloned().unwrap_or_default();
        for &tok in sym_first.iter() {
            if !is_epsilon(tok) {
                result.insert(tok);
            }
        }
        nullable_prefix = sym_first.contains(&EPSILON);
    }

    if nullable_prefix {
        result.insert(EPSILON);
    }

    result
}

/// Computes FOLLOW for every nonterminal. FOLLOW(start) always contains
/// the EOF terminal. Terminals are not keys of the result.
pub fn compute_follow_sets(state: &GrammarState, first: &SymbolSets) -> SymbolSets {
    let mut follow: SymbolSets = IndexMap::new();

    for &n in state.nonterminals.iter() {
        follow.insert(n, OrderedSet::new());
    }
    if let Some(start) = state.start {
        follow.entry(start).or_default().insert(state.eof);
    }

    let mut pass = 0usize;
    loop {
        pass += 1;
        let mut changed = false;

        for (&lhs, production) in state.productions.iter() {
            for alt in &production.alternatives {
                for (i, &sym) in alt.iter().enumerate() {
                    if !is_nonterminal(sym) {
                        continue;
                    }

                    let beta = &alt[i + 1..];
                    let beta_first = first_of_string(first, beta);

                    let current = follow.get(&sym).cloned().unwrap_or_default();
                    let mut updated = current.clone();
                    for &tok in beta_first.iter() {
                        if !is_epsilon(tok) {
                            updated.insert(tok);
                        }
                    }

                    if beta.is_empty() || beta_first.contains(&EPSILON) {
                        let follow_lhs = follow.get(&lhs).cloned().unwrap_or_default();
                        updated.extend_with(&follow_lhs);
                    }

                    if updated != current {
                        follow.insert(sym, updated);
                        changed = true;
                    }
                }
            }
        }

        log::debug!("FOLLOW fixed point pass {pass}: changed = {changed}");
        if !changed {
            break;
        }
    }

    follow
}

/// Computes PREDICT for every rule, after FIRST and FOLLOW have stabilized.
/// `PREDICT(r) = (FIRST(α) \ {ε}) ∪ (FOLLOW(A) if ε ∈ FIRST(α) else ∅)`
/// for rule `r: A → α`.
pub fn compute_predict_sets(
    first: &SymbolSets,
    follow: &SymbolSets,
    rules: &[(RuleId, NonTerminal, Vec<Token>)],
) -> IndexMap<RuleId, OrderedSet<Token>> {
    let mut predict = IndexMap::new();

    for (rule_id, lhs, alt) in rules {
        let first_alpha = first_of_string(first, alt);
        let mut set = OrderedSet::new();
        for &tok in first_alpha.iter() {
            if !is_epsilon(tok) {
                set.insert(tok);
            }
        }
        if first_alpha.contains(&EPSILON) {
            if let Some(follow_lhs) = follow.get(&lhs.token()) {
                set.extend_with(follow_lhs);
            }
        }
        predict.insert(*rule_id, set);
    }

    predict
}

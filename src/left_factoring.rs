//! Elimination of FIRST/FIRST conflicts via left-factoring.
//!
//! Repeat until fixed point: for each production `P` with LHS `A`, find an
//! alternative `r`, let `x = r[0]`, and let `γ` be every alternative of `P`
//! that begins with `x`. If `|γ| > 1`, factor the common leading token `x`
//! into a fresh tail nonterminal. Only the leading token is examined per
//! pass; multi-token common prefixes fall out across successive fixed-point
//! iterations, since after factoring one symbol the collision reappears at
//! the next position inside the fresh nonterminal.

use crate::grammar::GrammarState;
use crate::production::Production;
use crate::token::{NonTerminal, Token, EPSILON};

/// Runs the left-factoring fixed point over `state`, resolving every
/// FIRST/FIRST collision down to a single leading token.
pub fn eliminate_first_first_conflicts(state: &mut GrammarState) {
    loop {
        let Some((lhs_token, leading)) = find_collision(state) else {
            break;
        };
        rewrite_one(state, NonTerminal(lhs_token), leading);
    }
}

/// Finds the first production (in grammar order) with two or more
/// alternatives sharing a leading token, and returns that token.
fn find_collision(state: &GrammarState) -> Option<(Token, Token)> {
    for (&lhs_token, production) in state.productions.iter() {
        for alt in &production.alternatives {
            let Some(&x) = alt.first() else { continue };
            let count = production
                .alternatives
                .iter()
                .filter(|other| other.first() == Some(&x))
                .count();
            if count > 1 {
                return Some((lhs_token, x));
            }
        }
    }
    None
}

fn rewrite_one(state: &mut GrammarState, lhs: NonTerminal, leading: Token) {
    let production = state
        .production(lhs)
        .expect("scan only yields declared LHS tokens")
        .clone();

    let (colliding, rest): (Vec<_>, Vec<_>) = production
        .alternatives
        .into_iter()
        .partition(|alt| alt.first() == Some(&leading));

    let fresh = state.mint_fresh_nonterminal(lhs);
    let fresh_token = fresh.token();

    log::trace!(
        "left-factoring: rewriting {} on leading token {} (fresh nonterminal {})",
        lhs.token(),
        leading,
        fresh_token
    );

    let mut new_alts = rest;
    new_alts.push(vec![leading, fresh_token]);
    state.production_mut(lhs).expect("LHS still declared").alternatives = new_alts;

    let mut fresh_prod = Production::new(fresh);
    for alt in &colliding {
        let tail = &alt[1..];
        // Normalize an empty tail to [ε] rather than
        // leaving an empty alternative, which would violate the
        // non-empty-RHS invariant.
        let tail = if tail.is_empty() {
            vec![EPSILON]
        } else {
            tail.to_vec()
        };
        // A production's alternatives are a set: two colliding source
        // alternatives that are textually identical (e.g. `S -> a | a`)
        // collapse to one tail here, or the fresh nonterminal would carry
        // the same duplicate collision forward and the outer fixed point
        // would never terminate.
        if !fresh_prod.alternatives.contains(&tail) {
            fresh_prod.push(tail);
        }
    }
    state.productions.insert(fresh_token, fresh_prod);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::grammar::GrammarState;

    fn declare(state: &mut GrammarState, terminals: &[Token], nonterminals: &[Token]) {
        for &t in terminals {
            state.terminals.insert(t);
        }
        for &n in nonterminals {
            state.nonterminals.insert(n);
        }
    }

    #[test]
    fn factors_common_prefix() {
        // S -> a b | a c
        let mut state = GrammarState::new();
        declare(&mut state, &[-1, -2, -3], &[1]);
        let mut s = Production::new(NonTerminal(1));
        s.push(vec![-1, -2]);
        s.push(vec![-1, -3]);
        state.productions.insert(1, s);

        eliminate_first_first_conflicts(&mut state);

        let s_after = state.production(NonTerminal(1)).unwrap();
        assert_eq!(s_after.alternatives.len(), 1);
        assert_eq!(s_after.alternatives[0][0], -1);
        let fresh_token = s_after.alternatives[0][1];
        let fresh = state.production(NonTerminal(fresh_token)).unwrap();
        assert!(fresh.alternatives.contains(&vec![-2]));
        assert!(fresh.alternatives.contains(&vec![-3]));
    }

    #[test]
    fn empty_tail_normalizes_to_epsilon() {
        // S -> x | x y  (alt "x" is a strict prefix of "x y")
        let mut state = GrammarState::new();
        declare(&mut state, &[-1, -2], &[1]);
        let mut s = Production::new(NonTerminal(1));
        s.push(vec![-1]);
        s.push(vec![-1, -2]);
        state.productions.insert(1, s);

        eliminate_first_first_conflicts(&mut state);

        let s_after = state.production(NonTerminal(1)).unwrap();
        let fresh_token = s_after.alternatives[0][1];
        let fresh = state.production(NonTerminal(fresh_token)).unwrap();
        assert!(fresh.alternatives.contains(&vec![EPSILON]));
        assert!(fresh.alternatives.contains(&vec![-2]));
    }

    #[test]
    fn duplicate_identical_alternatives_collapse_instead_of_looping() {
        // S -> a | a : both alternatives are textually identical, so
        // factoring the leading token apart would otherwise reproduce the
        // same duplicate collision forever inside the fresh nonterminal.
        let mut state = GrammarState::new();
        declare(&mut state, &[-1], &[1]);
        let mut s = Production::new(NonTerminal(1));
        s.push(vec![-1]);
        s.push(vec![-1]);
        state.productions.insert(1, s);

        eliminate_first_first_conflicts(&mut state);

        let s_after = state.production(NonTerminal(1)).unwrap();
        assert_eq!(s_after.alternatives.len(), 1);
        let fresh_token = s_after.alternatives[0][1];
        let fresh = state.production(NonTerminal(fresh_token)).unwrap();
        assert_eq!(fresh.alternatives.len(), 1);
        assert_eq!(fresh.alternatives[0], vec![EPSILON]);
    }

    #[test]
    fn no_collision_is_a_no_op() {
        let mut state = GrammarState::new();
        declare(&mut state, &[-1, -2], &[1]);
        let mut s = Production::new(NonTerminal(1));
        s.push(vec![-1]);
        s.push(vec![-2]);
        state.productions.insert(1, s.clone());

        eliminate_first_first_conflicts(&mut state);

        assert_eq!(state.production(NonTerminal(1)).unwrap(), &s);
    }
}

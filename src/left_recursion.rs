//! Elimination of direct left recursion.
//!
//! For every production `P` with LHS `A` such that at least one alternative
//! begins with `A`, rewrite `A → A α | β` into `A → β A′`, `A′ → α A′ | ε`,
//! expanding `α` against `β` first if any `α` tail still mentions `A`
//! (`A → A α` where `α` itself begins with or contains `A`).
//!
//! The outer loop is a fixed point: scan all productions, rewrite the first
//! left-recursive one found, and restart from the beginning. Each rewrite
//! strictly reduces the count of directly left-recursive productions, so
//! the loop terminates in at most `|productions|` outer iterations.

use crate::error::{GrammarError, Result};
use crate::grammar::GrammarState;
use crate::production::Production;
use crate::token::{is_epsilon, is_nonterminal, NonTerminal, Token, EPSILON};
use indexmap::IndexMap;

/// Appends `tok` to `seq`, treating a `seq` that is empty or the single
/// epsilon alternative as the identity element of concatenation — so
/// `ε ++ [A']` is just `[A']`, not `[ε, A']`, matching the textbook
/// `A → βA'` rewrite when `β` is the empty alternative.
fn append_token(seq: &[Token], tok: Token) -> Vec<Token> {
    if seq.is_empty() || (seq.len() == 1 && is_epsilon(seq[0])) {
        vec![tok]
    } else {
        let mut out = seq.to_vec();
        out.push(tok);
        out
    }
}

/// Replaces every occurrence of `target` inside `seq` with the token
/// sequence `replacement`.
fn substitute(seq: &[Token], target: Token, replacement: &[Token]) -> Vec<Token> {
    let mut out = Vec::new();
    for &tok in seq {
        if tok == target {
            out.extend_from_slice(replacement);
        } else {
            out.push(tok);
        }
    }
    out
}

/// Runs the left-recursion-elimination fixed point over `state`, rewriting
/// every directly left-recursive production.
pub fn eliminate_direct_left_recursion(state: &mut GrammarState) {
    loop {
        let next = state
            .productions
            .iter()
            .find(|(_, production)| production.is_left_recursive())
            .map(|(&lhs, _)| lhs);

        let Some(lhs_token) = next else {
            break;
        };

        rewrite_one(state, NonTerminal(lhs_token));
    }
}

fn rewrite_one(state: &mut GrammarState, lhs: NonTerminal) {
    let production = state
        .production(lhs)
        .expect("scan only yields declared LHS tokens")
        .clone();
    let a = lhs.token();

    let mut alphas: Vec<Vec<Token>> = Vec::new();
    let mut betas: Vec<Vec<Token>> = Vec::new();
    for alt in &production.alternatives {
        if alt.first() == Some(&a) {
            alphas.push(alt[1..].to_vec());
        } else {
            betas.push(alt.clone());
        }
    }

    // Step 3: alpha-expansion. Tails that do not mention A are dropped from
    // the expanded set — they already survive through β.
    if alphas.iter().any(|alpha| alpha.contains(&a)) {
        let mut expanded = Vec::new();
        for alpha in &alphas {
            if alpha.contains(&a) {
                for beta in &betas {
                    expanded.push(substitute(alpha, a, beta));
                }
            }
        }
        alphas = expanded;
    }

    let fresh = state.mint_fresh_nonterminal(lhs);
    let fresh_token = fresh.token();

    log::trace!(
        "left recursion: rewriting {} -> {} (fresh nonterminal {})",
        a,
        fresh_token,
        fresh_token
    );

    // Step 4: P := { β ++ [A'] : β in betas }.
    let mut new_alts = Vec::with_capacity(betas.len());
    for beta in &betas {
        new_alts.push(append_token(beta, fresh_token));
    }
    state
        .production_mut(lhs)
        .expect("LHS still declared")
        .alternatives = new_alts;

    // Step 5: A' := { α ++ [A'] : α in alphas } ∪ { [ε] }.
    let mut fresh_prod = Production::new(fresh);
    for alpha in &alphas {
        fresh_prod.push(append_token(alpha, fresh_token));
    }
    fresh_prod.push(vec![EPSILON]);
    state.productions.insert(fresh_token, fresh_prod);
}

/// Best-effort detection of indirect left recursion: a
/// nonterminal that, through a chain of leading-nonterminal references,
/// reaches itself. Direct left recursion is already eliminated by
/// [`eliminate_direct_left_recursion`], so any remaining cycle in the
/// "leading nonterminal" graph must be indirect.
pub fn detect_indirect_cycle(state: &GrammarState) -> Result<()> {
    #[derive(Clone, Copy, PartialEq, Eq)]
    enum Mark {
        Visiting,
        Done,
    }

    fn visit(
        state: &GrammarState,
        node: Token,
        marks: &mut IndexMap<Token, Mark>,
    ) -> Result<()> {
        match marks.get(&node) {
            Some(Mark::Done) => return Ok(()),
            Some(Mark::Visiting) => {
                log::warn!("indirect left recursion detected through nonterminal {node}");
                return Err(GrammarError::IndirectLeftRecursion { nonterminal: node });
            }
            None => {}
        }
        marks.insert(node, Mark::Visiting);
        if let Some(production) = state.production(NonTerminal(node)) {
            for alt in &production.alternatives {
                if let Some(&first) = alt.first() {
                    if is_nonterminal(first) {
                        visit(state, first, marks)?;
                    }
                }
            }
        }
        marks.insert(node, Mark::Done);
        Ok(())
    }

    let mut marks = IndexMap::new();
    for &nt in state.nonterminals.iter() {
        visit(state, nt, &mut marks)?;
    }
    Ok(())
}

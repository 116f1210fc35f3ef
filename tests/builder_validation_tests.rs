//! Builder-level validation: the declared error kinds from the core
//! pipeline (undeclared tokens, duplicate declarations, a missing start
//! production, and residual ambiguity after transformation).

use ll1grammar::{Builder, GrammarError};

#[test]
fn undeclared_terminal_in_rule_is_rejected() {
    let mut b = Builder::new();
    let s = b.add_nonterminal("S", 1).unwrap();
    let err = b.add_rule(s, vec![-7]).unwrap_err();
    assert_eq!(err, GrammarError::UndeclaredToken { token: -7 });
}

#[test]
fn undeclared_nonterminal_in_rule_is_rejected() {
    let mut b = Builder::new();
    let s = b.add_nonterminal("S", 1).unwrap();
    let err = b.add_rule(s, vec![99]).unwrap_err();
    assert_eq!(err, GrammarError::UndeclaredToken { token: 99 });
}

#[test]
fn epsilon_alone_is_always_accepted() {
    let mut b = Builder::new();
    let s = b.add_nonterminal("S", 1).unwrap();
    b.set_start_rule(s);
    assert!(b.add_rule(s, vec![0]).is_ok());
    assert!(b.build().is_ok());
}

#[test]
fn duplicate_terminal_token_is_rejected() {
    let mut b = Builder::new();
    b.add_terminal("a", -1).unwrap();
    let err = b.add_terminal("a-again", -1).unwrap_err();
    assert_eq!(err, GrammarError::DuplicateToken { token: -1 });
}

#[test]
fn duplicate_across_terminal_and_nonterminal_is_rejected() {
    let mut b = Builder::new();
    // same numeric identity reused for a nonterminal after a terminal
    b.add_terminal("a", -1).unwrap();
    let err = b.add_nonterminal("a2", -1).unwrap_err();
    assert_eq!(err, GrammarError::DuplicateToken { token: -1 });
}

#[test]
fn build_with_no_production_for_start_fails() {
    let mut b = Builder::new();
    b.add_nonterminal("S", 1).unwrap();
    b.add_terminal("a", -1).unwrap();
    let err = b.build().unwrap_err();
    assert_eq!(err, GrammarError::NoStartRule { start: 1 });
}

#[test]
fn build_with_no_nonterminals_at_all_fails() {
    let mut b = Builder::new();
    let err = b.build().unwrap_err();
    assert_eq!(err, GrammarError::NoStartRule { start: 0 });
}

/// S -> a | A ; A -> a — left-factoring only merges alternatives sharing a
/// literal *leading token*; here the colliding alternatives begin with
/// different tokens (the terminal `a` vs. the nonterminal `A`), so
/// left-factoring never touches them even though both ultimately predict
/// `a`. This
/// residual FIRST/FIRST overlap across distinct leading tokens must
/// surface as ambiguity at table-emission time.
#[test]
fn residual_first_overlap_across_distinct_leading_tokens_is_ambiguous() {
    let mut b = Builder::new();
    let s = b.add_nonterminal("S", 1).unwrap();
    let a_nt = b.add_nonterminal("A", 2).unwrap();
    let a_t = b.add_terminal("a", -1).unwrap();
    b.set_start_rule(s);
    b.add_rule(s, vec![a_t.token()]).unwrap();
    b.add_rule(s, vec![a_nt.token()]).unwrap();
    b.add_rule(a_nt, vec![a_t.token()]).unwrap();

    let err = b.build();
    assert!(matches!(err, Err(GrammarError::AmbiguousAfterTransform { .. })));
}

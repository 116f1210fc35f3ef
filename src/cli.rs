//! CLI harness for the grammar builder.
//!
//! Reads a line-oriented grammar description, registers it against a
//! [`Builder`], runs the pipeline, and prints FIRST/FOLLOW/PREDICT and the
//! resulting parse table. This harness is deliberately thin: it does not
//! interpret input strings against the table (that belongs to the
//! out-of-scope runtime parse driver), it only exercises the core pipeline.
//!
//! Uses `io::Lines`-driven reading in a `run() -> CliResult<()>` shape,
//! with a declaration-line grammar format (below) rather than a
//! single-character symbol convention.
//!
//! # Grammar description format
//!
//! ```text
//! <n>                              number of declaration lines that follow
//! terminal <name> <token>
//! nonterminal <name> <token>
//! start <token>
//! eof <token>
//! rule <lhs> -> <alt1 tok...> | <alt2 tok...> | ...
//! ```
//!
//! `token` is a signed integer literal; the ε alternative is written as the
//! single token `0`.

use crate::builder::Builder;
use crate::error::{CliError, CliResult};
use crate::token::{NonTerminal, Terminal, Token};
use std::io::{self, BufRead, Write};

/// Main CLI runner: reads a grammar description from stdin, builds the
/// LL(1) parse table, and prints it.
pub fn run() -> CliResult<()> {
    let stdin = io::stdin();
    let mut lines = stdin.lock().lines();

    let declarations = read_declarations(&mut lines)?;
    let mut builder = Builder::new();
    for decl in &declarations {
        apply_declaration(&mut builder, decl)?;
    }

    match builder.build() {
        Ok(table) => {
            println!("Grammar is LL(1).");
            print_sets(&builder);
            print_table(&builder, &table);
        }
        Err(e) => {
            println!("Grammar is not LL(1): {e}");
        }
    }

    Ok(())
}

enum Declaration {
    Terminal { name: String, token: Token },
    NonTerminal { name: String, token: Token },
    Start { token: Token },
    Eof { token: Token },
    Rule { lhs: Token, alternatives: Vec<Vec<Token>> },
}

fn read_declarations<R: BufRead>(lines: &mut io::Lines<R>) -> CliResult<Vec<Declaration>> {
    let n_str = lines
        .next()
        .ok_or(CliError::EmptyInput)??;

    let n = n_str
        .trim()
        .parse::<usize>()
        .map_err(|e| CliError::InvalidFormat(format!("invalid declaration count: {e}")))?;

    let mut declarations = Vec::with_capacity(n);
    for i in 0..n {
        let line = lines.next().ok_or(CliError::NotEnoughDeclarations {
            expected: n,
            actual: i,
        })??;
        declarations.push(parse_declaration(&line)?);
    }

    Ok(declarations)
}

fn parse_declaration(line: &str) -> CliResult<Declaration> {
    let mut parts = line.split_whitespace();
    let keyword = parts
        .next()
        .ok_or_else(|| CliError::InvalidDeclaration(line.to_string()))?;

    match keyword {
        "terminal" => {
            let name = next_field(&mut parts, line)?;
            let token = parse_token(&mut parts, line)?;
            Ok(Declaration::Terminal {
                name: name.to_string(),
                token,
            })
        }
        "nonterminal" => {
            let name = next_field(&mut parts, line)?;
            let token = parse_token(&mut parts, line)?;
            Ok(Declaration::NonTerminal {
                name: name.to_string(),
                token,
            })
        }
        "start" => Ok(Declaration::Start {
            token: parse_token(&mut parts, line)?,
        }),
        "eof" => Ok(Declaration::Eof {
            token: parse_token(&mut parts, line)?,
        }),
        "rule" => parse_rule(line),
        other => Err(CliError::InvalidDeclaration(format!(
            "unknown keyword '{other}' in line: {line}"
        ))),
    }
}

fn next_field<'a>(
    parts: &mut std::str::SplitWhitespace<'a>,
    line: &str,
) -> CliResult<&'a str> {
    parts
        .next()
        .ok_or_else(|| CliError::InvalidDeclaration(line.to_string()))
}

fn parse_token(parts: &mut std::str::SplitWhitespace<'_>, line: &str) -> CliResult<Token> {
    next_field(parts, line)?
        .parse::<Token>()
        .map_err(|e| CliError::InvalidDeclaration(format!("invalid token in '{line}': {e}")))
}

fn parse_rule(line: &str) -> CliResult<Declaration> {
    let rest = line
        .strip_prefix("rule")
        .ok_or_else(|| CliError::InvalidDeclaration(line.to_string()))?
        .trim();

    let mut sides = rest.splitn(2, "->");
    let lhs_str = sides
        .next()
        .ok_or_else(|| CliError::InvalidDeclaration(line.to_string()))?
        .trim();
    let rhs_str = sides
        .next()
        .ok_or_else(|| CliError::InvalidDeclaration(line.to_string()))?
        .trim();

    let lhs = lhs_str
        .parse::<Token>()
        .map_err(|e| CliError::InvalidDeclaration(format!("invalid LHS in '{line}': {e}")))?;

    let mut alternatives = Vec::new();
    for alt_str in rhs_str.split('|') {
        let mut alt = Vec::new();
        for tok_str in alt_str.split_whitespace() {
            let tok = tok_str.parse::<Token>().map_err(|e| {
                CliError::InvalidDeclaration(format!("invalid token in '{line}': {e}"))
            })?;
            alt.push(tok);
        }
        if alt.is_empty() {
            return Err(CliError::InvalidDeclaration(format!(
                "empty alternative in '{line}'"
            )));
        }
        alternatives.push(alt);
    }

    Ok(Declaration::Rule { lhs, alternatives })
}

fn apply_declaration(builder: &mut Builder, decl: &Declaration) -> CliResult<()> {
    match decl {
        Declaration::Terminal { name, token } => {
            builder.add_terminal(name.clone(), *token)?;
        }
        Declaration::NonTerminal { name, token } => {
            builder.add_nonterminal(name.clone(), *token)?;
        }
        Declaration::Start { token } => builder.set_start_rule(NonTerminal(*token)),
        Declaration::Eof { token } => builder.set_eof_token(*token),
        Declaration::Rule { lhs, alternatives } => {
            for alt in alternatives {
                builder.add_rule(NonTerminal(*lhs), alt.clone())?;
            }
        }
    }
    Ok(())
}

fn print_sets(builder: &Builder) {
    for production in builder.productions() {
        let first = builder.first(production.lhs.token());
        let follow = builder.follow(production.lhs);
        println!(
            "FIRST({}) = {{{}}}  FOLLOW({}) = {{{}}}",
            builder.nonterminal_name(production.lhs),
            first.iter().map(Token::to_string).collect::<Vec<_>>().join(", "),
            builder.nonterminal_name(production.lhs),
            follow.iter().map(Token::to_string).collect::<Vec<_>>().join(", "),
        );
    }
}

fn print_table(builder: &Builder, table: &crate::table::ParseTable) {
    for ((nt, t), rule) in table.iter() {
        println!(
            "M[{}, {}] = rule {}",
            builder.nonterminal_name(nt),
            terminal_display(builder, t),
            rule
        );
    }
    let _ = io::stdout().flush();
}

fn terminal_display(builder: &Builder, t: Terminal) -> String {
    builder.terminal_name(t)
}

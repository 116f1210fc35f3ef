//! LL(1) Predictive Parse Table Builder
//!
//! Builds an LL(1) parse table from a declared context-free grammar:
//! eliminates direct left recursion, left-factors FIRST/FIRST conflicts,
//! computes FIRST/FOLLOW/PREDICT sets, and emits the parse table.
//!
//! # References
//! Aho, Alfred V. et al. "Compilers: Principles, Techniques, and Tools" (2nd Edition).
//! Addison-Wesley, 2006.

use std::process;

fn main() {
    env_logger::init();

    if let Err(e) = ll1grammar::cli::run() {
        eprintln!("Error: {e}");
        process::exit(1);
    }
}

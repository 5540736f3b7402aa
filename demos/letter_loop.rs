//! Letter Loop
//!
//! This example wires up the automaton for `[a-zA-Z]+(-[0-9])?` by hand and
//! steps it over a few inputs with a tiny driver loop.
//!
//! Key concepts:
//! - One interner shared by all construction code
//! - Cycles expressed as plain node ids
//! - The caller owns the stepping loop; nodes only answer "where next?"
//!
//! Run with: cargo run --example letter_loop

use dfa_utils::checkpoint::Snapshot;
use dfa_utils::core::{Automaton, CodeRange, NodeId, TransitionInterner};
use std::collections::BTreeSet;

fn closure(automaton: &Automaton, states: BTreeSet<NodeId>) -> BTreeSet<NodeId> {
    let mut stack: Vec<NodeId> = states.iter().copied().collect();
    let mut seen = states;
    while let Some(id) = stack.pop() {
        if let Some(node) = automaton.node(id) {
            for target in node.epsilon_targets() {
                if seen.insert(target) {
                    stack.push(target);
                }
            }
        }
    }
    seen
}

fn accepts(automaton: &Automaton, start: NodeId, input: &str) -> bool {
    let mut current = closure(automaton, BTreeSet::from([start]));
    for symbol in input.chars() {
        let next = current
            .iter()
            .filter_map(|id| automaton.node(*id))
            .flat_map(|node| {
                node.successors()
                    .iter()
                    .filter(|(transition, _)| !transition.is_epsilon())
                    .filter(move |(transition, _)| transition.evaluate(symbol))
                    .map(|(_, target)| *target)
            })
            .collect();
        current = closure(automaton, next);
    }
    current
        .iter()
        .filter_map(|id| automaton.node(*id))
        .any(|node| node.is_accept())
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    println!("=== Letter Loop Example ===\n");

    let interner = TransitionInterner::new();
    let letters = interner.range([
        CodeRange::inclusive('a', 'z'),
        CodeRange::inclusive('A', 'Z'),
    ])?;
    let digit = interner.range([CodeRange::inclusive('0', '9')])?;

    let mut automaton = Automaton::new();
    let start = automaton.add_node(false);
    let word = automaton.add_node(false);
    let dash = automaton.add_node(false);
    let done = automaton.add_node(true);

    automaton.add_edge(start, letters.clone(), word)?;
    automaton.add_edge(word, letters, word)?;
    automaton.add_edge(word, interner.epsilon(), done)?;
    automaton.add_edge(word, interner.char_str("-")?, dash)?;
    automaton.add_edge(dash, digit, done)?;

    println!("{}", automaton.render(start));
    println!("Interned transitions: {}\n", interner.len());

    for input in ["word", "Word-7", "word-", "-7", ""] {
        println!("  {:<8} {}", format!("{input:?}"), accepts(&automaton, start, input));
    }

    let json = Snapshot::capture(&automaton).to_json()?;
    println!("\nSnapshot is {} bytes of JSON", json.len());

    println!("\n=== Example Complete ===");
    Ok(())
}

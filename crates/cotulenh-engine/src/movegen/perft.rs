//! Perft (performance test) for move generator validation.
//!
//! Perft counts the leaf nodes of the legal move tree to a given depth. Each
//! node is reached with make and left with unmake, so perft also exercises
//! the undo path.
//!
//! A deploy move does not pass the turn, so one ply here is one applied
//! move rather than one turn.

use crate::Game;
use cotulenh_core::Move;

/// Counts the number of leaf nodes at the given depth.
pub fn perft(game: &mut Game, depth: u32) -> u64 {
    if depth == 0 {
        return 1;
    }

    let moves = game.moves();

    if depth == 1 {
        return moves.len() as u64;
    }

    let mut nodes = 0u64;
    for m in &moves {
        if !play(game, *m) {
            continue;
        }
        nodes += perft(game, depth - 1);
        game.unmake_move();
    }
    nodes
}

/// Perft with divide: node count below each root move.
/// Useful for debugging to identify which moves have incorrect counts.
pub fn perft_divide(game: &mut Game, depth: u32) -> Vec<(String, u64)> {
    let moves = game.moves();
    let mut results = Vec::with_capacity(moves.len());

    for m in &moves {
        if !play(game, *m) {
            continue;
        }
        let nodes = if depth > 1 {
            perft(game, depth - 1)
        } else {
            1
        };
        game.unmake_move();
        results.push((m.to_string(), nodes));
    }

    results.sort_by(|a, b| a.0.cmp(&b.0));
    results
}

/// Applies a move taken from the legal list. A refusal means generation and
/// application disagree, which is exactly what perft is meant to expose.
fn play(game: &mut Game, m: Move) -> bool {
    let applied = game.apply(m);
    debug_assert!(applied.is_ok(), "generated move {} was refused: {:?}", m, applied);
    match applied {
        Ok(_) => true,
        Err(err) => {
            tracing::error!("perft skipping {}: {}", m, err);
            false
        }
    }
}

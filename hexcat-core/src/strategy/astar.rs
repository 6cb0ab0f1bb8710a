//! A* search strategy
//!
//! Open set is a binary heap ordered by f = g + h, ties broken by insertion
//! order so searches are deterministic. Every step costs 1.
//!
//! The heuristic only looks at the cell's position relative to the border
//! and ignores blocked cells. It scores the target itself at `size`, so it
//! is not admissible, but it changes by at most 1 per step: a closed cell's
//! cost is final and reported costs are shortest distances.

use super::bfs::reconstruct_path;
use super::{is_escape_cell, Pathfinder};
use crate::board::{Hex, HexBoard};
use rustc_hash::{FxHashMap, FxHashSet};
use std::cmp::Ordering;
use std::collections::BinaryHeap;

/// Moves the cat toward the target cell by A* path cost
#[derive(Clone, Copy, Debug, Default)]
pub struct AStarStrategy;

/// `size - distance_to_border(pos)`, where the distance to the border is the
/// smallest of `size - |axis|` over the three cube axes
pub fn border_heuristic(board: &HexBoard, pos: Hex) -> u32 {
    let size = board.size();
    let distance_to_border = (size - pos.q.abs())
        .min(size - pos.r.abs())
        .min(size - pos.s().abs());
    (size - distance_to_border).max(0) as u32
}

/// Open-set entry
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Node {
    pos: Hex,
    f_score: u32,
    seq: u64,
}

impl Ord for Node {
    fn cmp(&self, other: &Self) -> Ordering {
        // Min-heap on f, then FIFO among equal f
        other
            .f_score
            .cmp(&self.f_score)
            .then_with(|| other.seq.cmp(&self.seq))
    }
}

impl PartialOrd for Node {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

/// Result of a successful search
struct Found {
    cost: u32,
    path: Vec<Hex>,
}

fn a_star<G, H>(board: &HexBoard, start: Hex, is_goal: G, heuristic: H) -> Option<Found>
where
    G: Fn(Hex) -> bool,
    H: Fn(Hex) -> u32,
{
    let mut open_set = BinaryHeap::new();
    let mut g_score: FxHashMap<Hex, u32> = FxHashMap::default();
    let mut came_from: FxHashMap<Hex, Hex> = FxHashMap::default();
    let mut closed_set: FxHashSet<Hex> = FxHashSet::default();
    let mut seq = 0u64;

    g_score.insert(start, 0);
    open_set.push(Node {
        pos: start,
        f_score: heuristic(start),
        seq,
    });

    while let Some(Node { pos: current, .. }) = open_set.pop() {
        // Stale entry superseded by a cheaper one
        if closed_set.contains(&current) {
            continue;
        }

        let current_g = g_score.get(&current).copied().unwrap_or(u32::MAX);

        if is_goal(current) {
            return Some(Found {
                cost: current_g,
                path: reconstruct_path(&came_from, current),
            });
        }

        closed_set.insert(current);

        for neighbor in board.adjacent_open(current) {
            if closed_set.contains(&neighbor) {
                continue;
            }

            let tentative_g = current_g + 1;
            let neighbor_g = g_score.get(&neighbor).copied().unwrap_or(u32::MAX);

            if tentative_g < neighbor_g {
                came_from.insert(neighbor, current);
                g_score.insert(neighbor, tentative_g);
                seq += 1;
                open_set.push(Node {
                    pos: neighbor,
                    f_score: tentative_g + heuristic(neighbor),
                    seq,
                });
            }
        }
    }

    None
}

impl AStarStrategy {
    /// Path cost from `start` to `target`, `None` if unreachable
    pub fn path_cost(&self, board: &HexBoard, start: Hex, target: Hex) -> Option<u32> {
        a_star(board, start, |pos| pos == target, |pos| border_heuristic(board, pos))
            .map(|found| found.cost)
    }
}

impl Pathfinder for AStarStrategy {
    fn select_best_move(
        &self,
        board: &HexBoard,
        candidates: &[Hex],
        _current: Hex,
        target: Hex,
    ) -> Option<Hex> {
        let mut best: Option<(Hex, u32)> = None;

        for &candidate in candidates {
            let Some(cost) = self.path_cost(board, candidate, target) else {
                continue;
            };
            if best.map_or(true, |(_, best_cost)| cost < best_cost) {
                best = Some((candidate, cost));
            }
        }

        best.map(|(pos, _)| pos)
    }

    fn has_path_to_goal(&self, board: &HexBoard, pos: Hex) -> bool {
        // Zero heuristic: plain uniform-cost search toward any border cell
        a_star(board, pos, |cell| is_escape_cell(board, cell), |_| 0).is_some()
    }

    fn full_path(&self, board: &HexBoard, current: Hex, target: Hex) -> Vec<Hex> {
        a_star(board, current, |pos| pos == target, |pos| border_heuristic(board, pos))
            .map(|found| found.path)
            .unwrap_or_default()
    }
}

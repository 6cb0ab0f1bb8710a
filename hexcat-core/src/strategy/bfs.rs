//! Breadth-first search strategy

use super::{is_escape_cell, Pathfinder};
use crate::board::{Hex, HexBoard};
use rustc_hash::{FxHashMap, FxHashSet};
use std::collections::VecDeque;

/// Moves the cat along a shortest open path to the nearest border cell
#[derive(Clone, Copy, Debug, Default)]
pub struct BfsStrategy;

impl BfsStrategy {
    /// Shortest open path from `pos` to the nearest border cell
    pub fn escape_route(&self, board: &HexBoard, pos: Hex) -> Option<Vec<Hex>> {
        shortest_path(board, pos, |cell| is_escape_cell(board, cell))
    }
}

impl Pathfinder for BfsStrategy {
    fn select_best_move(
        &self,
        board: &HexBoard,
        candidates: &[Hex],
        _current: Hex,
        _target: Hex,
    ) -> Option<Hex> {
        let mut best: Option<(Hex, usize)> = None;

        for &candidate in candidates {
            let Some(path) = shortest_path(board, candidate, |pos| is_escape_cell(board, pos)) else {
                continue;
            };
            if best.map_or(true, |(_, best_len)| path.len() < best_len) {
                best = Some((candidate, path.len()));
            }
        }

        best.map(|(pos, _)| pos)
    }

    fn has_path_to_goal(&self, board: &HexBoard, pos: Hex) -> bool {
        let mut queue = VecDeque::from([pos]);
        let mut visited = FxHashSet::default();
        visited.insert(pos);

        while let Some(current) = queue.pop_front() {
            if is_escape_cell(board, current) {
                return true;
            }
            for neighbor in board.adjacent_open(current) {
                if visited.insert(neighbor) {
                    queue.push_back(neighbor);
                }
            }
        }

        false
    }

    fn full_path(&self, board: &HexBoard, current: Hex, target: Hex) -> Vec<Hex> {
        shortest_path(board, current, |pos| pos == target).unwrap_or_default()
    }
}

/// BFS from `start` to the first cell satisfying `is_goal`, with parent pointers.
/// The returned path includes both ends.
fn shortest_path<G>(board: &HexBoard, start: Hex, is_goal: G) -> Option<Vec<Hex>>
where
    G: Fn(Hex) -> bool,
{
    let mut queue = VecDeque::from([start]);
    let mut parent: FxHashMap<Hex, Hex> = FxHashMap::default();
    let mut visited = FxHashSet::default();
    visited.insert(start);

    while let Some(current) = queue.pop_front() {
        if is_goal(current) {
            return Some(reconstruct_path(&parent, current));
        }
        for neighbor in board.adjacent_open(current) {
            if visited.insert(neighbor) {
                parent.insert(neighbor, current);
                queue.push_back(neighbor);
            }
        }
    }

    None
}

/// Walk parent pointers back from `goal` and return the path start-first
pub(super) fn reconstruct_path(parent: &FxHashMap<Hex, Hex>, goal: Hex) -> Vec<Hex> {
    let mut path = vec![goal];
    let mut step = goal;
    while let Some(&prev) = parent.get(&step) {
        path.push(prev);
        step = prev;
    }
    path.reverse();
    path
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_open_board_escapes() {
        let board = HexBoard::new(5).unwrap();
        assert!(BfsStrategy.has_path_to_goal(&board, Hex::ORIGIN));

        let path = BfsStrategy.full_path(&board, Hex::ORIGIN, Hex::new(5, 0));
        assert_eq!(path.len(), 6);
        assert_eq!(path.first(), Some(&Hex::ORIGIN));
        let last = *path.last().unwrap();
        assert!(board.is_at_border(last));
        assert_eq!(last, Hex::new(5, 0));
    }

    #[test]
    fn test_path_steps_are_adjacent() {
        let mut board = HexBoard::new(4).unwrap();
        board.block(Hex::new(1, 0)).unwrap();
        board.block(Hex::new(2, -1)).unwrap();
        let path = BfsStrategy.full_path(&board, Hex::ORIGIN, Hex::new(4, 0));
        assert!(!path.is_empty());
        for pair in path.windows(2) {
            assert_eq!(pair[0].distance_to(pair[1]), 1);
            assert!(!board.is_blocked(pair[1]));
        }
    }

    #[test]
    fn test_enclosed_cat() {
        let mut board = HexBoard::new(3).unwrap();
        for dir in crate::board::DIRECTIONS {
            board.block(dir).unwrap();
        }
        assert!(!BfsStrategy.has_path_to_goal(&board, Hex::ORIGIN));
        assert!(BfsStrategy.full_path(&board, Hex::ORIGIN, Hex::new(3, 0)).is_empty());
        assert_eq!(BfsStrategy.next_move(&board, Hex::ORIGIN, Hex::new(3, 0)), None);
    }

    #[test]
    fn test_prefers_shorter_route() {
        // Cat at (1, 0) on a size-3 board: stepping east reaches (2, 0), one step from the edge
        let board = HexBoard::new(3).unwrap();
        let cat = Hex::new(1, 0);
        let candidates = BfsStrategy.possible_moves(&board, cat);
        let best = BfsStrategy.select_best_move(&board, &candidates, cat, Hex::new(3, 0));
        assert_eq!(best, Some(Hex::new(2, 0)));
    }

    #[test]
    fn test_tie_goes_to_first_candidate() {
        let board = HexBoard::new(4).unwrap();
        // All six neighbors of the center are three steps from the border
        let candidates = board.adjacent_open(Hex::ORIGIN);
        let best = BfsStrategy.select_best_move(&board, &candidates, Hex::ORIGIN, Hex::new(4, 0));
        assert_eq!(best, Some(candidates[0]));

        let reversed: Vec<Hex> = candidates.iter().rev().copied().collect();
        let best = BfsStrategy.select_best_move(&board, &reversed, Hex::ORIGIN, Hex::new(4, 0));
        assert_eq!(best, Some(reversed[0]));
    }

    #[test]
    fn test_escape_route_takes_nearest_exit() {
        let mut board = HexBoard::new(3).unwrap();
        for dir in &crate::board::DIRECTIONS[..5] {
            board.block(*dir).unwrap();
        }
        let route = BfsStrategy.escape_route(&board, Hex::ORIGIN).unwrap();
        assert_eq!(route.len(), 4);
        assert_eq!(route[1], Hex::new(0, 1));
        assert!(board.is_at_border(route[3]));

        board.block(Hex::new(0, 1)).unwrap();
        assert!(BfsStrategy.escape_route(&board, Hex::ORIGIN).is_none());
    }

    #[test]
    fn test_start_on_border() {
        let board = HexBoard::new(2).unwrap();
        assert!(BfsStrategy.has_path_to_goal(&board, Hex::new(0, 2)));
        assert_eq!(BfsStrategy.full_path(&board, Hex::new(0, 2), Hex::new(0, 2)), vec![Hex::new(0, 2)]);
    }
}

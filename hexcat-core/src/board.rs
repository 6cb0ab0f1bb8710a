//! Hex board geometry with axial coordinates

use crate::error::{GameError, MoveRejection};
use rustc_hash::FxHashSet;
use serde::{Deserialize, Serialize};
use std::ops::Add;

/// Axial hex coordinates
///
/// The cube coordinate `s` is derived as `-q - r`, so `q + r + s == 0`
/// holds for every value of this type.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Hex {
    pub q: i32,
    pub r: i32,
}

impl Hex {
    pub const ORIGIN: Hex = Hex::new(0, 0);

    pub const fn new(q: i32, r: i32) -> Self {
        Self { q, r }
    }

    /// Third cube coordinate. Saturates when `-q - r` leaves the `i32` range.
    pub const fn s(&self) -> i32 {
        let s = -(self.q as i64) - self.r as i64;
        if s > i32::MAX as i64 {
            i32::MAX
        } else if s < i32::MIN as i64 {
            i32::MIN
        } else {
            s as i32
        }
    }

    /// Cube coordinates widened to `i64`, exact for every `Hex`
    fn cube(&self) -> [i64; 3] {
        let q = self.q as i64;
        let r = self.r as i64;
        [q, r, -q - r]
    }

    /// Distance from center (0,0), i.e. max(|q|, |r|, |s|), saturating at `i32::MAX`
    pub fn distance_to_center(&self) -> i32 {
        let [q, r, s] = self.cube();
        saturate(q.abs().max(r.abs()).max(s.abs()))
    }

    /// Distance between two hexes, saturating at `i32::MAX`
    pub fn distance_to(&self, other: Hex) -> i32 {
        let [q1, r1, s1] = self.cube();
        let [q2, r2, s2] = other.cube();
        saturate(((q1 - q2).abs() + (r1 - r2).abs() + (s1 - s2).abs()) / 2)
    }

    /// Neighbor in direction (0-5), see [`DIRECTIONS`]
    pub fn neighbor(&self, direction: usize) -> Hex {
        *self + DIRECTIONS[direction % 6]
    }

    /// All six neighbors in [`DIRECTIONS`] order, without bounds filtering
    pub fn neighbors(&self) -> impl Iterator<Item = Hex> + '_ {
        DIRECTIONS.iter().map(move |&dir| *self + dir)
    }
}

fn saturate(value: i64) -> i32 {
    i32::try_from(value).unwrap_or(i32::MAX)
}

impl Add for Hex {
    type Output = Hex;

    fn add(self, other: Hex) -> Hex {
        Hex::new(self.q + other.q, self.r + other.r)
    }
}

impl std::fmt::Display for Hex {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({}, {})", self.q, self.r)
    }
}

/// Unit direction vectors in axial coordinates
/// Index: 0=E, 1=NE, 2=NW, 3=W, 4=SW, 5=SE
///
/// Adjacency is always enumerated in this order; strategies rely on it to
/// break ties deterministically.
pub const DIRECTIONS: [Hex; 6] = [
    Hex::new(1, 0),   // E
    Hex::new(1, -1),  // NE
    Hex::new(0, -1),  // NW
    Hex::new(-1, 0),  // W
    Hex::new(-1, 1),  // SW
    Hex::new(0, 1),   // SE
];

/// Hexagonal board of a given radius with player-placed blocks
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct HexBoard {
    size: i32,
    blocked: FxHashSet<Hex>,
}

/// Occupancy summary of the playable area
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct BoardStats {
    pub board_size: i32,
    pub total_cells: usize,
    pub blocked_cells: usize,
    pub free_cells: usize,
    pub blockage_percentage: f64,
}

impl HexBoard {
    /// Create an empty board. `size` is the distance from center to the border ring.
    pub fn new(size: i32) -> Result<Self, GameError> {
        if size < 1 {
            return Err(GameError::InvalidBoardSize(size));
        }
        Ok(Self {
            size,
            blocked: FxHashSet::default(),
        })
    }

    pub fn size(&self) -> i32 {
        self.size
    }

    /// Check if a hex lies on the board (border ring included)
    pub fn is_in_bounds(&self, pos: Hex) -> bool {
        let size = self.size as i64;
        pos.cube().iter().all(|axis| axis.abs() <= size)
    }

    /// Check if a hex is on the outermost ring, where the cat escapes
    pub fn is_at_border(&self, pos: Hex) -> bool {
        pos.distance_to_center() == self.size
    }

    pub fn is_blocked(&self, pos: Hex) -> bool {
        self.blocked.contains(&pos)
    }

    /// Where the player may place a block: inside the border, not yet blocked
    pub fn is_interior_legal_for_player(&self, pos: Hex) -> bool {
        self.check_player_cell(pos).is_ok()
    }

    /// Legality check for a player block, with the reason it fails
    pub fn check_player_cell(&self, pos: Hex) -> Result<(), MoveRejection> {
        if !self.is_in_bounds(pos) {
            Err(MoveRejection::OutOfBounds)
        } else if self.is_at_border(pos) {
            Err(MoveRejection::Border)
        } else if self.is_blocked(pos) {
            Err(MoveRejection::AlreadyBlocked)
        } else {
            Ok(())
        }
    }

    /// Block a cell. Fails with `InvalidMove` unless the cell is legal for the player.
    pub fn block(&mut self, pos: Hex) -> Result<(), GameError> {
        self.check_player_cell(pos)
            .map_err(|reason| GameError::InvalidMove { cell: pos, reason })?;
        self.blocked.insert(pos);
        Ok(())
    }

    /// In-bounds, unblocked neighbors in [`DIRECTIONS`] order
    pub fn adjacent_open(&self, pos: Hex) -> Vec<Hex> {
        pos.neighbors()
            .filter(|&n| self.is_in_bounds(n) && !self.is_blocked(n))
            .collect()
    }

    /// Blocked cells in no particular order
    pub fn blocked(&self) -> impl Iterator<Item = Hex> + '_ {
        self.blocked.iter().copied()
    }

    /// Blocked cells sorted by (q, r), for stable output
    pub fn blocked_sorted(&self) -> Vec<Hex> {
        let mut cells: Vec<Hex> = self.blocked.iter().copied().collect();
        cells.sort_unstable();
        cells
    }

    pub fn blocked_count(&self) -> usize {
        self.blocked.len()
    }

    /// Every cell the player could ever block, ordered by q then r
    pub fn playable_cells(&self) -> impl Iterator<Item = Hex> + '_ {
        let inner = self.size - 1;
        (-inner..=inner)
            .flat_map(move |q| (-inner..=inner).map(move |r| Hex::new(q, r)))
            .filter(move |&pos| self.is_in_bounds(pos) && !self.is_at_border(pos))
    }

    /// Playable cells matching a predicate
    pub fn cells_where<F>(&self, condition: F) -> Vec<Hex>
    where
        F: Fn(&HexBoard, Hex) -> bool,
    {
        self.playable_cells()
            .filter(|&pos| condition(self, pos))
            .collect()
    }

    pub fn stats(&self) -> BoardStats {
        let total_cells = self.playable_cells().count();
        let blocked_cells = self.blocked.len();
        let blockage_percentage = if total_cells == 0 {
            0.0
        } else {
            blocked_cells as f64 / total_cells as f64 * 100.0
        };
        BoardStats {
            board_size: self.size,
            total_cells,
            blocked_cells,
            free_cells: total_cells - blocked_cells,
            blockage_percentage,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cube_invariant() {
        let a = Hex::new(3, -5);
        let b = Hex::new(-2, 7);
        for h in [a, b, a + b, Hex::ORIGIN] {
            assert_eq!(h.q + h.r + h.s(), 0);
        }
        for h in Hex::ORIGIN.neighbors() {
            assert_eq!(h.q + h.r + h.s(), 0);
        }
    }

    #[test]
    fn test_bounds() {
        let board = HexBoard::new(4).unwrap();
        assert!(board.is_in_bounds(Hex::new(0, 0)));
        assert!(board.is_in_bounds(Hex::new(4, 0)));
        assert!(board.is_in_bounds(Hex::new(-4, 4)));
        assert!(!board.is_in_bounds(Hex::new(5, 0)));
        assert!(!board.is_in_bounds(Hex::new(3, 3))); // s = -6
        assert!(board.is_at_border(Hex::new(2, 2)));
        assert!(!board.is_at_border(Hex::new(2, 1)));
    }

    #[test]
    fn test_invalid_size() {
        assert!(matches!(HexBoard::new(0), Err(GameError::InvalidBoardSize(0))));
        assert!(HexBoard::new(-3).is_err());
    }

    #[test]
    fn test_border_never_legal() {
        for size in 1..=8 {
            let board = HexBoard::new(size).unwrap();
            for q in -size..=size {
                for r in -size..=size {
                    let pos = Hex::new(q, r);
                    if board.is_in_bounds(pos) && pos.distance_to_center() == size {
                        assert!(!board.is_interior_legal_for_player(pos), "{pos} on size {size}");
                    }
                }
            }
        }
    }

    #[test]
    fn test_block_rejections() {
        let mut board = HexBoard::new(3).unwrap();
        assert!(board.block(Hex::new(1, 0)).is_ok());

        let err = board.block(Hex::new(1, 0)).unwrap_err();
        assert!(matches!(err, GameError::InvalidMove { reason: MoveRejection::AlreadyBlocked, .. }));

        let err = board.block(Hex::new(3, 0)).unwrap_err();
        assert!(matches!(err, GameError::InvalidMove { reason: MoveRejection::Border, .. }));

        let err = board.block(Hex::new(9, 0)).unwrap_err();
        assert!(matches!(err, GameError::InvalidMove { reason: MoveRejection::OutOfBounds, .. }));

        assert_eq!(board.blocked_count(), 1);
    }

    #[test]
    fn test_adjacent_open_order() {
        let mut board = HexBoard::new(3).unwrap();
        let all = board.adjacent_open(Hex::ORIGIN);
        assert_eq!(all, DIRECTIONS.to_vec());

        board.block(Hex::new(1, -1)).unwrap();
        let open = board.adjacent_open(Hex::ORIGIN);
        assert_eq!(open.len(), 5);
        assert_eq!(open[0], Hex::new(1, 0));
        assert_eq!(open[1], Hex::new(0, -1));
    }

    #[test]
    fn test_adjacent_open_at_border() {
        let board = HexBoard::new(2).unwrap();
        // Corner (2, 0) has three neighbors off the board
        assert_eq!(board.adjacent_open(Hex::new(2, 0)).len(), 3);
    }

    #[test]
    fn test_playable_cells_and_stats() {
        let mut board = HexBoard::new(2).unwrap();
        // Radius-1 hexagon: 1 + 6
        assert_eq!(board.playable_cells().count(), 7);

        board.block(Hex::new(0, 1)).unwrap();
        let stats = board.stats();
        assert_eq!(stats.total_cells, 7);
        assert_eq!(stats.blocked_cells, 1);
        assert_eq!(stats.free_cells, 6);

        let open = board.cells_where(|b, pos| !b.is_blocked(pos));
        assert_eq!(open.len(), 6);
    }

    #[test]
    fn test_extreme_coordinates_are_out_of_bounds() {
        let mut board = HexBoard::new(5).unwrap();
        let extremes = [
            Hex::new(i32::MIN, 0),
            Hex::new(i32::MIN, i32::MIN),
            Hex::new(i32::MAX, i32::MAX),
            Hex::new(0, i32::MIN),
            Hex::new(i32::MAX, i32::MIN),
        ];
        for pos in extremes {
            assert!(!board.is_in_bounds(pos), "{pos}");
            assert!(!board.is_at_border(pos), "{pos}");
            let err = board.block(pos).unwrap_err();
            assert!(matches!(err, GameError::InvalidMove { reason: MoveRejection::OutOfBounds, .. }));
        }
        assert_eq!(board.blocked_count(), 0);

        assert_eq!(Hex::new(i32::MIN, 0).distance_to_center(), i32::MAX);
        assert_eq!(Hex::new(i32::MIN, i32::MIN).s(), i32::MAX);
        assert_eq!(Hex::new(i32::MAX, i32::MIN).s(), 1);
        assert_eq!(Hex::new(i32::MAX, 0).distance_to(Hex::new(i32::MIN, 0)), i32::MAX);
    }

    #[test]
    fn test_distance() {
        assert_eq!(Hex::new(0, 0).distance_to_center(), 0);
        assert_eq!(Hex::new(1, 0).distance_to_center(), 1);
        assert_eq!(Hex::new(2, 2).distance_to_center(), 4);
        assert_eq!(Hex::new(1, -1).distance_to(Hex::new(-1, 1)), 2);
    }
}

//! Game state and turn transition

use crate::board::{Hex, HexBoard};
use crate::error::{GameError, MoveRejection};
use crate::strategy::{CatStrategy, Pathfinder};
use serde::{Deserialize, Serialize};

// ============================================================================
// CONSTANTS
// ============================================================================

/// Base score for trapping the cat
const WIN_BASE_SCORE: i64 = 1000;

/// Bonus per ring of board radius
const SIZE_BONUS: i64 = 50;

/// Penalty per move taken
const MOVE_PENALTY: i64 = 10;

// ============================================================================
// CORE TYPES
// ============================================================================

/// Game status
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum GameStatus {
    #[default]
    InProgress,
    /// Cat has no open path to the border
    PlayerWon,
    /// Cat stands on a border cell
    CatEscaped,
    Aborted,
}

impl GameStatus {
    pub fn is_terminal(self) -> bool {
        !matches!(self, GameStatus::InProgress)
    }
}

impl std::fmt::Display for GameStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let text = match self {
            GameStatus::InProgress => "IN_PROGRESS",
            GameStatus::PlayerWon => "PLAYER_WON",
            GameStatus::CatEscaped => "CAT_ESCAPED",
            GameStatus::Aborted => "ABORTED",
        };
        f.write_str(text)
    }
}

/// What happened during one accepted turn
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TurnOutcome {
    /// Cell the player blocked
    pub blocked: Hex,
    pub cat_from: Hex,
    pub cat_to: Hex,
    pub status: GameStatus,
}

impl TurnOutcome {
    pub fn cat_moved(&self) -> bool {
        self.cat_from != self.cat_to
    }
}

/// Hooks around the turn transition
///
/// Both run synchronously; neither runs for a rejected move.
pub trait TurnObserver {
    /// Called after validation, before the board is touched
    fn before_move(&mut self, _state: &GameState, _cell: Hex) {}

    /// Called once the turn is fully applied
    fn after_move(&mut self, _state: &GameState, _outcome: &TurnOutcome) {}
}

/// Observer that does nothing
pub struct NoopObserver;

impl TurnObserver for NoopObserver {}

// ============================================================================
// GAME STATE
// ============================================================================

/// One game: board, cat and turn bookkeeping
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(into = "GameRecord", try_from = "GameRecord")]
pub struct GameState {
    id: String,
    board: HexBoard,
    cat: Hex,
    move_count: u32,
    status: GameStatus,
    strategy: CatStrategy,
}

impl GameState {
    // ========================================================================
    // CONSTRUCTORS
    // ========================================================================

    /// New game with the cat at the center
    pub fn new(id: impl Into<String>, board_size: i32, strategy: CatStrategy) -> Result<Self, GameError> {
        Ok(Self {
            id: id.into(),
            board: HexBoard::new(board_size)?,
            cat: Hex::ORIGIN,
            move_count: 0,
            status: GameStatus::InProgress,
            strategy,
        })
    }

    // ========================================================================
    // ACCESSORS
    // ========================================================================

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn board(&self) -> &HexBoard {
        &self.board
    }

    pub fn board_size(&self) -> i32 {
        self.board.size()
    }

    pub fn cat_position(&self) -> Hex {
        self.cat
    }

    pub fn move_count(&self) -> u32 {
        self.move_count
    }

    pub fn status(&self) -> GameStatus {
        self.status
    }

    pub fn strategy(&self) -> CatStrategy {
        self.strategy
    }

    pub fn is_finished(&self) -> bool {
        self.status.is_terminal()
    }

    pub fn has_player_won(&self) -> bool {
        self.status == GameStatus::PlayerWon
    }

    /// Reference border cell handed to the strategy
    pub fn target(&self) -> Hex {
        Hex::new(self.board.size(), 0)
    }

    /// Whether the cat can still reach the border
    pub fn cat_can_escape(&self) -> bool {
        self.strategy.has_path_to_goal(&self.board, self.cat)
    }

    /// Route the cat currently plans toward the target, empty if enclosed
    pub fn cat_path(&self) -> Vec<Hex> {
        self.strategy.full_path(&self.board, self.cat, self.target())
    }

    /// Score of a finished game: only trapping the cat earns points
    pub fn score(&self) -> i64 {
        match self.status {
            GameStatus::PlayerWon => (WIN_BASE_SCORE + SIZE_BONUS * self.board.size() as i64
                - MOVE_PENALTY * self.move_count as i64)
                .max(0),
            _ => 0,
        }
    }

    // ========================================================================
    // TURN TRANSITION
    // ========================================================================

    /// Block `cell`, let the cat respond and re-evaluate the status
    pub fn apply_player_move(&mut self, cell: Hex) -> Result<TurnOutcome, GameError> {
        self.apply_player_move_observed(cell, &mut NoopObserver)
    }

    /// [`apply_player_move`](Self::apply_player_move) with hooks
    pub fn apply_player_move_observed(
        &mut self,
        cell: Hex,
        observer: &mut dyn TurnObserver,
    ) -> Result<TurnOutcome, GameError> {
        if self.is_finished() {
            return Err(GameError::InvalidMove {
                cell,
                reason: MoveRejection::GameOver,
            });
        }
        self.board
            .check_player_cell(cell)
            .map_err(|reason| GameError::InvalidMove { cell, reason })?;
        if cell == self.cat {
            return Err(GameError::InvalidMove {
                cell,
                reason: MoveRejection::CatOccupied,
            });
        }

        observer.before_move(self, cell);

        self.board.block(cell)?;

        let cat_from = self.cat;
        let target = self.target();
        if let Some(next) = self.strategy.next_move(&self.board, cat_from, target) {
            self.cat = next;
        }

        let previous = self.status;
        self.status = self.evaluate_status();
        self.move_count += 1;

        let outcome = TurnOutcome {
            blocked: cell,
            cat_from,
            cat_to: self.cat,
            status: self.status,
        };

        tracing::debug!(
            game = %self.id,
            blocked = %cell,
            cat_from = %cat_from,
            cat_to = %self.cat,
            move_count = self.move_count,
            "turn applied"
        );
        if self.status != previous && self.status.is_terminal() {
            tracing::info!(game = %self.id, status = %self.status, moves = self.move_count, "game finished");
        }

        observer.after_move(self, &outcome);

        Ok(outcome)
    }

    fn evaluate_status(&self) -> GameStatus {
        if self.board.is_at_border(self.cat) {
            GameStatus::CatEscaped
        } else if !self.strategy.has_path_to_goal(&self.board, self.cat) {
            GameStatus::PlayerWon
        } else {
            GameStatus::InProgress
        }
    }

    /// Stop a running game. Finished games keep their status.
    pub fn abort(&mut self) -> bool {
        if self.is_finished() {
            return false;
        }
        self.status = GameStatus::Aborted;
        tracing::info!(game = %self.id, moves = self.move_count, "game aborted");
        true
    }
}

// ============================================================================
// FLAT RECORD
// ============================================================================

/// Storage shape of a [`GameState`]
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct GameRecord {
    pub id: String,
    pub board_size: i32,
    pub blocked: Vec<Hex>,
    pub cat: Hex,
    pub move_count: u32,
    pub status: GameStatus,
    #[serde(default)]
    pub strategy: CatStrategy,
}

impl From<GameState> for GameRecord {
    fn from(state: GameState) -> Self {
        GameRecord::from(&state)
    }
}

impl From<&GameState> for GameRecord {
    fn from(state: &GameState) -> Self {
        Self {
            id: state.id.clone(),
            board_size: state.board.size(),
            blocked: state.board.blocked_sorted(),
            cat: state.cat,
            move_count: state.move_count,
            status: state.status,
            strategy: state.strategy,
        }
    }
}

impl TryFrom<GameRecord> for GameState {
    type Error = GameError;

    fn try_from(record: GameRecord) -> Result<Self, Self::Error> {
        let mut board = HexBoard::new(record.board_size)?;
        for cell in record.blocked {
            board
                .block(cell)
                .map_err(|e| GameError::InvalidRecord(format!("blocked cell {cell}: {e}")))?;
        }
        if !board.is_in_bounds(record.cat) {
            return Err(GameError::InvalidRecord(format!("cat {} is off the board", record.cat)));
        }
        if board.is_blocked(record.cat) {
            return Err(GameError::InvalidRecord(format!("cat {} is on a blocked cell", record.cat)));
        }

        Ok(Self {
            id: record.id,
            board,
            cat: record.cat,
            move_count: record.move_count,
            status: record.status,
            strategy: record.strategy,
        })
    }
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn new_game(size: i32) -> GameState {
        GameState::new("test-game", size, CatStrategy::Bfs).unwrap()
    }

    #[test]
    fn test_game_creation() {
        let game = new_game(5);
        assert_eq!(game.cat_position(), Hex::ORIGIN);
        assert_eq!(game.status(), GameStatus::InProgress);
        assert_eq!(game.move_count(), 0);
        assert_eq!(game.target(), Hex::new(5, 0));
        assert!(game.cat_can_escape());
        assert!(GameState::new("x", 0, CatStrategy::Bfs).is_err());
    }

    #[test]
    fn test_turn_moves_cat_and_counts() {
        let mut game = new_game(5);
        let outcome = game.apply_player_move(Hex::new(-2, 0)).unwrap();
        assert_eq!(outcome.blocked, Hex::new(-2, 0));
        assert!(outcome.cat_moved());
        assert_eq!(outcome.cat_from, Hex::ORIGIN);
        assert_eq!(game.cat_position(), outcome.cat_to);
        assert_eq!(game.cat_position().distance_to(Hex::ORIGIN), 1);
        assert_eq!(game.move_count(), 1);
        assert!(game.board().is_blocked(Hex::new(-2, 0)));
    }

    #[test]
    fn test_rejected_moves_leave_state_untouched() {
        let mut game = new_game(5);
        let before = game.clone();

        let err = game.apply_player_move(Hex::new(5, 0)).unwrap_err();
        assert_eq!(err.rejection(), Some(MoveRejection::Border));
        assert_eq!(game, before);

        let err = game.apply_player_move(Hex::new(7, 0)).unwrap_err();
        assert_eq!(err.rejection(), Some(MoveRejection::OutOfBounds));
        assert_eq!(game, before);

        let err = game.apply_player_move(Hex::ORIGIN).unwrap_err();
        assert_eq!(err.rejection(), Some(MoveRejection::CatOccupied));
        assert_eq!(game, before);

        game.apply_player_move(Hex::new(-3, 1)).unwrap();
        let after_first = game.clone();
        let err = game.apply_player_move(Hex::new(-3, 1)).unwrap_err();
        assert_eq!(err.rejection(), Some(MoveRejection::AlreadyBlocked));
        assert_eq!(game, after_first);
    }

    #[test]
    fn test_cat_escapes_on_small_board() {
        // On a size-1 board every neighbor of the center is a border cell
        let mut game = new_game(1);
        assert_eq!(game.board().playable_cells().count(), 1);
        let mut game2 = new_game(2);
        let outcome = game2.apply_player_move(Hex::new(-1, 0)).unwrap();
        assert_eq!(outcome.status, GameStatus::InProgress);
        let outcome = game2.apply_player_move(Hex::new(-1, 1)).unwrap();
        assert_eq!(outcome.status, GameStatus::CatEscaped);
        assert!(game2.board().is_at_border(game2.cat_position()));
        assert_eq!(game2.score(), 0);

        let err = game2.apply_player_move(Hex::new(0, 0)).unwrap_err();
        assert_eq!(err.rejection(), Some(MoveRejection::GameOver));
        assert!(game.abort());
        assert_eq!(game.status(), GameStatus::Aborted);
    }

    #[test]
    fn test_player_traps_cat() {
        // Cat boxed in a size-3 board: ring of radius 2 is the only way out
        let mut game = new_game(3);
        for dir in crate::board::DIRECTIONS {
            let cell = Hex::new(dir.q * 2, dir.r * 2);
            game.board.block(cell).unwrap();
        }
        // Close the remaining gaps of the radius-2 ring
        let ring_gaps = [
            Hex::new(2, -1),
            Hex::new(1, -2),
            Hex::new(-1, -1),
            Hex::new(-2, 1),
            Hex::new(-1, 2),
        ];
        for cell in ring_gaps {
            game.board.block(cell).unwrap();
        }
        let outcome = game.apply_player_move(Hex::new(1, 1)).unwrap();
        assert_eq!(outcome.status, GameStatus::PlayerWon);
        assert!(game.has_player_won());
        assert!(!game.cat_can_escape());
        assert!(game.cat_path().is_empty());
        assert_eq!(game.score(), 1000 + 150 - 10);
        assert!(!game.abort());
    }

    #[test]
    fn test_observer_hooks() {
        #[derive(Default)]
        struct Recorder {
            before: Vec<(u32, Hex)>,
            after: Vec<TurnOutcome>,
        }

        impl TurnObserver for Recorder {
            fn before_move(&mut self, state: &GameState, cell: Hex) {
                assert!(!state.board().is_blocked(cell));
                self.before.push((state.move_count(), cell));
            }

            fn after_move(&mut self, state: &GameState, outcome: &TurnOutcome) {
                assert_eq!(state.cat_position(), outcome.cat_to);
                self.after.push(*outcome);
            }
        }

        let mut game = new_game(4);
        let mut recorder = Recorder::default();
        game.apply_player_move_observed(Hex::new(2, 0), &mut recorder).unwrap();
        assert!(game.apply_player_move_observed(Hex::new(4, 0), &mut recorder).is_err());

        assert_eq!(recorder.before, vec![(0, Hex::new(2, 0))]);
        assert_eq!(recorder.after.len(), 1);
        assert_eq!(recorder.after[0].blocked, Hex::new(2, 0));
    }

    #[test]
    fn test_record_round_trip() {
        let mut game = GameState::new("round-trip", 5, CatStrategy::AStar).unwrap();
        game.apply_player_move(Hex::new(1, 0)).unwrap();
        game.apply_player_move(Hex::new(-2, 2)).unwrap();

        let json = serde_json::to_string(&game).unwrap();
        let restored: GameState = serde_json::from_str(&json).unwrap();
        assert_eq!(restored, game);
        assert_eq!(restored.board_size(), 5);
        assert_eq!(restored.move_count(), 2);
        assert_eq!(restored.strategy(), CatStrategy::AStar);
        assert_eq!(restored.board().blocked_sorted(), game.board().blocked_sorted());
    }

    #[test]
    fn test_record_validation() {
        let record = GameRecord {
            id: "bad".to_string(),
            board_size: 3,
            blocked: vec![Hex::new(3, 0)],
            cat: Hex::ORIGIN,
            move_count: 1,
            status: GameStatus::InProgress,
            strategy: CatStrategy::Bfs,
        };
        assert!(matches!(GameState::try_from(record.clone()), Err(GameError::InvalidRecord(_))));

        let record = GameRecord {
            blocked: vec![Hex::new(1, 0)],
            cat: Hex::new(1, 0),
            ..record
        };
        assert!(matches!(GameState::try_from(record), Err(GameError::InvalidRecord(_))));

        let json = r#"{"id":"old","board_size":4,"blocked":[],"cat":{"q":0,"r":0},"move_count":0,"status":"IN_PROGRESS"}"#;
        let state: GameState = serde_json::from_str(json).unwrap();
        assert_eq!(state.strategy(), CatStrategy::Bfs);
    }
}

//! Game orchestration
//!
//! Loads games from a [`GameRepository`], applies turns and saves the
//! result. Turns are serialized with a single mutex held across
//! load, mutate and save.

use hexcat_core::{
    BfsStrategy, BoardStats, CatStrategy, Difficulty, GameError, GameRepository, GameState,
    GameStatus, Hex, Pathfinder, TurnOutcome,
};
use serde::Serialize;
use std::sync::{Mutex, MutexGuard, PoisonError};

// ============================================================================
// CONFIGURATION
// ============================================================================

/// Limits applied when creating games
#[derive(Clone, Debug)]
pub struct ServiceConfig {
    pub min_board_size: i32,
    pub max_board_size: i32,
    /// Size used when a client does not ask for one
    pub default_board_size: i32,
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self {
            min_board_size: 3,
            max_board_size: 10,
            default_board_size: 5,
        }
    }
}

impl ServiceConfig {
    pub fn with_board_sizes(mut self, min: i32, max: i32) -> Self {
        self.min_board_size = min;
        self.max_board_size = max;
        self
    }

    pub fn with_default_board_size(mut self, size: i32) -> Self {
        self.default_board_size = size;
        self
    }

    pub fn allows(&self, board_size: i32) -> bool {
        (self.min_board_size..=self.max_board_size).contains(&board_size)
    }
}

// ============================================================================
// VIEWS
// ============================================================================

/// Game state enriched for clients
#[derive(Clone, Debug, Serialize)]
pub struct GameView {
    pub id: String,
    pub status: GameStatus,
    pub cat: Hex,
    pub blocked: Vec<Hex>,
    pub move_count: u32,
    pub board_size: i32,
    pub difficulty: Difficulty,
    pub score: i64,
    pub can_escape: bool,
    /// Route the cat plans toward its target, empty when enclosed
    pub cat_path: Vec<Hex>,
}

impl From<&GameState> for GameView {
    fn from(state: &GameState) -> Self {
        Self {
            id: state.id().to_string(),
            status: state.status(),
            cat: state.cat_position(),
            blocked: state.board().blocked_sorted(),
            move_count: state.move_count(),
            board_size: state.board_size(),
            difficulty: state.strategy().difficulty(),
            score: state.score(),
            can_escape: state.cat_can_escape(),
            cat_path: state.cat_path(),
        }
    }
}

#[derive(Clone, Debug, Serialize)]
pub struct GameAnalysis {
    pub id: String,
    pub status: GameStatus,
    pub move_count: u32,
    pub score: i64,
    pub board_size: i32,
    pub cat: Hex,
    /// Steps the cat still needs to reach the border, if it can
    pub distance_to_escape: Option<usize>,
    pub board: BoardStats,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct PlayerStatistics {
    pub games_played: usize,
    pub games_won: usize,
    pub win_rate: f64,
    pub average_score: f64,
}

#[derive(Clone, Debug, Serialize)]
pub struct LeaderboardEntry {
    pub game_id: String,
    pub score: i64,
    pub move_count: u32,
    pub board_size: i32,
    pub difficulty: Difficulty,
}

// ============================================================================
// SERVICE
// ============================================================================

pub struct GameService<R: GameRepository> {
    repository: R,
    config: ServiceConfig,
    turn_lock: Mutex<()>,
}

impl<R: GameRepository> GameService<R> {
    pub fn new(repository: R, config: ServiceConfig) -> Self {
        Self {
            repository,
            config,
            turn_lock: Mutex::new(()),
        }
    }

    pub fn config(&self) -> &ServiceConfig {
        &self.config
    }

    pub fn repository(&self) -> &R {
        &self.repository
    }

    /// Start a game with the cat at the center
    pub fn create_game(&self, board_size: i32, difficulty: Difficulty) -> Result<GameState, GameError> {
        if !self.config.allows(board_size) {
            return Err(GameError::InvalidBoardSize(board_size));
        }

        let _turn = self.lock_turns();
        let id = self.fresh_id()?;
        let state = GameState::new(id, board_size, CatStrategy::for_difficulty(difficulty))?;
        let state = self.repository.save(state)?;

        tracing::info!(game = %state.id(), board_size, %difficulty, "game created");
        Ok(state)
    }

    /// Block `cell` in game `id` and let the cat answer
    pub fn execute_player_move(&self, id: &str, cell: Hex) -> Result<(GameState, TurnOutcome), GameError> {
        let _turn = self.lock_turns();
        let mut state = self.repository.get(id)?;
        let outcome = state.apply_player_move(cell)?;
        let state = self.repository.save(state)?;
        Ok((state, outcome))
    }

    /// Stop a running game; finished games are left alone
    pub fn abort_game(&self, id: &str) -> Result<GameState, GameError> {
        let _turn = self.lock_turns();
        let mut state = self.repository.get(id)?;
        if state.abort() {
            return self.repository.save(state);
        }
        Ok(state)
    }

    pub fn game_view(&self, id: &str) -> Result<GameView, GameError> {
        let state = self.repository.get(id)?;
        Ok(GameView::from(&state))
    }

    /// Whether blocking `cell` would currently be accepted
    pub fn is_valid_move(&self, id: &str, cell: Hex) -> Result<bool, GameError> {
        let state = self.repository.get(id)?;
        Ok(!state.is_finished()
            && state.board().is_interior_legal_for_player(cell)
            && cell != state.cat_position())
    }

    pub fn analyze_game(&self, id: &str) -> Result<GameAnalysis, GameError> {
        let state = self.repository.get(id)?;
        let distance_to_escape = BfsStrategy
            .escape_route(state.board(), state.cat_position())
            .map(|route| route.len() - 1);

        Ok(GameAnalysis {
            id: state.id().to_string(),
            status: state.status(),
            move_count: state.move_count(),
            score: state.score(),
            board_size: state.board_size(),
            cat: state.cat_position(),
            distance_to_escape,
            board: state.board().stats(),
        })
    }

    /// A cell worth blocking: the cat's next step if the player may block it,
    /// else the first open neighbor of the cat the player may block
    pub fn suggest_move(&self, id: &str) -> Result<Option<Hex>, GameError> {
        let state = self.repository.get(id)?;
        if state.is_finished() {
            return Ok(None);
        }

        let board = state.board();
        let cat = state.cat_position();
        let planned = state.strategy().next_move(board, cat, state.target());
        if let Some(cell) = planned.filter(|&cell| board.is_interior_legal_for_player(cell)) {
            return Ok(Some(cell));
        }

        Ok(board
            .adjacent_open(cat)
            .into_iter()
            .find(|&cell| board.is_interior_legal_for_player(cell)))
    }

    pub fn statistics(&self) -> Result<PlayerStatistics, GameError> {
        let games = self.repository.find_all()?;
        let games_played = games.len();
        let games_won = games.iter().filter(|g| g.has_player_won()).count();
        let (win_rate, average_score) = if games_played == 0 {
            (0.0, 0.0)
        } else {
            let total: i64 = games.iter().map(GameState::score).sum();
            (
                games_won as f64 / games_played as f64,
                total as f64 / games_played as f64,
            )
        };

        Ok(PlayerStatistics {
            games_played,
            games_won,
            win_rate,
            average_score,
        })
    }

    /// Best games first; equal scores rank the shorter game higher
    pub fn leaderboard(&self, limit: usize) -> Result<Vec<LeaderboardEntry>, GameError> {
        let mut games = self.repository.find_all()?;
        games.sort_by(|a, b| {
            b.score()
                .cmp(&a.score())
                .then(a.move_count().cmp(&b.move_count()))
                .then_with(|| a.id().cmp(b.id()))
        });

        Ok(games
            .iter()
            .take(limit)
            .map(|g| LeaderboardEntry {
                game_id: g.id().to_string(),
                score: g.score(),
                move_count: g.move_count(),
                board_size: g.board_size(),
                difficulty: g.strategy().difficulty(),
            })
            .collect())
    }

    /// The lock guards no data, so a panic in an earlier turn leaves
    /// nothing half-written and the poison flag is ignored
    fn lock_turns(&self) -> MutexGuard<'_, ()> {
        self.turn_lock.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn fresh_id(&self) -> Result<String, GameError> {
        loop {
            let id = format!("{:016x}", rand::random::<u64>());
            if !self.repository.exists_by_id(&id)? {
                return Ok(id);
            }
        }
    }
}

// ============================================================================
// TESTS
// ============================================================================

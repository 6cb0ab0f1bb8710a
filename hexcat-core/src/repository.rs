//! Persistence port
//!
//! The core never stores anything itself; orchestrators hand it a
//! [`GameRepository`] implementation and move plain [`GameState`] values
//! through it.

use crate::error::GameError;
use crate::game::GameState;

/// Load/save games by identifier
pub trait GameRepository: Send + Sync {
    /// Insert or replace a game, returning the stored value
    fn save(&self, state: GameState) -> Result<GameState, GameError>;

    fn find_by_id(&self, id: &str) -> Result<Option<GameState>, GameError>;

    fn find_all(&self) -> Result<Vec<GameState>, GameError>;

    /// Returns whether a game was removed
    fn delete_by_id(&self, id: &str) -> Result<bool, GameError>;

    fn exists_by_id(&self, id: &str) -> Result<bool, GameError> {
        Ok(self.find_by_id(id)?.is_some())
    }

    /// Like `find_by_id`, but absence is an error
    fn get(&self, id: &str) -> Result<GameState, GameError> {
        self.find_by_id(id)?
            .ok_or_else(|| GameError::NotFound(id.to_string()))
    }

    fn count_where(&self, condition: &dyn Fn(&GameState) -> bool) -> Result<usize, GameError> {
        Ok(self.find_all()?.iter().filter(|state| condition(state)).count())
    }
}

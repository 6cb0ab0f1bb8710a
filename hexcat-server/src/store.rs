//! In-memory game store
//!
//! Games are kept as encoded JSON records, so every save/load goes through
//! the same serialization path a durable store would use.

use hexcat_core::{GameError, GameRepository, GameState};
use rustc_hash::FxHashMap;
use std::sync::RwLock;

/// Process-local implementation of the persistence port
#[derive(Default)]
pub struct MemoryRepository {
    records: RwLock<FxHashMap<String, String>>,
}

impl MemoryRepository {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> Result<usize, GameError> {
        Ok(self.records.read().map_err(poisoned)?.len())
    }

    pub fn is_empty(&self) -> Result<bool, GameError> {
        Ok(self.len()? == 0)
    }
}

fn poisoned<T>(_: T) -> GameError {
    GameError::Storage("game store lock poisoned".to_string())
}

fn decode(data: &str) -> Result<GameState, GameError> {
    serde_json::from_str(data).map_err(|e| GameError::Storage(format!("decode failed: {e}")))
}

impl GameRepository for MemoryRepository {
    fn save(&self, state: GameState) -> Result<GameState, GameError> {
        let data = serde_json::to_string(&state)
            .map_err(|e| GameError::Storage(format!("encode failed: {e}")))?;
        self.records
            .write()
            .map_err(poisoned)?
            .insert(state.id().to_string(), data);
        Ok(state)
    }

    fn find_by_id(&self, id: &str) -> Result<Option<GameState>, GameError> {
        let records = self.records.read().map_err(poisoned)?;
        records.get(id).map(|data| decode(data)).transpose()
    }

    fn find_all(&self) -> Result<Vec<GameState>, GameError> {
        let records = self.records.read().map_err(poisoned)?;
        let mut games = records
            .values()
            .map(|data| decode(data))
            .collect::<Result<Vec<_>, _>>()?;
        games.sort_by(|a, b| a.id().cmp(b.id()));
        Ok(games)
    }

    fn delete_by_id(&self, id: &str) -> Result<bool, GameError> {
        Ok(self.records.write().map_err(poisoned)?.remove(id).is_some())
    }

    fn exists_by_id(&self, id: &str) -> Result<bool, GameError> {
        Ok(self.records.read().map_err(poisoned)?.contains_key(id))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use hexcat_core::{CatStrategy, GameStatus, Hex};

    #[test]
    fn test_save_and_find() {
        let repo = MemoryRepository::new();
        assert!(repo.is_empty().unwrap());

        let mut game = GameState::new("g1", 5, CatStrategy::AStar).unwrap();
        game.apply_player_move(Hex::new(2, 0)).unwrap();
        repo.save(game.clone()).unwrap();

        let loaded = repo.find_by_id("g1").unwrap().unwrap();
        assert_eq!(loaded, game);
        assert!(repo.exists_by_id("g1").unwrap());
        assert!(repo.find_by_id("missing").unwrap().is_none());
        assert!(matches!(repo.get("missing"), Err(GameError::NotFound(_))));
    }

    #[test]
    fn test_save_replaces() {
        let repo = MemoryRepository::new();
        let mut game = GameState::new("g1", 4, CatStrategy::Bfs).unwrap();
        repo.save(game.clone()).unwrap();
        game.apply_player_move(Hex::new(-1, 0)).unwrap();
        repo.save(game).unwrap();

        assert_eq!(repo.len().unwrap(), 1);
        assert_eq!(repo.get("g1").unwrap().move_count(), 1);
    }

    #[test]
    fn test_find_all_and_delete() {
        let repo = MemoryRepository::new();
        for id in ["b", "a", "c"] {
            repo.save(GameState::new(id, 3, CatStrategy::Bfs).unwrap()).unwrap();
        }
        let ids: Vec<String> = repo.find_all().unwrap().iter().map(|g| g.id().to_string()).collect();
        assert_eq!(ids, ["a", "b", "c"]);

        let running = repo.count_where(&|g| g.status() == GameStatus::InProgress).unwrap();
        assert_eq!(running, 3);

        assert!(repo.delete_by_id("b").unwrap());
        assert!(!repo.delete_by_id("b").unwrap());
        assert_eq!(repo.len().unwrap(), 2);
    }

    #[test]
    fn test_poisoned_store_reports_storage_error() {
        let repo = MemoryRepository::new();
        repo.save(GameState::new("g1", 3, CatStrategy::Bfs).unwrap()).unwrap();

        let panicked = std::thread::scope(|scope| {
            scope
                .spawn(|| {
                    let _guard = repo.records.write().unwrap();
                    panic!("writer interrupted");
                })
                .join()
                .is_err()
        });
        assert!(panicked);

        assert!(matches!(repo.len(), Err(GameError::Storage(_))));
        assert!(matches!(repo.is_empty(), Err(GameError::Storage(_))));
        assert!(matches!(repo.find_by_id("g1"), Err(GameError::Storage(_))));
    }
}

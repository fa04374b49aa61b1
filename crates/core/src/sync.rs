use crate::GameState;
use thiserror::Error;

pub type Version = u64;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum SyncError {
    #[error("state changed underneath the transform")]
    Conflict,
    #[error("transform aborted: {0}")]
    Aborted(String),
}

/// Atomic transform-if-unchanged boundary the engine expects from its
/// persistence/sync collaborator: read a versioned snapshot, commit
/// only if nothing else committed in between. The engine side stays a
/// pure `(state) -> state'` function; retrying is the caller's job
/// (see [`transform`]).
pub trait StateStore {
    fn snapshot(&self) -> (GameState, Version);
    fn commit(&mut self, expected: Version, state: GameState) -> Result<Version, SyncError>;
}

/// Compare-and-apply loop over a [`StateStore`]. The transform runs
/// against a fresh snapshot on every attempt; an abort from the
/// transform is final, a version conflict retries.
pub fn transform<S, F>(store: &mut S, retries: u32, mut apply: F) -> Result<GameState, SyncError>
where
    S: StateStore,
    F: FnMut(&mut GameState) -> Result<(), String>,
{
    for _ in 0..=retries {
        let (mut state, version) = store.snapshot();
        apply(&mut state).map_err(SyncError::Aborted)?;
        match store.commit(version, state.clone()) {
            Ok(_) => return Ok(state),
            Err(SyncError::Conflict) => continue,
            Err(err) => return Err(err),
        }
    }
    Err(SyncError::Conflict)
}

/// In-process store with optimistic versioning.
#[derive(Debug)]
pub struct MemoryStore {
    state: GameState,
    version: Version,
}

impl MemoryStore {
    pub fn new(state: GameState) -> Self {
        Self { state, version: 0 }
    }
}

impl StateStore for MemoryStore {
    fn snapshot(&self) -> (GameState, Version) {
        (self.state.clone(), self.version)
    }

    fn commit(&mut self, expected: Version, state: GameState) -> Result<Version, SyncError> {
        if expected != self.version {
            return Err(SyncError::Conflict);
        }
        self.state = state;
        self.version += 1;
        Ok(self.version)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{EventBus, Game, GameConfig};

    fn fresh_state() -> GameState {
        let mut events = EventBus::default();
        let players = vec!["p1".to_string(), "p2".to_string()];
        Game::new(GameConfig::default(), &players, 42, &mut events)
            .expect("game setup")
            .state
    }

    #[test]
    fn transform_commits_on_clean_store() {
        let mut store = MemoryStore::new(fresh_state());
        let result = transform(&mut store, 3, |state| {
            state.turn_count += 1;
            Ok(())
        })
        .expect("commit");
        assert_eq!(result.turn_count, 1);
        assert_eq!(store.snapshot().1, 1);
    }

    #[test]
    fn stale_commit_conflicts() {
        let mut store = MemoryStore::new(fresh_state());
        let (state, version) = store.snapshot();
        store.commit(version, state.clone()).expect("first commit");
        assert_eq!(store.commit(version, state), Err(SyncError::Conflict));
    }

    #[test]
    fn abort_is_final() {
        let mut store = MemoryStore::new(fresh_state());
        let result = transform(&mut store, 3, |_| Err("nope".to_string()));
        assert_eq!(result, Err(SyncError::Aborted("nope".to_string())));
        assert_eq!(store.snapshot().1, 0);
    }
}

use crate::*;

/// Storage for the best score across sessions.
///
/// Failures are reported but never stop a game: the engine keeps playing
/// on its in-memory value.
pub trait HighscoreStore {
    fn load(&mut self) -> core::result::Result<Score, StoreError>;
    fn save(&mut self, highscore: Score) -> core::result::Result<(), StoreError>;
}

impl<S: HighscoreStore + ?Sized> HighscoreStore for &mut S {
    fn load(&mut self) -> core::result::Result<Score, StoreError> {
        (**self).load()
    }

    fn save(&mut self, highscore: Score) -> core::result::Result<(), StoreError> {
        (**self).save(highscore)
    }
}

/// Keeps nothing; every session starts from 0.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct NoStore;

impl HighscoreStore for NoStore {
    fn load(&mut self) -> core::result::Result<Score, StoreError> {
        Ok(0)
    }

    fn save(&mut self, _highscore: Score) -> core::result::Result<(), StoreError> {
        Ok(())
    }
}

/// Holds the high score in memory, e.g. shared by consecutive games in one process.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct MemoryStore {
    highscore: Score,
    saves: usize,
}

impl MemoryStore {
    pub fn new(highscore: Score) -> Self {
        Self { highscore, saves: 0 }
    }

    pub fn highscore(&self) -> Score {
        self.highscore
    }

    /// Number of successful saves.
    pub fn saves(&self) -> usize {
        self.saves
    }
}

impl HighscoreStore for MemoryStore {
    fn load(&mut self) -> core::result::Result<Score, StoreError> {
        Ok(self.highscore)
    }

    fn save(&mut self, highscore: Score) -> core::result::Result<(), StoreError> {
        self.highscore = highscore;
        self.saves += 1;
        Ok(())
    }
}

/// Loads the stored high score, falling back to 0 when the store fails.
pub(crate) fn load_or_default(store: &mut impl HighscoreStore) -> Score {
    match store.load() {
        Ok(highscore) => highscore,
        Err(err) => {
            log::warn!("Could not load high score, starting from 0: {}", err);
            0
        }
    }
}

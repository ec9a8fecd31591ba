//! Game session
//!
//! The one object the UI controller holds. It owns storage and the scoring
//! rules, so nothing in the crate relies on globals.

use serde::Serialize;

use crate::error::ScoringResult;
use crate::highscores::HighScores;
use crate::levels::{self, Level, LevelPoints};
use crate::platform::{KeyValueStore, StorageHandle};
use crate::scoring::{RunInput, RunTally, ScoreReport, ScoringEngine};
use crate::settings::Settings;

/// What the UI reports when the last card is placed
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CompletionInput {
    pub base_score: i64,
    pub net_mistakes: u32,
    pub elapsed_secs: u64,
}

/// Win screen data for a finished level
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LevelResult {
    pub level_index: usize,
    pub report: ScoreReport,
    /// Whether to show the name entry box
    pub is_high_score: bool,
    /// Rank the score would take on the board
    pub rank: Option<usize>,
}

/// Top-level game session
pub struct GameSession<S> {
    storage: StorageHandle<S>,
    engine: ScoringEngine,
    settings: Settings,
}

impl<S: KeyValueStore> GameSession<S> {
    /// Session with the standard tiers; settings are read from storage
    pub fn new(backend: S) -> Self {
        Self::with_engine(backend, ScoringEngine::default())
    }

    pub fn with_engine(backend: S, engine: ScoringEngine) -> Self {
        let storage = StorageHandle::new(backend);
        let settings = Settings::load(&storage);
        Self {
            storage,
            engine,
            settings,
        }
    }

    pub fn engine(&self) -> &ScoringEngine {
        &self.engine
    }

    pub fn storage(&self) -> &StorageHandle<S> {
        &self.storage
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    /// Replace and persist settings
    pub fn save_settings(&mut self, settings: Settings) {
        settings.save(&mut self.storage);
        self.settings = settings;
    }

    pub fn level(&self, level_index: usize) -> ScoringResult<&'static Level> {
        levels::level(level_index)
    }

    pub fn level_points(&self, level_index: usize) -> ScoringResult<&'static LevelPoints> {
        levels::level_points(levels::level_number(level_index))
    }

    /// Fresh tally for a level about to start
    pub fn start_level(&mut self, level_index: usize) -> ScoringResult<RunTally> {
        let level = self.level(level_index)?;
        let points = *self.level_points(level_index)?;
        if self.settings.last_level != level_index {
            let mut settings = self.settings.clone();
            settings.last_level = level_index;
            self.save_settings(settings);
        }
        log::info!("Starting {} ({})", level.name, level.difficulty.as_str());
        Ok(RunTally::new(points))
    }

    /// Stored high scores for a level
    pub fn high_scores(&self, level_index: usize) -> HighScores {
        HighScores::load(&self.storage, level_index)
    }

    /// Score a finished level against its time limit and board
    pub fn complete_level(
        &self,
        level_index: usize,
        input: CompletionInput,
    ) -> ScoringResult<LevelResult> {
        let level = self.level(level_index)?;
        let report = self.engine.score_run(&RunInput {
            base_score: input.base_score,
            net_mistakes: input.net_mistakes,
            elapsed_secs: input.elapsed_secs,
            time_limit_secs: u64::from(level.time_limit_secs),
        });

        let board = self.high_scores(level_index);
        let rank = board.potential_rank(report.final_score);
        log::info!(
            "Level {} complete: {} ({}) in {}",
            level.name,
            report.final_score,
            report.tier_label,
            report.time
        );

        Ok(LevelResult {
            level_index,
            is_high_score: rank.is_some(),
            rank,
            report,
        })
    }

    /// Record a score on a level's board and persist it
    pub fn submit_high_score(
        &mut self,
        level_index: usize,
        name: &str,
        score: i64,
    ) -> ScoringResult<HighScores> {
        self.level(level_index)?;
        let board = self.high_scores(level_index).with_score(name, score);
        board.save(&mut self.storage, level_index);
        Ok(board)
    }
}

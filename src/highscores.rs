//! High score leaderboard
//!
//! Local JSON file, tracks the top 10 scores with the wave reached.

use std::path::Path;

use serde::{Deserialize, Serialize};

/// Maximum number of high scores to keep
pub const MAX_HIGH_SCORES: usize = 10;

/// A single high score entry
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HighScoreEntry {
    pub score: u32,
    /// Wave reached when the run ended
    pub wave: u32,
    /// Host-clock timestamp (ms) when achieved
    pub timestamp_ms: f64,
}

/// High score leaderboard, sorted descending by score
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct HighScores {
    pub entries: Vec<HighScoreEntry>,
}

impl HighScores {
    pub fn new() -> Self {
        Self::default()
    }

    /// Check if a score qualifies for the leaderboard
    pub fn qualifies(&self, score: u32) -> bool {
        if score == 0 {
            return false;
        }
        if self.entries.len() < MAX_HIGH_SCORES {
            return true;
        }
        self.entries.last().map(|e| score > e.score).unwrap_or(true)
    }

    /// The rank a score would achieve (1-indexed), None if it doesn't qualify
    pub fn potential_rank(&self, score: u32) -> Option<usize> {
        if !self.qualifies(score) {
            return None;
        }
        let rank = self.entries.iter().position(|e| score > e.score);
        Some(rank.unwrap_or(self.entries.len()) + 1)
    }

    /// Insert a score if it qualifies, returning the rank achieved
    pub fn add_score(&mut self, score: u32, wave: u32, timestamp_ms: f64) -> Option<usize> {
        if !self.qualifies(score) {
            return None;
        }

        let entry = HighScoreEntry {
            score,
            wave,
            timestamp_ms,
        };
        let pos = self.entries.iter().position(|e| score > e.score);
        let rank = match pos {
            Some(i) => {
                self.entries.insert(i, entry);
                i + 1
            }
            None => {
                self.entries.push(entry);
                self.entries.len()
            }
        };
        self.entries.truncate(MAX_HIGH_SCORES);
        Some(rank)
    }

    /// The best score on record
    pub fn best(&self) -> u32 {
        self.entries.first().map(|e| e.score).unwrap_or(0)
    }

    /// Load the leaderboard from a JSON file, falling back to empty
    pub fn load(path: &Path) -> Self {
        match std::fs::read_to_string(path) {
            Ok(json) => match serde_json::from_str(&json) {
                Ok(scores) => scores,
                Err(e) => {
                    log::warn!("ignoring malformed highscore file {}: {e}", path.display());
                    Self::new()
                }
            },
            Err(_) => Self::new(),
        }
    }

    /// Save the leaderboard as JSON, logging on failure
    pub fn save(&self, path: &Path) {
        match serde_json::to_string_pretty(self) {
            Ok(json) => {
                if let Err(e) = std::fs::write(path, json) {
                    log::warn!("failed to save highscores to {}: {e}", path.display());
                }
            }
            Err(e) => log::warn!("failed to serialize highscores: {e}"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_zero_never_qualifies() {
        let scores = HighScores::new();
        assert!(!scores.qualifies(0));
        assert!(scores.qualifies(10));
    }

    #[test]
    fn test_ranking_and_truncation() {
        let mut scores = HighScores::new();
        for i in 1..=12u32 {
            scores.add_score(i * 100, i, i as f64 * 1000.0);
        }
        assert_eq!(scores.entries.len(), MAX_HIGH_SCORES);
        assert_eq!(scores.best(), 1200);
        // 300 and below fell off the board
        assert!(scores.entries.iter().all(|e| e.score >= 300));

        // A mid-table score lands at its sorted position
        // Board is 1200..300; 650 slots in just above 600
        let rank = scores.add_score(650, 3, 0.0).unwrap();
        assert_eq!(rank, 7);
        assert!(!scores.qualifies(200));
        assert_eq!(scores.potential_rank(2000), Some(1));
    }

    #[test]
    fn test_sorted_descending() {
        let mut scores = HighScores::new();
        for s in [500u32, 100, 900, 300, 700] {
            scores.add_score(s, 1, 0.0);
        }
        let values: Vec<u32> = scores.entries.iter().map(|e| e.score).collect();
        assert_eq!(values, vec![900, 700, 500, 300, 100]);
    }
}

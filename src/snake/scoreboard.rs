//! Score and high score tracking

/// Current score and best score of the running process.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Scoreboard {
    score: u32,
    high_score: u32,
}

impl Scoreboard {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn high_score(&self) -> u32 {
        self.high_score
    }

    pub fn increase_score(&mut self) {
        self.score += 1;
    }

    /// End the current run: keep the best score and zero the current one.
    ///
    /// Returns the score of the run that just ended.
    pub fn reset(&mut self) -> u32 {
        let finished = self.score;
        self.high_score = self.high_score.max(finished);
        self.score = 0;
        finished
    }
}

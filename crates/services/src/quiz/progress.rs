/// Aggregated view of quiz progress.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct QuizProgress {
    pub total: usize,
    /// Zero-based index of the question being shown.
    pub position: usize,
    pub answered: usize,
    pub correct: u32,
    pub is_complete: bool,
}

impl QuizProgress {
    /// Percent of the quiz reached, counting the current question as reached.
    #[must_use]
    pub fn percent(&self) -> u32 {
        if self.total == 0 {
            return 100;
        }
        let reached = (self.position + 1).min(self.total);
        u32::try_from(reached * 100 / self.total).unwrap_or(100)
    }
}

use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum SettingsError {
    #[error("sample size must be > 0")]
    InvalidSampleSize,

    #[error("history limit must be > 0")]
    InvalidHistoryLimit,

    #[error("recent history length must be > 0")]
    InvalidRecentHistoryLen,
}

/// Tunables for quiz sessions and history retention.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct QuizSettings {
    sample_size: u32,
    history_limit: u32,
    recent_history_len: u32,
}

impl Default for QuizSettings {
    /// 10 questions per session, 20 stored history entries, 5 shown as recent.
    fn default() -> Self {
        Self {
            sample_size: 10,
            history_limit: 20,
            recent_history_len: 5,
        }
    }
}

impl QuizSettings {
    /// Creates custom settings.
    ///
    /// # Errors
    ///
    /// Returns `SettingsError` if any value is zero.
    pub fn new(
        sample_size: u32,
        history_limit: u32,
        recent_history_len: u32,
    ) -> Result<Self, SettingsError> {
        if sample_size == 0 {
            return Err(SettingsError::InvalidSampleSize);
        }
        if history_limit == 0 {
            return Err(SettingsError::InvalidHistoryLimit);
        }
        if recent_history_len == 0 {
            return Err(SettingsError::InvalidRecentHistoryLen);
        }

        Ok(Self {
            sample_size,
            history_limit,
            recent_history_len,
        })
    }

    /// Returns a copy with a different sample size.
    ///
    /// # Errors
    ///
    /// Returns `SettingsError::InvalidSampleSize` if `sample_size` is zero.
    pub fn with_sample_size(self, sample_size: u32) -> Result<Self, SettingsError> {
        Self::new(sample_size, self.history_limit, self.recent_history_len)
    }

    #[must_use]
    pub fn sample_size(&self) -> u32 {
        self.sample_size
    }

    #[must_use]
    pub fn history_limit(&self) -> u32 {
        self.history_limit
    }

    #[must_use]
    pub fn recent_history_len(&self) -> u32 {
        self.recent_history_len
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_quiz_layout() {
        let s = QuizSettings::default();
        assert_eq!(s.sample_size(), 10);
        assert_eq!(s.history_limit(), 20);
        assert_eq!(s.recent_history_len(), 5);
    }

    #[test]
    fn zero_values_are_rejected() {
        assert_eq!(
            QuizSettings::new(0, 20, 5).unwrap_err(),
            SettingsError::InvalidSampleSize
        );
        assert_eq!(
            QuizSettings::new(10, 0, 5).unwrap_err(),
            SettingsError::InvalidHistoryLimit
        );
        assert_eq!(
            QuizSettings::new(10, 20, 0).unwrap_err(),
            SettingsError::InvalidRecentHistoryLen
        );
    }

    #[test]
    fn sample_size_override_keeps_other_values() {
        let s = QuizSettings::default().with_sample_size(3).unwrap();
        assert_eq!(s.sample_size(), 3);
        assert_eq!(s.history_limit(), 20);
    }
}

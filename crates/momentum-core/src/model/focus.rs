//! Focus session entity.

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

/// A timed focus session.
///
/// Invariant: `completed` implies `ended_at` is set. The actual elapsed
/// time is `ended_at - started_at`; the planned duration is only an
/// intention and does not bound the session.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FocusSession {
    /// Unique identifier, assigned at creation and never changed
    pub id: String,
    pub title: String,
    /// Planned duration in minutes
    pub planned_min: u32,
    pub started_at: DateTime<Utc>,
    pub ended_at: Option<DateTime<Utc>>,
    pub completed: bool,
    pub notes: Option<String>,
    /// Last mutation timestamp
    pub updated_at: DateTime<Utc>,
}

impl FocusSession {
    /// Start a new session now.
    pub fn start(title: impl Into<String>, planned_min: u32) -> Self {
        let now = Utc::now();
        FocusSession {
            id: uuid::Uuid::new_v4().to_string(),
            title: title.into(),
            planned_min,
            started_at: now,
            ended_at: None,
            completed: false,
            notes: None,
            updated_at: now,
        }
    }

    /// Mark the session finished now.
    pub fn finish(&mut self) {
        let now = Utc::now();
        self.ended_at = Some(now);
        self.completed = true;
        self.updated_at = now;
    }

    /// Elapsed time, available once the session has ended.
    pub fn elapsed(&self) -> Option<Duration> {
        self.ended_at.map(|end| end - self.started_at)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn finish_sets_end_and_completion_together() {
        let mut session = FocusSession::start("deep work", 25);
        assert!(!session.completed);
        assert!(session.elapsed().is_none());

        session.finish();
        assert!(session.completed);
        assert!(session.ended_at.is_some());
        assert!(session.elapsed().unwrap() >= Duration::zero());
    }

    #[test]
    fn elapsed_is_end_minus_start() {
        let mut session = FocusSession::start("reading", 30);
        let end = session.started_at + Duration::minutes(42);
        session.ended_at = Some(end);
        session.completed = true;
        assert_eq!(session.elapsed(), Some(Duration::minutes(42)));
    }

    #[test]
    fn json_roundtrip() {
        let mut session = FocusSession::start("deep work", 25);
        session.notes = Some("phone in the other room".into());
        session.finish();
        let json = serde_json::to_string(&session).unwrap();
        let back: FocusSession = serde_json::from_str(&json).unwrap();
        assert_eq!(back, session);
    }
}

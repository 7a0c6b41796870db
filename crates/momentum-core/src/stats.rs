//! Streak and statistics engine.
//!
//! Everything here is derived in full from the authoritative collections.
//! The store recomputes after every mutation rather than patching counters
//! incrementally; at this scale the O(n) pass keeps the cache drift-free.

use chrono::{DateTime, Datelike, Duration, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use crate::model::{FocusSession, Habit, Todo};

/// Derived aggregate counters. Never mutated directly; rebuilt by
/// [`compute`] after every store mutation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Statistics {
    pub total_todos: usize,
    pub completed_todos: usize,
    pub total_habits: usize,
    pub total_focus_sessions: usize,
    /// Sum of elapsed minutes over completed focus sessions
    pub total_focus_min: u64,
    /// Consecutive qualifying days counted back from today, inclusive
    pub streak_days: u32,
    pub updated_at: DateTime<Utc>,
}

impl Default for Statistics {
    fn default() -> Self {
        Statistics {
            total_todos: 0,
            completed_todos: 0,
            total_habits: 0,
            total_focus_sessions: 0,
            total_focus_min: 0,
            streak_days: 0,
            updated_at: Utc::now(),
        }
    }
}

/// Rebuild the full statistics record from the collections.
pub fn compute(
    todos: &[Todo],
    habits: &[Habit],
    sessions: &[FocusSession],
    today: NaiveDate,
) -> Statistics {
    Statistics {
        total_todos: todos.len(),
        completed_todos: todos.iter().filter(|t| t.completed).count(),
        total_habits: habits.len(),
        total_focus_sessions: sessions.len(),
        total_focus_min: total_focus_min(sessions),
        streak_days: current_streak(todos, habits, today),
        updated_at: Utc::now(),
    }
}

/// Total focus time in minutes over completed sessions.
pub fn total_focus_min(sessions: &[FocusSession]) -> u64 {
    sessions
        .iter()
        .filter(|s| s.completed)
        .filter_map(|s| s.elapsed())
        .filter(|d| *d > Duration::zero())
        .map(|d| d.num_minutes() as u64)
        .sum()
}

/// Fraction of todos completed; 0 for an empty collection.
pub fn completion_rate(todos: &[Todo]) -> f64 {
    if todos.is_empty() {
        return 0.0;
    }
    let completed = todos.iter().filter(|t| t.completed).count();
    completed as f64 / todos.len() as f64
}

/// Fraction of habits with at least one recorded completion; 0 when empty.
pub fn habit_completion_rate(habits: &[Habit]) -> f64 {
    if habits.is_empty() {
        return 0.0;
    }
    let touched = habits
        .iter()
        .filter(|h| !h.completed_dates.is_empty())
        .count();
    touched as f64 / habits.len() as f64
}

/// Whole-store streak: walk backward from `today`, counting days with
/// either a completed todo due that day or any habit completion entry.
/// Stops at the first non-qualifying day; a non-qualifying today is 0.
pub fn current_streak(todos: &[Todo], habits: &[Habit], today: NaiveDate) -> u32 {
    streak_from(today, |day| {
        todos.iter().any(|t| t.completed && t.due_date == day)
            || habits.iter().any(|h| h.is_completed_on(day))
    })
}

/// Per-habit streak over that habit's completion entries.
pub fn habit_streak(habit: &Habit, today: NaiveDate) -> u32 {
    streak_from(today, |day| habit.is_completed_on(day))
}

fn streak_from(today: NaiveDate, qualifies: impl Fn(NaiveDate) -> bool) -> u32 {
    let mut streak = 0;
    let mut day = today;
    while qualifies(day) {
        streak += 1;
        day -= Duration::days(1);
    }
    streak
}

/// Completion ratio over a set of dates (a week or a month) for calendar
/// views: every (habit, date) pair where the habit applies counts as
/// possible; pairs with a completion entry count as completed.
pub fn period_progress(habits: &[Habit], dates: &[NaiveDate]) -> f64 {
    let mut possible = 0u32;
    let mut completed = 0u32;
    for habit in habits {
        for &date in dates {
            if habit.applies_on(date) {
                possible += 1;
                if habit.is_completed_on(date) {
                    completed += 1;
                }
            }
        }
    }
    if possible == 0 {
        0.0
    } else {
        completed as f64 / possible as f64
    }
}

/// Dates of the Sunday-start week containing `anchor`.
pub fn week_dates(anchor: NaiveDate) -> Vec<NaiveDate> {
    let back = anchor.weekday().num_days_from_sunday() as i64;
    let start = anchor - Duration::days(back);
    (0..7).map(|i| start + Duration::days(i)).collect()
}

/// Dates of the calendar month containing `anchor`.
pub fn month_dates(anchor: NaiveDate) -> Vec<NaiveDate> {
    let mut day = anchor.with_day(1).unwrap_or(anchor);
    let month = day.month();
    let mut dates = Vec::new();
    while day.month() == month {
        dates.push(day);
        day += Duration::days(1);
    }
    dates
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Frequency;

    fn day(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn done_todo(due: NaiveDate) -> Todo {
        let mut todo = Todo::new("t", due);
        todo.toggle_completion();
        todo
    }

    #[test]
    fn completion_rate_of_empty_collection_is_zero() {
        assert_eq!(completion_rate(&[]), 0.0);
        assert_eq!(habit_completion_rate(&[]), 0.0);
    }

    #[test]
    fn completion_rate_counts_completed_share() {
        let today = day(2026, 4, 1);
        let todos = vec![done_todo(today), Todo::new("open", today)];
        assert_eq!(completion_rate(&todos), 0.5);
    }

    #[test]
    fn streak_is_zero_without_qualifying_today() {
        let today = day(2026, 4, 10);
        // Activity only in the past, with a gap at today
        let todos = vec![done_todo(today - Duration::days(2))];
        assert_eq!(current_streak(&todos, &[], today), 0);
    }

    #[test]
    fn streak_counts_exactly_the_trailing_run() {
        let today = day(2026, 4, 10);
        let mut habit = Habit::new("stretch");
        for back in 0..4 {
            habit.toggle_completion(today - Duration::days(back));
        }
        // An older entry separated by a gap must not extend the streak
        habit.toggle_completion(today - Duration::days(6));
        assert_eq!(current_streak(&[], &[habit.clone()], today), 4);
        assert_eq!(habit_streak(&habit, today), 4);
    }

    #[test]
    fn streak_mixes_todo_and_habit_days() {
        let today = day(2026, 4, 10);
        let todos = vec![done_todo(today)];
        let mut habit = Habit::new("stretch");
        habit.toggle_completion(today - Duration::days(1));
        assert_eq!(current_streak(&todos, &[habit], today), 2);
    }

    #[test]
    fn incomplete_todos_do_not_qualify() {
        let today = day(2026, 4, 10);
        let todos = vec![Todo::new("open", today)];
        assert_eq!(current_streak(&todos, &[], today), 0);
    }

    #[test]
    fn total_focus_min_ignores_unfinished_sessions() {
        let mut done = FocusSession::start("a", 25);
        done.ended_at = Some(done.started_at + Duration::minutes(30));
        done.completed = true;
        let running = FocusSession::start("b", 25);
        assert_eq!(total_focus_min(&[done, running]), 30);
    }

    #[test]
    fn period_progress_counts_applicable_days_only() {
        let mut habit = Habit::new("gym");
        habit.frequency = Frequency::Weekly;
        // Mondays and Wednesdays
        habit.weekdays = [1u8, 3].into_iter().collect();

        // 2026-03-02 (Mon) .. 2026-03-08 (Sun)
        let week: Vec<NaiveDate> = (2..=8).map(|d| day(2026, 3, d)).collect();
        habit.toggle_completion(day(2026, 3, 2));

        // 2 applicable days, 1 completed
        assert_eq!(period_progress(&[habit], &week), 0.5);
    }

    #[test]
    fn period_progress_is_zero_with_no_possible_days() {
        let mut habit = Habit::new("rent");
        habit.frequency = Frequency::Monthly;
        habit.day_of_month = Some(31);
        let april: Vec<NaiveDate> = (1..=30).map(|d| day(2026, 4, d)).collect();
        assert_eq!(period_progress(&[habit], &april), 0.0);
    }

    #[test]
    fn week_dates_is_sunday_through_saturday() {
        // 2026-03-04 is a Wednesday; its week starts Sunday 2026-03-01
        let week = week_dates(day(2026, 3, 4));
        assert_eq!(week.len(), 7);
        assert_eq!(week[0], day(2026, 3, 1));
        assert_eq!(week[6], day(2026, 3, 7));
    }

    #[test]
    fn month_dates_covers_the_whole_month() {
        let feb = month_dates(day(2024, 2, 15));
        assert_eq!(feb.len(), 29);
        assert_eq!(feb[0], day(2024, 2, 1));
        assert_eq!(*feb.last().unwrap(), day(2024, 2, 29));
    }

    #[test]
    fn compute_fills_every_counter() {
        let today = day(2026, 4, 10);
        let todos = vec![done_todo(today), Todo::new("open", today)];
        let mut habit = Habit::new("stretch");
        habit.toggle_completion(today);
        let mut session = FocusSession::start("deep", 25);
        session.ended_at = Some(session.started_at + Duration::minutes(25));
        session.completed = true;

        let stats = compute(&todos, &[habit], &[session], today);
        assert_eq!(stats.total_todos, 2);
        assert_eq!(stats.completed_todos, 1);
        assert_eq!(stats.total_habits, 1);
        assert_eq!(stats.total_focus_sessions, 1);
        assert_eq!(stats.total_focus_min, 25);
        assert_eq!(stats.streak_days, 1);
    }
}

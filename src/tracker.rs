//! Client-side month state: the in-memory mirror of one user-month that the
//! view layer mutates. Every mutation is applied locally first (optimistic)
//! and returns `true` when a save should be issued; the caller posts the
//! full-month snapshot from [`MonthTracker::habit_drafts`] without waiting
//! for the response.

use crate::models::{Completions, Habit, HabitDraft, MonthlyStats, SleepDays, UserProfile};
use crate::stats;
use uuid::Uuid;

/// The hours a night of sleep can be recorded as.
pub const SLEEP_HOURS: [f64; 9] = [4.0, 4.5, 5.0, 5.5, 6.0, 6.5, 7.0, 7.5, 8.0];

#[derive(Debug, Clone)]
pub struct MonthTracker {
    pub year: i32,
    pub month: u32,
    habits: Vec<Habit>,
    sleep: SleepDays,
}

impl MonthTracker {
    pub fn new(year: i32, month: u32) -> Self {
        Self {
            year,
            month,
            habits: Vec::new(),
            sleep: SleepDays::new(),
        }
    }

    pub fn habits(&self) -> &[Habit] {
        &self.habits
    }

    pub fn sleep(&self) -> &SleepDays {
        &self.sleep
    }

    pub fn days_in_month(&self) -> u32 {
        stats::days_in_month(self.year, self.month)
    }

    /// Replace the local mirror with what the server returned. The server is
    /// the source of truth on load.
    pub fn load_habits(&mut self, habits: Vec<Habit>) {
        self.habits = habits;
    }

    /// Load failed: reset to empty rather than keeping stale data.
    pub fn clear_habits(&mut self) {
        self.habits.clear();
    }

    pub fn load_sleep(&mut self, days: SleepDays) {
        self.sleep = days;
    }

    pub fn clear_sleep(&mut self) {
        self.sleep.clear();
    }

    /// Append a habit with a provisional id. Blank names are a no-op; the
    /// server assigns the real id on the next save.
    pub fn add_habit(&mut self, name: &str) -> bool {
        let name = name.trim();
        if name.is_empty() {
            return false;
        }
        self.habits.push(Habit {
            id: Uuid::new_v4().to_string(),
            user_id: String::new(),
            name: name.to_string(),
            year: self.year,
            month: self.month,
            completions: Completions::new(),
        });
        true
    }

    pub fn delete_habit(&mut self, id: &str) -> bool {
        let before = self.habits.len();
        self.habits.retain(|habit| habit.id != id);
        self.habits.len() != before
    }

    /// Flip one day's completion: present becomes absent and vice versa, so
    /// `false` never appears in the map.
    pub fn toggle_day(&mut self, habit_id: &str, day: u32) -> bool {
        if day == 0 || day > self.days_in_month() {
            return false;
        }
        let Some(habit) = self.habits.iter_mut().find(|habit| habit.id == habit_id) else {
            return false;
        };
        if habit.completions.remove(&day).is_none() {
            habit.completions.insert(day, true);
        }
        true
    }

    /// Record a night's sleep. Picking the already-set value deselects the
    /// day, a different value overwrites it. Hours outside the fixed domain
    /// are ignored.
    pub fn toggle_sleep_hour(&mut self, day: u32, hour: f64) -> bool {
        if day == 0 || day > self.days_in_month() || !SLEEP_HOURS.contains(&hour) {
            return false;
        }
        if self.sleep.get(&day) == Some(&hour) {
            self.sleep.remove(&day);
        } else {
            self.sleep.insert(day, hour);
        }
        true
    }

    /// The full-month snapshot a save posts: every habit, without ids.
    pub fn habit_drafts(&self) -> Vec<HabitDraft> {
        self.habits
            .iter()
            .map(|habit| HabitDraft {
                name: habit.name.clone(),
                completions: habit.completions.clone(),
            })
            .collect()
    }

    pub fn monthly_stats(&self) -> MonthlyStats {
        stats::monthly_stats(&self.habits, self.days_in_month())
    }
}

/// Client auth state. Any 401 from the server drops straight back to
/// `LoggedOut` via [`Session::expire`].
#[derive(Debug, Clone, PartialEq)]
pub enum Session {
    LoggedOut { error: Option<String> },
    Authenticating,
    LoggedIn { token: String, user: UserProfile },
}

impl Session {
    /// Rebuild the session from whatever the client kept in local storage.
    pub fn restore(stored: Option<(String, UserProfile)>) -> Self {
        match stored {
            Some((token, user)) => Session::LoggedIn { token, user },
            None => Session::LoggedOut { error: None },
        }
    }

    /// Credentials submitted; only valid from `LoggedOut`.
    pub fn begin(&mut self) -> bool {
        match self {
            Session::LoggedOut { .. } => {
                *self = Session::Authenticating;
                true
            }
            _ => false,
        }
    }

    pub fn succeed(&mut self, token: String, user: UserProfile) {
        *self = Session::LoggedIn { token, user };
    }

    /// Auth failed: back to the form with the gateway's message.
    pub fn fail(&mut self, message: impl Into<String>) {
        *self = Session::LoggedOut {
            error: Some(message.into()),
        };
    }

    /// The server no longer accepts our token.
    pub fn expire(&mut self) {
        *self = Session::LoggedOut { error: None };
    }

    pub fn token(&self) -> Option<&str> {
        match self {
            Session::LoggedIn { token, .. } => Some(token),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tracker_with_habit() -> (MonthTracker, String) {
        let mut tracker = MonthTracker::new(2024, 6);
        tracker.add_habit("Read");
        let id = tracker.habits()[0].id.clone();
        (tracker, id)
    }

    #[test]
    fn blank_habit_names_are_rejected() {
        let mut tracker = MonthTracker::new(2024, 6);
        assert!(!tracker.add_habit(""));
        assert!(!tracker.add_habit("   "));
        assert!(tracker.habits().is_empty());
        assert!(tracker.add_habit("  Read  "));
        assert_eq!(tracker.habits()[0].name, "Read");
    }

    #[test]
    fn toggle_day_pairs_cancel_out() {
        let (mut tracker, id) = tracker_with_habit();
        assert!(tracker.toggle_day(&id, 5));
        assert_eq!(tracker.habits()[0].completions.get(&5), Some(&true));
        assert!(tracker.toggle_day(&id, 5));
        assert!(!tracker.habits()[0].completions.contains_key(&5));

        // Odd number of toggles leaves the day set.
        for _ in 0..3 {
            tracker.toggle_day(&id, 12);
        }
        assert!(tracker.habits()[0].completions.contains_key(&12));
    }

    #[test]
    fn toggle_day_rejects_unknown_habit_and_bad_day() {
        let (mut tracker, id) = tracker_with_habit();
        assert!(!tracker.toggle_day("no-such-id", 5));
        assert!(!tracker.toggle_day(&id, 0));
        assert!(!tracker.toggle_day(&id, 31)); // June has 30 days
        assert!(tracker.habits()[0].completions.is_empty());
    }

    #[test]
    fn delete_habit_removes_only_the_match() {
        let mut tracker = MonthTracker::new(2024, 6);
        tracker.add_habit("Keep");
        tracker.add_habit("Drop");
        let id = tracker.habits()[1].id.clone();
        assert!(tracker.delete_habit(&id));
        assert!(!tracker.delete_habit(&id));
        assert_eq!(tracker.habits().len(), 1);
        assert_eq!(tracker.habits()[0].name, "Keep");
    }

    #[test]
    fn sleep_toggle_clears_on_repeat_and_overwrites_on_change() {
        let mut tracker = MonthTracker::new(2024, 6);
        assert!(tracker.toggle_sleep_hour(3, 7.5));
        assert_eq!(tracker.sleep().get(&3), Some(&7.5));

        assert!(tracker.toggle_sleep_hour(3, 6.0));
        assert_eq!(tracker.sleep().get(&3), Some(&6.0));

        assert!(tracker.toggle_sleep_hour(3, 6.0));
        assert!(!tracker.sleep().contains_key(&3));
    }

    #[test]
    fn sleep_hours_outside_domain_are_ignored() {
        let mut tracker = MonthTracker::new(2024, 6);
        assert!(!tracker.toggle_sleep_hour(3, 9.0));
        assert!(!tracker.toggle_sleep_hour(3, 4.25));
        assert!(!tracker.toggle_sleep_hour(0, 7.0));
        assert!(tracker.sleep().is_empty());
    }

    #[test]
    fn drafts_are_the_full_month_without_ids() {
        let (mut tracker, id) = tracker_with_habit();
        tracker.toggle_day(&id, 1);
        tracker.add_habit("Run");

        let drafts = tracker.habit_drafts();
        assert_eq!(drafts.len(), 2);
        assert_eq!(drafts[0].name, "Read");
        assert_eq!(drafts[0].completions.get(&1), Some(&true));
        assert!(drafts[1].completions.is_empty());
    }

    #[test]
    fn session_walks_logout_authenticating_login() {
        let mut session = Session::restore(None);
        assert_eq!(session, Session::LoggedOut { error: None });

        assert!(session.begin());
        assert_eq!(session, Session::Authenticating);
        assert!(!session.begin());

        let user = UserProfile {
            id: "u1".to_string(),
            username: "ada".to_string(),
        };
        session.succeed("tok".to_string(), user.clone());
        assert_eq!(session.token(), Some("tok"));

        session.expire();
        assert_eq!(session, Session::LoggedOut { error: None });
    }

    #[test]
    fn failed_auth_surfaces_the_message() {
        let mut session = Session::restore(None);
        session.begin();
        session.fail("invalid username or password");
        assert_eq!(
            session,
            Session::LoggedOut {
                error: Some("invalid username or password".to_string())
            }
        );
        assert_eq!(session.token(), None);
    }

    #[test]
    fn session_restores_from_stored_credentials() {
        let user = UserProfile {
            id: "u1".to_string(),
            username: "ada".to_string(),
        };
        let session = Session::restore(Some(("tok".to_string(), user.clone())));
        assert_eq!(session.token(), Some("tok"));
        assert_eq!(session, Session::LoggedIn { token: "tok".to_string(), user });
    }
}

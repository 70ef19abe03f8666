use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Day-of-month -> completed. A missing key means "not done"; `false` is
/// never stored, toggling a day off removes the key instead.
pub type Completions = BTreeMap<u32, bool>;

/// Day-of-month -> hours slept that night.
pub type SleepDays = BTreeMap<u32, f64>;

/// One tracked behavior for one user in one calendar month.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Habit {
    pub id: String,
    pub user_id: String,
    pub name: String,
    pub year: i32,
    pub month: u32,
    #[serde(default)]
    pub completions: Completions,
}

/// What the client submits on save: a habit without id or scope, both of
/// which the server assigns.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HabitDraft {
    pub name: String,
    #[serde(default)]
    pub completions: Completions,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StoredUser {
    pub id: String,
    pub username: String,
    pub password_hash: String,
}

/// The whole persisted document. Habits keep insertion order, which is the
/// order month queries return.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct AppData {
    pub users: BTreeMap<String, StoredUser>,
    pub habits: Vec<Habit>,
    pub sleep: BTreeMap<String, SleepDays>,
}

#[derive(Debug, Deserialize)]
pub struct CredentialsRequest {
    pub username: String,
    pub password: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserProfile {
    pub id: String,
    pub username: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct AuthResponse {
    pub token: String,
    pub user: UserProfile,
}

#[derive(Debug, Deserialize)]
pub struct SaveHabitsRequest {
    pub habits: Vec<HabitDraft>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct SleepMonthBody {
    #[serde(default)]
    pub days: SleepDays,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MonthlyStats {
    pub total_habits: usize,
    pub total_days: u64,
    pub completed_days: u64,
    /// One decimal place, `"0.0"` when there is nothing to track.
    pub percentage: String,
    pub best_habit: BestHabit,
}

/// The habit with the strictly greatest completion count. Serializes as an
/// empty object when no habit has a positive count.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct BestHabit {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub count: Option<u64>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MonthReport {
    /// English month name, e.g. "January".
    pub month: String,
    pub total_habits: usize,
    pub completed_days: u64,
    pub percentage: ReportPercentage,
}

/// Months with data report a one-decimal string, months without report the
/// number zero. The original wire format had this asymmetry and report
/// clients key off it, so it is kept.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum ReportPercentage {
    Ratio(String),
    Empty(u32),
}

impl ReportPercentage {
    pub fn value(&self) -> f64 {
        match self {
            ReportPercentage::Ratio(text) => text.parse().unwrap_or(0.0),
            ReportPercentage::Empty(n) => f64::from(*n),
        }
    }
}

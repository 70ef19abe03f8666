use crate::errors::AppError;
use crate::models::{AppData, Habit, HabitDraft, SleepDays};
use std::{env, path::Path, path::PathBuf};
use tokio::fs;
use tracing::error;
use uuid::Uuid;

pub fn resolve_data_path() -> Result<PathBuf, std::io::Error> {
    if let Ok(path) = env::var("APP_DATA_PATH") {
        return Ok(PathBuf::from(path));
    }

    Ok(PathBuf::from("data/state.json"))
}

pub async fn load_data(path: &Path) -> AppData {
    match fs::read(path).await {
        Ok(bytes) => match serde_json::from_slice(&bytes) {
            Ok(data) => data,
            Err(err) => {
                error!("failed to parse data file: {err}");
                AppData::default()
            }
        },
        Err(err) if err.kind() == std::io::ErrorKind::NotFound => AppData::default(),
        Err(err) => {
            error!("failed to read data file: {err}");
            AppData::default()
        }
    }
}

pub async fn persist_data(path: &Path, data: &AppData) -> Result<(), AppError> {
    let payload = serde_json::to_vec_pretty(data).map_err(AppError::internal)?;
    fs::write(path, payload).await.map_err(AppError::internal)?;
    Ok(())
}

/// Key for one replaceable bundle of per-month records.
pub fn scope_key(user_id: &str, year: i32, month: u32) -> String {
    format!("{user_id}/{year}/{month}")
}

/// All habits for one user-month, in insertion order.
pub fn find_habits(data: &AppData, user_id: &str, year: i32, month: u32) -> Vec<Habit> {
    data.habits
        .iter()
        .filter(|habit| habit.user_id == user_id && habit.year == year && habit.month == month)
        .cloned()
        .collect()
}

/// All of a user's habits across every month of a year, for report views.
pub fn find_year_habits(data: &AppData, user_id: &str, year: i32) -> Vec<Habit> {
    data.habits
        .iter()
        .filter(|habit| habit.user_id == user_id && habit.year == year)
        .cloned()
        .collect()
}

/// Full replace: drop every habit in the scope, then append the drafts as
/// new records with fresh ids. Callers hold the state mutex across this and
/// the following flush, so no partially replaced month is ever observable.
pub fn replace_month_habits(
    data: &mut AppData,
    user_id: &str,
    year: i32,
    month: u32,
    drafts: Vec<HabitDraft>,
) -> Vec<Habit> {
    data.habits
        .retain(|habit| !(habit.user_id == user_id && habit.year == year && habit.month == month));

    let created: Vec<Habit> = drafts
        .into_iter()
        .map(|draft| Habit {
            id: Uuid::new_v4().to_string(),
            user_id: user_id.to_string(),
            name: draft.name,
            year,
            month,
            completions: draft.completions,
        })
        .collect();

    data.habits.extend(created.iter().cloned());
    created
}

pub fn sleep_month(data: &AppData, user_id: &str, year: i32, month: u32) -> SleepDays {
    data.sleep
        .get(&scope_key(user_id, year, month))
        .cloned()
        .unwrap_or_default()
}

/// Full replace of one user-month of sleep entries. An empty map removes the
/// bundle entirely.
pub fn replace_sleep_month(
    data: &mut AppData,
    user_id: &str,
    year: i32,
    month: u32,
    days: SleepDays,
) {
    let key = scope_key(user_id, year, month);
    if days.is_empty() {
        data.sleep.remove(&key);
    } else {
        data.sleep.insert(key, days);
    }
}

use crate::auth::{self, AuthUser};
use crate::errors::AppError;
use crate::models::{
    AuthResponse, Completions, CredentialsRequest, Habit, HabitDraft, SaveHabitsRequest,
    SleepMonthBody, StoredUser, UserProfile,
};
use crate::state::AppState;
use crate::stats;
use crate::storage::{
    find_habits, find_year_habits, persist_data, replace_month_habits, replace_sleep_month,
    sleep_month,
};
use crate::tracker::SLEEP_HOURS;
use crate::ui;
use axum::{
    extract::{Path, State},
    response::Html,
    Json,
};
use tracing::info;
use uuid::Uuid;

pub async fn index() -> Html<&'static str> {
    Html(ui::INDEX_HTML)
}

pub async fn register(
    State(state): State<AppState>,
    Json(payload): Json<CredentialsRequest>,
) -> Result<Json<AuthResponse>, AppError> {
    let username = payload.username.trim().to_string();
    if username.is_empty() || payload.password.trim().is_empty() {
        return Err(AppError::bad_request("username and password are required"));
    }

    let mut data = state.data.lock().await;
    if data.users.contains_key(&username) {
        return Err(AppError::conflict("username already taken"));
    }

    let user = StoredUser {
        id: Uuid::new_v4().to_string(),
        username: username.clone(),
        password_hash: auth::hash_password(&payload.password)?,
    };
    data.users.insert(username.clone(), user.clone());
    persist_data(&state.data_path, &data).await?;

    info!("registered user {username}");
    let token = state.tokens.issue(&user.id, &user.username)?;
    Ok(Json(AuthResponse {
        token,
        user: UserProfile {
            id: user.id,
            username: user.username,
        },
    }))
}

pub async fn login(
    State(state): State<AppState>,
    Json(payload): Json<CredentialsRequest>,
) -> Result<Json<AuthResponse>, AppError> {
    let username = payload.username.trim();
    let data = state.data.lock().await;
    let user = data
        .users
        .get(username)
        .filter(|user| auth::verify_password(&payload.password, &user.password_hash))
        .ok_or_else(|| AppError::unauthorized("invalid username or password"))?;

    let token = state.tokens.issue(&user.id, &user.username)?;
    Ok(Json(AuthResponse {
        token,
        user: UserProfile {
            id: user.id.clone(),
            username: user.username.clone(),
        },
    }))
}

pub async fn get_habits(
    State(state): State<AppState>,
    caller: AuthUser,
    Path((year, month)): Path<(i32, u32)>,
) -> Result<Json<Vec<Habit>>, AppError> {
    validate_scope(year, month)?;
    let data = state.data.lock().await;
    Ok(Json(find_habits(&data, &caller.user_id, year, month)))
}

pub async fn save_habits(
    State(state): State<AppState>,
    caller: AuthUser,
    Path((year, month)): Path<(i32, u32)>,
    Json(payload): Json<SaveHabitsRequest>,
) -> Result<Json<Vec<Habit>>, AppError> {
    let days = validate_scope(year, month)?;

    let mut drafts = Vec::with_capacity(payload.habits.len());
    for entry in payload.habits {
        let name = entry.name.trim().to_string();
        if name.is_empty() {
            return Err(AppError::bad_request("habit name must not be empty"));
        }
        let mut completions = Completions::new();
        for (day, done) in entry.completions {
            if day == 0 || day > days {
                return Err(AppError::bad_request(format!(
                    "day {day} is outside this month"
                )));
            }
            // Absence already means "not done"; never store a false.
            if done {
                completions.insert(day, true);
            }
        }
        drafts.push(HabitDraft { name, completions });
    }

    let mut data = state.data.lock().await;
    let created = replace_month_habits(&mut data, &caller.user_id, year, month, drafts);
    persist_data(&state.data_path, &data).await?;
    Ok(Json(created))
}

/// Raw records across the year; aggregation belongs to the client side
/// (`stats::yearly_report`).
pub async fn get_report(
    State(state): State<AppState>,
    caller: AuthUser,
    Path(year): Path<i32>,
) -> Result<Json<Vec<Habit>>, AppError> {
    let data = state.data.lock().await;
    Ok(Json(find_year_habits(&data, &caller.user_id, year)))
}

pub async fn get_sleep(
    State(state): State<AppState>,
    caller: AuthUser,
    Path((year, month)): Path<(i32, u32)>,
) -> Result<Json<SleepMonthBody>, AppError> {
    validate_scope(year, month)?;
    let data = state.data.lock().await;
    Ok(Json(SleepMonthBody {
        days: sleep_month(&data, &caller.user_id, year, month),
    }))
}

pub async fn save_sleep(
    State(state): State<AppState>,
    caller: AuthUser,
    Path((year, month)): Path<(i32, u32)>,
    Json(payload): Json<SleepMonthBody>,
) -> Result<Json<SleepMonthBody>, AppError> {
    let days_in_month = validate_scope(year, month)?;
    for (&day, &hours) in &payload.days {
        if day == 0 || day > days_in_month {
            return Err(AppError::bad_request(format!(
                "day {day} is outside this month"
            )));
        }
        if !SLEEP_HOURS.contains(&hours) {
            return Err(AppError::bad_request(
                "hours must be one of the half-hour steps from 4 to 8",
            ));
        }
    }

    let mut data = state.data.lock().await;
    replace_sleep_month(&mut data, &caller.user_id, year, month, payload.days.clone());
    persist_data(&state.data_path, &data).await?;
    Ok(Json(payload))
}

fn validate_scope(year: i32, month: u32) -> Result<u32, AppError> {
    if !(1..=12).contains(&month) {
        return Err(AppError::bad_request("month must be between 1 and 12"));
    }
    let days = stats::days_in_month(year, month);
    if days == 0 {
        return Err(AppError::bad_request("year is out of range"));
    }
    Ok(days)
}

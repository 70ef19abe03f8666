use crate::models::{BestHabit, Habit, MonthReport, MonthlyStats, ReportPercentage};
use chrono::NaiveDate;

/// Number of days in a calendar month, or 0 if the year/month pair is not a
/// real date (callers validate months at the API boundary).
pub fn days_in_month(year: i32, month: u32) -> u32 {
    NaiveDate::from_ymd_opt(year, month, 1)
        .and_then(|first| {
            let (next_year, next_month) = if month == 12 {
                (year + 1, 1)
            } else {
                (year, month + 1)
            };
            NaiveDate::from_ymd_opt(next_year, next_month, 1)
                .map(|next| (next - first).num_days() as u32)
        })
        .unwrap_or(0)
}

/// Completion percentage for one habit. Unclamped: completions are assumed
/// to stay within the month, so a well-formed habit never exceeds 100.
pub fn progress(habit: &Habit, days_in_month: u32) -> f64 {
    habit.completions.len() as f64 / days_in_month as f64 * 100.0
}

/// Aggregate one month of habits. The best habit is a left fold with a
/// strict comparison: ties keep the first habit encountered, and a habit
/// with zero completions never wins.
pub fn monthly_stats(habits: &[Habit], days_in_month: u32) -> MonthlyStats {
    let total_habits = habits.len();
    let total_days = total_habits as u64 * u64::from(days_in_month);
    let completed_days: u64 = habits
        .iter()
        .map(|habit| habit.completions.len() as u64)
        .sum();
    let percentage = if total_days > 0 {
        completed_days as f64 / total_days as f64 * 100.0
    } else {
        0.0
    };

    let best_habit = habits.iter().fold(BestHabit::default(), |best, habit| {
        let count = habit.completions.len() as u64;
        if count > best.count.unwrap_or(0) {
            BestHabit {
                name: Some(habit.name.clone()),
                count: Some(count),
            }
        } else {
            best
        }
    });

    MonthlyStats {
        total_habits,
        total_days,
        completed_days,
        percentage: format!("{percentage:.1}"),
        best_habit,
    }
}

/// One entry per calendar month, aggregated from the raw records the report
/// endpoint returns. Empty months keep the numeric-zero percentage the
/// original wire format used.
pub fn yearly_report(year: i32, records: &[Habit]) -> Vec<MonthReport> {
    (1..=12)
        .map(|month| {
            let month_habits: Vec<&Habit> =
                records.iter().filter(|habit| habit.month == month).collect();
            let label = month_label(year, month);

            if month_habits.is_empty() {
                return MonthReport {
                    month: label,
                    total_habits: 0,
                    completed_days: 0,
                    percentage: ReportPercentage::Empty(0),
                };
            }

            let total_days =
                month_habits.len() as u64 * u64::from(days_in_month(year, month));
            let completed_days: u64 = month_habits
                .iter()
                .map(|habit| habit.completions.len() as u64)
                .sum();
            let percentage = if total_days > 0 {
                completed_days as f64 / total_days as f64 * 100.0
            } else {
                0.0
            };

            MonthReport {
                month: label,
                total_habits: month_habits.len(),
                completed_days,
                percentage: ReportPercentage::Ratio(format!("{percentage:.1}")),
            }
        })
        .collect()
}

/// Mean percentage over the months that actually tracked something. Months
/// with no habits are excluded from both the numerator and the denominator.
pub fn yearly_average(reports: &[MonthReport]) -> f64 {
    let tracked: Vec<f64> = reports
        .iter()
        .filter(|month| month.total_habits > 0)
        .map(|month| month.percentage.value())
        .collect();
    if tracked.is_empty() {
        return 0.0;
    }
    tracked.iter().sum::<f64>() / tracked.len() as f64
}

fn month_label(year: i32, month: u32) -> String {
    NaiveDate::from_ymd_opt(year, month, 1)
        .map(|date| date.format("%B").to_string())
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Completions;

    fn habit(name: &str, month: u32, completed: u32) -> Habit {
        let mut completions = Completions::new();
        for day in 1..=completed {
            completions.insert(day, true);
        }
        Habit {
            id: format!("id-{name}"),
            user_id: "u1".to_string(),
            name: name.to_string(),
            year: 2024,
            month,
            completions,
        }
    }

    #[test]
    fn days_in_month_handles_lengths_and_leap_years() {
        assert_eq!(days_in_month(2024, 1), 31);
        assert_eq!(days_in_month(2024, 2), 29);
        assert_eq!(days_in_month(2023, 2), 28);
        assert_eq!(days_in_month(2024, 4), 30);
        assert_eq!(days_in_month(2024, 12), 31);
        assert_eq!(days_in_month(2024, 13), 0);
    }

    #[test]
    fn progress_is_completions_over_month_length() {
        let h = habit("Read", 6, 6);
        assert_eq!(progress(&h, 30), 20.0);
    }

    #[test]
    fn monthly_stats_of_nothing() {
        let stats = monthly_stats(&[], 30);
        assert_eq!(stats.total_habits, 0);
        assert_eq!(stats.total_days, 0);
        assert_eq!(stats.completed_days, 0);
        assert_eq!(stats.percentage, "0.0");
        assert_eq!(stats.best_habit, BestHabit::default());
        let json = serde_json::to_value(&stats.best_habit).unwrap();
        assert_eq!(json, serde_json::json!({}));
    }

    #[test]
    fn monthly_stats_sums_and_picks_best() {
        let habits = vec![habit("Run", 6, 5), habit("Read", 6, 10)];
        let stats = monthly_stats(&habits, 30);
        assert_eq!(stats.total_habits, 2);
        assert_eq!(stats.total_days, 60);
        assert_eq!(stats.completed_days, 15);
        assert_eq!(stats.percentage, "25.0");
        assert_eq!(stats.best_habit.name.as_deref(), Some("Read"));
        assert_eq!(stats.best_habit.count, Some(10));
    }

    #[test]
    fn best_habit_tie_keeps_first() {
        let habits = vec![habit("First", 6, 7), habit("Second", 6, 7)];
        let stats = monthly_stats(&habits, 30);
        assert_eq!(stats.best_habit.name.as_deref(), Some("First"));
    }

    #[test]
    fn all_zero_habits_have_no_best() {
        let habits = vec![habit("Idle", 6, 0), habit("Also idle", 6, 0)];
        let stats = monthly_stats(&habits, 30);
        assert_eq!(stats.best_habit, BestHabit::default());
    }

    #[test]
    fn yearly_report_covers_all_twelve_months() {
        let records = vec![habit("Run", 6, 15), habit("Read", 6, 15), habit("Jan", 1, 31)];
        let report = yearly_report(2024, &records);
        assert_eq!(report.len(), 12);

        let june = &report[5];
        assert_eq!(june.month, "June");
        assert_eq!(june.total_habits, 2);
        assert_eq!(june.completed_days, 30);
        assert_eq!(june.percentage, ReportPercentage::Ratio("50.0".to_string()));

        let january = &report[0];
        assert_eq!(january.percentage, ReportPercentage::Ratio("100.0".to_string()));

        let march = &report[2];
        assert_eq!(march.total_habits, 0);
        assert_eq!(march.completed_days, 0);
        assert_eq!(march.percentage, ReportPercentage::Empty(0));
    }

    #[test]
    fn empty_month_percentage_serializes_as_number() {
        let report = yearly_report(2024, &[habit("Run", 6, 3)]);
        let json = serde_json::to_value(&report).unwrap();
        assert!(json[5]["percentage"].is_string());
        assert!(json[0]["percentage"].is_number());
    }

    #[test]
    fn yearly_average_ignores_untracked_months() {
        let mut records = Vec::new();
        // 31 days tracked out of 31 -> 100.0 in January.
        records.push(habit("Jan", 1, 31));
        // 15 of 30 days -> 50.0 in June.
        records.push(habit("June", 6, 15));
        let report = yearly_report(2024, &records);

        let average = yearly_average(&report);
        assert!((average - 75.0).abs() < 1e-9);
    }

    #[test]
    fn yearly_average_of_empty_year_is_zero() {
        let report = yearly_report(2024, &[]);
        assert_eq!(yearly_average(&report), 0.0);
    }
}

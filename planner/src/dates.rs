//! Month arithmetic for laying out calendar views.
//!
//! Every function takes any date inside the month of interest; only its
//! year and month are read unless stated otherwise. Weeks start on Sunday.

use chrono::{Datelike, Local, Months, NaiveDate};

/// A calendar week: `None` marks a cell before the first day of the month.
pub type Week = Vec<Option<u32>>;

pub fn first_of_month(date: NaiveDate) -> NaiveDate {
    date.with_day(1).unwrap_or(date)
}

/// Number of days in the month containing `date` (28-31).
pub fn days_in_month(date: NaiveDate) -> u32 {
    let (year, month) = if date.month() == 12 {
        (date.year() + 1, 1)
    } else {
        (date.year(), date.month() + 1)
    };

    NaiveDate::from_ymd_opt(year, month, 1)
        .and_then(|next| next.pred_opt())
        .map_or(31, |last| last.day())
}

/// Weekday of the 1st of the month, 0 = Sunday through 6 = Saturday.
pub fn first_weekday_of_month(date: NaiveDate) -> u32 {
    first_of_month(date).weekday().num_days_from_sunday()
}

/// Split the month into rows of seven cells.
///
/// The first row is padded with leading `None` cells up to the weekday of
/// the 1st. The last row is left short instead of being padded, so callers
/// rendering a fixed grid must fill the trailing cells themselves.
pub fn weeks_in_month(date: NaiveDate) -> Vec<Week> {
    let mut weeks = Vec::new();
    let mut current: Week = vec![None; first_weekday_of_month(date) as usize];

    for day in 1..=days_in_month(date) {
        current.push(Some(day));
        if current.len() == 7 {
            weeks.push(std::mem::take(&mut current));
        }
    }

    if !current.is_empty() {
        weeks.push(current);
    }

    weeks
}

/// Row of `weeks_in_month` that contains `date`.
pub fn week_index_of(date: NaiveDate) -> usize {
    ((first_weekday_of_month(date) + date.day() - 1) / 7) as usize
}

/// Dates of one row of `weeks_in_month`; empty if the row does not exist.
pub fn week_dates(current_date: NaiveDate, week_index: usize) -> Vec<Option<NaiveDate>> {
    weeks_in_month(current_date)
        .get(week_index)
        .map(|week| {
            week.iter()
                .map(|cell| cell.and_then(|day| date_in_month(current_date, day)))
                .collect()
        })
        .unwrap_or_default()
}

/// The date for `day` in the month shown by `current_date`.
pub fn date_in_month(current_date: NaiveDate, day: u32) -> Option<NaiveDate> {
    NaiveDate::from_ymd_opt(current_date.year(), current_date.month(), day)
}

/// Whether `day` of the displayed month is `today`.
pub fn is_same_day(day: u32, current_date: NaiveDate, today: NaiveDate) -> bool {
    today.day() == day && today.month() == current_date.month() && today.year() == current_date.year()
}

/// Whether `day` of the displayed month is today on the local clock.
pub fn is_today(day: u32, current_date: NaiveDate) -> bool {
    is_same_day(day, current_date, Local::now().date_naive())
}

/// Move `months` forward (or backward when negative).
///
/// The day of month is clamped, so Jan 31 + 1 month lands on the last day
/// of February.
pub fn shift_month(date: NaiveDate, months: i32) -> NaiveDate {
    let shifted = if months >= 0 {
        date.checked_add_months(Months::new(months.unsigned_abs()))
    } else {
        date.checked_sub_months(Months::new(months.unsigned_abs()))
    };
    shifted.unwrap_or(date)
}

pub fn previous_month(date: NaiveDate) -> NaiveDate {
    shift_month(date, -1)
}

pub fn next_month(date: NaiveDate) -> NaiveDate {
    shift_month(date, 1)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ymd(year: i32, month: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(year, month, day).unwrap()
    }

    #[test]
    fn test_days_in_month() {
        assert_eq!(days_in_month(ymd(2025, 1, 15)), 31);
        assert_eq!(days_in_month(ymd(2025, 2, 1)), 28);
        assert_eq!(days_in_month(ymd(2024, 2, 29)), 29);
        assert_eq!(days_in_month(ymd(2025, 4, 30)), 30);
        assert_eq!(days_in_month(ymd(2025, 12, 31)), 31);
    }

    #[test]
    fn test_first_weekday_of_month() {
        // 1 Jan 2025 was a Wednesday
        assert_eq!(first_weekday_of_month(ymd(2025, 1, 20)), 3);
        // 1 Jun 2025 was a Sunday
        assert_eq!(first_weekday_of_month(ymd(2025, 6, 10)), 0);
        // 1 Feb 2025 was a Saturday
        assert_eq!(first_weekday_of_month(ymd(2025, 2, 1)), 6);
    }

    #[test]
    fn test_weeks_flatten_to_every_day_in_order() {
        for year in [2024, 2025, 2026] {
            for month in 1..=12 {
                let date = ymd(year, month, 1);
                let days: Vec<u32> = weeks_in_month(date).into_iter().flatten().flatten().collect();
                let expected: Vec<u32> = (1..=days_in_month(date)).collect();
                assert_eq!(days, expected, "{year}-{month}");
            }
        }
    }

    #[test]
    fn test_only_leading_cells_are_empty() {
        let weeks = weeks_in_month(ymd(2025, 1, 1));
        assert!(weeks[0][..3].iter().all(Option::is_none));
        assert_eq!(weeks[0][3], Some(1));
        for week in &weeks[1..] {
            assert!(week.iter().all(Option::is_some));
        }

        // Jan 2025 ends on a Friday: last row is 6 cells, not padded to 7
        let last = weeks.last().unwrap();
        assert_eq!(last.len(), 6);
        assert_eq!(last.last(), Some(&Some(31)));
        assert!(weeks[..weeks.len() - 1].iter().all(|week| week.len() == 7));
    }

    #[test]
    fn test_week_index_and_dates() {
        let date = ymd(2025, 1, 5);
        assert_eq!(week_index_of(ymd(2025, 1, 1)), 0);
        assert_eq!(week_index_of(ymd(2025, 1, 4)), 0);
        assert_eq!(week_index_of(date), 1);
        assert_eq!(week_index_of(ymd(2025, 1, 31)), 4);

        let first = week_dates(date, 0);
        assert_eq!(first.len(), 7);
        assert_eq!(first[2], None);
        assert_eq!(first[3], Some(ymd(2025, 1, 1)));
        assert!(week_dates(date, 9).is_empty());
    }

    #[test]
    fn test_is_same_day() {
        let today = ymd(2025, 3, 14);
        assert!(is_same_day(14, ymd(2025, 3, 1), today));
        assert!(!is_same_day(14, ymd(2025, 4, 1), today));
        assert!(!is_same_day(14, ymd(2024, 3, 1), today));
        assert!(!is_same_day(13, ymd(2025, 3, 1), today));
    }

    #[test]
    fn test_is_today_uses_local_clock() {
        let today = Local::now().date_naive();
        assert!(is_today(today.day(), today));
    }

    #[test]
    fn test_month_navigation_clamps_day() {
        assert_eq!(next_month(ymd(2025, 1, 31)), ymd(2025, 2, 28));
        assert_eq!(next_month(ymd(2024, 1, 31)), ymd(2024, 2, 29));
        assert_eq!(next_month(ymd(2025, 12, 10)), ymd(2026, 1, 10));
        assert_eq!(previous_month(ymd(2025, 1, 10)), ymd(2024, 12, 10));
        assert_eq!(previous_month(ymd(2025, 3, 31)), ymd(2025, 2, 28));
        assert_eq!(shift_month(ymd(2025, 5, 15), 0), ymd(2025, 5, 15));
    }

    #[test]
    fn test_date_in_month_rejects_out_of_range() {
        assert_eq!(date_in_month(ymd(2025, 2, 1), 28), Some(ymd(2025, 2, 28)));
        assert_eq!(date_in_month(ymd(2025, 2, 1), 29), None);
        assert_eq!(date_in_month(ymd(2025, 2, 1), 0), None);
    }
}

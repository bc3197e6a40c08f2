use chrono::{Datelike, NaiveDate, Utc};

/// Today's date in UTC. The single source of truth for "the current month"
/// during reconstruction and aggregation.
pub fn today() -> NaiveDate {
    Utc::now().date_naive()
}

/// First day of the month containing `date`.
pub fn month_start(date: NaiveDate) -> NaiveDate {
    NaiveDate::from_ymd_opt(date.year(), date.month(), 1).expect("first of month is always valid")
}

/// Last day of the month containing `date`.
pub fn month_end(date: NaiveDate) -> NaiveDate {
    let (next_year, next_month) = if date.month() == 12 {
        (date.year() + 1, 1)
    } else {
        (date.year(), date.month() + 1)
    };
    NaiveDate::from_ymd_opt(next_year, next_month, 1)
        .expect("first of month is always valid")
        .pred_opt()
        .expect("month end is always valid")
}

/// One entry per calendar month from the month of `start` through the month
/// of `end`, inclusive, each keyed by its first day. Empty when `start > end`.
pub fn months_between(start: NaiveDate, end: NaiveDate) -> Vec<NaiveDate> {
    let mut current = month_start(start);
    let last = month_start(end);
    let mut months = Vec::new();
    while current <= last {
        months.push(current);
        current = next_month(current);
    }
    months
}

fn next_month(month: NaiveDate) -> NaiveDate {
    let (year, month_no) = if month.month() == 12 {
        (month.year() + 1, 1)
    } else {
        (month.year(), month.month() + 1)
    };
    NaiveDate::from_ymd_opt(year, month_no, 1).expect("first of month is always valid")
}

/// Formats a month key as `YYYY-MM` for history output.
pub fn format_month(month: NaiveDate) -> String {
    month.format("%Y-%m").to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn month_end_handles_year_boundary() {
        assert_eq!(month_end(date(2023, 12, 5)), date(2023, 12, 31));
        assert_eq!(month_end(date(2024, 2, 1)), date(2024, 2, 29));
    }

    #[test]
    fn months_between_is_inclusive() {
        let months = months_between(date(2023, 11, 15), date(2024, 1, 2));
        assert_eq!(
            months,
            vec![date(2023, 11, 1), date(2023, 12, 1), date(2024, 1, 1)]
        );
    }

    #[test]
    fn months_between_empty_when_reversed() {
        assert!(months_between(date(2024, 2, 1), date(2024, 1, 1)).is_empty());
    }
}

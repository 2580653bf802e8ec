use chrono::{DateTime, Local, NaiveDate, NaiveDateTime, TimeZone};

use crate::error::{Error, Result};
use crate::models::Task;
use crate::projection::{is_due_today, is_due_tomorrow};

/// Due date as `dd/mm/yy`.
pub fn due_date(task: &Task) -> String {
    match task.due {
        Some(due) => due.format("%d/%m/%y").to_string(),
        None => "No date".to_string(),
    }
}

/// Due time in 24-hour `HH:MM`.
pub fn due_time(task: &Task) -> String {
    match task.due {
        Some(due) => due.format("%H:%M").to_string(),
        None => String::new(),
    }
}

/// `dd/mm/yy at HH:MM`, or `No date`.
pub fn due_date_time(task: &Task) -> String {
    match task.due {
        Some(_) => format!("{} at {}", due_date(task), due_time(task)),
        None => "No date".to_string(),
    }
}

/// Short relative label for the list column.
pub fn when(task: &Task, now: DateTime<Local>) -> String {
    if task.due.is_none() {
        "-".to_string()
    } else if is_due_today(task, now) {
        format!("Today {}", due_time(task))
    } else if is_due_tomorrow(task, now) {
        format!("Tomorrow {}", due_time(task))
    } else {
        due_date_time(task)
    }
}

/// Section heading for a date bucket.
pub fn day_label(day: Option<NaiveDate>, now: DateTime<Local>) -> String {
    let today = now.date_naive();
    match day {
        None => "No date".to_string(),
        Some(d) if d == today => "Today".to_string(),
        Some(d) if today.succ_opt() == Some(d) => "Tomorrow".to_string(),
        Some(d) => d.format("%d/%m/%y").to_string(),
    }
}

/// Parses `dd/mm/yy HH:MM` (or just `dd/mm/yy`, meaning 09:00) as local time.
/// Blank input means no due date.
pub fn parse_due(input: &str) -> Result<Option<DateTime<Local>>> {
    let input = input.trim();
    if input.is_empty() {
        return Ok(None);
    }
    let naive = NaiveDateTime::parse_from_str(input, "%d/%m/%y %H:%M")
        .or_else(|_| {
            NaiveDate::parse_from_str(input, "%d/%m/%y")
                .map(|d| d.and_hms_opt(9, 0, 0).unwrap_or_default())
        })
        .map_err(|_| Error::InvalidDate(input.to_string()))?;
    Local
        .from_local_datetime(&naive)
        .earliest()
        .map(Some)
        .ok_or_else(|| Error::InvalidDate(input.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, Timelike};

    fn noon() -> DateTime<Local> {
        Local.with_ymd_and_hms(2025, 3, 10, 12, 0, 0).unwrap()
    }

    #[test]
    fn formats_day_month_year_and_24h_time() {
        let task = Task::new("x", noon()).with_due(noon() + Duration::hours(6));
        assert_eq!(due_date(&task), "10/03/25");
        assert_eq!(due_time(&task), "18:00");
        assert_eq!(due_date_time(&task), "10/03/25 at 18:00");
    }

    #[test]
    fn undated_task_has_no_date_label() {
        let task = Task::new("x", noon());
        assert_eq!(due_date_time(&task), "No date");
        assert_eq!(when(&task, noon()), "-");
    }

    #[test]
    fn relative_labels() {
        let today = Task::new("x", noon()).with_due(noon() + Duration::hours(1));
        let tomorrow = Task::new("x", noon()).with_due(noon() + Duration::days(1));
        assert_eq!(when(&today, noon()), "Today 13:00");
        assert_eq!(when(&tomorrow, noon()), "Tomorrow 12:00");
        assert_eq!(day_label(Some(noon().date_naive()), noon()), "Today");
        assert_eq!(day_label(None, noon()), "No date");
    }

    #[test]
    fn parses_due_input() {
        let due = parse_due("11/03/25 08:30").unwrap().unwrap();
        assert_eq!(due.date_naive(), NaiveDate::from_ymd_opt(2025, 3, 11).unwrap());
        assert_eq!((due.hour(), due.minute()), (8, 30));

        let date_only = parse_due("11/03/25").unwrap().unwrap();
        assert_eq!(date_only.hour(), 9);

        assert_eq!(parse_due("   ").unwrap(), None);
        assert!(matches!(parse_due("tomorrow"), Err(Error::InvalidDate(_))));
    }
}

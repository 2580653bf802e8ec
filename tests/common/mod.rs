#![allow(dead_code)]

use chrono::{DateTime, Local, TimeZone};
use remindrs::Task;

/// Fixed "current time" used across tests: 10 March 2025, 12:00 local.
pub fn noon() -> DateTime<Local> {
    Local.with_ymd_and_hms(2025, 3, 10, 12, 0, 0).unwrap()
}

pub fn titles(tasks: &[&Task]) -> Vec<String> {
    tasks.iter().map(|t| t.title.clone()).collect()
}

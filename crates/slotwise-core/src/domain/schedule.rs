use crate::domain::weekday::ScheduleDay;
use chrono::NaiveTime;

/// One weekly slot. `start_time < end_time` is expected but not checked.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScheduleEntry {
    pub weekday: ScheduleDay,
    pub start_time: NaiveTime,
    pub end_time: NaiveTime,
}

impl ScheduleEntry {
    pub fn new(weekday: ScheduleDay, start_time: NaiveTime, end_time: NaiveTime) -> Self {
        Self {
            weekday,
            start_time,
            end_time,
        }
    }
}

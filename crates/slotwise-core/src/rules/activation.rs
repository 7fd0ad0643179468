use crate::domain::{Campaign, ScheduleEntry};
use crate::error::CoreError;
use crate::time::resolve_local;
use chrono::{DateTime, Datelike, Days, NaiveDate, NaiveTime, TimeZone, Timelike, Utc, Weekday};
use serde::{Deserialize, Serialize};

/// How the campaign end date limits the computed activation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum EndDateBound {
    /// Only a campaign that has already ended has no activation.
    #[default]
    Campaign,
    /// Slots starting after the end date are discarded as well.
    Slot,
}

/// Returns the earliest start of a schedule slot after `now_utc`, as a UTC
/// timestamp. Weekdays and start times are wall-clock values in `tz`.
///
/// A slot on today's weekday whose start minute is at or before the current
/// minute rolls over to next week. Entries with an unrecognized weekday are
/// skipped.
pub fn next_activation<Tz: TimeZone>(
    campaign: &Campaign,
    now_utc: i64,
    tz: &Tz,
    bound: EndDateBound,
) -> Result<Option<i64>, CoreError> {
    let end_at = match campaign.end_at {
        Some(end_at) if end_at > now_utc => end_at,
        _ => return Ok(None),
    };

    let now = DateTime::<Utc>::from_timestamp(now_utc, 0)
        .ok_or(CoreError::InvalidTimestamp)?
        .with_timezone(tz);
    let today = now.date_naive();
    let current_minute =
        NaiveTime::from_hms_opt(now.hour(), now.minute(), 0).ok_or(CoreError::InvalidTimestamp)?;

    let mut closest: Option<i64> = None;
    for entry in &campaign.schedule {
        let Some(start) = slot_start(entry, today, current_minute, tz) else {
            continue;
        };
        if bound == EndDateBound::Slot && start > end_at {
            continue;
        }
        closest = Some(match closest {
            None => start,
            Some(current) => current.min(start),
        });
    }

    Ok(closest)
}

/// Days from `from` forward to the next `to`, in `0..7`.
pub fn days_until(from: Weekday, to: Weekday) -> u32 {
    (to.num_days_from_sunday() + 7 - from.num_days_from_sunday()) % 7
}

fn slot_start<Tz: TimeZone>(
    entry: &ScheduleEntry,
    today: NaiveDate,
    current_minute: NaiveTime,
    tz: &Tz,
) -> Option<i64> {
    let target = entry.weekday.weekday()?;
    let start = entry.start_time;
    let start_minute = NaiveTime::from_hms_opt(start.hour(), start.minute(), 0)?;

    let mut days = days_until(today.weekday(), target);
    if days == 0 && start_minute <= current_minute {
        days = 7;
    }

    let date = today.checked_add_days(Days::new(u64::from(days)))?;
    resolve_local(tz, date.and_time(start_minute)).map(|dt| dt.timestamp())
}

#[cfg(test)]
mod tests {
    use super::{days_until, next_activation, EndDateBound};
    use crate::domain::{Campaign, CampaignType, ScheduleDay, ScheduleEntry};
    use chrono::{FixedOffset, NaiveTime, TimeZone, Weekday};

    fn utc() -> FixedOffset {
        FixedOffset::east_opt(0).unwrap()
    }

    // 2024-06-12 is a Wednesday.
    fn at(offset: &FixedOffset, day: u32, hour: u32, minute: u32, second: u32) -> i64 {
        offset
            .with_ymd_and_hms(2024, 6, day, hour, minute, second)
            .unwrap()
            .timestamp()
    }

    fn entry(weekday: &str, start: &str) -> ScheduleEntry {
        let start_time = NaiveTime::parse_from_str(start, "%H:%M:%S")
            .or_else(|_| NaiveTime::parse_from_str(start, "%H:%M"))
            .unwrap();
        ScheduleEntry::new(
            ScheduleDay::parse(weekday),
            start_time,
            NaiveTime::from_hms_opt(23, 0, 0).unwrap(),
        )
    }

    fn campaign(end_at: Option<i64>, schedule: Vec<ScheduleEntry>) -> Campaign {
        Campaign {
            id: None,
            campaign_type: CampaignType::CostPerClick,
            start_at: None,
            end_at,
            schedule,
        }
    }

    fn next(campaign: &Campaign, now: i64) -> Option<i64> {
        next_activation(campaign, now, &utc(), EndDateBound::Campaign).expect("activation")
    }

    #[test]
    fn ended_campaign_has_no_activation() {
        let tz = utc();
        let now = at(&tz, 12, 10, 0, 0);
        let ended = campaign(
            Some(at(&tz, 11, 0, 0, 0)),
            vec![entry("Friday", "14:00")],
        );
        assert_eq!(next(&ended, now), None);
    }

    #[test]
    fn campaign_ending_now_has_no_activation() {
        let tz = utc();
        let now = at(&tz, 12, 10, 0, 0);
        let ending = campaign(Some(now), vec![entry("Friday", "14:00")]);
        assert_eq!(next(&ending, now), None);
    }

    #[test]
    fn campaign_without_end_date_has_no_activation() {
        let tz = utc();
        let now = at(&tz, 12, 10, 0, 0);
        assert_eq!(next(&campaign(None, vec![entry("Friday", "14:00")]), now), None);
    }

    #[test]
    fn empty_schedule_has_no_activation() {
        let tz = utc();
        let now = at(&tz, 12, 10, 0, 0);
        let open = campaign(Some(at(&tz, 30, 0, 0, 0)), Vec::new());
        assert_eq!(next(&open, now), None);
    }

    #[test]
    fn later_slot_today_activates_today() {
        let tz = utc();
        let now = at(&tz, 12, 10, 0, 0);
        let open = campaign(
            Some(at(&tz, 30, 0, 0, 0)),
            vec![entry("Wednesday", "16:30")],
        );
        assert_eq!(next(&open, now), Some(at(&tz, 12, 16, 30, 0)));
    }

    #[test]
    fn earlier_slot_today_rolls_to_next_week() {
        let tz = utc();
        let now = at(&tz, 12, 10, 0, 0);
        let open = campaign(
            Some(at(&tz, 21, 0, 0, 0)),
            vec![entry("Wednesday", "09:00")],
        );
        assert_eq!(next(&open, now), Some(at(&tz, 19, 9, 0, 0)));
    }

    #[test]
    fn slot_starting_this_minute_counts_as_passed() {
        let tz = utc();
        let now = at(&tz, 12, 10, 0, 45);
        let open = campaign(
            Some(at(&tz, 30, 0, 0, 0)),
            vec![entry("Wednesday", "10:00")],
        );
        assert_eq!(next(&open, now), Some(at(&tz, 19, 10, 0, 0)));
    }

    #[test]
    fn slot_later_this_week_activates_this_week() {
        let tz = utc();
        let now = at(&tz, 12, 10, 0, 0);
        let open = campaign(
            Some(at(&tz, 30, 0, 0, 0)),
            vec![entry("Friday", "14:00")],
        );
        assert_eq!(next(&open, now), Some(at(&tz, 14, 14, 0, 0)));
    }

    #[test]
    fn earliest_slot_wins() {
        let tz = utc();
        let now = at(&tz, 12, 10, 0, 0);
        let open = campaign(
            Some(at(&tz, 30, 0, 0, 0)),
            vec![
                entry("Monday", "08:00"),
                entry("Friday", "14:00"),
                entry("Thursday", "18:00"),
                entry("Wednesday", "09:00"),
            ],
        );
        assert_eq!(next(&open, now), Some(at(&tz, 13, 18, 0, 0)));
    }

    #[test]
    fn duplicate_slots_resolve_to_the_same_instant() {
        let tz = utc();
        let now = at(&tz, 12, 10, 0, 0);
        let open = campaign(
            Some(at(&tz, 30, 0, 0, 0)),
            vec![entry("Friday", "14:00"), entry("friday", "14:00:59")],
        );
        assert_eq!(next(&open, now), Some(at(&tz, 14, 14, 0, 0)));
    }

    #[test]
    fn same_weekday_slots_pick_the_one_still_ahead_today() {
        let tz = utc();
        let now = at(&tz, 12, 10, 0, 0);
        let open = campaign(
            Some(at(&tz, 30, 0, 0, 0)),
            vec![entry("Wednesday", "09:00"), entry("Wednesday", "11:00")],
        );
        assert_eq!(next(&open, now), Some(at(&tz, 12, 11, 0, 0)));

        let both_passed = campaign(
            Some(at(&tz, 30, 0, 0, 0)),
            vec![entry("Wednesday", "09:30"), entry("Wednesday", "09:00")],
        );
        assert_eq!(next(&both_passed, now), Some(at(&tz, 19, 9, 0, 0)));
    }

    #[test]
    fn unrecognized_weekdays_are_skipped() {
        let tz = utc();
        let now = at(&tz, 12, 10, 0, 0);
        let only_bad = campaign(Some(at(&tz, 30, 0, 0, 0)), vec![entry("Someday", "11:00")]);
        assert_eq!(next(&only_bad, now), None);

        let mixed = campaign(
            Some(at(&tz, 30, 0, 0, 0)),
            vec![entry("Someday", "11:00"), entry("Saturday", "07:15")],
        );
        assert_eq!(next(&mixed, now), Some(at(&tz, 15, 7, 15, 0)));
    }

    #[test]
    fn start_seconds_are_zeroed() {
        let tz = utc();
        let now = at(&tz, 12, 10, 0, 0);
        let open = campaign(
            Some(at(&tz, 30, 0, 0, 0)),
            vec![entry("Friday", "14:00:30")],
        );
        assert_eq!(next(&open, now), Some(at(&tz, 14, 14, 0, 0)));
    }

    #[test]
    fn campaign_bound_keeps_slot_after_end_date() {
        let tz = utc();
        let now = at(&tz, 12, 10, 0, 0);
        let open = campaign(
            Some(at(&tz, 13, 0, 0, 0)),
            vec![entry("Friday", "14:00")],
        );
        assert_eq!(next(&open, now), Some(at(&tz, 14, 14, 0, 0)));
    }

    #[test]
    fn slot_bound_discards_slot_after_end_date() {
        let tz = utc();
        let now = at(&tz, 12, 10, 0, 0);
        let open = campaign(
            Some(at(&tz, 13, 0, 0, 0)),
            vec![entry("Friday", "14:00"), entry("Wednesday", "20:00")],
        );
        let result = next_activation(&open, now, &tz, EndDateBound::Slot).unwrap();
        assert_eq!(result, Some(at(&tz, 12, 20, 0, 0)));

        let late_only = campaign(Some(at(&tz, 13, 0, 0, 0)), vec![entry("Friday", "14:00")]);
        let result = next_activation(&late_only, now, &tz, EndDateBound::Slot).unwrap();
        assert_eq!(result, None);
    }

    #[test]
    fn weekday_is_taken_in_the_given_zone() {
        // 23:30 UTC on Wednesday is already Thursday 08:30 at UTC+9.
        let tokyo = FixedOffset::east_opt(9 * 3600).unwrap();
        let now = at(&utc(), 12, 23, 30, 0);
        let open = campaign(
            Some(at(&utc(), 30, 0, 0, 0)),
            vec![entry("Thursday", "09:00"), entry("Wednesday", "23:45")],
        );
        let result = next_activation(&open, now, &tokyo, EndDateBound::Campaign).unwrap();
        assert_eq!(result, Some(at(&tokyo, 13, 9, 0, 0)));
    }

    #[test]
    fn days_until_wraps_around_the_week() {
        assert_eq!(days_until(Weekday::Wed, Weekday::Wed), 0);
        assert_eq!(days_until(Weekday::Wed, Weekday::Fri), 2);
        assert_eq!(days_until(Weekday::Sat, Weekday::Sun), 1);
        assert_eq!(days_until(Weekday::Sun, Weekday::Sat), 6);
        assert_eq!(days_until(Weekday::Fri, Weekday::Mon), 3);
    }
}

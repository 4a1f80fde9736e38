//! Weekly opening hours and "open now" evaluation.

use std::sync::LazyLock;

use chrono::{NaiveTime, Timelike, Weekday};
use regex::Regex;
use serde::{Deserialize, Serialize};

/// Matches `"9:00 AM – 5:00 PM"` style ranges. Providers use hyphens, en
/// dashes or em dashes and sometimes narrow no-break spaces.
static RANGE_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)(\d{1,2}):(\d{2})\s*(AM|PM)\s*[-\u{2013}\u{2014}]\s*(\d{1,2}):(\d{2})\s*(AM|PM)")
        .expect("valid regex")
});

/// Display strings for each weekday, as shown by the provider.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BusinessHours {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub monday: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tuesday: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub wednesday: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub thursday: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub friday: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub saturday: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sunday: Option<String>,
    #[serde(default)]
    pub is_24_hours: bool,
}

impl BusinessHours {
    /// Builds hours from `"Monday: 9:00 AM – 5:00 PM"` lines.
    ///
    /// Lines without a recognised weekday prefix are ignored. Returns `None`
    /// when no line could be attributed to a day.
    #[must_use]
    pub fn from_weekday_text<S: AsRef<str>>(lines: &[S]) -> Option<Self> {
        let mut hours = Self::default();
        let mut any = false;
        let mut all_day_count = 0;

        for line in lines {
            let Some((day, value)) = line.as_ref().split_once(':') else {
                continue;
            };
            let Ok(weekday) = day.trim().parse::<Weekday>() else {
                continue;
            };
            let value = value.trim().to_string();
            if value.eq_ignore_ascii_case("open 24 hours") {
                all_day_count += 1;
            }
            *hours.slot_mut(weekday) = Some(value);
            any = true;
        }

        hours.is_24_hours = all_day_count == 7;
        any.then_some(hours)
    }

    #[must_use]
    pub fn for_weekday(&self, weekday: Weekday) -> Option<&str> {
        match weekday {
            Weekday::Mon => self.monday.as_deref(),
            Weekday::Tue => self.tuesday.as_deref(),
            Weekday::Wed => self.wednesday.as_deref(),
            Weekday::Thu => self.thursday.as_deref(),
            Weekday::Fri => self.friday.as_deref(),
            Weekday::Sat => self.saturday.as_deref(),
            Weekday::Sun => self.sunday.as_deref(),
        }
    }

    fn slot_mut(&mut self, weekday: Weekday) -> &mut Option<String> {
        match weekday {
            Weekday::Mon => &mut self.monday,
            Weekday::Tue => &mut self.tuesday,
            Weekday::Wed => &mut self.wednesday,
            Weekday::Thu => &mut self.thursday,
            Weekday::Fri => &mut self.friday,
            Weekday::Sat => &mut self.saturday,
            Weekday::Sun => &mut self.sunday,
        }
    }

    /// Whether the place is open at `time` on `weekday`.
    ///
    /// Missing or `"Closed"` days are closed; so is any day whose text does
    /// not contain a parseable time range. Ranges that end before they start
    /// are treated as running past midnight.
    #[must_use]
    pub fn is_open_at(&self, weekday: Weekday, time: NaiveTime) -> bool {
        if self.is_24_hours {
            return true;
        }
        let Some(text) = self.for_weekday(weekday) else {
            return false;
        };
        if text.eq_ignore_ascii_case("open 24 hours") {
            return true;
        }
        let Some((start, end)) = parse_range(text) else {
            return false;
        };

        let now = time.hour() * 60 + time.minute();
        if start <= end {
            now >= start && now <= end
        } else {
            now >= start || now <= end
        }
    }
}

/// Minutes-since-midnight for the first range in `text`.
fn parse_range(text: &str) -> Option<(u32, u32)> {
    let caps = RANGE_RE.captures(text)?;
    let start = to_minutes(&caps[1], &caps[2], &caps[3])?;
    let end = to_minutes(&caps[4], &caps[5], &caps[6])?;
    Some((start, end))
}

fn to_minutes(hour: &str, minute: &str, period: &str) -> Option<u32> {
    let hour: u32 = hour.parse().ok()?;
    let minute: u32 = minute.parse().ok()?;
    if hour == 0 || hour > 12 || minute > 59 {
        return None;
    }
    let pm = period.eq_ignore_ascii_case("pm");
    let hour24 = match (hour, pm) {
        (12, false) => 0,
        (12, true) => 12,
        (h, false) => h,
        (h, true) => h + 12,
    };
    Some(hour24 * 60 + minute)
}

use std::fmt;
use std::str::FromStr;

use chrono::{NaiveTime, Timelike};
use serde::{Deserialize, Deserializer, Serialize, Serializer};

const MINUTES_PER_HOUR: u32 = 60;

/// Time-of-day an interview starts at, rendered canonically as `HH:MM`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct SlotTime(NaiveTime);

impl SlotTime {
    pub fn from_hm(hour: u32, minute: u32) -> Option<Self> {
        NaiveTime::from_hms_opt(hour, minute, 0).map(Self)
    }

    fn from_minutes(minutes: u32) -> Option<Self> {
        Self::from_hm(minutes / MINUTES_PER_HOUR, minutes % MINUTES_PER_HOUR)
    }

    /// Drops seconds so any wall-clock instant maps onto a minute boundary.
    pub fn from_time(time: NaiveTime) -> Self {
        Self(time.with_second(0).and_then(|t| t.with_nanosecond(0)).unwrap_or(time))
    }

    pub fn minutes_since_midnight(self) -> u32 {
        self.0.hour() * MINUTES_PER_HOUR + self.0.minute()
    }
}

impl fmt::Display for SlotTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:02}:{:02}", self.0.hour(), self.0.minute())
    }
}

/// Raised when a string is not a 24-hour `H:MM` / `HH:MM` time.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("'{0}' is not a valid HH:MM time")]
pub struct SlotTimeParseError(pub String);

impl FromStr for SlotTime {
    type Err = SlotTimeParseError;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        let invalid = || SlotTimeParseError(raw.to_string());
        let (hour, minute) = raw.split_once(':').ok_or_else(invalid)?;

        let digits = |part: &str| part.bytes().all(|b| b.is_ascii_digit());
        if !(1..=2).contains(&hour.len()) || minute.len() != 2 || !digits(hour) || !digits(minute)
        {
            return Err(invalid());
        }

        let hour: u32 = hour.parse().map_err(|_| invalid())?;
        let minute: u32 = minute.parse().map_err(|_| invalid())?;
        if hour > 23 || minute > 59 {
            return Err(invalid());
        }

        Self::from_hm(hour, minute).ok_or_else(invalid)
    }
}

impl Serialize for SlotTime {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for SlotTime {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        raw.parse().map_err(serde::de::Error::custom)
    }
}

/// Business-hours grid of bookable start times. The same grid applies to
/// every calendar date; weekends and holidays are not excluded.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SlotCatalog {
    opening: u32,
    closing: u32,
    step: u32,
}

impl SlotCatalog {
    /// 09:00 through 17:00 inclusive, every 15 minutes (33 slots).
    pub const fn business_hours() -> Self {
        Self {
            opening: 9 * MINUTES_PER_HOUR,
            closing: 17 * MINUTES_PER_HOUR,
            step: 15,
        }
    }

    pub fn opening(&self) -> SlotTime {
        SlotTime::from_minutes(self.opening).unwrap_or_else(|| SlotTime(NaiveTime::MIN))
    }

    /// Every grid point in ascending order.
    pub fn all_slots(&self) -> Vec<SlotTime> {
        (self.opening..=self.closing)
            .step_by(self.step as usize)
            .filter_map(SlotTime::from_minutes)
            .collect()
    }

    pub fn contains(&self, time: SlotTime) -> bool {
        let minutes = time.minutes_since_midnight();
        (self.opening..=self.closing).contains(&minutes) && (minutes - self.opening) % self.step == 0
    }

    /// Rounds `time` up to the next grid point; `None` once past closing.
    pub fn next_slot_at_or_after(&self, time: SlotTime) -> Option<SlotTime> {
        let minutes = time.minutes_since_midnight();
        if minutes <= self.opening {
            return SlotTime::from_minutes(self.opening);
        }

        let offset = minutes - self.opening;
        let rounded = self.opening + offset.div_ceil(self.step) * self.step;
        if rounded > self.closing {
            return None;
        }
        SlotTime::from_minutes(rounded)
    }
}

impl Default for SlotCatalog {
    fn default() -> Self {
        Self::business_hours()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn slot(raw: &str) -> SlotTime {
        raw.parse().expect("valid slot")
    }

    #[test]
    fn business_hours_grid_has_thirty_three_slots() {
        let slots = SlotCatalog::business_hours().all_slots();
        assert_eq!(slots.len(), 33);
        assert_eq!(slots.first().map(ToString::to_string).as_deref(), Some("09:00"));
        assert_eq!(slots.last().map(ToString::to_string).as_deref(), Some("17:00"));

        for pair in slots.windows(2) {
            assert_eq!(
                pair[1].minutes_since_midnight() - pair[0].minutes_since_midnight(),
                15
            );
        }
    }

    #[test]
    fn grid_is_deterministic() {
        let catalog = SlotCatalog::default();
        assert_eq!(catalog.all_slots(), catalog.all_slots());
    }

    #[test]
    fn parses_single_and_double_digit_hours() {
        assert_eq!(slot("9:30"), slot("09:30"));
        assert_eq!(slot("9:30").to_string(), "09:30");
        assert_eq!(slot("23:59").to_string(), "23:59");
        assert_eq!(slot("0:00").to_string(), "00:00");
    }

    #[test]
    fn rejects_malformed_times() {
        for raw in ["25:99", "24:00", "12:60", "12", "12:5", "123:00", "ab:cd", "", "12:00:00", "-1:30"] {
            assert!(raw.parse::<SlotTime>().is_err(), "{raw} should be rejected");
        }
    }

    #[test]
    fn contains_only_grid_points() {
        let catalog = SlotCatalog::business_hours();
        assert!(catalog.contains(slot("09:00")));
        assert!(catalog.contains(slot("12:45")));
        assert!(catalog.contains(slot("17:00")));
        assert!(!catalog.contains(slot("10:07")));
        assert!(!catalog.contains(slot("08:45")));
        assert!(!catalog.contains(slot("17:15")));
    }

    #[test]
    fn rounds_up_to_next_grid_point() {
        let catalog = SlotCatalog::business_hours();
        assert_eq!(catalog.next_slot_at_or_after(slot("07:10")), Some(slot("09:00")));
        assert_eq!(catalog.next_slot_at_or_after(slot("10:00")), Some(slot("10:00")));
        assert_eq!(catalog.next_slot_at_or_after(slot("10:01")), Some(slot("10:15")));
        assert_eq!(catalog.next_slot_at_or_after(slot("16:50")), Some(slot("17:00")));
        assert_eq!(catalog.next_slot_at_or_after(slot("17:01")), None);
    }

    #[test]
    fn serializes_as_canonical_string() {
        let json = serde_json::to_string(&slot("9:05")).expect("serializes");
        assert_eq!(json, "\"09:05\"");
        let parsed: SlotTime = serde_json::from_str("\"14:30\"").expect("deserializes");
        assert_eq!(parsed, slot("14:30"));
        assert!(serde_json::from_str::<SlotTime>("\"25:99\"").is_err());
    }
}

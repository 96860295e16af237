//! Restaurant Model

use chrono::{NaiveDate, NaiveTime, Timelike};
use serde::{Deserialize, Serialize};

/// Restaurant entity (店舗)
///
/// The password hash never leaves the server's db layer; it is not part
/// of this model.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "db", derive(sqlx::FromRow))]
pub struct Restaurant {
    pub id: String,
    pub email: String,
    pub name: String,
    pub address: Option<String>,
    /// Opening time, "HH:MM" 24h
    pub open_time: String,
    /// Closing time, "HH:MM" 24h; earlier than `open_time` means overnight
    pub close_time: String,
    /// Closed dates, "YYYY-MM-DD"
    pub holidays: Vec<String>,
    pub email_verified: bool,
    pub created_at: i64,
}

impl Restaurant {
    /// Business-hours / holiday check for a local date-time
    ///
    /// New orders are only accepted inside the open window and outside
    /// holidays. An unparsable window is treated as always open so a
    /// misconfigured restaurant never locks itself out.
    pub fn is_open_at(&self, date: NaiveDate, time: NaiveTime) -> bool {
        if self.holidays.iter().any(|h| h == &date.format("%Y-%m-%d").to_string()) {
            return false;
        }

        let (Some(open), Some(close)) = (parse_hhmm(&self.open_time), parse_hhmm(&self.close_time))
        else {
            return true;
        };

        if open == close {
            // Degenerate window, treated as open all day
            return true;
        }

        let minutes = time.hour() * 60 + time.minute();
        if open < close {
            minutes >= open && minutes < close
        } else {
            // Overnight window, e.g. 18:00 — 02:00
            minutes >= open || minutes < close
        }
    }
}

fn parse_hhmm(s: &str) -> Option<u32> {
    let (h, m) = s.split_once(':')?;
    let h: u32 = h.parse().ok()?;
    let m: u32 = m.parse().ok()?;
    if h > 23 || m > 59 {
        return None;
    }
    Some(h * 60 + m)
}

/// Update restaurant payload
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RestaurantUpdate {
    pub name: Option<String>,
    pub address: Option<String>,
    pub open_time: Option<String>,
    pub close_time: Option<String>,
    pub holidays: Option<Vec<String>>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn restaurant(open: &str, close: &str, holidays: Vec<&str>) -> Restaurant {
        Restaurant {
            id: "r-1".into(),
            email: "owner@example.com".into(),
            name: "Test".into(),
            address: None,
            open_time: open.into(),
            close_time: close.into(),
            holidays: holidays.into_iter().map(String::from).collect(),
            email_verified: true,
            created_at: 0,
        }
    }

    fn date(s: &str) -> NaiveDate {
        NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
    }

    fn time(s: &str) -> NaiveTime {
        NaiveTime::parse_from_str(s, "%H:%M").unwrap()
    }

    #[test]
    fn test_open_within_window() {
        let r = restaurant("11:00", "22:00", vec![]);
        assert!(r.is_open_at(date("2026-08-06"), time("12:30")));
        assert!(!r.is_open_at(date("2026-08-06"), time("10:59")));
        assert!(!r.is_open_at(date("2026-08-06"), time("22:00")));
    }

    #[test]
    fn test_overnight_window() {
        let r = restaurant("18:00", "02:00", vec![]);
        assert!(r.is_open_at(date("2026-08-06"), time("23:30")));
        assert!(r.is_open_at(date("2026-08-06"), time("01:30")));
        assert!(!r.is_open_at(date("2026-08-06"), time("12:00")));
    }

    #[test]
    fn test_holiday_closes_all_day() {
        let r = restaurant("11:00", "22:00", vec!["2026-08-06"]);
        assert!(!r.is_open_at(date("2026-08-06"), time("12:30")));
        assert!(r.is_open_at(date("2026-08-07"), time("12:30")));
    }

    #[test]
    fn test_unparsable_window_stays_open() {
        let r = restaurant("closed", "??", vec![]);
        assert!(r.is_open_at(date("2026-08-06"), time("04:00")));
    }
}

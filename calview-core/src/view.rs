//! View identifiers.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::CalendarError;

/// Calendar view granularity.
///
/// Parsing is the single fail-fast boundary for unrecognized view strings;
/// once a `View` exists, every bounds/grid/label operation is total.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum View {
    Day,
    Week,
    Month,
}

impl View {
    pub fn as_str(&self) -> &'static str {
        match self {
            View::Day => "day",
            View::Week => "week",
            View::Month => "month",
        }
    }
}

impl fmt::Display for View {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for View {
    type Err = CalendarError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "day" => Ok(View::Day),
            "week" => Ok(View::Week),
            "month" => Ok(View::Month),
            _ => Err(CalendarError::UnsupportedView(s.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_known_views() {
        assert_eq!("day".parse::<View>().expect("Should parse"), View::Day);
        assert_eq!("Week".parse::<View>().expect("Should parse"), View::Week);
        assert_eq!("MONTH".parse::<View>().expect("Should parse"), View::Month);
    }

    #[test]
    fn test_unknown_view_fails_fast() {
        let err = "year".parse::<View>().expect_err("Should reject");
        match err {
            CalendarError::UnsupportedView(s) => assert_eq!(s, "year"),
            other => panic!("Expected UnsupportedView, got {:?}", other),
        }
    }
}

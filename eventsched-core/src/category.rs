//! Keyword-based event categorization.
//!
//! Categories are inferred once, when an event is created, from the
//! case-folded title and notes. Work keywords are checked before Personal
//! keywords and the first match wins.

use std::fmt;
use std::str::FromStr;

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::error::SchedulerError;

static WORK_KEYWORDS: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"meeting|project|client|call|deadline|interview|report|presentation")
        .expect("valid work keyword regex")
});

static PERSONAL_KEYWORDS: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"birthday|party|dinner|family|friend|vacation|outing")
        .expect("valid personal keyword regex")
});

/// Event category
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Category {
    Work,
    Personal,
    Other,
}

impl Category {
    pub const ALL: [Category; 3] = [Category::Work, Category::Personal, Category::Other];

    /// Infer the category of an event from its title and optional notes.
    pub fn infer(title: &str, notes: Option<&str>) -> Category {
        let text = format!("{} {}", title, notes.unwrap_or_default()).to_lowercase();
        Self::classify(&text)
    }

    /// Classify already case-folded text.
    fn classify(text: &str) -> Category {
        if WORK_KEYWORDS.is_match(text) {
            Category::Work
        } else if PERSONAL_KEYWORDS.is_match(text) {
            Category::Personal
        } else {
            Category::Other
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Category::Work => "Work",
            Category::Personal => "Personal",
            Category::Other => "Other",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Category {
    type Err = SchedulerError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Category::ALL
            .into_iter()
            .find(|c| c.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| SchedulerError::Validation(format!("Unknown category '{s}'")))
    }
}

// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License in the LICENSE-APACHE file or at:
//     https://www.apache.org/licenses/LICENSE-2.0

//! Event information extraction
//!
//! [`KeywordExtractor`] is a small rule-based extractor working on
//! whitespace-separated words:
//!
//! -   a date starts at the first month name, weekday or relative day
//!     ("today", "tonight", "tomorrow") and continues over adjacent date
//!     words, numbers, ordinals ("12th") and times ("7pm", "19:30");
//!     a number directly before the first date word is included
//! -   a location is the phrase following the first "in" or "at" outside the
//!     date, ending after a word with a trailing comma, before "on" or the
//!     date, or at the end of the text
//! -   the event name is everything else, less the connecting words "on",
//!     "in" and "at"

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};
use std::ops::Range;

/// Fields extracted from an event description
///
/// Every field is optional: an absent field is substituted with a default
/// label when the poster is laid out. A field holding only whitespace counts
/// as absent.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct EventInfo {
    pub event_name: Option<String>,
    pub date: Option<String>,
    pub location: Option<String>,
}

fn present(field: &Option<String>) -> Option<&str> {
    field.as_deref().map(str::trim).filter(|s| !s.is_empty())
}

impl EventInfo {
    /// The event name, trimmed, if present and not blank
    pub fn event_name(&self) -> Option<&str> {
        present(&self.event_name)
    }

    /// The date, trimmed, if present and not blank
    pub fn date(&self) -> Option<&str> {
        present(&self.date)
    }

    /// The location, trimmed, if present and not blank
    pub fn location(&self) -> Option<&str> {
        present(&self.location)
    }
}

/// Extracts [`EventInfo`] from free text
pub trait Extract {
    fn extract(&self, text: &str) -> EventInfo;
}

/// Rule-based extraction using keyword lists
#[derive(Clone, Copy, Debug, Default)]
pub struct KeywordExtractor;

const MONTHS: &[&str] = &[
    "january",
    "february",
    "march",
    "april",
    "may",
    "june",
    "july",
    "august",
    "september",
    "october",
    "november",
    "december",
];

const WEEKDAYS: &[&str] = &[
    "monday",
    "tuesday",
    "wednesday",
    "thursday",
    "friday",
    "saturday",
    "sunday",
];

const RELATIVE_DAYS: &[&str] = &["today", "tonight", "tomorrow"];

const CONNECTORS: &[&str] = &["on", "in", "at"];

/// Lower-case `word` without surrounding punctuation
fn normalize(word: &str) -> String {
    word.trim_matches(|c: char| !c.is_alphanumeric() && c != ':')
        .to_lowercase()
}

/// Abbreviations which are more often ordinary words
const NOT_ABBREVIATIONS: &[&str] = &["mar", "sat", "sun", "wed"];

/// Month, weekday or relative day
///
/// Abbreviations of at least three letters are accepted.
fn is_date_anchor(word: &str) -> bool {
    let w = normalize(word);
    let w = w.as_str();
    if RELATIVE_DAYS.contains(&w) {
        return true;
    }
    MONTHS.iter().chain(WEEKDAYS).any(|name| {
        *name == w
            || (w.len() >= 3
                && w.len() < name.len()
                && name.starts_with(w)
                && !NOT_ABBREVIATIONS.contains(&w))
    })
}

/// A number, ordinal or time of day
fn is_date_part(word: &str) -> bool {
    let w = normalize(word);
    let w = ["st", "nd", "rd", "th", "am", "pm"]
        .iter()
        .find_map(|suffix| w.strip_suffix(suffix))
        .unwrap_or(w.as_str());
    w.chars().any(|c| c.is_ascii_digit()) && w.chars().all(|c| c.is_ascii_digit() || c == ':')
}

fn is_connector(word: &str) -> bool {
    CONNECTORS.contains(&normalize(word).as_str())
}

/// Join words, trimming punctuation left dangling at either end
fn join(words: &[&str]) -> Option<String> {
    let text = words.join(" ");
    let text = text.trim_matches(|c: char| c == ',' || c == ';' || c.is_whitespace());
    (!text.is_empty()).then(|| text.to_string())
}

impl KeywordExtractor {
    fn find_date(words: &[&str]) -> Option<Range<usize>> {
        let anchor = words.iter().position(|w| is_date_anchor(w))?;
        let mut start = anchor;
        if start > 0 && is_date_part(words[start - 1]) {
            start -= 1;
        }
        let mut end = anchor + 1;
        while end < words.len() {
            let w = words[end];
            if is_date_anchor(w) || is_date_part(w) {
                end += 1;
            } else if normalize(w) == "at" && words.get(end + 1).is_some_and(|w| is_date_part(w)) {
                // "at 7pm"
                end += 2;
            } else {
                break;
            }
        }
        Some(start..end)
    }

    fn find_location(words: &[&str], date: Option<&Range<usize>>) -> Option<Range<usize>> {
        let in_date = |i: usize| date.is_some_and(|r| r.contains(&i));
        let keyword = (0..words.len()).find(|&i| {
            let w = normalize(words[i]);
            (w == "in" || w == "at") && !in_date(i) && i + 1 < words.len() && !in_date(i + 1)
        })?;

        let start = keyword + 1;
        let mut end = start;
        while end < words.len() && !in_date(end) {
            if end > start && normalize(words[end]) == "on" {
                break;
            }
            end += 1;
            if words[end - 1].ends_with(',') {
                break;
            }
        }
        (end > start).then_some(start..end)
    }
}

impl Extract for KeywordExtractor {
    fn extract(&self, text: &str) -> EventInfo {
        let words: Vec<&str> = text.split_whitespace().collect();
        let date = Self::find_date(&words);
        let location = Self::find_location(&words, date.as_ref());

        let taken = |i: usize| {
            date.as_ref().is_some_and(|r| r.contains(&i))
                || location.as_ref().is_some_and(|r| r.contains(&i))
        };
        let rest: Vec<&str> = words
            .iter()
            .enumerate()
            .filter(|(i, w)| !taken(*i) && !is_connector(w))
            .map(|(_, w)| *w)
            .collect();

        let info = EventInfo {
            event_name: join(&rest),
            date: date.and_then(|r| join(&words[r])),
            location: location.and_then(|r| join(&words[r])),
        };
        log::debug!("KeywordExtractor::extract: {text:?} → {info:?}");
        info
    }
}

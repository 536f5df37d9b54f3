//! Plain-text panels. Each function returns the text so callers decide where it goes.

use std::fmt::Write;

use chrono::{DateTime, TimeZone};
use outfit_core::{
    Location, Phase, Report, SavedLocations, SearchOutcome, extras,
    session::{LOAD_FAILED, LOAD_FAILED_HINT, LOADING},
};

pub fn header<Tz: TimeZone>(name: Option<&str>, now: &DateTime<Tz>) -> String
where
    Tz::Offset: std::fmt::Display,
{
    let mut out = String::from("Outfit Forecast\n");
    if let Some(line) = extras::greeting_line(name, now) {
        let _ = writeln!(out, "{line}");
    }
    let _ = writeln!(out, "Current time: {}", now.format("%H:%M:%S"));
    out
}

pub fn loading(location: &Location) -> String {
    format!("\n⏳ {LOADING} ({})\n", location.display_name)
}

pub fn phase(phase: &Phase) -> String {
    match phase {
        Phase::Idle | Phase::Searching => String::new(),
        Phase::ResultsShown(outcome) => search_outcome(outcome),
        Phase::Loading(location) => loading(location),
        Phase::Displayed(r) => report(r),
        Phase::Failed(location) => {
            format!("\n📍 {}\n❌ {LOAD_FAILED}\n{LOAD_FAILED_HINT}\n", location.display_name)
        }
    }
}

pub fn search_outcome(outcome: &SearchOutcome) -> String {
    match outcome {
        SearchOutcome::Found(candidates) => {
            candidates.iter().fold(String::new(), |mut out, c| {
                let _ = writeln!(out, "  {}", c.label());
                out
            })
        }
        other => other.message().map(|m| format!("  {m}\n")).unwrap_or_default(),
    }
}

pub fn report(r: &Report) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "\n📍 {}", r.location.display_name);
    let _ = writeln!(
        out,
        "{}  {}  {}",
        r.condition.icon(),
        r.observation.temperature_label(),
        r.condition.description()
    );
    let _ = writeln!(out, "\nOutfit Recommendation");
    for item in &r.outfit {
        let _ = writeln!(out, "  {item}");
    }
    out
}

pub fn quote(text: &str) -> String {
    format!("\nQuote of the Day\n  {text}\n")
}

pub fn locations(saved: &SavedLocations) -> String {
    if saved.is_empty() {
        return "No saved locations yet.\n".to_string();
    }

    saved.iter().fold(String::new(), |mut out, l| {
        let _ = writeln!(out, "{}  ({}, {})", l.display_name, l.latitude, l.longitude);
        out
    })
}

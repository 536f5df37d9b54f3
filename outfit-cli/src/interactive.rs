use std::fmt;

use anyhow::{Context, Result};
use chrono::Local;
use inquire::{InquireError, Select, Text, error::InquireResult};
use outfit_core::{
    Candidate, ConfigStore, OpenMeteo, SearchOutcome, Session, Settings, extras,
    session::MIN_QUERY_CHARS,
};

use crate::render;

/// Select needs `Display`; show candidates by their full label.
struct Choice(Candidate);

impl fmt::Display for Choice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0.label())
    }
}

/// How the user left a skippable prompt.
enum Answer<T> {
    Given(T),
    Skipped,
    Quit,
}

/// Esc skips, Ctrl-C quits; anything else is a real failure.
fn answer<T>(result: InquireResult<Option<T>>, what: &'static str) -> Result<Answer<T>> {
    match result {
        Ok(Some(value)) => Ok(Answer::Given(value)),
        Ok(None) | Err(InquireError::OperationCanceled) => Ok(Answer::Skipped),
        Err(InquireError::OperationInterrupted) => Ok(Answer::Quit),
        Err(e) => Err(e).context(what),
    }
}

/// The search field shows the active location's name, as it does after a selection.
fn search_field(session: &Session) -> String {
    session.current_location().map(|l| l.display_name.clone()).unwrap_or_default()
}

pub async fn run(settings: &Settings) -> Result<()> {
    let store = ConfigStore::new(settings.state_file_or_local());
    let api = OpenMeteo::from_settings(settings);
    let mut session = Session::open(store, Box::new(api.clone()), Box::new(api));

    if session.needs_name() && !ask_name(&mut session)? {
        return Ok(());
    }
    print!("{}", render::header(session.user_name(), &Local::now()));

    let quote = extras::random_quote();

    if let Some(last) = session.saved_locations().last() {
        print!("{}", render::loading(last));
    }
    if let Some(phase) = session.resume().await {
        print!("{}", render::phase(phase));
    }
    print!("{}", render::quote(quote));

    loop {
        let field = search_field(&session);
        let prompt = Text::new("Search for a city...")
            .with_initial_value(&field)
            .with_help_message("Esc to quit")
            .prompt_skippable();
        let Answer::Given(query) = answer(prompt, "Failed to read search query")? else {
            break;
        };

        let Some(outcome) = session.search(&query).await.cloned() else {
            println!("Type at least {MIN_QUERY_CHARS} characters to search.");
            continue;
        };

        let candidates = match outcome {
            SearchOutcome::Found(candidates) => candidates,
            other => {
                print!("{}", render::search_outcome(&other));
                continue;
            }
        };

        let options = candidates.into_iter().map(Choice).collect();
        let choice = match answer(
            Select::new("Select a location:", options).prompt_skippable(),
            "Failed to read location choice",
        )? {
            Answer::Given(Choice(choice)) => choice,
            Answer::Skipped => continue,
            Answer::Quit => break,
        };

        print!("{}", render::loading(&choice.to_location()));
        let phase = session.select(&choice).await;
        print!("{}", render::phase(phase));
        print!("{}", render::quote(quote));
    }

    Ok(())
}

/// First-run gate. Skipping leaves the name unset so the next run asks again.
/// Returns `false` when the user asked to quit.
fn ask_name(session: &mut Session) -> Result<bool> {
    println!("Welcome!");

    loop {
        let prompt = Text::new("Enter your name").prompt_skippable();
        match answer(prompt, "Failed to read user name")? {
            Answer::Given(name) => {
                if session.set_user_name(&name) {
                    return Ok(true);
                }
            }
            Answer::Skipped => return Ok(true),
            Answer::Quit => return Ok(false),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use outfit_core::Location;

    fn offline_session(dir: &tempfile::TempDir) -> Session {
        let api = OpenMeteo::new("http://127.0.0.1:1/v1/search", "http://127.0.0.1:1/v1/forecast");
        let store = ConfigStore::new(dir.path().join("state.json"));
        Session::open(store, Box::new(api.clone()), Box::new(api))
    }

    #[test]
    fn interrupt_quits_instead_of_failing() {
        let result: InquireResult<Option<String>> = Err(InquireError::OperationInterrupted);
        assert!(matches!(answer(result, "name"), Ok(Answer::Quit)));
    }

    #[test]
    fn escape_skips() {
        assert!(matches!(answer::<String>(Ok(None), "name"), Ok(Answer::Skipped)));
        assert!(matches!(
            answer::<String>(Err(InquireError::OperationCanceled), "name"),
            Ok(Answer::Skipped)
        ));
    }

    #[test]
    fn given_answer_passes_through() {
        let Ok(Answer::Given(name)) = answer(Ok(Some("Ada".to_string())), "name") else {
            panic!("expected an answer");
        };
        assert_eq!(name, "Ada");
    }

    #[test]
    fn other_prompt_errors_are_reported() {
        let err = answer::<String>(Err(InquireError::NotTTY), "Failed to read user name")
            .err()
            .map(|e| e.to_string());
        assert_eq!(err.as_deref(), Some("Failed to read user name"));
    }

    #[test]
    fn search_field_shows_selected_location() {
        let dir = tempfile::tempdir().unwrap();
        let mut session = offline_session(&dir);
        assert_eq!(search_field(&session), "");

        session.begin_load(Location::new("London, England", 51.51, -0.13));
        assert_eq!(search_field(&session), "London, England");
    }
}

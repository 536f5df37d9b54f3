//! One user's session: search, pick a place, fetch its weather, dress for it.
//!
//! Only one location is active at a time. Every weather load is tagged with a
//! [`FetchTicket`]; completing a load with an outdated ticket is a no-op, so a
//! slow response can never overwrite a newer selection.

use crate::{
    classify::Condition,
    model::{Candidate, Location, SavedLocations, UserProfile, WeatherObservation},
    outfit,
    provider::{LocationSearch, ProviderError, WeatherSource},
    store::ConfigStore,
};

/// Shorter queries never reach the geocoder.
pub const MIN_QUERY_CHARS: usize = 3;

pub const NO_RESULTS: &str = "No locations found";
pub const SEARCH_FAILED: &str = "Error fetching locations";
pub const LOADING: &str = "Loading weather data...";
pub const LOAD_FAILED: &str = "Failed to load weather data";
pub const LOAD_FAILED_HINT: &str = "Could not get weather information. Please try again.";

#[derive(Debug, Clone, PartialEq)]
pub enum SearchOutcome {
    Found(Vec<Candidate>),
    NoResults,
    /// The geocoder could not be reached or answered with an error.
    Failed,
}

impl SearchOutcome {
    /// Inline message for outcomes without candidates.
    pub fn message(&self) -> Option<&'static str> {
        match self {
            Self::Found(_) => None,
            Self::NoResults => Some(NO_RESULTS),
            Self::Failed => Some(SEARCH_FAILED),
        }
    }
}

/// Everything the weather and outfit panels show for one location.
#[derive(Debug, Clone)]
pub struct Report {
    pub location: Location,
    pub observation: WeatherObservation,
    pub condition: Condition,
    pub outfit: Vec<&'static str>,
}

impl Report {
    pub fn new(location: Location, observation: WeatherObservation) -> Self {
        let condition = Condition::from_wmo_code(observation.weather_code);
        let outfit = outfit::recommend(observation.temperature);
        Self { location, observation, condition, outfit }
    }
}

#[derive(Debug, Clone)]
pub enum Phase {
    Idle,
    Searching,
    ResultsShown(SearchOutcome),
    Loading(Location),
    Displayed(Report),
    Failed(Location),
}

/// Identifies one weather load. Only the most recent ticket is honoured.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FetchTicket(u64);

#[derive(Debug)]
pub struct Session {
    store: ConfigStore,
    profile: UserProfile,
    saved: SavedLocations,
    phase: Phase,
    current: Option<Location>,
    generation: u64,
    geocoder: Box<dyn LocationSearch>,
    weather: Box<dyn WeatherSource>,
}

impl Session {
    /// Start a session from whatever `store` holds.
    pub fn open(
        store: ConfigStore,
        geocoder: Box<dyn LocationSearch>,
        weather: Box<dyn WeatherSource>,
    ) -> Self {
        let (profile, saved) = store.load();
        tracing::info!(saved = saved.len(), has_name = profile.name.is_some(), "session opened");

        Self {
            store,
            profile,
            saved,
            phase: Phase::Idle,
            current: None,
            generation: 0,
            geocoder,
            weather,
        }
    }

    pub fn phase(&self) -> &Phase {
        &self.phase
    }

    pub fn user_name(&self) -> Option<&str> {
        self.profile.name.as_deref()
    }

    /// True until the first-run name prompt has been answered.
    pub fn needs_name(&self) -> bool {
        self.profile.name.is_none()
    }

    /// Record the user's name once. Blank input and repeat calls are ignored.
    pub fn set_user_name(&mut self, name: &str) -> bool {
        let name = name.trim();
        if name.is_empty() || !self.needs_name() {
            return false;
        }

        self.profile.name = Some(name.to_string());
        self.persist();
        true
    }

    pub fn saved_locations(&self) -> &SavedLocations {
        &self.saved
    }

    pub fn current_location(&self) -> Option<&Location> {
        self.current.as_ref()
    }

    /// Latest successful observation, if the current location has one.
    pub fn observation(&self) -> Option<&WeatherObservation> {
        match &self.phase {
            Phase::Displayed(report) => Some(&report.observation),
            _ => None,
        }
    }

    /// Look up `query`. Returns `None` and hides results when the trimmed
    /// query is too short to search for.
    pub async fn search(&mut self, query: &str) -> Option<&SearchOutcome> {
        // A new search supersedes any load still in flight.
        self.generation += 1;

        let query = query.trim();
        if query.chars().count() < MIN_QUERY_CHARS {
            self.phase = Phase::Idle;
            return None;
        }

        self.phase = Phase::Searching;
        let outcome = match self.geocoder.search(query).await {
            Ok(candidates) if candidates.is_empty() => SearchOutcome::NoResults,
            Ok(candidates) => SearchOutcome::Found(candidates),
            Err(e) => {
                tracing::warn!(query, error = %e, "location search failed");
                SearchOutcome::Failed
            }
        };
        tracing::info!(query, ?outcome, "search finished");
        self.phase = Phase::ResultsShown(outcome);

        match &self.phase {
            Phase::ResultsShown(outcome) => Some(outcome),
            _ => None,
        }
    }

    /// Remember `candidate` and show its weather.
    pub async fn select(&mut self, candidate: &Candidate) -> &Phase {
        let location = candidate.to_location();

        if self.saved.insert(location.clone()) {
            self.persist();
        }

        self.show_location(location).await
    }

    /// Show the most recently saved location, if there is one.
    pub async fn resume(&mut self) -> Option<&Phase> {
        let last = self.saved.last().cloned()?;
        tracing::info!(location = %last.display_name, "resuming last location");
        Some(self.show_location(last).await)
    }

    /// Fetch and display weather for `location`. Failures are final; there
    /// is no retry and no fallback to earlier data.
    pub async fn show_location(&mut self, location: Location) -> &Phase {
        let (latitude, longitude) = (location.latitude, location.longitude);
        let ticket = self.begin_load(location);

        let result = self.weather.current(latitude, longitude).await;
        self.finish_load(ticket, result);

        &self.phase
    }

    /// Enter `Loading` for `location` and drop whatever was displayed.
    pub fn begin_load(&mut self, location: Location) -> FetchTicket {
        self.generation += 1;
        self.current = Some(location.clone());
        self.phase = Phase::Loading(location);
        FetchTicket(self.generation)
    }

    /// Apply the result of a load. Returns `false` if `ticket` is stale and
    /// the result was discarded.
    pub fn finish_load(
        &mut self,
        ticket: FetchTicket,
        result: Result<WeatherObservation, ProviderError>,
    ) -> bool {
        if ticket.0 != self.generation {
            tracing::debug!(ticket = ticket.0, current = self.generation, "discarding stale weather");
            return false;
        }

        let Some(location) = self.current.clone() else {
            return false;
        };

        self.phase = match result {
            Ok(observation) => {
                let report = Report::new(location, observation);
                tracing::info!(
                    location = %report.location.display_name,
                    temperature = ?report.observation.temperature,
                    code = report.observation.weather_code,
                    "weather loaded"
                );
                Phase::Displayed(report)
            }
            Err(e) => {
                tracing::warn!(location = %location.display_name, error = %e, "weather fetch failed");
                Phase::Failed(location)
            }
        };

        true
    }

    fn persist(&self) {
        self.store.save(&self.profile, &self.saved);
    }
}

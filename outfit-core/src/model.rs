use serde::{Deserialize, Serialize};

/// A place the user picked from search results.
///
/// Two locations are the same place when their coordinates match exactly;
/// the display name plays no part in that.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Location {
    #[serde(rename = "name")]
    pub display_name: String,
    pub latitude: f64,
    pub longitude: f64,
}

impl Location {
    pub fn new(display_name: impl Into<String>, latitude: f64, longitude: f64) -> Self {
        Self { display_name: display_name.into(), latitude, longitude }
    }

    pub fn same_place(&self, other: &Location) -> bool {
        self.latitude == other.latitude && self.longitude == other.longitude
    }
}

/// A geocoder hit that has not been selected yet.
#[derive(Debug, Clone, PartialEq)]
pub struct Candidate {
    pub name: String,
    pub admin1: Option<String>,
    pub country: Option<String>,
    pub latitude: f64,
    pub longitude: f64,
}

impl Candidate {
    /// Label used in the results list: `name, admin1, country`.
    pub fn label(&self) -> String {
        join_parts([Some(self.name.as_str()), self.admin1.as_deref(), self.country.as_deref()])
    }

    /// Resolve into the stored form, named `name, admin1`.
    pub fn to_location(&self) -> Location {
        let name = join_parts([Some(self.name.as_str()), self.admin1.as_deref()]);
        Location::new(name, self.latitude, self.longitude)
    }
}

fn join_parts<'a>(parts: impl IntoIterator<Item = Option<&'a str>>) -> String {
    parts
        .into_iter()
        .flatten()
        .map(str::trim)
        .filter(|p| !p.is_empty())
        .collect::<Vec<_>>()
        .join(", ")
}

/// Saved locations in selection order, unique by coordinates.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SavedLocations(Vec<Location>);

impl SavedLocations {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append `location` unless a saved entry has the same coordinates.
    /// Returns whether the list changed.
    pub fn insert(&mut self, location: Location) -> bool {
        if self.0.iter().any(|saved| saved.same_place(&location)) {
            return false;
        }
        self.0.push(location);
        true
    }

    /// Most recently saved location.
    pub fn last(&self) -> Option<&Location> {
        self.0.last()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Location> {
        self.0.iter()
    }
}

impl FromIterator<Location> for SavedLocations {
    fn from_iter<I: IntoIterator<Item = Location>>(iter: I) -> Self {
        let mut saved = SavedLocations::new();
        for location in iter {
            saved.insert(location);
        }
        saved
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UserProfile {
    pub name: Option<String>,
}

/// Hourly series returned next to the current conditions.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct HourlySeries {
    #[serde(default)]
    pub time: Vec<String>,
    #[serde(default)]
    pub temperature_2m: Vec<Option<f64>>,
    #[serde(default)]
    pub weathercode: Vec<Option<i32>>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct WeatherObservation {
    /// Degrees Celsius; `None` when the response carried no reading.
    pub temperature: Option<f64>,
    pub weather_code: i32,
    pub hourly: HourlySeries,
}

impl WeatherObservation {
    pub fn new(temperature: Option<f64>, weather_code: i32) -> Self {
        Self { temperature, weather_code, hourly: HourlySeries::default() }
    }

    /// Temperature as shown in the summary panel, e.g. `27.0°C` or `N/A°C`.
    pub fn temperature_label(&self) -> String {
        match self.temperature {
            Some(t) => format!("{t:.1}°C"),
            None => "N/A°C".to_string(),
        }
    }
}

//! Clothing recommendations by temperature band.

pub const NOT_AVAILABLE: &str = "Temperature data not available";

const HOT: &[&str] = &[
    "🌞 Lightweight, breathable clothing",
    "🩳 Shorts or a skirt",
    "👕 T-shirt",
    "😎 Sunglasses",
    "👡 Sandals",
    "💧 Sunscreen",
];

const MILD: &[&str] =
    &["🌤️ Light layers", "👚 T-shirt", "👖 Jeans", "👟 Sneakers", "🧴 Light jacket"];

const COOL: &[&str] =
    &["🍂 Sweater", "👖 Jeans", "🧥 Light jacket", "👞 Closed shoes", "🧣 Light scarf"];

const COLD: &[&str] = &["❄️ Warm sweater", "🧥 Coat", "🧤 Gloves", "🧦 Warm socks", "🥾 Boots"];

const FREEZING: &[&str] = &[
    "🥶 Thermals",
    "🧥 Heavy coat",
    "🧣 Hat & scarf",
    "🧦 Insulated socks",
    "🥾 Winter boots",
    "🔥 Hand warmers",
];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutfitBand {
    /// Above 25 °C.
    Hot,
    /// 18 to 25 °C inclusive.
    Mild,
    /// 10 up to 18 °C.
    Cool,
    /// 0 up to 10 °C.
    Cold,
    /// Below 0 °C.
    Freezing,
}

impl OutfitBand {
    /// `None` for NaN, which falls in no band.
    pub fn for_temperature(celsius: f64) -> Option<Self> {
        if celsius.is_nan() {
            return None;
        }

        let band = if celsius > 25.0 {
            Self::Hot
        } else if celsius >= 18.0 {
            Self::Mild
        } else if celsius >= 10.0 {
            Self::Cool
        } else if celsius >= 0.0 {
            Self::Cold
        } else {
            Self::Freezing
        };

        Some(band)
    }

    pub fn items(&self) -> &'static [&'static str] {
        match self {
            Self::Hot => HOT,
            Self::Mild => MILD,
            Self::Cool => COOL,
            Self::Cold => COLD,
            Self::Freezing => FREEZING,
        }
    }
}

/// Ordered item labels for `temperature`. Never empty: an unknown reading
/// yields the single [`NOT_AVAILABLE`] placeholder.
pub fn recommend(temperature: Option<f64>) -> Vec<&'static str> {
    match temperature.and_then(OutfitBand::for_temperature) {
        Some(band) => band.items().to_vec(),
        None => vec![NOT_AVAILABLE],
    }
}

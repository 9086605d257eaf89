//! Canned weather for when no API key is configured (or a provider call
//! fails in an unexpected way).

use serde_json::{Value, json};
use toolchat_domain::tool::ToolError;

use super::{Units, round1, title_case};

pub const MOCK_PROVIDER_LABEL: &str = "Mock Data (Set WEATHER_API_KEY for real data)";

const MOCK_NOTE: &str =
    "This is mock data. Get real weather by setting WEATHER_API_KEY environment variable.";

/// (city, celsius, condition, humidity)
const MOCK_CITIES: &[(&str, f64, &str, u8)] = &[
    ("london", 15.0, "Cloudy", 65),
    ("paris", 18.0, "Sunny", 50),
    ("new york", 22.0, "Partly cloudy", 55),
    ("tokyo", 25.0, "Clear", 45),
    ("sydney", 28.0, "Sunny", 60),
    ("berlin", 12.0, "Rainy", 80),
    ("dubai", 35.0, "Sunny", 40),
    ("mumbai", 30.0, "Humid", 75),
    ("cairo", 32.0, "Clear", 30),
    ("moscow", 5.0, "Snow", 70),
];

/// Look up mock weather. `city` may carry a country suffix (`"London,UK"`).
pub fn mock_weather(city: &str, units: Units) -> Result<Value, ToolError> {
    let key = city
        .split(',')
        .next()
        .unwrap_or(city)
        .trim()
        .to_lowercase();

    let Some(&(_, celsius, condition, humidity)) =
        MOCK_CITIES.iter().find(|(name, ..)| *name == key)
    else {
        return Err(ToolError::execution_failed(format!(
            "Mock weather data not available for '{}'. Please set WEATHER_API_KEY for real data.",
            city
        )));
    };

    let temperature = match units {
        Units::Celsius => celsius,
        Units::Fahrenheit => celsius * 9.0 / 5.0 + 32.0,
    };

    Ok(json!({
        "city": title_case(city),
        "temperature": round1(temperature),
        "units": units.as_str(),
        "condition": condition,
        "humidity": humidity,
        "provider": MOCK_PROVIDER_LABEL,
        "note": MOCK_NOTE,
    }))
}

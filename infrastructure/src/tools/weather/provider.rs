//! Weather API providers: request construction and response mapping
//!
//! Each provider answers with its own JSON shape; [`WeatherProvider::parse`]
//! maps it onto one flat report object.

use std::str::FromStr;

use serde_json::{Value, json};

use super::{Units, round1, title_case};

const OPENWEATHERMAP_URL: &str = "https://api.openweathermap.org/data/2.5/weather";
const WEATHERAPI_URL: &str = "https://api.weatherapi.com/v1/current.json";
const VISUALCROSSING_URL: &str =
    "https://weather.visualcrossing.com/VisualCrossingWebServices/rest/services/timeline";

/// Supported weather APIs
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WeatherProvider {
    OpenWeatherMap,
    WeatherApi,
    VisualCrossing,
}

impl WeatherProvider {
    pub const NAMES: [&'static str; 3] = ["openweathermap", "weatherapi", "visualcrossing"];

    pub fn as_str(&self) -> &'static str {
        match self {
            WeatherProvider::OpenWeatherMap => "openweathermap",
            WeatherProvider::WeatherApi => "weatherapi",
            WeatherProvider::VisualCrossing => "visualcrossing",
        }
    }

    /// Name reported in the `provider` field of a weather report
    pub fn display_name(&self) -> &'static str {
        match self {
            WeatherProvider::OpenWeatherMap => "OpenWeatherMap",
            WeatherProvider::WeatherApi => "WeatherAPI",
            WeatherProvider::VisualCrossing => "Visual Crossing",
        }
    }

    /// Where to get a free API key
    pub fn signup_url(&self) -> &'static str {
        match self {
            WeatherProvider::OpenWeatherMap => "https://openweathermap.org/api",
            WeatherProvider::WeatherApi => "https://www.weatherapi.com/signup.aspx",
            WeatherProvider::VisualCrossing => "https://www.visualcrossing.com/weather-api",
        }
    }

    /// Build the current-conditions request for `city`.
    pub fn request(
        &self,
        client: &reqwest::Client,
        city: &str,
        units: Units,
        api_key: &str,
    ) -> Result<reqwest::RequestBuilder, String> {
        let request = match self {
            WeatherProvider::OpenWeatherMap => {
                let api_units = match units {
                    Units::Celsius => "metric",
                    Units::Fahrenheit => "imperial",
                };
                client
                    .get(OPENWEATHERMAP_URL)
                    .query(&[("q", city), ("appid", api_key), ("units", api_units)])
            }
            WeatherProvider::WeatherApi => client
                .get(WEATHERAPI_URL)
                .query(&[("key", api_key), ("q", city), ("aqi", "no")]),
            WeatherProvider::VisualCrossing => {
                let unit_group = match units {
                    Units::Celsius => "metric",
                    Units::Fahrenheit => "us",
                };
                let mut url = reqwest::Url::parse(VISUALCROSSING_URL).map_err(|e| e.to_string())?;
                url.path_segments_mut()
                    .map_err(|_| format!("cannot append a path to {}", VISUALCROSSING_URL))?
                    .push(city);
                client.get(url).query(&[
                    ("key", api_key),
                    ("unitGroup", unit_group),
                    ("include", "current"),
                    ("contentType", "json"),
                ])
            }
        };
        Ok(request)
    }

    /// Map a provider response body onto a weather report.
    ///
    /// Fails with the JSON pointer of the first missing field.
    pub fn parse(&self, body: &Value, units: Units) -> Result<Value, String> {
        match self {
            WeatherProvider::OpenWeatherMap => parse_openweathermap(body, units),
            WeatherProvider::WeatherApi => parse_weatherapi(body, units),
            WeatherProvider::VisualCrossing => parse_visualcrossing(body, units),
        }
    }
}

impl FromStr for WeatherProvider {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "openweathermap" => Ok(WeatherProvider::OpenWeatherMap),
            "weatherapi" => Ok(WeatherProvider::WeatherApi),
            "visualcrossing" => Ok(WeatherProvider::VisualCrossing),
            _ => Err(format!(
                "Unknown provider: {}. Use 'openweathermap', 'weatherapi', or 'visualcrossing'",
                s
            )),
        }
    }
}

impl std::fmt::Display for WeatherProvider {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

fn field<'a>(body: &'a Value, pointer: &str) -> Result<&'a Value, String> {
    body.pointer(pointer)
        .ok_or_else(|| format!("missing field {}", pointer))
}

fn number(body: &Value, pointer: &str) -> Result<f64, String> {
    field(body, pointer)?
        .as_f64()
        .ok_or_else(|| format!("field {} is not a number", pointer))
}

fn text<'a>(body: &'a Value, pointer: &str) -> Result<&'a str, String> {
    field(body, pointer)?
        .as_str()
        .ok_or_else(|| format!("field {} is not a string", pointer))
}

fn optional(body: &Value, pointer: &str) -> Value {
    body.pointer(pointer).cloned().unwrap_or_else(|| json!("N/A"))
}

fn parse_openweathermap(body: &Value, units: Units) -> Result<Value, String> {
    Ok(json!({
        "city": field(body, "/name")?,
        "country": field(body, "/sys/country")?,
        "temperature": round1(number(body, "/main/temp")?),
        "feels_like": round1(number(body, "/main/feels_like")?),
        "units": units.as_str(),
        "condition": title_case(text(body, "/weather/0/description")?),
        "humidity": field(body, "/main/humidity")?,
        "pressure": field(body, "/main/pressure")?,
        "wind_speed": round1(number(body, "/wind/speed")?),
        "clouds": field(body, "/clouds/all")?,
        "visibility": optional(body, "/visibility"),
        "sunrise": field(body, "/sys/sunrise")?,
        "sunset": field(body, "/sys/sunset")?,
        "provider": WeatherProvider::OpenWeatherMap.display_name(),
    }))
}

fn parse_weatherapi(body: &Value, units: Units) -> Result<Value, String> {
    let (temp, feels_like, wind, visibility) = match units {
        Units::Celsius => ("temp_c", "feelslike_c", "wind_kph", "vis_km"),
        Units::Fahrenheit => ("temp_f", "feelslike_f", "wind_mph", "vis_miles"),
    };
    let current = field(body, "/current")?;

    Ok(json!({
        "city": field(body, "/location/name")?,
        "country": field(body, "/location/country")?,
        "temperature": round1(number(current, &format!("/{}", temp))?),
        "feels_like": round1(number(current, &format!("/{}", feels_like))?),
        "units": units.as_str(),
        "condition": field(current, "/condition/text")?,
        "humidity": field(current, "/humidity")?,
        "pressure": field(current, "/pressure_mb")?,
        "wind_speed": round1(number(current, &format!("/{}", wind))?),
        "wind_direction": field(current, "/wind_dir")?,
        "clouds": field(current, "/cloud")?,
        "visibility": field(current, &format!("/{}", visibility))?,
        "uv_index": field(current, "/uv")?,
        "last_updated": field(current, "/last_updated")?,
        "provider": WeatherProvider::WeatherApi.display_name(),
    }))
}

fn parse_visualcrossing(body: &Value, units: Units) -> Result<Value, String> {
    let current = field(body, "/currentConditions")?;

    Ok(json!({
        "city": field(body, "/resolvedAddress")?,
        "temperature": round1(number(current, "/temp")?),
        "feels_like": round1(number(current, "/feelslike")?),
        "units": units.as_str(),
        "condition": field(current, "/conditions")?,
        "humidity": field(current, "/humidity")?,
        "pressure": field(current, "/pressure")?,
        "wind_speed": round1(number(current, "/windspeed")?),
        "wind_direction": optional(current, "/winddir"),
        "clouds": field(current, "/cloudcover")?,
        "visibility": field(current, "/visibility")?,
        "uv_index": optional(current, "/uvindex"),
        "sunrise": optional(current, "/sunrise"),
        "sunset": optional(current, "/sunset"),
        "provider": WeatherProvider::VisualCrossing.display_name(),
    }))
}

//! OpenWeather current-conditions client.
//!
//! One request per fetch, no retries. The response JSON is consumed as
//! `{name, main: {temp, humidity}, wind: {speed}, weather: [{description, icon}]}`;
//! everything else in the body is ignored.

use std::future::Future;
use std::time::Duration;

use serde::Deserialize;
use tracing::{debug, warn};

use crate::error::WeatherError;
use crate::location::Location;

/// OpenWeather current weather endpoint.
pub const DEFAULT_ENDPOINT: &str = "https://api.openweathermap.org/data/2.5/weather";

/// Default request timeout.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

/// The weather fields captured from one successful fetch.
#[derive(Clone, Debug, PartialEq)]
pub struct WeatherSnapshot {
    pub place_name: String,
    pub temperature_celsius: f64,
    pub humidity_percent: i64,
    pub wind_speed_mps: f64,
    pub condition_description: String,
    pub icon_id: String,
}

impl WeatherSnapshot {
    /// Temperature rounded to the nearest degree, e.g. `15°C`.
    pub fn temperature_label(&self) -> String {
        let rounded = self.temperature_celsius.round();
        // Avoid printing "-0°C"
        let rounded = if rounded == 0.0 { 0.0 } else { rounded };
        format!("{}°C", rounded)
    }

    pub fn humidity_label(&self) -> String {
        format!("{}%", self.humidity_percent)
    }

    pub fn wind_label(&self) -> String {
        format!("{} m/s", self.wind_speed_mps)
    }

    /// Condition icon image URL for this snapshot.
    pub fn icon_url(&self) -> String {
        icon_url(&self.icon_id)
    }

    /// A single-cell glyph standing in for the provider's icon image.
    pub fn condition_glyph(&self) -> &'static str {
        let night = self.icon_id.ends_with('n');
        match self.icon_id.get(..2).unwrap_or_default() {
            "01" if night => "☾",
            "01" => "☀",
            "02" => "⛅",
            "03" | "04" => "☁",
            "09" | "10" => "☂",
            "11" => "⚡",
            "13" => "❄",
            "50" => "≋",
            _ => "?",
        }
    }
}

/// Compose the provider's icon image URL for an icon id such as `01d`.
pub fn icon_url(icon_id: &str) -> String {
    format!(
        "https://openweathermap.org/img/wn/{}@2x.png",
        urlencoding::encode(icon_id)
    )
}

#[derive(Debug, Deserialize)]
struct CurrentResponse {
    name: String,
    main: MainReadings,
    wind: WindReadings,
    weather: Vec<Condition>,
}

#[derive(Debug, Deserialize)]
struct MainReadings {
    temp: f64,
    humidity: f64,
}

#[derive(Debug, Deserialize)]
struct WindReadings {
    speed: f64,
}

#[derive(Debug, Deserialize)]
struct Condition {
    description: String,
    icon: String,
}

impl TryFrom<CurrentResponse> for WeatherSnapshot {
    type Error = WeatherError;

    fn try_from(response: CurrentResponse) -> Result<Self, Self::Error> {
        let condition = response
            .weather
            .into_iter()
            .next()
            .ok_or(WeatherError::EmptyConditions)?;
        Ok(Self {
            place_name: response.name,
            temperature_celsius: response.main.temp,
            humidity_percent: response.main.humidity.round() as i64,
            wind_speed_mps: response.wind.speed,
            condition_description: condition.description,
            icon_id: condition.icon,
        })
    }
}

/// Parse a current-conditions response body.
pub fn parse_current(body: &str) -> Result<WeatherSnapshot, WeatherError> {
    let response: CurrentResponse =
        serde_json::from_str(body).map_err(|e| WeatherError::Decode(e.to_string()))?;
    WeatherSnapshot::try_from(response)
}

/// Anything that can produce the current weather at a location.
///
/// The app talks to this trait rather than to [`WeatherClient`] directly so
/// tests can substitute canned or delayed responses.
pub trait WeatherSource: Send + Sync + 'static {
    fn current(
        &self,
        location: Location,
    ) -> impl Future<Output = Result<WeatherSnapshot, WeatherError>> + Send;
}

/// HTTP settings for [`WeatherClient`].
#[derive(Clone, Debug)]
pub struct ClientSettings {
    pub endpoint: String,
    pub api_key: Option<String>,
    pub timeout: Duration,
}

impl Default for ClientSettings {
    fn default() -> Self {
        Self {
            endpoint: DEFAULT_ENDPOINT.to_string(),
            api_key: None,
            timeout: DEFAULT_TIMEOUT,
        }
    }
}

/// reqwest-backed OpenWeather client.
#[derive(Clone, Debug)]
pub struct WeatherClient {
    http: reqwest::Client,
    endpoint: String,
    api_key: Option<String>,
}

impl WeatherClient {
    pub fn new(settings: ClientSettings) -> Result<Self, WeatherError> {
        let http = reqwest::Client::builder()
            .timeout(settings.timeout)
            .build()?;
        let api_key = settings.api_key.filter(|key| !key.trim().is_empty());
        Ok(Self {
            http,
            endpoint: settings.endpoint,
            api_key,
        })
    }

    pub fn has_api_key(&self) -> bool {
        self.api_key.is_some()
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    /// Fetch current conditions. Without an API key this fails immediately
    /// and nothing is sent.
    pub async fn fetch_current(&self, location: Location) -> Result<WeatherSnapshot, WeatherError> {
        let api_key = self.api_key.as_deref().ok_or(WeatherError::MissingApiKey)?;

        debug!(
            lat = location.latitude,
            lon = location.longitude,
            endpoint = %self.endpoint,
            "requesting current weather"
        );

        let response = self
            .http
            .get(&self.endpoint)
            .query(&[
                ("lat", location.latitude.to_string()),
                ("lon", location.longitude.to_string()),
                ("appid", api_key.to_string()),
                ("units", "metric".to_string()),
            ])
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            warn!(%status, "weather provider returned an error status");
            return Err(WeatherError::Status(status));
        }

        let body = response.text().await?;
        parse_current(&body)
    }
}

impl WeatherSource for WeatherClient {
    fn current(
        &self,
        location: Location,
    ) -> impl Future<Output = Result<WeatherSnapshot, WeatherError>> + Send {
        self.fetch_current(location)
    }
}

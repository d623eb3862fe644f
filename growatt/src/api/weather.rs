use serde::{Deserialize, Serialize};

use crate::{
    api::{Api, plant::PlantRequest},
    decimal::DecimalString,
    prelude::*,
};

impl Api {
    #[instrument(skip_all, fields(plant_id = plant_id))]
    pub async fn get_weather(&self, plant_id: &str) -> Result<Weather> {
        info!("fetching…");
        self.post_form("index/getWeatherByPlantId", &PlantRequest::new(plant_id)).await
    }
}

#[must_use]
#[derive(Clone, Debug, PartialEq, Eq, Deserialize, Serialize)]
pub struct Weather {
    pub city: String,

    #[serde(rename = "Week")]
    pub week: String,

    #[serde(rename = "dataStr")]
    pub data_str: String,

    pub data: WeatherData,

    /// Solar irradiance as reported by the vendor.
    pub radiant: DecimalString,

    #[serde(rename = "tempType")]
    pub temperature_type: i32,
}

impl Weather {
    /// Get the first forecast item, which is the one for the plant location.
    #[must_use]
    pub fn current(&self) -> Option<&WeatherItem> {
        self.data.items.first()
    }
}

#[must_use]
#[derive(Clone, Debug, PartialEq, Eq, Deserialize, Serialize)]
pub struct WeatherData {
    #[serde(rename = "HeWeather6")]
    pub items: Vec<WeatherItem>,
}

#[must_use]
#[derive(Clone, Debug, PartialEq, Eq, Deserialize, Serialize)]
pub struct WeatherItem {
    pub now: Conditions,
    pub update: UpdateTime,
    pub basic: Location,
    pub status: String,
}

#[must_use]
#[derive(Clone, Debug, PartialEq, Eq, Deserialize, Serialize)]
pub struct Conditions {
    /// Cloud cover, percent.
    pub cloud: DecimalString,

    #[serde(rename = "hum")]
    pub humidity: DecimalString,

    #[serde(rename = "wind_deg")]
    pub wind_degrees: DecimalString,

    #[serde(rename = "pres")]
    pub pressure: DecimalString,

    #[serde(rename = "pcpn")]
    pub precipitation: DecimalString,

    /// Feels-like temperature.
    #[serde(rename = "fl")]
    pub feels_like: DecimalString,

    #[serde(rename = "tmp")]
    pub temperature: DecimalString,

    #[serde(rename = "wind_sc")]
    pub wind_scale: String,

    #[serde(rename = "cond_txt")]
    pub condition: String,

    #[serde(rename = "wind_dir")]
    pub wind_direction: String,

    #[serde(rename = "wind_spd")]
    pub wind_speed: DecimalString,

    #[serde(rename = "cond_code")]
    pub condition_code: String,
}

#[must_use]
#[derive(Clone, Debug, PartialEq, Eq, Deserialize, Serialize)]
pub struct UpdateTime {
    #[serde(rename = "loc")]
    pub local: String,

    pub utc: String,
}

#[must_use]
#[derive(Clone, Debug, PartialEq, Eq, Deserialize, Serialize)]
pub struct Location {
    #[serde(rename = "ss")]
    pub sunset: String,

    pub admin_area: String,

    #[serde(rename = "toDay")]
    pub today: String,

    pub location: String,
    pub parent_city: String,

    #[serde(rename = "cnty")]
    pub country: String,

    #[serde(rename = "sr")]
    pub sunrise: String,
}

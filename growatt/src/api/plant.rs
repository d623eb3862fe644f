use growatt_quantities::{energy::KilowattHours, power::Kilowatts};
use serde::{Deserialize, Serialize};
use serde_with::serde_as;

use crate::{
    api::{Api, DateRange, session::Device},
    decimal::DecimalString,
    prelude::*,
};

impl Api {
    #[instrument(skip_all)]
    pub async fn get_plant_list(&self) -> Result<Vec<Plant>> {
        info!("fetching…");
        let plants: Vec<Plant> = self.post_form("index/getPlantListTitle", &()).await?;
        info!(n_plants = plants.len(), "fetched");
        Ok(plants)
    }

    #[instrument(skip_all, fields(plant_id = plant_id))]
    pub async fn get_plant_detail(&self, plant_id: &str) -> Result<PlantDetail> {
        info!("fetching…");
        self.post_form("panel/getPlantData", &PlantRequest::new(plant_id)).await
    }

    /// Get today's energy and income from the plant detail, absent values counting as zero.
    #[instrument(skip_all, fields(plant_id = plant_id))]
    pub async fn get_plant_energy_today(&self, plant_id: &str) -> Result<EnergySummary> {
        Ok(EnergySummary::from(&self.get_plant_detail(plant_id).await?))
    }

    #[instrument(skip_all, fields(plant_id = plant_id, start = %range.start, end = %range.end))]
    pub async fn get_plant_energy_history(
        &self,
        plant_id: &str,
        range: DateRange,
    ) -> Result<Vec<EnergyData>> {
        #[derive(Serialize)]
        struct GetPlantEnergyDataRequest<'a> {
            #[serde(flatten)]
            plant: PlantRequest<'a>,

            #[serde(flatten)]
            range: DateRange,
        }

        info!("fetching…");
        self.post_form(
            "panel/getPlantEnergyData",
            &GetPlantEnergyDataRequest { plant: PlantRequest::new(plant_id), range },
        )
        .await
    }

    /// Get the first page of the plant devices.
    ///
    /// A response without a payload means there are no devices.
    #[instrument(skip_all, fields(plant_id = plant_id))]
    pub async fn get_plant_devices(&self, plant_id: &str) -> Result<Vec<Device>> {
        #[derive(Serialize)]
        struct GetDevicesByPlantListRequest<'a> {
            #[serde(rename = "plantId")]
            plant_id: &'a str,

            #[serde(rename = "currPage")]
            page: u32,
        }

        info!("fetching…");
        let devices: Vec<Device> = self
            .post_form_enveloped::<_, DevicePage>(
                "panel/getDevicesByPlantList",
                &GetDevicesByPlantListRequest { plant_id, page: 1 },
            )
            .await?
            .into_option()
            .map(|page| page.devices.into_iter().map(Device::from).collect())
            .unwrap_or_default();
        info!(n_devices = devices.len(), "fetched");
        Ok(devices)
    }
}

#[derive(Serialize)]
pub(crate) struct PlantRequest<'a> {
    #[serde(rename = "plantId")]
    plant_id: &'a str,
}

impl<'a> PlantRequest<'a> {
    pub const fn new(plant_id: &'a str) -> Self {
        Self { plant_id }
    }
}

#[must_use]
#[serde_as]
#[derive(Clone, Debug, PartialEq, Eq, Deserialize, Serialize)]
pub struct Plant {
    pub id: String,

    #[serde(rename = "plantName")]
    pub name: String,

    /// Hour offset, sent either as a number or as a string.
    #[serde_as(as = "serde_with::PickFirst<(_, serde_with::DisplayFromStr)>")]
    pub timezone: i32,
}

#[must_use]
#[derive(Clone, Debug, Default, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PlantDetail {
    pub plant_id: Option<String>,
    pub plant_name: Option<String>,
    pub current_power: Option<Kilowatts>,
    pub today_energy: Option<KilowattHours>,
    pub total_energy: Option<KilowattHours>,
    pub today_income: Option<f64>,
    pub total_income: Option<f64>,
    pub status: Option<String>,
    pub timezone: Option<i32>,
    pub city: Option<String>,
    pub country: Option<String>,
}

#[must_use]
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct EnergySummary {
    pub today_energy: KilowattHours,
    pub today_income: f64,
}

impl From<&PlantDetail> for EnergySummary {
    fn from(detail: &PlantDetail) -> Self {
        Self {
            today_energy: detail.today_energy.unwrap_or(KilowattHours::ZERO),
            today_income: detail.today_income.unwrap_or_default(),
        }
    }
}

#[must_use]
#[derive(Clone, Debug, PartialEq, Deserialize, Serialize)]
pub struct EnergyData {
    pub date: Option<String>,
    pub energy: Option<KilowattHours>,
    pub income: Option<f64>,
}

#[derive(Deserialize)]
struct DevicePage {
    #[serde(rename = "datas")]
    devices: Vec<PlantDevice>,
}

/// Device as listed in the plant device page.
#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct PlantDevice {
    #[serde(rename = "sn")]
    serial_number: String,

    alias: String,
    status: String,
    device_type: Option<String>,
    device_model: Option<String>,
    pac: Option<DecimalString>,
    e_today: Option<DecimalString>,
    e_total: Option<DecimalString>,
    last_update_time: Option<String>,
}

impl From<PlantDevice> for Device {
    fn from(device: PlantDevice) -> Self {
        let extra = [
            ("deviceType", device.device_type.map(serde_json::Value::from)),
            ("deviceModel", device.device_model.map(serde_json::Value::from)),
            ("pac", device.pac.map(|pac| String::from(pac).into())),
            ("eToday", device.e_today.map(|energy| String::from(energy).into())),
            ("eTotal", device.e_total.map(|energy| String::from(energy).into())),
            ("lastUpdateTime", device.last_update_time.map(serde_json::Value::from)),
        ]
        .into_iter()
        .filter_map(|(key, value)| value.map(|value| (key.to_owned(), value)))
        .collect::<serde_json::Map<_, _>>();
        Self {
            id: device.serial_number,
            name: device.alias,
            status: device.status,
            extra: (!extra.is_empty()).then_some(extra),
        }
    }
}

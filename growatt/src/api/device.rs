use serde::{Deserialize, Serialize};

use crate::{
    api::{Api, DateRange},
    decimal::DecimalString,
    prelude::*,
};

#[derive(Serialize)]
struct DeviceRequest<'a> {
    #[serde(rename = "deviceId")]
    device_id: &'a str,
}

impl Api {
    #[instrument(skip_all, fields(device_id = device_id))]
    pub async fn get_device_detail(&self, device_id: &str) -> Result<DeviceDetail> {
        info!("fetching…");
        self.post_form("panel/getDeviceDetail", &DeviceRequest { device_id }).await
    }

    #[instrument(skip_all, fields(device_id = device_id))]
    pub async fn get_device_realtime(&self, device_id: &str) -> Result<RealtimeData> {
        info!("fetching…");
        self.post_form("panel/getDeviceRealtime", &DeviceRequest { device_id }).await
    }

    #[instrument(skip_all, fields(device_id = device_id, start = %range.start, end = %range.end))]
    pub async fn get_device_history(
        &self,
        device_id: &str,
        range: DateRange,
    ) -> Result<Vec<HistoryEntry>> {
        #[derive(Serialize)]
        struct GetDeviceHistoryRequest<'a> {
            #[serde(flatten)]
            device: DeviceRequest<'a>,

            #[serde(flatten)]
            range: DateRange,
        }

        info!("fetching…");
        let entries: Vec<HistoryEntry> = self
            .post_form(
                "panel/getDeviceHistory",
                &GetDeviceHistoryRequest { device: DeviceRequest { device_id }, range },
            )
            .await?;
        info!(n_entries = entries.len(), "fetched");
        Ok(entries)
    }

    #[instrument(skip_all, fields(device_id = device_id))]
    pub async fn get_device_status(&self, device_id: &str) -> Result<DeviceStatus> {
        info!("fetching…");
        self.post_form("panel/getDeviceStatus", &DeviceRequest { device_id }).await
    }

    #[instrument(skip_all, fields(device_id = device_id))]
    pub async fn get_device_alarms(&self, device_id: &str) -> Result<Vec<Alarm>> {
        info!("fetching…");
        let alarms: Vec<Alarm> =
            self.post_form("panel/getDeviceAlarms", &DeviceRequest { device_id }).await?;
        info!(
            n_alarms = alarms.len(),
            n_unresolved = alarms.iter().filter(|alarm| !alarm.is_resolved).count(),
            "fetched",
        );
        Ok(alarms)
    }

    #[instrument(skip_all, fields(device_id = device_id))]
    pub async fn get_battery_state(&self, device_id: &str) -> Result<BatteryState> {
        info!("fetching…");
        self.post_form("panel/getBatteryState", &DeviceRequest { device_id }).await
    }

    #[instrument(skip_all, fields(device_id = device_id))]
    pub async fn get_battery_metrics(&self, device_id: &str) -> Result<BatteryMetrics> {
        info!("fetching…");
        self.post_form("panel/getBatteryMetrics", &DeviceRequest { device_id }).await
    }
}

#[must_use]
#[derive(Clone, Debug, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DeviceDetail {
    pub device_id: String,
    pub device_sn: String,
    pub device_type: String,
    pub device_model: String,
    pub plant_id: String,
    pub plant_name: String,

    /// Rated power, watts.
    pub nominal_power: DecimalString,

    pub location: Option<String>,
    pub timezone: Option<String>,
    pub datalog_sn: Option<String>,
    pub alias: Option<String>,
}

#[must_use]
#[derive(Clone, Debug, PartialEq, Eq, Deserialize, Serialize)]
pub struct RealtimeData {
    #[serde(rename = "deviceId")]
    pub device_id: String,

    /// Current output power, watts.
    #[serde(rename = "pac")]
    pub power: DecimalString,

    #[serde(rename = "eToday")]
    pub energy_today: DecimalString,

    #[serde(rename = "eTotal")]
    pub energy_total: DecimalString,

    #[serde(rename = "lastUpdateTime")]
    pub last_update_time: String,

    pub status: String,
}

#[must_use]
#[derive(Clone, Debug, PartialEq, Eq, Deserialize, Serialize)]
pub struct HistoryEntry {
    pub date: String,
    pub energy: DecimalString,
    pub power: Option<DecimalString>,
}

#[must_use]
#[derive(Clone, Debug, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DeviceStatus {
    pub device_id: String,
    pub status: String,
    pub pto_status: Option<String>,
    pub bdc_status: Option<String>,
    pub last_update_time: String,
}

#[must_use]
#[derive(Clone, Debug, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Alarm {
    pub alarm_id: String,
    pub device_id: String,
    pub alarm_code: String,
    pub alarm_message: String,
    pub alarm_type: String,
    pub timestamp: String,

    #[serde(default)]
    pub is_resolved: bool,
}

#[must_use]
#[derive(Clone, Debug, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BatteryState {
    pub device_id: String,

    #[serde(rename = "soc")]
    pub state_of_charge: DecimalString,

    pub voltage: DecimalString,
    pub current: DecimalString,
    pub power: DecimalString,
    pub temperature: DecimalString,

    /// Vendor status text, such as `charging`.
    pub status: String,

    pub last_update_time: String,
}

#[must_use]
#[derive(Clone, Debug, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BatteryMetrics {
    pub device_id: String,
    pub capacity: DecimalString,
    pub remaining_capacity: DecimalString,
    pub charged_today: DecimalString,
    pub discharged_today: DecimalString,
    pub charged_total: DecimalString,
    pub discharged_total: DecimalString,
    pub cycle_count: DecimalString,
    pub health: DecimalString,
    pub last_update_time: String,
}

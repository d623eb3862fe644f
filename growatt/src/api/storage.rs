//! Storage (battery inverter) charts.

use growatt_quantities::{energy::KilowattHours, percent::Percent, power::Watts};
use serde::{Deserialize, Serialize};

use crate::{api::Api, decimal::DecimalString, prelude::*, series::TimeSeries, snapshot::Snapshot};

#[derive(Serialize)]
struct StorageRequest<'a> {
    #[serde(rename = "plantId")]
    plant_id: &'a str,

    #[serde(rename = "storageSn")]
    storage_sn: &'a str,
}

impl Api {
    #[instrument(skip_all, fields(plant_id = plant_id, storage_sn = storage_sn))]
    pub async fn get_storage_battery_chart(
        &self,
        plant_id: &str,
        storage_sn: &str,
    ) -> Result<BatteryChart> {
        info!("fetching…");
        let chart: BatteryChart = self
            .post_form(
                "panel/storage/getStorageBatChart",
                &StorageRequest { plant_id, storage_sn },
            )
            .await?;
        info!(date = %chart.date, n_samples = chart.soc_chart.capacity.len(), "fetched");
        Ok(chart)
    }

    /// Get the day power charts.
    ///
    /// `date` is a `YYYY-MM-DD` string and is sent as is.
    #[instrument(skip_all, fields(date = date, plant_id = plant_id, storage_sn = storage_sn))]
    pub async fn get_storage_energy_day_chart(
        &self,
        date: &str,
        plant_id: &str,
        storage_sn: &str,
    ) -> Result<EnergyChart> {
        #[derive(Serialize)]
        struct GetStorageEnergyDayChartRequest<'a> {
            date: &'a str,

            #[serde(flatten)]
            storage: StorageRequest<'a>,
        }

        info!("fetching…");
        self.post_form(
            "panel/storage/getStorageEnergyDayChart",
            &GetStorageEnergyDayChartRequest {
                date,
                storage: StorageRequest { plant_id, storage_sn },
            },
        )
        .await
    }

    /// Fetch both storage charts concurrently and fuse them into a snapshot.
    ///
    /// Any fetch failure fails the whole call, no partial snapshot is produced.
    #[instrument(skip_all, fields(date = date, plant_id = plant_id, storage_sn = storage_sn))]
    pub async fn get_realtime_snapshot(
        &self,
        date: &str,
        plant_id: &str,
        storage_sn: &str,
    ) -> Result<Snapshot> {
        let (battery_chart, energy_chart) = tokio::try_join!(
            self.get_storage_battery_chart(plant_id, storage_sn),
            self.get_storage_energy_day_chart(date, plant_id, storage_sn),
        )?;
        Ok(Snapshot::new(date, &battery_chart, &energy_chart))
    }
}

#[must_use]
#[derive(Clone, Debug, PartialEq, Eq, Deserialize, Serialize)]
pub struct BatteryChart {
    pub date: String,

    /// Day labels of the charge/discharge bars.
    #[serde(rename = "cdsTitle")]
    pub cds_title: Vec<String>,

    #[serde(rename = "socChart")]
    pub soc_chart: SocChart,

    #[serde(rename = "cdsData")]
    pub cds_data: CdsData,
}

#[must_use]
#[derive(Clone, Debug, PartialEq, Eq, Deserialize, Serialize)]
pub struct SocChart {
    pub capacity: TimeSeries<Percent>,
}

/// Daily charged and discharged energy, aligned with [`BatteryChart::cds_title`].
#[must_use]
#[derive(Clone, Debug, PartialEq, Eq, Deserialize, Serialize)]
pub struct CdsData {
    #[serde(rename = "cd_charge")]
    pub charge: TimeSeries<KilowattHours>,

    #[serde(rename = "cd_disCharge")]
    pub discharge: TimeSeries<KilowattHours>,
}

#[must_use]
#[derive(Clone, Debug, PartialEq, Eq, Deserialize, Serialize)]
pub struct EnergyChart {
    pub charts: EnergyCharts,

    #[serde(rename = "eCharge")]
    pub energy_charged_today: DecimalString,

    #[serde(rename = "eDisCharge")]
    pub energy_discharged_today: DecimalString,

    #[serde(rename = "eChargeTotal")]
    pub energy_charged_total: DecimalString,

    #[serde(rename = "eDisChargeTotal")]
    pub energy_discharged_total: DecimalString,

    #[serde(rename = "eAcCharge")]
    pub ac_energy_charged_today: DecimalString,

    #[serde(rename = "eAcDisCharge")]
    pub ac_energy_discharged_today: DecimalString,

    pub dtc: i32,
}

/// Power series of the day, in watts.
#[must_use]
#[derive(Clone, Debug, Default, PartialEq, Eq, Deserialize, Serialize)]
pub struct EnergyCharts {
    #[serde(rename = "ppv")]
    pub solar: TimeSeries<Watts>,

    /// Positive when exporting, negative when importing.
    #[serde(rename = "pacToGrid")]
    pub power_to_grid: TimeSeries<Watts>,

    #[serde(rename = "sysOut")]
    pub system_out: TimeSeries<Watts>,

    #[serde(rename = "userLoad")]
    pub user_load: TimeSeries<Watts>,

    #[serde(rename = "pacToUser")]
    pub power_to_user: TimeSeries<Watts>,
}

#[cfg(test)]
mod tests {
    use anyhow::Result;
    use mockito::Matcher;

    use super::*;
    use crate::{api::tests::api, snapshot::BatteryStatus};

    // language=json
    const BATTERY_CHART: &str = r#"{
        "result": 1,
        "obj": {
            "date": "2026-02-08",
            "cdsTitle": ["2026-02-07", "2026-02-08"],
            "socChart": {"capacity": [null, 75, 78.5, 82, 85]},
            "cdsData": {"cd_charge": [5.2, 4.1], "cd_disCharge": [3.8, 2.9]}
        }
    }"#;

    // language=json
    const ENERGY_CHART: &str = r#"{
        "result": 1,
        "obj": {
            "eChargeTotal": "2500.5",
            "charts": {
                "pacToGrid": [null, 10, 20, 30, null],
                "ppv": [null, 100, 110, 120, null],
                "sysOut": [null, 50, 55, 60, null],
                "userLoad": [null, 40, 50, 60, null],
                "pacToUser": [null, 0, 0, 5, null]
            },
            "dtc": 5000,
            "eAcDisCharge": "1.2",
            "eDisCharge": "3.8",
            "eCharge": "5.2",
            "eAcCharge": "0.4",
            "eDisChargeTotal": "2300.2"
        }
    }"#;

    #[tokio::test]
    async fn test_get_storage_battery_chart_ok() -> Result<()> {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("POST", "/panel/storage/getStorageBatChart")
            .match_body(Matcher::AllOf(vec![
                Matcher::UrlEncoded("plantId".into(), "123".into()),
                Matcher::UrlEncoded("storageSn".into(), "SN1".into()),
            ]))
            .with_body(BATTERY_CHART)
            .create_async()
            .await;

        let chart = api(&server).get_storage_battery_chart("123", "SN1").await?;
        assert_eq!(chart.date, "2026-02-08");
        assert_eq!(chart.cds_title.len(), 2);
        assert_eq!(chart.soc_chart.capacity.latest(), Some(Percent(85.0)));
        assert_eq!(chart.cds_data.charge.latest(), Some(KilowattHours(4.1)));
        assert_eq!(chart.cds_data.discharge.latest(), Some(KilowattHours(2.9)));
        mock.assert_async().await;
        Ok(())
    }

    #[tokio::test]
    async fn test_get_storage_battery_chart_without_payload() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("POST", "/panel/storage/getStorageBatChart")
            .with_body(r#"{"result": 0, "obj": null}"#)
            .create_async()
            .await;

        let error = api(&server).get_storage_battery_chart("123", "SN1").await.unwrap_err();
        assert!(matches!(error, Error::Api { code: 0, .. }));
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn test_get_storage_energy_day_chart_ok() -> Result<()> {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("POST", "/panel/storage/getStorageEnergyDayChart")
            .match_body(Matcher::AllOf(vec![
                Matcher::UrlEncoded("date".into(), "2026-02-08".into()),
                Matcher::UrlEncoded("plantId".into(), "123".into()),
                Matcher::UrlEncoded("storageSn".into(), "SN1".into()),
            ]))
            .with_body(ENERGY_CHART)
            .create_async()
            .await;

        let chart = api(&server).get_storage_energy_day_chart("2026-02-08", "123", "SN1").await?;
        assert_eq!(chart.energy_charged_total.as_str(), "2500.5");
        assert_eq!(chart.energy_discharged_total.as_str(), "2300.2");
        assert_eq!(chart.dtc, 5000);
        assert_eq!(chart.charts.solar.len(), 5);
        assert_eq!(chart.charts.system_out.latest(), Some(Watts(60.0)));
        mock.assert_async().await;
        Ok(())
    }

    #[tokio::test]
    async fn test_get_realtime_snapshot_ok() -> Result<()> {
        let mut server = mockito::Server::new_async().await;
        let battery_mock = server
            .mock("POST", "/panel/storage/getStorageBatChart")
            .with_body(BATTERY_CHART)
            .create_async()
            .await;
        let energy_mock = server
            .mock("POST", "/panel/storage/getStorageEnergyDayChart")
            .with_body(ENERGY_CHART)
            .create_async()
            .await;

        let snapshot = api(&server).get_realtime_snapshot("2026-02-08", "123", "SN1").await?;
        assert_eq!(snapshot.timestamp, "2026-02-08");
        assert_eq!(snapshot.solar.current_power, Some(Watts(120.0)));
        assert_eq!(snapshot.battery.state_of_charge, Some(Percent(85.0)));
        assert_eq!(snapshot.battery.power, Some(Watts(-5.0)));
        assert_eq!(snapshot.battery.status, BatteryStatus::Discharging);
        assert_eq!(snapshot.grid.power_to_grid, Some(Watts(30.0)));
        assert_eq!(snapshot.consumption.power_from_battery, Some(Watts(5.0)));
        battery_mock.assert_async().await;
        energy_mock.assert_async().await;
        Ok(())
    }

    #[tokio::test]
    async fn test_get_realtime_snapshot_fails_on_any_chart() {
        let mut server = mockito::Server::new_async().await;
        let _battery_mock = server
            .mock("POST", "/panel/storage/getStorageBatChart")
            .with_body(BATTERY_CHART)
            .create_async()
            .await;
        let _energy_mock = server
            .mock("POST", "/panel/storage/getStorageEnergyDayChart")
            .with_status(500)
            .create_async()
            .await;

        let error = api(&server).get_realtime_snapshot("2026-02-08", "123", "SN1").await.unwrap_err();
        assert!(matches!(error, Error::Status { .. }));
        assert!(error.is_fetch_error());
    }
}

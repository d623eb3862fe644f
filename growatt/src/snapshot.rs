//! Point-in-time system snapshot fused from the storage charts.

mod battery;
mod grid;

use growatt_quantities::power::Watts;
use serde::{Deserialize, Serialize};

pub use self::{
    battery::{Battery, BatteryStatus, estimate_power as estimate_battery_power},
    grid::Grid,
};
use crate::{
    api::storage::{BatteryChart, EnergyChart, EnergyCharts},
    decimal::DecimalString,
    prelude::*,
};

#[must_use]
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Snapshot {
    /// Caller-supplied date, passed through as is.
    pub timestamp: String,

    pub solar: Solar,
    pub battery: Battery,
    pub grid: Grid,
    pub consumption: Consumption,
}

#[must_use]
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Solar {
    pub current_power: Option<Watts>,
    pub energy_today: DecimalString,
    pub energy_total: DecimalString,
}

#[must_use]
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Consumption {
    pub current_load: Option<Watts>,
    pub power_from_solar: Option<Watts>,
    pub power_from_battery: Option<Watts>,
}

/// Latest known sample of each energy chart series.
///
/// Each series is looked up independently, so the values may come from different slots.
#[must_use]
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct LatestPower {
    pub solar: Option<Watts>,
    pub power_to_grid: Option<Watts>,
    pub system_out: Option<Watts>,
    pub user_load: Option<Watts>,
    pub power_to_user: Option<Watts>,
}

impl From<&EnergyCharts> for LatestPower {
    fn from(charts: &EnergyCharts) -> Self {
        Self {
            solar: charts.solar.latest(),
            power_to_grid: charts.power_to_grid.latest(),
            system_out: charts.system_out.latest(),
            user_load: charts.user_load.latest(),
            power_to_user: charts.power_to_user.latest(),
        }
    }
}

impl Snapshot {
    /// Fuse the battery and energy charts into a snapshot.
    ///
    /// This is a pure function of its inputs: missing samples turn into missing fields.
    #[instrument(skip_all, level = Level::DEBUG, fields(date = date))]
    pub fn new(date: &str, battery_chart: &BatteryChart, energy_chart: &EnergyChart) -> Self {
        let latest = LatestPower::from(&energy_chart.charts);
        let state_of_charge = battery_chart.soc_chart.capacity.latest();
        trace!(?latest, ?state_of_charge, "latest samples");

        let battery_power = estimate_battery_power(&latest);
        let battery_status = BatteryStatus::from(battery_power);
        debug!(?battery_power, %battery_status, "estimated the battery power");

        Self {
            timestamp: date.to_owned(),
            solar: Solar {
                current_power: latest.solar,
                energy_today: energy_chart.energy_charged_today.clone(),
                energy_total: energy_chart.energy_charged_total.clone(),
            },
            battery: Battery {
                state_of_charge,
                power: battery_power,
                status: battery_status,
                charged_today: energy_chart.energy_charged_today.clone(),
                discharged_today: energy_chart.energy_discharged_today.clone(),
            },
            grid: Grid::from_net_power(latest.power_to_grid),
            consumption: Consumption {
                current_load: latest.user_load,
                power_from_solar: latest.solar,
                power_from_battery: battery_power
                    .filter(|power| power.is_negative())
                    .map(|power| -power),
            },
        }
    }

    /// Same as [`Self::new`], but for charts that may not have been obtained.
    ///
    /// A missing chart object is an invalid input, unlike missing samples within a chart.
    pub fn try_new(
        date: &str,
        battery_chart: Option<&BatteryChart>,
        energy_chart: Option<&EnergyChart>,
    ) -> Result<Self> {
        let battery_chart = battery_chart.ok_or(Error::InvalidInput("missing battery chart"))?;
        let energy_chart = energy_chart.ok_or(Error::InvalidInput("missing energy chart"))?;
        Ok(Self::new(date, battery_chart, energy_chart))
    }
}

#[cfg(test)]
mod tests {
    use anyhow::Result;
    use growatt_quantities::percent::Percent;

    use super::*;
    use crate::series::TimeSeries;

    // language=json
    const BATTERY_CHART: &str = r#"{
        "date": "2026-02-08",
        "cdsTitle": ["2026-02-07", "2026-02-08"],
        "socChart": {
            "capacity": [null, 75, 78.5, 82, 85]
        },
        "cdsData": {
            "cd_charge": [5.2, 4.1],
            "cd_disCharge": [3.8, 2.9]
        }
    }"#;

    // language=json
    const ENERGY_CHART: &str = r#"{
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
        "eCharge": "5.20",
        "eAcCharge": "0.4",
        "eDisChargeTotal": "2300.2"
    }"#;

    fn energy_chart(charts: EnergyCharts) -> EnergyChart {
        EnergyChart {
            charts,
            energy_charged_today: DecimalString::from("1.0"),
            energy_discharged_today: DecimalString::from("2.0"),
            energy_charged_total: DecimalString::from("3.0"),
            energy_discharged_total: DecimalString::from("4.0"),
            ac_energy_charged_today: DecimalString::from("0"),
            ac_energy_discharged_today: DecimalString::from("0"),
            dtc: 0,
        }
    }

    fn battery_chart(capacity: TimeSeries<Percent>) -> BatteryChart {
        serde_json::from_value(serde_json::json!({
            "date": "2026-02-08",
            "cdsTitle": [],
            "socChart": { "capacity": capacity },
            "cdsData": { "cd_charge": [], "cd_disCharge": [] },
        }))
        .unwrap()
    }

    #[test]
    fn test_vendor_fixture() -> Result<()> {
        let battery_chart: BatteryChart = serde_json::from_str(BATTERY_CHART)?;
        let energy_chart: EnergyChart = serde_json::from_str(ENERGY_CHART)?;
        let snapshot = Snapshot::new("2026-02-08", &battery_chart, &energy_chart);

        assert_eq!(snapshot.timestamp, "2026-02-08");

        assert_eq!(snapshot.solar.current_power, Some(Watts(120.0)));
        assert_eq!(snapshot.solar.energy_today.as_str(), "5.20");
        assert_eq!(snapshot.solar.energy_total.as_str(), "2500.5");

        assert_eq!(snapshot.battery.state_of_charge, Some(Percent(85.0)));
        assert_eq!(snapshot.battery.power, Some(Watts(-5.0)));
        assert_eq!(snapshot.battery.status, BatteryStatus::Discharging);
        assert_eq!(snapshot.battery.charged_today.as_str(), "5.20");
        assert_eq!(snapshot.battery.discharged_today.as_str(), "3.8");

        assert_eq!(snapshot.grid.net_power, Watts(30.0));
        assert_eq!(snapshot.grid.power_to_grid, Some(Watts(30.0)));
        assert_eq!(snapshot.grid.power_from_grid, None);

        assert_eq!(snapshot.consumption.current_load, Some(Watts(60.0)));
        assert_eq!(snapshot.consumption.power_from_solar, Some(Watts(120.0)));
        assert_eq!(snapshot.consumption.power_from_battery, Some(Watts(5.0)));
        Ok(())
    }

    #[test]
    fn test_idempotent() -> Result<()> {
        let battery_chart: BatteryChart = serde_json::from_str(BATTERY_CHART)?;
        let energy_chart: EnergyChart = serde_json::from_str(ENERGY_CHART)?;
        assert_eq!(
            Snapshot::new("2026-02-08", &battery_chart, &energy_chart),
            Snapshot::new("2026-02-08", &battery_chart, &energy_chart),
        );
        Ok(())
    }

    #[test]
    fn test_empty_charts() {
        let snapshot = Snapshot::new(
            "2026-02-08",
            &battery_chart(TimeSeries::default()),
            &energy_chart(EnergyCharts::default()),
        );
        assert_eq!(snapshot.solar.current_power, None);
        assert_eq!(snapshot.battery.state_of_charge, None);
        assert_eq!(snapshot.battery.power, None);
        assert_eq!(snapshot.battery.status, BatteryStatus::Idle);
        assert_eq!(snapshot.grid.net_power, Watts::ZERO);
        assert_eq!(snapshot.grid.power_to_grid, None);
        assert_eq!(snapshot.grid.power_from_grid, None);
        assert_eq!(
            snapshot.consumption,
            Consumption { current_load: None, power_from_solar: None, power_from_battery: None },
        );
        assert_eq!(snapshot.solar.energy_today.as_str(), "1.0");
        assert_eq!(snapshot.solar.energy_total.as_str(), "3.0");
    }

    #[test]
    fn test_charging_from_excess_solar_while_importing() {
        let charts = EnergyCharts {
            solar: vec![Some(Watts(900.0)), None].into(),
            power_to_grid: vec![Some(Watts(-100.0))].into(),
            user_load: vec![None, Some(Watts(300.0)), None].into(),
            ..EnergyCharts::default()
        };
        let snapshot = Snapshot::new(
            "2026-02-08",
            &battery_chart(vec![Some(Percent(40.0))].into()),
            &energy_chart(charts),
        );
        assert_eq!(snapshot.battery.power, Some(Watts(700.0)));
        assert_eq!(snapshot.battery.status, BatteryStatus::Charging);
        assert_eq!(snapshot.consumption.power_from_battery, None);
        assert_eq!(snapshot.grid.power_from_grid, Some(Watts(100.0)));
        assert_eq!(snapshot.grid.power_to_grid, None);
    }

    #[test]
    fn test_try_new_missing_chart() {
        let energy_chart = energy_chart(EnergyCharts::default());
        let error = Snapshot::try_new("2026-02-08", None, Some(&energy_chart)).unwrap_err();
        assert!(matches!(error, Error::InvalidInput(_)));
        assert!(!error.is_fetch_error());

        let battery_chart = battery_chart(TimeSeries::default());
        let error = Snapshot::try_new("2026-02-08", Some(&battery_chart), None).unwrap_err();
        assert!(matches!(error, Error::InvalidInput(_)));
    }

    #[test]
    fn test_try_new_ok() {
        let battery_chart = battery_chart(vec![Some(Percent(50.0))].into());
        let energy_chart = energy_chart(EnergyCharts::default());
        let snapshot =
            Snapshot::try_new("2026-02-08", Some(&battery_chart), Some(&energy_chart)).unwrap();
        assert_eq!(snapshot, Snapshot::new("2026-02-08", &battery_chart, &energy_chart));
    }

    #[test]
    fn test_serialize_camel_case() -> Result<()> {
        let battery_chart: BatteryChart = serde_json::from_str(BATTERY_CHART)?;
        let energy_chart: EnergyChart = serde_json::from_str(ENERGY_CHART)?;
        let snapshot = Snapshot::new("2026-02-08", &battery_chart, &energy_chart);
        let value = serde_json::to_value(snapshot)?;
        assert_eq!(value["battery"]["stateOfCharge"], 85.0);
        assert_eq!(value["battery"]["status"], "discharging");
        assert_eq!(value["grid"]["powerFromGrid"], serde_json::Value::Null);
        assert_eq!(value["solar"]["energyToday"], "5.20");
        Ok(())
    }
}

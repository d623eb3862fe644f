use growatt_quantities::{percent::Percent, power::Watts};
use serde::{Deserialize, Serialize};

use crate::{decimal::DecimalString, snapshot::LatestPower};

#[must_use]
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Battery {
    pub state_of_charge: Option<Percent>,

    /// Estimated battery power: positive when charging, negative when discharging.
    pub power: Option<Watts>,

    pub status: BatteryStatus,
    pub charged_today: DecimalString,
    pub discharged_today: DecimalString,
}

#[must_use]
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize, derive_more::Display)]
#[serde(rename_all = "lowercase")]
pub enum BatteryStatus {
    #[display("charging")]
    Charging,

    #[display("discharging")]
    Discharging,

    #[display("idle")]
    Idle,
}

impl From<Option<Watts>> for BatteryStatus {
    fn from(power: Option<Watts>) -> Self {
        match power {
            Some(power) if power.is_positive() => Self::Charging,
            Some(power) if power.is_negative() => Self::Discharging,
            _ => Self::Idle,
        }
    }
}

/// Estimate the battery power from the indirect power flows.
///
/// There is no battery power telemetry in the charts, so this is a heuristic:
///
/// 1. Any power delivered to the user from storage means the battery is discharging at that rate.
/// 2. Otherwise, solar surplus strictly exceeding the grid export is assumed to charge the battery.
/// 3. Anything else is indeterminate.
#[must_use]
pub fn estimate_power(latest: &LatestPower) -> Option<Watts> {
    if let Some(power_to_user) = latest.power_to_user
        && power_to_user.is_positive()
    {
        return Some(-power_to_user);
    }
    let (Some(power_to_grid), Some(solar), Some(user_load)) =
        (latest.power_to_grid, latest.solar, latest.user_load)
    else {
        return None;
    };
    let excess_solar = solar - user_load;
    (excess_solar > power_to_grid).then(|| excess_solar - power_to_grid)
}

use growatt_quantities::power::Watts;
use serde::{Deserialize, Serialize};

#[must_use]
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Grid {
    /// Exported power, present only when the net power is positive.
    pub power_to_grid: Option<Watts>,

    /// Imported power, present only when the net power is negative.
    pub power_from_grid: Option<Watts>,

    /// Signed net power: positive when exporting, negative when importing.
    pub net_power: Watts,
}

impl Grid {
    /// Split the signed net grid power into the mutually exclusive export and import.
    ///
    /// A missing sample counts as zero net flow.
    pub fn from_net_power(net_power: Option<Watts>) -> Self {
        let net_power = net_power.unwrap_or(Watts::ZERO);
        Self {
            power_to_grid: net_power.is_positive().then_some(net_power),
            power_from_grid: net_power.is_negative().then(|| -net_power),
            net_power,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_sample() {
        assert_eq!(
            Grid::from_net_power(None),
            Grid { power_to_grid: None, power_from_grid: None, net_power: Watts::ZERO },
        );
    }

    #[test]
    fn test_import() {
        assert_eq!(
            Grid::from_net_power(Some(Watts(-15.0))),
            Grid { power_to_grid: None, power_from_grid: Some(Watts(15.0)), net_power: Watts(-15.0) },
        );
    }

    #[test]
    fn test_export() {
        assert_eq!(
            Grid::from_net_power(Some(Watts(15.0))),
            Grid { power_to_grid: Some(Watts(15.0)), power_from_grid: None, net_power: Watts(15.0) },
        );
    }

    #[test]
    fn test_exact_zero() {
        let grid = Grid::from_net_power(Some(Watts::ZERO));
        assert_eq!(grid.power_to_grid, None);
        assert_eq!(grid.power_from_grid, None);
        assert_eq!(grid.net_power, Watts::ZERO);
    }
}

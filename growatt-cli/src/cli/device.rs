use clap::{Parser, Subcommand};

use crate::{
    cli::{ApiArgs, RangeArgs},
    prelude::*,
    tables::{build_alarms_table, build_device_history_table, build_properties_table},
};

#[derive(Parser)]
pub struct DeviceArgs {
    #[clap(flatten)]
    api: ApiArgs,

    #[clap(long, env = "GROWATT_DEVICE_ID")]
    device_id: String,

    #[command(subcommand)]
    command: DeviceCommand,
}

#[derive(Subcommand)]
enum DeviceCommand {
    /// Device model and location.
    Detail,

    /// Current output and today's energy.
    Realtime,

    /// Online and component statuses.
    Status,

    /// Device alarms.
    Alarms,

    /// Battery state of charge, voltage, current, and temperature.
    BatteryState,

    /// Battery capacity, throughput, and health.
    BatteryMetrics,

    /// Daily energy history.
    History(RangeArgs),
}

impl DeviceArgs {
    #[instrument(skip_all, fields(device_id = %self.device_id))]
    pub async fn run(self) -> Result {
        let api = self.api.connect().await?;
        let device_id = self.device_id.as_str();
        let table = match self.command {
            DeviceCommand::Detail => {
                build_properties_table(&api.get_device_detail(device_id).await?)?
            }
            DeviceCommand::Realtime => {
                build_properties_table(&api.get_device_realtime(device_id).await?)?
            }
            DeviceCommand::Status => {
                build_properties_table(&api.get_device_status(device_id).await?)?
            }
            DeviceCommand::Alarms => build_alarms_table(&api.get_device_alarms(device_id).await?),
            DeviceCommand::BatteryState => {
                build_properties_table(&api.get_battery_state(device_id).await?)?
            }
            DeviceCommand::BatteryMetrics => {
                build_properties_table(&api.get_battery_metrics(device_id).await?)?
            }
            DeviceCommand::History(range) => build_device_history_table(
                &api.get_device_history(device_id, range.try_into()?).await?,
            ),
        };
        println!("{table}");
        Ok(())
    }
}

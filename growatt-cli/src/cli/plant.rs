use clap::{Parser, Subcommand};

use crate::{
    cli::{ApiArgs, RangeArgs},
    prelude::*,
    tables::{
        build_devices_table,
        build_energy_history_table,
        build_energy_summary_table,
        build_properties_table,
        build_weather_table,
    },
};

#[derive(Parser)]
pub struct PlantArgs {
    #[clap(flatten)]
    api: ApiArgs,

    #[clap(long, env = "GROWATT_PLANT_ID")]
    plant_id: String,

    #[command(subcommand)]
    command: PlantCommand,
}

#[derive(Subcommand)]
enum PlantCommand {
    /// Plant overview.
    Detail,

    /// Devices attached to the plant.
    Devices,

    /// Energy produced and income earned today.
    EnergyToday,

    /// Daily energy history.
    EnergyHistory(RangeArgs),

    /// Current weather at the plant location.
    Weather,
}

impl PlantArgs {
    #[instrument(skip_all, fields(plant_id = %self.plant_id))]
    pub async fn run(self) -> Result {
        let api = self.api.connect().await?;
        let plant_id = self.plant_id.as_str();
        let table = match self.command {
            PlantCommand::Detail => build_properties_table(&api.get_plant_detail(plant_id).await?)?,
            PlantCommand::Devices => build_devices_table(&api.get_plant_devices(plant_id).await?),
            PlantCommand::EnergyToday => {
                build_energy_summary_table(&api.get_plant_energy_today(plant_id).await?)
            }
            PlantCommand::EnergyHistory(range) => build_energy_history_table(
                &api.get_plant_energy_history(plant_id, range.try_into()?).await?,
            ),
            PlantCommand::Weather => build_weather_table(&api.get_weather(plant_id).await?),
        };
        println!("{table}");
        Ok(())
    }
}

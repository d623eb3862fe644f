use chrono::{Local, NaiveDate};
use clap::Parser;

use crate::{cli::ApiArgs, prelude::*, tables::build_snapshot_table};

#[derive(Parser)]
pub struct SnapshotArgs {
    #[clap(flatten)]
    api: ApiArgs,

    #[clap(long, env = "GROWATT_PLANT_ID")]
    plant_id: String,

    /// Storage (battery inverter) serial number.
    #[clap(long, alias = "serial", env = "GROWATT_STORAGE_SN")]
    storage_sn: String,

    /// Chart date, defaults to today.
    #[clap(long)]
    date: Option<NaiveDate>,

    /// Print JSON instead of a table.
    #[clap(long)]
    json: bool,
}

impl SnapshotArgs {
    #[instrument(skip_all, fields(plant_id = %self.plant_id, storage_sn = %self.storage_sn))]
    pub async fn run(self) -> Result {
        let date = self.date.unwrap_or_else(|| Local::now().date_naive()).to_string();
        let snapshot = self
            .api
            .connect()
            .await?
            .get_realtime_snapshot(&date, &self.plant_id, &self.storage_sn)
            .await
            .context("failed to fetch the snapshot")?;
        info!(status = %snapshot.battery.status, "fetched");
        if self.json {
            println!("{}", serde_json::to_string_pretty(&snapshot)?);
        } else {
            println!("{}", build_snapshot_table(&snapshot));
        }
        Ok(())
    }
}

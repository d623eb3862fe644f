mod device;
mod plant;
mod snapshot;

use chrono::NaiveDate;
use clap::{Parser, Subcommand};
use growatt::{Api, DEFAULT_BASE_URL, DateRange};

use crate::{
    cli::{device::DeviceArgs, plant::PlantArgs, snapshot::SnapshotArgs},
    prelude::*,
    tables::build_plants_table,
};

#[derive(Parser)]
#[command(author, version, about, propagate_version = true)]
#[must_use]
pub struct Args {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand)]
pub enum Command {
    /// Show the current solar, battery, grid, and consumption power flows.
    #[clap(name = "snapshot")]
    Snapshot(Box<SnapshotArgs>),

    /// List the plants of the account.
    #[clap(name = "plants")]
    Plants(ApiArgs),

    /// Plant information.
    #[clap(name = "plant")]
    Plant(Box<PlantArgs>),

    /// Device information.
    #[clap(name = "device")]
    Device(Box<DeviceArgs>),
}

impl Command {
    pub async fn run(self) -> Result {
        match self {
            Self::Snapshot(args) => args.run().await,
            Self::Plants(args) => {
                let plants = args.connect().await?.get_plant_list().await?;
                println!("{}", build_plants_table(&plants));
                Ok(())
            }
            Self::Plant(args) => args.run().await,
            Self::Device(args) => args.run().await,
        }
    }
}

#[derive(Parser)]
pub struct ApiArgs {
    #[clap(long, env = "GROWATT_BASE_URL", default_value = DEFAULT_BASE_URL)]
    pub base_url: String,

    #[clap(long, env = "GROWATT_USERNAME", requires = "password")]
    pub username: Option<String>,

    #[clap(long, env = "GROWATT_PASSWORD", hide_env_values = true)]
    pub password: Option<String>,
}

impl ApiArgs {
    /// Build the client and log in, if the credentials are given.
    pub async fn connect(&self) -> Result<Api> {
        let api = Api::builder()
            .base_url(&self.base_url)
            .build()
            .context("failed to build the Growatt client")?;
        if let Some(username) = &self.username
            && let Some(password) = &self.password
        {
            let auth = api.login(username, password).await.context("failed to log in")?;
            debug!(expires_in = auth.expires_in, "session established");
        } else {
            warn!("no credentials given, relying on the server to accept anonymous calls");
        }
        Ok(api)
    }
}

#[derive(Copy, Clone, Parser)]
pub struct RangeArgs {
    /// First day, inclusive.
    #[clap(long)]
    pub from: NaiveDate,

    /// Last day, inclusive.
    #[clap(long)]
    pub until: NaiveDate,
}

impl TryFrom<RangeArgs> for DateRange {
    type Error = Error;

    fn try_from(args: RangeArgs) -> Result<Self> {
        ensure!(args.from <= args.until, "`--from` must not be after `--until`");
        Ok(Self { start: args.from, end: args.until })
    }
}

#[cfg(test)]
mod tests {
    use clap::CommandFactory;

    use super::*;

    #[test]
    fn test_args_ok() {
        Args::command().debug_assert();
    }

    #[tokio::test]
    async fn test_connect_logs_in() -> Result {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("POST", "/login")
            // language=json
            .with_body(r#"{"token": "abc123", "expiresIn": 3600}"#)
            .create_async()
            .await;

        let args = ApiArgs {
            base_url: server.url(),
            username: Some("u".to_owned()),
            password: Some("p".to_owned()),
        };
        let _ = args.connect().await?;
        mock.assert_async().await;
        Ok(())
    }

    #[tokio::test]
    async fn test_connect_without_credentials() -> Result {
        let mut server = mockito::Server::new_async().await;
        let mock = server.mock("POST", "/login").expect(0).create_async().await;

        let args = ApiArgs { base_url: server.url(), username: None, password: None };
        let _ = args.connect().await?;
        mock.assert_async().await;
        Ok(())
    }

    #[test]
    fn test_range_ok() -> Result {
        let args = RangeArgs {
            from: NaiveDate::from_ymd_opt(2026, 2, 1).unwrap(),
            until: NaiveDate::from_ymd_opt(2026, 2, 8).unwrap(),
        };
        let range = DateRange::try_from(args)?;
        assert_eq!(range.start, args.from);
        assert_eq!(range.end, args.until);
        Ok(())
    }

    #[test]
    fn test_range_reversed() {
        let args = RangeArgs {
            from: NaiveDate::from_ymd_opt(2026, 2, 8).unwrap(),
            until: NaiveDate::from_ymd_opt(2026, 2, 1).unwrap(),
        };
        assert!(DateRange::try_from(args).is_err());
    }

    #[test]
    fn test_parse_snapshot() {
        let args = Args::try_parse_from([
            "growatt",
            "snapshot",
            "--plant-id",
            "123",
            "--storage-sn",
            "SN1",
            "--date",
            "2026-02-08",
            "--json",
        ]);
        assert!(args.is_ok());
    }
}

#![doc = include_str!("../../README.md")]

pub mod api;
mod decimal;
mod error;
mod prelude;
pub mod series;
pub mod snapshot;

pub use growatt_quantities as quantities;

pub use self::{
    api::{Api, DEFAULT_BASE_URL, DateRange},
    decimal::DecimalString,
    error::{Error, Result},
    series::TimeSeries,
    snapshot::Snapshot,
};

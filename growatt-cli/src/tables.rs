use std::fmt::Display;

use comfy_table::{Attribute, Cell, CellAlignment, Color, Table, modifiers, presets};
use growatt::{
    api::{
        device::{Alarm, HistoryEntry},
        plant::{EnergyData, EnergySummary, Plant},
        session::Device,
        weather::Weather,
    },
    quantities::power::Watts,
    snapshot::{BatteryStatus, Snapshot},
};
use serde::Serialize;

use crate::prelude::*;

fn new_table() -> Table {
    let mut table = Table::new();
    table
        .load_preset(presets::UTF8_FULL_CONDENSED)
        .apply_modifier(modifiers::UTF8_ROUND_CORNERS)
        .enforce_styling();
    table
}

/// Right-aligned cell with a dimmed dash for missing values.
fn optional_cell(value: Option<impl Display>) -> Cell {
    value.map_or_else(
        || Cell::new("–").add_attribute(Attribute::Dim).set_alignment(CellAlignment::Right),
        |value| Cell::new(value).set_alignment(CellAlignment::Right),
    )
}

const fn status_color(status: BatteryStatus) -> Color {
    match status {
        BatteryStatus::Charging => Color::Green,
        BatteryStatus::Discharging => Color::DarkYellow,
        BatteryStatus::Idle => Color::Reset,
    }
}

pub fn build_snapshot_table(snapshot: &Snapshot) -> Table {
    let mut table = new_table();
    table.set_header(vec!["", "", "Value"]);
    let rows: [(&str, &str, Cell); 14] = [
        ("Solar", "Power", optional_cell(snapshot.solar.current_power)),
        ("", "Today", Cell::new(&snapshot.solar.energy_today).set_alignment(CellAlignment::Right)),
        ("", "Total", Cell::new(&snapshot.solar.energy_total).set_alignment(CellAlignment::Right)),
        ("Battery", "Charge", optional_cell(snapshot.battery.state_of_charge)),
        ("", "Power", optional_cell(snapshot.battery.power)),
        (
            "",
            "Status",
            Cell::new(snapshot.battery.status)
                .fg(status_color(snapshot.battery.status))
                .set_alignment(CellAlignment::Right),
        ),
        (
            "",
            "Charged",
            Cell::new(&snapshot.battery.charged_today).set_alignment(CellAlignment::Right),
        ),
        (
            "",
            "Discharged",
            Cell::new(&snapshot.battery.discharged_today).set_alignment(CellAlignment::Right),
        ),
        (
            "Grid",
            "Net",
            Cell::new(snapshot.grid.net_power).set_alignment(CellAlignment::Right).fg(
                if snapshot.grid.net_power < Watts::ZERO { Color::Red } else { Color::Green },
            ),
        ),
        ("", "Export", optional_cell(snapshot.grid.power_to_grid)),
        ("", "Import", optional_cell(snapshot.grid.power_from_grid)),
        ("Consumption", "Load", optional_cell(snapshot.consumption.current_load)),
        ("", "Solar", optional_cell(snapshot.consumption.power_from_solar)),
        ("", "Battery", optional_cell(snapshot.consumption.power_from_battery)),
    ];
    for (group, name, value) in rows {
        table.add_row(vec![
            Cell::new(group).add_attribute(Attribute::Bold),
            Cell::new(name),
            value,
        ]);
    }
    table
}

pub fn build_plants_table(plants: &[Plant]) -> Table {
    let mut table = new_table();
    table.set_header(vec!["ID", "Name", "Timezone"]);
    for plant in plants {
        table.add_row(vec![
            Cell::new(&plant.id).add_attribute(Attribute::Dim),
            Cell::new(&plant.name),
            Cell::new(format!("{:+}", plant.timezone)).set_alignment(CellAlignment::Right),
        ]);
    }
    table
}

pub fn build_devices_table(devices: &[Device]) -> Table {
    let mut table = new_table();
    table.set_header(vec!["ID", "Name", "Status"]);
    for device in devices {
        table.add_row(vec![
            Cell::new(&device.id).add_attribute(Attribute::Dim),
            Cell::new(&device.name),
            Cell::new(&device.status),
        ]);
    }
    table
}

pub fn build_energy_summary_table(summary: &EnergySummary) -> Table {
    let mut table = new_table();
    table.set_header(vec!["Energy", "Income"]);
    table.add_row(vec![
        Cell::new(summary.today_energy).set_alignment(CellAlignment::Right),
        Cell::new(format!("{:.2}", summary.today_income)).set_alignment(CellAlignment::Right),
    ]);
    table
}

pub fn build_energy_history_table(history: &[EnergyData]) -> Table {
    let mut table = new_table();
    table.set_header(vec!["Date", "Energy", "Income"]);
    for entry in history {
        table.add_row(vec![
            optional_cell(entry.date.as_ref()).set_alignment(CellAlignment::Left),
            optional_cell(entry.energy),
            optional_cell(entry.income.map(|income| format!("{income:.2}"))),
        ]);
    }
    table
}

pub fn build_device_history_table(history: &[HistoryEntry]) -> Table {
    let mut table = new_table();
    table.set_header(vec!["Date", "Energy", "Power"]);
    for entry in history {
        table.add_row(vec![
            Cell::new(&entry.date),
            Cell::new(&entry.energy).set_alignment(CellAlignment::Right),
            optional_cell(entry.power.as_ref()),
        ]);
    }
    table
}

pub fn build_alarms_table(alarms: &[Alarm]) -> Table {
    let mut table = new_table();
    table.set_header(vec!["Time", "Code", "Type", "Message"]);
    for alarm in alarms {
        let attribute = if alarm.is_resolved { Attribute::Dim } else { Attribute::Bold };
        table.add_row(vec![
            Cell::new(&alarm.timestamp).add_attribute(Attribute::Dim),
            Cell::new(&alarm.alarm_code).add_attribute(attribute),
            Cell::new(&alarm.alarm_type),
            Cell::new(&alarm.alarm_message).add_attribute(attribute),
        ]);
    }
    table
}

pub fn build_weather_table(weather: &Weather) -> Table {
    let mut table = new_table();
    table.set_header(vec!["City", "Date", "Condition", "Temperature", "Cloud", "Sunrise", "Sunset"]);
    for item in &weather.data.items {
        table.add_row(vec![
            Cell::new(&weather.city),
            Cell::new(&weather.data_str).add_attribute(Attribute::Dim),
            Cell::new(&item.now.condition),
            Cell::new(format!("{} °", item.now.temperature)).set_alignment(CellAlignment::Right),
            Cell::new(format!("{} %", item.now.cloud)).set_alignment(CellAlignment::Right),
            Cell::new(&item.basic.sunrise),
            Cell::new(&item.basic.sunset),
        ]);
    }
    table
}

/// Two-column table of the top-level fields of a response object.
pub fn build_properties_table(object: &impl Serialize) -> Result<Table> {
    let serde_json::Value::Object(properties) = serde_json::to_value(object)? else {
        bail!("expected an object");
    };
    let mut table = new_table();
    table.set_header(vec!["Property", "Value"]);
    for (key, value) in properties {
        let value = match value {
            serde_json::Value::Null => Cell::new("–").add_attribute(Attribute::Dim),
            serde_json::Value::String(text) => Cell::new(text),
            other => Cell::new(other),
        };
        table.add_row(vec![Cell::new(key).add_attribute(Attribute::Dim), value]);
    }
    Ok(table)
}

#[cfg(test)]
mod tests {
    use growatt::DecimalString;

    use super::*;

    #[test]
    fn test_properties_table() -> Result {
        let device = Device {
            id: "d1".to_owned(),
            name: "Inverter".to_owned(),
            status: "1".to_owned(),
            extra: None,
        };
        let table = build_properties_table(&device)?.to_string();
        assert!(table.contains("Inverter"));
        assert!(!table.contains("\"Inverter\""));
        Ok(())
    }

    #[test]
    fn test_properties_table_rejects_scalars() {
        assert!(build_properties_table(&DecimalString::from("1.0")).is_err());
    }
}

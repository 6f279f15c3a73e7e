use serde::{Deserialize, Serialize};
use thiserror::Error;

pub const CSV_COLUMNS: [&str; 9] = [
    "date",
    "6am",
    "12pm",
    "6pm",
    "12am",
    "electricVehicleCharging",
    "hotWaterHeater",
    "poolPump",
    "heatPump",
];

/// One day of metered usage as it appears in the uploaded CSV.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct EnergyReading {
    pub date: String,
    #[serde(rename = "6am")]
    pub six_am: f64,
    #[serde(rename = "12pm")]
    pub twelve_pm: f64,
    #[serde(rename = "6pm")]
    pub six_pm: f64,
    #[serde(rename = "12am")]
    pub twelve_am: f64,
    #[serde(rename = "electricVehicleCharging")]
    pub electric_vehicle_charging: bool,
    #[serde(rename = "hotWaterHeater")]
    pub hot_water_heater: bool,
    #[serde(rename = "poolPump")]
    pub pool_pump: bool,
    #[serde(rename = "heatPump")]
    pub heat_pump: bool,
}

impl EnergyReading {
    pub fn total_kwh(&self) -> f64 {
        self.six_am + self.twelve_pm + self.six_pm + self.twelve_am
    }

    pub fn flag(&self, appliance: Appliance) -> bool {
        match appliance {
            Appliance::ElectricVehicleCharging => self.electric_vehicle_charging,
            Appliance::HotWaterHeater => self.hot_water_heater,
            Appliance::PoolPump => self.pool_pump,
            Appliance::HeatPump => self.heat_pump,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Appliance {
    ElectricVehicleCharging,
    HotWaterHeater,
    PoolPump,
    HeatPump,
}

impl Appliance {
    pub const ALL: [Appliance; 4] = [
        Self::ElectricVehicleCharging,
        Self::HotWaterHeater,
        Self::PoolPump,
        Self::HeatPump,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::ElectricVehicleCharging => "electricVehicleCharging",
            Self::HotWaterHeater => "hotWaterHeater",
            Self::PoolPump => "poolPump",
            Self::HeatPump => "heatPump",
        }
    }
}

#[derive(Debug, Error)]
pub enum ReadingError {
    #[error("failed to read CSV input: {0}")]
    Csv(#[from] csv::Error),
    #[error("CSV header is missing required column '{0}'")]
    MissingColumn(&'static str),
    #[error("row {row}: column '{column}' has {found} fields, expected at least {expected}")]
    ShortRow {
        row: usize,
        column: &'static str,
        found: usize,
        expected: usize,
    },
    #[error("row {row}: column '{column}' is not a number: '{value}'")]
    InvalidNumber {
        row: usize,
        column: &'static str,
        value: String,
    },
}

/// Header positions of the required columns, in `CSV_COLUMNS` order.
struct ColumnIndex([usize; 9]);

impl ColumnIndex {
    fn from_headers(headers: &csv::StringRecord) -> Result<Self, ReadingError> {
        let mut positions = [0usize; 9];
        for (slot, column) in CSV_COLUMNS.into_iter().enumerate() {
            positions[slot] = headers
                .iter()
                .position(|header| header == column)
                .ok_or(ReadingError::MissingColumn(column))?;
        }
        Ok(Self(positions))
    }

    fn field<'r>(
        &self,
        record: &'r csv::StringRecord,
        slot: usize,
        row: usize,
    ) -> Result<&'r str, ReadingError> {
        let position = self.0[slot];
        record.get(position).ok_or(ReadingError::ShortRow {
            row,
            column: CSV_COLUMNS[slot],
            found: record.len(),
            expected: position + 1,
        })
    }

    fn number(
        &self,
        record: &csv::StringRecord,
        slot: usize,
        row: usize,
    ) -> Result<f64, ReadingError> {
        let value = self.field(record, slot, row)?;
        // NaN and infinities parse but cannot be written as JSON numbers.
        value
            .parse::<f64>()
            .ok()
            .filter(|number| number.is_finite())
            .ok_or_else(|| ReadingError::InvalidNumber {
                row,
                column: CSV_COLUMNS[slot],
                value: value.to_string(),
            })
    }

    fn flag(
        &self,
        record: &csv::StringRecord,
        slot: usize,
        row: usize,
    ) -> Result<bool, ReadingError> {
        Ok(self
            .field(record, slot, row)?
            .eq_ignore_ascii_case("true"))
    }
}

/// Converts raw CSV text into readings, preserving row order.
///
/// The whole conversion fails on the first malformed row; there is no
/// partial result.
pub fn parse_readings(csv_text: &str) -> Result<Vec<EnergyReading>, ReadingError> {
    let mut reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .flexible(true)
        .from_reader(csv_text.as_bytes());

    let columns = ColumnIndex::from_headers(reader.headers()?)?;

    let mut readings = Vec::new();
    for (offset, record) in reader.records().enumerate() {
        let record = record?;
        let row = offset + 1;
        readings.push(EnergyReading {
            date: columns.field(&record, 0, row)?.to_string(),
            six_am: columns.number(&record, 1, row)?,
            twelve_pm: columns.number(&record, 2, row)?,
            six_pm: columns.number(&record, 3, row)?,
            twelve_am: columns.number(&record, 4, row)?,
            electric_vehicle_charging: columns.flag(&record, 5, row)?,
            hot_water_heater: columns.flag(&record, 6, row)?,
            pool_pump: columns.flag(&record, 7, row)?,
            heat_pump: columns.flag(&record, 8, row)?,
        });
    }

    Ok(readings)
}

pub fn readings_to_json(readings: &[EnergyReading]) -> Result<String, serde_json::Error> {
    serde_json::to_string_pretty(readings)
}

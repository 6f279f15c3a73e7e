use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::reading::{Appliance, EnergyReading};

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SummaryError {
    #[error("cannot summarize an empty batch of readings")]
    EmptyBatch,
}

/// One value per tracked appliance, serialized under the CSV column names.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq)]
pub struct PerAppliance<T> {
    #[serde(rename = "electricVehicleCharging")]
    pub electric_vehicle_charging: T,
    #[serde(rename = "hotWaterHeater")]
    pub hot_water_heater: T,
    #[serde(rename = "poolPump")]
    pub pool_pump: T,
    #[serde(rename = "heatPump")]
    pub heat_pump: T,
}

impl<T> PerAppliance<T> {
    pub fn get(&self, appliance: Appliance) -> &T {
        match appliance {
            Appliance::ElectricVehicleCharging => &self.electric_vehicle_charging,
            Appliance::HotWaterHeater => &self.hot_water_heater,
            Appliance::PoolPump => &self.pool_pump,
            Appliance::HeatPump => &self.heat_pump,
        }
    }

    pub fn get_mut(&mut self, appliance: Appliance) -> &mut T {
        match appliance {
            Appliance::ElectricVehicleCharging => &mut self.electric_vehicle_charging,
            Appliance::HotWaterHeater => &mut self.hot_water_heater,
            Appliance::PoolPump => &mut self.pool_pump,
            Appliance::HeatPump => &mut self.heat_pump,
        }
    }

    pub fn map<U>(&self, mut f: impl FnMut(&T) -> U) -> PerAppliance<U> {
        PerAppliance {
            electric_vehicle_charging: f(&self.electric_vehicle_charging),
            hot_water_heater: f(&self.hot_water_heater),
            pool_pump: f(&self.pool_pump),
            heat_pump: f(&self.heat_pump),
        }
    }
}

#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct FlagCounts {
    #[serde(rename = "true")]
    pub on: u64,
    #[serde(rename = "false")]
    pub off: u64,
}

#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq)]
pub struct FlagPercentages {
    #[serde(rename = "true")]
    pub on: f64,
    #[serde(rename = "false")]
    pub off: f64,
}

/// A reading with its derived daily total attached.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct AnnotatedReading {
    #[serde(flatten)]
    pub reading: EnergyReading,
    #[serde(rename = "totalKWH")]
    pub total_kwh: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct EnergySummary {
    pub total_kwh: f64,
    pub counts: PerAppliance<FlagCounts>,
    pub percentage_counts: PerAppliance<FlagPercentages>,
    pub original_data: Vec<AnnotatedReading>,
}

impl EnergySummary {
    pub fn batch_size(&self) -> usize {
        self.original_data.len()
    }
}

/// Aggregates a batch of readings in a single pass.
pub fn summarize(readings: Vec<EnergyReading>) -> Result<EnergySummary, SummaryError> {
    if readings.is_empty() {
        return Err(SummaryError::EmptyBatch);
    }

    let batch_size = readings.len() as f64;
    let mut total_kwh = 0.0;
    let mut counts = PerAppliance::<FlagCounts>::default();
    let mut original_data = Vec::with_capacity(readings.len());

    for reading in readings {
        let daily_kwh = reading.total_kwh();
        total_kwh += daily_kwh;

        for appliance in Appliance::ALL {
            let tally = counts.get_mut(appliance);
            if reading.flag(appliance) {
                tally.on += 1;
            } else {
                tally.off += 1;
            }
        }

        original_data.push(AnnotatedReading {
            reading,
            total_kwh: daily_kwh,
        });
    }

    let percentage_counts = counts.map(|tally| FlagPercentages {
        on: tally.on as f64 / batch_size * 100.0,
        off: tally.off as f64 / batch_size * 100.0,
    });

    Ok(EnergySummary {
        total_kwh,
        counts,
        percentage_counts,
        original_data,
    })
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use serde_json::json;

    use super::*;

    fn reading(date: &str, slots: [f64; 4], flags: [bool; 4]) -> EnergyReading {
        EnergyReading {
            date: date.to_string(),
            six_am: slots[0],
            twelve_pm: slots[1],
            six_pm: slots[2],
            twelve_am: slots[3],
            electric_vehicle_charging: flags[0],
            hot_water_heater: flags[1],
            pool_pump: flags[2],
            heat_pump: flags[3],
        }
    }

    #[test]
    fn splits_counts_and_percentages_evenly() {
        let summary = summarize(vec![
            reading("2024-01-01", [1.0; 4], [true, false, false, false]),
            reading("2024-01-02", [1.0; 4], [false, false, false, false]),
        ])
        .expect("batch should summarize");

        let value = serde_json::to_value(&summary).expect("summary should serialize");
        assert_eq!(
            value["counts"]["electricVehicleCharging"],
            json!({"true": 1, "false": 1})
        );
        assert_eq!(
            value["percentage_counts"]["electricVehicleCharging"],
            json!({"true": 50.0, "false": 50.0})
        );
        assert_eq!(value["counts"]["heatPump"], json!({"true": 0, "false": 2}));
    }

    #[test]
    fn sums_totals_across_the_batch() {
        let readings = (1..=4)
            .map(|day| {
                reading(
                    &format!("2024-01-0{day}"),
                    [1.0, 2.0, 3.0, 4.0],
                    [false; 4],
                )
            })
            .collect();

        let summary = summarize(readings).expect("batch should summarize");
        assert_eq!(summary.total_kwh, 40.0);
        assert!(summary
            .original_data
            .iter()
            .all(|annotated| annotated.total_kwh == 10.0));
    }

    #[test]
    fn empty_batch_is_rejected_before_dividing() {
        assert_eq!(summarize(Vec::new()), Err(SummaryError::EmptyBatch));
    }

    #[test]
    fn annotated_readings_keep_input_fields_and_order() {
        let summary = summarize(vec![
            reading("2024-02-02", [0.5, 0.5, 0.5, 0.5], [true; 4]),
            reading("2024-02-01", [1.0, 0.0, 0.0, 0.0], [false; 4]),
        ])
        .expect("batch should summarize");

        let value = serde_json::to_value(&summary.original_data).expect("data should serialize");
        assert_eq!(value[0]["date"], "2024-02-02");
        assert_eq!(value[0]["totalKWH"], 2.0);
        assert_eq!(value[0]["poolPump"], true);
        assert_eq!(value[1]["date"], "2024-02-01");
        assert_eq!(value[1]["totalKWH"], 1.0);
        assert_eq!(summary.batch_size(), 2);
    }

    #[test]
    fn percentages_are_complementary_per_appliance() {
        let summary = summarize(vec![
            reading("d1", [0.0; 4], [true, true, false, false]),
            reading("d2", [0.0; 4], [true, false, false, true]),
            reading("d3", [0.0; 4], [false, false, false, true]),
        ])
        .expect("batch should summarize");

        for appliance in Appliance::ALL {
            let pct = summary.percentage_counts.get(appliance);
            assert!((pct.on + pct.off - 100.0).abs() < 1e-9);
        }
        assert_eq!(summary.counts.get(Appliance::HeatPump).on, 2);
    }
}

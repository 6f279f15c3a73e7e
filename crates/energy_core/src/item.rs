//! The row persisted to the calculated-energy table.
//!
//! Key attribute names live here so the table declaration and the writer
//! agree on them.

use serde::Serialize;

use crate::reading::Appliance;
use crate::summary::{EnergySummary, FlagCounts, FlagPercentages, PerAppliance};

pub const PARTITION_KEY_ATTRIBUTE: &str = "customerId";
pub const SORT_KEY_ATTRIBUTE: &str = "timestamp";
pub const DATA_ATTRIBUTE: &str = "data";
pub const TTL_ATTRIBUTE: &str = "ttl";
pub const SECONDARY_INDEX_NAME: &str = "customerId-timestamp-index";

/// Every summary row shares this partition value.
pub const SUMMARY_PARTITION_VALUE: &str = "1";

#[derive(Debug, Clone, PartialEq)]
pub struct SummaryItem {
    pub partition_value: String,
    pub timestamp: String,
    pub data: String,
}

impl SummaryItem {
    pub fn new(
        summary: &EnergySummary,
        timestamp: impl Into<String>,
    ) -> Result<Self, serde_json::Error> {
        Ok(Self {
            partition_value: SUMMARY_PARTITION_VALUE.to_string(),
            timestamp: timestamp.into(),
            data: serde_json::to_string(summary)?,
        })
    }

    /// Attribute name/value pairs in write order.
    pub fn attributes(&self) -> [(&'static str, &str); 3] {
        [
            (PARTITION_KEY_ATTRIBUTE, self.partition_value.as_str()),
            (SORT_KEY_ATTRIBUTE, self.timestamp.as_str()),
            (DATA_ATTRIBUTE, self.data.as_str()),
        ]
    }
}

/// The subset of a summary echoed back to the caller.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct SummaryReport<'a> {
    pub message: &'static str,
    pub total_kwh: f64,
    pub counts: &'a PerAppliance<FlagCounts>,
    pub percentage_counts: &'a PerAppliance<FlagPercentages>,
    pub timestamp: &'a str,
}

impl<'a> SummaryReport<'a> {
    pub fn new(summary: &'a EnergySummary, timestamp: &'a str) -> Self {
        Self {
            message: "Energy calculation completed successfully",
            total_kwh: summary.total_kwh,
            counts: &summary.counts,
            percentage_counts: &summary.percentage_counts,
            timestamp,
        }
    }
}

/// Plain-text digest published to the summary topic.
pub fn notification_text(summary: &EnergySummary, timestamp: &str) -> String {
    let mut lines = vec![
        format!("Energy summary generated at {timestamp}"),
        format!(
            "Total usage: {:.2} kWh across {} day(s)",
            summary.total_kwh,
            summary.batch_size()
        ),
    ];
    for appliance in Appliance::ALL {
        let counts = summary.counts.get(appliance);
        let pct = summary.percentage_counts.get(appliance);
        lines.push(format!(
            "{}: on {} day(s) ({:.1}%), off {} day(s) ({:.1}%)",
            appliance.as_str(),
            counts.on,
            pct.on,
            counts.off,
            pct.off
        ));
    }
    lines.join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::reading::EnergyReading;
    use crate::summary::summarize;

    fn sample_summary() -> EnergySummary {
        summarize(vec![EnergyReading {
            date: "2024-01-01".to_string(),
            six_am: 1.0,
            twelve_pm: 2.0,
            six_pm: 3.0,
            twelve_am: 4.0,
            electric_vehicle_charging: true,
            hot_water_heater: false,
            pool_pump: true,
            heat_pump: false,
        }])
        .expect("sample should summarize")
    }

    #[test]
    fn item_uses_fixed_partition_and_given_timestamp() {
        let item = SummaryItem::new(&sample_summary(), "2024-01-02T00:00:00+00:00")
            .expect("item should build");

        let attributes = item.attributes();
        assert_eq!(attributes[0], ("customerId", "1"));
        assert_eq!(attributes[1], ("timestamp", "2024-01-02T00:00:00+00:00"));
        assert_eq!(attributes[2].0, "data");

        let data: serde_json::Value =
            serde_json::from_str(&item.data).expect("data should be JSON");
        assert_eq!(data["total_kwh"], 10.0);
        assert_eq!(data["original_data"][0]["totalKWH"], 10.0);
        assert!(data.get("percentage_counts").is_some());
    }

    #[test]
    fn report_echoes_totals_without_raw_rows() {
        let summary = sample_summary();
        let value = serde_json::to_value(SummaryReport::new(&summary, "ts"))
            .expect("report should serialize");

        assert_eq!(value["message"], "Energy calculation completed successfully");
        assert_eq!(value["total_kwh"], 10.0);
        assert_eq!(value["timestamp"], "ts");
        assert!(value.get("original_data").is_none());
    }

    #[test]
    fn notification_lists_every_appliance() {
        let text = notification_text(&sample_summary(), "ts");

        assert!(text.contains("Total usage: 10.00 kWh across 1 day(s)"));
        assert!(text.contains("electricVehicleCharging: on 1 day(s) (100.0%)"));
        assert!(text.contains("heatPump: on 0 day(s) (0.0%), off 1 day(s) (100.0%)"));
    }
}

use energy_core::item::{SummaryItem, PARTITION_KEY_ATTRIBUTE, SUMMARY_PARTITION_VALUE};
use energy_core::reading::Appliance;
use energy_core::{parse_readings, readings_to_json, summarize, EnergyReading, SummaryError};

const CSV: &str = "date,6am,12pm,6pm,12am,electricVehicleCharging,hotWaterHeater,poolPump,heatPump
2024-01-01,2.0,3.0,4.0,1.0,true,false,true,false
2024-01-02,2.5,2.5,2.5,2.5,false,false,true,true
2024-01-03,1.0,1.0,4.0,4.0,TRUE,True,FALSE,false
2024-01-04,0.0,5.0,5.0,0.0,false,true,true,false
";

#[test]
fn csv_upload_summarizes_to_expected_totals() {
    let readings = parse_readings(CSV).expect("csv should parse");
    let summary = summarize(readings).expect("batch should summarize");

    assert_eq!(summary.total_kwh, 40.0);
    assert_eq!(summary.counts.get(Appliance::ElectricVehicleCharging).on, 2);
    assert_eq!(summary.counts.get(Appliance::PoolPump).on, 3);
    assert_eq!(summary.percentage_counts.get(Appliance::PoolPump).on, 75.0);
    assert_eq!(summary.percentage_counts.get(Appliance::HeatPump).off, 75.0);
}

#[test]
fn transformed_json_round_trips_into_the_summary() {
    let readings = parse_readings(CSV).expect("csv should parse");
    let json = readings_to_json(&readings).expect("readings should encode");

    let decoded: Vec<EnergyReading> = serde_json::from_str(&json).expect("json should decode");
    assert_eq!(decoded, readings);

    let summary = summarize(decoded).expect("batch should summarize");
    let item = SummaryItem::new(&summary, "2024-01-05T00:00:00+00:00").expect("item");
    assert_eq!(item.attributes()[0], (PARTITION_KEY_ATTRIBUTE, SUMMARY_PARTITION_VALUE));
}

#[test]
fn header_only_upload_cannot_be_summarized() {
    let header = CSV.lines().next().expect("header line");
    let readings = parse_readings(header).expect("header should parse");

    assert_eq!(summarize(readings), Err(SummaryError::EmptyBatch));
}

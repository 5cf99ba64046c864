//! Telemetry API roots: latest signals, aggregated signals and VIN credentials

use crate::core::{ParameterDefinition, ParameterKind, SchemaField, SchemaRoot};

/// Signal names exposed by the telemetry API, in browser order
pub const SIGNALS: &[&str] = &[
    "speed",
    "powertrainTransmissionTravelledDistance",
    "powertrainFuelSystemRelativeLevel",
    "powertrainFuelSystemAbsoluteLevel",
    "powertrainTractionBatteryStateOfChargeCurrent",
    "powertrainTractionBatteryChargingIsCharging",
    "powertrainRange",
    "currentLocationLatitude",
    "currentLocationLongitude",
    "currentLocationAltitude",
    "exteriorAirTemperature",
    "lowVoltageBatteryCurrentVoltage",
    "obdEngineLoad",
    "obdRunTime",
    "isIgnitionOn",
    "chassisAxleRow1WheelLeftTirePressure",
    "chassisAxleRow1WheelRightTirePressure",
    "chassisAxleRow2WheelLeftTirePressure",
    "chassisAxleRow2WheelRightTirePressure",
];

/// Aggregations applied to numeric signals in the `signals` root
pub const AGGREGATIONS: &[&str] = &["AVG", "MED", "MAX", "MIN", "RAND", "FIRST", "LAST"];

fn token_id() -> ParameterDefinition {
    ParameterDefinition::new("tokenId", ParameterKind::Number)
        .required()
        .with_placeholder("e.g. 21957")
        .with_description("Vehicle token id")
}

/// Latest value of each signal, each as `{ timestamp value }`
pub fn signals_latest() -> SchemaRoot {
    let mut fields = vec![SchemaField::leaf("lastSeen")];
    fields.extend(SIGNALS.iter().map(|signal| {
        SchemaField::object(
            *signal,
            vec![SchemaField::leaf("timestamp"), SchemaField::leaf("value")],
        )
    }));

    SchemaRoot::new("signalsLatest", "signalsLatest")
        .with_description("Most recent value of every signal")
        .with_parameter(token_id())
        .with_fields(fields)
}

/// Aliased leaf for one signal/aggregation pair, e.g. `speedAvg: speed(agg: AVG)`
pub fn aggregated_signal(signal: &str, aggregation: &str) -> SchemaField {
    let alias = format!("{}{}", signal, title_case(aggregation));
    let display = format!("{}: {}(agg: {})", alias, signal, aggregation);
    SchemaField::aliased(alias, display)
}

fn title_case(word: &str) -> String {
    let lower = word.to_ascii_lowercase();
    let mut chars = lower.chars();
    match chars.next() {
        Some(first) => first.to_ascii_uppercase().to_string() + chars.as_str(),
        None => String::new(),
    }
}

/// Time-bucketed aggregates between two timestamps
pub fn signals() -> SchemaRoot {
    let mut fields = vec![SchemaField::leaf("timestamp")];
    for signal in SIGNALS {
        for aggregation in AGGREGATIONS {
            fields.push(aggregated_signal(signal, aggregation));
        }
    }

    SchemaRoot::new("signals", "signals")
        .with_description("Aggregated signal values per interval")
        .with_parameter(token_id())
        .with_parameter(
            ParameterDefinition::new("interval", ParameterKind::String)
                .with_default("1h")
                .with_description("Bucket width, e.g. 30s, 5m, 1h"),
        )
        .with_parameter(
            ParameterDefinition::new("from", ParameterKind::Timestamp)
                .required()
                .with_placeholder("2024-05-01T00:00:00Z"),
        )
        .with_parameter(
            ParameterDefinition::new("to", ParameterKind::Timestamp)
                .required()
                .with_placeholder("2024-05-02T00:00:00Z"),
        )
        .with_fields(fields)
}

/// Latest VIN verifiable credential
pub fn vin_vc_latest() -> SchemaRoot {
    SchemaRoot::new("vinVCLatest", "vinVCLatest")
        .with_description("Latest VIN credential issued for the vehicle")
        .with_parameter(token_id())
        .with_fields(vec![
            SchemaField::leaf("vin"),
            SchemaField::leaf("recordedBy"),
            SchemaField::leaf("recordedAt"),
            SchemaField::leaf("countryCode"),
            SchemaField::leaf("vehicleContractAddress"),
            SchemaField::leaf("vehicleTokenId"),
            SchemaField::leaf("validFrom"),
            SchemaField::leaf("validTo"),
            SchemaField::leaf("rawVC"),
        ])
}

/// All telemetry roots in selector order
pub fn roots() -> Vec<SchemaRoot> {
    vec![signals_latest(), signals(), vin_vc_latest()]
}

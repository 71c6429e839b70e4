//! Test utilities and sample export tables for export parser testing
//!
//! The sample export holds two gaugings sharing one current meter. It is
//! reused by the plugin tests.

use csv::StringRecord;

use crate::app::services::export_parser::{ColumnMapping, PocketGaugerFiles};
use crate::constants::tables;


pub const SAMPLE_GAUGING_SUMMARY: &str = "\
GaugingId,GaugeId,GaugeName,ObserversName,StartDate,EndDate,FlowCalculationMethod,MeterId,Flow,Area,MeanVelocity,StartStage,EndStage,MeanStage,Comments
G1,39001,Thames at Kingston,A. Hydrographer,2024-03-14 09:15:00,2024-03-14 10:05:00,Mid,M-0412,0.195,0.7,0.28,1.10,1.14,,Clear conditions
G2,39002,Mole at Kinnersley,B. Surveyor,14/03/2024 13:00:00,14/03/2024 13:40:00,Mean,M-0412,0.06,0.3,0.2,0.80,,0.82,
";

pub const SAMPLE_PANELS: &str = "\
GaugingId,VerticalNumber,Distance,Depth,MeanVelocity,Area,Flow
G1,1,0.5,0.2,0.0,0.0,0.0
G1,2,1.5,0.4,0.3,0.4,0.12
G1,3,2.5,0.3,0.25,0.3,0.075
G2,1,0.0,0.1,0.0,0.0,0.0
G2,2,1.0,0.3,0.2,0.3,0.06
";

pub const SAMPLE_VERTICALS: &str = "\
GaugingId,VerticalNumber,SamplePosition,Depth,Revs,ExposureTime,Velocity
G1,2,0.2,0.08,40.0,40.0,0.35
G1,2,0.8,0.32,30.5,40.0,0.25
G1,3,0.6,0.18,25.9,40.0,0.25
G2,2,0.6,0.18,20.0,40.0,0.2
";

pub const SAMPLE_METER_DETAILS: &str = "\
MeterId,Manufacturer,Model,SerialNumber,ImpellerNumber,Description
M-0412,Valeport,Braystoke 001,SN-88213,IMP-7,Spare impeller fitted
";

pub const SAMPLE_METER_CALIBRATIONS: &str = "\
MeterId,CalibrationDate,MinRotationSpeed,MaxRotationSpeed,Factor,Constant
M-0412,2023-11-02 00:00:00,1.0,10.0,0.24,0.02
M-0412,2023-11-02 00:00:00,0.0,1.0,0.25,0.01
";

/// Total data records across the sample tables
pub const SAMPLE_RECORD_COUNT: usize = 14;

/// The complete sample export
pub fn sample_files() -> PocketGaugerFiles {
    PocketGaugerFiles::new()
        .with_table(tables::GAUGING_SUMMARY, SAMPLE_GAUGING_SUMMARY)
        .with_table(tables::PANELS, SAMPLE_PANELS)
        .with_table(tables::VERTICALS, SAMPLE_VERTICALS)
        .with_table(tables::METER_DETAILS, SAMPLE_METER_DETAILS)
        .with_table(tables::METER_CALIBRATIONS, SAMPLE_METER_CALIBRATIONS)
}

/// Column mapping over the given header names
pub fn create_mapping(headers: &[&str]) -> ColumnMapping {
    ColumnMapping::analyze("Test.csv", &StringRecord::from(headers.to_vec()))
}

/// A single CSV record
pub fn create_record(fields: &[&str]) -> StringRecord {
    StringRecord::from(fields.to_vec())
}

//! Core export parser implementation
//!
//! This module reads every table of an export, then assembles gaugings with
//! their panels and sub-observations.

use std::collections::HashMap;
use tracing::{debug, info, warn};

use super::column_mapping::ColumnMapping;
use super::files::PocketGaugerFiles;
use super::record_parser::*;
use super::stats::{ParseResult, ParseStats};
use crate::app::models::{GaugingSummaryItem, MeterCalibrationItem, MeterDetailsItem};
use crate::config::ParserConfig;
use crate::constants::tables;
use crate::{Error, Result};
use csv::StringRecord;

type RowParser<T> = fn(&StringRecord, &ColumnMapping) -> Result<T>;

/// A parsed row with its 1-based record number within the table
type Numbered<T> = (usize, T);

/// Parser for PocketGauger export tables
///
/// In strict mode the first malformed row aborts parsing. In lenient mode
/// malformed rows are skipped and recorded in [`ParseStats::errors`].
#[derive(Debug, Clone)]
pub struct ExportParser {
    strict: bool,
}

impl Default for ExportParser {
    fn default() -> Self {
        Self::new(&ParserConfig::default())
    }
}

impl ExportParser {
    /// Create a parser from configuration
    pub fn new(config: &ParserConfig) -> Self {
        Self {
            strict: config.strict,
        }
    }

    /// Parse all tables of an export
    pub fn parse(&self, files: &PocketGaugerFiles) -> Result<ParseResult> {
        info!("Parsing PocketGauger export: {}", files.label());

        let mut stats = ParseStats::new();

        let summary = files
            .get(tables::GAUGING_SUMMARY)
            .ok_or_else(|| Error::missing_table(tables::GAUGING_SUMMARY))?;
        let gaugings = self.read_table(
            tables::GAUGING_SUMMARY,
            summary,
            GAUGING_SUMMARY_COLUMNS,
            parse_gauging_summary_record,
            &mut stats,
        )?;

        let panels = self.read_optional_table(
            files,
            tables::PANELS,
            PANEL_COLUMNS,
            parse_panel_record,
            &mut stats,
        )?;
        let verticals = self.read_optional_table(
            files,
            tables::VERTICALS,
            VERTICAL_COLUMNS,
            parse_vertical_record,
            &mut stats,
        )?;
        let (meter_details, meter_calibrations) = self.read_meter_tables(files, &mut stats)?;

        let gaugings = self.assemble(gaugings, panels, verticals, &mut stats)?;

        info!(
            "Parsed {} gaugings and {} meters from {} records ({} skipped, {} orphaned)",
            gaugings.len(),
            meter_details.len(),
            stats.total_records,
            stats.records_skipped,
            stats.orphan_records
        );

        Ok(ParseResult {
            gaugings,
            meter_details,
            meter_calibrations,
            stats,
        })
    }

    /// Parse only the meter tables of an export
    ///
    /// The gauging summary table is not required; `gaugings` is left empty.
    pub fn parse_meters(&self, files: &PocketGaugerFiles) -> Result<ParseResult> {
        info!("Parsing meter tables of export: {}", files.label());

        let mut stats = ParseStats::new();
        let (meter_details, meter_calibrations) = self.read_meter_tables(files, &mut stats)?;

        Ok(ParseResult {
            gaugings: Vec::new(),
            meter_details,
            meter_calibrations,
            stats,
        })
    }

    fn read_meter_tables(
        &self,
        files: &PocketGaugerFiles,
        stats: &mut ParseStats,
    ) -> Result<(Vec<MeterDetailsItem>, Vec<MeterCalibrationItem>)> {
        let meter_details = self.read_optional_table(
            files,
            tables::METER_DETAILS,
            METER_DETAILS_COLUMNS,
            parse_meter_details_record,
            stats,
        )?;
        let meter_calibrations = self.read_optional_table(
            files,
            tables::METER_CALIBRATIONS,
            METER_CALIBRATION_COLUMNS,
            parse_meter_calibration_record,
            stats,
        )?;

        Ok((
            meter_details.into_iter().map(|(_, row)| row).collect(),
            meter_calibrations.into_iter().map(|(_, row)| row).collect(),
        ))
    }

    fn read_optional_table<T>(
        &self,
        files: &PocketGaugerFiles,
        table: &str,
        required_columns: &[&str],
        parse_row: RowParser<T>,
        stats: &mut ParseStats,
    ) -> Result<Vec<Numbered<T>>> {
        match files.get(table) {
            Some(content) => self.read_table(table, content, required_columns, parse_row, stats),
            None => {
                debug!("Optional table {} not present", table);
                Ok(Vec::new())
            }
        }
    }

    /// Read one table, parsing each data record with `parse_row`
    fn read_table<T>(
        &self,
        table: &str,
        content: &str,
        required_columns: &[&str],
        parse_row: RowParser<T>,
        stats: &mut ParseStats,
    ) -> Result<Vec<Numbered<T>>> {
        if content.trim().is_empty() {
            debug!("Table {} is empty", table);
            return Ok(Vec::new());
        }

        let mut csv_reader = csv::ReaderBuilder::new()
            .has_headers(true)
            .flexible(true)
            .trim(csv::Trim::All)
            .from_reader(content.as_bytes());

        let headers = csv_reader
            .headers()
            .map_err(|e| Error::csv_parsing(table, "Failed to read CSV headers", Some(e)))?
            .clone();

        let column_mapping = ColumnMapping::analyze(table, &headers);
        column_mapping.require(required_columns)?;
        debug!(
            "Table {}: {} columns mapped",
            table,
            column_mapping.column_count()
        );

        let mut rows = Vec::new();
        for (index, result) in csv_reader.records().enumerate() {
            let record_number = index + 1;
            stats.total_records += 1;

            let parsed = match result {
                Ok(record) => parse_row(&record, &column_mapping),
                Err(e) => Err(Error::csv_parsing(
                    table,
                    format!("Unreadable record {}", record_number),
                    Some(e),
                )),
            };

            match parsed {
                Ok(row) => {
                    stats.records_parsed += 1;
                    rows.push((record_number, row));
                }
                Err(e) => self.reject(table, record_number, e, stats)?,
            }
        }

        debug!("Table {}: {} rows parsed", table, rows.len());
        Ok(rows)
    }

    /// Attach panels to gaugings and sub-observations to panels, in file order
    fn assemble(
        &self,
        gaugings: Vec<Numbered<GaugingSummaryItem>>,
        panels: Vec<Numbered<PanelRecord>>,
        verticals: Vec<Numbered<VerticalRecord>>,
        stats: &mut ParseStats,
    ) -> Result<Vec<GaugingSummaryItem>> {
        let mut assembled: Vec<GaugingSummaryItem> = Vec::with_capacity(gaugings.len());
        let mut gauging_index: HashMap<String, usize> = HashMap::new();

        for (record_number, gauging) in gaugings {
            if gauging_index.contains_key(&gauging.gauging_id) {
                // Counted as parsed by read_table; now it is skipped instead
                stats.records_parsed -= 1;
                let error = Error::data_validation(format!(
                    "Duplicate gauging id '{}'",
                    gauging.gauging_id
                ));
                self.reject(tables::GAUGING_SUMMARY, record_number, error, stats)?;
                continue;
            }

            gauging_index.insert(gauging.gauging_id.clone(), assembled.len());
            assembled.push(gauging);
        }

        // (gauging position, vertical number) -> panel position; first panel wins
        let mut panel_index: HashMap<(usize, i32), usize> = HashMap::new();

        for (record_number, PanelRecord { gauging_id, panel }) in panels {
            let Some(&gauging_position) = gauging_index.get(&gauging_id) else {
                warn!(
                    "{} record {}: unknown gauging '{}', row skipped",
                    tables::PANELS,
                    record_number,
                    gauging_id
                );
                stats.orphan_records += 1;
                continue;
            };

            let panel_items = &mut assembled[gauging_position].panel_items;
            panel_index
                .entry((gauging_position, panel.vertical_number))
                .or_insert(panel_items.len());
            panel_items.push(panel);
        }

        for (record_number, vertical) in verticals {
            let panel_position = gauging_index
                .get(&vertical.gauging_id)
                .and_then(|&g| {
                    panel_index
                        .get(&(g, vertical.vertical_number))
                        .map(|&p| (g, p))
                });

            let Some((gauging_position, panel_position)) = panel_position else {
                warn!(
                    "{} record {}: no panel {} in gauging '{}', row skipped",
                    tables::VERTICALS,
                    record_number,
                    vertical.vertical_number,
                    vertical.gauging_id
                );
                stats.orphan_records += 1;
                continue;
            };

            assembled[gauging_position].panel_items[panel_position]
                .verticals
                .push(vertical.item);
        }

        for gauging in &assembled {
            debug!(
                "Gauging {}: {} panels",
                gauging.gauging_id,
                gauging.panel_items.len()
            );
        }

        Ok(assembled)
    }

    /// Fail in strict mode, otherwise count and log the skipped row
    fn reject(
        &self,
        table: &str,
        record_number: usize,
        error: Error,
        stats: &mut ParseStats,
    ) -> Result<()> {
        if self.strict {
            return Err(match error {
                Error::DataValidation { message } => Error::data_validation(format!(
                    "{} record {}: {}",
                    table, record_number, message
                )),
                other => other,
            });
        }

        let message = format!("{} record {}: {}", table, record_number, error);
        warn!("Skipped {}", message);
        stats.record_skip(message);
        Ok(())
    }
}

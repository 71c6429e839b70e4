//! Field parsing utilities for export table records
//!
//! This module provides helper functions for parsing different data types
//! from CSV records with proper error handling and validation.

use super::column_mapping::ColumnMapping;
use crate::constants::DATETIME_FORMATS;
use crate::{Error, Result};
use chrono::NaiveDateTime;
use csv::StringRecord;

/// Parse a required f64 field from a CSV record
pub fn parse_required_f64(
    record: &StringRecord,
    mapping: &ColumnMapping,
    field_name: &str,
) -> Result<f64> {
    let value_str = get_required_field(record, mapping, field_name)?;
    parse_f64(value_str, field_name)
}

/// Parse an optional f64 field; an unparseable value is an error, an empty one is not
pub fn parse_optional_f64(
    record: &StringRecord,
    mapping: &ColumnMapping,
    field_name: &str,
) -> Result<Option<f64>> {
    get_optional_field(record, mapping, field_name)
        .map(|s| parse_f64(s, field_name))
        .transpose()
}

/// Parse a required i32 field from a CSV record
pub fn parse_required_i32(
    record: &StringRecord,
    mapping: &ColumnMapping,
    field_name: &str,
) -> Result<i32> {
    let value_str = get_required_field(record, mapping, field_name)?;

    value_str.parse::<i32>().map_err(|e| {
        Error::data_validation(format!(
            "Invalid integer format for {}: '{}' ({})",
            field_name, value_str, e
        ))
    })
}

/// Parse a required string field from a CSV record
pub fn parse_required_string(
    record: &StringRecord,
    mapping: &ColumnMapping,
    field_name: &str,
) -> Result<String> {
    let value_str = get_required_field(record, mapping, field_name)?;
    Ok(value_str.to_string())
}

/// Parse an optional string field from a CSV record
pub fn parse_optional_string(
    record: &StringRecord,
    mapping: &ColumnMapping,
    field_name: &str,
) -> Option<String> {
    get_optional_field(record, mapping, field_name).map(str::to_string)
}

/// Parse a required local date-time field from a CSV record
pub fn parse_required_datetime(
    record: &StringRecord,
    mapping: &ColumnMapping,
    field_name: &str,
) -> Result<NaiveDateTime> {
    let value_str = get_required_field(record, mapping, field_name)?;
    parse_datetime(value_str).ok_or_else(|| invalid_datetime(field_name, value_str))
}

/// Parse an optional local date-time field from a CSV record
pub fn parse_optional_datetime(
    record: &StringRecord,
    mapping: &ColumnMapping,
    field_name: &str,
) -> Result<Option<NaiveDateTime>> {
    match get_optional_field(record, mapping, field_name) {
        None => Ok(None),
        Some(value_str) => parse_datetime(value_str)
            .map(Some)
            .ok_or_else(|| invalid_datetime(field_name, value_str)),
    }
}

/// Parse a date-time in any of the accepted export layouts
pub fn parse_datetime(value: &str) -> Option<NaiveDateTime> {
    DATETIME_FORMATS
        .iter()
        .find_map(|format| NaiveDateTime::parse_from_str(value.trim(), format).ok())
}

/// Get a required field value from a CSV record
pub fn get_required_field<'a>(
    record: &'a StringRecord,
    mapping: &ColumnMapping,
    field_name: &str,
) -> Result<&'a str> {
    let index = mapping.get_index(field_name).ok_or_else(|| {
        Error::data_validation(format!("Required column '{}' not found", field_name))
    })?;

    let value = record.get(index).ok_or_else(|| {
        Error::data_validation(format!("No value for required column '{}'", field_name))
    })?;

    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(Error::data_validation(format!(
            "Empty value for required column '{}'",
            field_name
        )));
    }

    Ok(trimmed)
}

/// Get an optional field value from a CSV record
pub fn get_optional_field<'a>(
    record: &'a StringRecord,
    mapping: &ColumnMapping,
    field_name: &str,
) -> Option<&'a str> {
    mapping
        .get_index(field_name)
        .and_then(|index| record.get(index))
        .map(|s| s.trim())
        .filter(|s| !s.is_empty())
}

fn parse_f64(value_str: &str, field_name: &str) -> Result<f64> {
    let value = value_str.parse::<f64>().map_err(|e| {
        Error::data_validation(format!(
            "Invalid number format for {}: '{}' ({})",
            field_name, value_str, e
        ))
    })?;

    if !value.is_finite() {
        return Err(Error::data_validation(format!(
            "Non-finite value for {}: '{}'",
            field_name, value_str
        )));
    }

    Ok(value)
}

fn invalid_datetime(field_name: &str, value_str: &str) -> Error {
    Error::data_validation(format!(
        "Invalid datetime format for {}: '{}' (expected one of {})",
        field_name,
        value_str,
        DATETIME_FORMATS.join(", ")
    ))
}

use std::io::BufRead;

use phonegrouper_core::{Record, Row};

use crate::error::FormatError;
use crate::source::LineSource;
use crate::Result;

/// `<number>[TAB<name>]`; blank lines carry no record.
pub fn parse_record_line(line_no: u64, line: &str) -> Option<Record> {
    if line.trim().is_empty() {
        return None;
    }
    let (raw, name) = match line.split_once('\t') {
        Some((raw, name)) => (raw, Some(name)),
        None => (line, None),
    };
    let record = Record::new(line_no, raw.trim());
    Some(match name {
        Some(name) => record.with_name(name),
        None => record,
    })
}

/// Splits a delimited line into column values, keeping empty columns in place.
pub fn parse_row_line(line_no: u64, line: &str, delimiter: char) -> Option<Row> {
    let trimmed = line.trim_end();
    if trimmed.trim().is_empty() {
        return None;
    }
    let values = trimmed.split(delimiter).map(clean_value).collect();
    Some(Row::new(line_no, trimmed, values))
}

fn clean_value(value: &str) -> String {
    if !value.contains('"') {
        return value.trim().to_string();
    }
    value.replace('"', "").trim().to_string()
}

pub fn read_records(source: &dyn LineSource) -> Result<Vec<Record>> {
    let reader = source.open()?;
    read_lines(reader, &source.source_name(), parse_record_line)
}

pub fn read_rows(source: &dyn LineSource, delimiter: char) -> Result<Vec<Row>> {
    let reader = source.open()?;
    read_lines(reader, &source.source_name(), |line_no, line| {
        parse_row_line(line_no, line, delimiter)
    })
}

pub fn read_lines<R, T, F>(reader: R, source_name: &str, mut parse: F) -> Result<Vec<T>>
where
    R: BufRead,
    F: FnMut(u64, &str) -> Option<T>,
{
    let mut out = Vec::new();
    for (idx, line) in reader.lines().enumerate() {
        let line_no = idx as u64 + 1;
        let line = line.map_err(|source| FormatError::Read {
            source_name: source_name.to_string(),
            line: line_no,
            source,
        })?;
        if let Some(item) = parse(line_no, &line) {
            out.push(item);
        }
    }
    Ok(out)
}

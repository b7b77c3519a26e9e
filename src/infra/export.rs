//! Экспорт разбиения в CSV.

use std::fs::File;
use std::io::Write;
use std::path::Path;

use thiserror::Error;

use crate::domain::group::{export_rows, Group};

pub const CSV_HEADER: [&str; 2] = ["Group Name", "Member Name"];

#[derive(Debug, Error)]
pub enum ExportError {
    #[error("Ошибка записи CSV: {0}")]
    Csv(#[from] csv::Error),

    #[error("Ошибка ввода-вывода: {0}")]
    Io(#[from] std::io::Error),
}

/// Записать группы в CSV: заголовок `Group Name,Member Name`,
/// одна строка на участника, все поля в кавычках.
pub fn write_groups_csv<W: Write>(groups: &[Group], writer: W) -> Result<(), ExportError> {
    let mut wtr = csv::WriterBuilder::new()
        .quote_style(csv::QuoteStyle::Always)
        .from_writer(writer);

    wtr.write_record(CSV_HEADER)?;
    for row in export_rows(groups) {
        wtr.write_record([row.group_name.as_str(), row.member_name.as_str()])?;
    }
    wtr.flush()?;
    Ok(())
}

/// CSV целиком в строку.
pub fn groups_to_csv_string(groups: &[Group]) -> Result<String, ExportError> {
    let mut buf = Vec::new();
    write_groups_csv(groups, &mut buf)?;
    Ok(String::from_utf8_lossy(&buf).into_owned())
}

pub fn export_groups_to_file(groups: &[Group], path: &Path) -> Result<(), ExportError> {
    let file = File::create(path)?;
    write_groups_csv(groups, file)
}

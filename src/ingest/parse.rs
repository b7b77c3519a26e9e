use std::fs;
use std::io::Read;
use std::path::Path;

use thiserror::Error;

use crate::domain::participant::Participant;
use crate::infra::ids::IdGenerator;

#[derive(Debug, Error)]
pub enum IngestError {
    #[error("Не удалось прочитать файл: {0}")]
    Io(#[from] std::io::Error),

    #[error("Некорректный CSV: {0}")]
    Csv(#[from] csv::Error),
}

/// Очистить одно имя: убрать запятые, которые остаются при вставке
/// строки из CSV, и обрезать пробелы (в том числе открывшиеся после запятой).
fn clean_name(raw: &str) -> String {
    raw.replace(',', "").trim().to_string()
}

/// Текст -> участники: одна строка = одно имя.
///
/// Строки делятся по `\n` / `\r\n`, обрезаются, пустые выкидываются,
/// запятые удаляются. Каждый получает новый id.
pub fn parse_roster(text: &str, ids: &IdGenerator) -> Vec<Participant> {
    text.lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(|line| Participant::new(ids.next_participant_id(), clean_name(line)))
        .filter(|p| !p.name.is_empty())
        .collect()
}

/// CSV -> участники: имя берётся из первой колонки каждой записи.
/// Заголовков не ждём, число колонок может плавать.
pub fn parse_roster_csv<R: Read>(reader: R, ids: &IdGenerator) -> Result<Vec<Participant>, IngestError> {
    let mut rdr = csv::ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .trim(csv::Trim::All)
        .from_reader(reader);

    let mut out = Vec::new();
    for record in rdr.records() {
        let record = record?;
        if let Some(first) = record.get(0) {
            let name = clean_name(first);
            if !name.is_empty() {
                out.push(Participant::new(ids.next_participant_id(), name));
            }
        }
    }
    Ok(out)
}

/// Загрузить список из файла: `.csv` разбирается как CSV, всё остальное — как текст.
pub fn load_roster_file(path: &Path, ids: &IdGenerator) -> Result<Vec<Participant>, IngestError> {
    let is_csv = path
        .extension()
        .and_then(|e| e.to_str())
        .map(|e| e.eq_ignore_ascii_case("csv"))
        .unwrap_or(false);

    if is_csv {
        let file = fs::File::open(path)?;
        parse_roster_csv(file, ids)
    } else {
        let text = fs::read_to_string(path)?;
        Ok(parse_roster(&text, ids))
    }
}

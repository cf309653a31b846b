use super::{Person, PreferenceRegistry};
use crate::consts::DEFAULT_WEIGHT;
use crate::error::{SeatError, SfResult};
use std::fs::File;
use std::io::Read;
use std::path::Path;
use tracing::{debug, warn};

/// Reads a roster with one person per row: `name, "pref1, pref2", weight`.
///
/// A first row whose first cell mentions "name" is treated as a header.
/// Rows with an empty name are skipped; an empty weight defaults to 1.
pub fn load_roster_csv<R: Read>(reader: R) -> SfResult<Vec<Person>> {
    let mut rdr = csv::ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .trim(csv::Trim::All)
        .from_reader(reader);

    let mut people = Vec::new();
    let mut skipped_count = 0;

    for (row_idx, result) in rdr.records().enumerate() {
        let rec = result?;

        let name = rec.get(0).unwrap_or("").trim();
        if row_idx == 0 && name.to_lowercase().contains("name") {
            continue;
        }
        if name.is_empty() {
            skipped_count += 1;
            continue;
        }

        let preferences: Vec<String> = rec
            .get(1)
            .unwrap_or("")
            .split(',')
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(str::to_string)
            .collect();

        let weight = match rec.get(2).map(str::trim).filter(|s| !s.is_empty()) {
            Some(raw) => raw.parse::<f64>().map_err(|_| {
                SeatError::Validation(format!(
                    "Row {}: weight '{}' for '{}' is not a number",
                    row_idx + 1,
                    raw,
                    name
                ))
            })?,
            None => DEFAULT_WEIGHT,
        };

        people.push(Person::new(name, preferences, weight));
    }

    if skipped_count > 0 {
        debug!("Skipped {} roster rows without a name", skipped_count);
    }

    Ok(people)
}

/// Reads a JSON object mapping id -> `{ preferences, weight }`.
pub fn load_registry_json<R: Read>(reader: R) -> SfResult<PreferenceRegistry> {
    Ok(serde_json::from_reader(reader)?)
}

/// Loads a registry from disk, dispatching on the file extension (`.json` or CSV).
pub fn load_registry_file<P: AsRef<Path>>(path: P) -> SfResult<PreferenceRegistry> {
    let path = path.as_ref();
    let file = File::open(path).map_err(|e| {
        SeatError::Config(format!(
            "Could not open roster at '{}': {}",
            path.display(),
            e
        ))
    })?;

    let is_json = path
        .extension()
        .and_then(|e| e.to_str())
        .is_some_and(|e| e.eq_ignore_ascii_case("json"));

    let registry = if is_json {
        load_registry_json(file)?
    } else {
        PreferenceRegistry::new(load_roster_csv(file)?)?
    };

    for (who, missing) in registry.dangling_preferences() {
        warn!("'{}' prefers '{}', who is not on the roster", who, missing);
    }

    Ok(registry)
}

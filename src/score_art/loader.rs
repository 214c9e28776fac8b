use super::types::{Bracket, LookupTable};
use crate::error::{CalcError, CalcResult};
use std::fs::File;
use std::io::Read;
use std::path::Path;
use tracing::debug;

/// Columns before the bonus columns: min score, separator, max score.
const BONUS_COLUMN_START: usize = 3;

/// Parses the Envy score/bonus table.
///
/// The header row lists bonus percentages from column 3 on (`25%`, `26%`, ...).
/// Each row is `min_score, -, max_score, points@bonus...`; blank or
/// non-numeric cells are skipped.
pub fn load_envy_table<R: Read>(reader: R) -> CalcResult<LookupTable> {
    let mut rdr = csv::ReaderBuilder::new()
        .flexible(true)
        .has_headers(true)
        .trim(csv::Trim::All)
        .from_reader(reader);

    let headers = rdr.headers()?.clone();
    let bonus_columns: Vec<(usize, u32)> = headers
        .iter()
        .enumerate()
        .skip(BONUS_COLUMN_START)
        .filter_map(|(idx, h)| {
            h.trim_end_matches('%')
                .trim()
                .parse()
                .ok()
                .map(|bonus| (idx, bonus))
        })
        .collect();

    if bonus_columns.is_empty() {
        return Err(CalcError::Validation(
            "Envy table header has no bonus columns".to_string(),
        ));
    }

    let mut table = LookupTable::new();
    let mut skipped_rows = 0;

    for result in rdr.records() {
        let rec = match result {
            Ok(rec) => rec,
            Err(e) => {
                debug!("Envy table parse error: {}", e);
                skipped_rows += 1;
                continue;
            }
        };

        let bounds = (
            rec.get(0).and_then(|s| s.parse::<u32>().ok()),
            rec.get(2).and_then(|s| s.parse::<u32>().ok()),
        );
        let (Some(min_score), Some(max_score)) = bounds else {
            skipped_rows += 1;
            continue;
        };

        for &(idx, bonus) in &bonus_columns {
            let Some(base_ep) = rec.get(idx).and_then(|s| s.parse::<u32>().ok()) else {
                continue;
            };
            table.entry(base_ep).or_default().push(Bracket {
                min_score,
                max_score,
                bonus,
            });
        }
    }

    debug!(
        "Envy table: {} point buckets, {} bonus columns, {} rows skipped",
        table.len(),
        bonus_columns.len(),
        skipped_rows
    );

    Ok(table)
}

pub fn load_envy_table_from_file<P: AsRef<Path>>(path: P) -> CalcResult<LookupTable> {
    let path = path.as_ref();
    let file = File::open(path).map_err(|e| {
        CalcError::Config(format!("Could not open Envy table at {:?}: {}", path, e))
    })?;
    load_envy_table(file)
}

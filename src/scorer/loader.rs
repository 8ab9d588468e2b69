use super::categories::BonusCategory;
use crate::error::MjResult;
use std::fs::File;
use std::io::Read;
use std::path::Path;
use std::str::FromStr;
use tracing::{debug, info};

/// Reads `category,points` rows. Unknown categories and unparsable points are
/// skipped.
pub fn load_point_overrides<R: Read>(reader: R) -> MjResult<Vec<(BonusCategory, u32)>> {
    let mut rdr = csv::ReaderBuilder::new()
        .flexible(true)
        .has_headers(true)
        .trim(csv::Trim::All)
        .from_reader(reader);

    let mut overrides = Vec::new();
    let mut skipped_count = 0;

    for (row_idx, result) in rdr.records().enumerate() {
        let rec = result?;
        if rec.len() < 2 {
            skipped_count += 1;
            continue;
        }

        let Ok(category) = BonusCategory::from_str(&rec[0]) else {
            debug!("[Row {}] Unknown category '{}'", row_idx + 1, &rec[0]);
            skipped_count += 1;
            continue;
        };

        let points: u32 = match rec[1].parse() {
            Ok(val) => val,
            Err(_) => {
                debug!("[Row {}] Invalid points '{}'", row_idx + 1, &rec[1]);
                skipped_count += 1;
                continue;
            }
        };

        overrides.push((category, points));
    }

    if skipped_count > 0 {
        info!("Skipped {} invalid rows in point overrides", skipped_count);
    }

    Ok(overrides)
}

pub fn load_point_overrides_from_path<P: AsRef<Path>>(path: P) -> MjResult<Vec<(BonusCategory, u32)>> {
    let file = File::open(path)?;
    load_point_overrides(file)
}

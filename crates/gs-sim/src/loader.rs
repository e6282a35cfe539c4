//! CSV placement loader.
//!
//! # CSV format
//!
//! One row per agent.  The `heading` column may be empty for kinds that do
//! not travel.
//!
//! ```csv
//! kind,x,y,heading
//! standard,0,7,east
//! bus,7,0,north
//! roundabout,7,7,
//! cleaner,2,2,
//! dirt,4,1,
//! ```
//!
//! `kind` accepts every [`AgentKind`](gs_agent::AgentKind) name and alias
//! (`car`, `bus`, `cleaner`, `dirt`, ...) as well as obstacle kinds
//! (`building`, `roundabout`, `boundary`).  Rows are validated as they are
//! read; the first bad row aborts the load.

use std::io::Read;
use std::path::Path;

use crate::{Placement, SimError, SimResult};

/// Load placements from a CSV file.
pub fn load_placements_csv(path: &Path) -> SimResult<Vec<Placement>> {
    let file = std::fs::File::open(path)?;
    load_placements_reader(file)
}

/// Like [`load_placements_csv`] but accepts any `Read` source.
pub fn load_placements_reader<R: Read>(reader: R) -> SimResult<Vec<Placement>> {
    let mut csv_reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_reader(reader);

    let mut placements = Vec::new();
    for (row, result) in csv_reader.deserialize::<Placement>().enumerate() {
        let placement = result?;
        placement.resolve().map_err(|e| {
            // Header is line 1, so data row `row` sits on line `row + 2`.
            SimError::Config(format!("placement CSV line {}: {e}", row + 2))
        })?;
        placements.push(placement);
    }
    Ok(placements)
}

use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use oncall_core::{weekday_label, OncallError, RotationTable};

const COL_DATE: &str = "日期";
const COL_WEEKDAY: &str = "周几";
const COL_NAME: &str = "姓名";

/// One raw row as persisted. Date cells keep whatever representation the
/// file contains; normalization happens at lookup time.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TableRow {
    pub date: String,
    pub weekday: Option<String>,
    pub name: String,
}

/// Reads and overwrites the persisted rotation table CSV.
#[derive(Debug, Clone)]
pub struct DutyTableStore {
    path: PathBuf,
}

impl DutyTableStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Load all rows. Header columns are located by name; the weekday
    /// column is optional. Missing required columns report which columns
    /// are absent and which are actually present.
    pub fn load(&self) -> Result<Vec<TableRow>, OncallError> {
        let raw = fs::read_to_string(&self.path).map_err(|e| {
            if e.kind() == ErrorKind::NotFound {
                OncallError::TableNotFound(self.path.display().to_string())
            } else {
                OncallError::Io(e)
            }
        })?;

        let mut lines = raw.lines();
        let header = lines.next().unwrap_or("");
        // Spreadsheet exports often prepend a BOM.
        let header = header.trim_start_matches('\u{feff}');
        let columns: Vec<&str> = header.split(',').map(str::trim).collect();

        let date_idx = columns.iter().position(|c| *c == COL_DATE);
        let name_idx = columns.iter().position(|c| *c == COL_NAME);
        let weekday_idx = columns.iter().position(|c| *c == COL_WEEKDAY);

        let missing: Vec<String> = [(COL_DATE, date_idx), (COL_NAME, name_idx)]
            .iter()
            .filter(|(_, idx)| idx.is_none())
            .map(|(col, _)| col.to_string())
            .collect();
        if !missing.is_empty() {
            return Err(OncallError::MissingColumns {
                missing,
                present: columns.iter().map(|c| c.to_string()).collect(),
            });
        }
        let (date_idx, name_idx) = (date_idx.unwrap_or(0), name_idx.unwrap_or(0));

        let mut rows = Vec::new();
        for line in lines {
            if line.trim().is_empty() {
                continue;
            }
            let cells: Vec<&str> = line.split(',').map(str::trim).collect();
            rows.push(TableRow {
                date: cells.get(date_idx).copied().unwrap_or("").to_string(),
                weekday: weekday_idx
                    .and_then(|i| cells.get(i))
                    .map(|c| c.to_string()),
                name: cells.get(name_idx).copied().unwrap_or("").to_string(),
            });
        }

        tracing::debug!(path = %self.path.display(), rows = rows.len(), "duty table loaded");
        Ok(rows)
    }

    /// Overwrite the file with a freshly generated table. The write goes
    /// through a sibling temp file and a rename so readers never observe a
    /// half-written table.
    pub fn save(&self, table: &RotationTable) -> Result<(), OncallError> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }

        let mut out = String::new();
        out.push_str(COL_DATE);
        out.push(',');
        out.push_str(COL_WEEKDAY);
        out.push(',');
        out.push_str(COL_NAME);
        out.push('\n');
        for entry in &table.entries {
            out.push_str(&entry.date.format("%Y-%m-%d").to_string());
            out.push(',');
            out.push_str(weekday_label(entry.weekday));
            out.push(',');
            out.push_str(&entry.person);
            out.push('\n');
        }

        let tmp = self.path.with_extension("csv.tmp");
        fs::write(&tmp, &out)?;
        fs::rename(&tmp, &self.path)?;

        tracing::info!(
            path = %self.path.display(),
            rows = table.len(),
            "duty table written"
        );
        Ok(())
    }
}

use std::path::{Path, PathBuf};

use csv::Reader;
use tracing::{info, warn};

use crate::domain::{ContactDraft, ContactStore};
use crate::errors::AppError;

const IMPORT_PATH: &str = "./import_export/contacts.csv";

/// Outcome of a CSV import.
#[derive(Debug)]
pub struct ImportReport {
    pub path: PathBuf,
    pub imported: u64,
    /// 1-based data row number and why that row was left out.
    pub skipped: Vec<(usize, AppError)>,
}

/// Adds every row of a CSV file through [`ContactStore::add`].
///
/// An `id` column, if present, is ignored: imported contacts get fresh ids.
/// Rows that cannot be parsed or fail validation are skipped and listed in
/// the report.
pub fn import_contacts_from_csv(
    store: &mut ContactStore,
    src: Option<&Path>,
) -> Result<ImportReport, AppError> {
    let file_path = src.map_or_else(|| PathBuf::from(IMPORT_PATH), Path::to_path_buf);

    if !file_path.exists() {
        return Err(AppError::NotFound("CSV file".to_string()));
    }

    if file_path
        .extension()
        .is_none_or(|ext| !ext.eq_ignore_ascii_case("csv"))
    {
        return Err(AppError::Validation("File not .csv".to_string()));
    }

    let mut reader = Reader::from_path(&file_path)?;

    let mut imported: u64 = 0;
    let mut skipped: Vec<(usize, AppError)> = Vec::new();

    for (row, result) in reader.deserialize::<ContactDraft>().enumerate() {
        let draft = match result {
            Ok(draft) => draft,
            Err(e) if e.is_io_error() => return Err(e.into()),
            Err(e) => {
                warn!(row = row + 1, reason = %e, "skipping unreadable csv row");
                skipped.push((row + 1, e.into()));
                continue;
            }
        };

        match store.add(draft) {
            Ok(_) => imported += 1,
            Err(e) if e.is_validation() => {
                warn!(row = row + 1, reason = %e, "skipping csv row");
                skipped.push((row + 1, e.into()));
            }
            Err(e) => return Err(e.into()),
        }
    }

    info!(path = %file_path.display(), imported, skipped = skipped.len(), "contacts imported");
    Ok(ImportReport {
        path: file_path,
        imported,
        skipped,
    })
}

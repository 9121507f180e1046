use std::path::{Path, PathBuf};

use csv::Writer;
use tracing::info;

use crate::domain::Contact;
use crate::errors::AppError;
use crate::storage::create_file_parent;

const EXPORT_PATH: &str = "./import_export/exported.csv";

/// Writes `contacts` as CSV, one row each, headed by the stored field names.
/// A directory destination gets `exported.csv` inside it.
pub fn export_contacts_to_csv(
    contacts: &[Contact],
    des: Option<&Path>,
) -> Result<(PathBuf, u64), AppError> {
    let mut file_path = PathBuf::from(EXPORT_PATH);

    if let Some(path) = des {
        file_path = path.to_path_buf();

        if file_path.is_dir() {
            file_path = file_path.join("exported.csv");
        } else if file_path
            .extension()
            .is_none_or(|ext| !ext.eq_ignore_ascii_case("csv"))
        {
            return Err(AppError::Validation(
                "Export file must be a .csv file".to_string(),
            ));
        }
    }

    create_file_parent(&file_path)?;
    let mut writer = Writer::from_path(&file_path)?;

    let mut counter: u64 = 0;
    for contact in contacts {
        writer.serialize(contact)?;
        counter += 1;
    }

    writer.flush()?;

    info!(path = %file_path.display(), contacts = counter, "contacts exported");
    Ok((file_path, counter))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{ContactDraft, ContactStore};
    use crate::storage::MemoryStore;
    use std::fs;
    use tempfile::tempdir;

    #[test]
    fn exports_header_and_rows() -> Result<(), Box<dyn std::error::Error>> {
        let mut store = ContactStore::load(Box::new(MemoryStore::new()), "contacts");
        store.add(ContactDraft::new("Ada", "01712345678").with_email("ada@example.com"))?;
        store.add(ContactDraft::new("Bob", "01812345678").favorite(true))?;

        let dir = tempdir()?;
        let (path, total) = export_contacts_to_csv(store.list(), Some(dir.path()))?;

        assert_eq!(total, 2);
        assert_eq!(path, dir.path().join("exported.csv"));

        let exported = fs::read_to_string(path)?;
        let mut lines = exported.lines();
        assert_eq!(
            lines.next(),
            Some("id,name,phone,email,address,group,notes,favorite,emergency,photo")
        );
        assert!(exported.contains(",Ada,01712345678,ada@example.com,,,,false,false,"));
        assert!(exported.contains(",Bob,01812345678,,,,,true,false,"));
        Ok(())
    }

    #[test]
    fn rejects_non_csv_destination() -> Result<(), Box<dyn std::error::Error>> {
        let dir = tempdir()?;
        let result = export_contacts_to_csv(&[], Some(&dir.path().join("out.txt")));

        assert!(matches!(result, Err(AppError::Validation(_))));

        let upper = dir.path().join("OUT.CSV");
        let (path, total) = export_contacts_to_csv(&[], Some(&upper))?;
        assert_eq!((path, total), (upper, 0));
        Ok(())
    }
}

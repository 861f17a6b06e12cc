use crate::models::transaction::Transaction;
use crate::store::Store;
use rust_decimal::Decimal;
use std::fs::File;

/// Reads a plain text file of `type,amount,date` lines and merges the
/// records into the store, persisting once for the whole batch.
///
/// Lines without exactly three fields are skipped without comment; a
/// three-field line whose amount does not parse aborts the whole import
/// and nothing is merged. Returns the number of imported transactions.
pub fn import_transactions(store: &mut Store, path: &str) -> Result<usize, String> {
    let file = File::open(path).map_err(|e| format!("Failed to open file '{}': {}", path, e))?;

    let mut reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .has_headers(false)
        .flexible(true)
        .from_reader(file);

    let mut records = Vec::new();

    for (line_index, result) in reader.records().enumerate() {
        let record =
            result.map_err(|e| format!("Failed to read line {}: {}", line_index + 1, e))?;

        if record.len() != 3 {
            continue;
        }

        let category = record.get(0).unwrap_or("").to_string();
        let raw_amount = record.get(1).unwrap_or("");
        let amount = raw_amount.parse::<Decimal>().map_err(|_| {
            format!(
                "Invalid amount '{}' on line {}.",
                raw_amount,
                line_index + 1
            )
        })?;
        let date = record.get(2).unwrap_or("");

        records.push((category, Transaction::new(amount, date)));
    }

    let count = records.len();
    store.merge(records).map_err(|e| e.to_string())?;
    log::debug!("imported {} transactions from {}", count, path);

    Ok(count)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal::Decimal;
    use std::io::Write;
    use std::str::FromStr;
    use tempfile::{NamedTempFile, TempDir};

    fn write_temp_file(contents: &str) -> NamedTempFile {
        let mut tmp = NamedTempFile::new().expect("Failed to create temp file");
        write!(tmp, "{}", contents).expect("Failed to write test data");
        tmp
    }

    fn empty_store(dir: &TempDir) -> Store {
        Store::load(dir.path().join("transactions.json")).unwrap()
    }

    #[test]
    fn test_import_success() {
        let dir = TempDir::new().unwrap();
        let mut store = empty_store(&dir);
        let tmp = write_temp_file("Food,12.5,2024-01-01\nTransport,5,2024-01-02\n");

        let result = import_transactions(&mut store, tmp.path().to_str().unwrap());

        assert_eq!(result.unwrap(), 2);
        assert_eq!(store.categories()["Food"].len(), 1);
        assert_eq!(store.categories()["Transport"].len(), 1);
    }

    #[test]
    fn test_import_skips_lines_without_three_fields() {
        let dir = TempDir::new().unwrap();
        let mut store = empty_store(&dir);
        let tmp = write_temp_file("Food,12.5,2024-01-01\nbad,line\nTransport,5,2024-01-02\n");

        let result = import_transactions(&mut store, tmp.path().to_str().unwrap());

        assert_eq!(result.unwrap(), 2);
        assert_eq!(store.flatten().len(), 2);
    }

    #[test]
    fn test_import_normalizes_and_merges_into_existing_category() {
        let dir = TempDir::new().unwrap();
        let mut store = empty_store(&dir);
        store
            .add("Food", Decimal::from_str("1").unwrap(), "2024-01-01")
            .unwrap();
        let tmp = write_temp_file("food,2,2024-01-02\n");

        import_transactions(&mut store, tmp.path().to_str().unwrap()).unwrap();

        assert_eq!(store.categories().len(), 1);
        assert_eq!(store.categories()["Food"].len(), 2);
    }

    #[test]
    fn test_import_bad_amount_aborts_whole_file() {
        let dir = TempDir::new().unwrap();
        let mut store = empty_store(&dir);
        let tmp = write_temp_file("Food,12.5,2024-01-01\nTransport,abc,2024-01-02\n");

        let result = import_transactions(&mut store, tmp.path().to_str().unwrap());

        assert!(result.is_err());
        assert!(result.unwrap_err().contains("Invalid amount"));
        assert!(store.is_empty());
    }

    #[test]
    fn test_import_missing_file() {
        let dir = TempDir::new().unwrap();
        let mut store = empty_store(&dir);

        let result = import_transactions(&mut store, "nonexistent.txt");

        assert!(result.is_err());
        assert!(result.unwrap_err().contains("Failed to open file"));
    }
}

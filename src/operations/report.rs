use crate::store::Store;
use std::fmt::Write;

/// Summary table of per-category totals. Categories that currently hold
/// no transactions are still listed with a zero total.
pub fn render_summary(store: &Store) -> String {
    let totals = store.summarize();
    if totals.is_empty() {
        return "No transactions found.\n".to_string();
    }

    let width = totals
        .keys()
        .map(|category| category.len())
        .max()
        .unwrap_or(0)
        .max("Expense Type".len());

    let mut out = String::new();
    let _ = writeln!(out, "{:<width$}  Total Amount", "Expense Type");
    for (category, total) in &totals {
        let _ = writeln!(out, "{:<width$}  {}", category, total);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal::Decimal;
    use std::str::FromStr;
    use tempfile::TempDir;

    #[test]
    fn test_summary_empty_store() {
        let dir = TempDir::new().unwrap();
        let store = Store::load(dir.path().join("transactions.json")).unwrap();
        assert_eq!(render_summary(&store), "No transactions found.\n");
    }

    #[test]
    fn test_summary_lists_totals_including_empty_categories() {
        let dir = TempDir::new().unwrap();
        let mut store = Store::load(dir.path().join("transactions.json")).unwrap();
        store
            .add("Food", Decimal::from_str("12.5").unwrap(), "2024-01-01")
            .unwrap();
        store
            .add("Food", Decimal::from_str("7.5").unwrap(), "2024-01-02")
            .unwrap();
        store
            .add("Transport", Decimal::from_str("5").unwrap(), "2024-01-03")
            .unwrap();
        store.remove("Transport", 1).unwrap();

        let rendered = render_summary(&store);
        assert!(rendered.contains("Food"));
        assert!(rendered.contains("20"));
        assert!(rendered.contains("Transport"));
        assert!(rendered.contains("0"));
    }
}

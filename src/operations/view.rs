use crate::store::Store;
use std::fmt::Write;

/// Plain-text listing of the store grouped by category, with the
/// 1-based indices that update/delete expect.
pub fn render(store: &Store) -> String {
    if store.is_empty() {
        return "No transactions found.\n".to_string();
    }

    let mut out = String::new();
    for (category, transactions) in store.categories() {
        let _ = writeln!(out, "{}:", category);
        for (i, transaction) in transactions.iter().enumerate() {
            let _ = writeln!(
                out,
                "  {}. Amount: {}, Date: {}",
                i + 1,
                transaction.amount,
                transaction.date
            );
        }
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
    fn test_render_empty_store() {
        let dir = TempDir::new().unwrap();
        let store = Store::load(dir.path().join("transactions.json")).unwrap();
        assert_eq!(render(&store), "No transactions found.\n");
    }

    #[test]
    fn test_render_groups_and_numbers_transactions() {
        let dir = TempDir::new().unwrap();
        let mut store = Store::load(dir.path().join("transactions.json")).unwrap();
        store
            .add("Food", Decimal::from_str("12.5").unwrap(), "2024-01-01")
            .unwrap();
        store
            .add("Food", Decimal::from_str("3").unwrap(), "2024-01-02")
            .unwrap();

        let rendered = render(&store);
        assert!(rendered.contains("Food:"));
        assert!(rendered.contains("  1. Amount: 12.5, Date: 2024-01-01"));
        assert!(rendered.contains("  2. Amount: 3, Date: 2024-01-02"));
    }
}

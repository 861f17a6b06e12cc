use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// One recorded transaction. The date is kept as an opaque string
/// (nominally YYYY-MM-DD) and is never reformatted on load or save.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Transaction {
    pub amount: Decimal,
    pub date: String,
}

impl Transaction {
    pub fn new(amount: Decimal, date: impl Into<String>) -> Self {
        Self {
            amount,
            date: date.into(),
        }
    }
}

/// One row of the flattened category-major projection consumed by the
/// browse view. Derived from the store, never written back.
#[derive(Debug, Clone, PartialEq)]
pub struct TransactionEntry {
    pub category: String,
    pub amount: Decimal,
    pub date: String,
}

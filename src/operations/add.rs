use crate::operations::prompt;
use crate::store::Store;
use rust_decimal::Decimal;

pub fn prompt_and_add(store: &mut Store) -> Result<(), String> {
    let category = prompt("Enter the type of expense: ")?;
    if category.is_empty() {
        return Err("Expense type cannot be empty.".to_string());
    }
    let amount = parse_amount(&prompt("Enter the amount: ")?)?;
    let date = prompt("Enter the date (YYYY-MM-DD): ")?;

    store
        .add(&category, amount, &date)
        .map_err(|e| e.to_string())
}

pub fn parse_amount(raw: &str) -> Result<Decimal, String> {
    raw.trim().parse::<Decimal>().map_err(|_| {
        format!(
            "Invalid amount '{}'. Please provide a valid decimal number.",
            raw.trim()
        )
    })
}

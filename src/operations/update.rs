use crate::operations::add::parse_amount;
use crate::operations::{prompt, prompt_index};
use crate::store::Store;

pub fn prompt_and_update(store: &mut Store) -> Result<(), String> {
    let category = prompt("Enter expense type to update: ")?;
    let index = prompt_index("Enter the index of the transaction to update (starting from 1): ")?;
    let amount = parse_amount(&prompt("Enter updated transaction amount: ")?)?;
    let date = prompt("Enter updated date (YYYY-MM-DD): ")?;

    store
        .update(&category, index, amount, &date)
        .map_err(|e| e.to_string())
}

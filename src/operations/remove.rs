use crate::operations::{prompt, prompt_index};
use crate::store::Store;

pub fn prompt_and_remove(store: &mut Store) -> Result<(), String> {
    let category = prompt("Enter expense type to delete from: ")?;
    let index = prompt_index("Enter the index of the transaction to delete (starting from 1): ")?;

    store.remove(&category, index).map_err(|e| e.to_string())
}

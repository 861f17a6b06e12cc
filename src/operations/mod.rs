pub mod add;
pub mod browse;
pub mod import;
pub mod remove;
pub mod report;
pub mod update;
pub mod view;

use std::io::{self, Write};

pub(crate) fn prompt(label: &str) -> Result<String, String> {
    print!("{}", label);
    io::stdout()
        .flush()
        .map_err(|_| "Failed to flush stdout.".to_string())?;
    let mut input = String::new();
    io::stdin()
        .read_line(&mut input)
        .map_err(|_| "Failed to read line.".to_string())?;
    Ok(input.trim().to_string())
}

/// Prompts for a 1-based transaction index. Zero is re-prompted, a
/// non-numeric answer is an error; range checking is the store's job.
pub(crate) fn prompt_index(label: &str) -> Result<usize, String> {
    loop {
        let raw = prompt(label)?;
        let index = raw
            .parse::<usize>()
            .map_err(|_| format!("Invalid index '{}'. Please provide a number.", raw))?;
        if index == 0 {
            println!("Invalid index input. Please enter an index greater than zero.");
            continue;
        }
        return Ok(index);
    }
}

mod models;
mod operations;
mod store;

use clap::Parser;
use operations::{add, browse, import, prompt, remove, report, update, view};
use std::path::PathBuf;
use store::Store;

#[derive(Parser)]
#[command(name = "fintrack", about = "Personal finance tracker")]
struct Cli {
    /// Path to the transactions file
    #[arg(long, default_value = "transactions.json")]
    file: PathBuf,
}

fn main() {
    env_logger::init();
    let cli = Cli::parse();

    if !cli.file.exists() {
        println!("No transactions file found. Starting with an empty store.");
    }

    let mut store = match Store::load(&cli.file) {
        Ok(store) => store,
        Err(e) => {
            eprintln!("Failed to load transactions: {}", e);
            std::process::exit(1);
        }
    };

    loop {
        print_menu();

        let choice = match prompt("Enter your choice (1...9): ") {
            Ok(choice) => choice,
            Err(e) => {
                println!("Error reading input: {}", e);
                continue;
            }
        };

        match choice.as_str() {
            "1" => match add::prompt_and_add(&mut store) {
                Ok(()) => println!("Transaction added successfully."),
                Err(e) => println!("Error adding transaction: {}", e),
            },
            "2" => print!("{}", view::render(&store)),
            "3" => {
                if store.is_empty() {
                    println!("No transactions found.");
                    continue;
                }
                println!("Current transactions:");
                print!("{}", view::render(&store));
                match update::prompt_and_update(&mut store) {
                    Ok(()) => println!("Transaction updated successfully."),
                    Err(e) => println!("Error updating transaction: {}", e),
                }
            }
            "4" => {
                if store.is_empty() {
                    println!("No transactions found.");
                    continue;
                }
                println!("Current transactions:");
                print!("{}", view::render(&store));
                match remove::prompt_and_remove(&mut store) {
                    Ok(()) => println!("Transaction deleted successfully."),
                    Err(e) => println!("Error deleting transaction: {}", e),
                }
            }
            "5" => print!("{}", report::render_summary(&store)),
            "6" => {
                let filename = match prompt("Enter filename to read transactions from: ") {
                    Ok(filename) => filename,
                    Err(e) => {
                        println!("Error reading input: {}", e);
                        continue;
                    }
                };
                match import::import_transactions(&mut store, &filename) {
                    Ok(count) => println!("Successfully imported {} transactions.", count),
                    Err(e) => println!("Error importing transactions: {}", e),
                }
            }
            "7" => match store.save() {
                Ok(()) => println!("Transactions saved."),
                Err(e) => println!("Error saving transactions: {}", e),
            },
            "8" => match browse::run_browse(&store) {
                Ok(()) => println!("Viewer closed."),
                Err(e) => println!("Viewer error: {}", e),
            },
            "9" => {
                println!("Exiting the program.");
                break;
            }
            _ => println!("Invalid choice. Please try again."),
        }
    }
}

fn print_menu() {
    println!();
    println!("--------- Personal Finance Tracker ---------");
    println!("1. Add Transaction");
    println!("2. View Transactions");
    println!("3. Update Transaction");
    println!("4. Delete Transaction");
    println!("5. Display Summary");
    println!("6. Read Bulk Transactions from a Text File");
    println!("7. Save Transactions");
    println!("8. Open Transaction Viewer");
    println!("9. Exit");
}

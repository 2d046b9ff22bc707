use std::error::Error;
use std::path::Path;
use std::process::exit;

use clap::Parser;

use bank_ledger::{Amount, create_account, deposit, get_statement, initialize_db, open_db, withdraw};

/// A utility for creating a test database for the bank ledger server.
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// File path to save the SQLite database to.
    #[arg(long, short)]
    output_path: String,
}

/// Create and populate a database for manual testing.
fn main() -> Result<(), Box<dyn Error>> {
    let args = Args::parse();

    let output_path = Path::new(&args.output_path);

    if output_path
        .extension()
        .is_none_or(|extension| extension.is_empty())
    {
        eprintln!("Output path must include a file extension (e.g., 'my_database.db').");
        exit(1);
    }

    if output_path.is_file() {
        eprintln!("File already exists at {output_path:#?}!");
        exit(1);
    }

    println!("Creating database at {output_path:#?}");
    let conn = open_db(output_path)?;

    initialize_db(&conn)?;

    println!("Creating test accounts...");

    let asha = create_account("Asha", "100.00".parse::<Amount>()?, &conn)?;
    deposit(asha.id, "50.00".parse()?, &conn)?;
    withdraw(asha.id, "150.00".parse()?, &conn)?;

    let ben = create_account("Ben", "250.75".parse()?, &conn)?;
    deposit(ben.id, "19.25".parse()?, &conn)?;

    for account_id in [asha.id, ben.id] {
        let statement = get_statement(account_id, &conn)?;
        println!(
            "Account {} ({}) has {} transaction(s)",
            statement.account_id,
            statement.account_name,
            statement.transactions.len()
        );
    }

    println!("Success!");

    Ok(())
}

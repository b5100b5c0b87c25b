use clap::{Parser, ValueEnum};
use order_book_engine::book::Book;
use order_book_engine::driver;
use tracing::Level;
use tracing_subscriber::FmtSubscriber;

#[derive(Copy, Clone, ValueEnum)]
enum Mode {
    /// Run the deterministic self-test (seed 777, 10 000 iterations).
    Test,
    /// Run an infinite random feed (seed 890) with no output.
    Profile,
}

/// A limit order book engine: reads commands from stdin and reports
/// trades plus a book snapshot after each one, per spec §6.2/§6.3.
#[derive(Parser)]
#[command(name = "order-book-engine", version, about)]
struct Cli {
    mode: Option<Mode>,
}

fn main() -> anyhow::Result<()> {
    let subscriber = FmtSubscriber::builder()
        .with_max_level(Level::INFO)
        .with_writer(std::io::stderr)
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    let cli = Cli::parse();
    let mut book = Book::new();

    match cli.mode {
        Some(Mode::Test) => {
            println!("Program started in testing mode");
            match driver::run_self_test(&mut book, driver::TEST_SEED, driver::TEST_ITERATIONS) {
                Ok(()) => println!("Testing OK!"),
                Err(err) => {
                    println!("TESTING FAILED: {err}");
                    std::process::exit(1);
                }
            }
        }
        Some(Mode::Profile) => {
            println!("Program started in profiling mode");
            driver::run_profile(&mut book, driver::PROFILE_SEED, None);
        }
        None => driver::run_stdin(&mut book),
    }

    Ok(())
}

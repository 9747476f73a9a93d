/*
[INPUT]:  Run mode and failure details
[OUTPUT]: Styled banners and error lines on the terminal
[POS]:    CLI layer - user-facing text outside the order blocks
[UPDATE]: When changing banner or error wording
*/

use console::style;

const BANNER_RULE: &str = "==================================================";

pub fn print_demo_banner() {
    println!("\n{BANNER_RULE}");
    println!("{}", style("DEMO MODE").bold().yellow());
    println!("{BANNER_RULE}");
    println!("No real orders will be placed.");
    println!("The exchange is simulated for testing purposes.");
    println!("{BANNER_RULE}");
}

pub fn print_demo_note() {
    println!(
        "\n{} This was a DEMO order. No real transaction occurred.",
        style("Note:").yellow().bold()
    );
}

pub fn print_missing_credentials() {
    print_error("API credentials not found!");
    eprintln!("\nSet your Binance Futures Testnet API credentials:");
    eprintln!("1. Copy .env.example to .env");
    eprintln!("2. Add BINANCE_API_KEY and BINANCE_API_SECRET to the .env file");
    eprintln!("\nGet your API keys from: https://testnet.binancefuture.com");
    eprintln!("\nOr run in demo mode with the --demo flag");
}

pub fn print_error(message: impl std::fmt::Display) {
    eprintln!("\n{} {message}", style("Error:").red().bold());
}

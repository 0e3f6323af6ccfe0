use clap::Parser;
use purl_kit::cli::Cli;

fn main() {
    let cli = Cli::parse();

    match cli.run() {
        Ok(code) => std::process::exit(code),
        Err(err) => {
            eprintln!("purl error: {:#}", err);
            std::process::exit(2);
        }
    }
}

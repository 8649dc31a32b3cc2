mod commands;
mod format;
mod io;

use anyhow::Result;
use clap::{Parser, Subcommand};
use commands::{convert::ConvertArgs, describe::DescribeArgs};

#[derive(Parser)]
#[command(
    name = "protonull",
    about = "Convert nullable protobuf payloads between representations"
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Decode a payload and re-encode it in another representation
    Convert(ConvertArgs),
    /// Print the fields and null/default encodings of a message type
    Describe(DescribeArgs),
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Convert(args) => args.run(),
        Commands::Describe(args) => args.run(),
    }
}

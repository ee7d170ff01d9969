use clap::{Parser, Subcommand};
use mimalloc::MiMalloc;

use crate::travel::TravelArgs;

mod format;
mod travel;

#[global_allocator]
static GLOBAL: MiMalloc = MiMalloc;

#[derive(Parser)]
#[clap(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    #[arg(short, long)]
    debug: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Compute the travel figures of every day in a schedule file
    #[command(visible_alias = "t")]
    Travel {
        #[command(flatten)]
        args: TravelArgs,
    },
    /// Print the JSON schema of the schedule file
    Schema,
}

#[tokio::main]
async fn main() -> Result<(), anyhow::Error> {
    dotenvy::from_filename("./.env.local").ok();
    dotenvy::dotenv().ok();

    let cli = Cli::parse();
    tracing_subscriber::fmt()
        .with_max_level(if cli.debug {
            tracing::Level::DEBUG
        } else {
            tracing::Level::INFO
        })
        .init();

    match cli.command {
        Some(Commands::Travel { args }) => travel::run(args).await?,
        Some(Commands::Schema) => {
            println!(
                "{}",
                glazier_itinerary::json::schema::generate_json_schema()?
            );
        }
        None => {
            // Handle no command provided
        }
    }

    Ok(())
}

use clap::{Parser, Subcommand};
use std::path::PathBuf;

use facility_dash::dashboard::Dashboard;
use facility_dash::tui::{resolve_theme, run_tui, App};

const EXIT_SUCCESS: i32 = 0;
const EXIT_RUNTIME: i32 = 1;
const EXIT_CONFIG: i32 = 4;

#[derive(Subcommand, Debug)]
enum Commands {
    /// Open the interactive dashboard (default if no subcommand)
    Dashboard,
    /// Print the airport lookup table in effect
    Airports {
        /// Print as JSON instead of a table
        #[arg(long)]
        json: bool,
    },
}

#[derive(Parser, Debug)]
#[command(name = "facility-dash")]
#[command(about = "Record airport facilities and rank them by weighted score", long_about = None)]
#[command(version)]
struct Cli {
    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Path to config file (defaults to ~/.config/facility-dash/config.yaml)
    #[arg(short, long, global = true)]
    config: Option<String>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();
    let command = cli.command.unwrap_or(Commands::Dashboard);

    facility_dash::logging::init_logging(cli.verbose);

    let config_path = cli.config.map(PathBuf::from);
    let config = match facility_dash::config::load_config(config_path) {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Config error: {:#}", e);
            std::process::exit(EXIT_CONFIG);
        }
    };

    if let Err(errors) = facility_dash::config::validate_config(&config) {
        eprintln!("Config errors:");
        for error in errors {
            eprintln!("  - {}", error);
        }
        std::process::exit(EXIT_CONFIG);
    }

    let airports = config.airport_table();
    tracing::debug!(
        airports = airports.len(),
        delay = ?config.scoring_delay(),
        "loaded config"
    );

    match command {
        Commands::Airports { json } => {
            if json {
                match facility_dash::output::format_airports_json(&airports) {
                    Ok(out) => println!("{}", out),
                    Err(e) => {
                        eprintln!("Failed to serialize airports: {:#}", e);
                        std::process::exit(EXIT_RUNTIME);
                    }
                }
            } else {
                let use_colors = facility_dash::output::should_use_colors();
                println!(
                    "{}",
                    facility_dash::output::format_airport_table(&airports, use_colors)
                );
            }
        }
        Commands::Dashboard => {
            let theme = resolve_theme(config.theme());
            let app = App::new(Dashboard::new(airports), config.scoring_delay(), theme);
            if let Err(e) = run_tui(app).await {
                eprintln!("Dashboard error: {:#}", e);
                std::process::exit(EXIT_RUNTIME);
            }
        }
    }

    std::process::exit(EXIT_SUCCESS);
}

//! Toronto 311 CLI
//!
//! Command-line interface for the dashboard backend:
//! - Render a dashboard snapshot to HTML
//! - Run one completion prediction
//! - Check backend status
//! - List allowed form values

use clap::{Parser, Subcommand};
use std::path::PathBuf;
use std::sync::Arc;

use toronto311::api::{Backend, BackendClient, PredictionResult};
use toronto311::config::Config;
use toronto311::dashboard::{bootstrap, AppState, DashboardLoader, DashboardStatus};
use toronto311::page::{html, Document};
use toronto311::prediction::{PredictionForm, PredictionHandler};

#[derive(Parser)]
#[command(name = "toronto311")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Toronto 311 service request dashboard")]
#[command(long_about = "Toronto 311 service request dashboard.\nRender snapshots of the analytics dashboard and query the completion model.")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Backend API base URL (overrides config and TORONTO311_API_URL)
    #[arg(long, global = true)]
    pub api_url: Option<String>,

    /// Output format (table, json)
    #[arg(short, long, default_value = "table", global = true)]
    pub format: String,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Render the dashboard with live data to a standalone HTML file
    Snapshot {
        /// Output file (default: stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Predict whether a service request will be completed
    Predict {
        #[arg(long)]
        service_type: String,
        #[arg(long)]
        ward: String,
        #[arg(long)]
        division: String,
        #[arg(long, default_value = "")]
        postal_code: String,
        /// e.g. morning, afternoon, evening
        #[arg(long, default_value = "")]
        time_of_day: String,
        #[arg(long, default_value = "")]
        day_of_week: String,
    },

    /// Show backend status
    Status,

    /// List allowed values for the categorical form fields
    Values,

    /// Generate default config file
    Config {
        /// Output path (default: stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let mut config = Config::load_default();
    if let Some(url) = &cli.api_url {
        config.backend.base_url = url.clone();
    }

    let client = BackendClient::new(&config.backend)?;
    let json = cli.format == "json";

    match cli.command {
        Commands::Snapshot { output } => {
            let loader = DashboardLoader::new(Arc::new(client), Arc::new(AppState::new()));

            let mut page = Document::dashboard();
            bootstrap(&mut page);
            let status = loader.load(&mut page).await;

            if let DashboardStatus::Unavailable { reason } = &status {
                eprintln!("Backend not available at {}: {}", config.backend.base_url, reason);
                eprintln!("Charts are rendered as placeholders.");
            }

            let rendered = html::render_page(&page);
            match output {
                Some(path) => {
                    std::fs::write(&path, rendered)?;
                    println!("Snapshot written to {:?}", path);
                }
                None => {
                    print!("{}", rendered);
                }
            }
        }

        Commands::Predict {
            service_type,
            ward,
            division,
            postal_code,
            time_of_day,
            day_of_week,
        } => {
            let form = PredictionForm {
                service_type,
                ward,
                division,
                postal_code,
                time_of_day,
                day_of_week,
            };

            let mut page = Document::dashboard();
            form.fill(&mut page);

            let handler = PredictionHandler::new(Arc::new(client));
            match handler.predict_form(&mut page, &form).await {
                Ok(result) if json => {
                    println!("{}", serde_json::to_string_pretty(&result)?);
                }
                Ok(result) => print_prediction(&result),
                Err(e) => {
                    eprintln!("{}", e);
                    std::process::exit(1);
                }
            }
        }

        Commands::Status => match client.health().await {
            Ok(health) if json => {
                println!("{}", serde_json::to_string_pretty(&health)?);
            }
            Ok(health) => {
                println!("Toronto 311 v{}", env!("CARGO_PKG_VERSION"));
                println!();
                println!("Backend: {}", client.base_url());
                println!("Status: {}", health.status);
                println!("Chart data: {}", availability(health.chart_data_available));
                println!("ML model: {}", availability(health.ml_model_available));
                if let Some(timestamp) = health.timestamp {
                    println!("Checked at: {}", timestamp);
                }
                if let Some(message) = health.message {
                    println!();
                    println!("{}", message);
                }
            }
            Err(e) => {
                eprintln!("Cannot connect to backend at {}", client.base_url());
                eprintln!("Error: {}", e);
                eprintln!();
                eprintln!("Make sure the backend is running:");
                eprintln!("  python backend/app.py");
                std::process::exit(1);
            }
        },

        Commands::Values => {
            let values = client.categorical_values().await?.into_result()?;

            if json {
                println!("{}", serde_json::to_string_pretty(&values)?);
            } else if values.is_empty() {
                println!("Backend returned no categorical values.");
            } else {
                for (field, allowed) in &values {
                    println!("{} ({}):", field, allowed.len());
                    for value in allowed {
                        println!("  {}", value);
                    }
                    println!();
                }
            }
        }

        Commands::Config { output } => {
            let config = toronto311::config::generate_default_config();

            match output {
                Some(path) => {
                    // Create parent directory if needed
                    if let Some(parent) = path.parent() {
                        std::fs::create_dir_all(parent)?;
                    }
                    std::fs::write(&path, &config)?;
                    println!("Config written to {:?}", path);
                }
                None => {
                    print!("{}", config);
                }
            }
        }
    }

    Ok(())
}

fn print_prediction(result: &PredictionResult) {
    println!("{:<24} {}", "Completion probability", format!("{}%", result.completion_probability));
    println!("{:<24} {}", "Predicted outcome", result.prediction);
    println!("{:<24} {}", "Confidence", format!("{}%", result.confidence));

    if let Some(factors) = &result.factors {
        println!();
        println!("Influencing factors:");
        for factor in factors {
            println!("  - {}", factor);
        }
    }
}

fn availability(available: bool) -> &'static str {
    if available {
        "available"
    } else {
        "not available"
    }
}

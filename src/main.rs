use std::io;
use std::path::PathBuf;

use anyhow::{anyhow, Result};
use brew_compass::advisor::{evaluate, BrewParams, GoalTag, Method, TasteTag};
use brew_compass::config::{Config, ConfigOverrides};
use brew_compass::history::{LogEntry, LogStore};
use brew_compass::output::chart::{render_chart, ChartView};
use brew_compass::output::csv::history_to_csv;
use brew_compass::output::json::render_json;
use brew_compass::output::table::{render_history_table, render_recommendation};
use brew_compass::session::run_session;
use clap::{Parser, Subcommand, ValueEnum};
use tracing::warn;

#[derive(Debug, Clone, Copy, ValueEnum)]
enum OutputFormat {
    Table,
    Json,
    Csv,
}

#[derive(Debug, Parser)]
#[command(name = "brew-compass", about = "Taste-driven coffee brew advisor")]
struct Cli {
    #[arg(short, long)]
    config: Option<PathBuf>,
    #[arg(short, long)]
    method: Option<Method>,
    #[arg(long = "log-path")]
    log_path: Option<String>,
    #[arg(short, long, value_enum, default_value_t = OutputFormat::Table)]
    output: OutputFormat,
    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, clap::Args, Clone, Default)]
struct BrewArgs {
    #[arg(long)]
    dose: Option<String>,
    #[arg(long = "yield")]
    yield_g: Option<String>,
    #[arg(long)]
    time: Option<String>,
    #[arg(long = "temp")]
    temperature: Option<String>,
    #[arg(long)]
    goal: Option<GoalTag>,
    #[arg(long = "coffee")]
    coffee_name: Option<String>,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// One-shot recommendation from the given taste and parameters.
    Advise {
        taste: String,
        #[command(flatten)]
        brew: BrewArgs,
    },
    /// Evaluate and append the brew to the local log.
    Log {
        taste: String,
        #[command(flatten)]
        brew: BrewArgs,
    },
    /// List logged brews, newest first.
    History {
        #[arg(long, default_value_t = 50)]
        limit: usize,
        #[arg(long = "coffee")]
        coffee: Option<String>,
        #[arg(long)]
        method: Option<Method>,
    },
    /// Remove one logged brew by id.
    Delete {
        #[arg(long)]
        id: i64,
    },
    /// Scatter chart of logged brews against reference zones.
    Chart {
        #[arg(long, default_value = "extraction")]
        view: String,
        #[arg(long = "coffee")]
        coffee: Option<String>,
    },
    /// Interactive taste-first wizard with live recomputation.
    Session,
    Config {
        #[arg(long)]
        init: bool,
        #[arg(long)]
        show: bool,
    },
}

fn main() -> Result<()> {
    tracing_subscriber::fmt::init();
    let cli = Cli::parse();

    let config_path = cli.config.clone().unwrap_or_else(Config::default_path);
    let mut config = Config::load(Some(&config_path))?;
    config.apply_overrides(ConfigOverrides {
        method: cli.method,
        log_path: cli.log_path.clone(),
    });

    if let Commands::Config { init, show } = &cli.command {
        if *init {
            Config::write_template(&config_path)?;
            println!("Wrote config template to {}", config_path.display());
        }
        if *show || !*init {
            println!("{}", render_json(&config)?);
        }
        return Ok(());
    }

    let log_path = config.resolved_log_path();
    let mut store = LogStore::open(&log_path)?;

    match &cli.command {
        Commands::Advise { taste, brew } => {
            let (taste, params) = resolve_inputs(&config, taste, brew);
            let rec = evaluate(taste, &params);
            match cli.output {
                OutputFormat::Table => println!("{}", render_recommendation(&rec)),
                OutputFormat::Json => println!("{}", render_json(&rec)?),
                OutputFormat::Csv => {
                    warn!("CSV output for advise not implemented, using JSON");
                    println!("{}", render_json(&rec)?);
                }
            }
        }
        Commands::Log { taste, brew } => {
            let (parsed_taste, params) = resolve_inputs(&config, taste, brew);
            if params.dose_g() <= 0.0 || params.yield_out_g() <= 0.0 {
                return Err(anyhow!(
                    "a logged brew needs --dose and --yield greater than zero"
                ));
            }
            let rec = evaluate(parsed_taste, &params);
            let entry = LogEntry::from_params(
                &params,
                brew.coffee_name.clone(),
                parsed_taste.map(|t| t.as_slug().to_string()),
            );
            let id = store.append(entry)?;
            println!("Logged brew {id}.");
            match cli.output {
                OutputFormat::Table => println!("{}", render_recommendation(&rec)),
                OutputFormat::Json => println!("{}", render_json(&rec)?),
                OutputFormat::Csv => {
                    warn!("CSV output for log not implemented, using JSON");
                    println!("{}", render_json(&rec)?);
                }
            }
        }
        Commands::History {
            limit,
            coffee,
            method,
        } => {
            let entries: Vec<&LogEntry> = store
                .entries()
                .into_iter()
                .filter(|entry| match coffee.as_deref() {
                    Some(filter) => entry.matches_coffee(filter),
                    None => true,
                })
                .filter(|entry| match method {
                    Some(method) => entry.matches_method(*method),
                    None => true,
                })
                .take(*limit)
                .collect();
            match cli.output {
                OutputFormat::Table => println!("{}", render_history_table(&entries)),
                OutputFormat::Json => println!("{}", render_json(&entries)?),
                OutputFormat::Csv => println!("{}", history_to_csv(&entries)?),
            }
        }
        Commands::Delete { id } => {
            if store.delete(*id)? {
                println!("Deleted brew {id}.");
            } else {
                return Err(anyhow!("no logged brew with id {id}"));
            }
        }
        Commands::Chart { view, coffee } => {
            let view = parse_chart_view(view)?;
            println!("{}", render_chart(&store.entries(), view, coffee.as_deref()));
        }
        Commands::Session => {
            let stdin = io::stdin();
            let mut stdout = io::stdout();
            run_session(&config, &mut store, stdin.lock(), &mut stdout)?;
        }
        Commands::Config { .. } => unreachable!("config command handled before dispatch"),
    }

    Ok(())
}

/// An unrecognized taste is not an error here; the engine answers it with
/// the neutral fallback, matching the advisory contract.
fn resolve_inputs(config: &Config, taste: &str, brew: &BrewArgs) -> (Option<TasteTag>, BrewParams) {
    let parsed = match taste.parse::<TasteTag>() {
        Ok(tag) => Some(tag),
        Err(err) => {
            warn!("{err}");
            None
        }
    };
    let params = BrewParams {
        dose: brew.dose.clone(),
        yield_g: brew.yield_g.clone(),
        time: brew.time.clone(),
        temperature: brew.temperature.clone(),
        method: config.brew.method,
        goal: brew.goal.unwrap_or(config.brew.goal),
    };
    (parsed, params)
}

fn parse_chart_view(raw: &str) -> Result<ChartView> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "extraction" | "time" => Ok(ChartView::Extraction),
        "ratio" | "in-out" => Ok(ChartView::Ratio),
        other => Err(anyhow!("unknown chart view: {other} (use extraction|ratio)")),
    }
}

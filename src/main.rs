use anyhow::{anyhow, Context};
use clap::{Parser, Subcommand, ValueEnum};
use std::io::{self, BufRead, Write};
use std::path::PathBuf;
use tracing::info;

use shoe_advisor::classify::classify;
use shoe_advisor::columns::resolve_output_columns;
use shoe_advisor::config::Config;
use shoe_advisor::export;
use shoe_advisor::filter::{
    apply_filters, AnswerSet, DistanceAnswer, FrequencyAnswer, GenderAnswer, GoalAnswer,
    SurfaceAnswer, YesNoAnswer,
};
use shoe_advisor::logging::init_logging;
use shoe_advisor::source;
use shoe_advisor::table::Table;
use shoe_advisor::wizard::WizardSession;

#[derive(Parser)]
#[command(name = "shoe_advisor")]
#[command(about = "Guided questionnaire recommender for a running-shoe catalog")]
#[command(version = "0.1.0")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(clap::Args)]
struct SourceArgs {
    /// Local catalog CSV file
    #[arg(long)]
    data: Option<PathBuf>,
    /// Remote catalog URL (cloud sharing links are rewritten automatically)
    #[arg(long)]
    url: Option<String>,
    /// Directory for cached downloads
    #[arg(long)]
    cache_dir: Option<PathBuf>,
}

#[derive(Clone, Copy, ValueEnum)]
enum OutputFormat {
    Table,
    Csv,
    Json,
}

#[derive(Subcommand)]
enum Commands {
    /// Filter the catalog with all seven answers given up front
    Recommend {
        #[command(flatten)]
        source: SourceArgs,
        #[arg(long, value_enum)]
        gender: GenderAnswer,
        #[arg(long, value_enum)]
        surface: SurfaceAnswer,
        #[arg(long, value_enum)]
        goal: GoalAnswer,
        #[arg(long, value_enum)]
        frequency: FrequencyAnswer,
        #[arg(long, value_enum)]
        distance: DistanceAnswer,
        #[arg(long, value_enum)]
        injury: YesNoAnswer,
        #[arg(long, value_enum)]
        pronation: YesNoAnswer,
        #[arg(long, value_enum, default_value = "table")]
        format: OutputFormat,
        /// Write the result here instead of printing it
        #[arg(long)]
        out: Option<PathBuf>,
    },
    /// Answer the seven questions interactively
    Wizard {
        #[command(flatten)]
        source: SourceArgs,
        /// Also write the recommendations to this CSV file
        #[arg(long)]
        out: Option<PathBuf>,
    },
    /// Show which catalog columns the results will display
    Columns {
        #[command(flatten)]
        source: SourceArgs,
    },
}

fn load_table(args: &SourceArgs, config: &Config) -> anyhow::Result<Table> {
    let cache_dir = args
        .cache_dir
        .clone()
        .unwrap_or_else(|| PathBuf::from(&config.catalog.cache_dir));

    // flags beat config; a URL beats a file at each level
    if let Some(url) = args.url.as_deref() {
        return source::load_catalog_from_url(url, &cache_dir)
            .with_context(|| format!("loading catalog from {url}"));
    }
    if let Some(path) = &args.data {
        return source::load_catalog_from_path(path)
            .with_context(|| format!("loading catalog from {}", path.display()));
    }
    if let Some(url) = config.catalog.url.as_deref() {
        return source::load_catalog_from_url(url, &cache_dir)
            .with_context(|| format!("loading catalog from {url}"));
    }
    if let Some(path) = config.catalog.file.clone().map(PathBuf::from) {
        return source::load_catalog_from_path(&path)
            .with_context(|| format!("loading catalog from {}", path.display()));
    }
    Err(anyhow!(
        "no catalog source: pass --data or --url, or set one in config.toml"
    ))
}

fn recommend(table: &Table, answers: &AnswerSet) -> (Table, usize) {
    let classified = classify(table);
    let result = apply_filters(&classified, answers);
    let display = resolve_output_columns(table);
    let total = result.row_count();
    (result.project(&display), total)
}

fn emit(result: &Table, format: OutputFormat, out: Option<&PathBuf>) -> anyhow::Result<()> {
    let rendered = match format {
        OutputFormat::Table => export::render_text(result),
        OutputFormat::Csv => export::to_csv_string(result)?,
        OutputFormat::Json => export::to_json_string(result)?,
    };
    match out {
        Some(path) => {
            std::fs::write(path, rendered)
                .with_context(|| format!("writing {}", path.display()))?;
            println!("Wrote {} rows to {}", result.row_count(), path.display());
        }
        None => print!("{rendered}"),
    }
    Ok(())
}

fn prompt_step(session: &WizardSession) {
    let q = session.question();
    println!("\nStep {}/7: {}", q.step, q.prompt);
    println!("  1) {}", q.options[0]);
    println!("  2) {}", q.options[1]);
    print!("Choice (1/2, b = back, r = restart): ");
    let _ = io::stdout().flush();
}

fn run_wizard(table: &Table, out: Option<&PathBuf>) -> anyhow::Result<()> {
    let mut session = WizardSession::new();
    let stdin = io::stdin();
    prompt_step(&session);
    for line in stdin.lock().lines() {
        let line = line?;
        match line.trim() {
            "1" | "2" => {
                let picked = if line.trim() == "1" { 0 } else { 1 };
                session.select(picked);
                if session.step() == 7 && session.is_complete() {
                    break;
                }
                session.next();
            }
            "b" => session.prev(),
            "r" => session.reset(),
            "q" => return Ok(()),
            other => println!("Unrecognized input '{other}'"),
        }
        prompt_step(&session);
    }

    let answers = session
        .answer_set()
        .ok_or_else(|| anyhow!("questionnaire ended before all answers were given"))?;
    let (projected, total) = recommend(table, &answers);

    println!("\nRecommendations: {total} match");
    if projected.is_empty() {
        println!("No results. Restart the wizard and try different answers.");
        return Ok(());
    }
    print!("{}", export::render_text(&projected));
    let default_name = PathBuf::from(export::default_export_filename());
    let target = out.unwrap_or(&default_name);
    export::write_csv(&projected, target)?;
    println!("Saved CSV to {}", target.display());
    Ok(())
}

fn main() -> anyhow::Result<()> {
    init_logging();
    let cli = Cli::parse();
    let config = Config::load().context("reading config.toml")?;

    match cli.command {
        Commands::Recommend {
            source,
            gender,
            surface,
            goal,
            frequency,
            distance,
            injury,
            pronation,
            format,
            out,
        } => {
            let table = load_table(&source, &config)?;
            let answers = AnswerSet {
                gender,
                surface,
                goal,
                frequency,
                distance,
                injury,
                pronation,
            };
            info!(rows = table.row_count(), "catalog loaded");
            let (projected, total) = recommend(&table, &answers);
            if total == 0 {
                println!("No matching shoes.");
            }
            emit(&projected, format, out.as_ref())?;
        }
        Commands::Wizard { source, out } => {
            let table = load_table(&source, &config)?;
            run_wizard(&table, out.as_ref())?;
        }
        Commands::Columns { source } => {
            let table = load_table(&source, &config)?;
            for name in resolve_output_columns(&table) {
                println!("{name}");
            }
        }
    }
    Ok(())
}

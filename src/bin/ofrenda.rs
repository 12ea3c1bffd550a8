//! Ofrenda Command Line Interface
//!
//! Terminal surface over the ofrenda app controller: every command drives the
//! same events the browser app emits.
//!
//! # Usage
//!
//! ```bash
//! # Show the altar
//! ofrenda grid
//!
//! # Add someone
//! ofrenda add --name Ana --birth 1950-01-01
//!
//! # Details of the first slot, as the HTML fragment
//! ofrenda show 1 --html
//!
//! # Remove without prompting
//! ofrenda remove 1 --yes
//!
//! # Local mock /data API
//! ofrenda serve-mock --port 3000
//! ```

use anyhow::{anyhow, bail, Context, Result};
use clap::{Args, Parser, Subcommand, ValueEnum};
use colored::Colorize;
use ofrenda::form::FormState;
use ofrenda::grid::Slot;
use ofrenda::{
    AppEvent, AppState, ClientConfig, DetailView, Entry, HttpDataClient, Ofrenda, ReadyStatus,
};
use serde_json::json;
use std::io::{self, BufRead, Write};
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "ofrenda")]
#[command(version)]
#[command(about = "Memorial board client for the ofrenda /data API")]
#[command(long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Output format
    #[arg(long, short = 'o', global = true, default_value = "pretty", value_enum)]
    format: OutputFormat,

    /// Base URL of the /data API
    #[arg(long, global = true, env = "OFRENDA_API_URL")]
    api_url: Option<String>,
}

#[derive(Clone, Copy, PartialEq, Eq, ValueEnum)]
enum OutputFormat {
    Json,
    Pretty,
}

#[derive(Subcommand)]
enum Commands {
    /// Load the entries and print the 12 slots
    Grid,

    /// Show the detail view of a filled slot
    Show {
        /// Slot number, starting at 1
        slot: usize,

        /// Print the HTML fragment instead of text
        #[arg(long)]
        html: bool,
    },

    /// Add someone to the ofrenda
    Add(EntryArgs),

    /// Edit the entry in a slot; only the given fields change
    Edit {
        /// Slot number, starting at 1
        slot: usize,

        #[command(flatten)]
        fields: EntryArgs,
    },

    /// Remove the entry in a slot
    Remove {
        /// Slot number, starting at 1
        slot: usize,

        /// Do not ask for confirmation
        #[arg(long, short)]
        yes: bool,
    },

    /// Run the in-memory mock /data API
    #[cfg(feature = "mock-server")]
    ServeMock {
        #[arg(long, default_value = "127.0.0.1")]
        host: String,

        #[arg(long, default_value_t = 3000)]
        port: u16,
    },
}

/// Form fields settable from the command line
#[derive(Args, Debug, Default)]
struct EntryArgs {
    #[arg(long)]
    name: Option<String>,

    #[arg(long)]
    last_name: Option<String>,

    /// Birth date, YYYY-MM-DD
    #[arg(long)]
    birth: Option<String>,

    /// Death date, YYYY-MM-DD
    #[arg(long)]
    death: Option<String>,

    #[arg(long)]
    description: Option<String>,

    #[arg(long)]
    image_url: Option<String>,
}

impl EntryArgs {
    fn apply(&self, form: &mut FormState) {
        let fields = [
            ("name", &self.name),
            ("lastName", &self.last_name),
            ("birthDate", &self.birth),
            ("deathDate", &self.death),
            ("description", &self.description),
            ("imageUrl", &self.image_url),
        ];
        for (field, value) in fields {
            if let Some(value) = value {
                form.set_value(field, value.as_str());
            }
        }
    }
}

type App = Ofrenda<HttpDataClient>;

// =============================================================================
// MAIN
// =============================================================================

#[tokio::main]
async fn main() -> ExitCode {
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("ofrenda=info")),
        )
        .with_writer(io::stderr)
        .init();

    let cli = Cli::parse();
    let format = cli.format;

    match run(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            if format == OutputFormat::Json {
                println!("{}", json!({ "error": format!("{:#}", e) }));
            } else {
                eprintln!("{}: {:#}", "error".red().bold(), e);
            }
            ExitCode::FAILURE
        }
    }
}

async fn run(cli: Cli) -> Result<()> {
    let mut config = ClientConfig::from_env().context("Invalid configuration")?;
    if let Some(url) = cli.api_url {
        config.api_base_url = url;
    }
    let format = cli.format;

    match cli.command {
        Commands::Grid => cmd_grid(&mut connect(&config)?, format).await,
        Commands::Show { slot, html } => cmd_show(&mut connect(&config)?, slot, html, format).await,
        Commands::Add(fields) => cmd_add(&mut connect(&config)?, &fields, format).await,
        Commands::Edit { slot, fields } => {
            cmd_edit(&mut connect(&config)?, slot, &fields, format).await
        }
        Commands::Remove { slot, yes } => cmd_remove(&mut connect(&config)?, slot, yes, format).await,
        #[cfg(feature = "mock-server")]
        Commands::ServeMock { host, port } => serve_mock(host, port).await,
    }
}

fn connect(config: &ClientConfig) -> Result<App> {
    let client = HttpDataClient::new(config).context("Failed to create API client")?;
    Ok(Ofrenda::new(AppState::new(config), client))
}

// =============================================================================
// COMMAND IMPLEMENTATIONS
// =============================================================================

async fn cmd_grid(app: &mut App, format: OutputFormat) -> Result<()> {
    let status = app.bootstrap().await;
    let state = app.state();
    let grid = state.grid();

    match format {
        OutputFormat::Json => {
            let slots: Vec<_> = grid
                .slots()
                .iter()
                .map(|slot| match slot {
                    Slot::Filled(filled) => json!({
                        "slot": filled.index + 1,
                        "id": filled.entry.id,
                        "name": filled.entry.display_name(),
                        "image": filled.image,
                        "dates": DetailView::from_entry(&filled.entry, &state.assets).dates_line(),
                    }),
                    Slot::Empty { index, .. } => json!({ "slot": index + 1, "empty": true }),
                })
                .collect();
            let output = json!({
                "status": status.as_str(),
                "slots": if status.shows_grid() { slots } else { Vec::new() },
                "hidden": grid.hidden_count(),
            });
            println!("{}", serde_json::to_string_pretty(&output)?);
        }
        OutputFormat::Pretty => {
            if !status.shows_grid() {
                println!("{} The ofrenda is {}", "!".yellow().bold(), status);
                bail!("the /data API is not reachable");
            }
            println!(
                "{} ({} of {} slots filled)",
                "Ofrenda".bold(),
                grid.filled_count(),
                grid.slots().len()
            );
            for slot in grid.slots() {
                match slot {
                    Slot::Filled(filled) => {
                        let view = DetailView::from_entry(&filled.entry, &state.assets);
                        println!(
                            "  [{:>2}] {:<28} {}",
                            filled.index + 1,
                            filled.alt.bold(),
                            view.dates_line().dimmed()
                        );
                    }
                    Slot::Empty { index, .. } => {
                        println!("  [{:>2}] {}", index + 1, slot.alt().dimmed());
                    }
                }
            }
            if grid.hidden_count() > 0 {
                println!("  ... {} more not shown", grid.hidden_count());
            }
        }
    }

    if status == ReadyStatus::NotReady {
        bail!("the /data API is not reachable");
    }
    Ok(())
}

async fn cmd_show(app: &mut App, slot: usize, html: bool, format: OutputFormat) -> Result<()> {
    let entry = load_slot(app, slot).await?;
    app.dispatch(AppEvent::OpenDetail(entry)).await;

    let state = app.state();
    let view = state
        .detail_view()
        .ok_or_else(|| anyhow!("detail view did not open"))?;

    if html {
        println!("{}", view.render_html(&state.assets));
        return Ok(());
    }

    match format {
        OutputFormat::Json => {
            let output = json!({
                "id": view.id,
                "name": view.display_name,
                "image": view.image,
                "birth": view.birth,
                "death": view.death,
                "description": view.description,
            });
            println!("{}", serde_json::to_string_pretty(&output)?);
        }
        OutputFormat::Pretty => {
            println!("{}", view.display_name.bold());
            println!("{}", view.dates_line());
            println!("{} {}", "photo:".dimmed(), view.image);
            if !view.description.is_empty() {
                println!();
                println!("{}", view.description);
            }
        }
    }
    Ok(())
}

async fn cmd_add(app: &mut App, fields: &EntryArgs, format: OutputFormat) -> Result<()> {
    require_ready(app).await?;
    app.dispatch(AppEvent::OpenCreate).await;
    fields.apply(app.state_mut().dialog.form_mut());
    submit(app, format).await
}

async fn cmd_edit(app: &mut App, slot: usize, fields: &EntryArgs, format: OutputFormat) -> Result<()> {
    let entry = load_slot(app, slot).await?;
    app.dispatch(AppEvent::OpenDetail(entry.clone())).await;
    app.dispatch(AppEvent::EditEntry(entry)).await;
    fields.apply(app.state_mut().dialog.form_mut());
    submit(app, format).await
}

async fn cmd_remove(app: &mut App, slot: usize, yes: bool, format: OutputFormat) -> Result<()> {
    let entry = load_slot(app, slot).await?;
    let name = entry.display_name();
    app.dispatch(AppEvent::OpenDetail(entry.clone())).await;
    app.dispatch(AppEvent::RequestDelete(entry)).await;

    let message = app
        .state()
        .dialog
        .confirmation()
        .map(|c| c.message().to_string())
        .ok_or_else(|| anyhow!("entry in slot {} cannot be removed", slot))?;

    let confirmed = yes || prompt(&format!("{} ({})", message, name))?;
    if !confirmed {
        app.dispatch(AppEvent::ConfirmDeclined).await;
        report(format, "cancelled", &format!("{} was not removed", name));
        return Ok(());
    }

    app.dispatch(AppEvent::ConfirmAccepted).await;
    fail_on_notice(app)?;
    report(format, "removed", &format!("Removed {}", name));
    Ok(())
}

#[cfg(feature = "mock-server")]
async fn serve_mock(host: String, port: u16) -> Result<()> {
    use ofrenda::mock_rest_api::{MockRestApiConfig, MockRestApiServer};

    MockRestApiServer::new(MockRestApiConfig { host, port })
        .start()
        .await
        .context("Mock API server failed")
}

// =============================================================================
// HELPERS
// =============================================================================

async fn require_ready(app: &mut App) -> Result<()> {
    match app.bootstrap().await {
        ReadyStatus::Ready => Ok(()),
        status => bail!("the ofrenda is {}", status),
    }
}

/// Load the entries and pick the one shown in `slot` (1-based)
async fn load_slot(app: &mut App, slot: usize) -> Result<Entry> {
    require_ready(app).await?;
    let grid = app.state().grid();
    let index = slot
        .checked_sub(1)
        .ok_or_else(|| anyhow!("slots are numbered from 1"))?;
    grid.get(index)
        .ok_or_else(|| anyhow!("there are only {} slots", grid.slots().len()))?
        .entry()
        .cloned()
        .ok_or_else(|| anyhow!("slot {} is empty", slot))
}

async fn submit(app: &mut App, format: OutputFormat) -> Result<()> {
    let heading = app.state().dialog.heading().unwrap_or_default();
    app.dispatch(AppEvent::SubmitForm).await;
    fail_on_notice(app)?;
    report(format, "saved", &format!("{}: saved", heading));
    Ok(())
}

fn fail_on_notice(app: &App) -> Result<()> {
    match &app.state().notice {
        Some(notice) if notice.is_error() => Err(anyhow!(notice.message.clone())),
        _ => Ok(()),
    }
}

fn report(format: OutputFormat, outcome: &str, message: &str) {
    match format {
        OutputFormat::Json => println!("{}", json!({ "outcome": outcome, "message": message })),
        OutputFormat::Pretty => println!("{} {}", "OK".green(), message),
    }
}

fn prompt(question: &str) -> Result<bool> {
    print!("{} [y/N] ", question);
    io::stdout().flush()?;
    let mut answer = String::new();
    io::stdin().lock().read_line(&mut answer)?;
    Ok(matches!(answer.trim().to_lowercase().as_str(), "y" | "yes"))
}

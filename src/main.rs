use std::path::{Path, PathBuf};
use std::sync::Arc;

use clap::{Args, Parser, Subcommand};
use rand::SeedableRng;
use rand::rngs::StdRng;
use tracing_subscriber::EnvFilter;

use moodcard::card::CardState;
use moodcard::config::AppConfig;
use moodcard::effects::{EffectKind, ORB_ANIMATION_MS, OverlayStyle};
use moodcard::engine::EditorCore;
use moodcard::llm::types::GenerationError;
use moodcard::llm::{ProviderConfig, ProviderGateway, ProviderKind, ReqwestTransport};
use moodcard::overlay::{EffectOverlay, OverlayState};
use moodcard::presets;
use moodcard::quote::{self, QuoteError};
use moodcard::storage::{FileStore, StorageError};
use moodcard::{compose, error::ErrorCode};

#[derive(Debug, thiserror::Error)]
enum CliError {
    #[error(transparent)]
    Storage(#[from] StorageError),
    #[error(transparent)]
    Generation(#[from] GenerationError),
    #[error(transparent)]
    Quote(#[from] QuoteError),
    #[error("http client init failed: {0}")]
    HttpInit(#[from] reqwest::Error),
    #[error("card file {path}: {source}")]
    CardIo {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("card file is not valid JSON: {0}")]
    CardJson(#[from] serde_json::Error),
    #[error("unknown template '{0}'")]
    UnknownTemplate(String),
    #[error("unknown layout '{0}'")]
    UnknownLayout(String),
    #[error("effect overlay stopped before {0} frames were produced")]
    OverlayClosed(usize),
}

impl CliError {
    fn code(&self) -> &'static str {
        match self {
            Self::Storage(e) => e.error_code(),
            Self::Generation(e) => e.error_code(),
            Self::Quote(e) => e.error_code(),
            Self::HttpInit(_) => "E_HTTP_INIT",
            Self::CardIo { .. } | Self::CardJson(_) => "E_CARD_FILE",
            Self::UnknownTemplate(_) | Self::UnknownLayout(_) => "E_UNKNOWN_PRESET",
            Self::OverlayClosed(_) => "E_OVERLAY",
        }
    }
}

#[derive(Parser, Debug)]
#[command(name = "moodcard", about = "Mood card editor engine CLI")]
struct Cli {
    /// Provider settings file.
    #[arg(long, env = "MOODCARD_STORE_PATH")]
    store_path: Option<PathBuf>,

    /// Working card file.
    #[arg(long, env = "MOODCARD_CARD_PATH")]
    card_path: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Manage AI provider settings.
    Providers(ProvidersCommand),
    /// Generate card copy with the selected provider.
    Generate {
        /// Theme hint appended to the prompt.
        #[arg(long)]
        hint: Option<String>,
    },
    /// Fill the card with a quote of the day.
    Quote,
    /// Edit or inspect the working card.
    Card(CardCommand),
    /// Run an overlay effect headlessly and report frame statistics.
    Effect(EffectArgs),
}

#[derive(Args, Debug)]
struct ProvidersCommand {
    #[command(subcommand)]
    command: ProvidersSubcommand,
}

#[derive(Subcommand, Debug)]
enum ProvidersSubcommand {
    List,
    Save {
        provider: ProviderKind,
        #[arg(long, env = "MOODCARD_API_KEY", hide_env_values = true)]
        api_key: String,
        #[arg(long, default_value = "")]
        base_url: String,
        #[arg(long, default_value = "")]
        model: String,
        /// Also make this the selected provider.
        #[arg(long, default_value_t = false)]
        select: bool,
    },
    Remove {
        provider: ProviderKind,
    },
    Select {
        provider: ProviderKind,
    },
}

#[derive(Args, Debug)]
struct CardCommand {
    #[command(subcommand)]
    command: CardSubcommand,
}

#[derive(Subcommand, Debug)]
enum CardSubcommand {
    /// Start over from the default card.
    New,
    /// Apply a template by id; lists templates when omitted.
    Template { id: Option<String> },
    /// Apply a layout preset by id; lists layouts when omitted.
    Layout { id: Option<String> },
    /// Apply a random style.
    Random {
        #[arg(long)]
        seed: Option<u64>,
    },
    /// Print the card as JSON.
    Show,
}

#[derive(Args, Debug)]
struct EffectArgs {
    #[arg(long)]
    kind: EffectKind,
    #[arg(long, default_value_t = 60)]
    frames: usize,
    #[arg(long, default_value_t = 380.0)]
    width: f64,
    #[arg(long, default_value_t = 506.0)]
    height: f64,
}

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let mut config = AppConfig::from_env();
    if let Some(path) = cli.store_path {
        config.store_path = path;
    }
    if let Some(path) = cli.card_path {
        config.card_path = path;
    }

    if let Err(e) = run(&config, cli.command).await {
        eprintln!("error [{}]: {e}", e.code());
        std::process::exit(1);
    }
}

async fn run(config: &AppConfig, command: Command) -> Result<(), CliError> {
    match command {
        Command::Providers(cmd) => run_providers(config, cmd),
        Command::Generate { hint } => run_generate(config, hint.as_deref()).await,
        Command::Quote => run_quote(config).await,
        Command::Card(cmd) => run_card(config, cmd),
        Command::Effect(args) => run_effect(args).await,
    }
}

// =============================================================================
// PROVIDERS / GENERATION
// =============================================================================

fn open_gateway(config: &AppConfig) -> Result<ProviderGateway<FileStore>, CliError> {
    let store = FileStore::open(&config.store_path)?;
    let transport = ReqwestTransport::new(config.timeouts)?;
    Ok(ProviderGateway::new(store, Arc::new(transport)))
}

fn run_providers(config: &AppConfig, cmd: ProvidersCommand) -> Result<(), CliError> {
    let mut gateway = open_gateway(config)?;
    match cmd.command {
        ProvidersSubcommand::List => {
            let selected = gateway.store().selected_kind();
            for kind in ProviderKind::ALL {
                let mark = if selected == Some(kind) { "*" } else { " " };
                let status = match gateway.store().get(kind) {
                    Some(cfg) => format!(
                        "configured  base={}  model={}",
                        moodcard::llm::config::effective_base_url(cfg),
                        moodcard::llm::config::effective_model(cfg)
                    ),
                    None => "not configured".to_owned(),
                };
                println!("{mark} {:<11} {:<20} {status}", kind.id(), kind.display_name());
            }
        }
        ProvidersSubcommand::Save { provider, api_key, base_url, model, select } => {
            gateway.save(ProviderConfig { provider, api_key, base_url, model_name: model })?;
            if select {
                gateway.select(provider)?;
            }
            println!("saved {provider}");
        }
        ProvidersSubcommand::Remove { provider } => {
            let removed = gateway.remove(provider)?;
            println!("{}", if removed.is_some() { "removed" } else { "nothing to remove" });
        }
        ProvidersSubcommand::Select { provider } => {
            gateway.select(provider)?;
            if gateway.selected().is_none() {
                println!("selected {provider} (no API key saved yet)");
            } else {
                println!("selected {provider}");
            }
        }
    }
    Ok(())
}

async fn run_generate(config: &AppConfig, hint: Option<&str>) -> Result<(), CliError> {
    let gateway = open_gateway(config)?;
    let mut editor = EditorCore::with_card(load_card(&config.card_path)?);

    let guard = editor.begin_generation()?;
    let result = gateway.generate(&compose::default_prompt(hint)).await;
    if editor.finish_generation(guard, result)? {
        save_card(&config.card_path, &editor.card)?;
        println!("{}\n{}", editor.card.text, editor.card.author);
    } else {
        println!("provider returned no text; card unchanged");
    }
    Ok(())
}

async fn run_quote(config: &AppConfig) -> Result<(), CliError> {
    let http = reqwest::Client::builder()
        .timeout(std::time::Duration::from_secs(config.timeouts.request_secs))
        .connect_timeout(std::time::Duration::from_secs(config.timeouts.connect_secs))
        .build()?;
    let quote = quote::fetch_quote(&http, &config.quote_url).await?;

    let mut editor = EditorCore::with_card(load_card(&config.card_path)?);
    editor.apply_quote(&quote);
    save_card(&config.card_path, &editor.card)?;
    println!("{}\n{}", quote.text, quote.author);
    Ok(())
}

// =============================================================================
// CARD
// =============================================================================

fn load_card(path: &Path) -> Result<CardState, CliError> {
    match std::fs::read_to_string(path) {
        Ok(raw) => {
            let mut card: CardState = serde_json::from_str(&raw)?;
            card.sanitize();
            Ok(card)
        }
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(CardState::default()),
        Err(source) => Err(CliError::CardIo { path: path.to_owned(), source }),
    }
}

fn save_card(path: &Path, card: &CardState) -> Result<(), CliError> {
    let raw = serde_json::to_string_pretty(card)?;
    std::fs::write(path, raw).map_err(|source| CliError::CardIo { path: path.to_owned(), source })
}

fn run_card(config: &AppConfig, cmd: CardCommand) -> Result<(), CliError> {
    let path = &config.card_path;
    match cmd.command {
        CardSubcommand::New => {
            save_card(path, &CardState::default())?;
            println!("new card at {}", path.display());
        }
        CardSubcommand::Template { id: None } => {
            for t in presets::templates() {
                println!("{:<14} {} ({})", t.id, t.name, t.preview_color);
            }
        }
        CardSubcommand::Template { id: Some(id) } => {
            let mut editor = EditorCore::with_card(load_card(path)?);
            if !editor.apply_template(&id) {
                return Err(CliError::UnknownTemplate(id));
            }
            save_card(path, &editor.card)?;
            println!("applied template {id}");
        }
        CardSubcommand::Layout { id: None } => {
            for l in presets::layouts() {
                println!("{:<17} {}", l.id, l.name);
            }
        }
        CardSubcommand::Layout { id: Some(id) } => {
            let mut editor = EditorCore::with_card(load_card(path)?);
            if !editor.apply_layout(&id) {
                return Err(CliError::UnknownLayout(id));
            }
            save_card(path, &editor.card)?;
            println!("applied layout {id}");
        }
        CardSubcommand::Random { seed } => {
            let mut rng = seed.map_or_else(StdRng::from_os_rng, StdRng::seed_from_u64);
            let mut editor = EditorCore::with_card(load_card(path)?);
            editor.randomize_style(&mut rng);
            save_card(path, &editor.card)?;
            println!(
                "font={:?} bg={} text={} effect={:?}",
                editor.card.font_family, editor.card.bg_color, editor.card.font_color, editor.card.effect
            );
        }
        CardSubcommand::Show => {
            let card = load_card(path)?;
            println!("{}", serde_json::to_string_pretty(&card)?);
            println!("background: {}", card.active_background().css());
        }
    }
    Ok(())
}

// =============================================================================
// EFFECT
// =============================================================================

async fn run_effect(args: EffectArgs) -> Result<(), CliError> {
    let mut overlay = EffectOverlay::new();
    let mut rx = overlay.subscribe();

    if overlay.sync(args.kind, args.width, args.height) == OverlayState::Idle {
        match args.kind.overlay_style() {
            OverlayStyle::Hidden | OverlayStyle::Canvas => println!("{:?}: no overlay at this size", args.kind),
            OverlayStyle::Orbs(orbs) => {
                println!("{} orbs drifting on a {ORB_ANIMATION_MS}ms cycle", orbs.len());
                for orb in orbs {
                    println!("orb {} at ({}%, {}%) delay {}ms", orb.color, orb.left_pct, orb.top_pct, orb.animation_delay_ms);
                }
            }
            OverlayStyle::Grain { opacity } => println!("grain layer at opacity {opacity}"),
        }
        return Ok(());
    }

    let mut received = 0;
    while received < args.frames {
        if rx.changed().await.is_err() {
            return Err(CliError::OverlayClosed(args.frames));
        }
        let Some(frame) = rx.borrow_and_update().clone() else {
            continue;
        };
        received += 1;
        println!("frame {received:>4}  t={:>8.1}ms  shapes={}", frame.elapsed_ms, frame.shape_count());
    }
    overlay.stop();
    Ok(())
}

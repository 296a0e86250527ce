//! Stage Timer CLI - countdown timers with warning thresholds
//!
//! The timer steps through up to three bands on its way to the alarm:
//! - countdown, above the warning threshold
//! - warning, once the warning threshold is reached
//! - final, once the final threshold is reached

use std::sync::Arc;

use anyhow::{Context, Result};
use clap::{CommandFactory, Parser};
use tokio::sync::{mpsc, Mutex};

use stagetimer::cli::{AddArgs, Cli, Commands, Display, RemoveArgs, RunArgs};
use stagetimer::collection::{TimerAddress, TimerId};
use stagetimer::engine::{CountdownEngine, TimerEvent};
use stagetimer::session::TimerSession;
use stagetimer::store::DocumentStore;
use stagetimer::types::{Thresholds, TimerMode};

/// Main entry point
#[tokio::main(flavor = "current_thread")]
async fn main() {
    // Initialize logging
    init_tracing();

    // Parse command line arguments
    let cli = Cli::parse();

    // Execute command
    if let Err(e) = execute(cli).await {
        Display::show_error(&format!("{:#}", e));
        std::process::exit(1);
    }
}

/// Initializes the tracing subscriber for logging.
fn init_tracing() {
    use tracing_subscriber::{fmt, EnvFilter};

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));

    fmt()
        .with_env_filter(filter)
        .with_target(false)
        .without_time()
        .init();
}

/// Executes the CLI command.
async fn execute(cli: Cli) -> Result<()> {
    // Set verbose logging if requested
    if cli.verbose {
        tracing::info!("Verbose mode enabled");
    }

    let store = match cli.document {
        Some(path) => DocumentStore::new(path),
        None => DocumentStore::at_default_path(),
    };

    match cli.command {
        Some(Commands::Run(args)) => run_countdown(args, &store).await,
        Some(Commands::Add(args)) => add_timer(&args, &store),
        Some(Commands::List) => list_timers(&store),
        Some(Commands::Remove(args)) => remove_timer(&args, &store),
        Some(Commands::Completions { shell }) => {
            generate_completions(shell);
            Ok(())
        }
        None => {
            // No command provided, show help
            Cli::command().print_help()?;
            Ok(())
        }
    }
}

/// Runs a countdown in the foreground until the alarm, a stop, or Ctrl-C.
async fn run_countdown(args: RunArgs, store: &DocumentStore) -> Result<()> {
    let (engine, mut events) = match &args.timer {
        Some(raw) => {
            let id = TimerId::parse(raw)
                .with_context(|| format!("'{}' is not a valid timer id", raw))?;
            let model = store.load()?;
            let mut session = TimerSession::with_model(model);
            session
                .activate_by_id(id)
                .with_context(|| format!("no timer {} in {}", id, store.path().display()))?
        }
        None => {
            let thresholds = Thresholds::new(args.starting, args.warning, args.final_seconds);
            let (tx, rx) = mpsc::unbounded_channel();
            (Arc::new(Mutex::new(CountdownEngine::new(thresholds, tx))), rx)
        }
    };

    {
        let mut engine = engine.lock().await;
        if !args.json {
            Display::show_run_header(engine.thresholds());
        }
        engine.start();
    }
    let cadence = tokio::spawn(CountdownEngine::run(engine.clone()));

    let mut done = false;
    while !done {
        tokio::select! {
            maybe_event = events.recv() => {
                match maybe_event {
                    Some(event) => {
                        done = is_terminal_event(&event);
                        if args.json {
                            let line = serde_json::to_string(&event)
                                .context("failed to encode event")?;
                            println!("{}", line);
                        } else {
                            Display::show_event(&event);
                        }
                    }
                    None => done = true,
                }
            }
            _ = tokio::signal::ctrl_c() => {
                // the Stopped event closes the loop on arrival
                engine.lock().await.stop();
            }
        }
    }

    cadence.abort();
    Ok(())
}

/// Returns true for the last event a foreground run waits for.
fn is_terminal_event(event: &TimerEvent) -> bool {
    match event {
        TimerEvent::Stopped { .. } => true,
        TimerEvent::Tick { snapshot } => snapshot.mode == TimerMode::Alarm,
        _ => false,
    }
}

/// Adds a timer to the document.
fn add_timer(args: &AddArgs, store: &DocumentStore) -> Result<()> {
    let thresholds = Thresholds::new(args.starting, args.warning, args.final_seconds);
    if let Err(message) = thresholds.validate() {
        anyhow::bail!(message);
    }

    let mut model = store.load()?;
    let created = {
        let timer = match args.item {
            Some(item) => model.create_timer_at(TimerAddress::new(args.group, item))?,
            None => model.create_timer_at_end(args.group)?,
        };
        timer.thresholds = thresholds;
        timer.clone()
    };
    let address = model
        .address_of(created.id())
        .context("created timer missing from document")?;

    store.save(&model)?;
    Display::show_added(&created, address);
    Ok(())
}

/// Lists the timers in the document.
fn list_timers(store: &DocumentStore) -> Result<()> {
    let model = store.load()?;
    Display::show_document(&model);
    Ok(())
}

/// Removes a timer from the document.
fn remove_timer(args: &RemoveArgs, store: &DocumentStore) -> Result<()> {
    let id = TimerId::parse(&args.id)
        .with_context(|| format!("'{}' is not a valid timer id", args.id))?;

    let mut model = store.load()?;
    model
        .remove_timer(id)
        .with_context(|| format!("no timer {} in {}", id, store.path().display()))?;

    store.save(&model)?;
    Display::show_removed(&args.id);
    Ok(())
}

/// Generates shell completion scripts.
fn generate_completions(shell: clap_complete::Shell) {
    use clap_complete::generate;
    use std::io;

    let mut cmd = Cli::command();
    let bin_name = cmd.get_name().to_string();
    generate(shell, &mut cmd, bin_name, &mut io::stdout());
}

// ============================================================================
// Tests
// ============================================================================

//! Airtype - Gesture-Driven Virtual Keyboard Engine
//!
//! Replays fingertip traces or synthetic hand motion through the
//! pinch-to-type engine and reports the resulting transcript.

use airtype::app::cli::{Cli, Commands, ConfigAction};
use airtype::app::config::Config;
use airtype::gesture::emitter::EmitterConfig;
use airtype::inject::TraceInjector;
use airtype::layout::keyboard::KeyboardLayout;
use airtype::session::source::{PositionSource, SampleTrace, SyntheticHandSource, TraceSource};
use airtype::session::Session;
use airtype::time::timebase::MonoClock;
use std::path::Path;
use tracing::info;
use tracing_subscriber::EnvFilter;

fn main() -> anyhow::Result<()> {
    // Parse CLI arguments first so we can use --verbose to set log level
    let cli = Cli::parse_args();

    // Initialize tracing (--verbose enables debug-level output)
    let default_level = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)),
        )
        .init();

    // Initialize timebase
    MonoClock::init();

    // Load config
    let config = if let Some(path) = &cli.config {
        Config::load(path)?
    } else {
        Config::load_default()?
    };

    // Execute command
    match cli.command {
        Commands::Replay { input, output } => {
            run_replay(&input, output.as_deref(), &config)?;
        }
        Commands::Synth { text, output } => {
            run_synth(&text, output.as_deref(), &config)?;
        }
        Commands::Layout { detailed } => {
            run_layout(detailed, &config)?;
        }
        Commands::Init { force } => {
            run_init(force, &config)?;
        }
        Commands::Config { action } => {
            run_config(action, &config)?;
        }
    }

    Ok(())
}

fn run_replay(input: &Path, output: Option<&Path>, config: &Config) -> anyhow::Result<()> {
    info!("Replaying trace {:?}", input);

    if !input.exists() {
        anyhow::bail!("Trace file not found: {:?}", input);
    }

    let mut source = TraceSource::from_file(input)?;

    let name = input
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_else(|| "replay".to_string());
    let mut session = Session::from_config(config)?
        .with_injector(Box::new(TraceInjector))
        .with_name(&name);

    // Set up Ctrl+C handler
    let stop_flag = std::sync::Arc::new(std::sync::atomic::AtomicBool::new(false));
    let stop_flag_handler = stop_flag.clone();

    ctrlc::set_handler(move || {
        stop_flag_handler.store(true, std::sync::atomic::Ordering::SeqCst);
    })?;

    let processed = session.run(&mut source, &stop_flag);
    finish_session(session, processed, output)
}

fn run_synth(text: &str, output: Option<&Path>, config: &Config) -> anyhow::Result<()> {
    info!("Typing phrase with synthetic hand: {:?}", text);

    let layout = KeyboardLayout::build(&config.layout_spec())?;
    let emitter_config = EmitterConfig {
        touch_threshold: config.gesture.touch_threshold_px,
        press_delay: config.gesture.press_delay(),
    };
    let mut source = SyntheticHandSource::from_phrase(text, &layout, &emitter_config)?;

    // Collect the generated samples into a replayable trace while typing
    let mut trace = SampleTrace::new("synth".to_string(), config.surface_size());
    let mut session = Session::from_config(config)?.with_name("synth");
    while let Some(sample) = source.next_sample() {
        session.process_sample(&sample);
        trace.push(sample);
    }

    let processed = trace.len();
    if let Some(path) = output {
        trace.save(path)?;
        info!("Saved trace to {:?}", path);
    }
    finish_session(session, processed, None)?;
    if let Some(path) = output {
        println!("  Trace:    {:?}", path);
    }

    Ok(())
}

fn finish_session(
    session: Session,
    processed: usize,
    output: Option<&Path>,
) -> anyhow::Result<()> {
    let transcript = session.finalize();

    println!("\nSession Complete");
    println!("  Samples:  {}", processed);
    println!("  Events:   {}", transcript.metadata.event_count);
    println!("  Duration: {} ms", transcript.metadata.duration_ms);
    println!("  Text:     {:?}", transcript.final_text);

    if let Some(path) = output {
        transcript.save(path)?;
        info!("Saved transcript to {:?}", path);
        println!("  Output:   {:?}", path);
    }

    Ok(())
}

fn run_layout(detailed: bool, config: &Config) -> anyhow::Result<()> {
    let layout = KeyboardLayout::build(&config.layout_spec())?;

    println!(
        "Keyboard layout: {} keys in {} rows",
        layout.len(),
        layout.rows().len()
    );

    if detailed {
        for slot in layout.slots() {
            println!(
                "  {:>6}  x={:<6} y={:<6} {}x{}",
                slot.key.label(),
                slot.rect.x,
                slot.rect.y,
                slot.rect.width,
                slot.rect.height
            );
        }
    } else {
        for row in layout.rows() {
            println!("  {}", row.join(" "));
        }
    }

    Ok(())
}

fn run_init(force: bool, config: &Config) -> anyhow::Result<()> {
    let config_path = Config::default_path()?;

    if config_path.exists() && !force {
        anyhow::bail!(
            "Config already exists at {:?}. Use --force to overwrite.",
            config_path
        );
    }

    config.save(&config_path)?;
    println!("Created config at {:?}", config_path);
    println!("\nConfig content:\n{}", config.to_toml()?);

    Ok(())
}

fn run_config(action: ConfigAction, config: &Config) -> anyhow::Result<()> {
    match action {
        ConfigAction::Show => {
            println!("Configuration ({:?}):\n", Config::default_path()?);
            println!("{}", config.to_toml()?);
        }
        ConfigAction::Get { key } => {
            let value: toml::Value = toml::from_str(&config.to_toml()?)?;
            match lookup_toml(&value, &key) {
                Some(v) => println!("{} = {}", key, v),
                None => anyhow::bail!("Configuration key '{}' not found", key),
            }
        }
        ConfigAction::Set { key, value } => {
            let config_path = Config::default_path()?;
            if !config_path.exists() {
                anyhow::bail!("No config file found. Run 'airtype init' first.");
            }

            // Load, modify through the TOML tree, validate, save
            let content = std::fs::read_to_string(&config_path)?;
            let mut tree: toml::Value = toml::from_str(&content)?;
            if !assign_toml(&mut tree, &key, &value) {
                anyhow::bail!("Failed to set '{}'. Key may not exist in config.", key);
            }
            let updated: Config = tree.try_into()?;
            updated.validate()?;
            updated.save(&config_path)?;
            println!("Set {} = {}", key, value);
        }
        ConfigAction::Reset { force } => {
            let config_path = Config::default_path()?;

            if config_path.exists() && !force {
                println!("Config exists at {:?}", config_path);
                println!("Use --force to reset to defaults");
                return Ok(());
            }

            Config::default().save(&config_path)?;
            println!("Configuration reset to defaults at {:?}", config_path);
        }
    }

    Ok(())
}

/// Walk a TOML tree along a dotted key.
fn lookup_toml<'a>(root: &'a toml::Value, key: &str) -> Option<&'a toml::Value> {
    key.split('.')
        .try_fold(root, |node, part| node.get(part))
}

/// Assign a value along a dotted key, parsing the string into the type
/// of the existing value. Returns false when the key does not exist.
fn assign_toml(root: &mut toml::Value, key: &str, raw: &str) -> bool {
    let mut parts = key.split('.').peekable();
    let mut node = root;
    while let Some(part) = parts.next() {
        if parts.peek().is_none() {
            let Some(existing) = node.get(part) else {
                return false;
            };
            let parsed = match existing {
                toml::Value::Integer(_) => raw.parse::<i64>().map(toml::Value::Integer).ok(),
                toml::Value::Float(_) => raw.parse::<f64>().map(toml::Value::Float).ok(),
                toml::Value::Boolean(_) => raw.parse::<bool>().map(toml::Value::Boolean).ok(),
                toml::Value::String(_) => Some(toml::Value::String(raw.to_string())),
                _ => None,
            };
            let Some(parsed) = parsed else {
                return false;
            };
            node[part] = parsed;
            return true;
        }
        match node.get_mut(part) {
            Some(next) => node = next,
            None => return false,
        }
    }
    false
}

use brew_core::*;
use chrono::{DateTime, Local, TimeZone, Utc};
use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "brew")]
#[command(about = "Daily coffee cup counter and espresso bar", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    /// Override data directory
    #[arg(long, global = true)]
    data_dir: Option<PathBuf>,

    /// Evaluate as if the current time were this RFC 3339 instant; its UTC
    /// offset becomes the active timezone
    #[arg(long, global = true, value_name = "RFC3339")]
    at: Option<String>,
}

#[derive(Subcommand)]
enum Commands {
    /// Log one cup now and show any caution
    Add,

    /// Remove the most recent cup logged today
    Undo,

    /// Show today's cup count and sleep outlook (default)
    Status,

    /// List the espresso bar
    Recipes,

    /// Show one recipe with its ratio breakdown
    Recipe {
        /// Recipe name, e.g. "latte" (case-insensitive)
        name: String,
    },
}

fn main() -> Result<()> {
    // Initialize logging
    brew_core::logging::init();

    let cli = Cli::parse();

    // Determine data directory
    let config = Config::load()?;
    let data_dir = cli.data_dir.unwrap_or_else(|| config.data.data_dir.clone());
    let command = cli.command.unwrap_or(Commands::Status);

    // "Now" and the timezone are resolved once here; everything below them
    // is deterministic
    match cli.at.as_deref() {
        Some(raw) => {
            let pinned = DateTime::parse_from_rfc3339(raw)
                .map_err(|e| Error::Config(format!("Invalid --at value '{}': {}", raw, e)))?;
            let tz = *pinned.offset();
            run(command, data_dir, &config, pinned.with_timezone(&Utc), &tz)
        }
        None => {
            let now = Local::now();
            run(command, data_dir, &config, now.with_timezone(&Utc), &Local)
        }
    }
}

fn run<Tz: TimeZone>(
    command: Commands,
    data_dir: PathBuf,
    config: &Config,
    now: DateTime<Utc>,
    tz: &Tz,
) -> Result<()> {
    let store = FileStore::new(data_dir);
    let mut tracker = CupTracker::new(store, config.cautions.policy());

    match command {
        Commands::Add => cmd_add(&mut tracker, now, tz),
        Commands::Undo => cmd_undo(&mut tracker, now, tz),
        Commands::Status => cmd_status(&tracker, now, tz),
        Commands::Recipes => cmd_recipes(),
        Commands::Recipe { name } => cmd_recipe(&name),
    }
}

fn cmd_add<Tz: TimeZone>(
    tracker: &mut CupTracker<FileStore>,
    now: DateTime<Utc>,
    tz: &Tz,
) -> Result<()> {
    let added = tracker.add_cup(now, tz)?;

    println!("\n✓ Cup logged! {}", cups_line(added.count));

    if let Some(caution) = added.caution {
        println!();
        println!("  Heads up: {}", caution);
    }

    println!();
    Ok(())
}

fn cmd_undo<Tz: TimeZone>(
    tracker: &mut CupTracker<FileStore>,
    now: DateTime<Utc>,
    tz: &Tz,
) -> Result<()> {
    if tracker.count(now, tz) == 0 {
        println!("\nNo cups logged today.\n");
        return Ok(());
    }

    let count = tracker.remove_last(now, tz)?;
    println!("\n✓ Removed the latest cup. {}\n", cups_line(count));
    Ok(())
}

fn cmd_status<Tz: TimeZone>(
    tracker: &CupTracker<FileStore>,
    now: DateTime<Utc>,
    tz: &Tz,
) -> Result<()> {
    let count = tracker.count(now, tz);

    println!("\n╭─────────────────────────────────────────╮");
    println!("│  BREWLOG");
    println!("╰─────────────────────────────────────────╯");
    println!();
    println!("  {}", cups_line(count));

    if let Some(summary) = tracker.summary(now, tz) {
        println!("  {}", summary);
    }

    println!();
    Ok(())
}

fn cmd_recipes() -> Result<()> {
    let recipes = validated_recipes()?;

    println!("\n╭─────────────────────────────────────────╮");
    println!("│  THE ESPRESSO BAR");
    println!("╰─────────────────────────────────────────╯");
    println!();

    for recipe in recipes {
        println!("  {:<12} {:<7} {}", recipe.name, recipe.ratio_label, recipe.description);
    }

    println!();
    println!("  ℹ Try `brew recipe <name>` for the full breakdown");
    println!();
    Ok(())
}

fn cmd_recipe(name: &str) -> Result<()> {
    validated_recipes()?;

    let recipe = find_recipe(name).ok_or_else(|| {
        Error::Other(format!(
            "Unknown recipe '{}'. Try: latte, flat white, cappuccino, cortado.",
            name
        ))
    })?;

    println!("\n╭─────────────────────────────────────────╮");
    println!("│  {}", recipe.name.to_uppercase());
    println!("╰─────────────────────────────────────────╯");
    println!();
    println!("  {}", recipe.description);
    println!();
    println!("  Ratio {}", recipe.ratio_label);
    println!("  {}", ratio_bar(recipe));
    println!("  {}", ratio_legend(recipe));
    println!();
    println!("  How to make");

    for (index, step) in recipe.instructions.iter().enumerate() {
        println!("  {}. {}", index + 1, step);
    }

    println!();
    Ok(())
}

fn validated_recipes() -> Result<&'static [Recipe]> {
    let recipes = default_recipes();
    let errors = catalog::validate(recipes);
    if !errors.is_empty() {
        eprintln!("Catalog validation errors:");
        for error in errors {
            eprintln!("  - {}", error);
        }
        return Err(Error::CatalogValidation("Invalid catalog".into()));
    }
    Ok(recipes)
}

fn cups_line(count: usize) -> String {
    if count == 1 {
        "1 cup today".into()
    } else {
        format!("{} cups today", count)
    }
}

/// Proportional text rendering of the recipe's ratio bar, alternating fill
/// glyphs per component like the app's alternating accent segments
fn ratio_bar(recipe: &Recipe) -> String {
    const FILLS: [char; 2] = ['█', '░'];
    const CELLS_PER_PART: u32 = 4;

    let mut bar = String::new();
    for (index, part) in recipe.ratio_components.iter().enumerate() {
        for _ in 0..(part.parts * CELLS_PER_PART) {
            bar.push(FILLS[index % 2]);
        }
    }
    bar
}

fn ratio_legend(recipe: &Recipe) -> String {
    recipe
        .ratio_components
        .iter()
        .map(|part| format!("{} {}", part.label, part.parts))
        .collect::<Vec<_>>()
        .join(" · ")
}

use clap::{Parser, Subcommand, ValueEnum};
use konv_core::*;
use std::path::PathBuf;
use uuid::Uuid;

#[derive(Parser)]
#[command(name = "konv")]
#[command(about = "Length unit converter", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    /// Override data directory
    #[arg(long, global = true)]
    data_dir: Option<PathBuf>,

    /// Use a specific config file
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Enable debug logging on stderr
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Convert a value between two units (default)
    Convert {
        /// Value to convert
        #[arg(allow_hyphen_values = true)]
        value: String,

        /// Source unit symbol
        #[arg(long)]
        from: Option<String>,

        /// Target unit symbol
        #[arg(long)]
        to: Option<String>,

        /// Exchange source and target units
        #[arg(long)]
        swap: bool,

        /// Save the result to history
        #[arg(long)]
        save: bool,

        /// Also print the full comparison table
        #[arg(long)]
        table: bool,
    },

    /// Show a value in every known unit
    Table {
        /// Value to convert
        #[arg(allow_hyphen_values = true)]
        value: String,

        /// Source unit symbol
        #[arg(long)]
        from: Option<String>,

        /// Print as a copy-ready text block
        #[arg(long, conflicts_with = "row")]
        copy: bool,

        /// Print only this unit's row as "<value> <unit>"
        #[arg(long, value_name = "UNIT")]
        row: Option<String>,
    },

    /// List known units
    Units,

    /// Show or manage saved conversions
    History {
        #[command(subcommand)]
        action: Option<HistoryAction>,
    },

    /// Show or change the display theme
    Theme {
        #[arg(value_enum)]
        action: Option<ThemeAction>,
    },
}

#[derive(Subcommand)]
enum HistoryAction {
    /// List saved conversions, newest first (default)
    List,
    /// Remove every saved conversion
    Clear,
    /// Remove one saved conversion
    Remove {
        /// Entry id as shown by `history list`
        id: Uuid,
    },
}

#[derive(Clone, Copy, ValueEnum)]
enum ThemeAction {
    Light,
    Dark,
    Toggle,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    if cli.verbose {
        konv_core::logging::init_with_level("debug");
    } else {
        konv_core::logging::init();
    }

    let mut config = match &cli.config {
        Some(path) => Config::load_from(path)?,
        None => Config::load()?,
    };
    if let Some(data_dir) = cli.data_dir {
        config.data.data_dir = data_dir;
    }

    let table = config.unit_table()?;
    config.validate(&table)?;

    match cli.command {
        Some(Commands::Convert {
            value,
            from,
            to,
            swap,
            save,
            table: show_table,
        }) => cmd_convert(&config, &table, &value, from, to, swap, save, show_table),
        Some(Commands::Table {
            value,
            from,
            copy,
            row,
        }) => cmd_table(&config, &table, &value, from, copy, row),
        Some(Commands::Units) => cmd_units(&table),
        Some(Commands::History { action }) => {
            cmd_history(&config, action.unwrap_or(HistoryAction::List))
        }
        Some(Commands::Theme { action }) => cmd_theme(&config, action),
        None => {
            // Default to converting one unit with the configured defaults
            cmd_convert(&config, &table, "1", None, None, false, false, false)
        }
    }
}

#[allow(clippy::too_many_arguments)]
fn cmd_convert(
    config: &Config,
    table: &UnitTable,
    raw_value: &str,
    from: Option<String>,
    to: Option<String>,
    swap: bool,
    save: bool,
    show_table: bool,
) -> Result<()> {
    let mut from = from.unwrap_or_else(|| config.defaults.from.clone());
    let mut to = to.unwrap_or_else(|| config.defaults.to.clone());
    if swap {
        std::mem::swap(&mut from, &mut to);
    }

    // Unknown units are an error even without a value to convert
    let from_def = table.lookup(&from)?;
    let to_def = table.lookup(&to)?;

    let Some(value) = parse_value(raw_value) else {
        println!("{}", SENTINEL);
        println!("Enter a value to see the result");
        return Ok(());
    };

    let request = ConversionRequest::new(value, from.as_str(), to.as_str());
    let result = convert_request(table, &request)?;

    println!("{}", clipboard::result_line(&result));
    println!(
        "{} from {} {}",
        to_def.label,
        format_value(value),
        from_def.label
    );
    println!("1 {} = {} {}", from, format_value(scale(table, &from, &to)?), to);

    if show_table {
        println!();
        let rows = build_comparison_table(table, value, &from)?;
        print_rows(&rows);
    }

    if save {
        if format::is_sentinel(&result.display) {
            println!("\nNothing to save for a non-finite result.");
            return Ok(());
        }
        let entry = HistoryEntry::from_result(&request, &result);
        let evicted = HistoryStore::update(
            &config.history_path(),
            config.history.max_entries,
            |store| store.push(entry),
        )?;
        if evicted > 0 {
            tracing::info!("Evicted {} old history entries", evicted);
        }
        println!("\n✓ Saved to history");
    }

    Ok(())
}

fn cmd_table(
    config: &Config,
    table: &UnitTable,
    raw_value: &str,
    from: Option<String>,
    copy: bool,
    row: Option<String>,
) -> Result<()> {
    let from = from.unwrap_or_else(|| config.defaults.from.clone());
    table.lookup(&from)?;
    if let Some(unit) = &row {
        table.lookup(unit)?;
    }

    let Some(value) = parse_value(raw_value) else {
        println!("Enter a value to see the table");
        return Ok(());
    };

    let rows = build_comparison_table(table, value, &from)?;
    if let Some(unit) = row {
        if let Some(found) = rows.iter().find(|r| r.unit == unit) {
            println!("{}", clipboard::row_line(found));
        }
    } else if copy {
        println!("{}", clipboard::table_block(value, &from, &rows));
    } else {
        println!("{} {}", format_value(value), from);
        println!();
        print_rows(&rows);
    }

    Ok(())
}

fn cmd_units(table: &UnitTable) -> Result<()> {
    for def in table.iter() {
        println!(
            "{:<8} {:<20} {} m",
            def.symbol,
            def.label,
            format_value(def.factor)
        );
    }
    Ok(())
}

fn cmd_history(config: &Config, action: HistoryAction) -> Result<()> {
    let path = config.history_path();
    let capacity = config.history.max_entries;

    match action {
        HistoryAction::List => {
            let store = HistoryStore::load(&path, capacity)?;
            if store.is_empty() {
                println!("No history yet");
                return Ok(());
            }
            for entry in store.entries() {
                let when = entry
                    .recorded_at
                    .with_timezone(&chrono::Local)
                    .format("%Y-%m-%d %H:%M");
                println!(
                    "{} {}  ← {} {} • {}  [{}]",
                    entry.output,
                    entry.to_unit,
                    format_value(entry.input_value),
                    entry.from_unit,
                    when,
                    entry.id
                );
            }
            println!(
                "{} of {} entries kept in {}",
                store.len(),
                store.capacity(),
                store.path().display()
            );
        }
        HistoryAction::Clear => {
            HistoryStore::update(&path, capacity, |store| store.clear())?;
            println!("✓ History cleared");
        }
        HistoryAction::Remove { id } => {
            let removed = HistoryStore::update(&path, capacity, |store| store.remove(id))?;
            if !removed {
                return Err(Error::History(format!("No history entry with id {}", id)));
            }
            println!("✓ Removed {}", id);
        }
    }

    Ok(())
}

fn cmd_theme(config: &Config, action: Option<ThemeAction>) -> Result<()> {
    let path = config.preferences_path();
    let mut prefs = Preferences::load(&path)?;

    if let Some(action) = action {
        prefs.theme = match action {
            ThemeAction::Light => Theme::Light,
            ThemeAction::Dark => Theme::Dark,
            ThemeAction::Toggle => prefs.theme.toggle(),
        };
        prefs.save(&path)?;
    }

    println!("Theme: {}", prefs.theme);
    Ok(())
}

fn print_rows(rows: &[ComparisonRow]) {
    println!("─────────────────────────────────────────");
    for row in rows {
        println!("  {:<20} {}", row.label, row.display);
    }
    println!("─────────────────────────────────────────");
}

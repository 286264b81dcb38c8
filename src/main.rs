use clap::Parser;

mod commands;
mod config;
mod error;
mod executor;
mod formatter;
mod lessons;
mod repl;
mod script;
mod seed;

use config::Config;
use executor::SqlExecutor;
use formatter::OutputFormat;
use repl::Repl;
use script::ScriptExecutor;

#[derive(Parser, Debug)]
#[command(name = "sqltutor")]
#[command(version = "0.1.0")]
#[command(about = "Interactive SQL practice tool backed by SQLite")]
#[command(long_about = "sqltutor command-line interface

USAGE MODES:
  Interactive session:  sqltutor [DATABASE]
  Execute command:      sqltutor -c \"SELECT * FROM inventory\"
  Execute file:         sqltutor -f script.sql
  Execute from stdin:   cat script.sql | sqltutor

INTERACTIVE SESSION:
  Statements end with a semicolon and may span multiple lines; the prompt
  switches from 'SQL> ' to '...> ' while a statement is being typed.
  Meta-commands include:
    \\dt          - List tables
    \\d <table>   - Describe a table
    \\lessons     - List the built-in SQL lessons
    \\lesson <n>  - Run one lesson
    \\seed        - Create the practice tables and sample data
    \\help        - Show all commands

CONFIGURATION:
  Settings can be configured in ~/.sqltutorrc (TOML format):
    [display]
    format = \"table\"               # Default output format

    [database]
    default_path = \"warehouse.db\"  # Default database file

    [history]
    file = \"~/.sqltutor_history\"   # Command history file
    max_entries = 1000               # Max history entries

EXAMPLES:
  # Start a session against the default database, seeding practice data
  sqltutor --seed

  # Use a specific database file
  sqltutor practice.db

  # Run a script with per-statement progress
  sqltutor -f lessons.sql -v

  # Export query results as JSON
  sqltutor -c \"SELECT * FROM inventory\" --format json")]
struct Args {
    /// Database file path (defaults to the configured path, then warehouse.db)
    #[arg(value_name = "DATABASE")]
    database: Option<String>,

    /// Execute SQL commands from file
    #[arg(short, long, value_name = "FILE")]
    file: Option<String>,

    /// Execute SQL command directly and exit
    #[arg(short, long, value_name = "SQL")]
    command: Option<String>,

    /// Create the practice tables and sample data before starting
    #[arg(long)]
    seed: bool,

    /// Show detailed output during file/stdin execution
    #[arg(short, long)]
    verbose: bool,

    /// Output format for query results
    #[arg(long, value_parser = ["table", "json", "csv"], value_name = "FORMAT")]
    format: Option<String>,
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    let config = Config::load().unwrap_or_else(|e| {
        eprintln!("Warning: Could not load config file: {}", e);
        Config::default()
    });

    let format =
        args.format.as_deref().and_then(parse_format).or_else(|| config.get_output_format());

    let database = args
        .database
        .or_else(|| config.database.default_path.clone())
        .unwrap_or_else(|| config::DEFAULT_DATABASE.to_string());

    // The one connection for the whole session; closed on drop on every
    // exit path. Failure to open is fatal (exit code 1).
    let executor = SqlExecutor::open(&database)?;

    if args.seed {
        let report = seed::seed(executor.connection())
            .map_err(|e| anyhow::anyhow!("Failed to seed practice data: {}", e))?;
        println!(
            "Seeded practice data: {} inventory row(s), {} order row(s)",
            report.inventory_rows, report.order_rows
        );
    }

    if let Some(cmd) = args.command {
        let mut script = ScriptExecutor::new(executor, args.verbose, format);
        script.execute_script(&cmd)?;
    } else if let Some(file_path) = args.file {
        let mut script = ScriptExecutor::new(executor, args.verbose, format);
        script.execute_file(&file_path)?;
    } else if is_stdin_piped() {
        let mut script = ScriptExecutor::new(executor, args.verbose, format);
        script.execute_stdin()?;
    } else {
        let mut repl = Repl::new(executor, format, &config.history)?;
        repl.run()?;
    }

    Ok(())
}

fn parse_format(format_str: &str) -> Option<OutputFormat> {
    match format_str {
        "table" => Some(OutputFormat::Table),
        "json" => Some(OutputFormat::Json),
        "csv" => Some(OutputFormat::Csv),
        _ => None,
    }
}

fn is_stdin_piped() -> bool {
    // Stdin being a pipe or file (not a terminal) selects script mode.
    !atty::is(atty::Stream::Stdin)
}

use std::path::PathBuf;
use std::time::Instant;

use rustyline::error::ReadlineError;
use rustyline::DefaultEditor;

use crate::commands::MetaCommand;
use crate::config::HistoryConfig;
use crate::executor::SqlExecutor;
use crate::formatter::{OutputFormat, ResultFormatter};
use crate::lessons;
use crate::seed;

/// Accumulates prompt lines into complete SQL statements. A statement is
/// complete once the buffer, trailing whitespace trimmed, ends with `;`.
/// Lines are joined with single spaces.
#[derive(Debug, Default)]
pub struct StatementBuffer {
    pending: String,
}

impl StatementBuffer {
    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }

    pub fn clear(&mut self) {
        self.pending.clear();
    }

    /// Append one line; returns the completed statement when the terminator
    /// arrives. A buffer holding nothing but terminators is discarded
    /// rather than dispatched.
    pub fn push_line(&mut self, line: &str) -> Option<String> {
        let trimmed = line.trim();
        if trimmed.is_empty() {
            return None;
        }

        if !self.pending.is_empty() {
            self.pending.push(' ');
        }
        self.pending.push_str(trimmed);

        if !self.pending.trim_end().ends_with(';') {
            return None;
        }

        let stmt = std::mem::take(&mut self.pending).trim().to_string();
        if stmt.trim_end_matches(';').trim().is_empty() {
            None
        } else {
            Some(stmt)
        }
    }
}

/// What one input line means, given the accumulation state. Meta-commands
/// and `exit` are only recognized between statements; while a statement is
/// being accumulated every line is SQL text.
#[derive(Debug, PartialEq)]
pub enum LineAction {
    Exit,
    Meta(MetaCommand),
    Execute(String),
    Unknown(String),
    Continue,
}

pub fn interpret_line(buffer: &mut StatementBuffer, line: &str) -> LineAction {
    let trimmed = line.trim();

    if buffer.is_empty() {
        if trimmed.is_empty() {
            return LineAction::Continue;
        }
        if trimmed.eq_ignore_ascii_case("exit") {
            return LineAction::Exit;
        }
        if trimmed.starts_with('\\') {
            return match MetaCommand::parse(trimmed) {
                Some(cmd) => LineAction::Meta(cmd),
                None => LineAction::Unknown(trimmed.to_string()),
            };
        }
    }

    match buffer.push_line(line) {
        Some(stmt) => LineAction::Execute(stmt),
        None => LineAction::Continue,
    }
}

pub struct Repl {
    executor: SqlExecutor,
    editor: DefaultEditor,
    formatter: ResultFormatter,
    history_file: PathBuf,
    timing_enabled: bool,
}

impl Repl {
    pub fn new(
        executor: SqlExecutor,
        format: Option<OutputFormat>,
        history: &HistoryConfig,
    ) -> anyhow::Result<Self> {
        let rl_config = rustyline::Config::builder()
            .max_history_size(history.max_entries)?
            .build();
        let editor = DefaultEditor::with_config(rl_config)?;

        let mut formatter = ResultFormatter::new();
        if let Some(fmt) = format {
            formatter.set_format(fmt);
        }

        Ok(Repl {
            executor,
            editor,
            formatter,
            history_file: PathBuf::from(&history.file),
            timing_enabled: false,
        })
    }

    pub fn run(&mut self) -> anyhow::Result<()> {
        self.print_banner();
        let _ = self.editor.load_history(&self.history_file);

        let mut buffer = StatementBuffer::default();

        loop {
            let prompt = if buffer.is_empty() { "SQL> " } else { "...> " };
            match self.editor.readline(prompt) {
                Ok(line) => match interpret_line(&mut buffer, &line) {
                    LineAction::Exit => break,
                    LineAction::Meta(cmd) => {
                        let _ = self.editor.add_history_entry(line.trim());
                        if self.handle_meta_command(cmd) {
                            break;
                        }
                    }
                    LineAction::Execute(stmt) => {
                        let _ = self.editor.add_history_entry(&stmt);
                        self.run_statement(&stmt);
                    }
                    LineAction::Unknown(cmd) => {
                        eprintln!("Unrecognized command: {cmd}. Type \\help for help.");
                    }
                    LineAction::Continue => {}
                },
                Err(ReadlineError::Interrupted) => {
                    // Ctrl-C drops any half-typed statement, never the session.
                    println!("^C");
                    buffer.clear();
                }
                Err(ReadlineError::Eof) => break,
                Err(err) => {
                    eprintln!("Error: {err:?}");
                    break;
                }
            }
        }

        let _ = self.editor.save_history(&self.history_file);
        self.print_goodbye();
        Ok(())
    }

    fn run_statement(&mut self, sql: &str) {
        let start = Instant::now();
        match self.executor.execute(sql) {
            Ok(result) => {
                self.formatter.print_result(&result);
                if self.timing_enabled {
                    println!("Time: {:.3} ms", start.elapsed().as_secs_f64() * 1000.0);
                }
            }
            Err(e) => eprintln!("Error: {e}"),
        }
    }

    /// Returns true when the session should end.
    fn handle_meta_command(&mut self, cmd: MetaCommand) -> bool {
        match cmd {
            MetaCommand::Quit => return true,
            MetaCommand::Help => self.print_help(),
            MetaCommand::ListTables => match self.executor.list_tables() {
                Ok(result) => self.formatter.print_result(&result),
                Err(e) => eprintln!("Error: {e}"),
            },
            MetaCommand::DescribeTable(name) => match self.executor.describe_table(&name) {
                Ok(result) => self.formatter.print_result(&result),
                Err(e) => eprintln!("Error: {e}"),
            },
            MetaCommand::ListLessons => self.print_lessons(),
            MetaCommand::RunLesson(arg) => self.run_lesson(&arg),
            MetaCommand::Seed => match seed::seed(self.executor.connection()) {
                Ok(report) => println!(
                    "Seeded practice data: {} inventory row(s), {} order row(s)",
                    report.inventory_rows, report.order_rows
                ),
                Err(e) => eprintln!("Error: {e}"),
            },
            MetaCommand::SetFormat(format) => {
                self.formatter.set_format(format);
                println!("Output format set to: {}", format.name());
            }
            MetaCommand::Timing => {
                self.timing_enabled = !self.timing_enabled;
                println!("Timing is {}", if self.timing_enabled { "on" } else { "off" });
            }
        }
        false
    }

    fn run_lesson(&mut self, arg: &str) {
        let Some(lesson) = arg.parse::<u32>().ok().and_then(lessons::get) else {
            eprintln!(
                "Invalid lesson number '{arg}'. Valid lessons are 1-{}.",
                lessons::all().len()
            );
            return;
        };

        println!("=== Lesson {}: {} ===", lesson.id, lesson.title);
        println!("Goal: {}", lesson.goal);
        println!();
        println!("{}", lesson.query);
        println!();
        self.run_statement(lesson.query);
        println!();
        println!("Try it yourself: {}", lesson.hint);
    }

    fn print_lessons(&self) {
        println!("Available lessons:");
        for lesson in lessons::all() {
            println!("  {:>2}. {}", lesson.id, lesson.title);
        }
        println!();
        println!("Run one with \\lesson <number>");
    }

    fn print_banner(&self) {
        println!("sqltutor - interactive SQL practice on SQLite");
        println!("Type \\help for help, \\lessons for the lesson list, exit to quit\n");
    }

    fn print_goodbye(&self) {
        println!("Goodbye!");
    }

    fn print_help(&self) {
        println!(
            "
Statements end with a semicolon and may span multiple lines.

Meta-commands:
  \\d [table]      - Describe table or list all tables
  \\dt             - List tables
  \\lessons        - List available lessons
  \\lesson <n>     - Run lesson n
  \\seed           - Create the practice tables and sample data
  \\f <format>     - Set output format (table, json, csv)
  \\timing         - Toggle per-statement timing
  \\h, \\help      - Show this help
  \\q, \\quit      - Exit (same as typing exit)

Examples:
  SELECT * FROM inventory LIMIT 5;
  SELECT item_name, sale_price
    FROM inventory
    ORDER BY sale_price DESC;
  \\lesson 4
"
        );
    }
}

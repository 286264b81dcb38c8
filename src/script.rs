use std::{
    fs,
    io::{self, Read},
};

use crate::executor::SqlExecutor;
use crate::formatter::{OutputFormat, ResultFormatter};

/// Runs multiple SQL statements from a file, stdin, or a one-shot command
/// string. Statements execute in order; a failed statement is reported and
/// the rest still run.
pub struct ScriptExecutor {
    executor: SqlExecutor,
    formatter: ResultFormatter,
    verbose: bool,
}

impl ScriptExecutor {
    pub fn new(executor: SqlExecutor, verbose: bool, format: Option<OutputFormat>) -> Self {
        let mut formatter = ResultFormatter::new();
        if let Some(fmt) = format {
            formatter.set_format(fmt);
        }
        ScriptExecutor { executor, formatter, verbose }
    }

    pub fn execute_file(&mut self, file_path: &str) -> anyhow::Result<()> {
        let contents = fs::read_to_string(file_path)
            .map_err(|e| anyhow::anyhow!("Failed to read file '{}': {}", file_path, e))?;

        self.execute_script(&contents)
    }

    pub fn execute_stdin(&mut self) -> anyhow::Result<()> {
        let mut contents = String::new();
        io::stdin()
            .read_to_string(&mut contents)
            .map_err(|e| anyhow::anyhow!("Failed to read from stdin: {}", e))?;

        self.execute_script(&contents)
    }

    pub fn execute_script(&mut self, script: &str) -> anyhow::Result<()> {
        let statements = split_statements(script);

        if statements.is_empty() {
            if self.verbose {
                println!("No SQL statements found in script");
            }
            return Ok(());
        }

        let mut error_count = 0;

        for (idx, stmt) in statements.iter().enumerate() {
            if self.verbose {
                println!("Executing statement {} of {}...", idx + 1, statements.len());
            }

            match self.executor.execute(stmt) {
                Ok(result) => self.formatter.print_result(&result),
                Err(e) => {
                    eprintln!("Error executing statement {}: {}", idx + 1, e);
                    error_count += 1;
                }
            }
        }

        if error_count > 0 {
            Err(anyhow::anyhow!("{} statement(s) failed", error_count))
        } else {
            Ok(())
        }
    }
}

/// Split a script into statements on semicolons, skipping semicolons inside
/// single-quoted strings (with `''` escapes) and stripping `--` line
/// comments and `/* */` block comments.
fn split_statements(script: &str) -> Vec<String> {
    enum State {
        Code,
        InString,
        LineComment,
        BlockComment,
    }

    let mut statements = Vec::new();
    let mut current = String::new();
    let mut state = State::Code;
    let mut chars = script.chars().peekable();

    while let Some(ch) = chars.next() {
        match state {
            State::Code => match ch {
                '\'' => {
                    state = State::InString;
                    current.push(ch);
                }
                '-' if chars.peek() == Some(&'-') => {
                    chars.next();
                    state = State::LineComment;
                }
                '/' if chars.peek() == Some(&'*') => {
                    chars.next();
                    state = State::BlockComment;
                }
                ';' => {
                    let stmt = current.trim();
                    if !stmt.is_empty() {
                        statements.push(stmt.to_string());
                    }
                    current.clear();
                }
                _ => current.push(ch),
            },
            State::InString => {
                current.push(ch);
                if ch == '\'' {
                    // Doubled quote stays inside the string.
                    if chars.peek() == Some(&'\'') {
                        chars.next();
                        current.push('\'');
                    } else {
                        state = State::Code;
                    }
                }
            }
            State::LineComment => {
                if ch == '\n' {
                    current.push('\n');
                    state = State::Code;
                }
            }
            State::BlockComment => {
                if ch == '*' && chars.peek() == Some(&'/') {
                    chars.next();
                    state = State::Code;
                }
            }
        }
    }

    let stmt = current.trim();
    if !stmt.is_empty() {
        statements.push(stmt.to_string());
    }

    statements
}

use prettytable::{Cell, Row, Table};

use crate::executor::QueryResult;

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum OutputFormat {
    Table,
    Json,
    Csv,
}

impl OutputFormat {
    pub fn name(self) -> &'static str {
        match self {
            OutputFormat::Table => "table",
            OutputFormat::Json => "json",
            OutputFormat::Csv => "csv",
        }
    }
}

pub struct ResultFormatter {
    format: OutputFormat,
}

impl ResultFormatter {
    pub fn new() -> Self {
        ResultFormatter { format: OutputFormat::Table }
    }

    pub fn set_format(&mut self, format: OutputFormat) {
        self.format = format;
    }

    pub fn print_result(&self, result: &QueryResult) {
        match result {
            QueryResult::Rows { columns, rows } => {
                match self.format {
                    OutputFormat::Table => print_table(columns, rows),
                    OutputFormat::Json => print_json(columns, rows),
                    OutputFormat::Csv => print_csv(columns, rows),
                }
                println!("{} row(s)", rows.len());
            }
            QueryResult::Affected { count } => {
                println!("{count} row(s) affected");
            }
        }
    }
}

impl Default for ResultFormatter {
    fn default() -> Self {
        Self::new()
    }
}

fn print_table(columns: &[String], rows: &[Vec<String>]) {
    if columns.is_empty() || rows.is_empty() {
        return;
    }

    let mut table = Table::new();

    let header_cells: Vec<Cell> = columns.iter().map(|col| Cell::new(col)).collect();
    table.add_row(Row::new(header_cells));

    for row in rows {
        let cells: Vec<Cell> = row.iter().map(|val| Cell::new(val)).collect();
        table.add_row(Row::new(cells));
    }

    table.printstd();
}

fn print_json(columns: &[String], rows: &[Vec<String>]) {
    let mut json_rows = Vec::new();
    for row in rows {
        let mut json_obj = serde_json::Map::new();
        for (i, col) in columns.iter().enumerate() {
            if i < row.len() {
                json_obj.insert(col.clone(), serde_json::Value::String(row[i].clone()));
            }
        }
        json_rows.push(serde_json::Value::Object(json_obj));
    }

    let output = serde_json::to_string_pretty(&json_rows).unwrap_or_else(|_| "[]".to_string());
    println!("{output}");
}

fn print_csv(columns: &[String], rows: &[Vec<String>]) {
    println!("{}", columns.join(","));
    for row in rows {
        println!("{}", row.join(","));
    }
}

use crate::formatter::OutputFormat;

/// Backslash meta-commands recognized at the prompt. Anything else is
/// treated as SQL.
#[derive(Debug, Clone, PartialEq)]
pub enum MetaCommand {
    Quit,
    Help,
    ListTables,
    DescribeTable(String),
    ListLessons,
    /// The raw argument of `\lesson`; the session loop validates it so an
    /// out-of-range or non-numeric id re-prompts instead of failing parse.
    RunLesson(String),
    Seed,
    SetFormat(OutputFormat),
    Timing,
}

impl MetaCommand {
    pub fn parse(line: &str) -> Option<Self> {
        let trimmed = line.trim();

        if !trimmed.starts_with('\\') {
            return None;
        }

        let parts: Vec<&str> = trimmed.split_whitespace().collect();

        match parts.first() {
            Some(&"\\q") | Some(&"\\quit") => Some(MetaCommand::Quit),
            Some(&"\\h") | Some(&"\\help") => Some(MetaCommand::Help),
            Some(&"\\d") => {
                if let Some(table_name) = parts.get(1) {
                    Some(MetaCommand::DescribeTable(table_name.to_string()))
                } else {
                    Some(MetaCommand::ListTables)
                }
            }
            Some(&"\\dt") => Some(MetaCommand::ListTables),
            Some(&"\\lessons") => Some(MetaCommand::ListLessons),
            Some(&"\\lesson") => {
                parts.get(1).map(|arg| MetaCommand::RunLesson(arg.to_string()))
            }
            Some(&"\\seed") => Some(MetaCommand::Seed),
            Some(&"\\f") => match parts.get(1) {
                Some(&"table") => Some(MetaCommand::SetFormat(OutputFormat::Table)),
                Some(&"json") => Some(MetaCommand::SetFormat(OutputFormat::Json)),
                Some(&"csv") => Some(MetaCommand::SetFormat(OutputFormat::Csv)),
                _ => None,
            },
            Some(&"\\timing") => Some(MetaCommand::Timing),
            _ => None,
        }
    }
}

// SPDX-License-Identifier: MIT
//
// Command-line arguments.

use std::path::PathBuf;

use clap::{ArgAction, Parser, ValueEnum};
use serde_json::Value;

#[derive(Debug, Parser)]
#[command(
    name = "knob",
    version,
    about = "Build a control panel from a JSON description, edit it, print it"
)]
pub struct Cli {
    /// Panel description (JSON).
    #[arg(value_name = "DESCRIPTION")]
    pub description: PathBuf,

    /// Saved state (JSON `name → value`) to start from.
    #[arg(long, value_name = "SAVED")]
    pub load: Option<PathBuf>,

    /// Set a value, `name=value` or `folder/name=value`. The value is read
    /// as JSON when it parses, as a plain string otherwise. Repeatable.
    #[arg(long = "set", value_name = "PATH=VALUE", value_parser = parse_assignment)]
    pub set: Vec<Assignment>,

    /// What to print.
    #[arg(long, value_enum, default_value = "tree")]
    pub format: OutputFormat,

    /// Log more (-v debug, -vv trace). `RUST_LOG` takes precedence.
    #[arg(short, long, action = ArgAction::Count)]
    pub verbose: u8,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// The panel as rows and folders.
    Tree,
    /// Saved state.
    Json,
    /// A description that rebuilds the edited panel.
    Description,
}

/// One `--set` edit.
#[derive(Debug, Clone, PartialEq)]
pub struct Assignment {
    pub path: String,
    pub value: Value,
}

/// Parse `path=value`.
///
/// # Errors
///
/// Returns a message for clap when there is no `=` or no path.
pub fn parse_assignment(text: &str) -> Result<Assignment, String> {
    let Some((path, raw)) = text.split_once('=') else {
        return Err(format!("expected PATH=VALUE, got {text:?}"));
    };
    let path = path.trim();
    if path.is_empty() {
        return Err(format!("missing controller path in {text:?}"));
    }
    let value = serde_json::from_str(raw).unwrap_or_else(|_| Value::String(raw.to_string()));
    Ok(Assignment { path: path.to_string(), value })
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    #[test]
    fn json_values() {
        assert_eq!(
            parse_assignment("speed=7").unwrap(),
            Assignment { path: "speed".into(), value: json!(7) }
        );
        assert_eq!(
            parse_assignment("Look/tint={\"r\":1,\"g\":2,\"b\":3}").unwrap().value,
            json!({"r": 1, "g": 2, "b": 3})
        );
        assert_eq!(parse_assignment("on=true").unwrap().value, json!(true));
    }

    #[test]
    fn bare_text_is_a_string() {
        assert_eq!(parse_assignment("tint=#ff0000").unwrap().value, json!("#ff0000"));
        assert_eq!(parse_assignment("width=10px").unwrap().value, json!("10px"));
        assert_eq!(parse_assignment("title=").unwrap().value, json!(""));
    }

    #[test]
    fn value_may_contain_equals() {
        assert_eq!(parse_assignment("expr=a=b").unwrap().value, json!("a=b"));
    }

    #[test]
    fn malformed() {
        assert!(parse_assignment("speed").is_err());
        assert!(parse_assignment("=3").is_err());
    }

    #[test]
    fn cli_definition_is_consistent() {
        use clap::CommandFactory;
        Cli::command().debug_assert();
    }

    #[test]
    fn parse_flags() {
        let cli = Cli::try_parse_from([
            "knob", "panel.json", "--set", "speed=7", "--set", "Camera/orbit=true", "--format", "json", "-vv",
        ])
        .unwrap();
        assert_eq!(cli.set.len(), 2);
        assert_eq!(cli.set[1].path, "Camera/orbit");
        assert_eq!(cli.format, OutputFormat::Json);
        assert_eq!(cli.verbose, 2);
        assert_eq!(cli.load, None);
    }
}

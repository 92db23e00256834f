use std::fs;
use std::num::IntErrorKind;
use std::path::Path;

use crate::commands::Command;

/// Parsed command script, one command per non-blank, non-comment line
#[derive(Debug, Default)]
pub struct Script {
    pub commands: Vec<Command>,
}

impl Script {
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, String> {
        let content = fs::read_to_string(path.as_ref())
            .map_err(|e| format!("Failed to read script file: {}", e))?;
        Self::parse(&content)
    }

    pub fn parse(content: &str) -> Result<Self, String> {
        let mut commands = Vec::new();
        for (index, line) in content.lines().enumerate() {
            let line = line.trim();
            if line.is_empty() || line.starts_with('#') {
                continue;
            }
            let command = Self::parse_line(line).map_err(|e| format!("Line {}: {}", index + 1, e))?;
            commands.push(command);
        }
        Ok(Script { commands })
    }

    fn parse_line(line: &str) -> Result<Command, String> {
        let tokens: Vec<&str> = line.split_whitespace().collect();
        let keyword = tokens[0].to_ascii_lowercase();
        let args = &tokens[1..];

        let command = match keyword.as_str() {
            "register" => {
                expect_args(&keyword, args, 2)?;
                Command::Register {
                    name: args[0].to_string(),
                    size: parse_number(args[1], "process size")?,
                }
            }
            "load" => {
                expect_args(&keyword, args, 1)?;
                Command::Load { name: args[0].to_string() }
            }
            "access" => {
                expect_args(&keyword, args, 2)?;
                Command::Access {
                    name: args[0].to_string(),
                    page: parse_number(args[1], "page number")?,
                }
            }
            "memory" => {
                expect_args(&keyword, args, 0)?;
                Command::Memory
            }
            "list" => {
                expect_args(&keyword, args, 0)?;
                Command::List
            }
            "reset" => {
                expect_args(&keyword, args, 0)?;
                Command::Reset
            }
            other => return Err(format!("Unknown command: {}", other)),
        };
        Ok(command)
    }
}

fn expect_args(keyword: &str, args: &[&str], expected: usize) -> Result<(), String> {
    if args.len() != expected {
        return Err(format!(
            "'{}' takes {} argument(s), got {}",
            keyword,
            expected,
            args.len()
        ));
    }
    Ok(())
}

/// Parse a signed integer argument. Range checks belong to execution, so an
/// integer too large for `i64` saturates instead of failing the script.
fn parse_number(token: &str, what: &str) -> Result<i64, String> {
    match token.parse::<i64>() {
        Ok(value) => Ok(value),
        Err(e) => match e.kind() {
            IntErrorKind::PosOverflow => Ok(i64::MAX),
            IntErrorKind::NegOverflow => Ok(i64::MIN),
            _ => Err(format!("Invalid {}: {}", what, token)),
        },
    }
}

pub fn write_outcomes<P: AsRef<Path>>(path: P, lines: &[String]) -> Result<(), String> {
    let mut content = lines.join("\n");
    content.push('\n');
    fs::write(path.as_ref(), content).map_err(|e| format!("Failed to write output file: {}", e))
}

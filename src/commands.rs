//! Commands a caller can issue against a `MemoryState`, and their outcomes.

use crate::memory::FrameIndex;
use crate::process::{LoadReport, PageAccessResult, ProcessId, ProcessSummary};
use crate::vm_manager::MemoryState;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Register { name: String, size: i64 },
    Load { name: String },
    Access { name: String, page: i64 },
    Memory,
    List,
    Reset,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CommandOutcome {
    Registered(ProcessId),
    Loaded(LoadReport),
    Accessed(PageAccessResult),
    Memory(Vec<(FrameIndex, String)>),
    List(Vec<ProcessSummary>),
    Reset,
    Failed(String),
}

impl CommandOutcome {
    /// One output line per outcome
    pub fn render(&self) -> String {
        match self {
            CommandOutcome::Registered(id) => format!("ok {}", id.index()),
            CommandOutcome::Loaded(report) => {
                let mut line = format!("loaded {}", report.process);
                for (page, frame) in &report.assignments {
                    line.push_str(&format!(" {}:{}", page, frame));
                }
                line
            }
            CommandOutcome::Accessed(PageAccessResult::Hit(frame)) => format!("hit {}", frame),
            CommandOutcome::Accessed(PageAccessResult::Fault) => "fault".to_string(),
            CommandOutcome::Memory(frames) if frames.is_empty() => "memory empty".to_string(),
            CommandOutcome::Memory(frames) => {
                let cells: Vec<String> = frames
                    .iter()
                    .map(|(index, label)| format!("{}:{}", index, label))
                    .collect();
                format!("memory {}", cells.join(" "))
            }
            CommandOutcome::List(processes) if processes.is_empty() => "list empty".to_string(),
            CommandOutcome::List(processes) => {
                let cells: Vec<String> = processes
                    .iter()
                    .map(|p| {
                        let status = if p.is_loaded { "LOADED" } else { "WAITING" };
                        format!("{}:{}:{}", p.name, status, p.size)
                    })
                    .collect();
                format!("list {}", cells.join(" "))
            }
            CommandOutcome::Reset => "reset".to_string(),
            CommandOutcome::Failed(message) => format!("error {}", message),
        }
    }

    pub fn is_failure(&self) -> bool {
        matches!(self, CommandOutcome::Failed(_))
    }
}

/// Run one command. Failures are reported in the outcome, never as a panic.
pub fn execute(state: &mut MemoryState, command: &Command) -> CommandOutcome {
    match command {
        Command::Register { name, size } => match state.register_process(name, *size) {
            Ok(id) => CommandOutcome::Registered(id),
            Err(e) => CommandOutcome::Failed(e.to_string()),
        },
        Command::Load { name } => {
            let Some(id) = state.find_process(name) else {
                return unknown_process(name);
            };
            match state.load_process(id) {
                Ok(report) => CommandOutcome::Loaded(report),
                Err(e) => CommandOutcome::Failed(e.to_string()),
            }
        }
        Command::Access { name, page } => {
            let Some(id) = state.find_process(name) else {
                return unknown_process(name);
            };
            match state.access_page(id, *page) {
                Ok(result) => CommandOutcome::Accessed(result),
                Err(e) => CommandOutcome::Failed(e.to_string()),
            }
        }
        Command::Memory => CommandOutcome::Memory(state.memory_snapshot()),
        Command::List => CommandOutcome::List(state.process_list()),
        Command::Reset => {
            state.reset();
            CommandOutcome::Reset
        }
    }
}

pub fn execute_batch(state: &mut MemoryState, commands: &[Command]) -> Vec<CommandOutcome> {
    commands.iter().map(|c| execute(state, c)).collect()
}

fn unknown_process(name: &str) -> CommandOutcome {
    CommandOutcome::Failed(format!("unknown process '{}'", name))
}

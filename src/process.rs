use std::fmt;

use log::{debug, info, warn};

use crate::config::Config;
use crate::constants::*;
use crate::error::{AccessError, LoadError, RegistrationError};
use crate::memory::{FrameIndex, MemoryPool};

/// Process name, shorter than `MAX_NAME_LENGTH` bytes with no whitespace
///
/// The last byte of the name buffer is kept back for the terminator, so the
/// longest accepted name is `MAX_NAME_LENGTH - 1` bytes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProcessName(heapless::String<MAX_NAME_LENGTH>);

impl ProcessName {
    pub fn new(name: &str) -> Option<Self> {
        if name.is_empty() || name.len() >= MAX_NAME_LENGTH || name.chars().any(char::is_whitespace) {
            return None;
        }
        let mut buf = heapless::String::new();
        buf.push_str(name).ok()?;
        Some(ProcessName(buf))
    }

    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }
}

impl fmt::Display for ProcessName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Position of a process in the table, in registration order
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ProcessId(usize);

impl ProcessId {
    pub fn from_index(index: usize) -> Self {
        ProcessId(index)
    }

    #[inline]
    pub fn index(&self) -> usize {
        self.0
    }
}

impl fmt::Display for ProcessId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Page number -> frame index, pages numbered from 1
///
/// Entries are appended once during a load and never rewritten.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PageTable {
    frames: Vec<FrameIndex>,
}

impl PageTable {
    pub fn lookup(&self, page: usize) -> Option<FrameIndex> {
        page.checked_sub(FIRST_PAGE)
            .and_then(|slot| self.frames.get(slot))
            .copied()
    }

    pub fn len(&self) -> usize {
        self.frames.len()
    }

    pub fn is_empty(&self) -> bool {
        self.frames.is_empty()
    }

    /// (page, frame) pairs in page order
    pub fn entries(&self) -> impl Iterator<Item = (usize, FrameIndex)> + '_ {
        self.frames
            .iter()
            .enumerate()
            .map(|(slot, &frame)| (slot + FIRST_PAGE, frame))
    }
}

#[derive(Debug, Clone)]
pub struct ProcessDescriptor {
    name: ProcessName,
    size: usize,
    page_table: PageTable,
    is_loaded: bool,
}

impl ProcessDescriptor {
    pub fn name(&self) -> &ProcessName {
        &self.name
    }

    pub fn size(&self) -> usize {
        self.size
    }

    pub fn page_table(&self) -> &PageTable {
        &self.page_table
    }

    pub fn is_loaded(&self) -> bool {
        self.is_loaded
    }
}

/// Page assignments produced by a successful load
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoadReport {
    pub process: ProcessName,
    pub assignments: Vec<(usize, FrameIndex)>,
}

/// Outcome of looking a page up in a loaded process's page table
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PageAccessResult {
    Hit(FrameIndex),
    /// Not in the page table; the caller simulates a secondary-storage fetch
    Fault,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProcessSummary {
    pub name: String,
    pub is_loaded: bool,
    pub size: usize,
}

pub struct ProcessTable {
    processes: Vec<ProcessDescriptor>,
    limits: Config,
}

impl ProcessTable {
    pub fn new(config: &Config) -> Self {
        ProcessTable {
            processes: Vec::with_capacity(config.max_processes),
            limits: *config,
        }
    }

    pub fn len(&self) -> usize {
        self.processes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.processes.is_empty()
    }

    pub fn get(&self, id: ProcessId) -> Option<&ProcessDescriptor> {
        self.processes.get(id.index())
    }

    pub fn find(&self, name: &str) -> Option<ProcessId> {
        self.processes
            .iter()
            .position(|p| p.name.as_str() == name)
            .map(ProcessId::from_index)
    }

    /// Add an unloaded process with an empty page table.
    ///
    /// `size` is taken as given by the caller; negative or oversized values
    /// are rejected as `InvalidSize`.
    pub fn register(&mut self, name: &str, size: i64) -> Result<ProcessId, RegistrationError> {
        let result = self.try_register(name, size);
        match &result {
            Ok(id) => info!("registered {} as {} with {} pages", name, id, size),
            Err(e) => warn!("registration of '{}' rejected: {}", name, e),
        }
        result
    }

    fn try_register(&mut self, name: &str, size: i64) -> Result<ProcessId, RegistrationError> {
        let process_name =
            ProcessName::new(name).ok_or_else(|| RegistrationError::InvalidName(name.to_string()))?;

        if self.find(name).is_some() {
            return Err(RegistrationError::DuplicateName(name.to_string()));
        }
        let pages = usize::try_from(size)
            .ok()
            .filter(|&pages| self.limits.size_in_bounds(pages))
            .ok_or(RegistrationError::InvalidSize {
                size,
                min: self.limits.min_process_size,
                max: self.limits.max_process_size,
            })?;
        if self.processes.len() >= self.limits.max_processes {
            return Err(RegistrationError::CapacityExceeded {
                max_processes: self.limits.max_processes,
            });
        }

        let id = ProcessId::from_index(self.processes.len());
        self.processes.push(ProcessDescriptor {
            name: process_name,
            size: pages,
            page_table: PageTable::default(),
            is_loaded: false,
        });
        Ok(id)
    }

    /// Allocate frames for every page of `id` and fill its page table.
    ///
    /// A process can only be loaded once. On failure neither the process nor
    /// the pool changes.
    pub fn load(&mut self, id: ProcessId, memory: &mut MemoryPool) -> Result<LoadReport, LoadError> {
        let process = self
            .processes
            .get_mut(id.index())
            .ok_or(LoadError::UnknownProcess(id))?;

        if process.is_loaded {
            warn!("{} is already loaded", process.name);
            return Err(LoadError::AlreadyLoaded(process.name.to_string()));
        }

        let frames = memory.allocate_contiguous_block(&process.name, process.size)?;
        process.page_table.frames = frames;
        process.is_loaded = true;

        info!(
            "loaded {} into {} frames ({} used)",
            process.name,
            process.size,
            memory.used_frames()
        );
        Ok(LoadReport {
            process: process.name.clone(),
            assignments: process.page_table.entries().collect(),
        })
    }

    /// Look `page` up in a loaded process. Any page outside `1..=size`,
    /// negative ones included, is a fault.
    pub fn access_page(&self, id: ProcessId, page: i64) -> Result<PageAccessResult, AccessError> {
        let process = self.get(id).ok_or(AccessError::UnknownProcess(id))?;
        if !process.is_loaded {
            return Err(AccessError::ProcessNotLoaded(process.name.to_string()));
        }

        let frame = usize::try_from(page)
            .ok()
            .and_then(|page| process.page_table.lookup(page));
        let result = match frame {
            Some(frame) => PageAccessResult::Hit(frame),
            None => PageAccessResult::Fault,
        };
        debug!("access {} page {} -> {:?}", process.name, page, result);
        Ok(result)
    }

    pub fn list(&self) -> Vec<ProcessSummary> {
        self.processes
            .iter()
            .map(|p| ProcessSummary {
                name: p.name.to_string(),
                is_loaded: p.is_loaded,
                size: p.size,
            })
            .collect()
    }

    pub fn reset(&mut self) {
        self.processes.clear();
    }
}

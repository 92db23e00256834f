use log::info;

use crate::config::Config;
use crate::error::{AccessError, LoadError, RegistrationError};
use crate::memory::{FrameIndex, MemoryPool};
use crate::process::{LoadReport, PageAccessResult, ProcessId, ProcessSummary, ProcessTable};

/// The whole simulator: physical pool plus process table
pub struct MemoryState {
    config: Config,
    pool: MemoryPool,
    processes: ProcessTable,
}

impl MemoryState {
    pub fn new(config: Config) -> Result<Self, String> {
        config.validate()?;
        Ok(MemoryState {
            pool: MemoryPool::new(config.pool_capacity),
            processes: ProcessTable::new(&config),
            config,
        })
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn capacity(&self) -> usize {
        self.pool.capacity()
    }

    pub fn used_frames(&self) -> usize {
        self.pool.used_frames()
    }

    pub fn pool(&self) -> &MemoryPool {
        &self.pool
    }

    pub fn processes(&self) -> &ProcessTable {
        &self.processes
    }

    pub fn register_process(&mut self, name: &str, size: i64) -> Result<ProcessId, RegistrationError> {
        self.processes.register(name, size)
    }

    pub fn find_process(&self, name: &str) -> Option<ProcessId> {
        self.processes.find(name)
    }

    pub fn load_process(&mut self, id: ProcessId) -> Result<LoadReport, LoadError> {
        self.processes.load(id, &mut self.pool)
    }

    pub fn access_page(&self, id: ProcessId, page: i64) -> Result<PageAccessResult, AccessError> {
        self.processes.access_page(id, page)
    }

    /// Occupied frames with their labels, in frame order
    pub fn memory_snapshot(&self) -> Vec<(FrameIndex, String)> {
        self.pool
            .snapshot()
            .into_iter()
            .map(|(index, owner)| (index, owner.to_string()))
            .collect()
    }

    pub fn process_list(&self) -> Vec<ProcessSummary> {
        self.processes.list()
    }

    /// Drop every process and free every frame
    pub fn reset(&mut self) {
        self.pool.reset();
        self.processes.reset();
        info!("memory state reset ({} frames free)", self.pool.capacity());
    }
}

impl Default for MemoryState {
    fn default() -> Self {
        MemoryState {
            config: Config::default(),
            pool: MemoryPool::default(),
            processes: ProcessTable::new(&Config::default()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::memory::FrameSlot;

    fn small_state() -> MemoryState {
        MemoryState::new(Config::with_capacity(10)).unwrap()
    }

    #[test]
    fn test_rejects_invalid_config() {
        assert!(MemoryState::new(Config::with_capacity(0)).is_err());
    }

    #[test]
    fn test_default_state() {
        let state = MemoryState::default();
        assert_eq!(state.capacity(), 200);
        assert_eq!(state.config().max_processes, 25);
        assert_eq!(state.used_frames(), 0);
    }

    #[test]
    fn test_capacity_ten_scenario() {
        let mut state = small_state();

        let p0 = state.register_process("P0", 4).unwrap();
        let p1 = state.register_process("P1", 5).unwrap();

        let report = state.load_process(p0).unwrap();
        let frames: Vec<FrameIndex> = report.assignments.iter().map(|&(_, f)| f).collect();
        assert_eq!(frames, vec![0, 1, 2, 3]);
        assert_eq!(state.used_frames(), 4);

        let report = state.load_process(p1).unwrap();
        let frames: Vec<FrameIndex> = report.assignments.iter().map(|&(_, f)| f).collect();
        assert_eq!(frames, vec![4, 5, 6, 7, 8]);
        assert_eq!(state.used_frames(), 9);

        assert_eq!(state.access_page(p0, 2), Ok(PageAccessResult::Hit(1)));
        assert_eq!(state.access_page(p1, 6), Ok(PageAccessResult::Fault));

        let p2 = state.register_process("P2", 3).unwrap();
        assert_eq!(
            state.load_process(p2),
            Err(LoadError::InsufficientMemory { requested: 3, available: 1 })
        );
        assert_eq!(state.used_frames(), 9);
        assert!(!state.process_list()[2].is_loaded);
    }

    #[test]
    fn test_snapshot_labels() {
        let mut state = small_state();
        let p0 = state.register_process("P0", 2).unwrap();
        state.register_process("P1", 1).unwrap();
        state.load_process(p0).unwrap();

        assert_eq!(
            state.memory_snapshot(),
            vec![(0, "P0_page1".to_string()), (1, "P0_page2".to_string())]
        );
    }

    #[test]
    fn test_frames_distinct_across_processes() {
        let mut state = MemoryState::default();
        let mut seen = std::collections::HashSet::new();
        for (i, size) in [3, 7, 1, 12].into_iter().enumerate() {
            let id = state.register_process(&format!("P{}", i), size as i64).unwrap();
            let report = state.load_process(id).unwrap();
            assert_eq!(report.assignments.len(), size);
            for (_, frame) in report.assignments {
                assert!(seen.insert(frame), "frame {} assigned twice", frame);
            }
        }
        assert_eq!(state.used_frames(), 23);
    }

    #[test]
    fn test_page_tables_point_at_owned_frames() {
        let mut state = small_state();
        let p0 = state.register_process("P0", 3).unwrap();
        let p1 = state.register_process("P1", 4).unwrap();
        state.load_process(p0).unwrap();
        state.load_process(p1).unwrap();

        for id in [p0, p1] {
            let desc = state.processes().get(id).unwrap();
            for (page, frame) in desc.page_table().entries() {
                match state.pool().slot(frame) {
                    Some(FrameSlot::Occupied(owner)) => {
                        assert_eq!(&owner.process, desc.name());
                        assert_eq!(owner.page, page);
                    }
                    other => panic!("frame {} not occupied: {:?}", frame, other),
                }
            }
        }
        assert_eq!(state.pool().free_frames(), 3);
    }

    #[test]
    fn test_out_of_range_input_is_not_fatal() {
        let mut state = small_state();
        let p0 = state.register_process("P0", 4).unwrap();
        state.load_process(p0).unwrap();

        assert!(matches!(
            state.register_process("P1", -3),
            Err(RegistrationError::InvalidSize { size: -3, .. })
        ));
        assert_eq!(state.access_page(p0, -1), Ok(PageAccessResult::Fault));
        assert_eq!(state.process_list().len(), 1);
        assert_eq!(state.used_frames(), 4);
    }

    #[test]
    fn test_reset_matches_fresh_state() {
        let mut state = small_state();
        let p0 = state.register_process("P0", 4).unwrap();
        state.load_process(p0).unwrap();

        state.reset();
        assert_eq!(state.used_frames(), 0);
        assert!(state.memory_snapshot().is_empty());
        assert!(state.process_list().is_empty());
        assert_eq!(state.find_process("P0"), None);
        assert_eq!(state.capacity(), 10);

        // names are free again after teardown
        let p0 = state.register_process("P0", 4).unwrap();
        assert_eq!(state.load_process(p0).unwrap().assignments[0], (1, 0));
    }
}

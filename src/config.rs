use crate::constants::*;

/// Limits fixed when a `MemoryState` is constructed
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Config {
    /// Total frames in the pool, caps pages across all processes
    pub pool_capacity: usize,
    pub max_processes: usize,
    pub min_process_size: usize,
    pub max_process_size: usize,
}

impl Config {
    pub fn with_capacity(pool_capacity: usize) -> Self {
        Config {
            pool_capacity,
            ..Self::default()
        }
    }

    pub fn validate(&self) -> Result<(), String> {
        if self.pool_capacity == 0 {
            return Err("Pool capacity must be at least 1 frame".to_string());
        }
        if self.max_processes == 0 {
            return Err("Max processes must be at least 1".to_string());
        }
        if self.min_process_size == 0 {
            return Err("Minimum process size must be at least 1 page".to_string());
        }
        if self.min_process_size > self.max_process_size {
            return Err(format!(
                "Minimum process size {} exceeds maximum {}",
                self.min_process_size, self.max_process_size
            ));
        }
        Ok(())
    }

    #[inline]
    pub fn size_in_bounds(&self, size: usize) -> bool {
        size >= self.min_process_size && size <= self.max_process_size
    }
}

impl Default for Config {
    fn default() -> Self {
        Config {
            pool_capacity: DEFAULT_POOL_CAPACITY,
            max_processes: DEFAULT_MAX_PROCESSES,
            min_process_size: MIN_PROCESS_SIZE,
            max_process_size: MAX_PROCESS_SIZE,
        }
    }
}

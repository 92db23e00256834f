use std::fmt;

use log::{debug, warn};

use crate::constants::*;
use crate::error::AllocationError;
use crate::process::ProcessName;

pub type FrameIndex = usize;

/// Which process page occupies a frame
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FrameOwner {
    pub process: ProcessName,
    pub page: usize,
}

impl fmt::Display for FrameOwner {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}{}", self.process, PAGE_LABEL_SEPARATOR, self.page)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FrameSlot {
    Free,
    Occupied(FrameOwner),
}

impl FrameSlot {
    #[inline]
    pub fn is_free(&self) -> bool {
        matches!(self, FrameSlot::Free)
    }
}

/// Physical memory - a fixed array of frame slots plus the allocation watermark
///
/// Frames are handed out forward from `used_frames` and never reclaimed
/// individually. A gap below the watermark is never reused; only `reset`
/// gives frames back.
pub struct MemoryPool {
    slots: Vec<FrameSlot>,
    used_frames: usize,
}

impl MemoryPool {
    /// Create a pool of `capacity` free frames
    pub fn new(capacity: usize) -> Self {
        let mut pool = MemoryPool {
            slots: Vec::new(),
            used_frames: 0,
        };
        pool.initialize(capacity);
        pool
    }

    /// Size the pool to `capacity` frames and mark every one free
    pub fn initialize(&mut self, capacity: usize) {
        self.slots.clear();
        self.slots.resize(capacity, FrameSlot::Free);
        self.used_frames = 0;
    }

    /// Clear all slots and the watermark, keeping the capacity
    pub fn reset(&mut self) {
        let capacity = self.capacity();
        self.initialize(capacity);
    }

    #[inline]
    pub fn capacity(&self) -> usize {
        self.slots.len()
    }

    #[inline]
    pub fn used_frames(&self) -> usize {
        self.used_frames
    }

    #[inline]
    pub fn free_frames(&self) -> usize {
        self.capacity() - self.used_frames
    }

    pub fn slot(&self, index: FrameIndex) -> Option<&FrameSlot> {
        self.slots.get(index)
    }

    /// Claim `page_count` consecutive frames starting at the watermark.
    ///
    /// Frame `i` of the returned list holds page `i + 1` of `owner`. When the
    /// block does not fit, the pool is left untouched.
    pub fn allocate_contiguous_block(
        &mut self,
        owner: &ProcessName,
        page_count: usize,
    ) -> Result<Vec<FrameIndex>, AllocationError> {
        let available = self.free_frames();
        if page_count > available {
            warn!(
                "allocation of {} frames for {} rejected: {} free",
                page_count, owner, available
            );
            return Err(AllocationError::InsufficientMemory {
                requested: page_count,
                available,
            });
        }

        let start = self.used_frames;
        let frames: Vec<FrameIndex> = (start..start + page_count).collect();
        for (offset, &frame) in frames.iter().enumerate() {
            debug_assert!(self.slots[frame].is_free());
            self.slots[frame] = FrameSlot::Occupied(FrameOwner {
                process: owner.clone(),
                page: FIRST_PAGE + offset,
            });
        }
        self.used_frames += page_count;

        debug!(
            "allocated frames {}..{} to {} (used {}/{})",
            start,
            self.used_frames,
            owner,
            self.used_frames,
            self.capacity()
        );
        Ok(frames)
    }

    /// Occupied frames in index order
    pub fn snapshot(&self) -> Vec<(FrameIndex, &FrameOwner)> {
        self.slots
            .iter()
            .enumerate()
            .filter_map(|(index, slot)| match slot {
                FrameSlot::Occupied(owner) => Some((index, owner)),
                FrameSlot::Free => None,
            })
            .collect()
    }
}

impl Default for MemoryPool {
    fn default() -> Self {
        Self::new(DEFAULT_POOL_CAPACITY)
    }
}

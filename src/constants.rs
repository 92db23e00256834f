// default number of frames in the physical pool
pub const DEFAULT_POOL_CAPACITY: usize = 200;
pub const DEFAULT_MAX_PROCESSES: usize = 25;

// bounds on the page count a process may request at registration
pub const MIN_PROCESS_SIZE: usize = 1;
pub const MAX_PROCESS_SIZE: usize = 500_000;

pub const MAX_NAME_LENGTH: usize = 32;

/// Joins a process name and a page number in frame labels, e.g. `P0_page3`
pub const PAGE_LABEL_SEPARATOR: &str = "_page";

pub const FIRST_PAGE: usize = 1;

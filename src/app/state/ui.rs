use std::time::{Duration, Instant};

pub const TOAST_DURATION: Duration = Duration::from_millis(2500);
pub const LOG_CAPACITY: usize = 200;

#[derive(Debug, Clone)]
pub struct Toast {
    pub message: String,
    pub is_error: bool,
    pub start_time: Instant,
    pub deadline: Instant,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogLevel {
    Info,
    Error,
}

/// One line on the Log page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogLine {
    pub level: LogLevel,
    pub message: String,
}

/// Move a list cursor by `delta`, clamped to `[0, len)`.
pub fn move_cursor(index: usize, len: usize, delta: isize) -> usize {
    if len == 0 {
        return 0;
    }
    let target = index as isize + delta;
    target.clamp(0, len as isize - 1) as usize
}

/// Keep a cursor valid after its list shrank.
pub fn clamp_cursor(index: usize, len: usize) -> usize {
    index.min(len.saturating_sub(1))
}

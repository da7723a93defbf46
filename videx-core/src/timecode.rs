use serde::{Deserialize, Serialize};

/// Converts a `MM:SS:CC` timecode into seconds.
///
/// Parts may be separated by `:` or `.`. The centiseconds part is optional,
/// an empty one counts as zero, and anything after it is ignored. Returns `None` for empty input, fewer than two
/// parts, or a part that is not an unsigned integer.
pub fn parse_time_code(code: &str) -> Option<f64> {
    let code = code.trim();
    if code.is_empty() {
        return None;
    }

    let parts: Vec<&str> = code.split([':', '.']).collect();
    if parts.len() < 2 {
        return None;
    }

    let field = |s: &str| s.trim().parse::<u32>().ok().map(f64::from);
    let minutes = field(parts[0])?;
    let seconds = field(parts[1])?;
    let centiseconds = match parts.get(2) {
        Some(cs) if !cs.trim().is_empty() => field(cs)?,
        _ => 0.0,
    };

    Some(minutes * 60.0 + seconds + centiseconds / 100.0)
}

/// Half-open interval `[start, end)` of playback position, in seconds of
/// video content.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DisruptionWindow {
    pub start: f64,
    pub end: f64,
}

impl DisruptionWindow {
    pub fn new(start: f64, end: f64) -> Self {
        Self { start, end }
    }

    /// Both bounds must be present, otherwise no disruption is configured.
    pub fn from_bounds(start: Option<f64>, end: Option<f64>) -> Option<Self> {
        match (start, end) {
            (Some(start), Some(end)) => Some(Self { start, end }),
            _ => None,
        }
    }

    pub fn from_time_codes(start: &str, end: &str) -> Option<Self> {
        Self::from_bounds(parse_time_code(start), parse_time_code(end))
    }

    pub fn contains(&self, position: f64) -> bool {
        position >= self.start && position < self.end
    }

    pub fn is_empty(&self) -> bool {
        !(self.start < self.end)
    }
}

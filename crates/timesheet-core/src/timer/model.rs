use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TimerStatus {
    Running,
    Paused,
}

/// A single tracked activity.
///
/// Elapsed time is never stored. It is derived from the settled
/// `accumulated_time` plus the live segment that began at `start_time`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Timer {
    pub id: String,
    pub description: String,
    pub status: TimerStatus,
    /// Start of the current running segment (epoch ms). `Some` iff running.
    pub start_time: Option<u64>,
    /// Milliseconds from all previously closed segments.
    pub accumulated_time: u64,
    pub created_at: u64,
}

impl Timer {
    pub fn is_running(&self) -> bool {
        self.status == TimerStatus::Running
    }

    /// Total running time as of `now_ms`.
    pub fn elapsed(&self, now_ms: u64) -> u64 {
        self.accumulated_time.saturating_add(self.current_segment(now_ms))
    }

    /// Length of the open segment, zero when paused or when the clock reads
    /// earlier than the segment start.
    pub fn current_segment(&self, now_ms: u64) -> u64 {
        match (self.status, self.start_time) {
            (TimerStatus::Running, Some(start)) => now_ms.saturating_sub(start),
            _ => 0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn running(start: u64, accumulated: u64) -> Timer {
        Timer {
            id: "t".into(),
            description: "Write report".into(),
            status: TimerStatus::Running,
            start_time: Some(start),
            accumulated_time: accumulated,
            created_at: 0,
        }
    }

    #[test]
    fn elapsed_adds_open_segment() {
        let timer = running(1_000, 500);
        assert_eq!(timer.elapsed(1_000), 500);
        assert_eq!(timer.elapsed(4_000), 3_500);
    }

    #[test]
    fn elapsed_ignores_clock_before_start() {
        let timer = running(10_000, 200);
        assert_eq!(timer.elapsed(9_000), 200);
    }

    #[test]
    fn elapsed_saturates_on_huge_accumulated_time() {
        let timer = running(0, u64::MAX - 10);
        assert_eq!(timer.elapsed(1_000), u64::MAX);
    }

    #[test]
    fn paused_timer_is_frozen() {
        let mut timer = running(0, 0);
        timer.status = TimerStatus::Paused;
        timer.start_time = None;
        timer.accumulated_time = 7_000;
        assert_eq!(timer.elapsed(1_000_000), 7_000);
    }

    #[test]
    fn serializes_with_original_field_names() {
        let mut timer = running(5, 0);
        timer.status = TimerStatus::Paused;
        timer.start_time = None;
        let json = serde_json::to_value(&timer).unwrap();
        assert_eq!(json["status"], "paused");
        assert!(json["startTime"].is_null());
        assert_eq!(json["accumulatedTime"], 0);
        assert!(json.get("createdAt").is_some());
    }
}

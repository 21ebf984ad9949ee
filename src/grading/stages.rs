use chrono::{DateTime, Duration, Utc};

/// One progress checkpoint shown while a submission is "analysed".
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Stage {
    pub progress: u8,
    pub message: &'static str,
}

pub const STAGES: [Stage; 6] = [
    Stage {
        progress: 15,
        message: "Analyzing document structure...",
    },
    Stage {
        progress: 30,
        message: "Extracting content and formatting...",
    },
    Stage {
        progress: 50,
        message: "Comparing against course rubric...",
    },
    Stage {
        progress: 70,
        message: "Evaluating each criterion...",
    },
    Stage {
        progress: 85,
        message: "Calculating detailed scores...",
    },
    Stage {
        progress: 100,
        message: "Generating personalized feedback...",
    },
];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StagePhase {
    /// `reached` checkpoints have been shown so far (0 right after start).
    Staging { reached: usize },
    /// Every checkpoint has been shown and one more interval has passed.
    Finished,
}

impl StagePhase {
    pub fn current(&self) -> Option<&'static Stage> {
        match self {
            StagePhase::Staging { reached } if *reached > 0 => STAGES.get(reached - 1),
            StagePhase::Staging { .. } => None,
            StagePhase::Finished => STAGES.last(),
        }
    }

    pub fn progress(&self) -> u8 {
        self.current().map(|s| s.progress).unwrap_or(0)
    }
}

/// A single staged sequence, paced by a fixed interval from its start.
///
/// Checkpoint `k` (1-based) is reached after `k` intervals; the run
/// finishes one interval after the last checkpoint. The phase is a pure
/// function of elapsed time, so callers can sample it whenever they like.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StagedRun {
    started_at: DateTime<Utc>,
    interval: Duration,
}

impl StagedRun {
    pub fn new(started_at: DateTime<Utc>, interval: Duration) -> Self {
        Self {
            started_at,
            interval,
        }
    }

    pub fn started_at(&self) -> DateTime<Utc> {
        self.started_at
    }

    pub fn phase_at(&self, now: DateTime<Utc>) -> StagePhase {
        let interval_ms = self.interval.num_milliseconds();
        if interval_ms <= 0 {
            return StagePhase::Finished;
        }
        let elapsed_ms = (now - self.started_at).num_milliseconds().max(0);
        let ticks = (elapsed_ms / interval_ms) as usize;
        if ticks > STAGES.len() {
            StagePhase::Finished
        } else {
            StagePhase::Staging { reached: ticks }
        }
    }

    /// Instant at which the run reports [`StagePhase::Finished`].
    /// Saturates at the latest representable instant.
    pub fn finishes_at(&self) -> DateTime<Utc> {
        self.interval
            .checked_mul(STAGES.len() as i32 + 1)
            .and_then(|span| self.started_at.checked_add_signed(span))
            .unwrap_or(DateTime::<Utc>::MAX_UTC)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn start() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 1, 15, 10, 0, 0).unwrap()
    }

    #[test]
    fn checkpoints_are_fixed() {
        let progress: Vec<u8> = STAGES.iter().map(|s| s.progress).collect();
        assert_eq!(progress, vec![15, 30, 50, 70, 85, 100]);
    }

    #[test]
    fn each_interval_reaches_the_next_checkpoint() {
        let interval = Duration::milliseconds(1200);
        let run = StagedRun::new(start(), interval);

        assert_eq!(run.phase_at(start()).progress(), 0);
        assert_eq!(
            run.phase_at(start() + Duration::milliseconds(1199)),
            StagePhase::Staging { reached: 0 }
        );
        for (i, stage) in STAGES.iter().enumerate() {
            let phase = run.phase_at(start() + interval * (i as i32 + 1));
            assert_eq!(phase, StagePhase::Staging { reached: i + 1 });
            assert_eq!(phase.progress(), stage.progress);
        }
        assert_eq!(run.phase_at(run.finishes_at()), StagePhase::Finished);
        assert_eq!(run.finishes_at(), start() + Duration::milliseconds(8400));
    }

    #[test]
    fn time_before_start_counts_as_just_started() {
        let run = StagedRun::new(start(), Duration::seconds(1));
        assert_eq!(
            run.phase_at(start() - Duration::seconds(5)),
            StagePhase::Staging { reached: 0 }
        );
    }

    #[test]
    fn zero_interval_finishes_immediately() {
        let run = StagedRun::new(start(), Duration::zero());
        assert_eq!(run.phase_at(start()), StagePhase::Finished);
    }

    #[test]
    fn huge_interval_never_finishes() {
        let run = StagedRun::new(start(), Duration::MAX);
        assert_eq!(run.finishes_at(), DateTime::<Utc>::MAX_UTC);
        assert_eq!(run.phase_at(start() + Duration::days(3650)), StagePhase::Staging { reached: 0 });
    }
}

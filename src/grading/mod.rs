pub mod stages;

use std::sync::Arc;

use chrono::{DateTime, Duration, Utc};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::Serialize;
use tracing::{debug, info};

use crate::protocol::{AssignmentDetail, ScoreDetail, UploadedFile};
use crate::responses::ResponseBook;
use stages::{StagePhase, StagedRun};

pub const PDF_MIME_TYPE: &str = "application/pdf";

/// Default pacing between progress checkpoints.
pub const DEFAULT_STAGE_INTERVAL_MS: i64 = 1200;

// ── Uploads ─────────────────────────────────────────────────────────────

/// A file as handed over by the upload widget.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IncomingFile {
    pub name: String,
    pub mime_type: String,
    pub size_bytes: u64,
}

/// Human-readable size in mebibytes with two decimals, e.g. "1.50 MB".
pub fn format_file_size(bytes: u64) -> String {
    format!("{:.2} MB", bytes as f64 / 1024.0 / 1024.0)
}

/// Take the first file if it is a PDF. Anything else is dropped without
/// complaint and nothing is recorded.
pub fn accept_upload(files: &[IncomingFile], now: DateTime<Utc>) -> Option<UploadedFile> {
    let file = files.first()?;
    if file.mime_type != PDF_MIME_TYPE {
        debug!("Ignoring upload {} of type {}", file.name, file.mime_type);
        return None;
    }
    Some(UploadedFile {
        name: file.name.clone(),
        size: format_file_size(file.size_bytes),
        uploaded_at: now,
    })
}

// ── Scoring ─────────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GradeReport {
    pub details: Vec<ScoreDetail>,
    pub total_score: u32,
    pub total_points: u32,
}

/// Fabricates rubric scores without looking at the submission.
pub struct GradingEngine<R: Rng> {
    book: Arc<ResponseBook>,
    rng: R,
}

impl GradingEngine<StdRng> {
    pub fn from_entropy(book: Arc<ResponseBook>) -> Self {
        Self::new(book, StdRng::from_entropy())
    }
}

impl<R: Rng> GradingEngine<R> {
    pub fn new(book: Arc<ResponseBook>, rng: R) -> Self {
        Self { book, rng }
    }

    /// Score every criterion at 80-100% of its maximum (rounded down) and
    /// attach the course's feedback line for that position.
    pub fn score(&mut self, assignment: &AssignmentDetail) -> GradeReport {
        let details: Vec<ScoreDetail> = assignment
            .rubric
            .iter()
            .enumerate()
            .map(|(i, criterion)| {
                let fraction: f64 = self.rng.gen_range(0.8..1.0);
                let score = (criterion.max_points as f64 * fraction).floor() as u32;
                ScoreDetail {
                    criteria: criterion.criteria.clone(),
                    score: score.min(criterion.max_points),
                    max_points: criterion.max_points,
                    feedback: self.book.feedback_line(&assignment.course_id, i).to_string(),
                }
            })
            .collect();
        let total_score = details.iter().map(|d| d.score).sum();

        GradeReport {
            details,
            total_score,
            total_points: assignment.total_points,
        }
    }
}

// ── Submission session ──────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GradingState {
    Idle,
    Staging {
        progress: u8,
        message: Option<&'static str>,
    },
    Complete(GradeReport),
}

/// Upload-and-grade flow for one assignment page.
///
/// Holds at most one uploaded file and at most one staged run. A new
/// accepted upload replaces both, so an earlier run can never finish on
/// top of a later one.
pub struct SubmissionSession<R: Rng> {
    assignment: AssignmentDetail,
    engine: GradingEngine<R>,
    interval: Duration,
    uploaded: Option<UploadedFile>,
    run: Option<StagedRun>,
    result: Option<GradeReport>,
}

impl<R: Rng> SubmissionSession<R> {
    pub fn new(assignment: AssignmentDetail, engine: GradingEngine<R>, interval: Duration) -> Self {
        Self {
            assignment,
            engine,
            interval,
            uploaded: None,
            run: None,
            result: None,
        }
    }

    pub fn assignment(&self) -> &AssignmentDetail {
        &self.assignment
    }

    pub fn uploaded_file(&self) -> Option<&UploadedFile> {
        self.uploaded.as_ref()
    }

    pub fn result(&self) -> Option<&GradeReport> {
        self.result.as_ref()
    }

    pub fn is_processing(&self) -> bool {
        self.run.is_some()
    }

    /// Offer files from the upload widget. Returns whether one was taken.
    pub fn submit(&mut self, files: &[IncomingFile], now: DateTime<Utc>) -> bool {
        let Some(file) = accept_upload(files, now) else {
            return false;
        };

        if self.run.is_some() {
            info!(
                "Restarting grading run for {} with {}",
                self.assignment.id, file.name
            );
        } else {
            info!("Grading run started for {} with {}", self.assignment.id, file.name);
        }

        self.uploaded = Some(file);
        self.result = None;
        self.run = Some(StagedRun::new(now, self.interval));
        true
    }

    /// Advance the run to `now` and report where it stands.
    pub fn poll(&mut self, now: DateTime<Utc>) -> GradingState {
        let Some(run) = self.run else {
            return match &self.result {
                Some(report) => GradingState::Complete(report.clone()),
                None => GradingState::Idle,
            };
        };

        match run.phase_at(now) {
            phase @ StagePhase::Staging { .. } => GradingState::Staging {
                progress: phase.progress(),
                message: phase.current().map(|s| s.message),
            },
            StagePhase::Finished => {
                let report = self.engine.score(&self.assignment);
                info!(
                    "Grading run complete for {}: {}/{}",
                    self.assignment.id, report.total_score, report.total_points
                );
                self.run = None;
                self.result = Some(report.clone());
                GradingState::Complete(report)
            }
        }
    }
}

use std::sync::Arc;

use chrono::{DateTime, Duration, Utc};
use rand::rngs::StdRng;
use tracing::{info, warn};

use crate::catalog::query::QueryService;
use crate::catalog::{CatalogError, CatalogStore};
use crate::chat::ChatSession;
use crate::clock::{Clock, SystemClock};
use crate::config::ServerConfig;
use crate::deadlines::{classify, DeadlineOverview, DueBucket};
use crate::grading::{GradingEngine, SubmissionSession};
use crate::protocol::DueDateError;
use crate::responses::ResponseBook;

/// Everything the front end talks to, built once at startup.
pub struct Dashboard {
    queries: Arc<QueryService>,
    book: Arc<ResponseBook>,
    stage_interval: Duration,
    chat_reply_delay: Duration,
    clock: Arc<dyn Clock>,
}

impl Dashboard {
    pub fn new(store: CatalogStore, book: ResponseBook, config: &ServerConfig) -> Self {
        Self {
            queries: Arc::new(QueryService::new(Arc::new(store))),
            book: Arc::new(book),
            stage_interval: config.stage_interval,
            chat_reply_delay: config.chat_reply_delay,
            clock: Arc::new(SystemClock),
        }
    }

    pub fn with_clock(mut self, clock: Arc<dyn Clock>) -> Self {
        self.clock = clock;
        self
    }

    pub fn now(&self) -> DateTime<Utc> {
        self.clock.now()
    }

    /// Seed the catalog and load the response book named in `config`.
    pub fn from_config(config: &ServerConfig) -> Result<Self, DueDateError> {
        let store = CatalogStore::seeded()?;
        for issue in store.validate() {
            warn!("Catalog issue: {}", issue);
        }
        let book = match &config.responses_path {
            Some(path) => ResponseBook::load_from_file(path),
            None => {
                info!("Using built-in response book");
                ResponseBook::default()
            }
        };
        let dashboard = Self::new(store, book, config);
        for course in dashboard.courses_without_responses() {
            info!(
                "Course {} has no canned responses, falling back to {}",
                course, dashboard.book.default_course
            );
        }
        Ok(dashboard)
    }

    pub fn queries(&self) -> Arc<QueryService> {
        Arc::clone(&self.queries)
    }

    pub fn responses(&self) -> &ResponseBook {
        &self.book
    }

    /// Catalog course ids that rely on the response book's default entry.
    pub fn courses_without_responses(&self) -> Vec<String> {
        self.queries
            .store()
            .list_courses()
            .iter()
            .filter(|c| !self.book.courses.contains_key(&c.id))
            .map(|c| c.id.clone())
            .collect()
    }

    /// Deadline label for one assignment's detail due date.
    pub fn due_bucket(&self, assignment_id: &str) -> Result<DueBucket, CatalogError> {
        let detail = self.queries.get_assignment_detail(assignment_id)?;
        Ok(classify(self.now(), detail.due_date.instant()))
    }

    /// The "due this week" and "overdue" counters for a course.
    pub fn deadline_overview(&self, course_id: &str) -> Result<DeadlineOverview, CatalogError> {
        let assignments = self.queries.get_assignments_sorted(course_id)?;
        Ok(DeadlineOverview::compute(self.now(), &assignments))
    }

    pub fn open_submission(&self, assignment_id: &str) -> Result<SubmissionSession<StdRng>, CatalogError> {
        let detail = self.queries.get_assignment_detail(assignment_id)?.clone();
        let engine = GradingEngine::from_entropy(Arc::clone(&self.book));
        Ok(SubmissionSession::new(detail, engine, self.stage_interval))
    }

    pub fn open_chat(&self, assignment_id: &str) -> Result<ChatSession<StdRng>, CatalogError> {
        let detail = self.queries.get_assignment_detail(assignment_id)?;
        Ok(ChatSession::from_entropy(
            &detail.course_id,
            &detail.title,
            Arc::clone(&self.book),
            self.chat_reply_delay,
            self.now(),
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clock::ManualClock;
    use crate::grading::{GradingState, IncomingFile, PDF_MIME_TYPE};
    use chrono::TimeZone;

    fn at(clock_start: DateTime<Utc>) -> (Dashboard, Arc<ManualClock>) {
        let clock = Arc::new(ManualClock::new(clock_start));
        let dash = Dashboard::from_config(&ServerConfig::default())
            .unwrap()
            .with_clock(clock.clone());
        (dash, clock)
    }

    #[test]
    fn reports_courses_relying_on_default_responses() {
        let (dash, _) = at(Utc::now());
        assert_eq!(
            dash.courses_without_responses(),
            vec!["eng150".to_string(), "phys101".to_string()]
        );
    }

    #[test]
    fn buckets_detail_due_dates() {
        let (dash, clock) = at(Utc.with_ymd_and_hms(2024, 1, 15, 12, 0, 0).unwrap());
        assert_eq!(dash.due_bucket("cs101-1").unwrap(), DueBucket::DueTomorrow);
        assert_eq!(dash.due_bucket("cs101-3").unwrap(), DueBucket::NDaysLeft(11));
        assert!(dash.due_bucket("nope").is_err());

        clock.advance(Duration::days(1));
        assert_eq!(dash.due_bucket("cs101-1").unwrap(), DueBucket::Overdue);
    }

    #[test]
    fn overview_for_a_course() {
        let (dash, _) = at(Utc.with_ymd_and_hms(2024, 1, 16, 0, 0, 0).unwrap());
        assert_eq!(
            dash.deadline_overview("math201").unwrap(),
            DeadlineOverview {
                due_this_week: 2,
                overdue: 0
            }
        );
        assert!(dash.deadline_overview("hist150").is_err());
    }

    #[test]
    fn submission_flow_driven_by_virtual_time() {
        let (dash, clock) = at(Utc.with_ymd_and_hms(2024, 1, 14, 9, 0, 0).unwrap());
        let mut session = dash.open_submission("phys101-2").unwrap();
        let file = IncomingFile {
            name: "quiz.pdf".to_string(),
            mime_type: PDF_MIME_TYPE.to_string(),
            size_bytes: 4096,
        };
        assert!(session.submit(&[file], dash.now()));

        clock.advance(Duration::milliseconds(2400));
        assert!(matches!(
            session.poll(dash.now()),
            GradingState::Staging { progress: 30, .. }
        ));

        clock.advance(Duration::seconds(60));
        let GradingState::Complete(report) = session.poll(dash.now()) else {
            panic!("run should be complete");
        };
        assert_eq!(report.total_points, 40);
        assert!(report.total_score <= 40);
        assert!(dash.open_submission("missing").is_err());
    }

    #[test]
    fn chat_replies_after_configured_delay() {
        let (dash, clock) = at(Utc.with_ymd_and_hms(2024, 1, 14, 9, 0, 0).unwrap());
        let mut chat = dash.open_chat("eng150-3").unwrap();
        assert!(chat.transcript()[0].content.contains("Final Presentation"));

        chat.send("What should my slides cover?", dash.now());
        clock.advance(Duration::milliseconds(1500));
        assert_eq!(chat.poll(dash.now()), 1);
        assert!(!chat.is_typing());
    }
}

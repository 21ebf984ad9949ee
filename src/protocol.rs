use std::fmt;

use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use thiserror::Error;

// ── Courses ────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Course {
    pub id: String,
    pub name: String,
    pub code: String,
    pub color: String,
}

// ── Assignment enums ───────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AssignmentStatus {
    Pending,
    Submitted,
    Graded,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Priority {
    Low,
    Medium,
    High,
}

// ── Due dates ──────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unrecognised due date {0:?}")]
pub struct DueDateError(pub String);

/// A due date as authored in the catalog.
///
/// The authored string goes back out on the wire untouched; the parsed
/// instant is what sorting and classification work on. Date-only values
/// land on midnight UTC, naive datetimes are read as UTC.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DueDate {
    raw: String,
    at: DateTime<Utc>,
}

impl DueDate {
    pub fn parse(raw: &str) -> Result<Self, DueDateError> {
        let at = if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
            dt.with_timezone(&Utc)
        } else if let Ok(naive) = NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S") {
            naive.and_utc()
        } else if let Ok(date) = NaiveDate::parse_from_str(raw, "%Y-%m-%d") {
            date.and_hms_opt(0, 0, 0)
                .ok_or_else(|| DueDateError(raw.to_string()))?
                .and_utc()
        } else {
            return Err(DueDateError(raw.to_string()));
        };
        Ok(Self {
            raw: raw.to_string(),
            at,
        })
    }

    pub fn as_str(&self) -> &str {
        &self.raw
    }

    pub fn instant(&self) -> DateTime<Utc> {
        self.at
    }
}

impl fmt::Display for DueDate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.raw)
    }
}

impl Serialize for DueDate {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.raw)
    }
}

impl<'de> Deserialize<'de> for DueDate {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        DueDate::parse(&raw).map_err(serde::de::Error::custom)
    }
}

// ── Assignments ────────────────────────────────────────────────────

/// List-view shape of an assignment, as returned per course.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AssignmentSummary {
    pub id: String,
    pub title: String,
    #[serde(rename = "type")]
    pub kind: String,
    pub due_date: DueDate,
    pub status: AssignmentStatus,
    pub priority: Priority,
    pub description: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RubricCriterion {
    pub criteria: String,
    pub max_points: u32,
}

/// Detail-view shape: the summary fields plus course context and rubric.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AssignmentDetail {
    pub id: String,
    pub title: String,
    #[serde(rename = "type")]
    pub kind: String,
    pub due_date: DueDate,
    pub status: AssignmentStatus,
    pub priority: Priority,
    pub description: String,
    pub course_id: String,
    pub course_name: String,
    pub course_color: String,
    pub total_points: u32,
    pub rubric: Vec<RubricCriterion>,
}

impl AssignmentDetail {
    pub fn rubric_points(&self) -> u32 {
        self.rubric.iter().map(|c| c.max_points).sum()
    }
}

// ── Grading results ────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScoreDetail {
    pub criteria: String,
    pub score: u32,
    pub max_points: u32,
    pub feedback: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UploadedFile {
    pub name: String,
    pub size: String,
    pub uploaded_at: DateTime<Utc>,
}

// ── Chat ───────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChatRole {
    User,
    Assistant,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatMessage {
    pub id: String,
    pub role: ChatRole,
    pub content: String,
    pub timestamp: DateTime<Utc>,
}

// ── HTTP payloads ──────────────────────────────────────────────────

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CatalogSummary {
    pub courses: Vec<Course>,
    pub total_assignments: usize,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CourseAssignments {
    pub course: Course,
    pub assignments: Vec<AssignmentSummary>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AssignmentEnvelope {
    pub assignment: AssignmentDetail,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorBody {
    pub error: String,
}

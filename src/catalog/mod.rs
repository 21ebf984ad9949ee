pub mod query;
pub mod seed;

use std::collections::HashMap;

use thiserror::Error;
use tracing::info;

use crate::protocol::{
    AssignmentDetail, AssignmentSummary, Course, DueDate, DueDateError, RubricCriterion,
};

// ── Errors ──────────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CatalogError {
    #[error("course not found: {0}")]
    CourseNotFound(String),
    #[error("assignment not found: {0}")]
    AssignmentNotFound(String),
}

impl CatalogError {
    /// Payload text sent back to HTTP callers.
    pub fn wire_message(&self) -> &'static str {
        match self {
            CatalogError::CourseNotFound(_) => "Course not found",
            CatalogError::AssignmentNotFound(_) => "Assignment not found",
        }
    }
}

/// Authoring mistakes found by [`CatalogStore::validate`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CatalogIssue {
    #[error("assignment {assignment} references unknown course {course}")]
    UnknownCourse { assignment: String, course: String },
    #[error("assignment {0} has an empty rubric")]
    EmptyRubric(String),
    #[error("assignment {id} totals {total_points} points but its rubric sums to {rubric_points}")]
    PointsMismatch {
        id: String,
        total_points: u32,
        rubric_points: u32,
    },
}

// ── Store ───────────────────────────────────────────────────────────────

/// Immutable registry of courses and their assignments.
///
/// Summaries are grouped by course id and kept in authoring order; detail
/// records are keyed by assignment id. Nothing is mutated after
/// construction, so the store can be shared behind an `Arc` freely.
#[derive(Debug, Clone, Default)]
pub struct CatalogStore {
    courses: Vec<Course>,
    assignments: HashMap<String, Vec<AssignmentSummary>>,
    details: HashMap<String, AssignmentDetail>,
}

impl CatalogStore {
    pub fn from_parts(
        courses: Vec<Course>,
        assignments: Vec<(String, Vec<AssignmentSummary>)>,
        details: Vec<AssignmentDetail>,
    ) -> Self {
        Self {
            courses,
            assignments: assignments.into_iter().collect(),
            details: details.into_iter().map(|d| (d.id.clone(), d)).collect(),
        }
    }

    /// Build the store from the static definitions in [`seed`].
    pub fn seeded() -> Result<Self, DueDateError> {
        let courses: Vec<Course> = seed::all_courses()
            .iter()
            .map(|c| Course {
                id: c.id.to_string(),
                name: c.name.to_string(),
                code: c.code.to_string(),
                color: c.color.to_string(),
            })
            .collect();

        let mut assignments: HashMap<String, Vec<AssignmentSummary>> = HashMap::new();
        let mut details = HashMap::new();

        for def in seed::all_assignments() {
            assignments
                .entry(def.course_id.to_string())
                .or_default()
                .push(AssignmentSummary {
                    id: def.id.to_string(),
                    title: def.title.to_string(),
                    kind: def.kind.to_string(),
                    due_date: DueDate::parse(def.due_day)?,
                    status: def.status,
                    priority: def.priority,
                    description: def.summary.to_string(),
                });

            let course = seed::all_courses().iter().find(|c| c.id == def.course_id);
            details.insert(
                def.id.to_string(),
                AssignmentDetail {
                    id: def.id.to_string(),
                    title: def.title.to_string(),
                    kind: def.kind.to_string(),
                    due_date: DueDate::parse(def.due_at)?,
                    status: def.status,
                    priority: def.priority,
                    description: def.description.to_string(),
                    course_id: def.course_id.to_string(),
                    course_name: course
                        .map(|c| format!("{} - {}", c.code, c.name))
                        .unwrap_or_default(),
                    course_color: course.map(|c| c.color.to_string()).unwrap_or_default(),
                    total_points: def.total_points,
                    rubric: def
                        .rubric
                        .iter()
                        .map(|(criteria, max_points)| RubricCriterion {
                            criteria: criteria.to_string(),
                            max_points: *max_points,
                        })
                        .collect(),
                },
            );
        }

        let store = Self {
            courses,
            assignments,
            details,
        };
        info!(
            "Catalog seeded: {} courses, {} assignments",
            store.courses.len(),
            store.assignment_count()
        );
        Ok(store)
    }

    // ── Lookups ──────────────────────────────────────────────────────

    /// All courses in insertion order.
    pub fn list_courses(&self) -> &[Course] {
        &self.courses
    }

    /// Summaries for one course, in authoring order. Unknown ids give an
    /// empty slice; deciding whether that is an error is the caller's job.
    pub fn list_assignments(&self, course_id: &str) -> &[AssignmentSummary] {
        self.assignments
            .get(course_id)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    pub fn get_assignment_detail(&self, assignment_id: &str) -> Result<&AssignmentDetail, CatalogError> {
        self.details
            .get(assignment_id)
            .ok_or_else(|| CatalogError::AssignmentNotFound(assignment_id.to_string()))
    }

    pub fn find_course(&self, course_id: &str) -> Option<&Course> {
        self.courses.iter().find(|c| c.id == course_id)
    }

    pub fn assignment_count(&self) -> usize {
        self.assignments.values().map(Vec::len).sum()
    }

    // ── Validation ──────────────────────────────────────────────────

    /// Check the authoring invariants: every assignment belongs to a known
    /// course, every rubric is non-empty and sums to the total points.
    pub fn validate(&self) -> Vec<CatalogIssue> {
        let mut issues = Vec::new();

        let mut grouped: Vec<_> = self.assignments.iter().collect();
        grouped.sort_by(|a, b| a.0.cmp(b.0));
        for (course_id, summaries) in grouped {
            if self.find_course(course_id).is_none() {
                for summary in summaries {
                    issues.push(CatalogIssue::UnknownCourse {
                        assignment: summary.id.clone(),
                        course: course_id.clone(),
                    });
                }
            }
        }

        let mut details: Vec<_> = self.details.values().collect();
        details.sort_by(|a, b| a.id.cmp(&b.id));
        for detail in details {
            if self.find_course(&detail.course_id).is_none() {
                issues.push(CatalogIssue::UnknownCourse {
                    assignment: detail.id.clone(),
                    course: detail.course_id.clone(),
                });
            }
            if detail.rubric.is_empty() {
                issues.push(CatalogIssue::EmptyRubric(detail.id.clone()));
                continue;
            }
            let rubric_points = detail.rubric_points();
            if rubric_points != detail.total_points {
                issues.push(CatalogIssue::PointsMismatch {
                    id: detail.id.clone(),
                    total_points: detail.total_points,
                    rubric_points,
                });
            }
        }

        issues
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::protocol::{AssignmentStatus, Priority};

    fn seeded() -> CatalogStore {
        CatalogStore::seeded().expect("seed data parses")
    }

    #[test]
    fn seeded_catalog_has_four_courses_in_order() {
        let store = seeded();
        let ids: Vec<&str> = store.list_courses().iter().map(|c| c.id.as_str()).collect();
        assert_eq!(ids, vec!["cs101", "math201", "eng150", "phys101"]);
    }

    #[test]
    fn seeded_catalog_passes_validation() {
        let store = seeded();
        assert_eq!(store.validate(), Vec::new());
    }

    #[test]
    fn every_rubric_sums_to_total_points() {
        let store = seeded();
        for course in store.list_courses() {
            for summary in store.list_assignments(&course.id) {
                let detail = store.get_assignment_detail(&summary.id).unwrap();
                assert_eq!(detail.rubric_points(), detail.total_points, "{}", detail.id);
                assert!(!detail.rubric.is_empty());
            }
        }
    }

    #[test]
    fn list_assignments_only_returns_that_course() {
        let store = seeded();
        for course in store.list_courses() {
            let listed = store.list_assignments(&course.id);
            assert!(!listed.is_empty());
            for summary in listed {
                let detail = store.get_assignment_detail(&summary.id).unwrap();
                assert_eq!(detail.course_id, course.id);
            }
        }
    }

    #[test]
    fn unknown_course_lists_nothing() {
        let store = seeded();
        assert!(store.list_assignments("hist150").is_empty());
    }

    #[test]
    fn detail_carries_course_context() {
        let store = seeded();
        let detail = store.get_assignment_detail("math201-2").unwrap();
        assert_eq!(detail.course_name, "MATH 201 - Calculus II");
        assert_eq!(detail.course_color, "#8b5cf6");
        assert_eq!(detail.due_date.as_str(), "2024-01-22T23:59:00");
        assert_eq!(detail.total_points, 200);
    }

    #[test]
    fn unknown_assignment_is_not_found() {
        let store = seeded();
        let err = store.get_assignment_detail("does-not-exist").unwrap_err();
        assert_eq!(err, CatalogError::AssignmentNotFound("does-not-exist".to_string()));
        assert_eq!(err.wire_message(), "Assignment not found");
    }

    #[test]
    fn validate_flags_authoring_mistakes() {
        let detail = AssignmentDetail {
            id: "bad-1".to_string(),
            title: "Bad".to_string(),
            kind: "Quiz".to_string(),
            due_date: DueDate::parse("2024-02-01").unwrap(),
            status: AssignmentStatus::Pending,
            priority: Priority::Low,
            description: String::new(),
            course_id: "nowhere".to_string(),
            course_name: String::new(),
            course_color: String::new(),
            total_points: 10,
            rubric: vec![RubricCriterion {
                criteria: "Only".to_string(),
                max_points: 8,
            }],
        };
        let store = CatalogStore::from_parts(Vec::new(), Vec::new(), vec![detail]);
        let issues = store.validate();
        assert_eq!(issues.len(), 2);
        assert!(matches!(issues[0], CatalogIssue::UnknownCourse { .. }));
        assert!(matches!(
            issues[1],
            CatalogIssue::PointsMismatch {
                total_points: 10,
                rubric_points: 8,
                ..
            }
        ));
    }
}

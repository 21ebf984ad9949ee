use std::sync::Arc;

use tracing::debug;

use super::{CatalogError, CatalogStore};
use crate::protocol::{
    AssignmentDetail, AssignmentSummary, CatalogSummary, Course, CourseAssignments,
};

/// Read-only queries answered over a shared [`CatalogStore`].
#[derive(Debug, Clone)]
pub struct QueryService {
    store: Arc<CatalogStore>,
}

impl QueryService {
    pub fn new(store: Arc<CatalogStore>) -> Self {
        Self { store }
    }

    pub fn store(&self) -> &CatalogStore {
        &self.store
    }

    pub fn get_course(&self, course_id: &str) -> Result<&Course, CatalogError> {
        self.store.find_course(course_id).ok_or_else(|| {
            debug!("Course lookup missed: {}", course_id);
            CatalogError::CourseNotFound(course_id.to_string())
        })
    }

    /// Assignments for a course ordered by due date, earliest first.
    /// Equal due dates keep their authoring order.
    pub fn get_assignments_sorted(&self, course_id: &str) -> Result<Vec<AssignmentSummary>, CatalogError> {
        self.get_course(course_id)?;
        let mut assignments = self.store.list_assignments(course_id).to_vec();
        // sort_by_key is stable
        assignments.sort_by_key(|a| a.due_date.instant());
        Ok(assignments)
    }

    pub fn get_course_assignments(&self, course_id: &str) -> Result<CourseAssignments, CatalogError> {
        let course = self.get_course(course_id)?.clone();
        let assignments = self.get_assignments_sorted(course_id)?;
        Ok(CourseAssignments {
            course,
            assignments,
        })
    }

    pub fn get_catalog_summary(&self) -> CatalogSummary {
        CatalogSummary {
            courses: self.store.list_courses().to_vec(),
            total_assignments: self.store.assignment_count(),
        }
    }

    pub fn get_assignment_detail(&self, assignment_id: &str) -> Result<&AssignmentDetail, CatalogError> {
        self.store.get_assignment_detail(assignment_id).map_err(|e| {
            debug!("Assignment lookup missed: {}", assignment_id);
            e
        })
    }
}

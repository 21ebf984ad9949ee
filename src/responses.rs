use std::collections::HashMap;
use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::{info, warn};

/// Last-resort feedback line when a rubric is longer than the course's list.
pub const GENERIC_FEEDBACK: &str = "Good work on this criterion";

/// Canned text for one course.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CourseResponses {
    /// Feedback lines, matched to rubric criteria by position.
    #[serde(default)]
    pub feedback: Vec<String>,
    /// Study tips the chat assistant picks from.
    #[serde(default)]
    pub tips: Vec<String>,
}

/// Per-course canned responses shared by grading and chat.
///
/// Lookups for a course without an entry fall through to the entry named
/// by `default_course`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResponseBook {
    pub default_course: String,
    pub courses: HashMap<String, CourseResponses>,
}

impl ResponseBook {
    /// Load a response book from a JSON file on disk.
    /// Falls back to the built-in book if the file is missing or malformed.
    pub fn load_from_file(path: &Path) -> Self {
        match std::fs::read_to_string(path) {
            Ok(contents) => match serde_json::from_str::<ResponseBook>(&contents) {
                Ok(book) => {
                    info!(
                        "Loaded response book from {} with {} courses",
                        path.display(),
                        book.courses.len()
                    );
                    book
                }
                Err(e) => {
                    warn!(
                        "Failed to parse response book at {}: {}. Using built-in responses.",
                        path.display(),
                        e
                    );
                    ResponseBook::default()
                }
            },
            Err(e) => {
                warn!(
                    "Failed to read response book at {}: {}. Using built-in responses.",
                    path.display(),
                    e
                );
                ResponseBook::default()
            }
        }
    }

    fn entry(&self, course_id: &str) -> Option<&CourseResponses> {
        self.courses
            .get(course_id)
            .or_else(|| self.courses.get(&self.default_course))
    }

    pub fn feedback_for(&self, course_id: &str) -> &[String] {
        self.entry(course_id).map(|e| e.feedback.as_slice()).unwrap_or(&[])
    }

    /// Feedback line for the criterion at `index`.
    pub fn feedback_line(&self, course_id: &str, index: usize) -> &str {
        self.feedback_for(course_id)
            .get(index)
            .map(String::as_str)
            .unwrap_or(GENERIC_FEEDBACK)
    }

    pub fn tips_for(&self, course_id: &str) -> &[String] {
        self.entry(course_id).map(|e| e.tips.as_slice()).unwrap_or(&[])
    }
}

fn lines(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}

impl Default for ResponseBook {
    fn default() -> Self {
        let mut courses = HashMap::new();
        courses.insert(
            "cs101".to_string(),
            CourseResponses {
                feedback: lines(&[
                    "Code structure and organization",
                    "Algorithm efficiency and correctness",
                    "Proper use of programming concepts",
                    "Code documentation and comments",
                ]),
                tips: lines(&[
                    "For programming assignments, make sure to follow proper coding conventions and include comments explaining your logic.",
                    "Remember to test your code with different inputs and handle edge cases appropriately.",
                    "If you're stuck on a concept, try breaking the problem down into smaller, manageable parts.",
                    "Don't forget to include proper documentation and follow the coding style guidelines provided in class.",
                ]),
            },
        );
        courses.insert(
            "math201".to_string(),
            CourseResponses {
                feedback: lines(&[
                    "Mathematical accuracy and precision",
                    "Step-by-step problem solving approach",
                    "Proper use of mathematical notation",
                    "Clear explanation of reasoning",
                ]),
                tips: lines(&[
                    "Show all your work step-by-step. Partial credit is often given for correct methodology even if the final answer is wrong.",
                    "Make sure to clearly state your assumptions and explain your reasoning for each step.",
                    "Double-check your calculations and consider if your answer makes sense in the context of the problem.",
                    "Use proper mathematical notation and be precise with your language when explaining concepts.",
                ]),
            },
        );
        courses.insert(
            "eng102".to_string(),
            CourseResponses {
                feedback: lines(&[
                    "Thesis clarity and argument strength",
                    "Use of credible sources and citations",
                    "Writing clarity and organization",
                    "Grammar and language mechanics",
                ]),
                tips: lines(&[
                    "Make sure your thesis statement is clear and well-supported throughout your essay.",
                    "Use credible sources and cite them properly according to the required citation style.",
                    "Organize your ideas logically with smooth transitions between paragraphs.",
                    "Proofread carefully for grammar, spelling, and clarity before submitting.",
                ]),
            },
        );
        courses.insert(
            "hist150".to_string(),
            CourseResponses {
                feedback: lines(&[
                    "Historical accuracy and context",
                    "Use of primary and secondary sources",
                    "Analysis and critical thinking",
                    "Writing quality and organization",
                ]),
                tips: lines(&[
                    "Support your arguments with specific historical evidence and primary sources when possible.",
                    "Consider multiple perspectives and analyze the historical context of events.",
                    "Make connections between historical events and their broader significance.",
                    "Use proper historical terminology and demonstrate understanding of cause and effect relationships.",
                ]),
            },
        );
        Self {
            default_course: "cs101".to_string(),
            courses,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn known_course_uses_its_own_lines() {
        let book = ResponseBook::default();
        assert_eq!(book.feedback_line("math201", 0), "Mathematical accuracy and precision");
        assert_eq!(book.tips_for("eng102").len(), 4);
    }

    #[test]
    fn unknown_course_falls_back_to_default() {
        let book = ResponseBook::default();
        assert_eq!(book.feedback_for("phys101"), book.feedback_for("cs101"));
        assert_eq!(book.tips_for("eng150"), book.tips_for("cs101"));
    }

    #[test]
    fn index_past_the_list_uses_generic_line() {
        let book = ResponseBook::default();
        assert_eq!(book.feedback_line("cs101", 4), GENERIC_FEEDBACK);
    }

    #[test]
    fn missing_default_entry_yields_generic_feedback_and_no_tips() {
        let book = ResponseBook {
            default_course: "gone".to_string(),
            courses: HashMap::new(),
        };
        assert_eq!(book.feedback_line("cs101", 0), GENERIC_FEEDBACK);
        assert!(book.tips_for("cs101").is_empty());
    }

    #[test]
    fn missing_file_falls_back_to_builtin() {
        let book = ResponseBook::load_from_file(Path::new("/definitely/not/here.json"));
        assert_eq!(book, ResponseBook::default());
    }

    #[test]
    fn loads_book_from_json_file() {
        let path = std::env::temp_dir().join(format!(
            "response-book-{}.json",
            std::process::id()
        ));
        std::fs::write(
            &path,
            r#"{"default_course":"art100","courses":{"art100":{"feedback":["Composition"],"tips":["Sketch first."]}}}"#,
        )
        .unwrap();
        let book = ResponseBook::load_from_file(&path);
        std::fs::remove_file(&path).ok();

        assert_eq!(book.feedback_line("cs101", 0), "Composition");
        assert_eq!(book.feedback_line("art100", 1), GENERIC_FEEDBACK);
        assert_eq!(book.tips_for("art100").to_vec(), vec!["Sketch first.".to_string()]);
    }
}

use crate::protocol::{AssignmentStatus, Priority};

// ── Static definitions ─────────────────────────────────────────────

pub struct CourseDef {
    pub id: &'static str,
    pub name: &'static str,
    pub code: &'static str,
    pub color: &'static str,
}

pub struct AssignmentDef {
    pub id: &'static str,
    pub course_id: &'static str,
    pub title: &'static str,
    pub kind: &'static str,
    /// Calendar day shown in list views.
    pub due_day: &'static str,
    /// Full deadline shown on the detail page.
    pub due_at: &'static str,
    pub status: AssignmentStatus,
    pub priority: Priority,
    pub summary: &'static str,
    pub description: &'static str,
    pub total_points: u32,
    pub rubric: &'static [(&'static str, u32)],
}

/// Returns the seeded courses in display order.
pub fn all_courses() -> &'static [CourseDef] {
    static COURSES: &[CourseDef] = &[
        CourseDef {
            id: "cs101",
            name: "Computer Science 101",
            code: "CS 101",
            color: "#6366f1",
        },
        CourseDef {
            id: "math201",
            name: "Calculus II",
            code: "MATH 201",
            color: "#8b5cf6",
        },
        CourseDef {
            id: "eng150",
            name: "English Literature",
            code: "ENG 150",
            color: "#06b6d4",
        },
        CourseDef {
            id: "phys101",
            name: "Physics I",
            code: "PHYS 101",
            color: "#10b981",
        },
    ];
    COURSES
}

/// Returns every seeded assignment, grouped by course in insertion order.
pub fn all_assignments() -> &'static [AssignmentDef] {
    use AssignmentStatus::Pending;
    use Priority::*;

    static ASSIGNMENTS: &[AssignmentDef] = &[
        // ── CS 101 ──────────────────────────────────────────────────
        AssignmentDef {
            id: "cs101-1",
            course_id: "cs101",
            title: "Binary Search Implementation",
            kind: "Programming Assignment",
            due_day: "2024-01-15",
            due_at: "2024-01-15T23:59:00",
            status: Pending,
            priority: High,
            summary: "Implement binary search algorithm in Python with time complexity analysis",
            description: "Implement binary search algorithm in Python with time complexity analysis. Your solution should include proper documentation, test cases, and a detailed explanation of the algorithm's efficiency compared to linear search.",
            total_points: 100,
            rubric: &[
                ("Algorithm Implementation", 40),
                ("Code Quality & Documentation", 25),
                ("Time Complexity Analysis", 20),
                ("Test Cases & Examples", 15),
            ],
        },
        AssignmentDef {
            id: "cs101-2",
            course_id: "cs101",
            title: "Data Structures Quiz",
            kind: "Quiz",
            due_day: "2024-01-18",
            due_at: "2024-01-18T23:59:00",
            status: Pending,
            priority: Medium,
            summary: "Online quiz covering arrays, linked lists, and stacks",
            description: "Online quiz covering arrays, linked lists, and stacks. The quiz will test your understanding of basic data structure operations, time complexities, and practical applications.",
            total_points: 50,
            rubric: &[
                ("Conceptual Understanding", 25),
                ("Problem Solving", 15),
                ("Time Complexity Knowledge", 10),
            ],
        },
        AssignmentDef {
            id: "cs101-3",
            course_id: "cs101",
            title: "Algorithm Analysis Paper",
            kind: "Research Paper",
            due_day: "2024-01-25",
            due_at: "2024-01-25T23:59:00",
            status: Pending,
            priority: High,
            summary: "Write a 5-page analysis of sorting algorithms",
            description: "Write a 5-page analysis of sorting algorithms including bubble sort, merge sort, and quicksort. Compare their time and space complexities with real-world examples and performance benchmarks.",
            total_points: 150,
            rubric: &[
                ("Research & Analysis", 50),
                ("Technical Accuracy", 40),
                ("Writing Quality", 30),
                ("Citations & Format", 30),
            ],
        },
        // ── MATH 201 ────────────────────────────────────────────────
        AssignmentDef {
            id: "math201-1",
            course_id: "math201",
            title: "Integration Techniques",
            kind: "Problem Set",
            due_day: "2024-01-16",
            due_at: "2024-01-16T23:59:00",
            status: Pending,
            priority: Medium,
            summary: "Complete problems 1-20 from Chapter 7",
            description: "Complete problems 1-20 from Chapter 7 covering integration by parts, trigonometric substitution, and partial fractions. Show all work and provide step-by-step solutions.",
            total_points: 80,
            rubric: &[
                ("Mathematical Accuracy", 40),
                ("Solution Process", 25),
                ("Clarity of Work", 15),
            ],
        },
        AssignmentDef {
            id: "math201-2",
            course_id: "math201",
            title: "Midterm Exam",
            kind: "Exam",
            due_day: "2024-01-22",
            due_at: "2024-01-22T23:59:00",
            status: Pending,
            priority: High,
            summary: "Comprehensive exam covering integration and series",
            description: "Comprehensive exam covering integration and series. The exam will include both computational problems and conceptual questions about convergence tests and applications.",
            total_points: 200,
            rubric: &[
                ("Integration Techniques", 80),
                ("Series Analysis", 60),
                ("Problem Solving", 40),
                ("Mathematical Communication", 20),
            ],
        },
        AssignmentDef {
            id: "math201-3",
            course_id: "math201",
            title: "Series Convergence Project",
            kind: "Project",
            due_day: "2024-01-28",
            due_at: "2024-01-28T23:59:00",
            status: Pending,
            priority: High,
            summary: "Analyze convergence of various infinite series",
            description: "Analyze convergence of various infinite series using different convergence tests. Create visual representations and provide detailed mathematical proofs for your conclusions.",
            total_points: 120,
            rubric: &[
                ("Convergence Analysis", 50),
                ("Mathematical Proofs", 35),
                ("Visual Representations", 20),
                ("Project Presentation", 15),
            ],
        },
        // ── ENG 150 ─────────────────────────────────────────────────
        AssignmentDef {
            id: "eng150-1",
            course_id: "eng150",
            title: "Shakespeare Essay",
            kind: "Essay",
            due_day: "2024-01-17",
            due_at: "2024-01-17T23:59:00",
            status: Pending,
            priority: High,
            summary: "Analyze themes in Hamlet - 1000 words minimum",
            description: "Analyze themes in Hamlet - 1000 words minimum. Focus on the themes of revenge, madness, and moral corruption. Use MLA format and include at least 3 scholarly sources.",
            total_points: 100,
            rubric: &[
                ("Thesis & Argument", 30),
                ("Textual Analysis", 25),
                ("Use of Sources", 20),
                ("Writing Quality", 15),
                ("MLA Format", 10),
            ],
        },
        AssignmentDef {
            id: "eng150-2",
            course_id: "eng150",
            title: "Poetry Analysis",
            kind: "Assignment",
            due_day: "2024-01-20",
            due_at: "2024-01-20T23:59:00",
            status: Pending,
            priority: Medium,
            summary: "Compare and contrast two romantic poets",
            description: "Compare and contrast two romantic poets focusing on their use of nature imagery and emotional expression. Analyze specific poems and discuss their historical context.",
            total_points: 75,
            rubric: &[
                ("Comparative Analysis", 30),
                ("Literary Devices", 20),
                ("Historical Context", 15),
                ("Writing Clarity", 10),
            ],
        },
        AssignmentDef {
            id: "eng150-3",
            course_id: "eng150",
            title: "Final Presentation",
            kind: "Presentation",
            due_day: "2024-01-30",
            due_at: "2024-01-30T23:59:00",
            status: Pending,
            priority: High,
            summary: "15-minute presentation on chosen literary work",
            description: "15-minute presentation on chosen literary work. Include analysis of themes, historical context, and personal interpretation. Use visual aids and engage the audience.",
            total_points: 100,
            rubric: &[
                ("Content Knowledge", 40),
                ("Presentation Skills", 25),
                ("Visual Aids", 20),
                ("Audience Engagement", 15),
            ],
        },
        // ── PHYS 101 ────────────────────────────────────────────────
        AssignmentDef {
            id: "phys101-1",
            course_id: "phys101",
            title: "Mechanics Lab Report",
            kind: "Lab Report",
            due_day: "2024-01-19",
            due_at: "2024-01-19T23:59:00",
            status: Pending,
            priority: Medium,
            summary: "Write lab report on projectile motion experiment",
            description: "Write lab report on projectile motion experiment. Include theoretical background, experimental procedure, data analysis with graphs, and discussion of results and sources of error.",
            total_points: 90,
            rubric: &[
                ("Theoretical Background", 20),
                ("Experimental Procedure", 15),
                ("Data Analysis", 30),
                ("Discussion & Conclusions", 15),
                ("Report Format", 10),
            ],
        },
        AssignmentDef {
            id: "phys101-2",
            course_id: "phys101",
            title: "Forces and Motion Quiz",
            kind: "Quiz",
            due_day: "2024-01-21",
            due_at: "2024-01-21T23:59:00",
            status: Pending,
            priority: Low,
            summary: "Multiple choice quiz on Newton's laws",
            description: "Multiple choice quiz on Newton's laws covering force diagrams, equilibrium, and applications of Newton's second law in various scenarios.",
            total_points: 40,
            rubric: &[
                ("Conceptual Understanding", 20),
                ("Problem Application", 15),
                ("Force Diagram Skills", 5),
            ],
        },
        AssignmentDef {
            id: "phys101-3",
            course_id: "phys101",
            title: "Energy Conservation Problem Set",
            kind: "Problem Set",
            due_day: "2024-01-26",
            due_at: "2024-01-26T23:59:00",
            status: Pending,
            priority: Medium,
            summary: "Solve problems involving kinetic and potential energy",
            description: "Solve problems involving kinetic and potential energy, work-energy theorem, and conservation of mechanical energy. Include detailed solutions and energy diagrams.",
            total_points: 70,
            rubric: &[
                ("Problem Solving", 35),
                ("Energy Diagrams", 20),
                ("Mathematical Accuracy", 15),
            ],
        },
    ];
    ASSIGNMENTS
}

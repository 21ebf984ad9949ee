use std::collections::VecDeque;
use std::sync::Arc;

use chrono::{DateTime, Duration, Utc};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use tracing::debug;

use crate::protocol::{ChatMessage, ChatRole};
use crate::responses::ResponseBook;

/// Default delay before the assistant "answers".
pub const DEFAULT_REPLY_DELAY_MS: i64 = 1500;

/// Said when nothing else is configured for a course.
const FALLBACK_TIP: &str = "Review the assignment requirements and rubric carefully before you start.";

pub fn greeting(assignment_title: &str) -> String {
    format!(
        "Hi! I'm your AI assistant for {}. I can help you understand the requirements, clarify concepts, or provide guidance. What would you like to know?",
        assignment_title
    )
}

/// Scripted assistant for one assignment page.
///
/// Replies are tips picked at random from the course's list; what the user
/// typed never influences the choice. Each accepted message schedules one
/// reply `reply_delay` later, delivered by [`ChatSession::poll`].
pub struct ChatSession<R: Rng> {
    course_id: String,
    book: Arc<ResponseBook>,
    rng: R,
    reply_delay: Duration,
    transcript: Vec<ChatMessage>,
    pending: VecDeque<DateTime<Utc>>,
    next_id: u64,
}

impl ChatSession<StdRng> {
    pub fn from_entropy(
        course_id: &str,
        assignment_title: &str,
        book: Arc<ResponseBook>,
        reply_delay: Duration,
        now: DateTime<Utc>,
    ) -> Self {
        Self::open(course_id, assignment_title, book, StdRng::from_entropy(), reply_delay, now)
    }
}

impl<R: Rng> ChatSession<R> {
    /// Start a transcript that opens with the assistant's greeting.
    pub fn open(
        course_id: &str,
        assignment_title: &str,
        book: Arc<ResponseBook>,
        rng: R,
        reply_delay: Duration,
        now: DateTime<Utc>,
    ) -> Self {
        let mut session = Self {
            course_id: course_id.to_string(),
            book,
            rng,
            reply_delay,
            transcript: Vec::new(),
            pending: VecDeque::new(),
            next_id: 1,
        };
        session.push(ChatRole::Assistant, greeting(assignment_title), now);
        session
    }

    pub fn transcript(&self) -> &[ChatMessage] {
        &self.transcript
    }

    /// True while at least one reply is still on its way.
    pub fn is_typing(&self) -> bool {
        !self.pending.is_empty()
    }

    /// Append a user message and schedule a reply. Blank input is ignored.
    pub fn send(&mut self, text: &str, now: DateTime<Utc>) -> bool {
        if text.trim().is_empty() {
            return false;
        }
        self.push(ChatRole::User, text.to_string(), now);
        let due = now
            .checked_add_signed(self.reply_delay)
            .unwrap_or(DateTime::<Utc>::MAX_UTC);
        self.pending.push_back(due);
        true
    }

    /// Deliver every reply whose delay has elapsed by `now`.
    /// Returns how many were appended.
    pub fn poll(&mut self, now: DateTime<Utc>) -> usize {
        let mut delivered = 0;
        while let Some(due) = self.pending.front().copied() {
            if due > now {
                break;
            }
            self.pending.pop_front();
            let tip = self.pick_tip();
            self.push(ChatRole::Assistant, tip, due);
            delivered += 1;
        }
        delivered
    }

    fn pick_tip(&mut self) -> String {
        let tips = self.book.tips_for(&self.course_id);
        if tips.is_empty() {
            debug!("No tips configured for {}", self.course_id);
            return FALLBACK_TIP.to_string();
        }
        tips[self.rng.gen_range(0..tips.len())].clone()
    }

    fn push(&mut self, role: ChatRole, content: String, at: DateTime<Utc>) {
        self.transcript.push(ChatMessage {
            id: self.next_id.to_string(),
            role,
            content,
            timestamp: at,
        });
        self.next_id += 1;
    }
}

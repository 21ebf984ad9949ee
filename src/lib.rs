//! Course assignment dashboard backend.
//!
//! Serves a static catalog of courses and assignments over two read-only
//! JSON endpoints and provides the pieces a dashboard front end drives
//! locally: deadline classification, a simulated rubric grader with staged
//! progress, and a scripted study-tip chat.

pub mod catalog;
pub mod chat;
pub mod clock;
pub mod config;
pub mod dashboard;
pub mod deadlines;
pub mod grading;
pub mod network;
pub mod protocol;
pub mod responses;

//! Tutoring session layer — composes the memory store with an upstream
//! generator, one conversation per session.

pub mod session;

pub use session::TutorSession;

//! Terminal integration (crossterm + ratatui).
//!
//! Kept apart from `kernel`/`models` so the session core has no terminal dependency.

pub mod terminal_guard;
pub mod view;

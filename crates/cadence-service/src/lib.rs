//! Recurrence side of the task lifecycle: spawning the next instance of a
//! completed recurring task and keeping previews in step with rule edits.
//! Storage is left to the caller.

pub mod error;
pub mod recurrence;
pub mod task;

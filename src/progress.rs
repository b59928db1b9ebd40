// src/progress.rs
/// Lightweight progress reporting for a running search.
/// Frontends (the CLI) implement this to surface status to users.
pub trait Progress {
    /// Called once before the first request. `what` describes the query.
    fn begin(&mut self, _what: &str) {}

    /// Free-form status line for human eyes.
    fn log(&mut self, _msg: &str) {}

    /// Called after each full page, when another page is about to be fetched.
    fn page_done(&mut self, _pages: usize, _sources_so_far: usize) {}

    /// Called at the end, successful or not.
    fn finish(&mut self) {}
}

/// A no-op progress sink.
pub struct NullProgress;
impl Progress for NullProgress {}

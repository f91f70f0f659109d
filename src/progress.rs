use std::io::{self, Write};

/// Console counter for long per-item loops (one line, rewritten in place).
///
/// Goes to stderr so stdout stays free for rendered results.
pub struct Progress {
    label: &'static str,
    total: usize,
    done: usize,
}

impl Progress {
    pub fn new(label: &'static str, total: usize) -> Self {
        Self {
            label,
            total,
            done: 0,
        }
    }

    /// Mark one item complete and redraw the counter.
    pub fn tick(&mut self) {
        self.done += 1;
        eprint!("\r{}: {}/{}", self.label, self.done, self.total);
        let _ = io::stderr().flush();
    }

    /// Terminate the counter line.
    pub fn finish(self) {
        if self.total > 0 {
            eprintln!();
        }
    }
}

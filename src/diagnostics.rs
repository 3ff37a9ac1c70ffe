//! Scoped stage-duration logging, in the style of the reference project's
//! `LogDuration`: one stderr line per scope, emitted on drop.

use std::time::Instant;

pub struct StageTimer {
    stage: String,
    start: Instant,
}

impl StageTimer {
    pub fn new(stage: impl Into<String>) -> Self {
        StageTimer {
            stage: stage.into(),
            start: Instant::now(),
        }
    }
}

impl Drop for StageTimer {
    fn drop(&mut self) {
        eprintln!("{}: {} ms", self.stage, self.start.elapsed().as_millis());
    }
}

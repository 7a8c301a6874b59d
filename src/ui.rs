use std::io::{self, Write};

/// Sink for operator-facing messages.
pub trait Log {
    fn infof(&self, msg: &str);
    fn errorf(&self, msg: &str);
}

#[derive(Clone, Copy, Debug, Default)]
pub struct Logger;

impl Log for Logger {
    fn infof(&self, msg: &str) {
        let _ = writeln!(io::stderr(), "[pmcheck] {msg}");
    }

    fn errorf(&self, msg: &str) {
        let _ = writeln!(io::stderr(), "[pmcheck] ERROR: {msg}");
    }
}

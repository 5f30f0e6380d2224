//! Console reporting for the walker.

#[derive(Debug, Clone, Copy, Default)]
pub struct Logger {
    debug: bool,
}

impl Logger {
    pub fn new(debug: bool) -> Self {
        Logger { debug }
    }

    /// Tracing output, only visible when debug is on.
    pub fn info(&self, message: &str) {
        if self.debug {
            println!("ℹ️ {message}");
        }
    }

    pub fn success(&self, message: &str) {
        println!("✅ {message}");
    }

    pub fn warn(&self, message: &str) {
        eprintln!("⚠️ {message}");
    }

    pub fn error(&self, message: &str) {
        eprintln!("❗ {message}");
    }
}

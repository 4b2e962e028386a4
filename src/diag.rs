use log::warn;

/// Receives the non-fatal diagnostics raised while reconstructing
/// brushes (a brush whose planes the geometry kernel rejects).
///
/// Sinks are shared immutably for the duration of a parse call, so
/// implementations that accumulate use interior mutability.
pub trait DiagnosticSink {
    fn report(&self, line: u64, message: &str);
}

/// Forwards diagnostics to the `log` facade at warn level.
#[derive(Debug, Clone, Copy, Default)]
pub struct LogSink;

impl DiagnosticSink for LogSink {
    fn report(&self, line: u64, message: &str) {
        warn!("line {line}: {message}");
    }
}

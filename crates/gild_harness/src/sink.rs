//! Where harness status lines go.

/// Receives one status line at a time.
pub trait DiagnosticSink {
    fn put_string(&mut self, message: &str);
}

/// Prints each line to stdout.
#[derive(Debug, Default, Clone, Copy)]
pub struct StdoutSink;

impl DiagnosticSink for StdoutSink {
    fn put_string(&mut self, message: &str) {
        println!("{}", message);
    }
}

/// Collects lines, newline-terminated.
impl DiagnosticSink for String {
    fn put_string(&mut self, message: &str) {
        self.push_str(message);
        self.push('\n');
    }
}

impl<S: DiagnosticSink + ?Sized> DiagnosticSink for &mut S {
    fn put_string(&mut self, message: &str) {
        (**self).put_string(message);
    }
}

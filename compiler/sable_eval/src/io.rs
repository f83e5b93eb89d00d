//! I/O handlers for trace builtins.
//!
//! `print`, `println`, and `read` go through an [`IoHandlerImpl`] so the
//! driver can wire them to the real terminal while tests capture output
//! and script input. Dispatch is a plain enum match; handlers are shared
//! as [`SharedIo`] because the evaluator and the caller both hold one.

use parking_lot::Mutex;
use std::collections::VecDeque;
use std::io::BufRead;
use std::sync::Arc;

/// Shared reference to an I/O handler.
pub type SharedIo = Arc<IoHandlerImpl>;

/// Handler that writes to stdout and reads from stdin.
#[derive(Debug, Default)]
pub struct StdIo;

impl StdIo {
    pub fn write(&self, text: &str) {
        print!("{text}");
    }

    pub fn writeln(&self, text: &str) {
        println!("{text}");
    }

    /// Read one line from stdin, without the trailing newline.
    ///
    /// End of input and read failures both yield the empty string, so a
    /// program that keeps calling `read` settles on `""` instead of
    /// erroring.
    pub fn read_line(&self) -> String {
        let mut line = String::new();
        match std::io::stdin().lock().read_line(&mut line) {
            Ok(0) | Err(_) => String::new(),
            Ok(_) => {
                while line.ends_with('\n') || line.ends_with('\r') {
                    line.pop();
                }
                line
            }
        }
    }
}

/// Handler that captures output and replays scripted input.
#[derive(Debug, Default)]
pub struct BufferIo {
    output: Mutex<String>,
    input: Mutex<VecDeque<String>>,
}

impl BufferIo {
    pub fn new(inputs: Vec<String>) -> Self {
        BufferIo {
            output: Mutex::new(String::new()),
            input: Mutex::new(inputs.into_iter().collect()),
        }
    }

    pub fn write(&self, text: &str) {
        self.output.lock().push_str(text);
    }

    pub fn writeln(&self, text: &str) {
        let mut output = self.output.lock();
        output.push_str(text);
        output.push('\n');
    }

    /// Pop the next scripted line, or `""` once the script is exhausted.
    pub fn read_line(&self) -> String {
        self.input.lock().pop_front().unwrap_or_default()
    }

    pub fn output(&self) -> String {
        self.output.lock().clone()
    }
}

/// The concrete I/O handler implementations.
#[derive(Debug)]
pub enum IoHandlerImpl {
    Std(StdIo),
    Buffer(BufferIo),
}

impl IoHandlerImpl {
    pub fn write(&self, text: &str) {
        match self {
            IoHandlerImpl::Std(handler) => handler.write(text),
            IoHandlerImpl::Buffer(handler) => handler.write(text),
        }
    }

    pub fn writeln(&self, text: &str) {
        match self {
            IoHandlerImpl::Std(handler) => handler.writeln(text),
            IoHandlerImpl::Buffer(handler) => handler.writeln(text),
        }
    }

    pub fn read_line(&self) -> String {
        match self {
            IoHandlerImpl::Std(handler) => handler.read_line(),
            IoHandlerImpl::Buffer(handler) => handler.read_line(),
        }
    }

    /// Captured output, for buffer handlers. Stdout handlers capture
    /// nothing and return `""`.
    pub fn output(&self) -> String {
        match self {
            IoHandlerImpl::Std(_) => String::new(),
            IoHandlerImpl::Buffer(handler) => handler.output(),
        }
    }
}

/// Create a handler wired to the real terminal.
pub fn stdio_handler() -> SharedIo {
    Arc::new(IoHandlerImpl::Std(StdIo))
}

/// Create a capturing handler with scripted input lines.
pub fn buffer_handler(inputs: Vec<String>) -> SharedIo {
    Arc::new(IoHandlerImpl::Buffer(BufferIo::new(inputs)))
}

#[cfg(test)]
#[expect(clippy::unwrap_used, reason = "Tests use unwrap for brevity")]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_buffer_captures_output() {
        let handler = buffer_handler(Vec::new());
        handler.write("no newline");
        handler.writeln(" then one");

        assert_eq!(handler.output(), "no newline then one\n");
    }

    #[test]
    fn test_buffer_accumulates_writes() {
        let handler = buffer_handler(Vec::new());
        handler.writeln("first");
        handler.writeln("second");

        assert_eq!(handler.output(), "first\nsecond\n");
    }

    #[test]
    fn test_scripted_input_drains_in_order() {
        let handler = buffer_handler(vec!["42".to_string(), "done".to_string()]);

        assert_eq!(handler.read_line(), "42");
        assert_eq!(handler.read_line(), "done");
        assert_eq!(handler.read_line(), "");
        assert_eq!(handler.read_line(), "");
    }

    #[test]
    fn test_handler_is_shareable_across_threads() {
        let handler = buffer_handler(Vec::new());

        let writer = Arc::clone(&handler);
        let thread = std::thread::spawn(move || {
            writer.writeln("from thread");
        });
        handler.writeln("from main");
        thread.join().unwrap();

        let output = handler.output();
        assert!(output.contains("from thread"));
        assert!(output.contains("from main"));
    }
}

use std::io;

pub const PAUSE_PROMPT: &str = "Press Enter to continue...";

/// Line-oriented terminal surface used by the navigator.
pub trait Console {
    /// Shows `prompt` and waits for one line. `None` at end of input.
    fn read_line(&mut self, prompt: &str) -> io::Result<Option<String>>;

    fn print(&mut self, line: &str) -> io::Result<()>;

    fn clear(&mut self) -> io::Result<()>;

    fn pause(&mut self) -> io::Result<()> {
        self.read_line(PAUSE_PROMPT).map(|_| ())
    }
}

use std::io::{self, BufRead, IsTerminal, StdinLock, Stdout, Write};

use shelfwalk_core::Console;

const CLEAR_SCREEN: &str = "\x1B[2J\x1B[1;1H";

/// Console over the process's stdin and stdout.
pub(super) struct StdConsole {
    input: StdinLock<'static>,
    output: Stdout,
}

impl StdConsole {
    pub(super) fn new() -> Self {
        Self {
            input: io::stdin().lock(),
            output: io::stdout(),
        }
    }
}

impl Console for StdConsole {
    fn read_line(&mut self, prompt: &str) -> io::Result<Option<String>> {
        write!(self.output, "{prompt}")?;
        self.output.flush()?;
        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            return Ok(None);
        }
        Ok(Some(line.trim_end_matches(['\r', '\n']).to_string()))
    }

    fn print(&mut self, line: &str) -> io::Result<()> {
        writeln!(self.output, "{line}")
    }

    fn clear(&mut self) -> io::Result<()> {
        if !self.output.is_terminal() {
            return Ok(());
        }
        write!(self.output, "{CLEAR_SCREEN}")?;
        self.output.flush()
    }
}

use std::fmt::Display;
use std::io::{self, BufRead, Write};

use crate::error::ConsoleError;

/// Line-oriented prompt/answer channel between the operator and a session.
pub struct Console<R, W> {
    input: R,
    output: W,
}

impl<R: BufRead, W: Write> Console<R, W> {
    pub fn new(input: R, output: W) -> Console<R, W> {
        Console { input, output }
    }

    pub fn prompt_and_read_line(&mut self, prompt: &str) -> Result<String, ConsoleError> {
        write!(self.output, "{} ", prompt)?;
        self.output.flush()?;

        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            return Err(ConsoleError::Closed);
        }
        Ok(line.trim().to_string())
    }

    pub fn prompt_and_read_number(&mut self, prompt: &str) -> Result<f64, ConsoleError> {
        let input = self.prompt_and_read_line(prompt)?;
        match input.parse::<f64>() {
            Ok(number) if number.is_finite() => Ok(number),
            _ => Err(ConsoleError::Parse { input }),
        }
    }

    pub fn say(&mut self, line: impl Display) -> io::Result<()> {
        writeln!(self.output, "{}", line)
    }

    pub fn into_output(self) -> W {
        self.output
    }
}

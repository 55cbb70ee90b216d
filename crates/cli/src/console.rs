//! Line-oriented console over any `BufRead` + `Write` pair.

use std::io::{BufRead, Write};

use crate::error::{CliError, CliResult};

pub struct Console<R, W> {
    input: R,
    output: W,
}

impl<R: BufRead, W: Write> Console<R, W> {
    pub fn new(input: R, output: W) -> Self {
        Self { input, output }
    }

    pub fn output(&mut self) -> &mut W {
        &mut self.output
    }

    pub fn into_output(self) -> W {
        self.output
    }

    /// Write one line.
    pub fn say(&mut self, line: impl core::fmt::Display) -> CliResult<()> {
        writeln!(self.output, "{line}")?;
        Ok(())
    }

    /// Print `label`, then read one line with surrounding whitespace trimmed.
    ///
    /// Bytes that are not valid UTF-8 become U+FFFD, so a garbled line is an
    /// ordinary answer for the caller to reject.
    pub fn prompt(&mut self, label: &str) -> CliResult<String> {
        write!(self.output, "{label}")?;
        self.output.flush()?;

        let mut line = Vec::new();
        if self.input.read_until(b'\n', &mut line)? == 0 {
            return Err(CliError::InputClosed);
        }
        Ok(String::from_utf8_lossy(&line).trim().to_string())
    }

    /// Prompt until `parse` accepts the answer, printing each rejection message.
    pub fn prompt_until<T>(
        &mut self,
        label: &str,
        mut parse: impl FnMut(&str) -> Result<T, String>,
    ) -> CliResult<T> {
        loop {
            let answer = self.prompt(label)?;
            match parse(&answer) {
                Ok(value) => return Ok(value),
                Err(message) => self.say(message)?,
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    fn console(input: &str) -> Console<Cursor<Vec<u8>>, Vec<u8>> {
        Console::new(Cursor::new(input.as_bytes().to_vec()), Vec::new())
    }

    fn output(console: Console<Cursor<Vec<u8>>, Vec<u8>>) -> String {
        String::from_utf8(console.into_output()).unwrap()
    }

    #[test]
    fn prompt_trims_answer_and_prints_label() {
        let mut c = console("  hello \n");
        assert_eq!(c.prompt("Name: ").unwrap(), "hello");
        assert_eq!(output(c), "Name: ");
    }

    #[test]
    fn prompt_reports_closed_input() {
        let mut c = console("");
        assert!(matches!(c.prompt("Name: "), Err(CliError::InputClosed)));
    }

    #[test]
    fn prompt_replaces_invalid_utf8() {
        let mut c = Console::new(Cursor::new(b"\xff\xfe\nnext\n".to_vec()), Vec::new());
        assert_eq!(c.prompt("> ").unwrap(), "\u{fffd}\u{fffd}");
        assert_eq!(c.prompt("> ").unwrap(), "next");
    }

    #[test]
    fn prompt_until_repeats_on_rejection() {
        let mut c = console("x\ny\nok\n");
        let value = c
            .prompt_until("? ", |s| {
                if s == "ok" {
                    Ok(1)
                } else {
                    Err(format!("bad: {s}"))
                }
            })
            .unwrap();
        assert_eq!(value, 1);
        let out = output(c);
        assert!(out.contains("bad: x\n"));
        assert!(out.contains("bad: y\n"));
    }
}

//! Line-oriented prompting for the interactive session
//!
//! Every read returns `Ok(None)` once input is exhausted so callers can end
//! the session cleanly instead of spinning on EOF.

use std::io::{BufRead, Write};
use std::str::FromStr;

use carbutler_types::Result;

pub struct Prompter<R, W> {
    input: R,
    output: W,
}

impl<R: BufRead, W: Write> Prompter<R, W> {
    pub fn new(input: R, output: W) -> Self {
        Self { input, output }
    }

    /// Writer for session output
    pub fn out(&mut self) -> &mut W {
        &mut self.output
    }

    #[cfg(test)]
    pub fn into_output(self) -> W {
        self.output
    }

    /// Print `prompt` and read one trimmed line
    pub fn line(&mut self, prompt: &str) -> Result<Option<String>> {
        write!(self.output, "{}", prompt)?;
        self.output.flush()?;

        let mut buf = String::new();
        if self.input.read_line(&mut buf)? == 0 {
            return Ok(None);
        }
        Ok(Some(buf.trim().to_string()))
    }

    /// Read until the answer parses and passes `check`; re-prompts otherwise
    pub fn parse<T, F>(&mut self, prompt: &str, invalid: &str, check: F) -> Result<Option<T>>
    where
        T: FromStr,
        F: Fn(&T) -> std::result::Result<(), String>,
    {
        loop {
            let Some(answer) = self.line(prompt)? else {
                return Ok(None);
            };
            match answer.parse::<T>() {
                Ok(value) => match check(&value) {
                    Ok(()) => return Ok(Some(value)),
                    Err(message) => writeln!(self.output, "{}", message)?,
                },
                Err(_) => writeln!(self.output, "{}", invalid)?,
            }
        }
    }

    /// Pick one of `count` numbered options; returns a 0-based index
    pub fn choose(&mut self, prompt: &str, count: usize) -> Result<Option<usize>> {
        let choice = self.parse(prompt, "Please enter a valid number.", |n: &usize| {
            if (1..=count).contains(n) {
                Ok(())
            } else {
                Err("Invalid selection.".to_string())
            }
        })?;
        Ok(choice.map(|n| n - 1))
    }

    /// y/n question; anything but `y` means no
    pub fn confirm(&mut self, prompt: &str) -> Result<Option<bool>> {
        Ok(self
            .line(prompt)?
            .map(|answer| answer.eq_ignore_ascii_case("y")))
    }

    /// Wait for Enter
    pub fn pause(&mut self) -> Result<Option<()>> {
        Ok(self.line("\nPress Enter to continue...")?.map(|_| ()))
    }
}

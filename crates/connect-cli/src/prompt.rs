//! Line-based prompting over any reader and writer.

use std::io::{BufRead, Write};
use std::thread;
use std::time::Duration;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum PromptError {
    #[error("Input closed before a valid answer was given")]
    InputClosed,

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Asks questions on `output` and reads answers from `input`
pub struct Prompter<R, W> {
    input: R,
    output: W,
    pace: Duration,
}

impl<R: BufRead, W: Write> Prompter<R, W> {
    pub fn new(input: R, output: W, pace: Duration) -> Self {
        Self {
            input,
            output,
            pace,
        }
    }

    /// Print a line of narration
    pub fn say(&mut self, text: &str) -> Result<(), PromptError> {
        writeln!(self.output, "{}", text)?;
        Ok(())
    }

    /// Print a line, then wait for the configured pace
    pub fn narrate(&mut self, text: &str) -> Result<(), PromptError> {
        self.say(text)?;
        self.output.flush()?;
        if !self.pace.is_zero() {
            thread::sleep(self.pace);
        }
        Ok(())
    }

    /// Print an error framed the way all rejections are shown
    pub fn complain(&mut self, message: &str) -> Result<(), PromptError> {
        self.say("------------------------------")?;
        self.say(&format!("!! {} !!", message))?;
        self.say("------------------------------")
    }

    /// Ask a question and return the trimmed answer
    pub fn ask(&mut self, question: &str) -> Result<String, PromptError> {
        write!(self.output, "{}", question)?;
        self.output.flush()?;

        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            return Err(PromptError::InputClosed);
        }
        Ok(line.trim().to_string())
    }

    /// Ask until the answer is a whole number in `min..=max`
    pub fn number(
        &mut self,
        question: &str,
        min: usize,
        max: usize,
        error: &str,
    ) -> Result<usize, PromptError> {
        loop {
            let answer = self.ask(question)?;
            match answer.parse::<usize>() {
                Ok(n) if (min..=max).contains(&n) => return Ok(n),
                _ => self.complain(error)?,
            }
        }
    }

    #[cfg(test)]
    pub fn into_output(self) -> W {
        self.output
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    fn prompter(input: &str) -> Prompter<Cursor<Vec<u8>>, Vec<u8>> {
        Prompter::new(Cursor::new(input.as_bytes().to_vec()), Vec::new(), Duration::ZERO)
    }

    #[test]
    fn test_number_retries_until_in_range() {
        let mut p = prompter("abc\n12\n 7 \n");
        let n = p.number("Width? ", 5, 9, "Please enter a number between 5 and 9").unwrap();
        assert_eq!(n, 7);

        let output = String::from_utf8(p.into_output()).unwrap();
        assert_eq!(output.matches("!! Please enter a number between 5 and 9 !!").count(), 2);
        assert_eq!(output.matches("Width? ").count(), 3);
    }

    #[test]
    fn test_closed_input() {
        let mut p = prompter("");
        assert!(matches!(p.ask("Name? "), Err(PromptError::InputClosed)));
    }

    #[test]
    fn test_ask_trims() {
        let mut p = prompter("  Ada Lovelace \n");
        assert_eq!(p.ask("Name? ").unwrap(), "Ada Lovelace");
    }
}

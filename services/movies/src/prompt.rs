//! Line-oriented prompting with validated numeric input

use std::fmt::Display;
use std::io::{self, BufRead, Write};
use std::str::FromStr;

use thiserror::Error;

/// Why a line of input was not accepted as a number
#[derive(Error, Debug, Clone, PartialEq)]
pub enum InputError {
    #[error("'{input}' is not a valid {kind}, please try again")]
    NotANumber { input: String, kind: &'static str },

    #[error("Please enter a value between {min} and {max}")]
    OutOfRange { min: String, max: String },
}

/// Numeric types the prompt knows how to read
pub trait Numeric: FromStr + PartialOrd + Display + Copy {
    /// Human readable name used in error messages
    const KIND: &'static str;

    fn is_usable(&self) -> bool {
        true
    }
}

impl Numeric for i32 {
    const KIND: &'static str = "whole number";
}

impl Numeric for i64 {
    const KIND: &'static str = "whole number";
}

impl Numeric for usize {
    const KIND: &'static str = "whole number";
}

impl Numeric for f64 {
    const KIND: &'static str = "number";

    fn is_usable(&self) -> bool {
        self.is_finite()
    }
}

/// Parse a number and check it against inclusive bounds
pub fn parse_number<T: Numeric>(input: &str, bounds: Option<(T, T)>) -> Result<T, InputError> {
    let trimmed = input.trim();
    let value = trimmed
        .parse::<T>()
        .ok()
        .filter(|value| value.is_usable())
        .ok_or_else(|| InputError::NotANumber {
            input: trimmed.to_string(),
            kind: T::KIND,
        })?;

    if let Some((min, max)) = bounds {
        if value < min || value > max {
            return Err(InputError::OutOfRange {
                min: min.to_string(),
                max: max.to_string(),
            });
        }
    }

    Ok(value)
}

/// Reads answers from `input` and writes prompts and messages to `output`
pub struct Prompter<R, W> {
    input: R,
    output: W,
}

impl<R: BufRead, W: Write> Prompter<R, W> {
    pub fn new(input: R, output: W) -> Self {
        Self { input, output }
    }

    /// Print a full line
    pub fn say(&mut self, message: impl Display) -> io::Result<()> {
        writeln!(self.output, "{}", message)
    }

    /// Print a prompt and read one trimmed line
    ///
    /// End of input is reported as `UnexpectedEof` so callers can wind
    /// down instead of spinning on an empty stream.
    pub fn ask(&mut self, prompt: &str) -> io::Result<String> {
        write!(self.output, "{}", prompt)?;
        self.output.flush()?;

        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            return Err(io::Error::new(io::ErrorKind::UnexpectedEof, "input closed"));
        }

        Ok(line.trim().to_string())
    }

    /// Ask until a non-blank answer is given
    pub fn ask_non_empty(&mut self, prompt: &str) -> io::Result<String> {
        loop {
            let answer = self.ask(prompt)?;
            if !answer.is_empty() {
                return Ok(answer);
            }
            self.say("Input must not be empty, please try again.")?;
        }
    }

    /// Ask until the answer parses as `T` and falls within `bounds`
    pub fn ask_number<T: Numeric>(
        &mut self,
        prompt: &str,
        bounds: Option<(T, T)>,
    ) -> io::Result<T> {
        loop {
            let answer = self.ask(prompt)?;
            match parse_number(&answer, bounds) {
                Ok(value) => return Ok(value),
                Err(e) => self.say(e)?,
            }
        }
    }

    #[cfg(test)]
    pub fn output(&self) -> &W {
        &self.output
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    fn prompter(input: &str) -> Prompter<Cursor<Vec<u8>>, Vec<u8>> {
        Prompter::new(Cursor::new(input.as_bytes().to_vec()), Vec::new())
    }

    fn printed(prompter: &Prompter<Cursor<Vec<u8>>, Vec<u8>>) -> String {
        String::from_utf8(prompter.output().clone()).unwrap()
    }

    #[test]
    fn test_parse_number() {
        assert_eq!(parse_number::<i32>(" 2010 ", None), Ok(2010));
        assert_eq!(parse_number::<f64>("8.8", Some((1.0, 10.0))), Ok(8.8));
        assert!(matches!(
            parse_number::<i32>("8.8", None),
            Err(InputError::NotANumber { .. })
        ));
        assert!(matches!(
            parse_number::<f64>("NaN", None),
            Err(InputError::NotANumber { .. })
        ));
        assert_eq!(
            parse_number::<usize>("0", Some((1, 3))),
            Err(InputError::OutOfRange {
                min: "1".to_string(),
                max: "3".to_string()
            })
        );
    }

    #[test]
    fn test_retries_until_valid() {
        let mut p = prompter("abc\n11\n5\n");
        let value: i32 = p.ask_number("Rating: ", Some((1, 10))).unwrap();
        assert_eq!(value, 5);

        let out = printed(&p);
        assert_eq!(out.matches("Rating: ").count(), 3);
        assert!(out.contains("'abc' is not a valid whole number"));
        assert!(out.contains("Please enter a value between 1 and 10"));
    }

    #[test]
    fn test_bounds_are_inclusive() {
        let mut p = prompter("10\n");
        assert_eq!(p.ask_number::<f64>("> ", Some((1.0, 10.0))).unwrap(), 10.0);
    }

    #[test]
    fn test_ask_non_empty_skips_blank_lines() {
        let mut p = prompter("\n   \nInception\n");
        assert_eq!(p.ask_non_empty("Title: ").unwrap(), "Inception");
        assert_eq!(printed(&p).matches("must not be empty").count(), 2);
    }

    #[test]
    fn test_end_of_input_is_an_error() {
        let mut p = prompter("abc\n");
        let err = p.ask_number::<i32>("> ", None).unwrap_err();
        assert_eq!(err.kind(), io::ErrorKind::UnexpectedEof);
    }
}

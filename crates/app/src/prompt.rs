//! Line prompts that keep asking until the answer parses.

use std::io::{self, BufRead, Write};

use game_core::Action;

pub const PROMPT: &str = "> ";

pub fn parse_number(input: &str, len: usize) -> Result<usize, String> {
    let number: usize = input.trim().parse().map_err(|_| "Enter a number!".to_string())?;
    if number == 0 || number > len {
        return Err(format!("Don't overthink it, enter the number in range [1, {len}]"));
    }
    Ok(number - 1)
}

pub fn parse_non_empty(input: &str) -> Result<String, String> {
    let trimmed = input.trim();
    if trimmed.is_empty() {
        return Err("You can't fool me! You have entered an empty String.".to_string());
    }
    Ok(trimmed.to_string())
}

pub fn parse_action(input: &str, actions: &[Action]) -> Result<Action, String> {
    Action::from_keyword(input, actions).ok_or_else(|| "Don't overthink it, enter the correct value".to_string())
}

pub struct Prompter<R, W> {
    input: R,
    output: W,
}

impl<R: BufRead, W: Write> Prompter<R, W> {
    pub fn new(input: R, output: W) -> Self {
        Self { input, output }
    }

    pub fn into_output(self) -> W {
        self.output
    }

    pub fn say(&mut self, text: &str) -> io::Result<()> {
        writeln!(self.output, "{text}")
    }

    /// One line without its terminator. End of input is an error so that a
    /// closed stdin cannot spin the retry loop.
    fn read_line(&mut self) -> io::Result<String> {
        write!(self.output, "{PROMPT}")?;
        self.output.flush()?;
        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            return Err(io::Error::new(io::ErrorKind::UnexpectedEof, "input closed"));
        }
        Ok(line.trim_end_matches(['\r', '\n']).to_string())
    }

    /// Reads until `parse` accepts a line, echoing each rejection.
    pub fn retry<T>(&mut self, mut parse: impl FnMut(&str) -> Result<T, String>) -> io::Result<T> {
        loop {
            let line = self.read_line()?;
            match parse(&line) {
                Ok(value) => return Ok(value),
                Err(message) => self.say(&message)?,
            }
        }
    }

    /// Prints `options` as a numbered list and returns the chosen index.
    pub fn choose_index<T: AsRef<str>>(&mut self, options: &[T]) -> io::Result<usize> {
        for (number, option) in options.iter().enumerate() {
            writeln!(self.output, "{}. {}", number + 1, option.as_ref())?;
        }
        self.say("Which number do you want to choose?")?;
        self.retry(|line| parse_number(line, options.len()))
    }

    pub fn choose_string(&mut self) -> io::Result<String> {
        self.retry(parse_non_empty)
    }

    pub fn choose_action(&mut self, actions: &[Action]) -> io::Result<Action> {
        self.retry(|line| parse_action(line, actions))
    }
}

#[cfg(test)]
mod tests {
    use std::io::Cursor;

    use game_core::Direction;

    use super::*;

    fn prompter(input: &str) -> Prompter<Cursor<Vec<u8>>, Vec<u8>> {
        Prompter::new(Cursor::new(input.as_bytes().to_vec()), Vec::new())
    }

    #[test]
    fn numbers_are_one_based_and_bounded() {
        assert_eq!(parse_number("1", 3), Ok(0));
        assert_eq!(parse_number(" 3 ", 3), Ok(2));
        assert_eq!(parse_number("0", 3), Err("Don't overthink it, enter the number in range [1, 3]".to_string()));
        assert_eq!(parse_number("4", 3), Err("Don't overthink it, enter the number in range [1, 3]".to_string()));
        assert_eq!(parse_number("two", 3), Err("Enter a number!".to_string()));
    }

    #[test]
    fn retry_echoes_rejections_until_valid() {
        let mut prompter = prompter("\n  \nRobin\n");

        assert_eq!(prompter.choose_string().unwrap(), "Robin");

        let output = String::from_utf8(prompter.into_output()).unwrap();
        assert_eq!(output.matches("You can't fool me!").count(), 2);
        assert_eq!(output.matches(PROMPT).count(), 3);
    }

    #[test]
    fn actions_match_keywords_case_insensitively() {
        let mut prompter = prompter("dance\nGO North\n");
        let actions = [Action::Map, Action::Go(Direction::North)];

        assert_eq!(prompter.choose_action(&actions).unwrap(), Action::Go(Direction::North));
    }

    #[test]
    fn closed_input_is_an_error() {
        let mut prompter = prompter("7\n");
        let err = prompter.choose_index(&["only"]).unwrap_err();
        assert_eq!(err.kind(), io::ErrorKind::UnexpectedEof);
    }
}

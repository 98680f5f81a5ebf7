//! Line-oriented console I/O.
//!
//! All reading from stdin and writing to stdout goes through [`Console`],
//! so the menu can be driven from any reader/writer pair.

use std::{
    fmt::Display,
    io::{self, BufRead, Stdin, StdinLock, Stdout, Write},
    str::FromStr,
};

use anyhow::Context;
use colored::Colorize;

/// Console over a buffered reader and a writer.
pub struct Console<R, W> {
    input: R,
    output: W,
}

impl Console<StdinLock<'static>, Stdout> {
    /// Console bound to the process stdin/stdout.
    pub fn stdio() -> Self {
        let stdin: Stdin = io::stdin();
        Self::new(stdin.lock(), io::stdout())
    }
}

impl<R: BufRead, W: Write> Console<R, W> {
    pub fn new(input: R, output: W) -> Self {
        Self { input, output }
    }

    /// Gives back the writer, mainly for inspecting captured output.
    pub fn into_output(self) -> W {
        self.output
    }

    /// Writes without a newline and flushes.
    pub fn print(&mut self, text: impl Display) -> io::Result<()> {
        write!(self.output, "{text}")?;
        self.output.flush()
    }

    pub fn println(&mut self, text: impl Display) -> io::Result<()> {
        writeln!(self.output, "{text}")
    }

    pub fn success(&mut self, text: impl Display) -> io::Result<()> {
        writeln!(self.output, "{}", text.to_string().green())
    }

    pub fn error(&mut self, text: impl Display) -> io::Result<()> {
        writeln!(self.output, "{}", text.to_string().red())
    }

    pub fn heading(&mut self, text: impl Display) -> io::Result<()> {
        writeln!(self.output, "{}", text.to_string().bold())
    }

    /// Reads one line without its line terminator.
    ///
    /// End of input is reported as [`io::ErrorKind::UnexpectedEof`].
    pub fn read_line(&mut self) -> io::Result<String> {
        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            return Err(io::Error::new(io::ErrorKind::UnexpectedEof, "end of input"));
        }
        Ok(line.trim_end_matches(['\n', '\r']).to_string())
    }

    /// Prints `msg` and reads the answer.
    pub fn prompt(&mut self, msg: impl Display) -> io::Result<String> {
        self.print(msg)?;
        self.read_line()
    }

    /// Prints `msg` and parses the trimmed answer.
    pub fn prompt_parse<T>(&mut self, msg: impl Display) -> anyhow::Result<T>
    where
        T: FromStr,
        T::Err: std::error::Error + Send + Sync + 'static,
    {
        let answer = self.prompt(msg)?;
        let answer = answer.trim();
        answer
            .parse()
            .with_context(|| format!("cannot parse {answer:?}"))
    }

    /// Prints `msg` and returns the first non-blank character of the answer.
    pub fn prompt_char(&mut self, msg: impl Display) -> anyhow::Result<char> {
        let answer = self.prompt(msg)?;
        answer
            .trim()
            .chars()
            .next()
            .ok_or_else(|| anyhow!("empty answer"))
    }

    /// Prints `msg` and reads two integers separated by blanks or a comma.
    pub fn prompt_coord(&mut self, msg: impl Display) -> anyhow::Result<(i32, i32)> {
        let answer = self.prompt(msg)?;
        let parts: Vec<&str> = answer
            .split(|c: char| c.is_whitespace() || c == ',')
            .filter(|s| !s.is_empty())
            .collect();
        let [row, col] = parts.as_slice() else {
            bail!("expected two numbers, got {answer:?}");
        };
        Ok((row.parse()?, col.parse()?))
    }
}

/// Returns true if the error chain ends in an end-of-input condition.
pub fn is_end_of_input(err: &anyhow::Error) -> bool {
    err.chain().any(|cause| {
        cause
            .downcast_ref::<io::Error>()
            .is_some_and(|e| e.kind() == io::ErrorKind::UnexpectedEof)
    })
}

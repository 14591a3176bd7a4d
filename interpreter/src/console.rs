// Copyright (C) 2025 Tristan Gerritsen <tristan@thewoosh.org>
// All Rights Reserved.

use std::collections::VecDeque;
use std::io::BufRead;

/// The seam between the interpreter and the outside world. `print`
/// writes a line, `scan` reads one.
pub trait Console {
    fn write_line(&mut self, line: &str);

    /// `None` means the input is exhausted.
    fn read_line(&mut self) -> Option<String>;
}

/// Talks to the real terminal.
#[derive(Debug, Default)]
pub struct StdConsole;

impl Console for StdConsole {
    fn write_line(&mut self, line: &str) {
        println!("{line}");
    }

    fn read_line(&mut self) -> Option<String> {
        let mut line = String::new();
        let bytes_read = std::io::stdin().lock().read_line(&mut line).ok()?;

        if bytes_read == 0 {
            return None;
        }

        while line.ends_with('\n') || line.ends_with('\r') {
            line.pop();
        }

        Some(line)
    }
}

/// Captures output and serves scripted input.
#[derive(Debug, Default)]
pub struct BufferedConsole {
    output: Vec<String>,
    input: VecDeque<String>,
}

impl BufferedConsole {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_input<I, S>(input: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            output: Vec::new(),
            input: input.into_iter().map(Into::into).collect(),
        }
    }

    #[must_use]
    pub fn output(&self) -> &[String] {
        &self.output
    }
}

impl Console for BufferedConsole {
    fn write_line(&mut self, line: &str) {
        self.output.push(line.to_string());
    }

    fn read_line(&mut self) -> Option<String> {
        self.input.pop_front()
    }
}

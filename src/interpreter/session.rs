use std::io::{BufRead, Write};

use crate::{
    error::SessionError,
    interpreter::scheduler::{Progress, Scheduler, StepReport},
};

/// Prompt written before each read when prompting is enabled.
pub const PROMPT: &str = "Enter expression:";

/// One instruction of a command script.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    /// `R`: read one statement from the input and queue it.
    Read,
    /// `C`: run one evaluation pass.
    Compute,
}

impl Command {
    /// Parses a command script such as `"RRCRC"`.
    ///
    /// Letters are case-insensitive and whitespace is ignored.
    ///
    /// # Errors
    /// Returns [`SessionError::InvalidCommand`] for any other character.
    ///
    /// # Example
    /// ```
    /// use lazycalc::interpreter::session::Command;
    ///
    /// let commands = Command::parse_script("r C r").unwrap();
    /// assert_eq!(commands, [Command::Read, Command::Compute, Command::Read]);
    /// assert!(Command::parse_script("RX").is_err());
    /// ```
    pub fn parse_script(script: &str) -> Result<Vec<Self>, SessionError> {
        script.chars()
              .enumerate()
              .filter(|(_, c)| !c.is_whitespace())
              .map(|(position, c)| match c.to_ascii_uppercase() {
                  'R' => Ok(Self::Read),
                  'C' => Ok(Self::Compute),
                  _ => Err(SessionError::InvalidCommand { found: c,
                                                          position }),
              })
              .collect()
    }
}

/// Drives a [`Scheduler`] from a command script, reading statements from an
/// input and writing the console messages to an output.
#[derive(Debug, Default)]
pub struct Session {
    scheduler: Scheduler,
    prompt:    bool,
    reads:     usize,
}

impl Session {
    /// Creates a session with an empty scheduler.
    ///
    /// When `prompt` is set, [`PROMPT`] is written before every read.
    #[must_use]
    pub fn new(prompt: bool) -> Self {
        Self { prompt,
               ..Self::default() }
    }

    /// The scheduler driven by the session.
    #[must_use]
    pub const fn scheduler(&self) -> &Scheduler {
        &self.scheduler
    }

    /// Executes `commands` in order.
    ///
    /// A statement that fails to parse is reported and skipped; it does not
    /// stop the session.
    ///
    /// # Errors
    /// - [`SessionError::InputExhausted`] if a read finds no more input.
    /// - [`SessionError::Io`] if reading or writing fails.
    ///
    /// # Example
    /// ```
    /// use lazycalc::interpreter::session::{Command, Session};
    ///
    /// let commands = Command::parse_script("RRCC").unwrap();
    /// let input = "B = A + 1\nA = 5\n".as_bytes();
    /// let mut output = Vec::new();
    ///
    /// Session::new(false).run(&commands, input, &mut output).unwrap();
    ///
    /// let text = String::from_utf8(output).unwrap();
    /// assert!(text.ends_with("Expression (1) was calculated. The value of B is now 6\n"));
    /// ```
    pub fn run<R, W>(&mut self, commands: &[Command], mut input: R, mut output: W)
                     -> Result<(), SessionError>
        where R: BufRead,
              W: Write
    {
        for command in commands {
            match command {
                Command::Read => {
                    let line = self.read_line(&mut input, &mut output)?
                                   .ok_or(SessionError::InputExhausted { requested: self.reads })?;
                    self.submit(&line, &mut output)?;
                },
                Command::Compute => {
                    let report = self.scheduler.step();
                    write_report(&report, &mut output)?;
                },
            }
        }
        output.flush()?;
        Ok(())
    }

    /// Reads every remaining line of `input`, then runs passes until the
    /// queue is empty or a pass stalls.
    ///
    /// Blank lines and lines starting with `#` are skipped.
    ///
    /// # Errors
    /// Returns [`SessionError::Io`] if reading or writing fails.
    pub fn settle<R, W>(&mut self, mut input: R, mut output: W) -> Result<(), SessionError>
        where R: BufRead,
              W: Write
    {
        while let Some(line) = self.read_line(&mut input, &mut output)? {
            let trimmed = line.trim();
            if trimmed.is_empty() || trimmed.starts_with('#') {
                continue;
            }
            self.submit(&line, &mut output)?;
        }

        let reports = self.scheduler.settle();
        if reports.is_empty() {
            writeln!(output, "Queue is empty")?;
        }
        for report in &reports {
            write_report(report, &mut output)?;
        }
        output.flush()?;
        Ok(())
    }

    fn read_line<R, W>(&mut self, input: &mut R, output: &mut W)
                       -> Result<Option<String>, SessionError>
        where R: BufRead,
              W: Write
    {
        self.reads += 1;
        if self.prompt {
            writeln!(output, "{PROMPT}")?;
        }

        let mut line = String::new();
        if input.read_line(&mut line)? == 0 {
            return Ok(None);
        }
        let end = line.trim_end_matches(['\r', '\n']).len();
        line.truncate(end);
        Ok(Some(line))
    }

    fn submit<W: Write>(&mut self, line: &str, output: &mut W) -> Result<(), SessionError> {
        match self.scheduler.submit(line) {
            Ok(id) => writeln!(output, "Expression ({id}) was read.")?,
            Err(error) => writeln!(output, "Expression was rejected: {error}")?,
        }
        Ok(())
    }
}

/// Writes the console messages of one pass.
fn write_report<W: Write>(report: &StepReport, output: &mut W) -> Result<(), SessionError> {
    if report.progress == Progress::Idle {
        writeln!(output, "Queue is empty")?;
        return Ok(());
    }
    for event in &report.events {
        writeln!(output, "{event}")?;
    }
    if report.progress == Progress::Stalled {
        writeln!(output, "No expressions could be calculated at this step.")?;
    }
    Ok(())
}

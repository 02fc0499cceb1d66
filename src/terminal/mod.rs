//! Synchronous terminal host: runs a routine directly, blocking on stdin for
//! every prompt. No history, no replay.

use std::io::{self, BufRead, Write};
use std::sync::Arc;

use thiserror::Error;

use crate::replay::history::parse_input;
use crate::replay::{EffectError, Payload, RandomSource};
use crate::routine::{Action, Effect, Execution, Prompt, Routine, RoutineError, Value};

#[derive(Debug, Error)]
pub enum TerminalError {
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    #[error("input closed while waiting for `{0}`")]
    InputClosed(String),

    #[error(transparent)]
    Routine(#[from] RoutineError),

    #[error(transparent)]
    Effect(#[from] EffectError),
}

pub struct TerminalSession<R, W> {
    input: R,
    output: W,
    random: Arc<dyn RandomSource>,
}

impl<R: BufRead, W: Write> TerminalSession<R, W> {
    pub fn new(input: R, output: W, random: Arc<dyn RandomSource>) -> Self {
        Self {
            input,
            output,
            random,
        }
    }

    /// Run `routine` to completion.
    pub fn run(&mut self, routine: &dyn Routine) -> Result<(), TerminalError> {
        tracing::info!(routine = routine.name(), "Starting terminal session");
        let mut exec = Execution::start(routine);

        while let Some(action) = exec.next_action()? {
            let value = match action {
                Action::Effect(Effect::Display { text }) => {
                    writeln!(self.output, "{text}")?;
                    Value::Unit
                }
                Action::Effect(Effect::RandomInt { low, high }) => {
                    Value::Int(self.random.draw(low, high)?)
                }
                Action::Prompt(prompt) => self.ask(&prompt)?,
            };
            exec.supply(value)?;
        }

        self.output.flush()?;
        tracing::info!(
            routine = routine.name(),
            steps = exec.steps(),
            "Terminal session finished"
        );
        Ok(())
    }

    /// Ask until the answer parses.
    fn ask(&mut self, prompt: &Prompt) -> Result<Value, TerminalError> {
        loop {
            write!(self.output, "{}", prompt.label)?;
            self.output.flush()?;

            let mut line = String::new();
            if self.input.read_line(&mut line)? == 0 {
                return Err(TerminalError::InputClosed(prompt.field.clone()));
            }
            let answer = line.trim_end_matches(['\r', '\n']).to_string();
            let payload = Payload::from([(prompt.field.clone(), answer)]);

            match parse_input(prompt, &payload) {
                Ok(value) => return Ok(value),
                Err(e) => {
                    tracing::debug!(field = %prompt.field, error = %e, "Rejected terminal input");
                    writeln!(self.output, "Sorry, {e}. Try again.")?;
                }
            }
        }
    }
}

impl TerminalSession<io::StdinLock<'static>, io::Stdout> {
    pub fn stdio(random: Arc<dyn RandomSource>) -> Self {
        Self::new(io::stdin().lock(), io::stdout(), random)
    }
}

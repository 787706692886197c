use rustyline::{error::ReadlineError, DefaultEditor};

use crate::{
    diagnostics::{CadlError, Result},
    runtime::{ExecutionContext, Interpreter},
};

/// Line-at-a-time session; bindings survive failed lines.
pub struct Repl {
    interpreter: Interpreter,
}

impl Repl {
    pub fn new(context: ExecutionContext) -> Self {
        Self {
            interpreter: Interpreter::with_context(context),
        }
    }

    pub fn run(&mut self) -> Result<()> {
        let mut editor = DefaultEditor::new().map_err(io_error)?;
        loop {
            match editor.readline("cadl> ") {
                Ok(line) => {
                    let trimmed = line.trim();
                    if trimmed == ":quit" || trimmed == ":exit" {
                        break;
                    }
                    if trimmed.is_empty() {
                        continue;
                    }
                    editor.add_history_entry(trimmed).ok();
                    match self.interpreter.eval_source(trimmed) {
                        Ok(()) => {}
                        Err(CadlError::Diagnostic(diag)) => eprintln!("{diag}"),
                        Err(other) => eprintln!("error: {other}"),
                    }
                }
                Err(ReadlineError::Interrupted) | Err(ReadlineError::Eof) => break,
                Err(err) => return Err(io_error(err)),
            }
        }
        Ok(())
    }
}

fn io_error(err: ReadlineError) -> CadlError {
    CadlError::from(std::io::Error::new(std::io::ErrorKind::Other, err))
}

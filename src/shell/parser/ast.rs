use std::os::unix::io::RawFd;

use nix::fcntl::OFlag;
use nix::sys::stat::Mode;

use super::error::ParseError;
use super::lexer::RedirectOp;

/// Argument slots per stage, counting the implicit terminator.
pub const MAX_ARGS: usize = 10;

/// A parsed command line. Every node owns its children; a tree is built
/// once, executed once and dropped.
#[derive(Debug, PartialEq)]
pub enum Command {
    Exec(ExecCommand),
    Redirect(RedirectCommand),
    Pipe(PipeCommand),
}

#[derive(Debug, PartialEq, Default)]
pub struct ExecCommand {
    argv: Vec<String>,
}

impl ExecCommand {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends one word. Fails once the word would fill the terminator slot
    /// of a `max_args`-slot stage.
    pub fn push_arg(&mut self, arg: String, max_args: usize) -> Result<(), ParseError> {
        if self.argv.len() + 1 >= max_args {
            return Err(ParseError::TooManyArgs);
        }
        self.argv.push(arg);
        Ok(())
    }

    pub fn argv(&self) -> &[String] {
        &self.argv
    }

    pub fn program(&self) -> Option<&str> {
        self.argv.first().map(String::as_str)
    }
}

#[derive(Debug, PartialEq)]
pub struct RedirectCommand {
    pub command: Box<Command>,
    pub file: String,
    pub direction: RedirectOp,
}

impl RedirectCommand {
    pub fn new(command: Command, file: String, direction: RedirectOp) -> Self {
        Self {
            command: Box::new(command),
            file,
            direction,
        }
    }

    /// The descriptor slot this redirection rebinds.
    pub fn fd(&self) -> RawFd {
        match self.direction {
            RedirectOp::Input => libc::STDIN_FILENO,
            RedirectOp::Output => libc::STDOUT_FILENO,
        }
    }

    pub fn flags(&self) -> OFlag {
        match self.direction {
            RedirectOp::Input => OFlag::O_RDONLY,
            RedirectOp::Output => OFlag::O_WRONLY | OFlag::O_CREAT | OFlag::O_TRUNC,
        }
    }

    /// rw-r--r--, before the umask.
    pub fn mode(&self) -> Mode {
        Mode::S_IRUSR | Mode::S_IWUSR | Mode::S_IRGRP | Mode::S_IROTH
    }
}

#[derive(Debug, PartialEq)]
pub struct PipeCommand {
    pub left: Box<Command>,
    pub right: Box<Command>,
}

impl PipeCommand {
    pub fn new(left: Command, right: Command) -> Self {
        Self {
            left: Box::new(left),
            right: Box::new(right),
        }
    }
}

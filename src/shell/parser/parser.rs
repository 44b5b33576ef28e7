use log::debug;

use super::ast::{Command, ExecCommand, PipeCommand, RedirectCommand, MAX_ARGS};
use super::error::ParseError;
use super::lexer::{Lexer, RedirectOp, Token};

pub struct Parser<'a> {
    lexer: Lexer<'a>,
    max_args: usize,
}

impl<'a> Parser<'a> {
    pub fn new(input: &'a str) -> Self {
        Self::with_max_args(input, MAX_ARGS)
    }

    pub fn with_max_args(input: &'a str, max_args: usize) -> Self {
        Parser {
            lexer: Lexer::new(input),
            max_args,
        }
    }

    /// Parses the whole line as one pipeline. Anything left after it is an error.
    pub fn parse_command(mut self) -> Result<Command, ParseError> {
        let command = self.parse_pipeline()?;
        let rest = self.lexer.rest();
        if !rest.is_empty() {
            return Err(ParseError::Leftovers(rest.to_string()));
        }
        debug!("解析完成: {:?}", command);
        Ok(command)
    }

    // pipeline := stage ('|' pipeline)?
    fn parse_pipeline(&mut self) -> Result<Command, ParseError> {
        let left = self.parse_stage()?;
        if self.lexer.peek(&['|']) {
            self.lexer.next_token();
            let right = self.parse_pipeline()?;
            return Ok(Command::Pipe(PipeCommand::new(left, right)));
        }
        Ok(left)
    }

    // stage := redirs (word redirs)*
    fn parse_stage(&mut self) -> Result<Command, ParseError> {
        let mut exec = ExecCommand::new();
        let mut redirections = Vec::new();

        self.parse_redirections(&mut redirections)?;
        while !self.lexer.peek(&['|']) {
            match self.lexer.next_token() {
                Token::EOF => break,
                Token::Word(word) => exec.push_arg(word, self.max_args)?,
                _ => return Err(ParseError::Syntax),
            }
            self.parse_redirections(&mut redirections)?;
        }

        // 先解析的重定向在最内层
        let command = redirections
            .into_iter()
            .fold(Command::Exec(exec), |inner, (direction, file)| {
                Command::Redirect(RedirectCommand::new(inner, file, direction))
            });
        Ok(command)
    }

    // redirs := ('<' word | '>' word)*
    fn parse_redirections(
        &mut self,
        redirections: &mut Vec<(RedirectOp, String)>,
    ) -> Result<(), ParseError> {
        while self.lexer.peek(&['<', '>']) {
            let direction = match self.lexer.next_token() {
                Token::Redirect(op) => op,
                _ => return Err(ParseError::Syntax),
            };
            match self.lexer.next_token() {
                Token::Word(file) => redirections.push((direction, file)),
                _ => return Err(ParseError::MissingRedirectFile),
            }
        }
        Ok(())
    }
}

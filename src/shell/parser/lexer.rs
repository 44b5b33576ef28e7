use std::iter::Peekable;
use std::str::CharIndices;

pub const WHITESPACE: &[char] = &[' ', '\t', '\r', '\n', '\x0b'];
pub const SYMBOLS: &[char] = &['<', '|', '>'];

#[derive(Debug, PartialEq, Clone)]
pub enum Token {
    Word(String),
    Pipe,
    Redirect(RedirectOp),
    EOF,
}

#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub enum RedirectOp {
    Input,  // <
    Output, // >
}

pub struct Lexer<'a> {
    source: &'a str,
    input: Peekable<CharIndices<'a>>,
}

impl<'a> Lexer<'a> {
    pub fn new(source: &'a str) -> Self {
        Self {
            source,
            input: source.char_indices().peekable(),
        }
    }

    pub fn next_token(&mut self) -> Token {
        self.skip_whitespace();

        match self.peek_char() {
            None => Token::EOF,
            Some(c) => match c {
                '|' => {
                    self.read_char();
                    Token::Pipe
                }
                '<' => {
                    self.read_char();
                    Token::Redirect(RedirectOp::Input)
                }
                '>' => {
                    self.read_char();
                    Token::Redirect(RedirectOp::Output)
                }
                _ => self.read_word(),
            },
        }
    }

    /// Reports whether the next non-whitespace character is one of `symbols`,
    /// without consuming it.
    pub fn peek(&mut self, symbols: &[char]) -> bool {
        self.skip_whitespace();
        matches!(self.peek_char(), Some(c) if symbols.contains(&c))
    }

    /// Everything not yet consumed, leading whitespace skipped.
    pub fn rest(&mut self) -> &'a str {
        self.skip_whitespace();
        match self.input.peek() {
            Some(&(idx, _)) => &self.source[idx..],
            None => "",
        }
    }

    fn read_char(&mut self) -> Option<char> {
        self.input.next().map(|(_, c)| c)
    }

    fn peek_char(&mut self) -> Option<char> {
        self.input.peek().map(|&(_, c)| c)
    }

    fn skip_whitespace(&mut self) {
        while let Some(c) = self.peek_char() {
            if !WHITESPACE.contains(&c) {
                break;
            }
            self.read_char();
        }
    }

    fn read_word(&mut self) -> Token {
        let mut word = String::new();

        while let Some(c) = self.peek_char() {
            if WHITESPACE.contains(&c) || SYMBOLS.contains(&c) {
                break;
            }
            word.push(c);
            self.read_char();
        }

        Token::Word(word)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_every_whitespace_separator() {
        let mut lexer = Lexer::new("wc\x0b-l\t-c\r\n");
        assert_eq!(lexer.next_token(), Token::Word("wc".to_string()));
        assert_eq!(lexer.next_token(), Token::Word("-l".to_string()));
        assert_eq!(lexer.next_token(), Token::Word("-c".to_string()));
        assert_eq!(lexer.next_token(), Token::EOF);
    }

    #[test]
    fn test_double_angle_is_two_outputs() {
        let mut lexer = Lexer::new("echo x >> log");
        assert_eq!(lexer.next_token(), Token::Word("echo".to_string()));
        assert_eq!(lexer.next_token(), Token::Word("x".to_string()));
        assert_eq!(lexer.next_token(), Token::Redirect(RedirectOp::Output));
        assert_eq!(lexer.next_token(), Token::Redirect(RedirectOp::Output));
        assert_eq!(lexer.next_token(), Token::Word("log".to_string()));
    }

    #[test]
    fn test_other_operators_are_plain_words() {
        let mut lexer = Lexer::new("a;b && c& $HOME *.rs");
        assert_eq!(lexer.next_token(), Token::Word("a;b".to_string()));
        assert_eq!(lexer.next_token(), Token::Word("&&".to_string()));
        assert_eq!(lexer.next_token(), Token::Word("c&".to_string()));
        assert_eq!(lexer.next_token(), Token::Word("$HOME".to_string()));
        assert_eq!(lexer.next_token(), Token::Word("*.rs".to_string()));
        assert_eq!(lexer.next_token(), Token::EOF);
    }

    #[test]
    fn test_symbols_split_words_without_spaces() {
        let mut lexer = Lexer::new("cat<in|wc>out");
        assert_eq!(lexer.next_token(), Token::Word("cat".to_string()));
        assert_eq!(lexer.next_token(), Token::Redirect(RedirectOp::Input));
        assert_eq!(lexer.next_token(), Token::Word("in".to_string()));
        assert_eq!(lexer.next_token(), Token::Pipe);
        assert_eq!(lexer.next_token(), Token::Word("wc".to_string()));
        assert_eq!(lexer.next_token(), Token::Redirect(RedirectOp::Output));
        assert_eq!(lexer.next_token(), Token::Word("out".to_string()));
        assert_eq!(lexer.next_token(), Token::EOF);
    }

    #[test]
    fn test_quotes_are_literal() {
        let mut lexer = Lexer::new(r#"echo "a b" 'c'"#);
        assert_eq!(lexer.next_token(), Token::Word("echo".to_string()));
        assert_eq!(lexer.next_token(), Token::Word("\"a".to_string()));
        assert_eq!(lexer.next_token(), Token::Word("b\"".to_string()));
        assert_eq!(lexer.next_token(), Token::Word("'c'".to_string()));
    }

    #[test]
    fn test_peek_does_not_consume() {
        let mut lexer = Lexer::new("   | wc");
        assert!(lexer.peek(&['|']));
        assert!(!lexer.peek(&['<', '>']));
        assert_eq!(lexer.next_token(), Token::Pipe);
        assert!(!lexer.peek(&['|']));
        assert_eq!(lexer.rest(), "wc");
    }

    #[test]
    fn test_rest_at_end_is_empty() {
        let mut lexer = Lexer::new("ls \t\r\n");
        assert_eq!(lexer.next_token(), Token::Word("ls".to_string()));
        assert_eq!(lexer.rest(), "");
        assert_eq!(lexer.next_token(), Token::EOF);
    }
}

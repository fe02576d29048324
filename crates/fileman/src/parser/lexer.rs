//! Tokenizer for one line of command input
//!
//! Single pass over the characters with two states, unquoted and quoted:
//! - `"` toggles the state and is dropped from the output
//! - an unquoted space ends the current token
//! - empty tokens are never emitted, so runs of spaces collapse and `""`
//!   contributes nothing
//! - a newline ends the input
//!
//! Only the space character delimits; tabs are ordinary token content.

use super::{ArgVec, MAX_ARGS};

/// Tokenizer over a single input line.
pub struct Lexer<'a> {
    chars: std::str::Chars<'a>,
    in_quotes: bool,
    done: bool,
}

impl<'a> Lexer<'a> {
    /// Create a new lexer for the given input.
    pub fn new(input: &'a str) -> Self {
        Self {
            chars: input.chars(),
            in_quotes: false,
            done: false,
        }
    }

    /// True while inside an unterminated double-quoted span.
    pub fn in_quotes(&self) -> bool {
        self.in_quotes
    }

    /// Get the next token, or `None` at end of line.
    pub fn next_token(&mut self) -> Option<String> {
        if self.done {
            return None;
        }
        let mut token = String::new();
        loop {
            match self.chars.next() {
                None | Some('\n') => {
                    self.done = true;
                    break;
                }
                Some('"') => self.in_quotes = !self.in_quotes,
                Some(' ') if !self.in_quotes => {
                    if !token.is_empty() {
                        return Some(token);
                    }
                }
                Some(c) => token.push(c),
            }
        }
        // An unterminated quote simply runs to end of line.
        if token.is_empty() { None } else { Some(token) }
    }

    /// Tokenize a whole line into at most [`MAX_ARGS`] arguments.
    ///
    /// Input after the fourth token is ignored rather than rejected; the
    /// returned vector records that it was cut via [`ArgVec::is_truncated`].
    pub fn tokenize(input: &str) -> ArgVec {
        let mut lexer = Lexer::new(input);
        let mut args = Vec::with_capacity(MAX_ARGS);
        while let Some(token) = lexer.next_token() {
            if args.len() == MAX_ARGS {
                return ArgVec::cut(args);
            }
            args.push(token);
        }
        ArgVec::complete(args)
    }
}

impl Iterator for Lexer<'_> {
    type Item = String;

    fn next(&mut self) -> Option<String> {
        self.next_token()
    }
}

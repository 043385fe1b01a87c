//! FILENAME: parser/src/lexer.rs
//! PURPOSE: Scans a raw formula string and produces a stream of Tokens.
//! CONTEXT: First stage of the parsing pipeline. Handles whitespace skipping,
//! number literals (with optional scientific notation) and cell references.
//!
//! SUPPORTED OPERATORS: + - * / ( )
//! Cell references are uppercase-only; a lowercase letter does not start one.

use crate::token::Token;
use std::iter::Peekable;
use std::str::Chars;

pub struct Lexer<'a> {
    input: Peekable<Chars<'a>>,
}

impl<'a> Lexer<'a> {
    pub fn new(input: &'a str) -> Self {
        Lexer {
            input: input.chars().peekable(),
        }
    }

    /// Advances the lexer and returns the next token.
    pub fn next_token(&mut self) -> Token {
        self.skip_whitespace();

        match self.input.next() {
            Some('+') => Token::Plus,
            Some('-') => Token::Minus,
            Some('*') => Token::Asterisk,
            Some('/') => Token::Slash,
            Some('(') => Token::LParen,
            Some(')') => Token::RParen,

            Some(ch) if ch.is_ascii_digit() || ch == '.' => self.read_number(ch),
            Some(ch) if ch.is_ascii_uppercase() => self.read_cell_ref(ch),

            None => Token::EOF,
            Some(ch) => Token::Illegal(ch),
        }
    }

    fn skip_whitespace(&mut self) {
        while let Some(&ch) = self.input.peek() {
            if !ch.is_whitespace() {
                break;
            }
            self.input.next();
        }
    }

    fn read_number(&mut self, first_char: char) -> Token {
        let mut number_str = String::from(first_char);
        let mut has_dot = first_char == '.';

        while let Some(&ch) = self.input.peek() {
            if ch.is_ascii_digit() {
                number_str.push(ch);
                self.input.next();
            } else if ch == '.' && !has_dot {
                has_dot = true;
                number_str.push(ch);
                self.input.next();
            } else {
                break;
            }
        }

        if matches!(self.input.peek(), Some('e') | Some('E')) {
            // Look ahead on a clone first: an 'e'/'E' with no digits after
            // it (and an optional sign) is not part of the number, and must
            // not be consumed from the real iterator.
            let mut lookahead = self.input.clone();
            let mut exponent = String::new();
            exponent.push(lookahead.next().unwrap());
            if matches!(lookahead.peek(), Some('+') | Some('-')) {
                exponent.push(lookahead.next().unwrap());
            }
            let mut has_exp_digits = false;
            while let Some(&ch) = lookahead.peek() {
                if ch.is_ascii_digit() {
                    exponent.push(ch);
                    has_exp_digits = true;
                    lookahead.next();
                } else {
                    break;
                }
            }
            if has_exp_digits {
                number_str.push_str(&exponent);
                self.input = lookahead;
            }
        }

        match number_str.parse::<f64>() {
            Ok(n) => Token::Number(n),
            Err(_) => Token::Illegal(first_char),
        }
    }

    /// Reads an uppercase-letter run followed by a digit run as one
    /// `CellRef` token, e.g. `AB12`. A letter run with no trailing digits is
    /// not a valid cell reference and is reported as illegal.
    fn read_cell_ref(&mut self, first_char: char) -> Token {
        let mut text = String::from(first_char);

        while let Some(&ch) = self.input.peek() {
            if ch.is_ascii_uppercase() {
                text.push(ch);
                self.input.next();
            } else {
                break;
            }
        }

        let mut saw_digit = false;
        while let Some(&ch) = self.input.peek() {
            if ch.is_ascii_digit() {
                text.push(ch);
                saw_digit = true;
                self.input.next();
            } else {
                break;
            }
        }

        if saw_digit {
            Token::CellRef(text)
        } else {
            Token::Illegal(first_char)
        }
    }
}

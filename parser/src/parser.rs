//! FILENAME: parser/src/parser.rs
//! PURPOSE: Recursive descent parser that converts a stream of Tokens into an AST.
//! CONTEXT: Second stage of the parsing pipeline, consumed by the Evaluator.
//!
//! GRAMMAR:
//!   expr    --> sum
//!   sum     --> product ( ("+" | "-") product )*
//!   product --> unary ( ("*" | "/") unary )*
//!   unary   --> ("+" | "-")* atom
//!   atom    --> NUMBER | CELLREF | "(" expr ")"

use crate::ast::{BinaryOperator, CellRef, Expression, UnaryOperator};
use crate::lexer::Lexer;
use crate::token::Token;

/// Parser errors with descriptive messages.
#[derive(Debug, PartialEq, Clone)]
pub struct ParseError {
    pub message: String,
}

impl ParseError {
    pub fn new(message: impl Into<String>) -> Self {
        ParseError {
            message: message.into(),
        }
    }
}

impl std::fmt::Display for ParseError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Parse error: {}", self.message)
    }
}

impl std::error::Error for ParseError {}

pub type ParseResult<T> = Result<T, ParseError>;

/// The Parser struct holds the lexer and current token state.
struct Parser<'a> {
    lexer: Lexer<'a>,
    current_token: Token,
}

impl<'a> Parser<'a> {
    fn new(input: &'a str) -> Self {
        let mut lexer = Lexer::new(input);
        let current_token = lexer.next_token();
        Parser {
            lexer,
            current_token,
        }
    }

    fn advance(&mut self) {
        self.current_token = self.lexer.next_token();
    }

    fn parse_top_level(&mut self) -> ParseResult<Expression> {
        if self.current_token == Token::EOF {
            return Err(ParseError::new("empty expression"));
        }

        let expr = self.parse_sum()?;

        if self.current_token != Token::EOF {
            return Err(ParseError::new(format!(
                "unexpected token after expression: {}",
                self.current_token
            )));
        }

        Ok(expr)
    }

    fn parse_sum(&mut self) -> ParseResult<Expression> {
        let mut left = self.parse_product()?;

        loop {
            let op = match self.current_token {
                Token::Plus => BinaryOperator::Add,
                Token::Minus => BinaryOperator::Subtract,
                _ => break,
            };
            self.advance();
            let right = self.parse_product()?;
            left = Expression::BinaryOp {
                left: Box::new(left),
                op,
                right: Box::new(right),
            };
        }

        Ok(left)
    }

    fn parse_product(&mut self) -> ParseResult<Expression> {
        let mut left = self.parse_unary()?;

        loop {
            let op = match self.current_token {
                Token::Asterisk => BinaryOperator::Multiply,
                Token::Slash => BinaryOperator::Divide,
                _ => break,
            };
            self.advance();
            let right = self.parse_unary()?;
            left = Expression::BinaryOp {
                left: Box::new(left),
                op,
                right: Box::new(right),
            };
        }

        Ok(left)
    }

    fn parse_unary(&mut self) -> ParseResult<Expression> {
        let op = match self.current_token {
            Token::Minus => Some(UnaryOperator::Negate),
            Token::Plus => Some(UnaryOperator::Plus),
            _ => None,
        };

        if let Some(op) = op {
            self.advance();
            let operand = self.parse_unary()?;
            return Ok(Expression::UnaryOp {
                op,
                operand: Box::new(operand),
            });
        }

        self.parse_atom()
    }

    fn parse_atom(&mut self) -> ParseResult<Expression> {
        match self.current_token.clone() {
            Token::Number(n) => {
                self.advance();
                Ok(Expression::Number(n))
            }
            Token::CellRef(text) => {
                self.advance();
                Ok(Expression::CellRef(split_cell_ref(&text)))
            }
            Token::LParen => {
                self.advance();
                let expr = self.parse_sum()?;
                if self.current_token != Token::RParen {
                    return Err(ParseError::new(format!(
                        "expected ')', found {}",
                        self.current_token
                    )));
                }
                self.advance();
                Ok(expr)
            }
            other => Err(ParseError::new(format!("unexpected token: {}", other))),
        }
    }
}

/// Splits a lexed `CellRef` token's text (e.g. `"AB12"`) into its column
/// letters and row digits. The lexer guarantees the shape `[A-Z]+[0-9]+`.
fn split_cell_ref(text: &str) -> CellRef {
    let split = text
        .find(|c: char| c.is_ascii_digit())
        .expect("lexer only emits CellRef tokens with a trailing digit run");
    let (col, row) = text.split_at(split);
    CellRef {
        col: col.to_string(),
        row: row.parse().expect("lexer only emits digits in the row part"),
    }
}

/// Parses a formula body (the text following a leading `=`) into an AST.
pub fn parse(input: &str) -> ParseResult<Expression> {
    Parser::new(input).parse_top_level()
}

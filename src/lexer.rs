use std::{iter::Peekable, str::CharIndices};

use crate::token::{Span, Token, TokenKind};

mod error;

pub use error::LexError;

/// Scanner over the raw source text.
///
/// Each logical line is emitted as an `Indent(width)` marker carrying the
/// count of leading spaces, followed by the line's tokens and a `Newline`.
/// Blank and whitespace-only lines produce no tokens at all, and a final
/// `Newline` is synthesised when the source does not end with one, so the
/// parser always sees fully terminated lines. Indentation uses spaces only;
/// tabs are rejected rather than normalised.
pub struct Lexer<'a> {
    input: &'a str,
    chars: Peekable<CharIndices<'a>>,
    at_line_start: bool,
    line: usize,
    column: usize,
}

impl<'a> Lexer<'a> {
    pub fn new(input: &'a str) -> Self {
        Self {
            input,
            chars: input.char_indices().peekable(),
            at_line_start: true,
            line: 1,
            column: 0,
        }
    }

    pub fn next_token(&mut self) -> Result<Token<'a>, LexError> {
        if self.at_line_start {
            return self.line_start_token();
        }

        self.skip_spaces();

        let Some(&(start, ch)) = self.chars.peek() else {
            // Synthesise the final newline so the last line is terminated.
            self.at_line_start = true;
            return Ok(self.marker_token(TokenKind::Newline));
        };

        let line = self.line;
        let column = self.column;
        match ch {
            '\n' => {
                self.advance_char();
                self.at_line_start = true;
                Ok(Token::new(
                    TokenKind::Newline,
                    Span {
                        start,
                        end: start + 1,
                        line,
                        column,
                    },
                ))
            }
            '+' => Ok(self.single(TokenKind::Plus, start, line, column)),
            '-' => Ok(self.single(TokenKind::Minus, start, line, column)),
            '*' => Ok(self.single(TokenKind::Star, start, line, column)),
            '%' => Ok(self.single(TokenKind::Percent, start, line, column)),
            ':' => Ok(self.single(TokenKind::Colon, start, line, column)),
            '(' => Ok(self.single(TokenKind::LParen, start, line, column)),
            ')' => Ok(self.single(TokenKind::RParen, start, line, column)),
            '/' => Ok(self.pair_or('/', TokenKind::DoubleSlash, TokenKind::Slash, start, line, column)),
            '<' => Ok(self.pair_or('=', TokenKind::LessEqual, TokenKind::Less, start, line, column)),
            '>' => Ok(self.pair_or('=', TokenKind::GreaterEqual, TokenKind::Greater, start, line, column)),
            '=' => Ok(self.pair_or('=', TokenKind::EqualEqual, TokenKind::Equal, start, line, column)),
            '!' => {
                self.advance_char();
                match self.chars.peek() {
                    Some(&(_, '=')) => {
                        self.advance_char();
                        Ok(Token::new(
                            TokenKind::NotEqual,
                            Span {
                                start,
                                end: start + 2,
                                line,
                                column,
                            },
                        ))
                    }
                    _ => Err(LexError::UnexpectedCharacter {
                        character: '!',
                        line,
                        column,
                    }),
                }
            }
            '\t' => Err(LexError::TabIndentation { line }),
            c if c.is_ascii_alphabetic() || c == '_' => {
                Ok(self.read_identifier(start, line, column))
            }
            c if c.is_ascii_digit() => self.read_integer(start, line, column),
            _ => Err(LexError::UnexpectedCharacter {
                character: ch,
                line,
                column,
            }),
        }
    }

    /// Skips blank lines, then emits the indentation-width marker for the
    /// next code line, or `EOF` once the input is exhausted.
    fn line_start_token(&mut self) -> Result<Token<'a>, LexError> {
        loop {
            let mut width = 0;
            while let Some(&(_, c)) = self.chars.peek() {
                match c {
                    ' ' => {
                        self.advance_char();
                        width += 1;
                    }
                    '\t' => return Err(LexError::TabIndentation { line: self.line }),
                    _ => break,
                }
            }
            match self.chars.peek() {
                Some(&(_, '\n')) => {
                    self.advance_char();
                }
                Some(_) => {
                    self.at_line_start = false;
                    return Ok(self.marker_token(TokenKind::Indent(width)));
                }
                None => return Ok(self.marker_token(TokenKind::EOF)),
            }
        }
    }

    fn skip_spaces(&mut self) {
        while let Some(&(_, c)) = self.chars.peek() {
            if c == ' ' {
                self.advance_char();
            } else {
                break;
            }
        }
    }

    fn read_identifier(&mut self, start: usize, line: usize, column: usize) -> Token<'a> {
        self.advance_char(); // Consume first char
        while let Some(&(_, c)) = self.chars.peek() {
            if c.is_ascii_alphanumeric() || c == '_' {
                self.advance_char();
            } else {
                break;
            }
        }

        let end = self.current_index();
        let ident = &self.input[start..end];
        let kind = match ident {
            "if" => TokenKind::If,
            "elif" => TokenKind::Elif,
            "else" => TokenKind::Else,
            "while" => TokenKind::While,
            "print" => TokenKind::Print,
            "break" => TokenKind::Break,
            _ => TokenKind::Identifier(ident),
        };
        Token::new(
            kind,
            Span {
                start,
                end,
                line,
                column,
            },
        )
    }

    fn read_integer(
        &mut self,
        start: usize,
        line: usize,
        column: usize,
    ) -> Result<Token<'a>, LexError> {
        self.advance_char(); // Consume first digit
        while let Some(&(_, c)) = self.chars.peek() {
            if c.is_ascii_digit() {
                self.advance_char();
            } else {
                break;
            }
        }

        let end = self.current_index();
        let literal = &self.input[start..end];
        let value = literal
            .parse::<i64>()
            .map_err(|_| LexError::InvalidIntegerLiteral {
                literal: literal.to_string(),
                line,
                column,
            })?;
        Ok(Token::new(
            TokenKind::Integer(value),
            Span {
                start,
                end,
                line,
                column,
            },
        ))
    }

    fn single(&mut self, kind: TokenKind<'a>, start: usize, line: usize, column: usize) -> Token<'a> {
        self.advance_char();
        Token::new(
            kind,
            Span {
                start,
                end: start + 1,
                line,
                column,
            },
        )
    }

    fn pair_or(
        &mut self,
        next: char,
        paired: TokenKind<'a>,
        alone: TokenKind<'a>,
        start: usize,
        line: usize,
        column: usize,
    ) -> Token<'a> {
        self.advance_char();
        if matches!(self.chars.peek(), Some(&(_, c)) if c == next) {
            self.advance_char();
            Token::new(
                paired,
                Span {
                    start,
                    end: start + 2,
                    line,
                    column,
                },
            )
        } else {
            Token::new(
                alone,
                Span {
                    start,
                    end: start + 1,
                    line,
                    column,
                },
            )
        }
    }

    /// Zero-width token at the current scan position.
    fn marker_token(&mut self, kind: TokenKind<'a>) -> Token<'a> {
        let index = self.current_index();
        Token::new(
            kind,
            Span {
                start: index,
                end: index,
                line: self.line,
                column: self.column,
            },
        )
    }

    fn advance_char(&mut self) -> Option<(usize, char)> {
        let next = self.chars.next();
        if let Some((_, c)) = next {
            if c == '\n' {
                self.line += 1;
                self.column = 0;
            } else {
                self.column += 1;
            }
        }
        next
    }

    fn current_index(&mut self) -> usize {
        self.chars
            .peek()
            .map(|(idx, _)| *idx)
            .unwrap_or(self.input.len())
    }
}

pub fn tokenize(input: &str) -> Result<Vec<Token<'_>>, LexError> {
    let mut lexer = Lexer::new(input);
    let mut tokens = Vec::new();
    loop {
        let token = lexer.next_token()?;
        let is_eof = matches!(token.kind, TokenKind::EOF);
        tokens.push(token);
        if is_eof {
            break;
        }
    }
    Ok(tokens)
}

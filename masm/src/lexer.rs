use std::fmt;

use crate::error::SourceError;
use mcpu::isa;

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum TokenKind {
    Invalid,
    Identifier,
    Label,
    Directive,
    Integer,
    Real,
    String,
    Char,
    Colon,
    Comma,
    Dot,
    OpenParens,
    CloseParens,
    Quote,
    Apostrophe,
}

const SEPARATORS: [(char, TokenKind); 7] = [
    (':', TokenKind::Colon),
    (',', TokenKind::Comma),
    ('.', TokenKind::Dot),
    ('(', TokenKind::OpenParens),
    (')', TokenKind::CloseParens),
    ('"', TokenKind::Quote),
    ('\'', TokenKind::Apostrophe),
];

fn separator_kind(c: char) -> Option<TokenKind> {
    SEPARATORS
        .iter()
        .find(|(sep, _)| *sep == c)
        .map(|(_, kind)| *kind)
}

fn is_identifier_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || c == '_' || c == '$'
}

/// One source token. Locations are zero-based and relative to the trimmed
/// line; [`SourceError`] renders them one-based.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Token<'i> {
    pub text: &'i str,
    pub kind: TokenKind,
    pub line: usize,
    pub column: usize,
}

impl<'i> fmt::Display for Token<'i> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(
            f,
            "{:?} \"{}\" at {}:{}",
            self.kind,
            self.text,
            self.line + 1,
            self.column
        )
    }
}

/// Line-oriented tokenizer. Comments start with `;` and run to the end of
/// the line. Errors are accumulated, never thrown; the token stream is
/// usable for recovery even when [`is_ok`](#method.is_ok) reports failure.
pub struct Lexer<'i> {
    file: String,
    lines: Vec<&'i str>,
    tokens: Vec<Token<'i>>,
    errors: Vec<SourceError>,
}

impl<'i> Lexer<'i> {
    pub fn new(input: &'i str, file: &str) -> Lexer<'i> {
        Lexer {
            file: file.to_owned(),
            lines: input.lines().map(str::trim).collect(),
            tokens: Vec::new(),
            errors: Vec::new(),
        }
    }

    pub fn file(&self) -> &str {
        &self.file
    }

    pub fn lines(&self) -> &[&'i str] {
        &self.lines[..]
    }

    pub fn tokens(&self) -> &[Token<'i>] {
        &self.tokens[..]
    }

    pub fn errors(&self) -> &[SourceError] {
        &self.errors[..]
    }

    pub fn is_ok(&self) -> bool {
        self.errors.is_empty()
    }

    fn error(&mut self, message: String, line: usize, column: usize) {
        self.errors.push(SourceError::tokenize(
            message,
            &self.file,
            line,
            column,
            self.lines[line],
        ));
    }

    pub fn tokenize(&mut self) {
        for line_no in 0..self.lines.len() {
            let full_line = self.lines[line_no];
            let line = match full_line.find(';') {
                Some(index) => &full_line[..index],
                None => full_line,
            };
            self.tokenize_line(line, line_no);
        }
    }

    fn tokenize_line(&mut self, line: &'i str, line_no: usize) {
        let bytes = line.as_bytes();
        let mut i = 0;

        while i < bytes.len() {
            let c = bytes[i] as char;

            if c.is_ascii_whitespace() {
                i += 1;
            } else if let Some(kind) = separator_kind(c) {
                i = self.tokenize_separator(line, line_no, i, kind);
            } else if c.is_ascii_digit() || c == '-' {
                i = self.tokenize_number(line, line_no, i);
            } else {
                i = self.tokenize_word(line, line_no, i);
            }
        }
    }

    fn push(&mut self, text: &'i str, kind: TokenKind, line: usize, column: usize) {
        self.tokens.push(Token {
            text,
            kind,
            line,
            column,
        });
    }

    fn tokenize_separator(
        &mut self,
        line: &'i str,
        line_no: usize,
        start: usize,
        kind: TokenKind,
    ) -> usize {
        match kind {
            TokenKind::Quote => {
                let content = start + 1;
                match line[content..].find('"') {
                    Some(length) => {
                        self.push(
                            &line[content..content + length],
                            TokenKind::String,
                            line_no,
                            content,
                        );
                        content + length + 1
                    }
                    None => {
                        self.push(&line[content..], TokenKind::String, line_no, content);
                        self.error("unterminated string".to_owned(), line_no, content);
                        line.len()
                    }
                }
            }
            TokenKind::Apostrophe => {
                let content = start + 1;
                match line[content..].find('\'') {
                    Some(length) => {
                        if length != 1 {
                            self.error("invalid character literal".to_owned(), line_no, content);
                        }
                        self.push(
                            &line[content..content + length],
                            TokenKind::Char,
                            line_no,
                            content,
                        );
                        content + length + 1
                    }
                    None => {
                        self.push(&line[content..], TokenKind::Char, line_no, content);
                        self.error(
                            "unterminated character literal".to_owned(),
                            line_no,
                            content,
                        );
                        line.len()
                    }
                }
            }
            TokenKind::Colon => {
                match self.tokens.last().map(|token| token.kind) {
                    Some(TokenKind::Identifier) => {
                        // Retroactively promote the identifier to a label.
                        self.tokens.last_mut().unwrap().kind = TokenKind::Label;
                    }
                    Some(_) => {
                        self.error("unexpected colon after token".to_owned(), line_no, start);
                    }
                    None => {
                        self.error(
                            "unexpected colon without previous tokens".to_owned(),
                            line_no,
                            start,
                        );
                    }
                }
                self.push(&line[start..start + 1], TokenKind::Colon, line_no, start);
                start + 1
            }
            _ => {
                self.push(&line[start..start + 1], kind, line_no, start);
                start + 1
            }
        }
    }

    fn tokenize_number(&mut self, line: &'i str, line_no: usize, start: usize) -> usize {
        let bytes = line.as_bytes();
        let mut i = start;
        let mut dots = 0u8;

        if bytes[i] == b'0' && i + 1 < bytes.len() && (bytes[i + 1] | 0x20) == b'x' {
            i += 2;
            while i < bytes.len() && (bytes[i] as char).is_ascii_hexdigit() {
                i += 1;
            }
            let text = &line[start..i];
            if text.len() == 2 {
                self.error("hexadecimal literal without digits".to_owned(), line_no, start);
            }
            self.push(text, TokenKind::Integer, line_no, start);
            return i;
        }

        while i < bytes.len() {
            let c = bytes[i] as char;
            if !(c.is_ascii_digit() || c == '.' || c == '-') {
                break;
            }
            if c == '.' {
                if dots > 0 {
                    dots += 1;
                    break;
                }
                dots += 1;
            }
            i += 1;
        }

        let text = &line[start..i];
        let kind = if dots == 0 {
            TokenKind::Integer
        } else {
            TokenKind::Real
        };

        if text == "-" {
            self.error("lone - found".to_owned(), line_no, start);
        }
        if dots > 1 {
            self.error(
                "unexpected second decimal divider while parsing floating point number".to_owned(),
                line_no,
                start,
            );
        }
        self.push(text, kind, line_no, start);
        i
    }

    fn tokenize_word(&mut self, line: &'i str, line_no: usize, start: usize) -> usize {
        let bytes = line.as_bytes();
        let mut i = start;

        while i < bytes.len() {
            let c = bytes[i] as char;
            if c.is_ascii_whitespace() || separator_kind(c).is_some() || !is_identifier_char(c) {
                break;
            }
            i += 1;
        }

        if i == start {
            // A character outside the identifier set; consume the whole
            // (possibly multi-byte) character so the scan always progresses.
            let width = line[start..]
                .chars()
                .next()
                .map_or(1, char::len_utf8);
            self.push(
                &line[start..start + width],
                TokenKind::Invalid,
                line_no,
                start,
            );
            self.error("invalid identifier token".to_owned(), line_no, start);
            return start + width;
        }

        let word = &line[start..i];
        let after_dot = self
            .tokens
            .last()
            .map_or(false, |tok| tok.kind == TokenKind::Dot);
        let kind = if isa::is_directive(word) && after_dot {
            TokenKind::Directive
        } else {
            TokenKind::Identifier
        };
        self.push(word, kind, line_no, start);
        i
    }
}

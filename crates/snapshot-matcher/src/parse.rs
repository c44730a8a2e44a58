//! Pattern parser.
//!
//! Grammar:
//!
//! ```text
//! pattern  := "@" type "@" ( "." name "(" args? ")" )*
//! args     := literal ( "," literal )*
//! literal  := string | number | "true" | "false" | "null" | "[" args? "]"
//! ```

use crate::error::PatternError;
use crate::types::{assert_arity, Expander, ExpanderMap, Pattern, TypeKind};
use serde_json::{Number, Value};

/// Quick check used before attempting a full parse.
pub fn looks_like_pattern(source: &str) -> bool {
    source.len() > 2 && source.starts_with('@') && source[1..].contains('@')
}

pub fn parse_pattern(source: &str, expanders: &ExpanderMap) -> Result<Pattern, PatternError> {
    let mut parser = Parser::new(source);
    let kind = parser.type_kind()?;
    let mut calls = Vec::new();
    while !parser.at_end() {
        parser.expect('.')?;
        let name = parser.ident()?;
        parser.expect('(')?;
        let args = parser.list(')')?;
        let definition = expanders
            .get(name.as_str())
            .cloned()
            .ok_or(PatternError::UnknownExpander(name))?;
        assert_arity(definition.name, &definition.arity, args.len())?;
        calls.push(Expander { definition, args });
    }
    Ok(Pattern {
        kind,
        expanders: calls,
    })
}

struct Parser<'a> {
    source: &'a str,
    chars: Vec<char>,
    pos: usize,
}

impl<'a> Parser<'a> {
    fn new(source: &'a str) -> Self {
        Self {
            source,
            chars: source.chars().collect(),
            pos: 0,
        }
    }

    fn at_end(&self) -> bool {
        self.pos >= self.chars.len()
    }

    fn peek(&self) -> Option<char> {
        self.chars.get(self.pos).copied()
    }

    fn bump(&mut self) -> Option<char> {
        let c = self.peek()?;
        self.pos += 1;
        Some(c)
    }

    fn skip_ws(&mut self) {
        while matches!(self.peek(), Some(c) if c.is_whitespace()) {
            self.pos += 1;
        }
    }

    fn syntax(&self, message: impl Into<String>) -> PatternError {
        PatternError::Syntax {
            position: self.pos,
            message: message.into(),
        }
    }

    fn expect(&mut self, expected: char) -> Result<(), PatternError> {
        match self.bump() {
            Some(c) if c == expected => Ok(()),
            Some(c) => {
                self.pos -= 1;
                Err(self.syntax(format!("expected '{}', found '{}'", expected, c)))
            }
            None => Err(self.syntax(format!("expected '{}', found end of pattern", expected))),
        }
    }

    fn type_kind(&mut self) -> Result<TypeKind, PatternError> {
        if self.bump() != Some('@') {
            return Err(PatternError::NotAPattern(self.source.to_string()));
        }
        let start = self.pos;
        while let Some(c) = self.bump() {
            if c == '@' {
                let name: String = self.chars[start..self.pos - 1].iter().collect();
                return TypeKind::from_name(&name).ok_or(PatternError::UnknownType(name));
            }
        }
        Err(PatternError::NotAPattern(self.source.to_string()))
    }

    fn ident(&mut self) -> Result<String, PatternError> {
        let start = self.pos;
        while matches!(self.peek(), Some(c) if c.is_ascii_alphanumeric() || c == '_') {
            self.pos += 1;
        }
        if start == self.pos {
            return Err(self.syntax("expected expander name"));
        }
        Ok(self.chars[start..self.pos].iter().collect())
    }

    /// Comma separated literals up to and including `close`.
    fn list(&mut self, close: char) -> Result<Vec<Value>, PatternError> {
        let mut items = Vec::new();
        self.skip_ws();
        if self.peek() == Some(close) {
            self.pos += 1;
            return Ok(items);
        }
        loop {
            self.skip_ws();
            items.push(self.literal()?);
            self.skip_ws();
            match self.bump() {
                Some(',') => continue,
                Some(c) if c == close => return Ok(items),
                Some(c) => {
                    self.pos -= 1;
                    return Err(self.syntax(format!("expected ',' or '{}', found '{}'", close, c)));
                }
                None => return Err(self.syntax(format!("missing '{}'", close))),
            }
        }
    }

    fn literal(&mut self) -> Result<Value, PatternError> {
        match self.peek() {
            Some(quote @ ('"' | '\'')) => {
                self.pos += 1;
                self.string(quote).map(Value::String)
            }
            Some('[') => {
                self.pos += 1;
                self.list(']').map(Value::Array)
            }
            Some(c) if c == '-' || c.is_ascii_digit() => self.number(),
            Some(c) if c.is_ascii_alphabetic() => match self.ident()?.as_str() {
                "true" => Ok(Value::Bool(true)),
                "false" => Ok(Value::Bool(false)),
                "null" => Ok(Value::Null),
                other => Err(self.syntax(format!("unexpected word '{}'", other))),
            },
            Some(c) => Err(self.syntax(format!("unexpected character '{}'", c))),
            None => Err(self.syntax("unexpected end of pattern")),
        }
    }

    fn string(&mut self, quote: char) -> Result<String, PatternError> {
        let mut out = String::new();
        while let Some(c) = self.bump() {
            match c {
                '\\' => match self.bump() {
                    Some('n') => out.push('\n'),
                    Some('t') => out.push('\t'),
                    Some(other) if other == quote || other == '\\' => out.push(other),
                    // Regex escapes such as `\d` stay intact.
                    Some(other) => {
                        out.push('\\');
                        out.push(other);
                    }
                    None => break,
                },
                c if c == quote => return Ok(out),
                c => out.push(c),
            }
        }
        Err(self.syntax("unterminated string"))
    }

    fn number(&mut self) -> Result<Value, PatternError> {
        let start = self.pos;
        while matches!(self.peek(), Some(c) if c.is_ascii_digit() || matches!(c, '-' | '+' | '.' | 'e' | 'E'))
        {
            self.pos += 1;
        }
        let text: String = self.chars[start..self.pos].iter().collect();
        if let Ok(i) = text.parse::<i64>() {
            return Ok(Value::Number(Number::from(i)));
        }
        text.parse::<f64>()
            .ok()
            .and_then(Number::from_f64)
            .map(Value::Number)
            .ok_or_else(|| self.syntax(format!("invalid number '{}'", text)))
    }
}

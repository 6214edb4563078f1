use crate::expression::error::ExprError;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct Span {
    pub(crate) start: usize,
    pub(crate) end: usize,
}

#[derive(Debug, Clone, PartialEq)]
pub(crate) struct Token {
    pub(crate) kind: TokenKind,
    pub(crate) span: Span,
}

#[derive(Debug, Clone, PartialEq)]
pub(crate) enum TokenKind {
    Ident(String),
    Number(f64),
    Str(String),
    True,
    False,
    Na,

    LParen,
    RParen,
    Comma,

    Plus,
    Minus,
    Star,
    Slash,
    Percent,

    Bang,

    EqEq,
    Ne,
    Lt,
    Le,
    Gt,
    Ge,

    AndAnd,
    OrOr,

    Eof,
}

pub(crate) fn lex(input: &str) -> Result<Vec<Token>, ExprError> {
    let mut lexer = Lexer { src: input, pos: 0 };
    let mut out = Vec::new();
    while let Some(token) = lexer.next_token()? {
        out.push(token);
    }
    out.push(Token {
        kind: TokenKind::Eof,
        span: Span {
            start: input.len(),
            end: input.len(),
        },
    });
    Ok(out)
}

/// Byte cursor over the source text.
struct Lexer<'a> {
    src: &'a str,
    pos: usize,
}

impl Lexer<'_> {
    fn peek(&self) -> Option<char> {
        self.src[self.pos..].chars().next()
    }

    fn peek_second(&self) -> Option<char> {
        self.src[self.pos..].chars().nth(1)
    }

    fn bump(&mut self) -> Option<char> {
        let c = self.peek()?;
        self.pos += c.len_utf8();
        Some(c)
    }

    fn eat(&mut self, want: char) -> bool {
        let hit = self.peek() == Some(want);
        if hit {
            self.pos += want.len_utf8();
        }
        hit
    }

    /// Advance over chars matching `f`; returns how many bytes were consumed.
    fn eat_while(&mut self, f: impl Fn(char) -> bool) -> usize {
        let from = self.pos;
        while self.peek().is_some_and(&f) {
            self.bump();
        }
        self.pos - from
    }

    fn next_token(&mut self) -> Result<Option<Token>, ExprError> {
        self.eat_while(|c| c.is_ascii_whitespace());
        let start = self.pos;
        let Some(c) = self.peek() else {
            return Ok(None);
        };
        let starts_fraction = c == '.' && self.peek_second().is_some_and(|d| d.is_ascii_digit());
        let kind = if c.is_ascii_digit() || starts_fraction {
            self.number()?
        } else if c == '"' || c == '\'' {
            self.string()?
        } else if c.is_ascii_alphabetic() || c == '_' {
            self.word()
        } else {
            self.operator()?
        };
        Ok(Some(Token {
            kind,
            span: Span {
                start,
                end: self.pos,
            },
        }))
    }

    fn number(&mut self) -> Result<TokenKind, ExprError> {
        let start = self.pos;
        self.eat_while(|c| c.is_ascii_digit());
        if self.peek() == Some('.') && self.peek_second().is_some_and(|d| d.is_ascii_digit()) {
            self.bump();
            self.eat_while(|c| c.is_ascii_digit());
        }
        if matches!(self.peek(), Some('e' | 'E')) {
            let exponent = self.pos;
            self.bump();
            if !self.eat('+') {
                self.eat('-');
            }
            if self.eat_while(|c| c.is_ascii_digit()) == 0 {
                return Err(ExprError::new(exponent, "exponent needs at least one digit"));
            }
        }
        self.src[start..self.pos]
            .parse()
            .map(TokenKind::Number)
            .map_err(|_| ExprError::new(start, "invalid number"))
    }

    /// Quoted text; a backslash takes the next char literally.
    fn string(&mut self) -> Result<TokenKind, ExprError> {
        let start = self.pos;
        let quote = self.bump();
        let mut text = String::new();
        loop {
            match self.bump() {
                Some(c) if Some(c) == quote => return Ok(TokenKind::Str(text)),
                Some('\\') => match self.bump() {
                    Some(escaped) => text.push(escaped),
                    None => break,
                },
                Some(c) => text.push(c),
                None => break,
            }
        }
        Err(ExprError::new(start, "unterminated string literal"))
    }

    /// Keyword or column name. Dots are part of names (`Sepal.Length`).
    fn word(&mut self) -> TokenKind {
        let start = self.pos;
        self.eat_while(|c| c.is_ascii_alphanumeric() || c == '_' || c == '.');
        match &self.src[start..self.pos] {
            "true" | "TRUE" => TokenKind::True,
            "false" | "FALSE" => TokenKind::False,
            "na" | "NA" => TokenKind::Na,
            name => TokenKind::Ident(name.to_owned()),
        }
    }

    fn operator(&mut self) -> Result<TokenKind, ExprError> {
        let start = self.pos;
        let Some(c) = self.bump() else {
            return Err(ExprError::new(start, "unexpected end of input"));
        };
        let or_eq = |this: &mut Self, plain: TokenKind, with_eq: TokenKind| {
            if this.eat('=') { with_eq } else { plain }
        };
        let kind = match c {
            '(' => TokenKind::LParen,
            ')' => TokenKind::RParen,
            ',' => TokenKind::Comma,
            '+' => TokenKind::Plus,
            '-' => TokenKind::Minus,
            '*' => TokenKind::Star,
            '/' => TokenKind::Slash,
            '%' => TokenKind::Percent,
            '!' => or_eq(self, TokenKind::Bang, TokenKind::Ne),
            '<' => or_eq(self, TokenKind::Lt, TokenKind::Le),
            '>' => or_eq(self, TokenKind::Gt, TokenKind::Ge),
            '=' if self.eat('=') => TokenKind::EqEq,
            // `&`/`&&` and `|`/`||` are the same operator.
            '&' => {
                self.eat('&');
                TokenKind::AndAnd
            }
            '|' => {
                self.eat('|');
                TokenKind::OrOr
            }
            other => {
                return Err(ExprError::new(
                    start,
                    format!("unexpected character '{other}'"),
                ));
            }
        };
        Ok(kind)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/expression/lexer.rs"]
mod tests;

use crate::expression::ast::{BinaryOp, Expr, Lit, UnaryOp};
use crate::expression::error::ExprError;
use crate::expression::lexer::{Span, Token, TokenKind, lex};

pub(crate) fn parse_expr(src: &str) -> Result<Expr, ExprError> {
    let tokens = lex(src)?;
    let mut p = Parser { tokens, pos: 0 };
    let expr = p.parse_or()?;
    p.expect(TokenKind::Eof)?;
    Ok(expr)
}

struct Parser {
    tokens: Vec<Token>,
    pos: usize,
}

impl Parser {
    fn peek(&self) -> &Token {
        &self.tokens[self.pos]
    }

    fn bump(&mut self) -> &Token {
        let t = &self.tokens[self.pos];
        if self.pos + 1 < self.tokens.len() {
            self.pos += 1;
        }
        t
    }

    fn span(&self) -> Span {
        self.peek().span
    }

    fn expect(&mut self, kind: TokenKind) -> Result<(), ExprError> {
        if self.peek().kind == kind {
            self.bump();
            Ok(())
        } else {
            Err(ExprError::new(
                self.span().start,
                format!("expected {kind:?}, found {:?}", self.peek().kind),
            ))
        }
    }

    fn consume(&mut self, kind: TokenKind) -> bool {
        if self.peek().kind == kind {
            self.bump();
            true
        } else {
            false
        }
    }

    fn binary(op: BinaryOp, left: Expr, right: Expr) -> Expr {
        Expr::Binary {
            op,
            left: Box::new(left),
            right: Box::new(right),
        }
    }

    fn parse_or(&mut self) -> Result<Expr, ExprError> {
        let mut e = self.parse_and()?;
        while self.consume(TokenKind::OrOr) {
            let r = self.parse_and()?;
            e = Self::binary(BinaryOp::Or, e, r);
        }
        Ok(e)
    }

    fn parse_and(&mut self) -> Result<Expr, ExprError> {
        let mut e = self.parse_equality()?;
        while self.consume(TokenKind::AndAnd) {
            let r = self.parse_equality()?;
            e = Self::binary(BinaryOp::And, e, r);
        }
        Ok(e)
    }

    fn parse_equality(&mut self) -> Result<Expr, ExprError> {
        let mut e = self.parse_comparison()?;
        loop {
            let op = if self.consume(TokenKind::EqEq) {
                BinaryOp::Eq
            } else if self.consume(TokenKind::Ne) {
                BinaryOp::Ne
            } else {
                break;
            };
            let r = self.parse_comparison()?;
            e = Self::binary(op, e, r);
        }
        Ok(e)
    }

    fn parse_comparison(&mut self) -> Result<Expr, ExprError> {
        let mut e = self.parse_term()?;
        loop {
            let op = if self.consume(TokenKind::Lt) {
                BinaryOp::Lt
            } else if self.consume(TokenKind::Le) {
                BinaryOp::Le
            } else if self.consume(TokenKind::Gt) {
                BinaryOp::Gt
            } else if self.consume(TokenKind::Ge) {
                BinaryOp::Ge
            } else {
                break;
            };
            let r = self.parse_term()?;
            e = Self::binary(op, e, r);
        }
        Ok(e)
    }

    fn parse_term(&mut self) -> Result<Expr, ExprError> {
        let mut e = self.parse_factor()?;
        loop {
            let op = if self.consume(TokenKind::Plus) {
                BinaryOp::Add
            } else if self.consume(TokenKind::Minus) {
                BinaryOp::Sub
            } else {
                break;
            };
            let r = self.parse_factor()?;
            e = Self::binary(op, e, r);
        }
        Ok(e)
    }

    fn parse_factor(&mut self) -> Result<Expr, ExprError> {
        let mut e = self.parse_unary()?;
        loop {
            let op = if self.consume(TokenKind::Star) {
                BinaryOp::Mul
            } else if self.consume(TokenKind::Slash) {
                BinaryOp::Div
            } else if self.consume(TokenKind::Percent) {
                BinaryOp::Mod
            } else {
                break;
            };
            let r = self.parse_unary()?;
            e = Self::binary(op, e, r);
        }
        Ok(e)
    }

    fn parse_unary(&mut self) -> Result<Expr, ExprError> {
        if self.consume(TokenKind::Minus) {
            let e = self.parse_unary()?;
            return Ok(Expr::Unary {
                op: UnaryOp::Neg,
                expr: Box::new(e),
            });
        }
        if self.consume(TokenKind::Bang) {
            let e = self.parse_unary()?;
            return Ok(Expr::Unary {
                op: UnaryOp::Not,
                expr: Box::new(e),
            });
        }
        self.parse_postfix()
    }

    fn parse_postfix(&mut self) -> Result<Expr, ExprError> {
        let e = self.parse_primary()?;
        if !self.consume(TokenKind::LParen) {
            return Ok(e);
        }

        let func = match e {
            Expr::Column(name) => name,
            _ => {
                return Err(ExprError::new(
                    self.span().start,
                    "call target must be an identifier",
                ));
            }
        };
        let args = self.parse_args()?;
        Ok(Expr::Call { func, args })
    }

    fn parse_args(&mut self) -> Result<Vec<Expr>, ExprError> {
        let mut args = Vec::new();
        if self.consume(TokenKind::RParen) {
            return Ok(args);
        }
        loop {
            args.push(self.parse_or()?);
            if self.consume(TokenKind::Comma) {
                continue;
            }
            self.expect(TokenKind::RParen)?;
            return Ok(args);
        }
    }

    fn parse_primary(&mut self) -> Result<Expr, ExprError> {
        let t = self.bump().clone();
        match t.kind {
            TokenKind::Number(v) => Ok(Expr::Lit(Lit::Num(v))),
            TokenKind::Str(s) => Ok(Expr::Lit(Lit::Text(s))),
            TokenKind::True => Ok(Expr::Lit(Lit::Bool(true))),
            TokenKind::False => Ok(Expr::Lit(Lit::Bool(false))),
            TokenKind::Na => Ok(Expr::Lit(Lit::Na)),
            TokenKind::Ident(s) => Ok(Expr::Column(s)),
            TokenKind::LParen => {
                let e = self.parse_or()?;
                self.expect(TokenKind::RParen)?;
                Ok(e)
            }
            other => Err(ExprError::new(
                t.span.start,
                format!("unexpected token {other:?}"),
            )),
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/expression/parser.rs"]
mod tests;

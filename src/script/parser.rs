//! Lexer and recursive-descent parser for node code.
//!
//! Grammar, loosest binding first:
//!
//! ```text
//! program := stmt (';' stmt)* [';']
//! stmt    := IDENT '=' expr | expr
//! expr    := or
//! or      := and ('||' and)*
//! and     := cmp ('&&' cmp)*
//! cmp     := add (('=='|'!='|'<'|'<='|'>'|'>=') add)*
//! add     := mul (('+'|'-') mul)*
//! mul     := unary (('*'|'/'|'%') unary)*
//! unary   := ('-'|'!') unary | primary
//! primary := INT | STRING | 'true' | 'false' | IDENT
//!          | IDENT '(' [expr (',' expr)*] ')' | '(' expr ')'
//! ```

use super::ast::{Expr, Stmt};
use super::Value;
use crate::error::ScriptError;

#[derive(Debug, Clone, PartialEq)]
enum Token {
    Int(i64),
    Str(String),
    Ident(String),
    True,
    False,
    Plus,
    Minus,
    Star,
    Slash,
    Percent,
    Bang,
    Assign,
    EqEq,
    NotEq,
    Less,
    LessEq,
    Greater,
    GreaterEq,
    AndAnd,
    OrOr,
    LParen,
    RParen,
    Comma,
    Semicolon,
}

fn parse_err(message: impl Into<String>) -> ScriptError {
    ScriptError::Parse {
        message: message.into(),
    }
}

fn lex(src: &str) -> Result<Vec<Token>, ScriptError> {
    let mut tokens = Vec::new();
    let mut chars = src.chars().peekable();

    while let Some(&c) = chars.peek() {
        match c {
            ' ' | '\t' | '\r' | '\n' => {
                chars.next();
            }
            '0'..='9' => {
                let mut digits = String::new();
                while let Some(d) = chars.peek().filter(|d| d.is_ascii_digit()) {
                    digits.push(*d);
                    chars.next();
                }
                let n = digits
                    .parse::<i64>()
                    .map_err(|_| parse_err(format!("integer literal '{}' out of range", digits)))?;
                tokens.push(Token::Int(n));
            }
            'a'..='z' | 'A'..='Z' | '_' => {
                let mut ident = String::new();
                while let Some(d) = chars
                    .peek()
                    .filter(|d| d.is_ascii_alphanumeric() || **d == '_')
                {
                    ident.push(*d);
                    chars.next();
                }
                tokens.push(match ident.as_str() {
                    "true" => Token::True,
                    "false" => Token::False,
                    _ => Token::Ident(ident),
                });
            }
            '"' | '\'' => {
                let quote = c;
                chars.next();
                let mut text = String::new();
                loop {
                    match chars.next() {
                        None => return Err(parse_err("unterminated string literal")),
                        Some(ch) if ch == quote => break,
                        Some('\\') => match chars.next() {
                            Some('n') => text.push('\n'),
                            Some('t') => text.push('\t'),
                            Some(esc @ ('\\' | '"' | '\'')) => text.push(esc),
                            Some(esc) => {
                                return Err(parse_err(format!("unknown escape '\\{}'", esc)));
                            }
                            None => return Err(parse_err("unterminated string literal")),
                        },
                        Some(ch) => text.push(ch),
                    }
                }
                tokens.push(Token::Str(text));
            }
            '+' => {
                chars.next();
                tokens.push(Token::Plus);
            }
            '-' => {
                chars.next();
                tokens.push(Token::Minus);
            }
            '*' => {
                chars.next();
                tokens.push(Token::Star);
            }
            '/' => {
                chars.next();
                tokens.push(Token::Slash);
            }
            '%' => {
                chars.next();
                tokens.push(Token::Percent);
            }
            '(' => {
                chars.next();
                tokens.push(Token::LParen);
            }
            ')' => {
                chars.next();
                tokens.push(Token::RParen);
            }
            ',' => {
                chars.next();
                tokens.push(Token::Comma);
            }
            ';' => {
                chars.next();
                tokens.push(Token::Semicolon);
            }
            '=' => {
                chars.next();
                if chars.peek() == Some(&'=') {
                    chars.next();
                    tokens.push(Token::EqEq);
                } else {
                    tokens.push(Token::Assign);
                }
            }
            '!' => {
                chars.next();
                if chars.peek() == Some(&'=') {
                    chars.next();
                    tokens.push(Token::NotEq);
                } else {
                    tokens.push(Token::Bang);
                }
            }
            '<' => {
                chars.next();
                if chars.peek() == Some(&'=') {
                    chars.next();
                    tokens.push(Token::LessEq);
                } else {
                    tokens.push(Token::Less);
                }
            }
            '>' => {
                chars.next();
                if chars.peek() == Some(&'=') {
                    chars.next();
                    tokens.push(Token::GreaterEq);
                } else {
                    tokens.push(Token::Greater);
                }
            }
            '&' => {
                chars.next();
                if chars.peek() == Some(&'&') {
                    chars.next();
                    tokens.push(Token::AndAnd);
                } else {
                    return Err(parse_err("expected '&&'"));
                }
            }
            '|' => {
                chars.next();
                if chars.peek() == Some(&'|') {
                    chars.next();
                    tokens.push(Token::OrOr);
                } else {
                    return Err(parse_err("expected '||'"));
                }
            }
            other => return Err(parse_err(format!("unexpected character '{}'", other))),
        }
    }

    Ok(tokens)
}

struct Parser {
    tokens: Vec<Token>,
    pos: usize,
}

impl Parser {
    fn peek(&self) -> Option<&Token> {
        self.tokens.get(self.pos)
    }

    fn peek_at(&self, offset: usize) -> Option<&Token> {
        self.tokens.get(self.pos + offset)
    }

    fn advance(&mut self) -> Option<Token> {
        let token = self.tokens.get(self.pos).cloned();
        if token.is_some() {
            self.pos += 1;
        }
        token
    }

    fn eat(&mut self, expected: &Token) -> bool {
        if self.peek() == Some(expected) {
            self.pos += 1;
            true
        } else {
            false
        }
    }

    fn expect(&mut self, expected: &Token, what: &str) -> Result<(), ScriptError> {
        if self.eat(expected) {
            Ok(())
        } else {
            Err(parse_err(format!("expected {}", what)))
        }
    }

    fn statements(&mut self) -> Result<Vec<Stmt>, ScriptError> {
        let mut stmts = Vec::new();
        loop {
            // Tolerate empty statements between separators.
            while self.eat(&Token::Semicolon) {}
            if self.peek().is_none() {
                break;
            }
            stmts.push(self.statement()?);
            if self.peek().is_some() {
                self.expect(&Token::Semicolon, "';' between statements")?;
            }
        }
        Ok(stmts)
    }

    fn statement(&mut self) -> Result<Stmt, ScriptError> {
        if matches!(
            (self.peek(), self.peek_at(1)),
            (Some(Token::Ident(_)), Some(Token::Assign))
        ) {
            if let Some(Token::Ident(name)) = self.advance() {
                self.advance(); // '='
                let expr = self.expression()?;
                return Ok(Stmt::Assign { name, expr });
            }
        }
        Ok(Stmt::Expr(self.expression()?))
    }

    fn expression(&mut self) -> Result<Expr, ScriptError> {
        self.or_expr()
    }

    fn or_expr(&mut self) -> Result<Expr, ScriptError> {
        let mut left = self.and_expr()?;
        while self.eat(&Token::OrOr) {
            let right = self.and_expr()?;
            left = Expr::Or(Box::new(left), Box::new(right));
        }
        Ok(left)
    }

    fn and_expr(&mut self) -> Result<Expr, ScriptError> {
        let mut left = self.comparison()?;
        while self.eat(&Token::AndAnd) {
            let right = self.comparison()?;
            left = Expr::And(Box::new(left), Box::new(right));
        }
        Ok(left)
    }

    fn comparison(&mut self) -> Result<Expr, ScriptError> {
        let mut left = self.additive()?;
        loop {
            let build = match self.peek() {
                Some(Token::EqEq) => Expr::Equal,
                Some(Token::NotEq) => Expr::NotEqual,
                Some(Token::Less) => Expr::SmallerThan,
                Some(Token::LessEq) => Expr::SmallerThanOrEqual,
                Some(Token::Greater) => Expr::GreaterThan,
                Some(Token::GreaterEq) => Expr::GreaterThanOrEqual,
                _ => break,
            };
            self.advance();
            let right = self.additive()?;
            left = build(Box::new(left), Box::new(right));
        }
        Ok(left)
    }

    fn additive(&mut self) -> Result<Expr, ScriptError> {
        let mut left = self.multiplicative()?;
        loop {
            let build = match self.peek() {
                Some(Token::Plus) => Expr::Sum,
                Some(Token::Minus) => Expr::Subtract,
                _ => break,
            };
            self.advance();
            let right = self.multiplicative()?;
            left = build(Box::new(left), Box::new(right));
        }
        Ok(left)
    }

    fn multiplicative(&mut self) -> Result<Expr, ScriptError> {
        let mut left = self.unary()?;
        loop {
            let build = match self.peek() {
                Some(Token::Star) => Expr::Multiply,
                Some(Token::Slash) => Expr::Divide,
                Some(Token::Percent) => Expr::Modulo,
                _ => break,
            };
            self.advance();
            let right = self.unary()?;
            left = build(Box::new(left), Box::new(right));
        }
        Ok(left)
    }

    fn unary(&mut self) -> Result<Expr, ScriptError> {
        if self.eat(&Token::Minus) {
            return Ok(Expr::Negate(Box::new(self.unary()?)));
        }
        if self.eat(&Token::Bang) {
            return Ok(Expr::Not(Box::new(self.unary()?)));
        }
        self.primary()
    }

    fn primary(&mut self) -> Result<Expr, ScriptError> {
        match self.advance() {
            Some(Token::Int(n)) => Ok(Expr::Literal(Value::Int(n))),
            Some(Token::Str(s)) => Ok(Expr::Literal(Value::Str(s))),
            Some(Token::True) => Ok(Expr::Literal(Value::Bool(true))),
            Some(Token::False) => Ok(Expr::Literal(Value::Bool(false))),
            Some(Token::LParen) => {
                let inner = self.expression()?;
                self.expect(&Token::RParen, "')'")?;
                Ok(inner)
            }
            Some(Token::Ident(name)) => {
                if !self.eat(&Token::LParen) {
                    return Ok(Expr::Variable(name));
                }
                let mut args = Vec::new();
                if !self.eat(&Token::RParen) {
                    loop {
                        args.push(self.expression()?);
                        if self.eat(&Token::Comma) {
                            continue;
                        }
                        self.expect(&Token::RParen, "')' after call arguments")?;
                        break;
                    }
                }
                Ok(Expr::Call(name, args))
            }
            Some(other) => Err(parse_err(format!("unexpected token {:?}", other))),
            None => Err(parse_err("unexpected end of input")),
        }
    }
}

/// Parses a semicolon-separated statement list.
pub fn parse_program(src: &str) -> Result<Vec<Stmt>, ScriptError> {
    let mut parser = Parser {
        tokens: lex(src)?,
        pos: 0,
    };
    parser.statements()
}

/// Parses a single expression, requiring the whole input to be consumed.
pub fn parse_expression(src: &str) -> Result<Expr, ScriptError> {
    let mut parser = Parser {
        tokens: lex(src)?,
        pos: 0,
    };
    let expr = parser.expression()?;
    if parser.peek().is_some() {
        return Err(parse_err("trailing input after expression"));
    }
    Ok(expr)
}

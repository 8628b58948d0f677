//! Query engine for DataFrames
//!
//! Evaluates pandas-style boolean expressions such as
//! `grade > 8 and name != 'Jill'` against every row of a DataFrame:
//! - column references (bare identifiers or `` `quoted names` ``)
//! - numeric, string and boolean literals
//! - comparisons, arithmetic, `and`/`or`/`not` (also `&`, `|`, `&&`, `||`, `!`)

use std::cmp::Ordering;

use crate::dataframe::apply::{ApplyExt, Row};
use crate::dataframe::DataFrame;
use crate::error::{Error, Result};
use crate::value::Value;

/// Token types for expression parsing
#[derive(Debug, Clone, PartialEq)]
enum Token {
    Identifier(String),
    Number(f64),
    Integer(i64),
    String(String),
    Boolean(bool),
    Equal,
    NotEqual,
    LessThan,
    LessThanOrEqual,
    GreaterThan,
    GreaterThanOrEqual,
    And,
    Or,
    Not,
    Plus,
    Minus,
    Multiply,
    Divide,
    Modulo,
    LeftParen,
    RightParen,
    Eof,
}

/// Expression AST node types
#[derive(Debug, Clone, PartialEq)]
pub enum Expr {
    /// Column reference
    Column(String),
    /// Literal value
    Literal(Value),
    Binary {
        left: Box<Expr>,
        op: BinaryOp,
        right: Box<Expr>,
    },
    Unary {
        op: UnaryOp,
        operand: Box<Expr>,
    },
}

/// Binary operators
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BinaryOp {
    Equal,
    NotEqual,
    LessThan,
    LessThanOrEqual,
    GreaterThan,
    GreaterThanOrEqual,
    And,
    Or,
    Add,
    Subtract,
    Multiply,
    Divide,
    Modulo,
}

/// Unary operators
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UnaryOp {
    Not,
    Negate,
}

/// Lexer for tokenizing query expressions
struct Lexer {
    chars: Vec<char>,
    pos: usize,
}

impl Lexer {
    fn new(input: &str) -> Self {
        Self {
            chars: input.chars().collect(),
            pos: 0,
        }
    }

    fn peek(&self) -> Option<char> {
        self.chars.get(self.pos).copied()
    }

    fn bump(&mut self) -> Option<char> {
        let ch = self.peek();
        self.pos += 1;
        ch
    }

    // Consume `next` if it follows
    fn follows(&mut self, next: char) -> bool {
        if self.peek() == Some(next) {
            self.pos += 1;
            true
        } else {
            false
        }
    }

    fn tokenize(mut self) -> Result<Vec<Token>> {
        let mut tokens = Vec::new();
        loop {
            let token = self.next_token()?;
            let done = token == Token::Eof;
            tokens.push(token);
            if done {
                return Ok(tokens);
            }
        }
    }

    fn next_token(&mut self) -> Result<Token> {
        while self.peek().map_or(false, char::is_whitespace) {
            self.pos += 1;
        }
        let Some(ch) = self.bump() else {
            return Ok(Token::Eof);
        };
        let token = match ch {
            '(' => Token::LeftParen,
            ')' => Token::RightParen,
            '+' => Token::Plus,
            '-' => Token::Minus,
            '*' => Token::Multiply,
            '/' => Token::Divide,
            '%' => Token::Modulo,
            '=' if self.follows('=') => Token::Equal,
            '=' => {
                return Err(Error::InvalidValue(
                    "Expected '==' for equality comparison".to_string(),
                ))
            }
            '!' if self.follows('=') => Token::NotEqual,
            '!' => Token::Not,
            '~' => Token::Not,
            '<' if self.follows('=') => Token::LessThanOrEqual,
            '<' => Token::LessThan,
            '>' if self.follows('=') => Token::GreaterThanOrEqual,
            '>' => Token::GreaterThan,
            '&' => {
                self.follows('&');
                Token::And
            }
            '|' => {
                self.follows('|');
                Token::Or
            }
            '\'' | '"' => self.read_string(ch)?,
            '`' => self.read_quoted_identifier()?,
            '0'..='9' | '.' => self.read_number(ch)?,
            c if c.is_alphabetic() || c == '_' => self.read_identifier(c),
            other => {
                return Err(Error::InvalidValue(format!(
                    "Unexpected character: {}",
                    other
                )))
            }
        };
        Ok(token)
    }

    fn read_string(&mut self, quote: char) -> Result<Token> {
        let mut value = String::new();
        while let Some(ch) = self.bump() {
            if ch == quote {
                return Ok(Token::String(value));
            } else if ch == '\\' {
                match self.bump() {
                    Some('n') => value.push('\n'),
                    Some('t') => value.push('\t'),
                    Some(escaped) => value.push(escaped),
                    None => break,
                }
            } else {
                value.push(ch);
            }
        }
        Err(Error::InvalidValue("Unterminated string literal".to_string()))
    }

    fn read_quoted_identifier(&mut self) -> Result<Token> {
        let mut name = String::new();
        while let Some(ch) = self.bump() {
            if ch == '`' {
                return Ok(Token::Identifier(name));
            }
            name.push(ch);
        }
        Err(Error::InvalidValue("Unterminated `quoted` column name".to_string()))
    }

    fn read_number(&mut self, first: char) -> Result<Token> {
        let mut number = first.to_string();
        while let Some(ch) = self.peek() {
            if ch.is_ascii_digit() || ch == '.' || ch == '_' {
                if ch != '_' {
                    number.push(ch);
                }
                self.pos += 1;
            } else {
                break;
            }
        }
        if let Ok(v) = number.parse::<i64>() {
            return Ok(Token::Integer(v));
        }
        number
            .parse::<f64>()
            .map(Token::Number)
            .map_err(|_| Error::InvalidValue(format!("Invalid number: {}", number)))
    }

    fn read_identifier(&mut self, first: char) -> Token {
        let mut identifier = first.to_string();
        while let Some(ch) = self.peek() {
            if ch.is_alphanumeric() || ch == '_' {
                identifier.push(ch);
                self.pos += 1;
            } else {
                break;
            }
        }
        match identifier.as_str() {
            "true" | "True" => Token::Boolean(true),
            "false" | "False" => Token::Boolean(false),
            "and" => Token::And,
            "or" => Token::Or,
            "not" => Token::Not,
            _ => Token::Identifier(identifier),
        }
    }
}

/// Parser for building expression AST
struct Parser {
    tokens: Vec<Token>,
    position: usize,
}

impl Parser {
    fn new(tokens: Vec<Token>) -> Self {
        Self {
            tokens,
            position: 0,
        }
    }

    fn peek(&self) -> &Token {
        self.tokens.get(self.position).unwrap_or(&Token::Eof)
    }

    fn advance(&mut self) -> Token {
        let token = self.peek().clone();
        self.position += 1;
        token
    }

    fn parse(&mut self) -> Result<Expr> {
        let expr = self.parse_or()?;
        match self.peek() {
            Token::Eof => Ok(expr),
            other => Err(Error::InvalidValue(format!("Unexpected token: {:?}", other))),
        }
    }

    fn binary(left: Expr, op: BinaryOp, right: Expr) -> Expr {
        Expr::Binary {
            left: Box::new(left),
            op,
            right: Box::new(right),
        }
    }

    fn parse_or(&mut self) -> Result<Expr> {
        let mut left = self.parse_and()?;
        while *self.peek() == Token::Or {
            self.advance();
            let right = self.parse_and()?;
            left = Self::binary(left, BinaryOp::Or, right);
        }
        Ok(left)
    }

    fn parse_and(&mut self) -> Result<Expr> {
        let mut left = self.parse_not()?;
        while *self.peek() == Token::And {
            self.advance();
            let right = self.parse_not()?;
            left = Self::binary(left, BinaryOp::And, right);
        }
        Ok(left)
    }

    fn parse_not(&mut self) -> Result<Expr> {
        if *self.peek() == Token::Not {
            self.advance();
            let operand = self.parse_not()?;
            return Ok(Expr::Unary {
                op: UnaryOp::Not,
                operand: Box::new(operand),
            });
        }
        self.parse_comparison()
    }

    fn parse_comparison(&mut self) -> Result<Expr> {
        let mut left = self.parse_additive()?;
        loop {
            let op = match self.peek() {
                Token::Equal => BinaryOp::Equal,
                Token::NotEqual => BinaryOp::NotEqual,
                Token::LessThan => BinaryOp::LessThan,
                Token::LessThanOrEqual => BinaryOp::LessThanOrEqual,
                Token::GreaterThan => BinaryOp::GreaterThan,
                Token::GreaterThanOrEqual => BinaryOp::GreaterThanOrEqual,
                _ => return Ok(left),
            };
            self.advance();
            let right = self.parse_additive()?;
            left = Self::binary(left, op, right);
        }
    }

    fn parse_additive(&mut self) -> Result<Expr> {
        let mut left = self.parse_multiplicative()?;
        loop {
            let op = match self.peek() {
                Token::Plus => BinaryOp::Add,
                Token::Minus => BinaryOp::Subtract,
                _ => return Ok(left),
            };
            self.advance();
            let right = self.parse_multiplicative()?;
            left = Self::binary(left, op, right);
        }
    }

    fn parse_multiplicative(&mut self) -> Result<Expr> {
        let mut left = self.parse_unary()?;
        loop {
            let op = match self.peek() {
                Token::Multiply => BinaryOp::Multiply,
                Token::Divide => BinaryOp::Divide,
                Token::Modulo => BinaryOp::Modulo,
                _ => return Ok(left),
            };
            self.advance();
            let right = self.parse_unary()?;
            left = Self::binary(left, op, right);
        }
    }

    fn parse_unary(&mut self) -> Result<Expr> {
        if *self.peek() == Token::Minus {
            self.advance();
            let operand = self.parse_unary()?;
            return Ok(Expr::Unary {
                op: UnaryOp::Negate,
                operand: Box::new(operand),
            });
        }
        self.parse_primary()
    }

    fn parse_primary(&mut self) -> Result<Expr> {
        match self.advance() {
            Token::Identifier(name) => Ok(Expr::Column(name)),
            Token::Integer(v) => Ok(Expr::Literal(Value::Int64(v))),
            Token::Number(v) => Ok(Expr::Literal(Value::Float64(v))),
            Token::String(s) => Ok(Expr::Literal(Value::String(s))),
            Token::Boolean(b) => Ok(Expr::Literal(Value::Boolean(b))),
            Token::LeftParen => {
                let expr = self.parse_or()?;
                match self.advance() {
                    Token::RightParen => Ok(expr),
                    other => Err(Error::InvalidValue(format!(
                        "Expected ')', found {:?}",
                        other
                    ))),
                }
            }
            other => Err(Error::InvalidValue(format!("Unexpected token: {:?}", other))),
        }
    }
}

/// Parsed query expression, ready to be evaluated row by row
#[derive(Debug, Clone, PartialEq)]
pub struct QueryEngine {
    expr: Expr,
}

impl QueryEngine {
    /// Parse a query expression
    pub fn parse(query: &str) -> Result<Self> {
        let tokens = Lexer::new(query).tokenize()?;
        let expr = Parser::new(tokens).parse()?;
        Ok(Self { expr })
    }

    /// The parsed expression
    pub fn expr(&self) -> &Expr {
        &self.expr
    }

    /// Evaluate the expression for one row
    pub fn evaluate(&self, row: &Row<'_>) -> Result<Value> {
        eval(&self.expr, row)
    }

    /// Evaluate the expression as a row condition; a missing result is false
    pub fn matches(&self, row: &Row<'_>) -> Result<bool> {
        match self.evaluate(row)? {
            Value::Boolean(b) => Ok(b),
            Value::Null => Ok(false),
            other => Err(Error::InvalidValue(format!(
                "Query must evaluate to a boolean, got {:?}",
                other
            ))),
        }
    }
}

fn eval(expr: &Expr, row: &Row<'_>) -> Result<Value> {
    match expr {
        Expr::Column(name) => row.get(name),
        Expr::Literal(value) => Ok(value.clone()),
        Expr::Unary { op, operand } => {
            let value = eval(operand, row)?;
            match (op, value) {
                (_, Value::Null) => Ok(Value::Null),
                (UnaryOp::Not, Value::Boolean(b)) => Ok(Value::Boolean(!b)),
                (UnaryOp::Negate, Value::Int64(v)) => Ok(Value::Int64(-v)),
                (UnaryOp::Negate, Value::Float64(v)) => Ok(Value::Float64(-v)),
                (op, other) => Err(Error::InvalidOperation(format!(
                    "Cannot apply {:?} to {:?}",
                    op, other
                ))),
            }
        }
        Expr::Binary { left, op, right } => {
            let left = eval(left, row)?;
            match op {
                // Short-circuit logical operators
                BinaryOp::And if left == Value::Boolean(false) => return Ok(left),
                BinaryOp::Or if left == Value::Boolean(true) => return Ok(left),
                _ => {}
            }
            let right = eval(right, row)?;
            eval_binary(*op, left, right)
        }
    }
}

fn eval_binary(op: BinaryOp, left: Value, right: Value) -> Result<Value> {
    use BinaryOp::*;

    if left.is_null() || right.is_null() {
        // Comparisons against a missing value are false, like NaN
        return Ok(match op {
            NotEqual => Value::Boolean(!(left.is_null() && right.is_null())),
            Equal | LessThan | LessThanOrEqual | GreaterThan | GreaterThanOrEqual => {
                Value::Boolean(false)
            }
            And | Or | Add | Subtract | Multiply | Divide | Modulo => Value::Null,
        });
    }

    match op {
        And | Or => match (left.as_bool(), right.as_bool()) {
            (Some(a), Some(b)) => Ok(Value::Boolean(if op == And { a && b } else { a || b })),
            _ => Err(Error::InvalidOperation(format!(
                "Logical operators need booleans, got {:?} and {:?}",
                left, right
            ))),
        },
        Equal | NotEqual | LessThan | LessThanOrEqual | GreaterThan | GreaterThanOrEqual => {
            let comparable = match (left.column_type(), right.column_type()) {
                (Some(a), Some(b)) => a == b || (a.is_numeric() && b.is_numeric()),
                _ => false,
            };
            if !comparable {
                return Err(Error::InvalidOperation(format!(
                    "Cannot compare {:?} with {:?}",
                    left, right
                )));
            }
            let ordering = left.cmp(&right);
            let result = match op {
                Equal => ordering == Ordering::Equal,
                NotEqual => ordering != Ordering::Equal,
                LessThan => ordering == Ordering::Less,
                LessThanOrEqual => ordering != Ordering::Greater,
                GreaterThan => ordering == Ordering::Greater,
                _ => ordering != Ordering::Less,
            };
            Ok(Value::Boolean(result))
        }
        Add | Subtract | Multiply | Divide | Modulo => arithmetic(op, left, right),
    }
}

fn arithmetic(op: BinaryOp, left: Value, right: Value) -> Result<Value> {
    if let (BinaryOp::Add, Value::String(a), Value::String(b)) = (op, &left, &right) {
        return Ok(Value::String(format!("{}{}", a, b)));
    }
    if let (Value::Int64(a), Value::Int64(b)) = (&left, &right) {
        let (a, b) = (*a, *b);
        match op {
            BinaryOp::Add => return Ok(Value::Int64(a.wrapping_add(b))),
            BinaryOp::Subtract => return Ok(Value::Int64(a.wrapping_sub(b))),
            BinaryOp::Multiply => return Ok(Value::Int64(a.wrapping_mul(b))),
            BinaryOp::Modulo if b != 0 => return Ok(Value::Int64(a.rem_euclid(b))),
            _ => {}
        }
    }
    match (left.as_f64(), right.as_f64()) {
        (Some(a), Some(b)) => Ok(Value::Float64(match op {
            BinaryOp::Add => a + b,
            BinaryOp::Subtract => a - b,
            BinaryOp::Multiply => a * b,
            BinaryOp::Divide => a / b,
            _ => a.rem_euclid(b),
        })),
        _ => Err(Error::InvalidOperation(format!(
            "Cannot apply {:?} to {:?} and {:?}",
            op, left, right
        ))),
    }
}

/// Query functionality for DataFrames
pub trait QueryExt {
    /// Keep the rows for which the expression is true
    fn query(&self, expr: &str) -> Result<DataFrame>;

    /// Boolean mask of the rows for which the expression is true
    fn query_mask(&self, expr: &str) -> Result<Vec<bool>>;
}

impl QueryExt for DataFrame {
    fn query(&self, expr: &str) -> Result<DataFrame> {
        let mask = self.query_mask(expr)?;
        self.filter_by_mask(&mask)
    }

    fn query_mask(&self, expr: &str) -> Result<Vec<bool>> {
        let engine = QueryEngine::parse(expr)?;
        self.mask_rows(|row| engine.matches(row))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::column::Column;

    fn students() -> DataFrame {
        DataFrame::from_columns(vec![
            ("student_id", Column::from(vec![1i64, 2, 3, 4, 5])),
            ("name", Column::from(vec!["John", "Jane", "Jack", "Jill", "Jenny"])),
            ("grade", Column::from(vec![10i64, 8, 12, 9, 7])),
        ])
        .unwrap()
    }

    #[test]
    fn test_parse_precedence() {
        let engine = QueryEngine::parse("a > 1 and b < 2 or c == 3").unwrap();
        match engine.expr() {
            Expr::Binary { op, .. } => assert_eq!(*op, BinaryOp::Or),
            other => panic!("unexpected expression {:?}", other),
        }
    }

    #[test]
    fn test_query_mask() {
        let df = students();
        assert_eq!(
            df.query_mask("grade > 8 and grade < 12").unwrap(),
            vec![true, false, false, true, false]
        );
        assert_eq!(
            df.query_mask("name == 'Jill' | grade % 2 == 1").unwrap(),
            vec![false, false, false, true, true]
        );
        assert_eq!(
            df.query_mask("not (grade * 2 >= 20)").unwrap(),
            vec![false, true, false, true, true]
        );
    }

    #[test]
    fn test_query_errors() {
        let df = students();
        assert!(matches!(df.query("grade = 8"), Err(Error::InvalidValue(_))));
        assert!(matches!(df.query("height > 1"), Err(Error::ColumnNotFound(_))));
        assert!(matches!(df.query("name > 1"), Err(Error::InvalidOperation(_))));
        assert!(matches!(df.query("grade + 1"), Err(Error::InvalidValue(_))));
    }

    #[test]
    fn test_nulls_compare_false() {
        let df = DataFrame::from_columns(vec![("x", Column::Int64(vec![Some(1), None]))]).unwrap();
        assert_eq!(df.query_mask("x > 0").unwrap(), vec![true, false]);
        assert_eq!(df.query_mask("x != 0").unwrap(), vec![true, true]);
    }
}

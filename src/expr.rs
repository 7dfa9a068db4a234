//! # Expression Evaluator
//!
//! Recursive-descent over the grammar:
//!
//! ```text
//! expression := term ( ('+'|'-'|'*'|'/') term )*
//! term       := letter | '(' expression ')' | integer
//! integer    := optional '-' followed by decimal digits, base 10
//! ```
//!
//! Evaluation is strictly left-to-right — the first operator binds the
//! first two terms, and the result becomes the left operand for the next
//! one. Parentheses are the only way to override that order; there is no
//! operator-precedence table anywhere in this module (see the dialect's
//! Non-goals).

use crate::cursor::Cursor;
use crate::environment::Environment;
use crate::error::{BasicError, ErrorKind};
use crate::value::Value;

pub fn eval_expression(cursor: &mut Cursor, env: &Environment) -> Result<Value, BasicError> {
    let mut acc = eval_term(cursor, env)?;

    loop {
        cursor.skip_ws();
        let op = match cursor.peek() {
            Some(c @ ('+' | '-' | '*' | '/')) => c,
            _ => break,
        };
        cursor.advance();
        cursor.skip_ws();
        let rhs = eval_term(cursor, env)?;
        acc = apply_op(op, acc, rhs)?;
    }

    Ok(acc)
}

fn apply_op(op: char, lhs: Value, rhs: Value) -> Result<Value, BasicError> {
    match op {
        '+' => Ok(lhs.add(rhs)),
        '-' => Ok(lhs.sub(rhs)),
        '*' => Ok(lhs.mul(rhs)),
        '/' => lhs.div(rhs),
        _ => unreachable!("apply_op called with non-operator"),
    }
}

fn eval_term(cursor: &mut Cursor, env: &Environment) -> Result<Value, BasicError> {
    cursor.skip_ws();

    match cursor.peek() {
        Some('(') => {
            cursor.advance();
            let v = eval_expression(cursor, env)?;
            cursor.skip_ws();
            if cursor.advance() != Some(')') {
                return Err(BasicError::new(ErrorKind::ExpectedCloseParen));
            }
            Ok(v)
        }
        Some(c) if c.is_ascii_alphabetic() => {
            let letter = cursor.read_identifier_char().unwrap();
            // Unreachable under ASCII: `read_identifier_char` only ever
            // returns `'A'..='Z'` once uppercased, so this branch can never
            // actually fire. Kept because the dialect's error contract
            // names it explicitly.
            if !('A'..='Z').contains(&letter) {
                return Err(BasicError::new(ErrorKind::InvalidVariable));
            }
            Ok(env.get_var(letter))
        }
        Some(c) if c == '-' || c.is_ascii_digit() => {
            let raw = cursor.read_integer_literal()?;
            Ok(Value::truncate(raw))
        }
        _ => Err(BasicError::new(ErrorKind::ExpectedNumber)),
    }
}

//! # Statement Dispatcher
//!
//! One re-entrant function, [`dispatch`], maps a leading keyword to its
//! handler. Handlers consume the remainder of the line through the same
//! `Cursor` they were given, which is what makes nested `IF ... THEN IF ...
//! THEN ...` fall out for free: the `IF` handler calls back into
//! `dispatch` on its own tail instead of special-casing the recursion.

use crate::cursor::Cursor;
use crate::error::{BasicError, ErrorKind};
use crate::expr;
use crate::interpreter::{Interpreter, Mode};
use crate::io::ConsoleIO;
use crate::value::Value;

pub fn dispatch<IO: ConsoleIO>(
    cursor: &mut Cursor,
    interp: &mut Interpreter<IO>,
) -> Result<(), BasicError> {
    cursor.skip_ws();
    let keyword = cursor.read_keyword();
    cursor.skip_ws();

    if keyword.is_empty() {
        return Ok(());
    }

    if let Some(tail) = keyword.strip_prefix('$') {
        return dispatch_module_hook(interp, &format!("${}", tail), cursor.rest_trimmed());
    }

    match keyword.as_str() {
        "PRINT" => stmt_print(cursor, interp),
        "LPRINT" => stmt_lprint(cursor, interp),
        "LET" => stmt_let(cursor, interp),
        "INPUT" => stmt_input(cursor, interp),
        "GOTO" => stmt_goto(cursor, interp),
        "GOSUB" => stmt_gosub(cursor, interp),
        "RETURN" => stmt_return(interp),
        "IF" => stmt_if(cursor, interp),
        "REM" => Ok(()),
        "END" | "STOP" => {
            interp.env.running = false;
            Ok(())
        }
        "BEEP" => {
            interp.io.bell();
            Ok(())
        }
        "RUN" => stmt_run(interp),
        "LIST" => stmt_list(interp),
        "NEW" => stmt_new(interp),
        "SAVE" => stmt_save(cursor, interp),
        "LOAD" => stmt_load(cursor, interp),
        "SYSTEM" => dispatch_module_hook(interp, "SYSTEM", cursor.rest_trimmed()),
        "QUIT" | "EXIT" => {
            interp.env.running = false;
            interp.should_exit_process = true;
            Ok(())
        }
        _ => Err(BasicError::new(ErrorKind::UnknownCommand)),
    }
}

fn dispatch_module_hook<IO: ConsoleIO>(
    interp: &mut Interpreter<IO>,
    keyword: &str,
    tail: &str,
) -> Result<(), BasicError> {
    if let Some(response) = interp.module_hook.handle(keyword, tail) {
        interp.io.print(&response);
        interp.io.print("\n");
    }
    Ok(())
}

/// `PRINT`: an expression, a `"..."` string literal, or nothing (prints `0`).
fn stmt_print<IO: ConsoleIO>(cursor: &mut Cursor, interp: &mut Interpreter<IO>) -> Result<(), BasicError> {
    cursor.skip_ws();
    if cursor.is_at_end() {
        interp.io.print("0\n");
        return Ok(());
    }
    if cursor.peek() == Some('"') {
        let text = read_quoted_string(cursor)?;
        interp.io.print(&text);
        interp.io.print("\n");
        return Ok(());
    }
    let value = expr::eval_expression(cursor, &interp.env)?;
    interp.io.print(&format!("{}\n", value));
    Ok(())
}

/// `LPRINT`: an expression, or nothing (appends `0`) — never a string, per
/// the dialect's LPRINT-format design note.
fn stmt_lprint<IO: ConsoleIO>(cursor: &mut Cursor, interp: &mut Interpreter<IO>) -> Result<(), BasicError> {
    cursor.skip_ws();
    let value = if cursor.is_at_end() {
        Value::ZERO
    } else {
        expr::eval_expression(cursor, &interp.env)?
    };
    interp.io.lprint(&value.to_string())
}

fn stmt_let<IO: ConsoleIO>(cursor: &mut Cursor, interp: &mut Interpreter<IO>) -> Result<(), BasicError> {
    cursor.skip_ws();
    let letter = cursor
        .read_identifier_char()
        .ok_or_else(|| BasicError::new(ErrorKind::ExpectedVariableForLet))?;
    cursor.skip_ws();
    if cursor.advance() != Some('=') {
        return Err(BasicError::new(ErrorKind::ExpectedEqualsInLet));
    }
    cursor.skip_ws();
    let value = expr::eval_expression(cursor, &interp.env)?;
    interp.env.set_var(letter, value);
    Ok(())
}

/// `INPUT`: prompts `? `, reads one line, parses it as a decimal integer,
/// truncates to 8-bit, stores it. End-of-input halts the program quietly —
/// `self.env.running` is cleared rather than surfacing an error.
fn stmt_input<IO: ConsoleIO>(cursor: &mut Cursor, interp: &mut Interpreter<IO>) -> Result<(), BasicError> {
    cursor.skip_ws();
    let letter = cursor
        .read_identifier_char()
        .ok_or_else(|| BasicError::new(ErrorKind::ExpectedVariableForInput))?;

    interp.io.print("? ");
    match interp.io.read_line() {
        None => {
            interp.env.running = false;
            Ok(())
        }
        Some(line) => {
            let mut number_cursor = Cursor::new(line.trim());
            let raw = number_cursor.read_integer_literal()?;
            interp.env.set_var(letter, Value::truncate(raw));
            Ok(())
        }
    }
}

fn stmt_goto<IO: ConsoleIO>(cursor: &mut Cursor, interp: &mut Interpreter<IO>) -> Result<(), BasicError> {
    cursor.skip_ws();
    let n = cursor.read_line_number()?;
    let index = interp
        .store
        .lookup(n)
        .ok_or_else(|| BasicError::new(ErrorKind::LineNotFound))?;
    interp.env.program_counter = index;
    Ok(())
}

fn stmt_gosub<IO: ConsoleIO>(cursor: &mut Cursor, interp: &mut Interpreter<IO>) -> Result<(), BasicError> {
    cursor.skip_ws();
    let n = cursor.read_line_number()?;
    let index = interp
        .store
        .lookup(n)
        .ok_or_else(|| BasicError::new(ErrorKind::LineNotFound))?;
    interp.env.push_call(interp.env.program_counter + 1)?;
    interp.env.program_counter = index;
    Ok(())
}

fn stmt_return<IO: ConsoleIO>(interp: &mut Interpreter<IO>) -> Result<(), BasicError> {
    let index = interp.env.pop_call()?;
    interp.env.program_counter = index;
    Ok(())
}

/// `IF lhs relop rhs THEN tail`. Parses left-hand side, operator, right-hand
/// side, and `THEN` in sequence; modeled as straight-line code since each
/// step has exactly one way forward — a literal state enum would add a
/// match without adding clarity. If the comparison is false the statement
/// is simply done: no branch happens and the next stored line (if any) runs
/// next, same as falling off the end of any other statement.
fn stmt_if<IO: ConsoleIO>(cursor: &mut Cursor, interp: &mut Interpreter<IO>) -> Result<(), BasicError> {
    let lhs = expr::eval_expression(cursor, &interp.env)?;
    cursor.skip_ws();
    let op = read_relop(cursor)?;
    cursor.skip_ws();
    let rhs = expr::eval_expression(cursor, &interp.env)?;
    cursor.skip_ws();
    if !cursor.match_keyword("THEN") {
        return Err(BasicError::new(ErrorKind::ExpectedThenInIf));
    }
    cursor.skip_ws();

    if !evaluate_relop(op, lhs, rhs) {
        return Ok(());
    }

    if matches!(cursor.peek(), Some(c) if c.is_ascii_digit()) {
        let n = cursor.read_line_number()?;
        let index = interp
            .store
            .lookup(n)
            .ok_or_else(|| BasicError::new(ErrorKind::LineNotFound))?;
        interp.env.program_counter = index;
        Ok(())
    } else {
        dispatch(cursor, interp)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum RelOp {
    Eq,
    Ne,
    Lt,
    Gt,
}

fn read_relop(cursor: &mut Cursor) -> Result<RelOp, BasicError> {
    match cursor.advance() {
        Some('=') => Ok(RelOp::Eq),
        Some('<') => {
            if cursor.peek() == Some('>') {
                cursor.advance();
                Ok(RelOp::Ne)
            } else {
                Ok(RelOp::Lt)
            }
        }
        Some('>') => Ok(RelOp::Gt),
        _ => Err(BasicError::new(ErrorKind::ExpectedOperatorInIf)),
    }
}

fn evaluate_relop(op: RelOp, lhs: Value, rhs: Value) -> bool {
    match op {
        RelOp::Eq => lhs.get() == rhs.get(),
        RelOp::Ne => lhs.get() != rhs.get(),
        RelOp::Lt => lhs.get() < rhs.get(),
        RelOp::Gt => lhs.get() > rhs.get(),
    }
}

fn stmt_run<IO: ConsoleIO>(interp: &mut Interpreter<IO>) -> Result<(), BasicError> {
    if interp.mode == Mode::Program {
        return Err(BasicError::new(ErrorKind::CantUseRunInProgram));
    }
    interp.run_program()
}

fn stmt_list<IO: ConsoleIO>(interp: &mut Interpreter<IO>) -> Result<(), BasicError> {
    if interp.mode == Mode::Program {
        return Err(BasicError::new(ErrorKind::CantUseListInProgram));
    }
    let listing: String = interp
        .store
        .iter()
        .map(|line| format!("{} {}\n", line.line_number, line.text))
        .collect();
    interp.io.print(&listing);
    Ok(())
}

fn stmt_new<IO: ConsoleIO>(interp: &mut Interpreter<IO>) -> Result<(), BasicError> {
    if interp.mode == Mode::Program {
        return Err(BasicError::new(ErrorKind::CantUseNewInProgram));
    }
    interp.new_program();
    Ok(())
}

fn stmt_save<IO: ConsoleIO>(cursor: &mut Cursor, interp: &mut Interpreter<IO>) -> Result<(), BasicError> {
    if interp.mode == Mode::Program {
        return Err(BasicError::new(ErrorKind::CantUseSaveInProgram));
    }
    let filename = cursor.rest_trimmed();
    if filename.is_empty() {
        return Err(BasicError::new(ErrorKind::FilenameRequired));
    }
    let listing: String = interp
        .store
        .iter()
        .map(|line| format!("{} {}\n", line.line_number, line.text))
        .collect();
    interp.io.save_program(filename, &listing)
}

fn stmt_load<IO: ConsoleIO>(cursor: &mut Cursor, interp: &mut Interpreter<IO>) -> Result<(), BasicError> {
    if interp.mode == Mode::Program {
        return Err(BasicError::new(ErrorKind::CantUseLoadInProgram));
    }
    let filename = cursor.rest_trimmed();
    if filename.is_empty() {
        return Err(BasicError::new(ErrorKind::FilenameRequired));
    }
    let contents = interp.io.load_program(filename)?;
    interp.store.clear();
    for raw in contents.lines() {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            continue;
        }
        let mut line_cursor = Cursor::new(trimmed);
        let n = line_cursor.read_line_number()?;
        line_cursor.skip_ws();
        interp.store.upsert(n, line_cursor.remaining())?;
    }
    Ok(())
}

/// Reads a `"..."` string literal for `PRINT`. No escapes; an unterminated
/// literal is a syntax error.
fn read_quoted_string(cursor: &mut Cursor) -> Result<String, BasicError> {
    cursor.advance();
    let mut text = String::new();
    loop {
        match cursor.advance() {
            Some('"') => return Ok(text),
            Some(c) => text.push(c),
            None => return Err(BasicError::new(ErrorKind::UnterminatedString)),
        }
    }
}

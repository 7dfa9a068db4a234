use std::fs;

use ib_core_basic::config::Config;
use ib_core_basic::interpreter::Interpreter;
use ib_core_basic::io::{MockConsoleIO, StdConsoleIO};

fn interp() -> Interpreter<MockConsoleIO> {
    Interpreter::new(Config::default(), MockConsoleIO::new())
}

fn feed(interp: &mut Interpreter<MockConsoleIO>, lines: &[&str]) {
    for line in lines {
        interp.process_input_line(line);
    }
}

// ========== SECTION 8 END-TO-END SCENARIOS ==========

#[test]
fn scenario_direct_arithmetic_and_precedence() {
    let mut interp = interp();
    feed(&mut interp, &["PRINT 3+4*5", "PRINT 3+(4*5)"]);
    assert_eq!(interp.io.take_output(), "35\nOK\nREADY\n23\nOK\nREADY\n");
}

#[test]
fn scenario_store_list_and_run() {
    let mut interp = interp();
    feed(
        &mut interp,
        &["10 LET A=5", "20 LET B=A*2", "30 PRINT B"],
    );
    interp.io.take_output();
    interp.process_input_line("LIST");
    assert_eq!(
        interp.io.take_output(),
        "10 LET A=5\n20 LET B=A*2\n30 PRINT B\nOK\nREADY\n"
    );
    interp.process_input_line("RUN");
    assert_eq!(interp.io.take_output(), "10\nOK\nREADY\n");
}

#[test]
fn scenario_gosub_return_with_counter() {
    let mut interp = interp();
    feed(
        &mut interp,
        &[
            "10 LET A=0",
            "20 GOSUB 100",
            "30 PRINT A",
            "40 END",
            "100 LET A=A+1",
            "110 RETURN",
        ],
    );
    interp.io.take_output();
    interp.process_input_line("RUN");
    assert_eq!(interp.io.take_output(), "1\nOK\nREADY\n");
}

#[test]
fn scenario_if_implicit_goto_and_comparison() {
    // The loop counts A up to 3 via GOTO 20; once A<3 is false the IF does
    // not branch and execution falls through to the next stored line (30),
    // printing 99, before line 40 halts the program.
    let mut interp = interp();
    feed(
        &mut interp,
        &[
            "10 LET A=1",
            "20 IF A<3 THEN 50",
            "30 PRINT 99",
            "40 END",
            "50 LET A=A+1",
            "60 GOTO 20",
        ],
    );
    interp.io.take_output();
    interp.process_input_line("RUN");
    assert_eq!(interp.io.take_output(), "99\nOK\nREADY\n");
}

#[test]
fn scenario_wraparound_and_division() {
    let mut interp = interp();
    feed(
        &mut interp,
        &["PRINT 127+1", "PRINT -128-1", "PRINT 7/3", "PRINT 10/0"],
    );
    assert_eq!(
        interp.io.take_output(),
        "-128\nOK\nREADY\n127\nOK\nREADY\n2\nOK\nREADY\nERROR: DIVISION BY ZERO\nREADY\n"
    );
    assert_eq!(interp.io.bell_count(), 1);
}

#[test]
fn scenario_editor_delete() {
    let mut interp = interp();
    feed(&mut interp, &["10 PRINT 1", "20 PRINT 2", "10"]);
    interp.io.take_output();
    interp.process_input_line("LIST");
    assert_eq!(interp.io.take_output(), "20 PRINT 2\nOK\nREADY\n");
}

// ========== INVARIANTS & ROUND-TRIPS ==========

#[test]
fn editing_replace_keeps_store_count_unchanged() {
    let mut interp = interp();
    feed(&mut interp, &["10 PRINT 1", "10 PRINT 2"]);
    interp.io.take_output();
    interp.process_input_line("LIST");
    assert_eq!(interp.io.take_output(), "10 PRINT 2\nOK\nREADY\n");
}

#[test]
fn new_clears_store_and_variables() {
    let mut interp = interp();
    feed(&mut interp, &["10 LET A=9", "LET B=2"]);
    interp.io.take_output();
    interp.process_input_line("NEW");
    interp.io.take_output();
    interp.process_input_line("LIST");
    assert_eq!(interp.io.take_output(), "OK\nREADY\n");
}

#[test]
fn list_output_reentered_reproduces_same_list() {
    let mut interp = interp();
    feed(&mut interp, &["10 LET A=5", "20 PRINT A*2"]);
    interp.io.take_output();
    interp.process_input_line("LIST");
    let first_listing = interp.io.take_output();

    let mut second = interp();
    let body = first_listing.trim_end_matches("OK\nREADY\n");
    for line in body.lines() {
        second.process_input_line(line);
    }
    second.io.take_output();
    second.process_input_line("LIST");
    assert_eq!(second.io.take_output(), first_listing);
}

#[test]
fn call_stack_overflow_is_reported_and_does_not_panic() {
    let config = Config {
        call_stack_capacity: 2,
        ..Config::default()
    };
    let mut interp = Interpreter::new(config, MockConsoleIO::new());
    feed(&mut interp, &["10 GOSUB 20", "20 GOSUB 10"]);
    interp.io.take_output();
    interp.process_input_line("RUN");
    assert_eq!(
        interp.io.take_output(),
        "ERROR: GOSUB STACK OVERFLOW\nREADY\n"
    );
}

#[test]
fn program_memory_full_is_reported() {
    let config = Config {
        program_capacity: 2,
        ..Config::default()
    };
    let mut interp = Interpreter::new(config, MockConsoleIO::new());
    feed(&mut interp, &["10 PRINT 1", "20 PRINT 2"]);
    interp.io.take_output();
    interp.process_input_line("30 PRINT 3");
    assert_eq!(
        interp.io.take_output(),
        "ERROR: PROGRAM MEMORY FULL\nREADY\n"
    );
}

#[test]
fn unknown_goto_target_reports_line_not_found() {
    let mut interp = interp();
    interp.process_input_line("GOTO 999");
    assert_eq!(interp.io.take_output(), "ERROR: LINE NOT FOUND\nREADY\n");
    assert_eq!(interp.io.bell_count(), 1);
}

#[test]
fn input_statement_reads_and_truncates() {
    let mut interp = interp();
    interp.io.provide_input("300");
    interp.process_input_line("INPUT A");
    assert_eq!(interp.io.take_output(), "? OK\nREADY\n");
}

#[test]
fn debug_flag_emits_trace_lines_during_run() {
    let config = Config {
        debug: true,
        ..Config::default()
    };
    let mut interp = Interpreter::new(config, MockConsoleIO::new());
    interp.process_input_line("10 PRINT 1");
    interp.io.take_output();
    interp.process_input_line("RUN");
    let output = interp.io.take_output();
    assert!(output.contains("[DEBUG]"));
    assert!(output.contains("1\nOK\nREADY\n"));
}

// ========== FILESYSTEM-BACKED SAVE/LOAD/LPRINT ==========
//
// These use the real `StdConsoleIO` against a temporary directory, since
// `MockConsoleIO`'s in-memory files can't exercise the actual file I/O
// error paths (`FILE NOT FOUND`, `CANNOT OPEN FILE`).

#[test]
fn save_and_load_roundtrip_on_disk() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("prog.bas");
    let path_str = path.to_str().unwrap();

    let mut writer = Interpreter::new(Config::default(), StdConsoleIO::new());
    writer.process_input_line("10 LET A=5");
    writer.process_input_line("20 PRINT A*2");
    writer.process_input_line(&format!("SAVE {}", path_str));

    let contents = fs::read_to_string(&path).unwrap();
    assert_eq!(contents, "10 LET A=5\n20 PRINT A*2\n");

    let mut reader = Interpreter::new(Config::default(), StdConsoleIO::new());
    reader.process_input_line(&format!("LOAD {}", path_str));
    reader.process_input_line("LIST");
}

#[test]
fn load_of_missing_file_is_file_not_found() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("ghost.bas");

    let mut interp = Interpreter::new(Config::default(), MockConsoleIO::new());
    interp.process_input_line(&format!("LOAD {}", path.to_str().unwrap()));
    assert_eq!(interp.io.take_output(), "ERROR: FILE NOT FOUND\nREADY\n");
}

#[test]
fn lprint_appends_integer_lines_to_disk() {
    // lprint.out is a fixed relative filename, so this test must change the
    // process's working directory — not safe to run in parallel with other
    // tests that rely on the original cwd, hence the restore.
    let original_dir = std::env::current_dir().unwrap();
    let dir = tempfile::tempdir().unwrap();
    std::env::set_current_dir(dir.path()).unwrap();

    let mut interp = Interpreter::new(Config::default(), StdConsoleIO::new());
    interp.process_input_line("LPRINT 7");
    interp.process_input_line("LPRINT 3+4");

    let contents = fs::read_to_string("lprint.out").unwrap();
    std::env::set_current_dir(original_dir).unwrap();
    assert_eq!(contents, "7\n7\n");
}

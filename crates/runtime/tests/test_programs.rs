//! End-to-end programs
//!
//! Each test assembles a small Refal program, loads it and runs it against
//! in-memory I/O.

use refal_core::{Pattern, Symbol, Term, build};
use refal_runtime::{
    BufferIo, Expr, Program, ProgramBuilder, RuntimeConfig, RuntimeError, Sentence,
};
use std::io::Write;

fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

/// Go { = <Prout <Chpm 'a+b+c'>>; }
/// Chpm { e.1 '+' e.2 = e.1 '-' <Chpm e.2>; e.1 = e.1; }
fn chpm_program() -> ProgramBuilder {
    let mut b = ProgramBuilder::new();
    let prout = b.name("Prout");
    let chpm = b.name("Chpm");

    b.function(
        "Go",
        vec![Sentence::new(
            Pattern::new(),
            Expr::new().call(prout, Expr::new().call(chpm, Expr::new().chars("a+b+c"))),
        )],
    );
    b.function(
        "Chpm",
        vec![
            Sentence::new(
                Pattern::new().e("1").chr('+').e("2"),
                Expr::new()
                    .e("1")
                    .chr('-')
                    .call(chpm, Expr::new().e("2")),
            ),
            Sentence::new(Pattern::new().e("1"), Expr::new().e("1")),
        ],
    );
    b
}

#[test]
fn test_chpm_replaces_every_plus() {
    init_tracing();
    let program = chpm_program().load().unwrap();

    let mut io = BufferIo::new();
    program.run(&mut io).unwrap();
    assert_eq!(io.output(), ["a-b-c".to_string()]);
}

#[test]
fn test_chpm_called_directly() {
    let program = chpm_program().load().unwrap();
    let mut io = BufferIo::new();

    let result = program
        .call("Chpm", Term::from_chars("1+2+3+4"), &mut io)
        .unwrap();
    assert_eq!(result, Term::from_chars("1-2-3-4"));
    assert_eq!(
        program.call("Chpm", Term::new(), &mut io).unwrap(),
        Term::new()
    );
}

#[test]
fn test_exhausted_entry_point_aborts_run() {
    // Go { 'x' = ; } never matches the empty argument
    let mut b = ProgramBuilder::new();
    b.function("Go", vec![Sentence::new(Pattern::new().chr('x'), Expr::new())]);
    let program = b.load().unwrap();

    let err = program.run(&mut BufferIo::new()).unwrap_err();
    assert_eq!(err.to_string(), "Recognition impossible in Go. Last expression: ");
}

/// Pal { = True; s.1 = True; s.1 e.2 s.1 = <Pal e.2>; e.1 = False; }
#[test]
fn test_palindrome() {
    let mut b = ProgramBuilder::new();
    let pal = b.name("Pal");
    b.function("Go", vec![Sentence::new(Pattern::new(), Expr::new())]);
    b.function(
        "Pal",
        vec![
            Sentence::new(Pattern::new(), Expr::new().sym(Symbol::ident("True"))),
            Sentence::new(Pattern::new().s("1"), Expr::new().sym(Symbol::ident("True"))),
            Sentence::new(
                Pattern::new().s("1").e("2").s("1"),
                Expr::new().call(pal, Expr::new().e("2")),
            ),
            Sentence::new(Pattern::new().e("1"), Expr::new().sym(Symbol::ident("False"))),
        ],
    );
    let program = b.load().unwrap();
    let mut io = BufferIo::new();

    let truth = build![Symbol::ident("True")];
    let lie = build![Symbol::ident("False")];
    assert_eq!(program.call("Pal", Term::from_chars("racecar"), &mut io).unwrap(), truth);
    assert_eq!(program.call("Pal", Term::from_chars("abba"), &mut io).unwrap(), truth);
    assert_eq!(program.call("Pal", Term::from_chars("abca"), &mut io).unwrap(), lie);
}

/// Fact { 0 = 1; s.N = <Mul s.N <Fact <Sub s.N 1>>>; }
#[test]
fn test_factorial_with_library_arithmetic() {
    let mut b = ProgramBuilder::new();
    let fact = b.name("Fact");
    let mul = b.name("Mul");
    let sub = b.name("Sub");
    let prout = b.name("Prout");

    b.function(
        "Go",
        vec![Sentence::new(
            Pattern::new(),
            Expr::new().call(prout, Expr::new().call(fact, Expr::new().num(10))),
        )],
    );
    b.function(
        "Fact",
        vec![
            Sentence::new(Pattern::new().lit(Symbol::number(0)), Expr::new().num(1)),
            Sentence::new(
                Pattern::new().s("N"),
                Expr::new().call(
                    mul,
                    Expr::new()
                        .s("N")
                        .call(fact, Expr::new().call(sub, Expr::new().s("N").num(1))),
                ),
            ),
        ],
    );
    let program = b.load().unwrap();

    let mut io = BufferIo::new();
    program.run(&mut io).unwrap();
    assert_eq!(io.output(), ["3628800".to_string()]);
}

/// Max { s.A s.B, <Compare s.A s.B> : '-' = s.B; s.A s.B = s.A; }
#[test]
fn test_condition_selects_sentence() {
    let mut b = ProgramBuilder::new();
    let compare = b.name("Compare");
    b.function("Go", vec![Sentence::new(Pattern::new(), Expr::new())]);
    b.function(
        "Max",
        vec![
            Sentence::new(Pattern::new().s("A").s("B"), Expr::new().s("B")).with_condition(
                Expr::new().call(compare, Expr::new().s("A").s("B")),
                Pattern::new().chr('-'),
            ),
            Sentence::new(Pattern::new().s("A").s("B"), Expr::new().s("A")),
        ],
    );
    let program = b.load().unwrap();
    let mut io = BufferIo::new();

    assert_eq!(program.call("Max", build![3i64, 9i64], &mut io).unwrap(), build![9i64]);
    assert_eq!(program.call("Max", build![9i64, 3i64], &mut io).unwrap(), build![9i64]);
}

/// Echo { = <Loop <Card>>; }
/// Loop { 0 = ; e.Line = <Prout e.Line> <Loop <Card>>; }
#[test]
fn test_card_loop_echoes_input() {
    let mut b = ProgramBuilder::new();
    let card = b.name("Card");
    let prout = b.name("Prout");
    let looper = b.name("Loop");

    b.function(
        "Go",
        vec![Sentence::new(
            Pattern::new(),
            Expr::new().call(looper, Expr::new().call(card, Expr::new())),
        )],
    );
    b.function(
        "Loop",
        vec![
            Sentence::new(Pattern::new().lit(Symbol::number(0)), Expr::new()),
            Sentence::new(
                Pattern::new().e("Line"),
                Expr::new()
                    .call(prout, Expr::new().e("Line"))
                    .call(looper, Expr::new().call(card, Expr::new())),
            ),
        ],
    );
    let program = b.load().unwrap();

    let mut io = BufferIo::with_input(["one", "two"]);
    program.run(&mut io).unwrap();
    assert_eq!(io.output(), ["one".to_string(), "two".to_string()]);
}

#[test]
fn test_host_external() {
    let mut b = ProgramBuilder::new();
    let greet = b.name("Greet");
    let prout = b.name("Prout");
    b.external(&["Greet"]);
    b.define_native("Greet", |ev, arg| {
        let upper = ev.call("Upper", arg)?;
        Ok(build!["Hello, ", upper])
    });
    b.function(
        "Go",
        vec![Sentence::new(
            Pattern::new(),
            Expr::new().call(prout, Expr::new().call(greet, Expr::new().chars("bob"))),
        )],
    );
    let program = b.load().unwrap();

    let mut io = BufferIo::new();
    program.run(&mut io).unwrap();
    assert_eq!(io.output(), ["Hello, BOB".to_string()]);
}

#[test]
fn test_deep_recursion_hits_limit_not_stack() {
    // Count { s.N = <Count <Add s.N 1>>; }
    let mut b = ProgramBuilder::new();
    let count = b.name("Count");
    let add = b.name("Add");
    b.function(
        "Go",
        vec![Sentence::new(
            Pattern::new(),
            Expr::new().call(count, Expr::new().num(0)),
        )],
    );
    b.function(
        "Count",
        vec![Sentence::new(
            Pattern::new().s("N"),
            Expr::new().call(count, Expr::new().call(add, Expr::new().s("N").num(1))),
        )],
    );
    let program = b
        .load_with(RuntimeConfig::new().with_max_depth(2_000))
        .unwrap();

    let err = program.run(&mut BufferIo::new()).unwrap_err();
    assert!(matches!(err, RuntimeError::RecursionLimit { limit: 2_000 }));
}

#[test]
fn test_config_file_selects_entry_point() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    writeln!(file, "entry_point = \"Main\"").unwrap();
    writeln!(file, "max_depth = 500").unwrap();
    let config = RuntimeConfig::from_file(file.path()).unwrap();

    let mut b = ProgramBuilder::new();
    let prout = b.name("Prout");
    b.function(
        "Main",
        vec![Sentence::new(
            Pattern::new(),
            Expr::new().call(prout, Expr::new().chars("from Main")),
        )],
    );
    let program = b.load_with(config).unwrap();
    assert_eq!(program.config().max_depth, 500);

    let mut io = BufferIo::new();
    program.run(&mut io).unwrap();
    assert_eq!(io.output(), ["from Main".to_string()]);
}

#[test]
fn test_malformed_program_is_rejected_before_running() {
    let mut b = ProgramBuilder::new();
    // Go { = e.Missing; }
    b.function("Go", vec![Sentence::new(Pattern::new(), Expr::new().e("Missing"))]);
    let err = b.load().unwrap_err();
    assert!(err.is_load_error());
    assert!(matches!(err, RuntimeError::Malformed { .. }));
}

#[test]
fn test_program_shared_across_threads() {
    let program = chpm_program().load().unwrap();
    let program: &Program = &program;

    std::thread::scope(|scope| {
        for input in ["x+y", "p+q+r"] {
            scope.spawn(move || {
                let out = program
                    .call("Chpm", Term::from_chars(input), &mut BufferIo::new())
                    .unwrap();
                assert_eq!(out, Term::from_chars(&input.replace('+', "-")));
            });
        }
    });
}

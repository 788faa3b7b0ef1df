//! Tests for constant folding.

use pretty_assertions::assert_eq;

use super::{OptimizationContext, Optimizer};
use crate::vm::{Context, ExecutionContext, Opcode, Program, RuntimeError, StackElement};

fn optimized(source: &str) -> Program {
    Program::compile(source).unwrap().optimize().unwrap()
}

fn dump(source: &str) -> String {
    optimized(source).to_string()
}

/// Runs `program` against a context seeded with `registers` and returns the
/// result together with the sorted final registers.
fn run_with(program: &Program, registers: &[(&str, f64)]) -> (Result<f64, RuntimeError>, Vec<(String, f64)>) {
    let mut ctx = ExecutionContext::new();
    ctx.set_registers(registers.iter().copied());
    let result = program.execute_with(&mut ctx);
    let mut registers: Vec<_> = ctx
        .registers()
        .map(|(name, value)| (name.to_string(), value))
        .collect();
    registers.sort_by(|a, b| a.0.cmp(&b.0));
    (result, registers)
}

#[test]
fn test_context_marks_register_reads_unknown() {
    let mut ctx = OptimizationContext::new();
    assert_eq!(ctx.load_register("a"), 0.0);
    ctx.push_stack(StackElement::Literal(1.0));
    assert_eq!(ctx.peek_stack(), Some(&StackElement::unknown()));

    // The flag only applies to the next push.
    ctx.push_stack(StackElement::Literal(2.0));
    assert_eq!(ctx.peek_stack(), Some(&StackElement::Literal(2.0)));
}

#[test]
fn test_context_marks_register_writes_unknown() {
    let mut ctx = OptimizationContext::new();
    ctx.store_register("a", 3.0);
    ctx.push_stack(StackElement::Literal(3.0));
    assert_eq!(ctx.peek_stack(), Some(&StackElement::unknown()));
}

#[test]
fn test_fold_constant_program() {
    let program = optimized("2+3");
    assert_eq!(program.num_opcodes(), 1);
    assert_eq!(program.execute().unwrap(), 5.0);
    assert_eq!(dump("(1 + 2) * 3 ** 2 - 4 / 8"), "Number 26.5\n");
}

#[test]
fn test_fold_keeps_variable_programs_unchanged() {
    let original = Program::compile("a+1").unwrap();
    let program = original.optimize().unwrap();
    assert_eq!(program, original);

    assert_eq!(run_with(&program, &[("a", 10.0)]).0, Ok(11.0));
    assert_eq!(run_with(&program, &[]).0, Ok(1.0));
}

#[test]
fn test_fold_constant_subexpression_on_the_right() {
    assert_eq!(dump("a + (2*3)"), "Identifier a\nNumber 6\nAdd\n");
}

#[test]
fn test_fold_constant_subexpression_on_the_left() {
    assert_eq!(dump("2*3 + a"), "Number 6\nIdentifier a\nAdd\n");
}

#[test]
fn test_fold_on_both_sides_of_a_variable() {
    assert_eq!(
        dump("1+2 + a * (3*4)"),
        "Number 3\nIdentifier a\nNumber 12\nMultiply\nAdd\n"
    );
}

#[test]
fn test_fold_assignment_value() {
    assert_eq!(dump("a = 2 ** 10"), "Identifier a\nNumber 1024\nAssign\n");
}

#[test]
fn test_fold_after_assignment_result() {
    assert_eq!(
        dump("(a = 1) + 2 * 3"),
        "Identifier a\nNumber 1\nAssign\nNumber 6\nAdd\n"
    );
}

#[test]
fn test_no_fold_returns_same_program() {
    for source in ["a", "a = b", "a * b + c", "x = y = z"] {
        let original = Program::compile(source).unwrap();
        assert_eq!(original.optimize().unwrap(), original, "{source}");
    }
}

#[test]
fn test_optimize_is_idempotent() {
    for source in ["2+3", "a + (2*3)", "1+2 + a * (3*4)", "a = 2 ** 10", "b"] {
        let once = optimized(source);
        let twice = once.optimize().unwrap();
        assert_eq!(twice, once, "{source}");
    }
}

#[test]
fn test_optimize_preserves_semantics() {
    crate::test_utils::init_test_logging();

    let sources = [
        "1+2",
        "a+1",
        "a - 2 * 3",
        "(4 - 1) / b",
        "2 ** a ** 2",
        "a = b * (1 + 1)",
        "(a = 3) * (b = 4) + 1 / 2",
        "c = -2 ** 2 + a",
        "x / (1 - 1)",
    ];
    let register_sets: [&[(&str, f64)]; 3] = [
        &[],
        &[("a", 10.0), ("b", 4.0)],
        &[("a", -1.5), ("b", 0.0), ("x", 3.0)],
    ];

    for source in sources {
        let program = Program::compile(source).unwrap();
        let optimized = program.optimize().unwrap();
        assert!(optimized.num_opcodes() <= program.num_opcodes());
        for registers in register_sets {
            let (expected, expected_registers) = run_with(&program, registers);
            let (actual, actual_registers) = run_with(&optimized, registers);
            match (expected, actual) {
                (Ok(e), Ok(a)) if e.is_nan() => assert!(a.is_nan(), "{source}"),
                (e, a) => assert_eq!(a, e, "{source} with {registers:?}"),
            }
            assert_eq!(actual_registers, expected_registers, "{source}");
        }
    }
}

#[test]
fn test_optimize_keeps_side_effects_of_malformed_sequences() {
    let program = Program::from_opcodes(vec![
        Opcode::Identifier("a".into()),
        Opcode::Number(5.0),
        Opcode::Assign,
        Opcode::Number(1.0),
        Opcode::Number(2.0),
        Opcode::Add,
    ]);
    let optimized = program.optimize().unwrap();
    assert_eq!(
        optimized.to_string(),
        "Identifier a\nNumber 5\nAssign\nNumber 3\n"
    );
    assert_eq!(run_with(&optimized, &[]), run_with(&program, &[]));
}

#[test]
fn test_optimize_reports_runtime_errors() {
    let program = Program::compile("1 = 2").unwrap();
    assert_eq!(program.optimize(), Err(RuntimeError::AssignToLiteral(1.0)));

    let underflow = Program::from_opcodes(vec![Opcode::Add]);
    assert_eq!(underflow.optimize(), Err(RuntimeError::StackUnderflow));
}

#[test]
fn test_optimizer_returns_none_when_nothing_folds() {
    let opcodes = [Opcode::Identifier("a".into())];
    assert_eq!(Optimizer::new().optimize(&opcodes), Ok(None));
    assert_eq!(Optimizer::new().optimize(&[]), Ok(None));
}

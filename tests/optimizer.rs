#[macro_use]
mod cases;

use indoc::indoc;

test_case! {
    name: constant_program,
    input: "(1 + 2) * 3",
    optimized: { "Number 9\n" },
}

test_case! {
    name: single_literal_is_unchanged,
    input: "7",
    optimized: { "Number 7\n" },
}

test_case! {
    name: variable_program_is_unchanged,
    input: "a * b",
    optimized: { "Identifier a\nIdentifier b\nMultiply\n" },
}

test_case! {
    name: fold_right_operand,
    input: "a + 2 * 3",
    optimized: { "Identifier a\nNumber 6\nAdd\n" },
}

test_case! {
    name: fold_left_operand,
    input: "2 ** 4 - a",
    optimized: { "Number 16\nIdentifier a\nSubtract\n" },
}

test_case! {
    name: fold_assigned_value,
    input: "a = 60 * 60 * 24",
    optimized: { "Identifier a\nNumber 86400\nAssign\n" },
    result: { 86400.0 },
}

test_case! {
    name: fold_around_assignment,
    input: "(a = 1 + 1) + 3 * 3",
    optimized: {
        indoc! {"
            Identifier a
            Number 2
            Assign
            Number 9
            Add
        "}
    },
    registers: { "a = 2\n" },
}

test_case! {
    name: fold_division_by_zero,
    input: "a + 1 / 0",
    optimized: { "Identifier a\nNumber inf\nAdd\n" },
}

test_case! {
    name: assignment_to_literal_fails,
    input: "3 = 4",
    optimized: { Err(tally::RuntimeError::AssignToLiteral(_)) },
}

// Helper macro to distinguish between patterns and expressions
#[macro_export]
macro_rules! assert_case {
    // Guard patterns - patterns with if conditions
    ($result:expr, { $pattern:pat if $guard:expr }) => {
        match $result {
            $pattern if $guard => {},
            other => panic!("Expected {} if {} but got {:?}", stringify!($pattern), stringify!($guard), other),
        }
    };

    ($result:expr, { Ok($($pattern:tt)*) }) => {
        match $result {
            Ok($($pattern)*) => {},
            other => panic!("Expected Ok({}) but got {:#?}", stringify!($($pattern)*), other),
        }
    };

    ($result:expr, { Err($($pattern:tt)*) }) => {
        match $result {
            Err($($pattern)*) => {},
            other => panic!("Expected Err({}) but got {:#?}", stringify!($($pattern)*), other),
        }
    };

    // Wildcard pattern
    ($result:expr, { _ }) => {
        let _ = $result;
    };

    // Default case - treat as expression for equality comparison
    ($result:expr, { $expected:expr }) => {
        match $result {
            Ok(actual) => {
                pretty_assertions::assert_eq!($expected, actual, "Expected {:#?} but got {:#?}\n\n< expected / got >", $expected, actual);
            },
            other => panic!("Expected Ok(...) but got {:?}", other),
        }
    };
}

// Helper macro to generate test functions based on field names
#[macro_export]
macro_rules! handle_case {
    ([$($attrs:meta)*] result, $expected:tt) => {
        $(#[$attrs])*
        #[test]
        fn validate_result() {
            let engine = tally::Engine::default();
            let result = engine
                .compile(Default::default(), input())
                .and_then(|program| engine.run(&program, &mut engine.new_context()));
            assert_case!(result, $expected);
        }
    };

    ([$($attrs:meta)*] registers, $expected:tt) => {
        $(#[$attrs])*
        #[test]
        fn validate_registers() {
            let engine = tally::Engine::default();
            let mut ctx = engine.new_context();
            let result = engine
                .compile(Default::default(), input())
                .and_then(|program| engine.run(&program, &mut ctx))
                .map(|_| {
                    let mut registers: Vec<_> = ctx
                        .registers()
                        .map(|(name, value)| format!("{name} = {value}\n"))
                        .collect();
                    registers.sort();
                    registers.concat()
                });
            assert_case!(result.as_deref(), $expected);
        }
    };

    ([$($attrs:meta)*] opcodes, $expected:tt) => {
        $(#[$attrs])*
        #[test]
        fn validate_opcodes() {
            let result = tally::Program::compile(input()).map(|program| program.to_string());
            assert_case!(result.as_deref(), $expected);
        }
    };

    ([$($attrs:meta)*] optimized, $expected:tt) => {
        $(#[$attrs])*
        #[test]
        fn validate_optimized() {
            let program = tally::Program::compile(input()).unwrap();
            let optimized = program.optimize();

            // Folding must never change what a program computes.
            if let Ok(optimized) = &optimized {
                let mut expected_ctx = tally::ExecutionContext::new();
                let mut actual_ctx = tally::ExecutionContext::new();
                let expected = program.execute_with(&mut expected_ctx);
                let actual = optimized.execute_with(&mut actual_ctx);
                match (&expected, &actual) {
                    (Ok(e), Ok(a)) if e.is_nan() => assert!(a.is_nan()),
                    _ => pretty_assertions::assert_eq!(expected, actual),
                }
            }

            let result = optimized.map(|program| program.to_string());
            assert_case!(result.as_deref(), $expected);
        }
    };

    ([$($attrs:meta)*] error, $expected:tt) => {
        $(#[$attrs])*
        #[test]
        fn validate_error() {
            let engine = tally::Engine::default();
            let result = engine
                .compile(Default::default(), input())
                .and_then(|program| engine.run(&program, &mut engine.new_context()));

            let err = match result {
                Err(e) => e,
                Ok(value) => panic!("Expected an error, but evaluation returned {value}"),
            };
            let mut buf = Vec::new();
            let config = tally::RenderConfig { color: false, ..Default::default() };
            tally::render_error_to(&err, &mut buf, &config).unwrap();
            let rendered = String::from_utf8_lossy(&buf).into_owned();

            // Only the headline is compared; the snippet layout belongs to ariadne.
            let headline = rendered.lines().next().unwrap_or_default().trim_end();
            let result: Result<&str, ()> = Ok(headline);
            assert_case!(result, $expected);
        }
    };

    // Generic case for unknown field names
    ([$($attrs:meta)*] $field_name:ident, $expected:tt) => {
        compile_error!(concat!("Unknown test case field: ", stringify!($field_name)));
    };
}

// Helper macro to recursively parse assertion fields
#[macro_export]
macro_rules! parse_assertions {
    // Base case: no more fields to parse
    (@parse [$($test_functions:tt)*]) => {
        $($test_functions)*
    };

    (@parse [$($test_functions:tt)*] $(#[$attr:meta])* $field_name:ident: $field_value:tt, $($rest:tt)*) => {
        parse_assertions! {@parse [
            $($test_functions)*
            handle_case! {[$($attr)*] $field_name, $field_value}
        ] $($rest)*}
    };
}

// Main macro - name first, input second, then any order for assertions
#[macro_export]
macro_rules! test_case {
    (
        name: $name:ident,
        input: $input:expr,
        $($assertion_fields:tt)*
    ) => {
        mod $name {
            #![allow(unused_imports, dead_code)]

            use super::*;
            use once_cell::sync::OnceCell;

            fn input() -> &'static str {
                static INPUT_CELL: OnceCell<&'static str> = OnceCell::new();
                INPUT_CELL.get_or_init(|| $input)
            }

            parse_assertions! {@parse [] $($assertion_fields)*}
        }
    };
}

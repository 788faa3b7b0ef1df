//! Engine and compilation options.
//!
//! Options come in pairs: a complete struct holding every setting, and an
//! `*Override` struct whose `None` fields leave the defaults untouched.

use crate::compiler::DEFAULT_MAX_DEPTH;

/// Settings applied when compiling an expression.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompileOptions {
    /// Maximum bracket nesting depth.
    pub max_depth: usize,

    /// Constant-fold the program after compiling it.
    pub optimize: bool,
}

impl Default for CompileOptions {
    fn default() -> Self {
        CompileOptions {
            max_depth: DEFAULT_MAX_DEPTH,
            optimize: false,
        }
    }
}

impl CompileOptions {
    pub fn override_with(&mut self, other: &CompileOptionsOverride) {
        if let Some(max_depth) = other.max_depth {
            self.max_depth = max_depth;
        }
        if let Some(optimize) = other.optimize {
            self.optimize = optimize;
        }
    }
}

/// Per-call overrides for [`CompileOptions`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CompileOptionsOverride {
    pub max_depth: Option<usize>,
    pub optimize: Option<bool>,
}

/// Settings for an [`Engine`](super::Engine).
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EngineOptions {
    pub default_compile_options: CompileOptions,
}

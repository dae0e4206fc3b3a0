//! Variable scope walkthrough rendered by the `demonstrate-scope` action.
//!
//! The page-wide counter is passed in explicitly; each helper reports what
//! it could see from its own frame.

use std::fmt;

/// Value the page-wide counter holds once the page has loaded.
pub const INITIAL_GLOBAL_COUNTER: i64 = 42;

pub const LOCAL_VARIABLE: &str = "This is LOCAL to this function";
pub const LOCAL_COUNTER: i64 = 100;
pub const INNER_VARIABLE: &str = "Inner function variable";
pub const FUNCTION_LOCAL: &str = "Local to this function";
pub const SAMPLE_PARAMETER: &str = "Original parameter value";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LocalScopeReport {
    pub local_variable: &'static str,
    pub local_counter: i64,
    pub global_counter: i64,
    pub inner_result: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParameterScopeReport {
    pub modified_param: String,
    pub local_var: &'static str,
    pub global_access: String,
}

/// Bumps the page counter, then reports locals next to what a nested
/// function sees of both frames.
pub fn demonstrate_local_scope(global_counter: &mut i64) -> LocalScopeReport {
    *global_counter += 1;
    let counter = *global_counter;
    let inner = || {
        format!("Inner: {INNER_VARIABLE}, Outer Local: {LOCAL_VARIABLE}, Global Counter: {counter}")
    };
    LocalScopeReport {
        local_variable: LOCAL_VARIABLE,
        local_counter: LOCAL_COUNTER,
        global_counter: counter,
        inner_result: inner(),
    }
}

/// The caller's `param_value` is untouched; only the local copy changes.
pub fn parameter_scope_demo(param_value: &str, global_counter: i64) -> ParameterScopeReport {
    let mut param_value = param_value.to_string();
    param_value.push_str(" (modified in function)");
    ParameterScopeReport {
        modified_param: param_value,
        local_var: FUNCTION_LOCAL,
        global_access: format!("Global counter is: {global_counter}"),
    }
}

// Both reports print as two-space indented JSON objects.
impl fmt::Display for LocalScopeReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{{")?;
        writeln!(f, "  \"localVariable\": {},", json_string(self.local_variable))?;
        writeln!(f, "  \"localCounter\": {},", self.local_counter)?;
        writeln!(f, "  \"globalCounter\": {},", self.global_counter)?;
        writeln!(f, "  \"innerResult\": {}", json_string(&self.inner_result))?;
        write!(f, "}}")
    }
}

impl fmt::Display for ParameterScopeReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{{")?;
        writeln!(f, "  \"modifiedParam\": {},", json_string(&self.modified_param))?;
        writeln!(f, "  \"localVar\": {},", json_string(self.local_var))?;
        writeln!(f, "  \"globalAccess\": {}", json_string(&self.global_access))?;
        write!(f, "}}")
    }
}

fn json_string(value: &str) -> String {
    let mut out = String::with_capacity(value.len() + 2);
    out.push('"');
    for ch in value.chars() {
        match ch {
            '"' => out.push_str("\\\""),
            '\\' => out.push_str("\\\\"),
            '\n' => out.push_str("\\n"),
            ch if u32::from(ch) < 0x20 => out.push_str(&format!("\\u{:04x}", u32::from(ch))),
            ch => out.push(ch),
        }
    }
    out.push('"');
    out
}

//! Text reports
//!
//! Pure functions from tracked data to the multi-line text shown to the
//! user. None of them can fail: every optional or mistyped field has a
//! fallback rendering.

pub mod messages;
pub mod narrative_render;
pub mod state_render;

pub use narrative_render::{render_mysteries, render_secrets, render_timeline};
pub use state_render::{render_full_state, render_module, render_summary};

use serde_json::Value;

/// Prefix on the first line of every report
pub const PREFIX: &str = "🔍 ANEX:";

/// Width of the rule framing state and narrative reports
pub const RULE_WIDTH: usize = 40;

pub(crate) fn rule(width: usize) -> String {
    "═".repeat(width)
}

/// Render one tracked value
///
/// Numbers get two decimals, objects and arrays (and null) their compact
/// JSON, strings are shown as-is.
pub fn format_value(value: &Value) -> String {
    match value {
        Value::Number(n) => match n.as_f64() {
            Some(f) => fixed_two(f),
            None => n.to_string(),
        },
        Value::String(s) => s.clone(),
        Value::Bool(b) => b.to_string(),
        Value::Null | Value::Array(_) | Value::Object(_) => value.to_string(),
    }
}

/// Two decimals, exact ties rounded away from zero
///
/// `{:.2}` is correctly rounded from the exact binary value but breaks ties
/// to even. A tie at the third decimal is only possible for odd multiples
/// of 1/8, and those are handled here.
fn fixed_two(f: f64) -> String {
    let eighths = f.abs() * 8.0;
    if eighths.fract() == 0.0 && eighths < MAX_EXACT_INT && (eighths as u64) % 2 == 1 {
        let hundredths = (eighths as u64 * 25 + 1) / 2;
        let sign = if f.is_sign_negative() { "-" } else { "" };
        return format!("{}{}.{:02}", sign, hundredths / 100, hundredths % 100);
    }
    format!("{:.2}", f)
}

const MAX_EXACT_INT: f64 = 9_007_199_254_740_992.0;

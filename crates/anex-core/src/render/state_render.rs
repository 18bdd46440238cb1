use crate::model::{Module, StyleProfile, TrackingState};
use crate::render::{format_value, rule, PREFIX, RULE_WIDTH};

/// Full dump of every module, in declared order
pub fn render_full_state(state: &TrackingState) -> String {
    let mut lines = vec![format!("{} Full State Dump", PREFIX), rule(RULE_WIDTH)];

    lines.push(format!("\n📊 Style: {}", or_fallback(&state.style, "Not set")));
    lines.push(format!(
        "🕐 Initialized: {}",
        or_fallback(&state.initialized, "Unknown")
    ));

    for module in Module::ALL {
        lines.push(format!(
            "\n{} {}:",
            module.icon(),
            module.name().to_uppercase()
        ));
        let data = state.module(module);
        if data.is_empty() {
            lines.push("  (no data)".to_string());
        } else {
            for (key, value) in data {
                lines.push(format!("  {}: {}", key, format_value(value)));
            }
        }
    }

    lines.push(format!("\n{}", rule(RULE_WIDTH)));
    lines.join("\n")
}

/// Key-value report for a single module
pub fn render_module(module: Module, state: &TrackingState) -> String {
    let mut lines = vec![
        format!("{} {} Module", PREFIX, module.name().to_uppercase()),
        rule(RULE_WIDTH),
    ];

    let data = state.module(module);
    if data.is_empty() {
        lines.push("\n(No data stored for this module)".to_string());
    } else {
        lines.push(String::new());
        for (key, value) in data {
            lines.push(format!("{}: {}", key, format_value(value)));
        }
    }

    lines.push(format!("\n{}", rule(RULE_WIDTH)));
    lines.join("\n")
}

/// Style, session start and per-module data point counts
pub fn render_summary(state: &TrackingState) -> String {
    let mut lines = vec![format!("{} Summary", PREFIX), rule(RULE_WIDTH)];

    let style = StyleProfile::from_id(&state.style)
        .map(|profile| profile.display_name())
        .unwrap_or_else(|| or_fallback(&state.style, "Not set"));
    lines.push(format!("\n📊 Style: {}", style));
    lines.push(format!(
        "🕐 Session: {}",
        or_fallback(&state.initialized, "Unknown")
    ));

    for module in Module::ALL {
        let count = state.module(module).len();
        if count > 0 {
            lines.push(format!("  {}: {} data points", module.name(), count));
        }
    }

    if state.data_points() == 0 {
        lines.push("\n⚠️ No data tracked yet".to_string());
    }

    lines.join("\n")
}

fn or_fallback<'a>(value: &'a str, fallback: &'a str) -> &'a str {
    if value.is_empty() {
        fallback
    } else {
        value
    }
}

use serde_json::Value;

use crate::model::lenient::value_text;
use crate::model::{Mystery, Narrative, TimelineEntry};
use crate::render::{rule, PREFIX, RULE_WIDTH};

/// Numbered timeline, oldest first
pub fn render_timeline(timeline: &[TimelineEntry]) -> String {
    if timeline.is_empty() {
        return format!("{} No timeline events recorded.", PREFIX);
    }

    let mut lines = vec![format!("{} Timeline", PREFIX), rule(RULE_WIDTH), String::new()];
    for (i, entry) in timeline.iter().enumerate() {
        let (timestamp, description) = match entry {
            TimelineEntry::Event {
                timestamp,
                description,
            } => (
                non_empty(timestamp.as_deref()).unwrap_or("Unknown").to_string(),
                non_empty(description.as_deref())
                    .unwrap_or("(no description)")
                    .to_string(),
            ),
            TimelineEntry::Label(label) => ("Unknown".to_string(), label.clone()),
            TimelineEntry::Other(value) => ("Unknown".to_string(), plain(value)),
        };
        lines.push(format!("{}. {}: {}", i + 1, timestamp, description));
    }

    lines.join("\n")
}

/// Numbered mysteries with their clues
pub fn render_mysteries(mysteries: &[Mystery]) -> String {
    if mysteries.is_empty() {
        return format!("{} No active mysteries.", PREFIX);
    }

    let mut lines = vec![
        format!("{} Active Mysteries", PREFIX),
        rule(RULE_WIDTH),
        String::new(),
    ];
    for (i, mystery) in mysteries.iter().enumerate() {
        match mystery {
            Mystery::Record { title, clues } => {
                lines.push(format!(
                    "{}. {}",
                    i + 1,
                    non_empty(title.as_deref()).unwrap_or("(untitled)")
                ));
                if let Some(clues) = clues {
                    lines.push(format!("   Clues: {}", clues.join(", ")));
                }
            }
            Mystery::Label(label) => lines.push(format!("{}. {}", i + 1, label)),
            Mystery::Other(value) => lines.push(format!("{}. {}", i + 1, plain(value))),
        }
    }

    lines.join("\n")
}

/// Secrets grouped by character
pub fn render_secrets(narrative: &Narrative) -> String {
    if narrative.secrets.is_empty() {
        return format!("{} No secrets recorded.", PREFIX);
    }

    let mut lines = vec![format!("{} Secrets", PREFIX), rule(RULE_WIDTH), String::new()];
    for (character, secrets) in narrative.secrets_by_character() {
        lines.push(format!("\n{}:", character));
        for secret in secrets.items() {
            lines.push(format!("  • {}", secret));
        }
    }

    lines.join("\n")
}

fn plain(value: &Value) -> String {
    value_text(value).unwrap_or_else(|| "null".to_string())
}

fn non_empty(value: Option<&str>) -> Option<&str> {
    value.filter(|s| !s.is_empty())
}

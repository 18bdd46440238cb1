//! Host lifecycle events
//!
//! Both hooks are placeholders: they are accepted and logged, and change
//! nothing. Parsing tracked values out of generated messages would start in
//! `on_message_received`.

use tracing::debug;

/// Events forwarded by the host
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HostEvent {
    /// A new message arrived in the active chat
    MessageReceived { message_id: Option<String> },
    /// The user switched to a different chat
    ChatChanged { chat_id: Option<String> },
}

pub(crate) fn handle(event: &HostEvent) {
    match event {
        HostEvent::MessageReceived { message_id } => on_message_received(message_id.as_deref()),
        HostEvent::ChatChanged { chat_id } => on_chat_changed(chat_id.as_deref()),
    }
}

fn on_message_received(message_id: Option<&str>) {
    debug!(
        component = module_path!(),
        op = "handle_event",
        host_event = "message_received",
        message_id = message_id.unwrap_or(""),
        "message received, ready for parsing"
    );
}

fn on_chat_changed(chat_id: Option<&str>) {
    debug!(
        component = module_path!(),
        op = "handle_event",
        host_event = "chat_changed",
        chat_id = chat_id.unwrap_or(""),
        "chat changed"
    );
}

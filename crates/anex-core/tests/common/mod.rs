use anex_core::model::TRACKING_KEY;
use anex_core::{AnexContext, InMemoryHost, Module, StorageMode};
use serde_json::Value;

/// Context over a host with an active chat
#[allow(dead_code)]
pub fn chat_context() -> AnexContext<InMemoryHost> {
    AnexContext::init(InMemoryHost::new())
}

/// Context over a host with no active chat
#[allow(dead_code)]
pub fn sessionless_context() -> AnexContext<InMemoryHost> {
    AnexContext::init(InMemoryHost::without_session())
}

/// Context in global storage mode
#[allow(dead_code)]
pub fn global_context() -> AnexContext<InMemoryHost> {
    let mut ctx = chat_context();
    ctx.set_storage_mode(StorageMode::Global).unwrap();
    ctx
}

/// Tracking record as stored in the session map, if any
#[allow(dead_code)]
pub fn session_tracking(ctx: &AnexContext<InMemoryHost>) -> Option<Value> {
    ctx.host().chat.as_ref()?.get(TRACKING_KEY).cloned()
}

/// Tracking record as stored in the process-wide map, if any
#[allow(dead_code)]
pub fn global_tracking(ctx: &AnexContext<InMemoryHost>) -> Option<Value> {
    ctx.host().settings.get(TRACKING_KEY).cloned()
}

/// Set one tracked value directly in the session store
///
/// Stands in for the message parser, which does not exist yet.
#[allow(dead_code)]
pub fn track(ctx: &mut AnexContext<InMemoryHost>, module: Module, key: &str, value: Value) {
    let chat = ctx.host_mut().chat.as_mut().unwrap();
    chat[TRACKING_KEY][module.name()][key] = value;
}

/// Replace a narrative field directly in the session store
#[allow(dead_code)]
pub fn set_narrative(ctx: &mut AnexContext<InMemoryHost>, field: &str, value: Value) {
    let chat = ctx.host_mut().chat.as_mut().unwrap();
    chat[TRACKING_KEY]["narrative"][field] = value;
}

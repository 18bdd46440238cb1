#![allow(clippy::unwrap_used, clippy::expect_used)]

mod common;

use anex_core::model::{Mystery, Narrative, TimelineEntry, TrackingState};
use anex_core::render;
use common::*;
use proptest::prelude::*;
use serde_json::{json, Value};

fn arb_json() -> impl Strategy<Value = Value> {
    let leaf = prop_oneof![
        Just(Value::Null),
        any::<bool>().prop_map(Value::Bool),
        any::<i32>().prop_map(|n| json!(n)),
        (-1.0e6f64..1.0e6).prop_map(|f| json!(f)),
        ".{0,12}".prop_map(Value::String),
    ];
    leaf.prop_recursive(3, 24, 4, |inner| {
        prop_oneof![
            prop::collection::vec(inner.clone(), 0..4).prop_map(Value::Array),
            prop::collection::vec(("[a-z_]{1,8}", inner), 0..4)
                .prop_map(|pairs| Value::Object(pairs.into_iter().collect())),
        ]
    })
}

proptest! {
    #[test]
    fn formatters_accept_any_stored_shape(stored in arb_json()) {
        if let Some(state) = TrackingState::from_stored(&stored) {
            let narrative = state.narrative.clone().unwrap_or_default();
            prop_assert!(render::render_full_state(&state).starts_with(render::PREFIX));
            prop_assert!(render::render_summary(&state).starts_with(render::PREFIX));
            prop_assert!(render::render_timeline(&narrative.timeline).starts_with(render::PREFIX));
            prop_assert!(render::render_mysteries(&narrative.mysteries).starts_with(render::PREFIX));
            prop_assert!(render::render_secrets(&narrative).starts_with(render::PREFIX));
        }
    }

    #[test]
    fn narrative_lists_accept_any_element(items in prop::collection::vec(arb_json(), 0..6)) {
        let timeline: Vec<TimelineEntry> =
            serde_json::from_value(Value::Array(items.clone())).unwrap();
        let mysteries: Vec<Mystery> = serde_json::from_value(Value::Array(items.clone())).unwrap();

        let timeline_text = render::render_timeline(&timeline);
        let mystery_text = render::render_mysteries(&mysteries);
        if !items.is_empty() {
            let last = format!("{}. ", items.len());
            prop_assert!(timeline_text.contains(&last));
            prop_assert!(mystery_text.contains(&last));
        }
        let narrative = Narrative { timeline, mysteries, ..Narrative::default() };
        prop_assert!(render::render_secrets(&narrative).contains("No secrets recorded."));
    }

    #[test]
    fn unknown_verbs_never_mutate(verb in "[a-z]{1,10}", arg in proptest::option::of("[a-z-]{0,10}")) {
        prop_assume!(!["test", "init", "update", "debug", "summon", "reset", "help"]
            .contains(&verb.as_str()));

        let mut ctx = chat_context();
        ctx.dispatch("init", Some("rina-kent"));
        let before = ctx.host().clone();

        let text = ctx.dispatch(&verb, arg.as_deref());
        prop_assert!(text.contains(&verb));
        prop_assert!(text.contains("help"));
        prop_assert_eq!(&ctx.host().chat, &before.chat);
        prop_assert_eq!(&ctx.host().settings, &before.settings);
    }
}

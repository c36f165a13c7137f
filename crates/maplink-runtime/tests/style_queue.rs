//! Style mutation queue behavior against a scripted peer.

use maplink_runtime::style::EntityKind;
use maplink_runtime::testing::ScriptedPeer;
use maplink_runtime::{
    Bridge, BridgeError, LayerOutcome, ReturnValue, SerialExecutor, StyleContext, StyleError,
};
use maplink_types::{LayerId, SourceId};
use serde_json::json;
use std::sync::Arc;

fn context(peer: ScriptedPeer) -> (StyleContext, Arc<ScriptedPeer>) {
    let peer = Arc::new(peer);
    let (exec, _worker) = SerialExecutor::spawn(peer.clone(), 16);
    let bridge = Arc::new(Bridge::with_executor(Arc::new(exec)));
    (StyleContext::new(bridge), peer)
}

fn layer(s: &str) -> LayerId {
    s.parse().expect("valid layer id")
}

fn source(s: &str) -> SourceId {
    s.parse().expect("valid source id")
}

#[tokio::test]
async fn layer_without_registered_source_is_missing_parent_but_registered() {
    let (mut ctx, peer) = context(ScriptedPeer::new());

    let err = ctx
        .add_layer(layer("quakes"), Some(source("eq")), json!({"type": "circle"}), None)
        .await
        .expect_err("source not registered");

    assert_eq!(
        err,
        StyleError::MissingParent {
            layer: layer("quakes"),
            parent: source("eq"),
        }
    );
    assert!(ctx.table().contains_layer(&layer("quakes")));
    assert!(ctx.pending().is_empty());
    assert!(peer.scripts().is_empty(), "nothing reached the peer");

    ctx.remove_layer(&layer("quakes")).await.expect("caller rollback");
    assert!(!ctx.table().contains_layer(&layer("quakes")));
}

#[tokio::test]
async fn unloaded_source_defers_until_flush() {
    let (mut ctx, peer) = context(ScriptedPeer::new().reply_to("isSourceLoaded", json!(false)));

    ctx.add_source(source("eq"), json!({"type": "geojson", "data": {}}))
        .await
        .expect("source added");
    let outcome = ctx
        .add_layer(layer("quakes"), Some(source("eq")), json!({"type": "circle"}), None)
        .await
        .expect("layer accepted");

    assert_eq!(outcome, LayerOutcome::Deferred);
    assert_eq!(ctx.pending().len(), 1);
    assert!(ctx.pending().is_pending(&layer("quakes")));
    assert_eq!(peer.count_matching("map.addLayer"), 0);

    let report = ctx.flush_pending().await;
    assert_eq!(report.applied(), vec![&layer("quakes")]);
    assert!(ctx.pending().is_empty());
    assert_eq!(peer.count_matching("map.addLayer"), 1);
}

#[tokio::test]
async fn loaded_source_applies_immediately() {
    let (mut ctx, peer) = context(ScriptedPeer::new().reply_to("isSourceLoaded", json!(true)));

    ctx.add_source(source("eq"), json!({"type": "geojson"}))
        .await
        .expect("source added");
    let outcome = ctx
        .add_layer(layer("quakes"), Some(source("eq")), json!({"type": "circle"}), None)
        .await
        .expect("layer added");

    assert_eq!(outcome, LayerOutcome::Applied);
    assert!(ctx.pending().is_empty());
    let scripts = peer.scripts();
    assert!(scripts[1].contains("isSourceLoaded"));
    assert!(scripts[2].starts_with("map.addLayer("));
}

#[tokio::test]
async fn flush_runs_in_fifo_order() {
    let (mut ctx, peer) = context(ScriptedPeer::new().reply_to("isSourceLoaded", json!(false)));

    ctx.add_source(source("a"), json!({})).await.expect("source a");
    ctx.add_source(source("b"), json!({})).await.expect("source b");
    for (l, s) in [("one", "a"), ("two", "b"), ("three", "a")] {
        ctx.add_layer(layer(l), Some(source(s)), json!({"type": "line"}), None)
            .await
            .expect("deferred");
    }

    let report = ctx.flush_pending().await;
    let order: Vec<String> = report.applied().into_iter().map(ToString::to_string).collect();
    assert_eq!(order, vec!["one", "two", "three"]);

    let added: Vec<String> = peer
        .scripts()
        .into_iter()
        .filter(|s| s.starts_with("map.addLayer("))
        .collect();
    assert_eq!(added.len(), 3);
    assert!(added[0].contains(r#""id":"one""#));
    assert!(added[1].contains(r#""id":"two""#));
    assert!(added[2].contains(r#""id":"three""#));
}

#[tokio::test]
async fn duplicates_are_rejected() {
    let (mut ctx, _peer) = context(ScriptedPeer::new());

    ctx.add_source(source("eq"), json!({})).await.expect("first");
    let err = ctx
        .add_source(source("eq"), json!({}))
        .await
        .expect_err("duplicate source");
    assert_eq!(
        err,
        StyleError::AlreadyExists {
            kind: EntityKind::Source,
            id: "eq".into(),
        }
    );

    ctx.add_layer(layer("bg"), None, json!({"type": "background"}), None)
        .await
        .expect("first");
    let err = ctx
        .add_layer(layer("bg"), None, json!({"type": "background"}), None)
        .await
        .expect_err("duplicate layer");
    assert!(matches!(
        err,
        StyleError::AlreadyExists {
            kind: EntityKind::Layer,
            ..
        }
    ));
}

#[tokio::test]
async fn removing_unknown_entities_is_not_found() {
    let (mut ctx, peer) = context(ScriptedPeer::new());

    assert!(matches!(
        ctx.remove_layer(&layer("ghost")).await,
        Err(StyleError::NotFound {
            kind: EntityKind::Layer,
            ..
        })
    ));
    assert!(matches!(
        ctx.remove_source(&source("ghost")).await,
        Err(StyleError::NotFound {
            kind: EntityKind::Source,
            ..
        })
    ));
    assert!(peer.scripts().is_empty());
}

#[tokio::test]
async fn remove_layer_discards_its_pending_task() {
    let (mut ctx, peer) = context(ScriptedPeer::new().reply_to("isSourceLoaded", json!(false)));

    ctx.add_source(source("eq"), json!({})).await.expect("source");
    ctx.add_layer(layer("quakes"), Some(source("eq")), json!({}), None)
        .await
        .expect("deferred");

    let removed = ctx.remove_layer(&layer("quakes")).await.expect("removed");
    assert_eq!(removed, ReturnValue::Unsupported);
    assert!(ctx.pending().is_empty());
    assert_eq!(peer.count_matching("map.removeLayer"), 1);

    assert!(ctx.flush_pending().await.is_empty());
}

#[tokio::test]
async fn replace_style_clears_everything() {
    let (mut ctx, peer) = context(ScriptedPeer::new().reply_to("isSourceLoaded", json!(false)));

    ctx.add_source(source("eq"), json!({})).await.expect("source");
    ctx.add_layer(layer("quakes"), Some(source("eq")), json!({}), None)
        .await
        .expect("deferred");

    ctx.replace_style(json!("mapbox://styles/mapbox/dark-v11"))
        .await
        .expect("style replaced");

    assert!(ctx.table().is_empty());
    assert!(ctx.pending().is_empty());
    assert!(peer
        .scripts()
        .last()
        .is_some_and(|s| s.starts_with("map.setStyle(")));

    assert!(matches!(
        ctx.remove_layer(&layer("quakes")).await,
        Err(StyleError::NotFound { .. })
    ));
}

#[tokio::test]
async fn bridge_failures_propagate_unchanged() {
    let bridge = Arc::new(Bridge::new());
    let mut ctx = StyleContext::new(bridge);

    let err = ctx
        .add_source(source("eq"), json!({}))
        .await
        .expect_err("bridge not loaded");
    assert_eq!(err, StyleError::Bridge(BridgeError::NotLoaded));
    assert!(ctx.table().contains_source(&source("eq")));
}

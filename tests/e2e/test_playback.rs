use crate::e2e::helpers;

use helpers::TestContext;
use hyper::StatusCode;
use serde_json::json;
use std::time::Duration;
use test_context::test_context;

async fn generate(ctx: &TestContext, samples: usize) {
    ctx.speech.respond_with_samples(samples);
    ctx.client
        .post(
            "/api/speech",
            &json!({ "english_text": "Now boarding", "voice_profile_id": "f_standard" }),
        )
        .await
        .unwrap()
        .assert_status(StatusCode::OK);
}

#[test_context(TestContext)]
#[tokio::test]
async fn it_should_report_idle_without_take(ctx: &TestContext) {
    let response = ctx.client.get("/api/playback").await.unwrap();

    response.assert_status(StatusCode::OK);
    assert_eq!(response.str_field("state"), "idle");
    assert_eq!(response.f64_field("position_secs"), 0.0);
    assert_eq!(response.f64_field("duration_secs"), 0.0);
    assert_eq!(response.field("poll_interval_ms").as_u64(), Some(50));
}

#[test_context(TestContext)]
#[tokio::test]
async fn it_should_return_not_found_when_playing_without_take(ctx: &TestContext) {
    let response = ctx.client.post_empty("/api/playback/play").await.unwrap();
    response.assert_status(StatusCode::NOT_FOUND);

    let response = ctx
        .client
        .post("/api/playback/seek", &json!({ "position_secs": 1.0 }))
        .await
        .unwrap();
    response.assert_status(StatusCode::NOT_FOUND);
}

#[test_context(TestContext)]
#[tokio::test]
async fn it_should_play_a_generated_take(ctx: &TestContext) {
    generate(ctx, 48_000).await;

    let response = ctx.client.post_empty("/api/playback/play").await.unwrap();

    response.assert_status(StatusCode::OK);
    assert_eq!(response.str_field("state"), "playing");
    assert!((response.f64_field("duration_secs") - 2.0).abs() < 1e-9);

    tokio::time::sleep(Duration::from_millis(100)).await;

    let status = ctx.client.get("/api/playback").await.unwrap();
    assert_eq!(status.str_field("state"), "playing");
    let position = status.f64_field("position_secs");
    assert!(position > 0.0 && position < 2.0, "position {}", position);
}

#[test_context(TestContext)]
#[tokio::test]
async fn it_should_stop_and_resume_from_stopped_position(ctx: &TestContext) {
    generate(ctx, 48_000).await;

    ctx.client
        .post_empty("/api/playback/play")
        .await
        .unwrap()
        .assert_status(StatusCode::OK);
    tokio::time::sleep(Duration::from_millis(100)).await;

    let stopped = ctx.client.post_empty("/api/playback/stop").await.unwrap();
    stopped.assert_status(StatusCode::OK);
    assert_eq!(stopped.str_field("state"), "stopped");
    let stopped_at = stopped.f64_field("position_secs");
    assert!(stopped_at > 0.0);

    // Position holds while stopped
    tokio::time::sleep(Duration::from_millis(100)).await;
    let status = ctx.client.get("/api/playback").await.unwrap();
    assert_eq!(status.f64_field("position_secs"), stopped_at);

    let resumed = ctx.client.post_empty("/api/playback/play").await.unwrap();
    assert_eq!(resumed.str_field("state"), "playing");
    assert!(resumed.f64_field("position_secs") >= stopped_at);
}

#[test_context(TestContext)]
#[tokio::test]
async fn it_should_play_from_requested_offset(ctx: &TestContext) {
    generate(ctx, 48_000).await;

    let response = ctx
        .client
        .post("/api/playback/play", &json!({ "offset_secs": 1.5 }))
        .await
        .unwrap();

    response.assert_status(StatusCode::OK);
    assert_eq!(response.str_field("state"), "playing");
    assert!(response.f64_field("position_secs") >= 1.5);
}

#[test_context(TestContext)]
#[tokio::test]
async fn it_should_seek_while_stopped(ctx: &TestContext) {
    generate(ctx, 48_000).await;

    let response = ctx
        .client
        .post("/api/playback/seek", &json!({ "position_secs": 0.75 }))
        .await
        .unwrap();

    response.assert_status(StatusCode::OK);
    assert_eq!(response.str_field("state"), "stopped");
    assert_eq!(response.f64_field("position_secs"), 0.75);
}

#[test_context(TestContext)]
#[tokio::test]
async fn it_should_clamp_seek_to_take_duration(ctx: &TestContext) {
    generate(ctx, 24_000).await;

    let past_end = ctx
        .client
        .post("/api/playback/seek", &json!({ "position_secs": 30.0 }))
        .await
        .unwrap();
    assert_eq!(past_end.f64_field("position_secs"), 1.0);

    let negative = ctx
        .client
        .post("/api/playback/seek", &json!({ "position_secs": -4.0 }))
        .await
        .unwrap();
    assert_eq!(negative.f64_field("position_secs"), 0.0);
}

#[test_context(TestContext)]
#[tokio::test]
async fn it_should_keep_playing_after_seek(ctx: &TestContext) {
    generate(ctx, 48_000).await;
    ctx.client
        .post_empty("/api/playback/play")
        .await
        .unwrap()
        .assert_status(StatusCode::OK);

    let response = ctx
        .client
        .post("/api/playback/seek", &json!({ "position_secs": 1.0 }))
        .await
        .unwrap();

    response.assert_status(StatusCode::OK);
    assert_eq!(response.str_field("state"), "playing");
    assert!(response.f64_field("position_secs") >= 1.0);
}

#[test_context(TestContext)]
#[tokio::test]
async fn it_should_complete_at_end_of_take(ctx: &TestContext) {
    // 0.1 seconds of audio
    generate(ctx, 2_400).await;

    ctx.client
        .post_empty("/api/playback/play")
        .await
        .unwrap()
        .assert_status(StatusCode::OK);

    tokio::time::sleep(Duration::from_millis(400)).await;

    let status = ctx.client.get("/api/playback").await.unwrap();
    assert_eq!(status.str_field("state"), "completed");
    assert!((status.f64_field("position_secs") - 0.1).abs() < 1e-9);

    // Playing again after completion restarts from the beginning
    let replay = ctx.client.post_empty("/api/playback/play").await.unwrap();
    assert_eq!(replay.str_field("state"), "playing");
    assert!(replay.f64_field("position_secs") < 0.1);
}

#[test_context(TestContext)]
#[tokio::test]
async fn it_should_reset_transport_on_new_generation(ctx: &TestContext) {
    generate(ctx, 48_000).await;
    ctx.client
        .post_empty("/api/playback/play")
        .await
        .unwrap()
        .assert_status(StatusCode::OK);

    generate(ctx, 24_000).await;

    let status = ctx.client.get("/api/playback").await.unwrap();
    assert_eq!(status.str_field("state"), "idle");
    assert_eq!(status.f64_field("position_secs"), 0.0);
    assert!((status.f64_field("duration_secs") - 1.0).abs() < 1e-9);
}

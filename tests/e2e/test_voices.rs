use crate::e2e::helpers;

use helpers::TestContext;
use hyper::StatusCode;
use pretty_assertions::assert_eq;
use test_context::test_context;

#[test_context(TestContext)]
#[tokio::test]
async fn it_should_list_voice_profiles(ctx: &TestContext) {
    let response = ctx.client.get("/api/voices").await.unwrap();

    response.assert_status(StatusCode::OK);

    let voices = response.field("voices").as_array().unwrap();
    assert_eq!(voices.len(), 7);

    for voice in voices {
        for field in ["id", "label", "description", "voice"] {
            assert!(
                voice.get(field).and_then(|v| v.as_str()).is_some(),
                "Voice profile is missing '{}': {:?}",
                field,
                voice
            );
        }
    }
}

#[test_context(TestContext)]
#[tokio::test]
async fn it_should_keep_catalog_order_stable(ctx: &TestContext) {
    let first = ctx.client.get("/api/voices").await.unwrap();
    let second = ctx.client.get("/api/voices").await.unwrap();

    assert_eq!(first.body, second.body);
}

#[test_context(TestContext)]
#[tokio::test]
async fn it_should_not_expose_prompt_instructions(ctx: &TestContext) {
    let response = ctx.client.get("/api/voices").await.unwrap();

    let voices = response.field("voices").as_array().unwrap();
    assert!(voices
        .iter()
        .all(|voice| voice.get("prompt_instruction").is_none()));
}

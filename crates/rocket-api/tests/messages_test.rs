//! Integration tests for the message intake endpoint
//!
//! ```bash
//! cargo test -p rocket-api --test messages_test
//! ```

mod common;

use actix_web::{http::StatusCode, test};
use rocket_api::domain::MessageType;
use rocket_api::services::ReceiveOutcome;
use serde_json::Value;

use common::{channel, create_test_app, launch_message, launched_state, MockRocketService};

#[actix_web::test]
async fn test_post_message_accepted() {
    let mut service = MockRocketService::new();
    service
        .expect_receive_message()
        .withf(|event| {
            event.channel() == channel()
                && event.message_number() == 1
                && event.message_type() == MessageType::RocketLaunched
                && event.rocket_type().as_deref() == Some("Falcon-9")
        })
        .times(1)
        .returning(|_| {
            Ok(ReceiveOutcome::Accepted {
                state: launched_state(channel(), "Falcon-9", 500),
                snapshot_taken: false,
            })
        });

    let app = test::init_service(create_test_app(service)).await;
    let req = test::TestRequest::post()
        .uri("/messages")
        .set_json(launch_message(1))
        .to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), StatusCode::OK);
    assert!(resp.headers().contains_key("x-request-id"));
    let body = test::read_body(resp).await;
    assert!(body.is_empty());
}

#[actix_web::test]
async fn test_post_duplicate_message_is_ok() {
    let mut service = MockRocketService::new();
    service
        .expect_receive_message()
        .times(1)
        .returning(|_| Ok(ReceiveOutcome::Duplicate));

    let app = test::init_service(create_test_app(service)).await;
    let req = test::TestRequest::post()
        .uri("/messages")
        .set_json(launch_message(1))
        .to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), StatusCode::OK);
}

#[actix_web::test]
async fn test_post_message_number_zero_rejected() {
    let mut service = MockRocketService::new();
    service.expect_receive_message().times(0);

    let app = test::init_service(create_test_app(service)).await;
    let req = test::TestRequest::post()
        .uri("/messages")
        .set_json(launch_message(0))
        .to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["status"], 400);
    assert_eq!(
        body["errorCode"],
        "validation.error.rocket.message.should.be.positive"
    );
    assert_eq!(
        body["message"],
        "Message number must be a positive integer starting from 1"
    );
    assert!(body["traceId"].is_string());
}

#[actix_web::test]
async fn test_post_malformed_json_rejected() {
    let mut service = MockRocketService::new();
    service.expect_receive_message().times(0);

    let app = test::init_service(create_test_app(service)).await;
    let req = test::TestRequest::post()
        .uri("/messages")
        .insert_header(("content-type", "application/json"))
        .set_payload("{\"metadata\": ")
        .to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["errorCode"], "validation.error");
}

#[actix_web::test]
async fn test_post_unknown_message_type_rejected() {
    let mut service = MockRocketService::new();
    service.expect_receive_message().times(0);

    let mut message = launch_message(1);
    message["metadata"]["messageType"] = Value::from("RocketLanded");

    let app = test::init_service(create_test_app(service)).await;
    let req = test::TestRequest::post()
        .uri("/messages")
        .set_json(message)
        .to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["errorCode"], "validation.error");
}

#[actix_web::test]
async fn test_post_message_service_failure_is_opaque() {
    let mut service = MockRocketService::new();
    service
        .expect_receive_message()
        .times(1)
        .returning(|_| Err(anyhow::anyhow!("relation \"rocket_event\" does not exist")));

    let app = test::init_service(create_test_app(service)).await;
    let req = test::TestRequest::post()
        .uri("/messages")
        .set_json(launch_message(1))
        .to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), StatusCode::INTERNAL_SERVER_ERROR);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["status"], 500);
    assert_eq!(body["errorCode"], "internal.server.error");
    assert_eq!(body["message"], "Internal service error occurred");
    assert!(!body.to_string().contains("rocket_event"));
}

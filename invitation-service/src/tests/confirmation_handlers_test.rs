use axum::http::StatusCode;
use serde_json::json;
use std::sync::Arc;
use tower::ServiceExt;

use wedding_shared::test_utils::http_test_utils::{create_form_request, response_to_json};
use wedding_shared::test_utils::mock_transport::MockTransport;

use super::{create_test_app, remote_wedding, WEDDING_PATH};

fn stored_confirmation(id: &str, wedding_id: &str, name: &str) -> serde_json::Value {
    json!({
        "id": id,
        "weddingId": wedding_id,
        "guestName": name,
        "email": "guest@example.com",
        "phone": "",
        "isAttending": true,
        "numberOfGuests": 1,
        "submittedAt": "2025-10-01T12:00:00+00:00"
    })
}

#[tokio::test]
async fn test_session_confirmation_found_locally() {
    let transport = Arc::new(MockTransport::echoing_posts());
    transport.respond("GET", WEDDING_PATH, remote_wedding());
    let app = create_test_app(transport.clone());

    app.clone()
        .oneshot(create_form_request("GET", "/", None, None))
        .await
        .unwrap();
    let form = [("guestName", "Carla"), ("email", "carla@example.com")];
    app.clone()
        .oneshot(create_form_request("POST", "/rsvp", Some(&form[..]), None))
        .await
        .unwrap();

    let listed = response_to_json(
        app.clone()
            .oneshot(create_form_request("GET", "/confirmations", None, None))
            .await
            .unwrap(),
    )
    .await;
    let id = listed[0]["id"].as_str().unwrap().to_string();

    let response = app
        .oneshot(create_form_request(
            "GET",
            &format!("/confirmations/{}", id),
            None,
            None,
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(response_to_json(response).await["guestName"], "Carla");
    // Served from the session, the API was not asked
    assert!(transport
        .calls()
        .iter()
        .all(|c| !c.path.starts_with("/api/confirmations/")));
}

#[tokio::test]
async fn test_unknown_confirmation_consults_api() {
    let transport = Arc::new(MockTransport::new());
    transport.respond(
        "GET",
        "/api/confirmations/remote-7",
        stored_confirmation("remote-7", "wedding_001", "Dario"),
    );
    let app = create_test_app(transport);

    let response = app
        .clone()
        .oneshot(create_form_request("GET", "/confirmations/remote-7", None, None))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(response_to_json(response).await["guestName"], "Dario");

    // Remote lookups are not added to the session
    let listed = response_to_json(
        app.clone()
            .oneshot(create_form_request("GET", "/confirmations", None, None))
            .await
            .unwrap(),
    )
    .await;
    assert_eq!(listed, json!([]));

    let response = app
        .oneshot(create_form_request("GET", "/confirmations/missing", None, None))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    assert_eq!(
        response_to_json(response).await["message"],
        "Confirmation missing not found"
    );
}

#[tokio::test]
async fn test_wedding_confirmations_from_api() {
    let transport = Arc::new(MockTransport::new());
    transport.respond(
        "GET",
        "/api/weddings/wedding_001/confirmations",
        json!([
            stored_confirmation("c1", "wedding_001", "Ana"),
            stored_confirmation("c2", "wedding_001", "Beto"),
        ]),
    );
    let app = create_test_app(transport);

    let response = app
        .oneshot(create_form_request(
            "GET",
            "/weddings/wedding_001/confirmations",
            None,
            None,
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = response_to_json(response).await;
    assert_eq!(body.as_array().unwrap().len(), 2);
    assert_eq!(body[1]["guestName"], "Beto");
}

#[tokio::test]
async fn test_wedding_confirmations_fall_back_to_session() {
    // Nothing answers: mock wedding, local saves, local listing
    let app = create_test_app(Arc::new(MockTransport::new()));
    app.clone()
        .oneshot(create_form_request("GET", "/", None, None))
        .await
        .unwrap();
    let form = [("guestName", "Eva"), ("email", "eva@example.com")];
    app.clone()
        .oneshot(create_form_request("POST", "/rsvp", Some(&form[..]), None))
        .await
        .unwrap();

    let response = app
        .clone()
        .oneshot(create_form_request(
            "GET",
            "/weddings/wedding_001/confirmations",
            None,
            None,
        ))
        .await
        .unwrap();
    let body = response_to_json(response).await;
    assert_eq!(body.as_array().unwrap().len(), 1);
    assert_eq!(body[0]["guestName"], "Eva");

    let response = app
        .oneshot(create_form_request(
            "GET",
            "/weddings/wedding_999/confirmations",
            None,
            None,
        ))
        .await
        .unwrap();
    assert_eq!(response_to_json(response).await, json!([]));
}

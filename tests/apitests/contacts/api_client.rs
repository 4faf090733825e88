use std::time::Duration;
use serde_json::json;
use wiremock::{Mock, MockServer, ResponseTemplate};
use wiremock::matchers::{body_json, header, method, path};

use phonebook::{
    ContactId,
    HttpContactService,
    RemoteContactService,
};

use crate::collection_url;

#[tokio::test]
async fn test_list() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/contacts"))
        .and(header("Accept", "application/json"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            {"createdAt": "2025-11-25T10:00:00.000Z", "name": "Rosie Simpson", "number": "459-12-56", "id": "1"},
            {"createdAt": "2025-11-25T10:01:00.000Z", "name": "Hermione Kline", "number": "443-89-12", "id": "2"}
        ])))
        .expect(1)
        .mount(&server)
        .await;

    let service = HttpContactService::new(&collection_url(&server)).unwrap();
    let contacts = service.list().await.unwrap();

    assert_eq!(contacts.len(), 2);
    assert_eq!(contacts[0].id(), &ContactId::new("1"));
    assert_eq!(contacts[0].name(), "Rosie Simpson");
    assert_eq!(contacts[1].number(), "443-89-12");
}

#[tokio::test]
async fn test_create() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/contacts"))
        .and(body_json(json!({"name": "Bo", "number": "123-45-67-8"})))
        .respond_with(ResponseTemplate::new(201).set_body_json(json!(
            {"name": "Bo", "number": "123-45-67-8", "id": "31"}
        )))
        .expect(1)
        .mount(&server)
        .await;

    let service = HttpContactService::new(&collection_url(&server)).unwrap();
    let contact = service.create("Bo", "123-45-67-8").await.unwrap();

    assert_eq!(contact.id().as_str(), "31");
    assert_eq!(contact.name(), "Bo");
    assert_eq!(contact.number(), "123-45-67-8");
}

#[tokio::test]
async fn test_delete() {
    let server = MockServer::start().await;
    Mock::given(method("DELETE"))
        .and(path("/contacts/7"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!(
            {"name": "Ann", "number": "1", "id": "7"}
        )))
        .expect(1)
        .mount(&server)
        .await;

    let service = HttpContactService::new(&collection_url(&server)).unwrap();
    assert!(service.delete(&ContactId::from(7)).await.is_ok());
}

#[tokio::test]
async fn test_status_error() {
    let server = MockServer::start().await;
    Mock::given(method("DELETE"))
        .respond_with(ResponseTemplate::new(404).set_body_string("\"Not found\""))
        .mount(&server)
        .await;

    let service = HttpContactService::new(&collection_url(&server)).unwrap();
    let err = service.delete(&ContactId::new("missing")).await.unwrap_err();
    assert_eq!(err.to_string(), "Request failed with status code 404");
}

#[tokio::test]
async fn test_bad_body() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html>oops</html>"))
        .mount(&server)
        .await;

    let service = HttpContactService::new(&collection_url(&server)).unwrap();
    let err = service.list().await.unwrap_err();
    assert!(err.to_string().starts_with("Http error: deserialize json error"));
}

#[tokio::test]
async fn test_timeout() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200)
            .set_body_json(json!([]))
            .set_delay(Duration::from_secs(3)))
        .mount(&server)
        .await;

    let service = HttpContactService::with_timeout(
        &collection_url(&server),
        Some(Duration::from_millis(200))
    ).unwrap();

    let err = service.list().await.unwrap_err();
    assert!(err.to_string().starts_with("Http error:"));
}

#![allow(dead_code)]

use axum::{
    Router,
    body::Body,
    http::{HeaderMap, Request, StatusCode},
};
use pagefilter::{
    PersonService, PersonStore, SeaOrmStore, db,
    person::{PersonDto, Sex},
    routes,
};
use sea_orm::{DatabaseConnection, DbErr};
use serde_json::Value;
use tower::ServiceExt;

pub async fn setup_test_db() -> Result<DatabaseConnection, DbErr> {
    let db = db::connect("sqlite::memory:").await?;
    db::ensure_schema(&db).await?;
    Ok(db)
}

pub fn setup_test_app(db: DatabaseConnection) -> Router {
    routes::router(PersonService::new(SeaOrmStore::new(db)))
}

pub fn person(passport: i32, name: &str, surname: &str, age: i32, sex: Sex) -> PersonDto {
    PersonDto {
        number_passport: passport,
        name: name.to_string(),
        surname: surname.to_string(),
        age,
        sex,
    }
}

pub async fn seed(db: &DatabaseConnection, people: Vec<PersonDto>) {
    let store = SeaOrmStore::new(db.clone());
    for dto in people {
        store.insert(dto).await.expect("Failed to seed person");
    }
}

/// Database and app already holding `people`.
pub async fn seeded_app(people: Vec<PersonDto>) -> Router {
    let db = setup_test_db().await.expect("Failed to setup test database");
    seed(&db, people).await;
    setup_test_app(db)
}

/// Eight people with distinct passports, mixed ages and both sexes.
pub fn sample_people() -> Vec<PersonDto> {
    vec![
        person(5, "Ivan", "Petrov", 20, Sex::Male),
        person(3, "Anna", "Petrova", 25, Sex::Female),
        person(8, "Ivan", "Sidorov", 30, Sex::Male),
        person(1, "Olga", "Sidorova", 45, Sex::Female),
        person(7, "Petr", "Ivanov", 18, Sex::Male),
        person(2, "Maria", "Ivanova", 33, Sex::Female),
        person(6, "Ivan", "Kuznetsov", 25, Sex::Male),
        person(4, "Elena", "Kuznetsova", 60, Sex::Female),
    ]
}

pub async fn send(app: Router, request: Request<Body>) -> (StatusCode, HeaderMap, Vec<u8>) {
    let response = app.oneshot(request).await.unwrap();
    let status = response.status();
    let headers = response.headers().clone();
    let body = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    (status, headers, body.to_vec())
}

pub async fn get(app: Router, uri: &str) -> (StatusCode, HeaderMap, Value) {
    let request = Request::builder()
        .method("GET")
        .uri(uri)
        .body(Body::empty())
        .unwrap();
    let (status, headers, body) = send(app, request).await;
    let json = serde_json::from_slice(&body).unwrap_or(Value::Null);
    (status, headers, json)
}

pub async fn post_json(app: Router, uri: &str, payload: &Value) -> (StatusCode, Value) {
    let request = Request::builder()
        .method("POST")
        .uri(uri)
        .header("content-type", "application/json")
        .body(Body::from(serde_json::to_string(payload).unwrap()))
        .unwrap();
    let (status, _, body) = send(app, request).await;
    let json = serde_json::from_slice(&body).unwrap_or(Value::Null);
    (status, json)
}

/// Passport numbers of the `persons` array, in response order.
pub fn passports(page: &Value) -> Vec<i64> {
    page["persons"]
        .as_array()
        .expect("persons array")
        .iter()
        .map(|p| p["numberPassport"].as_i64().unwrap())
        .collect()
}

pub fn content_range(headers: &HeaderMap) -> &str {
    headers
        .get("Content-Range")
        .expect("Content-Range header")
        .to_str()
        .unwrap()
}

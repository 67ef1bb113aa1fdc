use axum::http::StatusCode;
use serde_json::Value;

mod common;
use common::{get, passports, sample_people, seeded_app};

fn field<'a>(page: &'a Value, name: &str) -> Vec<&'a Value> {
    page["persons"]
        .as_array()
        .unwrap()
        .iter()
        .map(|p| &p[name])
        .collect()
}

#[tokio::test]
async fn test_default_sort_is_passport_ascending() {
    let app = seeded_app(sample_people()).await;
    let (_, _, page) = get(app, "/person/getAllDto").await;
    assert_eq!(passports(&page), vec![1, 2, 3, 4, 5, 6, 7, 8]);
}

#[tokio::test]
async fn test_sort_by_age_descending() {
    let app = seeded_app(sample_people()).await;
    let (status, _, page) = get(app, "/person/getAllDto?sortField=age&sortDirection=desc").await;
    assert_eq!(status, StatusCode::OK);

    let ages: Vec<i64> = field(&page, "age").iter().map(|v| v.as_i64().unwrap()).collect();
    assert_eq!(ages, vec![60, 45, 33, 30, 25, 25, 20, 18]);
}

#[tokio::test]
async fn test_sort_by_text_fields() {
    let app = seeded_app(sample_people()).await;
    let (_, _, page) = get(app, "/person/getAllDto?sortField=surname").await;
    let surnames: Vec<&str> = field(&page, "surname").iter().map(|v| v.as_str().unwrap()).collect();
    let mut sorted = surnames.clone();
    sorted.sort_unstable();
    assert_eq!(surnames, sorted);

    let app = seeded_app(sample_people()).await;
    let (_, _, page) = get(app, "/person/getAllDto?sortField=sex&sortDirection=asc").await;
    let sexes: Vec<&str> = field(&page, "sex").iter().map(|v| v.as_str().unwrap()).collect();
    assert_eq!(sexes[..4], ["Female"; 4]);
    assert_eq!(sexes[4..], ["Male"; 4]);
}

#[tokio::test]
async fn test_direction_is_case_insensitive() {
    for direction in ["ASC", "asc", "Asc"] {
        let app = seeded_app(sample_people()).await;
        let (status, _, page) =
            get(app, &format!("/person/getAllDto?sortDirection={direction}")).await;
        assert_eq!(status, StatusCode::OK, "{direction}");
        assert_eq!(passports(&page), vec![1, 2, 3, 4, 5, 6, 7, 8]);
    }

    let app = seeded_app(sample_people()).await;
    let (_, _, page) = get(app, "/person/getAllDto?sortDirection=DESC").await;
    assert_eq!(passports(&page), vec![8, 7, 6, 5, 4, 3, 2, 1]);
}

#[tokio::test]
async fn test_unknown_direction_is_rejected() {
    let app = seeded_app(sample_people()).await;
    let (status, _, body) = get(app, "/person/getAllDtoFil?sortDirection=ascending").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(
        body["error"],
        "Invalid sort direction 'ascending': expected 'asc' or 'desc'"
    );
}

#[tokio::test]
async fn test_unknown_field_is_rejected() {
    for sort_field in ["height", "id", "Age", "number_passport"] {
        let app = seeded_app(sample_people()).await;
        let (status, _, body) =
            get(app, &format!("/person/getAllDtoFil?sortField={sort_field}")).await;
        assert_eq!(status, StatusCode::BAD_REQUEST, "{sort_field}");
        assert!(
            body["error"]
                .as_str()
                .unwrap()
                .contains(&format!("'{sort_field}'")),
            "{sort_field}"
        );
    }
}

#[tokio::test]
async fn test_tied_sort_values_are_ordered_consistently() {
    let db = common::setup_test_db().await.unwrap();
    common::seed(&db, sample_people()).await;

    let uri = "/person/getAllDto?sortField=name&size=3";
    let mut orders = Vec::new();
    for page in 0..3 {
        let mut run = Vec::new();
        for _ in 0..2 {
            let app = common::setup_test_app(db.clone());
            let (_, _, body) = get(app, &format!("{uri}&page={page}")).await;
            run.push(passports(&body));
        }
        assert_eq!(run[0], run[1]);
        orders.extend(run.swap_remove(0));
    }

    orders.sort_unstable();
    assert_eq!(orders, vec![1, 2, 3, 4, 5, 6, 7, 8]);
}

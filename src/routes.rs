use axum::{
    Json, Router,
    extract::{
        Path, Query, State,
        rejection::{JsonRejection, PathRejection, QueryRejection},
    },
    http::{HeaderMap, StatusCode},
    routing::get,
};
use utoipa::OpenApi;
use utoipa_axum::{router::OpenApiRouter, routes};
use utoipa_scalar::{Scalar, Servable};

use crate::errors::{QueryError, QueryResult};
use crate::models::{PageParams, PersonQuery};
use crate::openapi::ApiDoc;
use crate::pagination::{PageResult, calculate_content_range};
use crate::person::{self, PersonDto};
use crate::service::{Page, PersonService};

const RESOURCE_NAME_PLURAL: &str = "persons";

/// Builds the application router: person endpoints, the OpenAPI document at
/// `/api-docs/openapi.json` and the Scalar UI at `/docs`.
pub fn router(service: PersonService) -> Router {
    let (router, api) = OpenApiRouter::with_openapi(ApiDoc::openapi())
        .routes(routes!(create_person))
        .routes(routes!(create_count))
        .routes(routes!(get_all))
        .routes(routes!(get_all_pages))
        .routes(routes!(get_all_dto))
        .routes(routes!(get_all_dto_filtered))
        .with_state(service)
        .split_for_parts();

    let document = api.clone();
    router
        .route(
            "/api-docs/openapi.json",
            get(move || async move { Json(document) }),
        )
        .merge(Scalar::with_url("/docs", api))
}

/// Extractor rejections become `InvalidPayload` so every error shares one body shape.
fn decoded<T, R: std::fmt::Display>(input: Result<T, R>) -> QueryResult<T> {
    input.map_err(|rejection| QueryError::InvalidPayload(rejection.to_string()))
}

fn paged_response<T>(page: Page<T>) -> (HeaderMap, Json<PageResult<T>>) {
    let headers = calculate_content_range(
        &page.request,
        page.result.records.len(),
        page.result.total_matches,
        RESOURCE_NAME_PLURAL,
    );
    (headers, Json(page.result))
}

#[utoipa::path(
    post,
    path = "/person",
    request_body = PersonDto,
    responses(
        (status = StatusCode::CREATED, description = "Person stored", body = PersonDto),
        (status = StatusCode::BAD_REQUEST, description = "Malformed person payload"),
        (status = StatusCode::INTERNAL_SERVER_ERROR, description = "Internal Server Error")
    ),
    operation_id = "create_person",
    summary = "Create one person",
    tag = "person"
)]
pub async fn create_person(
    State(service): State<PersonService>,
    payload: Result<Json<PersonDto>, JsonRejection>,
) -> QueryResult<(StatusCode, Json<PersonDto>)> {
    let Json(person) = decoded(payload)?;
    let created = service.create_person(person).await?;
    Ok((StatusCode::CREATED, Json(created.into())))
}

#[utoipa::path(
    get,
    path = "/person/create-count/{count}",
    params(("count" = i64, Path, description = "Number of random persons to generate, at least 0")),
    responses(
        (status = StatusCode::OK, description = "Confirmation message", body = String),
        (status = StatusCode::BAD_REQUEST, description = "Negative or non-numeric count"),
        (status = StatusCode::INTERNAL_SERVER_ERROR, description = "Internal Server Error")
    ),
    operation_id = "create_random_persons",
    summary = "Generate random persons",
    description = "Stores `count` persons with random five-letter names, eight-letter surnames, ages below 100 and passports below 100000. Each person is a separate insert.",
    tag = "person"
)]
pub async fn create_count(
    State(service): State<PersonService>,
    count: Result<Path<i64>, PathRejection>,
) -> QueryResult<String> {
    let Path(count) = decoded(count)?;
    service.create_random_persons(count).await
}

#[utoipa::path(
    get,
    path = "/person/getAll",
    responses(
        (status = StatusCode::OK, description = "Every stored person", body = [PersonDto]),
        (status = StatusCode::INTERNAL_SERVER_ERROR, description = "Internal Server Error")
    ),
    operation_id = "get_all_persons",
    summary = "List all persons, unpaged",
    tag = "person"
)]
pub async fn get_all(State(service): State<PersonService>) -> QueryResult<Json<Vec<PersonDto>>> {
    Ok(Json(service.find_all_persons().await?))
}

#[utoipa::path(
    get,
    path = "/person/getAllPages",
    params(PageParams),
    responses(
        (status = StatusCode::OK, description = "One page of stored records, ids included", body = PageResult<person::Model>),
        (status = StatusCode::BAD_REQUEST, description = "Invalid sort or page parameters"),
        (status = StatusCode::INTERNAL_SERVER_ERROR, description = "Internal Server Error")
    ),
    operation_id = "get_all_pages",
    summary = "Page through stored records",
    tag = "person"
)]
pub async fn get_all_pages(
    State(service): State<PersonService>,
    params: Result<Query<PageParams>, QueryRejection>,
) -> QueryResult<(HeaderMap, Json<PageResult<person::Model>>)> {
    let Query(params) = decoded(params)?;
    Ok(paged_response(service.find_page_raw(&params).await?))
}

#[utoipa::path(
    get,
    path = "/person/getAllDto",
    params(PageParams),
    responses(
        (status = StatusCode::OK, description = "One page of persons", body = PageResult<PersonDto>),
        (status = StatusCode::BAD_REQUEST, description = "Invalid sort or page parameters"),
        (status = StatusCode::INTERNAL_SERVER_ERROR, description = "Internal Server Error")
    ),
    operation_id = "get_all_dto",
    summary = "Page through persons",
    tag = "person"
)]
pub async fn get_all_dto(
    State(service): State<PersonService>,
    params: Result<Query<PageParams>, QueryRejection>,
) -> QueryResult<(HeaderMap, Json<PageResult<PersonDto>>)> {
    let Query(params) = decoded(params)?;
    Ok(paged_response(service.find_page_dto(&params).await?))
}

#[utoipa::path(
    get,
    path = "/person/getAllDtoFil",
    params(PersonQuery),
    responses(
        (status = StatusCode::OK, description = "One page of matching persons", body = PageResult<PersonDto>),
        (status = StatusCode::BAD_REQUEST, description = "Invalid sort, page or filter parameters"),
        (status = StatusCode::INTERNAL_SERVER_ERROR, description = "Internal Server Error")
    ),
    operation_id = "get_all_dto_filtered",
    summary = "Filter, sort and page persons",
    description = "Every filter is optional; the ones given are combined with AND. \
        `startAge` alone is a lower bound, `startAge` with `finishAge` an inclusive range. \
        `finishAge` without `startAge` is ignored.",
    tag = "person"
)]
pub async fn get_all_dto_filtered(
    State(service): State<PersonService>,
    query: Result<Query<PersonQuery>, QueryRejection>,
) -> QueryResult<(HeaderMap, Json<PageResult<PersonDto>>)> {
    let Query(query) = decoded(query)?;
    Ok(paged_response(service.find_filtered(&query).await?))
}

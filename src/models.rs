use serde::Deserialize;
use utoipa::IntoParams;

use crate::errors::QueryResult;
use crate::filter::FilterCriteria;
use crate::pagination::{DEFAULT_PAGE, DEFAULT_PAGE_SIZE, PageRequest};
use crate::person::Sex;
use crate::sort::{DEFAULT_SORT_DIRECTION, DEFAULT_SORT_FIELD, SortSpec};

/// Paging and sorting parameters shared by every list endpoint.
///
/// # Example
/// ```text
/// GET /person/getAllDto?page=2&size=20&sortField=age&sortDirection=desc
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, IntoParams)]
#[serde(rename_all = "camelCase", default)]
#[into_params(parameter_in = Query)]
pub struct PageParams {
    /// Zero-based page index.
    #[param(example = 0)]
    pub page: i64,
    /// Records per page, at least 1.
    #[param(example = 10)]
    pub size: i64,
    /// One of `numberPassport`, `name`, `surname`, `age`, `sex`.
    #[param(example = "numberPassport")]
    pub sort_field: String,
    /// `asc` or `desc`, any case.
    #[param(example = "asc")]
    pub sort_direction: String,
}

impl Default for PageParams {
    fn default() -> Self {
        Self {
            page: DEFAULT_PAGE,
            size: DEFAULT_PAGE_SIZE,
            sort_field: DEFAULT_SORT_FIELD.wire_name().to_string(),
            sort_direction: DEFAULT_SORT_DIRECTION.to_string(),
        }
    }
}

impl PageParams {
    /// # Errors
    ///
    /// See [`SortSpec::validate`].
    pub fn sort_spec(&self) -> QueryResult<SortSpec> {
        SortSpec::validate(&self.sort_field, &self.sort_direction)
    }

    /// # Errors
    ///
    /// See [`PageRequest::new`].
    pub fn page_request(&self) -> QueryResult<PageRequest> {
        PageRequest::new(self.page, self.size)
    }
}

/// Query parameters of the filtered listing: paging, sorting and the
/// optional filters. Every filter left out of the query string is not
/// applied.
///
/// # Example
/// ```text
/// GET /person/getAllDtoFil?name=Ivan&startAge=20&finishAge=30&sortField=age
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, IntoParams)]
#[serde(rename_all = "camelCase", default)]
#[into_params(parameter_in = Query)]
pub struct PersonQuery {
    /// Zero-based page index (default 0).
    pub page: Option<i64>,
    /// Records per page (default 10).
    pub size: Option<i64>,
    /// Sort field (default `numberPassport`).
    pub sort_field: Option<String>,
    /// Sort direction (default `asc`).
    pub sort_direction: Option<String>,
    /// Exact passport number.
    pub number_passport: Option<i32>,
    /// Exact given name.
    pub name: Option<String>,
    /// Exact family name.
    pub surname: Option<String>,
    /// Exact age.
    pub age: Option<i32>,
    /// `Male` or `Female`.
    pub sex: Option<Sex>,
    /// Inclusive lower age bound.
    pub start_age: Option<i32>,
    /// Inclusive upper age bound; only applied together with `startAge`.
    pub finish_age: Option<i32>,
}

impl PersonQuery {
    /// Paging parameters with defaults filled in.
    #[must_use]
    pub fn paging(&self) -> PageParams {
        let defaults = PageParams::default();
        PageParams {
            page: self.page.unwrap_or(defaults.page),
            size: self.size.unwrap_or(defaults.size),
            sort_field: self.sort_field.clone().unwrap_or(defaults.sort_field),
            sort_direction: self
                .sort_direction
                .clone()
                .unwrap_or(defaults.sort_direction),
        }
    }

    #[must_use]
    pub fn criteria(&self) -> FilterCriteria {
        FilterCriteria {
            number_passport: self.number_passport,
            name: self.name.clone(),
            surname: self.surname.clone(),
            age: self.age,
            sex: self.sex,
            start_age: self.start_age,
            finish_age: self.finish_age,
        }
    }
}

//! Request orchestration: validate, build the predicate, query the store,
//! assemble the page. Handlers only decode input and pick an output shape.

use std::sync::Arc;

use tracing::{debug, info, instrument};

use crate::errors::{QueryError, QueryResult};
use crate::filter::{Predicate, build_predicate};
use crate::models::{PageParams, PersonQuery};
use crate::pagination::{PageRequest, PageResult};
use crate::person::{self, PersonDto, Sex};
use crate::store::PersonStore;

const GENERATED_NAME_LEN: usize = 5;
const GENERATED_SURNAME_LEN: usize = 8;
const GENERATED_MAX_AGE: i32 = 100;
const GENERATED_MAX_PASSPORT: i32 = 100_000;

/// A page of records together with the request that produced it.
#[derive(Debug)]
pub struct Page<T> {
    pub result: PageResult<T>,
    pub request: PageRequest,
}

#[derive(Clone)]
pub struct PersonService {
    store: Arc<dyn PersonStore>,
}

impl PersonService {
    #[must_use]
    pub fn new(store: impl PersonStore + 'static) -> Self {
        Self {
            store: Arc::new(store),
        }
    }

    /// # Errors
    ///
    /// `QueryExecution` if the store rejects the insert.
    #[instrument(skip(self, person), fields(passport = person.number_passport))]
    pub async fn create_person(&self, person: PersonDto) -> QueryResult<person::Model> {
        let created = self.store.insert(person).await?;
        debug!(id = %created.id, "Stored person");
        Ok(created)
    }

    /// Stores `count` generated persons and returns the confirmation message.
    ///
    /// # Errors
    ///
    /// `InvalidPayload` for a negative count, `QueryExecution` if an insert
    /// fails. Records inserted before the failure are kept.
    #[instrument(skip(self))]
    pub async fn create_random_persons(&self, count: i64) -> QueryResult<String> {
        if count < 0 {
            return Err(QueryError::InvalidPayload(format!(
                "count must not be negative, got {count}"
            )));
        }

        for _ in 0..count {
            self.store.insert(random_person()).await?;
        }

        info!(count, "Generated persons");
        Ok(format!("Successfully created: {count} records"))
    }

    /// # Errors
    ///
    /// `QueryExecution` if the store cannot be read.
    #[instrument(skip(self))]
    pub async fn find_all_persons(&self) -> QueryResult<Vec<PersonDto>> {
        let records = self.store.find_all().await?;
        Ok(records.into_iter().map(PersonDto::from).collect())
    }

    /// Unfiltered page of stored records, id included.
    ///
    /// # Errors
    ///
    /// Validation errors for bad paging or sort input, `QueryExecution` on
    /// store failure.
    pub async fn find_page_raw(&self, params: &PageParams) -> QueryResult<Page<person::Model>> {
        self.find_page(&Predicate::all(), params).await
    }

    /// Unfiltered page of person DTOs.
    ///
    /// # Errors
    ///
    /// See [`PersonService::find_page_raw`].
    pub async fn find_page_dto(&self, params: &PageParams) -> QueryResult<Page<PersonDto>> {
        self.find_page(&Predicate::all(), params).await
    }

    /// Filtered, sorted page of person DTOs.
    ///
    /// # Errors
    ///
    /// See [`PersonService::find_page_raw`].
    #[instrument(skip(self), fields(filters = tracing::field::Empty))]
    pub async fn find_filtered(&self, query: &PersonQuery) -> QueryResult<Page<PersonDto>> {
        let predicate = build_predicate(&query.criteria());
        tracing::Span::current().record("filters", predicate.clauses().len());
        self.find_page(&predicate, &query.paging()).await
    }

    #[instrument(skip(self, predicate, params), fields(page = params.page, size = params.size))]
    async fn find_page<T>(&self, predicate: &Predicate, params: &PageParams) -> QueryResult<Page<T>>
    where
        T: From<person::Model>,
    {
        let sort = params.sort_spec()?;
        let request = params.page_request()?;

        let (records, total) = self.store.find_page(predicate, &sort, &request).await?;
        debug!(returned = records.len(), total, "Fetched page");

        Ok(Page {
            result: PageResult::assemble(records, total, &request),
            request,
        })
    }
}

fn random_person() -> PersonDto {
    PersonDto {
        number_passport: rand::random_range(0..GENERATED_MAX_PASSPORT),
        name: random_name(GENERATED_NAME_LEN),
        surname: random_name(GENERATED_SURNAME_LEN),
        age: rand::random_range(0..GENERATED_MAX_AGE),
        sex: Sex::Male,
    }
}

/// Capitalized run of random ASCII letters.
fn random_name(len: usize) -> String {
    (0..len)
        .map(|i| {
            let letter = char::from(rand::random_range(b'a'..=b'z'));
            if i == 0 {
                letter.to_ascii_uppercase()
            } else {
                letter
            }
        })
        .collect()
}

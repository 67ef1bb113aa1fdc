//! Backing stores for person records.
//!
//! [`PersonStore::find_page`] is the query executor: it applies a predicate,
//! orders the matches, cuts out one page window and reports how many records
//! matched in total. Two backends are provided:
//!
//! - [`SeaOrmStore`] runs the query in the database. Ties on the sort field
//!   are broken by primary key so that paging is deterministic.
//! - [`InMemoryStore`] keeps records in insertion order and sorts stably, so
//!   ties keep insertion order.

use std::sync::Arc;

use async_trait::async_trait;
use sea_orm::{
    ActiveModelTrait, DatabaseConnection, EntityTrait, PaginatorTrait, QueryFilter, QueryOrder,
    QuerySelect,
};
use tokio::sync::RwLock;

use crate::errors::QueryResult;
use crate::filter::Predicate;
use crate::pagination::PageRequest;
use crate::person::{self, PersonDto};
use crate::sort::SortSpec;

/// Largest OFFSET or LIMIT a SQL driver accepts.
const MAX_BOUND: u64 = i64::MAX.unsigned_abs();

#[async_trait]
pub trait PersonStore: Send + Sync {
    /// Returns the records of one page window plus the total number of matches.
    ///
    /// # Errors
    ///
    /// `QueryExecution` if the store cannot evaluate the query.
    async fn find_page(
        &self,
        predicate: &Predicate,
        sort: &SortSpec,
        page: &PageRequest,
    ) -> QueryResult<(Vec<person::Model>, u64)>;

    /// Every stored record, unfiltered and unpaged.
    async fn find_all(&self) -> QueryResult<Vec<person::Model>>;

    /// Stores one record and returns it with its assigned id.
    async fn insert(&self, person: PersonDto) -> QueryResult<person::Model>;
}

#[derive(Clone)]
pub struct SeaOrmStore {
    db: DatabaseConnection,
}

impl SeaOrmStore {
    #[must_use]
    pub const fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

#[async_trait]
impl PersonStore for SeaOrmStore {
    async fn find_page(
        &self,
        predicate: &Predicate,
        sort: &SortSpec,
        page: &PageRequest,
    ) -> QueryResult<(Vec<person::Model>, u64)> {
        let condition = predicate.to_condition();

        let total =
            PaginatorTrait::count(person::Entity::find().filter(condition.clone()), &self.db).await?;

        // Drivers bind OFFSET and LIMIT as i64; a window past the matches is empty anyway
        let offset = page.offset();
        if offset >= total || offset > MAX_BOUND {
            return Ok((Vec::new(), total));
        }

        let records = person::Entity::find()
            .filter(condition)
            .order_by(sort.field.column(), sort.direction.into())
            .order_by_asc(person::Column::Id)
            .offset(offset)
            .limit(page.size().min(MAX_BOUND))
            .all(&self.db)
            .await?;

        Ok((records, total))
    }

    async fn find_all(&self) -> QueryResult<Vec<person::Model>> {
        Ok(person::Entity::find().all(&self.db).await?)
    }

    async fn insert(&self, person: PersonDto) -> QueryResult<person::Model> {
        let active_model: person::ActiveModel = person.into();
        Ok(active_model.insert(&self.db).await?)
    }
}

/// Records held in process, in insertion order.
#[derive(Clone, Default)]
pub struct InMemoryStore {
    records: Arc<RwLock<Vec<person::Model>>>,
}

impl InMemoryStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn len(&self) -> usize {
        self.records.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.records.read().await.is_empty()
    }
}

#[async_trait]
impl PersonStore for InMemoryStore {
    async fn find_page(
        &self,
        predicate: &Predicate,
        sort: &SortSpec,
        page: &PageRequest,
    ) -> QueryResult<(Vec<person::Model>, u64)> {
        let records = self.records.read().await;

        let mut matches: Vec<&person::Model> =
            records.iter().filter(|record| predicate.matches(record)).collect();
        // sort_by is stable: ties stay in insertion order
        matches.sort_by(|a, b| sort.compare(a, b));

        let total = matches.len() as u64;
        let offset = usize::try_from(page.offset()).unwrap_or(usize::MAX);
        let size = usize::try_from(page.size()).unwrap_or(usize::MAX);

        let window = matches
            .into_iter()
            .skip(offset)
            .take(size)
            .cloned()
            .collect();

        Ok((window, total))
    }

    async fn find_all(&self) -> QueryResult<Vec<person::Model>> {
        Ok(self.records.read().await.clone())
    }

    async fn insert(&self, person: PersonDto) -> QueryResult<person::Model> {
        let model = person.into_model();
        self.records.write().await.push(model.clone());
        Ok(model)
    }
}

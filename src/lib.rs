//! # pagefilter
//!
//! Person records over HTTP with optional field filters, an age range,
//! validated sorting and pagination.
//!
//! A request flows through four steps:
//!
//! 1. [`models::PersonQuery`] decodes the query string into filter criteria and
//!    paging parameters.
//! 2. [`filter::build_predicate`] turns the criteria into a [`filter::Predicate`];
//!    [`sort::SortSpec::validate`] and [`pagination::PageRequest::new`] reject bad
//!    sort and page input before anything is read.
//! 3. A [`store::PersonStore`] evaluates predicate, order and page window.
//! 4. [`pagination::PageResult::assemble`] builds the response page.
//!
//! ```rust,ignore
//! let db = pagefilter::db::connect("sqlite::memory:").await?;
//! pagefilter::db::ensure_schema(&db).await?;
//! let app = pagefilter::routes::router(PersonService::new(SeaOrmStore::new(db)));
//! ```

pub mod config;
pub mod db;
pub mod errors;
pub mod filter;
pub mod models;
pub mod openapi;
pub mod pagination;
pub mod person;
pub mod routes;
pub mod service;
pub mod sort;
pub mod store;

pub use config::ServerConfig;
pub use errors::{QueryError, QueryResult};
pub use service::PersonService;
pub use store::{InMemoryStore, PersonStore, SeaOrmStore};

/// Installs the global `tracing` subscriber. `RUST_LOG` takes precedence over
/// `level`.
pub fn init_logging(level: &str) {
    use tracing_subscriber::{EnvFilter, fmt, prelude::*};

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("pagefilter={level},tower_http=debug")));

    tracing_subscriber::registry()
        .with(fmt::layer())
        .with(filter)
        .init();
}

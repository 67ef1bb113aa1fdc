use std::str::FromStr;

use sea_orm::sea_query::Order;

use crate::errors::{QueryError, QueryResult};
use crate::person::PersonField;

pub const DEFAULT_SORT_FIELD: PersonField = PersonField::NumberPassport;
pub const DEFAULT_SORT_DIRECTION: &str = "asc";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortDirection {
    #[default]
    Ascending,
    Descending,
}

impl FromStr for SortDirection {
    type Err = QueryError;

    /// Accepts `asc`/`desc` in any case; nothing else.
    fn from_str(text: &str) -> Result<Self, Self::Err> {
        if text.eq_ignore_ascii_case("asc") {
            Ok(Self::Ascending)
        } else if text.eq_ignore_ascii_case("desc") {
            Ok(Self::Descending)
        } else {
            Err(QueryError::InvalidSortDirection(text.to_string()))
        }
    }
}

impl From<SortDirection> for Order {
    fn from(direction: SortDirection) -> Self {
        match direction {
            SortDirection::Ascending => Self::Asc,
            SortDirection::Descending => Self::Desc,
        }
    }
}

/// Validated sort field and direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SortSpec {
    pub field: PersonField,
    pub direction: SortDirection,
}

impl Default for SortSpec {
    fn default() -> Self {
        Self {
            field: DEFAULT_SORT_FIELD,
            direction: SortDirection::Ascending,
        }
    }
}

impl SortSpec {
    /// Validates caller-supplied sort parameters.
    ///
    /// # Errors
    ///
    /// - `InvalidSortDirection` when `direction` is not `asc`/`desc` (any case).
    /// - `InvalidSortField` when `field_name` is not a sortable person field.
    pub fn validate(field_name: &str, direction: &str) -> QueryResult<Self> {
        let direction = direction.parse::<SortDirection>()?;
        let field = PersonField::from_wire_name(field_name)
            .ok_or_else(|| QueryError::InvalidSortField(field_name.to_string()))?;

        Ok(Self { field, direction })
    }

    /// Orders `a` and `b` by field, then direction. Ties compare equal, so a stable sort
    /// keeps their existing order.
    #[must_use]
    pub fn compare(
        &self,
        a: &crate::person::Model,
        b: &crate::person::Model,
    ) -> std::cmp::Ordering {
        let ordering = self.field.compare(a, b);
        match self.direction {
            SortDirection::Ascending => ordering,
            SortDirection::Descending => ordering.reverse(),
        }
    }
}

//! # Filtering
//!
//! Turns the caller's sparse [`FilterCriteria`] into a [`Predicate`]: a list of
//! independent [`Clause`]s that are all required to hold. A predicate can be
//! checked against a record in memory ([`Predicate::matches`]) or translated
//! into a sea-orm [`Condition`] ([`Predicate::to_condition`]), in which case
//! every value is bound as a query parameter.
//!
//! ## Age range
//!
//! | `start_age` | `finish_age` | clause |
//! |-------------|--------------|--------|
//! | set | unset | `age >= start_age` |
//! | set | set | `start_age <= age <= finish_age` |
//! | unset | any | none |
//!
//! A lone `finish_age` is ignored.

use sea_orm::{ColumnTrait, Condition, Value, sea_query::SimpleExpr};

use crate::person::{Model, PersonField, Sex};

/// Optional filter inputs. `None` means "do not filter on this field".
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FilterCriteria {
    pub number_passport: Option<i32>,
    pub name: Option<String>,
    pub surname: Option<String>,
    pub age: Option<i32>,
    pub sex: Option<Sex>,
    pub start_age: Option<i32>,
    pub finish_age: Option<i32>,
}

/// A typed value compared against a person field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldValue {
    Int(i32),
    Text(String),
    Sex(Sex),
}

impl FieldValue {
    /// Whether `person` holds exactly this value in `field`. A value of the
    /// wrong kind for the field never matches.
    #[must_use]
    pub fn is_held_by(&self, field: PersonField, person: &Model) -> bool {
        match (field, self) {
            (PersonField::NumberPassport, Self::Int(value)) => person.number_passport == *value,
            (PersonField::Age, Self::Int(value)) => person.age == *value,
            (PersonField::Name, Self::Text(value)) => person.name == *value,
            (PersonField::Surname, Self::Text(value)) => person.surname == *value,
            (PersonField::Sex, Self::Sex(value)) => person.sex == *value,
            _ => false,
        }
    }
}

/// Reads an integer field; `None` for text and categorical fields.
const fn int_field(field: PersonField, person: &Model) -> Option<i32> {
    match field {
        PersonField::NumberPassport => Some(person.number_passport),
        PersonField::Age => Some(person.age),
        PersonField::Name | PersonField::Surname | PersonField::Sex => None,
    }
}

impl From<FieldValue> for Value {
    fn from(value: FieldValue) -> Self {
        match value {
            FieldValue::Int(int) => int.into(),
            FieldValue::Text(text) => text.into(),
            FieldValue::Sex(sex) => sex.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Clause {
    Equals(PersonField, FieldValue),
    /// Inclusive lower bound on an integer field.
    AtLeast(PersonField, i32),
    /// Inclusive range on an integer field.
    Between(PersonField, i32, i32),
}

impl Clause {
    #[must_use]
    pub fn matches(&self, person: &Model) -> bool {
        match self {
            Self::Equals(field, expected) => expected.is_held_by(*field, person),
            Self::AtLeast(field, lower) => {
                int_field(*field, person).is_some_and(|value| value >= *lower)
            }
            Self::Between(field, lower, upper) => {
                int_field(*field, person).is_some_and(|value| (*lower..=*upper).contains(&value))
            }
        }
    }

    fn to_expr(&self) -> SimpleExpr {
        match self {
            Self::Equals(field, value) => field.column().eq(value.clone()),
            Self::AtLeast(field, lower) => field.column().gte(*lower),
            Self::Between(field, lower, upper) => field.column().between(*lower, *upper),
        }
    }
}

/// Conjunction of clauses. With no clauses it matches every record.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Predicate {
    clauses: Vec<Clause>,
}

impl Predicate {
    /// The identity predicate.
    #[must_use]
    pub fn all() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn and(mut self, clause: Clause) -> Self {
        self.clauses.push(clause);
        self
    }

    #[must_use]
    pub fn clauses(&self) -> &[Clause] {
        &self.clauses
    }

    #[must_use]
    pub fn is_identity(&self) -> bool {
        self.clauses.is_empty()
    }

    #[must_use]
    pub fn matches(&self, person: &Model) -> bool {
        self.clauses.iter().all(|clause| clause.matches(person))
    }

    /// Translates into a parameterized sea-orm condition. No clauses gives an
    /// empty `Condition::all()`, which filters nothing out.
    #[must_use]
    pub fn to_condition(&self) -> Condition {
        self.clauses
            .iter()
            .fold(Condition::all(), |condition, clause| condition.add(clause.to_expr()))
    }
}

/// Builds the predicate for `criteria`. Pure: the same criteria always yield
/// an equal predicate.
#[must_use]
pub fn build_predicate(criteria: &FilterCriteria) -> Predicate {
    let equalities = [
        (
            PersonField::NumberPassport,
            criteria.number_passport.map(FieldValue::Int),
        ),
        (PersonField::Name, criteria.name.clone().map(FieldValue::Text)),
        (
            PersonField::Surname,
            criteria.surname.clone().map(FieldValue::Text),
        ),
        (PersonField::Age, criteria.age.map(FieldValue::Int)),
        (PersonField::Sex, criteria.sex.map(FieldValue::Sex)),
    ];

    let mut predicate = equalities
        .into_iter()
        .filter_map(|(field, value)| value.map(|value| Clause::Equals(field, value)))
        .fold(Predicate::all(), Predicate::and);

    // Upper bound on its own is ignored
    if let Some(lower) = criteria.start_age {
        predicate = predicate.and(match criteria.finish_age {
            Some(upper) => Clause::Between(PersonField::Age, lower, upper),
            None => Clause::AtLeast(PersonField::Age, lower),
        });
    }

    predicate
}

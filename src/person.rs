//! The `persons` entity, its sortable/filterable field schema and its transfer shape.

use std::cmp::Ordering;

use sea_orm::ActiveValue::Set;
use sea_orm::entity::prelude::*;
use sea_orm::sea_query::StringLen;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    EnumIter,
    DeriveActiveEnum,
    Serialize,
    Deserialize,
    ToSchema,
)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::N(16))")]
pub enum Sex {
    #[sea_orm(string_value = "Male")]
    Male,
    #[sea_orm(string_value = "Female")]
    Female,
}

impl Sex {
    /// Stored representation, also used for ordering so that in-memory sorting
    /// agrees with the database.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Male => "Male",
            Self::Female => "Female",
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize, ToSchema)]
#[sea_orm(table_name = "persons")]
#[serde(rename_all = "camelCase")]
#[schema(as = Person)]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub number_passport: i32,
    pub name: String,
    pub surname: String,
    pub age: i32,
    pub sex: Sex,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

/// The person fields callers may filter and sort on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PersonField {
    NumberPassport,
    Name,
    Surname,
    Age,
    Sex,
}

impl PersonField {
    pub const ALL: [Self; 5] = [
        Self::NumberPassport,
        Self::Name,
        Self::Surname,
        Self::Age,
        Self::Sex,
    ];

    /// Name used in query strings and JSON.
    #[must_use]
    pub const fn wire_name(self) -> &'static str {
        match self {
            Self::NumberPassport => "numberPassport",
            Self::Name => "name",
            Self::Surname => "surname",
            Self::Age => "age",
            Self::Sex => "sex",
        }
    }

    #[must_use]
    pub fn wire_names() -> [&'static str; 5] {
        Self::ALL.map(Self::wire_name)
    }

    /// Exact, case-sensitive lookup by wire name.
    #[must_use]
    pub fn from_wire_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|field| field.wire_name() == name)
    }

    #[must_use]
    pub const fn column(self) -> Column {
        match self {
            Self::NumberPassport => Column::NumberPassport,
            Self::Name => Column::Name,
            Self::Surname => Column::Surname,
            Self::Age => Column::Age,
            Self::Sex => Column::Sex,
        }
    }

    /// Compares two records on this field only.
    #[must_use]
    pub fn compare(self, a: &Model, b: &Model) -> Ordering {
        match self {
            Self::NumberPassport => a.number_passport.cmp(&b.number_passport),
            Self::Name => a.name.cmp(&b.name),
            Self::Surname => a.surname.cmp(&b.surname),
            Self::Age => a.age.cmp(&b.age),
            Self::Sex => a.sex.as_str().cmp(b.sex.as_str()),
        }
    }
}

/// Transfer shape of a person: every field except the store-assigned id.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct PersonDto {
    pub number_passport: i32,
    pub name: String,
    pub surname: String,
    pub age: i32,
    pub sex: Sex,
}

impl PersonDto {
    /// Attaches a fresh id, producing the stored record.
    #[must_use]
    pub fn into_model(self) -> Model {
        Model {
            id: Uuid::new_v4(),
            number_passport: self.number_passport,
            name: self.name,
            surname: self.surname,
            age: self.age,
            sex: self.sex,
        }
    }
}

impl From<Model> for PersonDto {
    fn from(model: Model) -> Self {
        Self {
            number_passport: model.number_passport,
            name: model.name,
            surname: model.surname,
            age: model.age,
            sex: model.sex,
        }
    }
}

impl From<PersonDto> for ActiveModel {
    fn from(dto: PersonDto) -> Self {
        Self {
            id: Set(Uuid::new_v4()),
            number_passport: Set(dto.number_passport),
            name: Set(dto.name),
            surname: Set(dto.surname),
            age: Set(dto.age),
            sex: Set(dto.sex),
        }
    }
}

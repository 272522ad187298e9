//! The capability contract every stored record shape satisfies
//!
//! The generic repository, usecase and handler only ever see `T: Entity`.
//! Each shape supplies its table, its resource-specific columns in a fixed
//! order, and a way to bind its values in that same order. Identifier and
//! timestamps live in [`Base`], shared by every shape.

use chrono::{DateTime, Utc};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use sqlx::postgres::{PgArguments, PgRow};
use sqlx::{FromRow, Postgres};
use uuid::Uuid;

/// A bound-parameter query against Postgres
pub type PgQuery<'q> = sqlx::query::Query<'q, Postgres, PgArguments>;

/// Columns common to every table.
///
/// `created_at`/`updated_at` are owned by storage; values sent by clients are
/// never written. `deleted_at` is the soft-delete marker (null = active).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, FromRow)]
#[serde(default)]
pub struct Base {
    pub id: Uuid,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub deleted_at: Option<DateTime<Utc>>,
}

/// A record shape backed by one table.
pub trait Entity:
    Serialize + DeserializeOwned + for<'r> FromRow<'r, PgRow> + Clone + Send + Sync + Unpin + 'static
{
    /// Table name
    const TABLE: &'static str;

    /// Singular name used in error messages
    const RESOURCE: &'static str;

    /// Resource-specific columns, in [`Entity::bind_columns`] order
    const COLUMNS: &'static [&'static str];

    fn base(&self) -> &Base;

    fn base_mut(&mut self) -> &mut Base;

    /// Bind the values of [`Entity::COLUMNS`], in order.
    fn bind_columns<'q>(&self, query: PgQuery<'q>) -> PgQuery<'q>;

    fn id(&self) -> Uuid {
        self.base().id
    }

    fn set_id(&mut self, id: Uuid) {
        self.base_mut().id = id;
    }

    /// Whether `name` is a column list queries may filter on.
    fn has_column(name: &str) -> bool {
        name == "id" || Self::COLUMNS.contains(&name)
    }
}

/// Declare a record shape: the struct (with flattened [`Base`]) and its
/// [`Entity`] impl. Column names are the field names.
macro_rules! entity {
    (
        $(#[$meta:meta])*
        pub struct $name:ident in $table:literal as $resource:literal {
            $( $(#[$fmeta:meta])* pub $field:ident : $ty:ty ),* $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, PartialEq, ::serde::Serialize, ::serde::Deserialize, ::sqlx::FromRow)]
        pub struct $name {
            #[serde(flatten)]
            #[sqlx(flatten)]
            pub base: $crate::models::Base,
            $( $(#[$fmeta])* pub $field: $ty, )*
        }

        impl $crate::models::Entity for $name {
            const TABLE: &'static str = $table;
            const RESOURCE: &'static str = $resource;
            const COLUMNS: &'static [&'static str] = &[$(stringify!($field)),*];

            fn base(&self) -> &$crate::models::Base {
                &self.base
            }

            fn base_mut(&mut self) -> &mut $crate::models::Base {
                &mut self.base
            }

            fn bind_columns<'q>(
                &self,
                query: $crate::models::PgQuery<'q>,
            ) -> $crate::models::PgQuery<'q> {
                query $( .bind(self.$field.clone()) )*
            }
        }
    };
}

/// Declare a closed set of values stored as TEXT and serialized as the same
/// lowercase strings.
macro_rules! text_enum {
    (
        $(#[$meta:meta])*
        pub enum $name:ident {
            $( $(#[$vmeta:meta])* $variant:ident => $text:literal ),+ $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, ::serde::Serialize, ::serde::Deserialize)]
        pub enum $name {
            $( $(#[$vmeta])* #[serde(rename = $text)] $variant, )+
        }

        impl $name {
            pub fn as_str(&self) -> &'static str {
                match self {
                    $( Self::$variant => $text, )+
                }
            }
        }

        impl ::std::str::FromStr for $name {
            type Err = $crate::models::ValidationError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                match s {
                    $( $text => Ok(Self::$variant), )+
                    other => Err($crate::models::ValidationError::InvalidVariant {
                        field: stringify!($name),
                        value: other.to_owned(),
                    }),
                }
            }
        }

        impl ::std::fmt::Display for $name {
            fn fmt(&self, f: &mut ::std::fmt::Formatter<'_>) -> ::std::fmt::Result {
                f.write_str(self.as_str())
            }
        }

        impl ::sqlx::Type<::sqlx::Postgres> for $name {
            fn type_info() -> ::sqlx::postgres::PgTypeInfo {
                <String as ::sqlx::Type<::sqlx::Postgres>>::type_info()
            }

            fn compatible(ty: &::sqlx::postgres::PgTypeInfo) -> bool {
                <String as ::sqlx::Type<::sqlx::Postgres>>::compatible(ty)
            }
        }

        impl<'q> ::sqlx::Encode<'q, ::sqlx::Postgres> for $name {
            fn encode_by_ref(
                &self,
                buf: &mut ::sqlx::postgres::PgArgumentBuffer,
            ) -> Result<::sqlx::encode::IsNull, ::sqlx::error::BoxDynError> {
                <&str as ::sqlx::Encode<'q, ::sqlx::Postgres>>::encode(self.as_str(), buf)
            }
        }

        impl<'r> ::sqlx::Decode<'r, ::sqlx::Postgres> for $name {
            fn decode(
                value: ::sqlx::postgres::PgValueRef<'r>,
            ) -> Result<Self, ::sqlx::error::BoxDynError> {
                let text = <&str as ::sqlx::Decode<'r, ::sqlx::Postgres>>::decode(value)?;
                Ok(text.parse::<$name>()?)
            }
        }
    };
}

pub(crate) use entity;
pub(crate) use text_enum;

/// serde default for boolean columns that start out true
pub(crate) fn default_true() -> bool {
    true
}

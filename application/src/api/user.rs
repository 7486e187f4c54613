//! [`User`]-related definitions.

use common::{pagination, DateTime};
use derive_more::{Display, From, Into};
use juniper::{
    graphql_object, GraphQLEnum, GraphQLInputObject, GraphQLObject,
    GraphQLScalar,
};
use service::{domain, read::user::list, state};

use crate::{api, Context};

/// A [`User`] of the directory.
#[derive(Clone, Debug, From, Into)]
pub struct User(domain::User);

/// A `User` of the directory.
#[graphql_object(context = Context)]
impl User {
    /// Unique identifier of this `User`.
    #[must_use]
    pub fn id(&self) -> Id {
        self.0.id.into()
    }

    /// Name of this `User`.
    #[must_use]
    pub fn name(&self) -> &str {
        self.0.name.as_ref()
    }

    /// Email of this `User`.
    #[must_use]
    pub fn email(&self) -> &str {
        self.0.email.as_ref()
    }

    /// Phone of this `User`.
    #[must_use]
    pub fn phone(&self) -> &str {
        self.0.phone.as_ref()
    }

    /// Name of the company this `User` works in.
    #[must_use]
    pub fn company(&self) -> &str {
        self.0.company.as_ref()
    }

    /// Website of this `User`.
    #[must_use]
    pub fn website(&self) -> &str {
        self.0.website.as_ref()
    }

    /// Single-line postal address of this `User`.
    #[must_use]
    pub fn address(&self) -> &str {
        self.0.address.as_ref()
    }
}

/// Unique identifier of a `User`.
#[derive(
    Clone, Copy, Debug, Display, Eq, From, GraphQLScalar, Into, PartialEq,
)]
#[from(domain::user::Id)]
#[into(domain::user::Id)]
#[graphql(name = "UserId", transparent)]
pub struct Id(i32);

/// Edited details of a `User`.
#[derive(Clone, Debug, GraphQLInputObject)]
#[graphql(name = "UserInput")]
pub struct Input {
    /// New name of the `User`. Must not be blank.
    pub name: String,

    /// New email of the `User`. Must not be blank.
    pub email: String,

    /// New phone of the `User`, if it should be changed.
    pub phone: Option<String>,
}

/// Page of the filtered and sorted `User`s table.
#[derive(Clone, Debug, From, Into)]
pub struct Page(list::Page);

/// Page of the filtered and sorted `User`s table.
#[graphql_object(name = "UserPage", context = Context)]
impl Page {
    /// Number of this `UserPage`, starting from 1.
    #[must_use]
    pub fn number(&self) -> i32 {
        api::int(self.0.number)
    }

    /// Total number of `UserPage`s. Always at least 1.
    #[must_use]
    pub fn total_pages(&self) -> i32 {
        api::int(self.0.total_pages)
    }

    /// Maximum number of `User`s on a single `UserPage`.
    #[must_use]
    pub fn size(&self) -> i32 {
        api::int(self.0.size)
    }

    /// `User`s on this `UserPage`.
    #[must_use]
    pub fn users(&self) -> Vec<User> {
        self.0.users.iter().cloned().map(Into::into).collect()
    }

    /// 1-based position of the first `User` on this `UserPage` in the whole
    /// table, or 0 if the table is empty.
    #[must_use]
    pub fn showing_from(&self) -> i32 {
        api::int(self.0.span.from)
    }

    /// 1-based position of the last `User` on this `UserPage` in the whole
    /// table, or 0 if the table is empty.
    #[must_use]
    pub fn showing_to(&self) -> i32 {
        api::int(self.0.span.to)
    }

    /// Total number of `User`s matching the current `UserFilter`.
    #[must_use]
    pub fn total_count(&self) -> i32 {
        api::int(self.0.span.total)
    }

    /// Numbers of the `UserPage`s offered for navigation.
    #[must_use]
    pub fn window(&self) -> Vec<i32> {
        self.0.window.clone().map(api::int).collect()
    }

    /// Indicator whether there is a previous `UserPage`.
    #[must_use]
    pub fn has_previous_page(&self) -> bool {
        self.0.number > 1
    }

    /// Indicator whether there is a next `UserPage`.
    #[must_use]
    pub fn has_next_page(&self) -> bool {
        self.0.number < self.0.total_pages
    }
}

/// Status of fetching `User`s from the remote source.
#[derive(Clone, Debug, From, Into)]
pub struct Status(state::Status);

/// Status of fetching `User`s from the remote source.
#[graphql_object(name = "UserFetchStatus", context = Context)]
impl Status {
    /// Indicator whether a fetch is in progress.
    #[must_use]
    pub fn loading(&self) -> bool {
        self.0.loading
    }

    /// Message of the last fetch error, if it has failed.
    #[must_use]
    pub fn error(&self) -> Option<&str> {
        self.0.error.as_deref()
    }

    /// `DateTime` of the last successful fetch.
    #[must_use]
    pub fn fetched_at(&self) -> Option<DateTime> {
        self.0.fetched_at.map(|at| at.coerce())
    }
}

/// Filter applied to the `User`s table.
#[derive(Clone, Debug, GraphQLObject)]
#[graphql(name = "UserFilter")]
pub struct Filter {
    /// Case-insensitive search by name or email. Empty matches everything.
    pub search: String,

    /// Exact company name, or `All`.
    pub company: String,
}

impl From<list::Filter> for Filter {
    fn from(filter: list::Filter) -> Self {
        Self {
            search: filter.search,
            company: filter.company.as_ref().to_owned(),
        }
    }
}

/// Sorting applied to the filtered `User`s.
#[derive(Clone, Copy, Debug, GraphQLObject)]
#[graphql(name = "UserSort")]
pub struct Sort {
    /// Field the `User`s are sorted by, if any.
    pub key: Option<SortKey>,

    /// Order of the sorting.
    pub order: SortOrder,
}

impl From<list::Sort> for Sort {
    fn from(sort: list::Sort) -> Self {
        Self {
            key: sort.key.map(Into::into),
            order: sort.order.into(),
        }
    }
}

/// Current criteria of the `User`s table.
#[derive(Clone, Debug, GraphQLObject)]
#[graphql(name = "UserCriteria")]
pub struct Criteria {
    /// Applied `UserFilter`.
    pub filter: Filter,

    /// Applied `UserSort`.
    pub sort: Sort,
}

/// Field to sort `User`s by.
#[derive(Clone, Copy, Debug, Eq, GraphQLEnum, PartialEq)]
#[graphql(name = "UserSortKey")]
pub enum SortKey {
    /// Sort by name.
    Name,

    /// Sort by email.
    Email,
}

impl From<list::SortKey> for SortKey {
    fn from(key: list::SortKey) -> Self {
        match key {
            list::SortKey::Name => Self::Name,
            list::SortKey::Email => Self::Email,
        }
    }
}

impl From<SortKey> for list::SortKey {
    fn from(key: SortKey) -> Self {
        match key {
            SortKey::Name => Self::Name,
            SortKey::Email => Self::Email,
        }
    }
}

/// Order of a `UserSort`.
#[derive(Clone, Copy, Debug, Eq, GraphQLEnum, PartialEq)]
#[graphql(name = "UserSortOrder")]
pub enum SortOrder {
    /// Ascending order.
    Asc,

    /// Descending order.
    Desc,
}

impl From<pagination::Order> for SortOrder {
    fn from(order: pagination::Order) -> Self {
        match order {
            pagination::Order::Ascending => Self::Asc,
            pagination::Order::Descending => Self::Desc,
        }
    }
}

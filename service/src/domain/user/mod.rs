//! [`User`] definitions.

pub mod raw;
pub mod session;

use derive_more::{AsRef, Display, From, Into};
use serde::{Deserialize, Serialize};

pub use self::{raw::Raw, session::Session};

/// User of the directory, normalized for displaying.
///
/// Every textual field is always present: missing source values are
/// normalized into empty strings.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct User {
    /// ID of this [`User`].
    pub id: Id,

    /// [`Name`] of this [`User`].
    pub name: Name,

    /// [`Email`] of this [`User`].
    pub email: Email,

    /// [`Phone`] of this [`User`].
    pub phone: Phone,

    /// [`Company`] this [`User`] works at.
    pub company: Company,

    /// [`Website`] of this [`User`].
    pub website: Website,

    /// [`Address`] of this [`User`].
    pub address: Address,
}

/// Change of the editable fields of an existing [`User`].
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Edit {
    /// ID of the [`User`] to be changed.
    pub id: Id,

    /// New [`Name`] of the [`User`].
    pub name: Name,

    /// New [`Email`] of the [`User`].
    pub email: Email,

    /// New [`Phone`] of the [`User`], if it should be changed.
    pub phone: Option<Phone>,
}

impl Edit {
    /// Applies this [`Edit`] to the provided [`User`], leaving the fields it
    /// doesn't touch intact.
    pub fn apply_to(self, user: &mut User) {
        let Self {
            id: _,
            name,
            email,
            phone,
        } = self;

        user.name = name;
        user.email = email;
        if let Some(phone) = phone {
            user.phone = phone;
        }
    }
}

/// ID of a [`User`].
#[derive(
    Clone,
    Copy,
    Debug,
    Default,
    Deserialize,
    Display,
    Eq,
    From,
    Hash,
    Into,
    Ord,
    PartialEq,
    PartialOrd,
    Serialize,
)]
#[serde(transparent)]
pub struct Id(i32);

/// Name of a [`User`].
#[derive(AsRef, Clone, Debug, Default, Display, Eq, From, Into, PartialEq)]
#[as_ref(str)]
#[from(&str, String)]
pub struct Name(String);

impl Name {
    /// Indicates whether this [`Name`] contains nothing but whitespace.
    #[must_use]
    pub fn is_blank(&self) -> bool {
        self.0.trim().is_empty()
    }
}

/// Email address of a [`User`].
#[derive(AsRef, Clone, Debug, Default, Display, Eq, From, Into, PartialEq)]
#[as_ref(str)]
#[from(&str, String)]
pub struct Email(String);

impl Email {
    /// Indicates whether this [`Email`] contains nothing but whitespace.
    #[must_use]
    pub fn is_blank(&self) -> bool {
        self.0.trim().is_empty()
    }
}

/// Phone number of a [`User`].
#[derive(AsRef, Clone, Debug, Default, Display, Eq, From, Into, PartialEq)]
#[as_ref(str)]
#[from(&str, String)]
pub struct Phone(String);

/// Name of the company a [`User`] works at.
#[derive(
    AsRef, Clone, Debug, Default, Display, Eq, From, Hash, Into, PartialEq,
)]
#[as_ref(str)]
#[from(&str, String)]
pub struct Company(String);

/// Website of a [`User`].
#[derive(AsRef, Clone, Debug, Default, Display, Eq, From, Into, PartialEq)]
#[as_ref(str)]
#[from(&str, String)]
pub struct Website(String);

/// Postal address of a [`User`], formatted for displaying.
#[derive(AsRef, Clone, Debug, Default, Display, Eq, From, Into, PartialEq)]
#[as_ref(str)]
#[from(&str, String)]
pub struct Address(String);

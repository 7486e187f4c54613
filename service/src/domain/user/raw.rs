//! [`Raw`] user definitions.

use itertools::Itertools as _;
use serde::{de::DeserializeOwned, Deserialize, Deserializer};
use tracing as log;

use super::{Address, Company, Email, Id, Name, Phone, User, Website};

/// [`User`] in the shape it's served by a remote source.
///
/// Every field except `id` is optional. A value of unexpected type (say, a
/// number where a string is expected) is treated as a missing one.
#[derive(Clone, Debug, Default, Deserialize, Eq, PartialEq)]
pub struct Raw {
    /// ID of the user.
    pub id: Id,

    /// Full name of the user.
    #[serde(default, deserialize_with = "lenient")]
    pub name: Option<String>,

    /// Email address of the user.
    #[serde(default, deserialize_with = "lenient")]
    pub email: Option<String>,

    /// Phone number of the user.
    #[serde(default, deserialize_with = "lenient")]
    pub phone: Option<String>,

    /// Website of the user.
    #[serde(default, deserialize_with = "lenient")]
    pub website: Option<String>,

    /// Company the user works at.
    #[serde(default, deserialize_with = "lenient")]
    pub company: Option<RawCompany>,

    /// Postal address of the user.
    #[serde(default, deserialize_with = "lenient")]
    pub address: Option<RawAddress>,
}

/// Company of a [`Raw`] user.
#[derive(Clone, Debug, Default, Deserialize, Eq, PartialEq)]
pub struct RawCompany {
    /// Name of the company.
    #[serde(default, deserialize_with = "lenient")]
    pub name: Option<String>,
}

/// Postal address of a [`Raw`] user.
#[derive(Clone, Debug, Default, Deserialize, Eq, PartialEq)]
pub struct RawAddress {
    /// City part of the address.
    #[serde(default, deserialize_with = "lenient")]
    pub city: Option<String>,

    /// Street part of the address.
    #[serde(default, deserialize_with = "lenient")]
    pub street: Option<String>,
}

impl Raw {
    /// Parses a JSON array of [`Raw`] users.
    ///
    /// Elements which are not users (lacking a valid `id`, for example) are
    /// skipped with a warning.
    ///
    /// # Errors
    ///
    /// If the `json` is not an array.
    pub fn parse_list(json: &[u8]) -> Result<Vec<Self>, serde_json::Error> {
        let values: Vec<serde_json::Value> = serde_json::from_slice(json)?;
        Ok(values
            .into_iter()
            .enumerate()
            .filter_map(|(n, value)| {
                serde_json::from_value(value)
                    .map_err(|e| log::warn!("skipping user #{n}: {e}"))
                    .ok()
            })
            .collect())
    }
}

impl From<Raw> for User {
    fn from(raw: Raw) -> Self {
        let Raw {
            id,
            name,
            email,
            phone,
            website,
            company,
            address,
        } = raw;

        Self {
            id,
            name: Name::from(name.unwrap_or_default()),
            email: Email::from(email.unwrap_or_default()),
            phone: Phone::from(phone.unwrap_or_default()),
            company: Company::from(
                company.and_then(|c| c.name).unwrap_or_default(),
            ),
            website: Website::from(website.unwrap_or_default()),
            address: Address::from(
                address
                    .map(|a| {
                        [a.city, a.street]
                            .into_iter()
                            .flatten()
                            .filter(|part| !part.is_empty())
                            .join(", ")
                    })
                    .unwrap_or_default(),
            ),
        }
    }
}

/// Deserializes any JSON value, turning values not matching `T` into [`None`].
fn lenient<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned,
{
    let value = serde_json::Value::deserialize(deserializer)?;
    Ok(serde_json::from_value(value).ok())
}

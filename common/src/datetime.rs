//! UTC date and time tagged with the kind of moment it describes.

use std::{cmp::Ordering, marker::PhantomData, ops, time::Duration};

use derive_more::Debug;
use time::{format_description::well_known::Rfc3339, OffsetDateTime};

/// Date and time not bound to any particular kind of moment.
pub type DateTime = DateTimeOf;

/// UTC date and time of the `Of` kind, truncated to microseconds.
///
/// The `Of` parameter only prevents mixing up moments of different meaning
/// (a fetch time with a session expiration, for example). Use
/// [`DateTimeOf::coerce()`] to reinterpret one kind as another.
#[derive(Debug)]
#[debug("{inner}")]
pub struct DateTimeOf<Of: ?Sized = ()> {
    /// UTC moment.
    inner: OffsetDateTime,

    /// Kind of this moment.
    _of: PhantomData<Of>,
}

impl<Of: ?Sized> DateTimeOf<Of> {
    /// Beginning of the Unix epoch.
    pub const UNIX_EPOCH: Self = Self::wrap(OffsetDateTime::UNIX_EPOCH);

    /// Wraps the provided UTC moment as is.
    const fn wrap(inner: OffsetDateTime) -> Self {
        Self {
            inner,
            _of: PhantomData,
        }
    }

    /// Normalizes the provided moment to UTC with a microsecond precision.
    fn normalize(dt: OffsetDateTime) -> Self {
        let dt = dt.to_offset(time::UtcOffset::UTC);
        let nanos = i64::from(dt.nanosecond() % 1_000);
        Self::wrap(dt - time::Duration::nanoseconds(nanos))
    }

    /// Returns the current moment.
    #[must_use]
    pub fn now() -> Self {
        Self::normalize(OffsetDateTime::now_utc())
    }

    /// Indicates whether this moment is not in the future anymore.
    #[must_use]
    pub fn is_past(&self) -> bool {
        self.inner <= OffsetDateTime::now_utc()
    }

    /// Returns the whole seconds passed since the [`UNIX_EPOCH`].
    ///
    /// [`UNIX_EPOCH`]: Self::UNIX_EPOCH
    #[must_use]
    pub fn unix_timestamp(&self) -> i64 {
        self.inner.unix_timestamp()
    }

    /// Creates a moment the provided whole `seconds` after the
    /// [`UNIX_EPOCH`], if it's representable.
    ///
    /// [`UNIX_EPOCH`]: Self::UNIX_EPOCH
    #[must_use]
    pub fn from_unix_timestamp(seconds: i64) -> Option<Self> {
        OffsetDateTime::from_unix_timestamp(seconds)
            .ok()
            .map(Self::wrap)
    }

    /// Drops the sub-second part of this moment.
    #[must_use]
    pub fn trunc_to_seconds(self) -> Self {
        let nanos = i64::from(self.inner.nanosecond());
        Self::wrap(self.inner - time::Duration::nanoseconds(nanos))
    }

    /// Parses an [RFC 3339] string, converting it to UTC.
    ///
    /// # Errors
    ///
    /// If the `input` is not an [RFC 3339] date and time.
    ///
    /// [RFC 3339]: https://tools.ietf.org/html/rfc3339
    pub fn from_rfc3339(input: &str) -> Result<Self, time::error::Parse> {
        OffsetDateTime::parse(input, &Rfc3339).map(Self::normalize)
    }

    /// Formats this moment as an [RFC 3339] string.
    ///
    /// Falls back to the plain representation for years beyond the
    /// four digits [RFC 3339] allows.
    ///
    /// [RFC 3339]: https://tools.ietf.org/html/rfc3339
    #[must_use]
    pub fn to_rfc3339(&self) -> String {
        self.inner
            .format(&Rfc3339)
            .unwrap_or_else(|_| self.inner.to_string())
    }

    /// Reinterprets this moment as the one of the `NewOf` kind.
    #[must_use]
    pub fn coerce<NewOf: ?Sized>(self) -> DateTimeOf<NewOf> {
        DateTimeOf::wrap(self.inner)
    }
}

impl<Of: ?Sized> Copy for DateTimeOf<Of> {}
impl<Of: ?Sized> Clone for DateTimeOf<Of> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<Of: ?Sized> Eq for DateTimeOf<Of> {}
impl<Of: ?Sized> PartialEq for DateTimeOf<Of> {
    fn eq(&self, other: &Self) -> bool {
        self.inner == other.inner
    }
}

impl<Of: ?Sized> Ord for DateTimeOf<Of> {
    fn cmp(&self, other: &Self) -> Ordering {
        self.inner.cmp(&other.inner)
    }
}
impl<Of: ?Sized> PartialOrd for DateTimeOf<Of> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl<Of: ?Sized> From<OffsetDateTime> for DateTimeOf<Of> {
    fn from(dt: OffsetDateTime) -> Self {
        Self::normalize(dt)
    }
}

impl<Of: ?Sized> From<DateTimeOf<Of>> for OffsetDateTime {
    fn from(dt: DateTimeOf<Of>) -> Self {
        dt.inner
    }
}

impl<Of: ?Sized> ops::Add<Duration> for DateTimeOf<Of> {
    type Output = Self;

    fn add(self, rhs: Duration) -> Self {
        Self::wrap(self.inner.saturating_add(
            time::Duration::try_from(rhs).unwrap_or(time::Duration::MAX),
        ))
    }
}

#[cfg(feature = "serde")]
pub mod serde {
    //! [`serde`] representations of [`DateTimeOf`].

    pub mod unix_timestamp {
        //! [`DateTimeOf`] as whole seconds since the Unix epoch.
        //!
        //! [`DateTimeOf`]: crate::DateTimeOf

        use serde::{de, Deserialize as _, Deserializer, Serializer};

        use crate::DateTimeOf;

        /// Writes the provided [`DateTimeOf`] as Unix seconds.
        ///
        /// # Errors
        ///
        /// If the `serializer` fails.
        pub fn serialize<Of, S>(
            dt: &DateTimeOf<Of>,
            serializer: S,
        ) -> Result<S::Ok, S::Error>
        where
            Of: ?Sized,
            S: Serializer,
        {
            serializer.serialize_i64(dt.unix_timestamp())
        }

        /// Reads a [`DateTimeOf`] from Unix seconds.
        ///
        /// # Errors
        ///
        /// If the value is not an integer, or is out of the representable
        /// range.
        pub fn deserialize<'de, Of, D>(
            deserializer: D,
        ) -> Result<DateTimeOf<Of>, D::Error>
        where
            Of: ?Sized,
            D: Deserializer<'de>,
        {
            let secs = i64::deserialize(deserializer)?;
            DateTimeOf::from_unix_timestamp(secs).ok_or_else(|| {
                de::Error::custom(format!("timestamp {secs} is out of range"))
            })
        }
    }
}

#[cfg(feature = "juniper")]
mod juniper {
    //! GraphQL scalar of [`DateTime`].

    use juniper::{graphql_scalar, InputValue, ScalarValue, Value};

    /// Moment in [RFC 3339] format, in UTC, with a microsecond precision.
    ///
    /// [RFC 3339]: https://tools.ietf.org/html/rfc3339
    #[graphql_scalar(with = Self, parse_token(String))]
    type DateTime = crate::DateTime;

    impl DateTime {
        fn to_output<S: ScalarValue>(dt: &DateTime) -> Value<S> {
            Value::scalar(dt.to_rfc3339())
        }

        fn from_input<S: ScalarValue>(
            input: &InputValue<S>,
        ) -> Result<Self, String> {
            let s = input.as_string_value().ok_or_else(|| {
                format!("`DateTime` must be a string, found: {input}")
            })?;
            Self::from_rfc3339(s)
                .map_err(|e| format!("`DateTime` is not RFC 3339: {e}"))
        }
    }
}

#[cfg(test)]
mod spec {
    use std::time::Duration;

    use super::DateTime;

    #[test]
    fn rfc3339_round_trips_through_string() {
        let dt = DateTime::from_rfc3339("2024-03-01T12:30:00Z").unwrap();

        assert_eq!(dt.to_rfc3339(), "2024-03-01T12:30:00Z");
        assert!(DateTime::from_rfc3339("yesterday").is_err());
    }

    #[test]
    fn converts_offsets_to_utc() {
        let local =
            DateTime::from_rfc3339("2024-03-01T14:30:00.123456789+02:00")
                .unwrap();

        assert_eq!(local.to_rfc3339(), "2024-03-01T12:30:00.123456Z");
    }

    #[test]
    fn truncates_to_whole_seconds() {
        let dt = DateTime::from_rfc3339("2024-03-01T12:30:00.654321Z")
            .unwrap()
            .trunc_to_seconds();

        assert_eq!(dt.to_rfc3339(), "2024-03-01T12:30:00Z");
        assert_eq!(
            DateTime::from_unix_timestamp(dt.unix_timestamp()),
            Some(dt),
        );
    }

    #[test]
    fn detects_past_moments() {
        assert!(DateTime::UNIX_EPOCH.is_past());
        assert!(!(DateTime::now() + Duration::from_secs(60)).is_past());
    }

    #[test]
    fn saturates_on_overflowing_addition() {
        let far = DateTime::now() + Duration::MAX;

        assert!(far > DateTime::now());
    }
}

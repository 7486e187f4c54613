//! [`Error`]-related definitions.

use std::fmt;

use derive_more::Error as StdError;
use itertools::Itertools as _;
use juniper::IntoFieldError;
use tracerr::{Trace, Traced};
use tracing as log;

/// Defines an enum of API errors convertible into an [`Error`].
///
/// Every variant carries its [`Code`], [`http::StatusCode`] and a static
/// message, which also becomes the variant's documentation.
#[expect(clippy::module_name_repetitions, reason = "more readable")]
#[macro_export]
macro_rules! define_error {
    (
        $(#[doc = $doc:literal])*
        enum $name:ident {
            $(
                #[code = $code:literal]
                #[status = $status_code:ident]
                #[message = $message:literal]
                $variant:ident
            ),* $(,)?
        }
    ) => {
        $(#[doc = $doc])*
        #[derive(
            Clone,
            Copy,
            Debug,
            ::derive_more::Display,
            ::derive_more::Error,
            Eq,
            PartialEq,
        )]
        pub enum $name {
            $(
                #[display($message)]
                #[doc = $message]
                $variant,
            )*
        }

        impl $name {
            /// Returns the machine-readable code of this error.
            #[must_use]
            pub const fn code(self) -> $crate::error::Code {
                match self {
                    $( Self::$variant => $code, )*
                }
            }

            /// Returns the [`http::StatusCode`] this error is responded
            /// with.
            #[must_use]
            pub const fn status_code(self) -> ::http::StatusCode {
                match self {
                    $( Self::$variant => ::http::StatusCode::$status_code, )*
                }
            }
        }

        impl From<$name> for $crate::Error {
            fn from(err: $name) -> Self {
                Self::new(err.code(), err.status_code(), err)
            }
        }
    };
}

/// Error returned by the GraphQL API.
#[derive(Clone, Debug, StdError)]
pub struct Error {
    /// Machine-readable [`Code`], exposed in the `code` extension.
    pub code: Code,

    /// [`http::StatusCode`] of the response carrying this [`Error`].
    pub status_code: http::StatusCode,

    /// [`Trace`] of the place this [`Error`] originates from, if known.
    #[error(not(backtrace))]
    pub backtrace: Option<Trace>,

    /// Human-readable message.
    pub message: String,
}

impl Error {
    /// Creates a new [`Error`] without a [`Trace`].
    #[must_use]
    pub fn new(
        code: Code,
        status_code: http::StatusCode,
        message: impl ToString,
    ) -> Self {
        Self {
            code,
            status_code,
            backtrace: None,
            message: message.to_string(),
        }
    }

    /// Creates a new [`Error`] about an unexpected failure, logging it.
    #[must_use]
    pub fn internal(msg: &impl ToString) -> Self {
        let message = msg.to_string();
        log::error!("internal error: {message}");
        Self::new(
            "INTERNAL_SERVER_ERROR",
            http::StatusCode::INTERNAL_SERVER_ERROR,
            message,
        )
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}]: {}", self.code, self.message)?;
        if let Some(trace) = &self.backtrace {
            write!(f, "\n{}", trace.iter().join("\n"))?;
        }
        Ok(())
    }
}

impl<S> IntoFieldError<S> for Error
where
    S: From<String>,
{
    fn into_field_error(self) -> juniper::FieldError<S> {
        let Self {
            code,
            status_code: _,
            backtrace,
            message,
        } = self;

        let mut ext = juniper::Object::with_capacity(2);
        _ = ext.add_field("code", juniper::Value::scalar(code.to_owned()));
        if let Some(trace) = backtrace {
            _ = ext.add_field(
                "backtrace",
                juniper::Value::list(
                    trace
                        .iter()
                        .map(|frame| juniper::Value::scalar(frame.to_string()))
                        .collect(),
                ),
            );
        }
        juniper::FieldError::new(message, juniper::Value::object(ext))
    }
}

/// Machine-readable code of an [`Error`], like `USER_NOT_EXISTS`.
pub type Code = &'static str;

/// Conversion of domain errors into API [`Error`]s.
pub trait AsError {
    /// Returns the API [`Error`] this one is exposed as.
    ///
    /// [`None`] means the error is unexpected for clients, so it's exposed as
    /// an internal one.
    fn try_as_error(&self) -> Option<Error>;

    /// Converts this into an API [`Error`], falling back to an internal one.
    fn as_error(&self) -> Error
    where
        Self: fmt::Display,
    {
        self.try_as_error().unwrap_or_else(|| Error::internal(&self))
    }

    /// Same as [`AsError::as_error()`], but consumes this error.
    fn into_error(self) -> Error
    where
        Self: fmt::Display + Sized,
    {
        self.as_error()
    }
}

impl<E: AsError> AsError for Traced<E> {
    fn try_as_error(&self) -> Option<Error> {
        self.as_ref().try_as_error().map(|err| Error {
            backtrace: Some(self.trace().clone()),
            ..err
        })
    }
}

#[cfg(test)]
mod spec {
    use juniper::{DefaultScalarValue, IntoFieldError as _};

    use super::{AsError, Error};

    crate::define_error! {
        /// Errors of tests.
        enum TestError {
            #[code = "TEST_FAILED"]
            #[status = CONFLICT]
            #[message = "Test failed"]
            Failed,
        }
    }

    #[derive(Debug, derive_more::Display)]
    #[display("unknown")]
    struct Unknown;

    impl AsError for Unknown {
        fn try_as_error(&self) -> Option<Error> {
            None
        }
    }

    #[test]
    fn converts_defined_errors() {
        assert_eq!(TestError::Failed.code(), "TEST_FAILED");

        let err = Error::from(TestError::Failed);

        assert_eq!(err.code, "TEST_FAILED");
        assert_eq!(err.status_code, http::StatusCode::CONFLICT);
        assert_eq!(err.to_string(), "[TEST_FAILED]: Test failed");
    }

    #[test]
    fn falls_back_to_internal_error() {
        let err = Unknown.into_error();

        assert_eq!(err.code, "INTERNAL_SERVER_ERROR");
        assert_eq!(err.status_code, http::StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(err.message, "unknown");
    }

    #[test]
    fn exposes_code_in_extensions() {
        let field: juniper::FieldError<DefaultScalarValue> =
            Error::from(TestError::Failed).into_field_error();

        assert_eq!(field.message(), "Test failed");
        let ext = field.extensions().as_object_value().unwrap();
        let code = ext
            .get_field_value("code")
            .and_then(|v: &juniper::Value<DefaultScalarValue>| {
                v.as_string_value()
            });
        assert_eq!(code, Some("TEST_FAILED"));
        assert!(ext.get_field_value("backtrace").is_none());
    }
}

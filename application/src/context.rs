//! [`Context`]-related definitions.

use std::{
    future, mem,
    sync::atomic::{self, AtomicU16},
};

use axum::{async_trait, extract::FromRequestParts};
use axum_extra::extract::cookie::{Cookie, CookieJar, SameSite};
use juniper::{
    http::{GraphQLBatchResponse, GraphQLResponse},
    IntoFieldError as _,
};
use service::{
    command::{self, Command as _},
    domain::user::Session,
};
use tokio::sync::{Mutex, OnceCell};

use crate::{define_error, AsError, Error, JuniperResponse, Service};

/// Application context.
#[derive(Debug)]
pub struct Context {
    /// [`Service`] instance.
    service: Service,

    /// Error status code.
    error_status_code: AtomicU16,

    /// Cookies of the HTTP request, along with the ones to be set by the
    /// response.
    cookies: Mutex<CookieJar>,

    /// Current [`Session`].
    current_session: OnceCell<Session>,

    /// Last authentication [`Error`].
    auth_error: OnceCell<Error>,
}

impl Context {
    /// Creates a new [`Context`] for the HTTP request with the provided
    /// `headers`.
    #[must_use]
    pub fn new(service: Service, headers: &http::HeaderMap) -> Self {
        Self {
            service,
            error_status_code: AtomicU16::new(
                http::StatusCode::INTERNAL_SERVER_ERROR.as_u16(),
            ),
            cookies: Mutex::new(CookieJar::from_headers(headers)),
            current_session: OnceCell::new(),
            auth_error: OnceCell::new(),
        }
    }

    /// Returns [`Service`] instance of this [`Context`].
    #[must_use]
    pub fn service(&self) -> &Service {
        &self.service
    }

    /// Returns the error status code of this [`Context`].
    #[must_use]
    pub fn error_status_code(&self) -> http::StatusCode {
        http::StatusCode::from_u16(
            self.error_status_code.load(atomic::Ordering::Relaxed),
        )
        .unwrap_or(http::StatusCode::INTERNAL_SERVER_ERROR)
    }

    /// Sets the error status code for this [`Context`].
    ///
    /// Provided [`http::StatusCode`] will be applied to the response.
    pub fn set_error_status_code(&self, status_code: http::StatusCode) {
        self.error_status_code
            .store(status_code.as_u16(), atomic::Ordering::Relaxed);
    }

    /// Helper method calling [`Context::set_error_status_code()`] inside
    /// [`Result::map_err()`] closure.
    pub fn error(&self) -> impl FnOnce(Error) -> Error + '_ {
        move |err| {
            self.set_error_status_code(err.status_code);
            err
        }
    }

    /// Tries to get the current [`Session`] for this [`Context`].
    ///
    /// # Errors
    ///
    /// Errors if the authentication has failed for a reason other than a
    /// missing or expired [`Session`].
    pub async fn try_current_session(&self) -> Result<Option<Session>, Error> {
        self.current_session().await.map(Some).or_else(|e| {
            if e.status_code == http::StatusCode::UNAUTHORIZED {
                Ok(None)
            } else {
                Err(e)
            }
        })
    }

    /// Returns the current [`Session`] for this [`Context`].
    ///
    /// # Errors
    ///
    /// Errors if:
    /// - the current HTTP request carries no [`Session`] marker;
    /// - the provided [`Session`] marker has expired.
    pub async fn current_session(&self) -> Result<Session, Error> {
        self.current_session
            .get_or_try_init(|| async {
                match self
                    .auth_error
                    .get_or_try_init(|| async {
                        match self.do_authentication().await {
                            Ok(s) => Err(s),
                            Err(e) => Ok(e),
                        }
                    })
                    .await
                {
                    Ok(e) => Err(e),
                    Err(s) => Ok(s),
                }
            })
            .await
            .cloned()
            .map_err(Clone::clone)
    }

    /// Starts the provided [`Session`], storing its marker in the client's
    /// cookies.
    ///
    /// # Errors
    ///
    /// Errors if the [`Session`] marker cannot be encoded.
    pub async fn login(&self, session: Session) -> Result<(), Error> {
        let marker = session
            .encode()
            .map_err(|e| Error::internal(&e))
            .map_err(self.error())?;
        let cookie = Cookie::build((Session::MARKER, marker))
            .path("/")
            .same_site(SameSite::Strict)
            .max_age(
                time::Duration::try_from(Session::EXPIRATION_DURATION)
                    .unwrap_or(time::Duration::MAX),
            );

        let mut jar = self.cookies.lock().await;
        *jar = mem::take(&mut *jar).add(cookie);
        drop(jar);

        _ = self
            .current_session
            .get_or_init(|| future::ready(session))
            .await;
        Ok(())
    }

    /// Removes the [`Session`] marker from the client's cookies.
    pub async fn logout(&self) {
        let mut jar = self.cookies.lock().await;
        *jar = mem::take(&mut *jar)
            .remove(Cookie::build(Session::MARKER).path("/"));
    }

    /// Consumes this [`Context`] returning the [`CookieJar`] to be applied to
    /// the response.
    #[must_use]
    pub fn into_cookies(self) -> CookieJar {
        self.cookies.into_inner()
    }

    /// Performs the [`Session`] authentication.
    ///
    /// # Errors
    ///
    /// Errors if the [`Session`] marker is absent or has expired.
    async fn do_authentication(&self) -> Result<Session, Error> {
        let marker = self
            .cookies
            .lock()
            .await
            .get(Session::MARKER)
            .map(|c| c.value().to_owned());
        match marker {
            Some(marker) => self
                .service
                .execute(command::AuthorizeUserSession { marker })
                .await
                .map_err(AsError::into_error),
            None => Err(AuthError::AuthorizationRequired.into()),
        }
        .map_err(self.error())
    }
}

impl juniper::Context for Context {}

#[async_trait]
impl<S> FromRequestParts<S> for Context
where
    S: Send + Sync,
{
    type Rejection = JuniperResponse;

    async fn from_request_parts(
        parts: &mut http::request::Parts,
        _: &S,
    ) -> Result<Self, Self::Rejection> {
        let service =
            parts.extensions.get::<Service>().cloned().ok_or_else(|| {
                JuniperResponse {
                    status_code: http::StatusCode::INTERNAL_SERVER_ERROR,
                    response: GraphQLBatchResponse::Single(
                        GraphQLResponse::error(
                            Error::internal(&"missing `Service` extension")
                                .into_field_error(),
                        ),
                    ),
                }
            })?;

        Ok(Self::new(service, &parts.headers))
    }
}

impl AsError for command::authorize_user_session::ExecutionError {
    fn try_as_error(&self) -> Option<Error> {
        match self {
            Self::Expired(_) => Some(AuthError::SessionExpired.into()),
        }
    }
}

define_error! {
    enum AuthError {
        #[code = "AUTHORIZATION_REQUIRED"]
        #[status = UNAUTHORIZED]
        #[message = "Authorization required: start a session with the \
                     `createUserSession` mutation"]
        AuthorizationRequired,

        #[code = "SESSION_EXPIRED"]
        #[status = UNAUTHORIZED]
        #[message = "Session has expired: start a new one with the \
                     `createUserSession` mutation"]
        SessionExpired,
    }
}

#[cfg(test)]
mod spec {
    use std::sync::Arc;

    use common::DateTime;
    use service::{
        domain::user::Session,
        infra::{remote, Http, JsonFile, Memory},
    };

    use super::Context;

    fn context(cookie: Option<&str>) -> (Context, tempfile::TempDir) {
        let dir = tempfile::tempdir().unwrap();
        let (service, _) = crate::Service::new(
            service::Config::default(),
            Arc::new(Memory::new()),
            Http::new(remote::http::Config {
                url: "http://127.0.0.1:9/users".to_owned(),
                ..remote::http::Config::default()
            })
            .unwrap(),
            JsonFile::new(dir.path()),
        );
        let mut headers = http::HeaderMap::new();
        if let Some(c) = cookie {
            _ = headers.insert(http::header::COOKIE, c.parse().unwrap());
        }
        (Context::new(service, &headers), dir)
    }

    fn cookie_of(session: &Session) -> String {
        let marker = session.encode().unwrap();
        let cookie = axum_extra::extract::cookie::Cookie::new(
            Session::MARKER,
            marker,
        );
        cookie.encoded().to_string()
    }

    #[tokio::test]
    async fn requires_session_marker() {
        let (ctx, _dir) = context(None);

        let err = ctx.current_session().await.unwrap_err();

        assert_eq!(err.code, "AUTHORIZATION_REQUIRED");
        assert_eq!(ctx.error_status_code(), http::StatusCode::UNAUTHORIZED);
        assert!(ctx.try_current_session().await.unwrap().is_none());
    }

    #[tokio::test]
    async fn accepts_valid_session_marker() {
        let session = Session::new();
        let (ctx, _dir) = context(Some(&cookie_of(&session)));

        let current = ctx.current_session().await.unwrap();

        assert_eq!(current, session);
    }

    #[tokio::test]
    async fn rejects_expired_session_marker() {
        let mut session = Session::new();
        session.expires_at = DateTime::UNIX_EPOCH.coerce();
        let (ctx, _dir) = context(Some(&cookie_of(&session)));

        let err = ctx.current_session().await.unwrap_err();

        assert_eq!(err.code, "SESSION_EXPIRED");
        assert!(ctx.try_current_session().await.unwrap().is_none());
    }

    #[tokio::test]
    async fn sets_and_removes_session_cookie() {
        let (ctx, _dir) = context(None);
        let session = Session::new();

        ctx.login(session.clone()).await.unwrap();
        assert_eq!(ctx.current_session().await.unwrap(), session);

        let jar = ctx.cookies.lock().await.clone();
        let cookie = jar.get(Session::MARKER).unwrap();
        assert_eq!(Session::decode(cookie.value()).unwrap(), session);
        assert_eq!(cookie.path(), Some("/"));

        ctx.logout().await;
        assert!(ctx.into_cookies().get(Session::MARKER).is_none());
    }
}

//! GraphQL [`Mutation`]s definitions.

use juniper::graphql_object;
use service::{
    command::{self, refresh_users},
    domain::user,
    Command as _,
};

use crate::{api, define_error, AsError, Context, Error};

/// Root of all GraphQL mutations.
#[derive(Clone, Copy, Debug)]
pub struct Mutation;

impl Mutation {
    /// Name of the [`tracing::Span`] for the mutations.
    const SPAN_NAME: &'static str = "GraphQL mutation";
}

#[graphql_object(context = Context)]
impl Mutation {
    /// Starts a new `UserSession` of the administrator.
    ///
    /// The `UserSession` is kept in the client's cookies and lasts for a
    /// day.
    #[tracing::instrument(
        skip_all,
        fields(
            gql.name = "createUserSession",
            otel.name = Self::SPAN_NAME,
        ),
    )]
    pub async fn create_user_session(
        ctx: &Context,
    ) -> Result<api::Session, Error> {
        let session = ctx
            .service()
            .execute(command::CreateUserSession)
            .await
            .unwrap_or_else(|e| match e {});

        ctx.login(session.clone()).await?;

        Ok(session.into())
    }

    /// Ends the current `UserSession`.
    ///
    /// `User`s arriving from the remote source afterwards are discarded, and
    /// the `User`s table returns to its initial criteria and page.
    #[tracing::instrument(
        skip_all,
        fields(
            gql.name = "deleteUserSession",
            otel.name = Self::SPAN_NAME,
        ),
    )]
    pub async fn delete_user_session(ctx: &Context) -> bool {
        ctx.service()
            .execute(command::EndUserSession)
            .await
            .unwrap_or_else(|e| match e {});
        ctx.logout().await;
        true
    }

    /// Refreshes `User`s from the remote source, replacing them all.
    ///
    /// On failure the previously loaded `User`s are kept, and the error is
    /// reported in the `UserFetchStatus`.
    ///
    /// # Errors
    ///
    /// Possible error codes:
    /// - `AUTHORIZATION_REQUIRED` - no `UserSession` is started;
    /// - `USERS_FETCH_FAILED` - the remote source has failed.
    #[tracing::instrument(
        skip_all,
        fields(
            gql.name = "refreshUsers",
            otel.name = Self::SPAN_NAME,
        ),
    )]
    pub async fn refresh_users(
        ctx: &Context,
    ) -> Result<api::user::Status, Error> {
        _ = ctx.current_session().await?;

        _ = ctx
            .service()
            .execute(command::RefreshUsers)
            .await
            .map_err(AsError::into_error)
            .map_err(ctx.error())?;

        Ok(ctx
            .service()
            .execute(service::query::users::Status)
            .await
            .unwrap_or_else(|e| match e {})
            .into())
    }

    /// Updates the details of the `User` with the specified ID.
    ///
    /// # Errors
    ///
    /// Possible error codes:
    /// - `AUTHORIZATION_REQUIRED` - no `UserSession` is started;
    /// - `NAME_REQUIRED` - the provided name is blank;
    /// - `EMAIL_REQUIRED` - the provided email is blank;
    /// - `USER_NOT_EXISTS` - the `User` with the specified ID does not exist.
    #[tracing::instrument(
        skip_all,
        fields(
            email = %input.email,
            gql.name = "updateUser",
            id = %id,
            name = %input.name,
            otel.name = Self::SPAN_NAME,
            phone = ?input.phone,
        ),
    )]
    pub async fn update_user(
        id: api::user::Id,
        input: api::user::Input,
        ctx: &Context,
    ) -> Result<api::User, Error> {
        _ = ctx.current_session().await?;

        let api::user::Input { name, email, phone } = input;
        ctx.service()
            .execute(command::UpdateUser {
                user_id: id.into(),
                name: name.into(),
                email: email.into(),
                phone: phone.map(user::Phone::from),
            })
            .await
            .map_err(AsError::into_error)
            .map_err(ctx.error())
            .map(Into::into)
    }

    /// Deletes the `User` with the specified ID, returning it.
    ///
    /// # Errors
    ///
    /// Possible error codes:
    /// - `AUTHORIZATION_REQUIRED` - no `UserSession` is started;
    /// - `DELETION_NOT_CONFIRMED` - the `confirmed` flag is not set;
    /// - `USER_NOT_EXISTS` - the `User` with the specified ID does not exist.
    #[tracing::instrument(
        skip_all,
        fields(
            confirmed = confirmed,
            gql.name = "deleteUser",
            id = %id,
            otel.name = Self::SPAN_NAME,
        ),
    )]
    pub async fn delete_user(
        id: api::user::Id,
        confirmed: bool,
        ctx: &Context,
    ) -> Result<api::User, Error> {
        _ = ctx.current_session().await?;

        ctx.service()
            .execute(command::DeleteUser {
                user_id: id.into(),
                confirmed,
            })
            .await
            .map_err(AsError::into_error)
            .map_err(ctx.error())
            .map(Into::into)
    }

    /// Sets the `UserFilter` of the `User`s table.
    ///
    /// Omitted arguments are left unchanged. Any actual change returns the
    /// table to its first page.
    ///
    /// # Errors
    ///
    /// Possible error codes:
    /// - `AUTHORIZATION_REQUIRED` - no `UserSession` is started.
    #[tracing::instrument(
        skip_all,
        fields(
            company = ?company,
            gql.name = "setUserFilter",
            otel.name = Self::SPAN_NAME,
            search = ?search,
        ),
    )]
    pub async fn set_user_filter(
        search: Option<String>,
        company: Option<String>,
        ctx: &Context,
    ) -> Result<api::user::Filter, Error> {
        _ = ctx.current_session().await?;

        Ok(ctx
            .service()
            .execute(command::SetUserFilter {
                search,
                company: company.map(Into::into),
            })
            .await
            .unwrap_or_else(|e| match e {})
            .into())
    }

    /// Clears the `UserFilter` of the `User`s table, returning it to its
    /// first page.
    ///
    /// # Errors
    ///
    /// Possible error codes:
    /// - `AUTHORIZATION_REQUIRED` - no `UserSession` is started.
    #[tracing::instrument(
        skip_all,
        fields(
            gql.name = "clearUserFilter",
            otel.name = Self::SPAN_NAME,
        ),
    )]
    pub async fn clear_user_filter(
        ctx: &Context,
    ) -> Result<api::user::Filter, Error> {
        _ = ctx.current_session().await?;

        ctx.service()
            .execute(command::ClearUserFilter)
            .await
            .unwrap_or_else(|e| match e {});

        Ok(api::Query::criteria(ctx).await.filter)
    }

    /// Toggles sorting of the `User`s table by the provided `key`.
    ///
    /// Toggling the same `key` reverses the `UserSortOrder`, while another
    /// `key` starts ascending.
    ///
    /// # Errors
    ///
    /// Possible error codes:
    /// - `AUTHORIZATION_REQUIRED` - no `UserSession` is started.
    #[tracing::instrument(
        skip_all,
        fields(
            gql.name = "toggleUserSort",
            key = ?key,
            otel.name = Self::SPAN_NAME,
        ),
    )]
    pub async fn toggle_user_sort(
        key: api::user::SortKey,
        ctx: &Context,
    ) -> Result<api::user::Sort, Error> {
        _ = ctx.current_session().await?;

        Ok(ctx
            .service()
            .execute(command::ToggleUserSort { key: key.into() })
            .await
            .unwrap_or_else(|e| match e {})
            .into())
    }

    /// Selects the page of the `User`s table with the provided `number`.
    ///
    /// Numbers out of range are clamped to the nearest existing page.
    ///
    /// # Errors
    ///
    /// Possible error codes:
    /// - `AUTHORIZATION_REQUIRED` - no `UserSession` is started.
    #[tracing::instrument(
        skip_all,
        fields(
            gql.name = "selectUserPage",
            number = number,
            otel.name = Self::SPAN_NAME,
        ),
    )]
    pub async fn select_user_page(
        number: i32,
        ctx: &Context,
    ) -> Result<api::user::Page, Error> {
        let number = usize::try_from(number).unwrap_or(1);
        Self::select_page(ctx, command::SelectUserPage::Exact(number)).await
    }

    /// Selects the page of the `User`s table following the current one.
    ///
    /// # Errors
    ///
    /// Possible error codes:
    /// - `AUTHORIZATION_REQUIRED` - no `UserSession` is started.
    #[tracing::instrument(
        skip_all,
        fields(
            gql.name = "selectNextUserPage",
            otel.name = Self::SPAN_NAME,
        ),
    )]
    pub async fn select_next_user_page(
        ctx: &Context,
    ) -> Result<api::user::Page, Error> {
        Self::select_page(ctx, command::SelectUserPage::Next).await
    }

    /// Selects the page of the `User`s table preceding the current one.
    ///
    /// # Errors
    ///
    /// Possible error codes:
    /// - `AUTHORIZATION_REQUIRED` - no `UserSession` is started.
    #[tracing::instrument(
        skip_all,
        fields(
            gql.name = "selectPreviousUserPage",
            otel.name = Self::SPAN_NAME,
        ),
    )]
    pub async fn select_previous_user_page(
        ctx: &Context,
    ) -> Result<api::user::Page, Error> {
        Self::select_page(ctx, command::SelectUserPage::Prev).await
    }

    /// Sets the dark mode of the workspace.
    ///
    /// # Errors
    ///
    /// Possible error codes:
    /// - `AUTHORIZATION_REQUIRED` - no `UserSession` is started.
    #[tracing::instrument(
        skip_all,
        fields(
            dark_mode = dark_mode,
            gql.name = "updateSettings",
            otel.name = Self::SPAN_NAME,
        ),
    )]
    pub async fn update_settings(
        dark_mode: bool,
        ctx: &Context,
    ) -> Result<api::Settings, Error> {
        _ = ctx.current_session().await?;

        Ok(ctx
            .service()
            .execute(command::UpdateSettings { dark_mode })
            .await
            .unwrap_or_else(|e| match e {})
            .into())
    }

    /// Toggles the visual `Theme` of the workspace, returning the new one.
    ///
    /// # Errors
    ///
    /// Possible error codes:
    /// - `AUTHORIZATION_REQUIRED` - no `UserSession` is started.
    #[tracing::instrument(
        skip_all,
        fields(
            gql.name = "toggleTheme",
            otel.name = Self::SPAN_NAME,
        ),
    )]
    pub async fn toggle_theme(
        ctx: &Context,
    ) -> Result<api::settings::Theme, Error> {
        _ = ctx.current_session().await?;

        Ok(ctx
            .service()
            .execute(command::ToggleTheme)
            .await
            .unwrap_or_else(|e| match e {})
            .into())
    }

    /// Toggles notifications delivered by the provided `channel`.
    ///
    /// # Errors
    ///
    /// Possible error codes:
    /// - `AUTHORIZATION_REQUIRED` - no `UserSession` is started.
    #[tracing::instrument(
        skip_all,
        fields(
            channel = ?channel,
            gql.name = "toggleNotification",
            otel.name = Self::SPAN_NAME,
        ),
    )]
    pub async fn toggle_notification(
        channel: api::settings::Channel,
        ctx: &Context,
    ) -> Result<api::Settings, Error> {
        _ = ctx.current_session().await?;

        Ok(ctx
            .service()
            .execute(command::ToggleNotification {
                channel: channel.into(),
            })
            .await
            .unwrap_or_else(|e| match e {})
            .into())
    }

    /// Restores the default `Settings`, forgetting the stored ones.
    ///
    /// # Errors
    ///
    /// Possible error codes:
    /// - `AUTHORIZATION_REQUIRED` - no `UserSession` is started.
    #[tracing::instrument(
        skip_all,
        fields(
            gql.name = "resetSettings",
            otel.name = Self::SPAN_NAME,
        ),
    )]
    pub async fn reset_settings(ctx: &Context) -> Result<api::Settings, Error> {
        _ = ctx.current_session().await?;

        Ok(ctx
            .service()
            .execute(command::ResetSettings)
            .await
            .unwrap_or_else(|e| match e {})
            .into())
    }
}

impl Mutation {
    /// Executes the provided [`command::SelectUserPage`] on behalf of the
    /// current [`Session`].
    ///
    /// [`Session`]: api::Session
    async fn select_page(
        ctx: &Context,
        cmd: command::SelectUserPage,
    ) -> Result<api::user::Page, Error> {
        _ = ctx.current_session().await?;

        Ok(ctx
            .service()
            .execute(cmd)
            .await
            .unwrap_or_else(|e| match e {})
            .into())
    }
}

impl AsError for refresh_users::ExecutionError {
    fn try_as_error(&self) -> Option<Error> {
        match self {
            Self::Remote(_) => Some(Error::new(
                "USERS_FETCH_FAILED",
                http::StatusCode::BAD_GATEWAY,
                self,
            )),
        }
    }
}

impl AsError for command::update_user::ExecutionError {
    fn try_as_error(&self) -> Option<Error> {
        define_error! {
            enum Error {
                #[code = "NAME_REQUIRED"]
                #[status = BAD_REQUEST]
                #[message = "Name required"]
                NameRequired,

                #[code = "EMAIL_REQUIRED"]
                #[status = BAD_REQUEST]
                #[message = "Email required"]
                EmailRequired,
            }
        }

        match self {
            Self::NameRequired => Some(Error::NameRequired.into()),
            Self::EmailRequired => Some(Error::EmailRequired.into()),
            Self::UserNotExists(_) => Some(api::UserError::NotExists.into()),
        }
    }
}

impl AsError for command::delete_user::ExecutionError {
    fn try_as_error(&self) -> Option<Error> {
        define_error! {
            enum Error {
                #[code = "DELETION_NOT_CONFIRMED"]
                #[status = BAD_REQUEST]
                #[message = "Deletion of a `User` must be confirmed"]
                NotConfirmed,
            }
        }

        match self {
            Self::NotConfirmed => Some(Error::NotConfirmed.into()),
            Self::UserNotExists(_) => Some(api::UserError::NotExists.into()),
        }
    }
}

//! GraphQL [`Query`]s definitions.

use juniper::graphql_object;
use service::{query, Query as _};

use crate::{api, Context, Error};

/// Root of all GraphQL queries.
#[derive(Clone, Copy, Debug)]
pub struct Query;

impl Query {
    /// Name of the [`tracing::Span`] for the queries.
    pub(crate) const SPAN_NAME: &'static str = "GraphQL query";
}

#[graphql_object(context = Context)]
impl Query {
    /// Returns the current `UserSession`, if any.
    ///
    /// Expired `UserSession` is reported as absent.
    #[tracing::instrument(
        skip_all,
        fields(
            gql.name = "session",
            otel.name = Self::SPAN_NAME,
        ),
    )]
    pub async fn session(ctx: &Context) -> Result<Option<api::Session>, Error> {
        Ok(ctx.try_current_session().await?.map(Into::into))
    }

    /// Returns the currently selected page of the filtered and sorted `User`s
    /// table.
    ///
    /// # Errors
    ///
    /// Possible error codes:
    /// - `AUTHORIZATION_REQUIRED` - no `UserSession` is started.
    #[tracing::instrument(
        skip_all,
        fields(
            gql.name = "users",
            otel.name = Self::SPAN_NAME,
        ),
    )]
    pub async fn users(ctx: &Context) -> Result<api::user::Page, Error> {
        _ = ctx.current_session().await?;

        Ok(ctx
            .service()
            .execute(query::users::Page)
            .await
            .unwrap_or_else(|e| match e {})
            .into())
    }

    /// Returns the `User` with the specified ID.
    ///
    /// # Errors
    ///
    /// Possible error codes:
    /// - `AUTHORIZATION_REQUIRED` - no `UserSession` is started;
    /// - `USER_NOT_EXISTS` - the `User` with the specified ID does not exist.
    #[tracing::instrument(
        skip_all,
        fields(
            gql.name = "user",
            id = %id,
            otel.name = Self::SPAN_NAME,
        ),
    )]
    pub async fn user(
        id: api::user::Id,
        ctx: &Context,
    ) -> Result<api::User, Error> {
        _ = ctx.current_session().await?;

        ctx.service()
            .execute(query::user::ById::by(id.into()))
            .await
            .unwrap_or_else(|e| match e {})
            .ok_or_else(|| api::UserError::NotExists.into())
            .map_err(ctx.error())
            .map(Into::into)
    }

    /// Returns the company filter options: `All` followed by the distinct
    /// companies of the `User`s in their first-seen order.
    ///
    /// # Errors
    ///
    /// Possible error codes:
    /// - `AUTHORIZATION_REQUIRED` - no `UserSession` is started.
    #[tracing::instrument(
        skip_all,
        fields(
            gql.name = "companies",
            otel.name = Self::SPAN_NAME,
        ),
    )]
    pub async fn companies(ctx: &Context) -> Result<Vec<String>, Error> {
        _ = ctx.current_session().await?;

        Ok(ctx
            .service()
            .execute(query::users::Companies)
            .await
            .unwrap_or_else(|e| match e {})
            .into_iter()
            .map(|c| c.as_ref().to_owned())
            .collect())
    }

    /// Returns the status of fetching `User`s from the remote source.
    ///
    /// # Errors
    ///
    /// Possible error codes:
    /// - `AUTHORIZATION_REQUIRED` - no `UserSession` is started.
    #[tracing::instrument(
        skip_all,
        fields(
            gql.name = "usersStatus",
            otel.name = Self::SPAN_NAME,
        ),
    )]
    pub async fn users_status(
        ctx: &Context,
    ) -> Result<api::user::Status, Error> {
        _ = ctx.current_session().await?;

        Ok(ctx
            .service()
            .execute(query::users::Status)
            .await
            .unwrap_or_else(|e| match e {})
            .into())
    }

    /// Returns the `UserFilter` and `UserSort` currently applied to the
    /// `User`s table.
    ///
    /// # Errors
    ///
    /// Possible error codes:
    /// - `AUTHORIZATION_REQUIRED` - no `UserSession` is started.
    #[tracing::instrument(
        skip_all,
        fields(
            gql.name = "usersCriteria",
            otel.name = Self::SPAN_NAME,
        ),
    )]
    pub async fn users_criteria(
        ctx: &Context,
    ) -> Result<api::user::Criteria, Error> {
        _ = ctx.current_session().await?;

        Ok(Self::criteria(ctx).await)
    }

    /// Returns the workspace `Settings`.
    ///
    /// # Errors
    ///
    /// Possible error codes:
    /// - `AUTHORIZATION_REQUIRED` - no `UserSession` is started.
    #[tracing::instrument(
        skip_all,
        fields(
            gql.name = "settings",
            otel.name = Self::SPAN_NAME,
        ),
    )]
    pub async fn settings(ctx: &Context) -> Result<api::Settings, Error> {
        _ = ctx.current_session().await?;

        Ok(ctx
            .service()
            .execute(query::settings::Current)
            .await
            .unwrap_or_else(|e| match e {})
            .into())
    }
}

impl Query {
    /// Returns the current [`api::user::Criteria`] of the `User`s table.
    pub(crate) async fn criteria(ctx: &Context) -> api::user::Criteria {
        let (filter, sort) = ctx
            .service()
            .execute(query::users::Criteria)
            .await
            .unwrap_or_else(|e| match e {});
        api::user::Criteria {
            filter: filter.into(),
            sort: sort.into(),
        }
    }
}

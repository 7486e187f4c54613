//! [`Command`] for refreshing [`User`]s from the remote source.

use std::{convert::Infallible, pin::pin};

use common::operations::{By, Replace, Select};
use derive_more::{Display, Error, From};
use futures::future::{self, Either};
use tracerr::Traced;
use tracing as log;

#[cfg(doc)]
use crate::state::Lifetime;
use crate::{
    domain::{user, User},
    infra::{remote, Database, Remote},
    read::user::list::Generation,
    state::FetchDateTime,
    Service,
};

use super::Command;

/// [`Command`] for refreshing [`User`]s from the remote source.
///
/// Replaces the whole [`User`]s collection with the freshly fetched one. On
/// failure the previous collection is kept untouched.
#[derive(Clone, Copy, Debug, Default)]
pub struct RefreshUsers;

/// Output of [`RefreshUsers`] [`Command`].
#[derive(Clone, Copy, Debug, Display, Eq, PartialEq)]
pub enum Output {
    /// [`User`]s have been replaced with the fetched ones.
    #[display("refreshed {count} users")]
    Refreshed {
        /// Number of the fetched [`User`]s.
        count: usize,
    },

    /// Fetched [`User`]s have been discarded, because the view [`Lifetime`]
    /// has ended before they arrived.
    #[display("discarded late result")]
    Discarded,
}

impl<Db, Rm, St> Command<RefreshUsers> for Service<Db, Rm, St>
where
    Db: Database<Replace<Vec<User>>, Ok = Generation, Err = Infallible>,
    Rm: Remote<
        Select<By<Vec<user::Raw>, ()>>,
        Ok = Vec<user::Raw>,
        Err = Traced<remote::Error>,
    >,
{
    type Ok = Output;
    type Err = Traced<ExecutionError>;

    async fn execute(&self, _: RefreshUsers) -> Result<Self::Ok, Self::Err> {
        use ExecutionError as E;

        let lifetime = self.state().lifetime.lock().await.clone();
        {
            let mut status = self.state().status.lock().await;
            status.loading = true;
            status.error = None;
        }

        let fetched = {
            let fetch = pin!(self.remote().execute(Select(By::new(()))));
            let ended = pin!(lifetime.ended());
            match future::select(fetch, ended).await {
                Either::Left((res, _)) => Some(res),
                Either::Right(((), _)) => None,
            }
        };

        let mut status = self.state().status.lock().await;
        status.loading = false;

        let Some(res) = fetched.filter(|_| !lifetime.is_ended()) else {
            log::debug!("discarding `User`s fetched after the view has ended");
            return Ok(Output::Discarded);
        };
        let raw = res
            .inspect_err(|e| {
                status.error = Some(e.as_ref().to_string());
            })
            .map_err(tracerr::map_from_and_wrap!(=> E))?;

        let users = raw.into_iter().map(User::from).collect::<Vec<_>>();
        let count = users.len();
        _ = self
            .database()
            .execute(Replace(users))
            .await
            .unwrap_or_else(|e| match e {});
        status.fetched_at = Some(FetchDateTime::now());

        Ok(Output::Refreshed { count })
    }
}

/// Error of [`RefreshUsers`] [`Command`] execution.
#[derive(Debug, Display, Error, From)]
pub enum ExecutionError {
    /// [`Remote`] error.
    #[display("Failed to fetch users: {_0}")]
    Remote(remote::Error),
}

#[cfg(test)]
mod spec {
    use std::{sync::Arc, time::Duration};

    use crate::{
        command::{
            fixture::{test_service, FakeRemote},
            EndUserSession,
        },
        query, Command as _, Query as _,
    };

    use super::{Output, RefreshUsers};

    #[tokio::test]
    async fn replaces_users_and_updates_status() {
        let (service, _dir) = test_service(FakeRemote::ann_and_bo());

        let out = service.execute(RefreshUsers).await.unwrap();

        assert_eq!(out, Output::Refreshed { count: 2 });
        let status = service.execute(query::users::Status).await.unwrap();
        assert!(!status.loading);
        assert!(status.error.is_none());
        assert!(status.fetched_at.is_some());
        let snapshot = service
            .execute(query::users::Snapshot::by(()))
            .await
            .unwrap();
        assert_eq!(snapshot.users[1].company.as_ref(), "Zed");
    }

    #[tokio::test]
    async fn keeps_previous_users_on_failure() {
        let remote = Arc::new(FakeRemote::ann_and_bo());
        let (service, _dir) = test_service(Arc::clone(&remote));
        _ = service.execute(RefreshUsers).await.unwrap();

        remote.fail(true);
        let err = service.execute(RefreshUsers).await.unwrap_err();

        assert_eq!(err.as_ref().to_string(), "Failed to fetch users: HTTP 500");
        let status = service.execute(query::users::Status).await.unwrap();
        assert_eq!(status.error.as_deref(), Some("HTTP 500"));
        assert!(!status.loading);
        let snapshot = service
            .execute(query::users::Snapshot::by(()))
            .await
            .unwrap();
        assert_eq!(snapshot.users.len(), 2);

        remote.fail(false);
        _ = service.execute(RefreshUsers).await.unwrap();
        let status = service.execute(query::users::Status).await.unwrap();
        assert!(status.error.is_none());
    }

    #[tokio::test]
    async fn discards_result_arriving_after_view_end() {
        let remote =
            FakeRemote::ann_and_bo().delayed(Duration::from_millis(200));
        let (service, _dir) = test_service(remote);

        let (out, ()) = tokio::join!(service.execute(RefreshUsers), async {
            tokio::time::sleep(Duration::from_millis(20)).await;
            service.execute(EndUserSession).await.unwrap();
        });

        assert_eq!(out.unwrap(), Output::Discarded);
        let snapshot = service
            .execute(query::users::Snapshot::by(()))
            .await
            .unwrap();
        assert!(snapshot.users.is_empty());

        // New view lifetime accepts results again.
        let out = service.execute(RefreshUsers).await.unwrap();
        assert_eq!(out, Output::Refreshed { count: 2 });
    }
}

//! [`LoadUsers`] [`Task`].

use std::{convert::Infallible, error::Error};

use common::operations::{By, Perform, Start};
use tracerr::Traced;
use tracing as log;

#[cfg(doc)]
use crate::domain::User;
use crate::{
    command::{refresh_users, RefreshUsers},
    Command, Service,
};

use super::Task;

/// [`Task`] for the initial loading of [`User`]s from the remote source.
///
/// Runs exactly once: further loads are requested manually via the
/// [`RefreshUsers`] [`Command`].
#[derive(Clone, Copy, Debug)]
pub struct LoadUsers<S> {
    /// [`Service`] instance.
    service: S,
}

impl<Db, Rm, St> Task<Start<By<LoadUsers<Self>, ()>>> for Service<Db, Rm, St>
where
    LoadUsers<Self>: Task<Perform<()>, Ok = refresh_users::Output, Err: Error>,
    Self: Clone,
{
    type Ok = ();
    type Err = Infallible;

    async fn execute(
        &self,
        _: Start<By<LoadUsers<Self>, ()>>,
    ) -> Result<Self::Ok, Self::Err> {
        let task = LoadUsers {
            service: self.clone(),
        };

        match task.execute(Perform(())).await {
            Ok(out) => log::info!("`task::LoadUsers` finished: {out}"),
            Err(e) => log::error!("`task::LoadUsers` failed: {e}"),
        }
        Ok(())
    }
}

impl<Db, Rm, St> Task<Perform<()>> for LoadUsers<Service<Db, Rm, St>>
where
    Service<Db, Rm, St>: Command<
        RefreshUsers,
        Ok = refresh_users::Output,
        Err = Traced<refresh_users::ExecutionError>,
    >,
{
    type Ok = refresh_users::Output;
    type Err = Traced<refresh_users::ExecutionError>;

    async fn execute(&self, _: Perform<()>) -> Result<Self::Ok, Self::Err> {
        self.service.execute(RefreshUsers).await
    }
}

#[cfg(test)]
mod spec {
    use std::sync::{
        atomic::{AtomicUsize, Ordering},
        Arc,
    };

    use common::operations::{By, Select};
    use tracerr::Traced;

    use crate::{
        domain::user,
        infra::{remote, JsonFile, Memory, Remote},
        query, Config, Query as _, Service,
    };

    #[derive(Debug, Default)]
    struct CountingRemote(AtomicUsize);

    impl Remote<Select<By<Vec<user::Raw>, ()>>> for CountingRemote {
        type Ok = Vec<user::Raw>;
        type Err = Traced<remote::Error>;

        async fn execute(
            &self,
            _: Select<By<Vec<user::Raw>, ()>>,
        ) -> Result<Self::Ok, Self::Err> {
            _ = self.0.fetch_add(1, Ordering::SeqCst);
            Ok(vec![user::Raw {
                id: 1.into(),
                name: Some("Ann".to_owned()),
                ..user::Raw::default()
            }])
        }
    }

    #[tokio::test]
    async fn loads_users_once_on_startup() {
        let dir = tempfile::tempdir().unwrap();
        let remote = Arc::new(CountingRemote::default());
        let (service, background) = Service::new(
            Config::default(),
            Arc::new(Memory::new()),
            Arc::clone(&remote),
            JsonFile::new(dir.path()),
        );

        background.await.unwrap();

        assert_eq!(remote.0.load(Ordering::SeqCst), 1);
        let snapshot = service
            .execute(query::users::Snapshot::by(()))
            .await
            .unwrap();
        assert_eq!(snapshot.users.len(), 1);
        assert_eq!(snapshot.users[0].name.as_ref(), "Ann");
    }
}

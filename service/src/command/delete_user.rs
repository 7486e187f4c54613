//! [`Command`] for deleting a [`User`].

use std::convert::Infallible;

use common::operations::{By, Delete};
use derive_more::{Display, Error};
use tracerr::Traced;
use tracing as log;

use crate::{
    domain::{user, User},
    infra::Database,
    Service,
};

use super::Command;

/// [`Command`] for deleting a [`User`].
///
/// The deletion is local only: the [`User`] reappears on the next refresh.
#[derive(Clone, Copy, Debug)]
pub struct DeleteUser {
    /// ID of the [`User`] to be deleted.
    pub user_id: user::Id,

    /// Indicator whether the deletion has been confirmed by the
    /// administrator.
    pub confirmed: bool,
}

impl<Db, Rm, St> Command<DeleteUser> for Service<Db, Rm, St>
where
    Db: Database<
        Delete<By<Option<User>, user::Id>>,
        Ok = Option<User>,
        Err = Infallible,
    >,
{
    type Ok = User;
    type Err = Traced<ExecutionError>;

    async fn execute(&self, cmd: DeleteUser) -> Result<Self::Ok, Self::Err> {
        use ExecutionError as E;

        let DeleteUser { user_id, confirmed } = cmd;
        if !confirmed {
            return Err(tracerr::new!(E::NotConfirmed));
        }

        let user = self
            .database()
            .execute(Delete(By::new(user_id)))
            .await
            .unwrap_or_else(|e| match e {})
            .ok_or(E::UserNotExists(user_id))
            .map_err(tracerr::wrap!())?;

        log::debug!("`User(id: {user_id})` deleted");

        Ok(user)
    }
}

/// Error of [`DeleteUser`] [`Command`] execution.
#[derive(Debug, Display, Error)]
pub enum ExecutionError {
    /// Deletion hasn't been confirmed.
    #[display("Deletion is not confirmed")]
    NotConfirmed,

    /// [`User`] doesn't exist.
    #[display("`User(id: {_0})` does not exist")]
    UserNotExists(#[error(not(source))] user::Id),
}

#[cfg(test)]
mod spec {
    use crate::{
        command::{
            fixture::{test_service, FakeRemote},
            RefreshUsers,
        },
        domain::user,
        query, Command as _, Query as _,
    };

    use super::{DeleteUser, ExecutionError};

    #[tokio::test]
    async fn shrinks_every_view() {
        let (service, _dir) = test_service(FakeRemote::ann_and_bo());
        _ = service.execute(RefreshUsers).await.unwrap();
        let page = service.execute(query::users::Page).await.unwrap();
        assert_eq!(page.span.total, 2);

        let deleted = service
            .execute(DeleteUser {
                user_id: user::Id::from(2),
                confirmed: true,
            })
            .await
            .unwrap();

        assert_eq!(deleted.name.as_ref(), "Bo");
        let page = service.execute(query::users::Page).await.unwrap();
        assert_eq!(page.span.total, 1);
        assert!(page.users.iter().all(|u| i32::from(u.id) != 2));
        let companies = service.execute(query::users::Companies).await.unwrap();
        assert_eq!(
            companies.iter().map(AsRef::as_ref).collect::<Vec<&str>>(),
            ["All", "Acme"],
        );
    }

    #[tokio::test]
    async fn requires_confirmation() {
        let (service, _dir) = test_service(FakeRemote::ann_and_bo());
        _ = service.execute(RefreshUsers).await.unwrap();

        let err = service
            .execute(DeleteUser {
                user_id: user::Id::from(1),
                confirmed: false,
            })
            .await
            .unwrap_err();

        assert!(matches!(err.as_ref(), ExecutionError::NotConfirmed));
        let snapshot = service
            .execute(query::users::Snapshot::by(()))
            .await
            .unwrap();
        assert_eq!(snapshot.users.len(), 2);
    }

    #[tokio::test]
    async fn fails_on_unknown_user() {
        let (service, _dir) = test_service(FakeRemote::ann_and_bo());

        let err = service
            .execute(DeleteUser {
                user_id: user::Id::from(1),
                confirmed: true,
            })
            .await
            .unwrap_err();

        assert!(matches!(err.as_ref(), ExecutionError::UserNotExists(_)));
    }
}

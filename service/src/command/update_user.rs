//! [`Command`] for updating a [`User`].

use std::convert::Infallible;

use common::operations::Update;
use derive_more::{Display, Error};
use tracerr::Traced;
use tracing as log;

use crate::{
    domain::{user, User},
    infra::Database,
    Service,
};

use super::Command;

/// [`Command`] for updating the editable fields of a [`User`].
///
/// The change is local only: it's never sent to the remote source, and is
/// lost on the next refresh.
#[derive(Clone, Debug)]
pub struct UpdateUser {
    /// ID of the [`User`] to be updated.
    pub user_id: user::Id,

    /// New [`user::Name`] of the [`User`].
    pub name: user::Name,

    /// New [`user::Email`] of the [`User`].
    pub email: user::Email,

    /// New [`user::Phone`] of the [`User`], if it should be changed.
    pub phone: Option<user::Phone>,
}

impl<Db, Rm, St> Command<UpdateUser> for Service<Db, Rm, St>
where
    Db: Database<Update<user::Edit>, Ok = Option<User>, Err = Infallible>,
{
    type Ok = User;
    type Err = Traced<ExecutionError>;

    async fn execute(&self, cmd: UpdateUser) -> Result<Self::Ok, Self::Err> {
        use ExecutionError as E;

        let UpdateUser {
            user_id,
            name,
            email,
            phone,
        } = cmd;

        if name.is_blank() {
            return Err(tracerr::new!(E::NameRequired));
        }
        if email.is_blank() {
            return Err(tracerr::new!(E::EmailRequired));
        }

        // Saving is simulated, so make it feel like one.
        tokio::time::sleep(self.config().save_latency).await;

        // Merged under the store lock, so concurrent refreshes survive.
        let user = self
            .database()
            .execute(Update(user::Edit {
                id: user_id,
                name,
                email,
                phone,
            }))
            .await
            .unwrap_or_else(|e| match e {})
            .ok_or(E::UserNotExists(user_id))
            .map_err(tracerr::wrap!())?;

        log::debug!("`User(id: {user_id})` updated");

        Ok(user)
    }
}

/// Error of [`UpdateUser`] [`Command`] execution.
#[derive(Debug, Display, Error)]
pub enum ExecutionError {
    /// [`user::Name`] is empty.
    #[display("Name required")]
    NameRequired,

    /// [`user::Email`] is empty.
    #[display("Email required")]
    EmailRequired,

    /// [`User`] doesn't exist.
    #[display("`User(id: {_0})` does not exist")]
    UserNotExists(#[error(not(source))] user::Id),
}

#[cfg(test)]
mod spec {
    use std::time::Duration;

    use common::operations::Replace;

    use crate::{
        command::{
            fixture::{test_service, FakeRemote},
            RefreshUsers,
        },
        domain::user,
        infra::Database as _,
        query, Command as _, Query as _,
    };

    use super::{ExecutionError, UpdateUser};

    fn update(id: i32, name: &str, email: &str) -> UpdateUser {
        UpdateUser {
            user_id: id.into(),
            name: name.into(),
            email: email.into(),
            phone: None,
        }
    }

    #[tokio::test]
    async fn merges_fields_into_single_record() {
        let (service, _dir) = test_service(FakeRemote::ann_and_bo());
        _ = service.execute(RefreshUsers).await.unwrap();
        let before = service
            .execute(query::users::Snapshot::by(()))
            .await
            .unwrap();

        let updated = service
            .execute(UpdateUser {
                phone: Some("555-0000".into()),
                ..update(1, "Annie", "annie@x.com")
            })
            .await
            .unwrap();

        assert_eq!(updated.name.as_ref(), "Annie");
        let after = service
            .execute(query::users::Snapshot::by(()))
            .await
            .unwrap();
        assert_ne!(after.generation, before.generation);
        assert_eq!(after.users[0].email.as_ref(), "annie@x.com");
        assert_eq!(after.users[0].phone.as_ref(), "555-0000");
        assert_eq!(after.users[0].company.as_ref(), "Acme");
        assert_eq!(after.users[1], before.users[1]);
    }

    #[tokio::test]
    async fn keeps_fields_refreshed_during_save() {
        let (service, _dir) = test_service(FakeRemote::ann_and_bo());
        _ = service.execute(RefreshUsers).await.unwrap();
        let mut refreshed = service
            .execute(query::users::Snapshot::by(()))
            .await
            .unwrap()
            .users
            .to_vec();
        refreshed[0].company = "Globex".into();

        let (updated, _) = tokio::join!(
            service.execute(update(1, "Annie", "annie@x.com")),
            async {
                tokio::time::sleep(Duration::from_millis(2)).await;
                service.database().execute(Replace(refreshed)).await
            },
        );

        let updated = updated.unwrap();
        assert_eq!(updated.name.as_ref(), "Annie");
        assert_eq!(updated.company.as_ref(), "Globex");
    }

    #[tokio::test]
    async fn keeps_phone_when_omitted() {
        let (service, _dir) = test_service(FakeRemote::new(serde_json::json!([
            {"id": 3, "name": "Cy", "email": "c@x.com", "phone": "123"},
        ])));
        _ = service.execute(RefreshUsers).await.unwrap();

        let updated = service
            .execute(update(3, "Cyrus", "c@x.com"))
            .await
            .unwrap();

        assert_eq!(updated.phone.as_ref(), "123");
    }

    #[tokio::test]
    async fn requires_name_and_email() {
        let (service, _dir) = test_service(FakeRemote::ann_and_bo());
        _ = service.execute(RefreshUsers).await.unwrap();

        let err = service
            .execute(update(1, "  ", "a@x.com"))
            .await
            .unwrap_err();
        assert!(matches!(err.as_ref(), ExecutionError::NameRequired));
        assert_eq!(err.as_ref().to_string(), "Name required");

        let err = service.execute(update(1, "Ann", "\t")).await.unwrap_err();
        assert!(matches!(err.as_ref(), ExecutionError::EmailRequired));

        let ann = service
            .execute(query::user::ById::by(user::Id::from(1)))
            .await
            .unwrap()
            .unwrap();
        assert_eq!(ann.name.as_ref(), "Ann");
    }

    #[tokio::test]
    async fn fails_on_unknown_user() {
        let (service, _dir) = test_service(FakeRemote::ann_and_bo());
        _ = service.execute(RefreshUsers).await.unwrap();

        let err = service
            .execute(update(42, "Nobody", "n@x.com"))
            .await
            .unwrap_err();

        assert!(matches!(err.as_ref(), ExecutionError::UserNotExists(id)
            if i32::from(*id) == 42));
    }
}

//! [`Command`] definition.

pub mod authorize_user_session;
pub mod clear_user_filter;
pub mod create_user_session;
pub mod delete_user;
pub mod end_user_session;
pub mod refresh_users;
pub mod reset_settings;
pub mod select_user_page;
pub mod set_user_filter;
pub mod toggle_notification;
pub mod toggle_theme;
pub mod toggle_user_sort;
pub mod update_settings;
pub mod update_user;

/// [`Command`] of the [`Service`].
///
/// [`Service`]: crate::Service
pub use common::Handler as Command;

pub use self::{
    authorize_user_session::AuthorizeUserSession,
    clear_user_filter::ClearUserFilter, create_user_session::CreateUserSession,
    delete_user::DeleteUser, end_user_session::EndUserSession,
    refresh_users::RefreshUsers, reset_settings::ResetSettings,
    select_user_page::SelectUserPage, set_user_filter::SetUserFilter,
    toggle_notification::ToggleNotification, toggle_theme::ToggleTheme,
    toggle_user_sort::ToggleUserSort, update_settings::UpdateSettings,
    update_user::UpdateUser,
};

#[cfg(test)]
pub(crate) mod fixture {
    //! Fixtures for testing [`Command`]s.

    use std::{
        sync::{
            atomic::{AtomicBool, Ordering},
            Arc,
        },
        time::Duration,
    };

    use common::operations::{By, Select};
    use serde_json::json;
    use tempfile::TempDir;
    use tracerr::Traced;

    use crate::{
        domain::user,
        infra::{remote, JsonFile, Memory, Remote},
        Config, Service, State,
    };

    /// [`Service`] backed by the test infrastructure.
    pub(crate) type TestService<Rm> = Service<Arc<Memory>, Rm, JsonFile>;

    /// Creates a new [`TestService`] fetching from the provided `remote`.
    ///
    /// Returned [`TempDir`] must outlive the [`TestService`].
    pub(crate) fn test_service<Rm>(remote: Rm) -> (TestService<Rm>, TempDir) {
        let dir = tempfile::tempdir().unwrap();
        let config = Config {
            save_latency: Duration::from_millis(10),
            ..Config::default()
        };
        let service = Service {
            config,
            database: Arc::new(Memory::new()),
            remote,
            storage: JsonFile::new(dir.path()),
            state: Arc::new(State::new(config.page_size)),
        };
        (service, dir)
    }

    /// [`Remote`] serving a fixed list of users, optionally failing.
    #[derive(Debug)]
    pub(crate) struct FakeRemote {
        /// Users to serve.
        users: serde_json::Value,

        /// Indicator whether requests should fail.
        failing: AtomicBool,

        /// Latency of every request.
        delay: Duration,
    }

    impl FakeRemote {
        pub(crate) fn new(users: serde_json::Value) -> Self {
            Self {
                users,
                failing: AtomicBool::new(false),
                delay: Duration::ZERO,
            }
        }

        pub(crate) fn ann_and_bo() -> Self {
            Self::new(json!([
                {"id": 1, "name": "Ann", "email": "a@x.com",
                 "company": {"name": "Acme"}},
                {"id": 2, "name": "Bo", "email": "b@x.com",
                 "company": {"name": "Zed"}},
            ]))
        }

        pub(crate) fn fail(&self, failing: bool) {
            self.failing.store(failing, Ordering::SeqCst);
        }

        pub(crate) fn delayed(mut self, delay: Duration) -> Self {
            self.delay = delay;
            self
        }
    }

    impl Remote<Select<By<Vec<user::Raw>, ()>>> for FakeRemote {
        type Ok = Vec<user::Raw>;
        type Err = Traced<remote::Error>;

        async fn execute(
            &self,
            _: Select<By<Vec<user::Raw>, ()>>,
        ) -> Result<Self::Ok, Self::Err> {
            tokio::time::sleep(self.delay).await;
            if self.failing.load(Ordering::SeqCst) {
                return Err(tracerr::new!(remote::Error::Status(500)));
            }
            serde_json::from_value(self.users.clone())
                .map_err(tracerr::from_and_wrap!())
        }
    }
}

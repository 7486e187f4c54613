//! In-memory [`Database`] implementation.

use std::{collections::HashSet, convert::Infallible, sync::Arc};

use common::operations::{By, Delete, Replace, Select, Update};
use tokio::sync::RwLock;
use tracing as log;

use crate::{
    domain::{user, User},
    infra::Database,
    read::user::list::{Generation, Snapshot},
};

/// In-memory [`Database`] holding the [`User`]s collection.
///
/// Nothing is persisted: the collection lives only as long as this
/// [`Memory`] does.
#[derive(Debug, Default)]
pub struct Memory {
    /// Current [`Snapshot`] of the [`User`]s collection.
    state: RwLock<Snapshot>,
}

impl Memory {
    /// Creates a new empty [`Memory`] [`Database`].
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Applies the provided `change` to the stored [`User`]s, bumping the
    /// [`Generation`] if anything has been changed.
    async fn modify<R>(
        &self,
        change: impl FnOnce(&mut Vec<User>) -> Option<R>,
    ) -> Option<R> {
        let mut state = self.state.write().await;
        let mut users = state.users.to_vec();
        let out = change(&mut users)?;
        state.users = users.into();
        state.generation = state.generation.next();
        Some(out)
    }
}

impl Database<Select<By<Snapshot, ()>>> for Memory {
    type Ok = Snapshot;
    type Err = Infallible;

    async fn execute(
        &self,
        _: Select<By<Snapshot, ()>>,
    ) -> Result<Self::Ok, Self::Err> {
        Ok(self.state.read().await.clone())
    }
}

impl Database<Select<By<Option<User>, user::Id>>> for Memory {
    type Ok = Option<User>;
    type Err = Infallible;

    async fn execute(
        &self,
        Select(by): Select<By<Option<User>, user::Id>>,
    ) -> Result<Self::Ok, Self::Err> {
        let id = by.into_inner();
        Ok(self
            .state
            .read()
            .await
            .users
            .iter()
            .find(|u| u.id == id)
            .cloned())
    }
}

impl Database<Replace<Vec<User>>> for Memory {
    type Ok = Generation;
    type Err = Infallible;

    async fn execute(
        &self,
        Replace(users): Replace<Vec<User>>,
    ) -> Result<Self::Ok, Self::Err> {
        let mut seen = HashSet::with_capacity(users.len());
        let users: Arc<[User]> = users
            .into_iter()
            .filter(|u| {
                let unique = seen.insert(u.id);
                if !unique {
                    log::warn!("dropping `User(id: {})` duplicate", u.id);
                }
                unique
            })
            .collect();

        let mut state = self.state.write().await;
        state.users = users;
        state.generation = state.generation.next();
        Ok(state.generation)
    }
}

impl Database<Update<user::Edit>> for Memory {
    /// [`User`] with the [`user::Edit`] applied, if it exists.
    type Ok = Option<User>;
    type Err = Infallible;

    async fn execute(
        &self,
        Update(edit): Update<user::Edit>,
    ) -> Result<Self::Ok, Self::Err> {
        Ok(self
            .modify(|users| {
                let user = users.iter_mut().find(|u| u.id == edit.id)?;
                edit.apply_to(user);
                Some(user.clone())
            })
            .await)
    }
}

impl Database<Delete<By<Option<User>, user::Id>>> for Memory {
    type Ok = Option<User>;
    type Err = Infallible;

    async fn execute(
        &self,
        Delete(by): Delete<By<Option<User>, user::Id>>,
    ) -> Result<Self::Ok, Self::Err> {
        let id = by.into_inner();
        Ok(self
            .modify(|users| {
                let pos = users.iter().position(|u| u.id == id)?;
                Some(users.remove(pos))
            })
            .await)
    }
}

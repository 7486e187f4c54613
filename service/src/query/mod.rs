//! [`Query`] definition.

pub mod settings;
pub mod user;
pub mod users;

use common::operations::{By, Select};

use crate::{infra::Database, Service};

/// [`Query`] of the [`Service`].
pub use common::Handler as Query;

/// [`Query`] [`Select`]ing a `T`ype from a [`Database`].
#[derive(Clone, Copy, Debug)]
#[expect(clippy::module_name_repetitions, reason = "more readable")]
pub struct DatabaseQuery<T>(T);

impl<W, B> DatabaseQuery<By<W, B>> {
    /// Creates a new [`DatabaseQuery`] selecting a `W` by the provided `B`.
    #[must_use]
    pub fn by(by: B) -> Self {
        Self(By::new(by))
    }
}

impl<Db, Rm, St, W, B> Query<DatabaseQuery<By<W, B>>> for Service<Db, Rm, St>
where
    Db: Database<Select<By<W, B>>, Ok = W>,
{
    type Ok = W;
    type Err = <Db as Database<Select<By<W, B>>>>::Err;

    async fn execute(
        &self,
        DatabaseQuery(by): DatabaseQuery<By<W, B>>,
    ) -> Result<Self::Ok, Self::Err> {
        self.database().execute(Select(by)).await
    }
}

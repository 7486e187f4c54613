//! [`Query`] collection related to the [`Settings`].

use std::convert::Infallible;

use common::operations::{By, Select};
use tracerr::Traced;

use crate::{
    domain::Settings,
    infra::{storage, Storage},
    Service,
};

use super::Query;

/// Queries the current [`Settings`].
#[derive(Clone, Copy, Debug, Default)]
pub struct Current;

impl<Db, Rm, St> Query<Current> for Service<Db, Rm, St>
where
    St: Storage<
        Select<By<Option<Settings>, ()>>,
        Ok = Option<Settings>,
        Err = Traced<storage::Error>,
    >,
{
    type Ok = Settings;
    type Err = Infallible;

    async fn execute(&self, _: Current) -> Result<Self::Ok, Self::Err> {
        Ok(*self.settings().await.read().await)
    }
}

//! HTTP [`Remote`] implementation.

use std::time::Duration;

use common::operations::{By, Select};
use smart_default::SmartDefault;
use tracerr::Traced;
use tracing as log;

use crate::{
    domain::user,
    infra::{remote, Remote},
};

/// Configuration of the [`Http`] [`Remote`].
#[derive(Clone, Debug, SmartDefault)]
pub struct Config {
    /// URL of the endpoint serving the JSON list of users.
    #[default("https://jsonplaceholder.typicode.com/users".to_owned())]
    pub url: String,

    /// Timeout of a single request.
    #[default(Duration::from_secs(10))]
    pub timeout: Duration,
}

/// [`Remote`] fetching users from an HTTP endpoint.
#[derive(Clone, Debug)]
pub struct Http {
    /// Client performing the requests.
    client: reqwest::Client,

    /// URL of the endpoint serving the JSON list of users.
    url: String,
}

impl Http {
    /// Creates a new [`Http`] [`Remote`] with the provided [`Config`].
    ///
    /// # Errors
    ///
    /// Errors if the underlying HTTP client cannot be initialized.
    pub fn new(config: Config) -> Result<Self, Traced<remote::Error>> {
        let client = reqwest::Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(tracerr::from_and_wrap!())?;
        Ok(Self {
            client,
            url: config.url,
        })
    }
}

impl Remote<Select<By<Vec<user::Raw>, ()>>> for Http {
    type Ok = Vec<user::Raw>;
    type Err = Traced<remote::Error>;

    async fn execute(
        &self,
        _: Select<By<Vec<user::Raw>, ()>>,
    ) -> Result<Self::Ok, Self::Err> {
        log::debug!("fetching users from `{}`", self.url);

        let resp = self
            .client
            .get(&self.url)
            .send()
            .await
            .map_err(tracerr::from_and_wrap!())?;

        let status = resp.status();
        if !status.is_success() {
            return Err(tracerr::new!(remote::Error::Status(status.as_u16())));
        }

        let body = resp.bytes().await.map_err(tracerr::from_and_wrap!())?;
        user::Raw::parse_list(&body).map_err(tracerr::from_and_wrap!())
    }
}

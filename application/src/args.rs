//! Command line [`Args`] of the server.

use std::path::PathBuf;

use clap::Parser;

use crate::Config;

/// Server of the users directory administration.
///
/// Options given here take precedence over the configuration file and the
/// `CONF.*` environment variables.
#[derive(Debug, Parser)]
#[command(version, about, long_about = None)]
pub struct Args {
    /// Path to the configuration file.
    #[arg(short, long, default_value = "config.toml")]
    pub config: String,

    /// Port to serve the GraphQL API on.
    #[arg(short, long)]
    pub port: Option<u16>,

    /// URL of the remote users directory.
    #[arg(long, value_name = "URL")]
    pub remote_url: Option<String>,

    /// Directory to persist the settings into.
    #[arg(long, value_name = "DIR")]
    pub data_dir: Option<PathBuf>,
}

impl Args {
    /// Parses command line arguments.
    ///
    /// # Errors
    ///
    /// If the arguments are malformed, or help/version is requested.
    pub fn parse() -> Result<Self, clap::Error> {
        <Self as Parser>::try_parse()
    }

    /// Overrides the provided [`Config`] with the options given in these
    /// [`Args`].
    pub fn override_config(self, config: &mut Config) {
        if let Some(port) = self.port {
            config.server.port = port;
        }
        if let Some(url) = self.remote_url {
            config.service.remote.url = url;
        }
        if let Some(dir) = self.data_dir {
            config.service.storage.dir = dir;
        }
    }
}

#[cfg(test)]
mod spec {
    use clap::{CommandFactory as _, Parser as _};

    use super::{Args, Config};

    #[test]
    fn keeps_config_without_overrides() {
        let args = Args::try_parse_from(["server"]).unwrap();
        let mut config = Config::default();

        assert_eq!(args.config, "config.toml");
        args.override_config(&mut config);

        assert_eq!(config.server.port, Config::default().server.port);
        assert_eq!(
            config.service.storage.dir,
            Config::default().service.storage.dir,
        );
    }

    #[test]
    fn overrides_config_values() {
        let args = Args::try_parse_from([
            "server",
            "-c",
            "custom.toml",
            "--port",
            "9000",
            "--remote-url",
            "http://users.local/users",
            "--data-dir",
            "/var/lib/users",
        ])
        .unwrap();
        let mut config = Config::default();

        assert_eq!(args.config, "custom.toml");
        args.override_config(&mut config);

        assert_eq!(config.server.port, 9000);
        assert_eq!(config.service.remote.url, "http://users.local/users");
        assert_eq!(
            config.service.storage.dir.to_str(),
            Some("/var/lib/users"),
        );
    }

    #[test]
    fn describes_data_dir_as_settings_storage() {
        let help = Args::command().render_long_help().to_string();

        assert!(help.contains("--data-dir <DIR>"));
        assert!(help.contains("Directory to persist the settings into"));
    }
}

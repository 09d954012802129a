use std::path::PathBuf;

use common_utils::consts;
use domain_types::types::{Connectors, HttpOptions, Proxy};
use external_services::logger::config::Log;

#[derive(Clone, serde::Deserialize, Debug)]
pub struct Config {
    pub common: Common,
    #[serde(default)]
    pub log: Log,
    #[serde(default)]
    pub proxy: Proxy,
    #[serde(default)]
    pub http: HttpOptions,
    pub connectors: Connectors,
    /// Marks every response as a test response. Endpoints always come from `connectors`
    #[serde(default)]
    pub test_mode: bool,
}

#[derive(Clone, serde::Deserialize, Debug)]
pub struct Common {
    pub environment: consts::Env,
}

impl Common {
    pub fn validate(&self) -> Result<(), config::ConfigError> {
        let Self { environment } = self;
        match environment {
            consts::Env::Development | consts::Env::Production | consts::Env::Sandbox => Ok(()),
        }
    }
}

impl Config {
    /// Function to build the configuration by picking it from default locations
    pub fn new() -> Result<Self, config::ConfigError> {
        Self::new_with_config_path(None)
    }

    pub fn new_with_config_path(
        explicit_config_path: Option<PathBuf>,
    ) -> Result<Self, config::ConfigError> {
        let env = consts::Env::current_env();
        let config_path = Self::config_path(&env, explicit_config_path);

        let config = Self::builder(&env)?
            .add_source(config::File::from(config_path).required(false))
            .add_source(
                config::Environment::with_prefix(consts::ENV_PREFIX)
                    .try_parsing(true)
                    .separator("__")
                    .list_separator(",")
                    .with_list_parse_key("proxy.bypass_proxy_urls"),
            )
            .build()?;

        Self::deserialize(config)
    }

    fn deserialize(config: config::Config) -> Result<Self, config::ConfigError> {
        #[allow(clippy::print_stderr)]
        let config: Self = serde_path_to_error::deserialize(config).map_err(|error| {
            eprintln!("Unable to deserialize gateway configuration: {error}");
            error.into_inner()
        })?;

        config.common.validate()?;

        Ok(config)
    }

    pub fn builder(
        environment: &consts::Env,
    ) -> Result<config::ConfigBuilder<config::builder::DefaultState>, config::ConfigError> {
        // an override, not a default: the running environment is not configurable
        config::Config::builder().set_override("common.environment", environment.to_string())
    }

    pub fn config_path(
        environment: &consts::Env,
        explicit_config_path: Option<PathBuf>,
    ) -> PathBuf {
        let mut config_path = PathBuf::new();
        if let Some(explicit_config_path_val) = explicit_config_path {
            config_path.push(explicit_config_path_val);
        } else {
            config_path.push(workspace_path());
            config_path.push("config");
            config_path.push(environment.config_path());
        }
        config_path
    }
}

pub fn workspace_path() -> PathBuf {
    if let Ok(manifest_dir) = std::env::var("CARGO_MANIFEST_DIR") {
        let mut path = PathBuf::from(manifest_dir);
        path.pop();
        path.pop();
        path
    } else {
        PathBuf::from(".")
    }
}

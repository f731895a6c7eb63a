use config::{Config as ConfigLoader, Environment, File};
use serde::Deserialize;
use std::env;
use std::path::{Path, PathBuf};

use super::error::Error;
use nicelog_core::ReductionParams;

/// Environment variable that points at an alternative config file.
pub const CONFIG_PATH_ENV: &str = "EXECUTOR_CONFIG";

#[derive(Debug, Deserialize, Clone, PartialEq)]
pub struct ReductionConfig {
    pub convergence_threshold: f64,
    pub max_iterations: usize,
}

impl From<ReductionConfig> for ReductionParams {
    fn from(config: ReductionConfig) -> Self {
        ReductionParams {
            convergence_threshold: config.convergence_threshold,
            max_iterations: config.max_iterations,
        }
    }
}

#[derive(Debug, Deserialize, Clone, PartialEq)]
pub struct DriverConfig {
    pub input: f64,
    pub buffer_size: usize,
    pub batch_size: usize,
    pub checked: bool,
    pub print_trace: bool,
}

#[derive(Debug, Deserialize, Clone, PartialEq)]
pub struct SimulatorConfig {
    pub samples: usize,
    pub min_input: f64,
    pub max_input: f64,
    pub interval_ms: u64,
}

#[derive(Debug, Deserialize, Clone, PartialEq)]
pub struct Config {
    pub reduction: ReductionConfig,
    pub driver: DriverConfig,
    pub simulator: SimulatorConfig,
}

/// Loads configuration from `$EXECUTOR_CONFIG`, or from
/// `crates/executor/Config.toml` under the current directory.
pub fn load_config() -> Result<Config, Error> {
    let config_file_path: PathBuf = match env::var(CONFIG_PATH_ENV) {
        Ok(path) if !path.trim().is_empty() => PathBuf::from(path),
        _ => {
            let base_path = env::current_dir().map_err(|e| {
                Error::ConfigLoadError(format!("Failed to determine current directory: {}", e))
            })?;
            base_path
                .join("crates")
                .join("executor")
                .join("Config.toml")
        }
    };

    load_config_from(&config_file_path)
}

/// Loads configuration from `path`, then applies `EXECUTOR__<SECTION>__<KEY>`
/// environment overrides.
pub fn load_config_from(path: &Path) -> Result<Config, Error> {
    if !path.exists() {
        return Err(Error::ConfigLoadError(format!(
            "Configuration file not found at calculated path: {}",
            path.display()
        )));
    }

    let s = ConfigLoader::builder()
        .add_source(File::from(path).required(true))
        .add_source(
            Environment::with_prefix("EXECUTOR")
                .prefix_separator("__")
                .try_parsing(true)
                .separator("__"),
        )
        .build()
        .map_err(|e| Error::ConfigLoadError(e.to_string()))?;

    let app_config: Config = s
        .try_deserialize()
        .map_err(|e| Error::ConfigLoadError(format!("Failed to deserialize config: {}", e)))?;

    Ok(app_config)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use std::sync::{Mutex, MutexGuard};
    use tempfile::NamedTempFile;

    const MAX_ITERATIONS_ENV: &str = "EXECUTOR__REDUCTION__MAX_ITERATIONS";

    // Tests that load config share the process environment.
    static ENV_LOCK: Mutex<()> = Mutex::new(());

    fn env_lock() -> MutexGuard<'static, ()> {
        ENV_LOCK.lock().unwrap_or_else(|e| e.into_inner())
    }

    /// Sets an environment variable for the guard's lifetime.
    struct EnvVarGuard {
        key: &'static str,
    }

    impl EnvVarGuard {
        fn set(key: &'static str, value: &str) -> Self {
            // SAFETY: callers hold `ENV_LOCK`, so no other test touches the environment.
            unsafe { env::set_var(key, value) };
            EnvVarGuard { key }
        }
    }

    impl Drop for EnvVarGuard {
        fn drop(&mut self) {
            // SAFETY: see `EnvVarGuard::set`.
            unsafe { env::remove_var(self.key) };
        }
    }

    const MOCK_CONFIG: &str = "\
[reduction]
convergence_threshold = 0.001
max_iterations = 20

[driver]
input = 42.0
buffer_size = 4
batch_size = 8
checked = true
print_trace = false

[simulator]
samples = 10
min_input = 0.5
max_input = 128.0
interval_ms = 1
";

    fn write_config(content: &str) -> NamedTempFile {
        let mut file = tempfile::Builder::new()
            .suffix(".toml")
            .tempfile()
            .expect("Failed to create temp file");
        file.write_all(content.as_bytes())
            .expect("Failed to write mock config");
        file
    }

    #[test]
    fn test_load_config_from_file() {
        let _lock = env_lock();
        let file = write_config(MOCK_CONFIG);
        let config = load_config_from(file.path()).expect("Config should load");

        assert_eq!(config.reduction.max_iterations, 20);
        assert_eq!(config.driver.input, 42.0);
        assert!(config.driver.checked);
        assert_eq!(config.simulator.samples, 10);

        let params: ReductionParams = config.reduction.into();
        assert_eq!(params.convergence_threshold, 0.001);
        assert_eq!(params.max_iterations, 20);
    }

    #[test]
    fn test_missing_file_is_reported() {
        let result = load_config_from(Path::new("does_not_exist/Config.toml"));
        assert!(matches!(result, Err(Error::ConfigLoadError(_))));
    }

    #[test]
    fn test_incomplete_file_fails_to_deserialize() {
        let _lock = env_lock();
        let file = write_config("[reduction]\nmax_iterations = 52\n");
        let result = load_config_from(file.path());
        assert!(matches!(result, Err(Error::ConfigLoadError(_))));
    }

    #[test]
    fn test_shipped_config_matches_defaults() {
        let path = Path::new(env!("CARGO_MANIFEST_DIR")).join("Config.toml");
        let _lock = env_lock();
        let config = load_config_from(&path).expect("Shipped config should load");

        assert_eq!(
            ReductionParams::from(config.reduction),
            ReductionParams::default()
        );
        assert_eq!(config.driver.input, 100.0);
    }

    #[test]
    fn test_env_override_with_double_underscore_separator() {
        let _lock = env_lock();
        let file = write_config(MOCK_CONFIG);
        let _var = EnvVarGuard::set(MAX_ITERATIONS_ENV, "7");

        let config = load_config_from(file.path()).expect("Config should load");

        assert_eq!(config.reduction.max_iterations, 7);
        assert_eq!(config.reduction.convergence_threshold, 0.001);
    }

    #[test]
    fn test_config_path_env_selects_file() {
        let _lock = env_lock();
        let file = write_config(MOCK_CONFIG);
        let path = file.path().to_str().expect("Failed to get path string");
        let _var = EnvVarGuard::set(CONFIG_PATH_ENV, path);

        let config = load_config().expect("Config should load from EXECUTOR_CONFIG");

        assert_eq!(config.driver.input, 42.0);
        assert_eq!(config.simulator.samples, 10);
    }
}

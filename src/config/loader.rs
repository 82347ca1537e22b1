use crate::config::config::AppConfig;
use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};
use std::path::{Path, PathBuf};

/// 环境变量前缀，嵌套字段用 `__` 分隔，例如 `ENROLLEASE_SERVER__PORT`
pub const ENV_PREFIX: &str = "ENROLLEASE_";

/// 配置加载器
pub struct ConfigLoader;

impl ConfigLoader {
    /// 从默认路径加载配置
    ///
    /// 搜索路径：
    /// 1. 内置默认值
    /// 2. ./config.toml
    /// 3. 环境变量
    pub fn load() -> Result<AppConfig, figment::Error> {
        Self::figment(&default_config_path()).extract()
    }

    fn figment(path: &Path) -> Figment {
        Figment::from(Serialized::defaults(AppConfig::default()))
            .merge(Toml::file(path))
            .merge(Env::prefixed(ENV_PREFIX).split("__"))
    }

    /// 验证配置
    pub fn validate(config: &AppConfig) -> Result<(), ConfigValidationError> {
        if config.server.port == 0 {
            return Err(ConfigValidationError::InvalidPort);
        }

        if config.corpus.path.as_os_str().is_empty() {
            return Err(ConfigValidationError::MissingCorpusPath);
        }

        if config.form.minimum_age > config.form.maximum_age {
            return Err(ConfigValidationError::InvalidAgeRange {
                minimum: config.form.minimum_age,
                maximum: config.form.maximum_age,
            });
        }

        if config.session.idle_timeout == 0 || config.session.sweep_interval == 0 {
            return Err(ConfigValidationError::InvalidSessionTimeout);
        }

        Ok(())
    }
}

/// 配置验证错误
#[derive(thiserror::Error, Debug)]
pub enum ConfigValidationError {
    #[error("server port must be greater than 0")]
    InvalidPort,

    #[error("corpus path is not configured")]
    MissingCorpusPath,

    #[error("minimum age {minimum} exceeds maximum age {maximum}")]
    InvalidAgeRange { minimum: u32, maximum: u32 },

    #[error("session idle timeout and sweep interval must be greater than 0")]
    InvalidSessionTimeout,
}

/// 获取默认配置文件路径
pub fn default_config_path() -> PathBuf {
    PathBuf::from("config.toml")
}

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// 服务器配置
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    /// 服务地址
    pub host: String,
    /// 服务端口
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".into(),
            port: 8080,
        }
    }
}

/// 意图语料配置
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct CorpusConfig {
    /// intents JSON 文件路径
    pub path: PathBuf,
}

impl Default for CorpusConfig {
    fn default() -> Self {
        Self {
            path: PathBuf::from("data/intents.json"),
        }
    }
}

/// 所有相似度都为 0 时的处理策略
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "snake_case")]
pub enum NoMatchPolicy {
    /// 返回第一条模式对应的回复（argmax 落在下标 0）
    #[default]
    FirstPattern,
    /// 返回固定的兜底回复
    Fallback,
}

/// 聊天机器人配置
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ChatbotConfig {
    /// 找不到映射回复时的兜底文本
    pub fallback_response: String,
    /// 零相似度策略
    pub no_match_policy: NoMatchPolicy,
    /// 是否在相似度检索前启用问候捷径
    pub greeting_shortcut: bool,
    /// 问候随机数种子（None 表示使用系统熵）
    pub greeting_seed: Option<u64>,
}

impl Default for ChatbotConfig {
    fn default() -> Self {
        Self {
            fallback_response:
                "I'm sorry, I didn't understand that. Could you please rephrase your question?"
                    .into(),
            no_match_policy: NoMatchPolicy::FirstPattern,
            greeting_shortcut: false,
            greeting_seed: None,
        }
    }
}

/// 学生信息表单配置
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct FormConfig {
    /// 最低年龄
    pub minimum_age: u32,
    /// 表单可填写的最大年龄
    pub maximum_age: u32,
    /// 最早可选出生日期
    pub earliest_birthdate: NaiveDate,
}

impl Default for FormConfig {
    fn default() -> Self {
        Self {
            minimum_age: 17,
            maximum_age: 100,
            earliest_birthdate: NaiveDate::from_ymd_opt(1950, 1, 1).unwrap_or_default(),
        }
    }
}

/// 会话配置
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SessionConfig {
    /// 空闲超时（秒），超过后会话被回收
    pub idle_timeout: u64,
    /// 清理任务间隔（秒）
    pub sweep_interval: u64,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            idle_timeout: 1800,
            sweep_interval: 60,
        }
    }
}

/// 日志配置
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// 日志级别（RUST_LOG 优先）
    pub level: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".into(),
        }
    }
}

/// 应用配置
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// 服务器配置
    pub server: ServerConfig,
    /// 语料配置
    pub corpus: CorpusConfig,
    /// 聊天机器人配置
    pub chatbot: ChatbotConfig,
    /// 表单配置
    pub form: FormConfig,
    /// 会话配置
    pub session: SessionConfig,
    /// 日志配置
    pub logging: LoggingConfig,
    /// 应用名称
    pub app_name: String,
    /// 环境
    pub environment: String,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            server: ServerConfig::default(),
            corpus: CorpusConfig::default(),
            chatbot: ChatbotConfig::default(),
            form: FormConfig::default(),
            session: SessionConfig::default(),
            logging: LoggingConfig::default(),
            app_name: "enrollease".into(),
            environment: "production".into(),
        }
    }
}

impl AppConfig {
    /// 创建开发环境配置
    pub fn development() -> Self {
        Self {
            server: ServerConfig {
                host: "127.0.0.1".into(),
                port: 8080,
            },
            chatbot: ChatbotConfig {
                greeting_seed: Some(42),
                ..ChatbotConfig::default()
            },
            logging: LoggingConfig {
                level: "debug".into(),
            },
            environment: "development".into(),
            ..Self::default()
        }
    }
}

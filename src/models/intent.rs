//! 意图语料模型
//!
//! 语料在启动时从 JSON 文件加载一次，此后只读。

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::Path;
use tracing::{debug, warn};

use crate::error::{AppError, Result};

/// 一个意图：同一类问题的若干种说法及其标准回复
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Intent {
    /// 意图标签
    pub tag: String,
    /// 示例问法
    #[serde(default)]
    pub patterns: Vec<String>,
    /// 回复列表，只使用第一条
    #[serde(default)]
    pub responses: Vec<String>,
}

impl Intent {
    /// 标准回复
    pub fn canonical_response(&self) -> Option<&str> {
        self.responses.first().map(String::as_str)
    }
}

/// 意图语料
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct IntentCorpus {
    pub intents: Vec<Intent>,
}

impl IntentCorpus {
    /// 从 JSON 文本解析语料
    pub fn from_json(content: &str) -> Result<Self> {
        let corpus: IntentCorpus = serde_json::from_str(content)
            .map_err(|e| AppError::CorpusLoad(format!("malformed intents JSON: {}", e)))?;
        corpus.validate()?;
        Ok(corpus)
    }

    /// 从文件加载语料
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|e| {
            AppError::CorpusLoad(format!("cannot read {}: {}", path.display(), e))
        })?;

        let corpus = Self::from_json(&content)?;
        debug!(
            "Loaded {} intents ({} patterns) from {}",
            corpus.intents.len(),
            corpus.pattern_count(),
            path.display()
        );
        Ok(corpus)
    }

    fn validate(&self) -> Result<()> {
        if self.pattern_count() == 0 {
            return Err(AppError::CorpusLoad(
                "corpus contains no patterns".to_string(),
            ));
        }

        for intent in &self.intents {
            if !intent.patterns.is_empty() && intent.responses.is_empty() {
                return Err(AppError::CorpusLoad(format!(
                    "intent '{}' has patterns but no responses",
                    intent.tag
                )));
            }
        }

        Ok(())
    }

    /// 模式总数（含重复）
    pub fn pattern_count(&self) -> usize {
        self.intents.iter().map(|i| i.patterns.len()).sum()
    }

    /// 按出现顺序展开的全部模式
    pub fn patterns(&self) -> Vec<String> {
        self.intents
            .iter()
            .flat_map(|i| i.patterns.iter().cloned())
            .collect()
    }

    /// 模式到回复的映射
    ///
    /// 相同模式出现在多个意图中时，后出现的覆盖先出现的。
    pub fn response_map(&self) -> HashMap<String, String> {
        let mut map = HashMap::with_capacity(self.pattern_count());
        for intent in &self.intents {
            let Some(response) = intent.canonical_response() else {
                continue;
            };
            for pattern in &intent.patterns {
                if let Some(previous) = map.insert(pattern.clone(), response.to_string()) {
                    if previous != response {
                        warn!(
                            "Pattern '{}' is shared by several intents; '{}' wins",
                            pattern, intent.tag
                        );
                    }
                }
            }
        }
        map
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    const SAMPLE: &str = r#"{
        "intents": [
            {"tag": "contact", "patterns": ["What is your contact number?", "Phone"], "responses": ["Call 555-0100", "unused"]},
            {"tag": "location", "patterns": ["Where is the college located?", "Phone"], "responses": ["Los Baños, Laguna"]}
        ]
    }"#;

    #[test]
    fn test_patterns_keep_order_and_duplicates() {
        let corpus = IntentCorpus::from_json(SAMPLE).unwrap();
        assert_eq!(
            corpus.patterns(),
            vec![
                "What is your contact number?",
                "Phone",
                "Where is the college located?",
                "Phone"
            ]
        );
        assert_eq!(corpus.pattern_count(), 4);
    }

    #[test]
    fn test_response_map_uses_first_response_and_later_intent_wins() {
        let corpus = IntentCorpus::from_json(SAMPLE).unwrap();
        let map = corpus.response_map();
        assert_eq!(map.len(), 3);
        assert_eq!(map["What is your contact number?"], "Call 555-0100");
        assert_eq!(map["Phone"], "Los Baños, Laguna");
    }

    #[test]
    fn test_malformed_json_is_corpus_error() {
        let err = IntentCorpus::from_json("{\"intents\": [").unwrap_err();
        assert!(matches!(err, AppError::CorpusLoad(_)));
    }

    #[test]
    fn test_empty_corpus_is_rejected() {
        let err = IntentCorpus::from_json(r#"{"intents": []}"#).unwrap_err();
        assert!(matches!(err, AppError::CorpusLoad(_)));
    }

    #[test]
    fn test_intent_without_responses_is_rejected() {
        let err = IntentCorpus::from_json(
            r#"{"intents": [{"tag": "x", "patterns": ["hello"], "responses": []}]}"#,
        )
        .unwrap_err();
        assert!(err.to_string().contains("'x'"));
    }

    #[test]
    fn test_load_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(SAMPLE.as_bytes()).unwrap();

        let corpus = IntentCorpus::load(file.path()).unwrap();
        assert_eq!(corpus.intents.len(), 2);
    }

    #[test]
    fn test_missing_file_is_corpus_error() {
        let err = IntentCorpus::load("/nonexistent/intents.json").unwrap_err();
        assert!(matches!(err, AppError::CorpusLoad(_)));
    }
}

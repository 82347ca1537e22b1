//! 意图应答服务
//!
//! 对查询打分，取相似度最大的模式（并列时取最先出现者），返回其映射回复。

use std::collections::HashMap;
use std::sync::Arc;
use tracing::debug;

use crate::config::config::{ChatbotConfig, NoMatchPolicy};
use crate::error::{AppError, Result};
use crate::index::{SimilarityIndex, create_similarity_index};
use crate::models::intent::IntentCorpus;

/// 应答选项
#[derive(Debug, Clone)]
pub struct ResponderOptions {
    pub fallback_response: String,
    pub no_match_policy: NoMatchPolicy,
}

impl Default for ResponderOptions {
    fn default() -> Self {
        ChatbotConfig::default().into()
    }
}

impl From<ChatbotConfig> for ResponderOptions {
    fn from(config: ChatbotConfig) -> Self {
        Self {
            fallback_response: config.fallback_response,
            no_match_policy: config.no_match_policy,
        }
    }
}

/// 最佳匹配
#[derive(Debug, Clone, PartialEq)]
pub struct BestMatch {
    /// 模式在语料中的位置
    pub position: usize,
    pub pattern: String,
    pub score: f32,
}

pub struct Responder {
    index: Arc<dyn SimilarityIndex>,
    patterns: Vec<String>,
    responses: HashMap<String, String>,
    options: ResponderOptions,
}

impl std::fmt::Debug for Responder {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Responder")
            .field("index", &"Arc<dyn SimilarityIndex>")
            .field("patterns", &self.patterns.len())
            .field("options", &self.options)
            .finish()
    }
}

impl Responder {
    /// 使用已构建的索引创建应答器
    pub fn new(
        corpus: &IntentCorpus,
        index: Arc<dyn SimilarityIndex>,
        options: ResponderOptions,
    ) -> Result<Self> {
        let patterns = corpus.patterns();
        if index.len() != patterns.len() {
            return Err(AppError::CorpusLoad(format!(
                "index holds {} patterns but corpus has {}",
                index.len(),
                patterns.len()
            )));
        }

        Ok(Self {
            index,
            patterns,
            responses: corpus.response_map(),
            options,
        })
    }

    /// 在语料上构建 TF-IDF 索引并创建应答器
    pub fn from_corpus(corpus: &IntentCorpus, options: ResponderOptions) -> Result<Self> {
        let index = create_similarity_index(&corpus.patterns())?;
        Self::new(corpus, index, options)
    }

    pub fn pattern_count(&self) -> usize {
        self.patterns.len()
    }

    /// 找出与查询最相似的模式
    pub fn best_match(&self, query: &str) -> Result<BestMatch> {
        let scores = self.index.score(query)?;
        if scores.len() != self.patterns.len() {
            return Err(AppError::Lookup(format!(
                "expected {} scores, got {}",
                self.patterns.len(),
                scores.len()
            )));
        }

        let mut best: Option<(usize, f32)> = None;
        for (position, &score) in scores.iter().enumerate() {
            if score.is_nan() {
                return Err(AppError::Lookup(format!(
                    "similarity for pattern {} is not a number",
                    position
                )));
            }
            match best {
                Some((_, top)) if score <= top => {}
                _ => best = Some((position, score)),
            }
        }

        let (position, score) =
            best.ok_or_else(|| AppError::Lookup("no patterns to compare against".to_string()))?;

        Ok(BestMatch {
            position,
            pattern: self.patterns[position].clone(),
            score,
        })
    }

    /// 返回查询的回复
    pub fn respond(&self, query: &str) -> Result<String> {
        let best = self.best_match(query)?;

        if best.score <= 0.0 {
            debug!("No pattern shares a term with query '{}'", query);
            if self.options.no_match_policy == NoMatchPolicy::Fallback {
                return Ok(self.options.fallback_response.clone());
            }
        }

        debug!(
            "Query '{}' matched pattern '{}' (score {:.3})",
            query, best.pattern, best.score
        );

        Ok(self
            .responses
            .get(&best.pattern)
            .cloned()
            .unwrap_or_else(|| self.options.fallback_response.clone()))
    }
}

//! 词法相似度索引模块
//!
//! 归一化、停用词、TF-IDF 向量化与余弦打分。

pub mod lemmatizer;
pub mod normalizer;
pub mod stop_words;
pub mod tfidf;

use std::sync::Arc;

use crate::error::Result;

pub use normalizer::Normalizer;
pub use tfidf::TfidfIndex;

/// 已拟合的相似度索引
///
/// `score` 为每条已存模式返回一个分数，顺序与拟合时的模式顺序一致。
pub trait SimilarityIndex: Send + Sync {
    /// 已索引模式数量
    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// 查询与每条模式的相似度
    fn score(&self, query: &str) -> Result<Vec<f32>>;
}

/// 构建默认的 TF-IDF 索引
pub fn create_similarity_index(patterns: &[String]) -> Result<Arc<dyn SimilarityIndex>> {
    let index = TfidfIndex::fit(patterns, Normalizer::new())?;
    tracing::info!(
        "Similarity index built: {} patterns, {} terms",
        index.len(),
        index.vocabulary_size()
    );
    Ok(Arc::new(index))
}

//! TF-IDF 相似度索引
//!
//! 词频 × 平滑 IDF，向量做 L2 归一化，余弦相似度即点积。

use std::collections::{BTreeSet, HashMap};

use crate::error::{AppError, Result};
use crate::index::SimilarityIndex;
use crate::index::normalizer::Normalizer;
use crate::index::stop_words::is_stop_word;

/// 稀疏向量：按词表下标升序排列的 (下标, 权重)
pub type SparseVector = Vec<(usize, f32)>;

#[derive(Debug, Clone)]
pub struct TfidfIndex {
    normalizer: Normalizer,
    vocabulary: HashMap<String, usize>,
    idf: Vec<f32>,
    vectors: Vec<SparseVector>,
}

impl TfidfIndex {
    /// 在模式列表上拟合索引
    pub fn fit(patterns: &[String], normalizer: Normalizer) -> Result<Self> {
        if patterns.is_empty() {
            return Err(AppError::CorpusLoad(
                "cannot build an index over an empty pattern list".to_string(),
            ));
        }

        let documents: Vec<Vec<String>> = patterns
            .iter()
            .map(|p| Self::terms(&normalizer, p))
            .collect();

        let terms: BTreeSet<&String> = documents.iter().flatten().collect();
        if terms.is_empty() {
            return Err(AppError::CorpusLoad(
                "pattern vocabulary is empty after stop-word removal".to_string(),
            ));
        }

        let vocabulary: HashMap<String, usize> = terms
            .into_iter()
            .enumerate()
            .map(|(i, t)| (t.clone(), i))
            .collect();

        let mut df = vec![0usize; vocabulary.len()];
        for doc in &documents {
            let unique: BTreeSet<usize> =
                doc.iter().filter_map(|t| vocabulary.get(t)).copied().collect();
            for i in unique {
                df[i] += 1;
            }
        }

        let n = documents.len() as f32;
        let idf = df
            .iter()
            .map(|&d| ((1.0 + n) / (1.0 + d as f32)).ln() + 1.0)
            .collect();

        let mut index = Self {
            normalizer,
            vocabulary,
            idf,
            vectors: Vec::new(),
        };
        let vectors = documents.iter().map(|doc| index.weigh(doc)).collect();
        index.vectors = vectors;

        Ok(index)
    }

    fn terms(normalizer: &Normalizer, text: &str) -> Vec<String> {
        normalizer
            .normalize(text)
            .into_iter()
            .filter(|t| !is_stop_word(t))
            .collect()
    }

    fn weigh(&self, terms: &[String]) -> SparseVector {
        let mut counts: HashMap<usize, f32> = HashMap::new();
        for term in terms {
            if let Some(&i) = self.vocabulary.get(term) {
                *counts.entry(i).or_insert(0.0) += 1.0;
            }
        }

        let mut vector: SparseVector = counts
            .into_iter()
            .map(|(i, tf)| (i, tf * self.idf[i]))
            .collect();
        vector.sort_by_key(|(i, _)| *i);

        let norm = vector.iter().map(|(_, w)| w * w).sum::<f32>().sqrt();
        if norm > 0.0 {
            for (_, w) in &mut vector {
                *w /= norm;
            }
        }
        vector
    }

    /// 将任意文本映射到已拟合的向量空间，未登录词被忽略
    pub fn vectorize(&self, text: &str) -> SparseVector {
        self.weigh(&Self::terms(&self.normalizer, text))
    }

    pub fn vocabulary_size(&self) -> usize {
        self.vocabulary.len()
    }

    #[cfg(test)]
    pub fn pattern_vector(&self, position: usize) -> Option<&SparseVector> {
        self.vectors.get(position)
    }

    fn dot(a: &[(usize, f32)], b: &[(usize, f32)]) -> f32 {
        let (mut i, mut j, mut sum) = (0, 0, 0.0);
        while i < a.len() && j < b.len() {
            match a[i].0.cmp(&b[j].0) {
                std::cmp::Ordering::Less => i += 1,
                std::cmp::Ordering::Greater => j += 1,
                std::cmp::Ordering::Equal => {
                    sum += a[i].1 * b[j].1;
                    i += 1;
                    j += 1;
                }
            }
        }
        sum
    }
}

impl SimilarityIndex for TfidfIndex {
    fn len(&self) -> usize {
        self.vectors.len()
    }

    fn score(&self, query: &str) -> Result<Vec<f32>> {
        let query = self.vectorize(query);
        Ok(self.vectors.iter().map(|v| Self::dot(&query, v)).collect())
    }
}

//! 文本归一化
//!
//! 小写 → 去除 ASCII 标点 → 按空白切词 → 词形还原。

use crate::index::lemmatizer::Lemmatizer;

#[derive(Debug, Clone, Default)]
pub struct Normalizer {
    lemmatizer: Lemmatizer,
}

impl Normalizer {
    pub fn new() -> Self {
        Self {
            lemmatizer: Lemmatizer::new(),
        }
    }

    /// 归一化为有序词元序列，空输入得到空序列
    pub fn normalize(&self, text: &str) -> Vec<String> {
        let cleaned: String = text
            .to_lowercase()
            .chars()
            .filter(|c| !c.is_ascii_punctuation())
            .collect();

        cleaned
            .split_whitespace()
            .map(|token| self.lemmatizer.lemmatize(token))
            .collect()
    }
}

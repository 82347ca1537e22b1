//! EnrollEase - 招生咨询聊天机器人
//!
//! 学生填写信息表单后，通过 TF-IDF 余弦相似度将问题匹配到意图语料中
//! 最相近的模式并返回对应回复。

pub mod api;
pub mod config;
pub mod error;
pub mod index;
pub mod models;
pub mod observability;
pub mod security;
pub mod services;

//! 表单元数据 DTO

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// 学生信息表单的取值范围
#[derive(Debug, Serialize, Deserialize)]
pub struct FormOptionsResponse {
    /// 可选学院
    pub courses: Vec<String>,
    /// 年龄下限（表单控件）
    pub min_age: u32,
    /// 年龄上限（表单控件）
    pub max_age: u32,
    /// 使用聊天机器人的最低年龄
    pub required_age: u32,
    /// 最早出生日期
    pub earliest_birthdate: NaiveDate,
    /// 最晚出生日期（今天）
    pub latest_birthdate: NaiveDate,
}

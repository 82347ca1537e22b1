use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// 可选学院
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum Course {
    #[serde(rename = "College of Computer Studies")]
    ComputerStudies,
    #[serde(rename = "College of Fisheries")]
    Fisheries,
    #[serde(rename = "College of Business and Administration")]
    BusinessAdministration,
}

impl Course {
    pub const ALL: [Course; 3] = [
        Course::ComputerStudies,
        Course::Fisheries,
        Course::BusinessAdministration,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            Course::ComputerStudies => "College of Computer Studies",
            Course::Fisheries => "College of Fisheries",
            Course::BusinessAdministration => "College of Business and Administration",
        }
    }
}

impl fmt::Display for Course {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for Course {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Course::ALL
            .into_iter()
            .find(|c| c.label() == s.trim())
            .ok_or_else(|| format!("Unknown course: {}", s))
    }
}

/// 通过表单校验的学生信息
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct StudentProfile {
    pub name: String,
    pub age: u32,
    pub course: Course,
    pub birthdate: NaiveDate,
}

impl StudentProfile {
    /// 会话开始时的个性化问候
    pub fn welcome_message(&self) -> String {
        format!("Hello👋 {}! How will I assist you today?", self.name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_course_round_trip_through_label() {
        for course in Course::ALL {
            assert_eq!(course.label().parse::<Course>().unwrap(), course);
        }
        assert!("College of Magic".parse::<Course>().is_err());
    }

    #[test]
    fn test_course_serializes_as_label() {
        let json = serde_json::to_string(&Course::Fisheries).unwrap();
        assert_eq!(json, "\"College of Fisheries\"");
    }

    #[test]
    fn test_welcome_message() {
        let profile = StudentProfile {
            name: "Juan".into(),
            age: 18,
            course: Course::ComputerStudies,
            birthdate: NaiveDate::from_ymd_opt(2006, 1, 1).unwrap(),
        };
        assert_eq!(
            profile.welcome_message(),
            "Hello👋 Juan! How will I assist you today?"
        );
    }
}

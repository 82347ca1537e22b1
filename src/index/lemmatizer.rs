//! Rule-based noun lemmatizer.
//!
//! Reduces plural nouns to their singular dictionary form. Irregular forms
//! come from a fixed exception table; everything else goes through suffix
//! rules. Words that do not look plural are returned unchanged.

use once_cell::sync::Lazy;
use std::collections::HashMap;

static EXCEPTIONS: Lazy<HashMap<&'static str, &'static str>> = Lazy::new(|| {
    [
        ("men", "man"),
        ("women", "woman"),
        ("children", "child"),
        ("feet", "foot"),
        ("teeth", "tooth"),
        ("mice", "mouse"),
        ("geese", "goose"),
        ("people", "people"),
        ("criteria", "criterion"),
        ("phenomena", "phenomenon"),
        ("data", "datum"),
        ("alumni", "alumnus"),
        ("curricula", "curriculum"),
        ("syllabi", "syllabus"),
        ("theses", "thesis"),
        ("analyses", "analysis"),
        ("bases", "basis"),
        ("crises", "crisis"),
        ("indices", "index"),
        ("appendices", "appendix"),
        ("quizzes", "quiz"),
        ("lives", "life"),
        ("wives", "wife"),
        ("knives", "knife"),
        ("leaves", "leaf"),
        ("halves", "half"),
        ("shelves", "shelf"),
        ("movies", "movie"),
        ("cookies", "cookie"),
        ("series", "series"),
        ("species", "species"),
        ("news", "news"),
        ("physics", "physics"),
        ("mathematics", "mathematics"),
        ("economics", "economics"),
        ("fisheries", "fishery"),
    ]
    .into_iter()
    .collect()
});

/// Endings that look plural but belong to singular words.
const SINGULAR_ENDINGS: &[&str] = &["ss", "us", "is", "ous", "ics"];

#[derive(Debug, Clone, Default)]
pub struct Lemmatizer;

impl Lemmatizer {
    pub fn new() -> Self {
        Self
    }

    /// Lemmatize a single lowercase token.
    pub fn lemmatize(&self, token: &str) -> String {
        if let Some(lemma) = EXCEPTIONS.get(token) {
            return (*lemma).to_string();
        }

        // Short words ("is", "was", "yes", "bus") are left alone.
        if token.chars().count() <= 3 || !token.ends_with('s') {
            return token.to_string();
        }

        if SINGULAR_ENDINGS.iter().any(|e| token.ends_with(e)) {
            return token.to_string();
        }

        if let Some(stem) = token.strip_suffix("ies") {
            return format!("{stem}y");
        }

        if let Some(stem) = token.strip_suffix("es") {
            // boxes, matches, dishes, classes, campuses, buzzes
            if ["x", "z", "ch", "sh", "ss", "us"]
                .iter()
                .any(|e| stem.ends_with(e))
            {
                return stem.to_string();
            }
        }

        token[..token.len() - 1].to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("courses", "course")]
    #[case("classes", "class")]
    #[case("campuses", "campus")]
    #[case("studies", "study")]
    #[case("facilities", "facility")]
    #[case("matches", "match")]
    #[case("boxes", "box")]
    #[case("requirements", "requirement")]
    #[case("fees", "fee")]
    #[case("responses", "response")]
    #[case("children", "child")]
    #[case("fisheries", "fishery")]
    #[case("campus", "campus")]
    #[case("address", "address")]
    #[case("basis", "basis")]
    #[case("timing", "timing")]
    #[case("is", "is")]
    #[case("was", "was")]
    #[case("hi", "hi")]
    fn lemmatizes(#[case] token: &str, #[case] expected: &str) {
        assert_eq!(Lemmatizer::new().lemmatize(token), expected);
    }
}

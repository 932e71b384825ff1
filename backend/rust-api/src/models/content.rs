use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// Catalog partition a recommendable item belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ContentType {
    TheoryLesson,
    CaseStudy,
    PracticeProblem,
}

impl ContentType {
    pub const ALL: [ContentType; 3] = [
        ContentType::TheoryLesson,
        ContentType::CaseStudy,
        ContentType::PracticeProblem,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            ContentType::TheoryLesson => "theory_lesson",
            ContentType::CaseStudy => "case_study",
            ContentType::PracticeProblem => "practice_problem",
        }
    }

    /// Short label used for learning-path entries.
    pub fn short_label(&self) -> &'static str {
        match self {
            ContentType::TheoryLesson => "theory",
            ContentType::CaseStudy => "case",
            ContentType::PracticeProblem => "practice",
        }
    }
}

impl FromStr for ContentType {
    type Err = String;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "theory_lesson" | "theory_lessons" | "theory" => Ok(ContentType::TheoryLesson),
            "case_study" | "case_studies" | "cases" => Ok(ContentType::CaseStudy),
            "practice_problem" | "practice_problems" | "practice" => {
                Ok(ContentType::PracticeProblem)
            }
            other => Err(format!("Unknown content type: {}", other)),
        }
    }
}

/// Which catalog partitions a ranking request covers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ContentTypeFilter {
    #[default]
    All,
    Only(ContentType),
}

impl ContentTypeFilter {
    pub fn includes(&self, content_type: ContentType) -> bool {
        match self {
            ContentTypeFilter::All => true,
            ContentTypeFilter::Only(expected) => *expected == content_type,
        }
    }
}

impl FromStr for ContentTypeFilter {
    type Err = String;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        let trimmed = value.trim();
        if trimmed.is_empty() || trimmed.eq_ignore_ascii_case("all") {
            return Ok(ContentTypeFilter::All);
        }
        ContentType::from_str(trimmed).map(ContentTypeFilter::Only)
    }
}

/// Recommendable unit of learning content. Immutable once the catalog is built.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ContentItem {
    pub id: String,
    pub title: String,
    /// 1 (introductory) ..= 4 (advanced)
    pub difficulty: u8,
    pub topics: Vec<String>,
    /// Minutes
    pub estimated_time: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub problem_type: Option<String>,
    pub prerequisites: Vec<String>,
    pub content_type: ContentType,
}

impl ContentItem {
    pub fn has_topic(&self, topic: &str) -> bool {
        self.topics.iter().any(|t| t == topic)
    }
}

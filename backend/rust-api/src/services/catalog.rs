use lazy_static::lazy_static;

use crate::models::content::{ContentItem, ContentType, ContentTypeFilter};

lazy_static! {
    static ref CATALOG: ContentCatalog = ContentCatalog::standard();
}

/// Process-wide catalog, built once on first use.
pub fn catalog() -> &'static ContentCatalog {
    &CATALOG
}

/// Small static registry of recommendable items, in partition order
/// (theory lessons, case studies, practice problems).
#[derive(Debug, Clone)]
pub struct ContentCatalog {
    items: Vec<ContentItem>,
}

struct Seed {
    id: &'static str,
    title: &'static str,
    difficulty: u8,
    topics: [&'static str; 2],
    estimated_time: u32,
    problem_type: Option<&'static str>,
    prerequisites: &'static [&'static str],
}

const THEORY_LESSONS: &[Seed] = &[
    Seed {
        id: "theory_1",
        title: "Overview of the Four-Step Method",
        difficulty: 1,
        topics: ["fundamentals", "problem-solving method"],
        estimated_time: 15,
        problem_type: None,
        prerequisites: &[],
    },
    Seed {
        id: "theory_2",
        title: "The Art of Understanding the Problem",
        difficulty: 2,
        topics: ["problem analysis", "identifying conditions"],
        estimated_time: 20,
        problem_type: None,
        prerequisites: &["theory_1"],
    },
    Seed {
        id: "theory_3",
        title: "Strategies for Devising a Plan",
        difficulty: 3,
        topics: ["creative thinking", "reasoning by analogy"],
        estimated_time: 25,
        problem_type: None,
        prerequisites: &["theory_2"],
    },
    Seed {
        id: "theory_4",
        title: "Techniques for Carrying Out the Plan",
        difficulty: 3,
        topics: ["logical reasoning", "calculation technique"],
        estimated_time: 30,
        problem_type: None,
        prerequisites: &["theory_3"],
    },
    Seed {
        id: "theory_5",
        title: "Why Looking Back Matters",
        difficulty: 4,
        topics: ["reflection", "lessons learned"],
        estimated_time: 20,
        problem_type: None,
        prerequisites: &["theory_4"],
    },
];

const CASE_STUDIES: &[Seed] = &[
    Seed {
        id: "case_math_1",
        title: "Diagonal of a Rectangular Box",
        difficulty: 2,
        topics: ["geometry", "spatial reasoning"],
        estimated_time: 25,
        problem_type: Some("math"),
        prerequisites: &[],
    },
    Seed {
        id: "case_logic_1",
        title: "The Delayed Project",
        difficulty: 3,
        topics: ["logical reasoning", "time management"],
        estimated_time: 30,
        problem_type: Some("work"),
        prerequisites: &[],
    },
    Seed {
        id: "case_life_1",
        title: "Household Budget Planning",
        difficulty: 3,
        topics: ["applied math", "decision analysis"],
        estimated_time: 35,
        problem_type: Some("life"),
        prerequisites: &[],
    },
    Seed {
        id: "case_math_2",
        title: "Optimizing a Shopping Strategy",
        difficulty: 2,
        topics: ["mathematical modeling", "optimization"],
        estimated_time: 20,
        problem_type: Some("math"),
        prerequisites: &[],
    },
    Seed {
        id: "case_work_1",
        title: "Meeting Room Scheduling",
        difficulty: 4,
        topics: ["resource allocation", "algorithmic thinking"],
        estimated_time: 40,
        problem_type: Some("work"),
        prerequisites: &[],
    },
];

const PRACTICE_PROBLEMS: &[Seed] = &[
    Seed {
        id: "practice_basic_1",
        title: "Everyday Math Applications",
        difficulty: 1,
        topics: ["basic calculation", "word problems"],
        estimated_time: 10,
        problem_type: Some("math"),
        prerequisites: &[],
    },
    Seed {
        id: "practice_logic_1",
        title: "Introduction to Logical Reasoning",
        difficulty: 2,
        topics: ["logical thinking", "inference"],
        estimated_time: 15,
        problem_type: Some("logic"),
        prerequisites: &[],
    },
    Seed {
        id: "practice_advanced_1",
        title: "Integrated Application Challenge",
        difficulty: 4,
        topics: ["integrated application", "innovative thinking"],
        estimated_time: 45,
        problem_type: Some("mixed"),
        prerequisites: &[],
    },
    Seed {
        id: "practice_life_1",
        title: "Solving Everyday Problems",
        difficulty: 2,
        topics: ["practical application", "life skills"],
        estimated_time: 20,
        problem_type: Some("life"),
        prerequisites: &[],
    },
    Seed {
        id: "practice_work_1",
        title: "Workplace Problem Analysis",
        difficulty: 3,
        topics: ["workplace skills", "problem solving"],
        estimated_time: 30,
        problem_type: Some("work"),
        prerequisites: &[],
    },
];

impl Seed {
    fn to_item(&self, content_type: ContentType) -> ContentItem {
        ContentItem {
            id: self.id.to_string(),
            title: self.title.to_string(),
            difficulty: self.difficulty,
            topics: self.topics.iter().map(|t| t.to_string()).collect(),
            estimated_time: self.estimated_time,
            problem_type: self.problem_type.map(str::to_string),
            prerequisites: self.prerequisites.iter().map(|p| p.to_string()).collect(),
            content_type,
        }
    }
}

impl ContentCatalog {
    pub fn standard() -> Self {
        let partitions = [
            (ContentType::TheoryLesson, THEORY_LESSONS),
            (ContentType::CaseStudy, CASE_STUDIES),
            (ContentType::PracticeProblem, PRACTICE_PROBLEMS),
        ];

        let items = partitions
            .iter()
            .flat_map(|&(content_type, seeds)| {
                seeds.iter().map(move |seed| seed.to_item(content_type))
            })
            .collect();

        Self { items }
    }

    pub fn from_items(items: Vec<ContentItem>) -> Self {
        Self { items }
    }

    pub fn items(&self) -> &[ContentItem] {
        &self.items
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Items in the requested partition(s), catalog order preserved.
    pub fn partition(&self, filter: ContentTypeFilter) -> impl Iterator<Item = &ContentItem> {
        self.items
            .iter()
            .filter(move |item| filter.includes(item.content_type))
    }

    pub fn get(&self, id: &str) -> Option<&ContentItem> {
        self.items.iter().find(|item| item.id == id)
    }
}

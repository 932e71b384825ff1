use chrono::{DateTime, Utc};
use mongodb::bson::oid::ObjectId;
use serde::{Deserialize, Serialize};

/// Learning module a lesson belongs to. Weak/strong areas are expressed in these terms.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LearningModule {
    Theory,
    Cases,
    Practice,
}

impl LearningModule {
    pub fn as_str(&self) -> &'static str {
        match self {
            LearningModule::Theory => "theory",
            LearningModule::Cases => "cases",
            LearningModule::Practice => "practice",
        }
    }
}

/// One row per (user, module, lesson), mutated on every progress update.
/// Stored in MongoDB "user_progress" collection.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProgressRecord {
    #[serde(rename = "_id", default, skip_serializing_if = "Option::is_none")]
    pub id: Option<ObjectId>,
    pub user_id: String,
    pub module: LearningModule,
    pub lesson_id: String,
    #[serde(default)]
    pub completed: bool,
    /// 0..=100
    #[serde(default)]
    pub score: i32,
    /// Seconds
    #[serde(default)]
    pub time_spent: i64,
    #[serde(with = "bson_datetime_as_chrono")]
    pub created_at: DateTime<Utc>,
    #[serde(with = "bson_datetime_as_chrono")]
    pub updated_at: DateTime<Utc>,
}

impl ProgressRecord {
    pub fn new(
        user_id: impl Into<String>,
        module: LearningModule,
        lesson_id: impl Into<String>,
        completed: bool,
        score: i32,
    ) -> Self {
        let now = Utc::now();
        Self {
            id: None,
            user_id: user_id.into(),
            module,
            lesson_id: lesson_id.into(),
            completed,
            score,
            time_spent: 0,
            created_at: now,
            updated_at: now,
        }
    }

    pub fn with_time_spent(mut self, seconds: i64) -> Self {
        self.time_spent = seconds;
        self
    }
}

/// Notes captured for each stage of the four-step method.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StepsData {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub understand: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub plan: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub execute: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reflect: Option<String>,
}

/// Append-only log of solving attempts, "problem_solving_records" collection.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProblemSolvingRecord {
    #[serde(rename = "_id", default, skip_serializing_if = "Option::is_none")]
    pub id: Option<ObjectId>,
    pub user_id: String,
    /// math, logic, life, work, ...
    pub problem_type: String,
    pub problem_id: String,
    #[serde(default)]
    pub steps_data: StepsData,
    /// Seconds
    #[serde(default)]
    pub completion_time: i64,
    /// 0.0..=1.0
    #[serde(default)]
    pub success_rate: f64,
    #[serde(with = "bson_datetime_as_chrono")]
    pub created_at: DateTime<Utc>,
}

impl ProblemSolvingRecord {
    pub fn new(
        user_id: impl Into<String>,
        problem_type: impl Into<String>,
        problem_id: impl Into<String>,
        completion_time: i64,
        success_rate: f64,
    ) -> Self {
        Self {
            id: None,
            user_id: user_id.into(),
            problem_type: problem_type.into(),
            problem_id: problem_id.into(),
            steps_data: StepsData::default(),
            completion_time,
            success_rate: success_rate.clamp(0.0, 1.0),
            created_at: Utc::now(),
        }
    }
}

/// Levels for the four skill dimensions of the method. Missing dimensions read as 1.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SkillLevels {
    pub understanding: f64,
    pub planning: f64,
    pub execution: f64,
    pub reflection: f64,
}

impl Default for SkillLevels {
    fn default() -> Self {
        Self {
            understanding: 1.0,
            planning: 1.0,
            execution: 1.0,
            reflection: 1.0,
        }
    }
}

/// Per-user aggregate, "learning_stats" collection.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LearningStats {
    #[serde(rename = "_id", default, skip_serializing_if = "Option::is_none")]
    pub id: Option<ObjectId>,
    pub user_id: String,
    #[serde(default)]
    pub total_problems_solved: i64,
    /// Seconds
    #[serde(default)]
    pub total_time_spent: i64,
    #[serde(default)]
    pub average_score: f64,
    #[serde(default)]
    pub streak_days: i32,
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        with = "bson_datetime_as_chrono_option"
    )]
    pub last_activity: Option<DateTime<Utc>>,
    #[serde(default)]
    pub skill_levels: SkillLevels,
}

impl LearningStats {
    pub fn new(user_id: impl Into<String>) -> Self {
        Self {
            id: None,
            user_id: user_id.into(),
            total_problems_solved: 0,
            total_time_spent: 0,
            average_score: 0.0,
            streak_days: 0,
            last_activity: None,
            skill_levels: SkillLevels::default(),
        }
    }
}

// Serde converters for chrono::DateTime <-> mongodb::bson::DateTime
pub(crate) mod bson_datetime_as_chrono {
    use chrono::{DateTime, Utc};
    use mongodb::bson;
    use serde::{de::Error, Deserialize, Deserializer, Serialize, Serializer};

    pub fn serialize<S>(date: &DateTime<Utc>, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        bson::DateTime::from_millis(date.timestamp_millis()).serialize(serializer)
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<DateTime<Utc>, D::Error>
    where
        D: Deserializer<'de>,
    {
        let bson_dt = bson::DateTime::deserialize(deserializer)?;
        DateTime::from_timestamp_millis(bson_dt.timestamp_millis())
            .ok_or_else(|| D::Error::custom("timestamp out of range"))
    }
}

pub(crate) mod bson_datetime_as_chrono_option {
    use chrono::{DateTime, Utc};
    use mongodb::bson;
    use serde::{de::Error, Deserialize, Deserializer, Serializer};

    pub fn serialize<S>(date: &Option<DateTime<Utc>>, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match date {
            Some(d) => serializer.serialize_some(&bson::DateTime::from_millis(d.timestamp_millis())),
            None => serializer.serialize_none(),
        }
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Option<DateTime<Utc>>, D::Error>
    where
        D: Deserializer<'de>,
    {
        match Option::<bson::DateTime>::deserialize(deserializer)? {
            Some(bson_dt) => DateTime::from_timestamp_millis(bson_dt.timestamp_millis())
                .map(Some)
                .ok_or_else(|| D::Error::custom("timestamp out of range")),
            None => Ok(None),
        }
    }
}

use serde::{Deserialize, Deserializer, Serialize};

/// Read an explicit `null` the same as an absent key.
fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

/// Collection channel a record or term came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ChannelKind {
    Web,
    Youtube,
}

impl ChannelKind {
    pub fn name(&self) -> &'static str {
        match self {
            ChannelKind::Web => "web",
            ChannelKind::Youtube => "youtube",
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct WebSourceRecord {
    #[serde(default)]
    pub url: String,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub content: String,
    #[serde(default)]
    pub character_count: u64,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct WebCollectionSummary {
    #[serde(default)]
    pub total_characters: u64,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct WebCollection {
    #[serde(default, deserialize_with = "null_as_default")]
    pub sources: Vec<WebSourceRecord>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub summary: WebCollectionSummary,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub research_date: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub total_sources: Option<u64>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TranscriptSegment {
    #[serde(default)]
    pub start: f64,
    #[serde(default)]
    pub duration: f64,
    #[serde(default)]
    pub text: String,
}

fn unknown_language() -> String {
    "unknown".to_string()
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VideoTranscriptRecord {
    #[serde(default)]
    pub video_id: String,
    #[serde(default)]
    pub source_url: String,
    #[serde(default = "unknown_language")]
    pub language: String,
    #[serde(default)]
    pub text: String,
    #[serde(default)]
    pub word_count: u64,
    /// Seconds.
    #[serde(default)]
    pub total_duration: f64,
    #[serde(default, deserialize_with = "null_as_default")]
    pub segments: Vec<TranscriptSegment>,
}

impl Default for VideoTranscriptRecord {
    fn default() -> Self {
        Self {
            video_id: String::new(),
            source_url: String::new(),
            language: unknown_language(),
            text: String::new(),
            word_count: 0,
            total_duration: 0.0,
            segments: Vec::new(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct VideoCollectionSummary {
    #[serde(default)]
    pub total_words: u64,
    /// Seconds.
    #[serde(default)]
    pub total_duration: f64,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct VideoCollection {
    #[serde(default, deserialize_with = "null_as_default")]
    pub transcriptions: Vec<VideoTranscriptRecord>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub summary: VideoCollectionSummary,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub transcription_date: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub successful_transcriptions: Option<u64>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Slide {
    pub slide_no: u32,
    pub slide_title: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CourseUnit {
    pub unit_no: u32,
    #[serde(default)]
    pub unit_name: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub slides: Vec<Slide>,
}

/// Ordered units and slides of one course, as looked up from the course plan.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CourseStructure {
    pub course_name: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub units: Vec<CourseUnit>,
}

impl CourseStructure {
    pub fn slide_count(&self) -> usize {
        self.units.iter().map(|u| u.slides.len()).sum()
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CredibilityTier {
    High,
    Medium,
    Low,
    #[default]
    Unknown,
}

impl CredibilityTier {
    /// High and medium sources count as credible.
    pub fn is_credible(&self) -> bool {
        matches!(self, CredibilityTier::High | CredibilityTier::Medium)
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum QualityTier {
    Excellent,
    Good,
    Acceptable,
    NeedsImprovement,
    #[default]
    Unknown,
}

impl QualityTier {
    pub fn label(&self) -> &'static str {
        match self {
            QualityTier::Excellent => "優秀",
            QualityTier::Good => "良好",
            QualityTier::Acceptable => "許容範囲",
            QualityTier::NeedsImprovement => "改善必要",
            QualityTier::Unknown => "不明",
        }
    }

    pub fn icon(&self) -> &'static str {
        match self {
            QualityTier::Excellent => "🌟",
            QualityTier::Good => "✓",
            QualityTier::Acceptable => "⚠️",
            QualityTier::NeedsImprovement => "❌",
            QualityTier::Unknown => "?",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TermCategory {
    Technical,
    Business,
    Learning,
    General,
}

impl TermCategory {
    pub fn name(&self) -> &'static str {
        match self {
            TermCategory::Technical => "technical",
            TermCategory::Business => "business",
            TermCategory::Learning => "learning",
            TermCategory::General => "general",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            TermCategory::Technical => "技術用語",
            TermCategory::Business => "ビジネス用語",
            TermCategory::Learning => "学習用語",
            TermCategory::General => "一般用語",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LearningPhase {
    Introduction,
    Understanding,
    Application,
}

impl LearningPhase {
    pub fn name(&self) -> &'static str {
        match self {
            LearningPhase::Introduction => "introduction",
            LearningPhase::Understanding => "understanding",
            LearningPhase::Application => "application",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            LearningPhase::Introduction => "導入",
            LearningPhase::Understanding => "理解",
            LearningPhase::Application => "実践",
        }
    }
}

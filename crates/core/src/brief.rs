//! Brief Assembler: renders the course structure, the collected research and
//! both analysis reports into one generation brief.

use crate::{
    format::{group_thousands, preview},
    quality::QualityReport,
    terminology::TerminologyReport,
    types::{CourseStructure, VideoCollection, WebCollection},
};

pub const MAX_WEB_SOURCES: usize = 5;
pub const MAX_TRANSCRIPTS: usize = 3;
pub const WEB_PREVIEW_CHARS: usize = 500;
pub const TRANSCRIPT_PREVIEW_CHARS: usize = 800;
pub const MUST_DEFINE_TERMS: usize = 10;
pub const QUALITY_NOTES: usize = 3;
pub const TERMINOLOGY_NOTES: usize = 2;

/// Everything one brief is built from. Only the structure is mandatory.
#[derive(Debug, Clone, Copy)]
pub struct BriefInputs<'a> {
    pub structure: &'a CourseStructure,
    pub web: Option<&'a WebCollection>,
    pub video: Option<&'a VideoCollection>,
    pub quality: Option<&'a QualityReport>,
    pub terminology: Option<&'a TerminologyReport>,
}

fn or_na(value: &str) -> &str {
    if value.is_empty() { "N/A" } else { value }
}

fn minutes(seconds: f64) -> String {
    format!("{:.1}", seconds / 60.0)
}

pub fn format_structure(structure: &CourseStructure) -> String {
    if structure.slide_count() == 0 {
        return format!(
            "# {}\n\n（この講座にはスライドが見つかりませんでした）",
            structure.course_name
        );
    }

    let mut lines = vec![format!("## 講座名: {}\n", structure.course_name)];
    for unit in structure.units.iter().filter(|u| !u.slides.is_empty()) {
        lines.push(format!("### ユニット{}: {}", unit.unit_no, unit.unit_name));
        for slide in &unit.slides {
            lines.push(format!("- スライド{}: {}", slide.slide_no, slide.slide_title));
        }
    }
    lines.join("\n")
}

/// Web block, or `None` when the collection holds no sources.
pub fn format_web_research(collection: &WebCollection) -> Option<String> {
    if collection.sources.is_empty() {
        return None;
    }

    let mut lines = vec![
        "### 📚 Web リサーチデータ".to_string(),
        format!(
            "- 収集日: {}",
            collection.research_date.as_deref().unwrap_or("N/A")
        ),
        format!(
            "- 情報源数: {}件",
            collection
                .total_sources
                .unwrap_or(collection.sources.len() as u64)
        ),
        format!(
            "- 総文字数: {}文字\n",
            group_thousands(collection.summary.total_characters)
        ),
    ];

    for (i, source) in collection.sources.iter().take(MAX_WEB_SOURCES).enumerate() {
        let title = if source.title.is_empty() {
            "タイトルなし"
        } else {
            source.title.as_str()
        };
        lines.push(format!("**情報源{}: {}**", i + 1, title));
        lines.push(format!("- URL: {}", or_na(&source.url)));
        lines.push(format!("- 文字数: {}文字", group_thousands(source.character_count)));
        if !source.content.is_empty() {
            lines.push(format!(
                "- 内容抜粋: {}\n",
                preview(&source.content, WEB_PREVIEW_CHARS)
            ));
        }
    }

    if collection.sources.len() > MAX_WEB_SOURCES {
        lines.push(format!(
            "（他{}件の情報源を省略）\n",
            collection.sources.len() - MAX_WEB_SOURCES
        ));
    }

    Some(lines.join("\n"))
}

/// Video block, or `None` when the collection holds no transcripts.
pub fn format_video_research(collection: &VideoCollection) -> Option<String> {
    if collection.transcriptions.is_empty() {
        return None;
    }

    let mut lines = vec![
        "### 🎥 YouTube 文字起こしデータ".to_string(),
        format!(
            "- 文字起こし日: {}",
            collection.transcription_date.as_deref().unwrap_or("N/A")
        ),
        format!(
            "- 動画数: {}件",
            collection
                .successful_transcriptions
                .unwrap_or(collection.transcriptions.len() as u64)
        ),
        format!(
            "- 総文字数: {}文字",
            group_thousands(collection.summary.total_words)
        ),
        format!(
            "- 総再生時間: {}分\n",
            minutes(collection.summary.total_duration)
        ),
    ];

    for (i, transcript) in collection
        .transcriptions
        .iter()
        .take(MAX_TRANSCRIPTS)
        .enumerate()
    {
        lines.push(format!("**動画{}: {}**", i + 1, or_na(&transcript.video_id)));
        lines.push(format!("- URL: {}", or_na(&transcript.source_url)));
        lines.push(format!("- 言語: {}", or_na(&transcript.language)));
        lines.push(format!("- 文字数: {}文字", group_thousands(transcript.word_count)));
        lines.push(format!("- 動画時間: {}分", minutes(transcript.total_duration)));
        if !transcript.text.is_empty() {
            lines.push(format!(
                "- 内容抜粋: {}\n",
                preview(&transcript.text, TRANSCRIPT_PREVIEW_CHARS)
            ));
        }
    }

    if collection.transcriptions.len() > MAX_TRANSCRIPTS {
        lines.push(format!(
            "（他{}件の動画を省略）\n",
            collection.transcriptions.len() - MAX_TRANSCRIPTS
        ));
    }

    Some(lines.join("\n"))
}

/// Quality assurance block, or `None` when neither report is available.
pub fn format_quality_assurance(
    quality: Option<&QualityReport>,
    terminology: Option<&TerminologyReport>,
) -> Option<String> {
    if quality.is_none() && terminology.is_none() {
        return None;
    }

    let mut lines = vec![
        "### 🔍 品質保証データ（講座作成の指針）".to_string(),
        "以下の品質分析結果を参考に、正確で教育的価値の高いコンテンツを作成してください。\n"
            .to_string(),
    ];

    if let Some(report) = quality {
        let summary = &report.integrated_summary;
        lines.push(format!("**品質評価**: {}", report.overall_quality.label()));
        lines.push(format!("- データポイント数: {}件", summary.total_data_points));
        lines.push(format!("- 信頼性の高い情報源: {}件", summary.credible_sources));

        if !report.quality_recommendations.is_empty() {
            lines.push("\n**品質に関する注意点**:".to_string());
            for rec in report.quality_recommendations.iter().take(QUALITY_NOTES) {
                lines.push(format!("- {}", rec));
            }
        }
    }

    if let Some(report) = terminology {
        let summary = &report.terminology_summary;
        lines.push("\n**重要用語分析**:".to_string());
        lines.push(format!(
            "- 検出された重要用語数: {}個",
            summary.total_unique_terms
        ));

        if !summary.categories.is_empty() {
            let categories: Vec<String> = summary
                .categories
                .iter()
                .map(|(category, count)| format!("{}: {}個", category.name(), count))
                .collect();
            lines.push(format!("- カテゴリ分布: {}", categories.join(", ")));
        }

        if !summary.learning_phases.is_empty() {
            let phases: Vec<String> = summary
                .learning_phases
                .iter()
                .map(|(phase, count)| format!("{}: {}個", phase.label(), count))
                .collect();
            lines.push(format!("- 学習フェーズ分布: {}", phases.join(", ")));
        }

        if !report.top_terms.is_empty() {
            let terms: Vec<&str> = report
                .top_terms
                .iter()
                .take(MUST_DEFINE_TERMS)
                .map(|t| t.term.as_str())
                .collect();
            lines.push("\n**必ず解説すべき重要用語トップ10**:".to_string());
            lines.push(terms.join(", "));
            lines.push(
                "\n→ これらの用語は講座内で明確に定義し、適切に解説してください。".to_string(),
            );
        }

        if !report.recommendations.is_empty() {
            lines.push("\n**用語に関する推奨事項**:".to_string());
            for rec in report.recommendations.iter().take(TERMINOLOGY_NOTES) {
                lines.push(format!("- {}", rec));
            }
        }
    }

    lines.push(String::new());
    Some(lines.join("\n"))
}

/// Research section, present only when at least one collection was supplied.
pub fn format_research_section(inputs: &BriefInputs<'_>) -> Option<String> {
    if inputs.web.is_none() && inputs.video.is_none() {
        return None;
    }

    let mut parts = vec![
        "# 📊 事前リサーチデータ（講座作成の参考情報）".to_string(),
        "以下のリサーチデータは、講座内容をより正確で実践的なものにするための参考資料です。"
            .to_string(),
        "これらの情報を活用して、最新かつ信頼性の高いコンテンツを作成してください。\n"
            .to_string(),
    ];
    parts.extend(inputs.web.and_then(format_web_research));
    parts.extend(inputs.video.and_then(format_video_research));
    parts.extend(format_quality_assurance(inputs.quality, inputs.terminology));
    parts.push("---\n".to_string());

    Some(parts.join("\n"))
}

pub fn assemble_brief(inputs: &BriefInputs<'_>) -> String {
    let mut brief = format_structure(inputs.structure);
    brief.push_str("\n\n");
    if let Some(research) = format_research_section(inputs) {
        brief.push_str(&research);
    }
    brief
}

use std::{path::Path, sync::Arc};

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use courseprep_core::{
    ChannelInput, CourseStructure, CourseprepError, QualityReport, RuleSet, TermExtraction,
    TerminologyReport, VideoCollection, WebCollection, combine, extract_video_terms,
    extract_web_terms, map_phases, merge, parse_document, validate_video_transcripts,
    validate_web_sources,
};
use serde::de::DeserializeOwned;
use tokio::{fs, task};
use tracing::{debug, info, warn};

/// Both collection channels as read from disk.
#[derive(Debug)]
pub struct Inputs {
    pub web: ChannelInput<WebCollection>,
    pub youtube: ChannelInput<VideoCollection>,
}

impl Inputs {
    pub fn web_collection(&self) -> Option<&WebCollection> {
        self.web.loaded()
    }

    pub fn video_collection(&self) -> Option<&VideoCollection> {
        self.youtube.loaded()
    }
}

/// Read one channel document. An unreadable file only marks the channel malformed.
async fn load_channel<T: DeserializeOwned>(
    channel: &str,
    path: Option<&Path>,
) -> ChannelInput<T> {
    let Some(path) = path else {
        debug!(channel, "no document supplied");
        return ChannelInput::Missing;
    };

    match fs::read_to_string(path).await {
        Ok(raw) => {
            let input = ChannelInput::from_json(&raw);
            match &input {
                ChannelInput::Malformed(reason) => {
                    warn!(channel, path = %path.display(), %reason, "document did not decode");
                }
                ChannelInput::Missing => {
                    debug!(channel, path = %path.display(), "document is null");
                }
                ChannelInput::Loaded(_) => {}
            }
            input
        }
        Err(e) => {
            warn!(channel, path = %path.display(), error = %e, "document unreadable");
            ChannelInput::Malformed(
                CourseprepError::ReadFailed {
                    path: path.to_path_buf(),
                    reason: e.to_string(),
                }
                .to_string(),
            )
        }
    }
}

/// Load both channels concurrently. Fails only when no path was given at all.
pub async fn load_inputs(web: Option<&Path>, youtube: Option<&Path>) -> Result<Inputs> {
    if web.is_none() && youtube.is_none() {
        return Err(CourseprepError::NoInputSupplied.into());
    }

    let (web, youtube) = tokio::join!(
        load_channel::<WebCollection>("web", web),
        load_channel::<VideoCollection>("youtube", youtube)
    );

    Ok(Inputs { web, youtube })
}

async fn load_document<T: DeserializeOwned>(document: &'static str, path: &Path) -> Result<T> {
    let raw = fs::read_to_string(path)
        .await
        .map_err(|e| CourseprepError::ReadFailed {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })?;
    Ok(parse_document(document, &raw)?)
}

/// Built-in rule tables, or the given file layered over them.
pub async fn load_rules(path: Option<&Path>) -> Result<RuleSet> {
    match path {
        Some(path) => {
            let rules = load_document("rules", path).await?;
            info!(path = %path.display(), "loaded rule tables");
            Ok(rules)
        }
        None => Ok(RuleSet::default()),
    }
}

pub async fn load_structure(path: &Path) -> Result<CourseStructure> {
    load_document("course structure", path).await
}

pub fn validate(inputs: &Inputs, rules: &RuleSet, now: DateTime<Utc>) -> Result<QualityReport> {
    let web = validate_web_sources(&inputs.web, &rules.credibility);
    let youtube = validate_video_transcripts(&inputs.youtube);
    let report = combine(web, youtube, now);

    if !report.has_usable_channel() {
        return Err(CourseprepError::NoUsableInput {
            web: report.web_research.status(),
            youtube: report.youtube_research.status(),
        }
        .into());
    }

    Ok(report)
}

/// Extract each channel on the blocking pool, then merge and map phases.
pub async fn analyze_terms(
    inputs: Arc<Inputs>,
    rules: Arc<RuleSet>,
    theme: Option<String>,
    now: DateTime<Utc>,
) -> Result<TerminologyReport> {
    let web = task::spawn_blocking({
        let inputs = Arc::clone(&inputs);
        let rules = Arc::clone(&rules);
        move || extract_web_terms(&inputs.web, &rules)
    });
    let youtube = task::spawn_blocking({
        let inputs = Arc::clone(&inputs);
        let rules = Arc::clone(&rules);
        move || extract_video_terms(&inputs.youtube, &rules)
    });

    let (web, youtube) = tokio::join!(web, youtube);
    let web: TermExtraction = web.context("web term extraction panicked")?;
    let youtube: TermExtraction = youtube.context("youtube term extraction panicked")?;

    if web.channel_terms().is_none() && youtube.channel_terms().is_none() {
        return Err(CourseprepError::NoUsableInput {
            web: web.status(),
            youtube: youtube.status(),
        }
        .into());
    }

    let merged = merge(&[&web, &youtube]);
    Ok(map_phases(merged, &rules, now, theme))
}

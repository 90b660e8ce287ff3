//! Score extraction: reads the `Score: X/10` line the rubrics ask for.
//!
//! Pure string scanning; a completion without a parsable score still counts
//! as a successful analysis, it just has no score.

use crate::analysis::outcome::AnalysisResultMap;

const SCORE_LABEL: &str = "score:";
const MAX_SCORE: f32 = 10.0;

/// Returns the first `Score: X/10` value in `feedback`, clamped to 0..=10.
///
/// Case-insensitive on the label; tolerates markdown emphasis and spaces
/// around the slash (`**Score:** 7.5 / 10`).
pub fn extract_score(feedback: &str) -> Option<f32> {
    feedback.lines().find_map(parse_score_line)
}

fn parse_score_line(line: &str) -> Option<f32> {
    let cleaned = line.replace('*', "");
    let lower = cleaned.to_ascii_lowercase();
    let start = lower.find(SCORE_LABEL)? + SCORE_LABEL.len();
    let rest = cleaned[start..].trim_start();
    let (value, denominator) = rest.split_once('/')?;
    let denominator = denominator.trim_start();
    let digits = denominator
        .find(|c: char| !c.is_ascii_digit())
        .map_or(denominator, |end| &denominator[..end]);
    if digits != "10" {
        return None;
    }
    let value: f32 = value.trim().parse().ok()?;
    value.is_finite().then(|| value.clamp(0.0, MAX_SCORE))
}

/// Mean score across completed sections that reported one.
pub fn overall_score(results: &AnalysisResultMap) -> Option<f32> {
    let scores: Vec<f32> = results
        .iter()
        .filter_map(|(_, outcome)| outcome.analysis().and_then(|a| a.score))
        .collect();
    if scores.is_empty() {
        return None;
    }
    Some(scores.iter().sum::<f32>() / scores.len() as f32)
}

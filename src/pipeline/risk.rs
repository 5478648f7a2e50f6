//! Parsing of the risk detection step's reply

use regex::Regex;
use serde::Deserialize;
use tracing::{debug, warn};

use super::report::NO_FINDING;

/// Wire shape of the risk step's JSON reply. Every field is optional; the
/// prompt asks for both but models drop or null them under load.
#[derive(Debug, Deserialize)]
struct RiskReply {
    is_risky: Option<bool>,
    risk_reason: Option<String>,
}

/// Outcome of the risk detection step for one clause.
#[derive(Debug, Clone, PartialEq)]
pub struct RiskVerdict {
    pub is_risky: bool,
    pub risk_reason: String,
}

/// Never fails: replies that cannot be read as JSON fall back to a keyword
/// scan that flags the clause only on an unambiguous "true".
pub fn parse_risk_response(response: &str) -> RiskVerdict {
    if let Some(reply) =
        extract_json(response).and_then(|json| serde_json::from_str::<RiskReply>(&json).ok())
    {
        let is_risky = reply.is_risky.unwrap_or(false);
        debug!(is_risky, "Parsed risk verdict");
        return RiskVerdict {
            is_risky,
            risk_reason: reply.risk_reason.unwrap_or_else(|| NO_FINDING.to_string()),
        };
    }

    warn!("Risk reply was not valid JSON, falling back to keyword scan");
    let content = response.to_lowercase();
    RiskVerdict {
        is_risky: content.contains("true") && !content.contains("false"),
        risk_reason: "Analysis failed - manual review recommended".to_string(),
    }
}

/// Pulls a JSON object out of a chatty reply. Accepts a bare object, a
/// fenced code block, or the widest brace-delimited span.
fn extract_json(response: &str) -> Option<String> {
    let trimmed = response.trim();

    if trimmed.starts_with('{') && trimmed.ends_with('}') {
        return Some(trimmed.to_string());
    }

    if trimmed.contains("```") {
        return extract_from_markdown_block(trimmed);
    }

    if let (Some(start), Some(end)) = (trimmed.find('{'), trimmed.rfind('}')) {
        if start < end {
            return Some(trimmed[start..=end].to_string());
        }
    }

    None
}

fn extract_from_markdown_block(text: &str) -> Option<String> {
    let re = Regex::new(r"```(?:json)?\s*\n?([\s\S]*?)\n?```").unwrap();

    let captures = re.captures(text)?;
    let json = captures.get(1)?.as_str().trim();
    if json.starts_with('{') && json.ends_with('}') {
        return Some(json.to_string());
    }

    None
}

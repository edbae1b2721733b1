//! Output formatting for the CLI.

use crate::cli::CliFormat;
use crate::error::Result;
use colored::*;
use ethos_domain::{ArtifactStatus, CaseSection, Severity, ValidationFinding};
use ethos_pipeline::{CaseAdvice, SectionRetrieval};
use tabled::{
    builder::Builder,
    settings::{object::Rows, Alignment, Modify, Style},
};

/// Output formatter.
pub struct Formatter {
    format: CliFormat,
    color_enabled: bool,
}

impl Formatter {
    /// Create a new formatter.
    pub fn new(format: CliFormat, color_enabled: bool) -> Self {
        Self {
            format,
            color_enabled,
        }
    }

    /// Format parsed sections.
    pub fn format_sections(&self, sections: &[CaseSection]) -> Result<String> {
        match self.format {
            CliFormat::Json => {
                let values: Vec<serde_json::Value> = sections
                    .iter()
                    .map(|s| {
                        serde_json::json!({
                            "section_type": s.section_type.as_str(),
                            "confidence": s.confidence,
                            "char_span": [s.char_span.0, s.char_span.1],
                            "text": s.text,
                        })
                    })
                    .collect();
                Ok(serde_json::to_string_pretty(&values)?)
            }
            CliFormat::Table => {
                let mut builder = Builder::default();
                builder.push_record(["Section", "Confidence", "Text"]);
                for section in sections {
                    builder.push_record([
                        section.section_type.as_str().to_string(),
                        format!("{:.2}", section.confidence),
                        truncate(&section.text, 70),
                    ]);
                }
                Ok(self.render_table(builder))
            }
            CliFormat::Quiet => Ok(sections
                .iter()
                .map(|s| s.section_type.as_str())
                .collect::<Vec<_>>()
                .join("\n")),
        }
    }

    /// Format per-section retrieval results.
    pub fn format_retrievals(&self, retrievals: &[SectionRetrieval]) -> Result<String> {
        match self.format {
            CliFormat::Json => {
                let values: Vec<serde_json::Value> = retrievals
                    .iter()
                    .map(|r| {
                        serde_json::json!({
                            "section_type": r.section_type.as_str(),
                            "scores": r.scores.iter().map(score_json).collect::<Vec<_>>(),
                        })
                    })
                    .collect();
                Ok(serde_json::to_string_pretty(&values)?)
            }
            CliFormat::Table => {
                let mut output = String::new();
                for retrieval in retrievals {
                    output.push_str(&self.colorize(
                        &format!("{} section:\n", retrieval.section_type),
                        "cyan",
                    ));
                    let mut builder = Builder::default();
                    builder.push_record([
                        "Rank", "Target", "Combined", "Vector", "Overlap", "Structural", "Distance",
                    ]);
                    for score in &retrieval.scores {
                        builder.push_record([
                            score.rank.to_string(),
                            score.target_id.clone(),
                            format!("{:.3}", score.combined),
                            format!("{:.3}", score.breakdown.vector),
                            format!("{:.3}", score.breakdown.term_overlap),
                            format!("{:.3}", score.breakdown.structural),
                            score
                                .graph_distance
                                .map(|d| d.to_string())
                                .unwrap_or_else(|| "-".to_string()),
                        ]);
                    }
                    output.push_str(&self.render_table(builder));
                    output.push('\n');
                }
                Ok(output)
            }
            CliFormat::Quiet => Ok(retrievals
                .iter()
                .flat_map(|r| r.scores.iter().map(|s| s.target_id.clone()))
                .collect::<Vec<_>>()
                .join("\n")),
        }
    }

    /// Format the final advice.
    pub fn format_advice(&self, advice: &CaseAdvice) -> Result<String> {
        match self.format {
            CliFormat::Json => {
                let value = serde_json::json!({
                    "artifact_id": advice.artifact.id.to_string(),
                    "status": advice.status.to_string(),
                    "text": advice.artifact.text,
                    "claims": advice.artifact.claims.iter().map(|c| {
                        serde_json::json!({
                            "role_uri": c.role_uri,
                            "obligation_uri": c.obligation_uri,
                            "obligation_label": c.obligation_label,
                            "citation": c.citation,
                        })
                    }).collect::<Vec<_>>(),
                    "findings": advice.findings.iter().map(finding_json).collect::<Vec<_>>(),
                });
                Ok(serde_json::to_string_pretty(&value)?)
            }
            CliFormat::Table => {
                let mut output = String::new();
                output.push_str(&format!(
                    "Status: {}\n\n{}\n",
                    self.colorize_status(advice.status),
                    advice.artifact.text
                ));

                if !advice.artifact.claims.is_empty() {
                    let mut builder = Builder::default();
                    builder.push_record(["Role", "Obligation", "Citation"]);
                    for claim in &advice.artifact.claims {
                        builder.push_record([
                            claim.role_uri.clone(),
                            claim.obligation_label.clone(),
                            claim.citation.clone().unwrap_or_else(|| "-".to_string()),
                        ]);
                    }
                    output.push('\n');
                    output.push_str(&self.render_table(builder));
                }

                if !advice.findings.is_empty() {
                    output.push_str("\nFindings:\n");
                    for finding in &advice.findings {
                        output.push_str(&format!(
                            "  {} {}\n",
                            self.colorize_severity(finding.severity),
                            finding.description
                        ));
                    }
                }
                Ok(output)
            }
            CliFormat::Quiet => Ok(format!("{} {}", advice.artifact.id, advice.status)),
        }
    }

    /// Format a short confirmation message.
    pub fn format_message(&self, message: &str) -> String {
        self.colorize(message, "green")
    }

    fn render_table(&self, builder: Builder) -> String {
        let mut table = builder.build();
        table
            .with(Style::rounded())
            .with(Modify::new(Rows::first()).with(Alignment::center()));
        table.to_string()
    }

    fn colorize(&self, text: &str, color: &str) -> String {
        if !self.color_enabled {
            return text.to_string();
        }
        match color {
            "red" => text.red().to_string(),
            "green" => text.green().to_string(),
            "yellow" => text.yellow().to_string(),
            "blue" => text.blue().to_string(),
            "cyan" => text.cyan().to_string(),
            _ => text.to_string(),
        }
    }

    fn colorize_status(&self, status: ArtifactStatus) -> String {
        let color = match status {
            ArtifactStatus::Accepted => "green",
            ArtifactStatus::Corrected | ArtifactStatus::Regenerated => "yellow",
            ArtifactStatus::Flagged => "red",
            ArtifactStatus::Pending => "blue",
        };
        self.colorize(&status.to_string(), color)
    }

    fn colorize_severity(&self, severity: Severity) -> String {
        let color = match severity {
            Severity::Critical => "red",
            Severity::Major => "yellow",
            Severity::Minor => "blue",
        };
        self.colorize(&format!("[{}]", severity), color)
    }
}

fn score_json(score: &ethos_domain::RelevanceScore) -> serde_json::Value {
    serde_json::json!({
        "rank": score.rank,
        "target_id": score.target_id,
        "combined": score.combined,
        "vector": score.breakdown.vector,
        "term_overlap": score.breakdown.term_overlap,
        "structural": score.breakdown.structural,
        "external": score.breakdown.external,
        "graph_distance": score.graph_distance,
    })
}

fn finding_json(finding: &ValidationFinding) -> serde_json::Value {
    serde_json::json!({
        "severity": finding.severity.to_string(),
        "rule_uri": finding.rule_uri,
        "description": finding.description,
        "remediation": finding.remediation.to_string(),
    })
}

fn truncate(text: &str, max_chars: usize) -> String {
    if text.chars().count() <= max_chars {
        return text.to_string();
    }
    let truncated: String = text.chars().take(max_chars).collect();
    format!("{}...", truncated)
}

use serde::{Deserialize, Serialize};

/// Recorded in place of a risk reason or suggestion when there is none.
pub const NO_FINDING: &str = "None";

/// Everything the pipeline concluded about a single clause.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ClauseAnalysis {
    pub clause: String,
    pub summary: String,
    pub is_risky: bool,
    pub risk_reason: String,
    pub suggestion: String,
}

impl ClauseAnalysis {
    pub fn new(
        clause: String,
        summary: String,
        is_risky: bool,
        risk_reason: String,
        suggestion: String,
    ) -> Self {
        Self {
            clause,
            summary,
            is_risky,
            risk_reason,
            suggestion,
        }
    }

    /// Placeholder recorded when a clause could not be analyzed. The clause
    /// text is kept so the report still covers the whole contract.
    pub fn failed(clause: String) -> Self {
        Self {
            clause,
            summary: "Analysis failed".to_string(),
            is_risky: false,
            risk_reason: NO_FINDING.to_string(),
            suggestion: NO_FINDING.to_string(),
        }
    }

    pub fn has_suggestion(&self) -> bool {
        self.suggestion != NO_FINDING
    }
}

/// Aggregate view over every analyzed clause of a contract.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ContractReport {
    pub total_clauses: usize,
    pub risky_clauses_count: usize,
    pub suggestions_count: usize,
    pub clauses: Vec<ClauseAnalysis>,
}

impl ContractReport {
    /// Builds the report from per-clause analyses, deriving the counters.
    pub fn from_analyses(clauses: Vec<ClauseAnalysis>) -> Self {
        let risky_clauses_count = clauses.iter().filter(|c| c.is_risky).count();
        let suggestions_count = clauses.iter().filter(|c| c.has_suggestion()).count();

        Self {
            total_clauses: clauses.len(),
            risky_clauses_count,
            suggestions_count,
            clauses,
        }
    }

    /// Share of clauses flagged risky, as a percentage of the whole
    /// contract. `None` when nothing was flagged.
    pub fn risk_percentage(&self) -> Option<f64> {
        if self.risky_clauses_count == 0 {
            return None;
        }
        Some(self.risky_clauses_count as f64 / self.total_clauses as f64 * 100.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn risky(clause: &str) -> ClauseAnalysis {
        ClauseAnalysis::new(
            clause.to_string(),
            "Summary".to_string(),
            true,
            "Unlimited liability".to_string(),
            "Add a liability cap".to_string(),
        )
    }

    fn benign(clause: &str) -> ClauseAnalysis {
        ClauseAnalysis::new(
            clause.to_string(),
            "Summary".to_string(),
            false,
            NO_FINDING.to_string(),
            "Consider clarifying the term".to_string(),
        )
    }

    #[test]
    fn test_report_counters_derived_from_clauses() {
        let report = ContractReport::from_analyses(vec![
            benign("1. Payment due net 30 days."),
            risky("2. Either party may terminate with 10 days notice."),
            ClauseAnalysis::failed("3. Unparseable clause.".to_string()),
        ]);

        assert_eq!(report.total_clauses, 3);
        assert_eq!(report.risky_clauses_count, 1);
        assert_eq!(report.suggestions_count, 2);
        assert_eq!(report.clauses.len(), 3);
    }

    #[test]
    fn test_failed_placeholder_fields() {
        let analysis = ClauseAnalysis::failed("Some clause text".to_string());

        assert_eq!(analysis.clause, "Some clause text");
        assert_eq!(analysis.summary, "Analysis failed");
        assert!(!analysis.is_risky);
        assert_eq!(analysis.risk_reason, "None");
        assert_eq!(analysis.suggestion, "None");
        assert!(!analysis.has_suggestion());
    }

    #[test]
    fn test_risk_percentage() {
        let flagged = ContractReport::from_analyses(vec![
            risky("clause one text"),
            benign("clause two text"),
            benign("clause three text"),
            benign("clause four text"),
        ]);
        let pct = flagged.risk_percentage().unwrap();
        assert!((pct - 25.0).abs() < f64::EPSILON);

        let clean = ContractReport::from_analyses(vec![benign("clause one text")]);
        assert!(clean.risk_percentage().is_none());
    }

    #[test]
    fn test_report_serializes_with_expected_field_names() {
        let report = ContractReport::from_analyses(vec![risky("clause text here")]);
        let value = serde_json::to_value(&report).unwrap();

        assert_eq!(value["total_clauses"], 1);
        assert_eq!(value["risky_clauses_count"], 1);
        assert_eq!(value["suggestions_count"], 1);
        assert_eq!(value["clauses"][0]["is_risky"], true);
        assert_eq!(value["clauses"][0]["risk_reason"], "Unlimited liability");
    }

    #[test]
    fn test_empty_report() {
        let report = ContractReport::from_analyses(Vec::new());
        assert_eq!(report.total_clauses, 0);
        assert!(report.risk_percentage().is_none());
    }
}

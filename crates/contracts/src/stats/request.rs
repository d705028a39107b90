use serde::{Deserialize, Serialize};

use super::table::{DateGrouping, StatsTable};

/// Query parameters for one table evaluation.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct StatsTableRequest {
    /// Inclusive lower date bound, `YYYY-MM-DD`; open-ended when absent.
    #[serde(default)]
    pub date_from: Option<String>,
    /// Inclusive upper date bound, `YYYY-MM-DD`; open-ended when absent.
    #[serde(default)]
    pub date_to: Option<String>,
    #[serde(default)]
    pub grouping: DateGrouping,
    #[serde(default)]
    pub show_diff: bool,
    /// Restricts rows to one portal when the group configures a portal column.
    #[serde(default)]
    pub portal_id: Option<String>,
}

/// Why a group's data is partial or missing from the table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WarningKind {
    /// The group's query failed to run; the group is absent from the table.
    QueryExecution,
    /// A result row violated the bucket/amount contract; the group keeps the
    /// rows merged before it.
    MalformedRow,
}

/// Diagnostic for a group that was skipped or truncated during evaluation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EvaluationWarning {
    pub group: String,
    pub kind: WarningKind,
    pub message: String,
}

/// Evaluation result: the snapshot plus per-group diagnostics.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StatsTableResponse {
    pub table: StatsTable,
    pub warnings: Vec<EvaluationWarning>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn request_fields_all_default() {
        let request: StatsTableRequest = serde_json::from_str("{}").unwrap();
        assert!(request.date_from.is_none());
        assert!(request.date_to.is_none());
        assert_eq!(request.grouping, DateGrouping::Day);
        assert!(!request.show_diff);
        assert!(request.portal_id.is_none());
    }

    #[test]
    fn warning_kind_uses_snake_case_on_the_wire() {
        let warning = EvaluationWarning {
            group: "Orders".to_string(),
            kind: WarningKind::QueryExecution,
            message: "no such table".to_string(),
        };
        let json = serde_json::to_value(&warning).unwrap();
        assert_eq!(json["kind"], "query_execution");
    }
}

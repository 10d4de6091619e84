use crate::reporting::model::SessionReport;
use serde::Serialize;

#[derive(Serialize)]
struct Report<'a> {
    metadata: Metadata,
    session: &'a SessionReport,
}

#[derive(Serialize)]
struct Metadata {
    tool: String,
    version: String,
    report_date: String,
    report_format: String,
}

pub fn render(report: &SessionReport) -> anyhow::Result<String> {
    let report = Report {
        metadata: Metadata {
            tool: "ANVIL-POST".to_string(),
            version: env!("CARGO_PKG_VERSION").to_string(),
            report_date: chrono::Utc::now().to_rfc3339(),
            report_format: "application/json".to_string(),
        },
        session: report,
    };

    let json = serde_json::to_string_pretty(&report)?;
    Ok(json)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_render_contains_session() {
        let mut report = SessionReport::new("http://target.local/?id=1");
        report.tmp_path = Some("/tmp".to_string());

        let json = render(&report).unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value["metadata"]["tool"], "ANVIL-POST");
        assert_eq!(value["session"]["tmp_path"], "/tmp");
    }
}

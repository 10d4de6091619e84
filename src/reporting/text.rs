use crate::reporting::model::SessionReport;
use unicode_width::UnicodeWidthStr;

const BOX_WIDTH: usize = 70;
const INNER_WIDTH: usize = BOX_WIDTH - 2;

fn top_border() -> String {
    format!("╔{}╗", "═".repeat(INNER_WIDTH))
}

fn middle_border() -> String {
    format!("╠{}╣", "═".repeat(INNER_WIDTH))
}

fn bottom_border() -> String {
    format!("╚{}╝", "═".repeat(INNER_WIDTH))
}

/// Left-aligned box line (emoji-safe)
fn box_line(content: &str) -> String {
    let safe_content = format!(" {} ", content);
    let padding = INNER_WIDTH.saturating_sub(UnicodeWidthStr::width(safe_content.as_str()));
    format!("║{}{}║", safe_content, " ".repeat(padding))
}

fn field(label: &str, value: Option<&str>) -> String {
    box_line(&format!("{:<14}{}", label, value.unwrap_or("-")))
}

pub fn render(report: &SessionReport) -> String {
    let mut lines = vec![
        top_border(),
        box_line("POST-EXPLOITATION SUMMARY"),
        middle_border(),
        field("Target:", Some(report.target.as_str())),
        field("DBMS:", Some(report.dbms.as_str())),
        field("OS:", report.os.as_deref()),
        field("OS version:", report.os_version.as_deref()),
        field("Temp path:", report.tmp_path.as_deref()),
        field("Version:", report.dbms_version.as_deref()),
    ];

    if let Some(tables) = &report.matched_tables {
        lines.push(middle_border());
        lines.push(box_line(&format!("Matching tables: {}", tables.len())));
        for table in tables {
            lines.push(box_line(&format!("  {}", table)));
        }
    }

    if !report.deleted_files.is_empty() {
        lines.push(middle_border());
        for file in &report.deleted_files {
            lines.push(box_line(&format!("Deleted: {}", file)));
        }
    }

    if let Some(cleanup) = &report.cleanup {
        lines.push(middle_border());
        if cleanup.skipped {
            lines.push(box_line("Cleanup skipped: stacked queries unavailable"));
        } else {
            lines.push(box_line(&format!(
                "Cleanup: {} statements ({} failed silently)",
                cleanup.statements.len(),
                cleanup.suppressed
            )));
            if !cleanup.udfs_dropped.is_empty() {
                lines.push(box_line(&format!("UDFs removed: {}", cleanup.udfs_dropped.join(", "))));
            }
            if !cleanup.udfs_failed.is_empty() {
                lines.push(box_line(&format!("UDFs NOT removed (drop failed): {}", cleanup.udfs_failed.join(", "))));
            }
            if !cleanup.udfs_kept.is_empty() {
                lines.push(box_line(&format!("UDFs kept: {}", cleanup.udfs_kept.join(", "))));
            }
        }
    }

    lines.push(bottom_border());
    lines.join("\n")
}

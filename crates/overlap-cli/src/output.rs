//! Output formatting module

use serde::Serialize;

use overlap_domain::model::DateRange;
use overlap_types::{OutputFormat, Result};

#[derive(Debug, Serialize)]
struct CheckReport<'a> {
    range1: &'a DateRange,
    range2: &'a DateRange,
    is_overlap: bool,
}

pub fn output_check(output_format: OutputFormat, range1: &DateRange, range2: &DateRange, is_overlap: bool) -> Result<()> {
    println!("{}", render_check(output_format, range1, range2, is_overlap)?);
    Ok(())
}

fn render_check(output_format: OutputFormat, range1: &DateRange, range2: &DateRange, is_overlap: bool) -> Result<String> {
    if output_format == OutputFormat::Json {
        let report = CheckReport {
            range1,
            range2,
            is_overlap,
        };
        return Ok(serde_json::to_string_pretty(&report)?);
    }

    let mut lines = vec![
        String::new(),
        "Overlap Check".to_string(),
        "=============".to_string(),
    ];
    lines.push(format!("Range 1:  {} - {}", range1.start.to_rfc3339(), range1.end.to_rfc3339()));
    lines.push(format!("Range 2:  {} - {}", range2.start.to_rfc3339(), range2.end.to_rfc3339()));
    lines.push(format!("Overlap:  {}", if is_overlap { "Yes" } else { "No" }));
    Ok(lines.join("\n"))
}

use ts_rs::TS;

/// Every type the API puts on the wire, in the order they are emitted.
pub const API_TYPE_NAMES: [&str; 6] = [
    "FeedbackRecord",
    "NewFeedback",
    "CourseSummary",
    "HealthResponse",
    "VersionResponse",
    "ErrorResponse",
];

/// Leading line of the generated file.
pub const FILE_BANNER: &str =
    "// Course feedback API types. Regenerate with `cargo run -p shared-types --bin generate_api_types`.";

// ts-rs emits these per type; one file needs neither.
const DROPPED_LINE_PREFIXES: [&str; 2] = ["import type", "// This file was generated"];

/// Renders `type_names` into a single TypeScript module, banner first.
pub fn generate_typescript_definitions(
    type_names: &[&str],
) -> Result<String, Box<dyn std::error::Error>> {
    if type_names.is_empty() {
        return Err("No type names provided".into());
    }

    let mut module = String::from(FILE_BANNER);
    for name in type_names {
        let body = strip_per_file_lines(&export_type(name)?);
        if !body.is_empty() {
            module.push_str("\n\n");
            module.push_str(&body);
        }
    }

    Ok(module)
}

fn export_type(name: &str) -> Result<String, Box<dyn std::error::Error>> {
    use crate::*;

    let declaration = match name {
        "FeedbackRecord" => FeedbackRecord::export_to_string()?,
        "NewFeedback" => NewFeedback::export_to_string()?,
        "CourseSummary" => CourseSummary::export_to_string()?,
        "HealthResponse" => HealthResponse::export_to_string()?,
        "VersionResponse" => VersionResponse::export_to_string()?,
        "ErrorResponse" => ErrorResponse::export_to_string()?,
        other => {
            return Err(format!(
                "Unknown type: '{other}'. Available types: {}",
                API_TYPE_NAMES.join(", ")
            )
            .into())
        }
    };

    Ok(declaration)
}

fn strip_per_file_lines(declaration: &str) -> String {
    declaration
        .lines()
        .map(|line| line.trim_end_matches('\r'))
        .filter(|line| {
            let line = line.trim_start();
            !DROPPED_LINE_PREFIXES
                .iter()
                .any(|prefix| line.starts_with(prefix))
        })
        .collect::<Vec<_>>()
        .join("\n")
        .trim()
        .to_string()
}

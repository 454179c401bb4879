use crate::output;
use clap::ValueEnum;
use serde_json::json;
use std::collections::BTreeMap;

/// Output encodings. Purely presentational, orthogonal to the action.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Format {
    Text,
    Bash,
    Json,
    Dockerenv,
    /// Name/value-pair array, as consumed by container schedulers.
    Nvdict,
}

pub fn render_mapping(map: &BTreeMap<String, String>, format: Format) -> String {
    match format {
        Format::Text => map
            .iter()
            .map(|(k, v)| format!("{k} = {v}"))
            .collect::<Vec<_>>()
            .join("\n"),
        Format::Bash => map
            .iter()
            .map(|(k, v)| format!("export {k}={v}"))
            .collect::<Vec<_>>()
            .join("\n"),
        Format::Dockerenv => map
            .iter()
            .map(|(k, v)| format!("{k}={v}"))
            .collect::<Vec<_>>()
            .join("\n"),
        Format::Json => serde_json::to_string(map).unwrap_or_default(),
        Format::Nvdict => {
            let items: Vec<_> = map
                .iter()
                .map(|(k, v)| json!({ "name": k, "value": v }))
                .collect();
            serde_json::to_string(&items).unwrap_or_default()
        }
    }
}

/// Sequence rendering is only defined for text and json; other formats
/// produce no output.
pub fn render_sequence(items: &[String], format: Format) -> Option<String> {
    match format {
        Format::Text => Some(items.join("\n")),
        Format::Json => Some(serde_json::to_string(items).unwrap_or_default()),
        _ => None,
    }
}

pub fn profile_header(profile: &str, format: Format) -> Option<String> {
    match format {
        Format::Text => Some(format!("[profile:{profile}]")),
        Format::Bash => Some(format!("# profile: {profile}")),
        _ => None,
    }
}

pub fn print_profile(profile: &str, format: Format) {
    match format {
        Format::Text => {
            if let Some(header) = profile_header(profile, format) {
                output::info(&header);
            }
        }
        Format::Bash => {
            if let Some(header) = profile_header(profile, format) {
                output::echo(&header);
            }
        }
        _ => {}
    }
}

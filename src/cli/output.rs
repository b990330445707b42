use std::io::Write;

use serde::Serialize;
use serde_json::{Value, json};

use crate::cli::OutputFormat;
use crate::cli::display::{self, Palette};
use notebook_lister::core::listing::{Listing, Outcome};
use notebook_lister::error::ListerError;

/// Write a completed listing in the requested output format.
pub fn output_listing(
    listing: &Listing,
    format: OutputFormat,
    palette: &Palette,
    writer: &mut dyn Write,
) -> anyhow::Result<()> {
    match format {
        OutputFormat::Json => {
            let doc = json!({
                "server": listing.server,
                "resources": outcome_json(&listing.resources)?,
                "tools": outcome_json(&listing.tools)?,
            });
            serde_json::to_writer_pretty(&mut *writer, &doc)?;
            writeln!(writer)?;
        }
        OutputFormat::Human => {
            writeln!(writer, "{}", display::render_listing(listing, palette))?;
        }
    }
    Ok(())
}

/// Write a failure that ended the run before listing.
pub fn output_failure(
    command: &str,
    err: &ListerError,
    format: OutputFormat,
    palette: &Palette,
    writer: &mut dyn Write,
) -> anyhow::Result<()> {
    match format {
        OutputFormat::Json => {
            let doc = json!({
                "server": command,
                "error": display::render_failure(err, &Palette::plain()),
            });
            serde_json::to_writer_pretty(&mut *writer, &doc)?;
            writeln!(writer)?;
        }
        OutputFormat::Human => {
            writeln!(writer, "{}", display::render_failure(err, palette))?;
        }
    }
    Ok(())
}

fn outcome_json<T: Serialize>(outcome: &Outcome<T>) -> serde_json::Result<Value> {
    match outcome {
        Ok(items) => serde_json::to_value(items),
        Err(e) => Ok(json!({ "error": e })),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use notebook_lister::core::listing::{ListingError, NotebookResource, ToolInfo};

    fn listing() -> Listing {
        Listing {
            server: "notebooklm-mcp".into(),
            resources: Ok(vec![NotebookResource {
                name: "Research".into(),
                uri: "notebook://research".into(),
            }]),
            tools: Err(ListingError::transport("Transport closed")),
        }
    }

    #[test]
    fn human_output_ends_with_newline() {
        let mut buf = Vec::new();
        output_listing(&listing(), OutputFormat::Human, &Palette::plain(), &mut buf).unwrap();
        let text = String::from_utf8(buf).unwrap();

        assert!(text.starts_with("\n--- Resources (Notebooks) ---\n- Research (notebook://research)\n"));
        assert!(text.ends_with("Error listing tools: Transport closed\n"));
    }

    #[test]
    fn json_output_shape() {
        let mut buf = Vec::new();
        output_listing(&listing(), OutputFormat::Json, &Palette::plain(), &mut buf).unwrap();
        let doc: Value = serde_json::from_slice(&buf).unwrap();

        assert_eq!(doc["server"], "notebooklm-mcp");
        assert_eq!(doc["resources"][0]["uri"], "notebook://research");
        assert_eq!(doc["tools"]["error"]["kind"], "transport");
        assert_eq!(doc["tools"]["error"]["message"], "Transport closed");
    }

    #[test]
    fn json_tool_without_description_omits_field() {
        let listing = Listing {
            server: "srv".into(),
            resources: Ok(vec![]),
            tools: Ok(vec![ToolInfo {
                name: "ping".into(),
                description: None,
            }]),
        };
        let mut buf = Vec::new();
        output_listing(&listing, OutputFormat::Json, &Palette::plain(), &mut buf).unwrap();
        let doc: Value = serde_json::from_slice(&buf).unwrap();

        assert_eq!(doc["tools"][0]["name"], "ping");
        assert!(doc["tools"][0].get("description").is_none());
    }

    #[test]
    fn json_failure_carries_message() {
        let err = ListerError::CommandNotFound {
            command: "notebooklm-mcp".into(),
        };
        let mut buf = Vec::new();
        output_failure("notebooklm-mcp", &err, OutputFormat::Json, &Palette::plain(), &mut buf)
            .unwrap();
        let doc: Value = serde_json::from_slice(&buf).unwrap();

        assert_eq!(doc["server"], "notebooklm-mcp");
        assert!(doc["error"].as_str().unwrap().contains("not found"));
    }
}

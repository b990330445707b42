use owo_colors::OwoColorize;

use notebook_lister::core::listing::{Listing, ListingError, NotebookResource, Outcome, ToolInfo};
use notebook_lister::error::ListerError;

pub const RESOURCES_HEADER: &str = "--- Resources (Notebooks) ---";
pub const TOOLS_HEADER: &str = "--- Available Tools ---";

/// Terminal styling, or none when colour is off.
#[derive(Debug, Clone, Copy)]
pub struct Palette {
    color: bool,
}

impl Palette {
    pub fn new(color: bool) -> Self {
        Self { color }
    }

    pub fn plain() -> Self {
        Self::new(false)
    }

    fn header(&self, text: &str) -> String {
        if self.color {
            text.bold().to_string()
        } else {
            text.to_string()
        }
    }

    fn error(&self, text: &str) -> String {
        if self.color {
            text.red().to_string()
        } else {
            text.to_string()
        }
    }
}

pub fn render_connecting(command: &str) -> String {
    format!("Connecting to {}...", command)
}

pub fn render_resource_line(resource: &NotebookResource) -> String {
    format!("- {} ({})", resource.name, resource.uri)
}

pub fn render_tool_line(tool: &ToolInfo) -> String {
    match tool.description {
        Some(ref description) => format!("- {}: {}", tool.name, description),
        None => format!("- {}", tool.name),
    }
}

pub fn render_listing_error(kind: &str, err: &ListingError) -> String {
    format!("Error listing {}: {}", kind, err)
}

/// Render both sections, each preceded by a blank line.
pub fn render_listing(listing: &Listing, palette: &Palette) -> String {
    let mut lines = Vec::new();
    render_section(
        &mut lines,
        palette,
        RESOURCES_HEADER,
        "resources",
        &listing.resources,
        render_resource_line,
    );
    render_section(
        &mut lines,
        palette,
        TOOLS_HEADER,
        "tools",
        &listing.tools,
        render_tool_line,
    );
    lines.join("\n")
}

fn render_section<T>(
    lines: &mut Vec<String>,
    palette: &Palette,
    header: &str,
    kind: &str,
    outcome: &Outcome<T>,
    render: fn(&T) -> String,
) {
    lines.push(String::new());
    lines.push(palette.header(header));
    match outcome {
        Ok(items) => lines.extend(items.iter().map(render)),
        Err(e) => lines.push(palette.error(&render_listing_error(kind, e))),
    }
}

/// Render a failure that ended the run before any listing.
pub fn render_failure(err: &ListerError, palette: &Palette) -> String {
    let text = match err {
        ListerError::CommandNotFound { command } => format!(
            "Error: Command '{}' not found. Make sure it's installed and in your PATH.",
            command
        ),
        other => format!("An error occurred: {}", other),
    };
    palette.error(&text)
}

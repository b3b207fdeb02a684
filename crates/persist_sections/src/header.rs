// crates/persist_sections/src/header.rs

use chrono::{DateTime, Local};
use drop_section::SectionKind;

/// The metadata stamped at the top of every generated file.
#[derive(Debug, Clone)]
pub struct HeaderContext {
    /// Base name of the component, e.g. `fibonacci_generator`.
    pub component_name: String,
    /// Name of the drop the section came from.
    pub source_file: String,
    /// Already formatted as `%Y-%m-%d %H:%M:%S`.
    pub generated_on: String,
}

impl HeaderContext {
    pub fn new(component_name: &str, source_file: &str, generated_on: DateTime<Local>) -> Self {
        Self {
            component_name: component_name.to_string(),
            source_file: source_file.to_string(),
            generated_on: generated_on.format("%Y-%m-%d %H:%M:%S").to_string(),
        }
    }

    /// A context stamped with the current local time.
    pub fn now(component_name: &str, source_file: &str) -> Self {
        Self::new(component_name, source_file, Local::now())
    }
}

/// `fibonacci_generator` → `Fibonacci Generator`.
pub fn title_case(name: &str) -> String {
    let mut out = String::with_capacity(name.len());
    let mut prev_is_letter = false;
    for c in name.replace('_', " ").chars() {
        if prev_is_letter {
            out.extend(c.to_lowercase());
        } else {
            out.extend(c.to_uppercase());
        }
        prev_is_letter = c.is_alphabetic();
    }
    out
}

/// Renders the header for a file with extension `ext`, in that language's
/// comment syntax.
pub fn render_header(kind: SectionKind, ext: &str, ctx: &HeaderContext) -> String {
    let title = format!("{} - {}", title_case(&ctx.component_name), kind.title());
    let section = kind.as_str();
    let source = &ctx.source_file;
    let stamp = &ctx.generated_on;

    match ext {
        "py" => format!(
            "\"\"\"\n{title}\n\nGenerated from drop: {source}\nSection: {section}\nGenerated on: {stamp}\n\"\"\"\n\n"
        ),
        "js" | "c" | "cpp" | "java" => format!(
            "/**\n * {title}\n *\n * Generated from drop: {source}\n * Section: {section}\n * Generated on: {stamp}\n */\n\n"
        ),
        "md" => format!(
            "# {title}\n\n*Generated from drop: {source}*\n*Section: {section}*\n*Generated on: {stamp}*\n---\n"
        ),
        _ => format!(
            "// {title}\n// Generated from drop: {source}\n// Section: {section}\n// Generated on: {stamp}\n\n"
        ),
    }
}

/// Prepends the header to `content`. The content itself is not touched.
pub fn add_documentation_header(
    content: &str,
    kind: SectionKind,
    ext: &str,
    ctx: &HeaderContext,
) -> String {
    let mut out = render_header(kind, ext, ctx);
    out.push_str(content);
    out
}

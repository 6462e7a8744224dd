//! Aggregator files and their merge rules.
//!
//! An aggregator is a generated Go file that lists one import and one
//! registration call per resource. Every `create api` adds to the list, so
//! the file is rebuilt from its template on each run with the entries read
//! back from the previous version:
//!
//! ```text
//! existing file ──parse_sections──► [imports], [registrations]
//!                                          │
//!                      resource ──derive──►│ append (dedup)
//!                                          ▼
//! template body ──────────────splice──► final text (Overwrite)
//! ```
//!
//! Imports dedup by sub-path containment, so an import for the same
//! group/version under another alias counts as present. Registrations dedup
//! by exact string. Entries keep first-seen order; new ones go last.

use std::fmt;
use std::sync::LazyLock;

use regex::Regex;

use crate::domain::{
    entities::template::TemplateType,
    section_parser::{parse_sections, Extractor, SectionSpec},
    value_objects::ResourceDescriptor,
};

pub const IMPORTS_BEGIN: &str = "// kindling:imports:begin";
pub const IMPORTS_END: &str = "// kindling:imports:end";
pub const REGISTER_BEGIN: &str = "// kindling:register:begin";
pub const REGISTER_END: &str = "// kindling:register:end";

/// Body line replaced by the serialized import entries.
pub const IMPORTS_PLACEHOLDER: &str = "{{AGGREGATOR_IMPORTS}}";
/// Body line replaced by the serialized registration entries.
pub const REGISTRATIONS_PLACEHOLDER: &str = "{{AGGREGATOR_REGISTRATIONS}}";

const IMPORTS_SECTION: &str = "imports";
const REGISTRATIONS_SECTION: &str = "registrations";

static SECTIONS: LazyLock<Vec<SectionSpec>> = LazyLock::new(|| {
    vec![
        SectionSpec::new(
            IMPORTS_SECTION,
            IMPORTS_BEGIN,
            IMPORTS_END,
            Regex::new(r#"^([A-Za-z_]\w*\s+)?"[^"]+"$"#).expect("Invalid regex"),
            Extractor::ImportLine,
        ),
        SectionSpec::new(
            REGISTRATIONS_SECTION,
            REGISTER_BEGIN,
            REGISTER_END,
            Regex::new(r"^\s*([A-Za-z_]\w*(?:\.\w+)+),\s*$").expect("Invalid regex"),
            Extractor::MatchGroup,
        ),
    ]
});

/// The aggregator files the generator maintains.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AggregatorKind {
    /// `apis/<project>.go`: registers every API group with the scheme.
    Apis,
    /// `internal/controller/<project>.go`: sets up every controller.
    Controllers,
}

impl AggregatorKind {
    pub const ALL: [AggregatorKind; 2] = [Self::Apis, Self::Controllers];

    /// Identifier of the template the aggregator is rendered from.
    pub fn template_type(&self) -> TemplateType {
        match self {
            Self::Apis => TemplateType::new("ApisImageNameGo"),
            Self::Controllers => TemplateType::new("InternalControllerImageNameGo"),
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Apis => "apis",
            Self::Controllers => "controllers",
        }
    }

    fn alias(&self, resource: &ResourceDescriptor) -> String {
        match self {
            Self::Apis => alias_safe(&format!("{}{}", resource.group, resource.version)),
            Self::Controllers => alias_safe(&format!("{}{}", resource.group, resource.kind)),
        }
    }

    fn package_path(&self, resource: &ResourceDescriptor) -> String {
        match self {
            Self::Apis => format!("apis/{}/{}", resource.group_lower(), resource.version_lower()),
            Self::Controllers => format!(
                "internal/controller/{}/{}",
                resource.group_lower(),
                resource.kind_lower()
            ),
        }
    }

    /// Import declaration for a resource; `None` for the base API.
    pub fn import_entry(&self, module_path: &str, resource: &ResourceDescriptor) -> Option<String> {
        if resource.is_base() {
            return None;
        }
        Some(format!(
            "{} \"{}/{}\"",
            self.alias(resource),
            module_path.trim_end_matches('/'),
            self.package_path(resource)
        ))
    }

    /// Registration call for a resource; `None` for the base API.
    pub fn registration_entry(&self, resource: &ResourceDescriptor) -> Option<String> {
        if resource.is_base() {
            return None;
        }
        let alias = self.alias(resource);
        Some(match self {
            Self::Apis => format!("{alias}.SchemeBuilder.AddToScheme"),
            Self::Controllers => format!("{alias}.Setup"),
        })
    }

    /// Sub-path whose presence in any import marks the resource as imported.
    pub fn dedup_subpath(&self, resource: &ResourceDescriptor) -> String {
        format!("/{}\"", self.package_path(resource))
    }
}

impl fmt::Display for AggregatorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Lower-case and drop everything that cannot appear in a Go identifier.
pub fn alias_safe(raw: &str) -> String {
    raw.chars()
        .filter(char::is_ascii_alphanumeric)
        .map(|c| c.to_ascii_lowercase())
        .collect()
}

/// The dynamic entries of one aggregator file.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AggregatorDocument {
    imports: Vec<String>,
    registrations: Vec<String>,
}

impl AggregatorDocument {
    pub fn new() -> Self {
        Self::default()
    }

    /// Read the entries back from a previously generated file.
    pub fn parse(text: &str) -> Self {
        let mut sections = parse_sections(text, &SECTIONS);
        Self {
            imports: sections.remove(IMPORTS_SECTION).unwrap_or_default(),
            registrations: sections.remove(REGISTRATIONS_SECTION).unwrap_or_default(),
        }
    }

    pub fn imports(&self) -> &[String] {
        &self.imports
    }

    pub fn registrations(&self) -> &[String] {
        &self.registrations
    }

    /// Append the import unless one already references `subpath`.
    pub fn push_import(&mut self, entry: String, subpath: &str) -> bool {
        if self.imports.iter().any(|existing| existing.contains(subpath)) {
            return false;
        }
        self.imports.push(entry);
        true
    }

    /// Append the registration unless an identical one exists.
    pub fn push_registration(&mut self, entry: String) -> bool {
        if self.registrations.contains(&entry) {
            return false;
        }
        self.registrations.push(entry);
        true
    }

    /// Add the entries a resource implies. The base API contributes nothing.
    pub fn add_resource(
        &mut self,
        kind: AggregatorKind,
        module_path: &str,
        resource: &ResourceDescriptor,
    ) {
        if let Some(import) = kind.import_entry(module_path, resource) {
            self.push_import(import, &kind.dedup_subpath(resource));
        }
        if let Some(registration) = kind.registration_entry(resource) {
            self.push_registration(registration);
        }
    }

    /// Splice the entries into an aggregator body.
    ///
    /// Each placeholder line, newline included, becomes the entry block.
    pub fn render_into(&self, body: &str) -> String {
        let mut out = String::with_capacity(body.len());

        for line in body.split_inclusive('\n') {
            match line.trim() {
                IMPORTS_PLACEHOLDER => {
                    for import in &self.imports {
                        out.push('\t');
                        out.push_str(import);
                        out.push('\n');
                    }
                }
                REGISTRATIONS_PLACEHOLDER => {
                    for registration in &self.registrations {
                        out.push_str("\t\t");
                        out.push_str(registration);
                        out.push_str(",\n");
                    }
                }
                _ => out.push_str(line),
            }
        }

        out
    }
}

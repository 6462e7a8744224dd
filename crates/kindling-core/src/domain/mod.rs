// ============================================================================
//  CLEAN MODULE BOUNDARIES
// ============================================================================

//! Core domain layer for kindling.
//!
//! Pure logic only: template classification, path templating, product
//! construction, the section-scoped parser and the aggregator merge. All I/O
//! is reached through ports defined in the application layer.
//!
//! ## Hexagonal Architecture Compliance
//!
//! - **No async**: Domain logic is synchronous
//! - **No I/O**: No filesystem, network, or external calls
//! - **Deterministic**: Same inputs, same files (the current year aside)
//!
// Public API - what the world sees
pub mod aggregator;
pub mod entities;
pub mod error;
pub mod path_template;
pub mod section_parser;
pub mod value_objects;

mod validation;

pub use aggregator::{AggregatorDocument, AggregatorKind};
pub use entities::{
    common::RelativePath,
    product::{RenderContext, TemplateProduct},
    template::{TemplateCatalog, TemplateCategory, TemplateDescriptor, TemplateType},
};
pub use error::{DomainError, ErrorCategory};
pub use path_template::Substitutions;
pub use section_parser::{Extractor, SectionSpec, parse_sections};
pub use validation::DomainValidator;
pub use value_objects::{ExistsPolicy, ProductOptions, ProjectConfig, ResourceDescriptor};

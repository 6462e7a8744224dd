//! Application services - orchestrate use cases.
//!
//! Services coordinate the domain layer and ports to accomplish
//! high-level use cases like "initialize a project" or "add a resource".

pub mod product_factory;
pub mod scaffold_service;
pub mod template_service;

pub use product_factory::{
    PerResourceBuilder, ProductBuilder, ProductFactory, ProjectWideBuilder, StaticBuilder,
};
pub use scaffold_service::{FileFailure, GenerationReport, ScaffoldService};
pub use template_service::{TemplateInfo, TemplateService};

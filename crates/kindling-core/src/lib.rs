//! kindling core - hexagonal architecture implementation
//!
//! This crate provides the domain and application layers for the kindling
//! scaffolding generator, following hexagonal (ports and adapters) architecture.
//!
//! ## Architecture Overview
//!
//! ```text
//! ┌─────────────────────────────────────────┐
//! │          kindling-cli (CLI)             │
//! │     (Implements Driving Ports)          │
//! └──────────────────┬──────────────────────┘
//!                    │ calls
//!                    ▼
//! ┌─────────────────────────────────────────┐
//! │         Application Services            │
//! │ (ScaffoldService, TemplateService,      │
//! │  ProductFactory)                        │
//! └──────────────────┬──────────────────────┘
//!                    │ uses
//!                    ▼
//! ┌─────────────────────────────────────────┐
//! │      Application Ports (Traits)         │
//! │     (Driven: TemplateStore, Filesystem) │
//! └──────────────────┬──────────────────────┘
//!                    │ implemented by
//!                    ▼
//! ┌─────────────────────────────────────────┐
//! │    kindling-adapters (Infrastructure)   │
//! │ (InMemoryStore, DirectoryStore,         │
//! │  LocalFilesystem, MemoryFilesystem)     │
//! └─────────────────────────────────────────┘
//!                    │
//!                    ▼
//! ┌─────────────────────────────────────────┐
//! │         Domain Layer (Pure Logic)       │
//! │ (TemplateCatalog, TemplateProduct,      │
//! │  section parser, aggregator merge)      │
//! └─────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//!
//! ```rust,ignore
//! use kindling_core::prelude::*;
//!
//! let service = ScaffoldService::new(Box::new(store), Box::new(filesystem))?;
//! let config = ProjectConfig::new("github.com/acme/provider-cloud", "cloud.acme.io");
//!
//! service.init_project(root, &config, false)?;
//! service.add_resource(
//!     root,
//!     &config,
//!     &ResourceDescriptor::new("compute", "v1alpha1", "Instance"),
//!     false,
//! )?;
//! ```

pub mod domain;

pub mod application;

pub mod error;

// Public API - what external crates should use
pub mod prelude {
    pub use crate::application::{
        ApplicationError, GenerationReport, ScaffoldService, TemplateInfo, TemplateService,
        ports::{Filesystem, TemplateStore},
    };
    pub use crate::domain::{
        AggregatorKind, DomainError, DomainValidator, ExistsPolicy, ProductOptions,
        ProjectConfig, ResourceDescriptor, TemplateCatalog, TemplateCategory, TemplateProduct,
        TemplateType,
    };
    pub use crate::error::{Context, KindlingError, KindlingResult};
}

// Version info
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

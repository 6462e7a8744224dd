pub mod common;
pub mod product;
pub mod template;

pub use crate::domain::DomainError;
pub use product::{RenderContext, TemplateProduct};
pub use template::{TemplateCatalog, TemplateCategory, TemplateDescriptor, TemplateType};

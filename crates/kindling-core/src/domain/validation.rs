use crate::domain::{
    error::DomainError,
    value_objects::{ProjectConfig, ResourceDescriptor},
};

/// Centralized domain validation.
///
/// All validation logic lives here, not scattered across entities.
pub struct DomainValidator;

impl DomainValidator {
    /// Group: empty (base API) or a lowercase DNS label starting with a letter.
    /// Version: `v<digits>` optionally followed by `alpha<digits>` or `beta<digits>`.
    /// Kind: UpperCamelCase identifier.
    pub fn validate_resource(resource: &ResourceDescriptor) -> Result<(), DomainError> {
        let invalid = |reason: String| DomainError::InvalidResource {
            resource: resource.to_string(),
            reason,
        };

        if !resource.group.is_empty() && !is_group_name(&resource.group) {
            return Err(invalid(format!(
                "group '{}' must be a lowercase DNS label starting with a letter",
                resource.group
            )));
        }

        if !is_api_version(&resource.version) {
            return Err(invalid(format!(
                "version '{}' must look like v1, v1alpha1 or v2beta3",
                resource.version
            )));
        }

        if !is_upper_camel(&resource.kind) {
            return Err(invalid(format!(
                "kind '{}' must be UpperCamelCase",
                resource.kind
            )));
        }

        Ok(())
    }

    pub fn validate_config(config: &ProjectConfig) -> Result<(), DomainError> {
        let module = config.module_path.trim();
        if module.is_empty() {
            return Err(DomainError::InvalidConfiguration(
                "module path cannot be empty".into(),
            ));
        }
        if module.chars().any(char::is_whitespace) || module.starts_with('/') {
            return Err(DomainError::InvalidConfiguration(format!(
                "module path '{}' is not a valid import path",
                config.module_path
            )));
        }

        if config.domain.is_empty() || !config.domain.split('.').all(is_dns_label) {
            return Err(DomainError::InvalidConfiguration(format!(
                "domain '{}' must be dot-separated lowercase DNS labels",
                config.domain
            )));
        }

        Ok(())
    }
}

fn is_dns_label(s: &str) -> bool {
    !s.is_empty()
        && s.len() <= 63
        && s.chars()
            .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '-')
        && !s.starts_with('-')
        && !s.ends_with('-')
}

/// Groups end up as the prefix of Go import aliases, so the first
/// character must be a letter.
fn is_group_name(s: &str) -> bool {
    s.starts_with(|c: char| c.is_ascii_lowercase()) && is_dns_label(s)
}

fn is_api_version(s: &str) -> bool {
    let Some(rest) = s.strip_prefix('v') else {
        return false;
    };
    let major_len = rest.chars().take_while(char::is_ascii_digit).count();
    if major_len == 0 || rest.starts_with('0') {
        return false;
    }

    let tail = &rest[major_len..];
    if tail.is_empty() {
        return true;
    }

    ["alpha", "beta"].iter().any(|stage| {
        tail.strip_prefix(stage)
            .is_some_and(|n| !n.is_empty() && n.chars().all(|c| c.is_ascii_digit()))
    })
}

fn is_upper_camel(s: &str) -> bool {
    s.chars().next().is_some_and(|c| c.is_ascii_uppercase())
        && s.chars().all(|c| c.is_ascii_alphanumeric())
}

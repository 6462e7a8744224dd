//! Output path templating.
//!
//! Skeletons carry bare uppercase tokens (`apis/GROUP/VERSION/doc.go`). Each
//! bound token is replaced everywhere it occurs; unbound tokens are left as
//! they are, since project-wide templates only ever receive a subset.

use std::collections::BTreeMap;

use crate::domain::entities::template::strip_root_container;

pub const TOKEN_GROUP: &str = "GROUP";
pub const TOKEN_VERSION: &str = "VERSION";
pub const TOKEN_KIND: &str = "KIND";
pub const TOKEN_IMAGE_NAME: &str = "IMAGE_NAME";

/// Token -> value bindings for one path.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Substitutions {
    bindings: BTreeMap<String, String>,
}

impl Substitutions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn bind(mut self, token: impl Into<String>, value: impl Into<String>) -> Self {
        self.insert(token, value);
        self
    }

    pub fn insert(&mut self, token: impl Into<String>, value: impl Into<String>) {
        self.bindings.insert(token.into(), value.into());
    }

    pub fn get(&self, token: &str) -> Option<&str> {
        self.bindings.get(token).map(String::as_str)
    }

    pub fn is_empty(&self) -> bool {
        self.bindings.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.bindings.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    /// Render a skeleton into a concrete relative path.
    ///
    /// The leading root container segment is dropped first. Pure and total.
    pub fn render(&self, skeleton: &str) -> String {
        let mut path = strip_root_container(skeleton).to_string();

        // Longer tokens first so a token that contains another is never split.
        let mut tokens: Vec<(&str, &str)> = self.iter().collect();
        tokens.sort_by(|a, b| b.0.len().cmp(&a.0.len()).then(a.0.cmp(b.0)));

        for (token, value) in tokens {
            if path.contains(token) {
                path = path.replace(token, value);
            }
        }

        path
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn resource_bindings() -> Substitutions {
        Substitutions::new()
            .bind(TOKEN_GROUP, "compute")
            .bind(TOKEN_VERSION, "v1alpha1")
            .bind(TOKEN_KIND, "instance")
            .bind(TOKEN_IMAGE_NAME, "provider-cloud")
    }

    #[test]
    fn renders_per_resource_path() {
        let path = resource_bindings().render("apis/GROUP/VERSION/types.go");
        assert_eq!(path, "apis/compute/v1alpha1/types.go");
    }

    #[test]
    fn strips_root_container() {
        let path = resource_bindings().render("project/internal/controller/GROUP/KIND/KIND.go");
        assert_eq!(path, "internal/controller/compute/instance/instance.go");
    }

    #[test]
    fn leaves_unbound_tokens_untouched() {
        let subs = Substitutions::new().bind(TOKEN_IMAGE_NAME, "provider-cloud");
        assert_eq!(
            subs.render("project/apis/GROUP/VERSION/IMAGE_NAME.go"),
            "apis/GROUP/VERSION/provider-cloud.go"
        );
    }

    #[test]
    fn substitutes_every_occurrence() {
        let path = resource_bindings().render("KIND/KIND_types.go");
        assert_eq!(path, "instance/instance_types.go");
    }

    #[test]
    fn no_recognized_token_survives() {
        let subs = resource_bindings();
        let path = subs.render("project/cluster/images/IMAGE_NAME/GROUP-VERSION-KIND");
        for token in [TOKEN_GROUP, TOKEN_VERSION, TOKEN_KIND, TOKEN_IMAGE_NAME] {
            assert!(!path.contains(token), "{token} left in {path}");
        }
    }
}

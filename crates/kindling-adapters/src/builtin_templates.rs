//! Templates bundled into the binary.
//!
//! Each entry pairs a store path with its body, compiled in with
//! `include_str!` so the default store needs no files at runtime. Store
//! paths mirror the layout under `templates/`.

macro_rules! bundled {
    ($($path:literal),* $(,)?) => {
        &[$(($path, include_str!(concat!("../templates/", $path)))),*]
    };
}

/// `(store path, body)` for every bundled template.
pub const BUILTIN_TEMPLATES: &[(&str, &str)] = bundled![
    // Project-wide
    "project/go.mod.tmpl",
    "project/Makefile.tmpl",
    "project/cmd/provider/main.go.tmpl",
    "project/hack/boilerplate.go.txt.tmpl",
    "project/cluster/images/IMAGE_NAME/Dockerfile.tmpl",
    "project/apis/v1alpha1/doc.go.tmpl",
    "project/apis/v1alpha1/register.go.tmpl",
    "project/apis/v1alpha1/providerconfig_types.go.tmpl",
    "project/internal/controller/config/config.go.tmpl",
    // Aggregators
    "project/apis/IMAGE_NAME.go.tmpl",
    "project/internal/controller/IMAGE_NAME.go.tmpl",
    // Static
    "project/LICENSE.tmpl",
    "project/.gitignore.tmpl",
    // Per-resource
    "project/apis/GROUP/VERSION/doc.go.tmpl",
    "project/apis/GROUP/VERSION/register.go.tmpl",
    "project/apis/GROUP/VERSION/KIND_types.go.tmpl",
    "project/internal/controller/GROUP/KIND/KIND.go.tmpl",
    "project/examples/GROUP/KIND.yaml.tmpl",
];

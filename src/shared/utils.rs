//! Utility functions and helpers

/// Placeholder marking where a collection slug goes in a URL template
pub const SLUG_PLACEHOLDER: &str = "%s";

/// Substitute `slug` for every `%s` in a URL template
pub fn fill_template(template: &str, slug: &str) -> String {
    template.replace(SLUG_PLACEHOLDER, slug)
}

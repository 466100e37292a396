//! `{{ variable }}` placeholder substitution for email templates.

use regex::{Captures, Regex};
use std::collections::HashMap;
use std::sync::LazyLock;

static PLACEHOLDER: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\{\{\s*(\w+)\s*\}\}").expect("placeholder pattern is valid")
});

/// Substitutes `{{ name }}` placeholders with the provided values.
///
/// Unknown variables are left intact in the output (and logged), so a
/// misconfigured template degrades visibly instead of silently dropping
/// content.
///
/// # Arguments
/// - `text` - Template text containing zero or more placeholders
/// - `variables` - Substitution values keyed by placeholder name
pub fn render(text: &str, variables: &HashMap<String, String>) -> String {
    PLACEHOLDER
        .replace_all(text, |caps: &Captures| {
            let key = &caps[1];
            match variables.get(key) {
                Some(value) => value.clone(),
                None => {
                    tracing::warn!(variable = key, "template variable not provided");
                    caps[0].to_string()
                }
            }
        })
        .into_owned()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn vars(pairs: &[(&str, &str)]) -> HashMap<String, String> {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn substitutes_known_variables() {
        let out = render(
            "Hello {{ name }}, your code is {{code}}.",
            &vars(&[("name", "Ana"), ("code", "ABC123")]),
        );
        assert_eq!(out, "Hello Ana, your code is ABC123.");
    }

    #[test]
    fn keeps_unknown_placeholders() {
        let out = render("Hello {{ name }}!", &vars(&[]));
        assert_eq!(out, "Hello {{ name }}!");
    }

    #[test]
    fn handles_repeated_variables() {
        let out = render("{{ x }} and {{ x }}", &vars(&[("x", "twice")]));
        assert_eq!(out, "twice and twice");
    }

    #[test]
    fn ignores_malformed_placeholders() {
        let out = render("{ name } {{name", &vars(&[("name", "Ana")]));
        assert_eq!(out, "{ name } {{name");
    }
}

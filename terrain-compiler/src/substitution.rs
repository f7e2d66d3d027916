//! Literal placeholder replacement.
//!
//! Replacements are plain substring swaps applied in insertion order. A
//! placeholder that is not registered is left in the output untouched, and a
//! registered one that never occurs is simply skipped.

use util::RepairType;

/// Wraps a placeholder name in the delimiters used inside templates.
pub fn tag(name: &str) -> String {
    format!("/*{name}*/")
}

pub fn string_literal(text: &str) -> String {
    format!("\"{text}\"")
}

pub fn bool_literal(value: bool) -> &'static str {
    if value {
        "true"
    } else {
        "false"
    }
}

pub fn repair_literal(repair_type: RepairType) -> String {
    format!("UnitClass.{}", repair_type.name())
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Substitutions {
    entries: Vec<(String, String)>,
}

impl Substitutions {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replaces the exact text `needle`.
    pub fn literal(
        &mut self,
        needle: impl Into<String>,
        replacement: impl Into<String>,
    ) -> &mut Self {
        self.entries.push((needle.into(), replacement.into()));
        self
    }

    /// Replaces the delimited placeholder `name`.
    pub fn tag(&mut self, name: &str, replacement: impl Into<String>) -> &mut Self {
        self.literal(tag(name), replacement)
    }

    pub fn needles(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(needle, _)| needle.as_str())
    }

    pub fn apply(&self, template: &str) -> String {
        self.entries
            .iter()
            .fold(template.to_string(), |text, (needle, replacement)| {
                if text.contains(needle.as_str()) {
                    text.replace(needle.as_str(), replacement)
                } else {
                    text
                }
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn literals() {
        assert_eq!(tag("short name"), "/*short name*/");
        assert_eq!(string_literal("Sea Port"), "\"Sea Port\"");
        assert_eq!(bool_literal(true), "true");
        assert_eq!(bool_literal(false), "false");
        assert_eq!(repair_literal(RepairType::Air), "UnitClass.Air");
        assert_eq!(repair_literal(RepairType::None), "UnitClass.None");
    }

    #[test]
    fn replaces_every_occurrence() {
        let mut subs = Substitutions::new();
        subs.tag("defense", "3");
        assert_eq!(subs.apply("/*defense*/ + /*defense*/"), "3 + 3");
    }

    #[test]
    fn unknown_tags_pass_through() {
        let mut subs = Substitutions::new();
        subs.tag("name", string_literal("Wood"));
        assert_eq!(
            subs.apply("get name() { return /*name*/; } /*graphic*/"),
            "get name() { return \"Wood\"; } /*graphic*/"
        );
    }

    #[test]
    fn applies_in_insertion_order() {
        let mut subs = Substitutions::new();
        subs.literal("Template", "Wood").tag("Wood", "x");
        // the first swap produces text the second one then matches
        assert_eq!(subs.apply("/*Template*/"), "x");
        assert_eq!(
            subs.needles().collect::<Vec<_>>(),
            ["Template", "/*Wood*/"]
        );
    }

    #[test]
    fn missing_needle_is_a_no_op() {
        let mut subs = Substitutions::new();
        subs.tag("value", "");
        assert_eq!(subs.apply("class WoodTile {}"), "class WoodTile {}");
    }
}

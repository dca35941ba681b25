//! Inline style declarations: parsing, `!important` handling, serialization.

/// Priority of a single style declaration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Priority {
    #[default]
    Normal,
    Important,
}

/// One `property: value` pair of an inline style.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StyleDeclaration {
    pub property: String,
    pub value: String,
    pub priority: Priority,
}

impl StyleDeclaration {
    pub fn new(property: impl Into<String>, value: impl Into<String>, priority: Priority) -> Self {
        Self {
            property: property.into(),
            value: value.into(),
            priority,
        }
    }
}

const IMPORTANT: &str = "!important";

/// Split a trailing `!important` marker off a style value.
///
/// Matching is case-insensitive and tolerates surrounding whitespace. Values
/// without the marker come back trimmed with [`Priority::Normal`].
pub fn split_important(value: &str) -> (&str, Priority) {
    let trimmed = value.trim_end();
    let len = trimmed.len();
    if len >= IMPORTANT.len() && trimmed.is_char_boundary(len - IMPORTANT.len()) {
        let (head, tail) = trimmed.split_at(len - IMPORTANT.len());
        if tail.eq_ignore_ascii_case(IMPORTANT) {
            return (head.trim(), Priority::Important);
        }
    }
    (value.trim(), Priority::Normal)
}

/// Parse style text (`"color: red; margin: 0 !important"`) into declarations.
///
/// Declarations without a colon or with an empty name are skipped.
pub fn parse_declarations(text: &str) -> Vec<StyleDeclaration> {
    text.split(';')
        .filter_map(|chunk| {
            let (name, value) = chunk.split_once(':')?;
            let name = name.trim();
            if name.is_empty() {
                return None;
            }
            let (value, priority) = split_important(value);
            Some(StyleDeclaration::new(name, value, priority))
        })
        .collect()
}

/// Serialize declarations into the text of a `style` attribute.
pub fn serialize(declarations: &[StyleDeclaration]) -> String {
    declarations
        .iter()
        .map(|d| match d.priority {
            Priority::Normal => format!("{}: {};", d.property, d.value),
            Priority::Important => format!("{}: {} !important;", d.property, d.value),
        })
        .collect::<Vec<_>>()
        .join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn plain_value_is_normal() {
        assert_eq!(split_important(" red "), ("red", Priority::Normal));
    }

    #[test]
    fn important_marker_is_stripped() {
        assert_eq!(split_important("red !important"), ("red", Priority::Important));
        assert_eq!(split_important("red !IMPORTANT  "), ("red", Priority::Important));
        assert_eq!(split_important("red!important"), ("red", Priority::Important));
    }

    #[test]
    fn marker_must_be_trailing() {
        assert_eq!(
            split_important("!important red"),
            ("!important red", Priority::Normal)
        );
    }

    #[test]
    fn multibyte_values_do_not_split_mid_char() {
        assert_eq!(split_important("'⛄⛄⛄⛄'"), ("'⛄⛄⛄⛄'", Priority::Normal));
    }

    #[test]
    fn parse_text() {
        let decls = parse_declarations("color: red; margin : 0 !important;; bogus");
        assert_eq!(
            decls,
            vec![
                StyleDeclaration::new("color", "red", Priority::Normal),
                StyleDeclaration::new("margin", "0", Priority::Important),
            ]
        );
    }

    #[test]
    fn parse_keeps_colons_in_values() {
        let decls = parse_declarations("background: url(http://x/y.png)");
        assert_eq!(decls[0].value, "url(http://x/y.png)");
    }

    #[test]
    fn serialize_round() {
        let decls = vec![
            StyleDeclaration::new("color", "red", Priority::Normal),
            StyleDeclaration::new("margin", "0", Priority::Important),
        ];
        assert_eq!(serialize(&decls), "color: red; margin: 0 !important;");
        assert_eq!(serialize(&[]), "");
    }
}

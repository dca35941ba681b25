//! logos-based selector tokenizer: `tag.class1.class2#id`.
//!
//! A name is any run of characters other than whitespace, `.` and `#`, so
//! non-ASCII names and namespaced tags (`svg:rect`) work unchanged. There is
//! no escaping: a literal `.` or `#` cannot appear inside a class or id.

use logos::Logos;

use crate::dom::{Document, NodeId};
use crate::error::DomError;

/// One token of a selector string.
#[derive(Logos, Debug, Clone, PartialEq)]
#[logos(skip r"[ \t\n\r\f]+")]
pub enum SelectorToken {
    /// `.name`
    #[regex(r"\.[^ \t\n\r\f.#]+", |lex| lex.slice()[1..].to_owned())]
    Class(String),

    /// `#name`
    #[regex(r"#[^ \t\n\r\f.#]+", |lex| lex.slice()[1..].to_owned())]
    Id(String),

    /// A bare name.
    #[regex(r"[^ \t\n\r\f.#]+", |lex| lex.slice().to_owned())]
    Tag(String),
}

/// Tokenize a selector. Stray `.` and `#` characters are dropped.
pub fn tokenize(input: &str) -> Vec<SelectorToken> {
    SelectorToken::lexer(input).filter_map(Result::ok).collect()
}

/// Node-creation instructions parsed from a selector string.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Selector {
    /// Explicit tag. `None` when the first token is a class or id.
    pub tag: Option<String>,
    /// Classes in declared order.
    pub classes: Vec<String>,
    /// Last `#id` token, if any.
    pub id: Option<String>,
    /// Whether any token was recognised at all.
    recognized: bool,
}

impl Selector {
    /// Parse a selector. Only the first token may name the tag; later bare
    /// names are ignored.
    pub fn parse(input: &str) -> Self {
        let mut selector = Selector::default();
        for (i, token) in tokenize(input).into_iter().enumerate() {
            selector.recognized = true;
            match token {
                SelectorToken::Tag(tag) if i == 0 => selector.tag = Some(tag),
                SelectorToken::Tag(_) => {}
                SelectorToken::Class(class) => selector.classes.push(class),
                SelectorToken::Id(id) => selector.id = Some(id),
            }
        }
        selector
    }

    /// True when the input held no recognisable tokens.
    pub fn is_empty(&self) -> bool {
        !self.recognized
    }

    /// Create the node this selector describes, or `None` for an empty
    /// selector.
    pub fn create<D: Document + ?Sized>(
        &self,
        doc: &mut D,
        default_tag: &str,
    ) -> Result<Option<NodeId>, DomError> {
        if self.is_empty() {
            return Ok(None);
        }
        let node = doc.create_element(self.tag.as_deref().unwrap_or(default_tag));
        self.apply(doc, node)?;
        Ok(Some(node))
    }

    /// Merge classes and id into an existing node.
    pub fn apply<D: Document + ?Sized>(&self, doc: &mut D, node: NodeId) -> Result<(), DomError> {
        for class in &self.classes {
            doc.add_class(node, class)?;
        }
        if let Some(id) = &self.id {
            doc.set_attribute(node, "id", id)?;
        }
        Ok(())
    }
}

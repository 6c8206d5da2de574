//! Element Query and Selectors
//!
//! querySelectorAll, getElementsByTagName, closest, matches.
//!
//! Supported grammar: comma-separated lists of compound selectors
//! (`tag`, `*`, `#id`, `.class`, `[attr]`, `[attr=value]`) joined by
//! descendant combinators.

use crate::{DomTree, NodeId};

/// Selector parse error
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SelectorError {
    #[error("empty selector in {selector:?}")]
    Empty { selector: String },

    #[error("unexpected {ch:?} at offset {offset} in {selector:?}")]
    UnexpectedChar {
        selector: String,
        ch: char,
        offset: usize,
    },

    #[error("unterminated attribute selector in {selector:?}")]
    UnterminatedAttribute { selector: String },
}

/// Element query trait
pub trait ElementQuery {
    /// First descendant of `root` matching `selector`
    fn query_selector(&self, root: NodeId, selector: &str) -> Result<Option<NodeId>, SelectorError>;

    /// All descendants of `root` matching `selector`, in document order
    fn query_selector_all(&self, root: NodeId, selector: &str) -> Result<Vec<NodeId>, SelectorError>;

    /// Descendant elements with the given tag name
    fn get_elements_by_tag_name(&self, root: NodeId, tag: &str) -> Vec<NodeId>;

    /// Closest inclusive ancestor matching `selector`
    fn closest(&self, element: NodeId, selector: &str) -> Result<Option<NodeId>, SelectorError>;

    /// Check if element matches selector
    fn matches(&self, element: NodeId, selector: &str) -> Result<bool, SelectorError>;
}

/// Simple selector for matching
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SimpleSelector {
    Universal,
    Tag(String),
    Id(String),
    Class(String),
    Attribute { name: String, value: Option<String> },
}

impl SimpleSelector {
    fn matches(&self, tree: &DomTree, node: NodeId) -> bool {
        match self {
            Self::Universal => tree.element(node).is_some(),
            Self::Tag(tag) => tree.is_element_named(node, tag),
            Self::Id(id) => tree.get_attribute(node, "id") == Some(id.as_str()),
            Self::Class(class) => tree
                .get_attribute(node, "class")
                .is_some_and(|c| c.split_ascii_whitespace().any(|c| c == class)),
            Self::Attribute { name, value: None } => tree.has_attribute(node, name),
            Self::Attribute { name, value: Some(v) } => {
                tree.get_attribute(node, name) == Some(v.as_str())
            }
        }
    }
}

/// Compound selector (`input.big[required]`)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompoundSelector(pub Vec<SimpleSelector>);

impl CompoundSelector {
    fn matches(&self, tree: &DomTree, node: NodeId) -> bool {
        tree.element(node).is_some() && self.0.iter().all(|s| s.matches(tree, node))
    }
}

/// Compound selectors joined by descendant combinators
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ComplexSelector(pub Vec<CompoundSelector>);

impl ComplexSelector {
    fn matches(&self, tree: &DomTree, node: NodeId) -> bool {
        let Some((last, rest)) = self.0.split_last() else {
            return false;
        };
        if !last.matches(tree, node) {
            return false;
        }

        let mut ancestors = tree.ancestors(node);
        rest.iter()
            .rev()
            .all(|compound| ancestors.any(|a| compound.matches(tree, a)))
    }
}

/// Parsed comma-separated selector list
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectorList(pub Vec<ComplexSelector>);

impl SelectorList {
    /// Parse a selector list
    pub fn parse(selector: &str) -> Result<Self, SelectorError> {
        Parser::new(selector).parse_list()
    }

    /// Check an element against any selector in the list
    pub fn matches(&self, tree: &DomTree, node: NodeId) -> bool {
        self.0.iter().any(|s| s.matches(tree, node))
    }

    /// All matching descendants of `root` in document order
    pub fn select_all(&self, tree: &DomTree, root: NodeId) -> Vec<NodeId> {
        tree.descendants(root)
            .filter(|&id| self.matches(tree, id))
            .collect()
    }
}

struct Parser<'a> {
    source: &'a str,
    chars: Vec<char>,
    pos: usize,
}

impl<'a> Parser<'a> {
    fn new(source: &'a str) -> Self {
        Self {
            source,
            chars: source.chars().collect(),
            pos: 0,
        }
    }

    fn peek(&self) -> Option<char> {
        self.chars.get(self.pos).copied()
    }

    fn skip_whitespace(&mut self) -> bool {
        let start = self.pos;
        while self.peek().is_some_and(char::is_whitespace) {
            self.pos += 1;
        }
        self.pos > start
    }

    fn empty(&self) -> SelectorError {
        SelectorError::Empty {
            selector: self.source.to_string(),
        }
    }

    fn unexpected(&self, ch: char) -> SelectorError {
        SelectorError::UnexpectedChar {
            selector: self.source.to_string(),
            ch,
            offset: self.pos,
        }
    }

    fn unterminated(&self) -> SelectorError {
        SelectorError::UnterminatedAttribute {
            selector: self.source.to_string(),
        }
    }

    fn parse_list(&mut self) -> Result<SelectorList, SelectorError> {
        let mut list = Vec::new();
        loop {
            list.push(self.parse_complex()?);
            match self.peek() {
                None => break,
                Some(',') => self.pos += 1,
                Some(ch) => return Err(self.unexpected(ch)),
            }
        }
        Ok(SelectorList(list))
    }

    fn parse_complex(&mut self) -> Result<ComplexSelector, SelectorError> {
        self.skip_whitespace();
        let mut compounds = Vec::new();
        loop {
            match self.peek() {
                None | Some(',') => break,
                _ => compounds.push(self.parse_compound()?),
            }
            let had_space = self.skip_whitespace();
            match self.peek() {
                None | Some(',') => break,
                Some(ch) if !had_space => return Err(self.unexpected(ch)),
                _ => {}
            }
        }
        if compounds.is_empty() {
            return Err(self.empty());
        }
        Ok(ComplexSelector(compounds))
    }

    fn parse_compound(&mut self) -> Result<CompoundSelector, SelectorError> {
        let mut parts = Vec::new();

        match self.peek() {
            Some('*') => {
                self.pos += 1;
                parts.push(SimpleSelector::Universal);
            }
            Some(ch) if is_ident_char(ch) => {
                parts.push(SimpleSelector::Tag(self.ident().to_ascii_lowercase()));
            }
            _ => {}
        }

        while let Some(ch) = self.peek() {
            match ch {
                '#' => {
                    self.pos += 1;
                    parts.push(SimpleSelector::Id(self.required_ident()?));
                }
                '.' => {
                    self.pos += 1;
                    parts.push(SimpleSelector::Class(self.required_ident()?));
                }
                '[' => {
                    self.pos += 1;
                    parts.push(self.attribute()?);
                }
                _ => break,
            }
        }

        match (parts.is_empty(), self.peek()) {
            (true, Some(ch)) => Err(self.unexpected(ch)),
            (true, None) => Err(self.empty()),
            _ => Ok(CompoundSelector(parts)),
        }
    }

    fn ident(&mut self) -> String {
        let start = self.pos;
        while self.peek().is_some_and(is_ident_char) {
            self.pos += 1;
        }
        self.chars[start..self.pos].iter().collect()
    }

    fn required_ident(&mut self) -> Result<String, SelectorError> {
        let ident = self.ident();
        if ident.is_empty() {
            return Err(match self.peek() {
                Some(ch) => self.unexpected(ch),
                None => self.empty(),
            });
        }
        Ok(ident)
    }

    fn attribute(&mut self) -> Result<SimpleSelector, SelectorError> {
        self.skip_whitespace();
        let name = self.required_ident()?.to_ascii_lowercase();
        self.skip_whitespace();

        let value = match self.peek() {
            Some(']') => None,
            Some('=') => {
                self.pos += 1;
                self.skip_whitespace();
                let value = match self.peek() {
                    Some(quote @ ('"' | '\'')) => {
                        self.pos += 1;
                        let start = self.pos;
                        while self.peek().is_some_and(|c| c != quote) {
                            self.pos += 1;
                        }
                        if self.peek().is_none() {
                            return Err(self.unterminated());
                        }
                        let value: String = self.chars[start..self.pos].iter().collect();
                        self.pos += 1;
                        value
                    }
                    _ => self.required_ident()?,
                };
                self.skip_whitespace();
                Some(value)
            }
            Some(ch) => return Err(self.unexpected(ch)),
            None => return Err(self.unterminated()),
        };

        match self.peek() {
            Some(']') => {
                self.pos += 1;
                Ok(SimpleSelector::Attribute { name, value })
            }
            Some(ch) => Err(self.unexpected(ch)),
            None => Err(self.unterminated()),
        }
    }
}

fn is_ident_char(ch: char) -> bool {
    ch.is_alphanumeric() || ch == '-' || ch == '_'
}

impl ElementQuery for DomTree {
    fn query_selector(&self, root: NodeId, selector: &str) -> Result<Option<NodeId>, SelectorError> {
        let list = SelectorList::parse(selector)?;
        Ok(self.descendants(root).find(|&id| list.matches(self, id)))
    }

    fn query_selector_all(&self, root: NodeId, selector: &str) -> Result<Vec<NodeId>, SelectorError> {
        Ok(SelectorList::parse(selector)?.select_all(self, root))
    }

    fn get_elements_by_tag_name(&self, root: NodeId, tag: &str) -> Vec<NodeId> {
        self.descendants(root)
            .filter(|&id| (tag == "*" && self.element(id).is_some()) || self.is_element_named(id, tag))
            .collect()
    }

    fn closest(&self, element: NodeId, selector: &str) -> Result<Option<NodeId>, SelectorError> {
        let list = SelectorList::parse(selector)?;
        Ok(std::iter::once(element)
            .chain(self.ancestors(element))
            .find(|&id| list.matches(self, id)))
    }

    fn matches(&self, element: NodeId, selector: &str) -> Result<bool, SelectorError> {
        Ok(SelectorList::parse(selector)?.matches(self, element))
    }
}

//! Path lookups on parsed XML trees
//!
//! Paths are element names separated by `/`, always resolved relative to the node they
//! are applied to (so `name/id` means "the `id` child of the `name` child"). Lookups
//! distinguish between an element that isn't there at all and one that is there but
//! carries no text, because required and optional fields treat those cases differently.

use log::debug;
use roxmltree::{Document, Node, ParsingOptions};
use std::{borrow::Cow, fmt, str::FromStr};

/// Parse an XML document, ignoring a leading byte order mark
///
/// Document type declarations are accepted.
pub fn parse_document(xml: &str) -> Result<Document<'_>, roxmltree::Error> {
    let options = ParsingOptions {
        allow_dtd: true,
        ..ParsingOptions::default()
    };

    Document::parse_with_options(xml.strip_prefix('\u{feff}').unwrap_or(xml), options)
}

/// The first element reached by following `path` down from `node`
///
/// This is the first element [`find_all()`] would return, so a later sibling is searched
/// when an earlier one with the same name doesn't lead anywhere.
pub fn find<'a, 'input>(node: Node<'a, 'input>, path: &str) -> Option<Node<'a, 'input>> {
    find_all(node, path).into_iter().next()
}

/// Every element reached by following `path` down from `node`, in document order
pub fn find_all<'a, 'input>(node: Node<'a, 'input>, path: &str) -> Vec<Node<'a, 'input>> {
    segments(path).fold(vec![node], |parents, name| {
        parents
            .into_iter()
            .flat_map(|parent| parent.children().filter(move |c| is_named(c, name)))
            .collect()
    })
}

/// Resolve `path` to the text of the element it points at
pub fn text_at<'a>(node: Node<'a, '_>, path: &str) -> Text<'a> {
    match find(node, path) {
        Some(element) => Text::of(element),
        None => Text::Absent,
    }
}

/// Is `node` an element with the given (local) tag name?
pub fn is_named(node: &Node, name: &str) -> bool {
    node.is_element() && node.tag_name().name() == name
}

fn segments(path: &str) -> impl Iterator<Item = &str> {
    path.split('/').filter(|segment| !segment.is_empty())
}

/// The text found at the end of a path lookup
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Text<'a> {
    /// No element exists at the path
    Absent,

    /// The element exists, but has no text (or only whitespace)
    Empty,

    /// The element's text, with surrounding whitespace trimmed
    Present(Cow<'a, str>),
}

impl<'a> Text<'a> {
    /// The text content of a single element
    ///
    /// That is the text before its first child element. Comments and processing
    /// instructions in between are skipped, and the pieces around them joined.
    pub fn of(element: Node<'a, '_>) -> Self {
        let mut pieces = element
            .children()
            .take_while(|child| !child.is_element())
            .filter(|child| child.is_text())
            .filter_map(|child| child.text());

        let text = match (pieces.next(), pieces.next()) {
            (None, _) => return Self::Empty,
            (Some(only), None) => Cow::Borrowed(only.trim()),
            (Some(first), Some(second)) => {
                let joined: String = [first, second].into_iter().chain(pieces).collect();
                Cow::Owned(joined.trim().to_owned())
            }
        };

        if text.is_empty() {
            Self::Empty
        } else {
            Self::Present(text)
        }
    }

    /// The trimmed text, or which part of it was missing
    pub fn required(self) -> Result<Cow<'a, str>, Missing> {
        match self {
            Self::Present(text) => Ok(text),
            Self::Empty => Err(Missing::Text),
            Self::Absent => Err(Missing::Element),
        }
    }

    /// Parse the text, falling back to `default` when there is nothing usable
    ///
    /// The returned [`Fallback`] records whether the default was taken and why, so callers
    /// can report it. This never fails.
    pub fn parse_or<T>(self, default: T) -> Fallback<T>
    where
        T: FromStr,
    {
        let reason = match self {
            Self::Present(text) => match text.parse() {
                Ok(value) => return Fallback::Parsed(value),
                Err(_) => DefaultReason::Unparsable,
            },
            Self::Empty => DefaultReason::Empty,
            Self::Absent => DefaultReason::Absent,
        };

        debug!("Falling back to a default value: {reason}");
        Fallback::Defaulted {
            value: default,
            reason,
        }
    }
}

/// Which part of a required lookup was missing
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Missing {
    /// The element itself wasn't found
    Element,

    /// The element was found, but it had no text
    Text,
}

/// The outcome of [`Text::parse_or()`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Fallback<T> {
    /// The text was present and parsed successfully
    Parsed(T),

    /// The default value was used instead
    Defaulted { value: T, reason: DefaultReason },
}

impl<T> Fallback<T> {
    /// The parsed or default value
    pub fn into_inner(self) -> T {
        match self {
            Self::Parsed(value) | Self::Defaulted { value, .. } => value,
        }
    }
}

/// Why [`Text::parse_or()`] fell back to its default
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DefaultReason {
    Absent,
    Empty,
    Unparsable,
}

impl fmt::Display for DefaultReason {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Self::Absent => write!(f, "the element is absent"),
            Self::Empty => write!(f, "the element has no text"),
            Self::Unparsable => write!(f, "the text could not be parsed"),
        }
    }
}

//! XML loading.
//!
//! A feed is read completely into a small element tree. Element names are
//! resolved against their namespace URI so lookups never depend on the
//! prefix a feed happens to use.

use std::path::Path;

use quick_xml::events::{BytesStart, Event};
use quick_xml::name::ResolveResult;
use quick_xml::NsReader;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum FeedError {
    #[error("failed to read {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("invalid XML: {0}")]
    Xml(#[from] quick_xml::Error),
    #[error("unbound namespace prefix `{0}`")]
    UnboundPrefix(String),
    #[error("element <{0}> is never closed")]
    Unclosed(String),
    #[error("closing tag without a matching opening tag")]
    UnexpectedEnd,
    #[error("document has no root element")]
    NoRoot,
    #[error("content outside the root element")]
    ContentOutsideRoot,
    #[error("root element has no <channel>")]
    MissingChannel,
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct Element {
    /// Resolved namespace URI, `None` for un-namespaced elements
    pub namespace: Option<String>,
    /// Local name without prefix
    pub name: String,
    pub attributes: Vec<(String, String)>,
    /// Character data preceding the first child element
    pub text: String,
    pub children: Vec<Element>,
}

impl Element {
    fn from_start(namespace: Option<String>, start: &BytesStart<'_>) -> Result<Self, FeedError> {
        let name = String::from_utf8_lossy(start.local_name().as_ref()).into_owned();

        let mut attributes = Vec::new();
        for attr in start.attributes() {
            let attr = attr.map_err(quick_xml::Error::from)?;
            let key = String::from_utf8_lossy(attr.key.as_ref()).into_owned();
            let value = attr.unescape_value()?.into_owned();
            attributes.push((key, value));
        }

        Ok(Self {
            namespace,
            name,
            attributes,
            ..Default::default()
        })
    }

    /// First un-namespaced direct child called `name`.
    pub fn child(&self, name: &str) -> Option<&Element> {
        self.children
            .iter()
            .find(|child| child.namespace.is_none() && child.name == name)
    }

    /// All un-namespaced direct children called `name`, in document order.
    pub fn children_named<'a>(&'a self, name: &'a str) -> impl Iterator<Item = &'a Element> + 'a {
        self.children
            .iter()
            .filter(move |child| child.namespace.is_none() && child.name == name)
    }

    /// First direct child with the given namespace URI and local name.
    pub fn child_ns(&self, namespace: &str, name: &str) -> Option<&Element> {
        self.children
            .iter()
            .find(|child| child.namespace.as_deref() == Some(namespace) && child.name == name)
    }

    pub fn attribute(&self, key: &str) -> Option<&str> {
        self.attributes
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Document {
    root: Element,
}

impl Document {
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self, FeedError> {
        let path = path.as_ref();
        let xml = std::fs::read_to_string(path).map_err(|source| FeedError::Io {
            path: path.display().to_string(),
            source,
        })?;
        Self::parse(&xml)
    }

    pub fn parse(xml: &str) -> Result<Self, FeedError> {
        let mut reader = NsReader::from_str(xml);
        reader.config_mut().expand_empty_elements = true;

        let mut stack: Vec<Element> = Vec::new();
        let mut root: Option<Element> = None;

        loop {
            let (resolved, event) = reader.read_resolved_event()?;
            match event {
                Event::Start(start) => {
                    if root.is_some() {
                        return Err(FeedError::ContentOutsideRoot);
                    }
                    let element = Element::from_start(namespace_of(resolved)?, &start)?;
                    stack.push(element);
                }
                Event::End(_) => {
                    let element = stack.pop().ok_or(FeedError::UnexpectedEnd)?;
                    match stack.last_mut() {
                        Some(parent) => parent.children.push(element),
                        None => root = Some(element),
                    }
                }
                Event::Text(text) => append_text(&mut stack, &text.unescape()?)?,
                Event::CData(data) => append_text(&mut stack, &String::from_utf8_lossy(&data))?,
                Event::Eof => break,
                _ => {}
            }
        }

        if let Some(open) = stack.last() {
            return Err(FeedError::Unclosed(open.name.clone()));
        }

        root.map(|root| Document { root }).ok_or(FeedError::NoRoot)
    }

    pub fn root(&self) -> &Element {
        &self.root
    }

    pub fn channel(&self) -> Result<&Element, FeedError> {
        self.root.child("channel").ok_or(FeedError::MissingChannel)
    }
}

fn namespace_of(resolved: ResolveResult<'_>) -> Result<Option<String>, FeedError> {
    match resolved {
        ResolveResult::Bound(ns) => Ok(Some(String::from_utf8_lossy(ns.as_ref()).into_owned())),
        ResolveResult::Unbound => Ok(None),
        ResolveResult::Unknown(prefix) => Err(FeedError::UnboundPrefix(
            String::from_utf8_lossy(&prefix).into_owned(),
        )),
    }
}

fn append_text(stack: &mut [Element], text: &str) -> Result<(), FeedError> {
    match stack.last_mut() {
        Some(element) if element.children.is_empty() => element.text.push_str(text),
        Some(_) => {}
        None if text.trim().is_empty() => {}
        None => return Err(FeedError::ContentOutsideRoot),
    }
    Ok(())
}

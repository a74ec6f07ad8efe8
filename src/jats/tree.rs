//! In-memory element tree built from [quick_xml] events.
//!
//! The tree only keeps what extraction needs: element names, attributes, and text.
//! Comments, processing instructions and doctypes are dropped.
use std::borrow::Cow;

use log::debug;
use quick_xml::events::{BytesStart, BytesText, Event};
use quick_xml::Reader;

/// A node of the tree.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Node {
    Element(Element),
    Text(String),
}

/// An XML element.
///
/// Names are kept qualified (`mml:math` stays `mml:math`): namespaces are not resolved,
/// which means undeclared prefixes are not an error.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Element {
    name: String,
    attributes: Vec<(String, String)>,
    children: Vec<Node>,
}

impl Element {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            attributes: Vec::new(),
            children: Vec::new(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn attribute(&self, key: &str) -> Option<&str> {
        self.attributes
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    pub fn children(&self) -> &[Node] {
        &self.children
    }

    /// Iterate over child elements, skipping text nodes.
    pub fn child_elements(&self) -> impl Iterator<Item = &Element> {
        self.children.iter().filter_map(|node| match node {
            Node::Element(e) => Some(e),
            Node::Text(_) => None,
        })
    }

    /// Text located before the first child element.
    ///
    /// Returns [None] if there is no such text.
    pub fn text(&self) -> Option<String> {
        let mut text = String::new();
        for node in &self.children {
            match node {
                Node::Text(t) => text.push_str(t),
                Node::Element(_) => break,
            }
        }
        if text.is_empty() {
            None
        } else {
            Some(text)
        }
    }

    /// Concatenation of every descendant text node, markup ignored.
    pub fn itertext(&self) -> String {
        let mut text = String::new();
        self.collect_text(&mut text);
        text
    }

    fn collect_text(&self, buf: &mut String) {
        for node in &self.children {
            match node {
                Node::Text(t) => buf.push_str(t),
                Node::Element(e) => e.collect_text(buf),
            }
        }
    }

    fn push_text(&mut self, text: Cow<'_, str>) {
        if text.is_empty() {
            return;
        }
        // merge adjacent text so that entities/cdata do not split words
        if let Some(Node::Text(last)) = self.children.last_mut() {
            last.push_str(&text);
        } else {
            self.children.push(Node::Text(text.into_owned()));
        }
    }
}

/// How the builder reacts to malformed input.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Mode {
    /// Any irregularity is an error.
    Strict,
    /// Best effort: keep what can be kept, drop the rest.
    Recover,
}

/// Builds a tree out of an XML string.
pub(crate) struct TreeBuilder {
    mode: Mode,
    stack: Vec<Element>,
    root: Option<Element>,
    seen_event: bool,
}

impl TreeBuilder {
    pub(crate) fn new(mode: Mode) -> Self {
        Self {
            mode,
            stack: Vec::new(),
            root: None,
            seen_event: false,
        }
    }

    pub(crate) fn build(mut self, xml: &str) -> Result<Element, String> {
        let mut reader = Reader::from_str(xml);
        if self.mode == Mode::Recover {
            let config = reader.config_mut();
            config.check_end_names = false;
            config.allow_unmatched_ends = true;
        }

        loop {
            let event = match reader.read_event() {
                Ok(event) => event,
                Err(e) => match self.mode {
                    Mode::Strict => return Err(format!("{}", e)),
                    Mode::Recover => {
                        debug!(
                            "discarding input after position {}: {}",
                            reader.buffer_position(),
                            e
                        );
                        break;
                    }
                },
            };

            match event {
                Event::Decl(decl) => {
                    if self.seen_event {
                        self.irregular("misplaced xml declaration")?;
                    } else if let Some(Ok(encoding)) = decl.encoding() {
                        // the input is already decoded, any other declared encoding is a lie
                        if !encoding.eq_ignore_ascii_case(b"utf-8")
                            && !encoding.eq_ignore_ascii_case(b"utf8")
                        {
                            self.irregular(&format!(
                                "incompatible encoding declaration: {}",
                                String::from_utf8_lossy(&encoding)
                            ))?;
                        }
                    }
                }
                Event::Start(start) => {
                    let element = self.open(&start)?;
                    self.stack.push(element);
                }
                Event::Empty(start) => {
                    let element = self.open(&start)?;
                    self.close(element)?;
                }
                Event::End(end) => {
                    let name = String::from_utf8_lossy(end.name().as_ref()).into_owned();
                    self.end(&name)?;
                }
                Event::Text(text) => {
                    let text = self.unescape(&text)?;
                    self.text(text)?;
                }
                Event::CData(cdata) => {
                    let text = String::from_utf8_lossy(&cdata).into_owned();
                    self.text(Cow::Owned(text))?;
                }
                Event::Eof => break,
                _ => (),
            }
            self.seen_event = true;
        }

        if !self.stack.is_empty() {
            self.irregular("unclosed elements at end of document")?;
            while let Some(element) = self.stack.pop() {
                self.close(element)?;
            }
        }

        self.root.ok_or_else(|| String::from("no root element"))
    }

    /// Fails in strict mode, logs in recover mode.
    fn irregular(&self, reason: &str) -> Result<(), String> {
        match self.mode {
            Mode::Strict => Err(reason.to_string()),
            Mode::Recover => {
                debug!("recovering from: {}", reason);
                Ok(())
            }
        }
    }

    fn open(&self, start: &BytesStart) -> Result<Element, String> {
        let mut element = Element::new(String::from_utf8_lossy(start.name().as_ref()));
        for attribute in start.attributes() {
            let attribute = match attribute {
                Ok(a) => a,
                Err(e) => {
                    self.irregular(&format!("bad attribute: {}", e))?;
                    continue;
                }
            };
            let key = String::from_utf8_lossy(attribute.key.as_ref()).into_owned();
            let value = match attribute.unescape_value() {
                Ok(v) => v.into_owned(),
                Err(e) => {
                    self.irregular(&format!("bad attribute value: {}", e))?;
                    String::from_utf8_lossy(&attribute.value).into_owned()
                }
            };
            element.attributes.push((key, value));
        }
        Ok(element)
    }

    /// Attach a finished element to its parent, or make it the root.
    fn close(&mut self, element: Element) -> Result<(), String> {
        if let Some(parent) = self.stack.last_mut() {
            parent.children.push(Node::Element(element));
        } else if self.root.is_none() {
            self.root = Some(element);
        } else {
            self.irregular("more than one root element")?;
        }
        Ok(())
    }

    fn end(&mut self, name: &str) -> Result<(), String> {
        match self.mode {
            Mode::Strict => match self.stack.pop() {
                Some(element) if element.name == name => self.close(element),
                Some(element) => Err(format!(
                    "expected </{}>, found </{}>",
                    element.name, name
                )),
                None => Err(format!("unmatched </{}>", name)),
            },
            Mode::Recover => {
                // close up to the matching element, ignore the tag if nothing matches
                if let Some(pos) = self.stack.iter().rposition(|e| e.name == name) {
                    while self.stack.len() > pos {
                        if let Some(element) = self.stack.pop() {
                            self.close(element)?;
                        }
                    }
                } else {
                    debug!("ignoring unmatched </{}>", name);
                }
                Ok(())
            }
        }
    }

    fn unescape<'a>(&self, text: &'a BytesText<'a>) -> Result<Cow<'a, str>, String> {
        match text.unescape() {
            Ok(t) => Ok(t),
            Err(e) => {
                self.irregular(&format!("bad text: {}", e))?;
                Ok(String::from_utf8_lossy(text))
            }
        }
    }

    fn text(&mut self, text: Cow<'_, str>) -> Result<(), String> {
        if let Some(parent) = self.stack.last_mut() {
            parent.push_text(text);
        } else if !text.trim().is_empty() {
            self.irregular("text outside of the root element")?;
        }
        Ok(())
    }
}

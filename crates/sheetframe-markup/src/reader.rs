//! Markup parsing on top of [`quick_xml::Reader`].

use std::str;

use quick_xml::{
    Reader,
    events::{BytesStart, Event},
};

use crate::{
    element::{Element, Node},
    error::MarkupError,
};

/// Parses `markup` into a list of top-level nodes.
///
/// Whitespace-only text is dropped; it carries no meaning in drawing parts
/// and would otherwise be duplicated by indented serialization.
pub(crate) fn parse_nodes(markup: &str) -> Result<Vec<Node>, MarkupError> {
    let mut reader = Reader::from_str(markup);
    reader.config_mut().trim_text(false);

    let mut stack: Vec<(Element, u64)> = Vec::new();
    let mut roots: Vec<Node> = Vec::new();

    loop {
        let offset = reader.buffer_position() as u64;
        let event = reader.read_event().map_err(|source| MarkupError::Syntax {
            offset: reader.buffer_position() as u64,
            source,
        })?;

        match event {
            Event::Start(start) => {
                let element = element_from_start(&start, offset)?;
                stack.push((element, offset));
            }
            Event::Empty(start) => {
                let element = element_from_start(&start, offset)?;
                attach(&mut stack, &mut roots, Node::Element(element));
            }
            Event::End(_) => {
                let (element, _) = stack.pop().ok_or(MarkupError::UnexpectedEnd { offset })?;
                attach(&mut stack, &mut roots, Node::Element(element));
            }
            Event::Text(text) => {
                let text = text
                    .unescape()
                    .map_err(|source| MarkupError::Syntax { offset, source })?;
                if !text.trim().is_empty() {
                    attach(&mut stack, &mut roots, Node::Text(text.into_owned()));
                }
            }
            Event::CData(data) => {
                let text = str::from_utf8(&data)?;
                attach(&mut stack, &mut roots, Node::Text(text.to_string()));
            }
            Event::Eof => break,
            // Declarations, comments, processing instructions and doctypes
            _ => {}
        }
    }

    if let Some((element, offset)) = stack.pop() {
        return Err(MarkupError::Unclosed {
            name: element.name().to_string(),
            offset,
        });
    }

    Ok(roots)
}

fn element_from_start(start: &BytesStart<'_>, offset: u64) -> Result<Element, MarkupError> {
    let qname = start.name();
    let name = str::from_utf8(qname.as_ref())?;
    let mut element = Element::new(name);

    for attr in start.attributes() {
        let attr = attr.map_err(|source| MarkupError::Attribute { offset, source })?;
        let key = str::from_utf8(attr.key.as_ref())?;
        let value = attr
            .unescape_value()
            .map_err(|source| MarkupError::Syntax { offset, source })?;
        element.set_attr(key, value.into_owned());
    }

    Ok(element)
}

fn attach(stack: &mut [(Element, u64)], roots: &mut Vec<Node>, node: Node) {
    match stack.last_mut() {
        Some((parent, _)) => parent.push_node(node),
        None => roots.push(node),
    }
}

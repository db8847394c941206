//! Serialization on top of [`quick_xml::Writer`].

use std::io;

use quick_xml::{
    Writer,
    events::{BytesDecl, BytesEnd, BytesStart, BytesText, Event},
};

use crate::{
    element::{Element, Node},
    error::MarkupError,
};

/// Options controlling document serialization.
///
/// The default writes a bare element: no XML declaration, no indentation.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct WriteOptions {
    /// Emit `<?xml version="1.0" encoding="UTF-8" standalone="yes"?>` first.
    pub declaration: bool,

    /// Indent nested elements by this many spaces.
    pub indent: Option<usize>,
}

impl WriteOptions {
    /// Options for a standalone package part: declaration, no indentation.
    pub fn part() -> Self {
        Self {
            declaration: true,
            indent: None,
        }
    }
}

pub(crate) fn to_string(element: &Element, options: &WriteOptions) -> Result<String, MarkupError> {
    let mut writer = match options.indent {
        Some(width) => Writer::new_with_indent(Vec::new(), b' ', width),
        None => Writer::new(Vec::new()),
    };

    if options.declaration {
        writer.write_event(Event::Decl(BytesDecl::new("1.0", Some("UTF-8"), Some("yes"))))?;
        if options.indent.is_none() {
            io::Write::write_all(writer.get_mut(), b"\r\n")?;
        }
    }

    write_element(&mut writer, element)?;

    String::from_utf8(writer.into_inner()).map_err(|err| MarkupError::Utf8(err.utf8_error()))
}

pub(crate) fn write_element<W: io::Write>(
    writer: &mut Writer<W>,
    element: &Element,
) -> Result<(), MarkupError> {
    let name = element.name().to_string();
    let mut start = BytesStart::new(name.as_str());
    for (key, value) in element.attributes() {
        let key = key.to_string();
        start.push_attribute((key.as_str(), value));
    }

    if element.children().is_empty() {
        writer.write_event(Event::Empty(start))?;
        return Ok(());
    }

    writer.write_event(Event::Start(start))?;
    for child in element.children() {
        match child {
            Node::Element(child) => write_element(writer, child)?,
            Node::Text(text) => writer.write_event(Event::Text(BytesText::new(text)))?,
        }
    }
    writer.write_event(Event::End(BytesEnd::new(name.as_str())))?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_childless_element_is_self_closing() {
        let element = Element::new("xdr:clientData");

        assert_eq!(element.to_xml().unwrap(), "<xdr:clientData/>");
    }

    #[test]
    fn test_attribute_values_are_escaped() {
        let element = Element::new("xdr:cNvPr")
            .with_attr("id", "1")
            .with_attr("name", "A & \"B\" <C>");

        assert_eq!(
            element.to_xml().unwrap(),
            r#"<xdr:cNvPr id="1" name="A &amp; &quot;B&quot; &lt;C&gt;"/>"#
        );
    }

    #[test]
    fn test_nested_output() {
        let mut xfrm = Element::new("xdr:xfrm");
        xfrm.add_child("a:off").set_attr("x", "0");
        xfrm.add_child("a:ext").set_attr("cx", "0");

        assert_eq!(
            xfrm.to_xml().unwrap(),
            r#"<xdr:xfrm><a:off x="0"/><a:ext cx="0"/></xdr:xfrm>"#
        );
    }

    #[test]
    fn test_part_options_emit_declaration() {
        let xml = Element::new("root").to_xml_with(&WriteOptions::part()).unwrap();

        assert_eq!(
            xml,
            "<?xml version=\"1.0\" encoding=\"UTF-8\" standalone=\"yes\"?>\r\n<root/>"
        );
    }

    #[test]
    fn test_indented_output_parses_back() {
        let mut root = Element::new("root");
        root.add_child("a").add_child("b");
        let options = WriteOptions {
            declaration: true,
            indent: Some(2),
        };

        let xml = root.to_xml_with(&options).unwrap();

        assert!(xml.contains('\n'));
        assert_eq!(Element::parse(&xml).unwrap(), root);
    }
}

//! Extract the string entries of a favorites archive's XML plist.

use roxmltree::{Document, Node, ParsingOptions};

use super::DecodeError;

/// Text of every `string` element directly inside an `array` that is
/// directly inside the top-level `dict` (`/plist/dict/array/string`), in
/// document order.
pub fn string_nodes(xml: &[u8]) -> Result<Vec<String>, DecodeError> {
    let text = std::str::from_utf8(xml)?;
    // Property lists carry a DOCTYPE; it is only declared, never resolved.
    let mut opts = ParsingOptions::default();
    opts.allow_dtd = true;
    let doc = Document::parse_with_options(text, opts)?;

    let root = doc.root_element();
    if !root.has_tag_name("plist") {
        return Err(DecodeError::NotPlist(root.tag_name().name().to_string()));
    }

    let out = children_named(root, "dict")
        .flat_map(|dict| children_named(dict, "array"))
        .flat_map(|array| children_named(array, "string"))
        .map(inner_text)
        .collect();
    Ok(out)
}

fn children_named<'a, 'input: 'a>(
    node: Node<'a, 'input>,
    name: &'static str,
) -> impl Iterator<Item = Node<'a, 'input>> {
    node.children()
        .filter(move |n| n.is_element() && n.has_tag_name(name))
}

fn inner_text(node: Node<'_, '_>) -> String {
    node.descendants()
        .filter(|n| n.is_text())
        .filter_map(|n| n.text())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<!DOCTYPE plist PUBLIC "-//Apple//DTD PLIST 1.0//EN" "http://www.apple.com/DTDs/PropertyList-1.0.dtd">
<plist version="1.0">
<dict>
	<key>$archiver</key>
	<string>NSKeyedArchiver</string>
	<key>$objects</key>
	<array>
		<string>$null</string>
		<dict>
			<key>inner</key>
			<string>ignored</string>
		</dict>
		<string>deadbeef</string>
		<string>http://x/1?a=1&amp;b=2</string>
		<integer>7</integer>
		<string></string>
	</array>
	<key>$top</key>
	<array>
		<string>cafefeed</string>
	</array>
</dict>
</plist>
"#;

    #[test]
    fn extracts_array_strings_in_order() {
        let nodes = string_nodes(SAMPLE.as_bytes()).unwrap();
        assert_eq!(
            nodes,
            ["$null", "deadbeef", "http://x/1?a=1&b=2", "", "cafefeed"]
        );
    }

    #[test]
    fn non_plist_root_is_rejected() {
        let err = string_nodes(b"<html><body/></html>").unwrap_err();
        assert!(matches!(err, DecodeError::NotPlist(ref n) if n == "html"));
    }

    #[test]
    fn malformed_xml_is_rejected() {
        assert!(matches!(
            string_nodes(b"<plist><dict>").unwrap_err(),
            DecodeError::Xml(_)
        ));
        assert!(matches!(
            string_nodes(b"\xff\xfe<plist/>").unwrap_err(),
            DecodeError::Utf8(_)
        ));
    }

    #[test]
    fn empty_plist_has_no_nodes() {
        assert!(string_nodes(b"<plist version=\"1.0\"><dict/></plist>")
            .unwrap()
            .is_empty());
    }
}

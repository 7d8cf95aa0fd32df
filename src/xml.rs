//! Tag-name helpers over [`xmltree::Element`] trees. Lookups only ever look
//! at direct children: a `<name>` nested inside `<projects>` never satisfies a
//! lookup for the top-level `<name>`.

use xmltree::{Element, XMLNode};

/// Iterates over the direct children of `parent` whose local name is `name`,
/// in document order.
pub fn children<'a>(
    parent: &'a Element,
    name: &'a str,
) -> impl Iterator<Item = &'a Element> + 'a {
    parent.children.iter().filter_map(move |node| match node {
        XMLNode::Element(element) if element.name == name => Some(element),
        _ => None,
    })
}

/// Returns the first direct child of `parent` named `name`, if any.
pub fn child<'a>(parent: &'a Element, name: &'a str) -> Option<&'a Element> {
    children(parent, name).next()
}

/// Returns the concatenated text of `element` and all of its descendants,
/// untrimmed (the DOM's `textContent`).
pub fn text_content(element: &Element) -> String {
    fn collect(element: &Element, out: &mut String) {
        for node in &element.children {
            match node {
                XMLNode::Text(text) | XMLNode::CData(text) => out.push_str(text),
                XMLNode::Element(inner) => collect(inner, out),
                _ => {}
            }
        }
    }

    let mut out = String::new();
    collect(element, &mut out);
    out
}

/// Returns the trimmed text content of the first child named `name`, or an
/// empty string when there is no such child.
pub fn text(parent: &Element, name: &str) -> String {
    match child(parent, name) {
        Some(element) => text_content(element).trim().to_owned(),
        None => String::new(),
    }
}

/// Like [`text`], but blank values come back as `None`.
pub fn optional_text(parent: &Element, name: &str) -> Option<String> {
    Some(text(parent, name)).filter(|value| !value.is_empty())
}

/// Collects the trimmed text of every `item` child of the first `container`
/// child of `parent`. Blank items are dropped; a missing container yields an
/// empty list.
pub fn list(parent: &Element, container: &str, item: &str) -> Vec<String> {
    match child(parent, container) {
        Some(container) => items(container, item),
        None => Vec::new(),
    }
}

/// Collects the trimmed, non-blank text of every `item` child of `parent`.
pub fn items(parent: &Element, item: &str) -> Vec<String> {
    children(parent, item)
        .map(|element| text_content(element).trim().to_owned())
        .filter(|value| !value.is_empty())
        .collect()
}

/// Depth-first search for the first element named `name`, starting with
/// `root` itself.
pub fn find<'a>(root: &'a Element, name: &str) -> Option<&'a Element> {
    if root.name == name {
        return Some(root);
    }
    root.children.iter().find_map(|node| match node {
        XMLNode::Element(element) => find(element, name),
        _ => None,
    })
}

#[cfg(test)]
mod test {
    use super::*;

    fn parse(input: &str) -> Element {
        Element::parse(input.as_bytes()).unwrap()
    }

    #[test]
    fn test_text_ignores_nested_matches() {
        let root = parse(
            "<root><projects><project><name>Inner</name></project></projects>\
             <name>Outer</name></root>",
        );
        assert_eq!("Outer", text(&root, "name"));
    }

    #[test]
    fn test_text_content_includes_descendants() {
        let root = parse("<root><title>  Senior <b>Rust</b> Engineer </title></root>");
        assert_eq!("Senior Rust Engineer", text(&root, "title"));
    }

    #[test]
    fn test_text_missing_child_is_empty() {
        let root = parse("<root/>");
        assert_eq!("", text(&root, "email"));
        assert_eq!(None, optional_text(&root, "email"));
    }

    #[test]
    fn test_list_drops_blank_items() {
        let root = parse(
            "<root><tools><tool>git</tool><tool>  </tool><tool> docker </tool></tools></root>",
        );
        assert_eq!(vec!["git", "docker"], list(&root, "tools", "tool"));
        assert!(list(&root, "technologies", "technology").is_empty());
    }

    #[test]
    fn test_find_wrapped_element() {
        let root = parse("<site><data><personalInfo/></data></site>");
        assert_eq!(
            Some("personalInfo"),
            find(&root, "personalInfo").map(|e| e.name.as_str())
        );
        assert!(find(&root, "missing").is_none());
    }
}

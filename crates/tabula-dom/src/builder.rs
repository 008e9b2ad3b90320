//! Construction of a [`DomTree`] from HTML source.
//!
//! Parsing itself is delegated to `scraper` (html5ever), which implements the
//! WHATWG tree construction algorithm including implied `tbody` elements and
//! foster parenting. The resulting `ego_tree` is copied into the arena.

use scraper::{Html, Node as ScraperNode};

use crate::{DomTree, ElementData, NodeId, NodeType};

/// Parse an HTML document into a [`DomTree`].
///
/// Doctypes and processing instructions are dropped; elements, text and
/// comments are kept in document order.
#[must_use]
pub fn parse_html(html: &str) -> DomTree {
    let document = Html::parse_document(html);
    let mut tree = DomTree::new();

    let mut stack = vec![(document.tree.root(), NodeId::ROOT)];
    while let Some((source, target)) = stack.pop() {
        let mut pending = Vec::new();
        for child in source.children() {
            let id = match child.value() {
                ScraperNode::Element(element) => {
                    let data = element
                        .attrs()
                        .fold(ElementData::new(element.name()), |data, (name, value)| {
                            data.with_attr(name, value)
                        });
                    tree.append_element(target, data)
                }
                ScraperNode::Text(text) => tree.append_text(target, text),
                ScraperNode::Comment(comment) => {
                    let id = tree.alloc(NodeType::Comment(comment.to_string()));
                    tree.append_child(target, id);
                    id
                }
                _ => continue,
            };
            pending.push((child, id));
        }
        // Children are already attached in order; stack order only affects
        // allocation order of deeper nodes.
        stack.extend(pending.into_iter().rev());
    }

    tree
}

/// Print a DOM subtree to stdout, one node per line, for debugging.
pub fn print_tree(tree: &DomTree, id: NodeId, indent: usize) {
    let prefix = "  ".repeat(indent);
    if let Some(node) = tree.get(id) {
        match &node.node_type {
            NodeType::Document => {
                println!("{prefix}Document");
            }
            NodeType::Element(data) => {
                if data.attrs.is_empty() {
                    println!("{prefix}<{}>", data.tag_name);
                } else {
                    let mut attrs: Vec<String> = data
                        .attrs
                        .iter()
                        .map(|(k, v)| {
                            if v.is_empty() {
                                k.clone()
                            } else {
                                format!("{k}=\"{v}\"")
                            }
                        })
                        .collect();
                    attrs.sort();
                    println!("{prefix}<{} {}>", data.tag_name, attrs.join(" "));
                }
            }
            NodeType::Text(data) => {
                let display = data.replace('\n', "\\n").replace(' ', "\u{00B7}");
                println!("{prefix}\"{display}\"");
            }
            NodeType::Comment(data) => {
                println!("{prefix}<!-- {data} -->");
            }
        }
        for &child_id in tree.children(id) {
            print_tree(tree, child_id, indent + 1);
        }
    }
}

use std::collections::BTreeMap;

use roxmltree::{Document, Node, ParsingOptions};

/// A property-list value.
///
/// Dates and data blobs are kept as their raw text; nothing downstream needs
/// them decoded.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    String(String),
    Integer(i64),
    Real(f64),
    Boolean(bool),
    Date(String),
    Data(String),
    Array(Vec<Value>),
    Dict(BTreeMap<String, Value>),
}

impl Value {
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::String(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_integer(&self) -> Option<i64> {
        match self {
            Value::Integer(i) => Some(*i),
            _ => None,
        }
    }

    pub fn as_dict(&self) -> Option<&BTreeMap<String, Value>> {
        match self {
            Value::Dict(d) => Some(d),
            _ => None,
        }
    }

    pub fn kind(&self) -> &'static str {
        match self {
            Value::String(_) => "string",
            Value::Integer(_) => "integer",
            Value::Real(_) => "real",
            Value::Boolean(_) => "boolean",
            Value::Date(_) => "date",
            Value::Data(_) => "data",
            Value::Array(_) => "array",
            Value::Dict(_) => "dict",
        }
    }
}

/// Parse an XML property list document into its root value.
pub fn parse(text: &str) -> Result<Value, String> {
    // Catalog exports carry a DOCTYPE declaration.
    let options = ParsingOptions {
        allow_dtd: true,
        ..ParsingOptions::default()
    };
    let doc = Document::parse_with_options(text, options).map_err(|e| e.to_string())?;

    let root = doc.root_element();
    if root.tag_name().name() != "plist" {
        return Err(format!(
            "expected <plist> root, found <{}>",
            root.tag_name().name()
        ));
    }

    let value = elements(root)
        .next()
        .ok_or_else(|| "empty <plist> element".to_string())?;
    parse_value(value)
}

fn elements<'a, 'input>(node: Node<'a, 'input>) -> impl Iterator<Item = Node<'a, 'input>> {
    node.children().filter(|n| n.is_element())
}

fn text(node: Node) -> String {
    node.text().unwrap_or("").to_string()
}

fn parse_value(node: Node) -> Result<Value, String> {
    let pos = node.document().text_pos_at(node.range().start);
    match node.tag_name().name() {
        "string" => Ok(Value::String(text(node))),
        "integer" => text(node)
            .trim()
            .parse()
            .map(Value::Integer)
            .map_err(|e| format!("bad <integer> at {pos}: {e}")),
        "real" => text(node)
            .trim()
            .parse()
            .map(Value::Real)
            .map_err(|e| format!("bad <real> at {pos}: {e}")),
        "true" => Ok(Value::Boolean(true)),
        "false" => Ok(Value::Boolean(false)),
        "date" => Ok(Value::Date(text(node).trim().to_string())),
        "data" => Ok(Value::Data(text(node).split_whitespace().collect())),
        "array" => elements(node)
            .map(parse_value)
            .collect::<Result<Vec<_>, _>>()
            .map(Value::Array),
        "dict" => parse_dict(node).map(Value::Dict),
        other => Err(format!("unexpected <{other}> at {pos}")),
    }
}

fn parse_dict(node: Node) -> Result<BTreeMap<String, Value>, String> {
    let mut dict = BTreeMap::new();
    let mut children = elements(node);

    while let Some(key) = children.next() {
        let pos = node.document().text_pos_at(key.range().start);
        if key.tag_name().name() != "key" {
            return Err(format!(
                "expected <key> at {pos}, found <{}>",
                key.tag_name().name()
            ));
        }
        let value = children
            .next()
            .ok_or_else(|| format!("<key> at {pos} has no value"))?;
        if dict.insert(text(key), parse_value(value)?).is_some() {
            return Err(format!("duplicate <key> `{}` at {pos}", text(key)));
        }
    }

    Ok(dict)
}

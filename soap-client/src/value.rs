//! Dynamically typed SOAP values
//!
//! RPC/encoded services exchange loosely typed parts. `SoapValue` models the
//! subset needed here: scalars, arrays and structs, serialized with `xsi:type`
//! hints and decoded back from response elements.

use std::collections::HashMap;

use quick_xml::escape::escape;
use xmltree::{Element, XMLNode};

use crate::SoapError;

/// A value carried in a SOAP request or response part
#[derive(Debug, Clone, PartialEq)]
pub enum SoapValue {
    /// `xsi:nil="true"`
    Null,
    Bool(bool),
    Int(i64),
    Float(f64),
    String(String),
    /// SOAP-ENC array, items in order
    List(Vec<SoapValue>),
    /// Named members in wire order
    Struct(Vec<(String, SoapValue)>),
}

impl SoapValue {
    pub fn is_null(&self) -> bool {
        matches!(self, SoapValue::Null)
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            SoapValue::String(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            SoapValue::Bool(b) => Some(*b),
            SoapValue::String(s) => match s.as_str() {
                "true" | "1" => Some(true),
                "false" | "0" => Some(false),
                _ => None,
            },
            _ => None,
        }
    }

    pub fn as_i64(&self) -> Option<i64> {
        match self {
            SoapValue::Int(i) => Some(*i),
            SoapValue::String(s) => s.trim().parse().ok(),
            _ => None,
        }
    }

    pub fn as_f64(&self) -> Option<f64> {
        match self {
            SoapValue::Float(f) => Some(*f),
            SoapValue::Int(i) => Some(*i as f64),
            SoapValue::String(s) => s.trim().parse().ok(),
            _ => None,
        }
    }

    pub fn as_list(&self) -> Option<&[SoapValue]> {
        match self {
            SoapValue::List(items) => Some(items),
            _ => None,
        }
    }

    /// Look up a struct member by name
    pub fn get(&self, name: &str) -> Option<&SoapValue> {
        match self {
            SoapValue::Struct(members) => members
                .iter()
                .find(|(key, _)| key == name)
                .map(|(_, value)| value),
            _ => None,
        }
    }

    /// Serialize this value as an element named `name` and append it to `out`
    pub fn write_xml(&self, name: &str, out: &mut String) {
        match self {
            SoapValue::Null => {
                out.push_str(&format!("<{name} xsi:nil=\"true\"/>"));
            }
            SoapValue::Bool(b) => {
                out.push_str(&format!("<{name} xsi:type=\"xsd:boolean\">{b}</{name}>"));
            }
            SoapValue::Int(i) => {
                out.push_str(&format!("<{name} xsi:type=\"xsd:long\">{i}</{name}>"));
            }
            SoapValue::Float(f) => {
                let text = if f.is_nan() {
                    "NaN".to_string()
                } else if f.is_infinite() {
                    (if f.is_sign_positive() { "INF" } else { "-INF" }).to_string()
                } else {
                    f.to_string()
                };
                out.push_str(&format!("<{name} xsi:type=\"xsd:double\">{text}</{name}>"));
            }
            SoapValue::String(s) => {
                out.push_str(&format!(
                    "<{name} xsi:type=\"xsd:string\">{}</{name}>",
                    escape(s.as_str())
                ));
            }
            SoapValue::List(items) => {
                out.push_str(&format!(
                    "<{name} xsi:type=\"SOAP-ENC:Array\" SOAP-ENC:arrayType=\"xsd:anyType[{}]\">",
                    items.len()
                ));
                for item in items {
                    item.write_xml("item", out);
                }
                out.push_str(&format!("</{name}>"));
            }
            SoapValue::Struct(members) => {
                out.push_str(&format!("<{name}>"));
                for (key, value) in members {
                    value.write_xml(key, out);
                }
                out.push_str(&format!("</{name}>"));
            }
        }
    }

    /// Decode a standalone element
    ///
    /// Leaves become scalars according to their `xsi:type` (strings when the
    /// type is missing or unknown). Elements typed as arrays, holding `item`
    /// children, or whose children all share one name, become lists; other
    /// compound elements become structs. An `href` reference cannot be resolved
    /// without the enclosing Body and is reported as a parse error; use
    /// [`SoapValue::from_response`] for complete responses.
    pub fn from_element(element: &Element) -> Result<SoapValue, SoapError> {
        Decoder::new(None).decode(element)
    }

    /// Decode the `{action}Response` wrapper found in `body`
    ///
    /// `href="#id"` references are resolved against the `id` attributes of the
    /// Body's top-level elements (RPC/encoded `multiRef` values). A single return
    /// part is unwrapped; an empty response is `Null`; several parts are
    /// returned as a struct.
    pub fn from_response(response: &Element, body: &Element) -> Result<SoapValue, SoapError> {
        let mut decoder = Decoder::new(Some(body));

        match child_elements(response).as_slice() {
            [] => Ok(SoapValue::Null),
            [single] => decoder.decode(single),
            parts => parts
                .iter()
                .map(|part| Ok((part.name.clone(), decoder.decode(part)?)))
                .collect::<Result<Vec<_>, SoapError>>()
                .map(SoapValue::Struct),
        }
    }
}

/// Resolves multi-reference values while decoding
struct Decoder<'a> {
    refs: HashMap<&'a str, &'a Element>,
    visiting: Vec<&'a str>,
}

impl<'a> Decoder<'a> {
    fn new(body: Option<&'a Element>) -> Self {
        let refs: HashMap<&'a str, &'a Element> = body
            .map(|body| {
                child_elements(body)
                    .into_iter()
                    .filter_map(|e| attribute(e, "id").map(|id| (id, e)))
                    .collect()
            })
            .unwrap_or_default();

        Self {
            refs,
            visiting: Vec::new(),
        }
    }

    fn decode(&mut self, element: &'a Element) -> Result<SoapValue, SoapError> {
        if let Some(href) = attribute(element, "href") {
            let id = href.strip_prefix('#').unwrap_or(href);
            let target = *self
                .refs
                .get(id)
                .ok_or_else(|| SoapError::Parse(format!("Unresolved reference {href} in <{}>", element.name)))?;
            if self.visiting.contains(&id) {
                return Err(SoapError::Parse(format!("Cyclic reference {href}")));
            }

            self.visiting.push(id);
            let value = self.decode(target);
            self.visiting.pop();
            return value;
        }

        if attribute(element, "nil").is_some_and(|v| v == "true" || v == "1") {
            return Ok(SoapValue::Null);
        }

        let children = child_elements(element);

        if is_array(element, &children) {
            return children
                .into_iter()
                .map(|child| self.decode(child))
                .collect::<Result<Vec<_>, SoapError>>()
                .map(SoapValue::List);
        }

        if children.is_empty() {
            let text = element
                .get_text()
                .map(|t| t.into_owned())
                .unwrap_or_default();
            return Ok(decode_scalar(attribute(element, "type"), text));
        }

        children
            .into_iter()
            .map(|child| Ok((child.name.clone(), self.decode(child)?)))
            .collect::<Result<Vec<_>, SoapError>>()
            .map(SoapValue::Struct)
    }
}

fn child_elements(element: &Element) -> Vec<&Element> {
    element
        .children
        .iter()
        .filter_map(|node| match node {
            XMLNode::Element(child) => Some(child),
            _ => None,
        })
        .collect()
}

fn attribute<'a>(element: &'a Element, local_name: &str) -> Option<&'a str> {
    let suffix = format!(":{local_name}");
    element
        .attributes
        .iter()
        .find(|(key, _)| key.as_str() == local_name || key.ends_with(&suffix))
        .map(|(_, value)| value.as_str())
}

fn is_array(element: &Element, children: &[&Element]) -> bool {
    if attribute(element, "arrayType").is_some() {
        return true;
    }
    if attribute(element, "type").is_some_and(|t| t.ends_with("Array")) {
        return true;
    }
    // SOAP-ENC array members are named `item`, whatever their count
    if !children.is_empty() && children.iter().all(|c| c.name == "item") {
        return true;
    }
    children.len() > 1 && children.iter().all(|c| c.name == children[0].name)
}

fn decode_scalar(xsi_type: Option<&str>, text: String) -> SoapValue {
    let local = xsi_type.map(|t| t.rsplit(':').next().unwrap_or(t));
    match local {
        Some("boolean") => match text.trim() {
            "true" | "1" => SoapValue::Bool(true),
            "false" | "0" => SoapValue::Bool(false),
            _ => SoapValue::String(text),
        },
        Some("int" | "long" | "short" | "integer" | "byte") => text
            .trim()
            .parse()
            .map(SoapValue::Int)
            .unwrap_or(SoapValue::String(text)),
        Some("double" | "float" | "decimal") => text
            .trim()
            .parse()
            .map(SoapValue::Float)
            .unwrap_or(SoapValue::String(text)),
        _ => SoapValue::String(text),
    }
}

impl From<bool> for SoapValue {
    fn from(value: bool) -> Self {
        SoapValue::Bool(value)
    }
}

impl From<i32> for SoapValue {
    fn from(value: i32) -> Self {
        SoapValue::Int(value.into())
    }
}

impl From<i64> for SoapValue {
    fn from(value: i64) -> Self {
        SoapValue::Int(value)
    }
}

impl From<u32> for SoapValue {
    fn from(value: u32) -> Self {
        SoapValue::Int(value.into())
    }
}

impl From<f64> for SoapValue {
    fn from(value: f64) -> Self {
        SoapValue::Float(value)
    }
}

impl From<&str> for SoapValue {
    fn from(value: &str) -> Self {
        SoapValue::String(value.to_string())
    }
}

impl From<String> for SoapValue {
    fn from(value: String) -> Self {
        SoapValue::String(value)
    }
}

impl From<Vec<SoapValue>> for SoapValue {
    fn from(value: Vec<SoapValue>) -> Self {
        SoapValue::List(value)
    }
}

impl<T: Into<SoapValue>> From<Option<T>> for SoapValue {
    fn from(value: Option<T>) -> Self {
        value.map(Into::into).unwrap_or(SoapValue::Null)
    }
}

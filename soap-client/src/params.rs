//! Ordered RPC parameter lists

use crate::SoapValue;

/// Key of an RPC parameter
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum ParamKey {
    /// Parameter sent under its own part name
    Named(String),
    /// Unnamed parameter, identified by its index among positional parameters
    Positional(usize),
}

/// Ordered list of RPC parameters
///
/// Order is significant: RPC/encoded services bind parts by position, so the
/// list is serialized exactly in insertion order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Params {
    entries: Vec<(ParamKey, SoapValue)>,
}

impl Params {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a named parameter (builder style)
    pub fn with(mut self, name: impl Into<String>, value: impl Into<SoapValue>) -> Self {
        self.push_named(name, value);
        self
    }

    /// Append a positional parameter (builder style)
    pub fn with_positional(mut self, value: impl Into<SoapValue>) -> Self {
        self.push_positional(value);
        self
    }

    /// Append a named parameter, replacing the value of an existing key in place
    pub fn push_named(&mut self, name: impl Into<String>, value: impl Into<SoapValue>) {
        let key = ParamKey::Named(name.into());
        let value = value.into();
        match self.entries.iter_mut().find(|(k, _)| *k == key) {
            Some(entry) => entry.1 = value,
            None => self.entries.push((key, value)),
        }
    }

    pub fn push_positional(&mut self, value: impl Into<SoapValue>) {
        let index = self
            .entries
            .iter()
            .filter(|(k, _)| matches!(k, ParamKey::Positional(_)))
            .count();
        self.entries.push((ParamKey::Positional(index), value.into()));
    }

    /// Value of a named parameter
    pub fn get(&self, name: &str) -> Option<&SoapValue> {
        self.entries.iter().find_map(|(key, value)| match key {
            ParamKey::Named(n) if n == name => Some(value),
            _ => None,
        })
    }

    pub fn contains_key(&self, key: &ParamKey) -> bool {
        self.entries.iter().any(|(k, _)| k == key)
    }

    /// Positional parameters, in order
    pub fn positional(&self) -> Vec<&SoapValue> {
        self.entries
            .iter()
            .filter(|(k, _)| matches!(k, ParamKey::Positional(_)))
            .map(|(_, v)| v)
            .collect()
    }

    pub fn iter(&self) -> impl Iterator<Item = &(ParamKey, SoapValue)> {
        self.entries.iter()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Union of two lists: every entry of `self` first, then the entries of
    /// `other` whose key is not already present. On collision `self` wins.
    pub fn union(mut self, other: Params) -> Params {
        for (key, value) in other.entries {
            if !self.contains_key(&key) {
                self.entries.push((key, value));
            }
        }
        self
    }

    /// Element name of the parameter at `position` in this list
    pub(crate) fn part_name(key: &ParamKey, position: usize) -> String {
        match key {
            ParamKey::Named(name) => name.clone(),
            ParamKey::Positional(_) => format!("param{position}"),
        }
    }

    /// Serialize every parameter as an RPC part
    pub fn write_xml(&self, out: &mut String) {
        for (position, (key, value)) in self.entries.iter().enumerate() {
            value.write_xml(&Self::part_name(key, position), out);
        }
    }
}

impl<K: Into<String>, V: Into<SoapValue>> FromIterator<(K, V)> for Params {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut params = Params::new();
        for (key, value) in iter {
            params.push_named(key, value);
        }
        params
    }
}

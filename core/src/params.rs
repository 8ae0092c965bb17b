//! Multi-valued query parameters.

use std::collections::BTreeMap;

/// Query parameters for one request, keyed by name.
///
/// A key may carry several values; they are encoded as repeated `key=value`
/// pairs in insertion order. Keys are kept sorted so the encoded query string
/// is deterministic.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Params {
    values: BTreeMap<String, Vec<String>>,
}

impl Params {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace every value of `key` with `value`.
    pub fn set(&mut self, key: impl Into<String>, value: impl Into<String>) -> &mut Self {
        self.values.insert(key.into(), vec![value.into()]);
        self
    }

    /// Append `value` to the values of `key`.
    pub fn add(&mut self, key: impl Into<String>, value: impl Into<String>) -> &mut Self {
        self.values.entry(key.into()).or_default().push(value.into());
        self
    }

    /// First value of `key`, if any.
    pub fn get(&self, key: &str) -> Option<&str> {
        self.values.get(key).and_then(|v| v.first()).map(String::as_str)
    }

    pub fn get_all(&self, key: &str) -> &[String] {
        self.values.get(key).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn remove(&mut self, key: &str) -> Option<Vec<String>> {
        self.values.remove(key)
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Parse an `a=1&b=2` query string. `+` decodes to a space; pairs
    /// without `=` get an empty value.
    pub fn parse(query: &str) -> Self {
        query
            .split('&')
            .filter(|pair| !pair.is_empty())
            .map(|pair| {
                let (key, value) = pair.split_once('=').unwrap_or((pair, ""));
                (form_decode(key), form_decode(value))
            })
            .collect()
    }

    /// Move every key of `other` into `self`, replacing existing values.
    pub fn merge(&mut self, other: Params) {
        self.values.extend(other.values);
    }

    /// Form-encode into `a=1&b=2&b=3`, sorted by key. Spaces become `+`.
    pub fn encode(&self) -> String {
        let mut out = String::new();
        for (key, values) in &self.values {
            let key = form_encode(key);
            for value in values {
                if !out.is_empty() {
                    out.push('&');
                }
                out.push_str(&key);
                out.push('=');
                out.push_str(&form_encode(value));
            }
        }
        out
    }
}

fn form_encode(s: &str) -> String {
    urlencoding::encode(s).replace("%20", "+")
}

fn form_decode(s: &str) -> String {
    let s = s.replace('+', " ");
    match urlencoding::decode(&s) {
        Ok(decoded) => decoded.into_owned(),
        Err(_) => s,
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for Params {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut params = Params::new();
        for (key, value) in iter {
            params.add(key, value);
        }
        params
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_params_encode_to_empty_string() {
        assert_eq!(Params::new().encode(), "");
    }

    #[test]
    fn encode_sorts_keys_and_keeps_value_order() {
        let params: Params = [("near", "Chicago, IL"), ("ll", "1,2"), ("near", "Austin")]
            .into_iter()
            .collect();
        assert_eq!(params.encode(), "ll=1%2C2&near=Chicago%2C+IL&near=Austin");
    }

    #[test]
    fn encode_writes_space_as_plus_and_escapes_literal_plus() {
        let params: Params = [("query", "fish + chips")].into_iter().collect();
        assert_eq!(params.encode(), "query=fish+%2B+chips");
    }

    #[test]
    fn parse_decodes_form_encoding() {
        let params = Params::parse("near=New+York&ll=1%2C2&flag&near=Austin");
        assert_eq!(params.get_all("near"), ["New York".to_string(), "Austin".to_string()]);
        assert_eq!(params.get("ll"), Some("1,2"));
        assert_eq!(params.get("flag"), Some(""));
        assert_eq!(Params::parse(&params.encode()), params);
    }

    #[test]
    fn merge_replaces_whole_keys() {
        let mut params = Params::parse("limit=5&near=Austin");
        params.merge([("near", "Chicago"), ("near", "Boston")].into_iter().collect());
        assert_eq!(params.get("limit"), Some("5"));
        assert_eq!(params.get_all("near"), ["Chicago".to_string(), "Boston".to_string()]);
    }

    #[test]
    fn set_overwrites_all_values() {
        let mut params = Params::new();
        params.add("v", "1").add("v", "2");
        params.set("v", "3");
        assert_eq!(params.get_all("v"), ["3".to_string()]);
        assert_eq!(params.get("v"), Some("3"));
    }

    #[test]
    fn missing_key_has_no_values() {
        let params = Params::new();
        assert!(params.get("x").is_none());
        assert!(params.get_all("x").is_empty());
        assert!(params.is_empty());
    }
}

//! HTTP request head types.
//!
//! Request headers keep the caller's insertion order and casing, because the
//! serialized header block must reproduce them exactly.

use http::Method;

/// The value of one request header entry.
///
/// A `Multiple` value is written as one header line per element, all under the
/// same field name, in list order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldValue {
    Single(String),
    Multiple(Vec<String>),
}

impl FieldValue {
    /// Iterates the individual values in the order they are written.
    pub fn iter(&self) -> impl Iterator<Item = &str> {
        let values: &[String] = match self {
            FieldValue::Single(value) => std::slice::from_ref(value),
            FieldValue::Multiple(values) => values,
        };
        values.iter().map(String::as_str)
    }
}

impl From<String> for FieldValue {
    fn from(value: String) -> Self {
        FieldValue::Single(value)
    }
}

impl From<&str> for FieldValue {
    fn from(value: &str) -> Self {
        FieldValue::Single(value.to_owned())
    }
}

impl From<usize> for FieldValue {
    fn from(value: usize) -> Self {
        FieldValue::Single(value.to_string())
    }
}

impl From<Vec<String>> for FieldValue {
    fn from(values: Vec<String>) -> Self {
        FieldValue::Multiple(values)
    }
}

impl From<Vec<&str>> for FieldValue {
    fn from(values: Vec<&str>) -> Self {
        FieldValue::Multiple(values.into_iter().map(str::to_owned).collect())
    }
}

impl<const N: usize> From<[&str; N]> for FieldValue {
    fn from(values: [&str; N]) -> Self {
        FieldValue::Multiple(values.iter().map(|v| (*v).to_owned()).collect())
    }
}

/// An insertion-ordered collection of request header entries.
///
/// Name comparison for [`insert`](Self::insert), [`get`](Self::get) and
/// [`remove`](Self::remove) is ASCII case-insensitive, but names are written
/// exactly as supplied.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RequestHeaders {
    entries: Vec<(String, FieldValue)>,
}

impl RequestHeaders {
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets `name` to `value`, replacing an existing entry in place or appending a new one.
    pub fn insert<N, V>(&mut self, name: N, value: V) -> Option<FieldValue>
    where
        N: Into<String>,
        V: Into<FieldValue>,
    {
        let name = name.into();
        let value = value.into();
        match self.position(&name) {
            Some(index) => Some(std::mem::replace(&mut self.entries[index].1, value)),
            None => {
                self.entries.push((name, value));
                None
            }
        }
    }

    /// Adds an entry without looking for an existing one.
    pub fn append<N, V>(&mut self, name: N, value: V)
    where
        N: Into<String>,
        V: Into<FieldValue>,
    {
        self.entries.push((name.into(), value.into()));
    }

    /// Puts `name: value` in front of every other entry, dropping all existing entries of that name.
    pub fn insert_first<N, V>(&mut self, name: N, value: V)
    where
        N: Into<String>,
        V: Into<FieldValue>,
    {
        let name = name.into();
        self.entries.retain(|(n, _)| !n.eq_ignore_ascii_case(&name));
        self.entries.insert(0, (name, value.into()));
    }

    pub fn remove(&mut self, name: &str) -> Option<FieldValue> {
        self.position(name).map(|index| self.entries.remove(index).1)
    }

    pub fn get(&self, name: &str) -> Option<&FieldValue> {
        self.position(name).map(|index| &self.entries[index].1)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.position(name).is_some()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterates entries in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &FieldValue)> {
        self.entries.iter().map(|(name, value)| (name.as_str(), value))
    }

    fn position(&self, name: &str) -> Option<usize> {
        self.entries.iter().position(|(n, _)| n.eq_ignore_ascii_case(name))
    }
}

impl<N, V> FromIterator<(N, V)> for RequestHeaders
where
    N: Into<String>,
    V: Into<FieldValue>,
{
    fn from_iter<I: IntoIterator<Item = (N, V)>>(iter: I) -> Self {
        let mut headers = RequestHeaders::new();
        for (name, value) in iter {
            headers.append(name, value);
        }
        headers
    }
}

impl<N, V, const L: usize> From<[(N, V); L]> for RequestHeaders
where
    N: Into<String>,
    V: Into<FieldValue>,
{
    fn from(entries: [(N, V); L]) -> Self {
        entries.into_iter().collect()
    }
}

/// Everything written before the request body: method, target and headers.
#[derive(Debug, Clone)]
pub struct RequestHead {
    method: Method,
    target: String,
    headers: RequestHeaders,
}

impl RequestHead {
    pub fn new(method: Method, target: impl Into<String>, headers: RequestHeaders) -> Self {
        Self { method, target: target.into(), headers }
    }

    pub fn method(&self) -> &Method {
        &self.method
    }

    /// The request-target exactly as it appears in the request line.
    pub fn target(&self) -> &str {
        &self.target
    }

    pub fn headers(&self) -> &RequestHeaders {
        &self.headers
    }

    pub fn headers_mut(&mut self) -> &mut RequestHeaders {
        &mut self.headers
    }
}

/// Parses a method token case-insensitively; the result is always upper-case.
pub fn parse_method(method: &str) -> Option<Method> {
    Method::from_bytes(method.to_ascii_uppercase().as_bytes()).ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn insert_replaces_case_insensitively_in_place() {
        let mut headers = RequestHeaders::from([("Accept", "a"), ("X-Test", "b")]);

        let old = headers.insert("accept", "c");

        assert_eq!(old, Some(FieldValue::from("a")));
        let names: Vec<_> = headers.iter().map(|(n, _)| n).collect();
        assert_eq!(names, ["Accept", "X-Test"]);
        assert_eq!(headers.get("ACCEPT"), Some(&FieldValue::from("c")));
    }

    #[test]
    fn insert_first_moves_entry_to_front() {
        let mut headers = RequestHeaders::from([("X-A", "1"), ("content-length", "99"), ("X-B", "2"), ("CONTENT-LENGTH", "98")]);

        headers.insert_first("Content-Length", 11_usize);

        let rendered: Vec<_> = headers.iter().map(|(n, v)| (n, v.iter().collect::<Vec<_>>())).collect();
        assert_eq!(rendered, [("Content-Length", vec!["11"]), ("X-A", vec!["1"]), ("X-B", vec!["2"])]);
    }

    #[test]
    fn multiple_values_iterate_in_order() {
        let value = FieldValue::from(["v1", "v2", "v3"]);
        assert_eq!(value.iter().collect::<Vec<_>>(), ["v1", "v2", "v3"]);
    }

    #[test]
    fn append_keeps_duplicates() {
        let mut headers = RequestHeaders::new();
        headers.append("X-Dup", "1");
        headers.append("X-Dup", "2");
        assert_eq!(headers.len(), 2);
        assert_eq!(headers.remove("x-dup"), Some(FieldValue::from("1")));
        assert_eq!(headers.len(), 1);
    }

    #[test]
    fn method_is_upper_cased() {
        assert_eq!(parse_method("get"), Some(Method::GET));
        assert_eq!(parse_method("Delete"), Some(Method::DELETE));
        assert_eq!(parse_method("PROPFIND").unwrap().as_str(), "PROPFIND");
        assert_eq!(parse_method("bad method"), None);
    }
}

//! Arguments for a request, sent as query string or as
//! `application/x-www-form-urlencoded` body.

use std::collections::{BTreeMap, HashMap};

use url::form_urlencoded;

/// Content type of a form encoded body.
pub const FORM_CONTENT_TYPE: &str = "application/x-www-form-urlencoded";

/// Arguments to a GET or POST.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum QueryArgs {
    /// Used verbatim, no encoding is applied.
    Raw(String),
    /// Key/value pairs, form encoded in the given order.
    Pairs(Vec<(String, String)>),
}

impl QueryArgs {
    /// Render the arguments for the wire.
    pub fn encode(&self) -> String {
        match self {
            QueryArgs::Raw(v) => v.clone(),
            QueryArgs::Pairs(v) => encode_pairs(v),
        }
    }

    pub fn is_empty(&self) -> bool {
        match self {
            QueryArgs::Raw(v) => v.is_empty(),
            QueryArgs::Pairs(v) => v.is_empty(),
        }
    }
}

/// Form encode key/value pairs: `a=1&b=x+y`.
pub fn encode_pairs<K, V>(pairs: &[(K, V)]) -> String
where
    K: AsRef<str>,
    V: AsRef<str>,
{
    form_urlencoded::Serializer::new(String::new())
        .extend_pairs(pairs.iter().map(|(k, v)| (k.as_ref(), v.as_ref())))
        .finish()
}

impl From<&str> for QueryArgs {
    fn from(value: &str) -> Self {
        QueryArgs::Raw(value.to_string())
    }
}

impl From<String> for QueryArgs {
    fn from(value: String) -> Self {
        QueryArgs::Raw(value)
    }
}

impl<K: Into<String>, V: Into<String>> From<Vec<(K, V)>> for QueryArgs {
    fn from(value: Vec<(K, V)>) -> Self {
        QueryArgs::Pairs(value.into_iter().map(|(k, v)| (k.into(), v.into())).collect())
    }
}

impl<K: Into<String>, V: Into<String>, const N: usize> From<[(K, V); N]> for QueryArgs {
    fn from(value: [(K, V); N]) -> Self {
        QueryArgs::Pairs(value.into_iter().map(|(k, v)| (k.into(), v.into())).collect())
    }
}

impl<K: Into<String>, V: Into<String>> From<BTreeMap<K, V>> for QueryArgs {
    fn from(value: BTreeMap<K, V>) -> Self {
        QueryArgs::Pairs(value.into_iter().map(|(k, v)| (k.into(), v.into())).collect())
    }
}

impl<K: Into<String>, V: Into<String>> From<HashMap<K, V>> for QueryArgs {
    fn from(value: HashMap<K, V>) -> Self {
        QueryArgs::Pairs(value.into_iter().map(|(k, v)| (k.into(), v.into())).collect())
    }
}

use serde::{Deserialize, Serialize};

/// A single querystring parameter. Duplicate names are legal and their
/// relative order is meaningful downstream (repeated keys carry
/// multi-value fields), so payloads hold a list of these, never a map.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct NameValuePair {
    pub name: String,
    pub value: String,
}

impl NameValuePair {
    pub fn new(name: impl Into<String>, value: impl Into<String>) -> Self {
        NameValuePair {
            name: name.into(),
            value: value.into(),
        }
    }
}

/// The payload of one tracker submission, as handed to enrichment.
///
/// Closed set of variants; consumers match on the variant rather than
/// downcasting.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub enum TrackerPayload {
    NvGet(NvGetPayload),
    JsonGet(JsonGetPayload),
}

/// An ordered, non-empty list of name-value pairs extracted from a GET
/// querystring.
///
/// The only way to obtain one is `querystring::extract`, which refuses to
/// construct an empty payload. Nothing downstream re-checks emptiness.
/// No `Deserialize` impl: deserializing would bypass the construction gate.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct NvGetPayload {
    pairs: Vec<NameValuePair>,
}

impl NvGetPayload {
    pub(crate) fn new(pairs: Vec<NameValuePair>) -> Self {
        debug_assert!(!pairs.is_empty(), "NvGetPayload holds at least one pair");
        NvGetPayload { pairs }
    }

    pub fn pairs(&self) -> &[NameValuePair] {
        &self.pairs
    }

    pub fn len(&self) -> usize {
        self.pairs.len()
    }

    pub fn is_empty(&self) -> bool {
        false
    }

    pub fn into_pairs(self) -> Vec<NameValuePair> {
        self.pairs
    }
}

/// A JSON-encoded GET payload, carried through unparsed. Enrichment owns
/// the decoding of the JSON body.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct JsonGetPayload {
    pub raw: String,
}

impl JsonGetPayload {
    pub fn new(raw: impl Into<String>) -> Self {
        JsonGetPayload { raw: raw.into() }
    }
}

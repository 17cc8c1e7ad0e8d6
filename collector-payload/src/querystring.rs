use encoding_rs::Encoding;
use percent_encoding::percent_decode_str;
use thiserror::Error;
use tracing::debug;

use crate::payload::{NameValuePair, NvGetPayload};

#[derive(Error, Debug, PartialEq, Eq)]
pub enum ExtractionError {
    #[error("no name-value pairs extractable from querystring [{querystring}] with encoding [{encoding}]")]
    EmptyPayload {
        querystring: String,
        encoding: String,
    },
    #[error("failed to decode querystring [{querystring}] with encoding [{encoding}]: {reason}")]
    DecodeFault {
        querystring: String,
        encoding: String,
        reason: String,
    },
}

/// Escapes every `%` that is not already the start of a `%25` sequence.
///
/// Some tracker versions percent-encode the querystring once, others twice.
/// We compensate by re-escaping the bare percents so the single decode pass
/// below treats them as literals: a singly-encoded `%20` comes out as the
/// text `%20`, not a space. Compatibility shim for those older trackers,
/// kept until they age out.
///
/// Known limitation: a naked `%25` that was meant as literal `%` followed by
/// `25` is left alone, so applying this to such input twice is not safe.
/// Already-correct input is a fixed point.
pub fn fix_bare_percents(qs: &str) -> String {
    let mut out = String::with_capacity(qs.len());
    let mut rest = qs;
    while let Some(idx) = rest.find('%') {
        out.push_str(&rest[..idx]);
        if rest[idx + 1..].starts_with("25") {
            out.push('%');
        } else {
            out.push_str("%25");
        }
        rest = &rest[idx + 1..];
    }
    out.push_str(rest);
    out
}

/// Extracts the name-value pairs of a GET querystring, in order, with
/// duplicates kept.
///
/// This is the sole constructor of `NvGetPayload`: success means at least
/// one pair was recovered. Failures come back as values; disposition of a
/// bad record (drop, quarantine, retry with another encoding) is the
/// caller's call.
pub fn extract(qs: &str, encoding: &str) -> Result<NvGetPayload, ExtractionError> {
    debug!(len = qs.len(), encoding, "extracting querystring payload");

    let charset = Encoding::for_label(encoding.as_bytes()).ok_or_else(|| {
        decode_fault(
            qs,
            encoding,
            format!("unsupported encoding name [{encoding}]"),
        )
    })?;

    let normalized = fix_bare_percents(qs);

    let mut pairs = Vec::new();
    for segment in normalized.split('&') {
        if segment.is_empty() {
            continue;
        }
        // Split on the first '='; a bare name decodes to an empty value.
        let (name, value) = segment.split_once('=').unwrap_or((segment, ""));
        let pair = NameValuePair {
            name: decode_component(name, charset)
                .map_err(|reason| decode_fault(qs, encoding, reason))?,
            value: decode_component(value, charset)
                .map_err(|reason| decode_fault(qs, encoding, reason))?,
        };
        pairs.push(pair);
    }

    if pairs.is_empty() {
        return Err(ExtractionError::EmptyPayload {
            querystring: qs.to_string(),
            encoding: encoding.to_string(),
        });
    }

    Ok(NvGetPayload::new(pairs))
}

/// Form-urlencoded decode of one name or value: '+' means space, then
/// percent-escapes resolve to bytes, then the bytes are decoded with the
/// requested charset.
fn decode_component(raw: &str, charset: &'static Encoding) -> Result<String, String> {
    let unplussed = raw.replace('+', " ");
    let bytes: Vec<u8> = percent_decode_str(&unplussed).collect();

    match charset.decode_without_bom_handling_and_without_replacement(&bytes) {
        Some(decoded) => Ok(decoded.into_owned()),
        None => Err(format!("bytes are not valid {}", charset.name())),
    }
}

fn decode_fault(qs: &str, encoding: &str, reason: String) -> ExtractionError {
    ExtractionError::DecodeFault {
        querystring: qs.to_string(),
        encoding: encoding.to_string(),
        reason,
    }
}

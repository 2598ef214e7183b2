//! Message decoding for tool output.
//!
//! Tools write whatever bytes the analysed file contained, so a message is
//! first tried as UTF-8, then as the target's fallback encoding. Character
//! entities (`&quot;`, `&#39;`, `&eacute;`...) are unescaped afterwards.

use crate::error::DecodeError;
use encoding_rs::Encoding;
use quick_xml::escape::resolve_html5_entity;
use std::borrow::Cow;

/// Decode raw message bytes and unescape character entities.
///
/// `fallback` is a WHATWG encoding label such as `windows-1252`.
pub fn decode_message(raw: &[u8], fallback: &str) -> Result<String, DecodeError> {
    let text: Cow<'_, str> = match std::str::from_utf8(raw) {
        Ok(s) => Cow::Borrowed(s),
        Err(_) => {
            let enc = Encoding::for_label(fallback.trim().as_bytes())
                .ok_or_else(|| DecodeError::UnknownEncoding(fallback.to_string()))?;
            let decoded = enc
                .decode_without_bom_handling_and_without_replacement(raw)
                .ok_or(DecodeError::Malformed {
                    encoding: enc.name(),
                })?;
            Cow::Owned(decoded.into_owned())
        }
    };
    Ok(unescape_entities(&text))
}

/// Replace HTML/XML character entities with their literal characters.
///
/// Each `&name;`, `&#n;` or `&#xh;` run is resolved on its own; a bare `&`
/// or an unknown entity is copied through unchanged.
pub fn unescape_entities(text: &str) -> String {
    if !text.contains('&') {
        return text.to_string();
    }
    let mut out = String::with_capacity(text.len());
    let mut rest = text;
    while let Some(amp) = rest.find('&') {
        out.push_str(&rest[..amp]);
        let tail = &rest[amp + 1..];
        let resolved = entity_body(tail).and_then(|body| Some((body, resolve_entity(body)?)));
        match resolved {
            Some((body, ch)) => {
                out.push_str(&ch);
                rest = &tail[body.len() + 1..];
            }
            None => {
                out.push('&');
                rest = tail;
            }
        }
    }
    out.push_str(rest);
    out
}

/// Text between `&` and the closing `;`, if it looks like a reference.
fn entity_body(tail: &str) -> Option<&str> {
    let end = tail.find(';')?;
    let body = &tail[..end];
    let plausible = !body.is_empty()
        && body.len() <= MAX_ENTITY_LEN
        && body.bytes().all(|b| b.is_ascii_alphanumeric() || b == b'#');
    plausible.then_some(body)
}

const MAX_ENTITY_LEN: usize = 32;

fn resolve_entity(body: &str) -> Option<Cow<'static, str>> {
    if let Some(num) = body.strip_prefix('#') {
        let code = match num.strip_prefix(['x', 'X']) {
            Some(hex) => u32::from_str_radix(hex, 16).ok()?,
            None => num.parse::<u32>().ok()?,
        };
        return char::from_u32(code)
            .filter(|c| *c != '\0')
            .map(|c| Cow::Owned(c.to_string()));
    }
    resolve_html5_entity(body).map(Cow::Borrowed)
}

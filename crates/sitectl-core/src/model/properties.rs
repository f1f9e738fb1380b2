// ── Property-string parsing ──
//
// Pipeline hosts hand the property list through XML, so the string arrives
// entity-encoded and is decoded before parsing. Format:
//
//     Name=Value;Other=a|b|c
//
// Semicolons separate pairs, the first `=` separates name from value, and
// pipes mark a multi-valued property. Empty segments are ignored.

use serde::Serialize;

use crate::error::CoreError;

/// An ordered list of unique `name=value(s)` pairs.
#[derive(Debug, Clone, Default, Serialize)]
pub struct PropertySet {
    entries: Vec<(String, Vec<String>)>,
}

impl PropertySet {
    /// Parse a semicolon-delimited property string.
    ///
    /// Duplicate names and nameless pairs are rejected; an absent `=`
    /// yields an empty value.
    pub fn parse(input: &str) -> Result<Self, CoreError> {
        let decoded = decode_entities(input);
        let mut entries: Vec<(String, Vec<String>)> = Vec::new();

        for segment in decoded.split(';').filter(|s| !s.is_empty()) {
            let (name, value) = segment.split_once('=').unwrap_or((segment, ""));
            if name.is_empty() {
                return Err(CoreError::ValidationFailed {
                    message: format!("property segment {segment:?} has no name"),
                });
            }
            if entries.iter().any(|(n, _)| n == name) {
                return Err(CoreError::ValidationFailed {
                    message: format!("duplicate property name: {name}"),
                });
            }
            let values = if value.contains('|') {
                value.split('|').map(str::to_owned).collect()
            } else {
                vec![value.to_owned()]
            };
            entries.push((name.to_owned(), values));
        }

        Ok(Self { entries })
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Iterate pairs in input order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &[String])> {
        self.entries
            .iter()
            .map(|(name, values)| (name.as_str(), values.as_slice()))
    }
}

/// Decode the predefined XML/HTML entities (`&amp;` `&lt;` `&gt;` `&quot;`
/// `&apos;`/`&#39;`). Unrecognized entities pass through untouched.
fn decode_entities(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    let mut rest = input;

    while let Some(pos) = rest.find('&') {
        out.push_str(&rest[..pos]);
        let tail = &rest[pos..];
        let decoded = tail.find(';').and_then(|end| {
            let replacement = match &tail[1..end] {
                "amp" => '&',
                "lt" => '<',
                "gt" => '>',
                "quot" => '"',
                "apos" | "#39" => '\'',
                _ => return None,
            };
            Some((replacement, end))
        });
        match decoded {
            Some((c, end)) => {
                out.push(c);
                rest = &tail[end + 1..];
            }
            None => {
                out.push('&');
                rest = &tail[1..];
            }
        }
    }

    out.push_str(rest);
    out
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn pairs(set: &PropertySet) -> Vec<(String, Vec<String>)> {
        set.iter()
            .map(|(n, v)| (n.to_owned(), v.to_vec()))
            .collect()
    }

    #[test]
    fn parses_single_and_multi_valued() {
        let set = PropertySet::parse("A=1;B=x|y|z").unwrap();
        assert_eq!(
            pairs(&set),
            vec![
                ("A".into(), vec!["1".into()]),
                ("B".into(), vec!["x".into(), "y".into(), "z".into()]),
            ]
        );
    }

    #[test]
    fn empty_segments_are_ignored() {
        let set = PropertySet::parse(";A=1;;B=2;").unwrap();
        assert_eq!(set.len(), 2);
    }

    #[test]
    fn missing_equals_yields_empty_value() {
        let set = PropertySet::parse("ScriptMaps=;ContentIndexed").unwrap();
        assert_eq!(
            pairs(&set),
            vec![
                ("ScriptMaps".into(), vec![String::new()]),
                ("ContentIndexed".into(), vec![String::new()]),
            ]
        );
    }

    #[test]
    fn value_keeps_everything_after_first_equals() {
        let set = PropertySet::parse("ServerBindings=:80:a=b").unwrap();
        assert_eq!(pairs(&set), vec![("ServerBindings".into(), vec![":80:a=b".into()])]);
    }

    #[test]
    fn duplicate_name_is_rejected() {
        let err = PropertySet::parse("A=1;A=2").unwrap_err();
        assert!(matches!(err, CoreError::ValidationFailed { .. }));
    }

    #[test]
    fn nameless_pair_is_rejected() {
        let err = PropertySet::parse("=1").unwrap_err();
        assert!(matches!(err, CoreError::ValidationFailed { .. }));
    }

    #[test]
    fn empty_input_parses_to_empty_set() {
        assert!(PropertySet::parse("").unwrap().is_empty());
    }

    #[test]
    fn decodes_predefined_entities() {
        assert_eq!(
            decode_entities("Bindings=:80:a&amp;b;Title=&quot;hi&quot;"),
            "Bindings=:80:a&b;Title=\"hi\""
        );
        assert_eq!(decode_entities("&lt;root&gt;"), "<root>");
        assert_eq!(decode_entities("it&apos;s &#39;ok&#39;"), "it's 'ok'");
    }

    #[test]
    fn unknown_entities_pass_through() {
        assert_eq!(decode_entities("a &bogus; b & c"), "a &bogus; b & c");
    }
}

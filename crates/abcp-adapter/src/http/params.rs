/*
[INPUT]:  Typed endpoint arguments
[OUTPUT]: Ordered key/value pairs in the API's bracketed wire conventions
[POS]:    Marshaling layer - every endpoint method builds its payload here
[UPDATE]: When a new payload shape appears in the vendor API
*/

use serde_json::Value;

use crate::http::error::{AbcpError, Result};

/// Ordered request parameters. The API accepts both query strings and
/// form bodies in the same shape, so one builder serves GET and POST.
#[derive(Debug, Clone, Default)]
pub(crate) struct Params {
    pairs: Vec<(String, String)>,
}

impl Params {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    pub(crate) fn push(&mut self, key: &str, value: impl ToString) {
        self.pairs.push((key.to_owned(), value.to_string()));
    }

    pub(crate) fn push_opt(&mut self, key: &str, value: Option<impl ToString>) {
        if let Some(v) = value {
            self.push(key, v);
        }
    }

    /// Boolean rendered as `1`/`0`, the form most cp endpoints take.
    pub(crate) fn push_opt_flag(&mut self, key: &str, value: Option<bool>) {
        if let Some(v) = value {
            self.push(key, if v { "1" } else { "0" });
        }
    }

    /// Boolean rendered as the literal words `true`/`false`; a few user and
    /// agreement endpoints insist on this spelling.
    pub(crate) fn push_opt_bool_str(&mut self, key: &str, value: Option<bool>) {
        if let Some(v) = value {
            self.push(key, if v { "true" } else { "false" });
        }
    }

    /// Plain list rendered as `key[0]=a&key[1]=b`.
    pub(crate) fn push_indexed(&mut self, key: &str, values: &[impl ToString]) {
        for (i, v) in values.iter().enumerate() {
            self.push(&format!("{key}[{i}]"), v.to_string());
        }
    }

    pub(crate) fn push_opt_indexed(&mut self, key: &str, values: Option<&[impl ToString]>) {
        if let Some(vs) = values {
            self.push_indexed(key, vs);
        }
    }

    /// List rendered as a single comma separated value; the `cp/ts` family
    /// takes its lists this way.
    pub(crate) fn push_opt_csv(&mut self, key: &str, values: Option<&[impl ToString]>) {
        if let Some(vs) = values {
            if !vs.is_empty() {
                let joined = vs
                    .iter()
                    .map(|v| v.to_string())
                    .collect::<Vec<_>>()
                    .join(",");
                self.push(key, joined);
            }
        }
    }

    /// One JSON object flattened to `prefix[field]=value` pairs.
    pub(crate) fn push_object(&mut self, prefix: &str, object: &Value) {
        if let Some(map) = object.as_object() {
            for (k, v) in map {
                self.push(&format!("{prefix}[{k}]"), render_scalar(v));
            }
        }
    }

    /// List of JSON objects flattened to `prefix[i][field]=value` pairs.
    pub(crate) fn push_objects(&mut self, prefix: &str, objects: &[Value]) {
        for (i, obj) in objects.iter().enumerate() {
            if let Some(map) = obj.as_object() {
                for (k, v) in map {
                    self.push(&format!("{prefix}[{i}][{k}]"), render_scalar(v));
                }
            }
        }
    }

    pub(crate) fn push_opt_objects(&mut self, prefix: &str, objects: Option<&[Value]>) {
        if let Some(objs) = objects {
            self.push_objects(prefix, objs);
        }
    }

    pub(crate) fn pairs(&self) -> &[(String, String)] {
        &self.pairs
    }
}

fn render_scalar(v: &Value) -> String {
    match v {
        Value::String(s) => s.clone(),
        Value::Bool(b) => if *b { "1" } else { "0" }.to_owned(),
        other => other.to_string(),
    }
}

/// Page sizes are capped at 1000 across the API.
pub(crate) fn check_limit(limit: Option<i64>) -> Result<()> {
    match limit {
        Some(l) if !(1..=1000).contains(&l) => Err(AbcpError::wrong_parameter(
            "limit",
            format!("must be within 1..=1000, got {l}"),
        )),
        _ => Ok(()),
    }
}

/// Validate a `fields` selection against the endpoint's whitelist and join it
/// into the CSV the API expects.
pub(crate) fn check_fields(
    fields: Option<&[&str]>,
    allowed: &[&str],
) -> Result<Option<String>> {
    let Some(fields) = fields else {
        return Ok(None);
    };
    for f in fields {
        if !allowed.contains(f) {
            return Err(AbcpError::wrong_parameter(
                "fields",
                format!("unknown field {f:?}, allowed: {allowed:?}"),
            ));
        }
    }
    Ok(Some(fields.join(",")))
}

/// Output format strings are sets of single-character flags.
pub(crate) fn check_flags(
    name: &'static str,
    value: Option<&str>,
    allowed: &str,
) -> Result<()> {
    if let Some(v) = value {
        if v.is_empty() || v.len() > allowed.len() || v.chars().any(|c| !allowed.contains(c)) {
            return Err(AbcpError::wrong_parameter(
                name,
                format!("flags must be drawn from {allowed:?}, got {v:?}"),
            ));
        }
    }
    Ok(())
}

/// Enumerated string argument.
pub(crate) fn check_one_of(
    name: &'static str,
    value: Option<&str>,
    allowed: &[&str],
) -> Result<()> {
    if let Some(v) = value {
        if !allowed.contains(&v) {
            return Err(AbcpError::wrong_parameter(
                name,
                format!("must be one of {allowed:?}, got {v:?}"),
            ));
        }
    }
    Ok(())
}

/// Integer argument with an inclusive range.
pub(crate) fn check_range(
    name: &'static str,
    value: Option<i64>,
    range: std::ops::RangeInclusive<i64>,
) -> Result<()> {
    if let Some(v) = value {
        if !range.contains(&v) {
            return Err(AbcpError::wrong_parameter(
                name,
                format!(
                    "must be within {}..={}, got {v}",
                    range.start(),
                    range.end()
                ),
            ));
        }
    }
    Ok(())
}

/// String that must be all digits (numeric ids passed as text).
pub(crate) fn check_digits(name: &'static str, value: Option<&str>) -> Result<()> {
    if let Some(v) = value {
        if v.is_empty() || !v.bytes().all(|b| b.is_ascii_digit()) {
            return Err(AbcpError::wrong_parameter(
                name,
                format!("must be numeric, got {v:?}"),
            ));
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_push_indexed() {
        let mut p = Params::new();
        p.push_indexed("numbers", &["1042", "1043"]);
        assert_eq!(
            p.pairs(),
            &[
                ("numbers[0]".to_owned(), "1042".to_owned()),
                ("numbers[1]".to_owned(), "1043".to_owned()),
            ]
        );
    }

    #[test]
    fn test_push_opt_csv() {
        let mut p = Params::new();
        p.push_opt_csv("positionIds", Some(&[11i64, 12, 13][..]));
        assert_eq!(p.pairs()[0], ("positionIds".to_owned(), "11,12,13".to_owned()));

        let mut p = Params::new();
        let none: Option<&[i64]> = None;
        p.push_opt_csv("positionIds", none);
        assert!(p.pairs().is_empty());
    }

    #[test]
    fn test_push_objects() {
        let mut p = Params::new();
        p.push_objects(
            "positions",
            &[json!({"brand": "Febi", "number": "01089", "quantity": 2})],
        );
        let pairs = p.pairs();
        assert!(pairs.contains(&("positions[0][brand]".to_owned(), "Febi".to_owned())));
        assert!(pairs.contains(&("positions[0][quantity]".to_owned(), "2".to_owned())));
    }

    #[test]
    fn test_push_object_renders_bools_as_flags() {
        let mut p = Params::new();
        p.push_object("order", &json!({"paid": true}));
        assert_eq!(p.pairs()[0], ("order[paid]".to_owned(), "1".to_owned()));
    }

    #[test]
    fn test_check_limit() {
        assert!(check_limit(None).is_ok());
        assert!(check_limit(Some(1)).is_ok());
        assert!(check_limit(Some(1000)).is_ok());
        assert!(check_limit(Some(0)).is_err());
        assert!(check_limit(Some(1001)).is_err());
    }

    #[test]
    fn test_check_fields() {
        let allowed = ["agreement", "tags"];
        assert_eq!(
            check_fields(Some(&["tags", "agreement"]), &allowed).unwrap(),
            Some("tags,agreement".to_owned())
        );
        assert!(check_fields(Some(&["bogus"]), &allowed).is_err());
        assert_eq!(check_fields(None, &allowed).unwrap(), None);
    }

    #[test]
    fn test_check_flags() {
        assert!(check_flags("output", Some("de"), "des").is_ok());
        assert!(check_flags("output", Some("x"), "des").is_err());
        assert!(check_flags("output", Some("dess"), "des").is_err());
        assert!(check_flags("output", None, "des").is_ok());
    }

    #[test]
    fn test_check_one_of() {
        assert!(check_one_of("status", Some("new"), &["new", "prepayment"]).is_ok());
        assert!(check_one_of("status", Some("done"), &["new", "prepayment"]).is_err());
    }

    #[test]
    fn test_check_range() {
        assert!(check_range("type", Some(2), 1..=3).is_ok());
        assert!(check_range("type", Some(4), 1..=3).is_err());
    }

    #[test]
    fn test_check_digits() {
        assert!(check_digits("userId", Some("12345")).is_ok());
        assert!(check_digits("userId", Some("12a45")).is_err());
        assert!(check_digits("userId", Some("")).is_err());
    }
}

//! Field-by-field extraction from a raw object, accumulating violations.
//!
//! Every accessor either returns the typed value or records why it could
//! not, then carries on. `null` is treated exactly like an absent key.
//!
//! Scalars are converted where the catalog has always converted them:
//!
//! - a number where text is expected becomes its JSON text (`3.8` → `"3.8"`),
//!   which keeps unquoted YAML versions and years acceptable;
//! - a flag accepts booleans, numbers equal to 0 or 1, and the words in
//!   [`FLAG_TRUE_WORDS`] / [`FLAG_FALSE_WORDS`] in any letter case;
//! - URL text is trimmed before it is checked (see [`HttpUrl::new`]).
//!
//! Booleans, lists and objects are never text.

use mcat_core::{FieldError, FieldPath, HttpUrl, Vocabulary};
use serde_json::{Map, Value};

use crate::declaration::RecordDecl;
use crate::record::SubRecord;
use crate::violation::{ValidationErrorSet, Violation};

/// JSON type name used in `TypeMismatch` reports.
pub(crate) fn json_type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

fn mismatch(expected: &'static str, found: &Value) -> FieldError {
    FieldError::TypeMismatch {
        expected,
        found: json_type_name(found),
    }
}

/// Words accepted as a true flag, compared case-insensitively.
pub(crate) const FLAG_TRUE_WORDS: &[&str] = &["1", "on", "t", "true", "y", "yes"];

/// Words accepted as a false flag, compared case-insensitively.
pub(crate) const FLAG_FALSE_WORDS: &[&str] = &["0", "off", "f", "false", "n", "no"];

/// Text form of a scalar that may stand in for text.
pub(crate) fn as_text(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}

/// Flag value of `value`, if it is one of the accepted flag spellings.
pub(crate) fn as_flag(value: &Value) -> Option<bool> {
    match value {
        Value::Bool(b) => Some(*b),
        Value::Number(n) => match n.as_f64() {
            Some(f) if f == 0.0 => Some(false),
            Some(f) if f == 1.0 => Some(true),
            _ => None,
        },
        Value::String(s) => {
            let word = s.to_lowercase();
            if FLAG_TRUE_WORDS.contains(&word.as_str()) {
                Some(true)
            } else if FLAG_FALSE_WORDS.contains(&word.as_str()) {
                Some(false)
            } else {
                None
            }
        }
        _ => None,
    }
}

/// Loose shape check for an email address: `local@domain.tld`, no
/// whitespace, exactly one `@`.
pub(crate) fn looks_like_email(text: &str) -> bool {
    if text.chars().any(char::is_whitespace) {
        return false;
    }
    let Some((local, domain)) = text.split_once('@') else {
        return false;
    };
    if local.is_empty() || domain.contains('@') {
        return false;
    }
    match domain.rsplit_once('.') {
        Some((host, tld)) => !host.is_empty() && !tld.is_empty(),
        None => false,
    }
}

pub(crate) struct FieldReader<'a> {
    map: &'a Map<String, Value>,
    violations: Vec<Violation>,
}

impl<'a> FieldReader<'a> {
    /// Start reading `raw`, which must be a JSON object.
    pub(crate) fn new(raw: &'a Value) -> Result<Self, ValidationErrorSet> {
        match raw {
            Value::Object(map) => Ok(Self {
                map,
                violations: Vec::new(),
            }),
            other => Err(ValidationErrorSet::single(
                FieldPath::root(),
                mismatch("object", other),
            )),
        }
    }

    fn present(&self, name: &str) -> Option<&'a Value> {
        self.map.get(name).filter(|v| !v.is_null())
    }

    pub(crate) fn reject(&mut self, path: FieldPath, error: FieldError) {
        self.violations.push(Violation::new(path, error));
    }

    fn text_at(&mut self, path: FieldPath, value: &Value) -> Option<String> {
        let text = as_text(value);
        if text.is_none() {
            self.reject(path, mismatch("text", value));
        }
        text
    }

    /// Required, non-blank text. Returns an empty string on failure; the
    /// record built from it is discarded because a violation was recorded.
    pub(crate) fn required_text(&mut self, name: &str) -> String {
        let Some(value) = self.present(name) else {
            self.reject(FieldPath::field(name), FieldError::Missing);
            return String::new();
        };
        match self.text_at(FieldPath::field(name), value) {
            Some(text) if text.trim().is_empty() => {
                self.reject(FieldPath::field(name), FieldError::Blank);
                String::new()
            }
            Some(text) => text,
            None => String::new(),
        }
    }

    pub(crate) fn text(&mut self, name: &str) -> Option<String> {
        let value = self.present(name)?;
        self.text_at(FieldPath::field(name), value)
    }

    pub(crate) fn email(&mut self, name: &str) -> Option<String> {
        let text = self.text(name)?;
        if looks_like_email(&text) {
            Some(text)
        } else {
            self.reject(
                FieldPath::field(name),
                FieldError::TypeMismatch {
                    expected: "email address",
                    found: "string",
                },
            );
            None
        }
    }

    /// Boolean with a default; see [`as_flag`] for the accepted spellings.
    pub(crate) fn flag(&mut self, name: &str, default: bool) -> bool {
        let Some(value) = self.present(name) else {
            return default;
        };
        as_flag(value).unwrap_or_else(|| {
            self.reject(FieldPath::field(name), mismatch("boolean", value));
            default
        })
    }

    pub(crate) fn term<T: Vocabulary>(&mut self, name: &str) -> Option<T> {
        let value = self.present(name)?;
        let text = self.text_at(FieldPath::field(name), value)?;
        match T::parse_value(&text) {
            Ok(term) => Some(term),
            Err(e) => {
                self.reject(FieldPath::field(name), FieldError::InvalidEnumValue(e));
                None
            }
        }
    }

    fn url_at(&mut self, path: FieldPath, value: &'a Value) -> Option<HttpUrl> {
        let text = self.text_at(path.clone(), value)?;
        match HttpUrl::new(text) {
            Ok(url) => Some(url),
            Err(e) => {
                self.reject(path, e);
                None
            }
        }
    }

    pub(crate) fn url(&mut self, name: &str) -> Option<HttpUrl> {
        let value = self.present(name)?;
        self.url_at(FieldPath::field(name), value)
    }

    /// An array field; each element is read by `read`. Returns the list only
    /// when every element was accepted.
    fn list<T>(
        &mut self,
        name: &str,
        mut read: impl FnMut(&mut Self, FieldPath, &'a Value) -> Option<T>,
    ) -> Option<Vec<T>> {
        let value = self.present(name)?;
        let Value::Array(items) = value else {
            self.reject(FieldPath::field(name), mismatch("list", value));
            return None;
        };
        let mut out = Vec::with_capacity(items.len());
        let mut complete = true;
        for (idx, item) in items.iter().enumerate() {
            match read(self, FieldPath::field(name).index(idx), item) {
                Some(v) => out.push(v),
                None => complete = false,
            }
        }
        complete.then_some(out)
    }

    pub(crate) fn text_list(&mut self, name: &str) -> Option<Vec<String>> {
        self.list(name, |reader, path, item| {
            reader.text_at(path, item)
        })
    }

    pub(crate) fn url_list(&mut self, name: &str) -> Option<Vec<HttpUrl>> {
        self.list(name, |reader, path, item| reader.url_at(path, item))
    }

    fn record_at<R: SubRecord>(&mut self, path: FieldPath, value: &'a Value) -> Option<R> {
        if !value.is_object() {
            self.reject(path, mismatch("object", value));
            return None;
        }
        match R::validate(value) {
            Ok(record) => Some(record),
            Err(errors) => {
                self.violations.extend(
                    errors
                        .into_inner()
                        .into_iter()
                        .map(|v| v.nest_under(&path, R::DECL.name)),
                );
                None
            }
        }
    }

    pub(crate) fn record<R: SubRecord>(&mut self, name: &str) -> Option<R> {
        let value = self.present(name)?;
        self.record_at(FieldPath::field(name), value)
    }

    pub(crate) fn record_list<R: SubRecord>(&mut self, name: &str) -> Option<Vec<R>> {
        self.list(name, |reader, path, item| reader.record_at(path, item))
    }

    /// Keys present in the input that `decl` does not declare.
    pub(crate) fn unknown_keys(&self, decl: &RecordDecl) -> Vec<&'a str> {
        self.map
            .keys()
            .map(String::as_str)
            .filter(|key| !decl.declares(key))
            .collect()
    }

    /// Number of violations recorded so far.
    pub(crate) fn violation_count(&self) -> usize {
        self.violations.len()
    }

    /// Return `record` if nothing was rejected, otherwise the full report.
    pub(crate) fn finish<T>(self, record: T) -> Result<T, ValidationErrorSet> {
        if self.violations.is_empty() {
            Ok(record)
        } else {
            Err(ValidationErrorSet::new(self.violations))
        }
    }
}

//! Typed scalar stored as a node value or an attribute.

use std::fmt;

/// A boolean, integer, double or text scalar, or nothing at all.
///
/// Getters never fail: each one coerces whatever is stored into the
/// requested type, falling back to the type's zero value.
#[derive(Debug, Clone, Default, PartialEq)]
pub enum SerializerValue {
    #[default]
    Undefined,
    Bool(bool),
    Int(i32),
    Double(f64),
    String(String),
}

impl SerializerValue {
    pub fn is_undefined(&self) -> bool {
        matches!(self, SerializerValue::Undefined)
    }

    pub fn is_bool(&self) -> bool {
        matches!(self, SerializerValue::Bool(_))
    }

    pub fn is_int(&self) -> bool {
        matches!(self, SerializerValue::Int(_))
    }

    pub fn is_double(&self) -> bool {
        matches!(self, SerializerValue::Double(_))
    }

    pub fn is_string(&self) -> bool {
        matches!(self, SerializerValue::String(_))
    }

    pub fn set_bool(&mut self, value: bool) {
        *self = SerializerValue::Bool(value);
    }

    pub fn set_int(&mut self, value: i32) {
        *self = SerializerValue::Int(value);
    }

    pub fn set_double(&mut self, value: f64) {
        *self = SerializerValue::Double(value);
    }

    pub fn set_string(&mut self, value: impl Into<String>) {
        *self = SerializerValue::String(value.into());
    }

    /// Text is true only when it is exactly `"true"`.
    pub fn get_bool(&self) -> bool {
        match self {
            SerializerValue::Undefined => false,
            SerializerValue::Bool(b) => *b,
            SerializerValue::Int(i) => *i != 0,
            SerializerValue::Double(d) => *d != 0.0,
            SerializerValue::String(s) => s == "true",
        }
    }

    pub fn get_string(&self) -> String {
        match self {
            SerializerValue::Undefined => String::new(),
            SerializerValue::Bool(b) => b.to_string(),
            SerializerValue::Int(i) => i.to_string(),
            SerializerValue::Double(d) => d.to_string(),
            SerializerValue::String(s) => s.clone(),
        }
    }

    /// Doubles are truncated toward zero (saturating); text is read from its
    /// leading integer, so `"12px"` gives `12` and `"abc"` gives `0`.
    pub fn get_int(&self) -> i32 {
        match self {
            SerializerValue::Undefined => 0,
            SerializerValue::Bool(b) => i32::from(*b),
            SerializerValue::Int(i) => *i,
            SerializerValue::Double(d) => *d as i32,
            SerializerValue::String(s) => parse_leading_int(s),
        }
    }

    pub fn get_double(&self) -> f64 {
        match self {
            SerializerValue::Undefined => 0.0,
            SerializerValue::Bool(b) => f64::from(u8::from(*b)),
            SerializerValue::Int(i) => f64::from(*i),
            SerializerValue::Double(d) => *d,
            SerializerValue::String(s) => parse_leading_double(s),
        }
    }

    /// Name of the stored type, for diagnostics.
    pub fn type_name(&self) -> &'static str {
        match self {
            SerializerValue::Undefined => "undefined",
            SerializerValue::Bool(_) => "boolean",
            SerializerValue::Int(_) => "integer",
            SerializerValue::Double(_) => "double",
            SerializerValue::String(_) => "string",
        }
    }
}

impl fmt::Display for SerializerValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.get_string())
    }
}

impl From<bool> for SerializerValue {
    fn from(value: bool) -> Self {
        SerializerValue::Bool(value)
    }
}

impl From<i32> for SerializerValue {
    fn from(value: i32) -> Self {
        SerializerValue::Int(value)
    }
}

impl From<f64> for SerializerValue {
    fn from(value: f64) -> Self {
        SerializerValue::Double(value)
    }
}

impl From<&str> for SerializerValue {
    fn from(value: &str) -> Self {
        SerializerValue::String(value.to_string())
    }
}

impl From<String> for SerializerValue {
    fn from(value: String) -> Self {
        SerializerValue::String(value)
    }
}

/// End of the ASCII digit run starting at `start`.
fn digits_end(bytes: &[u8], start: usize) -> usize {
    let mut end = start;
    while end < bytes.len() && bytes[end].is_ascii_digit() {
        end += 1;
    }
    end
}

fn sign_end(bytes: &[u8]) -> usize {
    match bytes.first() {
        Some(b'+') | Some(b'-') => 1,
        _ => 0,
    }
}

fn parse_leading_int(text: &str) -> i32 {
    let text = text.trim_start();
    let bytes = text.as_bytes();
    let end = digits_end(bytes, sign_end(bytes));
    text[..end].parse::<i64>().map_or(0, |n| {
        n.clamp(i64::from(i32::MIN), i64::from(i32::MAX)) as i32
    })
}

fn parse_leading_double(text: &str) -> f64 {
    let text = text.trim_start();
    let bytes = text.as_bytes();
    let int_start = sign_end(bytes);
    let mut end = digits_end(bytes, int_start);
    let mut has_digits = end > int_start;
    if end < bytes.len() && bytes[end] == b'.' {
        let frac_end = digits_end(bytes, end + 1);
        has_digits |= frac_end > end + 1;
        end = frac_end;
    }
    if !has_digits {
        return 0.0;
    }
    if end < bytes.len() && (bytes[end] == b'e' || bytes[end] == b'E') {
        let exp_start = end + 1 + sign_end(&bytes[end + 1..]);
        let exp_end = digits_end(bytes, exp_start);
        if exp_end > exp_start {
            end = exp_end;
        }
    }
    text[..end].parse::<f64>().unwrap_or(0.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn undefined_reads_as_zero_values() {
        let v = SerializerValue::default();
        assert!(v.is_undefined());
        assert!(!v.get_bool());
        assert_eq!(v.get_int(), 0);
        assert_eq!(v.get_double(), 0.0);
        assert_eq!(v.get_string(), "");
    }

    #[test]
    fn setters_replace_type() {
        let mut v = SerializerValue::from(3);
        assert!(v.is_int());
        v.set_string("x");
        assert!(v.is_string());
        v.set_double(1.5);
        assert!(v.is_double());
        v.set_bool(true);
        assert!(v.is_bool());
        assert_eq!(v.type_name(), "boolean");
    }

    #[test]
    fn bool_coercion() {
        assert!(SerializerValue::from("true").get_bool());
        assert!(!SerializerValue::from("1").get_bool());
        assert!(SerializerValue::from(-2).get_bool());
        assert!(!SerializerValue::from(0.0).get_bool());
    }

    #[test]
    fn string_coercion() {
        assert_eq!(SerializerValue::from(true).get_string(), "true");
        assert_eq!(SerializerValue::from(-17).get_string(), "-17");
        assert_eq!(SerializerValue::from(2.5).get_string(), "2.5");
        assert_eq!(SerializerValue::from(3.0).get_string(), "3");
    }

    #[test]
    fn int_coercion() {
        assert_eq!(SerializerValue::from(true).get_int(), 1);
        assert_eq!(SerializerValue::from(-3.9).get_int(), -3);
        assert_eq!(SerializerValue::from(1e12).get_int(), i32::MAX);
        assert_eq!(SerializerValue::from("  42").get_int(), 42);
        assert_eq!(SerializerValue::from("12px").get_int(), 12);
        assert_eq!(SerializerValue::from("3.7").get_int(), 3);
        assert_eq!(SerializerValue::from("abc").get_int(), 0);
        assert_eq!(SerializerValue::from("99999999999").get_int(), i32::MAX);
    }

    #[test]
    fn double_coercion() {
        assert_eq!(SerializerValue::from(false).get_double(), 0.0);
        assert_eq!(SerializerValue::from(7).get_double(), 7.0);
        assert_eq!(SerializerValue::from("-1.25e2x").get_double(), -125.0);
        assert_eq!(SerializerValue::from(".5").get_double(), 0.5);
        assert_eq!(SerializerValue::from("4e").get_double(), 4.0);
        assert_eq!(SerializerValue::from("-").get_double(), 0.0);
    }
}

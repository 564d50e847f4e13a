use std::fmt;

/// A scalar substituted into a template variable.
#[non_exhaustive]
#[derive(Clone, Debug, PartialEq)]
pub enum TemplateValue {
    String(String),
    Integer(i64),
    /// Rendered like `1.0`, `0.0001`, `1.0e+20`, `1.0e-05`, `Infinity`, `NaN`: the shortest
    /// round-trip digits, always with a fractional part, switching to exponent form below
    /// `1e-4` and from `1e16` on.
    Float(f64),
    Boolean(bool),
}

impl fmt::Display for TemplateValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TemplateValue::String(value) => f.write_str(value),
            TemplateValue::Integer(value) => write!(f, "{value}"),
            TemplateValue::Float(value) => f.write_str(&format_float(*value)),
            TemplateValue::Boolean(value) => write!(f, "{value}"),
        }
    }
}

fn format_float(value: f64) -> String {
    if value.is_nan() {
        return "NaN".to_owned();
    }
    if value.is_infinite() {
        return if value.is_sign_negative() { "-Infinity" } else { "Infinity" }.to_owned();
    }

    // `{:e}` yields the shortest round-trip digits, e.g. `-1.2345e-5`.
    let scientific = format!("{value:e}");
    let (sign, unsigned) = match scientific.strip_prefix('-') {
        Some(rest) => ("-", rest),
        None => ("", scientific.as_str()),
    };
    let (mantissa, exponent) = unsigned.split_once('e').unwrap_or((unsigned, "0"));
    let digits: String = mantissa.chars().filter(char::is_ascii_digit).collect();
    let exponent: i32 = exponent.parse().unwrap_or(0);
    let point = exponent + 1;

    let body = if !(-3..=16).contains(&point) {
        let (first, rest) = digits.split_at(1);
        let rest = if rest.is_empty() { "0" } else { rest };
        format!("{first}.{rest}e{:+03}", point - 1)
    } else if point <= 0 {
        let zeros = "0".repeat(usize::try_from(-point).unwrap_or(0));
        format!("0.{zeros}{digits}")
    } else {
        let point = usize::try_from(point).unwrap_or(0);
        if point >= digits.len() {
            format!("{digits}{}.0", "0".repeat(point - digits.len()))
        } else {
            let (whole, fraction) = digits.split_at(point);
            format!("{whole}.{fraction}")
        }
    };

    format!("{sign}{body}")
}

impl From<&str> for TemplateValue {
    fn from(value: &str) -> Self {
        TemplateValue::String(value.to_owned())
    }
}

impl From<String> for TemplateValue {
    fn from(value: String) -> Self {
        TemplateValue::String(value)
    }
}

impl From<i64> for TemplateValue {
    fn from(value: i64) -> Self {
        TemplateValue::Integer(value)
    }
}

impl From<i32> for TemplateValue {
    fn from(value: i32) -> Self {
        TemplateValue::Integer(value.into())
    }
}

impl From<u32> for TemplateValue {
    fn from(value: u32) -> Self {
        TemplateValue::Integer(value.into())
    }
}

impl From<f64> for TemplateValue {
    fn from(value: f64) -> Self {
        TemplateValue::Float(value)
    }
}

impl From<bool> for TemplateValue {
    fn from(value: bool) -> Self {
        TemplateValue::Boolean(value)
    }
}

/// Template variable substitutions, kept in insertion order.
///
/// The order is significant: it is the order of the query parameters in a signed URL and
/// therefore part of the signed payload. Inserting an existing name replaces its value without
/// moving it.
#[non_exhaustive]
#[derive(Clone, Debug, Default, PartialEq)]
pub struct TemplateValues {
    entries: Vec<(String, TemplateValue)>,
}

impl TemplateValues {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert<K, V>(&mut self, name: K, value: V)
    where
        K: Into<String>,
        V: Into<TemplateValue>,
    {
        let name = name.into();
        let value = value.into();
        match self.entries.iter_mut().find(|(existing, _)| *existing == name) {
            Some((_, slot)) => *slot = value,
            None => self.entries.push((name, value)),
        }
    }

    /// Chaining form of [`TemplateValues::insert`].
    #[must_use]
    pub fn with<K, V>(mut self, name: K, value: V) -> Self
    where
        K: Into<String>,
        V: Into<TemplateValue>,
    {
        self.insert(name, value);
        self
    }

    #[must_use]
    pub fn get(&self, name: &str) -> Option<&TemplateValue> {
        self.entries
            .iter()
            .find(|(existing, _)| existing == name)
            .map(|(_, value)| value)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &TemplateValue)> {
        self.entries
            .iter()
            .map(|(name, value)| (name.as_str(), value))
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl<K, V> FromIterator<(K, V)> for TemplateValues
where
    K: Into<String>,
    V: Into<TemplateValue>,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut values = TemplateValues::new();
        for (name, value) in iter {
            values.insert(name, value);
        }
        values
    }
}

impl<K, V, const N: usize> From<[(K, V); N]> for TemplateValues
where
    K: Into<String>,
    V: Into<TemplateValue>,
{
    fn from(entries: [(K, V); N]) -> Self {
        entries.into_iter().collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn keeps_insertion_order() {
        let values = TemplateValues::new()
            .with("zeta", "last letter")
            .with("alpha", 1)
            .with("mid", true);

        let names: Vec<&str> = values.iter().map(|(name, _)| name).collect();
        assert_eq!(names, ["zeta", "alpha", "mid"], "no sorting");
    }

    #[test]
    fn reinsert_replaces_in_place() {
        let mut values = TemplateValues::from([("a", "1"), ("b", "2")]);
        values.insert("a", "3");

        assert_eq!(values.len(), 2, "no duplicate entry");
        let first = values.iter().next().expect("first entry");
        assert_eq!(first, ("a", &TemplateValue::from("3")), "position kept");
    }

    #[test]
    fn renders_scalars() {
        assert_eq!(TemplateValue::from("x y").to_string(), "x y", "string");
        assert_eq!(TemplateValue::from(-42_i64).to_string(), "-42", "integer");
        assert_eq!(TemplateValue::from(2.5).to_string(), "2.5", "float");
        assert_eq!(TemplateValue::from(1.0).to_string(), "1.0", "integral float");
        assert_eq!(TemplateValue::from(false).to_string(), "false", "boolean");
    }

    #[test]
    fn renders_float_edges() {
        let cases = [
            (0.0, "0.0"),
            (-0.0, "-0.0"),
            (-1.5, "-1.5"),
            (123.456, "123.456"),
            (0.0001, "0.0001"),
            (1e-5, "1.0e-05"),
            (1.25e-7, "1.25e-07"),
            (1e15, "1000000000000000.0"),
            (1e16, "1.0e+16"),
            (1e20, "1.0e+20"),
            (-2.5e100, "-2.5e+100"),
            (f64::INFINITY, "Infinity"),
            (f64::NEG_INFINITY, "-Infinity"),
            (f64::NAN, "NaN"),
        ];

        for (value, expected) in cases {
            assert_eq!(TemplateValue::from(value).to_string(), expected, "{value:?}");
        }
    }
}

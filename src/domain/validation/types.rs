use serde::{Deserialize, Serialize};
use std::fmt;

/// Location inside a configuration document, one segment per key
///
/// Serializes as the list of segments, so keys containing dots survive a
/// round trip.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ConfigPath(Vec<String>);

impl ConfigPath {
    pub fn root() -> Self {
        Self(Vec::new())
    }

    pub fn child(&self, segment: impl Into<String>) -> Self {
        let mut segments = self.0.clone();
        segments.push(segment.into());
        Self(segments)
    }

    pub fn is_root(&self) -> bool {
        self.0.is_empty()
    }

    pub fn segments(&self) -> &[String] {
        &self.0
    }
}

impl fmt::Display for ConfigPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.0.is_empty() {
            write!(f, "<root>")
        } else {
            write!(f, "{}", self.0.join("."))
        }
    }
}

impl FromIterator<String> for ConfigPath {
    fn from_iter<I: IntoIterator<Item = String>>(segments: I) -> Self {
        Self(segments.into_iter().collect())
    }
}

/// Splits on dots; build paths with [`ConfigPath::child`] when a key may
/// itself contain a dot
impl From<&str> for ConfigPath {
    fn from(path: &str) -> Self {
        path.split('.')
            .filter(|s| !s.is_empty())
            .map(str::to_string)
            .collect()
    }
}

/// Category of a failed rule
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ValidationErrorKind {
    MissingRequiredField,
    TypeMismatch,
    MutualExclusivityViolation,
    ConditionalRequirementViolation,
    OutOfRangeValue,
    InvalidEnumValue,
    UnrecognizedKey,
    EmptyValue,
}

/// One violated rule, located by its path
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidationError {
    pub path: ConfigPath,
    pub kind: ValidationErrorKind,
    pub message: String,
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.kind {
            // these messages already name their location
            ValidationErrorKind::MissingRequiredField
            | ValidationErrorKind::TypeMismatch
            | ValidationErrorKind::EmptyValue
            | ValidationErrorKind::UnrecognizedKey => write!(f, "{}", self.message),
            _ => write!(f, "{}: {}", self.path, self.message),
        }
    }
}

impl std::error::Error for ValidationError {}

impl ValidationError {
    pub fn new(path: ConfigPath, kind: ValidationErrorKind, message: impl Into<String>) -> Self {
        Self {
            path,
            kind,
            message: message.into(),
        }
    }

    pub fn missing(path: ConfigPath) -> Self {
        let message = format!("missing required key at {path}");
        Self::new(path, ValidationErrorKind::MissingRequiredField, message)
    }

    pub fn wrong_type(path: ConfigPath, expected: impl fmt::Display) -> Self {
        let message = format!("wrong type at {path}: expected {expected}");
        Self::new(path, ValidationErrorKind::TypeMismatch, message)
    }

    pub fn empty(path: ConfigPath) -> Self {
        let message = format!("value at {path} cannot be empty");
        Self::new(path, ValidationErrorKind::EmptyValue, message)
    }

    pub fn unrecognized(parent: &ConfigPath, key: &str) -> Self {
        Self::new(
            parent.child(key),
            ValidationErrorKind::UnrecognizedKey,
            format!("unrecognized key \"{key}\" under {parent}"),
        )
    }

    pub fn not_in_set(path: ConfigPath, allowed: &[String]) -> Self {
        Self::new(
            path,
            ValidationErrorKind::InvalidEnumValue,
            format!("value not in allowed set {{{}}}", allowed.join(", ")),
        )
    }

    pub fn only_one_of(path: ConfigPath, members: &[&str]) -> Self {
        Self::new(
            path,
            ValidationErrorKind::MutualExclusivityViolation,
            format!("only one of {{{}}} may be enabled", members.join(", ")),
        )
    }

    pub fn dependent_required(path: ConfigPath, mechanism: &str) -> Self {
        Self::new(
            path,
            ValidationErrorKind::ConditionalRequirementViolation,
            format!("dependent identifier required when {mechanism} is enabled"),
        )
    }

    pub fn below_minimum(path: ConfigPath, minimum: i64) -> Self {
        Self::new(
            path,
            ValidationErrorKind::OutOfRangeValue,
            format!("value below minimum {minimum}"),
        )
    }
}

/// Every violation collected from one validation run; never empty
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct ValidationErrors(Vec<ValidationError>);

impl ValidationErrors {
    /// Wrap collected errors, `None` when nothing failed
    pub fn from_vec(errors: Vec<ValidationError>) -> Option<Self> {
        if errors.is_empty() {
            None
        } else {
            Some(Self(errors))
        }
    }

    pub fn single(error: ValidationError) -> Self {
        Self(vec![error])
    }

    pub fn errors(&self) -> &[ValidationError] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, ValidationError> {
        self.0.iter()
    }

    pub fn into_vec(self) -> Vec<ValidationError> {
        self.0
    }

    /// Errors reported at exactly `path`
    pub fn at<'a>(&'a self, path: &'a str) -> impl Iterator<Item = &'a ValidationError> + 'a {
        let path = ConfigPath::from(path);
        self.0.iter().filter(move |e| e.path == path)
    }

    pub fn has_kind(&self, kind: ValidationErrorKind) -> bool {
        self.0.iter().any(|e| e.kind == kind)
    }
}

impl fmt::Display for ValidationErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, error) in self.0.iter().enumerate() {
            if i > 0 {
                writeln!(f)?;
            }
            write!(f, "{error}")?;
        }
        Ok(())
    }
}

impl std::error::Error for ValidationErrors {}

impl<'a> IntoIterator for &'a ValidationErrors {
    type Item = &'a ValidationError;
    type IntoIter = std::slice::Iter<'a, ValidationError>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

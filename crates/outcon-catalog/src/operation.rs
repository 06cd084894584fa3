//! Operations and their formal parameters

use outcon_types::{ResolvedType, ReturnTypeSpec, TypeCategory};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Category accepted by a formal parameter
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ParamCategory {
    /// Accepts every category
    Any,
    /// Accepts one category; `Numeric` also accepts `Integer`
    Of(TypeCategory),
}

impl ParamCategory {
    /// Check if an argument of this resolved type can be passed
    pub fn accepts(&self, resolved: &ResolvedType) -> bool {
        match self {
            Self::Any => true,
            Self::Of(TypeCategory::Numeric) => resolved.category().is_numeric(),
            Self::Of(category) => resolved.category() == *category,
        }
    }

    /// Check if arguments for this parameter can have an entry category,
    /// i.e. be an array, list, range or map
    pub fn admits_entries(&self) -> bool {
        match self {
            Self::Any => true,
            Self::Of(category) => category.has_element() || *category == TypeCategory::Map,
        }
    }
}

impl From<TypeCategory> for ParamCategory {
    fn from(category: TypeCategory) -> Self {
        Self::Of(category)
    }
}

impl fmt::Display for ParamCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Any => f.write_str("ANY"),
            Self::Of(category) => write!(f, "{}", category),
        }
    }
}

/// An operation under test
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Operation {
    /// Unique operation name
    pub name: String,
    /// Formal parameters, by position
    #[serde(default)]
    pub params: Vec<ParamCategory>,
    /// How the result type is computed
    #[serde(rename = "returns")]
    pub return_spec: ReturnTypeSpec,
    /// SQL rendering pattern, `$` marks each argument in order
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pattern: Option<String>,
}

impl Operation {
    /// Create a new operation rendered as a function call
    pub fn new(
        name: impl Into<String>,
        params: impl IntoIterator<Item = ParamCategory>,
        return_spec: ReturnTypeSpec,
    ) -> Self {
        Self {
            name: name.into(),
            params: params.into_iter().collect(),
            return_spec,
            pattern: None,
        }
    }

    /// Set the SQL rendering pattern
    pub fn with_pattern(mut self, pattern: impl Into<String>) -> Self {
        self.pattern = Some(pattern.into());
        self
    }

    pub fn arity(&self) -> usize {
        self.params.len()
    }

    /// Check if `resolved` may be passed at argument position `index`
    pub fn accepts_argument(&self, index: usize, resolved: &ResolvedType) -> bool {
        self.params
            .get(index)
            .is_some_and(|param| param.accepts(resolved))
    }

    /// Number of `$` argument markers in the pattern, if there is one
    pub fn placeholder_count(&self) -> Option<usize> {
        self.pattern
            .as_deref()
            .map(|pattern| pattern.matches('$').count())
    }

    /// Check if the rendered text is self-delimiting, like `NAME(...)` or
    /// `ARRAY[...]`, so it never needs parentheses when nested
    pub fn renders_as_call(&self) -> bool {
        let Some(pattern) = &self.pattern else {
            return true;
        };
        let Some(open) = pattern.find(['(', '[']) else {
            return false;
        };
        let head = &pattern[..open];
        if head.is_empty() || !head.chars().all(|ch| ch.is_ascii_alphanumeric() || ch == '_') {
            return false;
        }

        let mut depth = 0usize;
        for (pos, ch) in pattern[open..].char_indices() {
            match ch {
                '(' | '[' => depth += 1,
                ')' | ']' => {
                    depth = depth.saturating_sub(1);
                    if depth == 0 {
                        return open + pos + ch.len_utf8() == pattern.len();
                    }
                }
                _ => {}
            }
        }
        false
    }

    /// Render a call with already-rendered argument texts
    pub fn render(&self, args: &[String]) -> String {
        let Some(pattern) = &self.pattern else {
            return format!("{}({})", self.name.to_uppercase(), args.join(", "));
        };

        let mut out =
            String::with_capacity(pattern.len() + args.iter().map(String::len).sum::<usize>());
        let mut args = args.iter().peekable();
        for ch in pattern.chars() {
            match (ch, args.next_if(|_| ch == '$')) {
                (_, Some(arg)) => out.push_str(arg),
                (ch, None) => out.push(ch),
            }
        }
        out
    }

    /// One-line signature, e.g. `map_build(TEXT, ANY) -> MAP<$1>`
    pub fn signature(&self) -> String {
        let params: Vec<String> = self.params.iter().map(ToString::to_string).collect();
        format!("{}({}) -> {}", self.name, params.join(", "), self.return_spec)
    }
}

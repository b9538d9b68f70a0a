//! Enum-typed parameter slots that also accept raw wire tokens.

use std::str::FromStr;

use strum::VariantNames;

/// An enumeration that has a fixed set of wire tokens.
///
/// Blanket-implemented for every enum deriving `strum`'s `AsRefStr`,
/// `EnumString` and `VariantNames`.
pub trait WireEnum: Copy + AsRef<str> + FromStr + VariantNames {}

impl<T: Copy + AsRef<str> + FromStr + VariantNames> WireEnum for T {}

/// Value of an enum parameter: a typed variant or an unchecked token.
///
/// Tokens are resolved during parameter validation, so an unknown token is
/// reported as a [`ValueError`](crate::error::ValueError) before any request
/// is sent.
///
/// ## Examples
///
/// ```rust
/// use taginfo::{Choice, ObjectType};
///
/// let typed: Choice<ObjectType> = ObjectType::Ways.into();
/// assert_eq!(typed.resolve(), Some(ObjectType::Ways));
///
/// let token = Choice::<ObjectType>::token("nodes");
/// assert_eq!(token.resolve(), Some(ObjectType::Nodes));
///
/// assert_eq!(Choice::<ObjectType>::token("yes").resolve(), None);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Choice<E> {
    /// A known variant.
    Variant(E),
    /// A raw token, checked when the parameters are validated.
    Token(String),
}

impl<E: WireEnum> Choice<E> {
    /// Wraps a raw wire token.
    pub fn token(token: impl Into<String>) -> Self {
        Self::Token(token.into())
    }

    /// Returns the variant, parsing the token if necessary.
    pub fn resolve(&self) -> Option<E> {
        match self {
            Self::Variant(v) => Some(*v),
            Self::Token(t) => t.parse().ok(),
        }
    }
}

impl<E> From<E> for Choice<E> {
    fn from(value: E) -> Self {
        Self::Variant(value)
    }
}

impl<E: Default> Default for Choice<E> {
    fn default() -> Self {
        Self::Variant(E::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::SortOrder;

    #[test]
    fn test_default_is_default_variant() {
        let choice: Choice<SortOrder> = Choice::default();
        assert_eq!(choice, Choice::Variant(SortOrder::Asc));
    }

    #[test]
    fn test_token_is_case_sensitive() {
        assert_eq!(Choice::<SortOrder>::token("desc").resolve(), Some(SortOrder::Desc));
        assert_eq!(Choice::<SortOrder>::token("DESC").resolve(), None);
        assert_eq!(Choice::<SortOrder>::token(" desc").resolve(), None);
    }
}

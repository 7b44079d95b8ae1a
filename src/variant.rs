//! Text normalization variants and the fixed three-slot container keyed by
//! them.
//!
//! Every token is indexed under three normalized forms at once. All
//! per-variant state lives in a [`PerVariant`] struct-of-three, so variant
//! selection is plain field access rather than a lookup by name.

use serde::{Deserialize, Serialize};

/// One of the three normalization forms a token is indexed under.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Variant {
    /// The surface form as it appeared in the source text.
    Original,
    /// The suffix-stripped form.
    Stemmed,
    /// The dictionary base form.
    Lemmatized,
}

impl Variant {
    /// All variants, in a fixed order.
    pub const ALL: [Variant; 3] = [Variant::Original, Variant::Stemmed, Variant::Lemmatized];

    /// Short lowercase name, used in diagnostics.
    pub fn as_str(&self) -> &'static str {
        match self {
            Variant::Original => "original",
            Variant::Stemmed => "stemmed",
            Variant::Lemmatized => "lemmatized",
        }
    }
}

impl std::fmt::Display for Variant {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A value per normalization variant.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PerVariant<T> {
    pub original: T,
    pub stemmed: T,
    pub lemmatized: T,
}

impl<T> PerVariant<T> {
    /// Create from explicit slot values.
    pub fn new(original: T, stemmed: T, lemmatized: T) -> Self {
        Self {
            original,
            stemmed,
            lemmatized,
        }
    }

    /// Create by calling `f` once per variant.
    pub fn from_fn(mut f: impl FnMut(Variant) -> T) -> Self {
        Self {
            original: f(Variant::Original),
            stemmed: f(Variant::Stemmed),
            lemmatized: f(Variant::Lemmatized),
        }
    }

    /// The slot for `variant`.
    pub fn get(&self, variant: Variant) -> &T {
        match variant {
            Variant::Original => &self.original,
            Variant::Stemmed => &self.stemmed,
            Variant::Lemmatized => &self.lemmatized,
        }
    }

    /// Mutable access to the slot for `variant`.
    pub fn get_mut(&mut self, variant: Variant) -> &mut T {
        match variant {
            Variant::Original => &mut self.original,
            Variant::Stemmed => &mut self.stemmed,
            Variant::Lemmatized => &mut self.lemmatized,
        }
    }

    /// Transform every slot, keeping the variant association.
    pub fn map<U>(self, mut f: impl FnMut(Variant, T) -> U) -> PerVariant<U> {
        PerVariant {
            original: f(Variant::Original, self.original),
            stemmed: f(Variant::Stemmed, self.stemmed),
            lemmatized: f(Variant::Lemmatized, self.lemmatized),
        }
    }

    /// Iterate `(variant, slot)` pairs in the fixed order.
    pub fn iter(&self) -> impl Iterator<Item = (Variant, &T)> {
        Variant::ALL.iter().map(move |&v| (v, self.get(v)))
    }
}

//! Closed catalogs of selectable values.
//!
//! Each catalog is a fixed enum whose short codes ("py", "rust", ...) are the
//! wire representation and whose labels are what a picker shows.

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;

pub trait Catalog: Copy + Eq + fmt::Debug + 'static {
    /// All values in catalog (display) order.
    const ALL: &'static [Self];
    /// Singular noun used in prompts, e.g. "language".
    const NOUN: &'static str;
    /// Form field name the list is stored under.
    const FIELD: &'static str;

    fn code(self) -> &'static str;
    fn label(self) -> &'static str;

    fn from_code(code: &str) -> Option<Self> {
        Self::ALL.iter().copied().find(|v| v.code() == code)
    }

    /// 標籤查詢不分大小寫，方便互動輸入 "Python" 或 "python"
    fn from_label(label: &str) -> Option<Self> {
        Self::ALL
            .iter()
            .copied()
            .find(|v| v.label().eq_ignore_ascii_case(label))
    }

    fn parse(input: &str) -> Option<Self> {
        Self::from_code(input).or_else(|| Self::from_label(input))
    }
}

/// One row of a picker: a catalog value plus whether it is the row's current choice.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Choice<V: Catalog> {
    pub value: V,
    pub selected: bool,
}

impl<V: Catalog> Choice<V> {
    pub fn label(&self) -> &'static str {
        self.value.label()
    }
}

macro_rules! catalog_enum {
    (
        $(#[$meta:meta])*
        $name:ident, noun = $noun:literal, field = $field:literal {
            $($variant:ident => ($code:literal, $label:literal)),+ $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
        pub enum $name {
            $($variant),+
        }

        impl Catalog for $name {
            const ALL: &'static [Self] = &[$($name::$variant),+];
            const NOUN: &'static str = $noun;
            const FIELD: &'static str = $field;

            fn code(self) -> &'static str {
                match self {
                    $($name::$variant => $code),+
                }
            }

            fn label(self) -> &'static str {
                match self {
                    $($name::$variant => $label),+
                }
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.label())
            }
        }

        impl Serialize for $name {
            fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
                serializer.serialize_str(self.code())
            }
        }

        impl<'de> Deserialize<'de> for $name {
            fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
                let code = String::deserialize(deserializer)?;
                <$name as Catalog>::from_code(&code).ok_or_else(|| {
                    serde::de::Error::custom(format!("unknown {} code: {}", $noun, code))
                })
            }
        }
    };
}

catalog_enum! {
    /// Programming languages offered by the survey.
    Language, noun = "language", field = "languages" {
        Python => ("py", "Python"),
        JavaScript => ("js", "JavaScript"),
        TypeScript => ("ts", "TypeScript"),
        C => ("c", "C"),
        Cpp => ("cpp", "C++"),
        Go => ("go", "Go"),
        Rust => ("rust", "Rust"),
    }
}

catalog_enum! {
    /// Web frameworks offered by the survey.
    Framework, noun = "framework", field = "frameworks" {
        Next => ("next", "NextJS"),
        Nuxt => ("nuxt", "NuxtJS"),
        React => ("react", "React"),
        Svelte => ("svelte", "SvelteKit"),
        Angular => ("angular", "Angular"),
    }
}

//! String-backed enums shared with the server
//!
//! The server owns these vocabularies. Values the client does not know are kept
//! verbatim in `Other` so a newer server never breaks deserialization, while
//! `FromStr` (used for user input) only accepts the known spellings.

macro_rules! wire_enum {
    (
        $(#[$meta:meta])*
        $name:ident, $kind:literal {
            $($(#[$vmeta:meta])* $variant:ident => $wire:literal),+ $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
        #[serde(from = "String", into = "String")]
        pub enum $name {
            $($(#[$vmeta])* $variant,)+
            /// A value this client does not recognize
            Other(String),
        }

        impl $name {
            /// Wire spellings of the known variants
            pub const KNOWN: &'static [&'static str] = &[$($wire),+];

            pub fn as_str(&self) -> &str {
                match self {
                    $(Self::$variant => $wire,)+
                    Self::Other(value) => value.as_str(),
                }
            }

            pub fn is_known(&self) -> bool {
                !matches!(self, Self::Other(_))
            }
        }

        impl From<String> for $name {
            fn from(value: String) -> Self {
                match value.as_str() {
                    $($wire => Self::$variant,)+
                    _ => Self::Other(value),
                }
            }
        }

        impl From<$name> for String {
            fn from(value: $name) -> String {
                value.as_str().to_string()
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                f.write_str(self.as_str())
            }
        }

        impl std::str::FromStr for $name {
            type Err = $crate::Error;

            fn from_str(s: &str) -> $crate::Result<Self> {
                let normalized = s.trim().to_lowercase();
                match normalized.as_str() {
                    $($wire => Ok(Self::$variant),)+
                    _ => Err($crate::Error::UnknownVariant {
                        kind: $kind,
                        value: s.to_string(),
                        expected: Self::KNOWN.join(", "),
                    }),
                }
            }
        }
    };
}

/// A closed set of options with stable string codes.
///
/// Codes are what gets persisted and what the host sends when it sets a
/// value from raw text. Labels are for display only.
pub trait Choice: Copy + Sized + 'static {
    fn code(self) -> &'static str;
    fn from_code(code: &str) -> Option<Self>;
    fn options() -> &'static [Self];

    /// Comma-separated list of every code, for error messages.
    fn option_list() -> String {
        Self::options()
            .iter()
            .map(|option| option.code())
            .collect::<Vec<_>>()
            .join(", ")
    }
}

/// Declares a [`Choice`] enum together with its codes and labels.
///
/// The serde representation of each variant is its code, so persisted
/// JSON and `parse` always agree.
macro_rules! choice_enum {
    (
        $(#[$meta:meta])*
        $name:ident {
            $( $variant:ident => ($code:literal, $label:literal) ),+ $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(
            Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord,
            ::serde::Serialize, ::serde::Deserialize,
        )]
        pub enum $name {
            $( #[serde(rename = $code)] $variant, )+
        }

        impl $name {
            pub const ALL: &'static [$name] = &[$($name::$variant),+];

            pub fn as_str(&self) -> &'static str {
                match self {
                    $( Self::$variant => $code, )+
                }
            }

            pub fn label(&self) -> &'static str {
                match self {
                    $( Self::$variant => $label, )+
                }
            }

            pub fn parse(s: &str) -> Option<Self> {
                match s {
                    $( $code => Some(Self::$variant), )+
                    _ => None,
                }
            }
        }

        impl $crate::models::Choice for $name {
            fn code(self) -> &'static str {
                self.as_str()
            }

            fn from_code(code: &str) -> Option<Self> {
                Self::parse(code)
            }

            fn options() -> &'static [Self] {
                Self::ALL
            }
        }

        impl ::std::fmt::Display for $name {
            fn fmt(&self, f: &mut ::std::fmt::Formatter<'_>) -> ::std::fmt::Result {
                f.write_str(self.label())
            }
        }
    };
}

pub(crate) use choice_enum;

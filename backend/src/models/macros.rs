/// Defines a newtype ID wrapper around an integer primary key and generates
/// the derives, `Display`, `FromStr` and conversions to and from the inner type.
///
/// Usage:
///   define_id_type!(i64, ForecastId);
#[macro_export]
macro_rules! define_id_type {
    ($inner:ty, $name:ident) => {
        #[derive(
            Debug,
            Copy,
            Clone,
            PartialEq,
            Eq,
            PartialOrd,
            Ord,
            Hash,
            serde::Serialize,
            serde::Deserialize,
        )]
        #[serde(transparent)]
        pub struct $name(pub $inner);

        impl ::std::fmt::Display for $name {
            fn fmt(&self, f: &mut ::std::fmt::Formatter<'_>) -> ::std::fmt::Result {
                ::std::write!(f, "{}", self.0)
            }
        }

        impl ::std::str::FromStr for $name {
            type Err = <$inner as ::std::str::FromStr>::Err;

            fn from_str(s: &str) -> ::std::result::Result<Self, Self::Err> {
                s.trim().parse::<$inner>().map($name)
            }
        }

        impl ::std::convert::From<$inner> for $name {
            fn from(v: $inner) -> Self {
                $name(v)
            }
        }

        impl ::std::convert::From<$name> for $inner {
            fn from(v: $name) -> Self {
                v.0
            }
        }

        impl $name {
            pub fn new(value: $inner) -> Self {
                $name(value)
            }

            pub fn value(&self) -> $inner {
                self.0
            }
        }
    };
}

/// Defines a closed 1..=5 rating scale as a `u8`-backed enum.
///
/// The generated type serializes as its integer value, rejects anything outside
/// the declared variants on deserialization, and offers `value`, `label`,
/// `from_value` and the ordered `ALL` slice. `$err` names the
/// [`ValidationError`](crate::models::ValidationError) variant reported for
/// out-of-range input.
///
/// Usage:
///   define_rating_scale!(SizeLevel, SizeOutOfRange { Small = 1 => "Small", ... });
#[macro_export]
macro_rules! define_rating_scale {
    (
        $(#[$meta:meta])*
        $name:ident, $err:ident {
            $($(#[$vmeta:meta])* $variant:ident = $value:literal => $label:literal),+ $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(
            Debug,
            Copy,
            Clone,
            PartialEq,
            Eq,
            PartialOrd,
            Ord,
            Hash,
            serde::Serialize,
            serde::Deserialize,
        )]
        #[serde(try_from = "u8", into = "u8")]
        #[repr(u8)]
        pub enum $name {
            $($(#[$vmeta])* $variant = $value),+
        }

        impl $name {
            /// Every level, lowest first.
            pub const ALL: &'static [$name] = &[$($name::$variant),+];

            /// Numeric value of the level.
            pub fn value(self) -> u8 {
                self as u8
            }

            /// Human-readable label.
            pub fn label(self) -> &'static str {
                match self {
                    $($name::$variant => $label),+
                }
            }

            /// Parse a raw integer, rejecting values outside the scale.
            pub fn from_value(
                value: i64,
            ) -> ::std::result::Result<Self, $crate::models::ValidationError> {
                match value {
                    $($value => Ok($name::$variant),)+
                    other => Err($crate::models::ValidationError::$err(other)),
                }
            }
        }

        impl ::std::convert::TryFrom<u8> for $name {
            type Error = $crate::models::ValidationError;

            fn try_from(value: u8) -> ::std::result::Result<Self, Self::Error> {
                $name::from_value(i64::from(value))
            }
        }

        impl ::std::convert::From<$name> for u8 {
            fn from(level: $name) -> u8 {
                level as u8
            }
        }

        impl ::std::fmt::Display for $name {
            fn fmt(&self, f: &mut ::std::fmt::Formatter<'_>) -> ::std::fmt::Result {
                f.write_str(self.label())
            }
        }
    };
}

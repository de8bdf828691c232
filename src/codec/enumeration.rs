//! Protobuf enums.
//!
//! Enums are `int32` varints on the wire. Message fields keep the raw `i32`
//! so values added by a newer schema survive a decode/encode round trip, and
//! expose the typed value through [`ProtoEnum::from_i32`].

/// A closed Rust enum mirroring a protobuf enum.
pub trait ProtoEnum: Sized + Copy {
    /// Returns the variant for `value`, or `None` if it's not one we know.
    fn from_i32(value: i32) -> Option<Self>;

    fn to_i32(self) -> i32;
}

/// Declares a protobuf enum and implements [`ProtoEnum`] for it.
///
/// The first variant must be the zero value, it is also the `Default`.
macro_rules! proto_enum {
    (
        $(#[$meta:meta])*
        $vis:vis enum $name:ident {
            $(#[$first_meta:meta])*
            $first:ident = $first_value:literal,
            $(
                $(#[$variant_meta:meta])*
                $variant:ident = $value:literal
            ),* $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
        #[repr(i32)]
        $vis enum $name {
            $(#[$first_meta])*
            #[default]
            $first = $first_value,
            $(
                $(#[$variant_meta])*
                $variant = $value,
            )*
        }

        impl $crate::codec::ProtoEnum for $name {
            fn from_i32(value: i32) -> Option<Self> {
                match value {
                    $first_value => Some($name::$first),
                    $($value => Some($name::$variant),)*
                    _ => None,
                }
            }

            #[inline]
            #[allow(clippy::as_conversions)]
            fn to_i32(self) -> i32 {
                self as i32
            }
        }

        impl From<$name> for i32 {
            fn from(value: $name) -> i32 {
                $crate::codec::ProtoEnum::to_i32(value)
            }
        }
    };
}

pub(crate) use proto_enum;

#[cfg(test)]
mod tests {
    use super::*;

    proto_enum! {
        /// `enum Corpus { UNIVERSAL = 0; WEB = 1; NEWS = 5; }`
        enum Corpus {
            Universal = 0,
            Web = 1,
            /// Values don't have to be contiguous.
            News = 5,
        }
    }

    #[test]
    fn test_from_i32() {
        assert_eq!(Corpus::from_i32(0), Some(Corpus::Universal));
        assert_eq!(Corpus::from_i32(5), Some(Corpus::News));
        assert_eq!(Corpus::from_i32(2), None);
        assert_eq!(Corpus::from_i32(-1), None);
    }

    #[test]
    fn test_to_i32() {
        assert_eq!(Corpus::Web.to_i32(), 1);
        assert_eq!(i32::from(Corpus::News), 5);
        assert_eq!(Corpus::default(), Corpus::Universal);
    }
}

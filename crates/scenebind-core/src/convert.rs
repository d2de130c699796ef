//! Conversion traits for adapter argument extraction and result pushing.
//!
//! - [`FromDynamic`]: Extract a Rust value from a [`Dynamic`] slot
//! - [`IntoDynamic`]: Convert a Rust value into a [`Dynamic`] slot
//!
//! ## Supported Types
//!
//! - Integers: `i8`, `i16`, `i32`, `i64`, `u8`, `u16`, `u32`, `usize`
//! - Floats: `f32`, `f64` (integers widen to floats, like script numbers)
//! - `bool`, `String`
//! - [`ObjectHandle`] (`null` is rejected)

use crate::native_error::ConversionError;
use crate::runtime::{Dynamic, ObjectHandle};

/// Extract a value from a Dynamic slot.
pub trait FromDynamic: Sized {
    /// Extract a value from the given slot.
    ///
    /// Returns a `ConversionError` if the slot contains an incompatible type.
    fn from_dynamic(slot: &Dynamic) -> Result<Self, ConversionError>;
}

/// Convert a value into a Dynamic slot.
pub trait IntoDynamic {
    /// Convert this value into a Dynamic slot.
    fn into_dynamic(self) -> Dynamic;
}

// ============================================================================
// Integer implementations
// ============================================================================

macro_rules! impl_dynamic_int {
    ($($ty:ty),*) => {
        $(
            impl FromDynamic for $ty {
                fn from_dynamic(slot: &Dynamic) -> Result<Self, ConversionError> {
                    match slot {
                        Dynamic::Int(v) => <$ty>::try_from(*v).map_err(|_| {
                            ConversionError::IntegerOverflow {
                                value: *v,
                                target_type: stringify!($ty),
                            }
                        }),
                        _ => Err(ConversionError::TypeMismatch {
                            expected: "int",
                            actual: slot.type_name(),
                        }),
                    }
                }
            }

            impl IntoDynamic for $ty {
                fn into_dynamic(self) -> Dynamic {
                    Dynamic::Int(self as i64)
                }
            }
        )*
    };
}

impl_dynamic_int!(i8, i16, i32, i64, u8, u16, u32, usize);

// ============================================================================
// Float implementations
// ============================================================================

impl FromDynamic for f32 {
    fn from_dynamic(slot: &Dynamic) -> Result<Self, ConversionError> {
        match slot {
            Dynamic::Float(v) => {
                if !v.is_finite() || (*v <= f32::MAX as f64 && *v >= f32::MIN as f64) {
                    Ok(*v as f32)
                } else {
                    Err(ConversionError::FloatConversion {
                        value: *v,
                        target_type: "f32",
                    })
                }
            }
            Dynamic::Int(v) => Ok(*v as f32),
            _ => Err(ConversionError::TypeMismatch {
                expected: "float",
                actual: slot.type_name(),
            }),
        }
    }
}

impl IntoDynamic for f32 {
    fn into_dynamic(self) -> Dynamic {
        Dynamic::Float(self as f64)
    }
}

impl FromDynamic for f64 {
    fn from_dynamic(slot: &Dynamic) -> Result<Self, ConversionError> {
        match slot {
            Dynamic::Float(v) => Ok(*v),
            Dynamic::Int(v) => Ok(*v as f64),
            _ => Err(ConversionError::TypeMismatch {
                expected: "float",
                actual: slot.type_name(),
            }),
        }
    }
}

impl IntoDynamic for f64 {
    fn into_dynamic(self) -> Dynamic {
        Dynamic::Float(self)
    }
}

// ============================================================================
// Other implementations
// ============================================================================

impl FromDynamic for bool {
    fn from_dynamic(slot: &Dynamic) -> Result<Self, ConversionError> {
        match slot {
            Dynamic::Bool(v) => Ok(*v),
            _ => Err(ConversionError::TypeMismatch {
                expected: "bool",
                actual: slot.type_name(),
            }),
        }
    }
}

impl IntoDynamic for bool {
    fn into_dynamic(self) -> Dynamic {
        Dynamic::Bool(self)
    }
}

impl FromDynamic for String {
    fn from_dynamic(slot: &Dynamic) -> Result<Self, ConversionError> {
        match slot {
            Dynamic::String(s) => Ok(s.clone()),
            _ => Err(ConversionError::TypeMismatch {
                expected: "string",
                actual: slot.type_name(),
            }),
        }
    }
}

impl IntoDynamic for String {
    fn into_dynamic(self) -> Dynamic {
        Dynamic::String(self)
    }
}

impl IntoDynamic for &str {
    fn into_dynamic(self) -> Dynamic {
        Dynamic::String(self.to_string())
    }
}

impl FromDynamic for ObjectHandle {
    fn from_dynamic(slot: &Dynamic) -> Result<Self, ConversionError> {
        match slot {
            Dynamic::Object(handle) => Ok(*handle),
            Dynamic::Null => Err(ConversionError::NullHandle {
                target_type: "object",
            }),
            _ => Err(ConversionError::TypeMismatch {
                expected: "object",
                actual: slot.type_name(),
            }),
        }
    }
}

impl IntoDynamic for ObjectHandle {
    fn into_dynamic(self) -> Dynamic {
        Dynamic::Object(self)
    }
}

impl<T: IntoDynamic> IntoDynamic for Option<T> {
    fn into_dynamic(self) -> Dynamic {
        match self {
            Some(value) => value.into_dynamic(),
            None => Dynamic::Null,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::TypeHash;

    #[test]
    fn int_narrowing_checks_bounds() {
        assert_eq!(i8::from_dynamic(&Dynamic::Int(-128)), Ok(-128));
        assert!(matches!(
            i8::from_dynamic(&Dynamic::Int(200)),
            Err(ConversionError::IntegerOverflow { value: 200, .. })
        ));
        assert!(matches!(
            u32::from_dynamic(&Dynamic::Int(-1)),
            Err(ConversionError::IntegerOverflow { value: -1, .. })
        ));
    }

    #[test]
    fn int_rejects_float() {
        assert_eq!(
            i32::from_dynamic(&Dynamic::Float(1.5)),
            Err(ConversionError::TypeMismatch {
                expected: "int",
                actual: "float",
            })
        );
    }

    #[test]
    fn float_accepts_int() {
        assert_eq!(f64::from_dynamic(&Dynamic::Int(3)), Ok(3.0));
        assert_eq!(f32::from_dynamic(&Dynamic::Int(-2)), Ok(-2.0));
    }

    #[test]
    fn f32_rejects_out_of_range() {
        assert!(matches!(
            f32::from_dynamic(&Dynamic::Float(1e300)),
            Err(ConversionError::FloatConversion { .. })
        ));
        assert!(f32::from_dynamic(&Dynamic::Float(f64::INFINITY)).is_ok());
    }

    #[test]
    fn handle_rejects_null() {
        assert_eq!(
            ObjectHandle::from_dynamic(&Dynamic::Null),
            Err(ConversionError::NullHandle {
                target_type: "object"
            })
        );
        let handle = ObjectHandle::new(3, 1, TypeHash::from_name("Sprite"));
        assert_eq!(ObjectHandle::from_dynamic(&Dynamic::Object(handle)), Ok(handle));
    }

    #[test]
    fn option_into_dynamic() {
        assert_eq!(None::<i32>.into_dynamic(), Dynamic::Null);
        assert_eq!(Some(true).into_dynamic(), Dynamic::Bool(true));
    }
}

/// Runtime tag for the primitive element types a matrix can store.
///
/// The 8- and 16-bit integer widths are unsigned magnitudes; the 32- and
/// 64-bit widths are signed.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ElementType {
    /// 1-bit boolean.
    Bit,
    /// 8-bit unsigned magnitude.
    U8,
    /// 16-bit unsigned magnitude.
    U16,
    /// 32-bit signed integer.
    I32,
    /// 64-bit signed integer.
    I64,
    /// 32-bit floating point.
    F32,
    /// 64-bit floating point.
    F64,
}

impl std::fmt::Display for ElementType {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        let name = match self {
            ElementType::Bit => "bit",
            ElementType::U8 => "u8",
            ElementType::U16 => "u16",
            ElementType::I32 => "i32",
            ElementType::I64 => "i64",
            ElementType::F32 => "f32",
            ElementType::F64 => "f64",
        };
        write!(f, "{}", name)
    }
}

mod sealed {
    pub trait Sealed {}
}

/// Marker trait for the primitive element types supported by matrices.
///
/// The trait is sealed: only the seven primitive widths carried by
/// [`ElementType`] implement it, so an unsupported element type is
/// unrepresentable rather than a runtime error.
pub trait MatElement:
    Copy + Default + PartialOrd + Send + Sync + sealed::Sealed + 'static
{
    /// The runtime tag matching this type.
    const KIND: ElementType;
}

macro_rules! impl_mat_element {
    ($t:ty, $kind:expr) => {
        impl sealed::Sealed for $t {}
        impl MatElement for $t {
            const KIND: ElementType = $kind;
        }
    };
}

impl_mat_element!(bool, ElementType::Bit);
impl_mat_element!(u8, ElementType::U8);
impl_mat_element!(u16, ElementType::U16);
impl_mat_element!(i32, ElementType::I32);
impl_mat_element!(i64, ElementType::I64);
impl_mat_element!(f32, ElementType::F32);
impl_mat_element!(f64, ElementType::F64);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_element_kind_tags() {
        assert_eq!(<bool as MatElement>::KIND, ElementType::Bit);
        assert_eq!(<u8 as MatElement>::KIND, ElementType::U8);
        assert_eq!(<u16 as MatElement>::KIND, ElementType::U16);
        assert_eq!(<i32 as MatElement>::KIND, ElementType::I32);
        assert_eq!(<i64 as MatElement>::KIND, ElementType::I64);
        assert_eq!(<f32 as MatElement>::KIND, ElementType::F32);
        assert_eq!(<f64 as MatElement>::KIND, ElementType::F64);
    }

    #[test]
    fn test_element_type_display() {
        assert_eq!(ElementType::Bit.to_string(), "bit");
        assert_eq!(ElementType::F64.to_string(), "f64");
    }
}

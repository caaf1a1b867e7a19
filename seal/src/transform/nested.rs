use crate::{FieldEngine, TransformError};

/// A field value which is itself one or more records.
///
/// `#[derive(Sealable)]` implements this for the deriving record; the impls below walk boxes,
/// optional records and sequences of records, so any combination of them can be marked
/// `#[seal(nested)]`.
pub trait SealNested: Sized {
    type Sealed;

    fn seal_nested(&self, engine: &FieldEngine) -> Result<Self::Sealed, TransformError>;

    fn open_nested(sealed: &Self::Sealed, engine: &FieldEngine) -> Result<Self, TransformError>;
}

impl<T: SealNested> SealNested for Box<T> {
    type Sealed = Box<T::Sealed>;

    fn seal_nested(&self, engine: &FieldEngine) -> Result<Self::Sealed, TransformError> {
        (**self).seal_nested(engine).map(Box::new)
    }

    fn open_nested(sealed: &Self::Sealed, engine: &FieldEngine) -> Result<Self, TransformError> {
        T::open_nested(sealed, engine).map(Box::new)
    }
}

impl<T: SealNested> SealNested for Option<T> {
    type Sealed = Option<T::Sealed>;

    fn seal_nested(&self, engine: &FieldEngine) -> Result<Self::Sealed, TransformError> {
        self.as_ref().map(|inner| inner.seal_nested(engine)).transpose()
    }

    fn open_nested(sealed: &Self::Sealed, engine: &FieldEngine) -> Result<Self, TransformError> {
        sealed.as_ref().map(|inner| T::open_nested(inner, engine)).transpose()
    }
}

/// Order and length are preserved; the first failing element aborts the whole sequence.
impl<T: SealNested> SealNested for Vec<T> {
    type Sealed = Vec<T::Sealed>;

    fn seal_nested(&self, engine: &FieldEngine) -> Result<Self::Sealed, TransformError> {
        self.iter().map(|item| item.seal_nested(engine)).collect()
    }

    fn open_nested(sealed: &Self::Sealed, engine: &FieldEngine) -> Result<Self, TransformError> {
        sealed.iter().map(|item| T::open_nested(item, engine)).collect()
    }
}

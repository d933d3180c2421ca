//! Constant-valued codec
//!
//! [`UnitCodec`] transcodes a value that never appears on the wire.
//! Encoding writes nothing at all, and decoding invokes a supplier to
//! conjure a fresh value, regardless of the element it is handed. This
//! slots a runtime-only field (a handle, a counter seed, a registry
//! reference) into a grouped product codec without reserving space for
//! it in the serialized form.

use std::fmt::{self, Display};

use crate::codec::Codec;
use crate::error::CodecResult;
use crate::provider::TypeProvider;

/// Codec producing its value from a supplier, occupying no wire space.
pub struct UnitCodec<T, F> {
    supplier: F,
    marker: std::marker::PhantomData<fn() -> T>,
}

impl<T, F: Fn() -> T> UnitCodec<T, F> {
    pub fn new(supplier: F) -> Self {
        Self {
            supplier,
            marker: std::marker::PhantomData,
        }
    }
}

/// Shorthand for a [`UnitCodec`] that clones a fixed value.
pub fn unit<T: Clone>(value: T) -> UnitCodec<T, impl Fn() -> T> {
    UnitCodec::new(move || value.clone())
}

impl<T, F: Fn() -> T> Codec for UnitCodec<T, F> {
    type Value = T;

    fn codec_name(&self) -> String {
        "UnitCodec".to_owned()
    }

    fn encode_start<P: TypeProvider>(
        &self,
        _provider: &P,
        current: P::Element,
        _value: &Self::Value,
    ) -> CodecResult<P::Element> {
        Ok(current)
    }

    /// Invokes the supplier once per call. A panicking supplier is not
    /// caught; the panic propagates to the decoder's caller.
    fn decode_start<P: TypeProvider>(
        &self,
        _provider: &P,
        _element: &P::Element,
    ) -> CodecResult<Self::Value> {
        Ok((self.supplier)())
    }

    fn absence_tolerant(&self) -> bool {
        true
    }
}

impl<T, F: Fn() -> T> Display for UnitCodec<T, F> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("UnitCodec")
    }
}

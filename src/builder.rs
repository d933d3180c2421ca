//! Product-type grouping
//!
//! A product type transcodes through a map-shaped element, one named
//! entry per field. Each field is described by a [`ConfiguredCodec`]
//! binding a codec, a field name, and an accessor into the product
//! value; [`CodecBuilder::group1`] through [`CodecBuilder::group16`]
//! collect one to sixteen such descriptors, and `.create` pairs them
//! with a constructor function of matching arity to yield a full
//! [`Codec`] for the product type. Sixteen is a deliberate hard upper
//! bound; wider products should nest grouped codecs.
//!
//! Encoding writes every field into one shared map element, skipping
//! absence-tolerant fields that encode to nothing. Decoding evaluates
//! *all* fields before failing, so one error reports every missing or
//! invalid field, and the constructor runs only when every field
//! decoded.

use std::fmt::{self, Display};

use crate::codec::Codec;
use crate::error::{CodecError, CodecResult, Direction};
use crate::provider::TypeProvider;

/// One field of a product type: a codec, a field name, and an accessor.
pub struct ConfiguredCodec<C: Codec, O> {
    codec: C,
    field: String,
    getter: fn(&O) -> &C::Value,
}

impl<C: Codec, O> ConfiguredCodec<C, O> {
    pub fn new(codec: C, field: &str, getter: fn(&O) -> &C::Value) -> Self {
        Self {
            codec,
            field: field.to_owned(),
            getter,
        }
    }

    /// The field name this codec writes under.
    pub fn field_name(&self) -> &str {
        &self.field
    }

    /// Encodes this field of `object` against a fresh seed. Returns
    /// `None` when an absence-tolerant codec encoded nothing, so the
    /// field is omitted from the container entirely.
    fn encode_field<P: TypeProvider>(
        &self,
        provider: &P,
        object: &O,
    ) -> CodecResult<Option<P::Element>> {
        let encoded = self
            .codec
            .encode_start(provider, provider.empty(), (self.getter)(object))?;
        if self.codec.absence_tolerant() && encoded == provider.empty() {
            return Ok(None);
        }
        Ok(Some(encoded))
    }

    /// Decodes this field out of a map-shaped `container`. An absent
    /// field decodes through an absence-tolerant codec against a null
    /// element, and is a [`MissingField`](CodecError::MissingField)
    /// error otherwise.
    fn decode_field<P: TypeProvider>(
        &self,
        provider: &P,
        container: &P::Element,
    ) -> CodecResult<C::Value> {
        if provider.has(container, &self.field)? {
            let element = provider.get(container, &self.field)?;
            self.codec.decode_start(provider, &element)
        } else if self.codec.absence_tolerant() {
            let null = provider.create_null()?;
            self.codec.decode_start(provider, &null)
        } else {
            Err(CodecError::MissingField {
                field: self.field.clone(),
            })
        }
    }
}

impl<C: Codec + Clone, O> Clone for ConfiguredCodec<C, O> {
    fn clone(&self) -> Self {
        Self {
            codec: self.codec.clone(),
            field: self.field.clone(),
            getter: self.getter,
        }
    }
}

impl<C: Codec, O> fmt::Debug for ConfiguredCodec<C, O> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ConfiguredCodec")
            .field("codec", &self.codec.codec_name())
            .field("field", &self.field)
            .finish()
    }
}

impl<C: Codec, O> Display for ConfiguredCodec<C, O> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}('{}')", self.codec.codec_name(), self.field)
    }
}

/// Entry point for grouping configured field codecs by arity.
pub struct CodecBuilder;

macro_rules! group_codecs {
    ($(#[$docs:meta])* $groupfn:ident, $group:ident, $codec:ident, $arity:literal,
     $(($C:ident, $f:ident, $v:ident)),+) => {
        $(#[$docs])*
        pub struct $group<O, $($C: Codec),+> {
            $($f: ConfiguredCodec<$C, O>,)+
        }

        impl CodecBuilder {
            pub fn $groupfn<O, $($C: Codec),+>(
                $($f: ConfiguredCodec<$C, O>),+
            ) -> $group<O, $($C),+> {
                $group { $($f),+ }
            }
        }

        impl<O, $($C: Codec),+> $group<O, $($C),+> {
            /// Pairs the grouped fields with a constructor of matching
            /// arity, yielding the product-type codec.
            pub fn create(self, ctor: fn($($C::Value),+) -> O) -> $codec<O, $($C),+> {
                $codec {
                    $($f: self.$f,)+
                    ctor,
                }
            }
        }

        #[doc = concat!("Product-type codec over ", stringify!($arity), " grouped field(s).")]
        pub struct $codec<O, $($C: Codec),+> {
            $($f: ConfiguredCodec<$C, O>,)+
            ctor: fn($($C::Value),+) -> O,
        }

        impl<O, $($C: Codec),+> Codec for $codec<O, $($C),+> {
            type Value = O;

            fn codec_name(&self) -> String {
                concat!("GroupCodec", stringify!($arity)).to_owned()
            }

            fn encode_start<P: TypeProvider>(
                &self,
                provider: &P,
                current: P::Element,
                value: &Self::Value,
            ) -> CodecResult<P::Element> {
                let mut container = provider.create_map()?;
                let mut errors: Vec<(String, CodecError)> = Vec::new();
                $(
                    match self.$f.encode_field(provider, value) {
                        Ok(Some(element)) => {
                            container = provider.set(container, &self.$f.field, element)?;
                        }
                        Ok(None) => {}
                        Err(err) => errors.push((self.$f.field.clone(), err)),
                    }
                )+
                if !errors.is_empty() {
                    return Err(CodecError::InvalidFields {
                        direction: Direction::Encode,
                        errors,
                    });
                }
                Ok(provider.merge(current, container)?)
            }

            fn decode_start<P: TypeProvider>(
                &self,
                provider: &P,
                element: &P::Element,
            ) -> CodecResult<Self::Value> {
                if provider.is_null(element) {
                    return Err(CodecError::DecodeNull {
                        type_name: self.codec_name(),
                    });
                }
                // Every field is evaluated before any failure is
                // reported, so the aggregate names them all.
                $(let $v = self.$f.decode_field(provider, element);)+
                match ($($v,)+) {
                    ($(Ok($v),)+) => Ok((self.ctor)($($v),+)),
                    results => {
                        let ($($v,)+) = results;
                        let mut errors = Vec::new();
                        $(
                            if let Err(err) = $v {
                                errors.push((self.$f.field.clone(), err));
                            }
                        )+
                        Err(CodecError::InvalidFields {
                            direction: Direction::Decode,
                            errors,
                        })
                    }
                }
            }
        }

        impl<O, $($C: Codec),+> Display for $codec<O, $($C),+> {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, concat!("GroupCodec", stringify!($arity), "["))?;
                let mut first = true;
                $(
                    if !first {
                        f.write_str(", ")?;
                    }
                    write!(f, "{}", self.$f)?;
                    first = false;
                )+
                let _ = first;
                f.write_str("]")
            }
        }
    };
}

group_codecs!(
    /// Groups a single configured field.
    group1, CodecGroup1, GroupCodec1, 1,
    (C1, f1, v1)
);
group_codecs!(
    /// Groups two configured fields.
    group2, CodecGroup2, GroupCodec2, 2,
    (C1, f1, v1), (C2, f2, v2)
);
group_codecs!(
    /// Groups three configured fields.
    group3, CodecGroup3, GroupCodec3, 3,
    (C1, f1, v1), (C2, f2, v2), (C3, f3, v3)
);
group_codecs!(
    /// Groups four configured fields.
    group4, CodecGroup4, GroupCodec4, 4,
    (C1, f1, v1), (C2, f2, v2), (C3, f3, v3), (C4, f4, v4)
);
group_codecs!(
    /// Groups five configured fields.
    group5, CodecGroup5, GroupCodec5, 5,
    (C1, f1, v1), (C2, f2, v2), (C3, f3, v3), (C4, f4, v4), (C5, f5, v5)
);
group_codecs!(
    /// Groups six configured fields.
    group6, CodecGroup6, GroupCodec6, 6,
    (C1, f1, v1), (C2, f2, v2), (C3, f3, v3), (C4, f4, v4), (C5, f5, v5),
    (C6, f6, v6)
);
group_codecs!(
    /// Groups seven configured fields.
    group7, CodecGroup7, GroupCodec7, 7,
    (C1, f1, v1), (C2, f2, v2), (C3, f3, v3), (C4, f4, v4), (C5, f5, v5),
    (C6, f6, v6), (C7, f7, v7)
);
group_codecs!(
    /// Groups eight configured fields.
    group8, CodecGroup8, GroupCodec8, 8,
    (C1, f1, v1), (C2, f2, v2), (C3, f3, v3), (C4, f4, v4), (C5, f5, v5),
    (C6, f6, v6), (C7, f7, v7), (C8, f8, v8)
);
group_codecs!(
    /// Groups nine configured fields.
    group9, CodecGroup9, GroupCodec9, 9,
    (C1, f1, v1), (C2, f2, v2), (C3, f3, v3), (C4, f4, v4), (C5, f5, v5),
    (C6, f6, v6), (C7, f7, v7), (C8, f8, v8), (C9, f9, v9)
);
group_codecs!(
    /// Groups ten configured fields.
    group10, CodecGroup10, GroupCodec10, 10,
    (C1, f1, v1), (C2, f2, v2), (C3, f3, v3), (C4, f4, v4), (C5, f5, v5),
    (C6, f6, v6), (C7, f7, v7), (C8, f8, v8), (C9, f9, v9), (C10, f10, v10)
);
group_codecs!(
    /// Groups eleven configured fields.
    group11, CodecGroup11, GroupCodec11, 11,
    (C1, f1, v1), (C2, f2, v2), (C3, f3, v3), (C4, f4, v4), (C5, f5, v5),
    (C6, f6, v6), (C7, f7, v7), (C8, f8, v8), (C9, f9, v9), (C10, f10, v10),
    (C11, f11, v11)
);
group_codecs!(
    /// Groups twelve configured fields.
    group12, CodecGroup12, GroupCodec12, 12,
    (C1, f1, v1), (C2, f2, v2), (C3, f3, v3), (C4, f4, v4), (C5, f5, v5),
    (C6, f6, v6), (C7, f7, v7), (C8, f8, v8), (C9, f9, v9), (C10, f10, v10),
    (C11, f11, v11), (C12, f12, v12)
);
group_codecs!(
    /// Groups thirteen configured fields.
    group13, CodecGroup13, GroupCodec13, 13,
    (C1, f1, v1), (C2, f2, v2), (C3, f3, v3), (C4, f4, v4), (C5, f5, v5),
    (C6, f6, v6), (C7, f7, v7), (C8, f8, v8), (C9, f9, v9), (C10, f10, v10),
    (C11, f11, v11), (C12, f12, v12), (C13, f13, v13)
);
group_codecs!(
    /// Groups fourteen configured fields.
    group14, CodecGroup14, GroupCodec14, 14,
    (C1, f1, v1), (C2, f2, v2), (C3, f3, v3), (C4, f4, v4), (C5, f5, v5),
    (C6, f6, v6), (C7, f7, v7), (C8, f8, v8), (C9, f9, v9), (C10, f10, v10),
    (C11, f11, v11), (C12, f12, v12), (C13, f13, v13), (C14, f14, v14)
);
group_codecs!(
    /// Groups fifteen configured fields.
    group15, CodecGroup15, GroupCodec15, 15,
    (C1, f1, v1), (C2, f2, v2), (C3, f3, v3), (C4, f4, v4), (C5, f5, v5),
    (C6, f6, v6), (C7, f7, v7), (C8, f8, v8), (C9, f9, v9), (C10, f10, v10),
    (C11, f11, v11), (C12, f12, v12), (C13, f13, v13), (C14, f14, v14),
    (C15, f15, v15)
);
group_codecs!(
    /// Groups sixteen configured fields, the widest supported arity.
    group16, CodecGroup16, GroupCodec16, 16,
    (C1, f1, v1), (C2, f2, v2), (C3, f3, v3), (C4, f4, v4), (C5, f5, v5),
    (C6, f6, v6), (C7, f7, v7), (C8, f8, v8), (C9, f9, v9), (C10, f10, v10),
    (C11, f11, v11), (C12, f12, v12), (C13, f13, v13), (C14, f14, v14),
    (C15, f15, v15), (C16, f16, v16)
);

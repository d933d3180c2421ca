pub mod builder;
pub mod codec;
pub mod constrain;
pub mod either;
pub mod error;
pub mod prelude;
pub mod provider;

pub use crate::builder::{CodecBuilder, ConfiguredCodec};
pub use crate::codec::{
    prim::{BOOLEAN, BYTE, DOUBLE, FLOAT, INTEGER, LONG, SHORT, STRING},
    Codec, KeyableCodec,
};
pub use crate::constrain::{Constrained, Constraint, ConstraintCategory};
pub use crate::either::Either;
pub use crate::error::{CodecError, CodecResult, ProvideResult, ProviderError};
pub use crate::provider::{PlainProvider, TypeProvider, Value};

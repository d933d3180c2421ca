//! Convenience re-exports for typical transcoding call sites.
//!
//! ```
//! use treble::prelude::*;
//!
//! let p = PlainProvider;
//! let codec = INTEGER.positive().list();
//! let element = codec.encode_start(&p, p.empty(), &vec![1, 2, 3])?;
//! assert_eq!(codec.decode_start(&p, &element)?, vec![1, 2, 3]);
//! # Ok::<(), CodecError>(())
//! ```

pub use crate::builder::{CodecBuilder, ConfiguredCodec};
pub use crate::codec::prim::{BOOLEAN, BYTE, DOUBLE, FLOAT, INTEGER, LONG, SHORT, STRING};
pub use crate::codec::{Codec, KeyableCodec};
pub use crate::either::Either;
pub use crate::error::{CodecError, CodecResult};
pub use crate::provider::{PlainProvider, TypeProvider, Value};

pub use crate::enum_repr;

//! dossiolib — согласование двух диалектов API досье (legacy и REST) с каноническим `Dossier`.

pub mod classify;
pub mod coerce;
pub mod convert;
pub mod encode;
pub mod envelope;
pub mod error;
pub mod keys;
pub mod model;
pub mod query;
pub mod rows;
pub mod traits;

pub mod dialects;

pub use classify::{classify, Dialect, WireDossier};
pub use convert::{decode, decode_list};
pub use encode::{encode, encode_dossier};
pub use error::{DossioError, Result};
pub use model::{Dossier, DossierPatch};

pub mod clock;
pub mod distance;
pub mod hours;
pub mod selector;

pub use crate::domain::model::{Cafe, LatLng, QueryContext};
pub use crate::domain::ports::{PayloadDecryptor, PlaceSource};
pub use crate::utils::error::Result;
pub use selector::{CandidateSelector, SearchOutcome};

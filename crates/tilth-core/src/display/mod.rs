//! Display formatting for schedules and operation results.
//!
//! Everything renders as markdown so the CLI's terminal renderer can style
//! it. Domain models implement [`std::fmt::Display`] directly (see
//! [`models`]); wrappers add context such as the evaluation date
//! ([`Timeline`], [`Upcoming`]) or an operation outcome ([`CreateResult`],
//! [`ActivityUpdateResult`], [`DeleteResult`]).
//!
//! Wrappers hold references and compute labels at render time, so nothing
//! date-relative is ever cached.

pub mod collections;
pub mod models;
pub mod results;
pub mod timeline;


pub use collections::{CropList, ScheduleSummaries};
pub use results::{ActivityUpdateResult, CreateResult, DeleteResult};
pub use timeline::{Timeline, Upcoming};

//! Reassembles trajectories from a stream of one point per row.
//!
//! The stream carries no boundary marker. A maximal run of consecutive
//! rows sharing an identifier is one trajectory, so an identifier which
//! reappears later in the stream starts a new trajectory.

#[doc(hidden)]
pub mod cursor;
#[doc(hidden)]
pub mod grouper;
#[doc(hidden)]
#[cfg(test)]
mod test;

#[doc(inline)]
pub use cursor::Cursor;
#[doc(inline)]
pub use grouper::{PointSource, read_next_group};

//! Resolves semantic column roles to their position within a delimited row.

#[doc(hidden)]
pub mod resolver;
#[doc(hidden)]
pub mod role;
#[doc(hidden)]
#[cfg(test)]
mod test;

#[doc(inline)]
pub use resolver::{ColumnMap, CoordinateColumns, GeometryColumn, Header};
#[doc(inline)]
pub use role::Role;

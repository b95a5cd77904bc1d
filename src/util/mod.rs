#[doc(hidden)]
pub mod err;

/// Converts errors from their error type (of the submodule) to that of
/// a wrapping error variant.
///
/// With two arguments the target is [`crate::ReaderError`], with three
/// the target enum is named explicitly.
///
/// ```rust,ignore
/// use routers_ingest::error::DecodeError;
/// routers_ingest::impl_err!(DecodeError, Decode);
/// routers_ingest::impl_err!(csv::Error, ConfigError, Csv);
/// ```
pub mod err_macro {
    #[macro_export]
    macro_rules! impl_err {
        ($from:ty, $variant:ident) => {
            impl From<$from> for $crate::ReaderError {
                fn from(value: $from) -> Self {
                    $crate::ReaderError::$variant(value)
                }
            }
        };
        ($from:ty, $to:ident, $variant:ident) => {
            impl From<$from> for $to {
                fn from(value: $from) -> Self {
                    $to::$variant(value)
                }
            }
        };
    }
}

mod builtin;
mod context;
mod errors;
mod export;
mod gen;
mod mangle;
mod ty;

pub use builtin::{
    function_class_symbol_name, function_invoke_symbol_name, hash_mangle, is_special_hash,
    BUILTINS_PACKAGE, MAX_FUNCTION_ARITY,
};
pub use context::Context;
pub use errors::{LinkageError, LinkageErrorKind, SerializeError};
pub use export::is_exported;
pub use gen::{serialize_module, FileSerializer, ModuleSerializer, SerializedFile, SerializedModule};
pub use mangle::Mangler;
pub use ty::{encode_type, TypeParamScope};

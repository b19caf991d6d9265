mod arena;
mod def;
mod module;
mod ty;

pub use arena::{IrArena, Symbol};
pub use def::{
    AccessorBinding, AccessorKind, BuiltinClass, ClassDef, Def, DefKind, DefParent, DefRef,
    FuncSignature, FunctionDef, FunctionFamily, PropertyDef, TypeParamDef, ValueParam, Visibility,
};
pub use module::{File, Module};
pub use ty::{ClassifierUsage, TypeArg, TypeUsage, Variance};

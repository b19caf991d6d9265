use crate::arena::{IrArena, Symbol};
use crate::module::{File, Module};
use crate::ty::TypeUsage;
use indexmap::IndexSet;
use std::cell::{OnceCell, RefCell};
use std::hash::Hash;
use std::ops::Deref;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Visibility {
    Public,
    Internal,
    Private,
    Protected,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AccessorKind {
    Getter,
    Setter,
}

/// The parametrized function-interface families synthesized by the compiler
/// rather than declared in source.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FunctionFamily {
    Function,
    KFunction,
    SuspendFunction,
    KSuspendFunction,
}

impl FunctionFamily {
    pub const ALL: [FunctionFamily; 4] = [
        FunctionFamily::Function,
        FunctionFamily::KFunction,
        FunctionFamily::SuspendFunction,
        FunctionFamily::KSuspendFunction,
    ];

    pub fn name(self) -> &'static str {
        match self {
            FunctionFamily::Function => "Function",
            FunctionFamily::KFunction => "KFunction",
            FunctionFamily::SuspendFunction => "SuspendFunction",
            FunctionFamily::KSuspendFunction => "KSuspendFunction",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BuiltinClass {
    Unit,
    FunctionInterface(FunctionFamily, u8),
}

/// A node in the declaration tree. Ownership is strictly hierarchical: every
/// declaration has exactly one parent, terminating at a [`File`].
pub struct Def<'a> {
    pub name: Symbol<'a>,
    pub parent: DefParent<'a>,
    pub visibility: Visibility,
    pub is_expect: bool,
    pub kind: DefKind<'a>,
}

#[derive(Clone, Copy)]
pub enum DefParent<'a> {
    File(&'a File<'a>),
    Def(DefRef<'a>),
}

pub enum DefKind<'a> {
    Class(ClassDef<'a>),
    Function(FunctionDef<'a>),
    Property(PropertyDef<'a>),
    Field,
    EnumEntry,
    TypeAlias,
    TypeParameter(TypeParamDef<'a>),
}

impl<'a> DefKind<'a> {
    pub fn label(&self) -> &'static str {
        match self {
            DefKind::Class(..) => "class",
            DefKind::Function(..) => "function",
            DefKind::Property(..) => "property",
            DefKind::Field => "field",
            DefKind::EnumEntry => "enum entry",
            DefKind::TypeAlias => "type alias",
            DefKind::TypeParameter(..) => "type parameter",
        }
    }
}

pub struct ClassDef<'a> {
    pub builtin: Option<BuiltinClass>,
    type_params: OnceCell<Vec<DefRef<'a>>>,
    members: RefCell<Vec<DefRef<'a>>>,
}

impl<'a> ClassDef<'a> {
    pub fn new() -> Self {
        Self {
            builtin: None,
            type_params: OnceCell::new(),
            members: RefCell::new(Vec::new()),
        }
    }

    pub fn builtin(builtin: BuiltinClass) -> Self {
        Self {
            builtin: Some(builtin),
            type_params: OnceCell::new(),
            members: RefCell::new(Vec::new()),
        }
    }

    pub fn set_type_params(&self, type_params: Vec<DefRef<'a>>) {
        assert!(
            self.type_params.set(type_params).is_ok(),
            "class type parameters already set"
        );
    }

    pub fn type_params(&self) -> &[DefRef<'a>] {
        self.type_params.get().map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn members(&self) -> Vec<DefRef<'a>> {
        self.members.borrow().clone()
    }

    pub(crate) fn push_member(&self, member: DefRef<'a>) {
        self.members.borrow_mut().push(member);
    }
}

impl<'a> Default for ClassDef<'a> {
    fn default() -> Self {
        Self::new()
    }
}

#[derive(Clone, Copy)]
pub struct AccessorBinding<'a> {
    pub kind: AccessorKind,
    pub property: Option<DefRef<'a>>,
}

pub struct FunctionDef<'a> {
    pub is_constructor: bool,
    pub accessor: Option<AccessorBinding<'a>>,
    signature: OnceCell<FuncSignature<'a>>,
    overridden: RefCell<Vec<DefRef<'a>>>,
}

impl<'a> FunctionDef<'a> {
    pub fn new() -> Self {
        Self {
            is_constructor: false,
            accessor: None,
            signature: OnceCell::new(),
            overridden: RefCell::new(Vec::new()),
        }
    }

    pub fn constructor() -> Self {
        Self {
            is_constructor: true,
            ..Self::new()
        }
    }

    pub fn accessor(kind: AccessorKind, property: Option<DefRef<'a>>) -> Self {
        Self {
            accessor: Some(AccessorBinding { kind, property }),
            ..Self::new()
        }
    }

    pub fn set_signature(&self, signature: FuncSignature<'a>) {
        assert!(
            self.signature.set(signature).is_ok(),
            "function signature already set"
        );
    }

    pub fn signature(&self) -> Option<&FuncSignature<'a>> {
        self.signature.get()
    }

    pub fn add_overridden(&self, overridden: DefRef<'a>) {
        self.overridden.borrow_mut().push(overridden);
    }

    pub fn overridden(&self) -> Vec<DefRef<'a>> {
        self.overridden.borrow().clone()
    }
}

impl<'a> Default for FunctionDef<'a> {
    fn default() -> Self {
        Self::new()
    }
}

pub struct PropertyDef<'a> {
    getter: OnceCell<DefRef<'a>>,
    setter: OnceCell<DefRef<'a>>,
    overridden: RefCell<Vec<DefRef<'a>>>,
}

impl<'a> PropertyDef<'a> {
    pub fn new() -> Self {
        Self {
            getter: OnceCell::new(),
            setter: OnceCell::new(),
            overridden: RefCell::new(Vec::new()),
        }
    }

    pub fn set_getter(&self, getter: DefRef<'a>) {
        assert!(self.getter.set(getter).is_ok(), "property getter already set");
    }

    pub fn set_setter(&self, setter: DefRef<'a>) {
        assert!(self.setter.set(setter).is_ok(), "property setter already set");
    }

    pub fn getter(&self) -> Option<DefRef<'a>> {
        self.getter.get().copied()
    }

    pub fn setter(&self) -> Option<DefRef<'a>> {
        self.setter.get().copied()
    }

    pub fn add_overridden(&self, overridden: DefRef<'a>) {
        self.overridden.borrow_mut().push(overridden);
    }

    pub fn overridden(&self) -> Vec<DefRef<'a>> {
        self.overridden.borrow().clone()
    }
}

impl<'a> Default for PropertyDef<'a> {
    fn default() -> Self {
        Self::new()
    }
}

pub struct TypeParamDef<'a> {
    pub index: usize,
    bounds: OnceCell<Vec<TypeUsage<'a>>>,
}

impl<'a> TypeParamDef<'a> {
    pub fn new(index: usize) -> Self {
        Self {
            index,
            bounds: OnceCell::new(),
        }
    }

    pub fn set_bounds(&self, bounds: Vec<TypeUsage<'a>>) {
        assert!(
            self.bounds.set(bounds).is_ok(),
            "type parameter bounds already set"
        );
    }

    pub fn bounds(&self) -> &[TypeUsage<'a>] {
        self.bounds.get().map(Vec::as_slice).unwrap_or(&[])
    }
}

pub struct FuncSignature<'a> {
    pub value_params: Vec<ValueParam<'a>>,
    pub extension_receiver: Option<TypeUsage<'a>>,
    pub return_type: TypeUsage<'a>,
    pub type_params: Vec<DefRef<'a>>,
}

pub struct ValueParam<'a> {
    pub ty: TypeUsage<'a>,
    pub is_vararg: bool,
}

impl<'a> ValueParam<'a> {
    pub fn new(ty: TypeUsage<'a>) -> Self {
        Self {
            ty,
            is_vararg: false,
        }
    }

    pub fn vararg(ty: TypeUsage<'a>) -> Self {
        Self {
            ty,
            is_vararg: true,
        }
    }
}

/// Pointer-identity handle to an arena-allocated declaration.
pub struct DefRef<'a>(&'a Def<'a>);

impl<'a> Def<'a> {
    /// Allocates a declaration and registers it with its owner. Type
    /// parameters and property accessors stay out of the member lists; they
    /// are reachable through the owning signature or property binding.
    pub fn alloc(
        arena: &IrArena<'a>,
        parent: DefParent<'a>,
        name: &str,
        visibility: Visibility,
        is_expect: bool,
        kind: DefKind<'a>,
    ) -> DefRef<'a> {
        let def = DefRef(arena.alloc(Def {
            name: arena.symbol(name),
            parent,
            visibility,
            is_expect,
            kind,
        }));
        let unlisted =
            matches!(def.0.kind, DefKind::TypeParameter(..)) || def.accessor_binding().is_some();
        if !unlisted {
            match parent {
                DefParent::File(file) => file.push_def(def),
                DefParent::Def(container) => {
                    if let DefKind::Class(class) = &container.0.kind {
                        class.push_member(def);
                    }
                }
            }
        }
        def
    }
}

impl<'a> DefRef<'a> {
    pub fn get(self) -> &'a Def<'a> {
        self.0
    }

    pub fn class(self) -> Option<&'a ClassDef<'a>> {
        match &self.0.kind {
            DefKind::Class(class) => Some(class),
            _ => None,
        }
    }

    pub fn function(self) -> Option<&'a FunctionDef<'a>> {
        match &self.0.kind {
            DefKind::Function(function) => Some(function),
            _ => None,
        }
    }

    pub fn property(self) -> Option<&'a PropertyDef<'a>> {
        match &self.0.kind {
            DefKind::Property(property) => Some(property),
            _ => None,
        }
    }

    pub fn type_param(self) -> Option<&'a TypeParamDef<'a>> {
        match &self.0.kind {
            DefKind::TypeParameter(type_param) => Some(type_param),
            _ => None,
        }
    }

    pub fn accessor_binding(self) -> Option<AccessorBinding<'a>> {
        self.function().and_then(|function| function.accessor)
    }

    /// Resolves the property an accessor belongs to. The direct binding wins;
    /// a fake override without one is resolved depth-first through the
    /// overridden DAG, visiting shared ancestors once.
    pub fn resolved_accessor_property(self) -> Option<DefRef<'a>> {
        let binding = self.accessor_binding()?;
        if let Some(property) = binding.property {
            return Some(property);
        }

        let mut visited: IndexSet<DefRef<'a>> = IndexSet::default();
        let mut worklist: Vec<DefRef<'a>> = Vec::new();
        if let Some(function) = self.function() {
            worklist.extend(function.overridden().into_iter().rev());
        }
        while let Some(next) = worklist.pop() {
            if !visited.insert(next) {
                continue;
            }
            if let Some(binding) = next.accessor_binding() {
                if let Some(property) = binding.property {
                    return Some(property);
                }
            }
            if let Some(function) = next.function() {
                worklist.extend(function.overridden().into_iter().rev());
            }
        }
        None
    }

    pub fn file(self) -> &'a File<'a> {
        // ownership edges are acyclic, so the walk terminates
        let mut current = self;
        loop {
            match current.0.parent {
                DefParent::File(file) => return file,
                DefParent::Def(parent) => current = parent,
            }
        }
    }

    pub fn module(self) -> &'a Module<'a> {
        self.file().module
    }

    pub fn is_synthetic_function_interface(self) -> bool {
        match &self.0.kind {
            DefKind::Class(class) => {
                matches!(class.builtin, Some(BuiltinClass::FunctionInterface(..)))
            }
            _ => match self.0.parent {
                DefParent::Def(parent) => parent.is_synthetic_function_interface(),
                DefParent::File(..) => false,
            },
        }
    }

    /// Plain structural fully-qualified name: package plus the simple-name
    /// chain. Function ancestors contribute their simple name only, so this
    /// never recurses into signatures.
    pub fn fq_name(self) -> String {
        let prefix = match self.0.parent {
            DefParent::File(file) => file.package.to_string(),
            DefParent::Def(parent) => parent.fq_name(),
        };
        if prefix.is_empty() {
            self.0.name.to_string()
        } else {
            format!("{}.{}", prefix, self.0.name)
        }
    }
}

impl<'a> Clone for DefRef<'a> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<'a> Copy for DefRef<'a> {}

impl<'a> PartialEq for DefRef<'a> {
    fn eq(&self, other: &Self) -> bool {
        std::ptr::eq(self.0, other.0)
    }
}

impl<'a> Eq for DefRef<'a> {}

impl<'a> Hash for DefRef<'a> {
    fn hash<H: std::hash::Hasher>(&self, state: &mut H) {
        (self.0 as *const Def<'a>).hash(state)
    }
}

impl<'a> Deref for DefRef<'a> {
    type Target = Def<'a>;
    fn deref(&self) -> &Self::Target {
        self.0
    }
}

impl<'a> std::fmt::Debug for DefRef<'a> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} {}", self.0.kind.label(), self.0.name)
    }
}

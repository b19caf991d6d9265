use bumpalo::Bump;
use kenari_ir::{
    AccessorKind, BuiltinClass, ClassDef, Def, DefKind, DefParent, DefRef, File, FuncSignature,
    FunctionDef, FunctionFamily, IrArena, Module, PropertyDef, TypeParamDef, TypeUsage, Visibility,
};

fn class<'a>(arena: &IrArena<'a>, file: &'a File<'a>, name: &str, def: ClassDef<'a>) -> DefRef<'a> {
    Def::alloc(
        arena,
        DefParent::File(file),
        name,
        Visibility::Public,
        false,
        DefKind::Class(def),
    )
}

fn getter<'a>(
    arena: &IrArena<'a>,
    parent: DefParent<'a>,
    name: &str,
    property: Option<DefRef<'a>>,
) -> DefRef<'a> {
    Def::alloc(
        arena,
        parent,
        name,
        Visibility::Public,
        false,
        DefKind::Function(FunctionDef::accessor(AccessorKind::Getter, property)),
    )
}

#[test]
fn test_symbol_interning() {
    let bump = Bump::new();
    let arena = IrArena::new(&bump);

    let first = arena.symbol("toString");
    let second = arena.symbol("toString");
    let other = arena.symbol("hashCode");

    assert_eq!(first, second);
    assert!(std::ptr::eq(first.as_str(), second.as_str()));
    assert_ne!(first, other);
    assert_eq!("toString", first.as_str());
}

#[test]
fn test_tree_construction_and_ownership() {
    let bump = Bump::new();
    let arena = IrArena::new(&bump);
    let module = Module::new(&arena, "<app>");
    let file = module.add_file(&arena, "main.kn", "a.b");

    let base = class(&arena, file, "Base", ClassDef::new());
    let method = Def::alloc(
        &arena,
        DefParent::Def(base),
        "m",
        Visibility::Public,
        false,
        DefKind::Function(FunctionDef::new()),
    );

    assert_eq!(1, module.files().len());
    assert_eq!(vec![base], file.defs());
    assert_eq!(vec![method], base.class().unwrap().members());
    assert_eq!("main.kn", method.file().path.as_str());
    assert_eq!("<app>", method.module().name.as_str());
    assert_eq!("a.b.Base.m", method.fq_name());
}

#[test]
fn test_accessors_and_type_params_stay_unlisted() {
    let bump = Bump::new();
    let arena = IrArena::new(&bump);
    let module = Module::new(&arena, "<app>");
    let file = module.add_file(&arena, "main.kn", "");

    let prop = Def::alloc(
        &arena,
        DefParent::File(file),
        "p",
        Visibility::Public,
        false,
        DefKind::Property(PropertyDef::new()),
    );
    let get_p = getter(&arena, DefParent::File(file), "<get-p>", Some(prop));
    prop.property().unwrap().set_getter(get_p);

    let generic = Def::alloc(
        &arena,
        DefParent::File(file),
        "generic",
        Visibility::Public,
        false,
        DefKind::Function(FunctionDef::new()),
    );
    let tp = Def::alloc(
        &arena,
        DefParent::Def(generic),
        "T",
        Visibility::Public,
        false,
        DefKind::TypeParameter(TypeParamDef::new(0)),
    );
    generic.function().unwrap().set_signature(FuncSignature {
        value_params: Vec::new(),
        extension_receiver: None,
        return_type: TypeUsage::classifier(tp),
        type_params: vec![tp],
    });

    let pair = class(&arena, file, "Pair", ClassDef::new());
    let pair_a = Def::alloc(
        &arena,
        DefParent::Def(pair),
        "A",
        Visibility::Public,
        false,
        DefKind::TypeParameter(TypeParamDef::new(0)),
    );
    let pair_b = Def::alloc(
        &arena,
        DefParent::Def(pair),
        "B",
        Visibility::Public,
        false,
        DefKind::TypeParameter(TypeParamDef::new(1)),
    );
    pair.class().unwrap().set_type_params(vec![pair_a, pair_b]);

    assert_eq!(vec![prop, generic, pair], file.defs());
    assert_eq!(Some(get_p), prop.property().unwrap().getter());
    assert_eq!(vec![tp], generic.function().unwrap().signature().unwrap().type_params);
    assert_eq!(&[pair_a, pair_b], pair.class().unwrap().type_params());
    assert!(pair.class().unwrap().members().is_empty());
}

#[test]
fn test_accessor_property_resolution() {
    let bump = Bump::new();
    let arena = IrArena::new(&bump);
    let module = Module::new(&arena, "<app>");
    let file = module.add_file(&arena, "main.kn", "");

    let prop = Def::alloc(
        &arena,
        DefParent::File(file),
        "p",
        Visibility::Public,
        false,
        DefKind::Property(PropertyDef::new()),
    );
    let direct = getter(&arena, DefParent::File(file), "<get-p>", Some(prop));
    prop.property().unwrap().set_getter(direct);

    // two levels of fake overrides, joined in a diamond
    let mid_a = getter(&arena, DefParent::File(file), "<get-p>", None);
    mid_a.function().unwrap().add_overridden(direct);
    let mid_b = getter(&arena, DefParent::File(file), "<get-p>", None);
    mid_b.function().unwrap().add_overridden(direct);
    let leaf = getter(&arena, DefParent::File(file), "<get-p>", None);
    leaf.function().unwrap().add_overridden(mid_a);
    leaf.function().unwrap().add_overridden(mid_b);

    assert_eq!(Some(prop), direct.resolved_accessor_property());
    assert_eq!(Some(prop), mid_a.resolved_accessor_property());
    assert_eq!(Some(prop), leaf.resolved_accessor_property());

    // not an accessor at all
    assert_eq!(None, prop.resolved_accessor_property());

    // an orphan with no property anywhere above it
    let orphan = getter(&arena, DefParent::File(file), "<get-q>", None);
    let dead_end = getter(&arena, DefParent::File(file), "<get-q>", None);
    orphan.function().unwrap().add_overridden(dead_end);
    assert_eq!(None, orphan.resolved_accessor_property());

    // the override relation is plain data on properties too
    let prop_override = Def::alloc(
        &arena,
        DefParent::File(file),
        "p",
        Visibility::Public,
        false,
        DefKind::Property(PropertyDef::new()),
    );
    prop_override.property().unwrap().add_overridden(prop);
    assert_eq!(vec![prop], prop_override.property().unwrap().overridden());
}

#[test]
fn test_synthetic_function_interface_marking() {
    let bump = Bump::new();
    let arena = IrArena::new(&bump);
    let module = Module::new(&arena, "<app>");
    let file = module.add_file(&arena, "functions.kn", "kenari");

    let function1 = class(
        &arena,
        file,
        "Function1",
        ClassDef::builtin(BuiltinClass::FunctionInterface(FunctionFamily::Function, 1)),
    );
    let invoke = Def::alloc(
        &arena,
        DefParent::Def(function1),
        "invoke",
        Visibility::Public,
        false,
        DefKind::Function(FunctionDef::new()),
    );
    let ordinary = class(&arena, file, "Ordinary", ClassDef::new());
    let unit = class(&arena, file, "Unit", ClassDef::builtin(BuiltinClass::Unit));

    assert!(function1.is_synthetic_function_interface());
    assert!(invoke.is_synthetic_function_interface());
    assert!(!ordinary.is_synthetic_function_interface());
    assert!(!unit.is_synthetic_function_interface());
}

#[test]
fn test_unit_detection() {
    let bump = Bump::new();
    let arena = IrArena::new(&bump);
    let module = Module::new(&arena, "<app>");
    let file = module.add_file(&arena, "builtins.kn", "kenari");

    let unit = class(&arena, file, "Unit", ClassDef::builtin(BuiltinClass::Unit));
    let int = class(&arena, file, "Int", ClassDef::new());

    assert!(TypeUsage::classifier(unit).is_unit());
    assert!(!TypeUsage::classifier(unit).nullable().is_unit());
    assert!(!TypeUsage::classifier(int).is_unit());
    assert!(!TypeUsage::Dynamic.is_unit());
}

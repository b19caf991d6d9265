use crate::builtin::{function_class_symbol_name, function_invoke_symbol_name};
use crate::context::Context;
use crate::errors::{LinkageError, LinkageErrorKind};
use crate::ty::{effective_container, encode_type, TypeParamScope};
use kenari_ir::{
    AccessorKind, BuiltinClass, ClassDef, DefKind, DefParent, DefRef, FuncSignature, FunctionDef,
    PropertyDef, TypeParamDef, Visibility,
};
use std::cell::RefCell;
use std::collections::HashMap;

const EXPECT_SUFFIX: &str = "#expect";

/// Computes and memoizes linkage names. A name is a deterministic function
/// of the declaration tree; repeated calls return the identical string.
/// Detecting collisions between distinct declarations is the obligation of
/// the consumer building a symbol table from these names.
pub struct Mangler<'ctx> {
    ctx: Context<'ctx>,
    cache: RefCell<HashMap<DefRef<'ctx>, &'ctx str>>,
}

impl<'ctx> Mangler<'ctx> {
    pub fn new(ctx: Context<'ctx>) -> Self {
        Self {
            ctx,
            cache: RefCell::new(HashMap::new()),
        }
    }

    pub fn mangled_name(&self, def: DefRef<'ctx>) -> Result<&'ctx str, LinkageError<'ctx>> {
        let cached = self.cache.borrow().get(&def).copied();
        if let Some(found) = cached {
            return Ok(found);
        }

        let mut name = self.uniq_symbol_name(def)?;
        if def.is_expect {
            // always the very last transformation
            name.push_str(EXPECT_SUFFIX);
        }

        let name = self.ctx.arena.alloc_str(&name);
        self.cache.borrow_mut().insert(def, name);
        Ok(name)
    }

    fn uniq_symbol_name(&self, def: DefRef<'ctx>) -> Result<String, LinkageError<'ctx>> {
        match &def.get().kind {
            DefKind::Function(function) => self.function_symbol_name(def, function),
            DefKind::Property(property) => self.property_symbol_name(def, property),
            DefKind::Class(class) => self.class_symbol_name(def, class),
            DefKind::Field => Ok(format!("kfield:{}{}", containing_part(def), def.name)),
            DefKind::EnumEntry => Ok(format!("kenumentry:{}{}", containing_part(def), def.name)),
            DefKind::TypeAlias => Ok(format!("ktypealias:{}{}", containing_part(def), def.name)),
            DefKind::TypeParameter(type_param) => self.type_param_symbol_name(def, type_param),
        }
    }

    fn class_symbol_name(
        &self,
        def: DefRef<'ctx>,
        class: &ClassDef<'ctx>,
    ) -> Result<String, LinkageError<'ctx>> {
        if let Some(BuiltinClass::FunctionInterface(family, arity)) = class.builtin {
            return Ok(function_class_symbol_name(family, arity));
        }
        Ok(format!("kclass:{}{}", containing_part(def), def.name))
    }

    fn property_symbol_name(
        &self,
        def: DefRef<'ctx>,
        property: &PropertyDef<'ctx>,
    ) -> Result<String, LinkageError<'ctx>> {
        let scope = TypeParamScope::for_declaration(def)?;
        let receiver_part = match property.getter() {
            Some(getter) => self.extension_receiver_part(getter, &scope)?,
            None => String::new(),
        };
        Ok(format!(
            "kprop:{}{}{}",
            containing_part(def),
            receiver_part,
            def.name
        ))
    }

    fn type_param_symbol_name(
        &self,
        def: DefRef<'ctx>,
        type_param: &TypeParamDef<'ctx>,
    ) -> Result<String, LinkageError<'ctx>> {
        let owner = match def.get().parent {
            DefParent::Def(parent) => effective_container(parent)?,
            DefParent::File(..) => {
                return Err(LinkageError::new(
                    def,
                    LinkageErrorKind::UnexpectedTypeParameterParent,
                ))
            }
        };
        let owner_symbol = self.mangled_name(owner)?;
        Ok(format!("ktypeparam:{}@{}", owner_symbol, type_param.index))
    }

    fn function_symbol_name(
        &self,
        def: DefRef<'ctx>,
        function: &FunctionDef<'ctx>,
    ) -> Result<String, LinkageError<'ctx>> {
        // members of builtin function interfaces get the precomputed form
        if let DefParent::Def(parent) = def.get().parent {
            if let Some(class) = parent.class() {
                if let Some(BuiltinClass::FunctionInterface(family, arity)) = class.builtin {
                    return Ok(function_invoke_symbol_name(family, arity));
                }
            }
        }

        let scope = TypeParamScope::for_declaration(def)?;

        if let Some(binding) = function.accessor {
            let property = def.resolved_accessor_property().ok_or(LinkageError::new(
                def,
                LinkageErrorKind::UnresolvedAccessorProperty,
            ))?;
            let property_symbol = self.uniq_symbol_name(property)?;
            let suffix = match binding.kind {
                AccessorKind::Getter => ":getter:",
                AccessorKind::Setter => ":setter:",
            };
            let receiver_part = self.extension_receiver_part(def, &scope)?;
            return Ok(format!("{}{}{}", property_symbol, suffix, receiver_part));
        }

        let containing = self.unique_containing_part(def)?;
        let local = self.local_function_name(def, function, &scope)?;
        Ok(format!("kfun:{}#{}", containing, local))
    }

    fn local_function_name(
        &self,
        def: DefRef<'ctx>,
        function: &FunctionDef<'ctx>,
        scope: &TypeParamScope<'ctx>,
    ) -> Result<String, LinkageError<'ctx>> {
        let mut local = def.name.to_string();
        if def.visibility == Visibility::Internal {
            // internal names are scoped by the declaring module
            local.push('$');
            local.push_str(strip_module_decoration(&def.module().name));
        }
        local.push_str(&self.signature_part(def, function, scope)?);
        Ok(local)
    }

    fn signature_part(
        &self,
        def: DefRef<'ctx>,
        function: &FunctionDef<'ctx>,
        scope: &TypeParamScope<'ctx>,
    ) -> Result<String, LinkageError<'ctx>> {
        let signature = self.signature_of(def)?;

        let mut part = self.extension_receiver_part(def, scope)?;

        part.push('(');
        for (i, param) in signature.value_params.iter().enumerate() {
            if i > 0 {
                part.push(';');
            }
            part.push_str(&encode_type(&param.ty, scope)?);
            if param.is_vararg {
                part.push_str("...");
            }
        }
        part.push(')');

        part.push('{');
        for (i, type_param) in signature.type_params.iter().enumerate() {
            if i > 0 {
                part.push(';');
            }
            // position, not source name
            part.push_str(&format!("{}§<", i));
            let bounds = type_param
                .type_param()
                .map(TypeParamDef::bounds)
                .unwrap_or(&[]);
            for (j, bound) in bounds.iter().enumerate() {
                if j > 0 {
                    part.push('&');
                }
                part.push_str(&encode_type(bound, scope)?);
            }
            part.push('>');
        }
        part.push('}');

        // constructors and unit-returning functions carry no return fragment
        if !function.is_constructor && !signature.return_type.is_unit() {
            part.push_str(&encode_type(&signature.return_type, scope)?);
        }

        Ok(part)
    }

    fn extension_receiver_part(
        &self,
        function: DefRef<'ctx>,
        scope: &TypeParamScope<'ctx>,
    ) -> Result<String, LinkageError<'ctx>> {
        let signature = self.signature_of(function)?;
        match &signature.extension_receiver {
            Some(receiver) => Ok(format!("@{}", encode_type(receiver, scope)?)),
            None => Ok(String::new()),
        }
    }

    fn signature_of(
        &self,
        function: DefRef<'ctx>,
    ) -> Result<&'ctx FuncSignature<'ctx>, LinkageError<'ctx>> {
        function
            .function()
            .and_then(FunctionDef::signature)
            .ok_or(LinkageError::new(function, LinkageErrorKind::MissingSignature))
    }

    fn unique_containing_part(&self, def: DefRef<'ctx>) -> Result<String, LinkageError<'ctx>> {
        match def.get().parent {
            DefParent::File(file) => {
                if file.package.is_empty() {
                    Ok(String::new())
                } else {
                    Ok(format!("{}.", file.package))
                }
            }
            DefParent::Def(parent) => Ok(format!("{}.", self.fq_name_unique(parent)?)),
        }
    }

    // Like the structural fq name, except function ancestors appear as their
    // whole symbol in angle brackets, so declarations nested in different
    // overloads stay apart.
    fn fq_name_unique(&self, def: DefRef<'ctx>) -> Result<String, LinkageError<'ctx>> {
        let prefix = self.unique_containing_part(def)?;
        let segment = match &def.get().kind {
            DefKind::Function(function) => {
                format!("<{}>", self.function_symbol_name(def, function)?)
            }
            _ => def.name.to_string(),
        };
        Ok(format!("{}{}", prefix, segment))
    }
}

fn containing_part(def: DefRef<'_>) -> String {
    match def.get().parent {
        DefParent::File(file) => {
            if file.package.is_empty() {
                String::new()
            } else {
                format!("{}.", file.package)
            }
        }
        DefParent::Def(parent) => format!("{}.", parent.fq_name()),
    }
}

fn strip_module_decoration(name: &str) -> &str {
    name.strip_prefix('<')
        .and_then(|stripped| stripped.strip_suffix('>'))
        .unwrap_or(name)
}

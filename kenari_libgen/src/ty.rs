use crate::errors::{LinkageError, LinkageErrorKind};
use kenari_ir::{DefKind, DefParent, DefRef, TypeArg, TypeUsage};

// An accessor stands in for its property wherever type-parameter ownership
// is concerned.
pub(crate) fn effective_container<'ctx>(
    def: DefRef<'ctx>,
) -> Result<DefRef<'ctx>, LinkageError<'ctx>> {
    if def.accessor_binding().is_none() {
        return Ok(def);
    }
    def.resolved_accessor_property()
        .ok_or(LinkageError::new(def, LinkageErrorKind::UnresolvedAccessorProperty))
}

/// The type-parameter-owning containers in scope of one declaration,
/// innermost first, indexed for the duration of a single mangle computation.
pub struct TypeParamScope<'ctx> {
    containers: Vec<DefRef<'ctx>>,
}

impl<'ctx> TypeParamScope<'ctx> {
    pub fn for_declaration(def: DefRef<'ctx>) -> Result<TypeParamScope<'ctx>, LinkageError<'ctx>> {
        let mut containers = Vec::new();
        let mut current = effective_container(def)?;
        loop {
            match &current.get().kind {
                DefKind::Function(..) | DefKind::Property(..) | DefKind::Class(..) => {
                    containers.push(current)
                }
                _ => break,
            }
            match current.get().parent {
                DefParent::Def(parent) => current = effective_container(parent)?,
                DefParent::File(..) => break,
            }
        }
        Ok(TypeParamScope { containers })
    }

    /// `{container-index}:{parameter-index}`. Position, never the source
    /// name: renaming a type parameter must not change linkage.
    pub fn positional_name(
        &self,
        type_param: DefRef<'ctx>,
    ) -> Result<String, LinkageError<'ctx>> {
        let Some(param) = type_param.type_param() else {
            return Err(LinkageError::new(
                type_param,
                LinkageErrorKind::UnexpectedClassifier,
            ));
        };
        let owner = match type_param.get().parent {
            DefParent::Def(parent) => effective_container(parent)?,
            DefParent::File(..) => {
                return Err(LinkageError::new(
                    type_param,
                    LinkageErrorKind::UnexpectedTypeParameterParent,
                ))
            }
        };
        let Some(container_index) = self.containers.iter().position(|c| *c == owner) else {
            return Err(LinkageError::new(
                type_param,
                LinkageErrorKind::TypeParameterOutOfScope,
            ));
        };
        Ok(format!("{}:{}", container_index, param.index))
    }
}

/// Canonical string form of a type usage. Pure and recursive; type-usage
/// trees are finite by upstream contract, so recursion terminates.
pub fn encode_type<'ctx>(
    ty: &TypeUsage<'ctx>,
    scope: &TypeParamScope<'ctx>,
) -> Result<String, LinkageError<'ctx>> {
    let classifier = match ty {
        TypeUsage::Dynamic => return Ok(String::from("<dynamic>")),
        TypeUsage::Classifier(classifier) => classifier,
    };

    let mut encoded = match &classifier.target.get().kind {
        DefKind::Class(..) => classifier.target.fq_name(),
        DefKind::TypeParameter(..) => scope.positional_name(classifier.target)?,
        _ => {
            return Err(LinkageError::new(
                classifier.target,
                LinkageErrorKind::UnexpectedClassifier,
            ))
        }
    };

    if !classifier.arguments.is_empty() {
        encoded.push('<');
        for (i, argument) in classifier.arguments.iter().enumerate() {
            if i > 0 {
                encoded.push(',');
            }
            match argument {
                TypeArg::Star => encoded.push('*'),
                TypeArg::Projection(variance, projected) => {
                    let label = variance.label();
                    if !label.is_empty() {
                        encoded.push_str(label);
                        encoded.push('|');
                    }
                    encoded.push_str(&encode_type(projected, scope)?);
                }
            }
        }
        encoded.push('>');
    }

    if classifier.nullable {
        encoded.push('?');
    }

    Ok(encoded)
}

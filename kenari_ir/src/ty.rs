use crate::def::{BuiltinClass, DefRef};

/// A reference to a type at a use site. Either a classifier (class or type
/// parameter) with nullability and arguments, or the unconstrained dynamic
/// type, which carries neither.
#[derive(Clone)]
pub enum TypeUsage<'a> {
    Classifier(ClassifierUsage<'a>),
    Dynamic,
}

#[derive(Clone)]
pub struct ClassifierUsage<'a> {
    pub target: DefRef<'a>,
    pub nullable: bool,
    pub arguments: Vec<TypeArg<'a>>,
}

#[derive(Clone)]
pub enum TypeArg<'a> {
    Star,
    Projection(Variance, TypeUsage<'a>),
}

#[derive(Clone, Copy, PartialEq, Eq)]
pub enum Variance {
    Invariant,
    In,
    Out,
}

impl Variance {
    pub fn label(self) -> &'static str {
        match self {
            Variance::Invariant => "",
            Variance::In => "in",
            Variance::Out => "out",
        }
    }
}

impl<'a> TypeUsage<'a> {
    pub fn classifier(target: DefRef<'a>) -> TypeUsage<'a> {
        TypeUsage::Classifier(ClassifierUsage {
            target,
            nullable: false,
            arguments: Vec::new(),
        })
    }

    pub fn nullable(self) -> TypeUsage<'a> {
        match self {
            TypeUsage::Classifier(mut usage) => {
                usage.nullable = true;
                TypeUsage::Classifier(usage)
            }
            TypeUsage::Dynamic => TypeUsage::Dynamic,
        }
    }

    pub fn with_arguments(self, arguments: Vec<TypeArg<'a>>) -> TypeUsage<'a> {
        match self {
            TypeUsage::Classifier(mut usage) => {
                usage.arguments = arguments;
                TypeUsage::Classifier(usage)
            }
            TypeUsage::Dynamic => TypeUsage::Dynamic,
        }
    }

    /// The unit/void classifier, non-nullable. `Unit?` is a real value type
    /// and does not count.
    pub fn is_unit(&self) -> bool {
        match self {
            TypeUsage::Classifier(usage) => {
                !usage.nullable
                    && usage
                        .target
                        .class()
                        .is_some_and(|class| class.builtin == Some(BuiltinClass::Unit))
            }
            TypeUsage::Dynamic => false,
        }
    }
}

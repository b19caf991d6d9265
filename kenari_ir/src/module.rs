use crate::arena::{IrArena, Symbol};
use crate::def::DefRef;
use std::cell::RefCell;

/// The unit of independent compilation. The name may carry the compiler
/// driver's `<bracket>` decoration; linkage-name computation strips it.
pub struct Module<'a> {
    pub name: Symbol<'a>,
    files: RefCell<Vec<&'a File<'a>>>,
}

impl<'a> Module<'a> {
    pub fn new(arena: &IrArena<'a>, name: &str) -> &'a Module<'a> {
        arena.alloc(Module {
            name: arena.symbol(name),
            files: RefCell::new(Vec::new()),
        })
    }

    pub fn add_file(&'a self, arena: &IrArena<'a>, path: &str, package: &str) -> &'a File<'a> {
        let file = arena.alloc(File {
            module: self,
            path: arena.symbol(path),
            package: arena.symbol(package),
            defs: RefCell::new(Vec::new()),
        });
        self.files.borrow_mut().push(file);
        file
    }

    pub fn files(&self) -> Vec<&'a File<'a>> {
        self.files.borrow().clone()
    }
}

impl<'a> std::fmt::Debug for Module<'a> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "module {}", self.name)
    }
}

/// A source file: ordered top-level declarations plus the package-qualified
/// name their structural paths start from.
pub struct File<'a> {
    pub module: &'a Module<'a>,
    pub path: Symbol<'a>,
    pub package: Symbol<'a>,
    defs: RefCell<Vec<DefRef<'a>>>,
}

impl<'a> File<'a> {
    pub fn defs(&self) -> Vec<DefRef<'a>> {
        self.defs.borrow().clone()
    }

    pub(crate) fn push_def(&self, def: DefRef<'a>) {
        self.defs.borrow_mut().push(def);
    }
}

impl<'a> std::fmt::Debug for File<'a> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "file {}", self.path)
    }
}

use kenari_ir::{IrArena, Module};

pub struct Context<'ctx> {
    pub arena: &'ctx IrArena<'ctx>,
    pub module: &'ctx Module<'ctx>,
}

impl<'ctx> Clone for Context<'ctx> {
    fn clone(&self) -> Self {
        Self {
            arena: self.arena,
            module: self.module,
        }
    }
}

impl<'ctx> Copy for Context<'ctx> {}

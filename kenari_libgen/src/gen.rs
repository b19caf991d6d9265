use crate::context::Context;
use crate::errors::SerializeError;
use crate::mangle::Mangler;
use kenari_ir::File;
use log::debug;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SerializedFile {
    pub path: String,
    pub package: String,
    pub data: Vec<u8>,
}

/// Ordered sequence of serialized files, order-preserving with respect to
/// the module's file sequence.
#[derive(Debug, Default)]
pub struct SerializedModule {
    files: Vec<SerializedFile>,
}

impl SerializedModule {
    pub fn files(&self) -> &[SerializedFile] {
        &self.files
    }

    pub fn into_files(self) -> Vec<SerializedFile> {
        self.files
    }

    pub fn len(&self) -> usize {
        self.files.len()
    }

    pub fn is_empty(&self) -> bool {
        self.files.is_empty()
    }
}

/// One backend's per-file encoder. It is handed the [`Mangler`] so it can
/// request linkage names and export classifications while encoding each
/// declaration; its own failures pass through [`SerializeError::File`]
/// unchanged.
pub trait FileSerializer<'ctx> {
    type Error;

    fn serialize_file(
        &mut self,
        mangler: &Mangler<'ctx>,
        file: &'ctx File<'ctx>,
    ) -> Result<SerializedFile, SerializeError<'ctx, Self::Error>>;
}

pub struct ModuleSerializer<'ctx, S> {
    ctx: Context<'ctx>,
    mangler: Mangler<'ctx>,
    file_serializer: S,
    file_filter: Box<dyn Fn(&'ctx File<'ctx>) -> bool + 'ctx>,
}

impl<'ctx, S: FileSerializer<'ctx>> ModuleSerializer<'ctx, S> {
    pub fn new(ctx: Context<'ctx>, file_serializer: S) -> Self {
        Self {
            ctx,
            mangler: Mangler::new(ctx),
            file_serializer,
            file_filter: Box::new(|_| true),
        }
    }

    /// Some files contain declarations a backend generates itself instead of
    /// deserializing; such a backend excludes them here.
    pub fn with_file_filter(mut self, filter: impl Fn(&'ctx File<'ctx>) -> bool + 'ctx) -> Self {
        self.file_filter = Box::new(filter);
        self
    }

    pub fn mangler(&self) -> &Mangler<'ctx> {
        &self.mangler
    }

    pub fn serialize_module(
        &mut self,
    ) -> Result<SerializedModule, SerializeError<'ctx, S::Error>> {
        let mut files = Vec::new();
        for file in self.ctx.module.files() {
            if is_function_interface_file(file) {
                debug!("skipping synthetic function interface file {}", file.path);
                continue;
            }
            if !(self.file_filter)(file) {
                debug!("file filter excluded {}", file.path);
                continue;
            }
            let serialized = self.file_serializer.serialize_file(&self.mangler, file)?;
            files.push(serialized);
        }
        Ok(SerializedModule { files })
    }
}

fn is_function_interface_file(file: &File<'_>) -> bool {
    let defs = file.defs();
    !defs.is_empty() && defs.iter().all(|def| def.is_synthetic_function_interface())
}

pub fn serialize_module<'ctx, S: FileSerializer<'ctx>>(
    ctx: Context<'ctx>,
    file_serializer: S,
) -> Result<SerializedModule, SerializeError<'ctx, S::Error>> {
    ModuleSerializer::new(ctx, file_serializer).serialize_module()
}

use oasgen_core::config::OasgenConfig;
use oasgen_core::ir::IrSpec;
use oasgen_core::{CodeGenerator, GeneratedFile, GeneratorError};

use crate::emitters;

/// Where the API description is copied inside the generated project.
pub const DOCUMENT_PATH: &str = "api/oas-doc.yaml";

/// Node.js/Express server stub generator.
#[derive(Debug, Clone, Default)]
pub struct ExpressServerGenerator {
    document: Option<String>,
}

impl ExpressServerGenerator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Ship the source document as `api/oas-doc.yaml`, which `index.js` loads at startup.
    pub fn with_document(mut self, text: impl Into<String>) -> Self {
        self.document = Some(text.into());
        self
    }
}

impl CodeGenerator for ExpressServerGenerator {
    fn generate(
        &self,
        ir: &IrSpec,
        config: &OasgenConfig,
    ) -> Result<Vec<GeneratedFile>, GeneratorError> {
        // Controllers first: they reject names index.js would otherwise embed.
        let mut files = emitters::controllers::emit_controllers(ir)?;
        files.push(emitters::entry::emit_entry(ir)?);
        files.extend(emitters::scaffold::emit_scaffold(&ir.info, &config.project)?);

        if let Some(text) = &self.document {
            files.push(GeneratedFile {
                path: DOCUMENT_PATH.to_string(),
                content: text.clone(),
            });
        }

        log::debug!(
            "generated {} files for {} controllers",
            files.len(),
            ir.groups.len()
        );
        Ok(files)
    }
}

//! Tera-based template renderer implementation

use std::collections::HashMap;
use tera::{Tera, Value};

use crate::generation::utils::title_case;
use crate::generation::{GenerationError, RenderContext};
use crate::infrastructure::templates::{SWEEPERS_TEMPLATE_NAME, SweeperTemplate};

/// Tera-based sweepers template renderer
pub struct TeraTemplateRenderer {
    tera: Tera,
}

impl TeraTemplateRenderer {
    /// Parse the template and register the helper filters
    pub fn new(template: &SweeperTemplate) -> Result<Self, GenerationError> {
        let mut tera = Tera::default();
        // Output is Go source, never HTML
        tera.autoescape_on(vec![]);
        tera.register_filter("title_case", title_case_filter);

        tera.add_raw_template(SWEEPERS_TEMPLATE_NAME, &template.content)
            .map_err(|e| {
                tracing::error!(source = %template.source, error = %e, "Failed to parse template");
                GenerationError::from(e)
            })?;

        Ok(Self { tera })
    }

    /// Render the template with the given context
    pub fn render(&self, context: &RenderContext<'_>) -> Result<String, GenerationError> {
        let tera_context = context.to_tera_context()?;
        let rendered = self.tera.render(SWEEPERS_TEMPLATE_NAME, &tera_context)?;
        Ok(rendered)
    }
}

fn title_case_filter(value: &Value, _args: &HashMap<String, Value>) -> tera::Result<Value> {
    let s = tera::try_get_value!("title_case", "value", String, value);
    Ok(Value::String(title_case(&s)))
}

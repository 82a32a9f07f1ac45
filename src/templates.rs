use std::collections::HashMap;
use std::sync::Arc;

use tera::Tera;

use crate::config::TEMPLATE_GLOB;
use crate::error::AppError;
use crate::i18n::{Language, TranslationStore};

/// Initialize the Tera template engine
pub fn init_templates(store: Arc<TranslationStore>) -> Result<Tera, AppError> {
    let mut tera = Tera::new(TEMPLATE_GLOB)?;

    tera.register_function("t", translate_fn(store));

    Ok(tera)
}

/// Build the `t` template function: `{{ t(key="welcome", lang=lang) }}`
/// resolves `welcome` in the given language. `lang` is optional and
/// defaults to the default language's code.
fn translate_fn(
    store: Arc<TranslationStore>,
) -> impl Fn(&HashMap<String, tera::Value>) -> tera::Result<tera::Value> + Send + Sync + 'static {
    move |args| {
        let key = args
            .get("key")
            .and_then(|v| v.as_str())
            .ok_or_else(|| tera::Error::msg("t function expects a `key` argument"))?;

        let lang = args
            .get("lang")
            .and_then(|v| v.as_str())
            .unwrap_or_else(|| Language::default().code());

        Ok(tera::Value::String(store.translate(key, lang)))
    }
}

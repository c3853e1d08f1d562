use handlebars::{Handlebars, TemplateError};
use std::sync::Arc;

pub type Hbs = Arc<Handlebars<'static>>;

const TEMPLATES: &[(&str, &str)] = &[
    ("layouts/base", include_str!("../../templates/layouts/base.hbs")),
    ("pages/dashboard", include_str!("../../templates/pages/dashboard.hbs")),
    ("pages/error", include_str!("../../templates/pages/error.hbs")),
    ("pages/not_found", include_str!("../../templates/pages/not_found.hbs")),
    ("partials/history", include_str!("../../templates/partials/history.hbs")),
];

pub fn build_handlebars() -> Result<Hbs, TemplateError> {
    let mut hb = Handlebars::new();

    for (name, source) in TEMPLATES {
        hb.register_template_string(name, *source)?;
    }

    Ok(Arc::new(hb))
}

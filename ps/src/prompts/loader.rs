//! Prompt Loader
//!
//! Templates come from the `prompts.dir` override directory when a file
//! named `{name}.pmt` exists there, and from the embedded set otherwise.
//! Rendering is strict: a template that names a variable the context does
//! not have is an error rather than a prompt with a hole in it.

use std::fmt;
use std::path::PathBuf;

use eyre::{Result, eyre};
use handlebars::Handlebars;
use serde::Serialize;
use tracing::debug;

use super::embedded;

/// Where a template's source came from
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TemplateOrigin {
    Override(PathBuf),
    Embedded,
}

impl fmt::Display for TemplateOrigin {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Override(path) => write!(f, "{}", path.display()),
            Self::Embedded => write!(f, "embedded"),
        }
    }
}

pub struct PromptLoader {
    hbs: Handlebars<'static>,
    override_dir: Option<PathBuf>,
}

impl PromptLoader {
    /// Loader that checks `override_dir` before the embedded prompts
    ///
    /// A directory that does not exist is ignored.
    pub fn new(override_dir: Option<PathBuf>) -> Self {
        let override_dir = override_dir.filter(|dir| {
            let usable = dir.is_dir();
            if !usable {
                debug!(?dir, "PromptLoader::new: override directory missing, ignoring");
            }
            usable
        });

        let mut hbs = Handlebars::new();
        hbs.set_strict_mode(true);
        Self { hbs, override_dir }
    }

    pub fn embedded_only() -> Self {
        Self::new(None)
    }

    /// Template source for `name` and where it was found
    pub fn resolve(&self, name: &str) -> Result<(String, TemplateOrigin)> {
        let candidate = self.override_dir.as_ref().map(|dir| dir.join(format!("{}.pmt", name)));
        if let Some(path) = candidate.filter(|p| p.is_file()) {
            let source = std::fs::read_to_string(&path)
                .map_err(|e| eyre!("Failed to read prompt override {}: {}", path.display(), e))?;
            return Ok((source, TemplateOrigin::Override(path)));
        }

        embedded::get_embedded(name)
            .map(|source| (source.to_string(), TemplateOrigin::Embedded))
            .ok_or_else(|| eyre!("Unknown prompt template: {}", name))
    }

    pub fn render<T: Serialize>(&self, name: &str, context: &T) -> Result<String> {
        let (source, origin) = self.resolve(name)?;
        debug!(%name, %origin, "PromptLoader::render: called");
        self.hbs
            .render_template(&source, context)
            .map_err(|e| eyre!("Failed to render prompt {} ({}): {}", name, origin, e))
    }
}

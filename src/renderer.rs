//! Process-wide template cache.
//!
//! Templates are parsed once at startup and kept in memory. [`Renderer::reload`]
//! re-reads them from disk on demand; a failed reload keeps the previous set.

use std::sync::{PoisonError, RwLock};

use tera::{Context, Tera};

pub struct Renderer {
    tera: RwLock<Tera>,
}

impl Renderer {
    /// Parses every template matching `glob`, e.g. `templates/**/*`.
    pub fn new(glob: &str) -> Result<Self, tera::Error> {
        Ok(Self::from_tera(Tera::new(glob)?))
    }

    pub fn from_tera(tera: Tera) -> Self {
        Self {
            tera: RwLock::new(tera),
        }
    }

    pub fn render(&self, template: &str, context: &Context) -> Result<String, tera::Error> {
        self.tera
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .render(template, context)
    }

    /// Re-parses the templates from the glob the renderer was built with.
    pub fn reload(&self) -> Result<(), tera::Error> {
        let mut fresh = self
            .tera
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone();
        fresh.full_reload()?;

        *self.tera.write().unwrap_or_else(PoisonError::into_inner) = fresh;
        Ok(())
    }
}

/// Reloads the templates every time the process receives `SIGHUP`.
#[cfg(unix)]
pub async fn reload_on_hangup(renderer: std::sync::Arc<Renderer>) {
    use tokio::signal::unix::{SignalKind, signal};

    let mut hangups = match signal(SignalKind::hangup()) {
        Ok(stream) => stream,
        Err(err) => {
            log::error!("Failed to listen for hangup signal: {err}");
            return;
        }
    };

    while hangups.recv().await.is_some() {
        match renderer.reload() {
            Ok(()) => log::info!("Templates reloaded"),
            Err(err) => log::error!("Template reload failed, keeping previous templates: {err}"),
        }
    }
}

#[cfg(test)]
mod tests {
    use std::fs;

    use super::*;

    #[test]
    fn renders_cached_template() {
        let mut tera = Tera::default();
        tera.add_raw_template("hello.html", "Hello, {{ name }}!")
            .unwrap();
        let renderer = Renderer::from_tera(tera);

        let mut context = Context::new();
        context.insert("name", "reader");

        assert_eq!(renderer.render("hello.html", &context).unwrap(), "Hello, reader!");
    }

    #[test]
    fn unknown_template_is_an_error() {
        let renderer = Renderer::from_tera(Tera::default());
        assert!(renderer.render("missing.html", &Context::new()).is_err());
    }

    #[test]
    fn reload_picks_up_changes_on_disk() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("page.html");
        fs::write(&path, "first").unwrap();
        let glob = format!("{}/*.html", dir.path().display());
        let renderer = Renderer::new(&glob).unwrap();

        fs::write(&path, "second").unwrap();
        assert_eq!(renderer.render("page.html", &Context::new()).unwrap(), "first");

        renderer.reload().unwrap();
        assert_eq!(renderer.render("page.html", &Context::new()).unwrap(), "second");
    }

    #[test]
    fn failed_reload_keeps_previous_templates() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("page.html");
        fs::write(&path, "intact").unwrap();
        let glob = format!("{}/*.html", dir.path().display());
        let renderer = Renderer::new(&glob).unwrap();

        fs::write(&path, "{% if %}").unwrap();

        assert!(renderer.reload().is_err());
        assert_eq!(renderer.render("page.html", &Context::new()).unwrap(), "intact");
    }
}

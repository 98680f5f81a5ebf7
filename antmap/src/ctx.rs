//! Application context and state management.
//!
//! [`AppContext`] holds what lives across menu actions: the configuration,
//! the active message table, the loaded antenna graph and the most recently
//! computed effect positions.

use std::path::{Path, PathBuf};

use anyhow::Context;
use antgrid::{EffectSet, Graph};

use crate::{
    config::AppConfig,
    lang::{MessageId, Messages},
};

/// The main application context holding all state.
#[derive(Debug, Clone, Default)]
pub struct AppContext {
    /// Effective configuration.
    pub config: AppConfig,
    /// Active message table.
    pub messages: Messages,
    /// Graph of the loaded map, if any.
    pub graph: Option<Graph>,
    /// File the graph was loaded from.
    pub source: Option<PathBuf>,
    /// Last computed effect positions.
    pub effects: EffectSet,
}

impl AppContext {
    /// Creates a context, loading message overrides if configured.
    ///
    /// A broken override file is reported and the built-in table is used.
    pub fn new(config: AppConfig) -> Self {
        let messages = match &config.messages {
            Some(path) => Messages::with_overrides(config.language, path).unwrap_or_else(|e| {
                warn!("{e:#}, falling back to built-in messages");
                Messages::new(config.language)
            }),
            None => Messages::new(config.language),
        };
        Self {
            config,
            messages,
            ..Default::default()
        }
    }

    pub fn tr(&self, id: MessageId) -> &str {
        self.messages.tr(id)
    }

    /// Resolves a file name against the input directory.
    ///
    /// Absolute paths are returned unchanged.
    pub fn input_path(&self, name: impl AsRef<Path>) -> PathBuf {
        self.config.input_dir.join(name)
    }

    /// Resolves a file name against the output directory, creating it.
    pub fn output_path(&self, name: impl AsRef<Path>) -> anyhow::Result<PathBuf> {
        let dir = &self.config.output_dir;
        std::fs::create_dir_all(dir)
            .with_context(|| format!("Failed to create output dir {}", dir.display()))?;
        Ok(dir.join(name))
    }

    /// Loads a map file, replacing the current graph.
    pub fn load_graph(&mut self, path: impl AsRef<Path>) -> anyhow::Result<&Graph> {
        let path = path.as_ref();
        let graph = Graph::load(path)?;
        info!(
            "loaded {}: {} antennas, {} links",
            path.display(),
            graph.vertex_count(),
            graph.edge_count()
        );
        self.source = Some(path.to_path_buf());
        self.effects.clear();
        Ok(self.graph.insert(graph))
    }

    /// The loaded graph.
    ///
    /// # Errors
    ///
    /// Fails with the localized "no file loaded" message.
    pub fn graph(&self) -> anyhow::Result<&Graph> {
        self.graph
            .as_ref()
            .ok_or_else(|| anyhow!("{}", self.messages.tr(MessageId::ErrNoFileLoaded)))
    }

    /// Mutable access to the loaded graph. Invalidates cached effects.
    pub fn graph_mut(&mut self) -> anyhow::Result<&mut Graph> {
        self.effects.clear();
        let msg = self.messages.tr(MessageId::ErrNoFileLoaded).to_string();
        self.graph.as_mut().ok_or_else(|| anyhow!(msg))
    }

    /// Recomputes the effect positions of the loaded graph.
    pub fn refresh_effects(&mut self) -> anyhow::Result<&EffectSet> {
        self.effects = self.graph()?.effect_positions();
        Ok(&self.effects)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lang::Language;

    #[test]
    fn test_graph_required() {
        let mut ctx = AppContext::new(AppConfig {
            language: Language::Pt,
            ..Default::default()
        });
        let err = ctx.graph().unwrap_err();
        assert_eq!(err.to_string(), "Erro - ficheiro nao carregado");
        assert!(ctx.refresh_effects().is_err());
        assert!(ctx.graph_mut().is_err());
    }

    #[test]
    fn test_load_and_effects() {
        let dir = tempfile::tempdir().unwrap();
        let map = dir.path().join("map.txt");
        std::fs::write(&map, "a...\n....\n..a.\n").unwrap();

        let mut ctx = AppContext::new(AppConfig {
            input_dir: dir.path().to_path_buf(),
            output_dir: dir.path().join("out"),
            ..Default::default()
        });
        ctx.load_graph(ctx.input_path("map.txt")).unwrap();
        assert_eq!(ctx.graph().unwrap().vertex_count(), 2);
        assert_eq!(ctx.refresh_effects().unwrap().len(), 2);

        ctx.graph_mut().unwrap().insert_vertex('b', 0, 3).unwrap();
        assert!(ctx.effects.is_empty());

        let out = ctx.output_path("x.txt").unwrap();
        assert!(out.parent().unwrap().is_dir());
    }

    #[test]
    fn test_broken_messages_fall_back() {
        let ctx = AppContext::new(AppConfig {
            messages: Some(PathBuf::from("/nonexistent/messages.json")),
            ..Default::default()
        });
        assert_eq!(ctx.tr(MessageId::Quit), "Good-bye!");
    }
}

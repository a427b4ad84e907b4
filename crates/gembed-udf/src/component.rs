//! Component life cycle: register both functions on load, remove them on
//! unload.

use std::sync::Arc;

use gembed_core::logging::LOG_TARGET;
use gembed_engine::EmbeddingEngine;
use gembed_settings::UdfSettings;
use tracing::{error, info};

use crate::errors::RegistrationError;
use crate::function::ScalarFunction;
use crate::functions::{EmbedText, EmbedTexts};
use crate::registry::UdfRegistrar;

/// SQL name of the single-text function.
pub const EMBED_TEXT: &str = "EMBED_TEXT";

/// SQL name of the batch function.
pub const EMBED_TEXTS: &str = "EMBED_TEXTS";

/// The loadable component: an engine plus the limits both functions use.
pub struct GembedComponent {
    engine: Arc<dyn EmbeddingEngine>,
    settings: UdfSettings,
}

impl GembedComponent {
    /// Create a component around `engine`.
    pub fn new(engine: Arc<dyn EmbeddingEngine>, settings: UdfSettings) -> Self {
        Self { engine, settings }
    }

    /// The functions this component provides, in registration order.
    pub fn functions(&self) -> [Arc<dyn ScalarFunction>; 2] {
        [
            Arc::new(EmbedText::new(self.engine.clone(), &self.settings)),
            Arc::new(EmbedTexts::new(self.engine.clone(), &self.settings)),
        ]
    }

    /// Register `EMBED_TEXT` then `EMBED_TEXTS`.
    ///
    /// If the second registration fails the first is rolled back, so the
    /// host never sees only one of the two.
    pub fn init(&self, registrar: &mut dyn UdfRegistrar) -> Result<(), RegistrationError> {
        info!(target: LOG_TARGET, "initializing...");
        let [embed_text, embed_texts] = self.functions();

        if let Err(e) = registrar.register(embed_text) {
            error!(
                target: LOG_TARGET,
                function = EMBED_TEXT,
                error = %e,
                "failed to register function"
            );
            return Err(e);
        }
        if let Err(e) = registrar.register(embed_texts) {
            error!(
                target: LOG_TARGET,
                function = EMBED_TEXTS,
                error = %e,
                "failed to register function"
            );
            let _ = registrar.unregister(EMBED_TEXT);
            return Err(e);
        }

        info!(target: LOG_TARGET, "functions registered successfully");
        Ok(())
    }

    /// Unregister both functions. Missing functions are not an error.
    pub fn deinit(&self, registrar: &mut dyn UdfRegistrar) {
        info!(target: LOG_TARGET, "shutting down...");
        let embed_text = registrar.unregister(EMBED_TEXT);
        let embed_texts = registrar.unregister(EMBED_TEXTS);
        info!(target: LOG_TARGET, embed_text, embed_texts, "functions unregistered");
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use crate::registry::FunctionRegistry;
    use gembed_core::logging::capture_logs;
    use gembed_engine::StubEngine;
    use tracing::Level;

    fn component() -> GembedComponent {
        GembedComponent::new(Arc::new(StubEngine::new(4)), UdfSettings::default())
    }

    /// Refuses one name, delegates everything else.
    struct Refusing {
        inner: FunctionRegistry,
        refuse: &'static str,
    }

    impl UdfRegistrar for Refusing {
        fn register(&mut self, function: Arc<dyn ScalarFunction>) -> Result<(), RegistrationError> {
            if function.name() == self.refuse {
                return Err(RegistrationError::Rejected {
                    name: self.refuse.to_owned(),
                    reason: "refused".into(),
                });
            }
            self.inner.register(function)
        }

        fn unregister(&mut self, name: &str) -> bool {
            self.inner.unregister(name)
        }
    }

    #[test]
    fn init_registers_both() {
        let mut registry = FunctionRegistry::new();
        component().init(&mut registry).unwrap();
        assert_eq!(
            registry.names(),
            vec![EMBED_TEXT.to_owned(), EMBED_TEXTS.to_owned()]
        );
    }

    #[test]
    fn second_failure_rolls_back_first() {
        let mut registrar = Refusing {
            inner: FunctionRegistry::new(),
            refuse: EMBED_TEXTS,
        };
        let (logs, _guard) = capture_logs();

        assert!(component().init(&mut registrar).is_err());
        assert!(registrar.inner.is_empty());
        assert!(logs.has_event(Level::ERROR, "failed to register function"));
        assert!(!logs.has_event(Level::INFO, "functions registered successfully"));
    }

    #[test]
    fn first_failure_registers_nothing() {
        let mut registrar = Refusing {
            inner: FunctionRegistry::new(),
            refuse: EMBED_TEXT,
        };
        assert!(component().init(&mut registrar).is_err());
        assert!(registrar.inner.is_empty());
    }

    #[test]
    fn deinit_unregisters_both() {
        let mut registry = FunctionRegistry::new();
        let component = component();
        component.init(&mut registry).unwrap();
        component.deinit(&mut registry);
        assert!(registry.is_empty());

        // second unload is harmless
        component.deinit(&mut registry);
    }

    #[test]
    fn lifecycle_logs() {
        let (logs, _guard) = capture_logs();
        let mut registry = FunctionRegistry::new();
        let component = component();
        component.init(&mut registry).unwrap();
        component.deinit(&mut registry);

        assert!(logs.has_event(Level::INFO, "initializing..."));
        assert!(logs.has_event(Level::INFO, "functions registered successfully"));
        assert!(logs.has_event(Level::INFO, "shutting down..."));
        assert!(logs.has_event(Level::INFO, "functions unregistered"));
    }
}

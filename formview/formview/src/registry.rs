//! Field type to renderer resolution.

use std::{
    collections::BTreeMap,
    fmt,
    sync::{Arc, PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard},
};

#[cfg(feature = "html")]
use formview_core::FieldKind;
use formview_core::{Field, FieldRenderer, FieldType};
#[cfg(feature = "html")]
use formview_html::TypedFieldRenderer;

use crate::error::RegistryError;

/// Priority used by [`ComponentRegistry::register`] and the built-in bindings.
pub const DEFAULT_PRIORITY: i32 = 100;

/// Priority of the built-in catch-all fallback.
pub const FALLBACK_PRIORITY: i32 = 1;

/// One renderer binding.
#[derive(Clone)]
pub struct ComponentConfig {
    pub renderer: Arc<dyn FieldRenderer>,
    /// Higher wins; an existing binding is only replaced by a strictly higher one.
    pub priority: i32,
    /// Also consult this renderer for types without a direct binding.
    pub fallback: bool,
    pub description: String,
}

impl ComponentConfig {
    pub fn new(renderer: Arc<dyn FieldRenderer>) -> Self {
        let description = renderer.describe();
        Self {
            renderer,
            priority: DEFAULT_PRIORITY,
            fallback: false,
            description,
        }
    }

    pub fn with_priority(mut self, priority: i32) -> Self {
        self.priority = priority;
        self
    }

    pub fn with_fallback(mut self, fallback: bool) -> Self {
        self.fallback = fallback;
        self
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }
}

impl fmt::Debug for ComponentConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ComponentConfig")
            .field("renderer", &self.renderer.describe())
            .field("priority", &self.priority)
            .field("fallback", &self.fallback)
            .field("description", &self.description)
            .finish()
    }
}

#[derive(Default)]
struct RegistryInner {
    mappings: BTreeMap<FieldType, ComponentConfig>,
    fallbacks: Vec<ComponentConfig>,
    defaults_registered: bool,
}

impl RegistryInner {
    fn register(
        &mut self,
        field_type: FieldType,
        config: ComponentConfig,
    ) -> Result<(), RegistryError> {
        if let Some(existing) = self.mappings.get(&field_type)
            && existing.priority >= config.priority
        {
            tracing::warn!(
                field_type = %field_type,
                existing = existing.priority,
                attempted = config.priority,
                "rejected renderer registration with lower priority"
            );
            return Err(RegistryError::LowerPriority {
                field_type,
                existing: existing.priority,
                attempted: config.priority,
            });
        }

        self.insert(field_type, config);
        Ok(())
    }

    fn insert(&mut self, field_type: FieldType, config: ComponentConfig) {
        tracing::debug!(
            field_type = %field_type,
            priority = config.priority,
            fallback = config.fallback,
            "registered renderer"
        );
        if config.fallback {
            self.fallbacks.push(config.clone());
        }
        self.mappings.insert(field_type, config);
    }

    fn register_fallback(&mut self, config: ComponentConfig) {
        tracing::debug!(
            priority = config.priority,
            description = %config.description,
            "registered fallback renderer"
        );
        self.fallbacks.push(config);
    }

    #[cfg(feature = "html")]
    fn register_defaults(&mut self) {
        const BASIC: &[(FieldType, FieldKind)] = &[
            (FieldType::Text, FieldKind::Text),
            (FieldType::Email, FieldKind::Email),
            (FieldType::Password, FieldKind::Password),
            (FieldType::Number, FieldKind::Number),
            (FieldType::Phone, FieldKind::Tel),
            (FieldType::Url, FieldKind::Url),
            (FieldType::Hidden, FieldKind::Text),
        ];
        const DATE_TIME: &[(FieldType, FieldKind)] = &[
            (FieldType::Date, FieldKind::Date),
            (FieldType::Time, FieldKind::Time),
            (FieldType::DateTime, FieldKind::DateTime),
            (FieldType::DateRange, FieldKind::DateRange),
        ];
        const SELECTION: &[(FieldType, FieldKind)] = &[
            (FieldType::Select, FieldKind::Select),
            (FieldType::MultiSelect, FieldKind::MultiSelect),
            (FieldType::Radio, FieldKind::Radio),
            (FieldType::Checkbox, FieldKind::Checkbox),
            (FieldType::Checkboxes, FieldKind::CheckboxGroup),
        ];
        const TEXT_CONTENT: &[(FieldType, FieldKind)] =
            &[(FieldType::Textarea, FieldKind::Textarea)];
        const SPECIALIZED: &[(FieldType, FieldKind)] = &[
            (FieldType::AutoComplete, FieldKind::AutoComplete),
            (FieldType::Color, FieldKind::Color),
            (FieldType::File, FieldKind::File),
            (FieldType::Slider, FieldKind::Range),
            (FieldType::Tags, FieldKind::Tags),
        ];

        let groups = [
            ("Basic input", BASIC),
            ("Date/time input", DATE_TIME),
            ("Selection input", SELECTION),
            ("Text content input", TEXT_CONTENT),
            ("Specialized input", SPECIALIZED),
        ];
        for (family, bindings) in groups {
            for (field_type, kind) in bindings {
                let config = ComponentConfig::new(Arc::new(TypedFieldRenderer::new(*kind)))
                    .with_description(format!("{family} for {field_type}"));
                if let Some(existing) = self.mappings.get(field_type)
                    && existing.priority >= config.priority
                {
                    tracing::debug!(
                        field_type = %field_type,
                        existing = existing.priority,
                        "kept caller binding over built-in default"
                    );
                    continue;
                }
                self.insert(field_type.clone(), config);
            }
        }

        self.register_fallback(
            ComponentConfig::new(Arc::new(TypedFieldRenderer::new(FieldKind::Text)))
                .with_priority(FALLBACK_PRIORITY)
                .with_fallback(true)
                .with_description("Fallback text renderer for unsupported field types"),
        );
    }

    #[cfg(not(feature = "html"))]
    fn register_defaults(&mut self) {
        tracing::debug!("no built-in renderers compiled in");
    }
}

/// Thread-safe table resolving field types to renderers.
///
/// Direct bindings are consulted first, then fallbacks in registration
/// order. Registration and resolution may race; both go through one
/// readers-writer lock.
#[derive(Default)]
pub struct ComponentRegistry {
    inner: RwLock<RegistryInner>,
}

impl ComponentRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registry with the built-in bindings already registered.
    pub fn with_defaults() -> Self {
        let registry = Self::new();
        registry.register_defaults();
        registry
    }

    pub fn builder() -> ComponentRegistryBuilder {
        ComponentRegistryBuilder::default()
    }

    fn read(&self) -> RwLockReadGuard<'_, RegistryInner> {
        self.inner.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write(&self) -> RwLockWriteGuard<'_, RegistryInner> {
        self.inner.write().unwrap_or_else(PoisonError::into_inner)
    }

    /// Bind `renderer` to `field_type` at [`DEFAULT_PRIORITY`].
    pub fn register(
        &self,
        field_type: FieldType,
        renderer: Arc<dyn FieldRenderer>,
    ) -> Result<(), RegistryError> {
        let description = format!("Renderer for {field_type} fields");
        let config = ComponentConfig::new(renderer).with_description(description);
        self.write().register(field_type, config)
    }

    /// Bind `config` to `field_type`.
    ///
    /// Fails when the existing binding has an equal or higher priority. A
    /// config flagged as fallback is also appended to the fallback chain.
    pub fn register_with_config(
        &self,
        field_type: FieldType,
        config: ComponentConfig,
    ) -> Result<(), RegistryError> {
        self.write().register(field_type, config)
    }

    /// Append a renderer to the fallback chain without binding any type.
    pub fn register_fallback(&self, config: ComponentConfig) {
        self.write().register_fallback(config);
    }

    /// Register the built-in bindings. Later calls are no-ops.
    pub fn register_defaults(&self) {
        let mut inner = self.write();
        if inner.defaults_registered {
            return;
        }
        inner.defaults_registered = true;
        inner.register_defaults();
    }

    pub fn defaults_registered(&self) -> bool {
        self.read().defaults_registered
    }

    /// Renderer for `field`.
    pub fn resolve(&self, field: &Field) -> Result<Arc<dyn FieldRenderer>, RegistryError> {
        self.resolve_type(&field.field_type)
    }

    /// Renderer for `field_type`: the direct binding, else the first fallback
    /// that supports the type.
    pub fn resolve_type(
        &self,
        field_type: &FieldType,
    ) -> Result<Arc<dyn FieldRenderer>, RegistryError> {
        let inner = self.read();
        if let Some(config) = inner.mappings.get(field_type) {
            return Ok(Arc::clone(&config.renderer));
        }

        let fallback = inner
            .fallbacks
            .iter()
            .find(|config| config.renderer.supports_type(field_type));
        match fallback {
            Some(config) => {
                tracing::trace!(
                    field_type = %field_type,
                    renderer = %config.description,
                    "resolved through fallback"
                );
                Ok(Arc::clone(&config.renderer))
            }
            None => Err(RegistryError::NoRenderer {
                field_type: field_type.clone(),
            }),
        }
    }

    /// Types with a direct binding, sorted.
    pub fn supported_types(&self) -> Vec<FieldType> {
        self.read().mappings.keys().cloned().collect()
    }

    /// Description of the binding for each directly bound type.
    pub fn renderer_info(&self) -> BTreeMap<FieldType, String> {
        self.read()
            .mappings
            .iter()
            .map(|(field_type, config)| (field_type.clone(), config.description.clone()))
            .collect()
    }

    /// Priority of the binding for `field_type`, if any.
    pub fn priority_of(&self, field_type: &FieldType) -> Option<i32> {
        self.read().mappings.get(field_type).map(|c| c.priority)
    }

    /// Descriptions of the fallback chain in consultation order.
    pub fn fallback_info(&self) -> Vec<String> {
        self.read()
            .fallbacks
            .iter()
            .map(|c| c.description.clone())
            .collect()
    }
}

impl fmt::Debug for ComponentRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let inner = self.read();
        f.debug_struct("ComponentRegistry")
            .field("mappings", &inner.mappings)
            .field("fallbacks", &inner.fallbacks)
            .field("defaults_registered", &inner.defaults_registered)
            .finish()
    }
}

/// Builder for configuring a [`ComponentRegistry`].
#[derive(Default)]
pub struct ComponentRegistryBuilder {
    bindings: Vec<(FieldType, ComponentConfig)>,
    fallbacks: Vec<ComponentConfig>,
    defaults: bool,
}

impl ComponentRegistryBuilder {
    /// Bind a renderer at [`DEFAULT_PRIORITY`].
    pub fn with_renderer(self, field_type: FieldType, renderer: Arc<dyn FieldRenderer>) -> Self {
        let description = format!("Renderer for {field_type} fields");
        self.with_config(
            field_type,
            ComponentConfig::new(renderer).with_description(description),
        )
    }

    pub fn with_config(mut self, field_type: FieldType, config: ComponentConfig) -> Self {
        self.bindings.push((field_type, config));
        self
    }

    pub fn with_fallback(mut self, config: ComponentConfig) -> Self {
        self.fallbacks.push(config);
        self
    }

    /// Register the built-in bindings after the explicit ones.
    pub fn with_defaults(mut self) -> Self {
        self.defaults = true;
        self
    }

    /// Build the registry. Explicit bindings are applied in order, so a
    /// conflicting lower-priority binding fails the build.
    pub fn build(self) -> Result<ComponentRegistry, RegistryError> {
        let registry = ComponentRegistry::new();
        for (field_type, config) in self.bindings {
            registry.register_with_config(field_type, config)?;
        }
        for config in self.fallbacks {
            registry.register_fallback(config);
        }
        if self.defaults {
            registry.register_defaults();
        }
        Ok(registry)
    }
}

//! Library — the cross-device index of Domains → Dimensions → Entities → Actions.
//!
//! Domains, dimensions, and entities are content-addressed by slug and
//! created lazily on first reference. A dimension's scope is inferred from
//! its first action and never changes afterwards: every later action must
//! match it, so a dimension is either entirely domain-only or entirely
//! entity-scoped.
//!
//! [`Library::add_device`] is transactional: all of a device's bindings are
//! staged and checked against the live index before anything is inserted, so
//! a failed call leaves no partially resolved domains, dimensions, or
//! actions behind.

use std::collections::{BTreeMap, BTreeSet};

use crate::device::{Binding, Device, Field};
use crate::error::{RegbindError, ReferenceError, ScopeConflictError};
use crate::schema::{GeneratorSpec, LibraryDoc, LibrarySpec};
use crate::slug::{DOMAIN_ONLY_ENTITY, Slug};

/// Whether a dimension's actions address entities or the domain as a whole.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DimensionScope {
    /// No action bound yet.
    Undefined,
    /// Every action uses the domain-only sentinel entity.
    DomainOnly,
    /// Every action names a specific entity.
    Entity,
}

impl DimensionScope {
    /// The scope after admitting an action bound to `entity`, or a conflict
    /// error when the entity's domain-only-ness contradicts the scope
    /// already inferred for `dimension`.
    fn admit(self, dimension: &Slug, entity: &Slug) -> Result<Self, ScopeConflictError> {
        let domain_only = entity.is_domain_only_entity();
        match (self, domain_only) {
            (Self::DomainOnly, false) => Err(ScopeConflictError::EntityInDomainOnly {
                dimension: dimension.clone(),
                entity: entity.clone(),
            }),
            (Self::Entity, true) => Err(ScopeConflictError::DomainOnlyInEntity {
                dimension: dimension.clone(),
            }),
            (Self::Undefined, true) => Ok(Self::DomainOnly),
            (Self::Undefined, false) => Ok(Self::Entity),
            (scope, _) => Ok(scope),
        }
    }
}

/// One field's binding realized at a `(device, entity)` coordinate.
///
/// Owns a clone of the bound field; fields are immutable once built, so the
/// clone stays a faithful view without referencing back into the device tree.
#[derive(Debug, Clone)]
pub struct Action {
    /// Device the bound field belongs to.
    pub device: Slug,
    /// Entity the action addresses, or the domain-only sentinel.
    pub entity: Slug,
    /// The bound field.
    pub field: Field,
}

/// A semantic axis within a domain, e.g. `temperature`.
#[derive(Debug, Clone)]
pub struct Dimension {
    slug: Slug,
    scope: DimensionScope,
    actions: BTreeMap<(Slug, Slug), Action>,
}

impl Dimension {
    fn new(slug: Slug) -> Self {
        Self {
            slug,
            scope: DimensionScope::Undefined,
            actions: BTreeMap::new(),
        }
    }

    /// Slug of this dimension.
    #[must_use]
    pub fn slug(&self) -> &Slug {
        &self.slug
    }

    /// Scope inferred from the first action, [`DimensionScope::Undefined`]
    /// while no action is bound.
    #[must_use]
    pub fn scope(&self) -> DimensionScope {
        self.scope
    }

    /// All actions, ordered by `(device, entity)` coordinate.
    pub fn actions(&self) -> impl Iterator<Item = &Action> {
        self.actions.values()
    }

    /// Number of actions bound to this dimension.
    #[must_use]
    pub fn action_count(&self) -> usize {
        self.actions.len()
    }

    /// Whether any bound field is read-capable.
    #[must_use]
    pub fn has_read_action(&self) -> bool {
        self.actions.values().any(|action| action.field.can_read())
    }

    /// Whether any bound field is write-capable.
    #[must_use]
    pub fn has_write_action(&self) -> bool {
        self.actions.values().any(|action| action.field.can_write())
    }

    fn add_action(&mut self, device: Slug, entity: Slug, field: Field) -> Result<(), RegbindError> {
        let coordinate = (device, entity);
        if self.actions.contains_key(&coordinate) {
            return Err(ReferenceError::DuplicateAction {
                dimension: self.slug.clone(),
                device: coordinate.0,
                entity: coordinate.1,
            }
            .into());
        }
        self.scope = self.scope.admit(&self.slug, &coordinate.1)?;
        let (device, entity) = coordinate;
        self.actions.insert(
            (device.clone(), entity.clone()),
            Action {
                device,
                entity,
                field,
            },
        );
        Ok(())
    }
}

/// A named instance within a domain, or the reserved domain-only sentinel.
#[derive(Debug, Clone)]
pub struct Entity {
    /// Slug of this entity.
    pub slug: Slug,
    /// Whether this is the reserved domain-only sentinel.
    pub is_domain_only: bool,
}

impl Entity {
    fn new(slug: Slug) -> Self {
        let is_domain_only = slug.is_domain_only_entity();
        Self {
            slug,
            is_domain_only,
        }
    }
}

/// A namespace of dimensions and entities, identified by slug.
#[derive(Debug, Clone)]
pub struct Domain {
    slug: Slug,
    is_root: bool,
    dimensions: BTreeMap<Slug, Dimension>,
    domain_only_entity: Entity,
    entities: BTreeMap<Slug, Entity>,
}

impl Domain {
    fn new(slug: Slug) -> Self {
        let is_root = slug.is_root_domain();
        Self {
            slug,
            is_root,
            dimensions: BTreeMap::new(),
            domain_only_entity: Entity::new(Slug::new(DOMAIN_ONLY_ENTITY)),
            entities: BTreeMap::new(),
        }
    }

    /// Slug of this domain.
    #[must_use]
    pub fn slug(&self) -> &Slug {
        &self.slug
    }

    /// Whether this is the reserved root domain.
    #[must_use]
    pub fn is_root(&self) -> bool {
        self.is_root
    }

    /// All dimensions, ordered by slug.
    #[must_use]
    pub fn dimensions(&self) -> &BTreeMap<Slug, Dimension> {
        &self.dimensions
    }

    /// All named entities, ordered by slug. The sentinel is not listed.
    #[must_use]
    pub fn entities(&self) -> &BTreeMap<Slug, Entity> {
        &self.entities
    }

    /// Look up or lazily create the entity named `slug`. The sentinel slug
    /// always resolves to the domain's own sentinel entity.
    pub fn fetch_entity(&mut self, slug: &Slug) -> &Entity {
        if slug.is_domain_only_entity() {
            return &self.domain_only_entity;
        }
        self.entities
            .entry(slug.clone())
            .or_insert_with(|| Entity::new(slug.clone()))
    }

    /// Bind `field` into `dimension` at the `(device, entity)` coordinate,
    /// lazily creating the dimension and entity.
    ///
    /// # Errors
    ///
    /// Returns a [`ReferenceError::DuplicateAction`] when the coordinate is
    /// already bound, or a [`ScopeConflictError`] when the entity's
    /// domain-only-ness contradicts the dimension's inferred scope. A failed
    /// call leaves the dimension's existing actions unchanged.
    pub fn add_action(
        &mut self,
        dimension: &Slug,
        device: Slug,
        entity: Slug,
        field: Field,
    ) -> Result<(), RegbindError> {
        self.dimensions
            .entry(dimension.clone())
            .or_insert_with(|| Dimension::new(dimension.clone()))
            .add_action(device, entity.clone(), field)?;
        self.fetch_entity(&entity);
        Ok(())
    }
}

/// A library-level generator declaration: engine id plus opaque options.
#[derive(Debug, Clone)]
pub struct GeneratorDecl {
    /// Registry identifier of the engine.
    pub engine: String,
    /// Engine-specific options, validated by the engine itself.
    pub options: serde_yaml::Value,
}

impl From<GeneratorSpec> for GeneratorDecl {
    fn from(spec: GeneratorSpec) -> Self {
        Self {
            engine: spec.engine,
            options: spec.options,
        }
    }
}

/// Top-level container: devices by slug, domains by slug, generator
/// declarations in declaration order.
#[derive(Debug, Clone)]
pub struct Library {
    pub name: String,
    pub description: String,
    pub slug: Slug,
    devices: BTreeMap<Slug, Device>,
    domains: BTreeMap<Slug, Domain>,
    generators: Vec<GeneratorDecl>,
}

impl Library {
    /// Build a library from its raw description, resolving every device's
    /// bindings in declaration order.
    ///
    /// # Errors
    ///
    /// Fails fast with the first validation, reference, or scope-conflict
    /// error; there is no partial success.
    pub fn from_spec(spec: LibrarySpec) -> Result<Self, RegbindError> {
        let mut library = Self {
            name: spec.name,
            description: spec.description,
            slug: Slug::new(spec.slug),
            devices: BTreeMap::new(),
            domains: BTreeMap::new(),
            generators: spec.generators.into_iter().map(GeneratorDecl::from).collect(),
        };
        for entry in spec.devices {
            let device = Device::from_spec(entry.definition)?;
            library.add_device(Slug::new(entry.slug), device)?;
        }
        Ok(library)
    }

    /// Build a library from a parsed description file.
    ///
    /// # Errors
    ///
    /// See [`Library::from_spec`].
    pub fn from_doc(doc: LibraryDoc) -> Result<Self, RegbindError> {
        Self::from_spec(doc.library)
    }

    /// Resolve every bound field of `device` into the index, then register
    /// the device under `device_slug`.
    ///
    /// The call is transactional: bindings are staged and checked against
    /// the live index first, and nothing is inserted unless the whole device
    /// resolves. A failed call leaves the library exactly as it was.
    ///
    /// # Errors
    ///
    /// Returns [`ReferenceError::DuplicateDevice`] when the slug is taken,
    /// [`ReferenceError::DuplicateAction`] when two bindings collide on a
    /// `(device, entity)` coordinate, or a [`ScopeConflictError`] when a
    /// binding contradicts a dimension's inferred scope.
    pub fn add_device(&mut self, device_slug: Slug, device: Device) -> Result<(), RegbindError> {
        if self.devices.contains_key(&device_slug) {
            return Err(ReferenceError::DuplicateDevice(device_slug).into());
        }

        let staged: Vec<(Binding, Field)> = device
            .registers
            .iter()
            .flat_map(|register| &register.fields)
            .filter_map(|field| {
                field
                    .binding
                    .as_ref()
                    .map(|binding| (binding.clone(), field.clone()))
            })
            .collect();

        self.precheck(&device_slug, &staged)?;

        for (binding, field) in staged {
            self.fetch_domain(&binding.domain).add_action(
                &binding.dimension,
                device_slug.clone(),
                binding.entity,
                field,
            )?;
        }
        self.devices.insert(device_slug, device);
        Ok(())
    }

    /// Check a staged batch of bindings against the live index without
    /// mutating it: duplicate coordinates (within the batch or against
    /// existing actions) and scope conflicts are detected here, so the
    /// commit loop in [`Library::add_device`] cannot fail halfway.
    fn precheck(&self, device_slug: &Slug, staged: &[(Binding, Field)]) -> Result<(), RegbindError> {
        let mut scopes: BTreeMap<(&Slug, &Slug), DimensionScope> = BTreeMap::new();
        let mut coordinates: BTreeSet<(&Slug, &Slug, &Slug)> = BTreeSet::new();

        for (binding, _) in staged {
            let dimension = self
                .domains
                .get(&binding.domain)
                .and_then(|domain| domain.dimensions.get(&binding.dimension));

            if let Some(dimension) = dimension
                && dimension
                    .actions
                    .contains_key(&(device_slug.clone(), binding.entity.clone()))
            {
                return Err(ReferenceError::DuplicateAction {
                    dimension: binding.dimension.clone(),
                    device: device_slug.clone(),
                    entity: binding.entity.clone(),
                }
                .into());
            }
            if !coordinates.insert((&binding.domain, &binding.dimension, &binding.entity)) {
                return Err(ReferenceError::DuplicateAction {
                    dimension: binding.dimension.clone(),
                    device: device_slug.clone(),
                    entity: binding.entity.clone(),
                }
                .into());
            }

            let key = (&binding.domain, &binding.dimension);
            let current = scopes
                .get(&key)
                .copied()
                .or_else(|| dimension.map(Dimension::scope))
                .unwrap_or(DimensionScope::Undefined);
            scopes.insert(key, current.admit(&binding.dimension, &binding.entity)?);
        }
        Ok(())
    }

    fn fetch_domain(&mut self, slug: &Slug) -> &mut Domain {
        self.domains
            .entry(slug.clone())
            .or_insert_with(|| Domain::new(slug.clone()))
    }

    /// Look up a registered device by slug.
    #[must_use]
    pub fn device(&self, slug: &str) -> Option<&Device> {
        self.devices.get(slug)
    }

    /// All registered devices, ordered by slug.
    #[must_use]
    pub fn devices(&self) -> &BTreeMap<Slug, Device> {
        &self.devices
    }

    /// Look up a domain by slug.
    #[must_use]
    pub fn domain(&self, slug: &str) -> Option<&Domain> {
        self.domains.get(slug)
    }

    /// All domains, ordered by slug.
    #[must_use]
    pub fn domains(&self) -> &BTreeMap<Slug, Domain> {
        &self.domains
    }

    /// Generator declarations, in declaration order.
    #[must_use]
    pub fn generators(&self) -> &[GeneratorDecl] {
        &self.generators
    }
}

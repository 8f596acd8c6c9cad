//! Generic derived-resource cache

use std::collections::HashMap;

use crate::database::AssetDatabase;
use crate::id::AssetId;
use crate::payload::AssetPayload;

/// What one build attempt produced.
///
/// `resource` is `Some` exactly when the build succeeded; `messages` may
/// carry diagnostics either way.
#[derive(Debug)]
pub struct BuildOutput<R, M> {
    /// The built resource, if the build succeeded.
    pub resource: Option<R>,
    /// Builder diagnostics.
    pub messages: Vec<M>,
}

impl<R, M> BuildOutput<R, M> {
    /// A clean success.
    pub fn success(resource: R) -> Self {
        Self {
            resource: Some(resource),
            messages: Vec::new(),
        }
    }

    /// A success that still has something to say.
    pub fn success_with(resource: R, messages: Vec<M>) -> Self {
        Self {
            resource: Some(resource),
            messages,
        }
    }

    /// A failed build. The messages must explain the failure.
    pub fn failure(messages: Vec<M>) -> Self {
        Self {
            resource: None,
            messages,
        }
    }
}

/// Builds one kind of backend resource from one kind of payload.
///
/// Exactly one implementation exists per derived-resource kind per
/// backend; there is deliberately no blanket or default implementation,
/// so forgetting a kind is a compile error rather than a runtime trap.
/// Building never mutates the payload.
pub trait ResourceBuilder {
    /// The payload kind this builder consumes.
    type Domain: AssetPayload;
    /// The backend-resident resource it produces.
    type Resource;
    /// The builder-specific diagnostic type.
    type Message;

    /// Build a resource from a deserialized payload.
    fn build(&mut self, domain: &Self::Domain) -> BuildOutput<Self::Resource, Self::Message>;
}

/// Maps asset identities to backend-resident resources of one kind.
///
/// Invariant: every identity present here is present in the asset
/// database with a successfully deserialized payload of the matching
/// kind. The database upholds the other direction by deallocating on
/// delete and force-deserialize.
pub struct DerivedResourceCache<B: ResourceBuilder> {
    builder: B,
    resources: HashMap<AssetId, B::Resource>,
    missing: Option<B::Resource>,
}

impl<B: ResourceBuilder> DerivedResourceCache<B> {
    /// Create a cache around a builder, without a placeholder resource.
    pub fn new(builder: B) -> Self {
        Self {
            builder,
            resources: HashMap::new(),
            missing: None,
        }
    }

    /// Create a cache with a shared placeholder for failed or absent
    /// resources (e.g. a magenta "missing" texture).
    pub fn with_missing(builder: B, missing: B::Resource) -> Self {
        Self {
            builder,
            resources: HashMap::new(),
            missing: Some(missing),
        }
    }

    /// Whether a resource is allocated for this identity.
    pub fn exists(&self, asset: AssetId) -> bool {
        self.resources.contains_key(&asset)
    }

    /// Borrow the resource for this identity.
    ///
    /// Panics unless [`exists`](Self::exists); use
    /// [`query`](Self::query) when absence is an expected case.
    pub fn fetch(&self, asset: AssetId) -> &B::Resource {
        assert!(
            self.exists(asset),
            "no derived resource allocated for asset {asset}"
        );
        &self.resources[&asset]
    }

    /// Mutably borrow the resource for this identity.
    ///
    /// Panics unless [`exists`](Self::exists).
    pub fn fetch_mut(&mut self, asset: AssetId) -> &mut B::Resource {
        assert!(
            self.exists(asset),
            "no derived resource allocated for asset {asset}"
        );
        self.resources
            .get_mut(&asset)
            .unwrap_or_else(|| unreachable!())
    }

    /// Borrow the resource for this identity, or `None` if absent.
    pub fn query(&self, asset: AssetId) -> Option<&B::Resource> {
        self.resources.get(&asset)
    }

    /// Build and insert the resource for this identity.
    ///
    /// Returns the builder's diagnostics; on failure nothing is inserted.
    /// Calling this for an already-allocated identity, or for an asset
    /// without a deserialized payload of this cache's kind, is a
    /// programming error and panics — [`try_allocate`](Self::try_allocate)
    /// is the idempotent entry point.
    pub fn allocate(&mut self, assets: &AssetDatabase, asset: AssetId) -> Vec<B::Message> {
        assert!(
            !self.exists(asset),
            "derived resource for asset {asset} is already allocated"
        );
        assert!(
            assets.has_deserialized_data(asset),
            "asset {asset} has no usable deserialized data to build from"
        );
        let Some(domain) = assets.payload_as::<B::Domain>(asset) else {
            panic!(
                "asset {asset} does not hold a {} payload",
                B::Domain::NAME
            );
        };

        let output = self.builder.build(domain);
        match output.resource {
            Some(resource) => {
                log::debug!("Built {} resource for asset {asset}", B::Domain::NAME);
                self.resources.insert(asset, resource);
            }
            None => {
                log::warn!(
                    "Building {} resource for asset {asset} failed with {} messages",
                    B::Domain::NAME,
                    output.messages.len()
                );
            }
        }
        output.messages
    }

    /// Materialize on demand: no-op with no messages if already
    /// allocated, otherwise [`allocate`](Self::allocate).
    pub fn try_allocate(&mut self, assets: &AssetDatabase, asset: AssetId) -> Vec<B::Message> {
        if self.exists(asset) {
            return Vec::new();
        }
        self.allocate(assets, asset)
    }

    /// Release the resource for this identity. No-op if absent.
    pub fn deallocate(&mut self, asset: AssetId) {
        if self.resources.remove(&asset).is_some() {
            log::debug!("Deallocated {} resource for asset {asset}", B::Domain::NAME);
        }
    }

    /// The shared placeholder resource, if this kind has one.
    pub fn missing(&self) -> Option<&B::Resource> {
        self.missing.as_ref()
    }

    /// Number of allocated resources.
    pub fn len(&self) -> usize {
        self.resources.len()
    }

    /// Whether nothing is allocated.
    pub fn is_empty(&self) -> bool {
        self.resources.is_empty()
    }

    /// Iterate over the identities with allocated resources.
    pub fn ids(&self) -> impl Iterator<Item = AssetId> + '_ {
        self.resources.keys().copied()
    }
}

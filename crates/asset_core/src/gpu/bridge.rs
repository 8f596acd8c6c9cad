//! Backend seam and per-kind cache aggregation

use super::cache::{DerivedResourceCache, ResourceBuilder};
use crate::id::AssetId;
use crate::payload::{FrameBuffer, Sampler, Shader, ShaderProgram, Texture};

/// The hook the asset database uses to keep derived resources in step
/// with asset lifecycle events: deleting an asset or force-deserializing
/// it must drop whatever any cache holds for that identity.
///
/// Object-safe on purpose, so the database stays non-generic.
pub trait DerivedResources {
    /// Release every derived resource held for this identity.
    fn deallocate(&mut self, asset: AssetId);
}

/// A graphics backend, described by the five resource builders it
/// provides. Every builder type must exist — there are no defaults, so a
/// backend that cannot build some kind does not compile rather than
/// aborting at runtime.
pub trait GpuBackend {
    /// Shader compiler.
    type ShaderBuilder: ResourceBuilder<Domain = Shader>;
    /// Program linker.
    type ProgramBuilder: ResourceBuilder<Domain = ShaderProgram>;
    /// Texture uploader.
    type TextureBuilder: ResourceBuilder<Domain = Texture>;
    /// Sampler allocator.
    type SamplerBuilder: ResourceBuilder<Domain = Sampler>;
    /// Frame buffer allocator.
    type FrameBufferBuilder: ResourceBuilder<Domain = FrameBuffer>;

    /// Create the shader builder.
    fn shader_builder(&mut self) -> Self::ShaderBuilder;
    /// Create the program builder.
    fn program_builder(&mut self) -> Self::ProgramBuilder;
    /// Create the texture builder.
    fn texture_builder(&mut self) -> Self::TextureBuilder;
    /// Create the sampler builder.
    fn sampler_builder(&mut self) -> Self::SamplerBuilder;
    /// Create the frame buffer builder.
    fn frame_buffer_builder(&mut self) -> Self::FrameBufferBuilder;

    /// Placeholder shader shown for assets whose shader failed to build.
    fn missing_shader(&mut self) -> Option<<Self::ShaderBuilder as ResourceBuilder>::Resource> {
        None
    }
    /// Placeholder program.
    fn missing_program(&mut self) -> Option<<Self::ProgramBuilder as ResourceBuilder>::Resource> {
        None
    }
    /// Placeholder texture (typically a loud checkerboard).
    fn missing_texture(&mut self) -> Option<<Self::TextureBuilder as ResourceBuilder>::Resource> {
        None
    }
    /// Placeholder sampler.
    fn missing_sampler(&mut self) -> Option<<Self::SamplerBuilder as ResourceBuilder>::Resource> {
        None
    }
    /// Placeholder frame buffer.
    fn missing_frame_buffer(
        &mut self,
    ) -> Option<<Self::FrameBufferBuilder as ResourceBuilder>::Resource> {
        None
    }
}

/// One cache per derived-resource kind, behind a single coordination
/// point. The bridge has no state or invariants of its own; it exists so
/// callers pass one object around instead of five.
pub struct ResourceBridge<G: GpuBackend> {
    shaders: DerivedResourceCache<G::ShaderBuilder>,
    shader_programs: DerivedResourceCache<G::ProgramBuilder>,
    textures: DerivedResourceCache<G::TextureBuilder>,
    samplers: DerivedResourceCache<G::SamplerBuilder>,
    frame_buffers: DerivedResourceCache<G::FrameBufferBuilder>,
}

fn cache_of<B: ResourceBuilder>(
    builder: B,
    missing: Option<B::Resource>,
) -> DerivedResourceCache<B> {
    match missing {
        Some(missing) => DerivedResourceCache::with_missing(builder, missing),
        None => DerivedResourceCache::new(builder),
    }
}

impl<G: GpuBackend> ResourceBridge<G> {
    /// Build the five caches from a backend.
    pub fn new(mut backend: G) -> Self {
        let shaders = {
            let missing = backend.missing_shader();
            cache_of(backend.shader_builder(), missing)
        };
        let shader_programs = {
            let missing = backend.missing_program();
            cache_of(backend.program_builder(), missing)
        };
        let textures = {
            let missing = backend.missing_texture();
            cache_of(backend.texture_builder(), missing)
        };
        let samplers = {
            let missing = backend.missing_sampler();
            cache_of(backend.sampler_builder(), missing)
        };
        let frame_buffers = {
            let missing = backend.missing_frame_buffer();
            cache_of(backend.frame_buffer_builder(), missing)
        };
        Self {
            shaders,
            shader_programs,
            textures,
            samplers,
            frame_buffers,
        }
    }

    /// The shader cache.
    pub fn shaders(&self) -> &DerivedResourceCache<G::ShaderBuilder> {
        &self.shaders
    }

    /// The shader cache, mutable.
    pub fn shaders_mut(&mut self) -> &mut DerivedResourceCache<G::ShaderBuilder> {
        &mut self.shaders
    }

    /// The shader program cache.
    pub fn shader_programs(&self) -> &DerivedResourceCache<G::ProgramBuilder> {
        &self.shader_programs
    }

    /// The shader program cache, mutable.
    pub fn shader_programs_mut(&mut self) -> &mut DerivedResourceCache<G::ProgramBuilder> {
        &mut self.shader_programs
    }

    /// The texture cache.
    pub fn textures(&self) -> &DerivedResourceCache<G::TextureBuilder> {
        &self.textures
    }

    /// The texture cache, mutable.
    pub fn textures_mut(&mut self) -> &mut DerivedResourceCache<G::TextureBuilder> {
        &mut self.textures
    }

    /// The sampler cache.
    pub fn samplers(&self) -> &DerivedResourceCache<G::SamplerBuilder> {
        &self.samplers
    }

    /// The sampler cache, mutable.
    pub fn samplers_mut(&mut self) -> &mut DerivedResourceCache<G::SamplerBuilder> {
        &mut self.samplers
    }

    /// The frame buffer cache.
    pub fn frame_buffers(&self) -> &DerivedResourceCache<G::FrameBufferBuilder> {
        &self.frame_buffers
    }

    /// The frame buffer cache, mutable.
    pub fn frame_buffers_mut(&mut self) -> &mut DerivedResourceCache<G::FrameBufferBuilder> {
        &mut self.frame_buffers
    }
}

impl<G: GpuBackend> DerivedResources for ResourceBridge<G> {
    fn deallocate(&mut self, asset: AssetId) {
        self.shaders.deallocate(asset);
        self.shader_programs.deallocate(asset);
        self.textures.deallocate(asset);
        self.samplers.deallocate(asset);
        self.frame_buffers.deallocate(asset);
    }
}

#[cfg(test)]
mod tests {
    use std::cell::Cell;
    use std::fs;
    use std::marker::PhantomData;
    use std::rc::Rc;

    use tempfile::TempDir;

    use super::*;
    use crate::database::AssetDatabase;
    use crate::gpu::{BuildMessage, BuildOutput};
    use crate::payload::AssetPayload;

    struct CountingBuilder<D: AssetPayload> {
        builds: Rc<Cell<usize>>,
        _marker: PhantomData<D>,
    }

    impl<D: AssetPayload> ResourceBuilder for CountingBuilder<D> {
        type Domain = D;
        type Resource = usize;
        type Message = BuildMessage;

        fn build(&mut self, _domain: &D) -> BuildOutput<usize, BuildMessage> {
            self.builds.set(self.builds.get() + 1);
            BuildOutput::success(self.builds.get())
        }
    }

    /// Backend whose five builders share one invocation counter, with a
    /// placeholder texture and nothing else.
    struct MockBackend {
        builds: Rc<Cell<usize>>,
    }

    impl MockBackend {
        fn builder<D: AssetPayload>(&self) -> CountingBuilder<D> {
            CountingBuilder {
                builds: self.builds.clone(),
                _marker: PhantomData,
            }
        }
    }

    impl GpuBackend for MockBackend {
        type ShaderBuilder = CountingBuilder<Shader>;
        type ProgramBuilder = CountingBuilder<ShaderProgram>;
        type TextureBuilder = CountingBuilder<Texture>;
        type SamplerBuilder = CountingBuilder<Sampler>;
        type FrameBufferBuilder = CountingBuilder<FrameBuffer>;

        fn shader_builder(&mut self) -> Self::ShaderBuilder {
            self.builder()
        }

        fn program_builder(&mut self) -> Self::ProgramBuilder {
            self.builder()
        }

        fn texture_builder(&mut self) -> Self::TextureBuilder {
            self.builder()
        }

        fn sampler_builder(&mut self) -> Self::SamplerBuilder {
            self.builder()
        }

        fn frame_buffer_builder(&mut self) -> Self::FrameBufferBuilder {
            self.builder()
        }

        fn missing_texture(&mut self) -> Option<usize> {
            Some(0)
        }
    }

    fn bridge() -> (Rc<Cell<usize>>, ResourceBridge<MockBackend>) {
        let builds = Rc::new(Cell::new(0));
        let backend = MockBackend {
            builds: builds.clone(),
        };
        (builds, ResourceBridge::new(backend))
    }

    const FRAG_SOURCE: &str = "#version 460 core\n\
        out vec4 color;\n\
        void main() {\n\
            color = vec4(1.0);\n\
        }\n";

    /// One extra closing brace.
    const BROKEN_FRAG_SOURCE: &str = "#version 460 core\n\
        void main() {\n\
        }}\n";

    #[test]
    fn test_only_the_texture_cache_has_a_placeholder() {
        let (_builds, bridge) = bridge();
        assert_eq!(bridge.textures().missing(), Some(&0));
        assert!(bridge.shaders().missing().is_none());
        assert!(bridge.samplers().missing().is_none());
        assert!(bridge.frame_buffers().missing().is_none());
    }

    #[test]
    fn test_deallocate_cascades_across_all_caches() {
        let dir = TempDir::new().expect("temp dir");
        fs::write(dir.path().join("lit.frag"), FRAG_SOURCE).expect("write");
        fs::write(
            dir.path().join("linear.smplr"),
            crate::codecs::serialize_sampler(&Sampler::default()).expect("encode"),
        )
        .expect("write");
        let mut database = AssetDatabase::open(dir.path()).expect("open");
        database.ensure_deserialization();
        let shader = database.shader_asset_ids()[0];
        let sampler = database.sampler_asset_ids()[0];

        let (builds, mut bridge) = bridge();
        bridge.shaders_mut().try_allocate(&database, shader);
        bridge.samplers_mut().try_allocate(&database, sampler);
        assert_eq!(builds.get(), 2);

        bridge.deallocate(shader);
        assert!(!bridge.shaders().exists(shader));
        assert!(bridge.samplers().exists(sampler));
        bridge.deallocate(sampler);
        assert!(bridge.samplers().is_empty());
    }

    #[test]
    fn test_broken_shader_heals_through_force_deserialize() {
        let dir = TempDir::new().expect("temp dir");
        fs::write(dir.path().join("lit.frag"), BROKEN_FRAG_SOURCE).expect("write");
        let mut database = AssetDatabase::open(dir.path()).expect("open");
        database.ensure_deserialization();

        let id = database.all_asset_ids()[0];
        assert!(!database.has_deserialized_data(id));
        assert!(database
            .find_asset(id)
            .expect("record")
            .has_error_messages());

        // Fix the source on disk, then re-deserialize through the bridge
        // so any stale resource would be dropped.
        fs::write(dir.path().join("lit.frag"), FRAG_SOURCE).expect("write");
        let (builds, mut bridge) = bridge();
        database.force_deserialize_asset(id, &mut bridge);
        assert!(database.has_deserialized_data(id));

        let messages = bridge.shaders_mut().try_allocate(&database, id);
        assert!(messages.is_empty());
        assert!(bridge.shaders().exists(id));
        assert_eq!(builds.get(), 1);
    }
}

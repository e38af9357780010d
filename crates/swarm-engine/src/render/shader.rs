use std::borrow::Cow;
use std::path::PathBuf;

use crate::error::{RendererError, Result};

use super::layout;

/// WGSL embedded in the binary.
pub const CIRCLES_WGSL: &str = include_str!("shaders/circles.wgsl");

/// Entry points every circle shader must define.
pub const VERTEX_ENTRY: &str = "vs_main";
pub const FRAGMENT_ENTRY: &str = "fs_main";

/// Where the renderer takes its WGSL from.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum ShaderSource {
    /// The shader compiled into the crate.
    #[default]
    Embedded,
    /// A WGSL file read once during init, for iterating on shaders without
    /// rebuilding.
    File(PathBuf),
}

impl ShaderSource {
    pub fn load(&self) -> Result<Cow<'static, str>> {
        match self {
            ShaderSource::Embedded => Ok(Cow::Borrowed(CIRCLES_WGSL)),
            ShaderSource::File(path) => {
                log::info!("loading shader from {}", path.display());
                std::fs::read_to_string(path)
                    .map(Cow::Owned)
                    .map_err(|source| RendererError::ShaderLoad {
                        path: path.clone(),
                        source,
                    })
            }
        }
    }
}

/// Parses and validates WGSL, then checks it against the pipeline interface:
/// both entry points exist, every vertex input is fed by a vertex buffer with a
/// float attribute, and the fragment stage writes only the single color target.
///
/// wgpu reports a mismatch as an uncaptured device error at pipeline creation;
/// checking here turns it into a `ShaderCompile` error instead.
pub fn validate_wgsl(source: &str) -> Result<()> {
    let module = naga::front::wgsl::parse_str(source)
        .map_err(|e| RendererError::ShaderCompile(e.emit_to_string(source)))?;

    naga::valid::Validator::new(
        naga::valid::ValidationFlags::all(),
        naga::valid::Capabilities::empty(),
    )
    .validate(&module)
    .map_err(|e| RendererError::ShaderCompile(format!("{:?}", e.into_inner())))?;

    let vs = find_entry(&module, naga::ShaderStage::Vertex, VERTEX_ENTRY)?;
    let fs = find_entry(&module, naga::ShaderStage::Fragment, FRAGMENT_ENTRY)?;

    let supplied = layout::vertex_locations();
    let mut inputs = Vec::new();
    for arg in &vs.function.arguments {
        collect_locations(&module, arg.ty, arg.binding.as_ref(), &mut inputs);
    }
    for (location, ty) in inputs {
        if !supplied.contains(&location) {
            return Err(RendererError::ShaderCompile(format!(
                "vertex input @location({location}) is not supplied by any vertex buffer"
            )));
        }
        if !is_float(&module, ty) {
            return Err(RendererError::ShaderCompile(format!(
                "vertex input @location({location}) must be a float scalar or vector"
            )));
        }
    }

    let mut outputs = Vec::new();
    if let Some(result) = &fs.function.result {
        collect_locations(&module, result.ty, result.binding.as_ref(), &mut outputs);
    }
    for (location, ty) in outputs {
        if location != 0 {
            return Err(RendererError::ShaderCompile(format!(
                "fragment output @location({location}) has no color target"
            )));
        }
        if !is_float(&module, ty) {
            return Err(RendererError::ShaderCompile(
                "fragment output @location(0) must be a float vector".into(),
            ));
        }
    }

    Ok(())
}

fn find_entry<'m>(
    module: &'m naga::Module,
    stage: naga::ShaderStage,
    name: &str,
) -> Result<&'m naga::EntryPoint> {
    module
        .entry_points
        .iter()
        .find(|ep| ep.stage == stage && ep.name == name)
        .ok_or_else(|| {
            RendererError::ShaderCompile(format!("missing {stage:?} entry point `{name}`"))
        })
}

/// Flattens `@location` bindings, descending into struct members.
fn collect_locations(
    module: &naga::Module,
    ty: naga::Handle<naga::Type>,
    binding: Option<&naga::Binding>,
    out: &mut Vec<(u32, naga::Handle<naga::Type>)>,
) {
    match binding {
        Some(naga::Binding::Location { location, .. }) => out.push((*location, ty)),
        Some(_) => {}
        None => {
            if let naga::TypeInner::Struct { members, .. } = &module.types[ty].inner {
                for member in members {
                    collect_locations(module, member.ty, member.binding.as_ref(), out);
                }
            }
        }
    }
}

fn is_float(module: &naga::Module, ty: naga::Handle<naga::Type>) -> bool {
    match &module.types[ty].inner {
        naga::TypeInner::Scalar(scalar) | naga::TypeInner::Vector { scalar, .. } => {
            scalar.kind == naga::ScalarKind::Float
        }
        _ => false,
    }
}

//! Artifact registry.
//!
//! The fixed, ordered table of everything a session compiles. Sources are
//! declared here rather than discovered from the source tree, so adding a
//! file to a build is always an explicit edit of this table.

pub mod types;

pub use types::{ArtifactKind, ArtifactSpec, Toolchain};

/// The Xenly interpreter. Always built, always first.
pub static XENLY: ArtifactSpec = ArtifactSpec {
  name: "xenly",
  kind: ArtifactKind::Executable,
  toolchain: Toolchain::C,
  sources: &[
    "src/xenly.c",
    "src/print_info.c",
    "src/color.c",
    "src/project.c",
    "src/error.c",
  ],
  base_output_name: "xenly",
};

/// Trigonometric/exponential routines loaded by Xenly programs at run time.
pub static MATH: ArtifactSpec = ArtifactSpec {
  name: "math",
  kind: ArtifactKind::SharedLibrary,
  toolchain: Toolchain::C,
  sources: &["src/libm/xenly_math.c"],
  base_output_name: "math",
};

pub static BINARY_MATH: ArtifactSpec = ArtifactSpec {
  name: "binary_math",
  kind: ArtifactKind::SharedLibrary,
  toolchain: Toolchain::C,
  sources: &["src/libm/binary_math/xenly_binary_math.c"],
  base_output_name: "binary_math",
};

/// Go bridge module, written next to its source so the generated header
/// lands in `src/`.
pub static GOXENLY: ArtifactSpec = ArtifactSpec {
  name: "goxenly",
  kind: ArtifactKind::SharedLibrary,
  toolchain: Toolchain::Go,
  sources: &["src/goxenly.go"],
  base_output_name: "src/goxenly",
};

/// The artifacts of a session, in build order.
///
/// The primary executable comes first, then the C shared libraries, then the
/// Go module when requested.
pub fn registry(include_go: bool) -> Vec<&'static ArtifactSpec> {
  let mut specs = vec![&XENLY, &MATH, &BINARY_MATH];
  if include_go {
    specs.push(&GOXENLY);
  }
  specs
}

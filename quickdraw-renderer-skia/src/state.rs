use tiny_skia::Transform;

/// tiny-skia transforms are plain values that get passed along with every
/// draw call; there is no context to save and restore them on. This structure
/// holds everything a transform push needs to bring back on pop.
#[derive(Debug)]
pub(crate) struct State {
   pub(crate) transform: Transform,
}

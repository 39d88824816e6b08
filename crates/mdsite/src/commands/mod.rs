//! CLI command implementations.

pub(crate) mod generate;
pub(crate) mod render;

pub(crate) use generate::GenerateArgs;
pub(crate) use render::RenderArgs;

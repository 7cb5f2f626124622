//! ForceAtlas Core Types
//!
//! This crate provides the data model shared by the ForceAtlas2 layout
//! driver. It includes:
//!
//! - **Graph**: the normalized input graph ([`graph::LayoutGraph`])
//! - **Mapping**: the label/index bijection the engine works in ([`mapping::IndexMapping`])
//! - **Position**: coordinates and label-keyed results ([`position`] module)

pub mod graph;
pub mod mapping;
pub mod position;

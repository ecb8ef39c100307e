//! View layer
//!
//! - **node**: the `Node`/`Element` tree renderers produce
//! - **html**: escaping HTML serializer
//! - **text**: plain-text painter for terminals
//!
//! Renderers are pure functions of store state (plus "now"); they never
//! mutate the store. Each render replaces the previous tree wholesale.

pub mod html;
pub mod node;
pub mod text;

pub use node::{Element, Node};

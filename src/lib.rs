//! Feed container core
//!
//! Resolves the responsive feed layout from user settings and experiment
//! flags, gates the inline search experiment, and composes the structural
//! tree that feed items are rendered into.

pub mod collaborators;
pub mod constants;
pub mod container;
pub mod error;
pub mod layout;
pub mod search_gate;
pub mod settings;
pub mod suggestions;
pub mod types;

pub use container::{Element, FeedContainer, FeedContainerProps, Region};
pub use layout::{resolve, LayoutConfig, LayoutInputs};
pub use search_gate::{SearchGate, SearchGateState};

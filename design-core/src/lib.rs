//! # Design Core
//!
//! Core engine for the interactive product design canvas: a constrained
//! 2D scene editor that places text, images, and emoji onto a product
//! mockup, enforces the printable boundary, tracks undo/redo history
//! and per-side completeness, and hands finished designs to the
//! surrounding cart system.
//!
//! ## Architecture
//!
//! ```text
//! ┌──────────────────────────────────────────────┐
//! │               DesignSession                  │
//! ├──────────────┬───────────────┬───────────────┤
//! │ Surface      │ Boundary      │ History       │
//! │ - elements   │ - clamp move  │ - undo/redo   │
//! │ - background │ - clamp scale │ - snapshots   │
//! ├──────────────┴───────┬───────┴───────────────┤
//! │ SideTracker          │ Collaborator seams    │
//! │ - front/back state   │ - inventory, cart,    │
//! │ - capture/restore    │   exporter, mockups   │
//! └──────────────────────┴───────────────────────┘
//! ```

#![forbid(unsafe_code)]
#![deny(missing_docs)]
#![deny(clippy::all)]
#![deny(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

pub mod bounds;
pub mod cart;
pub mod element;
pub mod error;
pub mod export;
pub mod history;
pub mod inventory;
pub mod product;
pub mod session;
pub mod sides;
pub mod surface;

pub use bounds::{print_area, BoundaryEnforcer, Rect};
pub use cart::{CartLineItem, CartSink, MemoryCart};
pub use element::{Element, ElementId, ElementKind, ImageFormat, Transform};
pub use error::{CartError, DesignError, DesignResult};
pub use export::DesignExporter;
pub use history::HistoryManager;
pub use inventory::{InventoryProvider, MemoryInventory};
pub use product::{ProductSpec, ProductType, View};
pub use session::DesignSession;
pub use sides::{SideState, SideTracker};
pub use surface::{BackgroundResolver, BackgroundTicket, LoadedBackground, StaticBackgrounds, Surface};

/// Design core version.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

//! Application layer - Use cases and orchestration

pub mod effect;
pub mod forms;
pub mod init;
pub mod list_pages;
pub mod manage_config;
pub mod render_head;
pub mod sync;

pub use effect::PageMetaEffect;
pub use forms::FormsService;
pub use list_pages::ListPagesService;
pub use render_head::{HeadCheck, RenderHeadService};
pub use sync::{activate, Activation, MetaTagSnapshot, Snapshots};

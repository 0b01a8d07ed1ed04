//! Page metadata tied to a view lifecycle

use crate::application::sync::Snapshots;
use crate::domain::PageMeta;
use crate::error::Result;
use crate::infrastructure::MetadataSink;
use tracing::debug;

/// Owns a sink and keeps it in step with the meta of the current view.
///
/// Calling [`sync`](Self::sync) on every render re-applies the metadata only
/// when one of its fields changed, deactivating the previous meta first.
#[derive(Debug)]
pub struct PageMetaEffect<S: MetadataSink> {
    sink: S,
    mounted: Option<(PageMeta, Snapshots)>,
}

impl<S: MetadataSink> PageMetaEffect<S> {
    pub fn new(sink: S) -> Self {
        PageMetaEffect {
            sink,
            mounted: None,
        }
    }

    /// Apply `meta`, returning whether the head was touched
    pub fn sync(&mut self, meta: &PageMeta) -> Result<bool> {
        if let Some((current, _)) = &self.mounted {
            if current == meta {
                return Ok(false);
            }
        }

        self.unmount()?;
        let snapshots = Snapshots::capture_and_apply(&mut self.sink, meta)?;
        debug!(title = %meta.title, "page meta mounted");
        self.mounted = Some((meta.clone(), snapshots));
        Ok(true)
    }

    /// Restore the head if a meta is mounted
    pub fn unmount(&mut self) -> Result<()> {
        if let Some((meta, snapshots)) = self.mounted.take() {
            snapshots.restore(&mut self.sink)?;
            debug!(title = %meta.title, "page meta unmounted");
        }
        Ok(())
    }

    pub fn is_mounted(&self) -> bool {
        self.mounted.is_some()
    }

    pub fn current(&self) -> Option<&PageMeta> {
        self.mounted.as_ref().map(|(meta, _)| meta)
    }

    pub fn sink(&self) -> &S {
        &self.sink
    }

    /// Unmount and hand the sink back
    pub fn into_inner(mut self) -> Result<S> {
        self.unmount()?;
        Ok(self.sink)
    }
}

//! Page metadata synchronizer
//!
//! [`activate`] applies a [`PageMeta`] to a [`MetadataSink`] and returns an
//! [`Activation`] that remembers what was there before. Deactivating the
//! handle (explicitly or by dropping it) puts the head back exactly as it
//! was: created tags are removed, overwritten tags get their old content
//! back, and the title is restored (or removed again if the head had none).
//!
//! The handle holds the sink's mutable borrow for the whole activation
//! window. A nested activation can only be made through
//! [`Activation::sink_mut`], so inner activations always end before the
//! outer one.

use crate::domain::{MetaKey, PageMeta};
use crate::error::Result;
use crate::infrastructure::MetadataSink;
use tracing::{debug, trace, warn};

/// Prior state of one managed `<meta>` node
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MetaTagSnapshot {
    pub key: MetaKey,
    /// The node did not exist and was created by the activation
    pub was_created: bool,
    /// Content before the activation, empty when created
    pub previous_value: String,
}

/// Everything needed to undo one activation.
///
/// Only the crate can restore a set of snapshots, and restoring consumes it,
/// so an activation is undone at most once.
///
/// ```compile_fail
/// use formsite::application::Snapshots;
///
/// fn duplicate(snapshots: &Snapshots) -> Snapshots {
///     snapshots.clone()
/// }
/// ```
#[derive(Debug, PartialEq, Eq)]
pub struct Snapshots {
    /// `None` when the head had no title node
    previous_title: Option<String>,
    tags: Vec<MetaTagSnapshot>,
}

impl Snapshots {
    /// Record the current head state and apply `meta`.
    ///
    /// On failure every change made so far is undone before the error is
    /// returned.
    pub(crate) fn capture_and_apply<S: MetadataSink + ?Sized>(
        sink: &mut S,
        meta: &PageMeta,
    ) -> Result<Self> {
        let mut snapshots = Snapshots {
            previous_title: sink.title()?,
            tags: Vec::new(),
        };

        if let Err(err) = snapshots.apply(sink, meta) {
            if let Err(rollback) = snapshots.restore(sink) {
                warn!(error = %rollback, "rollback after failed activation was incomplete");
            }
            return Err(err);
        }

        Ok(snapshots)
    }

    fn apply<S: MetadataSink + ?Sized>(&mut self, sink: &mut S, meta: &PageMeta) -> Result<()> {
        for (key, value) in meta.tags() {
            match sink.get(&key)? {
                Some(previous_value) => {
                    trace!(tag = %key, "updating existing tag");
                    self.tags.push(MetaTagSnapshot {
                        key: key.clone(),
                        was_created: false,
                        previous_value,
                    });
                    sink.set(&key, value)?;
                }
                None => {
                    trace!(tag = %key, "creating tag");
                    sink.create(&key, value)?;
                    self.tags.push(MetaTagSnapshot {
                        key,
                        was_created: true,
                        previous_value: String::new(),
                    });
                }
            }
        }

        sink.set_title(&meta.title)
    }

    /// Undo the activation in reverse order.
    ///
    /// Every snapshot is attempted even if an earlier one fails; the first
    /// error is returned.
    pub(crate) fn restore<S: MetadataSink + ?Sized>(self, sink: &mut S) -> Result<()> {
        let title = match &self.previous_title {
            Some(title) => sink.set_title(title),
            None => sink.remove_title(),
        };
        let mut first_error = title.err();

        for snapshot in self.tags.into_iter().rev() {
            let outcome = if snapshot.was_created {
                sink.remove(&snapshot.key)
            } else {
                sink.set(&snapshot.key, &snapshot.previous_value)
            };
            if let Err(err) = outcome {
                warn!(tag = %snapshot.key, error = %err, "failed to restore tag");
                first_error.get_or_insert(err);
            }
        }

        match first_error {
            Some(err) => Err(err),
            None => Ok(()),
        }
    }

    pub fn previous_title(&self) -> Option<&str> {
        self.previous_title.as_deref()
    }

    pub fn tags(&self) -> &[MetaTagSnapshot] {
        &self.tags
    }
}

/// Handle for one activation window
#[derive(Debug)]
pub struct Activation<'a, S: MetadataSink + ?Sized> {
    sink: &'a mut S,
    snapshots: Option<Snapshots>,
}

/// Apply `meta` to `sink` until the returned handle is deactivated or dropped
pub fn activate<'a, S: MetadataSink + ?Sized>(
    sink: &'a mut S,
    meta: &PageMeta,
) -> Result<Activation<'a, S>> {
    let snapshots = Snapshots::capture_and_apply(sink, meta)?;
    debug!(
        title = %meta.title,
        tags = snapshots.tags.len(),
        created = snapshots.tags.iter().filter(|s| s.was_created).count(),
        "page meta activated"
    );
    Ok(Activation {
        sink,
        snapshots: Some(snapshots),
    })
}

impl<'a, S: MetadataSink + ?Sized> Activation<'a, S> {
    /// Restore the head to its state before activation
    pub fn deactivate(mut self) -> Result<()> {
        match self.snapshots.take() {
            Some(snapshots) => {
                snapshots.restore(&mut *self.sink)?;
                debug!("page meta deactivated");
                Ok(())
            }
            None => Ok(()),
        }
    }

    pub fn snapshots(&self) -> Option<&Snapshots> {
        self.snapshots.as_ref()
    }

    pub fn sink(&self) -> &S {
        &*self.sink
    }

    /// Mutable access for nested activations. Writes to the managed tags
    /// through this borrow are overwritten on deactivation.
    pub fn sink_mut(&mut self) -> &mut S {
        &mut *self.sink
    }
}

impl<S: MetadataSink + ?Sized> Drop for Activation<'_, S> {
    fn drop(&mut self) {
        if let Some(snapshots) = self.snapshots.take() {
            if let Err(err) = snapshots.restore(&mut *self.sink) {
                warn!(error = %err, "failed to restore page meta on drop");
            }
        }
    }
}

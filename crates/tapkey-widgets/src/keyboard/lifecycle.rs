//! Mounting and unmounting the keyboard overlay.
//!
//! While mounted, the background must not scroll under the user's finger.
//! The background's scroll setting is saved before it is switched off and
//! put back exactly on unmount, whatever it was.

use ratatui::layout::Rect;

use crate::overlay::MountSurface;

/// A background that can be frozen while an overlay is up.
pub trait ScrollControl {
    fn scroll_enabled(&self) -> bool;
    fn set_scroll_enabled(&mut self, enabled: bool);
}

/// The resolved attachment point for the overlay. Created once, on the
/// first mount.
pub struct MountPoint {
    surface: Box<dyn MountSurface>,
}

impl MountPoint {
    pub fn area(&self, frame_area: Rect) -> Rect {
        self.surface.resolve(frame_area)
    }
}

/// Mount state plus the scroll setting saved at mount time.
pub struct OverlayLifecycle {
    surface: Option<Box<dyn MountSurface>>,
    mount_point: Option<MountPoint>,
    mounted: bool,
    saved_scroll: Option<bool>,
    mount_points_created: usize,
}

impl OverlayLifecycle {
    pub fn new(surface: Box<dyn MountSurface>) -> Self {
        Self {
            surface: Some(surface),
            mount_point: None,
            mounted: false,
            saved_scroll: None,
            mount_points_created: 0,
        }
    }

    /// Save the scroll setting, freeze the background, and attach.
    ///
    /// Mounting twice without an unmount keeps the first saved value.
    pub fn mount(&mut self, scroll: &mut dyn ScrollControl) {
        if self.mounted {
            tracing::debug!("overlay already mounted");
            return;
        }
        if self.mount_point.is_none() {
            if let Some(surface) = self.surface.take() {
                self.mount_point = Some(MountPoint { surface });
                self.mount_points_created += 1;
                tracing::debug!("overlay mount point created");
            }
        }

        let was_enabled = scroll.scroll_enabled();
        self.saved_scroll = Some(was_enabled);
        scroll.set_scroll_enabled(false);
        self.mounted = true;
        tracing::debug!(saved_scroll = was_enabled, "overlay mounted");
    }

    /// Put the saved scroll setting back and detach. Idempotent.
    pub fn unmount(&mut self, scroll: &mut dyn ScrollControl) {
        if !self.mounted {
            return;
        }
        if let Some(saved) = self.saved_scroll.take() {
            scroll.set_scroll_enabled(saved);
        }
        self.mounted = false;
        tracing::debug!("overlay unmounted");
    }

    pub fn is_mounted(&self) -> bool {
        self.mounted
    }

    /// Where the overlay renders in a frame of `frame_area`, while mounted.
    pub fn mount_area(&self, frame_area: Rect) -> Option<Rect> {
        match (&self.mount_point, self.mounted) {
            (Some(point), true) => Some(point.area(frame_area)),
            _ => None,
        }
    }

    /// How many mount points have ever been created. Never exceeds one.
    pub fn mount_points_created(&self) -> usize {
        self.mount_points_created
    }
}

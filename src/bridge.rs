// src/bridge.rs

//! Process-wide access to one `Panel`, for older call sites that cannot be
//! handed a reference.
//!
//! New code should own its `Panel` and pass it explicitly.

use crate::controls::ScrollAttribute;
use crate::panel::Panel;
use log::{debug, warn};
use once_cell::sync::OnceCell;
use std::sync::Mutex;

static INSTANCE: OnceCell<Mutex<Panel>> = OnceCell::new();

/// Installs the process-wide panel. Hands the panel back if one is
/// already installed.
pub fn install(panel: Panel) -> Result<(), Panel> {
    INSTANCE
        .set(Mutex::new(panel))
        .map_err(|rejected| match rejected.into_inner() {
            Ok(panel) => panel,
            Err(poisoned) => poisoned.into_inner(),
        })?;
    debug!("bridge: panel installed");
    Ok(())
}

pub fn is_installed() -> bool {
    INSTANCE.get().is_some()
}

/// Runs `f` against the installed panel, or returns `None` if there is none.
pub fn with_instance<R>(f: impl FnOnce(&mut Panel) -> R) -> Option<R> {
    let cell = INSTANCE.get()?;
    let mut panel = cell.lock().unwrap_or_else(|poisoned| {
        warn!("bridge: panel mutex poisoned, continuing");
        poisoned.into_inner()
    });
    Some(f(&mut panel))
}

/// The scroll attribute path as a string, empty when unsupported or when no
/// panel is installed.
pub fn scroll_path_string(which: ScrollAttribute) -> String {
    with_instance(|panel| {
        panel
            .scroll_path(which)
            .map(|p| p.to_string_lossy().into_owned())
    })
    .flatten()
    .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;
    use crate::device::DeviceHandle;
    use crate::geometry::DisplayGeometry;
    use crate::variant::DisplayVariant;
    use crate::test_support::{config_in, touch};
    use tempfile::tempdir;
    use test_log::test;

    // The instance is process-wide, so everything runs in one test.
    #[test]
    fn install_once_then_share() {
        let dir = tempdir().unwrap();
        let config = config_in(&dir);
        touch(&config.paths.scroll.repeats);
        let make = |config: &Config| {
            Panel::with_device(
                DisplayVariant::SegmentedBinary,
                DisplayGeometry::new(132, 64, 8),
                DeviceHandle::absent(),
                config,
            )
        };

        assert!(install(make(&config)).is_ok());
        assert!(is_installed());
        assert!(install(make(&config)).is_err());

        let stride = with_instance(|panel| panel.stride());
        assert_eq!(stride, Some(132));
        assert_eq!(scroll_path_string(ScrollAttribute::Delay), "");
        assert_eq!(
            scroll_path_string(ScrollAttribute::Repeats),
            config.paths.scroll.repeats.to_string_lossy()
        );
    }
}

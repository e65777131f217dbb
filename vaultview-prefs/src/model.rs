//! The preference record and its remote wire form.

use serde::{Deserialize, Serialize};

/// Page sizes the pagination controls offer, ascending.
pub const ALLOWED_PAGE_SIZES: [u32; 5] = [10, 20, 25, 50, 100];

/// Default page size before any preference has been stored.
pub const DEFAULT_PAGE_SIZE: u32 = 50;

const MIN_FONT_SCALE: f32 = 0.5;
const MAX_FONT_SCALE: f32 = 2.0;

/// Snap a requested page size to the nearest allowed value.
///
/// Ties resolve to the smaller size. Deprecated sizes stored by older
/// builds migrate through here instead of being dropped.
pub fn nearest_page_size(requested: u32) -> u32 {
    let mut best = ALLOWED_PAGE_SIZES[0];
    for size in ALLOWED_PAGE_SIZES {
        if size.abs_diff(requested) < best.abs_diff(requested) {
            best = size;
        }
    }
    best
}

fn clamp_font_scale(scale: f32) -> f32 {
    if scale.is_finite() {
        scale.clamp(MIN_FONT_SCALE, MAX_FONT_SCALE)
    } else {
        1.0
    }
}

/// Base used when formatting backup sizes for display.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SizeBase {
    /// 1 KiB = 1024 bytes. Legacy records stored this as `iec`.
    #[default]
    #[serde(alias = "iec")]
    Binary,
    /// 1 kB = 1000 bytes. Legacy records stored this as `si`.
    #[serde(alias = "si")]
    Decimal,
}

impl SizeBase {
    /// Format a byte count with this base, e.g. `1.5 MiB` or `1.6 MB`.
    pub fn format_bytes(self, bytes: u64) -> String {
        let (step, units): (f64, &[&str]) = match self {
            SizeBase::Binary => (1024.0, &["B", "KiB", "MiB", "GiB", "TiB", "PiB"]),
            SizeBase::Decimal => (1000.0, &["B", "kB", "MB", "GB", "TB", "PB"]),
        };
        let mut value = bytes as f64;
        let mut unit = 0;
        while value >= step && unit < units.len() - 1 {
            value /= step;
            unit += 1;
        }
        if unit == 0 {
            format!("{bytes} B")
        } else {
            format!("{value:.1} {}", units[unit])
        }
    }
}

/// The cross-screen scalar settings record.
///
/// Process-wide and single-writer-intent: every screen reads it, only the
/// pagination controls write `page_size`. Created with defaults at start,
/// hydrated once from the remote service, persisted on every mutation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Preferences {
    /// Rows per table page, one of [`ALLOWED_PAGE_SIZES`].
    pub page_size: u32,
    /// Display-unit base for byte sizes.
    pub size_base: SizeBase,
    /// UI font scale factor.
    pub font_scale: f32,
}

impl Default for Preferences {
    fn default() -> Self {
        Self {
            page_size: DEFAULT_PAGE_SIZE,
            size_base: SizeBase::default(),
            font_scale: 1.0,
        }
    }
}

impl Preferences {
    /// Migrate out-of-range values to the nearest valid ones.
    pub fn normalized(mut self) -> Self {
        self.page_size = nearest_page_size(self.page_size);
        self.font_scale = clamp_font_scale(self.font_scale);
        self
    }

    /// Apply a single-field update, migrating the value into range.
    pub fn apply(&mut self, update: PrefUpdate) {
        match update {
            PrefUpdate::PageSize(size) => self.page_size = nearest_page_size(size),
            PrefUpdate::SizeBase(base) => self.size_base = base,
            PrefUpdate::FontScale(scale) => self.font_scale = clamp_font_scale(scale),
        }
    }

    /// Merge a remote record over this one: for each key present remotely
    /// and differing after migration, the remote value wins. Returns true
    /// if anything changed.
    pub fn merge_remote(&mut self, remote: &RemotePreferences) -> bool {
        let mut changed = false;
        if let Some(size) = remote.page_size {
            let size = nearest_page_size(size);
            if size != self.page_size {
                self.page_size = size;
                changed = true;
            }
        }
        if let Some(base) = remote.size_base
            && base != self.size_base
        {
            self.size_base = base;
            changed = true;
        }
        if let Some(scale) = remote.font_scale {
            let scale = clamp_font_scale(scale);
            if scale != self.font_scale {
                self.font_scale = scale;
                changed = true;
            }
        }
        changed
    }
}

/// A single-field preference mutation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PrefUpdate {
    PageSize(u32),
    SizeBase(SizeBase),
    FontScale(f32),
}

/// Wire form of the preference record.
///
/// Every key is optional on read (absence means default); writes always
/// send the complete record, since the service replaces the stored object
/// rather than patching it. Aliases accept key names written by older
/// console builds.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RemotePreferences {
    #[serde(
        default,
        alias = "pagesize",
        alias = "rows-per-page",
        skip_serializing_if = "Option::is_none"
    )]
    pub page_size: Option<u32>,
    #[serde(
        default,
        alias = "sizebase",
        skip_serializing_if = "Option::is_none"
    )]
    pub size_base: Option<SizeBase>,
    #[serde(
        default,
        alias = "fontscale",
        skip_serializing_if = "Option::is_none"
    )]
    pub font_scale: Option<f32>,
}

impl From<&Preferences> for RemotePreferences {
    fn from(prefs: &Preferences) -> Self {
        Self {
            page_size: Some(prefs.page_size),
            size_base: Some(prefs.size_base),
            font_scale: Some(prefs.font_scale),
        }
    }
}

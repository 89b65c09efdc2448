//! Per-viewer UI session state
//!
//! Holds what the front-end would otherwise keep in globals: the active
//! section, the list filter, the open detail view and the map widget.
//! Handlers receive it by `&mut` reference.

use civic_types::{Coordinates, ReportId, StatusFilter};
use serde::Serialize;

/// Default map centre (Ciudad del Este)
pub const DEFAULT_MAP_CENTER: Coordinates = Coordinates {
    lat: -25.5095,
    lng: -54.6110,
};

/// Default map zoom level
pub const DEFAULT_MAP_ZOOM: u8 = 13;

/// Top-level views of the front-end
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Default)]
pub enum Section {
    /// Submission form with the map
    #[default]
    Create,
    /// Filterable report list
    List,
    /// Statistics dashboard (administrators only)
    Analytics,
}

/// Map widget state, alive between mount and unmount
#[derive(Debug, Clone, PartialEq)]
pub struct MapSession {
    pub center: Coordinates,
    pub zoom: u8,
    marker: Option<Coordinates>,
}

impl MapSession {
    fn new() -> Self {
        Self {
            center: DEFAULT_MAP_CENTER,
            zoom: DEFAULT_MAP_ZOOM,
            marker: None,
        }
    }

    /// Move (or create) the single marker
    pub fn place_marker(&mut self, at: Coordinates) {
        self.marker = Some(at);
    }

    pub fn marker(&self) -> Option<Coordinates> {
        self.marker
    }
}

/// Explicit UI state for one viewer
#[derive(Debug, Clone, Default)]
pub struct UiSessionState {
    section: Section,
    filter: StatusFilter,
    open_detail: Option<ReportId>,
    map: Option<MapSession>,
    pub(crate) form_busy: bool,
    pub(crate) transition_busy: bool,
}

impl UiSessionState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn section(&self) -> Section {
        self.section
    }

    pub(crate) fn set_section(&mut self, section: Section) {
        if section != Section::Create {
            self.unmount_map();
        }
        self.section = section;
    }

    pub fn filter(&self) -> StatusFilter {
        self.filter
    }

    pub(crate) fn set_filter(&mut self, filter: StatusFilter) {
        self.filter = filter;
    }

    pub fn open_detail(&self) -> Option<&ReportId> {
        self.open_detail.as_ref()
    }

    pub(crate) fn set_open_detail(&mut self, id: Option<ReportId>) {
        self.open_detail = id;
    }

    /// Mount the map widget; a mounted map is kept as is.
    pub fn mount_map(&mut self) -> &mut MapSession {
        self.map.get_or_insert_with(MapSession::new)
    }

    /// Dispose of the map widget and its marker
    pub fn unmount_map(&mut self) {
        if self.map.take().is_some() {
            tracing::debug!("Map unmounted");
        }
    }

    pub fn map(&self) -> Option<&MapSession> {
        self.map.as_ref()
    }

    pub fn map_mut(&mut self) -> Option<&mut MapSession> {
        self.map.as_mut()
    }

    /// Coordinates picked on the map, if it is mounted and clicked
    pub fn marker(&self) -> Option<Coordinates> {
        self.map.as_ref().and_then(MapSession::marker)
    }

    /// Reset the submission form state
    pub(crate) fn clear_form(&mut self) {
        if let Some(map) = self.map.as_mut() {
            map.marker = None;
        }
    }

    pub fn is_form_busy(&self) -> bool {
        self.form_busy
    }

    pub fn is_transition_busy(&self) -> bool {
        self.transition_busy
    }
}

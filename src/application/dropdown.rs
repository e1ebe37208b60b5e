use tracing::debug;

/// Which dropdowns to hide and show after an interaction
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DropdownChange {
    pub close: Option<String>,
    pub open: Option<String>,
}

impl DropdownChange {
    pub fn is_noop(&self) -> bool {
        self.close.is_none() && self.open.is_none()
    }
}

/// At most one open dropdown for a page region.
///
/// Owned by the component rendering the dropdowns and passed to whoever
/// handles their events.
#[derive(Debug, Clone, Default)]
pub struct DropdownGroup {
    open: Option<String>,
}

impl DropdownGroup {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn open_id(&self) -> Option<&str> {
        self.open.as_deref()
    }

    /// Toggle `id`, closing whichever other dropdown was open
    pub fn toggle(&mut self, id: &str) -> DropdownChange {
        let change = match self.open.take() {
            Some(current) if current == id => DropdownChange {
                close: Some(current),
                open: None,
            },
            previous => {
                self.open = Some(id.to_string());
                DropdownChange {
                    close: previous,
                    open: Some(id.to_string()),
                }
            }
        };
        debug!(?change, "Dropdown toggled");
        change
    }

    pub fn close(&mut self) -> DropdownChange {
        DropdownChange {
            close: self.open.take(),
            open: None,
        }
    }

    /// Click anywhere on the page; `inside` names the dropdown the click hit
    pub fn on_outside_click(&mut self, inside: Option<&str>) -> DropdownChange {
        match (&self.open, inside) {
            (Some(open), Some(hit)) if open == hit => DropdownChange::default(),
            _ => self.close(),
        }
    }
}

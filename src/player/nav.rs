//! Side panel visibility: hidden, normal, or expanded.

/// Two independent flags mirrored onto `<body>` as `nav-hidden` and
/// `nav-expanded`. Both false is the normal width.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct NavState {
    pub hidden: bool,
    pub expanded: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NavMode {
    Hidden,
    Normal,
    Expanded,
}

impl NavState {
    pub fn mode(&self) -> NavMode {
        if self.hidden {
            NavMode::Hidden
        } else if self.expanded {
            NavMode::Expanded
        } else {
            NavMode::Normal
        }
    }

    /// Hidden -> Normal, Expanded -> Normal, Normal -> Expanded.
    pub fn toggle(&mut self) {
        if self.hidden {
            self.hidden = false;
        } else if self.expanded {
            self.expanded = false;
        } else {
            self.expanded = true;
        }
    }

    pub fn close(&mut self) {
        self.expanded = false;
        self.hidden = true;
    }
}

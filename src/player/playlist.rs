//! Ordered view of the visible file list, used to pick what plays next.

use crate::api::BrowseItem;

#[derive(Debug, Clone, PartialEq)]
pub struct PlaylistEntry {
    pub path: String,
    pub playable: bool,
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct Playlist {
    entries: Vec<PlaylistEntry>,
}

impl Playlist {
    pub fn new(entries: Vec<PlaylistEntry>) -> Self {
        Self { entries }
    }

    pub fn from_items(items: &[BrowseItem]) -> Self {
        Self::new(
            items
                .iter()
                .map(|item| PlaylistEntry {
                    path: item.path.clone(),
                    playable: item.is_playable(),
                })
                .collect(),
        )
    }

    /// First playable entry after `current`, skipping directories.
    pub fn next_after(&self, current: &str) -> Option<&str> {
        let index = self.entries.iter().position(|e| e.path == current)?;
        self.entries[index + 1..]
            .iter()
            .find(|e| e.playable)
            .map(|e| e.path.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::ItemKind;

    fn entry(path: &str, playable: bool) -> PlaylistEntry {
        PlaylistEntry {
            path: path.to_string(),
            playable,
        }
    }

    fn sample() -> Playlist {
        Playlist::new(vec![
            entry("/a.mp4", true),
            entry("/extras", false),
            entry("/b.mp4", true),
            entry("/c.mp4", true),
            entry("/zz", false),
        ])
    }

    #[test]
    fn skips_directories() {
        assert_eq!(sample().next_after("/a.mp4"), Some("/b.mp4"));
        assert_eq!(sample().next_after("/b.mp4"), Some("/c.mp4"));
    }

    #[test]
    fn stops_at_the_end() {
        assert_eq!(sample().next_after("/c.mp4"), None);
    }

    #[test]
    fn unknown_path_has_no_successor() {
        assert_eq!(sample().next_after("/elsewhere.mp4"), None);
        assert_eq!(Playlist::default().next_after("/a.mp4"), None);
    }

    #[test]
    fn matches_whole_paths_only() {
        let list = Playlist::new(vec![
            entry("/show/ep1.mp4", true),
            entry("/ep1.mp4", true),
            entry("/ep2.mp4", true),
        ]);
        assert_eq!(list.next_after("/ep1.mp4"), Some("/ep2.mp4"));
    }

    #[test]
    fn built_from_listing_items() {
        let item = |path: &str, kind: ItemKind, duration: Option<f64>| BrowseItem {
            name: path.trim_start_matches('/').to_string(),
            path: path.to_string(),
            kind,
            duration,
        };
        let list = Playlist::from_items(&[
            item("/a.mp4", ItemKind::Video, Some(61.0)),
            item("/season2", ItemKind::Directory, None),
            item("/b.mp4", ItemKind::Video, None),
        ]);

        assert_eq!(
            list,
            Playlist::new(vec![
                entry("/a.mp4", true),
                entry("/season2", false),
                entry("/b.mp4", true),
            ])
        );
        assert_eq!(list.next_after("/a.mp4"), Some("/b.mp4"));
    }
}

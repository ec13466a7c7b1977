//! Path-to-page routing.
//!
//! `ROUTES` is the static table; `resolve()` picks the first entry whose path
//! matches exactly after normalization. `Router` keeps the current path and
//! a back stack for the sidebar links.

/// Page views the router can show
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Page {
    /// Main application view
    Home,
    /// Questions about the uploaded documents
    Chat,
}

/// One entry of the route table
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RouteEntry {
    pub path: &'static str,
    pub page: Page,
}

/// The route table
pub static ROUTES: &[RouteEntry] = &[
    RouteEntry {
        path: "/",
        page: Page::Home,
    },
    RouteEntry {
        path: "/chat",
        page: Page::Chat,
    },
];

/// Canonical form of a path: empty becomes `/`, one trailing slash is dropped
pub fn normalize(path: &str) -> &str {
    let path = path.trim();
    if path.is_empty() || path == "/" {
        return "/";
    }
    path.strip_suffix('/').unwrap_or(path)
}

/// First table entry for `path`, if any
pub fn resolve(path: &str) -> Option<&'static RouteEntry> {
    let path = normalize(path);
    ROUTES.iter().find(|route| route.path == path)
}

/// Current location plus history
#[derive(Debug, Clone)]
pub struct Router {
    current: String,
    history: Vec<String>,
}

impl Router {
    pub fn new(start: &str) -> Self {
        Self {
            current: normalize(start).to_string(),
            history: Vec::new(),
        }
    }

    /// Current path, normalized
    pub fn current(&self) -> &str {
        &self.current
    }

    /// Route for the current path
    pub fn route(&self) -> Option<&'static RouteEntry> {
        resolve(&self.current)
    }

    /// Go to `path`. Navigating to the current path is a no-op.
    pub fn navigate(&mut self, path: &str) {
        let path = normalize(path);
        if path == self.current {
            return;
        }

        tracing::debug!("Navigating {} -> {}", self.current, path);
        let previous = std::mem::replace(&mut self.current, path.to_string());
        self.history.push(previous);
    }

    pub fn can_go_back(&self) -> bool {
        !self.history.is_empty()
    }

    /// Return to the previous path. Returns false when there is none.
    pub fn back(&mut self) -> bool {
        match self.history.pop() {
            Some(previous) => {
                self.current = previous;
                true
            }
            None => false,
        }
    }
}

impl Default for Router {
    fn default() -> Self {
        Self::new("/")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resolve_table_entries() {
        assert_eq!(resolve("/").map(|r| r.page), Some(Page::Home));
        assert_eq!(resolve("/chat").map(|r| r.page), Some(Page::Chat));
    }

    #[test]
    fn test_resolve_normalizes() {
        assert_eq!(resolve("").map(|r| r.page), Some(Page::Home));
        assert_eq!(resolve("/chat/").map(|r| r.page), Some(Page::Chat));
        assert_eq!(resolve(" /chat ").map(|r| r.page), Some(Page::Chat));
    }

    #[test]
    fn test_resolve_unknown_paths() {
        assert!(resolve("/chats").is_none());
        assert!(resolve("/profile").is_none());
        assert!(resolve("/chat/123").is_none());
    }

    #[test]
    fn test_table_paths_are_unique() {
        for (i, a) in ROUTES.iter().enumerate() {
            for b in &ROUTES[i + 1..] {
                assert_ne!(a.path, b.path);
            }
        }
    }

    #[test]
    fn test_navigate_and_back() {
        let mut router = Router::default();
        assert_eq!(router.current(), "/");
        assert!(!router.can_go_back());

        router.navigate("/chat/");
        assert_eq!(router.current(), "/chat");
        assert_eq!(router.route().map(|r| r.page), Some(Page::Chat));

        router.navigate("/profile");
        assert!(router.route().is_none());

        assert!(router.back());
        assert_eq!(router.current(), "/chat");
        assert!(router.back());
        assert_eq!(router.current(), "/");
        assert!(!router.back());
    }

    #[test]
    fn test_navigate_to_current_keeps_history() {
        let mut router = Router::new("/chat");
        router.navigate("/chat");
        assert!(!router.can_go_back());
    }
}

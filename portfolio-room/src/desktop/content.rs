use serde::{Deserialize, Serialize};

/// Fixed set of content panels on the desktop.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PanelId {
    About,
    Resume,
    Projects,
    Skills,
    Contact,
    Spotify,
}

impl PanelId {
    pub const ALL: [PanelId; 6] = [
        PanelId::About,
        PanelId::Resume,
        PanelId::Projects,
        PanelId::Skills,
        PanelId::Contact,
        PanelId::Spotify,
    ];

    /// Convert string identifier to panel id for RPC compatibility.
    pub fn from_string(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "about" => Some(Self::About),
            "resume" => Some(Self::Resume),
            "projects" => Some(Self::Projects),
            "skills" => Some(Self::Skills),
            "contact" => Some(Self::Contact),
            "spotify" => Some(Self::Spotify),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::About => "about",
            Self::Resume => "resume",
            Self::Projects => "projects",
            Self::Skills => "skills",
            Self::Contact => "contact",
            Self::Spotify => "spotify",
        }
    }

    pub fn content(&self) -> &'static ContentPanel {
        // ALL and CONTENT_PANELS share ordering.
        &CONTENT_PANELS[*self as usize]
    }

    /// Spotify is a link only and never gets a window.
    pub fn has_window(&self) -> bool {
        self.content().body.is_some()
    }
}

/// Static, read-only panel content.
#[derive(Debug)]
pub struct ContentPanel {
    pub id: PanelId,
    pub title: &'static str,
    pub icon: &'static str,
    pub body: Option<&'static str>,
}

pub const CONTENT_PANELS: [ContentPanel; 6] = [
    ContentPanel {
        id: PanelId::About,
        title: "About Me",
        icon: "[i]",
        body: Some(
            "Hi! I build software that sits close to the metal: renderers, \
             tooling and the occasional web toy like this room.\n\n\
             Click around the desktop to learn more, or use the power button \
             in the taskbar to head back into the room.",
        ),
    },
    ContentPanel {
        id: PanelId::Resume,
        title: "Resume",
        icon: "[R]",
        body: Some(
            "Experience\n\
             - Senior Engineer, graphics and tools\n\
             - Software Engineer, web platform\n\n\
             Education\n\
             - B.Sc. Computer Science\n\n\
             Use Download or Open Fullscreen to view the full PDF.",
        ),
    },
    ContentPanel {
        id: PanelId::Projects,
        title: "Projects",
        icon: "[P]",
        body: Some(
            "- Interactive 3D portfolio (this page)\n\
             - Point cloud viewer with GPU classification\n\
             - Fantasy console with a software rasterizer\n\
             - Realtime session service over websockets",
        ),
    },
    ContentPanel {
        id: PanelId::Skills,
        title: "Skills",
        icon: "[S]",
        body: Some(
            "Languages: Rust, TypeScript, C++, Python\n\
             Graphics: wgpu, WebGL, glTF pipelines\n\
             Web: WebAssembly, React, WebSockets\n\
             Tooling: CI, profiling, asset pipelines",
        ),
    },
    ContentPanel {
        id: PanelId::Contact,
        title: "Contact",
        icon: "[@]",
        body: Some(
            "Email: hello@example.com\n\
             GitHub: github.com/example\n\
             LinkedIn: linkedin.com/in/example",
        ),
    },
    ContentPanel {
        id: PanelId::Spotify,
        title: "Spotify",
        icon: "[~]",
        body: None,
    },
];

//! fontdrop core: validate an uploaded font, activate it for rendering, and
//! keep a live preview, its CSS export and its persisted settings in sync.
//!
//! ## Example
//!
//! ```no_run
//! use fontdrop_core::{Collaborators, PreviewConfig, Session, UploadedFile};
//!
//! let data = std::fs::read("variable.ttf").unwrap();
//! let mut session = Session::start(PreviewConfig::default(), Collaborators::default());
//! session.upload(UploadedFile::from_bytes("variable.ttf", "font/ttf", data)).unwrap();
//! session.set_axis("wght", 700.0).unwrap();
//! println!("{}", session.css());
//! ```

pub mod activation;
pub mod clipboard;
pub mod config;
pub mod controls;
pub mod document;
mod error;
pub mod messages;
pub mod notify;
pub mod preview;
pub mod progress;
pub mod render;
pub mod session;
pub mod settings;
pub mod upload;

pub use activation::{ActivatedFont, ActivationSequence, ActivationState, FontParser, SfntParser};
pub use clipboard::{Clipboard, ColorSource, FixedColor, MemoryClipboard};
pub use config::PreviewConfig;
pub use controls::{AxisPanel, AxisSlider, FeatureList, FeatureOption, VariationSettings};
pub use document::{PreviewDocument, Segment, StyledSpan};
pub use error::{
    ActivationError, ClipboardError, Error, ParseError, PersistenceError, RegistrationError,
    Result, ValidationError,
};
pub use font_inspect::{ParsedFont, VariationAxis};
pub use messages::{Locale, Message};
pub use notify::{LogNotifier, MemoryNotifier, Notification, Notifier, Severity};
pub use preview::{CssExport, PreviewSurface};
pub use progress::{ActivationProgress, LogProgress, MemoryProgress, ProgressEvent, ProgressSink};
pub use render::{FamilyNamer, FontFamilyId, FontRegistry, FontResource, RenderingEnvironment};
pub use session::{Collaborators, Command, Session};
pub use settings::{JsonFileStore, KeyValueStore, MemoryStore, PreviewSettings, SettingsStore};
pub use upload::{ByteSource, UploadedFile, validate};

//! End-to-end behavior of a preview session with in-memory collaborators.

use std::{cell::RefCell, rc::Rc, time::Duration};

use fontdrop_core::{
    Clipboard, ClipboardError, Collaborators, Command, Error, FixedColor, FontFamilyId,
    FontParser, FontRegistry, FontResource, KeyValueStore, Locale, MemoryClipboard,
    MemoryNotifier, MemoryProgress, MemoryStore, Message, ParseError, ParsedFont, PreviewConfig,
    ProgressEvent, RegistrationError, RenderingEnvironment, Segment, Session, Severity,
    UploadedFile, VariationAxis,
};

const MIB: u64 = 1024 * 1024;

struct StubParser(ParsedFont);

impl FontParser for StubParser {
    fn parse(&self, _: &[u8]) -> Result<ParsedFont, ParseError> {
        Ok(self.0.clone())
    }
}

/// A registry the test can inspect after handing it to the session.
#[derive(Clone, Default)]
struct SharedRegistry(Rc<RefCell<FontRegistry>>);

impl SharedRegistry {
    fn families(&self) -> usize {
        self.0.borrow().len()
    }

    fn contains(&self, family: &FontFamilyId) -> bool {
        self.0.borrow().contains(family)
    }
}

impl RenderingEnvironment for SharedRegistry {
    fn register(
        &mut self,
        family: &FontFamilyId,
        resource: FontResource,
    ) -> Result<(), RegistrationError> {
        self.0.borrow_mut().register(family, resource)
    }

    fn release(&mut self, family: &FontFamilyId) {
        self.0.borrow_mut().release(family);
    }
}

struct FailingClipboard;

impl Clipboard for FailingClipboard {
    fn write_text(&mut self, _: &str) -> Result<(), ClipboardError> {
        Err(ClipboardError("permission denied".into()))
    }
}

fn two_axis_font() -> ParsedFont {
    ParsedFont {
        axes: vec![
            VariationAxis::new("wght", 100.0, 900.0, 400.0),
            VariationAxis::new("wdth", 75.0, 125.0, 100.0),
        ],
        features: vec!["liga".into(), "kern".into()],
    }
}

fn static_font() -> ParsedFont {
    ParsedFont { axes: Vec::new(), features: vec!["liga".into()] }
}

struct Harness {
    notifier: MemoryNotifier,
    progress: MemoryProgress,
    store: MemoryStore,
    clipboard: MemoryClipboard,
    registry: SharedRegistry,
}

impl Harness {
    fn new() -> Self {
        let _ = env_logger::builder().is_test(true).try_init();
        Self {
            notifier: MemoryNotifier::new(),
            progress: MemoryProgress::new(),
            store: MemoryStore::new(),
            clipboard: MemoryClipboard::new(),
            registry: SharedRegistry::default(),
        }
    }

    fn collaborators(&self) -> Collaborators {
        Collaborators::default()
            .with_notifier(self.notifier.clone())
            .with_progress(self.progress.clone())
            .with_store(self.store.clone())
            .with_clipboard(self.clipboard.clone())
            .with_environment(self.registry.clone())
    }

    fn session(&self, parsed: ParsedFont) -> Session {
        let config = PreviewConfig::default().with_locale(Locale::English);
        Session::start(config, self.collaborators().with_parser(StubParser(parsed)))
    }
}

fn ttf(size: u64) -> UploadedFile {
    UploadedFile::from_bytes("font.ttf", "font/ttf", vec![0u8; 16]).with_declared_size(size)
}

#[test]
fn two_axis_font_activates_fully() {
    let harness = Harness::new();
    let mut session = harness.session(two_axis_font());

    let family = session.upload(ttf(2 * MIB)).unwrap().family.clone();

    assert_eq!(harness.progress.percentages(), vec![0, 20, 40, 60, 80, 90, 100]);
    assert_eq!(
        harness.progress.events().last(),
        Some(&ProgressEvent::HideAfter(Duration::from_secs(1)))
    );
    assert!(!session.progress().is_visible());

    assert_eq!(session.axis_panel().sliders().len(), 2);
    assert_eq!(session.variation_settings().to_string(), r#""wght" 400, "wdth" 100"#);
    assert_eq!(session.surface().variation_settings.to_string(), r#""wght" 400, "wdth" 100"#);
    assert_eq!(session.surface().font_family.as_ref(), Some(&family));
    assert_eq!(session.axis_placeholder(), None);
    assert_eq!(harness.notifier.messages(), vec![Message::FontLoaded]);
    assert_eq!(harness.notifier.last().unwrap().severity, Severity::Success);
}

#[test]
fn oversized_file_is_rejected_without_progress() {
    let harness = Harness::new();
    let mut session = harness.session(two_axis_font());

    let file = UploadedFile::from_bytes("anything.bin", "application/octet-stream", Vec::new())
        .with_declared_size(4 * MIB);
    let err = session.upload(file).unwrap_err();

    assert!(matches!(err, Error::Validation(_)));
    assert_eq!(harness.notifier.messages(), vec![Message::FileTooLarge]);
    assert!(harness.progress.events().is_empty());
    assert!(session.active_font().is_none());
}

#[test]
fn unsupported_type_is_rejected() {
    let harness = Harness::new();
    let mut session = harness.session(two_axis_font());

    let file = UploadedFile::from_bytes("font.woff", "font/woff", vec![1, 2, 3]);
    assert!(session.upload(file).is_err());

    assert_eq!(harness.notifier.messages(), vec![Message::UnsupportedFileType]);
    assert!(harness.progress.events().is_empty());
}

#[test]
fn feature_applies_without_axes() {
    let harness = Harness::new();
    let mut session = harness.session(static_font());
    session.upload(ttf(1024)).unwrap();

    assert!(session.axis_panel().is_placeholder());
    assert_eq!(session.axis_placeholder(), Some("This font has no variation axes"));
    assert!(session.variation_settings().is_empty());

    session.set_text("office");
    session.select(1..3).unwrap();
    session.select_features(&["liga"]).unwrap();
    session.apply_features_to_selection().unwrap();

    let Segment::Span(span) = &session.surface().document.segments()[1] else {
        panic!("expected a styled span");
    };
    assert_eq!(span.text, "ff");
    assert_eq!(span.feature_settings, r#""liga" 1"#);
    assert_eq!(span.variation_settings, None);
    assert!(session.surface().document.selection().is_none());
    assert_eq!(harness.notifier.last().unwrap().message, Message::FeatureApplied);
}

#[test]
fn applied_span_carries_variation_settings() {
    let harness = Harness::new();
    let mut session = harness.session(two_axis_font());
    session.upload(ttf(1024)).unwrap();
    session.set_axis("wght", 700.0).unwrap();

    session.set_text("hello");
    session.select(0..5).unwrap();
    session.select_features(&["liga", "kern"]).unwrap();
    session.apply_features_to_selection().unwrap();

    assert_eq!(
        session.surface().document.to_html(),
        "<span style=\"font-feature-settings: &quot;liga&quot; 1, &quot;kern&quot; 1; \
         font-variation-settings: &quot;wght&quot; 700, &quot;wdth&quot; 100;\">hello</span>"
    );
}

#[test]
fn apply_requires_selection_then_feature() {
    let harness = Harness::new();
    let mut session = harness.session(static_font());
    session.upload(ttf(1024)).unwrap();
    harness.notifier.clear();

    session.set_text("abc");
    assert!(matches!(session.apply_features_to_selection(), Err(Error::NoSelection)));

    session.select(0..2).unwrap();
    assert!(matches!(session.apply_features_to_selection(), Err(Error::NoFeatureSelected)));

    assert_eq!(harness.notifier.messages(), vec![Message::NoSelection, Message::NoFeatureSelected]);
    assert!(harness.notifier.all().iter().all(|n| n.severity == Severity::Warning));
    assert_eq!(session.surface().document.segments().len(), 1);
}

#[test]
fn font_size_survives_restart() {
    let harness = Harness::new();
    let mut session = harness.session(ParsedFont::default());
    session.set_font_size(72).unwrap();
    drop(session);

    let restored = harness.session(ParsedFont::default());
    assert_eq!(restored.surface().font_size_px, 72);
    assert!(restored.css().contains("font-size: 72px;"));

    let raw = harness.store.get("fontdropSettings").unwrap().unwrap();
    assert!(raw.contains(r#""fontSize":72"#));
}

#[test]
fn malformed_settings_leave_defaults_silently() {
    let harness = Harness::new();
    let mut store = harness.store.clone();
    store.set("fontdropSettings", "{\"fontSize\":").unwrap();

    let session = harness.session(ParsedFont::default());
    assert_eq!(session.surface().font_size_px, 48);
    assert!(harness.notifier.all().is_empty());
}

#[test]
fn settings_record_axis_values_and_family() {
    let harness = Harness::new();
    let mut session = harness.session(two_axis_font());
    let family = session.upload(ttf(1024)).unwrap().family.to_string();
    session.set_axis("wdth", 90.0).unwrap();

    let raw = harness.store.get("fontdropSettings").unwrap().unwrap();
    let saved: fontdrop_core::PreviewSettings = serde_json::from_str(&raw).unwrap();
    assert_eq!(saved.font_family.as_deref(), Some(family.as_str()));
    assert_eq!(saved.variation_settings, r#""wght" 400, "wdth" 90"#);
    assert_eq!(saved.axis_values().keys().collect::<Vec<_>>(), vec!["wght", "wdth"]);
}

#[test]
fn parse_failure_keeps_previous_font() {
    let harness = Harness::new();
    let config = PreviewConfig::default().with_locale(Locale::English);
    let mut session = Session::start(config, harness.collaborators());

    let good = UploadedFile::from_bytes(
        "Vazirmatn.ttf",
        "font/ttf",
        font_test_data::VAZIRMATN_VAR.to_vec(),
    );
    let family = session.upload(good).unwrap().family.clone();
    harness.notifier.clear();

    let bad = UploadedFile::from_bytes("broken.ttf", "font/ttf", b"not a font".to_vec());
    let err = session.upload(bad).unwrap_err();

    assert!(matches!(err, Error::Activation(_)));
    assert_eq!(harness.notifier.messages(), vec![Message::FontParseFailed]);
    assert_eq!(harness.notifier.last().unwrap().severity, Severity::Danger);
    assert_eq!(session.active_font().unwrap().family, family);
    assert_eq!(session.surface().font_family.as_ref(), Some(&family));
    assert!(!harness.progress.percentages().contains(&100));
    assert!(!session.progress().is_visible());
}

#[test]
fn real_variable_font_drives_css() {
    let harness = Harness::new();
    let config = PreviewConfig::default().with_locale(Locale::English);
    let collaborators = harness.collaborators().with_colors(FixedColor::new("#336699"));
    let mut session = Session::start(config, collaborators);

    let file = UploadedFile::from_bytes(
        "Vazirmatn.ttf",
        "font/ttf",
        font_test_data::VAZIRMATN_VAR.to_vec(),
    );
    let family = session.upload(file).unwrap().family.to_string();
    assert_eq!(session.set_axis("wght", 1000.0).unwrap(), 900.0);

    let css = session.copy_css().unwrap();
    assert!(css.starts_with(&format!("font-family: '{family}';\n")));
    assert!(css.contains("color: #336699;"));
    assert!(css.contains(r#""wght" 900"#));
    assert_eq!(harness.clipboard.contents(), Some(css));
    assert_eq!(harness.notifier.last().unwrap().message, Message::CssCopied);
}

#[test]
fn css_without_font_uses_fallback() {
    let harness = Harness::new();
    let session = harness.session(ParsedFont::default());
    assert_eq!(session.css(), "font-family: 'Arial';\nfont-size: 48px;\ncolor: #000000;");
}

#[test]
fn clipboard_failure_is_a_warning() {
    let harness = Harness::new();
    let config = PreviewConfig::default().with_locale(Locale::English);
    let mut session =
        Session::start(config, harness.collaborators().with_clipboard(FailingClipboard));

    assert!(matches!(session.copy_css(), Err(Error::Clipboard(_))));
    let last = harness.notifier.last().unwrap();
    assert_eq!(last.message, Message::CssCopyFailed);
    assert_eq!(last.severity, Severity::Warning);
    assert_eq!(last.dismiss_after, Duration::from_secs(5));
}

#[test]
fn unknown_axis_and_feature_are_errors() {
    let harness = Harness::new();
    let mut session = harness.session(two_axis_font());
    session.upload(ttf(1024)).unwrap();

    assert!(matches!(session.set_axis("slnt", 0.0), Err(Error::UnknownAxis(t)) if t == "slnt"));
    assert!(matches!(
        session.select_features(&["smcp"]),
        Err(Error::UnknownFeature(t)) if t == "smcp"
    ));
    assert!(matches!(session.set_font_size(0), Err(Error::InvalidFontSize(0))));
}

#[test]
fn non_finite_axis_value_is_rejected() {
    let harness = Harness::new();
    let mut session = harness.session(two_axis_font());
    session.upload(ttf(1024)).unwrap();
    session.set_axis("wght", 600.0).unwrap();

    for value in [f32::NAN, f32::INFINITY, f32::NEG_INFINITY] {
        assert!(matches!(
            session.set_axis("wght", value),
            Err(Error::InvalidAxisValue { tag, .. }) if tag == "wght"
        ));
    }

    assert_eq!(session.surface().variation_settings.to_string(), r#""wght" 600, "wdth" 100"#);
    assert!(!session.css().contains("NaN"));
    let raw = harness.store.get("fontdropSettings").unwrap().unwrap();
    assert!(raw.contains(r#"\"wght\" 600"#));
}

#[test]
fn inverted_axis_range_does_not_panic() {
    let harness = Harness::new();
    let font = ParsedFont {
        axes: vec![VariationAxis::new("wght", 900.0, 100.0, 400.0)],
        features: Vec::new(),
    };
    let mut session = harness.session(font);
    session.upload(ttf(1024)).unwrap();

    assert_eq!(session.set_axis("wght", 500.0).unwrap(), 500.0);
    assert_eq!(session.set_axis("wght", 2000.0).unwrap(), 900.0);
}

#[test]
fn superseded_font_is_released() {
    let harness = Harness::new();
    let mut session = harness.session(static_font());
    let first = session.upload(ttf(1024)).unwrap().family.clone();
    assert!(harness.registry.contains(&first));

    let second = session.upload(ttf(1024)).unwrap().family.clone();
    assert_eq!(harness.registry.families(), 1);
    assert!(harness.registry.contains(&second));
    assert!(!harness.registry.contains(&first));
}

#[test]
fn failed_upload_keeps_registered_font() {
    let harness = Harness::new();
    let config = PreviewConfig::default().with_locale(Locale::English);
    let mut session = Session::start(config, harness.collaborators());

    let good = UploadedFile::from_bytes(
        "Vazirmatn.ttf",
        "font/ttf",
        font_test_data::VAZIRMATN_VAR.to_vec(),
    );
    let family = session.upload(good).unwrap().family.clone();
    let bad = UploadedFile::from_bytes("broken.ttf", "font/ttf", b"not a font".to_vec());
    assert!(session.upload(bad).is_err());

    assert_eq!(harness.registry.families(), 1);
    assert!(harness.registry.contains(&family));
}

#[test]
fn each_upload_gets_a_new_family() {
    let harness = Harness::new();
    let mut session = harness.session(static_font());
    let first = session.upload(ttf(1024)).unwrap().family.clone();
    let second = session.upload(ttf(1024)).unwrap().family.clone();
    assert_ne!(first, second);
    assert_eq!(session.surface().font_family.as_ref(), Some(&second));
}

#[test]
fn commands_dispatch_in_order() {
    let harness = Harness::new();
    let mut session = harness.session(static_font());

    let commands = vec![
        Command::Upload(ttf(1024)),
        Command::SetFontSize(30),
        Command::SetText("fish".into()),
        Command::Select(0..2),
        Command::SelectFeatures(vec!["liga".into()]),
        Command::ApplyFeaturesToSelection,
        Command::ToggleGrid,
        Command::CopyCss,
    ];
    for command in commands {
        session.dispatch(command).unwrap();
    }

    assert!(!session.surface().grid_visible);
    assert_eq!(session.surface().font_size_px, 30);
    assert!(harness.clipboard.contents().unwrap().contains("font-size: 30px;"));
    assert_eq!(
        harness.notifier.messages(),
        vec![Message::FontLoaded, Message::FeatureApplied, Message::CssCopied]
    );
}

#[test]
fn feature_list_placeholder() {
    let harness = Harness::new();
    let mut session = harness.session(ParsedFont::default());
    session.upload(ttf(1024)).unwrap();
    assert!(session.feature_list().is_placeholder());
    assert_eq!(session.feature_placeholder(), Some("No OpenType features"));
}

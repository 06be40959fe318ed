//! The preview session: owned state plus command dispatch.

use std::ops::Range;

use log::{error, info, warn};

use crate::{
    Error, Result,
    activation::{ActivatedFont, ActivationSequence, FontParser, SfntParser},
    clipboard::{Clipboard, ColorSource, FixedColor, MemoryClipboard},
    config::PreviewConfig,
    controls::{AxisPanel, FeatureList, VariationSettings, feature_settings},
    error::ValidationError,
    messages::Message,
    notify::{LogNotifier, Notification, Notifier},
    preview::{CssExport, PreviewSurface},
    progress::{ActivationProgress, LogProgress, ProgressSink, milestone},
    render::{FamilyNamer, FontRegistry, RenderingEnvironment},
    settings::{KeyValueStore, MemoryStore, PreviewSettings, SettingsStore},
    upload::{UploadedFile, validate},
};

/// An input event for the session.
#[derive(Debug)]
pub enum Command {
    Upload(UploadedFile),
    SetFontSize(u32),
    SetAxis { tag: String, value: f32 },
    SelectFeatures(Vec<String>),
    SetText(String),
    Select(Range<usize>),
    ApplyFeaturesToSelection,
    CopyCss,
    ToggleGrid,
}

/// External collaborators of a session.
pub struct Collaborators {
    pub parser: Box<dyn FontParser>,
    pub environment: Box<dyn RenderingEnvironment>,
    pub store: Box<dyn KeyValueStore>,
    pub clipboard: Box<dyn Clipboard>,
    pub notifier: Box<dyn Notifier>,
    pub progress: Box<dyn ProgressSink>,
    pub colors: Box<dyn ColorSource>,
}

impl Default for Collaborators {
    fn default() -> Self {
        Self {
            parser: Box::new(SfntParser),
            environment: Box::new(FontRegistry::new()),
            store: Box::new(MemoryStore::new()),
            clipboard: Box::new(MemoryClipboard::new()),
            notifier: Box::new(LogNotifier),
            progress: Box::new(LogProgress),
            colors: Box::new(FixedColor::default()),
        }
    }
}

impl Collaborators {
    pub fn with_parser(mut self, parser: impl FontParser + 'static) -> Self {
        self.parser = Box::new(parser);
        self
    }

    pub fn with_environment(mut self, environment: impl RenderingEnvironment + 'static) -> Self {
        self.environment = Box::new(environment);
        self
    }

    pub fn with_store(mut self, store: impl KeyValueStore + 'static) -> Self {
        self.store = Box::new(store);
        self
    }

    pub fn with_clipboard(mut self, clipboard: impl Clipboard + 'static) -> Self {
        self.clipboard = Box::new(clipboard);
        self
    }

    pub fn with_notifier(mut self, notifier: impl Notifier + 'static) -> Self {
        self.notifier = Box::new(notifier);
        self
    }

    pub fn with_progress(mut self, progress: impl ProgressSink + 'static) -> Self {
        self.progress = Box::new(progress);
        self
    }

    pub fn with_colors(mut self, colors: impl ColorSource + 'static) -> Self {
        self.colors = Box::new(colors);
        self
    }
}

/// All mutable state of one preview, with a single writer (`&mut self`).
///
/// Holds the one active font; a new upload replaces it only after its own
/// activation succeeds. An upload runs to completion before the next command
/// is handled, so activations never overlap.
pub struct Session {
    config: PreviewConfig,
    parser: Box<dyn FontParser>,
    environment: Box<dyn RenderingEnvironment>,
    clipboard: Box<dyn Clipboard>,
    notifier: Box<dyn Notifier>,
    progress_sink: Box<dyn ProgressSink>,
    colors: Box<dyn ColorSource>,
    settings: SettingsStore,
    activation: ActivationSequence,
    active: Option<ActivatedFont>,
    surface: PreviewSurface,
    axes: AxisPanel,
    features: FeatureList,
}

impl Session {
    /// Create a session and restore saved settings.
    pub fn start(config: PreviewConfig, collaborators: Collaborators) -> Self {
        let Collaborators { parser, environment, store, clipboard, notifier, progress, colors } =
            collaborators;
        let settings = SettingsStore::new(store, config.settings_key.clone());
        let mut session = Self {
            surface: PreviewSurface::new(config.default_font_size_px),
            features: FeatureList::default(),
            axes: AxisPanel::default(),
            activation: ActivationSequence::new(FamilyNamer::default()),
            active: None,
            settings,
            parser,
            environment,
            clipboard,
            notifier,
            progress_sink: progress,
            colors,
            config,
        };
        session.restore_settings();
        session
    }

    pub fn config(&self) -> &PreviewConfig {
        &self.config
    }

    pub fn surface(&self) -> &PreviewSurface {
        &self.surface
    }

    pub fn axis_panel(&self) -> &AxisPanel {
        &self.axes
    }

    pub fn feature_list(&self) -> &FeatureList {
        &self.features
    }

    pub fn active_font(&self) -> Option<&ActivatedFont> {
        self.active.as_ref()
    }

    pub fn progress(&self) -> ActivationProgress {
        self.activation.progress()
    }

    /// Message shown in place of the axis sliders, if any.
    pub fn axis_placeholder(&self) -> Option<&'static str> {
        self.axes.is_placeholder().then(|| Message::NoAxes.text(self.config.locale))
    }

    /// Message shown in place of the feature options, if any.
    pub fn feature_placeholder(&self) -> Option<&'static str> {
        self.features.is_placeholder().then(|| Message::NoFeatures.text(self.config.locale))
    }

    /// Apply one command.
    pub fn dispatch(&mut self, command: Command) -> Result<()> {
        match command {
            Command::Upload(file) => self.upload(file).map(drop),
            Command::SetFontSize(px) => self.set_font_size(px),
            Command::SetAxis { tag, value } => self.set_axis(&tag, value).map(drop),
            Command::SelectFeatures(tags) => self.select_features(&tags),
            Command::SetText(text) => {
                self.set_text(text);
                Ok(())
            }
            Command::Select(range) => self.select(range),
            Command::ApplyFeaturesToSelection => self.apply_features_to_selection(),
            Command::CopyCss => self.copy_css().map(drop),
            Command::ToggleGrid => {
                self.toggle_grid();
                Ok(())
            }
        }
    }

    fn notify(&mut self, message: Message) {
        self.notifier.notify(Notification::new(message, self.config.locale));
    }

    /// Validate and activate an uploaded font.
    ///
    /// Every failure is reported with exactly one notification before it is
    /// returned. A failed upload leaves the previously active font in place;
    /// a successful one releases it from the rendering environment.
    pub fn upload(&mut self, file: UploadedFile) -> Result<&ActivatedFont> {
        if let Err(e) = validate(&file) {
            warn!("Rejected upload {}: {e}", file.name);
            self.notify(match e {
                ValidationError::TooLarge { .. } => Message::FileTooLarge,
                ValidationError::UnsupportedType { .. } => Message::UnsupportedFileType,
            });
            return Err(e.into());
        }
        let font = match self.activation.run(
            file,
            self.parser.as_ref(),
            self.environment.as_mut(),
            self.progress_sink.as_mut(),
        ) {
            Ok(font) => font,
            Err(e) => {
                self.notify(e.message());
                return Err(e.into());
            }
        };

        self.activation.begin_finalizing();
        self.surface.font_family = Some(font.family.clone());
        self.activation.advance(milestone::APPLIED, self.progress_sink.as_mut());

        self.axes = AxisPanel::from_axes(&font.parsed.axes);
        self.features = FeatureList::from_tags(&font.parsed.features, self.config.locale);
        self.surface.document.clear_selection();
        info!(
            "Activated {} as {} ({} axes, {} features)",
            font.file_name,
            font.family,
            font.parsed.axes.len(),
            font.parsed.features.len()
        );
        self.sync_preview();

        self.activation.advance(milestone::DONE, self.progress_sink.as_mut());
        self.activation.finish(self.progress_sink.as_mut());
        self.notify(Message::FontLoaded);
        if let Some(previous) = self.active.take() {
            self.environment.release(&previous.family);
        }
        Ok(self.active.insert(font))
    }

    /// Re-apply the variation description to the preview and persist.
    fn sync_preview(&mut self) {
        self.surface.variation_settings = self.axes.variation_settings();
        self.save_settings();
    }

    fn save_settings(&mut self) {
        let settings = PreviewSettings {
            font_size: self.surface.font_size_px,
            variation_settings: self.surface.variation_settings.to_string(),
            font_family: self.surface.font_family.as_ref().map(ToString::to_string),
        };
        if let Err(e) = self.settings.save(&settings) {
            error!("Error saving settings: {e}");
        }
    }

    fn restore_settings(&mut self) {
        let Some(saved) = self.settings.load() else {
            return;
        };
        if let Err(e) = self.set_font_size(saved.font_size) {
            error!("Error loading settings: {e}");
        }
    }

    pub fn set_font_size(&mut self, px: u32) -> Result<()> {
        if px == 0 {
            return Err(Error::InvalidFontSize(px));
        }
        self.surface.font_size_px = px;
        self.save_settings();
        Ok(())
    }

    /// Move an axis slider. Returns the value applied after clamping.
    pub fn set_axis(&mut self, tag: &str, value: f32) -> Result<f32> {
        if !value.is_finite() {
            return Err(Error::InvalidAxisValue { tag: tag.to_string(), value });
        }
        let applied =
            self.axes.set_value(tag, value).ok_or_else(|| Error::UnknownAxis(tag.to_string()))?;
        self.sync_preview();
        Ok(applied)
    }

    pub fn select_features<S: AsRef<str>>(&mut self, tags: &[S]) -> Result<()> {
        self.features.select(tags).map_err(Error::UnknownFeature)
    }

    pub fn set_text(&mut self, text: impl Into<String>) {
        self.surface.document.set_text(text);
    }

    pub fn select(&mut self, range: Range<usize>) -> Result<()> {
        let len = self.surface.document.char_len();
        if self.surface.document.select(range.clone()) {
            Ok(())
        } else {
            Err(Error::InvalidSelection { start: range.start, end: range.end, len })
        }
    }

    /// Wrap the selected text in a span carrying the selected features and the
    /// current variation settings.
    pub fn apply_features_to_selection(&mut self) -> Result<()> {
        if self.surface.document.selected_text().is_none() {
            self.notify(Message::NoSelection);
            return Err(Error::NoSelection);
        }
        let selected = self.features.selected();
        if selected.is_empty() {
            self.notify(Message::NoFeatureSelected);
            return Err(Error::NoFeatureSelected);
        }

        let features = feature_settings(&selected);
        let variation = self.axes.variation_settings();
        let variation = (!variation.is_empty()).then(|| variation.to_string());
        self.surface.document.wrap_selection(features, variation);
        self.notify(Message::FeatureApplied);
        Ok(())
    }

    /// The CSS declaration block for the current preview.
    pub fn css(&self) -> String {
        let color = self.colors.text_color();
        CssExport {
            font_family: self.surface.font_family.as_ref().map(|f| f.as_str()),
            fallback_family: &self.config.fallback_font_family,
            font_size_px: self.surface.font_size_px,
            color: color.as_deref().unwrap_or(&self.config.default_text_color),
            variation_settings: &self.surface.variation_settings,
        }
        .render()
    }

    /// Copy [`Session::css`] to the clipboard.
    pub fn copy_css(&mut self) -> Result<String> {
        let css = self.css();
        match self.clipboard.write_text(&css) {
            Ok(()) => {
                self.notify(Message::CssCopied);
                Ok(css)
            }
            Err(e) => {
                warn!("{e}");
                self.notify(Message::CssCopyFailed);
                Err(e.into())
            }
        }
    }

    /// Flip the guide grid. Returns whether it is now visible.
    pub fn toggle_grid(&mut self) -> bool {
        self.surface.grid_visible = !self.surface.grid_visible;
        self.surface.grid_visible
    }

    /// The variation description of the current sliders.
    pub fn variation_settings(&self) -> VariationSettings {
        self.axes.variation_settings()
    }
}

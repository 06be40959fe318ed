//! The upload-to-previewable-font activation sequence.

use std::fmt;

use font_inspect::ParsedFont;
use log::{debug, error};

use crate::{
    config::PROGRESS_HIDE_DELAY,
    error::{ActivationError, ParseError},
    messages::Message,
    progress::{ActivationProgress, ProgressSink, milestone},
    render::{FamilyNamer, FontFamilyId, FontResource, RenderingEnvironment},
    upload::UploadedFile,
};

/// Turns font bytes into a [`ParsedFont`].
pub trait FontParser {
    fn parse(&self, data: &[u8]) -> Result<ParsedFont, ParseError>;
}

/// Parses sfnt (TrueType/OpenType) data with `font-inspect`.
#[derive(Debug, Clone, Copy, Default)]
pub struct SfntParser;

impl FontParser for SfntParser {
    fn parse(&self, data: &[u8]) -> Result<ParsedFont, ParseError> {
        font_inspect::inspect(data)
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ActivationState {
    #[default]
    Idle,
    Reading,
    Parsing,
    Registering,
    Finalizing,
}

impl fmt::Display for ActivationState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Idle => "idle",
            Self::Reading => "reading",
            Self::Parsing => "parsing",
            Self::Registering => "registering",
            Self::Finalizing => "finalizing",
        })
    }
}

/// A font that completed registration.
#[derive(Debug, Clone, PartialEq)]
pub struct ActivatedFont {
    pub family: FontFamilyId,
    pub file_name: String,
    pub parsed: ParsedFont,
}

impl ActivationError {
    /// The single message shown when the sequence fails with this error.
    pub fn message(&self) -> Message {
        match self {
            Self::Read(_) => Message::FontReadFailed,
            Self::Parse(_) => Message::FontParseFailed,
            Self::Registration(_) => Message::FontRegistrationFailed,
        }
    }
}

/// State and progress of the activation sequence.
///
/// Drives Idle → Reading → Parsing → Registering; the owner performs the
/// Finalizing step between [`ActivationSequence::begin_finalizing`] and
/// [`ActivationSequence::finish`].
#[derive(Debug, Default)]
pub struct ActivationSequence {
    state: ActivationState,
    progress: ActivationProgress,
    namer: FamilyNamer,
}

impl ActivationSequence {
    pub fn new(namer: FamilyNamer) -> Self {
        Self { namer, ..Default::default() }
    }

    pub fn state(&self) -> ActivationState {
        self.state
    }

    pub fn is_busy(&self) -> bool {
        self.state != ActivationState::Idle
    }

    pub fn progress(&self) -> ActivationProgress {
        self.progress
    }

    pub fn advance(&mut self, percent: u8, sink: &mut dyn ProgressSink) {
        self.progress.advance(percent, sink);
    }

    fn enter(&mut self, state: ActivationState) {
        debug!("Activation {} -> {state}", self.state);
        self.state = state;
    }

    /// Read, parse and register `file`. On error the sequence is finished
    /// and back to idle.
    pub fn run(
        &mut self,
        mut file: UploadedFile,
        parser: &dyn FontParser,
        environment: &mut dyn RenderingEnvironment,
        sink: &mut dyn ProgressSink,
    ) -> Result<ActivatedFont, ActivationError> {
        self.enter(ActivationState::Reading);
        self.progress.start(sink);
        self.progress.advance(milestone::READING, sink);

        let result = self.read_parse_register(&mut file, parser, environment, sink);
        if let Err(e) = &result {
            error!("Font loading error ({}): {e}", file.name);
            self.finish(sink);
        }
        result
    }

    fn read_parse_register(
        &mut self,
        file: &mut UploadedFile,
        parser: &dyn FontParser,
        environment: &mut dyn RenderingEnvironment,
        sink: &mut dyn ProgressSink,
    ) -> Result<ActivatedFont, ActivationError> {
        let data = file.read_bytes().map_err(ActivationError::Read)?;
        self.progress.advance(milestone::READ, sink);

        self.enter(ActivationState::Parsing);
        let parsed = parser.parse(&data)?;
        self.progress.advance(milestone::PARSED, sink);

        self.enter(ActivationState::Registering);
        let family = self.namer.next();
        environment.register(&family, FontResource::new(data, file.mime.clone()))?;
        self.progress.advance(milestone::REGISTERED, sink);

        Ok(ActivatedFont { family, file_name: file.name.clone(), parsed })
    }

    pub fn begin_finalizing(&mut self) {
        self.enter(ActivationState::Finalizing);
    }

    /// Return to idle and schedule the progress indicator to hide.
    pub fn finish(&mut self, sink: &mut dyn ProgressSink) {
        self.enter(ActivationState::Idle);
        self.progress.hide_after(PROGRESS_HIDE_DELAY, sink);
    }
}

#[cfg(test)]
mod tests {
    use std::io;

    use super::*;
    use crate::{
        error::RegistrationError,
        progress::{MemoryProgress, ProgressEvent},
        render::FontRegistry,
        upload::ByteSource,
    };

    struct FixedParser(ParsedFont);

    impl FontParser for FixedParser {
        fn parse(&self, _: &[u8]) -> Result<ParsedFont, ParseError> {
            Ok(self.0.clone())
        }
    }

    struct BrokenSource;

    impl ByteSource for BrokenSource {
        fn read_bytes(&mut self) -> io::Result<Vec<u8>> {
            Err(io::Error::other("disk vanished"))
        }
    }

    struct RefusingEnvironment;

    impl RenderingEnvironment for RefusingEnvironment {
        fn register(&mut self, _: &FontFamilyId, _: FontResource) -> Result<(), RegistrationError> {
            Err(RegistrationError::Rejected("unsupported".into()))
        }
    }

    fn ttf(data: &[u8]) -> UploadedFile {
        UploadedFile::from_bytes("font.ttf", "font/ttf", data.to_vec())
    }

    #[test]
    fn success_stops_at_registered_and_stays_busy() {
        let mut sequence = ActivationSequence::default();
        let mut registry = FontRegistry::new();
        let mut sink = MemoryProgress::new();

        let font = sequence
            .run(ttf(b"abcd"), &FixedParser(ParsedFont::default()), &mut registry, &mut sink)
            .unwrap();

        assert!(registry.contains(&font.family));
        assert_eq!(sequence.state(), ActivationState::Registering);
        assert_eq!(sink.percentages(), vec![0, 20, 40, 60, 80]);
    }

    #[test]
    fn read_failure() {
        let mut sequence = ActivationSequence::default();
        let mut sink = MemoryProgress::new();
        let file = UploadedFile::new("font.ttf", "font/ttf", 10, BrokenSource);

        let err = sequence
            .run(file, &SfntParser, &mut FontRegistry::new(), &mut sink)
            .unwrap_err();

        assert_eq!(err.message(), Message::FontReadFailed);
        assert!(!sequence.is_busy());
        assert_eq!(sink.percentages(), vec![0, 20]);
        assert!(matches!(sink.events().last(), Some(ProgressEvent::HideAfter(_))));
    }

    #[test]
    fn parse_failure() {
        let mut sequence = ActivationSequence::default();
        let mut sink = MemoryProgress::new();

        let err = sequence
            .run(ttf(b"garbage"), &SfntParser, &mut FontRegistry::new(), &mut sink)
            .unwrap_err();

        assert_eq!(err.message(), Message::FontParseFailed);
        assert_eq!(sequence.state(), ActivationState::Idle);
        assert_eq!(sink.percentages(), vec![0, 20, 40]);
    }

    #[test]
    fn registration_failure() {
        let mut sequence = ActivationSequence::default();
        let mut sink = MemoryProgress::new();

        let err = sequence
            .run(
                ttf(b"abcd"),
                &FixedParser(ParsedFont::default()),
                &mut RefusingEnvironment,
                &mut sink,
            )
            .unwrap_err();

        assert_eq!(err.message(), Message::FontRegistrationFailed);
        assert!(!sequence.progress().is_visible());
        assert_eq!(sink.percentages(), vec![0, 20, 40, 60]);
    }

    #[test]
    fn parses_real_font() {
        let mut sequence = ActivationSequence::default();
        let font = sequence
            .run(
                ttf(font_test_data::VAZIRMATN_VAR),
                &SfntParser,
                &mut FontRegistry::new(),
                &mut MemoryProgress::new(),
            )
            .unwrap();
        assert!(font.parsed.axes.iter().any(|a| a.tag == "wght"));
        assert!(font.family.as_str().starts_with("FontDrop_"));
    }
}

//! CLI definitions and command dispatch.

use std::{
    ops::Range,
    path::{Path, PathBuf},
};

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use fontdrop_core::{Collaborators, FixedColor, JsonFileStore, Locale, PreviewConfig, Session};
use log::warn;

use crate::{
    error::ArgError,
    io::{FontFile, StdoutClipboard},
};

#[derive(Parser)]
#[command(name = "fontdrop")]
#[command(about = "Preview a font: variation axes, OpenType features and CSS")]
pub struct Cli {
    /// JSON file holding persisted preview settings
    #[arg(long, global = true, default_value = "fontdrop-settings.json")]
    pub settings: PathBuf,

    /// Language of messages and feature descriptions (ar, en)
    #[arg(long, global = true, default_value_t = Locale::Arabic)]
    pub lang: Locale,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Debug, Clone, Args)]
pub struct FontArgs {
    /// Font file (TTF, OTF or WOFF2)
    pub font: PathBuf,

    /// MIME type to declare instead of guessing from the extension
    #[arg(long)]
    pub mime: Option<String>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Print the variation axes and OpenType features of a font
    Inspect {
        #[command(flatten)]
        font: FontArgs,
    },
    /// Print the CSS declaration block for a preview of the font
    Css {
        #[command(flatten)]
        font: FontArgs,
        /// Font size in pixels
        #[arg(long)]
        size: Option<u32>,
        /// Axis value, e.g. wght=700
        #[arg(long = "axis", value_name = "TAG=VALUE", value_parser = parse_axis_spec)]
        axes: Vec<(String, f32)>,
        /// Text color, e.g. #336699
        #[arg(long)]
        color: Option<String>,
    },
    /// Apply OpenType features to a range of text and print the preview markup
    Apply {
        #[command(flatten)]
        font: FontArgs,
        /// Preview text
        #[arg(long)]
        text: String,
        /// Character range to style, e.g. 0..4
        #[arg(long, value_name = "START..END", value_parser = parse_range)]
        range: Range<usize>,
        /// Feature tag to apply, e.g. liga
        #[arg(long = "feature", value_name = "TAG", required = true)]
        features: Vec<String>,
        /// Axis value, e.g. wght=700
        #[arg(long = "axis", value_name = "TAG=VALUE", value_parser = parse_axis_spec)]
        axes: Vec<(String, f32)>,
    },
}

impl Cli {
    pub fn run(self) -> Result<()> {
        let Self { settings, lang, command } = self;
        command.run(&settings, lang)
    }
}

impl Commands {
    pub fn run(self, settings: &Path, lang: Locale) -> Result<()> {
        match self {
            Commands::Inspect { font } => {
                let mut session = open_session(settings, lang, None);
                load_font(&mut session, &font)?;
                print_info(&session);
            }
            Commands::Css { font, size, axes, color } => {
                let mut session = open_session(settings, lang, color);
                load_font(&mut session, &font)?;
                if let Some(px) = size {
                    session.set_font_size(px)?;
                }
                set_axes(&mut session, &axes)?;
                session.copy_css()?;
            }
            Commands::Apply { font, text, range, features, axes } => {
                let mut session = open_session(settings, lang, None);
                load_font(&mut session, &font)?;
                set_axes(&mut session, &axes)?;
                session.set_text(text);
                session.select(range)?;
                session.select_features(&features)?;
                session.apply_features_to_selection()?;
                println!("{}", session.surface().document.to_html());
            }
        }
        Ok(())
    }
}

fn open_session(settings: &Path, lang: Locale, color: Option<String>) -> Session {
    let collaborators = Collaborators::default()
        .with_store(JsonFileStore::new(settings))
        .with_clipboard(StdoutClipboard)
        .with_colors(FixedColor(color));
    Session::start(PreviewConfig::default().with_locale(lang), collaborators)
}

fn load_font(session: &mut Session, args: &FontArgs) -> Result<()> {
    let file = FontFile::new(&args.font);
    let upload = file.upload(args.mime.as_deref())?;
    session
        .upload(upload)
        .with_context(|| format!("Failed to load font: {}", file.path().display()))?;
    Ok(())
}

fn set_axes(session: &mut Session, axes: &[(String, f32)]) -> Result<()> {
    for (tag, value) in axes {
        let applied = session.set_axis(tag, *value)?;
        if applied != *value {
            warn!("{tag}={value} is outside the axis range, using {applied}");
        }
    }
    Ok(())
}

fn print_info(session: &Session) {
    if let Some(font) = session.active_font() {
        println!("{} ({})", font.file_name, font.family);
    }

    match session.axis_placeholder() {
        Some(text) => println!("{text}"),
        None => {
            println!("Variable font axes:");
            for slider in session.axis_panel().sliders() {
                println!(
                    "  {:4}  {:6.0} .. {:6.0} (default: {:6.0})",
                    slider.tag, slider.min, slider.max, slider.default
                );
            }
        }
    }

    match session.feature_placeholder() {
        Some(text) => println!("{text}"),
        None => {
            println!("OpenType features:");
            for option in session.feature_list().options() {
                println!("  {}", option.label());
            }
        }
    }
}

/// Parse `TAG=VALUE`, e.g. `wght=700`. The value must be finite.
fn parse_axis_spec(s: &str) -> Result<(String, f32), ArgError> {
    let (tag, value) = s.split_once('=').ok_or_else(|| ArgError::InvalidAxisSpec(s.to_string()))?;

    if tag.len() != 4 {
        return Err(ArgError::InvalidTag(tag.to_string()));
    }

    let value: f32 = value.parse().map_err(|_| ArgError::InvalidValue(value.to_string()))?;
    if !value.is_finite() {
        return Err(ArgError::NonFiniteValue(s.to_string()));
    }

    Ok((tag.to_string(), value))
}

/// Parse `START..END` character offsets.
fn parse_range(s: &str) -> Result<Range<usize>, ArgError> {
    let invalid = || ArgError::InvalidRange(s.to_string());
    let (start, end) = s.split_once("..").ok_or_else(invalid)?;
    let start: usize = start.parse().map_err(|_| invalid())?;
    let end: usize = end.parse().map_err(|_| invalid())?;
    if start >= end {
        return Err(ArgError::EmptyRange(s.to_string()));
    }
    Ok(start..end)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn axis_spec_accepts_signed_and_fractional_values() {
        assert_eq!(parse_axis_spec("wght=700"), Ok(("wght".to_string(), 700.0)));
        assert_eq!(parse_axis_spec("slnt=-12.5"), Ok(("slnt".to_string(), -12.5)));
    }

    #[test]
    fn axis_spec_errors() {
        assert_eq!(parse_axis_spec("wght700"), Err(ArgError::InvalidAxisSpec("wght700".into())));
        assert_eq!(parse_axis_spec("wg=700"), Err(ArgError::InvalidTag("wg".into())));
        assert_eq!(parse_axis_spec("wght=bold"), Err(ArgError::InvalidValue("bold".into())));
    }

    #[test]
    fn axis_spec_rejects_non_finite_values() {
        for spec in ["wght=NaN", "wght=inf", "wght=-infinity"] {
            assert_eq!(parse_axis_spec(spec), Err(ArgError::NonFiniteValue(spec.into())));
        }
    }

    #[test]
    fn parse_char_range() {
        assert_eq!(parse_range("0..4"), Ok(0..4));
        assert_eq!(parse_range("3..10"), Ok(3..10));
    }

    #[test]
    fn parse_rejects_bad_ranges() {
        assert_eq!(parse_range("4"), Err(ArgError::InvalidRange("4".into())));
        assert_eq!(parse_range("a..4"), Err(ArgError::InvalidRange("a..4".into())));
        assert_eq!(parse_range("4..4"), Err(ArgError::EmptyRange("4..4".into())));
        assert_eq!(parse_range("5..2"), Err(ArgError::EmptyRange("5..2".into())));
    }

    #[test]
    fn non_finite_axis_flag_is_a_usage_error() {
        let args = ["fontdrop", "css", "font.ttf", "--axis", "wght=NaN"];
        assert!(Cli::try_parse_from(args).is_err());
    }

    #[test]
    fn global_flags_default() {
        let cli = Cli::try_parse_from(["fontdrop", "inspect", "font.ttf"]).unwrap();
        assert_eq!(cli.settings, PathBuf::from("fontdrop-settings.json"));
        assert_eq!(cli.lang, Locale::Arabic);
        assert!(matches!(cli.command, Commands::Inspect { .. }));
    }

    #[test]
    fn css_collects_repeated_axes() {
        let cli = Cli::try_parse_from([
            "fontdrop", "--lang", "en", "css", "font.ttf", "--axis", "wght=700", "--axis",
            "wdth=90", "--size", "72",
        ])
        .unwrap();
        assert_eq!(cli.lang, Locale::English);
        let Commands::Css { axes, size, color, .. } = cli.command else {
            panic!("expected css command");
        };
        assert_eq!(axes, vec![("wght".to_string(), 700.0), ("wdth".to_string(), 90.0)]);
        assert_eq!(size, Some(72));
        assert_eq!(color, None);
    }

    #[test]
    fn apply_requires_a_feature() {
        let args = ["fontdrop", "apply", "font.ttf", "--text", "abc", "--range", "0..1"];
        assert!(Cli::try_parse_from(args).is_err());
    }
}

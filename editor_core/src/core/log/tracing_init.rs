// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

use std::path::Path;

use miette::IntoDiagnostic;
use tracing_appender::rolling::RollingFileAppender;
use tracing_core::LevelFilter;
use tracing_subscriber::{Layer,
                         fmt::format::{Compact, DefaultFields, Format},
                         layer::SubscriberExt,
                         registry::LookupSpan,
                         util::SubscriberInitExt};

use super::{DisplayPreference, TracingConfig, WriterConfig};

/// Type alias for a boxed layer.
pub type DynLayer<S> = dyn Layer<S> + Send + Sync + 'static;

type FmtLayer<S> = tracing_subscriber::fmt::Layer<S, DefaultFields, Format<Compact, ()>>;

/// The `fmt` layer shared by the display and the file writers. Editor core events are
/// short and keyed by their `message` field, so the compact format without timestamps
/// is used.
fn fmt_layer<S>() -> FmtLayer<S>
where
    S: tracing_core::Subscriber,
    for<'a> S: LookupSpan<'a>,
{
    tracing_subscriber::fmt::layer()
        .compact()
        .without_time()
        .with_thread_ids(false)
        .with_thread_names(false)
        .with_target(true)
        .with_file(false)
        .with_line_number(false)
}

/// Install a global subscriber for `tracing_config`. Nothing is installed for
/// [`WriterConfig::None`].
///
/// # Errors
///
/// Returns an error if the log file can't be created, or if a global subscriber has
/// already been installed.
pub fn init(tracing_config: TracingConfig) -> miette::Result<()> {
    let Some(layers) = try_create_layers(&tracing_config)? else {
        return Ok(());
    };
    tracing_subscriber::registry()
        .with(layers)
        .try_init()
        .into_diagnostic()
}

/// The layers for `tracing_config`, without installing them. The first one is the level
/// filter, followed by the display and file layers that the [`WriterConfig`] asks for.
///
/// # Errors
///
/// Returns an error if the log file can't be created.
pub fn try_create_layers(
    tracing_config: &TracingConfig,
) -> miette::Result<Option<Vec<Box<DynLayer<tracing_subscriber::Registry>>>>> {
    let writer_config = tracing_config.get_writer_config();
    if writer_config == WriterConfig::None {
        return Ok(None);
    }

    let level_filter = tracing_config.get_level_filter();
    let mut layers: Vec<Box<DynLayer<tracing_subscriber::Registry>>> =
        vec![Box::new(level_filter)];
    layers.extend(try_create_display_layer(level_filter, writer_config.clone())?);
    layers.extend(try_create_file_layer(level_filter, writer_config)?);

    Ok(Some(layers))
}

/// A boxed layer that writes to stdout or stderr, if `writer_config` has a display.
///
/// # Errors
///
/// This never fails today, the signature matches [`try_create_file_layer`].
pub fn try_create_display_layer<S>(
    level_filter: LevelFilter,
    writer_config: WriterConfig,
) -> miette::Result<Option<Box<DynLayer<S>>>>
where
    S: tracing_core::Subscriber,
    for<'a> S: LookupSpan<'a>,
{
    let display = match writer_config {
        WriterConfig::DisplayAndFile(display, _) | WriterConfig::Display(display) => display,
        WriterConfig::None | WriterConfig::File(_) => return Ok(None),
    };

    let layer: Box<DynLayer<S>> = match display {
        DisplayPreference::Stdout => Box::new(
            fmt_layer()
                .with_writer(std::io::stdout)
                .with_filter(level_filter),
        ),
        DisplayPreference::Stderr => Box::new(
            fmt_layer()
                .with_writer(std::io::stderr)
                .with_filter(level_filter),
        ),
    };
    Ok(Some(layer))
}

/// A boxed layer that appends to a log file, if `writer_config` has one. The file is
/// never rotated.
///
/// # Errors
///
/// Returns an error if the path has no parent folder or no file name.
pub fn try_create_file_layer<S>(
    level_filter: LevelFilter,
    writer_config: WriterConfig,
) -> miette::Result<Option<Box<DynLayer<S>>>>
where
    S: tracing_core::Subscriber,
    for<'a> S: LookupSpan<'a>,
{
    let path = match writer_config {
        WriterConfig::DisplayAndFile(_, path) | WriterConfig::File(path) => path,
        WriterConfig::None | WriterConfig::Display(_) => return Ok(None),
    };

    let layer = fmt_layer()
        .with_ansi(false)
        .with_writer(try_create_log_file(&path)?)
        .with_filter(level_filter);
    Ok(Some(Box::new(layer)))
}

/// Wrapping the appender in [`tracing_appender::non_blocking`] loses events when the
/// guard is dropped early, so it is used as a plain blocking writer.
fn try_create_log_file(path_str: &str) -> miette::Result<RollingFileAppender> {
    let path = Path::new(path_str);
    let (Some(folder), Some(file_name)) = (path.parent(), path.file_name()) else {
        miette::bail!(
            "Can't create log file {}. It needs a folder and a file name.",
            path.display()
        );
    };
    Ok(tracing_appender::rolling::never(folder, file_name))
}

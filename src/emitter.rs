//! JSON file output
//!
//! Writes segment templates, one file per preset and the aggregate config.
//! Every write overwrites in place; a failure aborts the run and leaves
//! whatever was already written.

use anyhow::{Context, Result};
use serde::Serialize;
use serde_json::ser::{Formatter, PrettyFormatter};
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

use crate::config::PresetTable;
use crate::constants::files;
use crate::constants::preset::EMPTY_SEGMENT_COUNT;
use crate::preset::build_full_config;
use crate::segments::{base_segment, empty_segments, qmk_template};
use crate::types::FullConfig;

/// Pretty printer that keeps output pure ASCII
///
/// Anything outside printable ASCII is written as a lowercase `\uXXXX`
/// escape, using surrogate pairs above the BMP. This is the layout device
/// backups and the stock Python tooling produce.
struct AsciiPrettyFormatter<'a> {
    inner: PrettyFormatter<'a>,
}

impl<'a> AsciiPrettyFormatter<'a> {
    fn with_indent(indent: &'a [u8]) -> Self {
        Self {
            inner: PrettyFormatter::with_indent(indent),
        }
    }
}

impl Formatter for AsciiPrettyFormatter<'_> {
    fn begin_array<W: ?Sized + io::Write>(&mut self, writer: &mut W) -> io::Result<()> {
        self.inner.begin_array(writer)
    }

    fn end_array<W: ?Sized + io::Write>(&mut self, writer: &mut W) -> io::Result<()> {
        self.inner.end_array(writer)
    }

    fn begin_array_value<W: ?Sized + io::Write>(&mut self, writer: &mut W, first: bool) -> io::Result<()> {
        self.inner.begin_array_value(writer, first)
    }

    fn end_array_value<W: ?Sized + io::Write>(&mut self, writer: &mut W) -> io::Result<()> {
        self.inner.end_array_value(writer)
    }

    fn begin_object<W: ?Sized + io::Write>(&mut self, writer: &mut W) -> io::Result<()> {
        self.inner.begin_object(writer)
    }

    fn end_object<W: ?Sized + io::Write>(&mut self, writer: &mut W) -> io::Result<()> {
        self.inner.end_object(writer)
    }

    fn begin_object_key<W: ?Sized + io::Write>(&mut self, writer: &mut W, first: bool) -> io::Result<()> {
        self.inner.begin_object_key(writer, first)
    }

    fn end_object_key<W: ?Sized + io::Write>(&mut self, writer: &mut W) -> io::Result<()> {
        self.inner.end_object_key(writer)
    }

    fn begin_object_value<W: ?Sized + io::Write>(&mut self, writer: &mut W) -> io::Result<()> {
        self.inner.begin_object_value(writer)
    }

    fn end_object_value<W: ?Sized + io::Write>(&mut self, writer: &mut W) -> io::Result<()> {
        self.inner.end_object_value(writer)
    }

    // Quotes, backslashes and control characters never reach this point;
    // serde_json escapes those itself
    fn write_string_fragment<W: ?Sized + io::Write>(&mut self, writer: &mut W, fragment: &str) -> io::Result<()> {
        let mut start = 0;
        for (pos, ch) in fragment.char_indices() {
            if (' '..='~').contains(&ch) {
                continue;
            }
            writer.write_all(&fragment.as_bytes()[start..pos])?;
            let mut units = [0u16; 2];
            for unit in ch.encode_utf16(&mut units) {
                write!(writer, "\\u{:04x}", unit)?;
            }
            start = pos + ch.len_utf8();
        }
        writer.write_all(&fragment.as_bytes()[start..])
    }
}

/// Serialize with the given indent, ASCII only, no trailing newline
pub fn to_pretty_json<T: Serialize>(value: &T, indent: &[u8]) -> Result<Vec<u8>> {
    let mut buf = Vec::new();
    let mut serializer = serde_json::Serializer::with_formatter(&mut buf, AsciiPrettyFormatter::with_indent(indent));
    value
        .serialize(&mut serializer)
        .context("Failed to serialize JSON")?;
    Ok(buf)
}

pub struct Emitter {
    output_dir: PathBuf,
}

impl Emitter {
    /// Create the emitter, creating `output_dir` if needed
    pub fn new(output_dir: impl Into<PathBuf>) -> Result<Self> {
        let output_dir = output_dir.into();
        fs::create_dir_all(&output_dir)
            .with_context(|| format!("Failed to create output directory {}", output_dir.display()))?;
        Ok(Self { output_dir })
    }

    pub fn output_dir(&self) -> &Path {
        &self.output_dir
    }

    fn write_json<T: Serialize>(&self, file_name: &str, value: &T, indent: &[u8]) -> Result<PathBuf> {
        let path = self.output_dir.join(file_name);
        let bytes = to_pretty_json(value, indent)
            .with_context(|| format!("Failed to serialize {}", file_name))?;
        fs::write(&path, bytes).with_context(|| format!("Failed to write {}", path.display()))?;
        debug!(path = %path.display(), "Wrote file");
        Ok(path)
    }

    /// Base segment, qmk template (white) and the placeholder list
    pub fn write_segment_templates(&self) -> Result<()> {
        self.write_json(files::SEGMENT_BASE, &base_segment(), files::INDENT)?;
        self.write_json(files::SEGMENT_QMK_TEMPLATE, &qmk_template(), files::INDENT)?;
        self.write_json(files::SEGMENTS_EMPTY, &empty_segments(EMPTY_SEGMENT_COUNT), files::INDENT)?;
        Ok(())
    }

    pub fn write_preset_files(&self, table: &PresetTable) -> Result<Vec<PathBuf>> {
        table
            .iter()
            .map(|preset| {
                debug!(preset = %preset.name, color = %preset.color, "Writing preset");
                self.write_json(&preset.file_name(), &preset.to_document(), files::INDENT)
            })
            .collect()
    }

    pub fn write_full_config(&self, table: &PresetTable) -> Result<FullConfig> {
        let config = build_full_config(table);
        self.write_json(files::FULL_CONFIG, &config, files::FULL_CONFIG_INDENT)?;
        Ok(config)
    }

    /// Write everything, printing a progress line per stage
    pub fn generate_all(&self, table: &PresetTable) -> Result<FullConfig> {
        // Reject unusable names before the first write
        table.validate()?;

        let output_dir = self.output_dir();
        println!("Generating WLED configuration files in {}/", output_dir.display());
        info!(output_dir = %output_dir.display(), presets = table.len(), "Generating configuration");

        self.write_segment_templates()?;
        println!("✓ Generated segment definition files");

        self.write_preset_files(table)?;
        println!("✓ Generated preset files");

        let config = self.write_full_config(table)?;
        println!("✓ Generated complete configuration file");

        Ok(config)
    }

    /// Sorted names of all `.json` files in the output directory
    pub fn list_generated(&self) -> Result<Vec<String>> {
        let mut names = Vec::new();
        for entry in fs::read_dir(&self.output_dir)
            .with_context(|| format!("Failed to read {}", self.output_dir.display()))?
        {
            let path = entry?.path();
            if path.is_file() && path.extension().is_some_and(|ext| ext == "json") {
                if let Some(name) = path.file_name() {
                    names.push(name.to_string_lossy().into_owned());
                }
            }
        }
        names.sort();
        Ok(names)
    }
}

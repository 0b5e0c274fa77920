//! SimGrid platform XML serialization.
//!
//! Renders a [`Platform`] as an indented XML document preceded by the XML
//! declaration and the SimGrid DOCTYPE. Elements without children are
//! self-closing. A blank line follows every `</host>` and the closing
//! `</zone>` tag to keep large platforms readable.

use std::fs;
use std::io::Write;
use std::path::Path;

use color_eyre::eyre::Result;
use quick_xml::events::{BytesEnd, BytesStart, BytesText, Event};
use quick_xml::Writer;

use crate::error::PrepError;
use crate::platform::types::{Disk, Host, Platform, Property};

pub const XML_DECLARATION: &str = "<?xml version='1.0'?>";
pub const SIMGRID_DOCTYPE: &str = "platform SYSTEM \"https://simgrid.org/simgrid.dtd\"";
pub const DEFAULT_INDENT: usize = 4;

/// Formatting options for the serializer
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct XmlStyle {
    /// Spaces per nesting level
    pub indent: usize,
}

impl Default for XmlStyle {
    fn default() -> Self {
        Self { indent: DEFAULT_INDENT }
    }
}

type XmlWriter = Writer<Vec<u8>>;

/// Serialize a platform to XML text
pub fn to_xml(platform: &Platform, style: &XmlStyle) -> Result<String> {
    let mut writer = Writer::new_with_indent(Vec::new(), b' ', style.indent);

    // quick-xml writes declarations with double quotes
    writer.get_mut().write_all(XML_DECLARATION.as_bytes())?;
    writer.get_mut().write_all(b"\n")?;
    writer.write_event(Event::DocType(BytesText::from_escaped(SIMGRID_DOCTYPE)))?;

    writer.write_event(Event::Start(
        BytesStart::new("platform").with_attributes([("version", platform.version.as_str())]),
    ))?;

    let zone = &platform.zone;
    writer.write_event(Event::Start(
        BytesStart::new("zone").with_attributes([("id", zone.id.as_str()), ("routing", zone.routing.as_str())]),
    ))?;

    for host in &zone.hosts {
        write_host(&mut writer, host)?;
    }

    let link = &zone.link;
    writer.write_event(Event::Empty(BytesStart::new("link").with_attributes([
        ("id", link.id.as_str()),
        ("bandwidth", link.bandwidth.as_str()),
        ("latency", link.latency.as_str()),
    ])))?;

    for route in &zone.routes {
        writer.write_event(Event::Start(
            BytesStart::new("route").with_attributes([("src", route.src.as_str()), ("dst", route.dst.as_str())]),
        ))?;
        writer.write_event(Event::Empty(
            BytesStart::new("link_ctn").with_attributes([("id", route.link.as_str())]),
        ))?;
        writer.write_event(Event::End(BytesEnd::new("route")))?;
    }

    writer.write_event(Event::End(BytesEnd::new("zone")))?;
    blank_line(&mut writer)?;
    writer.write_event(Event::End(BytesEnd::new("platform")))?;
    writer.get_mut().write_all(b"\n")?;

    Ok(String::from_utf8(writer.into_inner())?)
}

/// Serialize a platform and write it to `path`
pub fn write_platform(platform: &Platform, style: &XmlStyle, path: &Path) -> Result<()> {
    let xml = to_xml(platform, style)?;
    fs::write(path, xml).map_err(|source| PrepError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    log::info!("Platform XML written to {}", path.display());
    Ok(())
}

/// The writer breaks the line before the next event, so one extra newline
/// leaves an empty line.
fn blank_line(writer: &mut XmlWriter) -> Result<()> {
    writer.get_mut().write_all(b"\n")?;
    Ok(())
}

fn write_host(writer: &mut XmlWriter, host: &Host) -> Result<()> {
    if let Some(comment) = &host.comment {
        let text = format!(" {} ", escape_comment(comment));
        writer.write_event(Event::Comment(BytesText::from_escaped(text)))?;
    }

    let cores = host.cores.to_string();
    let start = BytesStart::new("host").with_attributes([
        ("id", host.id.as_str()),
        ("speed", host.speed.as_str()),
        ("core", cores.as_str()),
    ]);

    if host.properties.is_empty() && host.disk.is_none() {
        writer.write_event(Event::Empty(start))?;
        return Ok(());
    }

    writer.write_event(Event::Start(start))?;
    write_properties(writer, &host.properties)?;
    if let Some(disk) = &host.disk {
        write_disk(writer, disk)?;
    }
    writer.write_event(Event::End(BytesEnd::new("host")))?;
    blank_line(writer)
}

fn write_disk(writer: &mut XmlWriter, disk: &Disk) -> Result<()> {
    let start = BytesStart::new("disk").with_attributes([
        ("id", disk.id.as_str()),
        ("read_bw", disk.read_bw.as_str()),
        ("write_bw", disk.write_bw.as_str()),
    ]);
    if disk.properties.is_empty() {
        writer.write_event(Event::Empty(start))?;
    } else {
        writer.write_event(Event::Start(start))?;
        write_properties(writer, &disk.properties)?;
        writer.write_event(Event::End(BytesEnd::new("disk")))?;
    }
    Ok(())
}

fn write_properties(writer: &mut XmlWriter, properties: &[Property]) -> Result<()> {
    for prop in properties {
        writer.write_event(Event::Empty(
            BytesStart::new("prop").with_attributes([("id", prop.id.as_str()), ("value", prop.value.as_str())]),
        ))?;
    }
    Ok(())
}

/// Comments may not contain "--" or end with "-"
fn escape_comment(text: &str) -> String {
    let mut escaped = text.replace("--", "- -");
    while escaped.contains("--") {
        escaped = escaped.replace("--", "- -");
    }
    if escaped.ends_with('-') {
        escaped.push(' ');
    }
    escaped
}

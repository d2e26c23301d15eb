//! Built-in Word-to-HTML converter
//!
//! Reads `word/document.xml` out of the DOCX zip container and maps
//! paragraphs, headings, bold/italic/underline runs, tabs and breaks to
//! HTML. Text stays XML-escaped, which is also valid escaped HTML. Tables,
//! images and numbering are flattened to their paragraphs. Text boxes hold
//! nested paragraphs and are dropped.

use async_trait::async_trait;
use bytes::Bytes;
use docreview_core::{ClientError, ClientResult};
use regex::Regex;
use std::io::{Cursor, Read};
use std::sync::OnceLock;

use crate::traits::DocxConverter;

/// OLE compound file signature used by legacy `.doc` files.
const OLE_SIGNATURE: [u8; 4] = [0xD0, 0xCF, 0x11, 0xE0];
const DOCUMENT_PART: &str = "word/document.xml";

pub struct DocxHtmlConverter;

#[async_trait]
impl DocxConverter for DocxHtmlConverter {
    async fn convert_to_html(&self, document: Bytes) -> ClientResult<String> {
        tokio::task::spawn_blocking(move || docx_to_html(&document))
            .await
            .map_err(|e| ClientError::Conversion(format!("Conversion task failed: {}", e)))?
    }
}

/// Convert a DOCX file to an HTML fragment.
pub fn docx_to_html(data: &[u8]) -> ClientResult<String> {
    if data.starts_with(&OLE_SIGNATURE) {
        return Err(ClientError::Conversion(
            "Legacy .doc documents cannot be converted, only .docx".to_string(),
        ));
    }

    let mut archive = zip::ZipArchive::new(Cursor::new(data))
        .map_err(|e| ClientError::Conversion(format!("Not a Word document: {}", e)))?;

    let mut xml = String::new();
    archive
        .by_name(DOCUMENT_PART)
        .map_err(|e| ClientError::Conversion(format!("Missing {}: {}", DOCUMENT_PART, e)))?
        .read_to_string(&mut xml)
        .map_err(|e| ClientError::Conversion(format!("Failed to read {}: {}", DOCUMENT_PART, e)))?;

    Ok(document_xml_to_html(&xml))
}

struct Patterns {
    text_box: Regex,
    empty_paragraph: Regex,
    paragraph: Regex,
    paragraph_props: Regex,
    style: Regex,
    heading: Regex,
    run: Regex,
    run_props: Regex,
    bold: Regex,
    italic: Regex,
    underline: Regex,
    token: Regex,
}

fn patterns() -> &'static Patterns {
    static PATTERNS: OnceLock<Patterns> = OnceLock::new();
    PATTERNS.get_or_init(|| {
        let re = |p: &str| Regex::new(p).expect("static pattern is valid");
        Patterns {
            text_box: re(r"(?s)<w:txbxContent(?:\s[^>]*)?>.*?</w:txbxContent>"),
            empty_paragraph: re(r"<w:p(?:\s[^>]*)?/>"),
            paragraph: re(r"(?s)<w:p(?:\s[^>]*)?>(.*?)</w:p>"),
            paragraph_props: re(r"(?s)<w:pPr>.*?</w:pPr>"),
            style: re(r#"<w:pStyle\s+w:val="([^"]+)""#),
            heading: re(r"(?i)^(?:heading\s?([1-6])|title)$"),
            run: re(r"(?s)<w:r(?:\s[^>]*)?>(.*?)</w:r>"),
            run_props: re(r"(?s)<w:rPr>(.*?)</w:rPr>"),
            bold: re(r#"<w:b(?:\s+w:val="(?:1|true|on)")?\s*/>"#),
            italic: re(r#"<w:i(?:\s+w:val="(?:1|true|on)")?\s*/>"#),
            underline: re(r#"<w:u\s+w:val="([^"]*)""#),
            token: re(r"(?s)<w:t(?:\s[^>]*)?>(.*?)</w:t>|<w:tab\s*/>|<w:(?:br|cr)(?:\s[^>]*)?/>"),
        }
    })
}

fn document_xml_to_html(xml: &str) -> String {
    let p = patterns();
    let xml = p.text_box.replace_all(xml, "");
    let xml = p.empty_paragraph.replace_all(&xml, "");

    let mut html = Vec::new();
    for paragraph in p.paragraph.captures_iter(&xml) {
        let inner = &paragraph[1];
        let tag = paragraph_tag(inner);
        let body = p.paragraph_props.replace_all(inner, "");

        let content: String = p.run.captures_iter(&body).map(|run| run_to_html(&run[1])).collect();
        if content.trim().is_empty() {
            continue;
        }
        html.push(format!("<{tag}>{content}</{tag}>"));
    }

    html.join("\n")
}

fn paragraph_tag(paragraph: &str) -> String {
    let p = patterns();
    let Some(style) = p.style.captures(paragraph) else {
        return "p".to_string();
    };

    match p.heading.captures(&style[1]) {
        Some(heading) => match heading.get(1) {
            Some(level) => format!("h{}", level.as_str()),
            None => "h1".to_string(),
        },
        None => "p".to_string(),
    }
}

fn run_to_html(run: &str) -> String {
    let p = patterns();

    let mut text = String::new();
    for token in p.token.captures_iter(run) {
        match token.get(1) {
            Some(t) => text.push_str(t.as_str()),
            None if token[0].starts_with("<w:tab") => text.push('\t'),
            None => text.push_str("<br />"),
        }
    }
    if text.is_empty() {
        return text;
    }

    let props = p
        .run_props
        .captures(run)
        .map(|c| c[1].to_string())
        .unwrap_or_default();

    if p
        .underline
        .captures(&props)
        .is_some_and(|u| &u[1] != "none")
    {
        text = format!("<u>{}</u>", text);
    }
    if p.italic.is_match(&props) {
        text = format!("<em>{}</em>", text);
    }
    if p.bold.is_match(&props) {
        text = format!("<strong>{}</strong>", text);
    }
    text
}

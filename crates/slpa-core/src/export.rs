//! CSV export of a corpus, one row per sign.

use std::io::Write;

use serde::{Deserialize, Serialize};

use crate::corpus::Corpus;
use crate::error::Result;
use crate::schema::CROSSED_WITHOUT_CONTACT;
use crate::sign::{HandConfig, Sign};
use crate::transcription::Transcription;

/// Export header, in column order.
pub const HEADER: [&str; 9] = [
    "gloss",
    "config1hand1",
    "config1hand2",
    "config2hand1",
    "config2hand2",
    "major",
    "minor",
    "movement",
    "orientation",
];

/// Per-export symbol substitutions.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case", default)]
pub struct ExportOptions {
    /// Written in place of each blank slot.
    pub blank: String,
    /// Written in place of `⌧`, for consumers that cannot display it.
    pub crossed_without_contact: String,
}

impl Default for ExportOptions {
    fn default() -> Self {
        Self {
            blank: "_".to_string(),
            crossed_without_contact: CROSSED_WITHOUT_CONTACT.to_string(),
        }
    }
}

/// Bracketed code with export substitutions. An empty transcription exports
/// as an empty cell.
pub fn render_transcription(t: &Transcription, options: &ExportOptions) -> String {
    if t.is_empty() {
        return String::new();
    }
    t.render(&options.blank)
        .replace(CROSSED_WITHOUT_CONTACT, &options.crossed_without_contact)
}

fn row(sign: &Sign, options: &ExportOptions) -> Vec<String> {
    let mut cells = Vec::with_capacity(HEADER.len());
    cells.push(sign.gloss.clone());
    for hc in HandConfig::ALL {
        cells.push(render_transcription(sign.transcription(hc), options));
    }
    let f = &sign.features;
    cells.extend([
        f.major_location.clone(),
        f.minor_location.clone(),
        f.movement.clone(),
        f.orientation.clone(),
    ]);
    cells
}

fn escape(cell: &str) -> String {
    if cell.contains([',', '"', '\n', '\r']) {
        format!("\"{}\"", cell.replace('"', "\"\""))
    } else {
        cell.to_string()
    }
}

fn write_line<W: Write>(out: &mut W, cells: &[String]) -> Result<()> {
    let line: Vec<String> = cells.iter().map(|c| escape(c)).collect();
    writeln!(out, "{}", line.join(","))?;
    Ok(())
}

/// Write the header and one row per sign in corpus order.
pub fn export_csv<W: Write>(corpus: &Corpus, options: &ExportOptions, out: &mut W) -> Result<()> {
    let header: Vec<String> = HEADER.iter().map(|h| h.to_string()).collect();
    write_line(out, &header)?;
    for sign in corpus.iter() {
        write_line(out, &row(sign, options))?;
    }
    Ok(())
}

pub fn export_string(corpus: &Corpus, options: &ExportOptions) -> Result<String> {
    let mut buf = Vec::new();
    export_csv(corpus, options, &mut buf)?;
    Ok(String::from_utf8_lossy(&buf).into_owned())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::transcription::TranscriptionOptions;

    fn corpus() -> Corpus {
        let opts = TranscriptionOptions::default();
        let mut sign = Sign::new("HOUSE");
        let t = sign.transcription_mut(HandConfig::Config1Hand1);
        t.set_slot(2, "O", &opts).unwrap();
        t.set_slot(25, CROSSED_WITHOUT_CONTACT, &opts).unwrap();
        sign.features.movement = "arc, small".into();

        let mut corpus = Corpus::new();
        corpus.insert(sign).unwrap();
        corpus.insert(Sign::new("CAT")).unwrap();
        corpus
    }

    #[test]
    fn header_and_rows() {
        let csv = export_string(&corpus(), &ExportOptions::default()).unwrap();
        let lines: Vec<&str> = csv.lines().collect();
        assert_eq!(lines[0], HEADER.join(","));
        assert_eq!(lines.len(), 3);
        assert!(lines[1].starts_with("HOUSE,[_]1[O___]2"));
        assert!(lines[1].contains("[\u{2327}3___]6"));
        assert!(lines[1].ends_with(",,\"arc, small\","));
        assert_eq!(lines[2], "CAT,,,,,,,,");
    }

    #[test]
    fn substitutions() {
        let options = ExportOptions {
            blank: String::new(),
            crossed_without_contact: "X".into(),
        };
        let corpus = corpus();
        let t = corpus.get("HOUSE").unwrap().transcription(HandConfig::Config1Hand1);
        assert_eq!(
            render_transcription(t, &options),
            "[]1[O]2[\u{2205}/]3[1]4[2]5[X3]6[4]7"
        );
    }

    #[test]
    fn quoting() {
        assert_eq!(escape("plain"), "plain");
        assert_eq!(escape("a,b"), "\"a,b\"");
        assert_eq!(escape("say \"hi\""), "\"say \"\"hi\"\"\"");
    }
}

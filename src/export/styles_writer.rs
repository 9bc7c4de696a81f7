//! Resolves style categories to concrete formatting and writes `styles.xml`.
//!
//! `cellXfs` entry `i` is the category with [`StyleCategory::xf_index`] `i`.

use crate::types::StyleCategory;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum HAlign {
    Center,
    Right,
}

impl HAlign {
    fn as_str(self) -> &'static str {
        match self {
            Self::Center => "center",
            Self::Right => "right",
        }
    }
}

/// Concrete formatting for one category.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct Presentation {
    pub bold: bool,
    pub align: Option<HAlign>,
    /// Solid fill colour, `RRGGBB`.
    pub fill: Option<&'static str>,
    /// Thin black border on all four sides.
    pub border: bool,
}

pub(crate) fn presentation(category: StyleCategory) -> Presentation {
    match category {
        StyleCategory::Plain => Presentation {
            bold: false,
            align: None,
            fill: None,
            border: false,
        },
        StyleCategory::Label => Presentation {
            bold: true,
            align: Some(HAlign::Right),
            fill: None,
            border: false,
        },
        StyleCategory::Data => Presentation {
            bold: false,
            align: Some(HAlign::Center),
            fill: Some("CCFFFF"),
            border: true,
        },
        StyleCategory::Highlight => Presentation {
            bold: false,
            align: None,
            fill: Some("85FFAA"),
            border: true,
        },
    }
}

/// Write the stylesheet for the fixed category set.
pub(crate) fn write_styles_xml() -> String {
    // fills 0 and 1 are reserved by the format
    let mut fills: Vec<&'static str> = Vec::new();
    let mut xfs = String::new();
    for category in StyleCategory::ALL {
        let p = presentation(category);
        let font_id = u32::from(p.bold);
        let border_id = u32::from(p.border);
        let fill_id = match p.fill {
            Some(rgb) => {
                let idx = fills.iter().position(|f| *f == rgb).unwrap_or_else(|| {
                    fills.push(rgb);
                    fills.len() - 1
                });
                idx + 2
            }
            None => 0,
        };

        xfs.push_str(&format!(
            "<xf numFmtId=\"0\" fontId=\"{font_id}\" fillId=\"{fill_id}\" borderId=\"{border_id}\" xfId=\"0\""
        ));
        if p.bold {
            xfs.push_str(" applyFont=\"1\"");
        }
        if fill_id != 0 {
            xfs.push_str(" applyFill=\"1\"");
        }
        if p.border {
            xfs.push_str(" applyBorder=\"1\"");
        }
        match p.align {
            Some(align) => xfs.push_str(&format!(
                " applyAlignment=\"1\"><alignment horizontal=\"{}\"/></xf>",
                align.as_str()
            )),
            None => xfs.push_str("/>"),
        }
    }

    let mut out = String::with_capacity(2048);
    out.push_str(r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>"#);
    out.push('\n');
    out.push_str(r#"<styleSheet xmlns="http://schemas.openxmlformats.org/spreadsheetml/2006/main">"#);

    out.push_str("<fonts count=\"2\">");
    out.push_str("<font><sz val=\"11\"/><name val=\"Calibri\"/><family val=\"2\"/></font>");
    out.push_str("<font><b/><sz val=\"11\"/><name val=\"Calibri\"/><family val=\"2\"/></font>");
    out.push_str("</fonts>");

    out.push_str(&format!("<fills count=\"{}\">", fills.len() + 2));
    out.push_str("<fill><patternFill patternType=\"none\"/></fill>");
    out.push_str("<fill><patternFill patternType=\"gray125\"/></fill>");
    for rgb in &fills {
        out.push_str(&format!(
            "<fill><patternFill patternType=\"solid\"><fgColor rgb=\"FF{rgb}\"/><bgColor indexed=\"64\"/></patternFill></fill>"
        ));
    }
    out.push_str("</fills>");

    out.push_str("<borders count=\"2\">");
    out.push_str("<border><left/><right/><top/><bottom/><diagonal/></border>");
    out.push_str("<border>");
    for side in ["left", "right", "top", "bottom"] {
        out.push_str(&format!(
            "<{side} style=\"thin\"><color rgb=\"FF000000\"/></{side}>"
        ));
    }
    out.push_str("<diagonal/></border>");
    out.push_str("</borders>");

    out.push_str("<cellStyleXfs count=\"1\"><xf numFmtId=\"0\" fontId=\"0\" fillId=\"0\" borderId=\"0\"/></cellStyleXfs>");
    out.push_str(&format!(
        "<cellXfs count=\"{}\">{xfs}</cellXfs>",
        StyleCategory::ALL.len()
    ));
    out.push_str("<cellStyles count=\"1\"><cellStyle name=\"Normal\" xfId=\"0\" builtinId=\"0\"/></cellStyles>");
    out.push_str("</styleSheet>");
    out
}

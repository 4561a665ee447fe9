//! Host HTML document that the chart is mounted into.
//!
//! The host page owns three collaborator elements, found by id:
//! - `holder`: the SVG mount point
//! - `description`: text target for the dataset summary
//! - `tooltip`: the element the hover script fills in
//!
//! The renderer only writes into these elements; it never creates them.
//! The page is parsed with `scraper`, so ids are matched the way a browser
//! matches them: quoted or not, and never inside comments or scripts.

use scraper::node::Text;
use scraper::{ElementRef, Html, Node, Selector};
use tracing::debug;

use heatmap_common::{HeatmapError, HeatmapResult};

use crate::svg::escape_xml;

pub const HOLDER_ID: &str = "holder";
pub const DESCRIPTION_ID: &str = "description";
pub const TOOLTIP_ID: &str = "tooltip";

/// Default host page shipped with the renderer.
pub const DEFAULT_HOST_TEMPLATE: &str = include_str!("../assets/host.html");

const HOLDER_MARKER: &str = "__heatmap_mount_holder__";
const DESCRIPTION_MARKER: &str = "__heatmap_mount_description__";

/// A parsed host template with its mount points located.
///
/// The template is kept as serialized HTML with the holder and description
/// contents removed; the byte offsets of the two emptied slots are stored.
#[derive(Debug, Clone)]
pub struct HostDocument {
    template: String,
    holder_at: usize,
    description_at: usize,
}

impl HostDocument {
    /// Locate the collaborator elements. Fails with `RenderTargetMissing`
    /// naming the first element that cannot be found, or with `Render` when
    /// one target sits inside another and would be overwritten by the mount.
    pub fn parse(html: impl AsRef<str>) -> HeatmapResult<Self> {
        let mut document = Html::parse_document(html.as_ref());

        let targets = [
            (HOLDER_ID, find_target(&document, HOLDER_ID)?),
            (DESCRIPTION_ID, find_target(&document, DESCRIPTION_ID)?),
            (TOOLTIP_ID, find_target(&document, TOOLTIP_ID)?),
        ];
        for (inner_id, inner) in &targets {
            for (outer_id, outer) in &targets {
                if inner.ancestors().any(|a| a.id() == outer.id()) {
                    return Err(HeatmapError::Render(format!(
                        "#{} is nested inside #{}",
                        inner_id, outer_id
                    )));
                }
            }
        }
        let mounts = [
            (targets[0].1.id(), HOLDER_MARKER),
            (targets[1].1.id(), DESCRIPTION_MARKER),
        ];

        for (node_id, marker) in mounts {
            let Some(mut node) = document.tree.get_mut(node_id) else {
                return Err(HeatmapError::Render(format!(
                    "mount point for {} vanished",
                    marker
                )));
            };
            while let Some(mut child) = node.first_child() {
                child.detach();
            }
            node.append(Node::Text(Text {
                text: marker.into(),
            }));
        }

        let mut template = document.html();
        let description_at = take_marker(&mut template, DESCRIPTION_MARKER)?;
        let holder_at = take_marker(&mut template, HOLDER_MARKER)?;
        let description_at = if holder_at < description_at {
            description_at - HOLDER_MARKER.len()
        } else {
            description_at
        };

        Ok(Self {
            template,
            holder_at,
            description_at,
        })
    }

    pub fn default_template() -> HeatmapResult<Self> {
        Self::parse(DEFAULT_HOST_TEMPLATE)
    }

    /// Return the full document with `svg` inside the holder and the
    /// escaped `description` inside the description element. Existing
    /// content of both elements is replaced.
    pub fn mount(&self, svg: &str, description: &str) -> String {
        let mut slots = [
            (self.holder_at, svg.to_string()),
            (self.description_at, escape_xml(description)),
        ];
        // Insert back to front so earlier offsets stay valid.
        slots.sort_by_key(|(at, _)| std::cmp::Reverse(*at));

        let mut out = self.template.clone();
        for (at, content) in slots {
            out.insert_str(at, &content);
        }

        debug!(bytes = out.len(), "Mounted chart into host document");
        out
    }
}

fn find_target<'a>(document: &'a Html, id: &str) -> HeatmapResult<ElementRef<'a>> {
    let selector = Selector::parse(&format!("#{}", id))
        .map_err(|e| HeatmapError::Render(format!("invalid selector for #{}: {}", id, e)))?;

    document
        .select(&selector)
        .next()
        .ok_or_else(|| HeatmapError::RenderTargetMissing(id.to_string()))
}

/// Remove the single occurrence of `marker` and return where it was.
fn take_marker(template: &mut String, marker: &str) -> HeatmapResult<usize> {
    let found: Vec<usize> = template.match_indices(marker).map(|(at, _)| at).collect();
    match found.as_slice() {
        [at] => {
            let at = *at;
            template.replace_range(at..at + marker.len(), "");
            Ok(at)
        }
        _ => Err(HeatmapError::Render(format!(
            "host page must not contain the text {}",
            marker
        ))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_template_has_all_targets() {
        HostDocument::default_template().unwrap();
    }

    #[test]
    fn test_nested_same_tag() {
        let html = r#"<div id="holder"><div>old</div></div><p id="description"></p><div id="tooltip"></div>"#;
        let doc = HostDocument::parse(html).unwrap();
        let out = doc.mount("<svg/>", "desc");
        assert!(out.contains(
            r#"<div id="holder"><svg/></div><p id="description">desc</p><div id="tooltip"></div>"#
        ));
        assert!(!out.contains("old"));
    }
}

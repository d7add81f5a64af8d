use crate::document::path::FieldPath;
use crate::document::value::{Map, Value};

/// The two accepted document layouts.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize)]
pub enum DocumentShape {
    /// `{ "timeline": ..., "output": ..., "merge": ... }` (legacy edit layout).
    Flat,
    /// `{ "template": { "timeline": ... }, "output": ..., "merge": ... }`.
    TemplateWrapped,
}

impl DocumentShape {
    /// `template` wins; a bare `timeline` makes the document flat; anything else is treated as a
    /// template document that is missing its `template`.
    pub fn detect(root: &Map) -> Self {
        if root.contains_key("template") {
            DocumentShape::TemplateWrapped
        } else if root.contains_key("timeline") {
            DocumentShape::Flat
        } else {
            DocumentShape::TemplateWrapped
        }
    }

    /// Top-level keys every document of this shape must carry.
    pub fn required_keys(self) -> [&'static str; 3] {
        match self {
            DocumentShape::Flat => ["timeline", "output", "merge"],
            DocumentShape::TemplateWrapped => ["template", "output", "merge"],
        }
    }

    /// Path of the timeline object.
    pub fn timeline_path(self) -> FieldPath {
        match self {
            DocumentShape::Flat => FieldPath::of(&["timeline"]),
            DocumentShape::TemplateWrapped => FieldPath::of(&["template", "timeline"]),
        }
    }

    /// Path of the subtree that placeholders and media references are collected from.
    pub fn scope_path(self) -> FieldPath {
        match self {
            DocumentShape::Flat => FieldPath::of(&["timeline"]),
            DocumentShape::TemplateWrapped => FieldPath::of(&["template"]),
        }
    }
}

/// A clip reached through a well-formed `tracks[i].clips[j]` chain.
#[derive(Debug, Clone)]
pub struct ClipRef<'a> {
    pub track: usize,
    pub index: usize,
    pub path: FieldPath,
    pub clip: &'a Map,
}

/// One document resolved to its shape, with the sections every validator looks at.
#[derive(Debug, Clone)]
pub struct Normalized<'a> {
    pub shape: DocumentShape,
    pub root: &'a Map,
    /// `template` for wrapped documents; `None` for flat ones.
    pub template: Option<&'a Value>,
    pub timeline: Option<&'a Value>,
    pub output: Option<&'a Value>,
    pub merge: Option<&'a Value>,
}

impl<'a> Normalized<'a> {
    /// `None` when the document root is not an object.
    pub fn new(doc: &'a Value) -> Option<Self> {
        let root = doc.as_object()?;
        let shape = DocumentShape::detect(root);
        let (template, timeline) = match shape {
            DocumentShape::Flat => (None, root.get("timeline")),
            DocumentShape::TemplateWrapped => {
                let template = root.get("template");
                (template, template.and_then(|t| t.get("timeline")))
            }
        };
        Some(Self {
            shape,
            root,
            template,
            timeline,
            output: root.get("output"),
            merge: root.get("merge"),
        })
    }

    /// The subtree placeholders and `src` references live in.
    pub fn scope(&self) -> Option<&'a Value> {
        match self.shape {
            DocumentShape::Flat => self.timeline,
            DocumentShape::TemplateWrapped => self.template,
        }
    }

    /// Every clip object reachable through object tracks holding a `clips` array.
    ///
    /// Malformed links are skipped silently; reporting them is the structural validator's job.
    pub fn clips(&self) -> Vec<ClipRef<'a>> {
        let Some(tracks) = self
            .timeline
            .and_then(|t| t.get("tracks"))
            .and_then(Value::as_array)
        else {
            return Vec::new();
        };

        let tracks_path = self.shape.timeline_path().field("tracks");
        let mut out = Vec::new();
        for (ti, track) in tracks.iter().enumerate() {
            let Some(clips) = track.get("clips").and_then(Value::as_array) else {
                continue;
            };
            for (ci, clip) in clips.iter().enumerate() {
                if let Some(clip) = clip.as_object() {
                    out.push(ClipRef {
                        track: ti,
                        index: ci,
                        path: tracks_path.index(ti).field("clips").index(ci),
                        clip,
                    });
                }
            }
        }
        out
    }
}

#[cfg(test)]
#[path = "../../tests/unit/document/shape.rs"]
mod tests;

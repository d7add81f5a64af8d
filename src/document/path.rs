use std::fmt;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PathElem {
    Field(String),
    Index(usize),
}

/// Location of a node inside a template, rendered as `template.timeline.tracks[0].clips[2].start`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FieldPath {
    elems: Vec<PathElem>,
}

impl FieldPath {
    /// Empty path, rendered as the empty string.
    pub fn root() -> Self {
        Self::default()
    }

    /// Path made of dotted field names, e.g. `FieldPath::of(&["template", "timeline"])`.
    pub fn of(fields: &[&str]) -> Self {
        Self {
            elems: fields
                .iter()
                .map(|f| PathElem::Field((*f).to_string()))
                .collect(),
        }
    }

    /// Child path one field deeper.
    pub fn field(&self, name: &str) -> Self {
        let mut out = self.clone();
        out.push_field(name);
        out
    }

    /// Child path one array index deeper.
    pub fn index(&self, i: usize) -> Self {
        let mut out = self.clone();
        out.push_index(i);
        out
    }

    pub fn push_field(&mut self, name: &str) {
        self.elems.push(PathElem::Field(name.to_string()));
    }

    pub fn push_index(&mut self, i: usize) {
        self.elems.push(PathElem::Index(i));
    }

    pub fn pop(&mut self) {
        self.elems.pop();
    }

    pub fn is_empty(&self) -> bool {
        self.elems.is_empty()
    }

    pub fn elems(&self) -> &[PathElem] {
        &self.elems
    }
}

impl fmt::Display for FieldPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, elem) in self.elems.iter().enumerate() {
            match elem {
                PathElem::Field(name) => {
                    if i > 0 {
                        f.write_str(".")?;
                    }
                    f.write_str(name)?;
                }
                PathElem::Index(idx) => write!(f, "[{idx}]")?,
            }
        }
        Ok(())
    }
}

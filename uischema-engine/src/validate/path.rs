use std::fmt;

use serde::Serialize;

/// One step from a value to one of its children.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Segment {
    Field(String),
    Index(usize),
    Key(String),
}

/// Location of a value inside the validated root.
///
/// Renders as `<root>`, `subject.hidden`, `widgets[2]` or `widgets["main"]`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct FieldPath(Vec<Segment>);

impl FieldPath {
    pub fn root() -> Self {
        Self::default()
    }

    pub fn push(&mut self, segment: Segment) {
        self.0.push(segment);
    }

    pub fn pop(&mut self) {
        self.0.pop();
    }

    pub fn segments(&self) -> &[Segment] {
        &self.0
    }

    pub fn is_root(&self) -> bool {
        self.0.is_empty()
    }
}

impl fmt::Display for FieldPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.0.is_empty() {
            return f.write_str("<root>");
        }
        for (i, segment) in self.0.iter().enumerate() {
            match segment {
                Segment::Field(name) if i == 0 => f.write_str(name)?,
                Segment::Field(name) => write!(f, ".{}", name)?,
                Segment::Index(index) => write!(f, "[{}]", index)?,
                Segment::Key(key) => write!(f, "[{:?}]", key)?,
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display() {
        let mut path = FieldPath::root();
        assert_eq!(path.to_string(), "<root>");

        path.push(Segment::Field("widgets".into()));
        path.push(Segment::Index(2));
        path.push(Segment::Field("subject".into()));
        path.push(Segment::Key("main".into()));
        assert_eq!(path.to_string(), r#"widgets[2].subject["main"]"#);

        path.pop();
        path.pop();
        assert_eq!(path.to_string(), "widgets[2]");
    }

    #[test]
    fn test_index_at_root() {
        let mut path = FieldPath::root();
        path.push(Segment::Index(0));
        path.push(Segment::Field("hidden".into()));
        assert_eq!(path.to_string(), "[0].hidden");
    }
}

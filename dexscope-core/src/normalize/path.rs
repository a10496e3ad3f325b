use std::fmt;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PathSegment {
    Field(String),
    Index(usize),
}

/// Location of a value inside an event, from the root.
///
/// Segments are typed so a key containing a literal `.` can never be confused
/// with a nested field.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct JsonPath {
    segments: Vec<PathSegment>,
}

impl JsonPath {
    pub fn root() -> Self {
        Self::default()
    }

    pub fn push_field(&self, field: &str) -> Self {
        let mut segments = self.segments.clone();
        segments.push(PathSegment::Field(field.to_string()));
        Self { segments }
    }

    pub fn push_index(&self, index: usize) -> Self {
        let mut segments = self.segments.clone();
        segments.push(PathSegment::Index(index));
        Self { segments }
    }

    pub fn segments(&self) -> &[PathSegment] {
        &self.segments
    }

    pub fn last(&self) -> Option<&PathSegment> {
        self.segments.last()
    }

    /// True when the final segment is the field `name` (not an index below it).
    pub fn ends_with_field(&self, name: &str) -> bool {
        matches!(self.last(), Some(PathSegment::Field(field)) if field == name)
    }
}

impl fmt::Display for JsonPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.segments.is_empty() {
            return write!(f, "root");
        }

        for (i, segment) in self.segments.iter().enumerate() {
            match segment {
                PathSegment::Field(field) if i == 0 => write!(f, "{field}")?,
                PathSegment::Field(field) => write!(f, ".{field}")?,
                PathSegment::Index(index) => write!(f, "[{index}]")?,
            }
        }
        Ok(())
    }
}

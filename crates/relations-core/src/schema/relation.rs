#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RelationKind {
    OneToMany,
    OneToOne,
}

/// Links a parent model to a child model through a foreign key field on
/// the child.
#[derive(Debug, Clone)]
pub struct Relation {
    pub kind: RelationKind,

    /// Parent model name
    pub parent: String,

    /// Child model name
    pub child: String,

    /// Referenced parent field. Resolved to the parent's id on
    /// registration.
    pub parent_field: Option<String>,

    /// Foreign key field on the child. Resolved to `<parent table>_id` on
    /// registration.
    pub child_field: Option<String>,
}

impl Relation {
    pub fn one_to_many(parent: impl Into<String>, child: impl Into<String>) -> Relation {
        Relation::new(RelationKind::OneToMany, parent.into(), child.into())
    }

    pub fn one_to_one(parent: impl Into<String>, child: impl Into<String>) -> Relation {
        Relation::new(RelationKind::OneToOne, parent.into(), child.into())
    }

    fn new(kind: RelationKind, parent: String, child: String) -> Relation {
        Relation {
            kind,
            parent,
            child,
            parent_field: None,
            child_field: None,
        }
    }

    pub fn with_parent_field(mut self, field: impl Into<String>) -> Relation {
        self.parent_field = Some(field.into());
        self
    }

    pub fn with_child_field(mut self, field: impl Into<String>) -> Relation {
        self.child_field = Some(field.into());
        self
    }

    pub fn parent_field(&self) -> &str {
        self.parent_field.as_deref().unwrap_or_default()
    }

    pub fn child_field(&self) -> &str {
        self.child_field.as_deref().unwrap_or_default()
    }
}

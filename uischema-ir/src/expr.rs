//! Type expressions.

use std::{
    fmt,
    hash::{Hash, Hasher},
};

use serde::Serialize;

/// Built-in scalar kinds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Primitive {
    Number,
    String,
    Boolean,
    /// Accepts only absence; used to retract an inherited field.
    None,
}

impl Primitive {
    /// Look up a primitive by its reserved name.
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "number" => Some(Primitive::Number),
            "string" => Some(Primitive::String),
            "boolean" => Some(Primitive::Boolean),
            "none" => Some(Primitive::None),
            _ => None,
        }
    }

    /// Get the reserved name.
    pub fn as_str(&self) -> &'static str {
        match self {
            Primitive::Number => "number",
            Primitive::String => "string",
            Primitive::Boolean => "boolean",
            Primitive::None => "none",
        }
    }
}

impl fmt::Display for Primitive {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A disjoint set of string literals.
///
/// Members keep their declaration order for display, but equality and
/// hashing ignore order: `"a"_"b"` and `"b"_"a"` are the same set.
#[derive(Debug, Clone, Serialize)]
#[serde(transparent)]
pub struct LiteralSet(Vec<String>);

impl LiteralSet {
    /// Create a set from members in declaration order.
    ///
    /// Callers are responsible for rejecting duplicates; the parser does.
    pub fn new(members: Vec<String>) -> Self {
        Self(members)
    }

    /// Returns true if `value` is literally one of the members.
    pub fn contains(&self, value: &str) -> bool {
        self.0.iter().any(|m| m == value)
    }

    /// Iterate members in declaration order.
    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.0.iter().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    fn sorted(&self) -> Vec<&str> {
        let mut members: Vec<&str> = self.iter().collect();
        members.sort_unstable();
        members
    }
}

impl PartialEq for LiteralSet {
    fn eq(&self, other: &Self) -> bool {
        self.0.len() == other.0.len() && self.sorted() == other.sorted()
    }
}

impl Eq for LiteralSet {}

impl Hash for LiteralSet {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.sorted().hash(state);
    }
}

impl fmt::Display for LiteralSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, member) in self.0.iter().enumerate() {
            if i > 0 {
                f.write_str("_")?;
            }
            write!(f, "\"{}\"", member)?;
        }
        Ok(())
    }
}

/// A parsed, immutable type expression tree.
///
/// Equality is structural. `Display` renders canonical grammar text that
/// parses back to an equal expression.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(tag = "kind", content = "of", rename_all = "snake_case")]
pub enum TypeExpression {
    Primitive(Primitive),
    /// A qualified type name, or a generic parameter name before substitution.
    Reference(String),
    Literal(String),
    EnumSet(LiteralSet),
    Union(Vec<TypeExpression>),
    /// Struct composition of the members.
    Intersection(Vec<TypeExpression>),
    Optional(Box<TypeExpression>),
    Sequence(Box<TypeExpression>),
    /// Keys are free-form identifiers; values have the inner type.
    Mapping(Box<TypeExpression>),
    Generic(String, Vec<TypeExpression>),
}

impl TypeExpression {
    pub fn reference(name: impl Into<String>) -> Self {
        TypeExpression::Reference(name.into())
    }

    pub fn optional(inner: TypeExpression) -> Self {
        TypeExpression::Optional(Box::new(inner))
    }

    pub fn sequence(inner: TypeExpression) -> Self {
        TypeExpression::Sequence(Box::new(inner))
    }

    pub fn mapping(inner: TypeExpression) -> Self {
        TypeExpression::Mapping(Box::new(inner))
    }

    /// Returns true if this is syntactically `T?`.
    pub fn is_optional(&self) -> bool {
        matches!(self, TypeExpression::Optional(_))
    }

    /// The referenced type name for `Name` and `Name(...)` nodes.
    pub fn head_name(&self) -> Option<&str> {
        match self {
            TypeExpression::Reference(name) | TypeExpression::Generic(name, _) => Some(name),
            _ => None,
        }
    }

    /// Visit this node and every descendant, parents first.
    pub fn walk<'a>(&'a self, visit: &mut impl FnMut(&'a TypeExpression)) {
        visit(self);
        match self {
            TypeExpression::Union(members) | TypeExpression::Intersection(members) => {
                for member in members {
                    member.walk(visit);
                }
            }
            TypeExpression::Optional(inner)
            | TypeExpression::Sequence(inner)
            | TypeExpression::Mapping(inner) => inner.walk(visit),
            TypeExpression::Generic(_, args) => {
                for arg in args {
                    arg.walk(visit);
                }
            }
            TypeExpression::Primitive(_)
            | TypeExpression::Reference(_)
            | TypeExpression::Literal(_)
            | TypeExpression::EnumSet(_) => {}
        }
    }

    /// Every name referenced by `Name` or `Name(...)` nodes, in visit order.
    pub fn referenced_names(&self) -> Vec<&str> {
        let mut names = Vec::new();
        self.walk(&mut |node| {
            if let Some(name) = node.head_name() {
                names.push(name);
            }
        });
        names
    }

    fn precedence(&self) -> u8 {
        match self {
            TypeExpression::Union(_) => 1,
            TypeExpression::Intersection(_) => 2,
            _ => 3,
        }
    }

    fn fmt_operand(&self, f: &mut fmt::Formatter<'_>, parent: u8) -> fmt::Result {
        // a trailing `?` does not group a literal set
        let set = match self {
            TypeExpression::Optional(inner) => inner.as_ref(),
            other => other,
        };
        let bare_set = matches!(set, TypeExpression::EnumSet(set) if set.len() > 1);
        if bare_set || self.precedence() <= parent {
            write!(f, "({})", self)
        } else {
            write!(f, "{}", self)
        }
    }
}

impl From<Primitive> for TypeExpression {
    fn from(primitive: Primitive) -> Self {
        TypeExpression::Primitive(primitive)
    }
}

impl fmt::Display for TypeExpression {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TypeExpression::Primitive(p) => write!(f, "{}", p),
            TypeExpression::Reference(name) => f.write_str(name),
            TypeExpression::Literal(value) => write!(f, "\"{}\"", value),
            TypeExpression::EnumSet(set) => write!(f, "{}", set),
            TypeExpression::Union(members) | TypeExpression::Intersection(members) => {
                let (sep, level) = match self {
                    TypeExpression::Union(_) => ("|", 1),
                    _ => ("+", 2),
                };
                for (i, member) in members.iter().enumerate() {
                    if i > 0 {
                        f.write_str(sep)?;
                    }
                    member.fmt_operand(f, level)?;
                }
                Ok(())
            }
            TypeExpression::Optional(inner) => {
                if inner.precedence() <= 2 || inner.is_optional() {
                    write!(f, "({})?", inner)
                } else {
                    write!(f, "{}?", inner)
                }
            }
            TypeExpression::Sequence(inner) => write!(f, "[{}]", inner),
            TypeExpression::Mapping(inner) => write!(f, "<{}>", inner),
            TypeExpression::Generic(name, args) => {
                write!(f, "{}(", name)?;
                for (i, arg) in args.iter().enumerate() {
                    if i > 0 {
                        f.write_str(",")?;
                    }
                    write!(f, "{}", arg)?;
                }
                f.write_str(")")
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use std::collections::hash_map::DefaultHasher;

    use pretty_assertions::assert_eq;

    use super::*;

    fn hash_of(value: &impl Hash) -> u64 {
        let mut hasher = DefaultHasher::new();
        value.hash(&mut hasher);
        hasher.finish()
    }

    fn units(members: &[&str]) -> TypeExpression {
        TypeExpression::EnumSet(LiteralSet::new(
            members.iter().map(|m| m.to_string()).collect(),
        ))
    }

    #[test]
    fn test_literal_set_order_insensitive() {
        let a = units(&["px", "em", "rem"]);
        let b = units(&["rem", "px", "em"]);
        assert_eq!(a, b);
        assert_eq!(hash_of(&a), hash_of(&b));
        assert_ne!(a, units(&["px", "em"]));
    }

    #[test]
    fn test_display_keeps_declaration_order() {
        assert_eq!(units(&["ch", "em", "ex"]).to_string(), r#""ch"_"em"_"ex""#);
    }

    #[test]
    fn test_display_operators() {
        let size = TypeExpression::Union(vec![
            TypeExpression::reference("UI.Length"),
            Primitive::Number.into(),
        ]);
        assert_eq!(size.to_string(), "UI.Length|number");
        assert_eq!(TypeExpression::optional(size.clone()).to_string(), "(UI.Length|number)?");

        let widgets = TypeExpression::Generic(
            "Maybe".to_string(),
            vec![TypeExpression::Union(vec![
                TypeExpression::sequence(TypeExpression::reference("W")),
                TypeExpression::mapping(TypeExpression::reference("W")),
            ])],
        );
        assert_eq!(widgets.to_string(), "Maybe([W]|<W>)");
    }

    #[test]
    fn test_display_parenthesizes_nested_operands() {
        let nested = TypeExpression::Intersection(vec![
            TypeExpression::Union(vec![
                TypeExpression::reference("A"),
                TypeExpression::reference("B"),
            ]),
            TypeExpression::reference("C"),
        ]);
        assert_eq!(nested.to_string(), "(A|B)+C");

        let mixed = TypeExpression::Union(vec![units(&["a", "b"]), Primitive::String.into()]);
        assert_eq!(mixed.to_string(), r#"("a"_"b")|string"#);

        let optional_set = TypeExpression::Union(vec![
            TypeExpression::optional(units(&["a", "b"])),
            Primitive::String.into(),
        ]);
        assert_eq!(optional_set.to_string(), r#"("a"_"b"?)|string"#);

        let twice = TypeExpression::optional(TypeExpression::optional(Primitive::Number.into()));
        assert_eq!(twice.to_string(), "(number?)?");
    }

    #[test]
    fn test_referenced_names() {
        let expr = TypeExpression::Intersection(vec![
            TypeExpression::Generic("UI.Decorator".to_string(), vec![TypeExpression::reference("W")]),
            TypeExpression::reference("UI.Sizeable"),
        ]);
        assert_eq!(expr.referenced_names(), vec!["UI.Decorator", "W", "UI.Sizeable"]);
    }

    #[test]
    fn test_primitive_names() {
        for p in [Primitive::Number, Primitive::String, Primitive::Boolean, Primitive::None] {
            assert_eq!(Primitive::from_name(p.as_str()), Some(p));
        }
        assert_eq!(Primitive::from_name("Flag"), None);
    }
}

//! Tile definitions.
//!
//! A tile definition is an immutable descriptor: kind, placement flags,
//! persistence flag, capability/requirement bitsets, and a visual blob owned
//! by the editor. The only mutable parts are the visual label and the
//! `hidden` flag on page tiles, both reconciled by the brain model.

use std::fmt;
use std::sync::Arc;

use crate::caps::Capabilities;
use crate::ops::OpId;
use crate::types::TypeId;
use crate::value::Value;

/// Stable tile identifier.
#[derive(Clone, PartialEq, Eq, Hash)]
pub struct TileId(Arc<str>);

impl TileId {
    pub fn new(id: impl Into<Arc<str>>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for TileId {
    fn from(id: &str) -> Self {
        Self::new(id)
    }
}

impl fmt::Display for TileId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl fmt::Debug for TileId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "TileId({})", self.0)
    }
}

/// Side of a rule a tile sequence belongs to.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
pub enum Side {
    When,
    Do,
}

impl fmt::Display for Side {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Side::When => f.write_str("when"),
            Side::Do => f.write_str("do"),
        }
    }
}

bitflags::bitflags! {
    /// Where a tile may legally be placed.
    #[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, Default)]
    pub struct Placement: u8 {
        /// Legal on the WHEN side.
        const WHEN = 1 << 0;
        /// Legal on the DO side.
        const DO = 1 << 1;
        /// Legal inside an expression (and inside parens).
        const INLINE = 1 << 2;
        /// Legal only at statement position.
        const STATEMENT = 1 << 3;
    }
}

impl Placement {
    pub fn allows_side(self, side: Side) -> bool {
        match side {
            Side::When => self.contains(Placement::WHEN),
            Side::Do => self.contains(Placement::DO),
        }
    }
}

/// Whether a sensor is a statement-level predicate or an inline call.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum SensorPlacement {
    Statement,
    Inline,
}

/// Control-flow tiles understood by the parser.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum CfKind {
    OpenParen,
    CloseParen,
}

/// Editor-owned presentation data.
#[derive(Clone, Debug, PartialEq)]
pub struct Visual {
    pub label: String,
    /// Free-form JSON owned by the editor (icon, color, layout hints).
    pub extra: serde_json::Value,
}

impl Visual {
    pub fn label(label: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            extra: serde_json::Value::Null,
        }
    }
}

/// Tile kind, one variant per catalog entry subtype.
#[derive(Clone, Debug, PartialEq)]
pub enum TileKind {
    /// Binary or unary operator resolved through the overload table.
    Operator(OpId),
    /// Parser control flow (parentheses).
    ControlFlow(CfKind),
    /// Named argument slot for a call.
    Parameter { data_type: TypeId, optional: bool },
    /// Syntactic adverb consumed positionally by nearby calls.
    Modifier,
    /// Named slot; persisted.
    Variable {
        name: String,
        var_type: TypeId,
        unique_id: String,
    },
    /// UI-only: creates a fresh `Variable` at selection time.
    VariableFactory { produced: TypeId },
    /// Persisted immediate value.
    Literal {
        value_type: TypeId,
        value: Value,
        label: String,
    },
    /// UI-only: creates a `Literal` from a user value.
    LiteralFactory { produced: TypeId },
    /// Field projection on a struct type.
    Accessor {
        parent: TypeId,
        field: String,
        field_type: TypeId,
        read_only: bool,
    },
    /// Value-producing or predicate call through the function registry.
    Sensor {
        return_type: TypeId,
        placement: SensorPlacement,
    },
    /// Side-effectful terminal on the DO side.
    Actuator,
    /// Reference to another page by its stable page id.
    Page { page_id: String },
    /// Placeholder for a tile id that failed to resolve during
    /// deserialization; round-trips.
    Missing {
        original_kind: String,
        label: String,
    },
}

impl TileKind {
    /// Stable kind discriminator used by the binary format.
    pub fn name(&self) -> &'static str {
        match self {
            TileKind::Operator(_) => "operator",
            TileKind::ControlFlow(_) => "control-flow",
            TileKind::Parameter { .. } => "parameter",
            TileKind::Modifier => "modifier",
            TileKind::Variable { .. } => "variable",
            TileKind::VariableFactory { .. } => "variable-factory",
            TileKind::Literal { .. } => "literal",
            TileKind::LiteralFactory { .. } => "literal-factory",
            TileKind::Accessor { .. } => "accessor",
            TileKind::Sensor { .. } => "sensor",
            TileKind::Actuator => "actuator",
            TileKind::Page { .. } => "page",
            TileKind::Missing { .. } => "missing",
        }
    }
}

/// Immutable tile descriptor.
#[derive(Clone, Debug)]
pub struct TileDef {
    pub id: TileId,
    pub kind: TileKind,
    pub placement: Placement,
    /// Whether the tile is written by catalog serialization.
    pub persist: bool,
    /// Capabilities this tile grants to descendants in the rule tree.
    pub caps: Capabilities,
    /// Capabilities that must be available where this tile is placed.
    pub requires: Capabilities,
    pub visual: Visual,
    /// Page tiles whose page no longer exists are hidden, not removed.
    pub hidden: bool,
}

impl TileDef {
    fn base(id: TileId, kind: TileKind, placement: Placement, label: String) -> Self {
        Self {
            id,
            kind,
            placement,
            persist: false,
            caps: Capabilities::empty(),
            requires: Capabilities::empty(),
            visual: Visual::label(label),
            hidden: false,
        }
    }

    pub fn operator(id: impl Into<TileId>, op: OpId) -> Self {
        let label = op.as_str().to_owned();
        Self::base(
            id.into(),
            TileKind::Operator(op),
            Placement::WHEN | Placement::DO | Placement::INLINE,
            label,
        )
    }

    pub fn open_paren(id: impl Into<TileId>) -> Self {
        Self::base(
            id.into(),
            TileKind::ControlFlow(CfKind::OpenParen),
            Placement::WHEN | Placement::DO | Placement::INLINE,
            "(".to_owned(),
        )
    }

    pub fn close_paren(id: impl Into<TileId>) -> Self {
        Self::base(
            id.into(),
            TileKind::ControlFlow(CfKind::CloseParen),
            Placement::WHEN | Placement::DO | Placement::INLINE,
            ")".to_owned(),
        )
    }

    pub fn parameter(id: impl Into<TileId>, data_type: TypeId, optional: bool) -> Self {
        let id = id.into();
        let label = id.as_str().to_owned();
        Self::base(
            id,
            TileKind::Parameter {
                data_type,
                optional,
            },
            Placement::WHEN | Placement::DO | Placement::INLINE,
            label,
        )
    }

    pub fn modifier(id: impl Into<TileId>) -> Self {
        let id = id.into();
        let label = id.as_str().to_owned();
        Self::base(
            id,
            TileKind::Modifier,
            Placement::WHEN | Placement::DO | Placement::INLINE,
            label,
        )
    }

    pub fn variable(
        id: impl Into<TileId>,
        name: impl Into<String>,
        var_type: TypeId,
        unique_id: impl Into<String>,
    ) -> Self {
        let name = name.into();
        let mut def = Self::base(
            id.into(),
            TileKind::Variable {
                name: name.clone(),
                var_type,
                unique_id: unique_id.into(),
            },
            Placement::WHEN | Placement::DO | Placement::INLINE,
            name,
        );
        def.persist = true;
        def
    }

    pub fn variable_factory(id: impl Into<TileId>, produced: TypeId) -> Self {
        let label = format!("new {produced} variable");
        Self::base(
            id.into(),
            TileKind::VariableFactory { produced },
            Placement::WHEN | Placement::DO | Placement::INLINE,
            label,
        )
    }

    pub fn literal(
        id: impl Into<TileId>,
        value_type: TypeId,
        value: Value,
        label: impl Into<String>,
    ) -> Self {
        let label = label.into();
        let mut def = Self::base(
            id.into(),
            TileKind::Literal {
                value_type,
                value,
                label: label.clone(),
            },
            Placement::WHEN | Placement::DO | Placement::INLINE,
            label,
        );
        def.persist = true;
        def
    }

    pub fn literal_factory(id: impl Into<TileId>, produced: TypeId) -> Self {
        let label = format!("new {produced} literal");
        Self::base(
            id.into(),
            TileKind::LiteralFactory { produced },
            Placement::WHEN | Placement::DO | Placement::INLINE,
            label,
        )
    }

    pub fn accessor(
        id: impl Into<TileId>,
        parent: TypeId,
        field: impl Into<String>,
        field_type: TypeId,
        read_only: bool,
    ) -> Self {
        let field = field.into();
        Self::base(
            id.into(),
            TileKind::Accessor {
                parent,
                field: field.clone(),
                field_type,
                read_only,
            },
            Placement::WHEN | Placement::DO | Placement::INLINE,
            format!(".{field}"),
        )
    }

    pub fn sensor(
        id: impl Into<TileId>,
        return_type: TypeId,
        placement: SensorPlacement,
    ) -> Self {
        let id = id.into();
        let label = id.as_str().to_owned();
        let flags = match placement {
            SensorPlacement::Statement => Placement::WHEN | Placement::STATEMENT,
            SensorPlacement::Inline => Placement::WHEN | Placement::DO | Placement::INLINE,
        };
        Self::base(
            id,
            TileKind::Sensor {
                return_type,
                placement,
            },
            flags,
            label,
        )
    }

    pub fn actuator(id: impl Into<TileId>) -> Self {
        let id = id.into();
        let label = id.as_str().to_owned();
        Self::base(
            id,
            TileKind::Actuator,
            Placement::DO | Placement::STATEMENT,
            label,
        )
    }

    pub fn page(id: impl Into<TileId>, page_id: impl Into<String>, label: impl Into<String>) -> Self {
        let mut def = Self::base(
            id.into(),
            TileKind::Page {
                page_id: page_id.into(),
            },
            Placement::WHEN | Placement::DO | Placement::INLINE,
            label.into(),
        );
        def.persist = true;
        def
    }

    pub fn missing(
        id: impl Into<TileId>,
        original_kind: impl Into<String>,
        label: impl Into<String>,
    ) -> Self {
        let label = label.into();
        let mut def = Self::base(
            id.into(),
            TileKind::Missing {
                original_kind: original_kind.into(),
                label: label.clone(),
            },
            Placement::WHEN | Placement::DO | Placement::INLINE,
            label,
        );
        def.persist = true;
        def
    }

    pub fn with_caps(mut self, caps: Capabilities) -> Self {
        self.caps = caps;
        self
    }

    pub fn with_requires(mut self, requires: Capabilities) -> Self {
        self.requires = requires;
        self
    }

    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.visual.label = label.into();
        self
    }

    pub fn with_placement(mut self, placement: Placement) -> Self {
        self.placement = placement;
        self
    }

    /// Type the tile produces when used as an atom, if any.
    pub fn produced_type(&self) -> Option<TypeId> {
        match &self.kind {
            TileKind::Literal { value_type, .. } => Some(value_type.clone()),
            TileKind::Variable { var_type, .. } => Some(var_type.clone()),
            TileKind::Sensor { return_type, .. } => Some(return_type.clone()),
            TileKind::Accessor { field_type, .. } => Some(field_type.clone()),
            TileKind::Page { .. } => Some(TypeId::page()),
            TileKind::VariableFactory { produced } | TileKind::LiteralFactory { produced } => {
                Some(produced.clone())
            }
            _ => None,
        }
    }
}

use super::value::PatchValue;

// ============================================================================
// Node Model - Typed Slots Without Reflection
// ============================================================================
//
// A patchable object graph is made of three kinds of nodes:
// - Composites expose named members through an explicit lookup table
// - Sequences expose positional elements
// - Members are typed slots that read, write (with coercion) and reset
//
// Every concrete member type implements `FieldType`; the blanket `Member`
// impl turns it into an object-safe slot the resolver can hand around.
//
// ============================================================================

/// Structural shape of a member's declared type
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Shape {
    Scalar,
    Composite,
    Sequence,
}

/// A value could not be converted into the declared type of its target
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("cannot convert {found} into {expected}")]
pub struct CoercionError {
    pub expected: &'static str,
    pub found: &'static str,
}

impl CoercionError {
    pub fn new(expected: &'static str, found: &PatchValue) -> Self {
        Self {
            expected,
            found: found.shape_name(),
        }
    }
}

/// Mutable view of an interior node reached while resolving a path
pub enum NodeMut<'a> {
    Composite(&'a mut dyn Composite),
    Sequence(&'a mut dyn Sequence),
}

/// A concrete type that can live in a patchable member slot
pub trait FieldType: Sized {
    const TYPE_NAME: &'static str;
    const SHAPE: Shape;

    fn to_value(&self) -> PatchValue;

    /// Convert a loosely typed value into this type, failing on shape mismatch
    fn coerce(value: &PatchValue) -> Result<Self, CoercionError>;

    /// The value a `remove` leaves behind
    fn neutral() -> Self;

    fn absent(&self) -> bool {
        false
    }

    /// Interior node for traversal; `None` for scalars and absent composites
    fn descend(&mut self) -> Option<NodeMut<'_>> {
        None
    }
}

/// Object-safe typed slot
pub trait Member {
    fn shape(&self) -> Shape;
    fn is_absent(&self) -> bool;
    fn read(&self) -> PatchValue;
    fn write(&mut self, value: &PatchValue) -> Result<(), CoercionError>;
    fn reset(&mut self);
    /// Deep equality after coercing `value` into this slot's type
    fn matches(&self, value: &PatchValue) -> Result<bool, CoercionError>;
    fn node_mut(&mut self) -> Option<NodeMut<'_>>;
}

impl<T: FieldType> Member for T {
    fn shape(&self) -> Shape {
        T::SHAPE
    }

    fn is_absent(&self) -> bool {
        self.absent()
    }

    fn read(&self) -> PatchValue {
        self.to_value()
    }

    fn write(&mut self, value: &PatchValue) -> Result<(), CoercionError> {
        *self = T::coerce(value)?;
        Ok(())
    }

    fn reset(&mut self) {
        *self = T::neutral();
    }

    fn matches(&self, value: &PatchValue) -> Result<bool, CoercionError> {
        Ok(T::coerce(value)?.to_value() == self.to_value())
    }

    fn node_mut(&mut self) -> Option<NodeMut<'_>> {
        self.descend()
    }
}

/// A node with named members.
///
/// Implementations are explicit lookup tables. Member names are matched
/// case-insensitively.
pub trait Composite {
    fn type_label(&self) -> &'static str;
    fn member_names(&self) -> &'static [&'static str];
    fn member(&self, name: &str) -> Option<&dyn Member>;
    fn member_mut(&mut self, name: &str) -> Option<&mut dyn Member>;
}

/// A node with positional elements
pub trait Sequence {
    fn len(&self) -> usize;
    fn is_empty(&self) -> bool {
        self.len() == 0
    }
    fn read(&self, index: usize) -> Option<PatchValue>;
    /// Insert at `index <= len`
    fn insert(&mut self, index: usize, value: &PatchValue) -> Result<(), CoercionError>;
    /// Overwrite an existing element, returning the previous value.
    ///
    /// `None` when `index` is out of range; the sequence is left untouched.
    fn replace(
        &mut self,
        index: usize,
        value: &PatchValue,
    ) -> Result<Option<PatchValue>, CoercionError>;
    fn remove(&mut self, index: usize) -> Option<PatchValue>;
    fn matches(&self, index: usize, value: &PatchValue) -> Result<bool, CoercionError>;
    fn element_mut(&mut self, index: usize) -> Option<NodeMut<'_>>;
}

impl<T: FieldType> Sequence for Vec<T> {
    fn len(&self) -> usize {
        self.as_slice().len()
    }

    fn read(&self, index: usize) -> Option<PatchValue> {
        self.get(index).map(FieldType::to_value)
    }

    fn insert(&mut self, index: usize, value: &PatchValue) -> Result<(), CoercionError> {
        let element = T::coerce(value)?;
        Vec::insert(self, index, element);
        Ok(())
    }

    fn replace(
        &mut self,
        index: usize,
        value: &PatchValue,
    ) -> Result<Option<PatchValue>, CoercionError> {
        let element = T::coerce(value)?;
        Ok(self
            .get_mut(index)
            .map(|slot| std::mem::replace(slot, element).to_value()))
    }

    fn remove(&mut self, index: usize) -> Option<PatchValue> {
        if index >= self.as_slice().len() {
            return None;
        }
        Some(Vec::remove(self, index).to_value())
    }

    fn matches(&self, index: usize, value: &PatchValue) -> Result<bool, CoercionError> {
        let expected = T::coerce(value)?.to_value();
        Ok(self.get(index).map(FieldType::to_value) == Some(expected))
    }

    fn element_mut(&mut self, index: usize) -> Option<NodeMut<'_>> {
        self.get_mut(index).and_then(FieldType::descend)
    }
}

// ============================================================================
// Field Types
// ============================================================================

impl FieldType for String {
    const TYPE_NAME: &'static str = "text";
    const SHAPE: Shape = Shape::Scalar;

    fn to_value(&self) -> PatchValue {
        PatchValue::Text(self.clone())
    }

    fn coerce(value: &PatchValue) -> Result<Self, CoercionError> {
        match value {
            PatchValue::Text(s) => Ok(s.clone()),
            PatchValue::Number(n) => Ok(n.to_string()),
            PatchValue::Boolean(b) => Ok(b.to_string()),
            other => Err(CoercionError::new(Self::TYPE_NAME, other)),
        }
    }

    fn neutral() -> Self {
        String::new()
    }
}

impl FieldType for f64 {
    const TYPE_NAME: &'static str = "number";
    const SHAPE: Shape = Shape::Scalar;

    fn to_value(&self) -> PatchValue {
        PatchValue::Number(*self)
    }

    fn coerce(value: &PatchValue) -> Result<Self, CoercionError> {
        match value {
            PatchValue::Number(n) => Ok(*n),
            PatchValue::Text(s) => s
                .trim()
                .parse::<f64>()
                .ok()
                .filter(|n| n.is_finite())
                .ok_or_else(|| CoercionError::new(Self::TYPE_NAME, value)),
            other => Err(CoercionError::new(Self::TYPE_NAME, other)),
        }
    }

    fn neutral() -> Self {
        0.0
    }
}

impl<T: FieldType> FieldType for Option<T> {
    const TYPE_NAME: &'static str = T::TYPE_NAME;
    const SHAPE: Shape = T::SHAPE;

    fn to_value(&self) -> PatchValue {
        self.as_ref().map_or(PatchValue::Null, FieldType::to_value)
    }

    fn coerce(value: &PatchValue) -> Result<Self, CoercionError> {
        match value {
            PatchValue::Null => Ok(None),
            other => T::coerce(other).map(Some),
        }
    }

    fn neutral() -> Self {
        None
    }

    fn absent(&self) -> bool {
        self.is_none()
    }

    fn descend(&mut self) -> Option<NodeMut<'_>> {
        self.as_mut().and_then(FieldType::descend)
    }
}

impl<T: FieldType> FieldType for Vec<T> {
    const TYPE_NAME: &'static str = "sequence";
    const SHAPE: Shape = Shape::Sequence;

    fn to_value(&self) -> PatchValue {
        PatchValue::Sequence(self.iter().map(FieldType::to_value).collect())
    }

    fn coerce(value: &PatchValue) -> Result<Self, CoercionError> {
        match value {
            PatchValue::Sequence(items) => items.iter().map(T::coerce).collect(),
            other => Err(CoercionError::new(Self::TYPE_NAME, other)),
        }
    }

    fn neutral() -> Self {
        Vec::new()
    }

    fn descend(&mut self) -> Option<NodeMut<'_>> {
        Some(NodeMut::Sequence(self))
    }
}

// ============================================================================
// Composite Helpers
// ============================================================================

/// Render every member of a composite into a `PatchValue::Composite`
pub fn composite_to_value<C: Composite + ?Sized>(composite: &C) -> PatchValue {
    PatchValue::Composite(
        composite
            .member_names()
            .iter()
            .filter_map(|name| composite.member(name).map(|m| (name.to_string(), m.read())))
            .collect(),
    )
}

/// Build a composite from a loosely typed map.
///
/// Unknown keys are ignored and missing keys keep the type's default, the way
/// the wire format has always been read. A non-composite value is a mismatch.
pub fn coerce_composite<C: Composite + Default>(
    value: &PatchValue,
    expected: &'static str,
) -> Result<C, CoercionError> {
    let PatchValue::Composite(entries) = value else {
        return Err(CoercionError::new(expected, value));
    };

    let mut composite = C::default();
    for (name, member_value) in entries {
        if let Some(member) = composite.member_mut(name) {
            member.write(member_value)?;
        }
    }
    Ok(composite)
}

// ============================================================================
// Unit Tests
// ============================================================================

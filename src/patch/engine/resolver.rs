use crate::patch::core::{
    ApplyFailure, Composite, Member, NodeMut, Pointer, Position, Sequence, Shape, Step,
};

// ============================================================================
// Path Resolution
// ============================================================================
//
// Walks a projection one step at a time. Interior steps must land on an
// existing, present node; the final step yields a `Location` the executor can
// read or write.
//
// ============================================================================

/// The slot a pointer resolved to
pub enum Location<'a> {
    /// A named member of a composite
    Member {
        name: String,
        member: &'a mut dyn Member,
    },
    /// A position in a sequence, in `[0, len]` or the append sentinel
    Element {
        sequence: &'a mut dyn Sequence,
        position: Position,
    },
}

/// Index of an existing element, rejecting `-` and `len`
pub(crate) fn existing_index(
    sequence: &dyn Sequence,
    position: Position,
) -> Result<usize, ApplyFailure> {
    match position {
        Position::Append => Err(ApplyFailure::AppendNotAnElement),
        Position::At(index) if index >= sequence.len() => Err(ApplyFailure::IndexOutOfRange {
            index,
            len: sequence.len(),
        }),
        Position::At(index) => Ok(index),
    }
}

/// Resolve `pointer` against `root`.
///
/// The empty pointer addresses the root itself, which is not a member slot;
/// `action` names what was attempted for the error message.
pub fn resolve<'a>(
    root: &'a mut dyn Composite,
    pointer: &Pointer,
    action: &'static str,
) -> Result<Location<'a>, ApplyFailure> {
    let Some((last, parents)) = pointer.split_last() else {
        return Err(ApplyFailure::RootTarget(action));
    };

    let mut node = NodeMut::Composite(root);
    for step in parents {
        node = descend(node, step)?;
    }

    locate(node, last)
}

fn descend<'a>(node: NodeMut<'a>, step: &Step) -> Result<NodeMut<'a>, ApplyFailure> {
    match node {
        NodeMut::Composite(composite) => {
            let type_label = composite.type_label();
            let member = composite
                .member_mut(step.as_str())
                .ok_or_else(|| ApplyFailure::UnknownMember {
                    type_label,
                    member: step.to_string(),
                })?;

            if member.shape() == Shape::Scalar {
                return Err(ApplyFailure::NotTraversable(step.to_string()));
            }
            if member.is_absent() {
                return Err(ApplyFailure::AbsentComposite(step.to_string()));
            }

            member
                .node_mut()
                .ok_or_else(|| ApplyFailure::NotTraversable(step.to_string()))
        }
        NodeMut::Sequence(sequence) => {
            let position = step
                .position()
                .ok_or_else(|| ApplyFailure::NotAPosition(step.to_string()))?;
            let index = existing_index(&*sequence, position)?;

            sequence
                .element_mut(index)
                .ok_or_else(|| ApplyFailure::NotTraversable(step.to_string()))
        }
    }
}

fn locate<'a>(node: NodeMut<'a>, step: &Step) -> Result<Location<'a>, ApplyFailure> {
    match node {
        NodeMut::Composite(composite) => {
            let type_label = composite.type_label();
            let member = composite
                .member_mut(step.as_str())
                .ok_or_else(|| ApplyFailure::UnknownMember {
                    type_label,
                    member: step.to_string(),
                })?;

            Ok(Location::Member {
                name: step.to_string(),
                member,
            })
        }
        NodeMut::Sequence(sequence) => {
            let position = step
                .position()
                .ok_or_else(|| ApplyFailure::NotAPosition(step.to_string()))?;

            if let Position::At(index) = position {
                let len = sequence.len();
                if index > len {
                    return Err(ApplyFailure::IndexOutOfRange { index, len });
                }
            }

            Ok(Location::Element { sequence, position })
        }
    }
}

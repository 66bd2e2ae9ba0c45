use crate::patch::core::{
    ApplyFailure, Composite, OperationKind, OperationRecord, PatchError, PatchValue, Pointer,
    Position, Shape,
};

use super::resolver::{existing_index, resolve, Location};

// ============================================================================
// Operation Executor
// ============================================================================
//
// Applies one operation record to a working copy:
// record → (kind, pointers, value) → resolve → mutate
//
// ============================================================================

/// Execute a single operation against `root`
pub fn execute(
    root: &mut dyn Composite,
    index: usize,
    record: &OperationRecord,
) -> Result<OperationKind, PatchError> {
    let fail = |path: &str, failure: ApplyFailure| PatchError::new(index, &record.op, path, failure);

    let kind: OperationKind = record
        .op
        .parse()
        .map_err(|e| fail(&record.path, ApplyFailure::from(e)))?;

    let target = Pointer::parse(&record.path).map_err(|e| fail(&record.path, e.into()))?;

    let value = if kind.requires_value() {
        Some(
            record
                .value
                .as_ref()
                .ok_or_else(|| fail(&record.path, ApplyFailure::MissingValue(kind.as_str())))?,
        )
    } else {
        None
    };

    let source = match (&record.from, kind.requires_from()) {
        (Some(from), true) => {
            let pointer = Pointer::parse(from).map_err(|e| fail(from, e.into()))?;
            Some((from.as_str(), pointer))
        }
        (None, true) => return Err(fail(&record.path, ApplyFailure::MissingFrom(kind.as_str()))),
        (_, false) => None,
    };

    match (kind, value, source) {
        (OperationKind::Add, Some(value), _) => {
            let location = resolve(root, &target, "added to").map_err(|f| fail(&record.path, f))?;
            add(location, value).map_err(|f| fail(&record.path, f))?;
        }
        (OperationKind::Remove, _, _) => {
            let location = resolve(root, &target, "removed").map_err(|f| fail(&record.path, f))?;
            remove(location).map_err(|f| fail(&record.path, f))?;
        }
        (OperationKind::Replace, Some(value), _) => {
            let location = resolve(root, &target, "replaced").map_err(|f| fail(&record.path, f))?;
            replace(location, value).map_err(|f| fail(&record.path, f))?;
        }
        (OperationKind::Test, Some(value), _) => {
            let location = resolve(root, &target, "tested").map_err(|f| fail(&record.path, f))?;
            check(location, value).map_err(|f| fail(&record.path, f))?;
        }
        (OperationKind::Move, _, Some((from, source))) => {
            if source == target {
                // No-op, but both ends must still resolve
                let location = resolve(root, &source, "moved").map_err(|f| fail(from, f))?;
                read(location).map_err(|f| fail(from, f))?;
                resolve(root, &target, "moved").map_err(|f| fail(&record.path, f))?;
            } else {
                let location = resolve(root, &source, "moved").map_err(|f| fail(from, f))?;
                let moved = remove(location).map_err(|f| fail(from, f))?;
                let location = resolve(root, &target, "added to").map_err(|f| fail(&record.path, f))?;
                add(location, &moved).map_err(|f| fail(&record.path, f))?;
            }
        }
        (OperationKind::Copy, _, Some((from, source))) => {
            let location = resolve(root, &source, "copied").map_err(|f| fail(from, f))?;
            let copied = read(location).map_err(|f| fail(from, f))?;
            let location = resolve(root, &target, "added to").map_err(|f| fail(&record.path, f))?;
            add(location, &copied).map_err(|f| fail(&record.path, f))?;
        }
        // Operand presence was checked above
        (kind, _, _) => {
            return Err(fail(&record.path, ApplyFailure::MissingValue(kind.as_str())));
        }
    }

    Ok(kind)
}

/// Insert into a sequence, or set a member
fn add(location: Location<'_>, value: &PatchValue) -> Result<(), ApplyFailure> {
    match location {
        Location::Member { member, .. } => Ok(member.write(value)?),
        Location::Element { sequence, position } => {
            let index = match position {
                Position::At(index) => index,
                Position::Append => sequence.len(),
            };
            Ok(sequence.insert(index, value)?)
        }
    }
}

/// Remove a sequence element or reset a member, returning the previous value
fn remove(location: Location<'_>) -> Result<PatchValue, ApplyFailure> {
    match location {
        Location::Member { member, .. } => {
            let previous = member.read();
            member.reset();
            Ok(previous)
        }
        Location::Element { sequence, position } => {
            let index = existing_index(&*sequence, position)?;
            sequence
                .remove(index)
                .ok_or(ApplyFailure::IndexOutOfRange {
                    index,
                    len: sequence.len(),
                })
        }
    }
}

/// Overwrite a value that must already exist
fn replace(location: Location<'_>, value: &PatchValue) -> Result<(), ApplyFailure> {
    match location {
        Location::Member { name, member } => {
            if member.shape() != Shape::Scalar && member.is_absent() {
                return Err(ApplyFailure::AbsentComposite(name));
            }
            Ok(member.write(value)?)
        }
        Location::Element { sequence, position } => {
            let index = existing_index(&*sequence, position)?;
            let len = sequence.len();
            sequence
                .replace(index, value)?
                .map(|_| ())
                .ok_or(ApplyFailure::IndexOutOfRange { index, len })
        }
    }
}

fn read(location: Location<'_>) -> Result<PatchValue, ApplyFailure> {
    match location {
        Location::Member { member, .. } => Ok(member.read()),
        Location::Element { sequence, position } => {
            let index = existing_index(&*sequence, position)?;
            let len = sequence.len();
            sequence
                .read(index)
                .ok_or(ApplyFailure::IndexOutOfRange { index, len })
        }
    }
}

fn check(location: Location<'_>, expected: &PatchValue) -> Result<(), ApplyFailure> {
    let (holds, actual) = match location {
        Location::Member { member, .. } => (member.matches(expected)?, member.read()),
        Location::Element { sequence, position } => {
            let index = existing_index(&*sequence, position)?;
            let holds = sequence.matches(index, expected)?;
            (holds, sequence.read(index).unwrap_or_default())
        }
    };

    if holds {
        Ok(())
    } else {
        Err(ApplyFailure::TestFailed {
            expected: expected.clone(),
            actual,
        })
    }
}

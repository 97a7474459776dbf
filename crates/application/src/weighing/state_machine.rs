use domain::{Direction, DomainError, WeighingRecord, WeighingRequest};

/// What a weighing does to the ledger, decided before anything is written.
#[derive(Debug, Clone, PartialEq)]
pub enum Plan {
    /// Insert an `in` record opening a new session
    Open,
    /// Overwrite the gross weight of this still-open `in` record
    Overwrite(WeighingRecord),
    /// Insert an `out` record closing the session of this record
    Close(WeighingRecord),
    /// Insert an independent `none` record for this container
    Standalone(String),
}

/// Decides how `request` applies given the truck's most recent record.
///
/// The session state is never stored; it is inferred from `previous`:
///
/// | incoming | no previous    | previous `in`         | previous `out`/`none` |
/// |----------|----------------|-----------------------|-----------------------|
/// | `in`     | open           | force to overwrite    | open                  |
/// | `out`    | `NoMatchingIn` | close                 | force to close again  |
/// | `none`   | standalone, `previous` is never consulted                      |
pub fn plan(
    request: &WeighingRequest,
    previous: Option<&WeighingRecord>,
) -> Result<Plan, DomainError> {
    match request.direction {
        Direction::In => plan_in(request, previous),
        Direction::Out => plan_out(request, previous),
        Direction::None => plan_none(request),
    }
}

fn plan_in(
    request: &WeighingRequest,
    previous: Option<&WeighingRecord>,
) -> Result<Plan, DomainError> {
    match previous {
        Some(open) if open.is_open() => {
            ensure_forced(request, open, "two ins in a row without an out")?;
            Ok(Plan::Overwrite(open.clone()))
        }
        _ => Ok(Plan::Open),
    }
}

fn plan_out(
    request: &WeighingRequest,
    previous: Option<&WeighingRecord>,
) -> Result<Plan, DomainError> {
    let Some(previous) = previous else {
        return Err(DomainError::NoMatchingIn(format!(
            "no in for this out (truck {})",
            request.truck
        )));
    };

    if !previous.is_open() {
        ensure_forced(request, previous, "two outs in a row without an in")?;
    }
    Ok(Plan::Close(previous.clone()))
}

fn plan_none(request: &WeighingRequest) -> Result<Plan, DomainError> {
    // Multi-container standalone weighings are not supported.
    match request.containers.as_slice() {
        [container] => Ok(Plan::Standalone(container.clone())),
        other => Err(DomainError::Validation(format!(
            "direction 'none' requires exactly one container, got {}",
            other.len()
        ))),
    }
}

/// Force may only replay a sequence for the same truck
fn ensure_forced(
    request: &WeighingRequest,
    previous: &WeighingRecord,
    conflict: &str,
) -> Result<(), DomainError> {
    if !request.force {
        return Err(DomainError::ConflictingOpenSession(format!(
            "{conflict} (truck {}, session {})",
            previous.truck, previous.session_id
        )));
    }
    if previous.truck != request.truck {
        return Err(DomainError::BadRequest(format!(
            "force cannot apply truck {} to session {} of truck {}",
            request.truck, previous.session_id, previous.truck
        )));
    }
    Ok(())
}
